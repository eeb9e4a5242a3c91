// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Cross-entity phase handlers
//!
//! Some work cannot be done one component at a time: collision resolution
//! needs every rigid body at once. Such work is registered here as a global
//! handler for a kind and a phase. Each frame, before the tree sweep of a
//! phase, the scheduler calls every relevant handler once with the flat list
//! of live global components of its kind, subkinds included.
//!
//! A handler registered for a parent kind covers subkinds that have no
//! handler of their own, and it still runs only once per phase however many
//! of those subkinds are live.

use crate::ecs::component::{ComponentId, Phase};
use crate::ecs::kind::{Kind, KindId, GLOBAL_COMPONENT};
use crate::ecs::World;
use crate::error::{EngineError, Result};
use crate::frame::FrameContext;
use log::trace;
use std::collections::HashSet;

/// Signature of a global phase handler
///
/// Receives every live global component of the handler's kind and subkinds.
pub type GlobalHandler = fn(&mut World, &FrameContext, &[ComponentId]) -> Result<()>;

/// A handler with metadata for scheduling
struct ScheduledHandler {
    kind: &'static Kind,
    phase: Phase,
    name: &'static str,
    handler: GlobalHandler,
}

/// Per-kind table of global phase handlers
///
/// # Examples
///
/// ```
/// use altng::ecs::{ComponentId, Kind, Phase, Scheduler, World, GLOBAL_COMPONENT};
/// use altng::frame::FrameContext;
/// use altng::Result;
///
/// static SENSOR: Kind = Kind::derived("Sensor", &GLOBAL_COMPONENT);
///
/// fn poll(_world: &mut World, _frame: &FrameContext, sensors: &[ComponentId]) -> Result<()> {
///     assert!(!sensors.is_empty());
///     Ok(())
/// }
///
/// let mut scheduler = Scheduler::new();
/// scheduler.add_global(&SENSOR, Phase::Update, "poll", poll).unwrap();
/// assert!(scheduler.add_global(&SENSOR, Phase::Update, "poll", poll).is_err());
/// assert_eq!(scheduler.handler_count(), 1);
/// ```
pub struct Scheduler {
    handlers: Vec<ScheduledHandler>,
}

impl Scheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Scheduler {
            handlers: Vec::new(),
        }
    }

    /// Register `handler` for `kind` during `phase`
    ///
    /// At most one handler may exist per kind and phase. `kind` must be a
    /// global kind.
    pub fn add_global(
        &mut self,
        kind: &'static Kind,
        phase: Phase,
        name: &'static str,
        handler: GlobalHandler,
    ) -> Result<()> {
        if !kind.is_a(&GLOBAL_COMPONENT) {
            return Err(EngineError::NotADescendant {
                kind: kind.name(),
                root: GLOBAL_COMPONENT.name(),
            });
        }
        if self.find(kind, phase).is_some() {
            return Err(EngineError::DuplicateHandler {
                kind: kind.name(),
                phase: phase.name(),
            });
        }
        self.handlers.push(ScheduledHandler {
            kind,
            phase,
            name,
            handler,
        });
        Ok(())
    }

    fn find(&self, kind: &'static Kind, phase: Phase) -> Option<&ScheduledHandler> {
        self.handlers
            .iter()
            .find(|h| h.phase == phase && std::ptr::eq(h.kind, kind))
    }

    /// Get the number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Check whether a handler exists for `kind` during `phase`
    pub fn has_handler(&self, kind: &'static Kind, phase: Phase) -> bool {
        self.find(kind, phase).is_some()
    }

    /// Run the global handlers relevant to `phase`
    ///
    /// Walks every global kind with live instances. For each of its ancestors,
    /// from the most general down to the kind itself, a handler registered for
    /// that ancestor and this phase is called once with all of the ancestor's
    /// instances. Handlers never run with an empty list. Entity removals
    /// requested by handlers are applied once all handlers have returned.
    pub fn run_global(&self, world: &mut World, phase: Phase, frame: &FrameContext) -> Result<()> {
        if !self.handlers.iter().any(|h| h.phase == phase) {
            return Ok(());
        }

        let mut called: HashSet<KindId> = HashSet::new();
        let mut batches = Vec::new();
        for live in world.live_global_kinds() {
            let mut chain: Vec<&'static Kind> = live.ancestors().collect();
            chain.reverse();
            for kind in chain {
                let Some(scheduled) = self.find(kind, phase) else {
                    continue;
                };
                if called.insert(kind.id()) {
                    batches.push(scheduled);
                }
            }
        }

        world.deferred(|world| {
            for scheduled in batches {
                let instances = world.global_instances(scheduled.kind);
                if instances.is_empty() {
                    continue;
                }
                trace!(
                    "{} handler {} over {} instances",
                    phase,
                    scheduled.name,
                    instances.len()
                );
                (scheduled.handler)(world, frame, &instances)?;
            }
            Ok(())
        })
    }

    /// Remove every handler
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::{Component, Cx};
    use std::any::Any;
    use std::cell::Cell;

    static BODY: Kind = Kind::derived("Body", &GLOBAL_COMPONENT);
    static BALL: Kind = Kind::derived("Ball", &BODY);
    static WALL: Kind = Kind::derived("Wall", &BODY);
    static PLAIN: Kind = Kind::derived("Plain", &crate::ecs::kind::COMPONENT);

    thread_local! {
        static BODY_CALLS: Cell<usize> = const { Cell::new(0) };
        static BODY_SEEN: Cell<usize> = const { Cell::new(0) };
        static BALL_CALLS: Cell<usize> = const { Cell::new(0) };
    }

    struct Tagged(&'static Kind);

    impl Component for Tagged {
        fn kind(&self) -> &'static Kind {
            self.0
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn on_body(_: &mut World, _: &FrameContext, ids: &[ComponentId]) -> Result<()> {
        BODY_CALLS.with(|c| c.set(c.get() + 1));
        BODY_SEEN.with(|c| c.set(c.get() + ids.len()));
        Ok(())
    }

    fn on_ball(_: &mut World, _: &FrameContext, _: &[ComponentId]) -> Result<()> {
        BALL_CALLS.with(|c| c.set(c.get() + 1));
        Ok(())
    }

    #[test]
    fn test_parent_handler_runs_once_for_sibling_subkinds() {
        let mut world = World::new();
        for kind in [&BALL, &WALL, &BALL] {
            let e = world.spawn();
            world.add(e, Tagged(kind)).unwrap();
        }

        let mut scheduler = Scheduler::new();
        scheduler.add_global(&BODY, Phase::Collide, "body", on_body).unwrap();
        scheduler.add_global(&BALL, Phase::Collide, "ball", on_ball).unwrap();

        scheduler
            .run_global(&mut world, Phase::Collide, &FrameContext::default())
            .unwrap();
        assert_eq!(BODY_CALLS.with(Cell::get), 1);
        assert_eq!(BODY_SEEN.with(Cell::get), 3);
        assert_eq!(BALL_CALLS.with(Cell::get), 1);

        // other phases have no handlers
        scheduler
            .run_global(&mut world, Phase::Update, &FrameContext::default())
            .unwrap();
        assert_eq!(BODY_CALLS.with(Cell::get), 1);
    }

    #[test]
    fn test_local_kind_rejected() {
        let mut scheduler = Scheduler::new();
        assert!(matches!(
            scheduler.add_global(&PLAIN, Phase::Update, "plain", on_ball),
            Err(EngineError::NotADescendant { .. })
        ));
        assert!(scheduler
            .add_global(&BALL, Phase::Update, "ball", on_ball)
            .is_ok());
        assert_eq!(
            scheduler.add_global(&BALL, Phase::Update, "again", on_ball),
            Err(EngineError::DuplicateHandler {
                kind: "Ball",
                phase: "update"
            })
        );
        assert!(scheduler.has_handler(&BALL, Phase::Update));
        scheduler.clear();
        assert_eq!(scheduler.handler_count(), 0);
    }
}
