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
//! Integration tests for the entity and component lifecycle

use altng::ecs::{Component, ComponentType, Cx, Entity, Kind, Phase, World, COMPONENT};
use altng::frame::FrameContext;
use altng::{EngineError, Result};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

type Journal = Rc<RefCell<Vec<String>>>;

static TRACER: Kind = Kind::derived("Tracer", &COMPONENT);
static SELF_DESTRUCT: Kind = Kind::derived("SelfDestruct", &COMPONENT);

/// Writes every lifecycle callback to a shared journal
struct Tracer {
    name: &'static str,
    journal: Journal,
}

impl Tracer {
    fn new(name: &'static str, journal: &Journal) -> Self {
        Tracer {
            name,
            journal: Rc::clone(journal),
        }
    }

    fn log(&self, event: &str) {
        self.journal.borrow_mut().push(format!("{} {}", event, self.name));
    }
}

impl Component for Tracer {
    fn kind(&self) -> &'static Kind {
        &TRACER
    }

    fn initialize(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
        self.log("init");
        Ok(())
    }

    fn update(&mut self, phase: Phase, _frame: &FrameContext, _cx: &mut Cx<'_>) -> Result<()> {
        if phase == Phase::Update {
            self.log("update");
        }
        Ok(())
    }

    fn terminate(&mut self, _cx: &mut Cx<'_>) {
        self.log("term");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ComponentType for Tracer {
    fn base_kind() -> &'static Kind {
        &TRACER
    }
}

/// Removes its own entity on the first update
struct SelfDestruct;

impl Component for SelfDestruct {
    fn kind(&self) -> &'static Kind {
        &SELF_DESTRUCT
    }

    fn update(&mut self, phase: Phase, _frame: &FrameContext, cx: &mut Cx<'_>) -> Result<()> {
        if phase == Phase::Update {
            let entity = cx.entity();
            cx.world_mut().remove_entity(entity)?;
            assert!(cx.world().is_alive(entity));
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ComponentType for SelfDestruct {
    fn base_kind() -> &'static Kind {
        &SELF_DESTRUCT
    }
}

fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

/// parent -> (left -> leaf), right
fn family(world: &mut World, journal: &Journal) -> (Entity, Entity, Entity, Entity) {
    let parent = world.spawn();
    let left = world.create_entity(parent).unwrap();
    let leaf = world.create_entity(left).unwrap();
    let right = world.create_entity(parent).unwrap();
    world.add(parent, Tracer::new("parent", journal)).unwrap();
    world.add(left, Tracer::new("left", journal)).unwrap();
    world.add(leaf, Tracer::new("leaf", journal)).unwrap();
    world.add(right, Tracer::new("right", journal)).unwrap();
    (parent, left, leaf, right)
}

#[test]
fn test_start_initializes_depth_first() {
    let journal = Journal::default();
    let mut world = World::new();
    family(&mut world, &journal);
    assert!(entries(&journal).is_empty());

    world.start().unwrap();
    assert_eq!(
        entries(&journal),
        vec!["init parent", "init left", "init leaf", "init right"]
    );
}

#[test]
fn test_subtree_terminated_exactly_once() {
    let journal = Journal::default();
    let mut world = World::new();
    let (parent, left, leaf, right) = family(&mut world, &journal);
    world.start().unwrap();
    journal.borrow_mut().clear();

    world.remove_entity(parent).unwrap();
    assert_eq!(
        entries(&journal),
        vec!["term parent", "term left", "term leaf", "term right"]
    );
    for entity in [parent, left, leaf, right] {
        assert!(!world.is_alive(entity));
    }
    assert_eq!(world.entity_count(), 1);
    assert_eq!(world.component_count(), 0);

    assert!(matches!(world.remove_entity(parent), Err(EngineError::UnknownEntity(_))));
    assert_eq!(entries(&journal).len(), 4);
}

#[test]
fn test_never_started_entities_are_not_terminated() {
    let journal = Journal::default();
    let mut world = World::new();
    let (parent, ..) = family(&mut world, &journal);

    world.remove_entity(parent).unwrap();
    assert!(entries(&journal).is_empty());
}

#[test]
fn test_late_entities_initialize_immediately() {
    let journal = Journal::default();
    let mut world = World::new();
    world.start().unwrap();

    let late = world.spawn();
    world.add(late, Tracer::new("late", &journal)).unwrap();
    assert_eq!(entries(&journal), vec!["init late"]);

    world.remove_entity(late).unwrap();
    assert_eq!(entries(&journal), vec!["init late", "term late"]);
}

#[test]
fn test_removal_during_phase_is_deferred() {
    let journal = Journal::default();
    let mut world = World::new();
    let doomed = world.spawn();
    world.add(doomed, SelfDestruct).unwrap();
    world.add(doomed, Tracer::new("doomed", &journal)).unwrap();
    let child = world.create_entity(doomed).unwrap();
    world.add(child, Tracer::new("child", &journal)).unwrap();
    world.start().unwrap();
    journal.borrow_mut().clear();

    world.run_phase(Phase::Update, &FrameContext::default()).unwrap();
    assert_eq!(
        entries(&journal),
        vec!["update doomed", "update child", "term doomed", "term child"]
    );
    assert!(!world.is_alive(doomed));
    assert!(!world.is_alive(child));
}

#[test]
fn test_duplicate_component_rejected() {
    let journal = Journal::default();
    let mut world = World::new();
    let e = world.spawn();
    world.add(e, Tracer::new("first", &journal)).unwrap();
    assert!(matches!(
        world.add(e, Tracer::new("second", &journal)),
        Err(EngineError::DuplicateComponent { .. })
    ));
    assert_eq!(world.components_of(e).unwrap().len(), 1);
}

#[test]
fn test_root_cannot_be_removed() {
    let mut world = World::new();
    let root = world.root();
    assert!(matches!(world.remove_entity(root), Err(EngineError::RootRemoval)));
}
