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
//! Component behaviour and callback context
//!
//! Components are behaviour attached to exactly one entity for their whole
//! lifetime. The world stores them behind [`ComponentId`] handles and drives
//! them through four callbacks:
//!
//! 1. [`Component::attach`] when registered, to resolve sibling components
//! 2. [`Component::initialize`] once, when the owning entity becomes live
//! 3. [`Component::update`] once per [`Phase`] per frame
//! 4. [`Component::terminate`] once, when the entity is removed
//!
//! While a callback runs, the component is taken out of the world, so it can
//! freely borrow the world (and its siblings) through the [`Cx`] it receives.

use crate::ecs::kind::Kind;
use crate::ecs::{Entity, World};
use crate::error::Result;
use crate::frame::FrameContext;
use std::any::Any;
use std::fmt;

slotmap::new_key_type! {
    /// Stable handle to a component stored in the world
    pub struct ComponentId;
}

/// Per-frame lifecycle phase
///
/// A frame runs every phase once, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Input handling and force accumulation
    Update,
    /// Motion integration
    Move,
    /// Collision resolution and constraints
    Collide,
    /// Pushing state to the renderer
    Draw,
}

impl Phase {
    /// All phases in frame order
    pub const ALL: [Phase; 4] = [Phase::Update, Phase::Move, Phase::Collide, Phase::Draw];

    /// Lowercase name of the phase
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Update => "update",
            Phase::Move => "move",
            Phase::Collide => "collide",
            Phase::Draw => "draw",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Behaviour attached to an entity
///
/// Implementors must return their concrete type from `as_any`/`as_any_mut`
/// so the world can hand out typed references.
///
/// # Examples
///
/// ```
/// use altng::ecs::{Component, ComponentType, Cx, Kind, Phase, COMPONENT};
/// use altng::frame::FrameContext;
/// use altng::Result;
/// use std::any::Any;
///
/// static COUNTER: Kind = Kind::derived("Counter", &COMPONENT);
///
/// #[derive(Default)]
/// struct Counter {
///     frames: u32,
/// }
///
/// impl Component for Counter {
///     fn kind(&self) -> &'static Kind {
///         &COUNTER
///     }
///
///     fn update(&mut self, phase: Phase, _: &FrameContext, _: &mut Cx<'_>) -> Result<()> {
///         if phase == Phase::Update {
///             self.frames += 1;
///         }
///         Ok(())
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
///
/// impl ComponentType for Counter {
///     fn base_kind() -> &'static Kind {
///         &COUNTER
///     }
/// }
/// ```
pub trait Component: 'static {
    /// Exact kind of this instance
    fn kind(&self) -> &'static Kind;

    /// Kind an entity may own at most one instance of, counting subkinds
    ///
    /// Types whose kind varies per instance return their common base so a
    /// sibling of another variant is rejected at registration.
    fn family(&self) -> Option<&'static Kind> {
        None
    }

    /// Constructor-time wiring, called when the component is registered
    ///
    /// The component is not yet visible to lookups while this runs. Sibling
    /// components registered before it are.
    fn attach(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        let _ = cx;
        Ok(())
    }

    /// Called once when the owning entity becomes live
    fn initialize(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        let _ = cx;
        Ok(())
    }

    /// Called once per phase per frame
    fn update(&mut self, phase: Phase, frame: &FrameContext, cx: &mut Cx<'_>) -> Result<()> {
        let _ = (phase, frame, cx);
        Ok(())
    }

    /// Called once on removal, only if `initialize` ran
    fn terminate(&mut self, cx: &mut Cx<'_>) {
        let _ = cx;
    }

    /// Upcast for typed access
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Concrete component type that can be looked up by Rust type
pub trait ComponentType: Component + Sized {
    /// Kind every instance of this type is registered under, or beneath
    fn base_kind() -> &'static Kind;
}

/// Context handed to component callbacks
///
/// Gives access to the world and identifies the component being called.
pub struct Cx<'a> {
    world: &'a mut World,
    entity: Entity,
    id: ComponentId,
}

impl<'a> Cx<'a> {
    pub(crate) fn new(world: &'a mut World, entity: Entity, id: ComponentId) -> Self {
        Cx { world, entity, id }
    }

    /// Entity owning the called component
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Id of the called component
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Shared access to the world
    pub fn world(&self) -> &World {
        self.world
    }

    /// Exclusive access to the world
    pub fn world_mut(&mut self) -> &mut World {
        self.world
    }

    /// Id of the unique sibling component of type `T`
    pub fn sibling<T: ComponentType>(&self) -> Result<ComponentId> {
        self.world.component_id(self.entity, T::base_kind())
    }

    /// Borrow a component by id
    pub fn get<T: ComponentType>(&self, id: ComponentId) -> Result<&T> {
        self.world.component::<T>(id)
    }

    /// Mutably borrow a component by id
    pub fn get_mut<T: ComponentType>(&mut self, id: ComponentId) -> Result<&mut T> {
        self.world.component_mut::<T>(id)
    }
}
