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
//! Rigid bodies
//!
//! A [`RigidBody`] joins a [`Collider`] and a [`Motion`] on the same entity
//! with a mass and a rebound coefficient. Rigid bodies are global components:
//! the collision resolver receives all of them at once during the collide
//! phase.

use crate::ecs::{Component, ComponentId, ComponentType, Cx, Entity, Kind, Phase, GLOBAL_COMPONENT};
use crate::error::{EngineError, Result};
use crate::frame::FrameContext;
use crate::physics::collider::{Collider, Contact};
use crate::physics::motion::Motion;
use std::any::Any;

/// Kind of every [`RigidBody`]
pub static RIGID_BODY: Kind = Kind::derived("RigidBody", &GLOBAL_COMPONENT);
/// Kind of rigid bodies with infinite mass
pub static STATIC_RIGID_BODY: Kind = Kind::derived("StaticRigidBody", &RIGID_BODY);

/// Mass of a rigid body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mass {
    /// Finite positive mass
    Finite(f64),
    /// Static body: never moved by collisions, still collided with
    Infinite,
}

impl Mass {
    /// Finite mass value, `None` for static bodies
    pub fn value(&self) -> Option<f64> {
        match *self {
            Mass::Finite(m) => Some(m),
            Mass::Infinite => None,
        }
    }

    /// Check whether collisions may move this body
    pub fn is_finite(&self) -> bool {
        matches!(self, Mass::Finite(_))
    }
}

/// A collision recorded during the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Rigid body collided with
    pub other: ComponentId,
    /// Entity owning `other`
    pub other_entity: Entity,
    /// Contact point and normal from this body's side
    pub contact: Contact,
}

/// Collision-participating body
///
/// Requires a [`Motion`] and a [`Collider`] registered on the entity before
/// it. The collision list is cleared at the start of each move phase and
/// refilled by the resolver during the collide phase.
#[derive(Debug)]
pub struct RigidBody {
    mass: Mass,
    rebound: f64,
    motion: ComponentId,
    collider: ComponentId,
    collisions: Vec<Collision>,
}

impl RigidBody {
    /// Body of finite `mass` with rebound coefficient `rebound`
    ///
    /// Fails unless the mass is finite and positive and the rebound lies in
    /// `[0, 1]`.
    pub fn new(mass: f64, rebound: f64) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "mass",
                value: mass,
            });
        }
        Self::with_mass(Mass::Finite(mass), rebound)
    }

    /// Static body with rebound coefficient `rebound`
    pub fn fixed(rebound: f64) -> Result<Self> {
        Self::with_mass(Mass::Infinite, rebound)
    }

    fn with_mass(mass: Mass, rebound: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&rebound) {
            return Err(EngineError::InvalidParameter {
                name: "rebound",
                value: rebound,
            });
        }
        Ok(RigidBody {
            mass,
            rebound,
            motion: ComponentId::default(),
            collider: ComponentId::default(),
            collisions: Vec::new(),
        })
    }

    /// Mass of the body
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Rebound coefficient
    pub fn rebound(&self) -> f64 {
        self.rebound
    }

    /// Id of the sibling [`Motion`]
    pub fn motion_id(&self) -> ComponentId {
        self.motion
    }

    /// Id of the sibling [`Collider`]
    pub fn collider_id(&self) -> ComponentId {
        self.collider
    }

    /// Collisions recorded this frame
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Check whether anything was hit this frame
    pub fn is_colliding(&self) -> bool {
        !self.collisions.is_empty()
    }

    pub(crate) fn record(&mut self, collision: Collision) {
        self.collisions.push(collision);
    }
}

impl Component for RigidBody {
    fn kind(&self) -> &'static Kind {
        match self.mass {
            Mass::Finite(_) => &RIGID_BODY,
            Mass::Infinite => &STATIC_RIGID_BODY,
        }
    }

    fn family(&self) -> Option<&'static Kind> {
        Some(&RIGID_BODY)
    }

    fn attach(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        self.motion = cx.sibling::<Motion>()?;
        self.collider = cx.sibling::<Collider>()?;
        Ok(())
    }

    fn update(&mut self, phase: Phase, _frame: &FrameContext, _cx: &mut Cx<'_>) -> Result<()> {
        if phase == Phase::Move {
            self.collisions.clear();
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

impl ComponentType for RigidBody {
    fn base_kind() -> &'static Kind {
        &RIGID_BODY
    }
}
