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
//! Rigid-body collision resolver
//!
//! Runs once per frame in the collide phase, after every body has moved:
//!
//! 1. **Broad phase**: every unordered pair of rigid bodies is tested for
//!    bounding box overlap. This is O(n²) in the number of bodies.
//! 2. **Narrow phase**: each body of a surviving pair computes its own contact
//!    toward the other. If either side reports none, the pair is skipped.
//! 3. **Response**: both bodies record the collision, then velocities and
//!    positions are corrected (see [`respond`]).
//!
//! Pairs are processed in order and each pair reads the state left by the
//! previous one. Corrections use post-integration state: a fast body may
//! visibly overlap another for one frame before being pushed out.

use crate::ecs::{ComponentId, Entity, World};
use crate::error::Result;
use crate::frame::FrameContext;
use crate::math::Vec2;
use crate::physics::body::{Collision, Mass, RigidBody};
use crate::physics::collider::{Collider, Contact, PlacedShape};
use crate::physics::motion::Motion;
use log::trace;

/// State of one side of a collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Mass of the body
    pub mass: Mass,
    /// Rebound coefficient
    pub rebound: f64,
    /// Position before correction
    pub pos: Vec2,
    /// Velocity before correction
    pub vel: Vec2,
    /// Contact from this body's side
    pub contact: Contact,
}

/// Corrected state of one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Corrected position
    pub pos: Vec2,
    /// Corrected velocity
    pub vel: Vec2,
}

/// Impulse response for a colliding pair
///
/// With `e = a.rebound * b.rebound`, each finite-mass body loses
/// `ratio * ((v_self - v_other) . n) * n` from its velocity, where `n` is its
/// own contact normal and `ratio` is `(1 + e) * m_other / (m_self + m_other)`,
/// or `1 + e` against a static body. The gap between the two contact points
/// is then closed, split evenly between two finite bodies or taken entirely
/// by the finite one. Static bodies are returned unchanged.
///
/// # Examples
///
/// ```
/// use altng::math::Vec2;
/// use altng::physics::{respond, Contact, Impact, Mass};
///
/// let contact = Contact { point: Vec2::zero(), normal: Vec2::new(0.0, -1.0) };
/// let ball = Impact {
///     mass: Mass::Finite(1.0),
///     rebound: 1.0,
///     pos: Vec2::zero(),
///     vel: Vec2::new(0.0, -2.0),
///     contact,
/// };
/// let floor = Impact {
///     mass: Mass::Infinite,
///     rebound: 0.5,
///     pos: Vec2::zero(),
///     vel: Vec2::zero(),
///     contact: Contact { point: Vec2::zero(), normal: Vec2::new(0.0, 1.0) },
/// };
///
/// let (ball, floor) = respond(&ball, &floor);
/// assert_eq!(ball.vel, Vec2::new(0.0, 1.0));
/// assert_eq!(floor.vel, Vec2::zero());
/// ```
pub fn respond(a: &Impact, b: &Impact) -> (Outcome, Outcome) {
    let rebound = a.rebound * b.rebound;
    let delta_vel = a.vel - b.vel;
    let delta_pos = a.contact.point - b.contact.point;
    (
        correct(a, b.mass, rebound, delta_vel, delta_pos),
        correct(b, a.mass, rebound, -delta_vel, -delta_pos),
    )
}

fn correct(this: &Impact, other: Mass, rebound: f64, delta_vel: Vec2, delta_pos: Vec2) -> Outcome {
    let Mass::Finite(mass) = this.mass else {
        return Outcome {
            pos: this.pos,
            vel: this.vel,
        };
    };
    let (speed_ratio, pos_ratio) = match other {
        Mass::Finite(other) => ((1.0 + rebound) * other / (mass + other), 0.5),
        Mass::Infinite => (1.0 + rebound, 1.0),
    };
    let normal = this.contact.normal;
    Outcome {
        pos: this.pos - delta_pos * pos_ratio,
        vel: this.vel - normal * (speed_ratio * delta_vel.dot(normal)),
    }
}

/// Snapshot of a body taken right before its pair is examined
struct BodyState {
    id: ComponentId,
    entity: Entity,
    mass: Mass,
    rebound: f64,
    motion: ComponentId,
    vel: Vec2,
    placed: PlacedShape,
}

impl BodyState {
    fn read(world: &World, id: ComponentId) -> Result<Self> {
        let body = world.component::<RigidBody>(id)?;
        let collider = world.component::<Collider>(body.collider_id())?;
        let motion = world.component::<Motion>(body.motion_id())?;
        Ok(BodyState {
            id,
            entity: world.owner(id)?,
            mass: body.mass(),
            rebound: body.rebound(),
            motion: body.motion_id(),
            vel: motion.vel,
            placed: PlacedShape::new(collider.shape(), motion.pos),
        })
    }

    fn impact(&self, contact: Contact) -> Impact {
        Impact {
            mass: self.mass,
            rebound: self.rebound,
            pos: self.placed.origin,
            vel: self.vel,
            contact,
        }
    }
}

/// Resolve every colliding pair among `bodies`
///
/// Registered as the collide-phase global handler for
/// [`RIGID_BODY`](crate::physics::RIGID_BODY) by
/// [`install`](crate::physics::install).
pub fn resolve_collisions(world: &mut World, _frame: &FrameContext, bodies: &[ComponentId]) -> Result<()> {
    for (i, &a) in bodies.iter().enumerate() {
        for &b in &bodies[i + 1..] {
            resolve_pair(world, a, b)?;
        }
    }
    Ok(())
}

/// Detect and resolve one pair; returns whether they collided
pub fn resolve_pair(world: &mut World, a: ComponentId, b: ComponentId) -> Result<bool> {
    let sa = BodyState::read(world, a)?;
    let sb = BodyState::read(world, b)?;
    if !sa.placed.is_maybe_colliding(&sb.placed) {
        return Ok(false);
    }
    let (Some(ca), Some(cb)) = (sa.placed.contact(&sb.placed)?, sb.placed.contact(&sa.placed)?) else {
        return Ok(false);
    };
    trace!("{} hits {}: normal {:?}", sa.entity, sb.entity, ca.normal);

    world.component_mut::<RigidBody>(sa.id)?.record(Collision {
        other: sb.id,
        other_entity: sb.entity,
        contact: ca,
    });
    world.component_mut::<RigidBody>(sb.id)?.record(Collision {
        other: sa.id,
        other_entity: sa.entity,
        contact: cb,
    });

    let (oa, ob) = respond(&sa.impact(ca), &sb.impact(cb));
    for (state, outcome) in [(&sa, oa), (&sb, ob)] {
        if state.mass.is_finite() {
            let motion = world.component_mut::<Motion>(state.motion)?;
            motion.pos = outcome.pos;
            motion.vel = outcome.vel;
        }
    }
    Ok(true)
}
