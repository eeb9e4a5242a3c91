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
//! 2D rigid-body physics
//!
//! A physical entity carries, in registration order:
//!
//! 1. a [`Motion`] (position, velocity, acceleration)
//! 2. a [`Collider`] (disc or box)
//! 3. a [`RigidBody`] (mass and rebound)
//!
//! plus any forces such as [`Gravity`]. The collision resolver is a global
//! handler; [`install`] registers it with a scheduler.
//!
//! # Example
//!
//! ```
//! use altng::ecs::{Phase, Scheduler, World};
//! use altng::frame::FrameContext;
//! use altng::math::Vec2;
//! use altng::physics::{self, Collider, Motion, RigidBody};
//! use std::time::Duration;
//!
//! let mut world = World::new();
//! let mut scheduler = Scheduler::new();
//! physics::install(&mut scheduler).unwrap();
//!
//! for (x, vx) in [(-0.9, 1.0), (0.9, -1.0)] {
//!     let ball = world.spawn();
//!     world.add(ball, Motion::new(Vec2::new(x, 0.0)).with_velocity(Vec2::new(vx, 0.0))).unwrap();
//!     world.add(ball, Collider::disc(1.0).unwrap()).unwrap();
//!     world.add(ball, RigidBody::new(1.0, 1.0).unwrap()).unwrap();
//! }
//! world.start().unwrap();
//!
//! let frame = FrameContext::with_dt(Duration::from_millis(10));
//! for phase in Phase::ALL {
//!     scheduler.run_global(&mut world, phase, &frame).unwrap();
//!     world.run_phase(phase, &frame).unwrap();
//! }
//! ```

mod body;
mod collider;
mod forces;
mod motion;
mod resolver;

pub use body::{Collision, Mass, RigidBody, RIGID_BODY, STATIC_RIGID_BODY};
pub use collider::{Collider, Contact, PlacedShape, Shape, BOX_COLLIDER, COLLIDER, DISC_COLLIDER};
pub use forces::{Gravity, Tether, GRAVITY, STANDARD_GRAVITY, TETHER};
pub use motion::{Motion, MOTION};
pub use resolver::{resolve_collisions, resolve_pair, respond, Impact, Outcome};

use crate::ecs::{Phase, Scheduler};
use crate::error::Result;

/// Register the collision resolver for the collide phase
pub fn install(scheduler: &mut Scheduler) -> Result<()> {
    scheduler.add_global(&RIGID_BODY, Phase::Collide, "rigid_body_collisions", resolve_collisions)
}
