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
//! Motion integrator
//!
//! Semi-implicit (symplectic) Euler integration:
//!
//! ```text
//! v(t+dt) = v(t) + a(t) * dt
//! x(t+dt) = x(t) + v(t+dt) * dt
//! ```
//!
//! Velocity is updated first and the *new* velocity moves the position, which
//! keeps bouncing bodies from gaining energy the way explicit Euler does.
//!
//! Forces follow an accumulate-and-reset model: anything that pushes the body
//! calls [`Motion::accelerate`] during the update phase, and the integrator
//! consumes the sum and resets it to zero after each step.

use crate::ecs::{Component, ComponentType, Cx, Kind, Phase, COMPONENT};
use crate::error::{EngineError, Result};
use crate::frame::FrameContext;
use crate::math::Vec2;
use std::any::Any;

/// Kind of [`Motion`]
pub static MOTION: Kind = Kind::derived("Motion", &COMPONENT);

/// Position, velocity and accumulated acceleration of an entity
///
/// # Examples
///
/// ```
/// use altng::math::Vec2;
/// use altng::physics::Motion;
///
/// let mut motion = Motion::new(Vec2::zero());
/// motion.accelerate(Vec2::new(0.0, -10.0));
/// motion.integrate(0.1).unwrap();
///
/// assert!((motion.vel.y + 1.0).abs() < 1e-12);
/// assert!((motion.pos.y + 0.1).abs() < 1e-12);
/// assert_eq!(motion.acc, Vec2::zero());
/// assert_eq!(motion.prev_acc(), Vec2::new(0.0, -10.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    /// Current position
    pub pos: Vec2,
    /// Current velocity
    pub vel: Vec2,
    /// Acceleration accumulated since the last step
    pub acc: Vec2,
    prev_pos: Vec2,
    prev_vel: Vec2,
    prev_acc: Vec2,
    prev_dt: f64,
}

impl Motion {
    /// Body at rest at `pos`
    pub fn new(pos: Vec2) -> Self {
        Motion {
            pos,
            vel: Vec2::zero(),
            acc: Vec2::zero(),
            prev_pos: pos,
            prev_vel: Vec2::zero(),
            prev_acc: Vec2::zero(),
            prev_dt: 0.0,
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self.prev_vel = vel;
        self
    }

    /// Add `acc` to the acceleration of the coming step
    pub fn accelerate(&mut self, acc: Vec2) {
        self.acc += acc;
    }

    /// Advance by `dt` seconds
    ///
    /// Snapshots the pre-step state, then applies one symplectic Euler step
    /// and clears the accumulated acceleration. Fails with
    /// [`EngineError::NonFinite`] if the step produces NaN or an infinity, in
    /// which case the current state is left untouched.
    pub fn integrate(&mut self, dt: f64) -> Result<()> {
        let vel = self.vel + self.acc * dt;
        let pos = self.pos + vel * dt;
        if !(vel.is_finite() && pos.is_finite()) {
            return Err(EngineError::NonFinite("Motion::integrate"));
        }

        self.prev_pos = self.pos;
        self.prev_vel = self.vel;
        self.prev_acc = self.acc;
        self.prev_dt = dt;

        self.vel = vel;
        self.pos = pos;
        self.acc = Vec2::zero();
        Ok(())
    }

    /// Place the body at `pos` with no trace of the jump in its history
    pub fn teleport(&mut self, pos: Vec2) {
        self.pos = pos;
        self.prev_pos = pos;
    }

    /// Position before the last step
    pub fn prev_pos(&self) -> Vec2 {
        self.prev_pos
    }

    /// Velocity before the last step
    pub fn prev_vel(&self) -> Vec2 {
        self.prev_vel
    }

    /// Acceleration consumed by the last step
    pub fn prev_acc(&self) -> Vec2 {
        self.prev_acc
    }

    /// Duration of the last step in seconds
    pub fn prev_dt(&self) -> f64 {
        self.prev_dt
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self::new(Vec2::zero())
    }
}

impl Component for Motion {
    fn kind(&self) -> &'static Kind {
        &MOTION
    }

    fn update(&mut self, phase: Phase, frame: &FrameContext, _cx: &mut Cx<'_>) -> Result<()> {
        match phase {
            Phase::Move => self.integrate(frame.dt),
            _ => Ok(()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ComponentType for Motion {
    fn base_kind() -> &'static Kind {
        &MOTION
    }
}
