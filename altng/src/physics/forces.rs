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
//! Forces and constraints acting on a sibling [`Motion`]

use crate::ecs::{Component, ComponentId, ComponentType, Cx, Kind, Phase, COMPONENT};
use crate::error::{EngineError, Result};
use crate::frame::FrameContext;
use crate::math::Vec2;
use crate::physics::motion::Motion;
use std::any::Any;

/// Kind of [`Gravity`]
pub static GRAVITY: Kind = Kind::derived("Gravity", &COMPONENT);
/// Kind of [`Tether`]
pub static TETHER: Kind = Kind::derived("Tether", &COMPONENT);

/// Standard gravity at the Earth's surface, in m/s²
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Constant acceleration applied every update phase
pub struct Gravity {
    acc: Vec2,
    motion: ComponentId,
}

impl Gravity {
    /// Constant acceleration `acc`
    pub fn new(acc: Vec2) -> Self {
        Gravity {
            acc,
            motion: ComponentId::default(),
        }
    }

    /// Earth gravity pointing down
    pub fn earth() -> Self {
        Self::new(Vec2::new(0.0, -STANDARD_GRAVITY))
    }

    /// Applied acceleration
    pub fn acceleration(&self) -> Vec2 {
        self.acc
    }
}

impl Component for Gravity {
    fn kind(&self) -> &'static Kind {
        &GRAVITY
    }

    fn attach(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        self.motion = cx.sibling::<Motion>()?;
        Ok(())
    }

    fn update(&mut self, phase: Phase, _frame: &FrameContext, cx: &mut Cx<'_>) -> Result<()> {
        if phase == Phase::Update {
            cx.get_mut::<Motion>(self.motion)?.accelerate(self.acc);
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

impl ComponentType for Gravity {
    fn base_kind() -> &'static Kind {
        &GRAVITY
    }
}

/// Keeps the entity within `radius` of `center`
///
/// Applied in the collide phase, after collision resolution. Velocity is
/// left as is.
pub struct Tether {
    center: Vec2,
    radius: f64,
    motion: ComponentId,
}

impl Tether {
    /// Tether to `center` with maximum distance `radius`
    pub fn new(center: Vec2, radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "tether radius",
                value: radius,
            });
        }
        Ok(Tether {
            center,
            radius,
            motion: ComponentId::default(),
        })
    }

    /// Clamp `pos` to the tether disc
    pub fn clamp(&self, pos: Vec2) -> Result<Vec2> {
        let offset = pos - self.center;
        if offset.norm() <= self.radius {
            return Ok(pos);
        }
        Ok(self.center + offset.normalize()? * self.radius)
    }
}

impl Component for Tether {
    fn kind(&self) -> &'static Kind {
        &TETHER
    }

    fn attach(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        self.motion = cx.sibling::<Motion>()?;
        Ok(())
    }

    fn update(&mut self, phase: Phase, _frame: &FrameContext, cx: &mut Cx<'_>) -> Result<()> {
        if phase == Phase::Collide {
            let motion = cx.get_mut::<Motion>(self.motion)?;
            motion.pos = self.clamp(motion.pos)?;
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

impl ComponentType for Tether {
    fn base_kind() -> &'static Kind {
        &TETHER
    }
}
