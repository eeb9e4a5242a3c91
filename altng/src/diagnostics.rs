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
//! Runtime diagnostics

use crate::ecs::{Component, ComponentType, Cx, Kind, Phase, COMPONENT};
use crate::error::Result;
use crate::frame::FrameContext;
use log::debug;
use std::any::Any;
use std::time::Duration;

/// Kind of [`FrameRateObserver`]
pub static FRAME_RATE_OBSERVER: Kind = Kind::derived("FrameRateObserver", &COMPONENT);

/// Counts drawn frames and reports the rate once per window
///
/// The simulation attaches one to the root entity unless configured
/// otherwise.
pub struct FrameRateObserver {
    window_ms: f64,
    elapsed_ms: f64,
    frames: u32,
    last_rate: Option<f64>,
}

impl FrameRateObserver {
    /// Report every `window`
    pub fn new(window: Duration) -> Self {
        FrameRateObserver {
            window_ms: window.as_secs_f64() * 1000.0,
            elapsed_ms: 0.0,
            frames: 0,
            last_rate: None,
        }
    }

    /// Frames per second over the last completed window
    pub fn last_rate(&self) -> Option<f64> {
        self.last_rate
    }
}

impl Default for FrameRateObserver {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Component for FrameRateObserver {
    fn kind(&self) -> &'static Kind {
        &FRAME_RATE_OBSERVER
    }

    fn update(&mut self, phase: Phase, frame: &FrameContext, _cx: &mut Cx<'_>) -> Result<()> {
        if phase != Phase::Draw || self.window_ms <= 0.0 {
            return Ok(());
        }
        self.elapsed_ms += frame.dt_ms;
        self.frames += 1;
        if self.elapsed_ms > self.window_ms {
            self.elapsed_ms -= self.window_ms;
            let rate = f64::from(self.frames) * 1000.0 / self.window_ms;
            debug!("{:.1} fps", rate);
            self.last_rate = Some(rate);
            self.frames = 0;
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

impl ComponentType for FrameRateObserver {
    fn base_kind() -> &'static Kind {
        &FRAME_RATE_OBSERVER
    }
}
