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
//! Simulation configuration
//!
//! Defaults suit an interactive 60 Hz host. [`SimulationConfig::from_env`]
//! lets a deployment override them without a rebuild:
//!
//! | Variable             | Meaning                                  |
//! |----------------------|------------------------------------------|
//! | `ALTNG_MAX_FRAME_MS` | frame time clamp in milliseconds         |
//! | `ALTNG_FPS_OBSERVER` | `1`/`true` or `0`/`false`                |

use crate::math::Rect;
use log::warn;
use std::time::Duration;

/// Environment variable overriding [`SimulationConfig::max_frame_time`]
pub const MAX_FRAME_MS_VAR: &str = "ALTNG_MAX_FRAME_MS";
/// Environment variable overriding [`SimulationConfig::frame_rate_observer`]
pub const FPS_OBSERVER_VAR: &str = "ALTNG_FPS_OBSERVER";

/// Configuration for a [`Simulation`](crate::Simulation)
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Longest time step a single frame may integrate
    pub max_frame_time: Duration,
    /// Area guaranteed to be visible
    pub safe_view: Rect,
    /// Reporting window of the frame rate observer
    pub fps_window: Duration,
    /// Whether the root entity gets a frame rate observer
    pub frame_rate_observer: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            max_frame_time: Duration::from_millis(100),
            safe_view: Rect::from_bounds(-10.0, -10.0, 10.0, 10.0),
            fps_window: Duration::from_secs(1),
            frame_rate_observer: true,
        }
    }
}

impl SimulationConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame time clamp
    pub fn with_max_frame_time(mut self, max: Duration) -> Self {
        self.max_frame_time = max;
        self
    }

    /// Set the safe view
    pub fn with_safe_view(mut self, view: Rect) -> Self {
        self.safe_view = view;
        self
    }

    /// Set the frame rate reporting window
    pub fn with_fps_window(mut self, window: Duration) -> Self {
        self.fps_window = window;
        self
    }

    /// Do not attach a frame rate observer to the root
    pub fn without_frame_rate_observer(mut self) -> Self {
        self.frame_rate_observer = false;
        self
    }

    /// Defaults overlaid with the process environment
    ///
    /// Values that cannot be parsed are logged and ignored.
    pub fn from_env() -> Self {
        Self::default().overlay(|name| std::env::var(name).ok())
    }

    /// Overlay values provided by `lookup`, keyed by variable name
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(MAX_FRAME_MS_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => self.max_frame_time = Duration::from_millis(ms),
                _ => warn!("ignoring {}={:?}: expected a positive integer", MAX_FRAME_MS_VAR, raw),
            }
        }
        if let Some(raw) = lookup(FPS_OBSERVER_VAR) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => self.frame_rate_observer = true,
                "0" | "false" => self.frame_rate_observer = false,
                _ => warn!("ignoring {}={:?}: expected true or false", FPS_OBSERVER_VAR, raw),
            }
        }
        self
    }
}
