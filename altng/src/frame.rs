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
//! Frame timing and per-frame context

use crate::input::FrameInput;
use crate::math::Rect;
use log::warn;
use std::time::{Duration, Instant};

/// Read-only data shared by every callback of one frame
#[derive(Debug, Clone, Default)]
pub struct FrameContext {
    /// Elapsed time in seconds, already clamped
    pub dt: f64,
    /// Elapsed time in milliseconds, already clamped
    pub dt_ms: f64,
    /// Index of this frame, starting at 0
    pub frame: u64,
    /// Pointer input received since the previous frame
    pub input: FrameInput,
    /// Area always visible whatever the screen shape
    pub safe_view: Rect,
    /// Area actually visible
    pub full_view: Rect,
}

impl FrameContext {
    /// Context for a frame of `dt` with no input and empty views
    pub fn with_dt(dt: Duration) -> Self {
        FrameContext {
            dt: dt.as_secs_f64(),
            dt_ms: dt.as_secs_f64() * 1000.0,
            ..Default::default()
        }
    }
}

/// Measures elapsed time between frames and caps it
///
/// # Examples
///
/// ```
/// use altng::frame::FrameClock;
/// use std::time::{Duration, Instant};
///
/// let mut clock = FrameClock::new(Duration::from_millis(100));
/// let t0 = Instant::now();
/// assert_eq!(clock.advance(t0), Duration::ZERO);
/// assert_eq!(clock.advance(t0 + Duration::from_millis(16)), Duration::from_millis(16));
/// assert_eq!(clock.advance(t0 + Duration::from_secs(2)), Duration::from_millis(100));
/// ```
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_frame_time: Duration,
}

impl FrameClock {
    /// Create a clock capping frames at `max_frame_time`
    pub fn new(max_frame_time: Duration) -> Self {
        FrameClock {
            last: None,
            max_frame_time,
        }
    }

    /// Elapsed time since the previous call, zero on the first call
    pub fn advance(&mut self, now: Instant) -> Duration {
        let elapsed = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        self.clamp(elapsed)
    }

    /// Cap `elapsed` at the maximum frame time, warning when it applies
    pub fn clamp(&self, elapsed: Duration) -> Duration {
        if elapsed > self.max_frame_time {
            warn!(
                "render too slow, capping frame period from {}ms to {}ms",
                elapsed.as_millis(),
                self.max_frame_time.as_millis()
            );
            self.max_frame_time
        } else {
            elapsed
        }
    }

    /// Forget the previous timestamp so the next frame starts from zero
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Maximum frame time
    pub fn max_frame_time(&self) -> Duration {
        self.max_frame_time
    }
}
