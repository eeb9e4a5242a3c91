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
//! Viewing rectangles
//!
//! The simulation reads two rectangles every frame: the *safe* view, an area
//! guaranteed to be on screen whatever its shape, and the *full* view, the
//! area actually visible. [`Viewport`] derives the full view from the screen
//! size the same way an SVG `xMidYMid` viewBox is fitted.

use crate::math::{swipe, Rect, Vec2};

/// Source of the viewing rectangles
pub trait ViewProvider {
    /// Area always visible
    fn safe_view(&self) -> Rect;

    /// Area actually visible
    fn full_view(&self) -> Rect;
}

/// Safe view fitted to a screen, centred on the origin
///
/// # Examples
///
/// ```
/// use altng::math::{Rect, Vec2};
/// use altng::view::{ViewProvider, Viewport};
///
/// let mut view = Viewport::new(Rect::from_bounds(-10.0, -10.0, 10.0, 10.0));
/// view.resize(200.0, 100.0);
/// assert_eq!(view.full_view(), Rect::from_bounds(-20.0, -10.0, 20.0, 10.0));
/// assert_eq!(view.screen_to_world(Vec2::new(0.0, 0.0)), Vec2::new(-20.0, 10.0));
/// ```
#[derive(Debug, Clone)]
pub struct Viewport {
    safe: Rect,
    full: Rect,
    screen: Vec2,
}

impl Viewport {
    /// Create a viewport whose full view equals `safe` until resized
    pub fn new(safe: Rect) -> Self {
        Viewport {
            safe,
            full: safe,
            screen: safe.size,
        }
    }

    /// Refit the full view to a `width` by `height` screen
    ///
    /// Degenerate sizes are ignored.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        let screen_ratio = width / height;
        let safe_ratio = self.safe.size.x / self.safe.size.y;

        let span = if safe_ratio <= screen_ratio {
            Vec2::new(self.safe.size.y * screen_ratio, self.safe.size.y)
        } else {
            Vec2::new(self.safe.size.x, self.safe.size.x / screen_ratio)
        };
        self.full = Rect::centered(Vec2::zero(), span);
        self.screen = Vec2::new(width, height);
    }

    /// Map a screen position (y down) to world coordinates (y up)
    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            swipe(p.x, 0.0, self.screen.x, self.full.min_x(), self.full.max_x()),
            swipe(p.y, self.screen.y, 0.0, self.full.min_y(), self.full.max_y()),
        )
    }

    /// Current screen size
    pub fn screen_size(&self) -> Vec2 {
        self.screen
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Rect::from_bounds(-10.0, -10.0, 10.0, 10.0))
    }
}

impl ViewProvider for Viewport {
    fn safe_view(&self) -> Rect {
        self.safe
    }

    fn full_view(&self) -> Rect {
        self.full
    }
}
