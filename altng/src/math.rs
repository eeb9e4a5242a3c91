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
//! 2D geometry primitives
//!
//! [`Vec2`] and axis-aligned [`Rect`] in world units. The world y axis points
//! up. Operations that divide (normalisation, angles) report non-finite results
//! as errors instead of letting NaN leak into the simulation.

use crate::error::{EngineError, Result};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// 2D vector with double-precision components
///
/// # Examples
///
/// ```
/// use altng::math::Vec2;
///
/// let v = Vec2::new(3.0, 4.0);
/// assert_eq!(v.norm(), 5.0);
/// assert!((v.normalize().unwrap().norm() - 1.0).abs() < 1e-12);
/// assert!(Vec2::zero().normalize().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Horizontal component
    pub x: f64,
    /// Vertical component (up is positive)
    pub y: f64,
}

impl Vec2 {
    /// Unit vector along +X
    pub const X: Vec2 = Vec2 { x: 1.0, y: 0.0 };
    /// Unit vector along +Y
    pub const Y: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    /// Create a vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// Create a vector, rejecting NaN and infinities
    pub fn checked(x: f64, y: f64) -> Result<Self> {
        let v = Vec2::new(x, y);
        if v.is_finite() {
            Ok(v)
        } else {
            Err(EngineError::NonFinite("Vec2::checked"))
        }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vec2::new(0.0, 0.0)
    }

    /// Check that both components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Multiply both components by `a`
    pub fn scale(self, a: f64) -> Self {
        Vec2::new(self.x * a, self.y * a)
    }

    /// Euclidean length
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance to another point
    pub fn dist(&self, other: Vec2) -> f64 {
        (*self - other).norm()
    }

    /// Unit vector with the same direction
    ///
    /// Fails with [`EngineError::NonFinite`] for the zero vector and for
    /// vectors whose length does not fit in an `f64`.
    pub fn normalize(self) -> Result<Self> {
        let n = self.norm();
        if !n.is_finite() || n <= 0.0 {
            return Err(EngineError::NonFinite("Vec2::normalize"));
        }
        Ok(Vec2::new(self.x / n, self.y / n))
    }

    /// Dot product
    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product
    pub fn cross(&self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Signed angle from `self` to `other`, in radians
    pub fn angle_with(&self, other: Vec2) -> Result<f64> {
        let angle = self.cross(other).atan2(self.dot(other));
        if angle.is_finite() {
            Ok(angle)
        } else {
            Err(EngineError::NonFinite("Vec2::angle_with"))
        }
    }

    /// Rotate counter-clockwise by `angle` radians
    pub fn rotate(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Vec2::new(c * self.x - s * self.y, s * self.x + c * self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, a: f64) -> Vec2 {
        self.scale(a)
    }
}

/// Axis-aligned rectangle given by its minimum corner and its size
///
/// Sizes are expected to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Minimum corner (bottom-left in world space)
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    /// Create a rectangle from its minimum corner and size
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Rect { pos, size }
    }

    /// Create a rectangle from its bounds
    pub fn from_bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Rect::new(Vec2::new(min_x, min_y), Vec2::new(max_x - min_x, max_y - min_y))
    }

    /// Create a rectangle of the given size centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Rect::new(center - size.scale(0.5), size)
    }

    /// Left bound
    pub fn min_x(&self) -> f64 {
        self.pos.x
    }

    /// Right bound
    pub fn max_x(&self) -> f64 {
        self.pos.x + self.size.x
    }

    /// Bottom bound
    pub fn min_y(&self) -> f64 {
        self.pos.y
    }

    /// Top bound
    pub fn max_y(&self) -> f64 {
        self.pos.y + self.size.y
    }

    /// Centre point
    pub fn center(&self) -> Vec2 {
        self.pos + self.size.scale(0.5)
    }

    /// Midpoint of the left edge
    pub fn left(&self) -> Vec2 {
        Vec2::new(self.min_x(), self.pos.y + self.size.y * 0.5)
    }

    /// Midpoint of the right edge
    pub fn right(&self) -> Vec2 {
        Vec2::new(self.max_x(), self.pos.y + self.size.y * 0.5)
    }

    /// Midpoint of the bottom edge
    pub fn bottom(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x * 0.5, self.min_y())
    }

    /// Midpoint of the top edge
    pub fn top(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x * 0.5, self.max_y())
    }

    /// Copy moved by `offset`
    pub fn translate(&self, offset: Vec2) -> Self {
        Rect::new(self.pos + offset, self.size)
    }

    /// Check whether `p` lies inside, bounds included
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Overlap test with inclusive bounds: touching rectangles intersect
    pub fn is_intersecting(&self, other: &Rect) -> bool {
        let inter_x = self.min_x() <= other.max_x() && other.min_x() <= self.max_x();
        let inter_y = self.min_y() <= other.max_y() && other.min_y() <= self.max_y();
        inter_x && inter_y
    }

    /// Overlapping area of two rectangles
    ///
    /// Returns `None` when the overlap has no area, so rectangles that only
    /// touch along an edge have no intersection here.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min_x = self.min_x().max(other.min_x());
        let max_x = self.max_x().min(other.max_x());
        let min_y = self.min_y().max(other.min_y());
        let max_y = self.max_y().min(other.max_y());
        if max_x <= min_x || max_y <= min_y {
            return None;
        }
        Some(Rect::from_bounds(min_x, min_y, max_x, max_y))
    }
}

/// Linear remap of `x` from the segment `[a, b]` onto `[va, vb]`
///
/// `a` and `b` may be given in decreasing order to flip an axis.
pub fn swipe(x: f64, a: f64, b: f64, va: f64, vb: f64) -> f64 {
    let r = (vb - va) / (b - a);
    let v0 = va - r * a;
    v0 + r * x
}
