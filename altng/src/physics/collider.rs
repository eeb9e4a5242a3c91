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
//! Collider shapes
//!
//! A [`Collider`] describes a shape relative to its entity's [`Motion`]
//! position. Placing it at that position gives a [`PlacedShape`], which
//! answers the two collision questions:
//!
//! - **broad phase**: do the world bounding boxes intersect (bounds
//!   inclusive)?
//! - **narrow phase**: do the shapes interpenetrate, and if so where and along
//!   which normal, as seen from this shape?
//!
//! Disc against disc is exact. Any pair involving a box treats discs as their
//! bounding squares.

use crate::ecs::{Component, ComponentId, ComponentType, Cx, Kind, World, COMPONENT};
use crate::error::{EngineError, Result};
use crate::math::{Rect, Vec2};
use crate::physics::motion::Motion;
use std::any::Any;

/// Kind of every [`Collider`]
pub static COLLIDER: Kind = Kind::derived("Collider", &COMPONENT);
/// Kind of disc colliders
pub static DISC_COLLIDER: Kind = Kind::derived("DiscCollider", &COLLIDER);
/// Kind of box colliders
pub static BOX_COLLIDER: Kind = Kind::derived("BoxCollider", &COLLIDER);

/// Collision geometry relative to the owning entity's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Disc centred on the entity
    Disc {
        /// Radius
        radius: f64,
    },
    /// Axis-aligned box, not necessarily centred
    Box {
        /// Box relative to the entity position
        rel: Rect,
    },
}

impl Shape {
    /// Bounding box relative to the entity position
    pub fn rel_bounds(&self) -> Rect {
        match *self {
            Shape::Disc { radius } => Rect::new(
                Vec2::new(-radius, -radius),
                Vec2::new(2.0 * radius, 2.0 * radius),
            ),
            Shape::Box { rel } => rel,
        }
    }

    /// Kind a collider of this shape is registered under
    pub fn kind(&self) -> &'static Kind {
        match self {
            Shape::Disc { .. } => &DISC_COLLIDER,
            Shape::Box { .. } => &BOX_COLLIDER,
        }
    }
}

/// Contact as seen from one of the two shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Contact point in world coordinates
    pub point: Vec2,
    /// Unit normal pointing from this shape toward the other
    pub normal: Vec2,
}

/// A shape placed in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedShape {
    /// Geometry
    pub shape: Shape,
    /// Position of the owning entity
    pub origin: Vec2,
}

impl PlacedShape {
    /// Place `shape` at `origin`
    pub fn new(shape: Shape, origin: Vec2) -> Self {
        PlacedShape { shape, origin }
    }

    /// World bounding box
    pub fn bounds(&self) -> Rect {
        self.shape.rel_bounds().translate(self.origin)
    }

    /// Broad phase: world bounding boxes intersect, touching included
    pub fn is_maybe_colliding(&self, other: &PlacedShape) -> bool {
        self.bounds().is_intersecting(&other.bounds())
    }

    /// Narrow phase contact from this shape toward `other`
    ///
    /// Returns `Ok(None)` when the shapes do not interpenetrate.
    ///
    /// # Examples
    ///
    /// ```
    /// use altng::math::Vec2;
    /// use altng::physics::{PlacedShape, Shape};
    ///
    /// let a = PlacedShape::new(Shape::Disc { radius: 1.0 }, Vec2::new(0.0, 0.0));
    /// let b = PlacedShape::new(Shape::Disc { radius: 1.0 }, Vec2::new(1.0, 0.0));
    /// let contact = a.contact(&b).unwrap().unwrap();
    /// assert_eq!(contact.normal, Vec2::new(1.0, 0.0));
    /// assert_eq!(contact.point, Vec2::new(1.0, 0.0));
    ///
    /// let far = PlacedShape::new(Shape::Disc { radius: 1.0 }, Vec2::new(2.0, 0.0));
    /// assert_eq!(a.contact(&far).unwrap(), None);
    /// ```
    pub fn contact(&self, other: &PlacedShape) -> Result<Option<Contact>> {
        match (self.shape, other.shape) {
            (Shape::Disc { radius: r1 }, Shape::Disc { radius: r2 }) => {
                disc_disc(self.origin, r1, other.origin, r2)
            }
            (Shape::Disc { .. }, Shape::Box { .. })
            | (Shape::Box { .. }, Shape::Disc { .. })
            | (Shape::Box { .. }, Shape::Box { .. }) => Ok(box_box(
                self.bounds(),
                self.origin,
                other.bounds(),
                other.origin,
            )),
        }
    }
}

fn disc_disc(a: Vec2, ra: f64, b: Vec2, rb: f64) -> Result<Option<Contact>> {
    let dist = a.dist(b);
    // coincident centres give no usable normal
    if dist == 0.0 || dist >= ra + rb {
        return Ok(None);
    }
    let normal = (b - a).normalize()?;
    Ok(Some(Contact {
        point: a + normal * ra,
        normal,
    }))
}

/// Resolve along the axis of least penetration
fn box_box(a: Rect, a_pos: Vec2, b: Rect, b_pos: Vec2) -> Option<Contact> {
    let inter = a.intersection(&b)?;
    let contact = if inter.size.y >= inter.size.x {
        if a_pos.x >= b_pos.x {
            Contact {
                point: inter.left(),
                normal: Vec2::new(-1.0, 0.0),
            }
        } else {
            Contact {
                point: inter.right(),
                normal: Vec2::new(1.0, 0.0),
            }
        }
    } else if a_pos.y >= b_pos.y {
        Contact {
            point: inter.bottom(),
            normal: Vec2::new(0.0, -1.0),
        }
    } else {
        Contact {
            point: inter.top(),
            normal: Vec2::new(0.0, 1.0),
        }
    };
    Some(contact)
}

/// Collision shape attached to an entity with a [`Motion`]
pub struct Collider {
    shape: Shape,
    motion: ComponentId,
}

impl Collider {
    /// Disc of `radius`
    ///
    /// Fails unless the radius is finite and positive.
    pub fn disc(radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "radius",
                value: radius,
            });
        }
        Ok(Self::from_shape(Shape::Disc { radius }))
    }

    /// Box given relative to the entity position
    ///
    /// Fails on negative or non-finite dimensions.
    pub fn rect(rel: Rect) -> Result<Self> {
        for (name, value) in [("box x", rel.pos.x), ("box y", rel.pos.y)] {
            if !value.is_finite() {
                return Err(EngineError::InvalidParameter { name, value });
            }
        }
        for (name, value) in [("box width", rel.size.x), ("box height", rel.size.y)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EngineError::InvalidParameter { name, value });
            }
        }
        Ok(Self::from_shape(Shape::Box { rel }))
    }

    /// Box of `size` centred on the entity
    pub fn centered_box(size: Vec2) -> Result<Self> {
        Self::rect(Rect::centered(Vec2::zero(), size))
    }

    fn from_shape(shape: Shape) -> Self {
        Collider {
            shape,
            motion: ComponentId::default(),
        }
    }

    /// Shape of this collider
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Id of the sibling [`Motion`]
    pub fn motion_id(&self) -> ComponentId {
        self.motion
    }

    /// This collider placed at its entity's current position
    pub fn placed(&self, world: &World) -> Result<PlacedShape> {
        let motion = world.component::<Motion>(self.motion)?;
        Ok(PlacedShape::new(self.shape, motion.pos))
    }
}

impl Component for Collider {
    fn kind(&self) -> &'static Kind {
        self.shape.kind()
    }

    fn family(&self) -> Option<&'static Kind> {
        Some(&COLLIDER)
    }

    fn attach(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        self.motion = cx.sibling::<Motion>()?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ComponentType for Collider {
    fn base_kind() -> &'static Kind {
        &COLLIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(r: f64, x: f64, y: f64) -> PlacedShape {
        PlacedShape::new(Shape::Disc { radius: r }, Vec2::new(x, y))
    }

    fn boxed(rel: Rect, x: f64, y: f64) -> PlacedShape {
        PlacedShape::new(Shape::Box { rel }, Vec2::new(x, y))
    }

    #[test]
    fn test_coincident_discs_have_no_contact() {
        let a = disc(1.0, 2.0, 2.0);
        assert_eq!(a.contact(&a).unwrap(), None);
        assert!(a.is_maybe_colliding(&a));
    }

    #[test]
    fn test_box_contact_prefers_least_penetration() {
        let wall = Rect::from_bounds(-0.5, -2.0, 0.5, 2.0);
        let a = boxed(wall, 0.0, 0.0);
        // overlaps 0.2 along x, 4 along y
        let b = boxed(Rect::from_bounds(-0.5, -2.0, 0.5, 2.0), 0.8, 0.0);

        let from_a = a.contact(&b).unwrap().unwrap();
        assert_eq!(from_a.normal, Vec2::new(1.0, 0.0));
        assert!((from_a.point.x - 0.5).abs() < 1e-12);

        let from_b = b.contact(&a).unwrap().unwrap();
        assert_eq!(from_b.normal, Vec2::new(-1.0, 0.0));
        assert!((from_b.point.x - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_disc_on_floor_uses_bounding_square() {
        let floor = boxed(Rect::centered(Vec2::zero(), Vec2::new(20.0, 0.1)), 0.0, -5.05);
        let ball = disc(0.2, 3.0, -4.85);

        let from_ball = ball.contact(&floor).unwrap().unwrap();
        assert_eq!(from_ball.normal, Vec2::new(0.0, -1.0));
        let from_floor = floor.contact(&ball).unwrap().unwrap();
        assert_eq!(from_floor.normal, Vec2::new(0.0, 1.0));
        assert!((from_floor.point.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_touching_boxes_maybe_collide_without_contact() {
        let unit = Rect::from_bounds(0.0, 0.0, 1.0, 1.0);
        let a = boxed(unit, 0.0, 0.0);
        let b = boxed(unit, 1.0, 0.0);
        assert!(a.is_maybe_colliding(&b));
        assert_eq!(a.contact(&b).unwrap(), None);
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert!(Collider::disc(0.0).is_err());
        assert!(Collider::disc(f64::NAN).is_err());
        assert!(Collider::centered_box(Vec2::new(-1.0, 1.0)).is_err());
        assert_eq!(Collider::disc(0.5).unwrap().kind().name(), "DiscCollider");
        assert_eq!(
            Collider::centered_box(Vec2::new(1.0, 1.0)).unwrap().kind().name(),
            "BoxCollider"
        );
    }
}
