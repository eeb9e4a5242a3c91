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
//! Rendering boundary
//!
//! The simulation never reads rendering state back. Components push the
//! current shape of what they draw to an opaque [`RenderHandle`] through the
//! [`Renderer`] owned by the world; the host decides what a handle becomes
//! (an SVG node, a GPU instance, nothing at all).
//!
//! [`ShapeRenderer`] is the stock drawing component: it follows its entity's
//! [`Motion`](crate::physics::Motion) and draws a circle, a rectangle or a
//! line on a layer.

use crate::ecs::{Component, ComponentId, ComponentType, Cx, Kind, Phase, COMPONENT};
use crate::error::Result;
use crate::frame::FrameContext;
use crate::math::Vec2;
use crate::physics::Motion;
use std::any::Any;
use std::collections::HashMap;

/// Opaque handle to something drawn by a [`Renderer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u64);

/// RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Fully transparent
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    /// Black
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// White
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

/// Fill and stroke settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Fill colour, `None` for no fill
    pub fill: Option<Color>,
    /// Stroke colour, `None` for no stroke
    pub stroke: Option<Color>,
    /// Stroke width in world units
    pub stroke_width: f64,
}

impl Style {
    /// Filled shape without outline
    pub fn filled(color: Color) -> Self {
        Style {
            fill: Some(color),
            stroke: None,
            stroke_width: 0.0,
        }
    }

    /// Outline only
    pub fn stroked(color: Color, width: f64) -> Self {
        Style {
            fill: None,
            stroke: Some(color),
            stroke_width: width,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::filled(Color::BLACK)
    }
}

/// Geometry of a drawable, relative to its position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Circle centred on the position
    Circle {
        /// Radius
        radius: f64,
    },
    /// Rectangle with its minimum corner at `offset` from the position
    Rect {
        /// Corner offset
        offset: Vec2,
        /// Width and height
        size: Vec2,
    },
    /// Segment from the position to `to`, in world coordinates
    Line {
        /// End point
        to: Vec2,
    },
}

/// Everything a renderer needs to draw one handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    /// Shape geometry
    pub primitive: Primitive,
    /// World position
    pub pos: Vec2,
    /// Rotation in radians, counter-clockwise
    pub rotation: f64,
    /// Fill and stroke
    pub style: Style,
    /// Whether the shape is shown
    pub visible: bool,
}

/// Rendering collaborator
pub trait Renderer: 'static {
    /// Allocate a handle drawn on `layer`; higher layers draw on top
    fn create(&mut self, layer: i32) -> RenderHandle;

    /// Push the current state of `handle`
    fn update(&mut self, handle: RenderHandle, drawable: &Drawable);

    /// Release `handle`; it is never used again
    fn release(&mut self, handle: RenderHandle);

    /// Allow downcasting to the concrete renderer
    fn as_any(&self) -> &dyn Any;
}

/// Renderer that discards everything
#[derive(Debug, Default)]
pub struct NullRenderer {
    next: u64,
}

impl NullRenderer {
    /// Create a null renderer
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for NullRenderer {
    fn create(&mut self, _layer: i32) -> RenderHandle {
        self.next += 1;
        RenderHandle(self.next)
    }

    fn update(&mut self, _handle: RenderHandle, _drawable: &Drawable) {}

    fn release(&mut self, _handle: RenderHandle) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Renderer keeping the latest state of every live handle in memory
///
/// Used by headless hosts and tests to inspect what would be drawn.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    next: u64,
    layers: HashMap<RenderHandle, i32>,
    drawn: HashMap<RenderHandle, Drawable>,
    updates: u64,
}

impl MemoryRenderer {
    /// Create an empty renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest state pushed for `handle`
    pub fn drawable(&self, handle: RenderHandle) -> Option<&Drawable> {
        self.drawn.get(&handle)
    }

    /// Layer of a live handle
    pub fn layer(&self, handle: RenderHandle) -> Option<i32> {
        self.layers.get(&handle).copied()
    }

    /// Number of live handles
    pub fn live_handles(&self) -> usize {
        self.layers.len()
    }

    /// Total number of updates received
    pub fn update_count(&self) -> u64 {
        self.updates
    }
}

impl Renderer for MemoryRenderer {
    fn create(&mut self, layer: i32) -> RenderHandle {
        self.next += 1;
        let handle = RenderHandle(self.next);
        self.layers.insert(handle, layer);
        handle
    }

    fn update(&mut self, handle: RenderHandle, drawable: &Drawable) {
        if self.layers.contains_key(&handle) {
            self.drawn.insert(handle, *drawable);
            self.updates += 1;
        }
    }

    fn release(&mut self, handle: RenderHandle) {
        self.layers.remove(&handle);
        self.drawn.remove(&handle);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Kind of [`ShapeRenderer`]
pub static SHAPE_RENDERER: Kind = Kind::derived("ShapeRenderer", &COMPONENT);

/// Draws a primitive at its entity's position
///
/// The render handle is created on initialize and released on terminate.
/// Entities without a [`Motion`] are drawn at the origin.
pub struct ShapeRenderer {
    /// Shape geometry
    pub primitive: Primitive,
    /// Fill and stroke
    pub style: Style,
    /// Whether the shape is shown
    pub visible: bool,
    /// Rotation in radians
    pub rotation: f64,
    layer: i32,
    motion: Option<ComponentId>,
    handle: Option<RenderHandle>,
}

impl ShapeRenderer {
    /// Draw `primitive` on `layer`
    pub fn new(primitive: Primitive, style: Style, layer: i32) -> Self {
        ShapeRenderer {
            primitive,
            style,
            visible: true,
            rotation: 0.0,
            layer,
            motion: None,
            handle: None,
        }
    }

    /// Circle of `radius`
    pub fn circle(radius: f64, style: Style) -> Self {
        Self::new(Primitive::Circle { radius }, style, 0)
    }

    /// Rectangle centred on the entity
    pub fn rect(size: Vec2, style: Style) -> Self {
        Self::new(
            Primitive::Rect {
                offset: size.scale(-0.5),
                size,
            },
            style,
            0,
        )
    }

    /// Move to another layer; only effective before initialization
    pub fn on_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    /// Handle allocated by the renderer, once initialized
    pub fn handle(&self) -> Option<RenderHandle> {
        self.handle
    }

    /// Current drawable state
    pub fn drawable(&self, pos: Vec2) -> Drawable {
        Drawable {
            primitive: self.primitive,
            pos,
            rotation: self.rotation,
            style: self.style,
            visible: self.visible,
        }
    }
}

impl Component for ShapeRenderer {
    fn kind(&self) -> &'static Kind {
        &SHAPE_RENDERER
    }

    fn attach(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        self.motion = cx.world().find_component(cx.entity(), Motion::base_kind());
        Ok(())
    }

    fn initialize(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        self.handle = Some(cx.world_mut().renderer_mut().create(self.layer));
        Ok(())
    }

    fn update(&mut self, phase: Phase, _frame: &FrameContext, cx: &mut Cx<'_>) -> Result<()> {
        if phase != Phase::Draw {
            return Ok(());
        }
        let Some(handle) = self.handle else {
            return Ok(());
        };
        let pos = match self.motion {
            Some(id) => cx.get::<Motion>(id)?.pos,
            None => Vec2::zero(),
        };
        let drawable = self.drawable(pos);
        cx.world_mut().renderer_mut().update(handle, &drawable);
        Ok(())
    }

    fn terminate(&mut self, cx: &mut Cx<'_>) {
        if let Some(handle) = self.handle.take() {
            cx.world_mut().renderer_mut().release(handle);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ComponentType for ShapeRenderer {
    fn base_kind() -> &'static Kind {
        &SHAPE_RENDERER
    }
}
