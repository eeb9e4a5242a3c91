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
//! Pointer- and collision-driven behaviours
//!
//! - [`Draggable`]: move an entity with the pointer
//! - [`Spawner`]: create entities where the user clicks
//! - [`CollisionTint`]: recolour a shape while its body is colliding

use crate::ecs::{Component, ComponentId, ComponentType, Cx, Entity, Kind, Phase, World, COMPONENT};
use crate::error::{EngineError, Result};
use crate::frame::FrameContext;
use crate::input::Modifiers;
use crate::math::Vec2;
use crate::physics::{Motion, RigidBody, MOTION};
use crate::render::{Color, ShapeRenderer, Style};
use log::debug;
use std::any::Any;

/// Kind of [`Draggable`]
pub static DRAGGABLE: Kind = Kind::derived("Draggable", &COMPONENT);
/// Kind of [`Spawner`]
pub static SPAWNER: Kind = Kind::derived("Spawner", &COMPONENT);
/// Kind of [`CollisionTint`]
pub static COLLISION_TINT: Kind = Kind::derived("CollisionTint", &COMPONENT);

/// Lets the pointer drag the entity around
///
/// A pointer-down closer than `radius` to the entity grabs it; each
/// pointer-move then shifts the entity by the pointer's displacement until
/// the next pointer-up. Runs in the update phase.
pub struct Draggable {
    radius: f64,
    drag_from: Option<Vec2>,
    hovered: bool,
    styles: Option<(Style, Style)>,
    motion: ComponentId,
    renderer: Option<ComponentId>,
}

impl Draggable {
    /// Grab area of `radius` around the entity
    pub fn new(radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(EngineError::InvalidParameter {
                name: "grab radius",
                value: radius,
            });
        }
        Ok(Draggable {
            radius,
            drag_from: None,
            hovered: false,
            styles: None,
            motion: ComponentId::default(),
            renderer: None,
        })
    }

    /// Switch the sibling [`ShapeRenderer`] between `idle` and `hover` styles
    pub fn with_hover_styles(mut self, idle: Style, hover: Style) -> Self {
        self.styles = Some((idle, hover));
        self
    }

    /// Check whether the pointer was over the entity at its last move
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Check whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }
}

impl Component for Draggable {
    fn kind(&self) -> &'static Kind {
        &DRAGGABLE
    }

    fn attach(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        self.motion = cx.sibling::<Motion>()?;
        if self.styles.is_some() {
            self.renderer = Some(cx.sibling::<ShapeRenderer>()?);
        }
        Ok(())
    }

    fn update(&mut self, phase: Phase, frame: &FrameContext, cx: &mut Cx<'_>) -> Result<()> {
        if phase != Phase::Update {
            return Ok(());
        }
        let input = &frame.input;
        let motion = cx.get_mut::<Motion>(self.motion)?;

        if input.up.is_some() {
            self.drag_from = None;
        } else if let Some(down) = &input.down {
            if down.world_pos.dist(motion.pos) < self.radius {
                self.drag_from = Some(down.world_pos);
            }
        } else if let (Some(from), Some(moved)) = (self.drag_from, &input.moved) {
            motion.pos += moved.world_pos - from;
            self.drag_from = Some(moved.world_pos);
        }

        if let Some(moved) = &input.moved {
            self.hovered = moved.world_pos.dist(motion.pos) < self.radius;
        }

        if let (Some((idle, hover)), Some(renderer)) = (self.styles, self.renderer) {
            cx.get_mut::<ShapeRenderer>(renderer)?.style = if self.hovered { hover } else { idle };
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

impl ComponentType for Draggable {
    fn base_kind() -> &'static Kind {
        &DRAGGABLE
    }
}

/// What a [`Spawner`] was asked to create
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// World position of the click
    pub pos: Vec2,
    /// Modifier keys held during the click
    pub modifiers: Modifiers,
}

/// Builds the entity for a [`SpawnRequest`] under the given parent
pub type SpawnFactory = Box<dyn FnMut(&mut World, Entity, &SpawnRequest) -> Result<Entity>>;

/// Spawns an entity on every primary-button click
///
/// Clicks that end a drag (the pointer travelled more than the drag threshold
/// since its pointer-down) are ignored. Spawned entities become children of
/// the spawner's entity, and their [`Motion`], if any, is teleported to the
/// click position.
pub struct Spawner {
    factory: SpawnFactory,
    drag_threshold: f64,
    spawned: usize,
}

impl Spawner {
    /// Default maximum pointer travel for a click, in world units
    pub const DEFAULT_DRAG_THRESHOLD: f64 = 0.05;

    /// Spawn through `factory`
    pub fn new(
        factory: impl FnMut(&mut World, Entity, &SpawnRequest) -> Result<Entity> + 'static,
    ) -> Self {
        Spawner {
            factory: Box::new(factory),
            drag_threshold: Self::DEFAULT_DRAG_THRESHOLD,
            spawned: 0,
        }
    }

    /// Override the click-versus-drag threshold
    pub fn with_drag_threshold(mut self, threshold: f64) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Number of entities spawned so far
    pub fn spawned(&self) -> usize {
        self.spawned
    }
}

impl Component for Spawner {
    fn kind(&self) -> &'static Kind {
        &SPAWNER
    }

    fn update(&mut self, phase: Phase, frame: &FrameContext, cx: &mut Cx<'_>) -> Result<()> {
        if phase != Phase::Update {
            return Ok(());
        }
        let Some(click) = &frame.input.click else {
            return Ok(());
        };
        if click.raw.button != 0 {
            return Ok(());
        }
        if click.drag_distance().is_some_and(|d| d > self.drag_threshold) {
            return Ok(());
        }

        let request = SpawnRequest {
            pos: click.world_pos,
            modifiers: click.raw.modifiers,
        };
        let parent = cx.entity();
        let world = cx.world_mut();
        let entity = (self.factory)(world, parent, &request)?;
        if let Some(id) = world.find_component(entity, &MOTION) {
            world.component_mut::<Motion>(id)?.teleport(request.pos);
        }
        self.spawned += 1;
        debug!("spawned {} at {:?}", entity, request.pos);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ComponentType for Spawner {
    fn base_kind() -> &'static Kind {
        &SPAWNER
    }
}

/// Recolours the sibling [`ShapeRenderer`] while the sibling [`RigidBody`]
/// is colliding
///
/// Runs in the collide phase, after the resolver has filled this frame's
/// collision lists and before anything is drawn.
pub struct CollisionTint {
    idle: Color,
    colliding: Color,
    body: ComponentId,
    renderer: ComponentId,
}

impl CollisionTint {
    /// Fill with `idle` normally and `colliding` on contact
    pub fn new(idle: Color, colliding: Color) -> Self {
        CollisionTint {
            idle,
            colliding,
            body: ComponentId::default(),
            renderer: ComponentId::default(),
        }
    }
}

impl Component for CollisionTint {
    fn kind(&self) -> &'static Kind {
        &COLLISION_TINT
    }

    fn attach(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        self.body = cx.sibling::<RigidBody>()?;
        self.renderer = cx.sibling::<ShapeRenderer>()?;
        Ok(())
    }

    fn update(&mut self, phase: Phase, _frame: &FrameContext, cx: &mut Cx<'_>) -> Result<()> {
        if phase == Phase::Collide {
            let colliding = cx.get::<RigidBody>(self.body)?.is_colliding();
            let fill = if colliding { self.colliding } else { self.idle };
            cx.get_mut::<ShapeRenderer>(self.renderer)?.style.fill = Some(fill);
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

impl ComponentType for CollisionTint {
    fn base_kind() -> &'static Kind {
        &COLLISION_TINT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{FrameInput, PointerDown, PointerEvent, PointerKind, RawPointer};

    fn frame_with(input: FrameInput) -> FrameContext {
        FrameContext {
            input,
            ..Default::default()
        }
    }

    fn event(kind: PointerKind, x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(kind, Vec2::new(x, y))
    }

    #[test]
    fn test_drag_moves_entity() {
        let mut world = World::new();
        let e = world.spawn();
        world.add(e, Motion::new(Vec2::new(1.0, 1.0))).unwrap();
        world.add(e, Draggable::new(0.5).unwrap()).unwrap();
        world.start().unwrap();

        let grab = FrameInput {
            down: Some(event(PointerKind::Down, 1.2, 1.0)),
            ..Default::default()
        };
        world.run_phase(Phase::Update, &frame_with(grab)).unwrap();
        assert!(world.get::<Draggable>(e).unwrap().is_dragging());

        let drag = FrameInput {
            moved: Some(event(PointerKind::Move, 2.2, 0.0)),
            ..Default::default()
        };
        world.run_phase(Phase::Update, &frame_with(drag)).unwrap();
        let pos = world.get::<Motion>(e).unwrap().pos;
        assert!((pos - Vec2::new(2.0, 0.0)).norm() < 1e-12);
        assert!(world.get::<Draggable>(e).unwrap().is_hovered());

        let release = FrameInput {
            up: Some(event(PointerKind::Up, 2.2, 0.0)),
            ..Default::default()
        };
        world.run_phase(Phase::Update, &frame_with(release)).unwrap();
        assert!(!world.get::<Draggable>(e).unwrap().is_dragging());
    }

    #[test]
    fn test_spawner_ignores_drags() {
        let mut world = World::new();
        let root = world.root();
        world
            .add(
                root,
                Spawner::new(|world, parent, _request| {
                    let e = world.create_entity(parent)?;
                    world.add(e, Motion::default())?;
                    Ok(e)
                }),
            )
            .unwrap();
        world.start().unwrap();

        let mut click = event(PointerKind::Click, 3.0, 4.0);
        click.related_down = Some(PointerDown {
            world_pos: Vec2::new(3.0, 4.0),
            raw: RawPointer::default(),
        });
        let clicks = FrameInput {
            click: Some(click),
            ..Default::default()
        };
        world.run_phase(Phase::Update, &frame_with(clicks)).unwrap();

        let spawned: Vec<_> = world.children(root).collect();
        assert_eq!(spawned.len(), 1);
        assert_eq!(world.get::<Motion>(spawned[0]).unwrap().pos, Vec2::new(3.0, 4.0));

        click.related_down = Some(PointerDown {
            world_pos: Vec2::new(0.0, 0.0),
            raw: RawPointer::default(),
        });
        let drag_end = FrameInput {
            click: Some(click),
            ..Default::default()
        };
        world.run_phase(Phase::Update, &frame_with(drag_end)).unwrap();
        assert_eq!(world.get::<Spawner>(root).unwrap().spawned(), 1);
    }

    #[test]
    fn test_tint_follows_contacts() {
        const IDLE: Color = Color::rgb(0, 0, 255);
        const HIT: Color = Color::rgb(255, 0, 0);

        let mut world = World::new();
        let mut scheduler = crate::ecs::Scheduler::new();
        crate::physics::install(&mut scheduler).unwrap();

        let mut balls = Vec::new();
        for x in [0.0, 1.5] {
            let e = world.spawn();
            world.add(e, Motion::new(Vec2::new(x, 0.0))).unwrap();
            world.add(e, crate::physics::Collider::disc(1.0).unwrap()).unwrap();
            world.add(e, RigidBody::new(1.0, 1.0).unwrap()).unwrap();
            world.add(e, ShapeRenderer::circle(1.0, Style::filled(IDLE))).unwrap();
            world.add(e, CollisionTint::new(IDLE, HIT)).unwrap();
            balls.push(e);
        }
        world.start().unwrap();

        let frame = FrameContext::default();
        scheduler.run_global(&mut world, Phase::Collide, &frame).unwrap();
        world.run_phase(Phase::Collide, &frame).unwrap();
        for &e in &balls {
            assert_eq!(world.get::<ShapeRenderer>(e).unwrap().style.fill, Some(HIT));
        }

        // pulled apart: the move phase clears the contacts
        world.get_mut::<Motion>(balls[1]).unwrap().teleport(Vec2::new(5.0, 0.0));
        for phase in [Phase::Move, Phase::Collide] {
            scheduler.run_global(&mut world, phase, &frame).unwrap();
            world.run_phase(phase, &frame).unwrap();
        }
        for &e in &balls {
            assert_eq!(world.get::<ShapeRenderer>(e).unwrap().style.fill, Some(IDLE));
        }
    }
}
