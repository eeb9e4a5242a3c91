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
//! Graph nodes example
//!
//! A handful of draggable nodes joined by edges. Nodes highlight under the
//! pointer and are tethered to the middle of the view; edges follow their
//! endpoints. A scripted drag pulls one node far away to show the tether.

use altng::ecs::{Component, ComponentId, ComponentType, Cx, Entity, Kind, Phase, World, COMPONENT};
use altng::frame::FrameContext;
use altng::input::{PointerEvent, PointerKind};
use altng::interaction::Draggable;
use altng::math::Vec2;
use altng::physics::{Motion, Tether, MOTION};
use altng::render::{Color, MemoryRenderer, Primitive, ShapeRenderer, Style};
use altng::{Result, Simulation, SimulationConfig};
use std::any::Any;
use std::time::Duration;

const NODE_RADIUS: f64 = 0.4;
const TETHER_RADIUS: f64 = 6.0;

static EDGE: Kind = Kind::derived("Edge", &COMPONENT);

/// Keeps a line renderer stretched between two node entities
struct Edge {
    from: Entity,
    to: Entity,
    ends: Option<(ComponentId, ComponentId)>,
    motion: ComponentId,
    renderer: ComponentId,
}

impl Edge {
    fn new(from: Entity, to: Entity) -> Self {
        Edge {
            from,
            to,
            ends: None,
            motion: ComponentId::default(),
            renderer: ComponentId::default(),
        }
    }
}

impl Component for Edge {
    fn kind(&self) -> &'static Kind {
        &EDGE
    }

    fn attach(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        self.motion = cx.sibling::<Motion>()?;
        self.renderer = cx.sibling::<ShapeRenderer>()?;
        let world = cx.world();
        self.ends = Some((
            world.component_id(self.from, &MOTION)?,
            world.component_id(self.to, &MOTION)?,
        ));
        Ok(())
    }

    // after dragging and tethering, before drawing
    fn update(&mut self, phase: Phase, _frame: &FrameContext, cx: &mut Cx<'_>) -> Result<()> {
        let (Phase::Collide, Some((from, to))) = (phase, self.ends) else {
            return Ok(());
        };
        let start = cx.get::<Motion>(from)?.pos;
        let end = cx.get::<Motion>(to)?.pos;
        cx.get_mut::<Motion>(self.motion)?.teleport(start);
        cx.get_mut::<ShapeRenderer>(self.renderer)?.primitive = Primitive::Line { to: end };
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ComponentType for Edge {
    fn base_kind() -> &'static Kind {
        &EDGE
    }
}

fn node(world: &mut World, pos: Vec2) -> Result<Entity> {
    let idle = Style::filled(Color::rgb(240, 240, 240));
    let hover = Style::filled(Color::rgb(255, 200, 80));
    let e = world.spawn();
    world.add(e, Motion::new(pos))?;
    world.add(e, ShapeRenderer::circle(NODE_RADIUS, idle).on_layer(1))?;
    world.add(e, Draggable::new(NODE_RADIUS)?.with_hover_styles(idle, hover))?;
    world.add(e, Tether::new(Vec2::zero(), TETHER_RADIUS)?)?;
    Ok(e)
}

fn edge(world: &mut World, from: Entity, to: Entity) -> Result<Entity> {
    let e = world.spawn();
    world.add(e, Motion::default())?;
    let line = Primitive::Line { to: Vec2::zero() };
    world.add(e, ShapeRenderer::new(line, Style::stroked(Color::BLACK, 0.05), 0))?;
    world.add(e, Edge::new(from, to))?;
    Ok(e)
}

fn main() -> Result<()> {
    env_logger::init();

    println!("altng - Graph Nodes Example");
    println!("===========================\n");

    let mut sim = Simulation::new(SimulationConfig::from_env())?.with_renderer(MemoryRenderer::new());

    let world = sim.world_mut();
    let positions = [
        Vec2::new(-3.0, 0.0),
        Vec2::new(0.0, 3.0),
        Vec2::new(3.0, 0.0),
        Vec2::new(0.0, -3.0),
    ];
    let mut nodes = Vec::new();
    for pos in positions {
        nodes.push(node(world, pos)?);
    }
    for i in 0..nodes.len() {
        edge(world, nodes[i], nodes[(i + 1) % nodes.len()])?;
    }
    sim.start()?;

    // grab the right-hand node and drag it off to the far right
    let grab = positions[2];
    let mut script = vec![PointerEvent::new(PointerKind::Down, grab)];
    for step in 1..=20 {
        let pos = grab + Vec2::new(0.5 * f64::from(step), 0.2 * f64::from(step));
        script.push(PointerEvent::new(PointerKind::Move, pos));
    }
    script.push(PointerEvent::new(PointerKind::Up, grab + Vec2::new(10.0, 4.0)));

    for event in script {
        sim.push_pointer(event);
        sim.step(Duration::from_millis(16))?;
    }
    for _ in 0..10 {
        sim.step(Duration::from_millis(16))?;
    }

    let world = sim.world();
    for (i, &e) in nodes.iter().enumerate() {
        let pos = world.get::<Motion>(e)?.pos;
        let hovered = world.get::<Draggable>(e)?.is_hovered();
        println!(
            "node {}: ({:.2}, {:.2}), {:.2} from centre{}",
            i,
            pos.x,
            pos.y,
            pos.norm(),
            if hovered { ", hovered" } else { "" }
        );
    }

    if let Some(renderer) = world.renderer_as::<MemoryRenderer>() {
        println!(
            "Renderer holds {} shapes after {} updates",
            renderer.live_handles(),
            renderer.update_count()
        );
    }
    Ok(())
}
