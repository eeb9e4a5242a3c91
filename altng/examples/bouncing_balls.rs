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
//! Bouncing balls example
//!
//! Builds a walled box, then clicks a few times to spawn balls that fall,
//! collide and change colour while touching something. Shift-clicks spawn
//! crates instead of balls. Runs headless against a recording renderer.
//!
//! Set `RUST_LOG=debug` to see entity and frame rate logs.

use altng::ecs::{Entity, World};
use altng::input::{Modifiers, PointerEvent, PointerKind, RawPointer};
use altng::interaction::{CollisionTint, SpawnRequest, Spawner};
use altng::math::Vec2;
use altng::physics::{Collider, Gravity, Motion, RigidBody};
use altng::render::{Color, MemoryRenderer, ShapeRenderer, Style};
use altng::{Result, Simulation, SimulationConfig};
use std::time::Duration;

const BALL_RADIUS: f64 = 0.2;
const CRATE_SIZE: f64 = 0.5;
const IDLE: Color = Color::rgb(70, 130, 180);
const HIT: Color = Color::rgb(220, 80, 60);

fn wall(world: &mut World, center: Vec2, size: Vec2) -> Result<Entity> {
    let e = world.spawn();
    world.add(e, Motion::new(center))?;
    world.add(e, Collider::centered_box(size)?)?;
    world.add(e, RigidBody::fixed(0.9)?)?;
    world.add(e, ShapeRenderer::rect(size, Style::filled(Color::BLACK)))?;
    Ok(e)
}

fn spawn_body(world: &mut World, parent: Entity, request: &SpawnRequest) -> Result<Entity> {
    let e = world.create_entity(parent)?;
    world.add(e, Motion::new(request.pos))?;
    if request.modifiers.shift {
        let size = Vec2::new(CRATE_SIZE, CRATE_SIZE);
        world.add(e, Collider::centered_box(size)?)?;
        world.add(e, RigidBody::new(0.2, 0.5)?)?;
        world.add(e, ShapeRenderer::rect(size, Style::filled(IDLE)))?;
    } else {
        world.add(e, Collider::disc(BALL_RADIUS)?)?;
        world.add(e, RigidBody::new(0.04, 1.0)?)?;
        world.add(e, ShapeRenderer::circle(BALL_RADIUS, Style::filled(IDLE)))?;
    }
    world.add(e, Gravity::earth())?;
    world.add(e, CollisionTint::new(IDLE, HIT))?;
    Ok(e)
}

fn click(pos: Vec2, shift: bool) -> PointerEvent {
    let raw = RawPointer {
        modifiers: Modifiers {
            shift,
            ..Default::default()
        },
        ..Default::default()
    };
    PointerEvent::new(PointerKind::Click, pos).with_raw(raw)
}

fn main() -> Result<()> {
    env_logger::init();

    println!("altng - Bouncing Balls Example");
    println!("==============================\n");

    let config = SimulationConfig::from_env();
    let mut sim = Simulation::new(config)?.with_renderer(MemoryRenderer::new());

    let world = sim.world_mut();
    wall(world, Vec2::new(0.0, -9.5), Vec2::new(20.0, 1.0))?;
    wall(world, Vec2::new(-9.5, 0.0), Vec2::new(1.0, 18.0))?;
    wall(world, Vec2::new(9.5, 0.0), Vec2::new(1.0, 18.0))?;
    let root = world.root();
    world.add(root, Spawner::new(spawn_body))?;
    sim.start()?;

    let clicks = [
        (10, Vec2::new(-2.0, 6.0), false),
        (40, Vec2::new(-1.8, 2.0), false),
        (70, Vec2::new(3.0, 5.0), true),
        (100, Vec2::new(2.8, 8.0), false),
    ];

    let frames = 600;
    let mut contacts = 0;
    for frame in 0..frames {
        for &(at, pos, shift) in &clicks {
            if at == frame {
                sim.push_pointer(click(pos, shift));
            }
        }
        sim.step(Duration::from_millis(16))?;

        let world = sim.world();
        contacts += world
            .children(root)
            .filter_map(|e| world.get::<RigidBody>(e).ok())
            .filter(|body| body.is_colliding())
            .count();
    }

    let world = sim.world();
    println!("Simulated {} frames", sim.frame_index());
    println!("Spawned {} bodies", world.get::<Spawner>(root)?.spawned());
    println!("Body-frames spent in contact: {}", contacts);
    for e in world.children(root) {
        let motion = world.get::<Motion>(e)?;
        println!("  {} at ({:.2}, {:.2})", e, motion.pos.x, motion.pos.y);
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
