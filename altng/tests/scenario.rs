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
//! End-to-end scenario: a ball dropped on a static floor

use altng::math::Vec2;
use altng::physics::{Collider, Gravity, Motion, RigidBody, STANDARD_GRAVITY};
use altng::{Entity, Simulation, SimulationConfig};
use std::time::Duration;

const DT: Duration = Duration::from_millis(10);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn dropped_ball() -> (Simulation, Entity) {
    let mut sim = Simulation::new(SimulationConfig::default().without_frame_rate_observer()).unwrap();
    let world = sim.world_mut();

    let ball = world.spawn();
    world.add(ball, Motion::new(Vec2::new(0.0, 5.0))).unwrap();
    world.add(ball, Collider::disc(0.2).unwrap()).unwrap();
    world.add(ball, RigidBody::new(0.04, 1.0).unwrap()).unwrap();
    world.add(ball, Gravity::new(Vec2::new(0.0, -STANDARD_GRAVITY))).unwrap();

    let floor = world.spawn();
    world.add(floor, Motion::new(Vec2::new(0.0, -5.05))).unwrap();
    world.add(floor, Collider::centered_box(Vec2::new(20.0, 0.1)).unwrap()).unwrap();
    world.add(floor, RigidBody::fixed(0.9).unwrap()).unwrap();

    sim.start().unwrap();
    (sim, ball)
}

fn ball_motion(sim: &Simulation, ball: Entity) -> Motion {
    sim.world().get::<Motion>(ball).unwrap().clone()
}

#[test]
fn test_ball_bounces_with_combined_rebound() {
    init_logging();
    let (mut sim, ball) = dropped_ball();

    let mut before = ball_motion(&sim, ball);
    let mut bounce = None;
    for _ in 0..500 {
        sim.step(DT).unwrap();
        let after = ball_motion(&sim, ball);
        if before.vel.y < 0.0 && after.vel.y > 0.0 {
            // the colliding frame adds one more step of gravity before responding
            let impact = before.vel.y - STANDARD_GRAVITY * DT.as_secs_f64();
            bounce = Some((impact, after));
            break;
        }
        before = after;
    }

    let (impact, after) = bounce.expect("ball never bounced");
    assert!(impact < -10.0);
    assert!((after.vel.y + 0.9 * impact).abs() < 1e-9, "rebound speed {}", after.vel.y);
    // pushed back out of the floor
    assert!((after.pos.y - (-4.8)).abs() < 1e-9, "resting height {}", after.pos.y);
    assert!(sim.world().get::<RigidBody>(ball).unwrap().is_colliding());
}

#[test]
fn test_bounce_peak_below_release_height() {
    init_logging();
    let (mut sim, ball) = dropped_ball();

    let mut bounced = false;
    let mut peak = f64::NEG_INFINITY;
    for _ in 0..600 {
        sim.step(DT).unwrap();
        let motion = ball_motion(&sim, ball);
        assert!(motion.pos.y > -5.0, "ball sank to {}", motion.pos.y);
        if motion.vel.y > 0.0 {
            bounced = true;
        }
        if bounced {
            peak = peak.max(motion.pos.y);
        }
    }

    assert!(bounced);
    assert!(peak < 5.0, "peak {}", peak);
    assert!(peak > 2.0, "peak {}", peak);
}

#[test]
fn test_floor_never_moves() {
    let (mut sim, ball) = dropped_ball();
    for _ in 0..300 {
        sim.step(DT).unwrap();
    }
    let floor = sim
        .world()
        .children(sim.world().root())
        .find(|&e| e != ball)
        .unwrap();
    let motion = sim.world().get::<Motion>(floor).unwrap();
    assert_eq!(motion.pos, Vec2::new(0.0, -5.05));
    assert_eq!(motion.vel, Vec2::zero());
}
