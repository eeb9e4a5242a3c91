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
//! # altng
//!
//! A small 2D entity-component simulation kernel with rigid-body collision
//! resolution.
//!
//! ## Features
//!
//! - **Entity tree**: entities own ordered components and child entities
//! - **Kind hierarchy**: components are looked up by kind or any ancestor kind
//! - **Phased frames**: update, move, collide and draw run in a fixed order
//! - **Rigid bodies**: disc and box colliders with restitution-based response
//! - **Pointer interaction**: dragging and click-to-spawn behaviours
//!
//! ## Example
//!
//! ```rust
//! use altng::{Simulation, SimulationConfig};
//! use altng::math::{Rect, Vec2};
//! use altng::physics::{Collider, Gravity, Motion, RigidBody};
//! use std::time::Duration;
//!
//! let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
//! let world = sim.world_mut();
//!
//! let ball = world.spawn();
//! world.add(ball, Motion::new(Vec2::new(0.0, 1.0))).unwrap();
//! world.add(ball, Collider::disc(0.2).unwrap()).unwrap();
//! world.add(ball, RigidBody::new(0.04, 1.0).unwrap()).unwrap();
//! world.add(ball, Gravity::earth()).unwrap();
//!
//! let floor = world.spawn();
//! world.add(floor, Motion::new(Vec2::new(0.0, -0.05))).unwrap();
//! world.add(floor, Collider::centered_box(Vec2::new(20.0, 0.1)).unwrap()).unwrap();
//! world.add(floor, RigidBody::fixed(0.9).unwrap()).unwrap();
//!
//! sim.start().unwrap();
//! for _ in 0..100 {
//!     sim.step(Duration::from_millis(10)).unwrap();
//! }
//! assert!(sim.world().get::<Motion>(ball).unwrap().pos.y > 0.0);
//! ```

#![warn(missing_docs)]

/// Simulation configuration
pub mod config;

/// Runtime diagnostics
pub mod diagnostics;

/// Entity-component core
pub mod ecs;

/// Error types
pub mod error;

/// Per-frame context and clock
pub mod frame;

/// Pointer input
pub mod input;

/// Pointer- and collision-driven behaviours
pub mod interaction;

/// 2D vectors and rectangles
pub mod math;

/// 2D rigid-body physics
pub mod physics;

/// Rendering seam
pub mod render;

/// The frame loop
pub mod simulation;

/// World-to-screen mapping
pub mod view;

pub use config::SimulationConfig;
pub use ecs::{Entity, World};
pub use error::{EngineError, Result};
pub use simulation::Simulation;
