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
//! The frame loop
//!
//! A [`Simulation`] owns the [`World`], the global handler [`Scheduler`],
//! the frame clock and the pending pointer input. Each frame runs every
//! [`Phase`] in order; within a phase the global handlers run before the
//! per-entity callbacks.

use crate::config::SimulationConfig;
use crate::diagnostics::FrameRateObserver;
use crate::ecs::{Phase, Scheduler, World};
use crate::error::{EngineError, Result};
use crate::frame::{FrameClock, FrameContext};
use crate::input::{InputQueue, PointerEvent};
use crate::physics;
use crate::render::Renderer;
use crate::view::{ViewProvider, Viewport};
use log::{debug, error};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running,
    Stopped,
}

/// A world driven frame by frame
///
/// # Example
///
/// ```
/// use altng::{Simulation, SimulationConfig};
/// use altng::physics::{Gravity, Motion};
/// use std::time::Duration;
///
/// let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
/// let world = sim.world_mut();
/// let ball = world.spawn();
/// world.add(ball, Motion::default()).unwrap();
/// world.add(ball, Gravity::earth()).unwrap();
///
/// sim.start().unwrap();
/// sim.step(Duration::from_millis(10)).unwrap();
/// assert!(sim.world().get::<Motion>(ball).unwrap().vel.y < 0.0);
/// ```
pub struct Simulation {
    world: World,
    scheduler: Scheduler,
    config: SimulationConfig,
    clock: FrameClock,
    input: InputQueue,
    view: Box<dyn ViewProvider>,
    state: State,
    frame: u64,
}

impl Simulation {
    /// Create a stopped simulation with the physics resolver installed
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut world = World::new();
        let mut scheduler = Scheduler::new();
        physics::install(&mut scheduler)?;

        if config.frame_rate_observer {
            let root = world.root();
            world.add(root, FrameRateObserver::new(config.fps_window))?;
        }

        Ok(Simulation {
            world,
            scheduler,
            clock: FrameClock::new(config.max_frame_time),
            input: InputQueue::new(),
            view: Box::new(Viewport::new(config.safe_view)),
            config,
            state: State::Idle,
            frame: 0,
        })
    }

    /// Use `view` instead of a fixed viewport over the safe view
    pub fn with_view(mut self, view: impl ViewProvider + 'static) -> Self {
        self.view = Box::new(view);
        self
    }

    /// Draw through `renderer`
    ///
    /// Must be called before [`start`](Self::start); handles already created
    /// on the previous renderer would otherwise be lost.
    pub fn with_renderer(mut self, renderer: impl Renderer) -> Self {
        self.world.set_renderer(Box::new(renderer));
        self
    }

    /// Make the world live and begin accepting frames
    ///
    /// A stopped simulation resumes with a fresh clock.
    pub fn start(&mut self) -> Result<()> {
        if self.state == State::Running {
            return Ok(());
        }
        if let Err(e) = self.world.start() {
            return Err(self.fail(e));
        }
        self.clock.reset();
        self.state = State::Running;
        debug!("simulation started at frame {}", self.frame);
        Ok(())
    }

    /// Stop accepting frames
    pub fn stop(&mut self) {
        if self.state == State::Running {
            self.state = State::Stopped;
            debug!("simulation stopped at frame {}", self.frame);
        }
    }

    /// Check whether frames are being accepted
    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// Run one frame timed by the wall clock
    ///
    /// The first frame after a start has zero elapsed time.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        self.ensure_running()?;
        let dt = self.clock.advance(now);
        self.run_frame(dt)
    }

    /// Run one frame of `dt`, clamped like any other frame
    pub fn step(&mut self, dt: Duration) -> Result<()> {
        self.ensure_running()?;
        let dt = self.clock.clamp(dt);
        self.run_frame(dt)
    }

    /// Queue a pointer event for the next frame
    pub fn push_pointer(&mut self, event: PointerEvent) {
        self.input.push(event);
    }

    /// The simulated world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The simulated world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The global handler registry
    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// The view frames are built from
    pub fn view(&self) -> &dyn ViewProvider {
        self.view.as_ref()
    }

    /// Configuration this simulation was built with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of frames run so far
    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    fn ensure_running(&self) -> Result<()> {
        if self.state == State::Running {
            Ok(())
        } else {
            Err(EngineError::NotStarted)
        }
    }

    fn run_frame(&mut self, dt: Duration) -> Result<()> {
        let frame = FrameContext {
            dt: dt.as_secs_f64(),
            dt_ms: dt.as_secs_f64() * 1000.0,
            frame: self.frame,
            input: self.input.take(),
            safe_view: self.view.safe_view(),
            full_view: self.view.full_view(),
        };

        for phase in Phase::ALL {
            let result = self
                .scheduler
                .run_global(&mut self.world, phase, &frame)
                .and_then(|()| self.world.run_phase(phase, &frame));
            if let Err(e) = result {
                return Err(self.fail(e));
            }
        }
        self.frame += 1;
        Ok(())
    }

    fn fail(&mut self, e: EngineError) -> EngineError {
        error!("simulation stopped at frame {}: {}", self.frame, e);
        self.state = State::Stopped;
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Component, ComponentType, Cx, Kind, COMPONENT};
    use crate::input::PointerKind;
    use crate::math::Vec2;
    use crate::physics::{Collider, Motion, RigidBody};
    use std::any::Any;

    static FAILING: Kind = Kind::derived("Failing", &COMPONENT);

    struct Failing;

    impl Component for Failing {
        fn kind(&self) -> &'static Kind {
            &FAILING
        }

        fn update(&mut self, phase: Phase, _frame: &FrameContext, _cx: &mut Cx<'_>) -> Result<()> {
            if phase == Phase::Move {
                return Err(EngineError::NonFinite("Failing::update"));
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

    impl ComponentType for Failing {
        fn base_kind() -> &'static Kind {
            &FAILING
        }
    }

    fn quiet() -> SimulationConfig {
        SimulationConfig::default().without_frame_rate_observer()
    }

    #[test]
    fn test_frames_require_start() {
        let mut sim = Simulation::new(quiet()).unwrap();
        assert!(matches!(sim.step(Duration::from_millis(10)), Err(EngineError::NotStarted)));

        sim.start().unwrap();
        sim.step(Duration::from_millis(10)).unwrap();
        sim.step(Duration::from_millis(10)).unwrap();
        assert_eq!(sim.frame_index(), 2);

        sim.stop();
        assert!(!sim.is_running());
        assert!(sim.step(Duration::from_millis(10)).is_err());
    }

    #[test]
    fn test_step_is_clamped() {
        let config = quiet().with_max_frame_time(Duration::from_millis(50));
        let mut sim = Simulation::new(config).unwrap();
        let e = sim.world_mut().spawn();
        sim.world_mut()
            .add(e, Motion::default().with_velocity(Vec2::new(1.0, 0.0)))
            .unwrap();
        sim.start().unwrap();

        sim.step(Duration::from_secs(1)).unwrap();
        let pos = sim.world().get::<Motion>(e).unwrap().pos;
        assert!((pos.x - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_first_tick_has_zero_dt() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let e = sim.world_mut().spawn();
        sim.world_mut()
            .add(e, Motion::default().with_velocity(Vec2::new(1.0, 0.0)))
            .unwrap();
        sim.start().unwrap();

        let t0 = Instant::now();
        sim.tick(t0).unwrap();
        assert_eq!(sim.world().get::<Motion>(e).unwrap().pos, Vec2::zero());

        sim.tick(t0 + Duration::from_millis(20)).unwrap();
        assert!((sim.world().get::<Motion>(e).unwrap().pos.x - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_error_stops_simulation() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let e = sim.world_mut().spawn();
        sim.world_mut().add(e, Failing).unwrap();
        sim.start().unwrap();

        assert!(matches!(sim.step(Duration::from_millis(10)), Err(EngineError::NonFinite(_))));
        assert!(!sim.is_running());
        assert_eq!(sim.frame_index(), 0);
    }

    #[test]
    fn test_collisions_resolved_each_frame() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let world = sim.world_mut();
        let mut balls = Vec::new();
        for (x, vx) in [(-0.9, 1.0), (0.9, -1.0)] {
            let ball = world.spawn();
            world
                .add(ball, Motion::new(Vec2::new(x, 0.0)).with_velocity(Vec2::new(vx, 0.0)))
                .unwrap();
            world.add(ball, Collider::disc(1.0).unwrap()).unwrap();
            world.add(ball, RigidBody::new(1.0, 1.0).unwrap()).unwrap();
            balls.push(ball);
        }
        sim.start().unwrap();
        sim.step(Duration::from_millis(10)).unwrap();

        let world = sim.world();
        assert!(world.get::<RigidBody>(balls[0]).unwrap().is_colliding());
        assert!(world.get::<Motion>(balls[0]).unwrap().vel.x < 0.0);
        assert!(world.get::<Motion>(balls[1]).unwrap().vel.x > 0.0);
    }

    #[test]
    fn test_input_consumed_once() {
        let mut sim = Simulation::new(quiet()).unwrap();
        sim.start().unwrap();
        sim.push_pointer(PointerEvent::new(PointerKind::Down, Vec2::zero()));
        sim.step(Duration::from_millis(10)).unwrap();
        assert!(sim.input.is_empty());
    }

    #[test]
    fn test_frame_rate_observer_on_root() {
        let sim = Simulation::new(SimulationConfig::default()).unwrap();
        let root = sim.world().root();
        assert!(sim.world().get::<FrameRateObserver>(root).is_ok());
    }
}
