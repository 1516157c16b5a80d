//! Game session driver
//!
//! Owns one [`World`] plus everything the host needs around it: the RNG,
//! the frame/decay clock handles, the decorative cloud layer and the list of
//! observers (renderer, audio, game-over screen). The simulation never calls
//! out; the session pulls state after each engine call and pushes it to
//! observers.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::platform::{Clocks, InputAction};
use crate::scenery::CloudLayer;
use crate::settings::Settings;
use crate::sim::{self, Assets, Direction, GameEvent, RunSummary, Signal, World, WorldError};

/// Host-side collaborators notified as the session runs
pub trait SessionObserver {
    /// Called once per presented frame with the fresh snapshot
    fn on_frame(&mut self, _world: &World, _clouds: &CloudLayer) {}

    /// Called for each event the engine produced
    fn on_event(&mut self, _event: &GameEvent) {}

    /// Called exactly once when the run ends
    fn on_game_over(&mut self, _summary: &RunSummary) {}
}

/// Logs events and the final result
#[derive(Debug, Default)]
pub struct LogObserver;

impl SessionObserver for LogObserver {
    fn on_event(&mut self, event: &GameEvent) {
        log::debug!("{:?}", event);
    }

    fn on_game_over(&mut self, summary: &RunSummary) {
        log::info!(
            "Game over ({:?}): survived {}s, {} stars",
            summary.cause,
            summary.elapsed_time,
            summary.score
        );
    }
}

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    Paused,
    Over(RunSummary),
}

/// One play-through from start to game over
pub struct Session {
    world: World,
    clouds: CloudLayer,
    rng: Pcg32,
    /// Present only while running; released on pause and game over
    clocks: Option<Clocks>,
    decay_interval: f32,
    phase: SessionPhase,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Session {
    /// Build a fresh world and start both clocks
    pub fn start(settings: &Settings, assets: &Assets, seed: u64) -> Result<Self, WorldError> {
        let world = World::with_tuning(
            settings.field_width,
            settings.field_height,
            assets,
            settings.effective_tuning(),
        )?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = match settings.effective_cloud_count() {
            0 => CloudLayer::disabled(world.field()),
            count => CloudLayer::new(count, world.field(), world.sprites.cloud, &mut rng),
        };

        log::info!(
            "Session started: {}x{}, {} difficulty, seed {}",
            world.width,
            world.height,
            settings.difficulty.as_str(),
            seed
        );

        Ok(Self {
            world,
            clouds,
            rng,
            clocks: Some(Clocks::acquire(settings.decay_interval)),
            decay_interval: settings.decay_interval,
            phase: SessionPhase::Running,
            observers: Vec::new(),
        })
    }

    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn clouds(&self) -> &CloudLayer {
        &self.clouds
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, SessionPhase::Over(_))
    }

    /// Final result, once the run has ended
    pub fn summary(&self) -> Option<RunSummary> {
        match self.phase {
            SessionPhase::Over(summary) => Some(summary),
            _ => None,
        }
    }

    /// Frames presented since the clocks were last acquired
    pub fn frames(&self) -> u64 {
        self.clocks.as_ref().map_or(0, |c| c.frame.frames())
    }

    /// Apply a key press. Movement is ignored while paused or over.
    pub fn handle_input(&mut self, action: InputAction) {
        match action {
            InputAction::TogglePause => self.toggle_pause(),
            InputAction::Move(direction) => self.steer(direction),
        }
    }

    pub fn steer(&mut self, direction: Direction) {
        if self.phase == SessionPhase::Running {
            sim::move_aircraft(&mut self.world, direction);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            SessionPhase::Running => self.pause(),
            SessionPhase::Paused => self.resume(),
            SessionPhase::Over(_) => {}
        }
    }

    /// Stop both clocks; the world is left untouched
    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Running {
            self.clocks = None;
            self.phase = SessionPhase::Paused;
            log::info!("Paused at {}s", self.world.elapsed_time);
        }
    }

    /// Restart both clocks from zero
    pub fn resume(&mut self) {
        if self.phase == SessionPhase::Paused {
            self.clocks = Some(Clocks::acquire(self.decay_interval));
            self.phase = SessionPhase::Running;
            log::info!("Resumed");
        }
    }

    /// Run one presentation frame: one simulation tick, then however many
    /// decay intervals `dt` seconds completed.
    pub fn frame(&mut self, dt: f32) -> Signal {
        if self.phase != SessionPhase::Running {
            return self.world.signal();
        }
        let Some(clocks) = self.clocks.as_mut() else {
            return self.world.signal();
        };

        clocks.frame.next_frame();
        let decays = clocks.decay.advance(dt);

        self.clouds.update(&mut self.rng);

        let mut signal = sim::tick(&mut self.world, &mut self.rng);
        self.dispatch_events();

        for _ in 0..decays {
            if signal.is_game_over() {
                break;
            }
            signal = sim::decay_fuel_and_time(&mut self.world);
            self.dispatch_events();
        }

        for observer in &mut self.observers {
            observer.on_frame(&self.world, &self.clouds);
        }

        if let Signal::GameOver(summary) = signal {
            self.finish(summary);
        }
        signal
    }

    fn dispatch_events(&mut self) {
        for event in &self.world.events {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
    }

    fn finish(&mut self, summary: RunSummary) {
        self.clocks = None;
        self.phase = SessionPhase::Over(summary);
        for observer in &mut self.observers {
            observer.on_game_over(&summary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EndCause, Entity};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorded {
        frames: usize,
        events: Vec<GameEvent>,
        game_overs: Vec<RunSummary>,
    }

    struct Recorder(Rc<RefCell<Recorded>>);

    impl SessionObserver for Recorder {
        fn on_frame(&mut self, _world: &World, _clouds: &CloudLayer) {
            self.0.borrow_mut().frames += 1;
        }

        fn on_event(&mut self, event: &GameEvent) {
            self.0.borrow_mut().events.push(*event);
        }

        fn on_game_over(&mut self, summary: &RunSummary) {
            self.0.borrow_mut().game_overs.push(*summary);
        }
    }

    fn quiet_settings() -> Settings {
        Settings {
            tuning_override: Some(Tuning {
                obstacle_spawn_chance: 0.0,
                fuel_spawn_chance: 0.0,
                score_spawn_chance: 0.0,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn recorded_session(settings: &Settings) -> (Session, Rc<RefCell<Recorded>>) {
        let mut session = Session::start(settings, &Assets::placeholder(), 42).unwrap();
        let log = Rc::new(RefCell::new(Recorded::default()));
        session.add_observer(Box::new(Recorder(log.clone())));
        (session, log)
    }

    #[test]
    fn test_start_builds_fresh_world() {
        let session = Session::start(&Settings::default(), &Assets::placeholder(), 1).unwrap();
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.world().fuel, 10);
        assert_eq!(session.clouds().clouds.len(), 5);
        assert_eq!(session.frames(), 0);
    }

    #[test]
    fn test_start_propagates_world_error() {
        let settings = Settings {
            field_width: 0,
            ..Default::default()
        };
        let result = Session::start(&settings, &Assets::placeholder(), 1);
        assert!(matches!(result, Err(WorldError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_fuel_runs_out_after_ten_seconds() {
        let (mut session, log) = recorded_session(&quiet_settings());

        let mut last = Signal::Continue;
        for _ in 0..10 {
            last = session.frame(1.0);
        }

        let expected = RunSummary {
            elapsed_time: 10,
            score: 0,
            cause: EndCause::FuelExhausted,
        };
        assert_eq!(last, Signal::GameOver(expected));
        assert_eq!(session.summary(), Some(expected));

        let log = log.borrow();
        assert_eq!(log.frames, 10);
        assert_eq!(log.game_overs, vec![expected]);
        assert_eq!(log.events, vec![GameEvent::FuelExhausted]);
    }

    #[test]
    fn test_game_over_reported_once() {
        let (mut session, log) = recorded_session(&quiet_settings());
        for _ in 0..20 {
            session.frame(1.0);
        }
        assert!(session.is_over());
        assert_eq!(log.borrow().game_overs.len(), 1);
        assert_eq!(log.borrow().frames, 10);
        assert_eq!(session.world().elapsed_time, 10);
    }

    #[test]
    fn test_pause_freezes_world_and_input() {
        let (mut session, log) = recorded_session(&quiet_settings());
        session.frame(0.5);
        session.handle_input(InputAction::TogglePause);
        assert!(session.is_paused());

        let before = session.world().aircraft.pos;
        session.handle_input(InputAction::Move(Direction::Left));
        for _ in 0..5 {
            assert_eq!(session.frame(1.0), Signal::Continue);
        }
        assert_eq!(session.world().aircraft.pos, before);
        assert_eq!(session.world().elapsed_time, 0);
        assert_eq!(log.borrow().frames, 1);

        session.handle_input(InputAction::TogglePause);
        assert!(!session.is_paused());
        session.handle_input(InputAction::Move(Direction::Left));
        assert_eq!(session.world().aircraft.pos, before - Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_resume_restarts_decay_clock() {
        let (mut session, _log) = recorded_session(&quiet_settings());
        // Half a second banked, then discarded by pause/resume
        session.frame(0.5);
        session.pause();
        session.resume();
        session.frame(0.5);
        assert_eq!(session.world().elapsed_time, 0);
        session.frame(0.5);
        assert_eq!(session.world().elapsed_time, 1);
        assert_eq!(session.frames(), 2);
    }

    #[test]
    fn test_crash_ends_session_before_decay() {
        let (mut session, log) = recorded_session(&quiet_settings());
        let plane = session.world.aircraft.clone();
        let bird = Entity::new(
            plane.pos + Vec2::new(3.0, 0.0),
            plane.size,
            3.0,
            session.world.sprites.bird,
        );
        session.world.obstacles.push(bird);

        let signal = session.frame(1.0);
        assert!(matches!(
            signal,
            Signal::GameOver(RunSummary {
                cause: EndCause::Collision,
                elapsed_time: 0,
                ..
            })
        ));
        assert_eq!(session.world().fuel, 10);
        assert_eq!(log.borrow().events, vec![GameEvent::Crashed]);

        // Pause has no effect once over
        session.toggle_pause();
        assert!(session.is_over());
    }
}
