use std::time::{Duration, Instant};

use log::debug;
use rand::rngs::StdRng;

use crate::game::{GameEngine, GameSnapshot, GameStatus};
use crate::input::Direction;
use crate::random::RandomSource;

/// Periodic timer owned by the driver. Armed while a game is running,
/// cleared on game over, reset and teardown.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickTimer {
    armed: Option<Armed>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Armed {
    interval: Duration,
    due_at: Instant,
}

impl TickTimer {
    /// Arms the timer so the next tick falls due `interval` after `now`.
    pub fn start(&mut self, now: Instant, interval: Duration) {
        self.armed = Some(Armed {
            interval,
            due_at: now + interval,
        });
    }

    /// Clears the timer; no tick falls due until it is started again.
    pub fn stop(&mut self) {
        self.armed = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.armed.is_some()
    }

    /// Returns the armed period, if any.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.armed.map(|armed| armed.interval)
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.armed.is_some_and(|armed| now >= armed.due_at)
    }

    /// Returns how long until the next tick, `None` while stopped.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|armed| armed.due_at.saturating_duration_since(now))
    }
}

/// Runs one engine at its own pace.
///
/// Owns the engine and its timer. Input reaches the engine only through
/// [`GameDriver::set_direction`]; ticks happen only in [`GameDriver::pump`].
#[derive(Debug)]
pub struct GameDriver<R: RandomSource = StdRng> {
    engine: GameEngine<R>,
    timer: TickTimer,
}

impl<R: RandomSource> GameDriver<R> {
    /// Wraps `engine` with a stopped timer.
    #[must_use]
    pub fn new(engine: GameEngine<R>) -> Self {
        Self {
            engine,
            timer: TickTimer::default(),
        }
    }

    /// Starts ticking at the engine's current interval. No-op once the game
    /// is over or while already running.
    pub fn start(&mut self, now: Instant) {
        if self.engine.is_over() || self.timer.is_running() {
            return;
        }

        self.timer.start(now, self.engine.tick_interval());
        debug!("tick timer started at {:?}", self.engine.tick_interval());
    }

    /// Clears the timer.
    pub fn stop(&mut self) {
        if self.timer.is_running() {
            self.timer.stop();
            debug!("tick timer stopped");
        }
    }

    /// Resets the engine and restarts the timer at the base interval.
    pub fn reset(&mut self, now: Instant) {
        self.engine.reset();
        self.timer.start(now, self.engine.tick_interval());
        debug!("tick timer restarted at {:?}", self.engine.tick_interval());
    }

    /// Buffers a turn for the next tick.
    pub fn set_direction(&mut self, direction: Direction) {
        self.engine.set_direction(direction);
    }

    /// Runs at most one tick if the timer is due at `now`.
    ///
    /// Returns true when a tick ran. Afterwards the timer is stopped if the
    /// game ended, or re-armed from `now` with the engine's current interval.
    pub fn pump(&mut self, now: Instant) -> bool {
        if !self.timer.is_due(now) {
            return false;
        }

        self.engine.tick();

        if self.engine.is_over() {
            self.stop();
        } else {
            self.timer.start(now, self.engine.tick_interval());
        }

        true
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    #[must_use]
    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    /// Returns how long until the next tick, `None` while stopped.
    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    /// Read-only access to the engine.
    #[must_use]
    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{GameDriver, TickTimer};
    use crate::config::EngineConfig;
    use crate::game::{GameEngine, GameStatus};
    use crate::input::Direction;
    use crate::random::ScriptedSource;
    use crate::snake::{Position, Snake};

    const BASE: Duration = Duration::from_millis(150);

    fn driver_at(snake: Snake, food: Position) -> GameDriver {
        GameDriver::new(GameEngine::from_layout(
            EngineConfig::default(),
            StdRng::seed_from_u64(8),
            snake,
            food,
        ))
    }

    #[test]
    fn timer_is_due_only_after_interval() {
        let start = Instant::now();
        let mut timer = TickTimer::default();
        assert!(!timer.is_due(start + BASE));
        assert_eq!(timer.time_until_due(start), None);

        timer.start(start, BASE);
        assert!(!timer.is_due(start + Duration::from_millis(149)));
        assert!(timer.is_due(start + BASE));
        assert_eq!(
            timer.time_until_due(start + Duration::from_millis(100)),
            Some(Duration::from_millis(50))
        );
        assert_eq!(timer.time_until_due(start + BASE * 2), Some(Duration::ZERO));

        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.is_due(start + BASE * 2));
    }

    #[test]
    fn pump_does_nothing_until_started() {
        let start = Instant::now();
        let mut driver = GameDriver::new(GameEngine::with_seed(EngineConfig::default(), 1));

        assert!(!driver.pump(start + BASE * 10));
        assert_eq!(driver.status(), GameStatus::Ready);
    }

    #[test]
    fn pump_runs_one_tick_per_due_interval() {
        let start = Instant::now();
        let mut driver = driver_at(
            Snake::new(Position { x: 5, y: 5 }, Direction::Right),
            Position { x: 0, y: 0 },
        );
        driver.start(start);

        assert!(!driver.pump(start + Duration::from_millis(10)));
        assert!(driver.pump(start + BASE));
        // Late wake-ups still advance exactly one step.
        assert!(driver.pump(start + BASE * 5));
        assert!(!driver.pump(start + BASE * 5));

        let snapshot = driver.snapshot();
        assert_eq!(snapshot.tick_count, 2);
        assert_eq!(snapshot.head(), Position { x: 7, y: 5 });
    }

    #[test]
    fn direction_applies_on_next_pumped_tick() {
        let start = Instant::now();
        let mut driver = driver_at(
            Snake::new(Position { x: 5, y: 5 }, Direction::Right),
            Position { x: 0, y: 0 },
        );
        driver.start(start);

        driver.set_direction(Direction::Down);
        assert_eq!(driver.snapshot().direction, Direction::Right);

        driver.pump(start + BASE);
        assert_eq!(driver.snapshot().head(), Position { x: 5, y: 6 });
    }

    #[test]
    fn game_over_stops_timer() {
        let start = Instant::now();
        let mut driver = driver_at(
            Snake::new(Position { x: 19, y: 5 }, Direction::Right),
            Position { x: 0, y: 0 },
        );
        driver.start(start);

        assert!(driver.pump(start + BASE));
        assert_eq!(driver.status(), GameStatus::GameOver);
        assert!(!driver.is_running());
        assert_eq!(driver.time_until_next_tick(start + BASE), None);

        // A stopped driver cannot be started again without a reset.
        driver.start(start + BASE);
        assert!(!driver.is_running());
    }

    #[test]
    fn eating_re_arms_timer_with_ramped_interval() {
        let start = Instant::now();
        let mut driver = GameDriver::new(GameEngine::from_layout(
            EngineConfig::default(),
            ScriptedSource::new(&[15, 15]),
            Snake::new(Position { x: 5, y: 5 }, Direction::Right),
            Position { x: 6, y: 5 },
        ));
        driver.start(start);

        let ate_at = start + BASE;
        assert!(driver.pump(ate_at));

        assert_eq!(driver.timer().interval(), Some(Duration::from_millis(145)));
        assert_eq!(
            driver.time_until_next_tick(ate_at),
            Some(Duration::from_millis(145))
        );
    }

    #[test]
    fn reset_restarts_timer_at_base_interval() {
        let start = Instant::now();
        let mut driver = GameDriver::new(GameEngine::from_layout(
            EngineConfig::default(),
            ScriptedSource::new(&[19, 19]),
            Snake::new(Position { x: 18, y: 5 }, Direction::Right),
            Position { x: 19, y: 5 },
        ));
        driver.start(start);
        driver.pump(start + BASE);
        driver.pump(start + BASE * 3);
        assert_eq!(driver.status(), GameStatus::GameOver);
        assert!(!driver.is_running());

        let restart = start + BASE * 4;
        driver.reset(restart);

        assert!(driver.is_running());
        assert_eq!(driver.timer().interval(), Some(BASE));
        assert_eq!(driver.status(), GameStatus::Ready);
        assert_eq!(driver.snapshot().score, 0);
        assert!(driver.pump(restart + BASE));
        assert_eq!(driver.status(), GameStatus::Running);
    }

    #[test]
    fn stop_clears_timer_on_teardown() {
        let start = Instant::now();
        let mut driver = GameDriver::new(GameEngine::with_seed(EngineConfig::default(), 3));
        driver.start(start);
        assert!(driver.is_running());

        driver.stop();

        assert!(!driver.is_running());
        assert!(!driver.pump(start + BASE * 2));
    }
}
