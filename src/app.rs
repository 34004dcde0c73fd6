use std::io;
use std::time::{Duration, Instant};

use log::info;

use crate::config::THEME_CLASSIC;
use crate::driver::GameDriver;
use crate::game::{GameEngine, GameStatus};
use crate::input::{self, GameInput};
use crate::random::RandomSource;
use crate::renderer;
use crate::terminal_runtime::AppTerminal;
use crate::ui::hud::HudInfo;

/// Longest wait for input between redraws.
const FRAME_BUDGET: Duration = Duration::from_millis(16);

/// Whether the loop should keep going after an input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Session state around one driver: start screen flag and in-memory high score.
#[derive(Debug)]
pub struct App<R: RandomSource> {
    driver: GameDriver<R>,
    awaiting_start: bool,
    high_score: u32,
    high_score_before_game: u32,
    last_status: GameStatus,
}

impl<R: RandomSource> App<R> {
    #[must_use]
    pub fn new(engine: GameEngine<R>) -> Self {
        let last_status = engine.status();

        Self {
            driver: GameDriver::new(engine),
            awaiting_start: true,
            high_score: 0,
            high_score_before_game: 0,
            last_status,
        }
    }

    /// Applies one input event at `now`.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> Flow {
        match input {
            GameInput::Quit => return Flow::Quit,
            GameInput::Direction(direction) => self.driver.set_direction(direction),
            GameInput::Confirm if self.awaiting_start => {
                self.awaiting_start = false;
                self.driver.start(now);
                info!("game started");
            }
            GameInput::Confirm if self.driver.engine().is_over() => self.restart(now),
            GameInput::Confirm => {}
            GameInput::Restart => self.restart(now),
        }

        Flow::Continue
    }

    /// Advances the driver and records a finished game.
    pub fn update(&mut self, now: Instant) {
        self.driver.pump(now);

        let status = self.driver.status();
        if status == self.last_status {
            return;
        }

        if status == GameStatus::GameOver {
            let score = self.driver.engine().score();
            if score > self.high_score {
                info!("new session high score {score} (was {})", self.high_score);
                self.high_score = score;
            }
        }

        self.last_status = status;
    }

    /// Time to wait for input before the next update is needed.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.driver
            .time_until_next_tick(now)
            .map_or(FRAME_BUDGET, |until_tick| until_tick.min(FRAME_BUDGET))
    }

    /// HUD values for the current frame.
    #[must_use]
    pub fn hud_info(&self) -> HudInfo<'static> {
        HudInfo {
            high_score: self.high_score,
            new_high_score: self.driver.engine().is_over()
                && self.driver.engine().score() > self.high_score_before_game,
            awaiting_start: self.awaiting_start,
            theme: &THEME_CLASSIC,
        }
    }

    #[must_use]
    pub fn driver(&self) -> &GameDriver<R> {
        &self.driver
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Clears the driver timer; called once the loop exits.
    pub fn shutdown(&mut self) {
        self.driver.stop();
    }

    fn restart(&mut self, now: Instant) {
        self.awaiting_start = false;
        self.high_score_before_game = self.high_score;
        self.driver.reset(now);
        self.last_status = self.driver.status();
        info!("game restarted");
    }
}

/// Runs the draw / input / tick loop until the player quits.
pub fn run<R: RandomSource>(terminal: &mut AppTerminal, mut app: App<R>) -> io::Result<()> {
    loop {
        let snapshot = app.driver().snapshot();
        let hud_info = app.hud_info();
        terminal.draw(|frame| renderer::render(frame, &snapshot, &hud_info))?;

        let timeout = app.poll_timeout(Instant::now());
        if let Some(game_input) = input::poll_input(timeout)? {
            if app.handle_input(game_input, Instant::now()) == Flow::Quit {
                break;
            }
        }

        app.update(Instant::now());
    }

    app.shutdown();
    info!("session ended, high score {}", app.high_score());
    Ok(())
}
