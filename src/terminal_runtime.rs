use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Terminal the game draws into.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Terminal modes a session switched on, undone in reverse on exit.
#[derive(Debug, Default, Clone, Copy)]
struct ScreenModes {
    raw: bool,
    alternate: bool,
}

impl ScreenModes {
    const ALL: Self = Self {
        raw: true,
        alternate: true,
    };

    fn restore(self) -> io::Result<()> {
        let screen = if self.alternate {
            execute!(io::stdout(), Show, LeaveAlternateScreen)
        } else {
            Ok(())
        };

        if self.raw {
            disable_raw_mode()?;
        }
        screen
    }
}

/// Raw-mode, alternate-screen terminal for one game session.
///
/// Dropping the session puts the terminal back the way it was found.
pub struct TerminalSession {
    terminal: AppTerminal,
    modes: ScreenModes,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        let mut modes = ScreenModes::default();

        enable_raw_mode()?;
        modes.raw = true;

        if let Err(error) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = modes.restore();
            return Err(error);
        }
        modes.alternate = true;

        let terminal = Terminal::new(CrosstermBackend::new(io::stdout())).inspect_err(|_| {
            let _ = modes.restore();
        })?;
        debug!("terminal session entered");

        Ok(Self { terminal, modes })
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(error) = self.modes.restore() {
            warn!("failed to restore terminal: {error}");
        }
    }
}

/// Leaves raw mode before the default panic message prints, so a panic
/// mid-game is still readable.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = ScreenModes::ALL.restore();
        default_hook(panic_info);
    }));
}
