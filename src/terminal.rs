//! Terminal setup and teardown
//!
//! Raw mode, the alternate screen and mouse capture are undone on every way
//! out of the board: normal exit, an error during setup, or a panic.

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Owns the terminal while the board is on screen. Dropping it restores
/// the terminal.
pub struct TerminalGuard {
    terminal: Tui,
    restored: bool,
}

impl TerminalGuard {
    pub fn enter(mouse: bool) -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;
        match setup(mouse) {
            Ok(terminal) => Ok(Self {
                terminal,
                restored: false,
            }),
            Err(err) => {
                let _ = restore();
                Err(err)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }

    /// Restore now and report the first failure.
    pub fn leave(mut self) -> io::Result<()> {
        self.restored = true;
        restore()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.restored {
            let _ = restore();
        }
    }
}

fn setup(mouse: bool) -> io::Result<Tui> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Undo every setup step, even when an earlier one fails.
pub fn restore() -> io::Result<()> {
    let steps: [&dyn Fn() -> io::Result<()>; 3] = [
        &disable_raw_mode,
        &|| execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture),
        &|| execute!(io::stdout(), Show),
    ];
    run_all(&steps)
}

/// Restore the terminal before the default hook prints the panic.
pub fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore();
            hook(info);
        }));
    });
}

fn run_all(steps: &[&dyn Fn() -> io::Result<()>]) -> io::Result<()> {
    let mut first = Ok(());
    for step in steps {
        if let Err(err) = step() {
            if first.is_ok() {
                first = Err(err);
            }
        }
    }
    first
}
