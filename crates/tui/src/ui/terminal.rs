use std::{
    io::{self, Stdout, Write, stdout},
    panic,
};

use crossterm::{
    cursor::Show,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::error::Result;

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Switches to raw mode on the alternate screen. A panic after this point
/// still hands the shell back in a usable state before the message prints.
pub fn setup_terminal() -> Result<AppTerminal> {
    install_panic_restore();
    enable_raw_mode()?;
    let mut stdout = stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode()?;
    leave_screen(terminal.backend_mut())?;
    Ok(())
}

fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    crossterm::execute!(out, LeaveAlternateScreen, Show)
}

fn install_panic_restore() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        // Best effort: the terminal may already be restored.
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut stdout());
        previous(info);
    }));
}
