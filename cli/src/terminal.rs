use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::style::ResetColor;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

/// Raw mode on the alternate screen for as long as it lives.
pub struct RawTerminal(());

impl RawTerminal {
    pub fn enter() -> io::Result<Self> {
        // built first so a failure below still restores the terminal
        let guard = Self(());
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        log::debug!("Entered raw mode");
        Ok(guard)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        if let Err(err) = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen) {
            log::warn!("Could not leave the alternate screen: {}", err);
        }
        if let Err(err) = terminal::disable_raw_mode() {
            log::warn!("Could not leave raw mode: {}", err);
        }
    }
}

/// Key presses from the terminal, blocking until each arrives. Releases,
/// repeats and non-key events are skipped.
pub fn key_presses() -> impl Iterator<Item = io::Result<KeyEvent>> {
    std::iter::from_fn(|| {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => return Some(Ok(key)),
                Ok(_) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    })
}
