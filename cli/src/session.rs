use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use minegrid_core::{Direction, Grid};

/// One player action, read as a single key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Dig,
    Flag,
    Quit,
}

impl Command {
    pub fn from_key(key: char) -> Option<Self> {
        use Command::*;
        Some(match key.to_ascii_lowercase() {
            'h' => Move(Direction::Left),
            'j' => Move(Direction::Down),
            'k' => Move(Direction::Up),
            'l' => Move(Direction::Right),
            'd' => Dig,
            'f' => Flag,
            'q' => Quit,
            _ => return None,
        })
    }

    /// Arrow keys move as well as `h`/`j`/`k`/`l`; Esc and Ctrl-C quit since
    /// raw mode swallows the interrupt.
    pub fn from_key_event(key: KeyEvent) -> Option<Self> {
        use Command::*;
        match key.code {
            KeyCode::Left => Some(Move(Direction::Left)),
            KeyCode::Down => Some(Move(Direction::Down)),
            KeyCode::Up => Some(Move(Direction::Up)),
            KeyCode::Right => Some(Move(Direction::Right)),
            KeyCode::Esc => Some(Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Quit),
            KeyCode::Char(key) => Self::from_key(key),
            _ => None,
        }
    }
}

/// Commands in an input line, in order. Whitespace is skipped and unknown
/// keys are dropped.
pub fn parse_line(line: &str) -> impl Iterator<Item = Command> + '_ {
    line.chars()
        .filter(|key| !key.is_whitespace())
        .filter_map(|key| {
            let command = Command::from_key(key);
            if command.is_none() {
                log::debug!("Ignoring unknown key {:?}", key);
            }
            command
        })
}

/// Valid transitions:
/// - Running -> Won
/// - Running -> Lost
/// - Running -> Quit
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Won,
    Lost,
    Quit,
}

impl SessionState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// A single game: the grid plus whether it is still being played.
#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    state: SessionState,
}

impl Session {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            state: SessionState::Running,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Applies `command` unless the session already ended. A dig that hits a
    /// hazard loses; the win check only runs after a flag.
    pub fn apply(&mut self, command: Command) -> SessionState {
        if !self.state.is_running() {
            log::debug!("Session over, ignoring {:?}", command);
            return self.state;
        }

        match command {
            Command::Move(direction) => self.grid.move_selection(direction),
            Command::Dig => {
                if self.grid.dig_selected() {
                    log::info!("Hazard dug at {:?}", self.grid.selection());
                    self.state = SessionState::Lost;
                }
            }
            Command::Flag => {
                self.grid.flag_selected();
                if self.grid.is_won() {
                    log::info!("All hazards flagged");
                    self.state = SessionState::Won;
                }
            }
            Command::Quit => self.state = SessionState::Quit,
        }

        self.state
    }
}
