use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use minegrid_core::{Direction, SnakeGame, StepOutcome};

use crate::render::Renderer;

/// How long to wait for a key before checking whether the snake is due.
const POLL_MILLIS: u64 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnakeInput {
    Steer(Direction),
    Quit,
}

impl SnakeInput {
    pub fn from_key_event(key: KeyEvent) -> Option<Self> {
        use SnakeInput::*;
        Some(match key.code {
            KeyCode::Left | KeyCode::Char('h') => Steer(Direction::Left),
            KeyCode::Down | KeyCode::Char('j') => Steer(Direction::Down),
            KeyCode::Up | KeyCode::Char('k') => Steer(Direction::Up),
            KeyCode::Right | KeyCode::Char('l') => Steer(Direction::Right),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Quit,
            KeyCode::Esc | KeyCode::Char('q') => Quit,
            _ => return None,
        })
    }
}

/// Whether the snake has waited long enough since its last move.
pub fn is_due(game: &SnakeGame, since_last_move: Duration) -> bool {
    since_last_move >= Duration::from_millis(game.step_millis().into())
}

/// Runs the game in real time on the terminal until the player quits. A dead
/// snake stays on screen until then.
pub fn play(game: &mut SnakeGame, renderer: &Renderer, out: &mut impl Write) -> anyhow::Result<()> {
    let mut last_move = Instant::now();
    renderer
        .draw_snake(game, out)
        .context("could not draw the field")?;

    loop {
        if event::poll(Duration::from_millis(POLL_MILLIS)).context("could not poll keys")? {
            let event = event::read().context("could not read key")?;
            if let Event::Key(key) = event
                && key.kind == KeyEventKind::Press
            {
                match SnakeInput::from_key_event(key) {
                    Some(SnakeInput::Steer(direction)) => game.steer(direction),
                    Some(SnakeInput::Quit) => return Ok(()),
                    None => log::debug!("Ignoring key {:?}", key.code),
                }
            }
        }

        if game.is_dead() || !is_due(game, last_move.elapsed()) {
            continue;
        }
        last_move = Instant::now();
        if game.advance() == StepOutcome::Crashed {
            log::info!("Snake died with score {}", game.score());
        }
        renderer
            .draw_snake(game, out)
            .context("could not draw the field")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minegrid_core::{INITIAL_STEP_MILLIS, SnakeConfig};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_letters_steer() {
        assert_eq!(
            SnakeInput::from_key_event(press(KeyCode::Up)),
            Some(SnakeInput::Steer(Direction::Up))
        );
        assert_eq!(
            SnakeInput::from_key_event(press(KeyCode::Char('h'))),
            Some(SnakeInput::Steer(Direction::Left))
        );
        assert_eq!(
            SnakeInput::from_key_event(press(KeyCode::Char('q'))),
            Some(SnakeInput::Quit)
        );
        assert_eq!(
            SnakeInput::from_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(SnakeInput::Quit)
        );
        assert_eq!(SnakeInput::from_key_event(press(KeyCode::Char('d'))), None);
    }

    #[test]
    fn due_after_the_step_interval() {
        let game = SnakeGame::new(SnakeConfig::default(), 1).unwrap();
        let step = u64::from(INITIAL_STEP_MILLIS);

        assert!(!is_due(&game, Duration::from_millis(step - 1)));
        assert!(is_due(&game, Duration::from_millis(step)));
    }
}
