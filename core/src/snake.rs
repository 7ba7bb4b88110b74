use alloc::collections::VecDeque;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

pub const DEFAULT_SNAKE_FIELD: Coord2 = (30, 20);
pub const DEFAULT_SNAKE_LENGTH: u8 = 6;

/// Milliseconds between moves before the first meal.
pub const INITIAL_STEP_MILLIS: u16 = 100;
const STEP_MILLIS_PER_MEAL: u16 = 2;
const MIN_STEP_MILLIS: u16 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeConfig {
    pub size: Coord2,
    pub initial_length: u8,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SNAKE_FIELD,
            initial_length: DEFAULT_SNAKE_LENGTH,
        }
    }
}

impl SnakeConfig {
    pub fn new(size: Coord2, initial_length: u8) -> Result<Self> {
        let config = Self {
            size,
            initial_length,
        };
        config.validate()?;
        Ok(config)
    }

    /// The snake starts in the middle row, tail at the center column, and
    /// must fit between there and the right wall.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height }.into());
        }

        let length = self.initial_length;
        if length == 0 || u16::from(width / 2) + u16::from(length) > u16::from(width) {
            return Err(ConfigError::SnakeDoesNotFit { length, width }.into());
        }
        Ok(())
    }
}

/// What one [`SnakeGame::advance`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    /// Hit a wall or its own body; the snake stays where it was.
    Crashed,
    /// Already dead, nothing happens.
    Idle,
}

/// A snake on a walled field chasing one piece of food at a time. Time is
/// the caller's business: [`SnakeGame::step_millis`] says how long to wait
/// between calls to [`SnakeGame::advance`].
#[derive(Clone, Debug)]
pub struct SnakeGame {
    size: Coord2,
    /// Tail at the front, head at the back.
    body: VecDeque<Coord2>,
    heading: Direction,
    requested: Direction,
    food: Option<Coord2>,
    score: u32,
    step_millis: u16,
    dead: bool,
    rng: SmallRng,
}

impl SnakeGame {
    pub fn new(config: SnakeConfig, seed: u64) -> Result<Self> {
        config.validate()?;

        let (width, height) = config.size;
        let (mid_x, mid_y) = (width / 2, height / 2);
        let body = (0..config.initial_length)
            .map(|offset| (mid_x + offset, mid_y))
            .collect();

        let mut game = Self {
            size: config.size,
            body,
            heading: Direction::Right,
            requested: Direction::Right,
            food: None,
            score: 0,
            step_millis: INITIAL_STEP_MILLIS,
            dead: false,
            rng: SmallRng::seed_from_u64(seed),
        };
        game.food = game.spawn_food();
        log::debug!(
            "Snake of {} on {}x{}, food at {:?} (seed {})",
            config.initial_length,
            width,
            height,
            game.food,
            seed
        );
        Ok(game)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn head(&self) -> Coord2 {
        // the body is never empty
        self.body.back().copied().unwrap_or_default()
    }

    /// Body positions from tail to head.
    pub fn body(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, coords: Coord2) -> bool {
        self.body.contains(&coords)
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// `None` once the snake covers every free cell.
    pub fn food(&self) -> Option<Coord2> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn step_millis(&self) -> u16 {
        self.step_millis
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Asks to turn on the next move. The latest request wins; one that
    /// would reverse the snake onto itself is ignored when applied.
    pub fn steer(&mut self, direction: Direction) {
        self.requested = direction;
    }

    pub fn advance(&mut self) -> StepOutcome {
        if self.dead {
            return StepOutcome::Idle;
        }

        if self.requested != self.heading.opposite() {
            self.heading = self.requested;
        }

        let head = self.head();
        let next = match self.heading.checked_step(head, self.size) {
            Some(next) if !self.occupies(next) => next,
            next => {
                log::info!("Snake crashed at {:?} heading {:?}", next, self.heading);
                self.dead = true;
                return StepOutcome::Crashed;
            }
        };

        self.body.push_back(next);
        if self.food != Some(next) {
            self.body.pop_front();
            return StepOutcome::Moved;
        }

        self.score += 1;
        self.step_millis = self
            .step_millis
            .saturating_sub(STEP_MILLIS_PER_MEAL)
            .max(MIN_STEP_MILLIS);
        self.food = self.spawn_food();
        log::debug!(
            "Ate at {:?}, score {}, next food at {:?}",
            next,
            self.score,
            self.food
        );
        StepOutcome::Ate
    }

    /// Uniform over the free cells, by rejection like hazard placement.
    fn spawn_food(&mut self) -> Option<Coord2> {
        if self.body.len() >= usize::from(area(self.size)) {
            return None;
        }

        let (width, height) = self.size;
        loop {
            let coords = (
                self.rng.random_range(0..width),
                self.rng.random_range(0..height),
            );
            if !self.occupies(coords) {
                return Some(coords);
            }
            log::trace!("Food would land on the snake at {:?}", coords);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn game(size: Coord2, length: u8) -> SnakeGame {
        let mut game = SnakeGame::new(SnakeConfig::new(size, length).unwrap(), 17).unwrap();
        // keep the food out of the way unless a test puts it somewhere
        game.food = None;
        game
    }

    #[test]
    fn starts_in_the_middle_heading_right() {
        let game = SnakeGame::new(SnakeConfig::default(), 5).unwrap();

        let body: Vec<_> = game.body().collect();
        assert_eq!(
            body,
            [(15, 10), (16, 10), (17, 10), (18, 10), (19, 10), (20, 10)]
        );
        assert_eq!(game.head(), (20, 10));
        assert_eq!(game.heading(), Direction::Right);
        assert_eq!(game.step_millis(), INITIAL_STEP_MILLIS);

        let food = game.food().unwrap();
        assert!(!game.occupies(food));
        assert!(food.0 < 30 && food.1 < 20);
    }

    #[test]
    fn moving_keeps_length() {
        let mut game = game((10, 10), 3);

        assert_eq!(game.advance(), StepOutcome::Moved);

        let body: Vec<_> = game.body().collect();
        assert_eq!(body, [(6, 5), (7, 5), (8, 5)]);
    }

    #[test]
    fn turns_but_never_reverses() {
        let mut game = game((10, 10), 3);

        game.steer(Direction::Left);
        game.advance();
        assert_eq!(game.heading(), Direction::Right);
        assert_eq!(game.head(), (8, 5));

        game.steer(Direction::Up);
        game.advance();
        assert_eq!(game.head(), (8, 4));

        // the request sticks until it can be applied
        game.steer(Direction::Down);
        game.advance();
        assert_eq!(game.heading(), Direction::Up);
        assert_eq!(game.head(), (8, 3));
    }

    #[test]
    fn eating_grows_scores_and_speeds_up() {
        let mut game = game((10, 10), 3);
        game.food = Some((8, 5));

        assert_eq!(game.advance(), StepOutcome::Ate);

        assert_eq!(game.len(), 4);
        assert_eq!(game.head(), (8, 5));
        assert_eq!(game.score(), 1);
        assert_eq!(game.step_millis(), INITIAL_STEP_MILLIS - STEP_MILLIS_PER_MEAL);
        let food = game.food().unwrap();
        assert!(!game.occupies(food));

        game.food = None;
        assert_eq!(game.advance(), StepOutcome::Moved);
        assert_eq!(game.len(), 4);
    }

    #[test]
    fn wall_is_fatal() {
        let mut game = game((4, 3), 2);
        assert_eq!(game.head(), (3, 1));

        assert_eq!(game.advance(), StepOutcome::Crashed);
        assert!(game.is_dead());
        assert_eq!(game.head(), (3, 1));

        game.steer(Direction::Up);
        assert_eq!(game.advance(), StepOutcome::Idle);
        assert_eq!(game.head(), (3, 1));
    }

    #[test]
    fn biting_own_body_is_fatal() {
        let mut game = game((10, 10), 5);

        game.steer(Direction::Up);
        assert_eq!(game.advance(), StepOutcome::Moved);
        game.steer(Direction::Left);
        assert_eq!(game.advance(), StepOutcome::Moved);
        game.steer(Direction::Down);
        assert_eq!(game.advance(), StepOutcome::Crashed);

        assert!(game.is_dead());
        assert_eq!(game.len(), 5);
        assert_eq!(game.head(), (8, 4));
    }

    #[test]
    fn speed_has_a_floor() {
        let mut game = game((10, 10), 1);
        game.step_millis = MIN_STEP_MILLIS + 1;
        game.food = Some((6, 5));

        assert_eq!(game.advance(), StepOutcome::Ate);
        assert_eq!(game.step_millis(), MIN_STEP_MILLIS);
    }

    #[test]
    fn snake_filling_the_field_gets_no_food() {
        let game = SnakeGame::new(SnakeConfig::new((1, 1), 1).unwrap(), 0).unwrap();

        assert_eq!(game.food(), None);
    }

    #[test]
    fn same_seed_same_food() {
        let a = SnakeGame::new(SnakeConfig::default(), 99).unwrap();
        let b = SnakeGame::new(SnakeConfig::default(), 99).unwrap();

        assert_eq!(a.food(), b.food());
    }

    #[test]
    fn config_rejects_snakes_that_do_not_fit() {
        assert_eq!(
            SnakeConfig::new((4, 4), 3),
            Err(GridError::InvalidConfiguration(ConfigError::SnakeDoesNotFit {
                length: 3,
                width: 4
            }))
        );
        assert!(matches!(
            SnakeConfig::new((4, 4), 0),
            Err(GridError::InvalidConfiguration(
                ConfigError::SnakeDoesNotFit { .. }
            ))
        ));
        assert_eq!(
            SnakeConfig::new((0, 4), 1),
            Err(GridError::InvalidConfiguration(ConfigError::EmptyGrid {
                width: 0,
                height: 4
            }))
        );
        assert!(SnakeConfig::new((4, 4), 2).is_ok());
    }
}
