use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

pub use config::*;
pub use engine::*;
pub use session::*;

mod config;
mod engine;
mod session;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Neighbor one step towards `direction`, if it is still on a `tile_count` grid.
    pub fn step(self, direction: Direction, tile_count: Coord) -> Option<Self> {
        offset((self.x, self.y), direction.delta(), (tile_count, tile_count))
            .map(|(x, y)| Self { x, y })
    }

    pub(crate) fn to_nd_index(self) -> [usize; 2] {
        (self.x, self.y).to_nd_index()
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Unit vector as `(dx, dy)`, with `y` growing downwards.
    pub const fn delta(self) -> (i8, i8) {
        use Direction::*;
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unrecognized direction")]
pub struct ParseDirectionError;

/// Accepts direction names in any case and the DOM `ArrowUp`-style key names.
impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let name = s.strip_prefix("Arrow").unwrap_or(s);
        [
            ("up", Self::Up),
            ("down", Self::Down),
            ("left", Self::Left),
            ("right", Self::Right),
        ]
        .into_iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(name))
        .map(|(_, direction)| direction)
        .ok_or(ParseDirectionError)
    }
}

/// Valid transitions:
/// - Idle -> Running on start
/// - Running -> GameOver on a crash or a full board
/// - Running -> Idle when stopped
/// - GameOver -> Running on start
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeStatus {
    #[default]
    Idle,
    Running,
    GameOver,
}

impl SnakeStatus {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Idle | Self::Running => None,
            Self::GameOver => Some("Game Over! Press Start to play again."),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, nothing happened.
    Ignored,
    Moved,
    Ate,
    Crashed(Collision),
    /// The snake ate the last free cell, no room is left for food.
    BoardFull,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Crashed(_) | Self::BoardFull)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeInput {
    Start,
    Turn(Direction),
    Tick,
}

/// Display and persistence hooks. Every method defaults to doing nothing.
pub trait SnakeListener {
    fn on_frame(&mut self, _body: &[Position], _food: Position) {}

    fn on_score(&mut self, _score: u32) {}

    /// Called whenever the score beats the best so far, so it can be persisted.
    fn on_high_score(&mut self, _high_score: u32) {}

    fn on_status(&mut self, _status: SnakeStatus) {}
}

impl SnakeListener for () {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_arrow_keys() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("LEFT".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("ArrowDown".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("ArrowRight".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!("Space".parse::<Direction>(), Err(ParseDirectionError));
        assert_eq!("".parse::<Direction>(), Err(ParseDirectionError));
    }

    #[test]
    fn opposite_is_an_involution() {
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn step_stays_on_grid() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::Up, 12), None);
        assert_eq!(corner.step(Direction::Left, 12), None);
        assert_eq!(corner.step(Direction::Down, 12), Some(Position::new(0, 1)));
        assert_eq!(Position::new(11, 3).step(Direction::Right, 12), None);
    }
}
