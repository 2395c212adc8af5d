use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeConfig {
    tile_count: Coord,
    initial_body: Vec<Position>,
    initial_direction: Direction,
    tick_period_ms: u32,
}

impl SnakeConfig {
    pub const DEFAULT_TILE_COUNT: Coord = 12;
    pub const DEFAULT_TICK_PERIOD_MS: u32 = 120;

    pub fn new(tile_count: Coord) -> Result<Self> {
        Self::default().with_tile_count(tile_count)
    }

    pub fn with_tile_count(mut self, tile_count: Coord) -> Result<Self> {
        self.tile_count = tile_count;
        self.validate()
    }

    /// Replaces the starting body (head first) and heading.
    pub fn with_body(mut self, body: Vec<Position>, direction: Direction) -> Result<Self> {
        self.initial_body = body;
        self.initial_direction = direction;
        self.validate()
    }

    pub fn with_tick_period(mut self, tick_period_ms: u32) -> Self {
        self.tick_period_ms = tick_period_ms.max(1);
        self
    }

    pub fn validate(self) -> Result<Self> {
        if self.tile_count == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if self.tick_period_ms == 0 {
            return Err(GameError::InvalidTickPeriod);
        }
        let cells = usize::from(mult(self.tile_count, self.tile_count));
        let body = &self.initial_body;
        // food needs at least one free cell
        if body.is_empty() || body.len() >= cells {
            return Err(GameError::InvalidInitialBody);
        }
        let on_grid = body
            .iter()
            .all(|pos| pos.x < self.tile_count && pos.y < self.tile_count);
        let unique = body
            .iter()
            .enumerate()
            .all(|(i, pos)| !body[..i].contains(pos));
        if !(on_grid && unique) {
            return Err(GameError::InvalidInitialBody);
        }
        Ok(self)
    }

    pub fn tile_count(&self) -> Coord {
        self.tile_count
    }

    pub fn initial_body(&self) -> &[Position] {
        &self.initial_body
    }

    pub fn initial_direction(&self) -> Direction {
        self.initial_direction
    }

    pub fn tick_period_ms(&self) -> u32 {
        self.tick_period_ms
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            tile_count: Self::DEFAULT_TILE_COUNT,
            initial_body: vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
            ],
            initial_direction: Direction::Right,
            tick_period_ms: Self::DEFAULT_TICK_PERIOD_MS,
        }
    }
}
