use serde::{Deserialize, Serialize};

use crate::*;

/// Which cells are kept free of mines when the board is seeded on the first reveal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstMovePolicy {
    /// Only the revealed cell is guaranteed safe.
    #[default]
    SafeCell,
    /// The revealed cell and its whole neighborhood are safe, so the first move always
    /// opens an area.
    SafeNeighborhood,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    size: Coord2,
    mines: CellCount,
    first_move: FirstMovePolicy,
}

impl BoardConfig {
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        Self {
            size,
            mines,
            first_move: FirstMovePolicy::default(),
        }
        .validate()
    }

    pub const fn classic() -> Self {
        Self::preset((10, 10), 15)
    }

    pub const fn compact() -> Self {
        Self::preset((8, 8), 10)
    }

    pub const fn beginner() -> Self {
        Self::preset((9, 9), 10)
    }

    const fn preset(size: Coord2, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            first_move: FirstMovePolicy::SafeCell,
        }
    }

    pub const fn with_first_move(mut self, first_move: FirstMovePolicy) -> Self {
        self.first_move = first_move;
        self
    }

    /// Checks the invariants a deserialized or hand-built config may have skipped.
    pub fn validate(self) -> Result<Self> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }
        Ok(self)
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn first_move(&self) -> FirstMovePolicy {
        self.first_move
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub const fn contains(&self, (row, col): Coord2) -> bool {
        row < self.size.0 && col < self.size.1
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::classic()
    }
}
