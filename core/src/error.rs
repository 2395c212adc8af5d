use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be non-zero")]
    InvalidDimensions,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, {mines} requested but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Initial snake body must be non-empty, unique and inside the grid")]
    InvalidInitialBody,
    #[error("Tick period must be at least 1ms")]
    InvalidTickPeriod,
    #[error("Storage rejected the write")]
    StorageUnavailable,
}

pub type Result<T> = core::result::Result<T, GameError>;
