use serde::{Deserialize, Serialize};

use crate::*;

pub use cell::*;
pub use config::*;
pub use engine::*;

mod cell;
mod config;
mod engine;
mod layout;

/// Valid transitions:
/// - Idle -> Running -> Won | Lost
/// - Idle -> Won | Lost (decided by the very first reveal)
/// - any -> Idle on reset
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardStatus {
    #[default]
    Idle,
    Running,
    Won,
    Lost,
}

impl BoardStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Text for the status area, if any.
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Idle | Self::Running => None,
            Self::Won => Some("You Win!"),
            Self::Lost => Some("Game Over!"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Input events a host forwards after hit-testing pointer or touch input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardInput {
    Reveal(Coord2),
    ToggleFlag(Coord2),
}

/// Display hooks. Every method defaults to doing nothing, so hosts that redraw the whole
/// board after each input can use `()`.
pub trait BoardListener {
    fn on_cell_changed(&mut self, _coords: Coord2, _view: CellView) {}

    fn on_board_redraw(&mut self) {}

    fn on_status(&mut self, _status: BoardStatus) {}
}

impl BoardListener for () {}
