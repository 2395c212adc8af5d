use serde::{Deserialize, Serialize};

/// Authoritative state of one board cell.
///
/// `adjacent_mines` only means something once mines have been placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(super) is_mine: bool,
    pub(super) is_revealed: bool,
    pub(super) is_flagged: bool,
    pub(super) adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Hidden, unflagged and safe: the only cells a flood fill may open.
    pub(super) const fn is_floodable(self) -> bool {
        !self.is_revealed && !self.is_flagged && !self.is_mine
    }
}

/// What the host should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    TriggeredMine,
}

impl CellView {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
