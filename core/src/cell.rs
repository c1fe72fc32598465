use serde::{Deserialize, Serialize};

/// A single board cell.
///
/// The adjacency count is fixed when the board is generated. Mine cells still carry
/// a count, but nothing reads it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    is_revealed: bool,
    is_flagged: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub(crate) const fn hidden(is_mine: bool, adjacent_mines: u8) -> Self {
        Self {
            is_mine,
            is_revealed: false,
            is_flagged: false,
            adjacent_mines,
        }
    }

    #[cfg(test)]
    pub(crate) const fn from_parts(
        is_mine: bool,
        is_revealed: bool,
        is_flagged: bool,
        adjacent_mines: u8,
    ) -> Self {
        Self {
            is_mine,
            is_revealed,
            is_flagged,
            adjacent_mines,
        }
    }

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

    /// Hidden and not flagged, the only state a reveal acts on.
    pub const fn is_revealable(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// A revealed safe cell with no mines around it, which keeps a flood-fill going.
    pub const fn is_empty_safe(self) -> bool {
        !self.is_mine && self.adjacent_mines == 0
    }

    pub(crate) fn mark_revealed(&mut self) {
        debug_assert!(!self.is_flagged, "flagged cells are never revealed");
        self.is_revealed = true;
    }

    pub(crate) fn toggle_flag(&mut self) {
        debug_assert!(!self.is_revealed, "revealed cells are never flagged");
        self.is_flagged = !self.is_flagged;
    }

    /// Glyph used by the board's text rendering.
    pub const fn glyph(self) -> char {
        match (self.is_revealed, self.is_flagged, self.is_mine) {
            (false, true, _) => 'F',
            (false, false, _) => '.',
            (true, _, true) => '*',
            (true, _, false) => match self.adjacent_mines {
                0 => ' ',
                n => (b'0' + n) as char,
            },
        }
    }
}
