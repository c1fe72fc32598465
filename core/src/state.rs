use serde::{Deserialize, Serialize};

use crate::*;

/// Coarse game phase. `Won` and `Lost` are terminal: only a new board leaves them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Board {
    /// Derives the phase from cell contents alone.
    ///
    /// A revealed mine means the game is lost, otherwise it is won once every safe cell
    /// is revealed.
    pub fn derive_phase(&self) -> GamePhase {
        let mut revealed_safe: CellCount = 0;
        for cell in self.cells.iter().filter(|cell| cell.is_revealed()) {
            if cell.is_mine() {
                return GamePhase::Lost;
            }
            revealed_safe += 1;
        }

        if revealed_safe == self.config.safe_cells() {
            GamePhase::Won
        } else {
            GamePhase::Playing
        }
    }

    pub(crate) fn check_not_finished(&self) -> Result<()> {
        if self.phase.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    /// Records a detonation at `coords`.
    pub(crate) fn lose(&mut self, coords: Coord2) {
        if self.phase.is_finished() {
            return;
        }
        log::debug!("Mine hit at {:?}, game lost", coords);
        self.triggered_mine = Some(coords);
        self.phase = GamePhase::Lost;
    }

    /// Re-evaluates the win condition after a reveal that changed the board.
    pub(crate) fn settle_after_reveal(&mut self) -> GamePhase {
        if self.phase.is_playing() && self.revealed_count.0 == self.config.safe_cells() {
            log::debug!("All {} safe cells revealed, game won", self.revealed_count.0);
            self.phase = GamePhase::Won;
        }
        debug_assert_eq!(self.phase, self.derive_phase());
        self.phase
    }
}
