use alloc::string::String;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Plain copy of a board: its configuration and every cell's fields verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: Coord,
    pub cols: Coord,
    pub mine_count: CellCount,
    pub cells: Array2<Cell>,
}

impl BoardSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| {
            log::warn!("Could not serialize snapshot: {}", err);
            GameError::InvalidSnapshot
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            log::debug!("Could not parse snapshot: {}", err);
            GameError::InvalidSnapshot
        })
    }
}

impl Board {
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: self.config.rows(),
            cols: self.config.cols(),
            mine_count: self.config.mines,
            cells: self.cells.clone(),
        }
    }

    /// Rebuilds a board from a snapshot, re-deriving counters and the phase.
    ///
    /// The snapshot must describe a board this engine could have produced: matching
    /// shape and mine count, untouched adjacency counts, no cell both revealed and
    /// flagged, and at most one revealed mine.
    pub fn restore(snapshot: BoardSnapshot) -> Result<Self> {
        let config = GameConfig::new((snapshot.rows, snapshot.cols), snapshot.mine_count)?;
        if snapshot.cells.dim() != (usize::from(snapshot.rows), usize::from(snapshot.cols)) {
            return Err(GameError::InvalidBoardShape);
        }

        let layout = MineLayout::from_mine_mask(snapshot.cells.map(|cell| cell.is_mine()))?;
        if layout.mine_count() != config.mines {
            return Err(GameError::InvalidSnapshot);
        }

        let mut revealed_count: Saturating<CellCount> = Saturating(0);
        let mut flagged_count: Saturating<CellCount> = Saturating(0);
        let mut triggered_mine = None;
        for ((row, col), cell) in snapshot.cells.indexed_iter() {
            let coords = (row as Coord, col as Coord);
            if cell.adjacent_mines() != layout.adjacent_mine_count(coords) {
                return Err(GameError::InvalidSnapshot);
            }
            if cell.is_revealed() && cell.is_flagged() {
                return Err(GameError::InvalidSnapshot);
            }
            if cell.is_flagged() {
                flagged_count += 1;
            }
            if cell.is_revealed() {
                revealed_count += 1;
                if cell.is_mine() && triggered_mine.replace(coords).is_some() {
                    return Err(GameError::InvalidSnapshot);
                }
            }
        }

        let mut board = Self {
            config,
            cells: snapshot.cells,
            revealed_count,
            flagged_count,
            phase: GamePhase::Playing,
            triggered_mine,
        };
        board.phase = board.derive_phase();
        log::debug!("Restored board in phase {:?}", board.phase);
        Ok(board)
    }
}
