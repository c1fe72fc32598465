use core::fmt;
use core::num::Saturating;
use ndarray::Array2;

use crate::*;

/// One game's grid and the counters derived from it.
///
/// Created once per game by [`Board::new`] (or [`new_game`]) and replaced wholesale
/// on reset. Commands mutate it in place through `&mut self`, and a command that fails
/// leaves every cell untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub(crate) config: GameConfig,
    pub(crate) cells: Array2<Cell>,
    pub(crate) revealed_count: Saturating<CellCount>,
    pub(crate) flagged_count: Saturating<CellCount>,
    pub(crate) phase: GamePhase,
    pub(crate) triggered_mine: Option<Coord2>,
}

impl Board {
    /// Computes every cell's adjacency count from `mine_layout`, mines included even
    /// though a mine's own count is never read.
    pub fn new(mine_layout: MineLayout) -> Self {
        let config = mine_layout.game_config();
        let cells = Array2::from_shape_fn(config.size.to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell::hidden(
                mine_layout.contains_mine(coords),
                mine_layout.adjacent_mine_count(coords),
            )
        });

        log::debug!(
            "New {}x{} board with {} mines",
            config.rows(),
            config.cols(),
            config.mines
        );

        Self {
            config,
            cells,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            phase: GamePhase::Playing,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// Mines minus flags placed, negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flagged_count.0)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// Cells not yet revealed, flagged ones included.
    pub fn hidden_count(&self) -> CellCount {
        self.config.total_cells() - self.revealed_count.0
    }

    /// The phase as tracked by the state machine, always equal to [`Board::derive_phase`].
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Reconstructs the mine positions, e.g. to replay the same game.
    pub fn mine_layout(&self) -> MineLayout {
        let mine_mask = self.cells.map(|cell| cell.is_mine());
        MineLayout {
            mine_mask,
            mine_count: self.config.mines,
        }
    }

    pub(crate) fn cell(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn adjacency_is_computed_on_creation() {
        let board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.cell_at((0, 1)).unwrap().adjacent_mines(), 1);
        assert_eq!(board.cell_at((1, 0)).unwrap().adjacent_mines(), 1);
        assert_eq!(board.cell_at((1, 1)).unwrap().adjacent_mines(), 1);
        assert_eq!(board.cell_at((2, 2)).unwrap().adjacent_mines(), 0);
        assert!(board.cell_at((0, 0)).unwrap().is_mine());
    }

    #[test]
    fn fresh_board_is_fully_hidden() {
        let board = board((4, 5), &[(3, 4), (0, 2)]);

        assert_eq!(board.hidden_count(), 20);
        assert_eq!(board.phase(), GamePhase::Playing);
        assert_eq!(board.mines_left(), 2);
        assert!(board.iter_cells().all(|(_, cell)| cell.is_revealable()));
    }

    #[test]
    fn cell_at_checks_bounds() {
        let board = board((2, 3), &[]);

        assert!(board.cell_at((1, 2)).is_ok());
        assert_eq!(board.cell_at((2, 0)), Err(GameError::OutOfBounds));
        assert_eq!(board.cell_at((0, 3)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn mine_layout_round_trips() {
        let layout = MineLayout::from_mine_coords((4, 4), &[(0, 3), (2, 1)]).unwrap();
        let board = Board::new(layout.clone());

        assert_eq!(board.mine_layout(), layout);
    }

    #[test]
    fn display_draws_hidden_grid() {
        let board = board((2, 3), &[(0, 0)]);

        assert_eq!(board.to_string(), "...\n...\n");
    }
}
