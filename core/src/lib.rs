#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use state::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod flag;
mod generator;
mod reveal;
mod snapshot;
mod state;
mod types;

/// Board dimensions and mine count, validated on construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Both dimensions must be non-zero and at least one cell must stay free of mines.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(size, mines).validate()
    }

    pub fn validate(self) -> Result<Self> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidConfig);
        }
        Ok(self)
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// The classic board presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new_unchecked((9, 9), 10),
            Self::Intermediate => GameConfig::new_unchecked((16, 16), 40),
            Self::Expert => GameConfig::new_unchecked((16, 30), 99),
        }
    }
}

/// The fixed set of mine positions of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let rows = Coord::try_from(rows).map_err(|_| GameError::InvalidConfig)?;
        let cols = Coord::try_from(cols).map_err(|_| GameError::InvalidConfig)?;
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let mine_count = CellCount::try_from(mine_count).map_err(|_| GameError::InvalidConfig)?;
        GameConfig::new((rows, cols), mine_count)?;

        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    /// Builds a layout from explicit positions, duplicates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        // checked against `Coord` in `from_mine_mask`
        (rows as Coord, cols as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbours
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Result of a reveal command: how many cells it opened and the phase afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RevealOutcome {
    pub revealed: CellCount,
    pub phase: GamePhase,
}

impl RevealOutcome {
    pub const fn no_change(phase: GamePhase) -> Self {
        Self { revealed: 0, phase }
    }

    pub const fn has_update(self) -> bool {
        self.revealed > 0
    }
}

/// Used to merge outcomes when a chord opens several cells
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use GamePhase::*;
        let phase = match (self.phase, rhs.phase) {
            (Lost, _) | (_, Lost) => Lost,
            (Won, _) | (_, Won) => Won,
            (Playing, Playing) => Playing,
        };
        Self {
            revealed: self.revealed + rhs.revealed,
            phase,
        }
    }
}

/// Starts a game with `mine_count` mines placed by rejection sampling from `rng`.
pub fn new_game<R: Rng + ?Sized>(
    rows: Coord,
    cols: Coord,
    mine_count: CellCount,
    rng: &mut R,
) -> Result<Board> {
    let config = GameConfig::new((rows, cols), mine_count)?;
    let layout = RandomMineGenerator::new(rng).generate(config)?;
    Ok(Board::new(layout))
}

pub fn reveal(board: &mut Board, coords: Coord2) -> Result<GamePhase> {
    board.reveal(coords).map(|outcome| outcome.phase)
}

pub fn toggle_flag(board: &mut Board, coords: Coord2) -> Result<MarkOutcome> {
    board.toggle_flag(coords)
}

pub fn hidden_count(board: &Board) -> CellCount {
    board.hidden_count()
}

pub fn phase(board: &Board) -> GamePhase {
    board.derive_phase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn config_rejects_empty_dimensions() {
        assert_eq!(GameConfig::new((0, 5), 1), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new((5, 0), 1), Err(GameError::InvalidConfig));
    }

    #[test]
    fn config_needs_a_free_cell() {
        assert_eq!(GameConfig::new((3, 3), 9), Err(GameError::InvalidConfig));
        assert!(GameConfig::new((3, 3), 8).is_ok());
        assert!(GameConfig::new((1, 1), 0).is_ok());
    }

    #[test]
    fn presets_are_valid() {
        for difficulty in [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Expert] {
            let config = GameConfig::from(difficulty);
            assert_eq!(config.validate(), Ok(config));
        }
        assert_eq!(Difficulty::Expert.config().safe_cells(), 16 * 30 - 99);
    }

    #[test]
    fn layout_rejects_out_of_bounds_mine() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn layout_counts_duplicates_once() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(layout.mine_count(), 1);
        assert_eq!(layout.adjacent_mine_count((0, 0)), 1);
    }

    #[test]
    fn layout_count_matches_mask() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();
        assert_eq!(layout.iter_mines().count(), usize::from(layout.mine_count()));

        let mut board = Board::new(layout);
        for coords in [(0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1)] {
            board.reveal(coords).unwrap();
        }
        assert_eq!(board.phase(), GamePhase::Won);
    }

    #[test]
    fn mark_outcome_reports_updates() {
        assert!(MarkOutcome::Changed.has_update());
        assert!(!MarkOutcome::NoChange.has_update());
    }

    #[test]
    fn merged_outcome_keeps_worst_phase() {
        let safe = RevealOutcome {
            revealed: 3,
            phase: GamePhase::Playing,
        };
        let boom = RevealOutcome {
            revealed: 1,
            phase: GamePhase::Lost,
        };
        assert_eq!(
            safe | boom,
            RevealOutcome {
                revealed: 4,
                phase: GamePhase::Lost
            }
        );
        assert!(!RevealOutcome::no_change(GamePhase::Playing).has_update());
    }

    #[test]
    fn new_game_rejects_full_board() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            new_game(2, 2, 4, &mut rng).err(),
            Some(GameError::InvalidConfig)
        );
    }

    #[test]
    fn free_functions_drive_a_game() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = new_game(5, 5, 3, &mut rng).unwrap();
        assert_eq!(hidden_count(&board), 25);
        assert_eq!(phase(&board), GamePhase::Playing);

        let safe = board
            .iter_cells()
            .find(|(_, cell)| !cell.is_mine())
            .map(|(coords, _)| coords)
            .unwrap();
        assert_eq!(toggle_flag(&mut board, safe), Ok(MarkOutcome::Changed));
        assert_eq!(reveal(&mut board, safe), Ok(GamePhase::Playing));
        assert_eq!(hidden_count(&board), 25);
    }
}
