use crate::*;
pub use random::*;

mod random;

/// Produces the mine positions for a new board.
pub trait MineLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// A predetermined set of mine positions, mostly useful for tests and replays.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedMineLayout<'a> {
    mines: &'a [Coord2],
}

impl<'a> FixedMineLayout<'a> {
    pub fn new(mines: &'a [Coord2]) -> Self {
        Self { mines }
    }
}

impl MineLayoutGenerator for FixedMineLayout<'_> {
    /// Fails with `InvalidConfig` when a position is off the board or the positions do not
    /// match `config.mines`.
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        let config = config.validate()?;
        let layout = MineLayout::from_mine_coords(config.size, self.mines)
            .map_err(|_| GameError::InvalidConfig)?;
        if layout.mine_count() != config.mines {
            return Err(GameError::InvalidConfig);
        }
        Ok(layout)
    }
}
