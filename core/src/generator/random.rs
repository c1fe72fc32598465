use alloc::vec::Vec;
use ndarray::Array2;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::*;

/// How mines are drawn from the random source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Draws random cells and skips the ones already mined. Slows down as the board fills up.
    #[default]
    Rejection,
    /// Partially shuffles all cell indices and mines the first ones. Cost does not depend
    /// on density.
    Shuffle,
}

impl Placement {
    /// Rejection sampling up to half density, shuffling above.
    pub const fn suggested(config: GameConfig) -> Self {
        if config.mines as u32 * 2 > config.total_cells() as u32 {
            Self::Shuffle
        } else {
            Self::Rejection
        }
    }
}

/// Places mines uniformly at random using a caller-supplied random source.
///
/// The same seeded source always yields the same layout.
#[derive(Debug)]
pub struct RandomMineGenerator<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    placement: Placement,
}

impl<'a, R: Rng + ?Sized> RandomMineGenerator<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self {
            rng,
            placement: Placement::default(),
        }
    }

    pub fn with_placement(self, placement: Placement) -> Self {
        Self { placement, ..self }
    }

    fn place_rejection(&mut self, config: GameConfig, mines: &mut Array2<bool>) {
        let (rows, cols) = config.size;
        let mut mines_placed = 0;
        while mines_placed < config.mines {
            let coords = (
                self.rng.random_range(0..rows),
                self.rng.random_range(0..cols),
            );
            let cell = &mut mines[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }
    }

    fn place_shuffle(&mut self, config: GameConfig, mines: &mut Array2<bool>) {
        let mut indices: Vec<usize> = (0..usize::from(config.total_cells())).collect();
        let (chosen, _) = indices.partial_shuffle(&mut *self.rng, usize::from(config.mines));
        for &index in chosen.iter() {
            let coords = from_linear_index(index, config.cols());
            mines[coords.to_nd_index()] = true;
        }
    }
}

impl<R: Rng + ?Sized> MineLayoutGenerator for RandomMineGenerator<'_, R> {
    fn generate(mut self, config: GameConfig) -> Result<MineLayout> {
        let config = config.validate()?;
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());

        match self.placement {
            Placement::Rejection => self.place_rejection(config, &mut mines),
            Placement::Shuffle => self.place_shuffle(config, &mut mines),
        }

        let layout = MineLayout::from_mine_mask(mines)?;

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated mine layout count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        Ok(layout)
    }
}
