use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::*;

impl Board {
    /// Reveals the cell at `coords`, flooding outwards from cells with no adjacent mines.
    ///
    /// Revealing a flagged or already revealed cell changes nothing. Revealing a mine
    /// opens only that cell and loses the game.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        log::trace!("reveal {:?}", coords);
        Ok(self.reveal_single_cell(coords))
    }

    /// Reveals every hidden neighbour of a numbered cell once enough flags surround it.
    ///
    /// Anywhere else this is a no-op. Neighbours are opened one by one with the same
    /// rules as [`Board::reveal`], so a wrongly placed flag can still lose the game.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        if !self.can_chord_reveal_at(coords) {
            return Ok(RevealOutcome::no_change(self.phase));
        }

        log::trace!("chord reveal {:?}", coords);
        let neighbors: Vec<_> = self.iter_neighbors(coords).collect();
        let mut outcome = RevealOutcome::no_change(self.phase);
        for neighbor_coords in neighbors {
            if self.phase.is_finished() {
                break;
            }
            outcome = outcome | self.reveal_single_cell(neighbor_coords);
        }
        Ok(outcome)
    }

    pub fn can_chord_reveal_at(&self, coords: Coord2) -> bool {
        if self.phase.is_finished() {
            return false;
        }

        let Ok(cell) = self.cell_at(coords) else {
            return false;
        };
        cell.is_revealed()
            && !cell.is_mine()
            && cell.adjacent_mines() > 0
            && cell.adjacent_mines() == self.count_flagged_neighbors(coords)
            && self
                .iter_neighbors(coords)
                .any(|pos| self.cell(pos).is_revealable())
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.cell(coords);
        if !cell.is_revealable() {
            return RevealOutcome::no_change(self.phase);
        }

        if cell.is_mine() {
            self.cell_mut(coords).mark_revealed();
            self.revealed_count += 1;
            self.lose(coords);
            return RevealOutcome {
                revealed: 1,
                phase: self.phase,
            };
        }

        let revealed = self.flood_fill(coords);
        RevealOutcome {
            revealed,
            phase: self.settle_after_reveal(),
        }
    }

    /// Opens the connected region of empty cells around `start` plus its numbered border.
    ///
    /// `start` must be a hidden, unflagged, safe cell. Returns the number of cells opened.
    fn flood_fill(&mut self, start: Coord2) -> CellCount {
        let mut revealed: CellCount = 0;
        let mut visited: HashSet<Coord2> = HashSet::from([start]);
        let mut to_visit = Vec::from([start]);

        while let Some(visit_coords) = to_visit.pop() {
            let cell = self.cell(visit_coords);
            if !cell.is_revealable() {
                continue;
            }

            self.cell_mut(visit_coords).mark_revealed();
            self.revealed_count += 1;
            revealed += 1;

            if cell.is_empty_safe() {
                for pos in self.iter_neighbors(visit_coords) {
                    if self.cell(pos).is_revealable() && visited.insert(pos) {
                        to_visit.push(pos);
                    }
                }
            }
        }

        log::trace!("flood fill from {:?} opened {} cells", start, revealed);
        revealed
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        // at most 8 neighbours
        self.iter_neighbors(coords)
            .filter(|&pos| self.cell(pos).is_flagged())
            .count() as u8
    }
}
