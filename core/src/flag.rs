use crate::*;

impl Board {
    /// Flags a hidden cell or clears its flag. Revealed cells cannot be flagged.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = self.cell(coords);
        if cell.is_revealed() {
            return Ok(NoChange);
        }

        self.cell_mut(coords).toggle_flag();
        if cell.is_flagged() {
            self.flagged_count -= 1;
        } else {
            self.flagged_count += 1;
        }
        log::trace!("flag {:?} set to {}", coords, !cell.is_flagged());
        Ok(Changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn toggle_twice_restores_board() {
        let mut board = board((3, 3), &[(0, 0)]);
        let before = board.clone();

        assert_eq!(board.toggle_flag((2, 1)), Ok(MarkOutcome::Changed));
        assert!(board.cell_at((2, 1)).unwrap().is_flagged());
        assert_eq!(board.flagged_count(), 1);
        assert_eq!(board.mines_left(), 0);

        assert_eq!(board.toggle_flag((2, 1)), Ok(MarkOutcome::Changed));
        assert_eq!(board, before);
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut board = board((3, 3), &[(0, 0)]);
        board.reveal((1, 1)).unwrap();
        let before = board.clone();

        assert_eq!(board.toggle_flag((1, 1)), Ok(MarkOutcome::NoChange));
        assert_eq!(board, before);
    }

    #[test]
    fn flag_does_not_change_phase() {
        let mut board = board((2, 1), &[(0, 0)]);

        board.toggle_flag((0, 0)).unwrap();
        board.toggle_flag((1, 0)).unwrap();

        assert_eq!(board.phase(), GamePhase::Playing);
        assert_eq!(board.mines_left(), -1);
    }

    #[test]
    fn flag_after_loss_is_rejected() {
        let mut board = board((3, 3), &[(0, 0)]);
        board.reveal((0, 0)).unwrap();
        let before = board.clone();

        assert_eq!(board.toggle_flag((2, 2)), Err(GameError::AlreadyEnded));
        assert_eq!(board, before);
    }

    #[test]
    fn flag_rejects_out_of_bounds() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.toggle_flag((0, 9)), Err(GameError::OutOfBounds));
    }
}
