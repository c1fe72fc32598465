use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use sapper_core::*;

use crate::command::{Command, HELP};

/// What the input loop should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Print(String),
    Quit,
}

/// The board currently being played plus what is needed to deal the next one.
pub struct Session {
    config: GameConfig,
    placement: Placement,
    rng: SmallRng,
    board: Board,
}

impl Session {
    pub fn new(config: GameConfig, mut rng: SmallRng) -> Result<Self> {
        let placement = Placement::suggested(config);
        let board = deal(config, placement, &mut rng)?;
        Ok(Self {
            config,
            placement,
            rng,
            board,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn restart(&mut self) -> Result<()> {
        self.board = deal(self.config, self.placement, &mut self.rng)?;
        log::info!("New game started");
        Ok(())
    }

    pub fn apply(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Reveal(coords) => {
                let outcome = self
                    .board
                    .reveal(coords)
                    .with_context(|| format!("cannot reveal {coords:?}"))?;
                log::debug!("reveal {:?}: {:?}", coords, outcome);
            }
            Command::Flag(coords) => {
                let outcome = self
                    .board
                    .toggle_flag(coords)
                    .with_context(|| format!("cannot flag {coords:?}"))?;
                if outcome.has_update() {
                    log::debug!("flag toggled at {:?}", coords);
                } else {
                    return Ok(Flow::Print(format!("{coords:?} is already revealed")));
                }
            }
            Command::Chord(coords) => {
                let outcome = self
                    .board
                    .chord_reveal(coords)
                    .with_context(|| format!("cannot chord {coords:?}"))?;
                log::debug!("chord {:?}: {:?}", coords, outcome);
            }
            Command::New => self.restart()?,
            Command::Save => {
                let json = self.board.snapshot().to_json()?;
                return Ok(Flow::Print(json));
            }
            Command::Help => return Ok(Flow::Print(HELP.to_owned())),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    pub fn status_line(&self) -> String {
        match self.board.phase() {
            GamePhase::Playing => format!(
                "{} mines left, {} cells hidden",
                self.board.mines_left(),
                self.board.hidden_count()
            ),
            GamePhase::Won => "All mines cleared, you win! Type \"new\" to play again.".to_owned(),
            GamePhase::Lost => {
                let (row, col) = self.board.triggered_mine().unwrap_or_default();
                format!("Boom! Mine at row {row}, column {col}. Type \"new\" to play again.")
            }
        }
    }
}

fn deal(config: GameConfig, placement: Placement, rng: &mut SmallRng) -> Result<Board> {
    let layout = RandomMineGenerator::new(rng)
        .with_placement(placement)
        .generate(config)
        .context("cannot generate board")?;
    Ok(Board::new(layout))
}
