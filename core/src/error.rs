use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid game configuration")]
    InvalidConfig,
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Snapshot contents are inconsistent")]
    InvalidSnapshot,
}

pub type Result<T> = core::result::Result<T, GameError>;
