use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board dimensions")]
    InvalidDimensions,
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
    #[error("Mines have not been placed yet")]
    MinesNotPlaced,
    #[error("Player name must not be empty")]
    InvalidName,
    #[error("Unknown session handle")]
    UnknownSession,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unknown difficulty, expected easy, medium or hard")]
pub struct ParseDifficultyError;

pub type Result<T> = core::result::Result<T, GameError>;
