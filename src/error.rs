use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Why a submitted move was refused. Every variant maps to a fail-closed
/// rejection: the session is left untouched and the move is not logged.
/// The `Display` strings double as the client-facing `MoveResult` message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("Game already completed")]
    SessionFinished,
    #[error("Invalid move coordinates")]
    OutOfBounds,
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Cell already revealed")]
    AlreadyRevealed,
    #[error("Cannot reveal flagged cell. Remove flag first.")]
    RevealFlagged,
    #[error("Cannot flag a revealed cell")]
    FlagRevealed,
    #[error("Cannot chord an unrevealed cell")]
    ChordUnrevealed,
    #[error("Can only chord on cells with adjacent mines")]
    ChordWithoutNumber,
    #[error("Cannot chord: need {needed} flags, but {placed} are placed")]
    ChordFlagMismatch { needed: u8, placed: u8 },
}
