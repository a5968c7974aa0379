//! Error types for rule violations at the board boundary.
//!
//! Every variant is recoverable: the board is left untouched and the caller
//! can wait for new input. Corrupted board state (a missing king) is not an
//! error value; it panics.

use thiserror::Error;

use crate::types::{PieceKind, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Malformed or out-of-range square label
    #[error("invalid square `{0}` (expected a file a-h followed by a rank 1-8)")]
    InvalidSquare(String),

    /// Move not present in the legal-move cache for the side to move
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    /// Promotion piece that a pawn cannot become
    #[error("a pawn cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    /// Promotion piece given for a move that does not promote
    #[error("move {from}{to} is not a promotion")]
    UnexpectedPromotion { from: Square, to: Square },

    /// The game already reached a terminal state
    #[error("the game is over")]
    GameOver,

    /// Unparseable or inconsistent FEN
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Unparseable coordinate move text such as `e2e4`
    #[error("invalid move text `{0}`")]
    InvalidMoveText(String),
}

/// Result type alias for rule operations
pub type ChessResult<T> = Result<T, ChessError>;
