pub mod bitboard;
pub mod board;
pub mod error;
pub mod game;
pub mod move_text;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod pieces;
pub mod position;
pub mod rules;
pub mod time_control;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use bitboard::Bitboard;
pub use board::*;
pub use error::*;
pub use game::*;
pub use move_text::*;
pub use notation::*;
pub use perft::{divide, perft};
pub use pieces::{attack_squares, pseudo_legal_moves};
pub use position::*;
pub use rules::*;
pub use time_control::*;
pub use types::*;

// =============================================================================
// Engine trait: implemented by every move-choosing agent
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen move (None if the position has no legal moves)
    pub best_move: Option<Move>,
    /// Expected result for the side to move, in [-1, 1]
    pub score: f64,
    /// Iterations completed
    pub iterations: u32,
    /// Positions visited, rollout plies included
    pub nodes: u64,
    /// Whether the wall-clock cap cut the search short
    pub stopped: bool,
}

impl SearchResult {
    /// Result for a position without legal moves.
    pub fn none() -> Self {
        Self {
            best_move: None,
            score: 0.0,
            iterations: 0,
            nodes: 0,
            stopped: false,
        }
    }
}

/// Trait that all chess engines must implement, so the match runner can
/// pit any two of them against each other.
pub trait Engine: Send {
    /// Choose a move for the side to move on `board`.
    fn search(&mut self, board: &Board, limits: SearchLimits) -> SearchResult;

    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "chess-mcts"
    }

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
