//! Random Move Chess Engine
//!
//! Selects moves uniformly at random from all legal moves. Useful as:
//! - A baseline opponent (any real engine should easily beat this)
//! - A stress test for move generation in long matches

use chess_core::{Board, Engine, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// A chess engine that plays random legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible move sequence for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, board: &Board, _limits: SearchLimits) -> SearchResult {
        let moves = board.legal_move_list();
        let best_move = moves.choose(&mut self.rng).copied();

        SearchResult {
            best_move,
            score: 0.0,
            iterations: 1,
            nodes: moves.len() as u64,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}
