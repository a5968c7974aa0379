//! Engine lookup by command line name.

use chess_core::Engine;
use mcts_engine::{MctsConfig, MctsEngine};
use random_engine::RandomEngine;

use crate::error::{TournamentError, TournamentResult};

/// Build an engine from a spec such as `mcts`, `mcts:7`, `random` or `random:7`.
///
/// The optional suffix is an RNG seed. MCTS engines start from `mcts_config`.
pub fn create_engine(spec: &str, mcts_config: &MctsConfig) -> TournamentResult<Box<dyn Engine>> {
    let (name, seed) = match spec.split_once(':') {
        Some((name, seed)) => {
            let seed = seed
                .parse::<u64>()
                .map_err(|_| TournamentError::UnknownEngine(spec.to_string()))?;
            (name, Some(seed))
        }
        None => (spec, None),
    };

    match name.to_lowercase().as_str() {
        "mcts" | "uct" => {
            let mut config = mcts_config.clone();
            if seed.is_some() {
                config.seed = seed;
            }
            Ok(Box::new(MctsEngine::new(config)))
        }
        "random" | "rand" => Ok(Box::new(
            seed.map_or_else(RandomEngine::new, RandomEngine::with_seed),
        )),
        _ => Err(TournamentError::UnknownEngine(spec.to_string())),
    }
}
