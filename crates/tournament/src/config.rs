//! Match and engine settings, loadable from a TOML file.
//!
//! ```toml
//! [match]
//! num_games = 20
//! iterations = 2000
//! opening_plies = 4
//!
//! [mcts]
//! exploration = 1.4
//! threads = 4
//! ```
//!
//! Missing keys keep their defaults. Command line flags override the file.

use std::path::Path;
use std::time::Duration;

use chess_core::SearchLimits;
use mcts_engine::MctsConfig;
use serde::{Deserialize, Serialize};

use crate::error::{read_file, TournamentResult};

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// MCTS iterations per move
    pub iterations: u32,
    /// Wall-clock cap per move in milliseconds (None = iterations only)
    pub time_per_move_ms: Option<u64>,
    /// Half-moves per game before declaring a draw
    pub max_moves: u32,
    /// Random plies played before the engines take over
    pub opening_plies: u32,
    /// Seed for the random openings (None = fresh openings every run)
    pub seed: Option<u64>,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Print progress during match
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            iterations: 1000,
            time_per_move_ms: None,
            max_moves: 300,
            opening_plies: 0,
            seed: None,
            alternate_colors: true,
            verbose: true,
        }
    }
}

impl MatchConfig {
    /// Fresh limits for one move; each call gets its own clock.
    pub fn search_limits(&self) -> SearchLimits {
        match self.time_per_move_ms {
            Some(ms) => SearchLimits::iterations_and_time(self.iterations, Duration::from_millis(ms)),
            None => SearchLimits::iterations(self.iterations),
        }
    }
}

/// Contents of a `tournament.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    #[serde(rename = "match")]
    pub match_config: MatchConfig,
    pub mcts: MctsConfig,
}

impl ConfigFile {
    pub fn from_toml_str(text: &str) -> TournamentResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> TournamentResult<Self> {
        Self::from_toml_str(&read_file(path)?)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> TournamentResult<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
