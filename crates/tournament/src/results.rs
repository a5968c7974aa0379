//! Tournament results storage and reporting

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use crate::config::MatchConfig;
use crate::elo::MatchResult;
use crate::error::{parse_json, read_file, write_file, TournamentResult};

/// Complete tournament results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResults {
    /// Name/description of the tournament
    pub name: String,
    /// Participating engines
    pub participants: Vec<String>,
    /// All match results, in the order they were played
    pub matches: Vec<MatchEntry>,
    /// Configuration used
    pub config: TournamentConfig,
}

/// A single match entry in the tournament
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub engine1: String,
    pub engine2: String,
    pub result: MatchResult,
}

/// The match settings worth keeping next to the results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub games_per_match: u32,
    pub iterations: u32,
    pub time_per_move_ms: Option<u64>,
    pub max_moves_per_game: u32,
}

impl From<&MatchConfig> for TournamentConfig {
    fn from(config: &MatchConfig) -> Self {
        Self {
            games_per_match: config.num_games,
            iterations: config.iterations,
            time_per_move_ms: config.time_per_move_ms,
            max_moves_per_game: config.max_moves,
        }
    }
}

impl TournamentResults {
    pub fn new(name: &str, participants: Vec<String>, config: TournamentConfig) -> Self {
        Self {
            name: name.to_string(),
            participants,
            matches: Vec::new(),
            config,
        }
    }

    /// Add a match result
    pub fn add_match(&mut self, engine1: &str, engine2: &str, result: MatchResult) {
        self.matches.push(MatchEntry {
            engine1: engine1.to_string(),
            engine2: engine2.to_string(),
            result,
        });
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> TournamentResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_file(path, &json)
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> TournamentResult<Self> {
        parse_json(path, &read_file(path)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        let _ = writeln!(report, "=== Tournament: {} ===\n", self.name);
        let _ = writeln!(report, "Participants: {}", self.participants.join(", "));
        let time = self
            .config
            .time_per_move_ms
            .map(|ms| format!(", {ms} ms/move"))
            .unwrap_or_default();
        let _ = writeln!(
            report,
            "Config: {} games/match, {} iterations{}\n",
            self.config.games_per_match, self.config.iterations, time
        );

        report.push_str("Results:\n");
        let _ = writeln!(
            report,
            "{:<20} vs {:<20} {:>5}-{:<5}-{:<5}",
            "Engine 1", "Engine 2", "W", "L", "D"
        );
        report.push_str(&"-".repeat(60));
        report.push('\n');

        for entry in &self.matches {
            let _ = writeln!(
                report,
                "{:<20} vs {:<20} {:>5}-{:<5}-{:<5}",
                entry.engine1, entry.engine2, entry.result.wins, entry.result.losses, entry.result.draws
            );
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}
