//! Tournament runner and command line front end for the MCTS chess agent
//!
//! This crate provides infrastructure for:
//! - Running matches between engines and tracking Elo ratings
//! - Loading match and search settings from TOML
//! - Playing against the engine from a terminal
//!
//! # Usage
//!
//! ```bash
//! # MCTS against the random baseline
//! cargo run -p tournament -- match mcts random --games 20 --iterations 500
//!
//! # Inspect the search on one position
//! cargo run -p tournament -- think --iterations 5000 --fen "k7/8/1K6/8/8/8/8/6Q1 w - - 0 1"
//!
//! # Play as black
//! cargo run -p tournament -- play --color black
//! ```

mod config;
mod elo;
mod engines;
mod error;
mod match_runner;
mod play;
mod results;

pub use config::*;
pub use elo::*;
pub use engines::*;
pub use error::{TournamentError, TournamentResult};
pub use match_runner::*;
pub use play::*;
pub use results::*;
