//! Match runner for playing games between engines

use chess_core::{Color, Engine, Game, GameOutcome};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::MatchConfig;
use crate::elo::{GameResult, MatchResult};

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The rules ended the game (mate or a draw).
    Rules(GameOutcome),
    /// `max_moves` half-moves were played.
    MoveLimit,
    /// The engine for this side returned no move or an illegal one.
    Forfeit(Color),
}

/// A finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    /// From white's perspective
    pub result: GameResult,
    pub termination: Termination,
    /// Move log in numbered pairs
    pub moves: String,
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective
    pub fn run_match(&self, engine1: &mut dyn Engine, engine2: &mut dyn Engine) -> MatchResult {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            let engine1_white = !self.config.alternate_colors || game_num % 2 == 0;
            // With a fixed seed both games of a colour-swapped pair share one opening.
            let opening_index = if self.config.alternate_colors { game_num / 2 } else { game_num };

            let record = if engine1_white {
                self.play_game(engine1, engine2, opening_index)
            } else {
                self.play_game(engine2, engine1, opening_index)
            };
            let game_result = if engine1_white {
                record.result
            } else {
                record.result.flipped()
            };
            result.record(game_result);

            info!(
                game = game_num + 1,
                white = %record.white,
                black = %record.black,
                result = record.result.score_text(),
                termination = ?record.termination,
                "game finished"
            );
            debug!(moves = %record.moves, "game record");

            if self.config.verbose {
                let color = if engine1_white { "W" } else { "B" };
                println!(
                    "Game {}/{}: {} ({}) - Score: {}-{}-{}",
                    game_num + 1,
                    self.config.num_games,
                    record.result.score_text(),
                    color,
                    result.wins,
                    result.losses,
                    result.draws
                );
            }
        }

        result
    }

    /// Play a single game; the record's result is from white's perspective.
    pub fn play_game(&self, white: &mut dyn Engine, black: &mut dyn Engine, opening_index: u32) -> GameRecord {
        let mut game = Game::new();
        white.new_game();
        black.new_game();
        self.play_opening(&mut game, opening_index);

        let termination = self.play_out(&mut game, white, black);
        let result = match termination {
            Termination::Rules(outcome) => match outcome.winner() {
                Some(Color::White) => GameResult::Win,
                Some(Color::Black) => GameResult::Loss,
                None => GameResult::Draw,
            },
            Termination::MoveLimit => GameResult::Draw,
            Termination::Forfeit(Color::White) => GameResult::Loss,
            Termination::Forfeit(Color::Black) => GameResult::Win,
        };

        GameRecord {
            white: white.name().to_string(),
            black: black.name().to_string(),
            result,
            termination,
            moves: game.log().to_string(),
        }
    }

    fn play_out(&self, game: &mut Game, white: &mut dyn Engine, black: &mut dyn Engine) -> Termination {
        for _ in 0..self.config.max_moves {
            let outcome = game.outcome();
            if outcome.is_terminal() {
                return Termination::Rules(outcome);
            }

            let side = game.board().side_to_move();
            // Fresh limits for each move reset the clock.
            let limits = self.config.search_limits();
            let search = match side {
                Color::White => white.search(game.board(), limits),
                Color::Black => black.search(game.board(), limits),
            };

            let Some(mv) = search.best_move else {
                warn!(%side, "engine returned no move in an ongoing game");
                return Termination::Forfeit(side);
            };
            if let Err(err) = game.play(mv) {
                warn!(%side, %mv, %err, "engine played an illegal move");
                return Termination::Forfeit(side);
            }
        }

        let outcome = game.outcome();
        if outcome.is_terminal() {
            Termination::Rules(outcome)
        } else {
            Termination::MoveLimit
        }
    }

    /// Play `opening_plies` random moves so repeated games differ.
    fn play_opening(&self, game: &mut Game, opening_index: u32) {
        if self.config.opening_plies == 0 {
            return;
        }
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(u64::from(opening_index))),
            None => StdRng::from_entropy(),
        };
        for _ in 0..self.config.opening_plies {
            if game.outcome().is_terminal() {
                break;
            }
            let moves = game.board().legal_move_list();
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            if game.play(mv).is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
