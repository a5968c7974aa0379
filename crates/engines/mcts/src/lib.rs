//! Monte-Carlo Tree Search Chess Engine
//!
//! Builds a tree of positions with UCT selection and scores leaves with
//! uniformly random playouts. No evaluation function is involved: a move is
//! good if random games after it tend to be won.
//!
//! The move played is the root child with the most visits. With more than
//! one thread, independent trees are searched in parallel and their root
//! statistics summed.

mod config;
mod rollout;
mod tree;

use std::time::Duration;

use chess_core::{Board, Engine, Move, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, trace};

pub use config::MctsConfig;
pub use rollout::rollout;
pub use tree::{reward, SearchNode};


/// Summed statistics for one root move.
#[derive(Debug, Clone, PartialEq)]
pub struct RootMoveStats {
    pub mv: Move,
    pub visits: u32,
    /// Sum of rewards for the side to move at the root.
    pub value: f64,
}

impl RootMoveStats {
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value / self.visits as f64
        }
    }
}

/// Everything a finished search knows about the root.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// One entry per legal move, in move generation order.
    pub moves: Vec<RootMoveStats>,
    pub iterations: u32,
    pub nodes: u64,
    pub stopped: bool,
    pub elapsed: Duration,
}

impl Analysis {
    /// Most visited move, ties going to the better mean value.
    pub fn best(&self) -> Option<&RootMoveStats> {
        self.moves.iter().fold(None, |best, s| match best {
            Some(b) if (b.visits, b.mean_value()) >= (s.visits, s.mean_value()) => Some(b),
            _ => Some(s),
        })
    }
}

struct TreeReport {
    moves: Vec<RootMoveStats>,
    iterations: u32,
    nodes: u64,
}

/// Grow one tree from `board` until `limits` run out.
fn search_tree(board: &Board, config: &MctsConfig, limits: &SearchLimits, seed: u64) -> TreeReport {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut root = SearchNode::root(board.clone());
    let mut nodes = root.expand() as u64;
    let mut iterations = 0;

    while !limits.exhausted(iterations) {
        root.iterate(config, &mut rng, &mut nodes);
        iterations += 1;
    }

    let moves = root
        .children()
        .iter()
        .filter_map(|child| {
            Some(RootMoveStats {
                mv: child.mv()?,
                visits: child.visits(),
                value: child.value(),
            })
        })
        .collect();

    TreeReport {
        moves,
        iterations,
        nodes,
    }
}

/// Split `total` iterations over `workers` trees.
fn split_budget(total: u32, workers: usize) -> Vec<u32> {
    let workers = workers.max(1) as u32;
    let base = total / workers;
    let extra = total % workers;
    (0..workers).map(|i| base + u32::from(i < extra)).collect()
}

/// A chess engine that picks moves by Monte-Carlo tree search.
#[derive(Debug, Clone)]
pub struct MctsEngine {
    config: MctsConfig,
    rng: StdRng,
}

impl MctsEngine {
    pub fn new(config: MctsConfig) -> Self {
        let rng = Self::seeded_rng(&config);
        Self { config, rng }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    fn seeded_rng(config: &MctsConfig) -> StdRng {
        config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }

    /// Search `board` and return the statistics of every root move.
    ///
    /// Returns `None` when the game on `board` is already over.
    pub fn analyse(&mut self, board: &Board, limits: SearchLimits) -> Option<Analysis> {
        if board.outcome().is_terminal() {
            return None;
        }

        limits.start();
        let budgets = split_budget(limits.iterations, self.config.threads);
        let seeds: Vec<u64> = budgets.iter().map(|_| self.rng.gen()).collect();

        let run = |(&budget, &seed): (&u32, &u64)| {
            let worker_limits = SearchLimits {
                iterations: budget,
                ..limits.clone()
            };
            search_tree(board, &self.config, &worker_limits, seed)
        };
        let reports: Vec<TreeReport> = if budgets.len() == 1 {
            budgets.iter().zip(&seeds).map(run).collect()
        } else {
            budgets.par_iter().zip(seeds.par_iter()).map(run).collect()
        };

        let mut reports = reports.into_iter();
        let first = reports.next()?;
        let mut analysis = Analysis {
            moves: first.moves,
            iterations: first.iterations,
            nodes: first.nodes,
            stopped: false,
            elapsed: Duration::ZERO,
        };
        // Every tree expands the root in the same move order.
        for report in reports {
            for (total, stats) in analysis.moves.iter_mut().zip(report.moves) {
                total.visits += stats.visits;
                total.value += stats.value;
            }
            analysis.iterations += report.iterations;
            analysis.nodes += report.nodes;
        }
        analysis.stopped = limits.time_control.is_stopped();
        analysis.elapsed = limits.time_control.elapsed();

        for stats in &analysis.moves {
            trace!(mv = %stats.mv, visits = stats.visits, mean = stats.mean_value(), "root move");
        }
        Some(analysis)
    }
}

impl Default for MctsEngine {
    fn default() -> Self {
        Self::new(MctsConfig::default())
    }
}

impl Engine for MctsEngine {
    fn search(&mut self, board: &Board, limits: SearchLimits) -> SearchResult {
        if board.outcome().is_terminal() {
            return SearchResult::none();
        }

        // A forced move needs no search.
        let moves = board.legal_move_list();
        if let [only] = moves.as_slice() {
            return SearchResult {
                best_move: Some(*only),
                score: 0.0,
                iterations: 0,
                nodes: 1,
                stopped: false,
            };
        }

        let Some(analysis) = self.analyse(board, limits) else {
            return SearchResult::none();
        };
        let best = analysis.best();

        debug!(
            best = ?best.map(|s| s.mv.to_string()),
            visits = best.map_or(0, |s| s.visits),
            score = best.map_or(0.0, RootMoveStats::mean_value),
            iterations = analysis.iterations,
            nodes = analysis.nodes,
            elapsed_ms = analysis.elapsed.as_millis() as u64,
            stopped = analysis.stopped,
            "mcts search finished"
        );

        SearchResult {
            best_move: best.map(|s| s.mv),
            score: best.map_or(0.0, RootMoveStats::mean_value),
            iterations: analysis.iterations,
            nodes: analysis.nodes,
            stopped: analysis.stopped,
        }
    }

    fn name(&self) -> &str {
        "MCTS v1.0"
    }

    fn new_game(&mut self) {
        self.rng = Self::seeded_rng(&self.config);
    }
}

/// Run `iterations` MCTS iterations with the default configuration and
/// return the chosen move, or `None` if the game is over.
pub fn choose_move(board: &Board, iterations: u32) -> Option<Move> {
    MctsEngine::default()
        .search(board, SearchLimits::iterations(iterations))
        .best_move
}
