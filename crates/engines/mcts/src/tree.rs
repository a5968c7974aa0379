//! Search tree and the four UCT phases: select, expand, simulate, backpropagate.

use chess_core::{Board, Color, GameOutcome, Move};
use rand::Rng;

use crate::config::MctsConfig;
use crate::rollout::rollout;

/// Score of a finished game for `side`.
#[inline]
pub fn reward(winner: Option<Color>, side: Color) -> f64 {
    match winner {
        Some(w) if w == side => 1.0,
        Some(_) => -1.0,
        None => 0.0,
    }
}

/// One position in the search tree.
///
/// `value` is the sum of rewards for the side that made `mv`, so a parent
/// picks among its children by their own values without negation.
/// Children are created all at once on the first expansion; the tree owns
/// its nodes outright.
#[derive(Debug, Clone)]
pub struct SearchNode {
    board: Board,
    mv: Option<Move>,
    outcome: GameOutcome,
    visits: u32,
    value: f64,
    children: Vec<SearchNode>,
}

impl SearchNode {
    pub fn root(board: Board) -> Self {
        Self::new(board, None)
    }

    fn new(board: Board, mv: Option<Move>) -> Self {
        let outcome = board.outcome();
        Self {
            board,
            mv,
            outcome,
            visits: 0,
            value: 0.0,
            children: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Move that led here. `None` for the root.
    pub fn mv(&self) -> Option<Move> {
        self.mv
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value / self.visits as f64
        }
    }

    pub fn children(&self) -> &[SearchNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    fn mover(&self) -> Color {
        self.board.side_to_move().other()
    }

    /// Create one child per legal move. Terminal and already expanded
    /// nodes are left alone. Returns the number of children created.
    pub fn expand(&mut self) -> usize {
        if !self.is_leaf() || self.is_terminal() {
            return 0;
        }
        self.children = self
            .board
            .legal_move_list()
            .into_iter()
            .map(|mv| {
                let mut next = self.board.clone();
                next.apply_move(mv);
                SearchNode::new(next, Some(mv))
            })
            .collect();
        self.children.len()
    }

    /// UCT score of this node seen from a parent with `parent_visits` visits.
    pub fn uct_score<R: Rng + ?Sized>(&self, parent_visits: u32, config: &MctsConfig, rng: &mut R) -> f64 {
        let visits = self.visits as f64 + config.epsilon;
        let exploit = self.value / visits;
        let explore = ((parent_visits as f64 + 1.0).ln() / visits).sqrt();
        exploit + config.exploration * explore + rng.gen::<f64>() * config.epsilon
    }

    /// Index of the child with the highest UCT score.
    pub fn select_child<R: Rng + ?Sized>(&self, config: &MctsConfig, rng: &mut R) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, child) in self.children.iter().enumerate() {
            let score = child.uct_score(self.visits, config, rng);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
            }
        }
        best.map(|(i, _)| i)
    }

    fn record(&mut self, winner: Option<Color>) {
        self.visits += 1;
        self.value += reward(winner, self.mover());
    }

    /// Run one iteration below this node and return the simulated winner.
    ///
    /// Descends by UCT to a leaf. A terminal leaf scores its own result; any
    /// other leaf is expanded and one new child is played out at random.
    /// Every node on the path, the played-out child included, records the
    /// result.
    pub fn iterate<R: Rng + ?Sized>(&mut self, config: &MctsConfig, rng: &mut R, nodes: &mut u64) -> Option<Color> {
        let winner = if self.is_terminal() {
            self.outcome.winner()
        } else if self.is_leaf() {
            *nodes += self.expand() as u64;
            match self.select_child(config, rng) {
                Some(i) => {
                    let child = &mut self.children[i];
                    let winner = rollout(&child.board, config.max_rollout_plies, rng, nodes);
                    child.record(winner);
                    winner
                }
                None => None,
            }
        } else {
            match self.select_child(config, rng) {
                Some(i) => self.children[i].iterate(config, rng, nodes),
                None => None,
            }
        };

        self.record(winner);
        winner
    }

    /// Root child with the most visits, ties going to the better mean value.
    pub fn best_child(&self) -> Option<&SearchNode> {
        self.children.iter().fold(None, |best, child| match best {
            Some(b) if (b.visits, b.mean_value()) >= (child.visits, child.mean_value()) => Some(b),
            _ => Some(child),
        })
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;
