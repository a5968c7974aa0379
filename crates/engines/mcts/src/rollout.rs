//! Random playouts.

use chess_core::{Board, Color};
use rand::seq::SliceRandom;
use rand::Rng;

/// Play uniformly random legal moves from `board` until the game ends.
///
/// Returns the winner, or `None` for any draw. A playout that reaches
/// `max_plies` without ending counts as a draw. Every ply played is added
/// to `nodes`.
pub fn rollout<R: Rng + ?Sized>(
    board: &Board,
    max_plies: u32,
    rng: &mut R,
    nodes: &mut u64,
) -> Option<Color> {
    let mut board = board.clone();

    for _ in 0..max_plies {
        let outcome = board.outcome();
        if outcome.is_terminal() {
            return outcome.winner();
        }

        let moves = board.legal_move_list();
        let &mv = moves.choose(rng)?;
        board.apply_move(mv);
        *nodes += 1;
    }

    board.outcome().winner()
}
