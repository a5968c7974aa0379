use crate::board::Board;

/// Number of leaf positions reachable from `board` in exactly `depth` plies.
///
/// Each promotion piece counts as a separate move.
pub fn perft(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_move_list();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| {
            let mut child = board.clone();
            child.apply_move(mv);
            perft(&child, depth - 1)
        })
        .sum()
}

/// Per-move node counts at the root, sorted by move text. Handy for
/// bisecting a mismatch against another move generator.
pub fn divide(board: &Board, depth: u8) -> Vec<(String, u64)> {
    let mut out: Vec<(String, u64)> = board
        .legal_move_list()
        .into_iter()
        .map(|mv| {
            let mut child = board.clone();
            child.apply_move(mv);
            (mv.to_string(), perft(&child, depth.saturating_sub(1)))
        })
        .collect();
    out.sort();
    out
}
