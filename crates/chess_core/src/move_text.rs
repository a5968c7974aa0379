//! Coordinate move text (`e2e4`, `e7e8q`), used for command-line input and
//! for replaying move sequences onto a board.

use crate::{
    board::{Board, MoveStatus},
    error::{ChessError, ChessResult},
    position::AppliedMove,
    types::*,
};

/// Parse `e2e4` or `e7e8q`. Only the syntax is checked, not legality.
pub fn parse_move_text(txt: &str) -> ChessResult<Move> {
    let bad = || ChessError::InvalidMoveText(txt.to_string());
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return Err(bad());
    }
    let from: Square = txt[0..2].parse().map_err(|_| bad())?;
    let to: Square = txt[2..4].parse().map_err(|_| bad())?;
    let promo = match txt[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_letter(c) {
            Some(kind) if kind.is_promotion_target() => Some(kind),
            _ => return Err(bad()),
        },
    };
    Ok(Move { from, to, promo })
}

/// Play a whitespace-separated sequence of coordinate moves.
///
/// Stops at the first move that fails; moves before it stay applied.
pub fn apply_move_text(board: &mut Board, line: &str) -> ChessResult<Vec<AppliedMove>> {
    let mut played = Vec::new();
    for txt in line.split_whitespace() {
        let mv = parse_move_text(txt)?;
        match board.attempt_move(mv.from, mv.to, mv.promo)? {
            MoveStatus::Applied(applied) => played.push(applied),
            MoveStatus::PromotionPending { .. } => return Err(ChessError::InvalidMoveText(txt.to_string())),
        }
    }
    Ok(played)
}
