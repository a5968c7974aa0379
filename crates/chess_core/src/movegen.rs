use std::collections::BTreeMap;

use crate::{pieces, position::Position, types::*};

/// Legal destinations for every piece of the side to move, keyed by origin.
///
/// Every piece of the mover gets an entry, even when it has no legal move.
/// Destinations are in ascending square order.
pub fn legal_moves_map(pos: &Position) -> BTreeMap<Square, Vec<Square>> {
    let mut map = BTreeMap::new();
    let mut buf = Vec::with_capacity(28);
    for (from, _) in pos.pieces_of(pos.side_to_move()) {
        buf.clear();
        pieces::pseudo_legal_moves_into(pos, from, &mut buf);
        map.insert(from, filter_legal(pos, from, &buf));
    }
    map
}

/// Legal destinations of the piece on `from`, which must belong to the side to move.
pub fn legal_destinations(pos: &Position, from: Square) -> Vec<Square> {
    match pos.piece_at(from) {
        Some(pc) if pc.color == pos.side_to_move() => filter_legal(pos, from, &pieces::pseudo_legal_moves(pos, from)),
        _ => Vec::new(),
    }
}

fn filter_legal(pos: &Position, from: Square, pseudo: &[Square]) -> Vec<Square> {
    let mut legal: Vec<Square> = pseudo
        .iter()
        .copied()
        .filter(|&to| !pos.leaves_king_in_check(Move::new(from, to)))
        .collect();
    legal.sort_unstable();
    legal
}

/// Flatten an origin/destination map into moves, one per promotion piece
/// where a pawn reaches its last rank.
pub fn expand_moves(pos: &Position, map: &BTreeMap<Square, Vec<Square>>) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (&from, dests) in map {
        for &to in dests {
            if pos.is_promotion(from, to) {
                out.extend(PieceKind::PROMOTIONS.iter().map(|&k| Move::with_promotion(from, to, k)));
            } else {
                out.push(Move::new(from, to));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
