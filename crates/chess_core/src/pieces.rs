//! Per-kind movement rules.
//!
//! Each piece kind contributes two generators, looked up through [`RULES`]:
//!
//! - pseudo-legal destinations: legal by movement pattern and occupancy,
//!   ignoring whether the mover's own king is left in check
//! - attack squares: every square the piece threatens, including squares
//!   held by its own side (so a defended piece counts as attacked)
//!
//! Attack sets never include castling or pawn pushes, and the king's attack
//! set is just its eight neighbours, so computing one side's attacks never
//! needs the other side's moves.

use crate::{bitboard::Bitboard, position::Position, types::*};

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

type MoveGen = fn(&Position, Square, Color, &mut Vec<Square>);
type AttackGen = fn(&Position, Square, Color) -> Bitboard;

struct KindRules {
    moves: MoveGen,
    attacks: AttackGen,
}

/// Indexed by [`PieceKind::idx`].
static RULES: [KindRules; 6] = [
    KindRules {
        moves: pawn_moves,
        attacks: pawn_attacks,
    },
    KindRules {
        moves: knight_moves,
        attacks: knight_attacks,
    },
    KindRules {
        moves: bishop_moves,
        attacks: bishop_attacks,
    },
    KindRules {
        moves: rook_moves,
        attacks: rook_attacks,
    },
    KindRules {
        moves: queen_moves,
        attacks: queen_attacks,
    },
    KindRules {
        moves: king_moves,
        attacks: king_attacks,
    },
];

/// Pseudo-legal destinations of the piece on `from` (empty if the square is empty).
pub fn pseudo_legal_moves(pos: &Position, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    pseudo_legal_moves_into(pos, from, &mut out);
    out
}

pub fn pseudo_legal_moves_into(pos: &Position, from: Square, out: &mut Vec<Square>) {
    if let Some(pc) = pos.piece_at(from) {
        (RULES[pc.kind.idx()].moves)(pos, from, pc.color, out);
    }
}

/// Squares threatened by the piece on `from` (empty if the square is empty).
pub fn attack_squares(pos: &Position, from: Square) -> Bitboard {
    match pos.piece_at(from) {
        Some(pc) => (RULES[pc.kind.idx()].attacks)(pos, from, pc.color),
        None => Bitboard::EMPTY,
    }
}

fn is_own(pos: &Position, sq: Square, c: Color) -> bool {
    matches!(pos.piece_at(sq), Some(pc) if pc.color == c)
}

fn step_moves(pos: &Position, from: Square, c: Color, offsets: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            if !is_own(pos, to, c) {
                out.push(to);
            }
        }
    }
}

fn step_attacks(from: Square, offsets: &[(i8, i8)]) -> Bitboard {
    offsets
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .collect()
}

fn slide_moves(pos: &Position, from: Square, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(df, dr) in dirs {
        let mut cur = from.offset(df, dr);
        while let Some(to) = cur {
            match pos.piece_at(to) {
                None => out.push(to),
                Some(pc) => {
                    if pc.color != c {
                        out.push(to);
                    }
                    break;
                }
            }
            cur = to.offset(df, dr);
        }
    }
}

fn slide_attacks(pos: &Position, from: Square, dirs: &[(i8, i8)]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &(df, dr) in dirs {
        let mut cur = from.offset(df, dr);
        while let Some(to) = cur {
            bb.insert(to);
            if pos.piece_at(to).is_some() {
                break;
            }
            cur = to.offset(df, dr);
        }
    }
    bb
}

fn pawn_moves(pos: &Position, from: Square, c: Color, out: &mut Vec<Square>) {
    let dir = c.forward();

    if let Some(one) = from.offset(0, dir) {
        if pos.piece_at(one).is_none() {
            out.push(one);
            if from.rank() == c.pawn_rank() {
                if let Some(two) = from.offset(0, 2 * dir) {
                    if pos.piece_at(two).is_none() {
                        out.push(two);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(to) = from.offset(df, dir) {
            match pos.piece_at(to) {
                Some(pc) if pc.color != c => out.push(to),
                None if pos.en_passant() == Some(to) => out.push(to),
                _ => {}
            }
        }
    }
}

fn pawn_attacks(_pos: &Position, from: Square, c: Color) -> Bitboard {
    step_attacks(from, &[(-1, c.forward()), (1, c.forward())])
}

fn knight_moves(pos: &Position, from: Square, c: Color, out: &mut Vec<Square>) {
    step_moves(pos, from, c, &KNIGHT_OFFSETS, out);
}

fn knight_attacks(_pos: &Position, from: Square, _c: Color) -> Bitboard {
    step_attacks(from, &KNIGHT_OFFSETS)
}

fn bishop_moves(pos: &Position, from: Square, c: Color, out: &mut Vec<Square>) {
    slide_moves(pos, from, c, &DIAGONALS, out);
}

fn bishop_attacks(pos: &Position, from: Square, _c: Color) -> Bitboard {
    slide_attacks(pos, from, &DIAGONALS)
}

fn rook_moves(pos: &Position, from: Square, c: Color, out: &mut Vec<Square>) {
    slide_moves(pos, from, c, &ORTHOGONALS, out);
}

fn rook_attacks(pos: &Position, from: Square, _c: Color) -> Bitboard {
    slide_attacks(pos, from, &ORTHOGONALS)
}

fn queen_moves(pos: &Position, from: Square, c: Color, out: &mut Vec<Square>) {
    slide_moves(pos, from, c, &DIAGONALS, out);
    slide_moves(pos, from, c, &ORTHOGONALS, out);
}

fn queen_attacks(pos: &Position, from: Square, _c: Color) -> Bitboard {
    slide_attacks(pos, from, &DIAGONALS) | slide_attacks(pos, from, &ORTHOGONALS)
}

fn king_moves(pos: &Position, from: Square, c: Color, out: &mut Vec<Square>) {
    let enemy_attacks = pos.attacks_by(c.other());
    for (df, dr) in KING_OFFSETS {
        if let Some(to) = from.offset(df, dr) {
            if !is_own(pos, to, c) && !enemy_attacks.contains(to) {
                out.push(to);
            }
        }
    }
    castle_moves(pos, from, c, enemy_attacks, out);
}

fn king_attacks(_pos: &Position, from: Square, _c: Color) -> Bitboard {
    step_attacks(from, &KING_OFFSETS)
}

fn castle_moves(pos: &Position, from: Square, c: Color, enemy_attacks: Bitboard, out: &mut Vec<Square>) {
    let rank = c.back_rank();
    if Square::new(4, rank) != Some(from) || enemy_attacks.contains(from) {
        return;
    }

    for side in [CastleSide::King, CastleSide::Queen] {
        if !pos.castling().allows(c, side) {
            continue;
        }
        let rook_file = side.rook_file();
        let rook_home = Square::new(rook_file, rank);
        if rook_home.and_then(|sq| pos.piece_at(sq)) != Some(Piece::new(c, PieceKind::Rook)) {
            continue;
        }

        let (lo, hi) = if rook_file > 4 { (5, rook_file) } else { (rook_file + 1, 4) };
        let path_clear = (lo..hi)
            .filter_map(|f| Square::new(f, rank))
            .all(|sq| pos.piece_at(sq).is_none());
        if !path_clear {
            continue;
        }

        let step = if rook_file > 4 { 1 } else { -1 };
        let (Some(pass), Some(land)) = (from.offset(step, 0), from.offset(2 * step, 0)) else {
            continue;
        };
        if enemy_attacks.contains(pass) || enemy_attacks.contains(land) {
            continue;
        }
        out.push(land);
    }
}

#[cfg(test)]
#[path = "pieces_tests.rs"]
mod pieces_tests;
