//! Standard algebraic notation and the running move log.

use std::fmt;

use crate::{board::Board, position::AppliedMove, types::*};

/// Algebraic notation for `applied`, given the board before and after it.
///
/// `before` supplies the legal-move cache used for disambiguation; `after`
/// supplies the check and mate suffix.
pub fn notate(before: &Board, after: &Board, applied: &AppliedMove) -> String {
    let mv = applied.mv;
    let mut s = String::with_capacity(8);

    if let Some(side) = applied.castle {
        s.push_str(side.notation());
    } else {
        let kind = applied.piece.kind;
        if kind == PieceKind::Pawn {
            if applied.is_capture() {
                s.push(mv.from.file_char());
            }
        } else {
            s.push(kind.letter());
            push_disambiguation(&mut s, before, applied.piece, mv);
        }
        if applied.is_capture() {
            s.push('x');
        }
        s.push_str(&mv.to.to_string());
        if let Some(promo) = mv.promo.filter(|_| kind == PieceKind::Pawn) {
            s.push('=');
            s.push(promo.letter());
        }
    }

    let defender = after.side_to_move();
    if after.is_checkmate(defender) {
        s.push('#');
    } else if after.in_check(defender) {
        s.push('+');
    }
    s
}

/// Origin file, rank or both, whichever first tells `mv` apart from other
/// like pieces that can legally reach the same square.
fn push_disambiguation(s: &mut String, before: &Board, piece: Piece, mv: Move) {
    let rivals: Vec<Square> = before
        .legal_moves()
        .iter()
        .filter(|&(&from, dests)| from != mv.from && before.piece_at(from) == Some(piece) && dests.contains(&mv.to))
        .map(|(&from, _)| from)
        .collect();
    if rivals.is_empty() {
        return;
    }

    if rivals.iter().all(|r| r.file() != mv.from.file()) {
        s.push(mv.from.file_char());
    } else if rivals.iter().all(|r| r.rank() != mv.from.rank()) {
        s.push(mv.from.rank_char());
    } else {
        s.push(mv.from.file_char());
        s.push(mv.from.rank_char());
    }
}

/// Ordered notation of the moves played, rendered in numbered pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveLog {
    first_move_number: u32,
    black_first: bool,
    entries: Vec<String>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::starting_at(1, Color::White)
    }

    /// Log for a game whose first recorded move is `side`'s move number `number`.
    pub fn starting_at(number: u32, side: Color) -> Self {
        MoveLog {
            first_move_number: number.max(1),
            black_first: side == Color::Black,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, san: String) {
        self.entries.push(san);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// One line per move number: `"1. e4 e5"`, or `"1... e5"` when black moved first.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut rest = self.entries.as_slice();
        let mut number = self.first_move_number;

        if self.black_first {
            if let Some((first, tail)) = rest.split_first() {
                lines.push(format!("{number}... {first}"));
                rest = tail;
                number += 1;
            }
        }
        for pair in rest.chunks(2) {
            lines.push(format!("{number}. {}", pair.join(" ")));
            number += 1;
        }
        lines
    }
}

impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
