//! Terminal-state and draw detection.
//!
//! Everything here is derived from the board and its legal-move cache; none
//! of it is stored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{board::Board, types::*};

/// Classification of the position after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Ongoing,
    /// The given side is in check but has a move.
    Check(Color),
    /// The given side is checkmated.
    Checkmate(Color),
    Stalemate,
    DrawInsufficientMaterial,
    DrawRepetition,
    DrawFiftyMove,
}

impl GameOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::Ongoing | GameOutcome::Check(_))
    }

    pub fn is_draw(self) -> bool {
        self.is_terminal() && !matches!(self, GameOutcome::Checkmate(_))
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::Checkmate(loser) => Some(loser.other()),
            _ => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Ongoing => write!(f, "ongoing"),
            GameOutcome::Check(c) => write!(f, "{c} is in check"),
            GameOutcome::Checkmate(c) => write!(f, "{c} is checkmated, {} wins", c.other()),
            GameOutcome::Stalemate => write!(f, "draw by stalemate"),
            GameOutcome::DrawInsufficientMaterial => write!(f, "draw by insufficient material"),
            GameOutcome::DrawRepetition => write!(f, "draw by threefold repetition"),
            GameOutcome::DrawFiftyMove => write!(f, "draw by the fifty-move rule"),
        }
    }
}

/// Minor pieces of one side, for the insufficient-material rule.
#[derive(Default)]
struct Minors {
    knights: u32,
    light_bishops: u32,
    dark_bishops: u32,
}

impl Minors {
    fn count(&self) -> u32 {
        self.knights + self.light_bishops + self.dark_bishops
    }
}

impl Board {
    pub fn in_check(&self, c: Color) -> bool {
        self.position().in_check(c)
    }

    /// `c` is in check and has no legal move. Only the side to move can be mated.
    pub fn is_checkmate(&self, c: Color) -> bool {
        c == self.side_to_move() && self.in_check(c) && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self, c: Color) -> bool {
        c == self.side_to_move() && !self.in_check(c) && !self.has_legal_moves()
    }

    /// Neither side can ever deliver mate.
    ///
    /// True when no pawn, rook or queen remains and either both sides are
    /// bare, or every remaining minor is a bishop on one square color, or one
    /// side is bare and the other has a single minor piece.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = [Minors::default(), Minors::default()];
        for (sq, pc) in self.position().pieces() {
            let m = &mut minors[pc.color.idx()];
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => m.knights += 1,
                PieceKind::Bishop if sq.is_light() => m.light_bishops += 1,
                PieceKind::Bishop => m.dark_bishops += 1,
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }

        let [white, black] = &minors;

        // Covers bare kings too.
        let knights = white.knights + black.knights;
        let light = white.light_bishops + black.light_bishops;
        let dark = white.dark_bishops + black.dark_bishops;
        if knights == 0 && (light == 0 || dark == 0) {
            return true;
        }

        (white.count() == 0 || black.count() == 0) && white.count() + black.count() <= 1
    }

    /// Some position has occurred at least three times.
    pub fn is_threefold_repetition(&self) -> bool {
        self.position_counts().values().any(|&n| n >= 3)
    }

    /// No capture or pawn move in the last 100 half-moves.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock() >= 100
    }

    pub fn is_draw(&self) -> bool {
        self.is_insufficient_material()
            || self.is_stalemate(self.side_to_move())
            || self.is_threefold_repetition()
            || self.is_fifty_move_draw()
    }

    /// Classify the current position. Checkmate takes precedence over every draw.
    pub fn outcome(&self) -> GameOutcome {
        let side = self.side_to_move();
        let in_check = self.in_check(side);
        let has_moves = self.has_legal_moves();

        if !has_moves {
            return if in_check {
                GameOutcome::Checkmate(side)
            } else {
                GameOutcome::Stalemate
            };
        }
        if self.is_insufficient_material() {
            return GameOutcome::DrawInsufficientMaterial;
        }
        if self.is_threefold_repetition() {
            return GameOutcome::DrawRepetition;
        }
        if self.is_fifty_move_draw() {
            return GameOutcome::DrawFiftyMove;
        }
        if in_check {
            GameOutcome::Check(side)
        } else {
            GameOutcome::Ongoing
        }
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
