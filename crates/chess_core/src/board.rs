use std::collections::{BTreeMap, HashMap};

use crate::{
    bitboard::Bitboard,
    error::{ChessError, ChessResult},
    movegen,
    position::{AppliedMove, CastlingRights, Position},
    types::*,
};

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Result of a move attempt that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveStatus<T> {
    Applied(T),
    /// The move reaches the last rank and needs a promotion piece; nothing changed.
    PromotionPending { from: Square, to: Square },
}

impl<T> MoveStatus<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            MoveStatus::Applied(t) => Some(t),
            MoveStatus::PromotionPending { .. } => None,
        }
    }
}

/// Full game state: placement plus the legal-move cache, repetition table and clocks.
///
/// Cloning is deep; a clone can be played forward without touching the original.
#[derive(Clone, Debug)]
pub struct Board {
    position: Position,
    legal_moves: BTreeMap<Square, Vec<Square>>,
    position_counts: HashMap<String, u32>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    pub fn startpos() -> Self {
        Self::from_position(Position::startpos(), 0, 1)
    }

    fn from_position(position: Position, halfmove_clock: u32, fullmove_number: u32) -> Self {
        let mut board = Board {
            legal_moves: movegen::legal_moves_map(&position),
            position,
            position_counts: HashMap::new(),
            halfmove_clock,
            fullmove_number,
        };
        board.record_position();
        board
    }

    /// Parse a Forsyth-Edwards Notation string. The clock fields are optional.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let bad = |msg: &str| ChessError::InvalidFen(format!("{msg} in `{fen}`"));

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&parts.len()) {
            return Err(bad("expected 4 to 6 fields"));
        }

        let mut cells = [None; 64];
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(bad("expected 8 ranks"));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 first
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if !(1..=8).contains(&d) {
                        return Err(bad("bad empty-run digit"));
                    }
                    file += d as i8;
                } else {
                    let pc = Piece::from_fen_char(ch).ok_or_else(|| bad("bad piece letter"))?;
                    let sq = Square::new(file, rank).ok_or_else(|| bad("too many files"))?;
                    cells[sq.index()] = Some(pc);
                    file += 1;
                }
                if file > 8 {
                    return Err(bad("too many files"));
                }
            }
            if file != 8 {
                return Err(bad("not enough files"));
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(bad("bad side to move")),
        };

        let mut castling = CastlingRights::NONE;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(bad("bad castling field")),
                }
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            s => Some(s.parse::<Square>().map_err(|_| bad("bad en-passant square"))?),
        };
        if let Some(ep) = en_passant {
            // The target must sit behind a pawn that just double-pushed.
            let dir = side_to_move.forward();
            let pushed = Piece::new(side_to_move.other(), PieceKind::Pawn);
            let occupant = |sq: Option<Square>| sq.and_then(|s| cells[s.index()]);
            let plausible = ep.rank() == side_to_move.other().pawn_rank() + side_to_move.other().forward()
                && cells[ep.index()].is_none()
                && ep.offset(0, dir).is_some_and(|s| cells[s.index()].is_none())
                && occupant(ep.offset(0, -dir)) == Some(pushed);
            if !plausible {
                return Err(bad("en-passant square has no double-pushed pawn"));
            }
        }

        let halfmove_clock = match parts.get(4) {
            Some(s) => s.parse().map_err(|_| bad("bad halfmove clock"))?,
            None => 0,
        };
        let fullmove_number = match parts.get(5) {
            Some(s) => s.parse().map_err(|_| bad("bad fullmove number"))?,
            None => 1,
        };

        let mut king_squares = [Square::E1, Square::E8];
        for c in Color::BOTH {
            let king = Piece::new(c, PieceKind::King);
            let mut kings = Square::all().filter(|sq| cells[sq.index()] == Some(king));
            match (kings.next(), kings.next()) {
                (Some(sq), None) => king_squares[c.idx()] = sq,
                _ => return Err(bad(&format!("expected exactly one {c} king"))),
            }
        }

        let position = Position {
            cells,
            side_to_move,
            castling,
            en_passant,
            king_squares,
        };
        if position.in_check(side_to_move.other()) {
            return Err(bad("side not to move is in check"));
        }

        Ok(Self::from_position(position, halfmove_clock, fullmove_number))
    }

    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {}",
            self.position.signature(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.position.piece_at(sq)
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn castling(&self) -> CastlingRights {
        self.position.castling()
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.position.en_passant()
    }

    pub fn king_square(&self, c: Color) -> Square {
        self.position.king_square(c)
    }

    pub fn attacks_by(&self, c: Color) -> Bitboard {
        self.position.attacks_by(c)
    }

    pub fn is_attacked(&self, target: Square, by: Color) -> bool {
        self.position.is_attacked(target, by)
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Mini-FEN piece placement.
    pub fn placement(&self) -> String {
        self.position.placement()
    }

    /// Repetition key: placement, side to move, castling rights, en-passant target.
    pub fn signature(&self) -> String {
        self.position.signature()
    }

    /// Times the position with `signature` has occurred in this game.
    pub fn position_count(&self, signature: &str) -> u32 {
        self.position_counts.get(signature).copied().unwrap_or(0)
    }

    pub(crate) fn position_counts(&self) -> &HashMap<String, u32> {
        &self.position_counts
    }

    /// Legal-move cache for the side to move.
    pub fn legal_moves(&self) -> &BTreeMap<Square, Vec<Square>> {
        &self.legal_moves
    }

    /// Legal destinations from `from`; empty for squares the mover does not occupy.
    pub fn legal_destinations(&self, from: Square) -> &[Square] {
        self.legal_moves.get(&from).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        self.legal_destinations(from).contains(&to)
    }

    pub fn has_legal_moves(&self) -> bool {
        self.legal_moves.values().any(|dests| !dests.is_empty())
    }

    /// Every legal move, with promotions expanded to one move per piece kind.
    pub fn legal_move_list(&self) -> Vec<Move> {
        movegen::expand_moves(&self.position, &self.legal_moves)
    }

    pub fn is_promotion(&self, from: Square, to: Square) -> bool {
        self.position.is_promotion(from, to)
    }

    /// Validate and play a move for the side to move.
    ///
    /// A pawn reaching the last rank without `promo` yields
    /// [`MoveStatus::PromotionPending`] and leaves the board unchanged, as does
    /// every error.
    pub fn attempt_move(
        &mut self,
        from: Square,
        to: Square,
        promo: Option<PieceKind>,
    ) -> ChessResult<MoveStatus<AppliedMove>> {
        if self.outcome().is_terminal() {
            return Err(ChessError::GameOver);
        }
        if !self.is_legal(from, to) {
            return Err(ChessError::IllegalMove { from, to });
        }

        let mv = match (self.is_promotion(from, to), promo) {
            (true, None) => return Ok(MoveStatus::PromotionPending { from, to }),
            (true, Some(kind)) if !kind.is_promotion_target() => return Err(ChessError::InvalidPromotion(kind)),
            (true, Some(kind)) => Move::with_promotion(from, to, kind),
            (false, Some(_)) => return Err(ChessError::UnexpectedPromotion { from, to }),
            (false, None) => Move::new(from, to),
        };

        Ok(MoveStatus::Applied(self.apply_move(mv)))
    }

    /// Play a move already known to be legal.
    ///
    /// Used by search and perft, which draw moves from [`Board::legal_move_list`].
    pub fn apply_move(&mut self, mv: Move) -> AppliedMove {
        debug_assert!(self.is_legal(mv.from, mv.to), "apply_move given illegal move {mv}");

        let mover = self.side_to_move();
        let applied = self.position.relocate(mv);

        self.position.side_to_move = mover.other();
        if mover == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.legal_moves = movegen::legal_moves_map(&self.position);

        self.halfmove_clock = if applied.piece.kind == PieceKind::Pawn || applied.is_capture() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        self.record_position();

        applied
    }

    fn record_position(&mut self) {
        *self.position_counts.entry(self.position.signature()).or_insert(0) += 1;
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
