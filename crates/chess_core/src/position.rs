//! Piece placement plus the per-move flags needed to generate moves.
//!
//! `Position` is `Copy`: legality checks copy it, apply the candidate move,
//! and inspect the copy. The heavier bookkeeping (legal-move cache,
//! repetition table, clocks) lives on [`crate::board::Board`].

use std::fmt::Write as _;

use crate::{
    bitboard::Bitboard,
    pieces::{self, DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS},
    types::*,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    pub fn allows(&self, c: Color, side: CastleSide) -> bool {
        match (c, side) {
            (Color::White, CastleSide::King) => self.wk,
            (Color::White, CastleSide::Queen) => self.wq,
            (Color::Black, CastleSide::King) => self.bk,
            (Color::Black, CastleSide::Queen) => self.bq,
        }
    }

    pub fn revoke(&mut self, c: Color, side: CastleSide) {
        let flag = match (c, side) {
            (Color::White, CastleSide::King) => &mut self.wk,
            (Color::White, CastleSide::Queen) => &mut self.wq,
            (Color::Black, CastleSide::King) => &mut self.bk,
            (Color::Black, CastleSide::Queen) => &mut self.bq,
        };
        *flag = false;
    }

    /// FEN castling field, `-` when no rights remain.
    pub fn fen_field(&self) -> String {
        let mut s = String::new();
        for (flag, ch) in [(self.wk, 'K'), (self.wq, 'Q'), (self.bk, 'k'), (self.bq, 'q')] {
            if flag {
                s.push(ch);
            }
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }
}

/// What a single relocation did, for notation and move history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedMove {
    pub mv: Move,
    /// The piece that moved, before any promotion.
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub castle: Option<CastleSide>,
    pub en_passant: bool,
}

impl AppliedMove {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) cells: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    /// Square passed over by a pawn that just advanced two ranks.
    pub(crate) en_passant: Option<Square>,
    pub(crate) king_squares: [Square; 2],
}

impl Position {
    pub fn startpos() -> Self {
        let mut cells = [None; 64];
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            cells[f] = Some(Piece::new(Color::White, kind));
            cells[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            cells[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            cells[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        Position {
            cells,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            king_squares: [Square::E1, Square::E8],
        }
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn pieces_of(&self, c: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, pc)| pc.color == c)
    }

    /// Location of `c`'s king.
    ///
    /// The cached square is trusted only if the king is still on it; a stale
    /// cache is logged and recovered by scanning. A board without that king
    /// is corrupt and panics.
    pub fn king_square(&self, c: Color) -> Square {
        let cached = self.king_squares[c.idx()];
        let king = Piece::new(c, PieceKind::King);
        if self.piece_at(cached) == Some(king) {
            return cached;
        }
        tracing::error!(color = %c, cached = %cached, "king square cache is stale, rescanning");
        match self.pieces().find(|&(_, pc)| pc == king) {
            Some((sq, _)) => sq,
            None => panic!("no {c} king on the board"),
        }
    }

    /// Union of the attack sets of every piece of color `c`.
    pub fn attacks_by(&self, c: Color) -> Bitboard {
        self.pieces_of(c)
            .fold(Bitboard::EMPTY, |acc, (sq, _)| acc | pieces::attack_squares(self, sq))
    }

    /// Whether any piece of color `by` attacks `target`.
    ///
    /// Walks outward from the target instead of building every attack set.
    pub fn is_attacked(&self, target: Square, by: Color) -> bool {
        let holds = |sq: Option<Square>, kinds: &[PieceKind]| {
            matches!(sq.and_then(|s| self.piece_at(s)), Some(pc) if pc.color == by && kinds.contains(&pc.kind))
        };

        // A pawn of `by` attacks forward, so look one rank behind the target.
        let back = -by.forward();
        if holds(target.offset(-1, back), &[PieceKind::Pawn]) || holds(target.offset(1, back), &[PieceKind::Pawn]) {
            return true;
        }

        for (df, dr) in KNIGHT_OFFSETS {
            if holds(target.offset(df, dr), &[PieceKind::Knight]) {
                return true;
            }
        }

        for (df, dr) in KING_OFFSETS {
            if holds(target.offset(df, dr), &[PieceKind::King]) {
                return true;
            }
        }

        let rays = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, sliders) in rays {
            for &(df, dr) in dirs {
                let mut cur = target.offset(df, dr);
                while let Some(sq) = cur {
                    if let Some(pc) = self.piece_at(sq) {
                        if pc.color == by && sliders.contains(&pc.kind) {
                            return true;
                        }
                        break;
                    }
                    cur = sq.offset(df, dr);
                }
            }
        }

        false
    }

    pub fn in_check(&self, c: Color) -> bool {
        self.is_attacked(self.king_square(c), c.other())
    }

    /// Whether moving the piece on `from` to `to` is a pawn reaching its last rank.
    pub fn is_promotion(&self, from: Square, to: Square) -> bool {
        self.piece_at(from).is_some_and(|pc| self.is_promotion_rank(pc, to))
    }

    /// Move pieces for `mv` and update the placement-derived flags.
    ///
    /// Handles the castling rook, en-passant removal, promotion (queen when
    /// `mv.promo` is unset), the new en-passant target, castling rights and the
    /// king-square cache. It does not pass the turn.
    pub fn relocate(&mut self, mv: Move) -> AppliedMove {
        let piece = self.piece_at(mv.from).expect("no piece on from-square");
        let color = piece.color;
        let mut captured = self.piece_at(mv.to);
        let mut castle = None;
        let mut en_passant = false;

        if piece.kind == PieceKind::King && (mv.to.file() - mv.from.file()).abs() == 2 {
            let side = if mv.to.file() > mv.from.file() {
                CastleSide::King
            } else {
                CastleSide::Queen
            };
            let rank = mv.from.rank();
            let rook_from = Square::new(side.rook_file(), rank).expect("castling rook square");
            let rook_to = Square::new((mv.from.file() + mv.to.file()) / 2, rank).expect("castling rook target");
            let rook = self.cells[rook_from.index()].take();
            self.cells[rook_to.index()] = rook;
            castle = Some(side);
        }

        if piece.kind == PieceKind::Pawn && captured.is_none() && self.en_passant == Some(mv.to) {
            let victim = Square::new(mv.to.file(), mv.from.rank()).expect("en-passant victim square");
            captured = self.cells[victim.index()].take();
            en_passant = true;
        }

        self.cells[mv.from.index()] = None;
        let placed = if self.is_promotion_rank(piece, mv.to) {
            Piece::new(color, mv.promo.unwrap_or(PieceKind::Queen))
        } else {
            piece
        };
        self.cells[mv.to.index()] = Some(placed);
        if piece.kind == PieceKind::King {
            self.king_squares[color.idx()] = mv.to;
        }

        self.en_passant = if piece.kind == PieceKind::Pawn && (mv.to.rank() - mv.from.rank()).abs() == 2 {
            Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2)
        } else {
            None
        };

        if piece.kind == PieceKind::King {
            self.castling.revoke(color, CastleSide::King);
            self.castling.revoke(color, CastleSide::Queen);
        }
        if piece.kind == PieceKind::Rook {
            self.revoke_corner(color, mv.from);
        }
        if let Some(cp) = captured
            && cp.kind == PieceKind::Rook
        {
            self.revoke_corner(cp.color, mv.to);
        }

        AppliedMove {
            mv,
            piece,
            captured,
            castle,
            en_passant,
        }
    }

    /// Whether `mv` by the side to move would leave its own king attacked.
    pub fn leaves_king_in_check(&self, mv: Move) -> bool {
        let mover = self.side_to_move;
        let mut sim = *self;
        sim.relocate(mv);
        sim.in_check(mover)
    }

    /// Piece placement field of FEN, which doubles as the placement key for
    /// repetition tracking.
    pub fn placement(&self) -> String {
        let mut s = String::with_capacity(72);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(pc) => {
                        if empty > 0 {
                            let _ = write!(s, "{empty}");
                            empty = 0;
                        }
                        s.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(s, "{empty}");
            }
            if rank > 0 {
                s.push('/');
            }
        }
        s
    }

    /// Placement, side to move, castling rights and en-passant target: the
    /// fields that make two positions "the same" for repetition.
    pub fn signature(&self) -> String {
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let ep = self.en_passant.map_or_else(|| "-".to_string(), |sq| sq.to_string());
        format!("{} {} {} {}", self.placement(), side, self.castling.fen_field(), ep)
    }

    fn is_promotion_rank(&self, piece: Piece, to: Square) -> bool {
        piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank()
    }

    fn revoke_corner(&mut self, c: Color, sq: Square) {
        if sq.rank() != c.back_rank() {
            return;
        }
        for side in [CastleSide::King, CastleSide::Queen] {
            if sq.file() == side.rook_file() {
                self.castling.revoke(c, side);
            }
        }
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
