//! A game session: a board plus the notation log of every move played on it.

use crate::{
    board::{Board, MoveStatus},
    error::{ChessError, ChessResult},
    notation::{self, MoveLog},
    position::AppliedMove,
    rules::GameOutcome,
    types::*,
};

/// One move as played in a [`Game`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub applied: AppliedMove,
    pub san: String,
    /// Classification of the position the move produced.
    pub outcome: GameOutcome,
}

#[derive(Clone, Debug, Default)]
pub struct Game {
    board: Board,
    log: MoveLog,
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::startpos())
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Ok(Self::from_board(Board::from_fen(fen)?))
    }

    pub fn from_board(board: Board) -> Self {
        let log = MoveLog::starting_at(board.fullmove_number(), board.side_to_move());
        Game { board, log }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    pub fn outcome(&self) -> GameOutcome {
        self.board.outcome()
    }

    /// Attempt a move given as square labels such as `"e2"` and `"e4"`.
    ///
    /// Labels are validated before the board is consulted.
    pub fn attempt_move(
        &mut self,
        from: &str,
        to: &str,
        promo: Option<PieceKind>,
    ) -> ChessResult<MoveStatus<MoveRecord>> {
        let from: Square = from.parse()?;
        let to: Square = to.parse()?;
        self.attempt_squares(from, to, promo)
    }

    pub fn attempt_squares(
        &mut self,
        from: Square,
        to: Square,
        promo: Option<PieceKind>,
    ) -> ChessResult<MoveStatus<MoveRecord>> {
        let before = self.board.clone();
        let applied = match self.board.attempt_move(from, to, promo)? {
            MoveStatus::Applied(applied) => applied,
            MoveStatus::PromotionPending { from, to } => return Ok(MoveStatus::PromotionPending { from, to }),
        };

        let san = notation::notate(&before, &self.board, &applied);
        self.log.push(san.clone());
        let outcome = self.board.outcome();
        tracing::debug!(mv = %applied.mv, san = %san, outcome = %outcome, "move played");

        Ok(MoveStatus::Applied(MoveRecord { applied, san, outcome }))
    }

    /// Play a fully specified move, as produced by an engine.
    pub fn play(&mut self, mv: Move) -> ChessResult<MoveRecord> {
        match self.attempt_squares(mv.from, mv.to, mv.promo)? {
            MoveStatus::Applied(record) => Ok(record),
            // An engine move that reaches the last rank must name its piece.
            MoveStatus::PromotionPending { from, to } => Err(ChessError::IllegalMove { from, to }),
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
