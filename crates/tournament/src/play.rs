//! Human against engine over a line-based text interface.

use std::io::{self, BufRead, Write};

use chess_core::{Board, ChessError, Color, Engine, Game, MoveStatus, PieceKind, SearchLimits, Square};
use tracing::debug;

/// ASCII diagram of `board`, rank 8 at the top.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..8 {
            let piece = Square::new(file, rank).and_then(|sq| board.piece_at(sq));
            out.push(' ');
            out.push(piece.map_or('.', |p| p.fen_char()));
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out
}

/// What the human typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move {
        from: String,
        to: String,
        promo: Option<PieceKind>,
    },
    Moves,
    Log,
    Fen,
    Help,
    Quit,
}

/// Parse `e2e4`, `e2 e4`, `e7e8q` or one of the command words.
///
/// Square labels are handed on unchecked so the board reports bad ones.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["quit" | "exit" | "resign"] => Ok(Command::Quit),
        ["moves"] => Ok(Command::Moves),
        ["log"] => Ok(Command::Log),
        ["fen"] => Ok(Command::Fen),
        ["help" | "?"] => Ok(Command::Help),
        [from, to] => Ok(Command::Move {
            from: from.to_string(),
            to: to.to_string(),
            promo: None,
        }),
        [text] if text.is_ascii() && (4..=5).contains(&text.len()) => {
            let promo = match text[4..].chars().next() {
                None => None,
                Some(c) => Some(PieceKind::from_letter(c).ok_or_else(|| format!("unknown piece `{c}`"))?),
            };
            Ok(Command::Move {
                from: text[..2].to_string(),
                to: text[2..4].to_string(),
                promo,
            })
        }
        [] => Err("enter a move such as e2e4".to_string()),
        _ => Err(format!("cannot read `{}`; type help", line.trim())),
    }
}

const HELP: &str = "Moves: e2e4, e2 e4 or e7e8q. Commands: moves, log, fen, help, quit.";

/// Alternate between the human (`human` side, reading `input`) and `engine`
/// until the game ends, the human quits, or input runs out.
pub fn play_session<R: BufRead, W: Write>(
    game: &mut Game,
    engine: &mut dyn Engine,
    human: Color,
    limits: impl Fn() -> SearchLimits,
    mut input: R,
    out: &mut W,
) -> io::Result<()> {
    let mut line = String::new();
    let mut read_line = |input: &mut R| -> io::Result<Option<String>> {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    };

    loop {
        let outcome = game.outcome();
        if outcome.is_terminal() {
            writeln!(out, "{}", render_board(game.board()))?;
            writeln!(out, "Game over: {outcome}")?;
            writeln!(out, "{}", game.log())?;
            return Ok(());
        }

        let side = game.board().side_to_move();
        if side != human {
            let search = engine.search(game.board(), limits());
            let Some(mv) = search.best_move else {
                writeln!(out, "{} has no move", engine.name())?;
                return Ok(());
            };
            debug!(%mv, iterations = search.iterations, score = search.score, "engine move");
            match game.play(mv) {
                Ok(record) => writeln!(out, "{} plays {}", engine.name(), record.san)?,
                Err(err) => {
                    writeln!(out, "{} played {mv}: {err}", engine.name())?;
                    return Ok(());
                }
            }
            continue;
        }

        write!(out, "{}\n{side} to move> ", render_board(game.board()))?;
        out.flush()?;
        let Some(text) = read_line(&mut input)? else {
            return Ok(());
        };

        let (from, to, mut promo) = match parse_command(&text) {
            Ok(Command::Move { from, to, promo }) => (from, to, promo),
            Ok(Command::Moves) => {
                let moves: Vec<String> = game.board().legal_move_list().iter().map(ToString::to_string).collect();
                writeln!(out, "{}", moves.join(" "))?;
                continue;
            }
            Ok(Command::Log) => {
                writeln!(out, "{}", game.log())?;
                continue;
            }
            Ok(Command::Fen) => {
                writeln!(out, "{}", game.board().to_fen())?;
                continue;
            }
            Ok(Command::Help) => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Ok(Command::Quit) => return Ok(()),
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };

        loop {
            match game.attempt_move(&from, &to, promo) {
                Ok(MoveStatus::Applied(record)) => {
                    writeln!(out, "You played {}", record.san)?;
                    break;
                }
                Ok(MoveStatus::PromotionPending { .. }) | Err(ChessError::InvalidPromotion(_)) => {
                    write!(out, "Promote to (q, r, b, n): ")?;
                    out.flush()?;
                    let Some(answer) = read_line(&mut input)? else {
                        return Ok(());
                    };
                    promo = answer.chars().next().and_then(PieceKind::from_letter);
                    if promo.is_none() {
                        writeln!(out, "unknown piece `{answer}`")?;
                    }
                }
                Err(err) => {
                    writeln!(out, "{err}")?;
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "play_tests.rs"]
mod play_tests;
