use super::*;
use chess_core::{parse_move_text, Move, SearchResult};

struct ScriptedEngine {
    moves: Vec<Move>,
}

impl ScriptedEngine {
    fn new(line: &str) -> Self {
        let mut moves: Vec<Move> = line.split_whitespace().map(|m| parse_move_text(m).unwrap()).collect();
        moves.reverse();
        Self { moves }
    }
}

impl Engine for ScriptedEngine {
    fn search(&mut self, _board: &Board, _limits: SearchLimits) -> SearchResult {
        SearchResult {
            best_move: self.moves.pop(),
            ..SearchResult::none()
        }
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

fn run(game: &mut Game, engine_line: &str, human: Color, input: &str) -> String {
    let mut engine = ScriptedEngine::new(engine_line);
    let mut out = Vec::new();
    play_session(
        game,
        &mut engine,
        human,
        || SearchLimits::iterations(1),
        input.as_bytes(),
        &mut out,
    )
    .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_render_start_position() {
    let text = render_board(&Board::startpos());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "8  r n b q k b n r");
    assert_eq!(lines[4], "4  . . . . . . . .");
    assert_eq!(lines[7], "1  R N B Q K B N R");
    assert_eq!(lines[8], "   a b c d e f g h");
}

#[test]
fn test_parse_commands() {
    assert_eq!(
        parse_command("e2e4"),
        Ok(Command::Move { from: "e2".into(), to: "e4".into(), promo: None })
    );
    assert_eq!(
        parse_command(" e7 e8 "),
        Ok(Command::Move { from: "e7".into(), to: "e8".into(), promo: None })
    );
    assert_eq!(
        parse_command("e7e8n"),
        Ok(Command::Move { from: "e7".into(), to: "e8".into(), promo: Some(PieceKind::Knight) })
    );
    assert_eq!(parse_command("quit"), Ok(Command::Quit));
    assert_eq!(parse_command("moves"), Ok(Command::Moves));
    assert!(parse_command("").is_err());
    assert!(parse_command("e7e8x").is_err());
    assert!(parse_command("castle kingside now").is_err());
}

#[test]
fn test_human_loses_to_fools_mate() {
    let mut game = Game::new();
    let out = run(&mut game, "e7e5 d8h4", Color::White, "f2f3\ng2g4\n");

    assert!(out.contains("You played f3"));
    assert!(out.contains("Scripted plays Qh4#"));
    assert!(out.contains("Game over: white is checkmated, black wins"));
    assert!(out.contains("1. f3 e5\n2. g4 Qh4#"));
}

#[test]
fn test_bad_input_is_reported_and_retried() {
    let mut game = Game::new();
    let out = run(&mut game, "e7e5", Color::White, "e9e4\ne2e5\ne2e4\nquit\n");

    assert!(out.contains("invalid square `e9`"));
    assert!(out.contains("illegal move e2e5"));
    assert!(out.contains("You played e4"));
    assert!(out.contains("Scripted plays e5"));
    assert_eq!(game.log().len(), 2);
}

#[test]
fn test_promotion_prompt() {
    let mut game = Game::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let out = run(&mut game, "h7h6", Color::White, "a7a8\nx\nn\nquit\n");

    assert!(out.contains("Promote to (q, r, b, n): "));
    assert!(out.contains("unknown piece `x`"));
    assert!(out.contains("You played a8=N"));
    let a8: Square = "a8".parse().unwrap();
    assert_eq!(game.board().piece_at(a8).map(|p| p.kind), Some(PieceKind::Knight));
    assert_eq!(game.log().len(), 2);
}

#[test]
fn test_engine_moves_first_when_human_is_black() {
    let mut game = Game::new();
    let out = run(&mut game, "d2d4", Color::Black, "log\n");

    assert!(out.starts_with("Scripted plays d4"));
    assert!(out.contains("black to move> "));
    assert!(out.contains("1. d4"));
}
