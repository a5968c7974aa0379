use super::*;
use crate::board::MoveStatus;

fn sq(label: &str) -> Square {
    label.parse().unwrap()
}

/// Play `mv` on a copy of `before` and return its notation.
fn san(before: &Board, mv: &str) -> String {
    let mv = crate::move_text::parse_move_text(mv).unwrap();
    let mut after = before.clone();
    let applied = match after.attempt_move(mv.from, mv.to, mv.promo).unwrap() {
        MoveStatus::Applied(applied) => applied,
        MoveStatus::PromotionPending { .. } => panic!("{mv} needs a promotion piece"),
    };
    notate(before, &after, &applied)
}

fn play(line: &str) -> Board {
    let mut board = Board::startpos();
    crate::move_text::apply_move_text(&mut board, line).unwrap();
    board
}

#[test]
fn test_pawn_and_piece_moves() {
    let start = Board::startpos();
    assert_eq!(san(&start, "e2e4"), "e4");
    assert_eq!(san(&start, "g1f3"), "Nf3");
}

#[test]
fn test_captures() {
    let b = play("e2e4 d7d5");
    assert_eq!(san(&b, "e4d5"), "exd5");

    let b = play("e2e4 d7d5 g1f3 c8g4");
    assert_eq!(san(&b, "f1b5"), "Bb5+");
    let b = play("e2e4 e7e5 g1f3 d7d6 f3e5");
    assert_eq!(san(&b, "d6e5"), "dxe5");
}

#[test]
fn test_en_passant_is_a_pawn_capture() {
    let b = play("e2e4 a7a6 e4e5 d7d5");
    assert_eq!(san(&b, "e5d6"), "exd6");
}

#[test]
fn test_castling() {
    let b = play("e2e4 e7e5 g1f3 b8c6 f1c4 g8f6");
    assert_eq!(san(&b, "e1g1"), "O-O");

    let b = Board::from_fen("r3k3/8/8/8/8/8/8/4K3 b q - 0 1").unwrap();
    assert_eq!(san(&b, "e8c8"), "O-O-O");
}

#[test]
fn test_promotion_suffixes() {
    let b = Board::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    assert_eq!(san(&b, "a7a8q"), "a8=Q");
    assert_eq!(san(&b, "a7a8r"), "a8=R");
    assert_eq!(san(&b, "a7a8b"), "a8=B");
    assert_eq!(san(&b, "a7a8n"), "a8=N");

    let b = Board::from_fen("1r5k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    assert_eq!(san(&b, "a7b8q"), "axb8=Q+");
}

#[test]
fn test_checkmate_suffix() {
    let b = play("f2f3 e7e5 g2g4");
    assert_eq!(san(&b, "d8h4"), "Qh4#");
}

#[test]
fn test_file_disambiguation() {
    let b = Board::from_fen("4k3/8/8/8/8/8/8/1N3NK1 w - - 0 1").unwrap();
    assert_eq!(san(&b, "b1d2"), "Nbd2");
    assert_eq!(san(&b, "f1d2"), "Nfd2");
    // Only one knight reaches c3.
    assert_eq!(san(&b, "b1c3"), "Nc3");
}

#[test]
fn test_rank_disambiguation() {
    let b = Board::from_fen("7k/8/8/N7/8/8/8/N6K w - - 0 1").unwrap();
    assert_eq!(san(&b, "a1b3"), "N1b3");
    assert_eq!(san(&b, "a5b3"), "N5b3");
}

#[test]
fn test_file_and_rank_disambiguation() {
    let b = Board::from_fen("8/7k/8/8/8/Q7/8/Q1Q4K w - - 0 1").unwrap();
    assert_eq!(san(&b, "a1b2"), "Qa1b2");
}

#[test]
fn test_pinned_rival_needs_no_disambiguation() {
    // The d1 rook could reach d4 but is pinned to its king by the queen on h1.
    let b = Board::from_fen("7k/8/8/8/R7/8/8/1K1R3q w - - 0 1").unwrap();
    assert!(!b.is_legal(sq("d1"), sq("d4")));
    assert!(crate::pieces::pseudo_legal_moves(b.position(), sq("d1")).contains(&sq("d4")));
    assert_eq!(san(&b, "a4d4"), "Rd4");
}

#[test]
fn test_move_log_pairs() {
    let mut log = MoveLog::new();
    assert!(log.is_empty());
    for m in ["e4", "e5", "Nf3"] {
        log.push(m.to_string());
    }
    assert_eq!(log.len(), 3);
    assert_eq!(log.last(), Some("Nf3"));
    assert_eq!(log.lines(), vec!["1. e4 e5", "2. Nf3"]);
    assert_eq!(log.to_string(), "1. e4 e5\n2. Nf3");
}

#[test]
fn test_move_log_black_first() {
    let mut log = MoveLog::starting_at(5, Color::Black);
    log.push("e5".to_string());
    log.push("Nf3".to_string());
    log.push("Nc6".to_string());
    assert_eq!(log.lines(), vec!["5... e5", "6. Nf3 Nc6"]);
}
