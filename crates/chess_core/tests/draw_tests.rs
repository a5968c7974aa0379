//! Tests for draw detection
//!
//! Covers every draw condition:
//! - Stalemate
//! - Fifty-move rule
//! - Threefold repetition
//! - Insufficient material

use chess_core::{Board, Color, GameOutcome, PieceKind, apply_move_text};

fn board(fen: &str) -> Board {
    Board::from_fen(fen).expect("test FEN should parse")
}

// =============================================================================
// Stalemate Tests
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    // Black king on a8, white queen on b6, white king on c7
    let pos = board("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");

    assert!(pos.legal_move_list().is_empty(), "Stalemate position should have no legal moves");
    assert!(!pos.in_check(Color::Black), "Stalemate means king is not in check");
    assert!(pos.is_stalemate(Color::Black));
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    // White king on g6, white pawn on g7, black king on g8
    let pos = board("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");

    assert!(pos.legal_move_list().is_empty(), "Stalemate position should have no legal moves");
    assert!(pos.legal_moves().values().all(Vec::is_empty));
    assert_eq!(pos.outcome(), GameOutcome::Stalemate);
}

// =============================================================================
// Fifty-Move Rule Tests
// =============================================================================

#[test]
fn test_fifty_move_rule_at_100_halfmoves() {
    let pos = board("8/8/8/4k3/8/4K3/8/8 w - - 100 60");
    assert!(pos.is_fifty_move_draw(), "Position with halfmove_clock=100 should be a draw");
}

#[test]
fn test_fifty_move_rule_at_99_halfmoves() {
    let pos = board("8/8/8/4k3/8/4K3/8/8 w - - 99 60");
    assert!(!pos.is_fifty_move_draw(), "Position with halfmove_clock=99 should not be a draw yet");
}

#[test]
fn test_fifty_move_rule_reached_by_quiet_move() {
    let mut pos = board("8/8/8/4k3/8/3K4/4P3/R7 w - - 99 60");
    apply_move_text(&mut pos, "a1a2").unwrap();
    assert_eq!(pos.halfmove_clock(), 100);
    assert_eq!(pos.outcome(), GameOutcome::DrawFiftyMove);
}

#[test]
fn test_fifty_move_rule_reset_on_pawn_move() {
    let mut pos = board("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");

    let pawn_move = pos
        .legal_move_list()
        .into_iter()
        .find(|m| pos.piece_at(m.from).is_some_and(|p| p.kind == PieceKind::Pawn))
        .expect("Should have a pawn move available");
    pos.apply_move(pawn_move);

    assert!(!pos.is_fifty_move_draw(), "Pawn move should reset halfmove clock");
    assert_eq!(pos.halfmove_clock(), 0, "Halfmove clock should be 0 after pawn move");
}

// =============================================================================
// Insufficient Material Tests
// =============================================================================

#[test]
fn test_insufficient_material_king_vs_king() {
    let pos = board("8/8/8/4k3/8/4K3/8/8 w - - 0 1");
    assert!(pos.is_insufficient_material(), "King vs King is insufficient material");
    assert_eq!(pos.outcome(), GameOutcome::DrawInsufficientMaterial);
}

#[test]
fn test_insufficient_material_king_bishop_vs_king() {
    let pos = board("8/8/8/4k3/8/4KB2/8/8 w - - 0 1");
    assert!(pos.is_insufficient_material(), "King + Bishop vs King is insufficient material");
}

#[test]
fn test_insufficient_material_king_knight_vs_king() {
    let pos = board("8/8/8/4k3/8/4K3/8/6N1 w - - 0 1");
    assert!(pos.is_insufficient_material(), "King + Knight vs King is insufficient material");
}

#[test]
fn test_insufficient_material_king_vs_king_bishop() {
    let pos = board("8/8/4b3/4k3/8/4K3/8/8 w - - 0 1");
    assert!(pos.is_insufficient_material(), "King vs King + Bishop is insufficient material");
}

#[test]
fn test_insufficient_material_same_color_bishops() {
    // c1 and f8 are both dark squares
    let pos = board("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1");
    assert!(
        pos.is_insufficient_material(),
        "K+B vs K+B with same color bishops is insufficient material"
    );
}

#[test]
fn test_sufficient_material_opposite_color_bishops() {
    // White bishop on c1 (dark), black bishop on c8 (light)
    let pos = board("2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1");
    assert!(
        !pos.is_insufficient_material(),
        "K+B vs K+B with opposite color bishops is sufficient material (mate is possible)"
    );
}

#[test]
fn test_sufficient_material_with_pawn() {
    let pos = board("8/8/8/4k3/8/4K3/4P3/8 w - - 0 1");
    assert!(!pos.is_insufficient_material(), "King + Pawn vs King is sufficient material");
}

#[test]
fn test_sufficient_material_with_rook() {
    let pos = board("8/8/8/4k3/8/4K3/8/4R3 w - - 0 1");
    assert!(!pos.is_insufficient_material(), "King + Rook vs King is sufficient material");
}

#[test]
fn test_sufficient_material_with_queen() {
    let pos = board("8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1");
    assert!(!pos.is_insufficient_material(), "King + Queen vs King is sufficient material");
}

#[test]
fn test_sufficient_material_two_knights() {
    let pos = board("8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1");
    assert!(
        !pos.is_insufficient_material(),
        "King + 2 Knights vs King is sufficient material (can't force mate but position isn't drawn)"
    );
}

// =============================================================================
// Repetition Signature Tests
// =============================================================================

#[test]
fn test_signature_same_position() {
    assert_eq!(Board::startpos().signature(), Board::startpos().signature());
}

#[test]
fn test_signature_different_side_to_move() {
    let pos1 = board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let pos2 = board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
    assert_ne!(pos1.signature(), pos2.signature());
    assert_eq!(pos1.placement(), pos2.placement());
}

#[test]
fn test_signature_different_castling_rights() {
    let pos1 = board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let pos2 = board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1");
    assert_ne!(pos1.signature(), pos2.signature());
}

#[test]
fn test_signature_different_en_passant() {
    let pos1 = board("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    let pos2 = board("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
    assert_ne!(pos1.signature(), pos2.signature());
}

#[test]
fn test_signature_ignores_clocks() {
    let pos1 = board("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let pos2 = board("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 6 5");
    assert_eq!(pos1.signature(), pos2.signature());
}

#[test]
fn test_threefold_repetition_detection() {
    // 1.e4 e5 2.Nf3 Nc6, then shuffle both knights home and back twice.
    let mut pos = Board::startpos();
    apply_move_text(&mut pos, "e2e4 e7e5 g1f3 b8c6").unwrap();
    let key = pos.signature();
    assert_eq!(pos.position_count(&key), 1);

    apply_move_text(&mut pos, "f3g1 c6b8 g1f3 b8c6").unwrap();
    assert_eq!(pos.position_count(&key), 2);
    assert!(!pos.is_threefold_repetition());

    apply_move_text(&mut pos, "f3g1 c6b8 g1f3 b8c6").unwrap();
    assert_eq!(pos.position_count(&key), 3, "Position should appear three times");
    assert!(pos.is_threefold_repetition());
    assert!(pos.is_draw());
}

#[test]
fn test_double_push_position_differs_from_later_repeat() {
    // After 1.e4 the en-passant target is set; the same placement later is not the same position.
    let mut pos = Board::startpos();
    apply_move_text(&mut pos, "e2e4").unwrap();
    let with_ep = pos.signature();
    apply_move_text(&mut pos, "g8f6 g1f3 f6g8 f3g1").unwrap();
    assert_eq!(pos.placement(), with_ep.split(' ').next().unwrap());
    assert_ne!(pos.signature(), with_ep);
}

// =============================================================================
// Not a draw
// =============================================================================

#[test]
fn test_checkmate_is_not_stalemate() {
    // Scholar's mate
    let pos = board("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");

    assert!(pos.legal_move_list().is_empty(), "Checkmate position should have no legal moves");
    assert!(pos.in_check(Color::Black), "Checkmate means king IS in check");
    assert!(pos.is_checkmate(Color::Black));
    assert!(!pos.is_draw());
}

#[test]
fn test_check_is_not_checkmate() {
    let pos = board("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");

    assert!(!pos.legal_move_list().is_empty(), "Check position should have legal moves");
    assert!(pos.in_check(Color::Black), "Black king should be in check");
    assert!(!pos.is_checkmate(Color::Black));
}
