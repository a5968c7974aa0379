use super::*;

fn sq(label: &str) -> Square {
    label.parse().unwrap()
}

#[test]
fn test_startpos_fen_round_trip() {
    let board = Board::startpos();
    assert_eq!(board.to_fen(), STARTPOS_FEN);
    assert_eq!(Board::from_fen(STARTPOS_FEN).unwrap().to_fen(), STARTPOS_FEN);

    let kiwipete = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    assert_eq!(Board::from_fen(kiwipete).unwrap().to_fen(), kiwipete);
}

#[test]
fn test_fen_clock_fields_are_optional() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
    assert_eq!(board.halfmove_clock(), 0);
    assert_eq!(board.fullmove_number(), 1);
    assert_eq!(board.side_to_move(), Color::Black);
}

#[test]
fn test_invalid_fen_rejected() {
    for fen in [
        "",
        "8/8/8/8/8/8/8/8 w - - 0 1",                    // no kings
        "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",               // two white kings
        "4k3/8/8/8/8/8/4K3 w - - 0 1",                  // seven ranks
        "4k3/8/8/8/8/8/8/4K4 w - - 0 1",                // nine files
        "4k3/8/8/8/8/8/8/4X3 w - - 0 1",                // unknown piece
        "4k3/8/8/8/8/8/8/4K3 x - - 0 1",                // bad side
        "4k3/8/8/8/8/8/8/4K3 w KX - 0 1",               // bad castling
        "4k3/8/8/8/8/8/8/4K3 w - e9 0 1",               // bad en passant
        "4k3/8/8/8/8/8/8/4K3 w - - x 1",                // bad clock
    ] {
        assert!(
            matches!(Board::from_fen(fen), Err(ChessError::InvalidFen(_))),
            "{fen:?} should be rejected"
        );
    }
}

#[test]
fn test_side_not_to_move_may_not_be_in_check() {
    // White rook gives check but it is white's turn.
    let err = Board::from_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1").unwrap_err();
    assert!(matches!(err, ChessError::InvalidFen(_)));
    assert!(Board::from_fen("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").is_ok());
}

#[test]
fn test_en_passant_field_needs_a_double_pushed_pawn() {
    for fen in [
        "4k3/8/8/8/8/8/Kp6/8 b - a1 0 1",        // back rank
        "4k3/8/8/3pP3/8/8/8/4K3 w - d3 0 1",     // wrong rank for white to move
        "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1",      // no pawn in front
        "4k3/8/8/3PP3/8/8/8/4K3 w - d6 0 1",     // pawn of the wrong colour
        "4k3/3p4/8/3pP3/8/8/8/4K3 w - d6 0 1",   // origin square occupied
        "4k3/8/3n4/3pP3/8/8/8/4K3 w - d6 0 1",   // target occupied
    ] {
        assert!(
            matches!(Board::from_fen(fen), Err(ChessError::InvalidFen(_))),
            "{fen:?} should be rejected"
        );
    }

    let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    assert_eq!(board.en_passant(), Some(sq("d6")));
    let board = Board::from_fen("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1").unwrap();
    assert!(board.is_legal(sq("e4"), sq("d3")));
}

#[test]
fn test_bogus_en_passant_cannot_capture_a_king() {
    assert!(Board::from_fen("4k3/8/8/8/8/8/Kp6/8 b - a1 0 1").is_err());

    let mut board = Board::from_fen("4k3/8/8/8/8/8/Kp6/8 b - - 0 1").unwrap();
    assert!(!board.is_legal(sq("b2"), sq("a1")));
    board.apply_move(Move::with_promotion(sq("b2"), sq("b1"), PieceKind::Queen));
    assert_eq!(board.king_square(Color::White), sq("a2"));
    assert!(board.in_check(Color::White));
}

#[test]
fn test_clocks_saturate_at_extreme_fen_values() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 4294967295").unwrap();
    board.attempt_move(sq("e8"), sq("d8"), None).unwrap();
    assert_eq!(board.fullmove_number(), u32::MAX);
    assert_eq!(board.halfmove_clock(), 1);

    let mut board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 4294967295 9").unwrap();
    assert!(board.is_legal(sq("e1"), sq("d1")));
    board.apply_move(Move::new(sq("e1"), sq("d1")));
    assert_eq!(board.halfmove_clock(), u32::MAX);
}

#[test]
fn test_illegal_move_leaves_board_unchanged() {
    let mut board = Board::startpos();
    let before = board.to_fen();

    let err = board.attempt_move(sq("e2"), sq("e5"), None).unwrap_err();
    assert_eq!(err, ChessError::IllegalMove { from: sq("e2"), to: sq("e5") });
    // Moving the opponent's piece is just as illegal.
    assert!(board.attempt_move(sq("e7"), sq("e5"), None).is_err());
    // So is moving from an empty square.
    assert!(board.attempt_move(sq("e4"), sq("e5"), None).is_err());

    assert_eq!(board.to_fen(), before);
}

#[test]
fn test_promotion_pending_then_applied() {
    let mut board = Board::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let before = board.to_fen();

    let status = board.attempt_move(sq("a7"), sq("a8"), None).unwrap();
    assert_eq!(status, MoveStatus::PromotionPending { from: sq("a7"), to: sq("a8") });
    assert_eq!(board.to_fen(), before);

    assert_eq!(
        board.attempt_move(sq("a7"), sq("a8"), Some(PieceKind::King)),
        Err(ChessError::InvalidPromotion(PieceKind::King))
    );
    assert_eq!(
        board.attempt_move(sq("a7"), sq("a8"), Some(PieceKind::Pawn)),
        Err(ChessError::InvalidPromotion(PieceKind::Pawn))
    );
    assert_eq!(board.to_fen(), before);

    let applied = board
        .attempt_move(sq("a7"), sq("a8"), Some(PieceKind::Rook))
        .unwrap()
        .applied()
        .unwrap();
    assert_eq!(applied.mv.promo, Some(PieceKind::Rook));
    assert_eq!(board.piece_at(sq("a8")), Some(Piece::new(Color::White, PieceKind::Rook)));
}

#[test]
fn test_promotion_piece_on_ordinary_move_rejected() {
    let mut board = Board::startpos();
    assert_eq!(
        board.attempt_move(sq("e2"), sq("e4"), Some(PieceKind::Queen)),
        Err(ChessError::UnexpectedPromotion { from: sq("e2"), to: sq("e4") })
    );
}

#[test]
fn test_clocks_advance() {
    let mut board = Board::startpos();
    board.apply_move(Move::new(sq("g1"), sq("f3")));
    assert_eq!(board.halfmove_clock(), 1);
    assert_eq!(board.fullmove_number(), 1);

    board.apply_move(Move::new(sq("e7"), sq("e5")));
    assert_eq!(board.halfmove_clock(), 0);
    assert_eq!(board.fullmove_number(), 2);

    board.apply_move(Move::new(sq("f3"), sq("e5")));
    assert_eq!(board.halfmove_clock(), 0);
    assert_eq!(board.side_to_move(), Color::Black);
}

#[test]
fn test_position_counts_track_repeats() {
    let mut board = Board::startpos();
    let start = board.signature();
    assert_eq!(board.position_count(&start), 1);

    for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        board.apply_move(crate::move_text::parse_move_text(mv).unwrap());
    }
    assert_eq!(board.position_count(&start), 2);
    assert_eq!(board.signature(), start);
}

#[test]
fn test_legal_cache_is_rebuilt_for_new_side() {
    let mut board = Board::startpos();
    board.apply_move(Move::new(sq("e2"), sq("e4")));
    assert!(board.legal_moves().keys().all(|&from| board.piece_at(from).unwrap().color == Color::Black));
    assert_eq!(board.legal_moves().len(), 16);
    assert_eq!(board.legal_move_list().len(), 20);
}

#[test]
fn test_clones_are_independent() {
    let board = Board::startpos();
    let mut copy = board.clone();
    copy.apply_move(Move::new(sq("d2"), sq("d4")));

    assert_eq!(board.to_fen(), STARTPOS_FEN);
    assert_eq!(board.piece_at(sq("d2")), Some(Piece::new(Color::White, PieceKind::Pawn)));
    assert_eq!(copy.piece_at(sq("d4")), Some(Piece::new(Color::White, PieceKind::Pawn)));
}

#[test]
fn test_game_over_rejects_moves() {
    // Fool's mate: white is checkmated.
    let mut board = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    assert_eq!(board.attempt_move(sq("a2"), sq("a3"), None), Err(ChessError::GameOver));
}
