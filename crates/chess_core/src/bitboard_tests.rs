use super::*;

fn sq(label: &str) -> Square {
    label.parse().unwrap()
}

#[test]
fn test_from_square() {
    assert_eq!(Bitboard::from_square(sq("a1")).0, 1);
    assert_eq!(Bitboard::from_square(sq("h1")).0, 128);
    assert_eq!(Bitboard::from_square(sq("h8")).0, 1 << 63);
}

#[test]
fn test_popcount() {
    assert_eq!(Bitboard::EMPTY.popcount(), 0);
    assert_eq!(Bitboard::from_square(sq("a1")).popcount(), 1);
    assert_eq!(Bitboard::LIGHT_SQUARES.popcount(), 32);
    assert_eq!(Bitboard::ALL.popcount(), 64);
}

#[test]
fn test_iterator_is_ascending() {
    let bb: Bitboard = [sq("d4"), sq("b1"), sq("h8")].into_iter().collect();
    let squares: Vec<Square> = bb.collect();
    assert_eq!(squares, vec![sq("b1"), sq("d4"), sq("h8")]);
}

#[test]
fn test_light_squares_agree_with_square() {
    for s in Square::all() {
        assert_eq!(Bitboard::LIGHT_SQUARES.contains(s), s.is_light(), "{s}");
    }
}

#[test]
fn test_insert_remove() {
    let mut bb = Bitboard::EMPTY;
    bb.insert(sq("e4"));
    assert!(bb.contains(sq("e4")));
    bb.remove(sq("e4"));
    assert!(bb.is_empty());
}
