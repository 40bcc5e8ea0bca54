use duopuzzle_core::pool::{POOL_BASE_Z, POOL_MAX_X, POOL_MAX_Y};
use duopuzzle_core::{generate, layout_pool, Session, Side};

#[test]
fn correct_positions_form_a_permutation() {
    for (rows, cols) in [(1, 1), (2, 2), (3, 3), (4, 6), (7, 5)] {
        let (pieces, grid) = generate(rows, cols, rows as u32 * 31 + cols as u32);
        let total = rows * cols;
        assert_eq!(pieces.len(), total);
        assert_eq!(grid.len(), total);
        assert_eq!(grid.occupied(), 0);
        let mut positions: Vec<usize> = pieces.iter().map(|p| p.correct_position).collect();
        positions.sort_unstable();
        assert_eq!(positions, (0..total).collect::<Vec<_>>());
        for piece in &pieces {
            assert_eq!(piece.id.index(), piece.correct_position);
            assert!(!piece.is_placed);
        }
    }
}

#[test]
fn same_seed_reproduces_the_puzzle() {
    let (a, _) = generate(4, 4, 1234);
    let (b, _) = generate(4, 4, 1234);
    assert_eq!(a, b);
    let (c, _) = generate(4, 4, 4321);
    assert_ne!(a, c);
}

#[test]
fn both_sides_appear_in_large_puzzles() {
    let (pieces, _) = generate(8, 8, 99);
    let fronts = pieces.iter().filter(|p| p.current_side == Side::Front).count();
    assert!(fronts > 10 && fronts < 54, "fronts = {fronts}");
}

#[test]
fn pool_layout_stays_inside_visible_area() {
    let (mut pieces, _) = generate(6, 5, 8);
    layout_pool(&mut pieces, 8);
    for piece in &pieces {
        assert!((0.0..=POOL_MAX_X).contains(&piece.pool_x));
        assert!((0.0..=POOL_MAX_Y).contains(&piece.pool_y));
        assert_eq!(piece.z_index, POOL_BASE_Z);
    }
}

#[test]
fn pool_layout_jitters_around_slot_bases() {
    let (mut pieces, _) = generate(3, 3, 21);
    layout_pool(&mut pieces, 21);
    // slot 3: second row, right column
    let piece = &pieces[3];
    assert!((piece.pool_x - 0.48).abs() <= 0.04 + 1e-6);
    assert!((piece.pool_y - 0.14).abs() <= 0.04 + 1e-6);
}

#[test]
fn session_keeps_presentation_order() {
    let session = Session::new(3, 3, 42);
    let (shuffled, _) = generate(3, 3, 42);
    let order: Vec<_> = shuffled.iter().map(|p| p.id).collect();
    assert_eq!(session.pool_order(), order.as_slice());
    let listed: Vec<_> = session.pool_pieces().iter().map(|p| p.id).collect();
    assert_eq!(listed, order);
    for (index, piece) in session.pieces().iter().enumerate() {
        assert_eq!(piece.id.index(), index);
    }
}
