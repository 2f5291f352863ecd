use super::*;

#[test]
fn test_mark_opponent() {
    assert_eq!(Mark::X.opponent(), Mark::O);
    assert_eq!(Mark::O.opponent(), Mark::X);
    assert_eq!(Mark::Empty.opponent(), Mark::Empty);
}

#[test]
fn test_mark_ids() {
    assert_eq!(Mark::from_id(1), Some(Mark::X));
    assert_eq!(Mark::from_id(2), Some(Mark::O));
    assert_eq!(Mark::from_id(0), None);
    assert_eq!(Mark::from_id(3), None);
    assert_eq!(Mark::X.id(), 1);
    assert_eq!(Mark::O.id(), 2);
    assert_eq!(Mark::Empty.id(), 0);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(7, 7);
    assert_eq!(pos.to_index(15), 7 * 15 + 7);
    assert_eq!(Pos::from_index(15, 112), pos);
}

#[test]
fn test_pos_ordering() {
    assert!(Pos::new(0, 0) < Pos::new(0, 1));
    assert!(Pos::new(0, 1) < Pos::new(1, 0));
}

#[test]
fn test_new_clamps_invalid_size() {
    assert_eq!(Board::new(14).size(), DEFAULT_SIZE);
    assert_eq!(Board::new(101).size(), DEFAULT_SIZE);
    assert_eq!(Board::new(-3).size(), DEFAULT_SIZE);
    assert_eq!(Board::new(25).size(), 25);
}

#[test]
fn test_try_new_rejects_invalid_size() {
    assert_eq!(Board::try_new(14).unwrap_err(), BoardError::InvalidSize(14));
    assert_eq!(
        Board::try_new(101).unwrap_err(),
        BoardError::InvalidSize(101)
    );
    assert!(Board::try_new(15).is_ok());
    assert!(Board::try_new(100).is_ok());
}

#[test]
fn test_make_move_basic() {
    let mut board = Board::new(15);
    assert!(board.make_move(7, 7, Mark::X));
    assert_eq!(board.cell(7, 7), Some(Mark::X));
    assert_eq!(board.move_count(), 1);
    assert_eq!(
        board.last_move(),
        Some(PlacedMove {
            pos: Pos::new(7, 7),
            mark: Mark::X
        })
    );
}

#[test]
fn test_make_move_rejections() {
    let mut board = Board::new(15);
    assert!(board.make_move(7, 7, Mark::X));

    // occupied cell
    assert!(!board.make_move(7, 7, Mark::O));
    // out of bounds
    assert!(!board.make_move(-1, 7, Mark::O));
    assert!(!board.make_move(7, 15, Mark::O));
    // not a player mark
    assert!(!board.make_move(8, 8, Mark::Empty));

    // no mutation happened
    assert_eq!(board.move_count(), 1);
    assert!(board.validate_state());
}

#[test]
fn test_cell_out_of_bounds_sentinel() {
    let board = Board::new(15);
    assert_eq!(board.cell(0, 0), Some(Mark::Empty));
    assert_eq!(board.cell(-1, 0), None);
    assert_eq!(board.cell(15, 0), None);
}

#[test]
fn test_undo_restores_exact_state() {
    let mut board = Board::new(15);
    board.make_move(7, 7, Mark::X);
    board.make_move(7, 8, Mark::O);

    let grid_before = board.grid().clone();
    let occupied_before: std::collections::HashSet<Pos> = board.occupied_cells().collect();
    let regions_before = board.active_regions().clone();
    let count_before = board.move_count();

    assert!(board.make_move(8, 8, Mark::X));
    assert!(board.undo_last_move());

    assert_eq!(board.grid(), &grid_before);
    assert_eq!(
        board.occupied_cells().collect::<std::collections::HashSet<_>>(),
        occupied_before
    );
    assert_eq!(board.active_regions(), &regions_before);
    assert_eq!(board.move_count(), count_before);
    assert_eq!(
        board.last_move(),
        Some(PlacedMove {
            pos: Pos::new(7, 8),
            mark: Mark::O
        })
    );
    assert!(board.validate_state());
}

#[test]
fn test_undo_empty_history_fails() {
    let mut board = Board::new(15);
    assert!(!board.undo_last_move());
}

#[test]
fn test_undo_moves_batch() {
    let mut board = Board::new(15);
    board.make_move(7, 7, Mark::X);
    board.make_move(7, 8, Mark::O);
    board.make_move(7, 9, Mark::X);

    assert!(board.undo_moves(2));
    assert_eq!(board.move_count(), 1);
    assert_eq!(board.cell(7, 7), Some(Mark::X));
    assert_eq!(board.cell(7, 8), Some(Mark::Empty));

    // more undos than moves: fails after draining
    assert!(!board.undo_moves(5));
    assert_eq!(board.move_count(), 0);
}

#[test]
fn test_undo_deactivates_region() {
    let mut board = Board::new(30);
    board.make_move(25, 25, Mark::X);
    assert!(!board.active_regions().is_empty());

    board.undo_last_move();
    assert!(
        board.active_regions().is_empty(),
        "no stone maps any region as neighbor after undo"
    );
}

#[test]
fn test_active_regions_cover_neighbors() {
    let mut board = Board::new(30);
    board.make_move(15, 15, Mark::X);

    // own tile (1,1) plus all 8 neighbors
    let key = |r: u64, c: u64| (r << 32) | c;
    for r in 0..=2u64 {
        for c in 0..=2u64 {
            assert!(
                board.active_regions().contains(&key(r, c)),
                "region ({r},{c}) should be active"
            );
        }
    }
}

#[test]
fn test_resize_preserves_overlap() {
    let mut board = Board::new(15);
    board.make_move(0, 0, Mark::X);
    board.make_move(14, 14, Mark::O);
    board.make_move(7, 7, Mark::X);

    assert!(board.resize(25).is_ok());
    assert_eq!(board.size(), 25);
    assert_eq!(board.cell(0, 0), Some(Mark::X));
    assert_eq!(board.cell(14, 14), Some(Mark::O));
    assert_eq!(board.cell(7, 7), Some(Mark::X));
    assert_eq!(board.move_count(), 3);
    assert!(board.validate_state());
}

#[test]
fn test_resize_drops_out_of_range_stones() {
    let mut board = Board::new(25);
    board.make_move(20, 20, Mark::X);
    board.make_move(5, 5, Mark::O);

    assert!(board.resize(15).is_ok());
    assert_eq!(board.size(), 15);
    assert_eq!(board.cell(5, 5), Some(Mark::O));
    assert_eq!(board.move_count(), 1);
    assert_eq!(board.occupied_cells().count(), 1);
    assert!(board.validate_state());
}

#[test]
fn test_resize_invalid_leaves_board_untouched() {
    let mut board = Board::new(15);
    board.make_move(7, 7, Mark::X);

    assert_eq!(board.resize(200), Err(BoardError::InvalidSize(200)));
    assert_eq!(board.size(), 15);
    assert_eq!(board.cell(7, 7), Some(Mark::X));
    assert!(board.validate_state());
}

#[test]
fn test_reset() {
    let mut board = Board::new(15);
    board.make_move(7, 7, Mark::X);
    board.reset();

    assert!(board.is_empty());
    assert_eq!(board.move_count(), 0);
    assert!(board.last_move().is_none());
    assert!(board.active_regions().is_empty());
    assert!(board.validate_state());
}

#[test]
fn test_reset_with_new_size() {
    let mut board = Board::new(15);
    board.make_move(7, 7, Mark::X);

    assert!(board.reset_with(20).is_ok());
    assert_eq!(board.size(), 20);
    assert!(board.is_empty());
}

#[test]
fn test_neighbor_cells_radius() {
    let mut board = Board::new(15);
    board.make_move(7, 7, Mark::X);

    let neighbors = board.neighbor_cells(7, 7, 2);
    // 5x5 window minus the occupied origin
    assert_eq!(neighbors.len(), 24);
    assert!(!neighbors.contains(&Pos::new(7, 7)));

    // corner: window is clamped
    let corner = board.neighbor_cells(0, 0, 2);
    assert_eq!(corner.len(), 8);
}

#[test]
fn test_neighbor_cells_skip_occupied() {
    let mut board = Board::new(15);
    board.make_move(7, 7, Mark::X);
    board.make_move(7, 8, Mark::O);

    let neighbors = board.neighbor_cells(7, 7, 1);
    assert!(!neighbors.contains(&Pos::new(7, 8)));
    assert_eq!(neighbors.len(), 7);
}

#[test]
fn test_active_bounds() {
    let mut board = Board::new(15);
    assert_eq!(board.active_bounds(), (Pos::new(7, 7), Pos::new(7, 7)));

    board.make_move(3, 10, Mark::X);
    board.make_move(9, 2, Mark::O);
    assert_eq!(board.active_bounds(), (Pos::new(3, 2), Pos::new(9, 10)));
}

#[test]
fn test_from_grid_rebuilds_indices() {
    let mut source = Board::new(15);
    source.make_move(7, 7, Mark::X);
    source.make_move(8, 8, Mark::O);

    let scratch = Board::from_grid(source.grid());
    assert_eq!(scratch.move_count(), 2);
    assert_eq!(scratch.cell(7, 7), Some(Mark::X));
    assert_eq!(scratch.active_regions(), source.active_regions());
    assert!(scratch.validate_state());

    // moves on the scratch undo cleanly back to the snapshot
    let mut scratch = scratch;
    scratch.make_move(9, 9, Mark::X);
    scratch.undo_last_move();
    assert_eq!(scratch.grid(), source.grid());
}

#[test]
fn test_occupancy_rate() {
    let mut board = Board::new(15);
    assert_eq!(board.occupancy_rate(), 0.0);
    board.make_move(7, 7, Mark::X);
    let expected = 1.0 / 225.0;
    assert!((board.occupancy_rate() - expected).abs() < 1e-12);
}
