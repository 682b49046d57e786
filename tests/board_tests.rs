//! Board scenarios driven only through the public command and query API

use polyfall::core::{Board, BoardConfig, Shape};
use polyfall::types::{Position, Rotation, ShapeId};

fn started(config: BoardConfig) -> Board {
    let mut board = Board::new(config).unwrap();
    board.reset();
    board
}

fn find(board: &Board, cells: &[(i32, i32)]) -> ShapeId {
    let cells: Vec<Position> = cells.iter().map(|&p| Position::from(p)).collect();
    let target = Shape::canonical(&cells);
    let index = board.shapes().iter().position(|s| *s == target).unwrap();
    ShapeId::from(index)
}

fn bar(board: &Board) -> ShapeId {
    find(board, &[(0, 0), (1, 0), (2, 0), (3, 0)])
}

fn square(board: &Board) -> ShapeId {
    find(board, &[(0, 0), (1, 0), (0, 1), (1, 1)])
}

fn visible_stack(board: &Board) -> usize {
    (0..board.height() as i32)
        .flat_map(|y| (0..board.width() as i32).map(move |x| (x, y)))
        .filter(|&(x, y)| board.shape_id(x, y).is_some())
        .count()
}

fn assert_piece_clear_of_stack(board: &Board) {
    for p in board.active_cells() {
        assert!(board.is_vacant(p.x, p.y), "active cell {:?} is stacked", p);
    }
}

/// Stand the bar up, walk it to `column` and hard drop it
fn drop_bar_at(board: &mut Board, column: i32) {
    assert!(board.spawn_with(bar(board)));
    board.rotate_clockwise();
    board.update(0.0);
    assert_eq!(board.active().unwrap().rotation, Rotation::East);

    for _ in 0..board.width() {
        let x = board.active().unwrap().x;
        if x == column {
            break;
        }
        if x > column {
            board.move_left();
        } else {
            board.move_right();
        }
        board.update(0.0);
    }
    assert_eq!(board.active().unwrap().x, column);
    board.land();
    board.update(0.0);
}

#[test]
fn test_four_bars_clear_four_rows_at_once() {
    let mut board = started(BoardConfig::new(4, 6, vec![4]));
    for column in [1, 0, 2] {
        drop_bar_at(&mut board, column);
        assert!(board.erased_rows().is_empty());
        assert_piece_clear_of_stack(&board);
    }
    assert_eq!(visible_stack(&board), 12);

    drop_bar_at(&mut board, 3);
    assert_eq!(board.erased_rows(), &[0, 1, 2, 3]);
    assert_eq!(visible_stack(&board), 0);
    assert_eq!(board.rows_cleared(), 4);
}

#[test]
fn test_squares_side_by_side_clear_two_rows() {
    let mut board = started(BoardConfig::new(4, 6, vec![4]));
    let o = square(&board);

    assert!(board.spawn_with(o));
    board.move_left();
    board.update(0.0);
    board.land();
    board.update(0.0);
    assert_eq!(board.shape_id(0, 0), Some(o));
    assert_eq!(board.shape_id(1, 1), Some(o));

    assert!(board.spawn_with(o));
    board.move_right();
    board.update(0.0);
    board.land();
    board.update(0.0);
    assert_eq!(board.erased_rows(), &[0, 1]);
    assert_eq!(visible_stack(&board), 0);

    board.update(0.0);
    assert!(board.erased_rows().is_empty());
}

#[test]
fn test_gravity_follows_fall_interval() {
    let mut board = started(BoardConfig::new(10, 20, vec![4]));
    assert!(board.spawn_with(square(&board)));
    assert_eq!(board.active().unwrap().y, 19);

    // Gravity is off after reset
    board.update(100.0);
    assert_eq!(board.active().unwrap().y, 19);

    board.set_fall_interval(0.5);
    board.update(1.0);
    assert_eq!(board.active().unwrap().y, 17);
    board.update(0.25);
    assert_eq!(board.active().unwrap().y, 17);
    board.update(0.25);
    assert_eq!(board.active().unwrap().y, 16);

    board.set_fall_interval(f64::INFINITY);
    board.update(100.0);
    assert_eq!(board.active().unwrap().y, 16);
}

#[test]
fn test_stacking_in_the_middle_ends_the_game() {
    let mut board = started(BoardConfig::new(4, 6, vec![4]));
    let o = square(&board);
    for _ in 0..10 {
        if board.is_game_over() {
            break;
        }
        if board.spawn_with(o) {
            board.land();
            board.update(0.0);
        }
        assert_piece_clear_of_stack(&board);
    }
    assert!(board.is_game_over());
    assert!(board.active().is_none());

    let frozen = board.snapshot();
    board.set_fall_interval(0.1);
    board.move_right();
    board.rotate_clockwise();
    board.land();
    board.update(5.0);
    assert_eq!(board.snapshot(), frozen);

    board.reset();
    assert!(!board.is_game_over());
    assert_eq!(visible_stack(&board), 0);
    assert_eq!(board.active().unwrap().anchor(), board.spawn_position());
}

#[test]
fn test_rotation_into_stack_is_reverted() {
    let mut board = started(BoardConfig::new(10, 20, vec![4]));
    assert!(board.spawn_with(bar(&board)));
    board.land();
    board.update(0.0);

    // Standing up at y = 1 would put the lowest cell on the locked bar
    assert!(board.spawn_with(bar(&board)));
    for _ in 0..18 {
        board.move_down();
        board.update(0.0);
    }
    let before = board.active().unwrap();
    assert_eq!(before.y, 1);
    board.rotate_clockwise();
    board.update(0.0);
    assert_eq!(board.active().unwrap(), before);
}

#[test]
fn test_wraparound_lets_pieces_cross_the_side() {
    let mut board = started(BoardConfig::new(6, 8, vec![4]).with_loop_x(true));
    let o = square(&board);
    assert!(board.spawn_with(o));
    for _ in 0..4 {
        board.move_left();
        board.update(0.0);
    }
    // Anchor 3 -> -1 wrapped to 5; the square covers columns 4 and 5
    assert_eq!(board.active().unwrap().x, 5);
    board.move_right();
    board.update(0.0);
    assert_eq!(board.active().unwrap().x, 0);

    let mut columns: Vec<i32> = board.active_cells().map(|p| p.x).collect();
    columns.sort();
    columns.dedup();
    assert_eq!(columns, vec![0, 5]);

    board.land();
    board.update(0.0);
    assert_eq!(board.shape_id(5, 0), Some(o));
    assert_eq!(board.shape_id(0, 0), Some(o));
}

#[test]
fn test_same_seed_same_game() {
    let config = BoardConfig::new(8, 16, vec![3, 4]).with_seed(2024);
    let mut a = started(config.clone());
    let mut b = started(config);
    for step in 0..40 {
        assert_eq!(a.active(), b.active(), "diverged at step {step}");
        if step % 3 == 0 {
            a.move_left();
            b.move_left();
        }
        a.land();
        b.land();
        a.update(0.016);
        b.update(0.016);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_reset_replays_the_piece_sequence() {
    let mut board = started(BoardConfig::new(10, 20, vec![4]).with_seed(5));
    let mut first = Vec::new();
    for _ in 0..5 {
        first.push(board.active().unwrap().shape_id);
        board.land();
        board.update(0.0);
    }

    board.reset();
    let mut second = Vec::new();
    for _ in 0..5 {
        second.push(board.active().unwrap().shape_id);
        board.land();
        board.update(0.0);
    }
    assert_eq!(first, second);
}

#[test]
fn test_headroom_is_half_the_largest_piece() {
    let board = Board::new(BoardConfig::new(10, 20, vec![3, 5])).unwrap();
    assert_eq!(board.extended_height(), 23);
    assert_eq!(board.shapes().len(), 2 + 18);
}
