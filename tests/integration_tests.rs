//! Integration tests across the facade: configuration, key input, board and
//! snapshots.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use polyfall::cli::{parse_args, shapes_json, Command, ShapesArgs};
use polyfall::config::RunConfig;
use polyfall::core::{Board, BoardConfig, ConfigError};
use polyfall::input::{handle_key_event, should_quit};
use polyfall::types::{GameAction, Position};

fn press(board: &mut Board, code: KeyCode) {
    if let Some(action) = handle_key_event(KeyEvent::from(code)) {
        board.apply_action(action);
    }
}

#[test]
fn test_game_lifecycle_from_run_config() {
    let config = RunConfig::from_json_str(
        r#"{"board": {"width": 8, "height": 12, "seed": 7}, "fall_interval_secs": 0.2}"#,
    )
    .unwrap();
    let mut board = Board::new(config.board.clone()).unwrap();
    assert!(board.active().is_none());

    board.reset();
    board.set_fall_interval(config.fall_interval_secs);
    assert_eq!(board.active().unwrap().anchor(), Position::new(4, 11));

    // One second of gravity at 0.2s per row
    for _ in 0..5 {
        board.update(0.2);
    }
    assert!(board.active().unwrap().y <= 7);
}

#[test]
fn test_keys_drive_the_board() {
    let mut board = Board::new(BoardConfig::new(10, 20, vec![4]).with_seed(11)).unwrap();
    board.reset();
    let start = board.active().unwrap();

    press(&mut board, KeyCode::Left);
    press(&mut board, KeyCode::Down);
    board.update(0.0);
    let moved = board.active().unwrap();
    assert_eq!(moved.x, start.x - 1);
    assert_eq!(moved.y, start.y - 1);

    press(&mut board, KeyCode::Char(' '));
    board.update(0.0);
    assert_eq!(board.pieces_spawned(), 2);
    assert!((0..10).any(|x| !board.is_vacant(x, 0)));

    press(&mut board, KeyCode::Char('r'));
    assert_eq!(board.pieces_spawned(), 1);
    assert!((0..10).all(|x| board.is_vacant(x, 0)));
}

#[test]
fn test_quit_keys_do_not_map_to_actions() {
    for key in [
        KeyEvent::from(KeyCode::Char('q')),
        KeyEvent::from(KeyCode::Esc),
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    ] {
        assert!(should_quit(key));
        assert_eq!(handle_key_event(key), None);
    }
    assert!(!should_quit(KeyEvent::from(KeyCode::Up)));
    assert_eq!(
        handle_key_event(KeyEvent::from(KeyCode::Up)),
        Some(GameAction::RotateCw)
    );
}

#[test]
fn test_invalid_board_config_is_reported() {
    let err = Board::new(BoardConfig::new(0, 20, vec![4])).unwrap_err();
    assert_eq!(
        err,
        ConfigError::ZeroDimension {
            width: 0,
            height: 20
        }
    );
    assert!(!err.to_string().is_empty());

    let err = Board::new(BoardConfig::new(2, 2, vec![5])).unwrap_err();
    assert_eq!(
        err,
        ConfigError::BlockSizeTooLarge {
            size: 5,
            capacity: 4
        }
    );
}

#[test]
fn test_snapshot_json_shape() {
    let mut board = Board::new(BoardConfig::new(4, 6, vec![1])).unwrap();
    board.reset();
    board.land();
    board.update(0.0);

    let json = serde_json::to_value(board.snapshot()).unwrap();
    assert_eq!(json["width"], 4);
    assert_eq!(json["height"], 6);
    assert_eq!(json["rows"].as_array().unwrap().len(), 6);
    assert_eq!(json["rows"][0][2], 0);
    assert!(json["rows"][0][0].is_null());
    assert_eq!(json["active"]["rotation"], "north");
    assert_eq!(json["pieces_spawned"], 2);
    assert_eq!(json["game_over"], false);
}

#[test]
fn test_shapes_command_end_to_end() {
    let args: Vec<String> = ["shapes", "--sizes", "5", "--corners"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let Command::Shapes(shapes) = parse_args(&args).unwrap() else {
        panic!("expected shapes command");
    };
    assert_eq!(
        shapes,
        ShapesArgs {
            sizes: vec![5],
            corners: true
        }
    );

    let json: serde_json::Value = serde_json::from_str(&shapes_json(&shapes).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 166);
}
