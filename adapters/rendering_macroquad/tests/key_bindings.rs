use std::collections::HashSet;

use macroquad::input::KeyCode;
use monster_maze_core::{Command, InputKey};
use monster_maze_rendering_macroquad::KEY_BINDINGS;

#[test]
fn arrow_keys_cover_every_logical_key_once() {
    let bound: HashSet<InputKey> = KEY_BINDINGS.iter().map(|(_, key)| *key).collect();

    assert_eq!(bound.len(), InputKey::ALL.len());
    assert!(InputKey::ALL.iter().all(|key| bound.contains(key)));
}

#[test]
fn up_arrow_walks_forward_and_side_arrows_turn() {
    let command_for = |code: KeyCode| {
        KEY_BINDINGS
            .iter()
            .find(|(bound, _)| *bound == code)
            .map(|(_, key)| key.command())
    };

    assert_eq!(command_for(KeyCode::Up), Some(Command::MoveForward));
    assert_eq!(command_for(KeyCode::Down), Some(Command::MoveBackward));
    assert_eq!(command_for(KeyCode::Left), Some(Command::TurnLeft));
    assert_eq!(command_for(KeyCode::Right), Some(Command::TurnRight));
    assert_eq!(command_for(KeyCode::Space), None);
}
