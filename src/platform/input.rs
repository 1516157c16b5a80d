//! Keyboard input mapping

use serde::{Deserialize, Serialize};

use crate::sim::Direction;

/// What a key press asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAction {
    Move(Direction),
    TogglePause,
}

/// Map a DOM-style key name to an action
pub fn map_key(key: &str) -> Option<InputAction> {
    match key {
        "ArrowLeft" => Some(InputAction::Move(Direction::Left)),
        "ArrowRight" => Some(InputAction::Move(Direction::Right)),
        "ArrowUp" => Some(InputAction::Move(Direction::Up)),
        "ArrowDown" => Some(InputAction::Move(Direction::Down)),
        " " | "Space" => Some(InputAction::TogglePause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(map_key("ArrowLeft"), Some(InputAction::Move(Direction::Left)));
        assert_eq!(map_key("ArrowRight"), Some(InputAction::Move(Direction::Right)));
        assert_eq!(map_key("ArrowUp"), Some(InputAction::Move(Direction::Up)));
        assert_eq!(map_key("ArrowDown"), Some(InputAction::Move(Direction::Down)));
    }

    #[test]
    fn test_space_pauses() {
        assert_eq!(map_key(" "), Some(InputAction::TogglePause));
        assert_eq!(map_key("Space"), Some(InputAction::TogglePause));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(map_key("Enter"), None);
        assert_eq!(map_key("a"), None);
    }
}
