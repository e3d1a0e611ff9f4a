use crate::game_logic::Direction;

/// What a single key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
  Turn(Direction),
  Reset,
  Ignored,
}

impl KeyCommand {
  /// Maps a DOM `KeyboardEvent.key` value.
  pub fn from_key(key:&str) -> KeyCommand {
    match key {
      "ArrowUp"    => KeyCommand::Turn(Direction::Up),
      "ArrowDown"  => KeyCommand::Turn(Direction::Down),
      "ArrowLeft"  => KeyCommand::Turn(Direction::Left),
      "ArrowRight" => KeyCommand::Turn(Direction::Right),
      "r" | "R"    => KeyCommand::Reset,
      _            => KeyCommand::Ignored,
    }
  }

  /// Maps a legacy numeric `keyCode`.
  pub fn from_key_code(code:u32) -> KeyCommand {
    match code {
      38 => KeyCommand::Turn(Direction::Up),    // Up Arrow
      40 => KeyCommand::Turn(Direction::Down),  // Down Arrow
      37 => KeyCommand::Turn(Direction::Left),  // Left Arrow
      39 => KeyCommand::Turn(Direction::Right), // Right Arrow
      82 => KeyCommand::Reset,                  // R
      _  => KeyCommand::Ignored,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn arrow_keys_turn() {
    assert_eq!(KeyCommand::from_key("ArrowUp"), KeyCommand::Turn(Direction::Up));
    assert_eq!(KeyCommand::from_key("ArrowDown"), KeyCommand::Turn(Direction::Down));
    assert_eq!(KeyCommand::from_key("ArrowLeft"), KeyCommand::Turn(Direction::Left));
    assert_eq!(KeyCommand::from_key("ArrowRight"), KeyCommand::Turn(Direction::Right));
  }

  #[test]
  fn key_codes_match_key_names() {
    for (code,name) in [(38,"ArrowUp"),(40,"ArrowDown"),(37,"ArrowLeft"),(39,"ArrowRight"),(82,"r")] {
      assert_eq!(KeyCommand::from_key_code(code), KeyCommand::from_key(name));
    }
  }

  #[test]
  fn everything_else_is_ignored() {
    for key in ["w", "Enter", " ", "Up", "arrowup", ""] {
      assert_eq!(KeyCommand::from_key(key), KeyCommand::Ignored, "{key:?}");
    }
    assert_eq!(KeyCommand::from_key_code(32), KeyCommand::Ignored);
  }
}
