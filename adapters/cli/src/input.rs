//! Keyboard mapping for the interactive loop.

use maze_escape_core::Direction;

/// Request decoded from a single key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Step the hero one cell.
    Move(Direction),
    /// Advance to the next level after a win.
    NextLevel,
    /// Start the current level again.
    Restart,
    /// Leave the game.
    Quit,
}

impl Input {
    /// Decodes `key`, ignoring case. Unmapped keys yield `None`.
    pub(crate) fn from_key(key: char) -> Option<Self> {
        let input = match key.to_ascii_lowercase() {
            'w' => Self::Move(Direction::North),
            'e' => Self::Move(Direction::NorthEast),
            'd' => Self::Move(Direction::East),
            'c' => Self::Move(Direction::SouthEast),
            's' => Self::Move(Direction::South),
            'z' => Self::Move(Direction::SouthWest),
            'a' => Self::Move(Direction::West),
            'q' => Self::Move(Direction::NorthWest),
            'n' => Self::NextLevel,
            'r' => Self::Restart,
            'x' => Self::Quit,
            _ => return None,
        };
        Some(input)
    }
}

/// Key help shown under the board.
pub(crate) const KEY_HELP: &str =
    "move: q w e / a d / z s c   n: next level   r: restart   x: quit";
