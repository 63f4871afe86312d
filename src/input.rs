//! Input collaborator
//!
//! Hosts own the keyboard. The core only asks which directions are held at
//! the start of a tick and receives discrete [`KeyAction`]s for presses.

/// The four steering directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

/// Synchronous held-key query
pub trait InputSource {
    fn is_direction_held(&self, direction: Direction) -> bool;
}

/// Discrete key presses the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Replay the current level after a loss
    RestartLevel,
    /// Move on after a win
    AdvanceLevel,
    /// Back to the menu once the game is complete
    RestartGame,
    ToggleDevOverlay,
    ToggleAudio,
}

impl KeyAction {
    /// Default bindings (case-insensitive)
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'r' => Some(KeyAction::RestartLevel),
            'n' => Some(KeyAction::AdvanceLevel),
            'g' => Some(KeyAction::RestartGame),
            'd' => Some(KeyAction::ToggleDevOverlay),
            'm' => Some(KeyAction::ToggleAudio),
            _ => None,
        }
    }
}

/// Held-direction set a host updates from key down/up events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: [bool; 4],
}

impl HeldKeys {
    fn slot(direction: Direction) -> usize {
        match direction {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    pub fn press(&mut self, direction: Direction) {
        self.held[Self::slot(direction)] = true;
    }

    pub fn release(&mut self, direction: Direction) {
        self.held[Self::slot(direction)] = false;
    }

    pub fn release_all(&mut self) {
        self.held = [false; 4];
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        self.held[Self::slot(direction)] = held;
    }
}

impl InputSource for HeldKeys {
    fn is_direction_held(&self, direction: Direction) -> bool {
        self.held[Self::slot(direction)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys() {
        let mut keys = HeldKeys::default();
        assert!(Direction::ALL.iter().all(|&d| !keys.is_direction_held(d)));
        keys.press(Direction::Up);
        keys.set(Direction::Left, true);
        assert!(keys.is_direction_held(Direction::Up));
        assert!(keys.is_direction_held(Direction::Left));
        keys.release(Direction::Up);
        assert!(!keys.is_direction_held(Direction::Up));
        keys.release_all();
        assert_eq!(keys, HeldKeys::default());
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(KeyAction::from_key('R'), Some(KeyAction::RestartLevel));
        assert_eq!(KeyAction::from_key('n'), Some(KeyAction::AdvanceLevel));
        assert_eq!(KeyAction::from_key('x'), None);
    }
}
