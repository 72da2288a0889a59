//! Logical input tracking
//!
//! Browser key events arrive as strings and repeats; the simulation wants
//! clean per-frame flags. `InputState` holds the currently-pressed logical
//! keys plus one-shot signals, and `sample` folds them into a `TickInput`.
//! The action key is edge-detected so holding it down interacts only once.

use crate::sim::TickInput;

/// Logical keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Action,
}

impl Key {
    /// Map a browser `KeyboardEvent::key` value. WASD and arrows both steer.
    pub fn from_browser(key: &str) -> Option<Key> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            " " | "e" | "E" => Some(Key::Action),
            _ => None,
        }
    }
}

/// Per-frame input aggregator fed by event listeners
#[derive(Debug, Default)]
pub struct InputState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    action_held: bool,
    /// Set on press, cleared when sampled; re-arms on release
    action_edge: bool,
    start: bool,
    skip_memorize: bool,
    advance_level: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Up => self.up = true,
            Key::Down => self.down = true,
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Action => {
                // Browser auto-repeat delivers repeated keydowns; only the
                // first one while released counts as an edge
                if !self.action_held {
                    self.action_edge = true;
                }
                self.action_held = true;
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Up => self.up = false,
            Key::Down => self.down = false,
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Action => self.action_held = false,
        }
    }

    /// One-shot signals from the DOM overlay buttons
    pub fn request_start(&mut self) {
        self.start = true;
    }

    pub fn request_skip_memorize(&mut self) {
        self.skip_memorize = true;
    }

    pub fn request_advance_level(&mut self) {
        self.advance_level = true;
    }

    /// Fold current input into a `TickInput`, consuming the one-shots
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            interact: self.action_edge,
            start: self.start,
            skip_memorize: self.skip_memorize,
            advance_level: self.advance_level,
        };
        self.action_edge = false;
        self.start = false;
        self.skip_memorize = false;
        self.advance_level = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_key_mapping() {
        assert_eq!(Key::from_browser("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_browser("w"), Some(Key::Up));
        assert_eq!(Key::from_browser("D"), Some(Key::Right));
        assert_eq!(Key::from_browser(" "), Some(Key::Action));
        assert_eq!(Key::from_browser("Escape"), None);
    }

    #[test]
    fn test_held_directions_persist_across_samples() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        assert!(input.sample().right);
        assert!(input.sample().right);
        input.key_up(Key::Right);
        assert!(!input.sample().right);
    }

    #[test]
    fn test_action_fires_once_per_press() {
        let mut input = InputState::new();
        input.key_down(Key::Action);
        assert!(input.sample().interact);
        // Still held, including auto-repeat keydowns
        input.key_down(Key::Action);
        assert!(!input.sample().interact);
        // Release re-arms
        input.key_up(Key::Action);
        input.key_down(Key::Action);
        assert!(input.sample().interact);
    }

    #[test]
    fn test_one_shot_signals_clear_after_sample() {
        let mut input = InputState::new();
        input.request_start();
        input.request_advance_level();
        let first = input.sample();
        assert!(first.start);
        assert!(first.advance_level);
        let second = input.sample();
        assert!(!second.start);
        assert!(!second.advance_level);
    }
}
