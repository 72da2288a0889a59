//! High score persistence
//!
//! The record is the best level reached across runs, stored as a small JSON
//! blob in the browser's LocalStorage. Storage failures degrade silently:
//! the game plays fine without persistence.

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "consulting_chaos_highscore";

/// Best level reached across runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best_level: u32,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `level` beats the stored record
    pub fn qualifies(&self, level: u32) -> bool {
        level > self.best_level
    }

    /// Record `level` if it beats the current best, returning whether it did
    pub fn record(&mut self, level: u32) -> bool {
        if self.qualifies(level) {
            self.best_level = level;
            true
        } else {
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScore {
    /// Load the stored record, falling back to a blank one
    pub fn load() -> Self {
        let Some(storage) = local_storage() else {
            return Self::default();
        };
        match storage.get_item(STORAGE_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Discarding unreadable high score: {e}");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Persist the record, logging rather than failing on storage errors
    pub fn save(&self) {
        let Some(storage) = local_storage() else {
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to persist high score");
                }
            }
            Err(e) => log::warn!("Failed to serialize high score: {e}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScore {
    /// Native builds have no persistent store
    pub fn load() -> Self {
        Self::default()
    }

    pub fn save(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_the_best() {
        let mut hs = HighScore::new();
        assert!(hs.record(3));
        assert_eq!(hs.best_level, 3);
        assert!(!hs.record(2));
        assert!(!hs.record(3));
        assert_eq!(hs.best_level, 3);
        assert!(hs.record(4));
        assert_eq!(hs.best_level, 4);
    }

    #[test]
    fn test_json_round_trip() {
        let hs = HighScore { best_level: 7 };
        let json = serde_json::to_string(&hs).unwrap();
        let back: HighScore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hs);
    }

    #[test]
    fn test_unreadable_json_is_rejected() {
        assert!(serde_json::from_str::<HighScore>("not json").is_err());
    }
}
