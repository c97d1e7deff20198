//! Preferences and their key-value persistence boundary.
//!
//! The engine reads and writes configuration but does not own its
//! storage. Storage failures are non-fatal: missing or unparseable
//! values silently fall back to defaults, and failed writes are
//! ignored.

use crate::strategy::Difficulty;
use crate::types::Mark;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Storage key for the theme identifier.
pub const THEME_KEY: &str = "ttt-theme";
/// Storage key for the AI difficulty.
pub const DIFFICULTY_KEY: &str = "ttt-difficulty";
/// Storage key for the human player's mark.
pub const SYMBOL_KEY: &str = "ttt-symbol";
/// Storage key for the game mode.
pub const MODE_KEY: &str = "ttt-mode";

/// Game mode. The string forms (`pva`, `ava`) are the persisted
/// preference values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum GameMode {
    /// Human against the AI.
    #[strum(serialize = "pva")]
    #[serde(rename = "pva")]
    PlayerVsAi,
    /// Both marks AI-controlled, always minimax.
    #[strum(serialize = "ava")]
    #[serde(rename = "ava")]
    AiVsAi,
}

/// Externally persisted configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Theme identifier, carried for the presentation layer.
    pub theme: String,
    /// AI difficulty (player-vs-AI mode only).
    pub difficulty: Difficulty,
    /// The human player's mark in player-vs-AI mode.
    pub human_mark: Mark,
    /// Game mode.
    pub mode: GameMode,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: "canvas".to_string(),
            difficulty: Difficulty::Easy,
            human_mark: Mark::X,
            mode: GameMode::PlayerVsAi,
        }
    }
}

impl Preferences {
    /// Loads preferences from a store, falling back to defaults for
    /// any missing or unparseable value.
    #[instrument(skip(store))]
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let defaults = Self::default();

        let prefs = Self {
            theme: store.get(THEME_KEY).unwrap_or(defaults.theme),
            difficulty: parse_or(store, DIFFICULTY_KEY, defaults.difficulty),
            human_mark: parse_or(store, SYMBOL_KEY, defaults.human_mark),
            mode: parse_or(store, MODE_KEY, defaults.mode),
        };

        debug!(?prefs, "Loaded preferences");
        prefs
    }

    /// Writes all preferences to a store.
    #[instrument(skip(self, store))]
    pub fn save(&self, store: &mut dyn PreferenceStore) {
        store.set(THEME_KEY, &self.theme);
        store.set(DIFFICULTY_KEY, &self.difficulty.to_string());
        store.set(SYMBOL_KEY, &self.human_mark.to_string());
        store.set(MODE_KEY, &self.mode.to_string());
    }
}

/// Parses a stored value, falling back on a missing key or a value
/// that no longer parses (e.g. written by an older version).
fn parse_or<T: std::str::FromStr>(store: &dyn PreferenceStore, key: &str, fallback: T) -> T {
    match store.get(key) {
        Some(value) => value.parse().unwrap_or_else(|_| {
            warn!(key, value, "Unparseable stored preference, using default");
            fallback
        }),
        None => fallback,
    }
}

/// Key-value preference storage owned by the collaborator.
///
/// Implementations must swallow their own failures: `get` returns
/// `None` when the backend is unavailable, and `set` is best-effort.
pub trait PreferenceStore {
    /// Reads a stored value.
    fn get(&self, key: &str) -> Option<String>;
    /// Writes a value; failures are ignored.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: std::collections::HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A store whose backend is unavailable.
    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) {}
    }

    #[test]
    fn test_load_defaults_from_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut store = MemoryStore::new();
        let prefs = Preferences {
            theme: "midnight".to_string(),
            difficulty: Difficulty::Hard,
            human_mark: Mark::O,
            mode: GameMode::AiVsAi,
        };
        prefs.save(&mut store);

        assert_eq!(store.get(DIFFICULTY_KEY).as_deref(), Some("hard"));
        assert_eq!(store.get(MODE_KEY).as_deref(), Some("ava"));
        assert_eq!(store.get(SYMBOL_KEY).as_deref(), Some("O"));
        assert_eq!(Preferences::load(&store), prefs);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set(DIFFICULTY_KEY, "impossible");
        store.set(SYMBOL_KEY, "Q");
        store.set(MODE_KEY, "tournament");
        let prefs = Preferences::load(&store);
        assert_eq!(prefs.difficulty, Difficulty::Easy);
        assert_eq!(prefs.human_mark, Mark::X);
        assert_eq!(prefs.mode, GameMode::PlayerVsAi);
    }

    #[test]
    fn test_broken_store_is_non_fatal() {
        let mut store = BrokenStore;
        let prefs = Preferences::load(&store);
        assert_eq!(prefs, Preferences::default());
        prefs.save(&mut store);
    }
}
