//! Engine settings loaded from the environment.
//!
//! Supported environment variables:
//! - TABLETOP_FOG_ROWS: rows of a freshly created fog grid (default 20)
//! - TABLETOP_FOG_COLS: columns of a freshly created fog grid (default 30)
//! - TABLETOP_RECENT_ROLLS: dice rolls returned by the roll log (default 10)
//! - TABLETOP_CHAT_HISTORY: chat messages returned by history queries (default 50)
//! - TABLETOP_NOTIFY_CAPACITY: per-subscriber notification buffer (default 256)
//!
//! Invalid values are ignored with a warning and the default is kept.

use std::str::FromStr;

use tabletop_domain::{GridDimensions, DEFAULT_FOG_COLS, DEFAULT_FOG_ROWS};

pub const DEFAULT_RECENT_ROLLS: usize = 10;
pub const DEFAULT_CHAT_HISTORY: usize = 50;
pub const DEFAULT_NOTIFY_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub fog_dimensions: GridDimensions,
    pub recent_rolls: usize,
    pub chat_history: usize,
    pub notify_capacity: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            fog_dimensions: GridDimensions::default(),
            recent_rolls: DEFAULT_RECENT_ROLLS,
            chat_history: DEFAULT_CHAT_HISTORY,
            notify_capacity: DEFAULT_NOTIFY_CAPACITY,
        }
    }
}

impl EngineSettings {
    /// Load `.env.local` / `.env` from the repo root, then read the process
    /// environment.
    pub fn from_env() -> Self {
        load_dotenv_from_repo_root();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let rows = positive(&lookup, "TABLETOP_FOG_ROWS").unwrap_or(DEFAULT_FOG_ROWS);
        let cols = positive(&lookup, "TABLETOP_FOG_COLS").unwrap_or(DEFAULT_FOG_COLS);
        let fog_dimensions = GridDimensions::new(rows, cols).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid fog dimensions, using defaults");
            defaults.fog_dimensions
        });

        Self {
            fog_dimensions,
            recent_rolls: positive(&lookup, "TABLETOP_RECENT_ROLLS")
                .unwrap_or(defaults.recent_rolls),
            chat_history: positive(&lookup, "TABLETOP_CHAT_HISTORY")
                .unwrap_or(defaults.chat_history),
            notify_capacity: positive(&lookup, "TABLETOP_NOTIFY_CAPACITY")
                .unwrap_or(defaults.notify_capacity),
        }
    }
}

/// A strictly positive value for `key`, or `None` (with a warning when the
/// variable is set but unusable).
fn positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default + Copy,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => {
            tracing::info!(key, "Applied environment override");
            Some(value)
        }
        Ok(_) => {
            tracing::warn!(key, val = %raw, "Must be greater than zero, ignoring");
            None
        }
        Err(_) => {
            tracing::warn!(key, val = %raw, "Not a valid number, ignoring");
            None
        }
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load env file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(EngineSettings::from_lookup(|_| None), EngineSettings::default());
    }

    #[test]
    fn overrides_are_applied() {
        let settings = EngineSettings::from_lookup(lookup(&[
            ("TABLETOP_FOG_ROWS", "10"),
            ("TABLETOP_FOG_COLS", " 12 "),
            ("TABLETOP_RECENT_ROLLS", "25"),
        ]));
        assert_eq!(settings.fog_dimensions.rows, 10);
        assert_eq!(settings.fog_dimensions.cols, 12);
        assert_eq!(settings.recent_rolls, 25);
        assert_eq!(settings.chat_history, DEFAULT_CHAT_HISTORY);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let settings = EngineSettings::from_lookup(lookup(&[
            ("TABLETOP_FOG_ROWS", "0"),
            ("TABLETOP_CHAT_HISTORY", "lots"),
            ("TABLETOP_NOTIFY_CAPACITY", "-4"),
        ]));
        assert_eq!(settings.fog_dimensions.rows, DEFAULT_FOG_ROWS);
        assert_eq!(settings.chat_history, DEFAULT_CHAT_HISTORY);
        assert_eq!(settings.notify_capacity, DEFAULT_NOTIFY_CAPACITY);
    }

    #[test]
    fn oversized_fog_falls_back_to_defaults() {
        let settings = EngineSettings::from_lookup(lookup(&[
            ("TABLETOP_FOG_ROWS", "4000000000"),
            ("TABLETOP_FOG_COLS", "4000000000"),
        ]));
        assert_eq!(settings.fog_dimensions, GridDimensions::default());
    }
}
