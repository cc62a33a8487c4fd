//! Environment configuration.

use std::path::PathBuf;
use std::str::FromStr;

use snomed_finder::FinderConfig;

const DEFAULT_DB_PATH: &str = "snomed.db";
const DEFAULT_MAX_ROWS: i64 = 100;

/// Settings read from `SNOMED_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Path of the SQLite reference database (`SNOMED_DB_PATH`).
    pub db_path: PathBuf,
    /// Row cap for lookups; zero or negative is unlimited (`SNOMED_MAX_ROWS`).
    pub max_rows: i64,
    /// Maximum refset nesting (`SNOMED_MAX_DEPTH`).
    pub max_depth: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            max_rows: DEFAULT_MAX_ROWS,
            max_depth: FinderConfig::default().max_depth,
        }
    }
}

impl LookupConfig {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for missing
    /// or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            db_path: lookup("SNOMED_DB_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            max_rows: parse_or(&lookup, "SNOMED_MAX_ROWS", defaults.max_rows),
            max_depth: parse_or(&lookup, "SNOMED_MAX_DEPTH", defaults.max_depth),
        }
    }

    /// The finder configuration for these settings.
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig {
            max_depth: self.max_depth,
            ..FinderConfig::default()
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} value '{}', using {}", key, raw, default);
            default
        }),
        None => default,
    }
}
