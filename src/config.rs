//! Runtime configuration
//!
//! Resolved from, highest precedence first:
//! 1. Command-line arguments
//! 2. Environment variables (BOOKSHELF_* prefix)
//! 3. Default values

use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "BOOKSHELF";

pub const DEFAULT_LIBRARY_FILE: &str = "library.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backing JSON file for the collection
    pub library_path: PathBuf,
    /// Level for this crate's log output (stderr)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from(DEFAULT_LIBRARY_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        // BOOKSHELF_LIBRARY
        if let Some(val) = lookup(&format!("{ENV_PREFIX}_LIBRARY")) {
            if !val.is_empty() {
                config.library_path = PathBuf::from(val);
            }
        }

        // BOOKSHELF_LOG
        if let Some(val) = lookup(&format!("{ENV_PREFIX}_LOG")) {
            if !val.is_empty() {
                config.log_level = val;
            }
        }

        config
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        library_path: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Self {
        if let Some(path) = library_path {
            self.library_path = path;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }
}
