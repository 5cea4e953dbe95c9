//! Runtime configuration from environment variables.
//!
//! Supported:
//! - `SLEEPCHECK_LOG_MODE` = `stderr` | `file`
//! - `SLEEPCHECK_LOG_FILE` (used when the mode is `file`)
//! - `SLEEPCHECK_CHAT_SEED` (u64, makes chat replies reproducible)
//! - `SLEEPCHECK_ADVICE_TABLE` (path to an advice table JSON file)
//!
//! Values that fail to parse are ignored and the default is kept.

use std::path::PathBuf;

const LOG_MODE_ENV: &str = "SLEEPCHECK_LOG_MODE";
const LOG_FILE_ENV: &str = "SLEEPCHECK_LOG_FILE";
const CHAT_SEED_ENV: &str = "SLEEPCHECK_CHAT_SEED";
const ADVICE_TABLE_ENV: &str = "SLEEPCHECK_ADVICE_TABLE";

const DEFAULT_LOG_FILE: &str = "sleepcheck.log";

/// Where log output goes. Stdout is reserved for command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    #[default]
    Stderr,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub chat_seed: Option<u64>,
    pub advice_table: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_mode: LogMode::Stderr,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            chat_seed: None,
            advice_table: None,
        }
    }
}

impl AppConfig {
    /// Load config overrides from the process environment (best-effort).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Returns the config together with a message for every value that was
    /// present but rejected; logging is not initialized yet when this runs.
    pub fn from_lookup_with_warnings<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let mut warnings = Vec::new();

        if let Some(v) = lookup(LOG_MODE_ENV) {
            match v.trim().to_ascii_lowercase().as_str() {
                "stderr" => cfg.log_mode = LogMode::Stderr,
                "file" => cfg.log_mode = LogMode::File,
                other => warnings.push(format!("{LOG_MODE_ENV}: unknown mode '{other}'")),
            }
        }

        if let Some(v) = lookup(LOG_FILE_ENV) {
            if v.trim().is_empty() {
                warnings.push(format!("{LOG_FILE_ENV}: empty path"));
            } else {
                cfg.log_file = PathBuf::from(v.trim());
            }
        }

        if let Some(v) = lookup(CHAT_SEED_ENV) {
            match v.trim().parse::<u64>() {
                Ok(seed) => cfg.chat_seed = Some(seed),
                Err(_) => warnings.push(format!("{CHAT_SEED_ENV}: '{v}' is not a u64")),
            }
        }

        if let Some(v) = lookup(ADVICE_TABLE_ENV) {
            if !v.trim().is_empty() {
                cfg.advice_table = Some(PathBuf::from(v.trim()));
            }
        }

        (cfg, warnings)
    }

    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with_warnings(lookup).0
    }
}
