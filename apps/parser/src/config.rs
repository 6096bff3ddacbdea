use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Parser configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Wall-clock bound for a single document.
    pub parse_timeout: Duration,
    /// Maximum number of documents parsed at once.
    pub workers: usize,
    /// Directory holding alternate lexicon files. `None` uses the bundled ones.
    pub lexicon_dir: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source.
    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_secs = match var("PARSE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("PARSE_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            anyhow::bail!("PARSE_TIMEOUT_SECS must be at least 1");
        }

        let workers = match var("PARSE_WORKERS") {
            Some(raw) => raw
                .parse::<usize>()
                .context("PARSE_WORKERS must be a positive integer")?,
            None => default_workers(),
        };
        if workers == 0 {
            anyhow::bail!("PARSE_WORKERS must be at least 1");
        }

        Ok(Config {
            parse_timeout: Duration::from_secs(timeout_secs),
            workers,
            lexicon_dir: var("LEXICON_DIR").map(PathBuf::from),
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            parse_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            workers: default_workers(),
            lexicon_dir: None,
            rust_log: "info".to_string(),
        }
    }
}

/// Parsing is CPU-bound, so the pool follows the core count.
fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
