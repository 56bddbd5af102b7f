//! Environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

/// Default frame interval in milliseconds.
pub const DEFAULT_FRAME_MS: u64 = 16;

/// Driver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Dataset seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Time advanced per frame.
    pub frame: Duration,
    /// Directory receiving `step-<n>.svg` after every settled navigation.
    pub output_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frame: Duration::from_millis(DEFAULT_FRAME_MS),
            output_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads `SCROLLY_SEED`, `SCROLLY_FRAME_MS` and `SCROLLY_OUTPUT_DIR`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value cannot be parsed or the frame
    /// interval is zero.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`AppConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let seed = lookup("SCROLLY_SEED")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| AppError::Config(format!("SCROLLY_SEED must be a valid u64: {e}")))
            })
            .transpose()?;

        let frame_ms = match lookup("SCROLLY_FRAME_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("SCROLLY_FRAME_MS must be a valid u64: {e}"))
            })?,
            None => DEFAULT_FRAME_MS,
        };
        if frame_ms == 0 {
            return Err(AppError::Config(
                "SCROLLY_FRAME_MS must be greater than zero".to_string(),
            ));
        }

        let output_dir = lookup("SCROLLY_OUTPUT_DIR")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            seed,
            frame: Duration::from_millis(frame_ms),
            output_dir,
        })
    }
}
