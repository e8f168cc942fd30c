//! Configuration loaded from the environment.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default style preset when the caller doesn't pick one.
pub const DEFAULT_STYLE: &str = "professional";

/// Default target word count for drafts.
pub const DEFAULT_WORDS: u32 = 220;

/// Items older than this (in days) without activity are triaged as stale.
pub const DEFAULT_STALE_DAYS: u32 = 30;

/// Runtime settings.
///
/// `api_key` is optional — without it the binary falls back to the offline
/// scaffold generator and the heuristic-only classifier path is unavailable.
#[derive(Debug, Clone)]
pub struct Settings {
    /// OpenAI-compatible API key, if set.
    pub api_key: Option<SecretString>,
    /// Model name for both triage and drafting.
    pub model: String,
    /// Root directory for the review queue and style rules.
    pub data_dir: PathBuf,
    /// Default style preset.
    pub style: String,
    /// Default draft word target.
    pub words: u32,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// - `OPENAI_API_KEY` — optional
    /// - `ECHODRAFT_MODEL` — defaults to `gpt-4o-mini`
    /// - `ECHODRAFT_DATA_DIR` — defaults to `~/.echodraft`
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .map(SecretString::from);

        let model =
            std::env::var("ECHODRAFT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let data_dir = match std::env::var("ECHODRAFT_DATA_DIR") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };

        Ok(Self {
            api_key,
            model,
            data_dir,
            style: DEFAULT_STYLE.to_string(),
            words: DEFAULT_WORDS,
        })
    }

    /// Directory holding one file per pending review task.
    pub fn review_dir(&self) -> PathBuf {
        self.data_dir.join("review_queue")
    }

    /// Path of the persisted style rule set.
    pub fn rules_path(&self) -> PathBuf {
        self.data_dir.join("style_rules.json")
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let home = std::env::var("HOME")
        .map_err(|_| ConfigError::MissingEnvVar("HOME".to_string()))?;
    Ok(PathBuf::from(home).join(".echodraft"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_dir_and_rules_path_hang_off_data_dir() {
        let settings = Settings {
            api_key: None,
            model: "gpt-4o-mini".into(),
            data_dir: PathBuf::from("/tmp/ed"),
            style: DEFAULT_STYLE.into(),
            words: DEFAULT_WORDS,
        };
        assert_eq!(settings.review_dir(), PathBuf::from("/tmp/ed/review_queue"));
        assert_eq!(
            settings.rules_path(),
            PathBuf::from("/tmp/ed/style_rules.json")
        );
    }
}
