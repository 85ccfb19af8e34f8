//! Process configuration read from the environment.

use std::path::PathBuf;

use scribble_room::{GameConfig, WordBank};

use crate::ScribbleError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Where to listen and which word table to load.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Optional JSON word table (`{"category": ["word", ...]}`). The
    /// built-in table is used when unset.
    pub words_path: Option<PathBuf>,
    pub game: GameConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            words_path: None,
            game: GameConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads `HOST`, `PORT` and `SCRIBBLE_WORDS`.
    ///
    /// A `PORT` that is not a valid port number is logged and replaced
    /// by the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(raw) = lookup("PORT") {
            match raw.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(e) => {
                    tracing::warn!(port = %raw, error = %e, fallback = DEFAULT_PORT, "invalid PORT");
                }
            }
        }
        config.words_path = lookup("SCRIBBLE_WORDS")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        config
    }

    /// `host:port`, ready for `bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Loads the word table, from `words_path` if set.
    ///
    /// # Errors
    /// [`ScribbleError::Io`] if the file cannot be read,
    /// [`ScribbleError::Room`] if it is not a usable table.
    pub fn load_words(&self) -> Result<WordBank, ScribbleError> {
        let Some(path) = &self.words_path else {
            return Ok(WordBank::default());
        };
        let raw = std::fs::read_to_string(path)?;
        let words = WordBank::from_json(&self.game.default_category, &raw)?;
        tracing::info!(path = %path.display(), categories = words.categories().len(), "word table loaded");
        Ok(words)
    }
}
