use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChapterError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub chunk_size: usize,
    pub overlap: usize,
    pub ollama: OllamaConfig,
}

/// Connection settings for the Ollama server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OllamaConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "mistral".to_string(),
            chunk_size: 4000,
            overlap: 800,
            ollama: OllamaConfig::default(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/snortstamper/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("snortstamper").join("config.toml"))
    }

    /// Load configuration from a TOML file. Missing fields use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ChapterError::Config {
            message: format!("{}: {}", path.display(), e),
        })
    }

    /// Like [`Config::load`], but a missing file yields defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(ChapterError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// - SNORTSTAMPER_MODEL → model
    /// - OLLAMA_HOST → ollama.url
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("SNORTSTAMPER_MODEL") {
            let model = model.trim().trim_matches('"');
            if !model.is_empty() {
                self.model = model.to_string();
            }
        }

        if let Ok(host) = std::env::var("OLLAMA_HOST") {
            let host = host.trim().trim_matches('"');
            if !host.is_empty() {
                self.ollama.url = if host.starts_with("http://") || host.starts_with("https://") {
                    host.to_string()
                } else {
                    format!("http://{}", host)
                };
            }
        }

        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ChapterError::Config {
                message: "model must not be empty".to_string(),
            });
        }
        if self.chunk_size == 0 {
            return Err(ChapterError::Config {
                message: "chunk_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model, "mistral");
        assert_eq!(config.chunk_size, 4000);
        assert_eq!(config.overlap, 800);
        assert_eq!(config.ollama.url, "http://localhost:11434");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "model = \"llama3\"\nchunk_size = 2000\n\n[ollama]\ntimeout_secs = 30"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.model, "llama3");
        assert_eq!(config.chunk_size, 2000);
        assert_eq!(config.overlap, 800);
        assert_eq!(config.ollama.timeout_secs, 30);
        assert_eq!(config.ollama.url, "http://localhost:11434");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_rejects_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chunk_size = \"lots\"").unwrap();

        let err = Config::load_or_default(file.path()).unwrap_err();
        assert!(matches!(err, ChapterError::Config { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_chunk_size() {
        let config = Config {
            chunk_size: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_model() {
        let config = Config {
            model: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
