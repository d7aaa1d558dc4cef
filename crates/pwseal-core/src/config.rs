use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level CLI configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PwsealConfig {
    pub log: LogConfig,
    pub files: FilesConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: warn). `RUST_LOG` takes precedence.
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Unix permission bits for written blobs and plaintext (default: 0o600)
    pub mode: u32,
    /// Replace existing output files without --force
    pub overwrite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print the SHA-512 checksum of each sealed blob to stdout
    pub print_checksum: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            mode: 0o600,
            overwrite: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            print_checksum: true,
        }
    }
}

impl PwsealConfig {
    /// Read and parse `path`. `None` when the file does not exist.
    ///
    /// Emits no log events, so it can run before a subscriber is installed.
    pub fn read(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parsing config: {}", path.display()))?;
        Ok(Some(config))
    }

    /// Load from `path`, falling back to defaults (with a warning) when the
    /// file is absent.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match Self::read(path)? {
            Some(config) => Ok(config),
            None => {
                warn_missing(path);
                Ok(Self::default())
            }
        }
    }
}

/// Report that `path` was absent and defaults are in effect.
pub fn warn_missing(path: &Path) {
    tracing::warn!(path = %path.display(), "config file not found, using defaults");
}
