//! Bootstrap configuration
//!
//! Resolution order (highest priority first):
//! 1. Command-line arguments (applied by the binary)
//! 2. Environment variables (`GROQ_API_KEY`, `GROQ_BASE_URL`, `FROMBUDDY_MODEL`)
//! 3. TOML configuration file
//! 4. Compiled defaults
//!
//! A missing TOML file is not fatal: the service logs a warning and starts with
//! defaults. A TOML file that exists but cannot be parsed is an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable holding the generation backend credential
pub const API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable overriding the generation backend base URL
pub const BASE_URL_ENV: &str = "GROQ_BASE_URL";
/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "FROMBUDDY_MODEL";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Interface to bind the HTTP server to
    pub bind: String,
    /// HTTP server port
    pub port: u16,
    /// Directory holding the static service catalog (`<id>.json` files)
    pub services_dir: PathBuf,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub generation: GenerationConfig,
    pub guardrail: GuardrailConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8000,
            services_dir: PathBuf::from("data/services"),
            logging: LoggingConfig::default(),
            cors: CorsConfig::default(),
            generation: GenerationConfig::default(),
            guardrail: GuardrailConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Cross-origin access allow-list
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

/// Generation backend settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Model identifier sent to the chat-completions endpoint
    pub model: String,
    /// OpenAI-compatible API base URL
    pub base_url: String,
    /// Sampling temperature; kept low so the model emits valid JSON
    pub temperature: f32,
    /// Upper bound for one backend call, in seconds
    pub timeout_secs: u64,
    /// Extra attempts after a transient failure (transport, timeout, 429, 5xx)
    pub max_retries: u32,
    /// Credential from the TOML file; the environment variable wins
    pub api_key: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            temperature: 0.1,
            timeout_secs: 30,
            max_retries: 1,
            api_key: None,
        }
    }
}

impl GenerationConfig {
    /// Resolve the backend credential: environment first, then TOML
    ///
    /// Returns `None` when neither source holds a usable key.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if is_valid_key(&key) {
                info!("Generation API key loaded from environment variable");
                return Some(key.trim().to_string());
            }
        }

        if let Some(key) = &self.api_key {
            if is_valid_key(key) {
                info!("Generation API key loaded from TOML config");
                return Some(key.trim().to_string());
            }
        }

        None
    }
}

/// Guardrail settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GuardrailConfig {
    /// Terms blocked in addition to the built-in identifier terms
    pub extra_terms: Vec<String>,
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Default configuration file location (`<config_dir>/frombuddy/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("frombuddy").join("config.toml"))
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load configuration from `path`, or from the default location when `None`
    ///
    /// Environment overrides are applied on top of the file contents.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
                info!("Loaded configuration from {}", path.display());
                Self::from_toml_str(&content)?
            }
            Some(path) => {
                warn!(
                    "Configuration file not found at {}, using defaults",
                    path.display()
                );
                Self::default()
            }
            None => {
                warn!("Could not determine configuration directory, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `GROQ_BASE_URL` and `FROMBUDDY_MODEL` when set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.generation.base_url = url.trim().to_string();
            }
        }

        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                self.generation.model = model.trim().to_string();
            }
        }
    }
}
