/// CLI configuration
use crate::error::{CliError, Result};
use audiobook_client::{ClientConfig, DEFAULT_AI_URL, DEFAULT_API_URL, SESSION_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "audiobook";

/// Name of the optional configuration file
pub const CONFIG_FILE_NAME: &str = "audiobook.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_ai_url")]
    pub ai_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Session file; defaults to `userData.json` in the config directory
    pub file: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `path` names an explicit file that must exist. Without it,
    /// `audiobook.toml` is read from the working directory, then from the
    /// platform config directory, if present. `AUDIOBOOK_*` variables
    /// override both (e.g. `AUDIOBOOK_API__API_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                if let Some(found) = default_config_file() {
                    tracing::debug!(path = %found.display(), "Using config file");
                    settings = settings.add_source(config::File::from(found));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("AUDIOBOOK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Apply `--api-url` / `--ai-url` flags
    pub fn with_overrides(mut self, api_url: Option<String>, ai_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api.api_url = url;
        }
        if let Some(url) = ai_url {
            self.api.ai_url = url;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("api_url", &self.api.api_url), ("ai_url", &self.api.ai_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CliError::Config(format!(
                    "{} must start with http:// or https:// (got '{}')",
                    name, url
                )));
            }
        }

        if self.api.timeout_secs == 0 {
            return Err(CliError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Where the logged-in user is persisted
    pub fn session_file(&self) -> PathBuf {
        self.session
            .file
            .clone()
            .unwrap_or_else(|| config_dir().join(SESSION_FILE_NAME))
    }

    /// Settings for the HTTP client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api.api_url, &self.api.ai_url)
            .with_timeout(Duration::from_secs(self.api.timeout_secs))
    }
}

/// Platform config directory for the CLI
///
/// Falls back to the current directory if the platform provides none.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

fn default_config_file() -> Option<PathBuf> {
    [PathBuf::from(CONFIG_FILE_NAME), config_dir().join(CONFIG_FILE_NAME)]
        .into_iter()
        .find(|p| p.exists())
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        api_url: default_api_url(),
        ai_url: default_ai_url(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_ai_url() -> String {
    DEFAULT_AI_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            session: SessionSettings::default(),
        }
    }
}
