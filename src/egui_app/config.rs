use std::path::{Path, PathBuf};

use crate::shared::config::{AppConfig, AppConfigBuilder, BackendKind, ConfigError};

/// Overrides the configured server URL
pub const API_URL_VAR: &str = "EVENTBOARD_API_URL";

/// Overrides the configured backend (`http` or `memory`)
pub const BACKEND_VAR: &str = "EVENTBOARD_BACKEND";

/// Desktop app configuration: the TOML file, then the environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Default location of the config file, `<config dir>/eventboard/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("eventboard").join("config.toml"))
    }

    /// Load from the default path (a missing file is fine) and apply overrides
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::from_app_config(AppConfig::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let app = if path.exists() {
            tracing::info!("Reading config from {}", path.display());
            AppConfig::from_toml_str(&std::fs::read_to_string(path)?)?
        } else {
            AppConfig::default()
        };
        Self::from_app_config(app)
    }

    fn from_app_config(app: AppConfig) -> Result<Self, ConfigError> {
        let mut builder = AppConfigBuilder::from_config(app);
        if let Ok(url) = std::env::var(API_URL_VAR) {
            builder = builder.server_url(url);
        }
        if let Ok(backend) = std::env::var(BACKEND_VAR) {
            builder = builder.backend(backend.parse()?);
        }
        Ok(Self { app: builder.build()? })
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url()
    }

    pub fn backend(&self) -> BackendKind {
        self.app.backend
    }
}
