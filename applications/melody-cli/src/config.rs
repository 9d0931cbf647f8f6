/// Application configuration
use melody_catalog::PagerConfig;
use melody_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default configuration file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "melodyflow.toml";

const ENV_PREFIX: &str = "MELODYFLOW";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration file not found: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub pager: PagerConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_client_name")]
    pub client_name: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: String::new(),
            password: String::new(),
            client_name: default_client_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; otherwise `melodyflow.toml` is read
    /// only if present. `MELODYFLOW_*` variables override file values,
    /// with `__` between nested keys (`MELODYFLOW_SERVER__URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`AppConfig::load`], reading variables from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.url.is_empty() {
            return Err(ConfigError::Invalid(
                "server URL is required (set MELODYFLOW_SERVER__URL)".to_string(),
            ));
        }

        if self.server.username.is_empty() {
            return Err(ConfigError::Invalid(
                "username is required (set MELODYFLOW_SERVER__USERNAME)".to_string(),
            ));
        }

        if self.server.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "server.timeout_secs must be positive".to_string(),
            ));
        }

        if self.pager.page_size == 0 {
            return Err(ConfigError::Invalid(
                "pager.page_size must be positive".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(ConfigError::Invalid(format!(
                "playback.volume must be between 0.0 and 1.0, got {}",
                self.playback.volume
            )));
        }

        Ok(())
    }
}

// Default values
fn default_client_name() -> String {
    "MelodyFlow".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use melody_playback::PlayMode;
    use std::io::Write;

    fn no_env() -> Option<config::Map<String, String>> {
        Some(config::Map::new())
    }

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.client_name, "MelodyFlow");
        assert_eq!(config.server.timeout(), Duration::from_secs(10));
        assert_eq!(config.pager.page_size, 10);
        assert_eq!(config.playback.volume, 0.8);
        assert_eq!(config.playback.mode, PlayMode::Sequential);
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
[server]
url = "https://music.example.com"
username = "alice"
password = "sesame"

[pager]
page_size = 25

[playback]
volume = 0.5
mode = "shuffle"
"#,
        );

        let config = AppConfig::load_with_env(Some(file.path()), no_env()).unwrap();

        assert_eq!(config.server.url, "https://music.example.com");
        assert_eq!(config.server.username, "alice");
        assert_eq!(config.server.timeout_secs, 10);
        assert_eq!(config.pager.page_size, 25);
        assert_eq!(config.playback.volume, 0.5);
        assert_eq!(config.playback.mode, PlayMode::Shuffle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config(
            r#"
[server]
url = "https://music.example.com"
username = "alice"
"#,
        );

        let config = AppConfig::load_with_env(
            Some(file.path()),
            env(&[
                ("MELODYFLOW_SERVER__USERNAME", "bob"),
                ("MELODYFLOW_PAGER__PAGE_SIZE", "50"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.url, "https://music.example.com");
        assert_eq!(config.server.username, "bob");
        assert_eq!(config.pager.page_size, 50);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = AppConfig::load_with_env(Some(&path), no_env());
        assert!(matches!(result, Err(ConfigError::MissingFile(p)) if p == path));
    }

    #[test]
    fn test_invalid_value_type() {
        let file = write_config(
            r#"
[pager]
page_size = "lots"
"#,
        );

        let result = AppConfig::load_with_env(Some(file.path()), no_env());
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_validate_requires_server() {
        let mut config = AppConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.server.url = "https://music.example.com".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.server.username = "alice".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let mut config = AppConfig::default();
        config.server.url = "https://music.example.com".into();
        config.server.username = "alice".into();

        config.pager.page_size = 0;
        assert!(config.validate().is_err());

        config.pager.page_size = 10;
        config.playback.volume = 1.5;
        assert!(config.validate().is_err());

        config.playback.volume = 1.0;
        assert!(config.validate().is_ok());
    }
}
