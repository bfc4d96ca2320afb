//! TOML configuration for the backend.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{
    auth::{DEFAULT_OTP_CODE, MIN_PHONE_LEN, StubOtp},
    core::store::StoreOptions,
    persist::DEFAULT_SLOT_KEY,
    runtime::latency::{Latency, LatencyProfile},
};

/// Failure loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written.
    #[error("config io at {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// File is not valid TOML for [`BackendConfig`].
    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),
    /// Config could not be rendered.
    #[error("config render: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Where listings are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file; `None` keeps everything in memory.
    pub path: Option<PathBuf>,
    /// Key the collection is stored under.
    pub slot_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

/// Simulated round-trip delays in milliseconds; zero disables a delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    /// Delay before listings are returned.
    pub get_listings_ms: u64,
    /// Delay before a listing is created.
    pub add_listing_ms: u64,
    /// Delay for each OTP send or verify.
    pub otp_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            get_listings_ms: 800,
            add_listing_ms: 1500,
            otp_ms: 1000,
        }
    }
}

impl LatencyConfig {
    /// Per-operation [`Latency`] values.
    pub fn profile(&self) -> LatencyProfile {
        LatencyProfile {
            get_listings: Latency::from_millis(self.get_listings_ms),
            add_listing: Latency::from_millis(self.add_listing_ms),
            otp: Latency::from_millis(self.otp_ms),
        }
    }
}

/// OTP stub settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Code the stub accepts.
    pub code: String,
    /// Shortest accepted phone number.
    pub min_phone_len: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            code: DEFAULT_OTP_CODE.to_string(),
            min_phone_len: MIN_PHONE_LEN,
        }
    }
}

/// Channel sizes for the backend task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Pending command capacity.
    pub command_queue_bound: usize,
    /// Broadcast event buffer.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Complete backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Persistence.
    pub storage: StorageConfig,
    /// Simulated delays.
    pub latency: LatencyConfig,
    /// OTP stub.
    pub auth: AuthConfig,
    /// Backend task.
    pub runtime: RuntimeConfig,
}

impl BackendConfig {
    /// Default config file location, `backroom.toml` in the platform config dir.
    pub fn default_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("za", "backroom", "BackRoom")?;
        Some(proj.config_dir().join("backroom.toml"))
    }

    /// Default SQLite location in the platform data dir.
    pub fn default_db_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("za", "backroom", "BackRoom")?;
        Some(proj.data_dir().join("listings.sqlite"))
    }

    /// Parses TOML; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads `path`, or returns defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Writes the config as pretty TOML, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(io_err)
    }

    /// Store settings derived from this config, seeded with the fixtures.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            slot_key: self.storage.slot_key.clone(),
            latency: self.latency.profile(),
            ..StoreOptions::default()
        }
    }

    /// OTP stub derived from this config.
    pub fn otp_stub(&self) -> StubOtp {
        StubOtp::new(self.auth.code.clone(), self.latency.profile().otp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = BackendConfig::from_toml_str(
            r#"
            [latency]
            get_listings_ms = 0

            [auth]
            code = "9999"
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.latency.get_listings_ms, 0);
        assert_eq!(cfg.latency.add_listing_ms, 1500);
        assert_eq!(cfg.auth.code, "9999");
        assert_eq!(cfg.auth.min_phone_len, MIN_PHONE_LEN);
        assert_eq!(cfg.storage.slot_key, DEFAULT_SLOT_KEY);
        assert_eq!(cfg.latency.profile().get_listings, Latency::Immediate);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let tmp = tempfile::TempDir::new().expect("tmp");
        let path = tmp.path().join("nested").join("backroom.toml");
        let mut cfg = BackendConfig::default();
        cfg.storage.path = Some(tmp.path().join("db.sqlite"));
        cfg.runtime.event_capacity = 16;
        cfg.save(&path).expect("save");
        assert_eq!(BackendConfig::load(&path).expect("load"), cfg);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::TempDir::new().expect("tmp");
        let cfg = BackendConfig::load(tmp.path().join("absent.toml")).expect("load");
        assert_eq!(cfg, BackendConfig::default());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            BackendConfig::from_toml_str("[latency\nget_listings_ms = "),
            Err(ConfigError::Parse(_))
        ));
    }
}
