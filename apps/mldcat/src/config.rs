//! # Configuration
//!
//! TOML configuration for the server and the CLI.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//!
//! [catalog]
//! path = "catalog.json"
//!
//! [legacy]
//! url = "https://www.openml.org/api/v1/json"
//!
//! [[users]]
//! api_key = "00000000000000000000000000000000"
//! user_id = 1
//! admin = true
//! ```
//!
//! Every section is optional. CLI flags override `[server]` and `[catalog]`.

use mldcat_core::{MldcatError, UserId};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CATALOG: &str = "catalog.json";
const DEFAULT_LEGACY_URL: &str = "https://www.openml.org/api/v1/json";

// =============================================================================
// SECTIONS
// =============================================================================

/// `[server]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `[catalog]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CATALOG),
        }
    }
}

/// `[legacy]`: where the legacy API lives, for compatibility checks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegacyConfig {
    pub url: String,
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_LEGACY_URL.to_string(),
        }
    }
}

/// One `[[users]]` entry.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub api_key: String,
    pub user_id: UserId,
    #[serde(default)]
    pub admin: bool,
}

// Keys stay out of logs.
impl fmt::Debug for UserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserConfig")
            .field("api_key", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("admin", &self.admin)
            .finish()
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Full configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub legacy: LegacyConfig,
    pub users: Vec<UserConfig>,
}

impl Config {
    /// Parse a configuration document.
    pub fn from_toml(text: &str) -> Result<Self, MldcatError> {
        let config: Self =
            toml::from_str(text).map_err(|e| MldcatError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, MldcatError> {
        tracing::info!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| {
            MldcatError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, MldcatError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<(), MldcatError> {
        for (i, user) in self.users.iter().enumerate() {
            if user.api_key.trim().is_empty() {
                return Err(MldcatError::ConfigError(format!(
                    "users[{i}]: api_key must not be empty"
                )));
            }
            if self.users[..i].iter().any(|u| u.api_key == user.api_key) {
                return Err(MldcatError::ConfigError(format!(
                    "users[{i}]: api_key is already assigned to another user"
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.addr(), "127.0.0.1:8000");
        assert_eq!(config.catalog.path, PathBuf::from("catalog.json"));
        assert!(config.users.is_empty());
    }

    #[test]
    fn parses_all_sections() {
        let config = Config::from_toml(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [catalog]
            path = "/srv/catalog.json"

            [legacy]
            url = "http://legacy:80/api/v1/json"

            [[users]]
            api_key = "owner-key"
            user_id = 2

            [[users]]
            api_key = "admin-key"
            user_id = 1
            admin = true
            "#,
        )
        .unwrap();

        assert_eq!(config.server.addr(), "0.0.0.0:9000");
        assert_eq!(config.legacy.url, "http://legacy:80/api/v1/json");
        assert_eq!(config.users.len(), 2);
        assert!(!config.users[0].admin);
        assert_eq!(config.users[1].user_id, UserId(1));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("[server]\nhots = \"x\"\n").unwrap_err();
        assert!(matches!(err, MldcatError::ConfigError(_)));
    }

    #[test]
    fn shared_api_keys_are_rejected() {
        let err = Config::from_toml(
            r#"
            [[users]]
            api_key = "same"
            user_id = 1
            [[users]]
            api_key = "same"
            user_id = 2
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("already assigned"));
    }

    #[test]
    fn debug_output_hides_api_keys() {
        let config = Config::from_toml("[[users]]\napi_key = \"secret\"\nuser_id = 3\n").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 8123\n").unwrap();

        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8123);
        assert!(Config::load(&dir.path().join("missing.toml")).is_err());
    }
}
