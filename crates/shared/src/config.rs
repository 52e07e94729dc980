//! Configuration types for Landsraad
//!
//! Loaded once by the binary and handed to whatever needs it.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{LandsraadError, Result};

/// Token settings for the client-facing auth layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub realm: String,
    /// Token lifetime in milliseconds
    pub validity_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: "default-secret-change-in-production".to_string(),
            issuer: "dune-ttrpg".to_string(),
            audience: "dune-ttrpg-clients".to_string(),
            realm: "Dune TTRPG Server".to_string(),
            validity_ms: 3_600_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseConfig {
    pub url: String,
    pub user: String,
    pub password: String,
    pub max_pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "jdbc:postgresql://localhost:5432/dune_ttrpg".to_string(),
            user: "dune_app".to_string(),
            password: "password".to_string(),
            max_pool_size: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventConfig {
    /// Events returned by a feed request that names no limit
    pub feed_limit: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self { feed_limit: 100 }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub events: EventConfig,
    /// `tracing` filter directive, e.g. "info" or "landsraad_usecase=debug"
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            database: DatabaseConfig::default(),
            events: EventConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a JSON or YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        load_structured(path)
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text_overrides: [(&str, &mut String); 7] = [
            ("JWT_SECRET", &mut self.auth.secret),
            ("JWT_ISSUER", &mut self.auth.issuer),
            ("JWT_AUDIENCE", &mut self.auth.audience),
            ("DATABASE_URL", &mut self.database.url),
            ("DATABASE_USER", &mut self.database.user),
            ("DATABASE_PASSWORD", &mut self.database.password),
            ("LANDSRAAD_LOG", &mut self.log_filter),
        ];
        for (key, field) in text_overrides {
            if let Some(value) = lookup(key) {
                *field = value;
            }
        }
        self
    }
}

/// Deserialize a file, choosing the format from its extension
pub fn load_structured<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        other => Err(LandsraadError::Config(format!(
            "Unsupported file format '{}' for {}",
            other.unwrap_or(""),
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.events.feed_limit, 100);
        assert_eq!(config.auth.issuer, "dune-ttrpg");
        assert_eq!(config.database.max_pool_size, 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "events": {{ "feedLimit": 25 }}, "logFilter": "debug" }}"#).unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.events.feed_limit, 25);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.auth, AuthConfig::default());
    }

    #[test]
    fn test_yaml_config() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "database:\n  url: postgres://db/landsraad\n  maxPoolSize: 4").unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database.url, "postgres://db/landsraad");
        assert_eq!(config.database.max_pool_size, 4);
        assert_eq!(config.database.user, "dune_app");
    }

    #[test]
    fn test_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, LandsraadError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = GameConfig::default().with_overrides(|key| match key {
            "JWT_SECRET" => Some("spice-must-flow".to_string()),
            "LANDSRAAD_LOG" => Some("warn".to_string()),
            _ => None,
        });
        assert_eq!(config.auth.secret, "spice-must-flow");
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.database, DatabaseConfig::default());
    }
}
