// TOML config adapter - Configuration management using TOML files

use crate::domain::errors::*;
use crate::domain::model::AspectRatio;
use crate::ports::*;
use crate::utils::logging::{LogFormat, LogLevel};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

pub const KEY_STORE_PATH: &str = "store_path";
pub const KEY_LOG_LEVEL: &str = "log_level";
pub const KEY_LOG_FORMAT: &str = "log_format";
pub const KEY_DEFAULT_ASPECT_RATIO: &str = "default_aspect_ratio";

const SECTION: &str = "clipdeck";

fn default_entries() -> HashMap<String, String> {
    [
        (KEY_STORE_PATH, "clipdeck_store.json"),
        (KEY_LOG_LEVEL, "info"),
        (KEY_LOG_FORMAT, "pretty"),
        (KEY_DEFAULT_ASPECT_RATIO, "9:16"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config: RwLock<HashMap<String, String>>,
    config_file_path: RwLock<Option<PathBuf>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter holding the defaults
    pub fn new() -> Self {
        Self {
            config: RwLock::new(default_entries()),
            config_file_path: RwLock::new(None),
        }
    }

    /// Path of the last file loaded, if any
    pub async fn config_file_path(&self) -> Option<PathBuf> {
        self.config_file_path.read().await.clone()
    }

    /// Merge the `[clipdeck]` table of a TOML document into the current values
    pub async fn merge_toml(&self, toml_content: &str) -> Result<(), DomainError> {
        let parsed: toml::Table = toml::from_str(toml_content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))?;

        let section = match parsed.get(SECTION) {
            Some(value) => value.as_table().ok_or_else(|| {
                DomainError::Config(format!("[{}] must be a table", SECTION))
            })?,
            None => return Ok(()),
        };

        let mut config = self.config.write().await;
        for (key, value) in section {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            config.insert(key.clone(), text);
        }
        Ok(())
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.config.read().await.get(key).cloned())
    }

    async fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, DomainError> {
        Ok(self
            .config
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }

    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.config
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        tracing::debug!("Set config {} = {}", key, value);
        Ok(())
    }

    async fn load_config(&self, file_path: &str) -> Result<(), DomainError> {
        let path = PathBuf::from(file_path);
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            DomainError::Config(format!("Failed to read config file {}: {}", file_path, e))
        })?;

        self.merge_toml(&content).await?;
        *self.config_file_path.write().await = Some(path);
        Ok(())
    }

    async fn load_default_config(&self) -> Result<(), DomainError> {
        *self.config.write().await = default_entries();
        Ok(())
    }

    async fn validate_config(&self) -> Result<(), DomainError> {
        let config = self.config.read().await;

        if let Some(level) = config.get(KEY_LOG_LEVEL) {
            LogLevel::parse(level).map_err(DomainError::Config)?;
        }
        if let Some(format) = config.get(KEY_LOG_FORMAT) {
            LogFormat::parse(format).map_err(DomainError::Config)?;
        }
        if let Some(ratio) = config.get(KEY_DEFAULT_ASPECT_RATIO) {
            AspectRatio::parse(ratio).map_err(|e| DomainError::Config(e.to_string()))?;
        }
        if let Some(path) = config.get(KEY_STORE_PATH) {
            if path.trim().is_empty() {
                return Err(DomainError::Config("store_path cannot be empty".to_string()));
            }
        }
        Ok(())
    }

    async fn get_all_config_keys(&self) -> Result<Vec<String>, DomainError> {
        let mut keys: Vec<String> = self.config.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_are_valid() {
        let adapter = TomlConfigAdapter::new();
        adapter.validate_config().await.unwrap();
        assert_eq!(
            adapter.get_config(KEY_STORE_PATH).await.unwrap().as_deref(),
            Some("clipdeck_store.json")
        );
    }

    #[tokio::test]
    async fn test_merge_overrides_section_values() {
        let adapter = TomlConfigAdapter::new();
        adapter
            .merge_toml("[clipdeck]\nlog_level = \"debug\"\ndefault_aspect_ratio = \"16:9\"\n")
            .await
            .unwrap();

        assert_eq!(adapter.get_config_or_default(KEY_LOG_LEVEL, "x").await.unwrap(), "debug");
        assert_eq!(adapter.get_config_or_default(KEY_LOG_FORMAT, "x").await.unwrap(), "pretty");
        adapter.validate_config().await.unwrap();
    }

    #[tokio::test]
    async fn test_validate_rejects_bad_values() {
        let adapter = TomlConfigAdapter::new();
        adapter.set_config(KEY_DEFAULT_ASPECT_RATIO, "3:2").await.unwrap();
        assert!(adapter.validate_config().await.is_err());

        adapter.load_default_config().await.unwrap();
        adapter.set_config(KEY_LOG_LEVEL, "loud").await.unwrap();
        assert!(adapter.validate_config().await.is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_config_error() {
        let adapter = TomlConfigAdapter::new();
        let err = adapter.load_config("/definitely/not/here.toml").await.unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
        assert!(adapter.config_file_path().await.is_none());
    }
}
