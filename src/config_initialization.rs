//! Configuration initialization and hierarchy management

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::adapters::toml_config::*;
use crate::cli::Cli;
use crate::domain::model::AspectRatio;
use crate::ports::ConfigPort;
use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "clipdeck.toml";

/// Resolved settings the binary runs with
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub store_path: String,
    pub logging: LoggingConfig,
    pub default_aspect_ratio: AspectRatio,
}

/// Initialize configuration following precedence: CLI > Env > File > Defaults
pub async fn initialize_configuration_hierarchy(config: &TomlConfigAdapter, cli: &Cli) -> Result<Settings> {
    // Step 1: defaults are loaded by TomlConfigAdapter::new()
    // Step 2: file
    load_config_file(config, cli.config.as_deref()).await?;

    // Step 3: environment
    load_environment_variables(config).await?;

    // Step 4: command line
    apply_cli_configuration_overrides(config, cli).await?;

    config
        .validate_config()
        .await
        .context("Invalid configuration")?;
    resolve_settings(config).await
}

/// Load the explicit config file, or the default one if it exists
async fn load_config_file(config: &TomlConfigAdapter, explicit: Option<&str>) -> Result<()> {
    match explicit {
        Some(path) => {
            config
                .load_config(path)
                .await
                .with_context(|| format!("Failed to load configuration from {}", path))?;
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            config
                .load_config(DEFAULT_CONFIG_FILE)
                .await
                .with_context(|| format!("Failed to load configuration from {}", DEFAULT_CONFIG_FILE))?;
        }
        None => debug!("No configuration file found, using defaults"),
    }
    Ok(())
}

/// Environment variables mapped onto configuration keys
pub const ENV_MAPPINGS: [(&str, &str); 4] = [
    ("CLIPDECK_STORE_PATH", KEY_STORE_PATH),
    ("CLIPDECK_LOG_LEVEL", KEY_LOG_LEVEL),
    ("CLIPDECK_LOG_FORMAT", KEY_LOG_FORMAT),
    ("CLIPDECK_DEFAULT_ASPECT_RATIO", KEY_DEFAULT_ASPECT_RATIO),
];

/// Apply environment variable overrides
async fn load_environment_variables(config: &TomlConfigAdapter) -> Result<()> {
    for (env_var, key) in ENV_MAPPINGS {
        if let Ok(value) = std::env::var(env_var) {
            debug!("Environment override: {} = {}", env_var, value);
            config.set_config(key, &value).await?;
        }
    }
    Ok(())
}

/// Apply command-line overrides
async fn apply_cli_configuration_overrides(config: &TomlConfigAdapter, cli: &Cli) -> Result<()> {
    let overrides = [
        (KEY_STORE_PATH, cli.store.as_deref()),
        (KEY_LOG_LEVEL, cli.log_level.as_deref()),
        (KEY_LOG_FORMAT, cli.log_format.as_deref()),
    ];
    for (key, value) in overrides {
        if let Some(value) = value {
            debug!("CLI override: {} = {}", key, value);
            config.set_config(key, value).await?;
        }
    }
    Ok(())
}

/// Turn validated key/value configuration into typed settings
pub async fn resolve_settings(config: &TomlConfigAdapter) -> Result<Settings> {
    let store_path = config.get_config_or_default(KEY_STORE_PATH, "clipdeck_store.json").await?;
    let level = config.get_config_or_default(KEY_LOG_LEVEL, "info").await?;
    let format = config.get_config_or_default(KEY_LOG_FORMAT, "pretty").await?;
    let ratio = config.get_config_or_default(KEY_DEFAULT_ASPECT_RATIO, "9:16").await?;

    Ok(Settings {
        store_path,
        logging: LoggingConfig {
            level: LogLevel::parse(&level).map_err(anyhow::Error::msg)?,
            format: LogFormat::parse(&format).map_err(anyhow::Error::msg)?,
            ..LoggingConfig::default()
        },
        default_aspect_ratio: AspectRatio::parse(&ratio)?,
    })
}
