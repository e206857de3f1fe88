//! ClipDeck CLI
//!
//! Cut short clips out of long videos and keep them organized in folders.
//!
//! # Usage
//!
//! ```bash
//! clipdeck video add --title "Episode 12" --url uploads/ep12.mp4 --duration 3600
//! clipdeck folder create "Intro Cuts"
//! clipdeck clip create --video <VIDEO_ID> --title "Cold open" --start 0:10 --end 0:40
//! clipdeck clip move <CLIP_ID> --folder <FOLDER_ID>
//! clipdeck tree
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use clipdeck::adapters::TomlConfigAdapter;
use clipdeck::app::DefaultAppContainer;
use clipdeck::cli::{commands, Cli};
use clipdeck::config_initialization::initialize_configuration_hierarchy;
use clipdeck::utils::logging::LoggingSystem;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Arc::new(TomlConfigAdapter::new());
    let settings = initialize_configuration_hierarchy(&config, &cli).await?;

    LoggingSystem::new(settings.logging.clone()).initialize();
    debug!(store = %settings.store_path, "Starting ClipDeck");

    let container = DefaultAppContainer::open(&settings.store_path, Arc::clone(&config)).await?;
    commands::execute(&container, &settings, cli.command).await
}
