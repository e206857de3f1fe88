//! CLI module for ClipDeck
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// ClipDeck
///
/// Cut short clips out of long videos, style them, and keep them organized
/// in folders.
#[derive(Parser, Debug)]
#[command(name = "clipdeck")]
#[command(about = "ClipDeck - Clip drafts and folders for short-form video")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (TOML, `[clipdeck]` table)
    #[arg(long, global = true, env = "CLIPDECK_CONFIG")]
    pub config: Option<String>,

    /// Record store file
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Logging level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register, list and delete parent videos
    Video {
        #[command(subcommand)]
        action: args::VideoCommand,
    },
    /// Manage folders
    Folder {
        #[command(subcommand)]
        action: args::FolderCommand,
    },
    /// Create, edit, move and delete clips
    Clip {
        #[command(subcommand)]
        action: args::ClipCommand,
    },
    /// Show clips grouped by folder
    Tree,
    /// Print the effective configuration
    Config,
}
