//! Command-line argument definitions

use clap::{Args, Subcommand};

/// Video subcommands
#[derive(Subcommand, Debug)]
pub enum VideoCommand {
    /// Register an already ingested video
    Add(VideoAddArgs),
    /// List videos, newest first
    List,
    /// Delete a video and all of its clips
    Delete {
        /// Video id
        id: String,
    },
}

/// Arguments for `video add`
#[derive(Args, Debug)]
pub struct VideoAddArgs {
    /// Display title
    #[arg(short, long)]
    pub title: String,

    /// Source locator (upload path or link)
    #[arg(short, long)]
    pub url: String,

    /// Source kind (upload, youtube)
    #[arg(long, default_value = "upload")]
    pub kind: String,

    /// Duration in whole seconds, 0 when unknown
    #[arg(short, long, default_value_t = 0)]
    pub duration: u64,
}

/// Folder subcommands
#[derive(Subcommand, Debug)]
pub enum FolderCommand {
    /// Create a folder
    Create {
        /// Folder name
        name: String,
    },
    /// Rename a folder
    Rename {
        /// Folder id
        id: String,
        /// New name
        name: String,
    },
    /// Delete a folder; its clips become unorganized
    Delete {
        /// Folder id
        id: String,
    },
    /// List folders, newest first
    List,
}

/// Clip subcommands
#[derive(Subcommand, Debug)]
pub enum ClipCommand {
    /// Create a clip from a video
    Create(ClipCreateArgs),
    /// List clips
    List(ClipListArgs),
    /// Edit one clip
    Edit(ClipEditArgs),
    /// Move clips into a folder, or out of any folder when --folder is omitted
    Move {
        /// Clip ids
        #[arg(required = true)]
        ids: Vec<String>,
        /// Target folder id
        #[arg(short, long)]
        folder: Option<String>,
    },
    /// Delete clips
    Delete {
        /// Clip ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Arguments for `clip create`
#[derive(Args, Debug)]
pub struct ClipCreateArgs {
    /// Parent video id
    #[arg(short, long)]
    pub video: String,

    /// Clip title
    #[arg(short, long)]
    pub title: String,

    /// Start time (seconds, M:SS, or H:MM:SS)
    #[arg(short, long)]
    pub start: String,

    /// End time (seconds, M:SS, or H:MM:SS)
    #[arg(short, long)]
    pub end: String,

    /// Aspect ratio (9:16, 1:1, 4:5, 16:9); configured default when omitted
    #[arg(long)]
    pub aspect: Option<String>,

    /// Burn in subtitles
    #[arg(long)]
    pub subtitles: bool,

    /// Subtitle font
    #[arg(long, default_value = "Inter")]
    pub font: String,

    /// Subtitle design
    #[arg(long, default_value = "classic")]
    pub design: String,

    /// Subtitle highlight marker (repeatable)
    #[arg(long = "highlight")]
    pub highlights: Vec<String>,

    /// Text overlay (repeatable)
    #[arg(long = "overlay")]
    pub overlays: Vec<String>,

    /// Folder id to file the clip under
    #[arg(short, long)]
    pub folder: Option<String>,
}

/// Arguments for `clip list`
#[derive(Args, Debug)]
pub struct ClipListArgs {
    /// Only clips in this folder
    #[arg(short, long, conflicts_with = "unorganized")]
    pub folder: Option<String>,

    /// Only clips without a folder
    #[arg(long)]
    pub unorganized: bool,
}

/// Arguments for `clip edit`
#[derive(Args, Debug)]
pub struct ClipEditArgs {
    /// Clip id
    pub id: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New start time
    #[arg(short, long)]
    pub start: Option<String>,

    /// New end time; capped at the video duration when that is known
    #[arg(short, long)]
    pub end: Option<String>,

    /// New aspect ratio
    #[arg(long)]
    pub aspect: Option<String>,

    /// Turn subtitles on or off
    #[arg(long)]
    pub subtitles: Option<bool>,

    /// New subtitle font
    #[arg(long)]
    pub font: Option<String>,

    /// New subtitle design
    #[arg(long)]
    pub design: Option<String>,
}
