//! ClipDeck Library
//!
//! Clip composition and draft organization: time ranges cut from a parent
//! video, rendering directives (aspect ratio, subtitles, text overlays), and
//! folder-based organization with best-effort batch edits.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::DraftOrganizer;
pub use domain::errors::{DomainError, GatewayError, RangeError, ValidationError};
pub use domain::model::{
    AspectRatio, BatchOutcome, Clip, ClipDraft, ClipId, ClipPatch, FailureReason, Folder, FolderId,
    SubtitleSettings, TimeRange, Video, VideoId,
};
pub use domain::overlays::{OverlayCollection, OverlayPatch, OverlayTemplate, TextOverlay};
pub use error::{ClipDeckError, ClipDeckResult};
