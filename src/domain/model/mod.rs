// Domain models - Core types and data structures

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::*;
use crate::domain::overlays::OverlayCollection;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Fresh time-ordered identifier, as the store hands out on insert
            pub fn generate() -> Self {
                Self(Uuid::now_v7())
            }

            /// Parse the textual form used on the wire and in the CLI
            pub fn parse(value: &str) -> Result<Self, DomainError> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| DomainError::Config(format!("'{}' is not a valid identifier", value)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a parent video
    VideoId
);
record_id!(
    /// Identifier of a folder
    FolderId
);
record_id!(
    /// Identifier of a persisted clip
    ClipId
);

/// Where a parent video came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Upload,
    Youtube,
}

impl SourceKind {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_lowercase().as_str() {
            "upload" => Ok(SourceKind::Upload),
            "youtube" => Ok(SourceKind::Youtube),
            _ => Err(ValidationError::UnknownTag {
                kind: "source kind",
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Upload => "upload",
            SourceKind::Youtube => "youtube",
        }
    }
}

/// Parent video. Produced by ingestion, referenced by clips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub source_type: SourceKind,
    pub source_url: String,
    /// Whole seconds, `0` when unknown
    pub duration: u64,
    pub created_at: DateTime<Utc>,
}

impl Video {
    /// Whether the duration was resolved at ingestion time
    pub fn has_known_duration(&self) -> bool {
        self.duration > 0
    }
}

/// Ingestion payload for a video, before the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub title: String,
    pub source_type: SourceKind,
    pub source_url: String,
    pub duration: u64,
}

/// Named container for clips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Output frame shape of a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:5")]
    Vertical,
    #[serde(rename = "16:9")]
    Landscape,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 4] = [
        AspectRatio::Portrait,
        AspectRatio::Square,
        AspectRatio::Vertical,
        AspectRatio::Landscape,
    ];

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value_trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == value_trimmed)
            .ok_or_else(|| ValidationError::UnknownTag {
                kind: "aspect ratio",
                value: value.to_string(),
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Portrait => "9:16",
            AspectRatio::Square => "1:1",
            AspectRatio::Vertical => "4:5",
            AspectRatio::Landscape => "16:9",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subtitle typeface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubtitleFont {
    #[default]
    Inter,
    Montserrat,
    Poppins,
    Roboto,
    #[serde(rename = "Bebas Neue")]
    BebasNeue,
}

impl SubtitleFont {
    pub const ALL: [SubtitleFont; 5] = [
        SubtitleFont::Inter,
        SubtitleFont::Montserrat,
        SubtitleFont::Poppins,
        SubtitleFont::Roboto,
        SubtitleFont::BebasNeue,
    ];

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let wanted = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|font| font.as_str().to_lowercase() == wanted)
            .ok_or_else(|| ValidationError::UnknownTag {
                kind: "subtitle font",
                value: value.to_string(),
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubtitleFont::Inter => "Inter",
            SubtitleFont::Montserrat => "Montserrat",
            SubtitleFont::Poppins => "Poppins",
            SubtitleFont::Roboto => "Roboto",
            SubtitleFont::BebasNeue => "Bebas Neue",
        }
    }
}

/// Subtitle look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleDesign {
    #[default]
    Classic,
    Bold,
    Karaoke,
    Minimal,
    Neon,
}

impl SubtitleDesign {
    pub const ALL: [SubtitleDesign; 5] = [
        SubtitleDesign::Classic,
        SubtitleDesign::Bold,
        SubtitleDesign::Karaoke,
        SubtitleDesign::Minimal,
        SubtitleDesign::Neon,
    ];

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let wanted = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|design| design.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownTag {
                kind: "subtitle design",
                value: value.to_string(),
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubtitleDesign::Classic => "classic",
            SubtitleDesign::Bold => "bold",
            SubtitleDesign::Karaoke => "karaoke",
            SubtitleDesign::Minimal => "minimal",
            SubtitleDesign::Neon => "neon",
        }
    }
}

/// Subtitle styling. Kept on the clip even while subtitles are disabled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubtitleSettings {
    pub font: SubtitleFont,
    pub design: SubtitleDesign,
    /// Opaque markers, passed through unchanged
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Time interval `[start_time, end_time)` in seconds within the parent video
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_time: f64,
    pub end_time: f64,
}

impl TimeRange {
    /// Build a range checked against the parent duration (`0` = unknown)
    pub fn new(start_time: f64, end_time: f64, parent_duration: u64) -> Result<Self, RangeError> {
        crate::domain::rules::RangeRules::validate(start_time, end_time, parent_duration)?;
        Ok(Self {
            start_time,
            end_time,
        })
    }

    /// Build without checks. Call `validate` before persisting.
    pub fn unchecked(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    pub fn validate(&self, parent_duration: u64) -> Result<(), RangeError> {
        crate::domain::rules::RangeRules::validate(self.start_time, self.end_time, parent_duration)
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Half-open containment, used to map a playback position onto the clip
    pub fn contains(&self, position: f64) -> bool {
        position >= self.start_time && position < self.end_time
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            crate::utils::time::format_clock(self.start_time),
            crate::utils::time::format_clock(self.end_time)
        )
    }
}

/// Editable clip state before it is saved for the first time
#[derive(Debug, Clone, PartialEq)]
pub struct ClipDraft {
    pub title: String,
    pub range: TimeRange,
    pub aspect_ratio: AspectRatio,
    pub subtitle_enabled: bool,
    pub subtitle_settings: SubtitleSettings,
    pub text_overlays: OverlayCollection,
    pub folder_id: Option<FolderId>,
}

impl ClipDraft {
    /// Draft with default rendering directives
    pub fn new(title: impl Into<String>, range: TimeRange) -> Self {
        Self {
            title: title.into(),
            range,
            aspect_ratio: AspectRatio::default(),
            subtitle_enabled: false,
            subtitle_settings: SubtitleSettings::default(),
            text_overlays: OverlayCollection::new(),
            folder_id: None,
        }
    }
}

/// Validated insert payload. The store assigns `id`, `created_at`, `updated_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClip {
    pub video_id: VideoId,
    pub folder_id: Option<FolderId>,
    pub title: String,
    pub range: TimeRange,
    pub aspect_ratio: AspectRatio,
    pub subtitle_enabled: bool,
    pub subtitle_settings: SubtitleSettings,
    pub text_overlays: OverlayCollection,
}

/// Persisted clip record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: ClipId,
    pub video_id: VideoId,
    pub folder_id: Option<FolderId>,
    pub title: String,
    #[serde(flatten)]
    pub range: TimeRange,
    pub aspect_ratio: AspectRatio,
    pub subtitle_enabled: bool,
    pub subtitle_settings: SubtitleSettings,
    pub text_overlays: OverlayCollection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Clip {
    /// Materialize an insert payload with store-assigned fields
    pub fn from_new(id: ClipId, new_clip: NewClip, now: DateTime<Utc>) -> Self {
        Self {
            id,
            video_id: new_clip.video_id,
            folder_id: new_clip.folder_id,
            title: new_clip.title,
            range: new_clip.range,
            aspect_ratio: new_clip.aspect_ratio,
            subtitle_enabled: new_clip.subtitle_enabled,
            subtitle_settings: new_clip.subtitle_settings,
            text_overlays: new_clip.text_overlays,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn duration(&self) -> f64 {
        self.range.duration()
    }

    pub fn status(&self) -> ClipStatus {
        match self.folder_id {
            Some(folder_id) => ClipStatus::Assigned(folder_id),
            None => ClipStatus::Unassigned,
        }
    }
}

/// Organizational state of a single clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipStatus {
    Unassigned,
    Assigned(FolderId),
}

/// Partial update for a clip; `None` leaves a field untouched.
///
/// `folder_id` is doubly optional: `Some(None)` clears the folder,
/// `None` keeps whatever the clip has.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipPatch {
    pub folder_id: Option<Option<FolderId>>,
    pub title: Option<String>,
    pub range: Option<TimeRange>,
    pub aspect_ratio: Option<AspectRatio>,
    pub subtitle_enabled: Option<bool>,
    pub subtitle_settings: Option<SubtitleSettings>,
    pub text_overlays: Option<OverlayCollection>,
}

impl ClipPatch {
    /// Patch that only (re)assigns the folder
    pub fn move_to(folder_id: Option<FolderId>) -> Self {
        Self {
            folder_id: Some(folder_id),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    pub fn with_subtitles(mut self, enabled: bool) -> Self {
        self.subtitle_enabled = Some(enabled);
        self
    }

    pub fn with_subtitle_settings(mut self, settings: SubtitleSettings) -> Self {
        self.subtitle_settings = Some(settings);
        self
    }

    pub fn with_overlays(mut self, overlays: OverlayCollection) -> Self {
        self.text_overlays = Some(overlays);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge present fields into the clip. Validation happens before this.
    pub fn apply_to(&self, clip: &mut Clip) {
        if let Some(folder_id) = self.folder_id {
            clip.folder_id = folder_id;
        }
        if let Some(title) = &self.title {
            clip.title = title.trim().to_string();
        }
        if let Some(range) = self.range {
            clip.range = range;
        }
        if let Some(aspect_ratio) = self.aspect_ratio {
            clip.aspect_ratio = aspect_ratio;
        }
        if let Some(enabled) = self.subtitle_enabled {
            clip.subtitle_enabled = enabled;
        }
        if let Some(settings) = &self.subtitle_settings {
            clip.subtitle_settings = settings.clone();
        }
        if let Some(overlays) = &self.text_overlays {
            clip.text_overlays = overlays.clone();
        }
    }
}

/// Why one id in a batch did not go through
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FailureReason {
    #[error("target folder does not exist")]
    FolderNotFound,
    #[error("clip does not exist")]
    ClipNotFound,
    #[error("{0}")]
    Invalid(ValidationError),
    #[error("rejected by storage: {0}")]
    Rejected(String),
}

/// Per-id result of a best-effort batch operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub succeeded: Vec<ClipId>,
    pub failed: Vec<(ClipId, FailureReason)>,
}

impl BatchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, id: ClipId) {
        self.succeeded.push(id);
    }

    pub fn record_failure(&mut self, id: ClipId, reason: FailureReason) {
        self.failed.push((id, reason));
    }

    /// True when no id failed
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<ClipId> {
        self.failed.iter().map(|(id, _)| *id).collect()
    }

    pub fn reason_for(&self, id: ClipId) -> Option<&FailureReason> {
        self.failed
            .iter()
            .find(|(failed_id, _)| *failed_id == id)
            .map(|(_, reason)| reason)
    }

    /// Fold another outcome into this one, keeping order
    pub fn merge(&mut self, other: BatchOutcome) {
        self.succeeded.extend(other.succeeded);
        self.failed.extend(other.failed);
    }
}

#[cfg(test)]
mod tests;
