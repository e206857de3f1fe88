// Domain rules - Business logic and policies

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Rules for a clip's time interval within its parent video
pub struct RangeRules;

impl RangeRules {
    /// Accept iff `0 <= start < end` and, when the parent duration is known,
    /// `end <= parent_duration`.
    pub fn validate(start: f64, end: f64, parent_duration: u64) -> Result<(), RangeError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(RangeError::OutOfBounds {
                start,
                end,
                duration: parent_duration,
            });
        }
        if start >= end {
            return Err(RangeError::InvertedRange { start, end });
        }
        if start < 0.0 || (parent_duration > 0 && end > parent_duration as f64) {
            return Err(RangeError::OutOfBounds {
                start,
                end,
                duration: parent_duration,
            });
        }
        Ok(())
    }

    /// Display form `M:SS`, display only
    pub fn format(seconds: f64) -> String {
        crate::utils::time::format_clock(seconds)
    }

    /// Cap a proposed end at the parent duration when that duration is known
    pub fn clamp_end(proposed_end: f64, parent_duration: u64) -> f64 {
        if parent_duration > 0 {
            proposed_end.min(parent_duration as f64)
        } else {
            proposed_end
        }
    }
}

/// Rules for creating and editing clips
pub struct ClipRules;

impl ClipRules {
    /// Turn a draft into an insert payload for `parent`
    pub fn create_clip(parent: &Video, draft: ClipDraft) -> Result<NewClip, ValidationError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        draft.range.validate(parent.duration)?;

        Ok(NewClip {
            video_id: parent.id,
            folder_id: draft.folder_id,
            title: title.to_string(),
            range: draft.range,
            aspect_ratio: draft.aspect_ratio,
            subtitle_enabled: draft.subtitle_enabled,
            subtitle_settings: draft.subtitle_settings,
            text_overlays: draft.text_overlays,
        })
    }

    /// Check the parts of a patch that carry invariants.
    ///
    /// The range is only checked when the patch replaces it.
    pub fn validate_patch(patch: &ClipPatch, parent_duration: u64) -> Result<(), ValidationError> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(ValidationError::MissingTitle);
            }
        }
        if let Some(range) = &patch.range {
            range.validate(parent_duration)?;
        }
        if let Some(overlays) = &patch.text_overlays {
            if overlays.iter().any(|overlay| overlay.font_size == 0) {
                return Err(ValidationError::InvalidFontSize);
            }
        }
        Ok(())
    }
}

/// Rules for folders
pub struct FolderRules;

impl FolderRules {
    /// Trimmed, non-empty folder name
    pub fn normalize_name(name: &str) -> Result<String, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(trimmed.to_string())
    }

    /// Canonical display order: newest first, ties by identifier
    pub fn sort_for_display(folders: &mut [Folder]) {
        folders.sort_by_key(|folder| Reverse((folder.created_at, folder.id)));
    }
}

/// Clips grouped by folder for display
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a> {
    /// Every known folder in display order, with its clips (possibly none)
    pub by_folder: Vec<(&'a Folder, Vec<&'a Clip>)>,
    pub unorganized: Vec<&'a Clip>,
}

impl<'a> Partition<'a> {
    /// Clips of one folder, if that folder is part of the projection
    pub fn clips_in(&self, folder_id: FolderId) -> Option<&[&'a Clip]> {
        self.by_folder
            .iter()
            .find(|(folder, _)| folder.id == folder_id)
            .map(|(_, clips)| clips.as_slice())
    }

    pub fn total_clips(&self) -> usize {
        self.unorganized.len() + self.by_folder.iter().map(|(_, clips)| clips.len()).sum::<usize>()
    }
}

/// Project clips onto folders, keeping the input order inside each group.
///
/// A clip whose folder is not in `folders` lands in `unorganized`, so every
/// clip shows up exactly once.
pub fn partition<'a>(clips: &'a [Clip], folders: &'a [Folder]) -> Partition<'a> {
    let mut by_folder: Vec<(&'a Folder, Vec<&'a Clip>)> =
        folders.iter().map(|folder| (folder, Vec::new())).collect();
    let slots: HashMap<FolderId, usize> = folders
        .iter()
        .enumerate()
        .map(|(index, folder)| (folder.id, index))
        .collect();
    let mut unorganized = Vec::new();

    for clip in clips {
        match clip.folder_id.and_then(|folder_id| slots.get(&folder_id)) {
            Some(&slot) => by_folder[slot].1.push(clip),
            None => unorganized.push(clip),
        }
    }

    Partition {
        by_folder,
        unorganized,
    }
}

#[cfg(test)]
mod tests;
