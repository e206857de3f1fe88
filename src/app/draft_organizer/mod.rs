// Draft organizer - Folders, selection and batch edits over the loaded clips

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// UI-local state. Never persisted, rebuilt empty on every load.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ViewState {
    selected: HashSet<ClipId>,
    expanded: HashSet<FolderId>,
}

/// Owner of the in-memory videos, folders and clips of one session.
///
/// Local collections change only after the gateway confirmed a write, and
/// only for the ids it confirmed. Every mutation takes `&mut self`, so a
/// second write cannot start while a previous gateway call is pending.
pub struct DraftOrganizer {
    gateway: Arc<dyn PersistenceGateway>,
    videos: Vec<Video>,
    folders: Vec<Folder>,
    clips: Vec<Clip>,
    view: ViewState,
}

impl DraftOrganizer {
    /// Create an organizer with nothing loaded yet
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            gateway,
            videos: Vec::new(),
            folders: Vec::new(),
            clips: Vec::new(),
            view: ViewState::default(),
        }
    }

    /// Fetch everything from the gateway and reset the view state.
    ///
    /// On failure the previously loaded state is kept.
    pub async fn load(&mut self) -> Result<(), DomainError> {
        let videos = self.gateway.list_videos().await?;
        let mut folders = self.gateway.list_folders().await?;
        let clips = self.gateway.list_clips().await?;
        FolderRules::sort_for_display(&mut folders);

        info!(
            videos = videos.len(),
            folders = folders.len(),
            clips = clips.len(),
            "Loaded drafts"
        );
        self.videos = videos;
        self.folders = folders;
        self.clips = clips;
        self.view = ViewState::default();
        Ok(())
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    /// Folders in display order
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Clips, newest first
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn video(&self, id: VideoId) -> Option<&Video> {
        self.videos.iter().find(|video| video.id == id)
    }

    pub fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.id == id)
    }

    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|clip| clip.id == id)
    }

    /// Current grouping of clips by folder
    pub fn partition(&self) -> Partition<'_> {
        partition(&self.clips, &self.folders)
    }

    // -- selection ---------------------------------------------------------

    /// Flip membership of `id` in the selection. Returns whether it is now selected.
    ///
    /// Ids that are not loaded are ignored.
    pub fn toggle_select(&mut self, id: ClipId) -> bool {
        if self.clip(id).is_none() {
            debug!(clip_id = %id, "Ignoring selection of unknown clip");
            return false;
        }
        if self.view.selected.remove(&id) {
            false
        } else {
            self.view.selected.insert(id);
            true
        }
    }

    pub fn select_all(&mut self) {
        self.view.selected = self.clips.iter().map(|clip| clip.id).collect();
    }

    pub fn clear_selection(&mut self) {
        self.view.selected.clear();
    }

    pub fn is_selected(&self, id: ClipId) -> bool {
        self.view.selected.contains(&id)
    }

    /// Selected ids in clip display order
    pub fn selected_ids(&self) -> Vec<ClipId> {
        self.clips
            .iter()
            .map(|clip| clip.id)
            .filter(|id| self.view.selected.contains(id))
            .collect()
    }

    /// Flip whether a folder is shown expanded. Returns the new state.
    pub fn toggle_expanded(&mut self, id: FolderId) -> bool {
        if self.view.expanded.remove(&id) {
            false
        } else {
            self.view.expanded.insert(id);
            true
        }
    }

    pub fn is_expanded(&self, id: FolderId) -> bool {
        self.view.expanded.contains(&id)
    }

    // -- folders -----------------------------------------------------------

    pub async fn create_folder(&mut self, name: &str) -> Result<Folder, DomainError> {
        let name = FolderRules::normalize_name(name)?;
        let folder = self.gateway.insert_folder(&name).await?;

        info!(folder_id = %folder.id, name = %folder.name, "Created folder");
        self.folders.push(folder.clone());
        FolderRules::sort_for_display(&mut self.folders);
        Ok(folder)
    }

    pub async fn rename_folder(&mut self, id: FolderId, name: &str) -> Result<(), DomainError> {
        let name = FolderRules::normalize_name(name)?;
        if self.folder(id).is_none() {
            return Err(DomainError::not_found(Entity::Folder, id));
        }
        self.gateway.update_folder(id, &name).await?;

        if let Some(folder) = self.folders.iter_mut().find(|folder| folder.id == id) {
            info!(folder_id = %id, from = %folder.name, to = %name, "Renamed folder");
            folder.name = name;
        }
        Ok(())
    }

    /// Delete a folder. Its clips stay and become unassigned.
    ///
    /// Returns how many clips were detached.
    pub async fn delete_folder(&mut self, id: FolderId) -> Result<usize, DomainError> {
        if self.folder(id).is_none() {
            return Err(DomainError::not_found(Entity::Folder, id));
        }
        self.gateway.delete_folder(id).await?;

        // mirror the store's set-null before the folder disappears locally
        let mut detached = 0;
        for clip in self.clips.iter_mut().filter(|clip| clip.folder_id == Some(id)) {
            clip.folder_id = None;
            detached += 1;
        }
        self.folders.retain(|folder| folder.id != id);
        self.view.expanded.remove(&id);

        info!(folder_id = %id, detached, "Deleted folder");
        Ok(detached)
    }

    // -- clips -------------------------------------------------------------

    /// Validate a draft against its parent video and persist it
    pub async fn create_clip(&mut self, video_id: VideoId, draft: ClipDraft) -> Result<Clip, DomainError> {
        let parent = self
            .video(video_id)
            .ok_or_else(|| DomainError::not_found(Entity::Video, video_id))?;
        let new_clip = ClipRules::create_clip(parent, draft)?;
        if let Some(folder_id) = new_clip.folder_id {
            if self.folder(folder_id).is_none() {
                return Err(DomainError::not_found(Entity::Folder, folder_id));
            }
        }

        let clip = self.gateway.insert_clip(new_clip).await?;
        info!(clip_id = %clip.id, video_id = %clip.video_id, range = %clip.range, "Created clip");
        self.clips.insert(0, clip.clone());
        Ok(clip)
    }

    /// Direct edit of one clip
    pub async fn update_clip(&mut self, id: ClipId, patch: ClipPatch) -> Result<Clip, DomainError> {
        let target_folder = patch.folder_id.flatten();
        let outcome = self.batch_edit(&[id], patch).await?;
        if let Some((_, reason)) = outcome.failed.into_iter().next() {
            return Err(Self::failure_to_error(id, target_folder, reason));
        }
        self.clip(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(Entity::Clip, id))
    }

    /// Move a clip's range, capping the end at the parent duration when known
    pub async fn trim_clip(&mut self, id: ClipId, start: f64, proposed_end: f64) -> Result<Clip, DomainError> {
        let clip = self
            .clip(id)
            .ok_or_else(|| DomainError::not_found(Entity::Clip, id))?;
        let duration = self.parent_duration(clip).unwrap_or(0);
        let end = RangeRules::clamp_end(proposed_end, duration);
        self.update_clip(id, ClipPatch::default().with_range(TimeRange::unchecked(start, end)))
            .await
    }

    /// Assign clips to a folder, or unassign them with `None`
    pub async fn move_to_folder(
        &mut self,
        ids: &[ClipId],
        folder_id: Option<FolderId>,
    ) -> Result<BatchOutcome, DomainError> {
        self.batch_edit(ids, ClipPatch::move_to(folder_id)).await
    }

    pub async fn move_selection_to(&mut self, folder_id: Option<FolderId>) -> Result<BatchOutcome, DomainError> {
        let ids = self.selected_ids();
        self.move_to_folder(&ids, folder_id).await
    }

    /// Best-effort edit of many clips in one gateway request.
    ///
    /// Ids failing local checks are reported without being sent. Only ids the
    /// gateway confirmed are changed locally. `Err` means the request failed
    /// as a whole and nothing changed.
    pub async fn batch_edit(&mut self, ids: &[ClipId], patch: ClipPatch) -> Result<BatchOutcome, DomainError> {
        let mut outcome = BatchOutcome::new();
        let mut accepted = Vec::new();

        for id in dedup(ids) {
            match self.precheck_edit(id, &patch) {
                Ok(()) => accepted.push(id),
                Err(reason) => {
                    debug!(clip_id = %id, %reason, "Edit rejected locally");
                    outcome.record_failure(id, reason);
                }
            }
        }
        if accepted.is_empty() {
            return Ok(outcome);
        }

        let remote = self.gateway.update_clips_batch(&accepted, &patch).await?;
        let confirmed = reconcile(&accepted, remote, &mut outcome);

        let now = Utc::now();
        for clip in self.clips.iter_mut().filter(|clip| confirmed.contains(&clip.id)) {
            patch.apply_to(clip);
            clip.updated_at = now;
        }

        if outcome.is_complete() {
            info!(updated = confirmed.len(), "Batch edit committed");
        } else {
            warn!(
                updated = confirmed.len(),
                failed = outcome.failed.len(),
                "Batch edit partially failed"
            );
        }
        Ok(outcome)
    }

    /// Best-effort delete; deleted ids also leave the selection
    pub async fn delete_clips(&mut self, ids: &[ClipId]) -> Result<BatchOutcome, DomainError> {
        let mut outcome = BatchOutcome::new();
        let mut accepted = Vec::new();

        for id in dedup(ids) {
            if self.clip(id).is_some() {
                accepted.push(id);
            } else {
                outcome.record_failure(id, FailureReason::ClipNotFound);
            }
        }
        if accepted.is_empty() {
            return Ok(outcome);
        }

        let remote = self.gateway.delete_clips_batch(&accepted).await?;
        let confirmed = reconcile(&accepted, remote, &mut outcome);

        self.clips.retain(|clip| !confirmed.contains(&clip.id));
        for id in &confirmed {
            self.view.selected.remove(id);
        }

        if outcome.is_complete() {
            info!(deleted = confirmed.len(), "Deleted clips");
        } else {
            warn!(
                deleted = confirmed.len(),
                failed = outcome.failed.len(),
                "Clip deletion partially failed"
            );
        }
        Ok(outcome)
    }

    pub async fn delete_selection(&mut self) -> Result<BatchOutcome, DomainError> {
        let ids = self.selected_ids();
        self.delete_clips(&ids).await
    }

    /// Delete a parent video. Its clips go with it, locally as in storage.
    ///
    /// Returns how many clips were removed.
    pub async fn delete_video(&mut self, id: VideoId) -> Result<usize, DomainError> {
        if self.video(id).is_none() {
            return Err(DomainError::not_found(Entity::Video, id));
        }
        self.gateway.delete_video(id).await?;

        let before = self.clips.len();
        let selected = &mut self.view.selected;
        self.clips.retain(|clip| {
            let keep = clip.video_id != id;
            if !keep {
                selected.remove(&clip.id);
            }
            keep
        });
        self.videos.retain(|video| video.id != id);

        let removed = before - self.clips.len();
        info!(video_id = %id, removed, "Deleted video");
        Ok(removed)
    }

    fn parent_duration(&self, clip: &Clip) -> Option<u64> {
        self.video(clip.video_id).map(|video| video.duration)
    }

    fn precheck_edit(&self, id: ClipId, patch: &ClipPatch) -> Result<(), FailureReason> {
        let clip = self.clip(id).ok_or(FailureReason::ClipNotFound)?;

        if let Some(Some(folder_id)) = patch.folder_id {
            if self.folder(folder_id).is_none() {
                return Err(FailureReason::FolderNotFound);
            }
        }

        let duration = match (&patch.range, self.parent_duration(clip)) {
            (Some(_), None) => {
                return Err(FailureReason::Rejected("parent video is not loaded".to_string()))
            }
            (_, duration) => duration.unwrap_or(0),
        };
        ClipRules::validate_patch(patch, duration).map_err(FailureReason::Invalid)
    }

    fn failure_to_error(id: ClipId, folder_id: Option<FolderId>, reason: FailureReason) -> DomainError {
        match reason {
            FailureReason::ClipNotFound => DomainError::not_found(Entity::Clip, id),
            FailureReason::FolderNotFound => DomainError::NotFound {
                entity: Entity::Folder,
                id: folder_id.map(|f| f.to_string()).unwrap_or_default(),
            },
            FailureReason::Invalid(err) => DomainError::Validation(err),
            FailureReason::Rejected(message) => DomainError::Gateway(GatewayError::storage(message)),
        }
    }
}

/// Ids in first-seen order without repeats
fn dedup(ids: &[ClipId]) -> Vec<ClipId> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Fold the gateway's report into `outcome` and return the confirmed ids.
///
/// An id the gateway neither confirmed nor reported counts as failed.
fn reconcile(sent: &[ClipId], remote: BatchOutcome, outcome: &mut BatchOutcome) -> HashSet<ClipId> {
    let sent_set: HashSet<ClipId> = sent.iter().copied().collect();
    let confirmed: HashSet<ClipId> = remote
        .succeeded
        .iter()
        .copied()
        .filter(|id| sent_set.contains(id))
        .collect();
    let reported: HashSet<ClipId> = remote.failed.iter().map(|(id, _)| *id).collect();

    for id in sent {
        if confirmed.contains(id) {
            outcome.record_success(*id);
        }
    }
    for (id, reason) in remote.failed {
        if sent_set.contains(&id) && !confirmed.contains(&id) {
            outcome.record_failure(id, reason);
        }
    }
    for id in sent {
        if !confirmed.contains(id) && !reported.contains(id) {
            outcome.record_failure(*id, FailureReason::Rejected("no confirmation from store".to_string()));
        }
    }
    confirmed
}
