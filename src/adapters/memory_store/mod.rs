// In-memory record store - Reference implementation of the persistence gateway

use std::cmp::Reverse;
use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::FolderRules;
use crate::ports::*;

/// Every record the store holds, in a serializable form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub clips: Vec<Clip>,
}

#[derive(Debug, Default)]
struct StoreState {
    records: StoreSnapshot,
    last_stamp: Option<DateTime<Utc>>,
    rejected: HashSet<ClipId>,
    transport_down: bool,
}

impl StoreState {
    /// Strictly increasing timestamps so creation order is never ambiguous
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn check_transport(&self) -> Result<(), GatewayError> {
        if self.transport_down {
            return Err(GatewayError::transport("store unreachable"));
        }
        Ok(())
    }

    fn folder_exists(&self, id: FolderId) -> bool {
        self.records.folders.iter().any(|folder| folder.id == id)
    }
}

/// In-process store with server-side semantics: assigned ids and timestamps,
/// set-null on folder delete, cascade on video delete.
///
/// Faults can be injected to exercise partial-failure handling.
#[derive(Debug, Default)]
pub struct MemoryStoreAdapter {
    state: Mutex<StoreState>,
}

impl MemoryStoreAdapter {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with records
    pub fn from_snapshot(records: StoreSnapshot) -> Self {
        let last_stamp = records
            .videos
            .iter()
            .map(|video| video.created_at)
            .chain(records.folders.iter().map(|folder| folder.created_at))
            .chain(records.clips.iter().map(|clip| clip.updated_at.max(clip.created_at)))
            .max();
        Self {
            state: Mutex::new(StoreState {
                records,
                last_stamp,
                ..StoreState::default()
            }),
        }
    }

    /// Copy of all records
    pub async fn snapshot(&self) -> StoreSnapshot {
        self.state.lock().await.records.clone()
    }

    /// Replace all records, keeping the timestamp clock where it is
    pub async fn restore(&self, records: StoreSnapshot) {
        self.state.lock().await.records = records;
    }

    /// Register an ingested video. Ingestion itself lives outside the gateway port.
    pub async fn insert_video(&self, new_video: NewVideo) -> Result<Video, GatewayError> {
        let mut state = self.state.lock().await;
        state.check_transport()?;
        let video = Video {
            id: VideoId::generate(),
            title: new_video.title,
            source_type: new_video.source_type,
            source_url: new_video.source_url,
            duration: new_video.duration,
            created_at: state.stamp(),
        };
        state.records.videos.push(video.clone());
        debug!(video_id = %video.id, "Inserted video");
        Ok(video)
    }

    /// Make batch calls report these ids as rejected
    pub async fn reject_ids(&self, ids: &[ClipId]) {
        let mut state = self.state.lock().await;
        state.rejected.extend(ids.iter().copied());
    }

    /// Make every call fail with a transport error while `down` is set
    pub async fn fail_transport(&self, down: bool) {
        self.state.lock().await.transport_down = down;
    }

    /// Drop all injected faults
    pub async fn clear_faults(&self) {
        let mut state = self.state.lock().await;
        state.rejected.clear();
        state.transport_down = false;
    }
}

#[async_trait]
impl PersistenceGateway for MemoryStoreAdapter {
    async fn list_videos(&self) -> Result<Vec<Video>, GatewayError> {
        let state = self.state.lock().await;
        state.check_transport()?;
        let mut videos = state.records.videos.clone();
        videos.sort_by_key(|video| Reverse((video.created_at, video.id)));
        Ok(videos)
    }

    async fn delete_video(&self, id: VideoId) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        state.check_transport()?;
        let before = state.records.videos.len();
        state.records.videos.retain(|video| video.id != id);
        if state.records.videos.len() == before {
            return Err(GatewayError::not_found(Entity::Video, id));
        }
        state.records.clips.retain(|clip| clip.video_id != id);
        debug!(video_id = %id, "Deleted video and its clips");
        Ok(())
    }

    async fn list_folders(&self) -> Result<Vec<Folder>, GatewayError> {
        let state = self.state.lock().await;
        state.check_transport()?;
        let mut folders = state.records.folders.clone();
        FolderRules::sort_for_display(&mut folders);
        Ok(folders)
    }

    async fn insert_folder(&self, name: &str) -> Result<Folder, GatewayError> {
        let mut state = self.state.lock().await;
        state.check_transport()?;
        let name = FolderRules::normalize_name(name)
            .map_err(|e| GatewayError::storage(e.to_string()))?;
        let folder = Folder {
            id: FolderId::generate(),
            name,
            created_at: state.stamp(),
        };
        state.records.folders.push(folder.clone());
        debug!(folder_id = %folder.id, "Inserted folder");
        Ok(folder)
    }

    async fn update_folder(&self, id: FolderId, name: &str) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        state.check_transport()?;
        let name = FolderRules::normalize_name(name)
            .map_err(|e| GatewayError::storage(e.to_string()))?;
        let folder = state
            .records
            .folders
            .iter_mut()
            .find(|folder| folder.id == id)
            .ok_or_else(|| GatewayError::not_found(Entity::Folder, id))?;
        folder.name = name;
        Ok(())
    }

    async fn delete_folder(&self, id: FolderId) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        state.check_transport()?;
        if !state.folder_exists(id) {
            return Err(GatewayError::not_found(Entity::Folder, id));
        }
        state.records.folders.retain(|folder| folder.id != id);
        for clip in state.records.clips.iter_mut() {
            if clip.folder_id == Some(id) {
                clip.folder_id = None;
            }
        }
        debug!(folder_id = %id, "Deleted folder");
        Ok(())
    }

    async fn list_clips(&self) -> Result<Vec<Clip>, GatewayError> {
        let state = self.state.lock().await;
        state.check_transport()?;
        let mut clips = state.records.clips.clone();
        clips.sort_by_key(|clip| Reverse((clip.created_at, clip.id)));
        Ok(clips)
    }

    async fn insert_clip(&self, new_clip: NewClip) -> Result<Clip, GatewayError> {
        let mut state = self.state.lock().await;
        state.check_transport()?;
        if !state.records.videos.iter().any(|video| video.id == new_clip.video_id) {
            return Err(GatewayError::not_found(Entity::Video, new_clip.video_id));
        }
        if let Some(folder_id) = new_clip.folder_id {
            if !state.folder_exists(folder_id) {
                return Err(GatewayError::not_found(Entity::Folder, folder_id));
            }
        }
        let now = state.stamp();
        let clip = Clip::from_new(ClipId::generate(), new_clip, now);
        state.records.clips.push(clip.clone());
        debug!(clip_id = %clip.id, "Inserted clip");
        Ok(clip)
    }

    async fn update_clips_batch(
        &self,
        ids: &[ClipId],
        patch: &ClipPatch,
    ) -> Result<BatchOutcome, GatewayError> {
        let mut state = self.state.lock().await;
        state.check_transport()?;
        let mut outcome = BatchOutcome::new();

        if let Some(Some(folder_id)) = patch.folder_id {
            if !state.folder_exists(folder_id) {
                for &id in ids {
                    outcome.record_failure(id, FailureReason::FolderNotFound);
                }
                return Ok(outcome);
            }
        }

        let now = state.stamp();
        for &id in ids {
            if state.rejected.contains(&id) {
                outcome.record_failure(id, FailureReason::Rejected("write refused".to_string()));
                continue;
            }
            match state.records.clips.iter_mut().find(|clip| clip.id == id) {
                Some(clip) => {
                    patch.apply_to(clip);
                    clip.updated_at = now;
                    outcome.record_success(id);
                }
                None => outcome.record_failure(id, FailureReason::ClipNotFound),
            }
        }
        Ok(outcome)
    }

    async fn delete_clips_batch(&self, ids: &[ClipId]) -> Result<BatchOutcome, GatewayError> {
        let mut state = self.state.lock().await;
        state.check_transport()?;
        let mut outcome = BatchOutcome::new();

        for &id in ids {
            if state.rejected.contains(&id) {
                outcome.record_failure(id, FailureReason::Rejected("delete refused".to_string()));
                continue;
            }
            let before = state.records.clips.len();
            state.records.clips.retain(|clip| clip.id != id);
            if state.records.clips.len() < before {
                outcome.record_success(id);
            } else {
                outcome.record_failure(id, FailureReason::ClipNotFound);
            }
        }
        Ok(outcome)
    }
}
