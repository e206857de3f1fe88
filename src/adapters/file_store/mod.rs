// File store adapter - JSON snapshot persistence on top of the in-memory store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::adapters::memory_store::{MemoryStoreAdapter, StoreSnapshot};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::error::{ClipDeckError, ClipDeckResult};
use crate::ports::*;

/// Store that keeps every record in one JSON file.
///
/// The file is rewritten after each successful mutation, through a temporary
/// sibling file and a rename so a crash never leaves a half-written snapshot.
/// A mutation whose snapshot cannot be written is rolled back before the
/// error is returned.
pub struct FileStoreAdapter {
    inner: MemoryStoreAdapter,
    path: PathBuf,
    /// Held across mutate + persist so a rollback cannot undo another writer
    write_lock: Mutex<()>,
}

impl FileStoreAdapter {
    /// Open the snapshot at `path`, starting empty if the file does not exist
    pub async fn open(path: impl AsRef<Path>) -> ClipDeckResult<Self> {
        let path = path.as_ref().to_path_buf();
        let records = if tokio::fs::try_exists(&path).await? {
            let content = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str::<StoreSnapshot>(&content).map_err(|e| {
                ClipDeckError::Snapshot {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            })?
        } else {
            StoreSnapshot::default()
        };

        info!(
            path = %path.display(),
            videos = records.videos.len(),
            folders = records.folders.len(),
            clips = records.clips.len(),
            "Opened clip store"
        );

        Ok(Self {
            inner: MemoryStoreAdapter::from_snapshot(records),
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Register an ingested video and persist it
    pub async fn insert_video(&self, new_video: NewVideo) -> Result<Video, GatewayError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        let video = self.inner.insert_video(new_video).await?;
        self.persist_or_restore(before).await?;
        Ok(video)
    }

    /// Write the current records; on failure put `before` back in memory
    async fn persist_or_restore(&self, before: StoreSnapshot) -> Result<(), GatewayError> {
        if let Err(err) = self.persist().await {
            warn!(path = %self.path.display(), error = %err, "Snapshot write failed, rolling back");
            self.inner.restore(before).await;
            return Err(err);
        }
        Ok(())
    }

    async fn persist(&self) -> Result<(), GatewayError> {
        let snapshot = self.inner.snapshot().await;
        let content = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| GatewayError::storage(format!("failed to encode snapshot: {}", e)))?;

        let temp_path = self.path.with_extension("json.tmp");
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| GatewayError::storage(format!("failed to create store directory: {}", e)))?;
        }
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(|e| GatewayError::storage(format!("failed to write snapshot: {}", e)))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| GatewayError::storage(format!("failed to replace snapshot: {}", e)))?;

        debug!(path = %self.path.display(), "Persisted store snapshot");
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for FileStoreAdapter {
    async fn list_videos(&self) -> Result<Vec<Video>, GatewayError> {
        self.inner.list_videos().await
    }

    async fn delete_video(&self, id: VideoId) -> Result<(), GatewayError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        self.inner.delete_video(id).await?;
        self.persist_or_restore(before).await
    }

    async fn list_folders(&self) -> Result<Vec<Folder>, GatewayError> {
        self.inner.list_folders().await
    }

    async fn insert_folder(&self, name: &str) -> Result<Folder, GatewayError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        let folder = self.inner.insert_folder(name).await?;
        self.persist_or_restore(before).await?;
        Ok(folder)
    }

    async fn update_folder(&self, id: FolderId, name: &str) -> Result<(), GatewayError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        self.inner.update_folder(id, name).await?;
        self.persist_or_restore(before).await
    }

    async fn delete_folder(&self, id: FolderId) -> Result<(), GatewayError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        self.inner.delete_folder(id).await?;
        self.persist_or_restore(before).await
    }

    async fn list_clips(&self) -> Result<Vec<Clip>, GatewayError> {
        self.inner.list_clips().await
    }

    async fn insert_clip(&self, clip: NewClip) -> Result<Clip, GatewayError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        let clip = self.inner.insert_clip(clip).await?;
        self.persist_or_restore(before).await?;
        Ok(clip)
    }

    async fn update_clips_batch(
        &self,
        ids: &[ClipId],
        patch: &ClipPatch,
    ) -> Result<BatchOutcome, GatewayError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        let outcome = self.inner.update_clips_batch(ids, patch).await?;
        if !outcome.succeeded.is_empty() {
            self.persist_or_restore(before).await?;
        }
        Ok(outcome)
    }

    async fn delete_clips_batch(&self, ids: &[ClipId]) -> Result<BatchOutcome, GatewayError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot().await;
        let outcome = self.inner.delete_clips_batch(ids).await?;
        if !outcome.succeeded.is_empty() {
            self.persist_or_restore(before).await?;
        }
        Ok(outcome)
    }
}
