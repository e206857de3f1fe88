// Ports - Interface definitions (contracts)

use crate::domain::errors::*;
use crate::domain::model::*;
use async_trait::async_trait;

/// Port for the record store holding videos, folders and clips.
///
/// The store assigns identifiers and timestamps. Batch calls report per-id
/// failures through [`BatchOutcome`]; an `Err` means nothing was applied.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// All videos, newest first
    async fn list_videos(&self) -> Result<Vec<Video>, GatewayError>;

    /// Delete a video; the store deletes its clips with it
    async fn delete_video(&self, id: VideoId) -> Result<(), GatewayError>;

    /// All folders, newest first
    async fn list_folders(&self) -> Result<Vec<Folder>, GatewayError>;

    /// Create a folder
    async fn insert_folder(&self, name: &str) -> Result<Folder, GatewayError>;

    /// Rename a folder
    async fn update_folder(&self, id: FolderId, name: &str) -> Result<(), GatewayError>;

    /// Delete a folder; clips pointing at it get their folder cleared
    async fn delete_folder(&self, id: FolderId) -> Result<(), GatewayError>;

    /// All clips, newest first
    async fn list_clips(&self) -> Result<Vec<Clip>, GatewayError>;

    /// Persist a validated clip
    async fn insert_clip(&self, clip: NewClip) -> Result<Clip, GatewayError>;

    /// Apply one patch to many clips in a single request
    async fn update_clips_batch(
        &self,
        ids: &[ClipId],
        patch: &ClipPatch,
    ) -> Result<BatchOutcome, GatewayError>;

    /// Delete many clips in a single request
    async fn delete_clips_batch(&self, ids: &[ClipId]) -> Result<BatchOutcome, GatewayError>;
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Get configuration value
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Get configuration value with default
    async fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, DomainError>;

    /// Set configuration value
    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Load configuration from file
    async fn load_config(&self, file_path: &str) -> Result<(), DomainError>;

    /// Reset to built-in defaults
    async fn load_default_config(&self) -> Result<(), DomainError>;

    /// Validate configuration
    async fn validate_config(&self) -> Result<(), DomainError>;

    /// Get all configuration keys
    async fn get_all_config_keys(&self) -> Result<Vec<String>, DomainError>;
}
