use std::path::Path;
use std::sync::Arc;

use crate::adapters::{FileStoreAdapter, TomlConfigAdapter};
use crate::app::draft_organizer::DraftOrganizer;
use crate::error::ClipDeckResult;
use crate::ports::{ConfigPort, PersistenceGateway};

pub trait AppContainer: Send + Sync {
    fn draft_organizer(&self) -> DraftOrganizer;
    fn config(&self) -> Arc<dyn ConfigPort>;
}

pub struct DefaultAppContainer {
    store: Arc<FileStoreAdapter>,
    config: Arc<TomlConfigAdapter>,
}

impl DefaultAppContainer {
    /// Open the JSON store at `store_path` and wire it to the interactors
    pub async fn open(store_path: impl AsRef<Path>, config: Arc<TomlConfigAdapter>) -> ClipDeckResult<Self> {
        let store = Arc::new(FileStoreAdapter::open(store_path).await?);
        Ok(Self { store, config })
    }

    /// Concrete store, for ingestion calls that sit outside the gateway port
    pub fn store(&self) -> Arc<FileStoreAdapter> {
        Arc::clone(&self.store)
    }
}

impl AppContainer for DefaultAppContainer {
    fn draft_organizer(&self) -> DraftOrganizer {
        DraftOrganizer::new(Arc::clone(&self.store) as Arc<dyn PersistenceGateway>)
    }

    fn config(&self) -> Arc<dyn ConfigPort> {
        Arc::clone(&self.config) as Arc<dyn ConfigPort>
    }
}
