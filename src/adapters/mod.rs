// Adapters - External system implementations

pub mod file_store;
pub mod memory_store;
pub mod toml_config;

// Re-export adapters
pub use file_store::FileStoreAdapter;
pub use memory_store::{MemoryStoreAdapter, StoreSnapshot};
pub use toml_config::TomlConfigAdapter;
