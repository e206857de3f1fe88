// Application layer - Use case interactors

pub mod container;
pub mod draft_organizer;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use draft_organizer::DraftOrganizer;
