// Domain errors - Error types for the domain layer

use std::fmt;
use thiserror::Error;

/// Why a time range was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// Start is not strictly before end
    #[error("start ({start}) must be before end ({end})")]
    InvertedRange { start: f64, end: f64 },
    /// Negative, non-finite, or past the end of the parent video
    #[error("range {start}..{end} is outside 0..{duration}")]
    OutOfBounds { start: f64, end: f64, duration: u64 },
}

/// Rejections caught locally, before anything reaches storage
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("folder name cannot be empty")]
    EmptyName,
    #[error("clip title cannot be empty")]
    MissingTitle,
    #[error("invalid range: {0}")]
    InvalidRange(#[from] RangeError),
    #[error("overlay font size must be a positive integer")]
    InvalidFontSize,
    #[error("unknown {kind} '{value}'")]
    UnknownTag { kind: &'static str, value: String },
}

/// Kind of record a lookup failed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Video,
    Folder,
    Clip,
    Overlay,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Video => "video",
            Entity::Folder => "folder",
            Entity::Clip => "clip",
            Entity::Overlay => "overlay",
        };
        write!(f, "{}", name)
    }
}

/// Failure reported by the persistence gateway
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}: {message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Transport, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Storage, message)
    }

    pub fn not_found(entity: Entity, id: impl fmt::Display) -> Self {
        Self::new(GatewayErrorKind::NotFound, format!("{} {} does not exist", entity, id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    Transport,
    Storage,
    NotFound,
}

impl fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayErrorKind::Transport => write!(f, "transport error"),
            GatewayErrorKind::Storage => write!(f, "storage error"),
            GatewayErrorKind::NotFound => write!(f, "not found"),
        }
    }
}

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input rejected before any gateway call
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// Referenced record is absent
    #[error("Not found: {entity} {id}")]
    NotFound { entity: Entity, id: String },
    /// Storage call failed as a whole
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
    /// Bad configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn not_found(entity: Entity, id: impl fmt::Display) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<RangeError> for DomainError {
    fn from(err: RangeError) -> Self {
        DomainError::Validation(ValidationError::InvalidRange(err))
    }
}
