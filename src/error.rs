//! Error types.
//!
//! Transport code returns `anyhow::Result`; anything that crosses into the
//! binding pipeline is mapped onto these enums first.

/// Why an asset could not be turned into a scene graph.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset {path} is unavailable: {reason}")]
    Unavailable { path: String, reason: String },

    #[error("asset {path} could not be decoded: {reason}")]
    Decode { path: String, reason: String },

    #[error("asset {path} contains no renderable nodes")]
    EmptyScene { path: String },
}

/// Rejected configuration values and unreadable settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("unknown wheel style {0:?}")]
    UnknownWheelStyle(String),

    #[error("failed to read settings: {0}")]
    Settings(String),
}
