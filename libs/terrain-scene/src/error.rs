//! # Scene Errors
//!
//! Errors raised while configuring or building a scene. Per-ring mesh
//! failures are logged and the ring dropped; they only surface here when
//! a caller runs the pipeline on a single ring directly.

use config::constants::ConfigError;
use terrain_mesh::MeshError;
use thiserror::Error;

use crate::settings::TileCoord;

/// Errors that can occur while building a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A source couldn't provide data for a tile.
    #[error("Missing data for tile {coord}: {message}")]
    MissingData {
        /// Tile the data was requested for
        coord: TileCoord,
        /// What went wrong
        message: String,
    },

    /// Scene configuration couldn't be parsed.
    #[error("Invalid scene configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Subdivision parameters were rejected.
    #[error("Invalid pipeline settings: {0}")]
    Pipeline(#[from] ConfigError),

    /// A mesh stage failed.
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// No zoom level with this number exists in the scene.
    #[error("Unknown zoom level: {0}")]
    UnknownZoomLevel(u8),
}

impl SceneError {
    /// Creates a missing data error.
    pub fn missing(coord: TileCoord, message: impl Into<String>) -> Self {
        Self::MissingData {
            coord,
            message: message.into(),
        }
    }
}

/// Result type alias for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
