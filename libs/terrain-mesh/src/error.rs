//! # Mesh Errors
//!
//! Error types for the terrain geometry pipeline. All errors are explicit
//! and carry enough context to tell which stage rejected the input.
//!
//! Rings that triangulate to nothing are not errors: the triangulator
//! returns `None` and callers skip the ring.

use thiserror::Error;

/// Errors that can occur while building a terrain mesh.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    /// The subdivision threshold is zero, negative or not finite.
    #[error("Invalid subdivision threshold: {0}")]
    InvalidThreshold(f64),

    /// Subdivision kept adding vertices after the pass cap was reached.
    #[error("Subdivision did not converge after {passes} passes")]
    SubdivisionDiverged {
        /// Number of passes that were run
        passes: u32,
    },

    /// A triangle ended up with a split mask no pattern exists for.
    #[error("Invalid split mask {mask:#05b} on triangle {triangle}")]
    InvalidSplitMask {
        /// The offending mask
        mask: u8,
        /// Triangle the mask was recorded for
        triangle: u32,
    },

    /// A tile-local coordinate falls outside the elevation grid.
    #[error("Elevation lookup out of range at ({x}, {y})")]
    ElevationOutOfRange {
        /// Tile-local x
        x: f64,
        /// Tile-local y
        y: f64,
    },

    /// Elevation data doesn't describe a usable grid.
    #[error("Invalid elevation grid: {message}")]
    InvalidElevationGrid {
        /// What was wrong with the data
        message: String,
    },

    /// A triangle references a vertex that doesn't exist.
    #[error("Vertex index {index} out of bounds (vertex count: {vertex_count})")]
    IndexOutOfBounds {
        /// The offending index
        index: u32,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },
}

impl MeshError {
    /// Creates an invalid elevation grid error.
    pub fn invalid_grid(message: impl Into<String>) -> Self {
        Self::InvalidElevationGrid {
            message: message.into(),
        }
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
