//! Centralized configuration values shared across the terrain tile pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// TILE GEOMETRY
// =============================================================================

/// Edge length of a vector tile in tile-local units.
///
/// Ring coordinates produced by the vector-tile decoder range over
/// `[0, TILE_EXTENT]` on both axes.
///
/// # Examples
/// ```
/// use config::constants::TILE_EXTENT;
/// assert_eq!(TILE_EXTENT, 8192.0);
/// ```
pub const TILE_EXTENT: f64 = 8192.0;

/// Zoom levels the scene is built for.
///
/// # Examples
/// ```
/// use config::constants::SUPPORTED_ZOOM_LEVELS;
/// assert_eq!(SUPPORTED_ZOOM_LEVELS.len(), 3);
/// ```
pub const SUPPORTED_ZOOM_LEVELS: [u8; 3] = [12, 13, 14];

/// Equatorial circumference of the earth in metres (Web Mercator sphere).
pub const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;

// =============================================================================
// ELEVATION GRID
// =============================================================================

/// Side length of the square elevation grid, in samples.
///
/// # Examples
/// ```
/// use config::constants::ELEVATION_GRID_SIZE;
/// assert_eq!(ELEVATION_GRID_SIZE * ELEVATION_GRID_SIZE, 262_144);
/// ```
pub const ELEVATION_GRID_SIZE: usize = 512;

/// Border, in pixels, that Terrarium elevation images carry on every side.
///
/// A 516×516 image decodes to a 512×512 grid.
///
/// # Examples
/// ```
/// use config::constants::{TERRARIUM_PADDING, ELEVATION_GRID_SIZE};
/// assert_eq!(ELEVATION_GRID_SIZE + 2 * TERRARIUM_PADDING, 516);
/// ```
pub const TERRARIUM_PADDING: usize = 2;

/// Offset subtracted from decoded Terrarium values to obtain metres.
pub const TERRARIUM_OFFSET: f64 = 32768.0;

// =============================================================================
// SUBDIVISION
// =============================================================================

/// Edge length at or above which the subdivider bisects an edge.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_MIN_EDGE_LENGTH, TILE_EXTENT};
/// assert!(DEFAULT_MIN_EDGE_LENGTH < TILE_EXTENT);
/// ```
pub const DEFAULT_MIN_EDGE_LENGTH: f64 = 500.0;

/// Upper bound on subdivision passes for a single ring.
///
/// Every pass halves the longest edges, so a tile-sized edge reaches any
/// sane threshold well below this bound. Inputs that don't converge are
/// reported as errors.
///
/// # Examples
/// ```
/// use config::constants::MAX_SUBDIVISION_PASSES;
/// assert!(MAX_SUBDIVISION_PASSES >= 16);
/// ```
pub const MAX_SUBDIVISION_PASSES: u32 = 32;

// =============================================================================
// SEAM STITCHING
// =============================================================================

/// Distance from a tile edge within which a vertex is a seam candidate.
pub const SEAM_BAND: f64 = 1.0;

/// Maximum planar distance between two seam candidates that are welded.
///
/// # Examples
/// ```
/// use config::constants::{SEAM_BAND, SEAM_MATCH_DISTANCE};
/// assert!(SEAM_MATCH_DISTANCE > SEAM_BAND);
/// ```
pub const SEAM_MATCH_DISTANCE: f64 = 2.0;

// =============================================================================
// HELPERS
// =============================================================================

/// Returns the elevation multiplier for a zoom level.
///
/// Terrarium heights are metres; tile-local units per metre grow by a
/// factor of two with each zoom level.
///
/// # Examples
/// ```
/// use config::constants::elevation_scale;
/// let z12 = elevation_scale(12);
/// assert!(z12 > 0.8 && z12 < 0.9);
/// ```
pub fn elevation_scale(zoom: u8) -> f64 {
    TILE_EXTENT * 2f64.powi(i32::from(zoom)) / EARTH_CIRCUMFERENCE_M
}

/// Immutable snapshot of the per-ring pipeline settings.
///
/// # Examples
/// ```
/// use config::constants::PipelineConfig;
/// let config = PipelineConfig::default();
/// assert!(config.min_edge_length > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Edge length at or above which edges are bisected.
    pub min_edge_length: f64,
    /// Maximum number of subdivision passes per ring.
    pub max_subdivision_passes: u32,
}

impl PipelineConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// threshold and pass cap.
    ///
    /// # Examples
    /// ```
    /// use config::constants::PipelineConfig;
    /// let cfg = PipelineConfig::new(250.0, 24).expect("valid config");
    /// assert_eq!(cfg.max_subdivision_passes, 24);
    /// ```
    pub fn new(min_edge_length: f64, max_subdivision_passes: u32) -> Result<Self, ConfigError> {
        if !min_edge_length.is_finite() || min_edge_length <= 0.0 {
            return Err(ConfigError::InvalidEdgeLength(min_edge_length));
        }
        if max_subdivision_passes == 0 {
            return Err(ConfigError::InvalidPassCap(max_subdivision_passes));
        }
        Ok(Self {
            min_edge_length,
            max_subdivision_passes,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_edge_length: DEFAULT_MIN_EDGE_LENGTH,
            max_subdivision_passes: MAX_SUBDIVISION_PASSES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the edge length is zero, negative or not finite.
    InvalidEdgeLength(f64),
    /// Raised when the pass cap would forbid any subdivision pass.
    InvalidPassCap(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidEdgeLength(value) => {
                write!(f, "min_edge_length must be positive and finite: {value}")
            }
            ConfigError::InvalidPassCap(value) => {
                write!(f, "max_subdivision_passes must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
