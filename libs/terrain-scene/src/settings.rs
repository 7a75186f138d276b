//! # Scene Settings
//!
//! Which tiles make up each zoom level, how vector-tile layers map to
//! mesh buckets, and the subdivision settings.
//!
//! Each zoom level covers a square block of `tiles_in_row × tiles_in_row`
//! slippy-map tiles starting at `(origin_x, origin_y)`. Within the block a
//! tile is addressed by `(col, row)`, where `col = x - origin_x` and
//! `row = y - origin_y`, and stored row-major.
//!
//! The default configuration shows the same area at three zoom levels:
//!
//! | zoom | tiles per row | x           | y           |
//! |------|---------------|-------------|-------------|
//! | 12   | 1             | 2118        | 1458        |
//! | 13   | 2             | 4236..=4237 | 2916..=2917 |
//! | 14   | 4             | 8472..=8475 | 5832..=5835 |

use std::collections::BTreeMap;
use std::fmt;

use config::constants::{
    PipelineConfig, DEFAULT_MIN_EDGE_LENGTH, MAX_SUBDIVISION_PASSES, SUPPORTED_ZOOM_LEVELS,
};
use serde::{Deserialize, Serialize};
use terrain_mesh::SeamAxis;

use crate::error::SceneResult;
use crate::layer::LayerKind;

// =============================================================================
// TILE ADDRESSING
// =============================================================================

/// Slippy-map tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub zoom: u8,
    /// Column, growing east
    pub x: u32,
    /// Row, growing south
    pub y: u32,
}

impl TileCoord {
    /// Creates a tile coordinate.
    pub const fn new(zoom: u8, x: u32, y: u32) -> Self {
        Self { zoom, x, y }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Two tiles of a zoom level that share an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborPair {
    /// Row-major index of the left or upper tile
    pub a: usize,
    /// Row-major index of the right or lower tile
    pub b: usize,
    /// Which edge they share
    pub axis: SeamAxis,
}

// =============================================================================
// ZOOM LEVELS
// =============================================================================

/// Tile block of one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomLevelConfig {
    /// Zoom level
    pub zoom: u8,
    /// Tiles along each side of the block
    pub tiles_in_row: u32,
    /// Slippy x of the western column
    pub origin_x: u32,
    /// Slippy y of the northern row
    pub origin_y: u32,
}

impl ZoomLevelConfig {
    /// Number of tiles in the block.
    #[inline]
    pub fn tile_count(&self) -> usize {
        let n = self.tiles_in_row as usize;
        n * n
    }

    /// Slippy coordinate of the tile at `(col, row)`.
    #[inline]
    pub fn coord(&self, col: u32, row: u32) -> TileCoord {
        TileCoord::new(self.zoom, self.origin_x + col, self.origin_y + row)
    }

    /// `(col, row)` of a row-major tile index.
    #[inline]
    pub fn position(&self, index: usize) -> (u32, u32) {
        let n = self.tiles_in_row as usize;
        ((index % n) as u32, (index / n) as u32)
    }

    /// Slippy coordinates of every tile, row-major.
    pub fn tiles(&self) -> Vec<TileCoord> {
        (0..self.tile_count())
            .map(|i| {
                let (col, row) = self.position(i);
                self.coord(col, row)
            })
            .collect()
    }

    /// Every pair of tiles sharing an edge: right neighbours first, then
    /// lower neighbours.
    pub fn neighbor_pairs(&self) -> Vec<NeighborPair> {
        let n = self.tiles_in_row as usize;
        let mut pairs = Vec::with_capacity(2 * n * n.saturating_sub(1));
        for row in 0..n {
            for col in 0..n.saturating_sub(1) {
                let a = row * n + col;
                pairs.push(NeighborPair { a, b: a + 1, axis: SeamAxis::Horizontal });
            }
        }
        for row in 0..n.saturating_sub(1) {
            for col in 0..n {
                let a = row * n + col;
                pairs.push(NeighborPair { a, b: a + n, axis: SeamAxis::Vertical });
            }
        }
        pairs
    }
}

// =============================================================================
// SCENE
// =============================================================================

/// Complete scene description.
///
/// Every field has a default, so a JSON override only needs to name what
/// it changes.
///
/// # Example
///
/// ```rust
/// use terrain_scene::SceneConfig;
///
/// let config = SceneConfig::from_json(r#"{ "min_edge_length": 250.0 }"#).unwrap();
/// assert_eq!(config.min_edge_length, 250.0);
/// assert_eq!(config.zoom_levels.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Zoom levels to build
    pub zoom_levels: Vec<ZoomLevelConfig>,
    /// Vector-tile layer name → mesh bucket; unlisted layers are ignored
    pub layers: BTreeMap<String, LayerKind>,
    /// Edge length at or above which edges are bisected
    pub min_edge_length: f64,
    /// Subdivision pass cap per ring
    pub max_subdivision_passes: u32,
    /// Weld seams between neighbouring tiles after building
    pub stitch: bool,
    /// Sample the grid edge for ring points in the tile's clip buffer
    /// instead of dropping the ring
    pub clamp_elevation: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let [z12, z13, z14] = SUPPORTED_ZOOM_LEVELS;
        Self {
            zoom_levels: vec![
                ZoomLevelConfig { zoom: z12, tiles_in_row: 1, origin_x: 2118, origin_y: 1458 },
                ZoomLevelConfig { zoom: z13, tiles_in_row: 2, origin_x: 4236, origin_y: 2916 },
                ZoomLevelConfig { zoom: z14, tiles_in_row: 4, origin_x: 8472, origin_y: 5832 },
            ],
            layers: BTreeMap::from([
                ("earth".to_string(), LayerKind::Terrain),
                ("water".to_string(), LayerKind::Water),
                ("landuse".to_string(), LayerKind::Landuse),
            ]),
            min_edge_length: DEFAULT_MIN_EDGE_LENGTH,
            max_subdivision_passes: MAX_SUBDIVISION_PASSES,
            stitch: true,
            clamp_elevation: true,
        }
    }
}

impl SceneConfig {
    /// Parses a configuration from JSON, filling omitted fields with
    /// defaults.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validated subdivision settings.
    pub fn pipeline(&self) -> SceneResult<PipelineConfig> {
        Ok(PipelineConfig::new(self.min_edge_length, self.max_subdivision_passes)?)
    }

    /// Bucket for a vector-tile layer name, if the layer is used.
    pub fn layer_kind(&self, name: &str) -> Option<LayerKind> {
        self.layers.get(name).copied()
    }

    /// Settings of one zoom level.
    pub fn zoom_level(&self, zoom: u8) -> Option<&ZoomLevelConfig> {
        self.zoom_levels.iter().find(|level| level.zoom == zoom)
    }
}
