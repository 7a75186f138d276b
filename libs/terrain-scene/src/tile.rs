//! # Tile Pipeline
//!
//! Runs the terrain mesh pipeline for every ring of one tile and buckets
//! the results by layer kind.
//!
//! ```text
//! ring ─▶ triangulate ─▶ subdivide ─▶ construct ─▶ TerrainMesh
//! ```
//!
//! A ring that yields no geometry is skipped. A ring whose pipeline fails
//! is dropped with a warning; the rest of the tile still builds.

use config::constants::{elevation_scale, PipelineConfig};
use log::{debug, warn};
use terrain_mesh::{
    construct_mesh, subdivide, triangulate_ring, ElevationGrid, MeshResult, Ring, TerrainMesh,
};

use crate::layer::LayerKind;
use crate::settings::{SceneConfig, TileCoord};
use crate::source::VectorTile;

/// Meshes of one tile, bucketed by layer kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMeshes {
    /// Tile the meshes belong to
    pub coord: TileCoord,
    layers: [Vec<TerrainMesh>; LayerKind::COUNT],
}

impl TileMeshes {
    /// Creates a tile with empty buckets.
    pub fn new(coord: TileCoord) -> Self {
        Self {
            coord,
            layers: Default::default(),
        }
    }

    /// Meshes of one bucket.
    #[inline]
    pub fn layer(&self, kind: LayerKind) -> &[TerrainMesh] {
        &self.layers[kind.index()]
    }

    /// Mutable meshes of one bucket.
    #[inline]
    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut [TerrainMesh] {
        &mut self.layers[kind.index()]
    }

    /// Appends a mesh to a bucket.
    pub fn push(&mut self, kind: LayerKind, mesh: TerrainMesh) {
        self.layers[kind.index()].push(mesh);
    }

    /// Total number of meshes over all buckets.
    pub fn mesh_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Iterates `(kind, index, mesh)` over all buckets.
    pub fn iter(&self) -> impl Iterator<Item = (LayerKind, usize, &TerrainMesh)> + '_ {
        LayerKind::ALL.into_iter().flat_map(move |kind| {
            self.layer(kind)
                .iter()
                .enumerate()
                .map(move |(i, mesh)| (kind, i, mesh))
        })
    }
}

/// Runs the whole pipeline for one ring.
///
/// Returns `Ok(None)` when the ring has no geometry.
///
/// # Example
///
/// ```rust
/// use terrain_scene::build_ring_mesh;
/// use terrain_mesh::{ElevationGrid, Ring};
/// use config::constants::PipelineConfig;
///
/// let ring = Ring::from_points(&[[0, 0], [1000, 0], [1000, 1000], [0, 1000]], None);
/// let grid = ElevationGrid::flat(512, 0.0).unwrap();
/// let mesh = build_ring_mesh(&ring, &grid, 1.0, &PipelineConfig::default())
///     .unwrap()
///     .unwrap();
/// assert!(mesh.triangle_count() > 2);
/// ```
pub fn build_ring_mesh(
    ring: &Ring,
    grid: &ElevationGrid,
    elevation_scale: f64,
    pipeline: &PipelineConfig,
) -> MeshResult<Option<TerrainMesh>> {
    let Some(planar) = triangulate_ring(ring) else {
        return Ok(None);
    };
    let planar = subdivide(planar, pipeline)?;
    construct_mesh(&planar, grid, elevation_scale).map(Some)
}

/// Builds every mapped layer of one tile.
///
/// Layers whose name isn't mapped in `config` are ignored.
pub fn build_tile(
    coord: TileCoord,
    tile: &VectorTile,
    grid: &ElevationGrid,
    config: &SceneConfig,
    pipeline: &PipelineConfig,
) -> TileMeshes {
    let scale = elevation_scale(coord.zoom);
    let mut meshes = TileMeshes::new(coord);

    for layer in &tile.layers {
        let Some(kind) = config.layer_kind(&layer.name) else {
            debug!("Tile {}: ignoring layer '{}'", coord, layer.name);
            continue;
        };

        for (i, ring) in layer.rings.iter().enumerate() {
            match build_ring_mesh(ring, grid, scale, pipeline) {
                Ok(Some(mesh)) => meshes.push(kind, mesh),
                Ok(None) => debug!("Tile {}: ring {} of '{}' has no geometry", coord, i, layer.name),
                Err(err) => warn!("Tile {}: dropping ring {} of '{}': {}", coord, i, layer.name, err),
            }
        }
    }

    meshes
}
