//! # Scene Graph
//!
//! Owned scene state: one [`ZoomLevelMeshes`] per zoom level, each a
//! row-major grid of [`TileMeshes`]. A [`SceneBuilder`] fills the grid
//! from the sources, then welds the seams between neighbouring tiles.
//!
//! Tiles are placed around the scene centre: the tile at `(col, row)`
//! starts at `col * extent - extent * tiles_in_row / 2` along x, and the
//! same along y.

use std::collections::BTreeMap;

use config::constants::PipelineConfig;
use glam::DVec2;
use log::{info, warn};
use terrain_mesh::{
    propagate_seam, stitch_tiles, SeamAxis, SeamParams, StitchReport, TerrainMesh, VERTEX_STRIDE,
};

use crate::error::{SceneError, SceneResult};
use crate::layer::LayerKind;
use crate::settings::{NeighborPair, SceneConfig, TileCoord, ZoomLevelConfig};
use crate::source::{ElevationSource, MeshKey, MeshUploader, VectorTileSource};
use crate::tile::{build_tile, TileMeshes};

// =============================================================================
// ZOOM LEVEL
// =============================================================================

/// Tile grid of one zoom level. Tiles that couldn't be built are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomLevelMeshes {
    config: ZoomLevelConfig,
    tile_extent: f64,
    tiles: Vec<Option<TileMeshes>>,
}

impl ZoomLevelMeshes {
    /// Creates an empty grid.
    pub fn new(config: ZoomLevelConfig, tile_extent: f64) -> Self {
        Self {
            config,
            tile_extent,
            tiles: vec![None; config.tile_count()],
        }
    }

    /// Zoom level number.
    #[inline]
    pub fn zoom(&self) -> u8 {
        self.config.zoom
    }

    /// Tile block settings.
    #[inline]
    pub fn config(&self) -> &ZoomLevelConfig {
        &self.config
    }

    /// Translation of the tile at `(col, row)` within the scene.
    ///
    /// # Example
    ///
    /// ```rust
    /// use terrain_scene::{SceneConfig, ZoomLevelMeshes};
    /// use glam::DVec2;
    ///
    /// let z13 = SceneConfig::default().zoom_levels[1];
    /// let level = ZoomLevelMeshes::new(z13, 8192.0);
    /// assert_eq!(level.tile_origin(0, 0), DVec2::new(-8192.0, -8192.0));
    /// assert_eq!(level.tile_origin(1, 0), DVec2::new(0.0, -8192.0));
    /// ```
    pub fn tile_origin(&self, col: u32, row: u32) -> DVec2 {
        let half = self.tile_extent * f64::from(self.config.tiles_in_row) / 2.0;
        DVec2::new(
            f64::from(col) * self.tile_extent - half,
            f64::from(row) * self.tile_extent - half,
        )
    }

    /// Tile at `(col, row)`, if it was built.
    pub fn tile(&self, col: u32, row: u32) -> Option<&TileMeshes> {
        if col >= self.config.tiles_in_row || row >= self.config.tiles_in_row {
            return None;
        }
        let index = (row * self.config.tiles_in_row + col) as usize;
        self.tiles.get(index).and_then(Option::as_ref)
    }

    /// Stores a tile at its row-major index. Out-of-range indices are
    /// ignored.
    pub fn set_tile(&mut self, index: usize, tile: TileMeshes) {
        if let Some(slot) = self.tiles.get_mut(index) {
            *slot = Some(tile);
        }
    }

    /// Iterates built tiles as `(col, row, tile)`.
    pub fn built_tiles(&self) -> impl Iterator<Item = (u32, u32, &TileMeshes)> + '_ {
        self.tiles.iter().enumerate().filter_map(move |(i, tile)| {
            let (col, row) = self.config.position(i);
            tile.as_ref().map(|tile| (col, row, tile))
        })
    }

    /// Number of built tiles.
    pub fn built_count(&self) -> usize {
        self.tiles.iter().flatten().count()
    }

    /// Total number of meshes over all built tiles.
    pub fn mesh_count(&self) -> usize {
        self.tiles.iter().flatten().map(TileMeshes::mesh_count).sum()
    }

    /// Welds every seam between built neighbouring tiles, layer by layer.
    ///
    /// Seams are first welded pair by pair, then the left or upper tile's
    /// values are copied across every seam in the same order so that the
    /// four copies of a shared tile corner agree.
    pub fn stitch(&mut self, params: &SeamParams) -> StitchReport {
        let pairs = self.config.neighbor_pairs();
        let report = self.for_each_neighbor(&pairs, |a, b, axis| stitch_tiles(a, b, axis, params));
        self.for_each_neighbor(&pairs, |a, b, axis| propagate_seam(a, b, axis, params));
        report
    }

    fn for_each_neighbor(
        &mut self,
        pairs: &[NeighborPair],
        mut seam: impl FnMut(&mut [TerrainMesh], &mut [TerrainMesh], SeamAxis) -> StitchReport,
    ) -> StitchReport {
        let mut report = StitchReport::default();

        for pair in pairs {
            let (head, tail) = self.tiles.split_at_mut(pair.b);
            let a = head.get_mut(pair.a).and_then(Option::as_mut);
            let b = tail.first_mut().and_then(Option::as_mut);
            let (Some(a), Some(b)) = (a, b) else {
                continue;
            };
            for kind in LayerKind::ALL {
                report += seam(a.layer_mut(kind), b.layer_mut(kind), pair.axis);
            }
        }

        report
    }
}

// =============================================================================
// SCENE
// =============================================================================

/// All zoom levels of a built scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    levels: BTreeMap<u8, ZoomLevelMeshes>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a zoom level.
    pub fn insert(&mut self, level: ZoomLevelMeshes) {
        self.levels.insert(level.zoom(), level);
    }

    /// Returns a zoom level.
    pub fn level(&self, zoom: u8) -> SceneResult<&ZoomLevelMeshes> {
        self.levels.get(&zoom).ok_or(SceneError::UnknownZoomLevel(zoom))
    }

    /// Returns a zoom level for modification.
    pub fn level_mut(&mut self, zoom: u8) -> SceneResult<&mut ZoomLevelMeshes> {
        self.levels.get_mut(&zoom).ok_or(SceneError::UnknownZoomLevel(zoom))
    }

    /// Zoom levels in ascending order.
    pub fn levels(&self) -> impl Iterator<Item = &ZoomLevelMeshes> + '_ {
        self.levels.values()
    }

    /// Total number of meshes.
    pub fn mesh_count(&self) -> usize {
        self.levels.values().map(ZoomLevelMeshes::mesh_count).sum()
    }

    /// Hands every mesh to `uploader`. Returns the number of meshes
    /// uploaded.
    pub fn upload(&self, uploader: &mut impl MeshUploader) -> usize {
        let mut uploaded = 0;
        for level in self.levels.values() {
            for (col, row, tile) in level.built_tiles() {
                let origin = level.tile_origin(col, row);
                for (layer, index, mesh) in tile.iter() {
                    let vertex_data = mesh.vertex_data();
                    let indices = mesh.indices();
                    let key = MeshKey {
                        tile: tile.coord,
                        origin,
                        layer,
                        index,
                    };
                    uploader.upload(
                        key,
                        &vertex_data,
                        mesh.vertex_count(),
                        VERTEX_STRIDE,
                        &indices,
                        indices.len(),
                    );
                    uploaded += 1;
                }
            }
        }
        uploaded
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Builds a [`Scene`] from a [`SceneConfig`] and the data sources.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    config: SceneConfig,
    seam: SeamParams,
}

impl SceneBuilder {
    /// Creates a builder with the default seam tolerances.
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            seam: SeamParams::default(),
        }
    }

    /// Overrides the seam tolerances.
    pub fn with_seam_params(mut self, seam: SeamParams) -> Self {
        self.seam = seam;
        self
    }

    /// Scene configuration in use.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Builds every configured zoom level, then stitches each of them.
    ///
    /// A tile whose vector tile or elevation grid can't be loaded is
    /// skipped and stays empty in the grid.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Pipeline`] if the subdivision settings are
    /// invalid.
    pub fn build(
        &self,
        vectors: &mut impl VectorTileSource,
        elevations: &mut impl ElevationSource,
    ) -> SceneResult<Scene> {
        let pipeline = self.config.pipeline()?;
        let mut scene = Scene::new();

        for level_config in &self.config.zoom_levels {
            let mut level = self.build_level(*level_config, &pipeline, vectors, elevations);

            let report = if self.config.stitch {
                level.stitch(&self.seam)
            } else {
                StitchReport::default()
            };
            info!(
                "Zoom {}: {}/{} tiles, {} meshes, {} seam vertices welded ({} unmatched)",
                level.zoom(),
                level.built_count(),
                level_config.tile_count(),
                level.mesh_count(),
                report.welded,
                report.unmatched()
            );
            scene.insert(level);
        }

        Ok(scene)
    }

    fn build_level(
        &self,
        level_config: ZoomLevelConfig,
        pipeline: &PipelineConfig,
        vectors: &mut impl VectorTileSource,
        elevations: &mut impl ElevationSource,
    ) -> ZoomLevelMeshes {
        let mut level = ZoomLevelMeshes::new(level_config, self.seam.tile_extent);

        for (index, coord) in level_config.tiles().into_iter().enumerate() {
            match self.build_one(coord, pipeline, vectors, elevations) {
                Ok(tile) => level.set_tile(index, tile),
                Err(err) => warn!("Skipping tile {}: {}", coord, err),
            }
        }

        level
    }

    fn build_one(
        &self,
        coord: TileCoord,
        pipeline: &PipelineConfig,
        vectors: &mut impl VectorTileSource,
        elevations: &mut impl ElevationSource,
    ) -> SceneResult<TileMeshes> {
        let mut grid = elevations.elevation(coord)?;
        if self.config.clamp_elevation {
            grid = grid.with_clamped_edges();
        }
        let tile = vectors.vector_tile(coord)?;
        Ok(build_tile(coord, &tile, &grid, &self.config, pipeline))
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::TILE_EXTENT;
    use glam::DVec3;
    use terrain_mesh::{Triangle, Vertex};

    fn z13() -> ZoomLevelConfig {
        SceneConfig::default().zoom_levels[1]
    }

    fn tile_with_seam_vertex(coord: TileCoord, position: DVec3, normal: DVec3) -> TileMeshes {
        let mut tile = TileMeshes::new(coord);
        tile.push(
            LayerKind::Terrain,
            TerrainMesh::new(
                vec![
                    Vertex { position, normal },
                    Vertex::new(DVec3::new(4000.0, 4000.0, 0.0)),
                    Vertex::new(DVec3::new(4000.0, 5000.0, 0.0)),
                ],
                vec![Triangle::new(0, 1, 2)],
            ),
        );
        tile
    }

    #[test]
    fn test_origins_center_the_block() {
        let z12 = ZoomLevelMeshes::new(SceneConfig::default().zoom_levels[0], TILE_EXTENT);
        assert_eq!(z12.tile_origin(0, 0), DVec2::new(-4096.0, -4096.0));

        let z14 = ZoomLevelMeshes::new(SceneConfig::default().zoom_levels[2], TILE_EXTENT);
        assert_eq!(z14.tile_origin(3, 2), DVec2::new(8192.0, 0.0));
    }

    #[test]
    fn test_tile_lookup() {
        let mut level = ZoomLevelMeshes::new(z13(), TILE_EXTENT);
        let coord = z13().coord(1, 0);
        level.set_tile(1, TileMeshes::new(coord));
        level.set_tile(99, TileMeshes::new(coord));

        assert_eq!(level.tile(1, 0).map(|t| t.coord), Some(coord));
        assert!(level.tile(0, 0).is_none());
        assert!(level.tile(2, 0).is_none());
        assert_eq!(level.built_count(), 1);
    }

    #[test]
    fn test_stitch_welds_only_built_neighbors() {
        let mut level = ZoomLevelMeshes::new(z13(), TILE_EXTENT);
        let n = DVec3::new(0.2, 0.0, 1.0).normalize();
        let left = tile_with_seam_vertex(z13().coord(0, 0), DVec3::new(8192.0, 100.0, 1.0), n);
        let right = tile_with_seam_vertex(z13().coord(1, 0), DVec3::new(0.3, 100.0, 1.5), DVec3::Z);
        level.set_tile(0, left);
        level.set_tile(1, right);

        let report = level.stitch(&SeamParams::default());

        assert_eq!(report.welded, 1);
        let left = &level.tile(0, 0).unwrap().layer(LayerKind::Terrain)[0];
        let right = &level.tile(1, 0).unwrap().layer(LayerKind::Terrain)[0];
        assert_eq!(right.vertices[0].position, DVec3::new(0.0, 100.0, 1.0));
        assert_eq!(left.vertices[0].normal, right.vertices[0].normal);
    }

    #[test]
    fn test_layers_do_not_weld_across_kinds() {
        let mut level = ZoomLevelMeshes::new(z13(), TILE_EXTENT);
        let left = tile_with_seam_vertex(z13().coord(0, 0), DVec3::new(8192.0, 100.0, 1.0), DVec3::Z);
        level.set_tile(0, left);

        let mut water = TileMeshes::new(z13().coord(1, 0));
        let terrain = tile_with_seam_vertex(water.coord, DVec3::new(0.0, 100.0, 0.0), DVec3::Z);
        water.push(LayerKind::Water, terrain.layer(LayerKind::Terrain)[0].clone());
        level.set_tile(1, water);

        assert_eq!(level.stitch(&SeamParams::default()).welded, 0);
    }

    #[test]
    fn test_unknown_zoom_level() {
        let scene = Scene::new();
        assert!(matches!(scene.level(11), Err(SceneError::UnknownZoomLevel(11))));
    }
}
