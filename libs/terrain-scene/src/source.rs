//! # Collaborator Interfaces
//!
//! The scene never decodes files or talks to the GPU. Vector tiles and
//! elevation grids come from a [`VectorTileSource`] and an
//! [`ElevationSource`]; finished buffers go to a [`MeshUploader`].

use glam::DVec2;
use terrain_mesh::{ElevationGrid, Ring};

use crate::error::SceneResult;
use crate::layer::LayerKind;
use crate::settings::TileCoord;

/// One named layer of a decoded vector tile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorLayer {
    /// Layer name as stored in the tile, e.g. `"earth"`
    pub name: String,
    /// Polygon rings of the layer
    pub rings: Vec<Ring>,
}

impl VectorLayer {
    /// Creates a layer.
    pub fn new(name: impl Into<String>, rings: Vec<Ring>) -> Self {
        Self {
            name: name.into(),
            rings,
        }
    }
}

/// A decoded vector tile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorTile {
    /// Layers in the order the decoder emitted them
    pub layers: Vec<VectorLayer>,
}

/// Provides decoded vector tiles.
pub trait VectorTileSource {
    /// Returns the decoded tile at `coord`.
    ///
    /// An error marks the tile as missing; the scene skips it.
    fn vector_tile(&mut self, coord: TileCoord) -> SceneResult<VectorTile>;
}

/// Provides decoded elevation grids.
pub trait ElevationSource {
    /// Returns the elevation grid of the tile at `coord`.
    ///
    /// An error marks the tile as missing; the scene skips it.
    fn elevation(&mut self, coord: TileCoord) -> SceneResult<ElevationGrid>;
}

/// Identifies one uploaded mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshKey {
    /// Tile the mesh belongs to
    pub tile: TileCoord,
    /// Translation of the tile within its zoom level
    pub origin: DVec2,
    /// Bucket of the mesh
    pub layer: LayerKind,
    /// Position within the bucket
    pub index: usize,
}

/// Receives finished mesh buffers, typically to create GPU buffers.
pub trait MeshUploader {
    /// Takes one mesh as interleaved vertex data and triangle indices.
    ///
    /// `vertex_data` holds `vertex_count * stride` floats; `indices` holds
    /// `index_count` entries, three per triangle.
    fn upload(
        &mut self,
        key: MeshKey,
        vertex_data: &[f32],
        vertex_count: usize,
        stride: usize,
        indices: &[u32],
        index_count: usize,
    );
}
