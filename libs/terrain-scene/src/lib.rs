//! # Terrain Scene
//!
//! Owned scene graph and pipeline driver for draped terrain tiles.
//!
//! ## Architecture
//!
//! ```text
//! SceneConfig ─▶ SceneBuilder ─┬─▶ VectorTileSource (per tile)
//!                              ├─▶ ElevationSource  (per tile)
//!                              └─▶ build_tile ─▶ ZoomLevelMeshes ─▶ stitch
//!
//! Scene ─▶ MeshUploader
//! ```
//!
//! The scene is a plain value: build it once, hand it to the renderer.
//! Decoding tiles and creating GPU buffers is left to the implementors of
//! the source and uploader traits.
//!
//! ## Usage
//!
//! ```rust
//! use terrain_scene::{
//!     ElevationSource, SceneBuilder, SceneConfig, SceneResult, TileCoord, VectorLayer,
//!     VectorTile, VectorTileSource,
//! };
//! use terrain_mesh::{ElevationGrid, Ring};
//!
//! struct Squares;
//! impl VectorTileSource for Squares {
//!     fn vector_tile(&mut self, _: TileCoord) -> SceneResult<VectorTile> {
//!         let ring = Ring::from_points(&[[0, 0], [8192, 0], [8192, 8192], [0, 8192]], None);
//!         Ok(VectorTile { layers: vec![VectorLayer::new("earth", vec![ring])] })
//!     }
//! }
//!
//! struct Flat;
//! impl ElevationSource for Flat {
//!     fn elevation(&mut self, _: TileCoord) -> SceneResult<ElevationGrid> {
//!         Ok(ElevationGrid::flat(512, 0.0)?)
//!     }
//! }
//!
//! let config = SceneConfig {
//!     min_edge_length: 2048.0,
//!     ..SceneConfig::default()
//! };
//! let scene = SceneBuilder::new(config).build(&mut Squares, &mut Flat).unwrap();
//! assert_eq!(scene.mesh_count(), 1 + 4 + 16);
//! ```

pub mod error;
pub mod layer;
pub mod scene;
pub mod settings;
pub mod source;
pub mod tile;

pub use error::{SceneError, SceneResult};
pub use layer::LayerKind;
pub use scene::{Scene, SceneBuilder, ZoomLevelMeshes};
pub use settings::{NeighborPair, SceneConfig, TileCoord, ZoomLevelConfig};
pub use source::{ElevationSource, MeshKey, MeshUploader, VectorLayer, VectorTile, VectorTileSource};
pub use tile::{build_ring_mesh, build_tile, TileMeshes};
