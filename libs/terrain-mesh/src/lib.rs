//! # Terrain Mesh
//!
//! Geometry core of the terrain tile pipeline. Turns vector-tile polygon
//! rings into elevation-draped triangle meshes whose seams line up with
//! the neighbouring tiles.
//!
//! ## Architecture
//!
//! ```text
//! Ring ─▶ triangulate ─▶ PlanarMesh ─▶ subdivide ─▶ PlanarMesh
//!                                        (adjacency, repeated to a fixed point)
//!
//! PlanarMesh + ElevationGrid ─▶ construct ─▶ TerrainMesh ─▶ stitch (tile pairs)
//! ```
//!
//! Every stage is a pure function over owned or borrowed values. The crate
//! does no I/O; elevation images and vector tiles are decoded elsewhere.
//!
//! ## Usage
//!
//! ```rust
//! use terrain_mesh::{construct_mesh, subdivide, triangulate_ring, ElevationGrid, Ring};
//! use config::constants::{PipelineConfig, ELEVATION_GRID_SIZE};
//!
//! let ring = Ring::from_points(&[[0, 0], [8192, 0], [8192, 8192], [0, 8192]], None);
//! let planar = triangulate_ring(&ring).unwrap();
//! let planar = subdivide(planar, &PipelineConfig::default()).unwrap();
//! let grid = ElevationGrid::flat(ELEVATION_GRID_SIZE, 0.0).unwrap();
//! let mesh = construct_mesh(&planar, &grid, 1.0).unwrap();
//!
//! assert!(mesh.vertices.iter().all(|v| v.position.z == 0.0));
//! ```

pub mod adjacency;
pub mod construct;
pub mod elevation;
pub mod error;
pub mod mesh;
pub mod stitch;
pub mod subdivide;
pub mod triangulate;

pub use adjacency::{AdjacencyTable, EdgeRef};
pub use construct::{construct_mesh, face_normal};
pub use elevation::ElevationGrid;
pub use error::{MeshError, MeshResult};
pub use mesh::{
    signed_area, LocalEdge, PlanarMesh, TerrainMesh, Triangle, TriangleId, Vertex, VERTEX_STRIDE,
};
pub use stitch::{propagate_seam, stitch_tiles, SeamAxis, SeamParams, StitchReport};
pub use subdivide::{subdivide, subdivide_once};
pub use triangulate::{triangulate_ring, Ring};
