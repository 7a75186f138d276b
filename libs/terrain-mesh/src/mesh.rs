//! # Mesh Data Structures
//!
//! Planar (pre-elevation) and draped (post-elevation) triangle meshes.
//!
//! All geometry calculations use f64 internally. Export to f32 only
//! happens when buffers are handed to the renderer.

use glam::{DVec2, DVec3};

use crate::error::{MeshError, MeshResult};

/// Number of floats per exported vertex: position xyz + normal xyz.
pub const VERTEX_STRIDE: usize = 6;

/// Arena index of a triangle within a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TriangleId(pub u32);

impl TriangleId {
    /// Returns the id as a slice index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One of the three edges of a triangle `[a, b, c]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalEdge {
    /// a → b
    Ab = 0,
    /// b → c
    Bc = 1,
    /// c → a
    Ca = 2,
}

impl LocalEdge {
    /// All edges in triangle order.
    pub const ALL: [LocalEdge; 3] = [LocalEdge::Ab, LocalEdge::Bc, LocalEdge::Ca];

    /// Position of the edge within the triangle (0, 1 or 2).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Bit used for this edge in a split mask.
    #[inline]
    pub fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// A triangle as three vertex indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle(pub [u32; 3]);

impl Triangle {
    /// Creates a triangle from three vertex indices.
    #[inline]
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self([a, b, c])
    }

    /// Returns the vertex indices bounding `edge`, in triangle order.
    #[inline]
    pub fn edge(&self, edge: LocalEdge) -> (u32, u32) {
        let [a, b, c] = self.0;
        match edge {
            LocalEdge::Ab => (a, b),
            LocalEdge::Bc => (b, c),
            LocalEdge::Ca => (c, a),
        }
    }

    /// Returns true if `edge` of this triangle and `other_edge` of `other`
    /// connect the same two vertices, in either direction.
    #[inline]
    pub fn shares_edge(&self, edge: LocalEdge, other: &Triangle, other_edge: LocalEdge) -> bool {
        let (a, b) = self.edge(edge);
        let (c, d) = other.edge(other_edge);
        (a == c && b == d) || (a == d && b == c)
    }

    /// Returns true if the triangle references `vertex`.
    #[inline]
    pub fn contains(&self, vertex: u32) -> bool {
        self.0.contains(&vertex)
    }
}

/// A planar triangle mesh in tile-local coordinates.
///
/// This is the state passed between triangulation and subdivision.
/// Winding is counter-clockwise (positive signed area) when the mesh
/// comes out of the triangulator; subdivision preserves it.
///
/// # Example
///
/// ```rust
/// use terrain_mesh::{PlanarMesh, Triangle};
/// use glam::DVec2;
///
/// let mesh = PlanarMesh::new(
///     vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0), DVec2::new(0.0, 10.0)],
///     vec![Triangle::new(0, 1, 2)],
/// );
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanarMesh {
    /// Vertex positions
    pub vertices: Vec<DVec2>,
    /// Triangles indexing into `vertices`
    pub triangles: Vec<Triangle>,
}

impl PlanarMesh {
    /// Creates a mesh from vertices and triangles.
    pub fn new(vertices: Vec<DVec2>, triangles: Vec<Triangle>) -> Self {
        Self { vertices, triangles }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Returns the positions of a triangle's corners.
    #[inline]
    pub fn corners(&self, triangle: &Triangle) -> [DVec2; 3] {
        let [a, b, c] = triangle.0;
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Returns the length of one edge of a triangle.
    #[inline]
    pub fn edge_length(&self, triangle: &Triangle, edge: LocalEdge) -> f64 {
        let (a, b) = triangle.edge(edge);
        self.vertices[a as usize].distance(self.vertices[b as usize])
    }

    /// Returns the length of the longest edge in the mesh.
    pub fn max_edge_length(&self) -> f64 {
        self.triangles
            .iter()
            .flat_map(|tri| LocalEdge::ALL.map(|edge| self.edge_length(tri, edge)))
            .fold(0.0, f64::max)
    }

    /// Returns the flattened index buffer.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flat_map(|tri| tri.0).collect()
    }

    /// Checks that every triangle references an existing vertex.
    pub fn validate(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        for tri in &self.triangles {
            for &index in &tri.0 {
                if index as usize >= vertex_count {
                    return Err(MeshError::IndexOutOfBounds { index, vertex_count });
                }
            }
        }
        Ok(())
    }
}

/// Signed area of a planar triangle (positive when counter-clockwise).
#[inline]
pub fn signed_area(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    0.5 * (b - a).perp_dot(c - a)
}

/// A draped vertex: position with elevation plus a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Tile-local x, y and scaled elevation
    pub position: DVec3,
    /// Unit normal with a non-negative up component
    pub normal: DVec3,
}

impl Vertex {
    /// Creates a vertex with the default upward normal.
    #[inline]
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            normal: DVec3::Z,
        }
    }
}

/// An elevation-draped triangle mesh ready for upload.
///
/// # Example
///
/// ```rust
/// use terrain_mesh::{TerrainMesh, Triangle, Vertex, VERTEX_STRIDE};
/// use glam::DVec3;
///
/// let mesh = TerrainMesh::new(
///     vec![Vertex::new(DVec3::ZERO), Vertex::new(DVec3::X), Vertex::new(DVec3::Y)],
///     vec![Triangle::new(0, 1, 2)],
/// );
/// assert_eq!(mesh.vertex_data().len(), 3 * VERTEX_STRIDE);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainMesh {
    /// Draped vertices
    pub vertices: Vec<Vertex>,
    /// Triangles indexing into `vertices`
    pub triangles: Vec<Triangle>,
}

impl TerrainMesh {
    /// Creates a mesh from vertices and triangles.
    pub fn new(vertices: Vec<Vertex>, triangles: Vec<Triangle>) -> Self {
        Self { vertices, triangles }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        self.vertices.iter().skip(1).fold(
            (first.position, first.position),
            |(min, max), v| (min.min(v.position), max.max(v.position)),
        )
    }

    /// Exports vertices as interleaved f32 data for the GPU.
    ///
    /// Returns `[px, py, pz, nx, ny, nz, ...]` with [`VERTEX_STRIDE`] floats
    /// per vertex.
    pub fn vertex_data(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertices.len() * VERTEX_STRIDE);
        for v in &self.vertices {
            result.extend_from_slice(&[
                v.position.x as f32,
                v.position.y as f32,
                v.position.z as f32,
                v.normal.x as f32,
                v.normal.y as f32,
                v.normal.z as f32,
            ]);
        }
        result
    }

    /// Exports triangle indices as a flat u32 array.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flat_map(|tri| tri.0).collect()
    }
}
