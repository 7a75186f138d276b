//! # Edge Subdivision
//!
//! Bisects every edge at or above a length threshold while keeping the
//! mesh conforming: when a triangle splits an edge, the neighbour across
//! that edge is told about the new midpoint, so both sides reference the
//! same vertex and no T-junction appears.
//!
//! One pass visits every triangle, decides which of its edges to split,
//! then replaces each touched triangle by a fixed pattern (see
//! [`split_pattern`]). New triangles may still be too long, so passes
//! repeat until one adds no vertex.
//!
//! ```text
//!          C                    C
//!         / \                  / \
//!        /   \      1-to-4    Ca--Bc
//!       /     \    ------>   / \  / \
//!      A-------B            A---Ab---B
//! ```

mod patterns;


pub use patterns::{split_pattern, Role};

use config::constants::PipelineConfig;
use log::debug;

use crate::adjacency::AdjacencyTable;
use crate::error::{MeshError, MeshResult};
use crate::mesh::{LocalEdge, PlanarMesh, Triangle, TriangleId};

/// Which edges of one triangle were split, and the midpoint of each.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SplitRecord {
    mask: u8,
    midpoints: [Option<u32>; 3],
}

impl SplitRecord {
    #[inline]
    fn is_split(&self, edge: LocalEdge) -> bool {
        self.mask & edge.mask() != 0
    }

    #[inline]
    fn mark(&mut self, edge: LocalEdge, midpoint: u32) {
        self.mask |= edge.mask();
        self.midpoints[edge.index()] = Some(midpoint);
    }
}

/// Runs a single subdivision pass.
///
/// Returns `Ok(None)` when no edge reaches `min_edge_length`, otherwise
/// the refined mesh. New vertices are appended after the existing ones,
/// so original vertex indices stay valid.
///
/// # Errors
///
/// - [`MeshError::InvalidThreshold`] for a non-positive or non-finite
///   threshold.
/// - [`MeshError::IndexOutOfBounds`] if a triangle references a missing
///   vertex.
/// - [`MeshError::InvalidSplitMask`] if a triangle ends up with a mask
///   that has no pattern.
pub fn subdivide_once(mesh: &PlanarMesh, min_edge_length: f64) -> MeshResult<Option<PlanarMesh>> {
    if !min_edge_length.is_finite() || min_edge_length <= 0.0 {
        return Err(MeshError::InvalidThreshold(min_edge_length));
    }
    mesh.validate()?;

    let adjacency = AdjacencyTable::build(mesh);
    let mut records = vec![SplitRecord::default(); mesh.triangle_count()];
    let mut vertices = mesh.vertices.clone();

    for (i, triangle) in mesh.triangles.iter().enumerate() {
        for edge in LocalEdge::ALL {
            // Already split from the other side
            if records[i].is_split(edge) {
                continue;
            }
            if mesh.edge_length(triangle, edge) < min_edge_length {
                continue;
            }

            let (a, b) = triangle.edge(edge);
            let midpoint = vertices.len() as u32;
            vertices.push((mesh.vertices[a as usize] + mesh.vertices[b as usize]) * 0.5);

            records[i].mark(edge, midpoint);
            if let Some(neighbour) = adjacency.neighbour(TriangleId(i as u32), edge) {
                records[neighbour.triangle.index()].mark(neighbour.edge, midpoint);
            }
        }
    }

    if vertices.len() == mesh.vertex_count() {
        return Ok(None);
    }

    let mut triangles = Vec::with_capacity(mesh.triangle_count() * 4);
    for (i, (triangle, record)) in mesh.triangles.iter().zip(&records).enumerate() {
        if record.mask == 0 {
            triangles.push(*triangle);
            continue;
        }
        let invalid = || MeshError::InvalidSplitMask {
            mask: record.mask,
            triangle: i as u32,
        };
        let pattern = split_pattern(record.mask).ok_or_else(invalid)?;
        for roles in pattern {
            let [a, b, c] = [roles[0], roles[1], roles[2]]
                .map(|role| resolve(triangle, record, role));
            triangles.push(Triangle::new(
                a.ok_or_else(invalid)?,
                b.ok_or_else(invalid)?,
                c.ok_or_else(invalid)?,
            ));
        }
    }

    Ok(Some(PlanarMesh::new(vertices, triangles)))
}

/// Maps a pattern role to a vertex index of the parent triangle.
#[inline]
fn resolve(triangle: &Triangle, record: &SplitRecord, role: Role) -> Option<u32> {
    let [a, b, c] = triangle.0;
    match role {
        Role::A => Some(a),
        Role::B => Some(b),
        Role::C => Some(c),
        Role::Ab => record.midpoints[LocalEdge::Ab.index()],
        Role::Bc => record.midpoints[LocalEdge::Bc.index()],
        Role::Ca => record.midpoints[LocalEdge::Ca.index()],
    }
}

/// Subdivides until no edge reaches the configured threshold.
///
/// # Errors
///
/// Returns [`MeshError::SubdivisionDiverged`] if every one of the
/// configured passes still added vertices, plus any error from
/// [`subdivide_once`].
///
/// # Example
///
/// ```rust
/// use terrain_mesh::{subdivide, triangulate_ring, Ring};
/// use config::constants::PipelineConfig;
///
/// let ring = Ring::from_points(&[[0, 0], [8192, 0], [8192, 8192], [0, 8192]], None);
/// let mesh = triangulate_ring(&ring).unwrap();
/// let fine = subdivide(mesh, &PipelineConfig::default()).unwrap();
/// assert!(fine.max_edge_length() < 500.0);
/// ```
pub fn subdivide(mesh: PlanarMesh, config: &PipelineConfig) -> MeshResult<PlanarMesh> {
    let mut current = mesh;
    for pass in 1..=config.max_subdivision_passes {
        match subdivide_once(&current, config.min_edge_length)? {
            Some(refined) => current = refined,
            None => {
                debug!(
                    "Subdivision converged after {} passes: {} vertices, {} triangles",
                    pass,
                    current.vertex_count(),
                    current.triangle_count()
                );
                return Ok(current);
            }
        }
    }
    Err(MeshError::SubdivisionDiverged {
        passes: config.max_subdivision_passes,
    })
}
