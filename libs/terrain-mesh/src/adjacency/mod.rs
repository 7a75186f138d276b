//! # Triangle Adjacency
//!
//! Shared-edge adjacency for a planar triangle mesh.
//!
//! For every triangle and each of its three local edges the table stores
//! at most one neighbour: the other triangle that uses the same two vertex
//! indices. Entries are always recorded in pairs, so the relation is
//! symmetric. Boundary edges have no entry.
//!
//! The search compares every edge against the edges of all later
//! triangles, which is quadratic in the triangle count. Inputs are single
//! rings, so the count stays small.

use crate::mesh::{LocalEdge, PlanarMesh, TriangleId};

#[cfg(test)]
mod tests;

/// One side of a shared edge: a triangle and which of its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeRef {
    /// Triangle owning the edge
    pub triangle: TriangleId,
    /// Edge within that triangle
    pub edge: LocalEdge,
}

impl EdgeRef {
    /// Creates an edge reference.
    #[inline]
    pub fn new(triangle: TriangleId, edge: LocalEdge) -> Self {
        Self { triangle, edge }
    }
}

/// Per-triangle neighbour table addressed by [`TriangleId`].
///
/// # Example
///
/// ```rust
/// use terrain_mesh::{AdjacencyTable, LocalEdge, PlanarMesh, Triangle, TriangleId};
/// use glam::DVec2;
///
/// let mesh = PlanarMesh::new(
///     vec![DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y],
///     vec![Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)],
/// );
/// let table = AdjacencyTable::build(&mesh);
/// let neighbour = table.neighbour(TriangleId(0), LocalEdge::Ca).unwrap();
/// assert_eq!(neighbour.triangle, TriangleId(1));
/// assert_eq!(neighbour.edge, LocalEdge::Ab);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyTable {
    neighbours: Vec<[Option<EdgeRef>; 3]>,
}

impl AdjacencyTable {
    /// Computes adjacency for every triangle of `mesh`.
    pub fn build(mesh: &PlanarMesh) -> Self {
        let triangles = &mesh.triangles;
        let mut neighbours = vec![[None; 3]; triangles.len()];

        for i in 0..triangles.len() {
            for edge in LocalEdge::ALL {
                if neighbours[i][edge.index()].is_some() {
                    continue;
                }
                if let Some((j, other_edge)) = find_shared_edge(mesh, i, edge, &neighbours) {
                    neighbours[i][edge.index()] = Some(EdgeRef::new(TriangleId(j as u32), other_edge));
                    neighbours[j][other_edge.index()] = Some(EdgeRef::new(TriangleId(i as u32), edge));
                }
            }
        }

        Self { neighbours }
    }

    /// Returns the neighbour across `edge` of `triangle`, if any.
    #[inline]
    pub fn neighbour(&self, triangle: TriangleId, edge: LocalEdge) -> Option<EdgeRef> {
        self.neighbours
            .get(triangle.index())
            .and_then(|edges| edges[edge.index()])
    }

    /// Returns the number of triangles covered by the table.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Returns the number of shared edges (each counted once).
    pub fn shared_edge_count(&self) -> usize {
        self.neighbours.iter().flatten().filter(|n| n.is_some()).count() / 2
    }

    /// Iterates all recorded `(from, to)` pairs. Every shared edge appears
    /// twice, once from each side.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeRef, EdgeRef)> + '_ {
        self.neighbours.iter().enumerate().flat_map(|(i, edges)| {
            LocalEdge::ALL.into_iter().filter_map(move |edge| {
                edges[edge.index()].map(|to| (EdgeRef::new(TriangleId(i as u32), edge), to))
            })
        })
    }
}

/// Scans the triangles after `current` for a free edge matching `edge`.
fn find_shared_edge(
    mesh: &PlanarMesh,
    current: usize,
    edge: LocalEdge,
    neighbours: &[[Option<EdgeRef>; 3]],
) -> Option<(usize, LocalEdge)> {
    let triangle = &mesh.triangles[current];
    let (a, b) = triangle.edge(edge);
    if a == b {
        return None;
    }

    for (j, other) in mesh.triangles.iter().enumerate().skip(current + 1) {
        for other_edge in LocalEdge::ALL {
            if neighbours[j][other_edge.index()].is_none()
                && triangle.shares_edge(edge, other, other_edge)
            {
                return Some((j, other_edge));
            }
        }
    }
    None
}
