//! # Mesh Construction
//!
//! Lifts a planar mesh onto the elevation grid and estimates per-vertex
//! normals.
//!
//! Each vertex keeps its tile-local `x` and `y` and gets
//! `z = height(x, y) * elevation_scale`. The normal of a vertex is the
//! renormalized sum of the unit face normals of every triangle that uses
//! it. Face normals are flipped to point up (`z >= 0`), since winding
//! alone says nothing about which side of the terrain faces the sky.

use glam::DVec3;
use log::debug;

use crate::elevation::ElevationGrid;
use crate::error::MeshResult;
use crate::mesh::{PlanarMesh, TerrainMesh, Triangle, Vertex};


/// Drapes `mesh` over `grid` and computes averaged vertex normals.
///
/// Vertices not referenced by any triangle keep the default upward
/// normal.
///
/// # Errors
///
/// - [`MeshError::IndexOutOfBounds`](crate::MeshError::IndexOutOfBounds)
///   if a triangle references a missing vertex.
/// - [`MeshError::ElevationOutOfRange`](crate::MeshError::ElevationOutOfRange)
///   if a vertex lies outside the tile.
///
/// # Example
///
/// ```rust
/// use terrain_mesh::{construct_mesh, ElevationGrid, PlanarMesh, Triangle};
/// use glam::{DVec2, DVec3};
///
/// let planar = PlanarMesh::new(
///     vec![DVec2::new(0.0, 0.0), DVec2::new(100.0, 0.0), DVec2::new(0.0, 100.0)],
///     vec![Triangle::new(0, 1, 2)],
/// );
/// let grid = ElevationGrid::flat(512, 10.0).unwrap();
/// let mesh = construct_mesh(&planar, &grid, 2.0).unwrap();
///
/// assert_eq!(mesh.vertices[1].position, DVec3::new(100.0, 0.0, 20.0));
/// assert_eq!(mesh.vertices[1].normal, DVec3::Z);
/// ```
pub fn construct_mesh(
    mesh: &PlanarMesh,
    grid: &ElevationGrid,
    elevation_scale: f64,
) -> MeshResult<TerrainMesh> {
    mesh.validate()?;

    let mut vertices = mesh
        .vertices
        .iter()
        .map(|p| Ok(Vertex::new(p.extend(grid.sample(p.x, p.y)? * elevation_scale))))
        .collect::<MeshResult<Vec<_>>>()?;

    compute_normals(&mut vertices, &mesh.triangles);

    Ok(TerrainMesh::new(vertices, mesh.triangles.clone()))
}

/// Recomputes every vertex normal from the incident triangles.
fn compute_normals(vertices: &mut [Vertex], triangles: &[Triangle]) {
    let mut sums = vec![DVec3::ZERO; vertices.len()];
    let mut incident = vec![0u32; vertices.len()];

    for tri in triangles {
        let [a, b, c] = tri.0.map(|i| vertices[i as usize].position);
        let Some(normal) = face_normal(a, b, c) else {
            continue;
        };
        for &i in &tri.0 {
            sums[i as usize] += normal;
            incident[i as usize] += 1;
        }
    }

    let mut orphans = 0usize;
    for ((vertex, sum), count) in vertices.iter_mut().zip(sums).zip(incident) {
        vertex.normal = match (count, unit(sum)) {
            (0, _) | (_, None) => {
                orphans += 1;
                DVec3::Z
            }
            (_, Some(normal)) => normal,
        };
    }
    if orphans > 0 {
        debug!("{} vertices without incident triangles keep the default normal", orphans);
    }
}

/// Upward-facing unit normal of a triangle, `None` if it is degenerate.
pub fn face_normal(a: DVec3, b: DVec3, c: DVec3) -> Option<DVec3> {
    let normal = unit((b - a).cross(c - a))?;
    Some(if normal.z < 0.0 { -normal } else { normal })
}

/// Scales `v` to unit length by dividing by its length.
///
/// Dividing keeps axis-aligned vectors exact, e.g. `(0, 0, k)` becomes
/// exactly `(0, 0, 1)`.
#[inline]
pub(crate) fn unit(v: DVec3) -> Option<DVec3> {
    let length = v.length();
    (length.is_finite() && length > 0.0).then(|| v / length)
}
