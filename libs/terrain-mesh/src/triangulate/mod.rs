//! # Ring Triangulation
//!
//! Triangulates a polygon ring with at most one hole using `earcutr`.
//!
//! ## Algorithm
//!
//! 1. Reject rings without area (fewer than three distinct points or all
//!    collinear).
//! 2. Flatten the outer ring, minus a closing point equal to the first
//!    one, followed by the hole into one coordinate buffer.
//! 3. Run earcut and map its indices back onto the supplied points.
//! 4. Flip clockwise triangles and drop zero-area ones.
//!
//! The vertex buffer is always the outer points followed by the inner
//! points, exactly as supplied. Emitted triangles have positive signed
//! area regardless of the input orientation.

use glam::DVec2;
use log::debug;

use crate::mesh::{signed_area, PlanarMesh, Triangle};

#[cfg(test)]
mod tests;

/// A polygon ring as delivered by the vector-tile decoder.
///
/// Holds the outer boundary and an optional single hole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ring {
    /// Outer boundary points
    pub outer: Vec<DVec2>,
    /// Optional hole boundary points
    pub inner: Option<Vec<DVec2>>,
}

impl Ring {
    /// Creates a ring without a hole.
    pub fn new(outer: Vec<DVec2>) -> Self {
        Self { outer, inner: None }
    }

    /// Creates a ring with a hole.
    pub fn with_hole(outer: Vec<DVec2>, inner: Vec<DVec2>) -> Self {
        Self {
            outer,
            inner: Some(inner),
        }
    }

    /// Creates a ring from integer tile coordinates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use terrain_mesh::Ring;
    ///
    /// let ring = Ring::from_points(&[[0, 0], [10, 0], [10, 10]], None);
    /// assert_eq!(ring.point_count(), 3);
    /// ```
    pub fn from_points(outer: &[[i32; 2]], inner: Option<&[[i32; 2]]>) -> Self {
        let convert = |points: &[[i32; 2]]| -> Vec<DVec2> {
            points
                .iter()
                .map(|&[x, y]| DVec2::new(f64::from(x), f64::from(y)))
                .collect()
        };
        Self {
            outer: convert(outer),
            inner: inner.map(convert),
        }
    }

    /// Returns true if the ring has a hole.
    pub fn has_hole(&self) -> bool {
        self.inner.as_ref().is_some_and(|inner| !inner.is_empty())
    }

    /// Total number of points, outer plus inner.
    pub fn point_count(&self) -> usize {
        self.outer.len() + self.inner.as_ref().map_or(0, Vec::len)
    }
}

/// Triangulates a ring.
///
/// Returns `None` when the ring yields no geometry: an empty outer ring,
/// fewer than three distinct points, or zero area.
///
/// # Example
///
/// ```rust
/// use terrain_mesh::{triangulate_ring, Ring};
///
/// let ring = Ring::from_points(&[[0, 0], [8192, 0], [8192, 8192], [0, 8192]], None);
/// let mesh = triangulate_ring(&ring).unwrap();
/// assert_eq!(mesh.triangle_count(), 2);
/// assert_eq!(mesh.vertex_count(), 4);
/// ```
pub fn triangulate_ring(ring: &Ring) -> Option<PlanarMesh> {
    let outer = open_ring(&ring.outer);
    if ring_area(outer) == 0.0 {
        debug!("Skipping degenerate ring ({} points)", ring.outer.len());
        return None;
    }

    let hole = ring.inner.as_deref().map(open_ring).filter(|hole| {
        let usable = ring_area(hole) != 0.0;
        if !usable {
            debug!("Ignoring degenerate hole ({} points)", hole.len());
        }
        usable
    });

    let mut coords = Vec::with_capacity(2 * (outer.len() + hole.map_or(0, <[DVec2]>::len)));
    coords.extend(outer.iter().chain(hole.into_iter().flatten()).flat_map(|p| [p.x, p.y]));
    let hole_starts: Vec<usize> = hole.map(|_| outer.len()).into_iter().collect();

    let indices = match earcutr::earcut(&coords, &hole_starts, 2) {
        Ok(indices) => indices,
        Err(err) => {
            debug!("Earcut failed on a ring of {} points: {:?}", ring.outer.len(), err);
            return None;
        }
    };

    let mut vertices = Vec::with_capacity(ring.point_count());
    vertices.extend_from_slice(&ring.outer);
    if let Some(inner) = &ring.inner {
        vertices.extend_from_slice(inner);
    }

    // Earcut numbers hole points right after the open outer ring; the
    // buffer keeps the full outer ring in front of them.
    let hole_shift = (ring.outer.len() - outer.len()) as u32;
    let to_buffer = |i: usize| {
        let i = i as u32;
        if i < outer.len() as u32 {
            i
        } else {
            i + hole_shift
        }
    };

    let triangles: Vec<Triangle> = indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(to_buffer);
            let area = signed_area(
                vertices[a as usize],
                vertices[b as usize],
                vertices[c as usize],
            );
            if area > 0.0 {
                Some(Triangle::new(a, b, c))
            } else if area < 0.0 {
                Some(Triangle::new(a, c, b))
            } else {
                None
            }
        })
        .collect();

    if triangles.is_empty() {
        return None;
    }
    Some(PlanarMesh::new(vertices, triangles))
}

/// Strips trailing points that repeat the first one.
fn open_ring(points: &[DVec2]) -> &[DVec2] {
    let mut end = points.len();
    while end > 1 && points[end - 1] == points[0] {
        end -= 1;
    }
    &points[..end]
}

/// Twice the signed area of a ring (positive when counter-clockwise).
fn ring_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n).map(|i| points[i].perp_dot(points[(i + 1) % n])).sum()
}
