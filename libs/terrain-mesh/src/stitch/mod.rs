//! # Tile Stitching
//!
//! Welds boundary vertices of two neighbouring tiles so that positions and
//! normals agree across the seam.
//!
//! Tiles are meshed independently in their own tile-local frame. Tile `B`
//! sits at a fixed offset from tile `A`: one tile extent along `x` for
//! horizontal neighbours (`B` right of `A`), along `y` for vertical ones
//! (`B` below `A`). A vertex of `A` on its far edge and a vertex of `B` on
//! its near edge describe the same ground point when their positions
//! differ by that offset.
//!
//! ```text
//!   A (0..extent)      B (0..extent)
//!  +-------------+   +-------------+
//!  |          a1 |---| b1          |   a1 ≈ b1 + offset
//!  |          a2 |---| b2          |
//!  +-------------+   +-------------+
//! ```
//!
//! `A` is the authority: a welded `B` vertex takes `A`'s position, shifted
//! into `B`'s frame, and both take the averaged normal.

use config::constants::{SEAM_BAND, SEAM_MATCH_DISTANCE, TILE_EXTENT};
use glam::{DVec2, DVec3};
use log::debug;
use std::ops::AddAssign;

use crate::construct::unit;
use crate::mesh::{TerrainMesh, Vertex};


// =============================================================================
// TYPES
// =============================================================================

/// How two tiles touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeamAxis {
    /// `B` is the right-hand neighbour of `A`; the seam is `A.x = extent`,
    /// `B.x = 0`.
    Horizontal,
    /// `B` is the neighbour below `A`; the seam is `A.y = extent`,
    /// `B.y = 0`.
    Vertical,
}

impl SeamAxis {
    /// Translation from `B`'s frame into `A`'s frame.
    #[inline]
    pub fn offset(self, tile_extent: f64) -> DVec2 {
        match self {
            SeamAxis::Horizontal => DVec2::new(tile_extent, 0.0),
            SeamAxis::Vertical => DVec2::new(0.0, tile_extent),
        }
    }

    /// Coordinate measured across the seam.
    #[inline]
    fn across(self, position: DVec3) -> f64 {
        match self {
            SeamAxis::Horizontal => position.x,
            SeamAxis::Vertical => position.y,
        }
    }
}

/// Tolerances for seam matching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeamParams {
    /// Max distance from the seam line for a vertex to be a candidate
    pub band: f64,
    /// Planar distance below which two candidates are welded
    pub match_distance: f64,
    /// Tile edge length in tile-local units
    pub tile_extent: f64,
}

impl Default for SeamParams {
    fn default() -> Self {
        Self {
            band: SEAM_BAND,
            match_distance: SEAM_MATCH_DISTANCE,
            tile_extent: TILE_EXTENT,
        }
    }
}

/// What one stitching run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StitchReport {
    /// Seam candidates found in tile `A`
    pub candidates_a: usize,
    /// Seam candidates found in tile `B`
    pub candidates_b: usize,
    /// Vertex pairs welded
    pub welded: usize,
}

impl StitchReport {
    /// Candidates of `A` that found no partner.
    #[inline]
    pub fn unmatched(&self) -> usize {
        self.candidates_a - self.welded
    }
}

impl AddAssign for StitchReport {
    fn add_assign(&mut self, other: Self) {
        self.candidates_a += other.candidates_a;
        self.candidates_b += other.candidates_b;
        self.welded += other.welded;
    }
}

/// A vertex of one mesh within a tile's mesh list.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    mesh: usize,
    vertex: usize,
}

// =============================================================================
// STITCHING
// =============================================================================

/// Welds the seam between tile `a` and its neighbour `b`.
///
/// Both arguments are the meshes of one layer of each tile. Every
/// candidate of `a` is paired with the closest unpaired candidate of `b`
/// within `match_distance`; unmatched candidates are left alone. Running
/// the stitcher a second time on its own output changes nothing.
///
/// # Example
///
/// ```rust
/// use terrain_mesh::{stitch_tiles, SeamAxis, SeamParams, TerrainMesh, Triangle, Vertex};
/// use glam::DVec3;
///
/// let left = TerrainMesh::new(
///     vec![
///         Vertex::new(DVec3::new(8000.0, 0.0, 0.0)),
///         Vertex::new(DVec3::new(8192.0, 0.0, 5.0)),
///         Vertex::new(DVec3::new(8192.0, 100.0, 0.0)),
///     ],
///     vec![Triangle::new(0, 1, 2)],
/// );
/// let right = TerrainMesh::new(
///     vec![
///         Vertex::new(DVec3::new(0.5, 0.0, 4.0)),
///         Vertex::new(DVec3::new(200.0, 0.0, 0.0)),
///         Vertex::new(DVec3::new(0.0, 300.0, 0.0)),
///     ],
///     vec![Triangle::new(0, 1, 2)],
/// );
/// let (mut a, mut b) = (vec![left], vec![right]);
/// let report = stitch_tiles(&mut a, &mut b, SeamAxis::Horizontal, &SeamParams::default());
///
/// assert_eq!(report.welded, 1);
/// assert_eq!(b[0].vertices[0].position, DVec3::new(0.0, 0.0, 5.0));
/// ```
pub fn stitch_tiles(
    a: &mut [TerrainMesh],
    b: &mut [TerrainMesh],
    axis: SeamAxis,
    params: &SeamParams,
) -> StitchReport {
    let report = for_each_seam_pair(a, b, axis, params, weld);
    debug!(
        "{:?} seam: {} + {} candidates, {} welded",
        axis, report.candidates_a, report.candidates_b, report.welded
    );
    report
}

/// Copies `a`'s seam vertices onto their partners in `b` without
/// averaging.
///
/// A tile corner lies on two seams of each of the four tiles meeting
/// there, so welding seam by seam can leave an earlier pair out of sync.
/// Running this over all seams in welding order afterwards makes every
/// copy of a corner agree. On already agreeing seams it is a no-op.
pub fn propagate_seam(
    a: &mut [TerrainMesh],
    b: &mut [TerrainMesh],
    axis: SeamAxis,
    params: &SeamParams,
) -> StitchReport {
    for_each_seam_pair(a, b, axis, params, |va, vb, offset| {
        vb.normal = va.normal;
        vb.position = va.position - offset.extend(0.0);
    })
}

/// Pairs seam candidates of `a` and `b` and applies `apply` to each pair.
fn for_each_seam_pair(
    a: &mut [TerrainMesh],
    b: &mut [TerrainMesh],
    axis: SeamAxis,
    params: &SeamParams,
    mut apply: impl FnMut(&mut Vertex, &mut Vertex, DVec2),
) -> StitchReport {
    let offset = axis.offset(params.tile_extent);
    let candidates_a = seam_candidates(a, axis, params.tile_extent, params.band);
    let candidates_b = seam_candidates(b, axis, 0.0, params.band);

    let mut taken = vec![false; candidates_b.len()];
    let mut welded = 0;

    for ca in &candidates_a {
        let target = a[ca.mesh].vertices[ca.vertex].position.truncate() - offset;
        let closest = candidates_b
            .iter()
            .enumerate()
            .filter(|(j, _)| !taken[*j])
            .map(|(j, cb)| {
                let position = b[cb.mesh].vertices[cb.vertex].position.truncate();
                (j, position.distance(target))
            })
            .filter(|(_, distance)| *distance < params.match_distance)
            .min_by(|x, y| x.1.total_cmp(&y.1));

        if let Some((j, _)) = closest {
            taken[j] = true;
            let cb = candidates_b[j];
            apply(
                &mut a[ca.mesh].vertices[ca.vertex],
                &mut b[cb.mesh].vertices[cb.vertex],
                offset,
            );
            welded += 1;
        }
    }

    StitchReport {
        candidates_a: candidates_a.len(),
        candidates_b: candidates_b.len(),
        welded,
    }
}

/// Collects vertices used by a triangle that lie within `band` of the
/// seam line `across = seam`.
fn seam_candidates(meshes: &[TerrainMesh], axis: SeamAxis, seam: f64, band: f64) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for (m, mesh) in meshes.iter().enumerate() {
        let mut referenced = vec![false; mesh.vertex_count()];
        for &i in mesh.triangles.iter().flat_map(|tri| tri.0.iter()) {
            if let Some(slot) = referenced.get_mut(i as usize) {
                *slot = true;
            }
        }

        candidates.extend(
            mesh.vertices
                .iter()
                .enumerate()
                .filter(|(v, vertex)| {
                    referenced[*v] && (axis.across(vertex.position) - seam).abs() <= band
                })
                .map(|(v, _)| Candidate { mesh: m, vertex: v }),
        );
    }
    candidates
}

/// Makes `b` agree with `a`.
fn weld(a: &mut Vertex, b: &mut Vertex, offset: DVec2) {
    // Equal normals stay untouched so a repeated weld is a no-op
    if a.normal != b.normal {
        let normal = unit(a.normal + b.normal).unwrap_or(a.normal);
        a.normal = normal;
        b.normal = normal;
    }
    b.position = a.position - offset.extend(0.0);
}
