//! Re-triangulation patterns for split triangles.
//!
//! A triangle `[A, B, C]` whose edges were bisected is replaced by a fixed
//! set of triangles over its corners and edge midpoints. The mask bits
//! follow [`LocalEdge::mask`](crate::mesh::LocalEdge::mask): `AB = 1`,
//! `BC = 2`, `CA = 4`. Every pattern keeps the winding of the parent.

/// Vertex role within a split triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// First corner
    A,
    /// Second corner
    B,
    /// Third corner
    C,
    /// Midpoint of A–B
    Ab,
    /// Midpoint of B–C
    Bc,
    /// Midpoint of C–A
    Ca,
}

use Role::{Ab, Bc, Ca, A, B, C};

const SPLIT_AB: &[[Role; 3]] = &[[A, Ab, C], [Ab, B, C]];
const SPLIT_BC: &[[Role; 3]] = &[[A, B, Bc], [A, Bc, C]];
const SPLIT_CA: &[[Role; 3]] = &[[A, B, Ca], [Ca, B, C]];
const SPLIT_AB_BC: &[[Role; 3]] = &[[Ab, B, Bc], [A, Ab, Bc], [A, Bc, C]];
const SPLIT_AB_CA: &[[Role; 3]] = &[[A, Ab, Ca], [Ab, B, C], [Ab, C, Ca]];
const SPLIT_BC_CA: &[[Role; 3]] = &[[Bc, C, Ca], [A, B, Bc], [A, Bc, Ca]];
const SPLIT_ALL: &[[Role; 3]] = &[[A, Ab, Ca], [Ab, B, Bc], [Ca, Bc, C], [Ab, Bc, Ca]];

/// Returns the replacement triangles for a split mask.
///
/// Mask 0 (untouched) and masks above 7 have no pattern.
pub fn split_pattern(mask: u8) -> Option<&'static [[Role; 3]]> {
    match mask {
        0b001 => Some(SPLIT_AB),
        0b010 => Some(SPLIT_BC),
        0b100 => Some(SPLIT_CA),
        0b011 => Some(SPLIT_AB_BC),
        0b101 => Some(SPLIT_AB_CA),
        0b110 => Some(SPLIT_BC_CA),
        0b111 => Some(SPLIT_ALL),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn position(role: Role) -> DVec2 {
        let (a, b, c) = (DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0), DVec2::new(0.0, 4.0));
        match role {
            A => a,
            B => b,
            C => c,
            Ab => (a + b) * 0.5,
            Bc => (b + c) * 0.5,
            Ca => (c + a) * 0.5,
        }
    }

    fn area(tri: &[Role; 3]) -> f64 {
        let [a, b, c] = tri.map(position);
        0.5 * (b - a).perp_dot(c - a)
    }

    #[test]
    fn test_every_mask_has_a_pattern() {
        for mask in 1..=7u8 {
            let pattern = split_pattern(mask).unwrap();
            assert_eq!(pattern.len(), mask.count_ones() as usize + 1);
        }
    }

    #[test]
    fn test_untouched_and_invalid_masks() {
        assert!(split_pattern(0).is_none());
        assert!(split_pattern(8).is_none());
        assert!(split_pattern(0xFF).is_none());
    }

    #[test]
    fn test_patterns_tile_the_parent() {
        for mask in 1..=7u8 {
            let pattern = split_pattern(mask).unwrap();
            let total: f64 = pattern.iter().map(area).sum();
            assert_eq!(total, 8.0, "mask {mask:03b} doesn't cover the parent");
            assert!(pattern.iter().all(|tri| area(tri) > 0.0), "mask {mask:03b} flips a triangle");
        }
    }

    #[test]
    fn test_patterns_use_exactly_the_split_midpoints() {
        let midpoint_bits = [(Ab, 0b001), (Bc, 0b010), (Ca, 0b100)];
        for mask in 1..=7u8 {
            let pattern = split_pattern(mask).unwrap();
            for (role, bit) in midpoint_bits {
                let used = pattern.iter().flatten().any(|&r| r == role);
                assert_eq!(used, mask & bit != 0, "mask {mask:03b}, role {role:?}");
            }
        }
    }
}
