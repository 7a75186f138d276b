//! # Triangulation Tests

use super::*;
use crate::mesh::signed_area;
use approx::assert_relative_eq;

fn square(size: i32) -> Vec<[i32; 2]> {
    vec![[0, 0], [size, 0], [size, size], [0, size]]
}

fn total_area(mesh: &PlanarMesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|tri| {
            let [a, b, c] = mesh.corners(tri);
            signed_area(a, b, c)
        })
        .sum()
}

fn assert_counter_clockwise(mesh: &PlanarMesh) {
    for tri in &mesh.triangles {
        let [a, b, c] = mesh.corners(tri);
        assert!(signed_area(a, b, c) > 0.0, "triangle {:?} is not CCW", tri);
    }
}

#[test]
fn test_convex_quad() {
    let ring = Ring::from_points(&square(8192), None);
    let mesh = triangulate_ring(&ring).unwrap();

    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.vertex_count(), 4);
    assert_counter_clockwise(&mesh);
    assert_relative_eq!(total_area(&mesh), 8192.0 * 8192.0);
}

#[test]
fn test_clockwise_input_is_normalized() {
    let mut points = square(100);
    points.reverse();
    let mesh = triangulate_ring(&Ring::from_points(&points, None)).unwrap();

    assert_eq!(mesh.triangle_count(), 2);
    assert_counter_clockwise(&mesh);
}

#[test]
fn test_closing_point_is_kept_in_buffer() {
    let mut points = square(100);
    points.push([0, 0]);
    let mesh = triangulate_ring(&Ring::from_points(&points, None)).unwrap();

    assert_eq!(mesh.vertex_count(), 5);
    assert_eq!(mesh.triangle_count(), 2);
    assert!(mesh.triangles.iter().all(|tri| !tri.contains(4)));
}

#[test]
fn test_concave_l_shape() {
    let points = [[0, 0], [20, 0], [20, 10], [10, 10], [10, 20], [0, 20]];
    let mesh = triangulate_ring(&Ring::from_points(&points, None)).unwrap();

    assert_eq!(mesh.triangle_count(), 4);
    assert_counter_clockwise(&mesh);
    assert_relative_eq!(total_area(&mesh), 300.0);
}

#[test]
fn test_ring_with_hole() {
    let outer = square(10);
    let hole = [[3, 3], [3, 7], [7, 7], [7, 3]];
    let ring = Ring::from_points(&outer, Some(&hole));
    let mesh = triangulate_ring(&ring).unwrap();
    let solid = triangulate_ring(&Ring::from_points(&outer, None)).unwrap();

    assert_eq!(mesh.vertex_count(), outer.len() + hole.len());
    assert!(mesh.triangle_count() > solid.triangle_count());
    assert_eq!(mesh.triangle_count(), 8);
    assert_counter_clockwise(&mesh);
    assert_relative_eq!(total_area(&mesh), 100.0 - 16.0);
}

#[test]
fn test_hole_orientation_does_not_matter() {
    let outer = square(10);
    let mut hole = vec![[3, 3], [3, 7], [7, 7], [7, 3]];
    hole.reverse();
    let mesh = triangulate_ring(&Ring::from_points(&outer, Some(&hole))).unwrap();

    assert_counter_clockwise(&mesh);
    assert_relative_eq!(total_area(&mesh), 84.0);
}

#[test]
fn test_hole_vertices_follow_outer_vertices() {
    let outer = square(10);
    let hole = [[3, 3], [3, 7], [7, 7], [7, 3]];
    let mesh = triangulate_ring(&Ring::from_points(&outer, Some(&hole))).unwrap();

    assert_eq!(mesh.vertices[4], DVec2::new(3.0, 3.0));
    assert_eq!(mesh.vertices[7], DVec2::new(7.0, 3.0));
    // Every hole vertex is used by at least one triangle
    for index in 4..8 {
        assert!(mesh.triangles.iter().any(|tri| tri.contains(index)));
    }
}

#[test]
fn test_empty_ring_has_no_geometry() {
    assert!(triangulate_ring(&Ring::default()).is_none());
}

#[test]
fn test_two_points_have_no_geometry() {
    let ring = Ring::from_points(&[[0, 0], [10, 0]], None);
    assert!(triangulate_ring(&ring).is_none());
}

#[test]
fn test_zero_area_ring_has_no_geometry() {
    let ring = Ring::from_points(&[[0, 0], [5, 5], [10, 10]], None);
    assert!(triangulate_ring(&ring).is_none());
}

#[test]
fn test_degenerate_hole_is_ignored() {
    let hole = [[3, 3], [4, 4]];
    let mesh = triangulate_ring(&Ring::from_points(&square(10), Some(&hole))).unwrap();

    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.triangle_count(), 2);
}

#[test]
fn test_collinear_points_on_edge() {
    // Midpoints on two edges: still covers the square exactly
    let points = [[0, 0], [5, 0], [10, 0], [10, 10], [0, 10], [0, 5]];
    let mesh = triangulate_ring(&Ring::from_points(&points, None)).unwrap();

    assert_counter_clockwise(&mesh);
    assert_relative_eq!(total_area(&mesh), 100.0);
}

#[test]
fn test_ring_helpers() {
    let ring = Ring::from_points(&square(4), Some(&[[1, 1], [2, 1], [1, 2]]));
    assert!(ring.has_hole());
    assert_eq!(ring.point_count(), 7);
    assert!(!Ring::new(Vec::new()).has_hole());
}

/// Star-shaped ring around `centre` with alternating radii.
fn star(centre: DVec2, points: usize, inner: f64, outer: f64) -> Vec<DVec2> {
    (0..points)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / points as f64;
            let radius = if i % 2 == 0 { outer } else { inner };
            centre + DVec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

fn ring_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    0.5 * (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f64>()
        .abs()
}

#[test]
fn test_star_rings_with_holes_cover_the_annulus() {
    for points in [10, 16, 24, 40] {
        for hole_centre in [DVec2::new(4096.0, 4096.0), DVec2::new(3500.0, 4300.0)] {
            for (flip_outer, flip_hole) in [(false, false), (true, false), (false, true), (true, true)] {
                let mut outer = star(DVec2::new(4096.0, 4096.0), points, 2500.0, 4000.0);
                let mut hole = star(hole_centre, 8, 300.0, 600.0);
                if flip_outer {
                    outer.reverse();
                }
                if flip_hole {
                    hole.reverse();
                }
                let expected = ring_area(&outer) - ring_area(&hole);
                let mesh = triangulate_ring(&Ring::with_hole(outer.clone(), hole)).unwrap();

                assert_counter_clockwise(&mesh);
                assert_relative_eq!(total_area(&mesh), expected, max_relative = 1e-9);
                assert!(mesh.validate().is_ok());
            }
        }
    }
}

#[test]
fn test_closed_outer_ring_keeps_hole_indices_in_place() {
    let mut outer = square(10);
    outer.push([0, 0]);
    let mut hole = vec![[3, 3], [3, 7], [7, 7], [7, 3]];
    hole.push([3, 3]);
    let mesh = triangulate_ring(&Ring::from_points(&outer, Some(&hole))).unwrap();

    assert_eq!(mesh.vertex_count(), 10);
    // The closing points (4 and 9) aren't referenced, the hole (5..9) is
    assert!(mesh.triangles.iter().all(|tri| !tri.contains(4) && !tri.contains(9)));
    for index in 5..9 {
        assert!(mesh.triangles.iter().any(|tri| tri.contains(index)));
    }
    assert_counter_clockwise(&mesh);
    assert_relative_eq!(total_area(&mesh), 84.0);
}
