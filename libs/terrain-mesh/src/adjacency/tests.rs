//! # Adjacency Tests

use super::*;
use crate::mesh::Triangle;
use crate::triangulate::{triangulate_ring, Ring};
use glam::DVec2;

/// Two triangles forming a unit square, sharing the diagonal 0–2.
fn quad() -> PlanarMesh {
    PlanarMesh::new(
        vec![DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y],
        vec![Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)],
    )
}

fn assert_symmetric(table: &AdjacencyTable) {
    for (from, to) in table.iter() {
        assert_eq!(
            table.neighbour(to.triangle, to.edge),
            Some(from),
            "adjacency {:?} -> {:?} is not mirrored",
            from,
            to
        );
    }
}

#[test]
fn test_quad_shares_diagonal() {
    let table = AdjacencyTable::build(&quad());

    assert_eq!(table.triangle_count(), 2);
    assert_eq!(table.shared_edge_count(), 1);
    assert_eq!(
        table.neighbour(TriangleId(0), LocalEdge::Ca),
        Some(EdgeRef::new(TriangleId(1), LocalEdge::Ab))
    );
    assert_eq!(
        table.neighbour(TriangleId(1), LocalEdge::Ab),
        Some(EdgeRef::new(TriangleId(0), LocalEdge::Ca))
    );
}

#[test]
fn test_boundary_edges_are_absent() {
    let table = AdjacencyTable::build(&quad());

    assert_eq!(table.neighbour(TriangleId(0), LocalEdge::Ab), None);
    assert_eq!(table.neighbour(TriangleId(0), LocalEdge::Bc), None);
    assert_eq!(table.neighbour(TriangleId(1), LocalEdge::Bc), None);
    assert_eq!(table.neighbour(TriangleId(1), LocalEdge::Ca), None);
}

#[test]
fn test_unknown_triangle_has_no_neighbour() {
    let table = AdjacencyTable::build(&quad());
    assert_eq!(table.neighbour(TriangleId(5), LocalEdge::Ab), None);
}

#[test]
fn test_fan_adjacency() {
    // Four triangles around a centre vertex 4
    let mesh = PlanarMesh::new(
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(0.0, 2.0),
            DVec2::new(1.0, 1.0),
        ],
        vec![
            Triangle::new(0, 1, 4),
            Triangle::new(1, 2, 4),
            Triangle::new(2, 3, 4),
            Triangle::new(3, 0, 4),
        ],
    );
    let table = AdjacencyTable::build(&mesh);

    assert_eq!(table.shared_edge_count(), 4);
    assert_symmetric(&table);
    assert_eq!(
        table.neighbour(TriangleId(0), LocalEdge::Ca),
        Some(EdgeRef::new(TriangleId(3), LocalEdge::Bc))
    );
}

#[test]
fn test_triangulated_hole_is_symmetric() {
    let ring = Ring::from_points(
        &[[0, 0], [10, 0], [10, 10], [0, 10]],
        Some(&[[3, 3], [3, 7], [7, 7], [7, 3]]),
    );
    let mesh = triangulate_ring(&ring).unwrap();
    let table = AdjacencyTable::build(&mesh);

    assert_symmetric(&table);
    // A triangulated annulus has no boundary other than the two rings
    // (8 boundary edges) so 8 triangles share (8 * 3 - 8) / 2 edges.
    assert_eq!(table.shared_edge_count(), 8);
}

#[test]
fn test_empty_mesh() {
    let table = AdjacencyTable::build(&PlanarMesh::default());
    assert_eq!(table.triangle_count(), 0);
    assert_eq!(table.iter().count(), 0);
}
