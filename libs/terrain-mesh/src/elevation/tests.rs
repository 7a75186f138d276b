//! # Elevation Grid Tests

use super::*;
use approx::assert_relative_eq;
use config::constants::ELEVATION_GRID_SIZE;

/// Encodes metres as a Terrarium RGBA pixel.
fn terrarium_pixel(metres: f64) -> [u8; 4] {
    let value = metres + TERRARIUM_OFFSET;
    let r = (value / 256.0).floor();
    let g = (value - r * 256.0).floor();
    let b = ((value - r * 256.0 - g) * 256.0).round();
    [r as u8, g as u8, b as u8, 255]
}

/// Builds a padded image whose inner pixel `(row, col)` encodes
/// `row * 10 + col` metres and whose border encodes -1000.
fn padded_image(inner: usize) -> (usize, Vec<u8>) {
    let width = inner + 2 * TERRARIUM_PADDING;
    let mut rgba = Vec::with_capacity(width * width * 4);
    for y in 0..width {
        for x in 0..width {
            let inside = (TERRARIUM_PADDING..TERRARIUM_PADDING + inner).contains(&y)
                && (TERRARIUM_PADDING..TERRARIUM_PADDING + inner).contains(&x);
            let metres = if inside {
                ((y - TERRARIUM_PADDING) * 10 + (x - TERRARIUM_PADDING)) as f64
            } else {
                -1000.0
            };
            rgba.extend_from_slice(&terrarium_pixel(metres));
        }
    }
    (width, rgba)
}

#[test]
fn test_new_validates_length() {
    assert!(ElevationGrid::new(2, vec![0.0; 4]).is_ok());
    assert!(matches!(
        ElevationGrid::new(2, vec![0.0; 3]),
        Err(MeshError::InvalidElevationGrid { .. })
    ));
    assert!(ElevationGrid::new(0, Vec::new()).is_err());
}

#[test]
fn test_flat_grid() {
    let grid = ElevationGrid::flat(ELEVATION_GRID_SIZE, 12.5).unwrap();
    assert_eq!(grid.size(), ELEVATION_GRID_SIZE);
    assert!(grid.heights().iter().all(|&h| h == 12.5));
}

#[test]
fn test_terrarium_decoding() {
    let mut rgba = Vec::new();
    // 1x1 inner pixel surrounded by the border
    let width = 1 + 2 * TERRARIUM_PADDING;
    for i in 0..width * width {
        let metres = if i == TERRARIUM_PADDING * width + TERRARIUM_PADDING {
            100.5
        } else {
            0.0
        };
        rgba.extend_from_slice(&terrarium_pixel(metres));
    }
    let grid = ElevationGrid::from_terrarium_rgba(width, width, &rgba).unwrap();

    assert_eq!(grid.size(), 1);
    assert_relative_eq!(grid.at_cell(0, 0).unwrap(), 100.5);
}

#[test]
fn test_terrarium_sea_level() {
    assert_eq!(decode_terrarium(&[128, 0, 0, 255]), 0.0);
    assert_eq!(decode_terrarium(&[127, 255, 0, 255]), -1.0);
}

#[test]
fn test_terrarium_padding_is_dropped() {
    let (width, rgba) = padded_image(4);
    let grid = ElevationGrid::from_terrarium_rgba(width, width, &rgba).unwrap();

    assert_eq!(grid.size(), 4);
    assert_eq!(grid.at_cell(0, 0), Some(0.0));
    assert_eq!(grid.at_cell(0, 3), Some(3.0));
    assert_eq!(grid.at_cell(2, 1), Some(21.0));
    assert!(grid.heights().iter().all(|&h| h >= 0.0));
}

#[test]
fn test_full_size_image_yields_standard_grid() {
    let width = ELEVATION_GRID_SIZE + 2 * TERRARIUM_PADDING;
    let rgba = terrarium_pixel(0.0).repeat(width * width);
    let grid = ElevationGrid::from_terrarium_rgba(width, width, &rgba).unwrap();
    assert_eq!(grid.size(), ELEVATION_GRID_SIZE);
}

#[test]
fn test_terrarium_rejects_bad_images() {
    let rgba = vec![0u8; 6 * 5 * 4];
    assert!(ElevationGrid::from_terrarium_rgba(6, 5, &rgba).is_err());

    let rgba = vec![0u8; 6 * 6 * 3];
    assert!(ElevationGrid::from_terrarium_rgba(6, 6, &rgba).is_err());

    let rgba = vec![0u8; 4 * 4 * 4];
    assert!(ElevationGrid::from_terrarium_rgba(4, 4, &rgba).is_err());
}

#[test]
fn test_sample_maps_tile_coordinates_to_cells() {
    let heights = (0..ELEVATION_GRID_SIZE * ELEVATION_GRID_SIZE)
        .map(|i| i as f64)
        .collect();
    let grid = ElevationGrid::new(ELEVATION_GRID_SIZE, heights).unwrap();

    assert_eq!(grid.sample(0.0, 0.0).unwrap(), 0.0);
    // Far corner lands on the last cell
    let last = (ELEVATION_GRID_SIZE * ELEVATION_GRID_SIZE - 1) as f64;
    assert_eq!(grid.sample(TILE_EXTENT, TILE_EXTENT).unwrap(), last);
    // x = 4096 → col trunc(4096 * 511 / 8192) = 255; y = 16.04 → row 1
    assert_eq!(grid.sample(4096.0, 16.04).unwrap(), (512 + 255) as f64);
}

#[test]
fn test_sample_out_of_range() {
    let grid = ElevationGrid::flat(4, 0.0).unwrap();
    for (x, y) in [(-1.0, 0.0), (0.0, -0.5), (TILE_EXTENT + 1.0, 0.0), (f64::NAN, 0.0)] {
        assert!(matches!(
            grid.sample(x, y),
            Err(MeshError::ElevationOutOfRange { .. })
        ));
    }
    assert_eq!(grid.at_cell(4, 0), None);
}

#[test]
fn test_clamped_edges_answer_buffered_points() {
    // Cell (row, col) holds row * 10 + col
    let heights = (0..4).flat_map(|row| (0..4).map(move |col| f64::from(row * 10 + col))).collect();
    let grid = ElevationGrid::new(4, heights).unwrap();
    assert!(!grid.clamps_edges());
    assert!(grid.sample(-64.0, 0.0).is_err());

    let grid = grid.with_clamped_edges();
    assert!(grid.clamps_edges());
    assert_eq!(grid.sample(-64.0, -64.0).unwrap(), 0.0);
    assert_eq!(grid.sample(TILE_EXTENT + 64.0, 0.0).unwrap(), 3.0);
    assert_eq!(grid.sample(0.0, TILE_EXTENT + 1.0).unwrap(), 30.0);
    // Inside the tile nothing changes
    assert_eq!(grid.sample(TILE_EXTENT / 2.0, 0.0).unwrap(), 1.0);
    assert!(matches!(
        grid.sample(f64::NAN, 0.0),
        Err(MeshError::ElevationOutOfRange { .. })
    ));
    assert!(grid.sample(f64::INFINITY, 0.0).is_err());
}
