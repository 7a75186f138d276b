//! # Elevation Grid
//!
//! A square grid of heights in metres covering one tile, plus the lookup
//! from tile-local coordinates to grid cells.
//!
//! The grid is addressed row-major: row `r` runs along tile-local `y`,
//! column `c` along `x`. A tile-local coordinate maps to a cell by
//! scaling with `(size - 1) / TILE_EXTENT` and truncating, so both `0`
//! and `TILE_EXTENT` land on valid cells.
//!
//! Vector tiles carry a clip buffer, so rings may reach slightly past the
//! tile square. A grid built with [`ElevationGrid::with_clamped_edges`]
//! answers those points with the nearest edge cell instead of an error.

use config::constants::{TERRARIUM_OFFSET, TERRARIUM_PADDING, TILE_EXTENT};

use crate::error::{MeshError, MeshResult};

#[cfg(test)]
mod tests;

/// Bytes per pixel of an RGBA image.
const RGBA_CHANNELS: usize = 4;

/// Square height field for one tile.
///
/// # Example
///
/// ```rust
/// use terrain_mesh::ElevationGrid;
///
/// let grid = ElevationGrid::new(2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(grid.at_cell(1, 0), Some(2.0));
/// assert_eq!(grid.sample(8192.0, 0.0).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    size: usize,
    heights: Vec<f64>,
    clamp_edges: bool,
}

impl ElevationGrid {
    /// Creates a grid from row-major heights.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidElevationGrid`] if `size` is zero or
    /// `heights` doesn't hold exactly `size * size` values.
    pub fn new(size: usize, heights: Vec<f64>) -> MeshResult<Self> {
        if size == 0 {
            return Err(MeshError::invalid_grid("grid size must be at least 1"));
        }
        if heights.len() != size * size {
            return Err(MeshError::invalid_grid(format!(
                "expected {} heights for a {size}x{size} grid, got {}",
                size * size,
                heights.len()
            )));
        }
        Ok(Self {
            size,
            heights,
            clamp_edges: false,
        })
    }

    /// Creates a grid where every cell has the same height.
    pub fn flat(size: usize, height: f64) -> MeshResult<Self> {
        Self::new(size, vec![height; size * size])
    }

    /// Decodes a Terrarium-encoded RGBA image.
    ///
    /// Each pixel encodes `R * 256 + G + B / 256 - 32768` metres. The image
    /// carries a border of [`TERRARIUM_PADDING`] pixels on every side that
    /// is dropped, so a 516×516 image yields a 512×512 grid.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidElevationGrid`] for non-square images,
    /// buffers whose length isn't `width * height * 4`, or images too
    /// small to hold anything inside the border.
    pub fn from_terrarium_rgba(width: usize, height: usize, rgba: &[u8]) -> MeshResult<Self> {
        if width != height {
            return Err(MeshError::invalid_grid(format!(
                "elevation image must be square, got {width}x{height}"
            )));
        }
        if rgba.len() != width * height * RGBA_CHANNELS {
            return Err(MeshError::invalid_grid(format!(
                "expected {} RGBA bytes for a {width}x{height} image, got {}",
                width * height * RGBA_CHANNELS,
                rgba.len()
            )));
        }
        if width <= 2 * TERRARIUM_PADDING {
            return Err(MeshError::invalid_grid(format!(
                "elevation image of width {width} has no pixels inside the border"
            )));
        }

        let size = width - 2 * TERRARIUM_PADDING;
        let mut heights = Vec::with_capacity(size * size);
        for row in 0..size {
            let start = ((row + TERRARIUM_PADDING) * width + TERRARIUM_PADDING) * RGBA_CHANNELS;
            let line = &rgba[start..start + size * RGBA_CHANNELS];
            heights.extend(line.chunks_exact(RGBA_CHANNELS).map(decode_terrarium));
        }

        Self::new(size, heights)
    }

    /// Makes [`sample`](Self::sample) clamp finite coordinates outside the
    /// tile to the nearest edge cell.
    pub fn with_clamped_edges(mut self) -> Self {
        self.clamp_edges = true;
        self
    }

    /// Returns true if out-of-tile coordinates are clamped.
    #[inline]
    pub fn clamps_edges(&self) -> bool {
        self.clamp_edges
    }

    /// Returns the side length in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the row-major heights.
    #[inline]
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Returns the height of a cell, or `None` outside the grid.
    #[inline]
    pub fn at_cell(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.heights.get(row * self.size + col).copied()
    }

    /// Looks up the height under a tile-local coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::ElevationOutOfRange`] for coordinates that are
    /// not finite, or outside `[0, TILE_EXTENT]` unless edges are clamped.
    pub fn sample(&self, x: f64, y: f64) -> MeshResult<f64> {
        let out_of_range = || MeshError::ElevationOutOfRange { x, y };
        let col = self.cell_index(x).ok_or_else(out_of_range)?;
        let row = self.cell_index(y).ok_or_else(out_of_range)?;
        self.at_cell(row, col).ok_or_else(out_of_range)
    }

    /// Maps one tile-local axis value to a cell index.
    fn cell_index(&self, value: f64) -> Option<usize> {
        let value = if self.clamp_edges && value.is_finite() {
            value.clamp(0.0, TILE_EXTENT)
        } else {
            value
        };
        if !(0.0..=TILE_EXTENT).contains(&value) {
            return None;
        }
        let scale = (self.size - 1) as f64 / TILE_EXTENT;
        let index = (value * scale).trunc() as usize;
        (index < self.size).then_some(index)
    }
}

/// Decodes one Terrarium pixel to metres.
#[inline]
fn decode_terrarium(pixel: &[u8]) -> f64 {
    let (r, g, b) = (f64::from(pixel[0]), f64::from(pixel[1]), f64::from(pixel[2]));
    r * 256.0 + g + b / 256.0 - TERRARIUM_OFFSET
}
