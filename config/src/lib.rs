//! # Config Crate
//!
//! Centralized configuration constants for the terrain tile pipeline.
//! Tile geometry, elevation grid layout, subdivision and seam tolerances
//! are defined here so the mesh and scene crates agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{TILE_EXTENT, ELEVATION_GRID_SIZE, elevation_scale};
//!
//! // Tile-local units covered by one elevation cell
//! let cell = TILE_EXTENT / (ELEVATION_GRID_SIZE - 1) as f64;
//! assert!(cell > 16.0);
//!
//! // Elevation multiplier doubles with every zoom level
//! assert!((elevation_scale(13) / elevation_scale(12) - 2.0).abs() < 1e-12);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No I/O**: Pure values and validation helpers

pub mod constants;
