//! # overlap_grid
//!
//! Constant-time approximate overlap test against a fixed 3D point cloud.
//!
//! Answers one question fast and repeatedly: "does this point lie near any point
//! of the input cloud?" The answer is spatially quantized, not an exact distance.
//!
//! - **Construction**: O(n) in the number of input points, one pass
//! - **Queries**: O(1), a bounding box test and a single byte load
//! - **Memory**: 4096 bytes of occupancy per grid, independent of point count
//! - **Concurrent access**: the grid is immutable once built; `&OverlapGrid` is
//!   freely shareable across threads
//!
//! ## Quick Start
//!
//! ```
//! use overlap_grid::{OverlapGrid, Point3};
//!
//! let cloud = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(4.0, 1.0, 2.0),
//!     Point3::new(2.0, 0.5, 1.0),
//! ];
//! let grid = OverlapGrid::new(&cloud)?;
//!
//! assert!(grid.overlaps(Point3::new(2.0, 0.5, 1.0)));
//! assert!(!grid.overlaps(Point3::new(10.0, 0.0, 0.0)));
//! # Ok::<(), overlap_grid::OverlapError>(())
//! ```
//!
//! ## Architecture
//!
//! The bounding box of the cloud is covered by a 16×16×16 cell grid scaled so
//! the longest side spans all 16 cells. Each input point marks its cell, then a
//! single dilation pass marks every cell adjacent to a marked cell (26
//! neighbours, Chebyshev radius 1). Only the dilated grid is kept.
//!
//! Queries reject points outside the bounding box, map the point to its clamped
//! cell and return that cell's flag.
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `rayon`: Parallel dilation pass and parallel batch queries
//! - `ffi`: C ABI (`fpot_create`, `fpot_overlaps`, `fpot_destroy`)

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

mod config;
pub mod coords;
mod error;
mod grid;
mod query;
mod types;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use config::BuildConfig;
pub use coords::{cell_index, GRID_CELLS, GRID_DIM, GRID_MAX, GRID_SHIFT, NEIGHBOR_OFFSETS};
pub use error::{OverlapError, Result};
pub use grid::{create, destroy, overlaps, Cells, OverlapGrid};
pub use types::{Aabb, CellCoord, Point3};

/// Prelude module for convenient imports.
///
/// ```
/// use overlap_grid::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::BuildConfig;
    pub use crate::error::{OverlapError, Result};
    pub use crate::grid::OverlapGrid;
    pub use crate::types::{Aabb, CellCoord, Point3};
}
