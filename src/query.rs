//! Batch query interface for OverlapGrid.
//!
//! Extends the grid with multi-point queries and an optional parallel variant.

use alloc::vec::Vec;

use crate::grid::OverlapGrid;
use crate::types::Point3;

impl OverlapGrid {
    /// Query many points at once.
    ///
    /// Returns one flag per input point, in input order.
    ///
    /// # Example
    ///
    /// ```
    /// use overlap_grid::{OverlapGrid, Point3};
    ///
    /// let grid = OverlapGrid::new(&[Point3::splat(0.0), Point3::splat(1.0)])?;
    /// let hits = grid.overlaps_batch(&[Point3::splat(0.0), Point3::splat(5.0)]);
    /// assert_eq!(hits, vec![true, false]);
    /// # Ok::<(), overlap_grid::OverlapError>(())
    /// ```
    pub fn overlaps_batch(&self, points: &[Point3]) -> Vec<bool> {
        points.iter().map(|&p| self.overlaps(p)).collect()
    }

    /// Number of points in `points` that overlap the grid.
    pub fn count_overlaps(&self, points: &[Point3]) -> usize {
        points.iter().filter(|&&p| self.overlaps(p)).count()
    }

    /// True if any point in `points` overlaps. Stops at the first hit.
    pub fn any_overlaps(&self, points: &[Point3]) -> bool {
        points.iter().any(|&p| self.overlaps(p))
    }

    /// Parallel version of [`overlaps_batch`](Self::overlaps_batch) using rayon.
    #[cfg(feature = "rayon")]
    pub fn overlaps_batch_par(&self, points: &[Point3]) -> Vec<bool> {
        use rayon::prelude::*;

        points.par_iter().map(|&p| self.overlaps(p)).collect()
    }
}
