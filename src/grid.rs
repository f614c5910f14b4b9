//! OverlapGrid construction and point queries.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::config::BuildConfig;
use crate::coords::{
    cell_index, compute_scale, point_to_cell, point_to_index, GRID_CELLS, NEIGHBOR_OFFSETS,
};
use crate::error::{OverlapError, Result};
use crate::types::{Aabb, CellCoord, Point3};

/// Occupancy flags for every cell, indexed by [`cell_index`].
pub type Cells = [u8; GRID_CELLS];

/// Fixed-resolution dilated occupancy grid over the bounding box of a point cloud.
///
/// This structure provides:
/// - O(n) construction from a complete point set
/// - O(1) queries that read a single byte
/// - Lock-free concurrent reads (the grid is immutable once built)
///
/// # Architecture
///
/// The bounding box is divided into 16 cells along its longest side; shorter
/// axes reuse the same scale. Every cell holding an input point, and every cell
/// directly adjacent to one (26-neighbourhood), is marked occupied.
///
/// # Example
///
/// ```
/// use overlap_grid::{OverlapGrid, Point3};
///
/// let grid = OverlapGrid::new(&[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)])?;
///
/// assert!(grid.overlaps(Point3::new(0.0, 0.0, 0.0)));
/// assert!(!grid.overlaps(Point3::new(2.0, 0.0, 0.0)));
/// # Ok::<(), overlap_grid::OverlapError>(())
/// ```
#[derive(Clone, PartialEq)]
pub struct OverlapGrid {
    bounds: Aabb,
    scale: f32,
    cells: Box<Cells>,
}

impl OverlapGrid {
    /// Build a grid from `points` with the default configuration.
    ///
    /// An empty slice is valid and yields a grid on which every query returns `false`.
    ///
    /// # Errors
    /// `AllocationFailed` if the occupancy buffer cannot be reserved.
    pub fn new(points: &[Point3]) -> Result<Self> {
        Self::with_config(points, BuildConfig::default())
    }

    /// Build a grid from `points` using `config`.
    pub fn with_config(points: &[Point3], config: BuildConfig) -> Result<Self> {
        Self::build(points.iter().copied(), config)
    }

    /// Build a grid from a flattened `[x0, y0, z0, x1, y1, z1, ...]` buffer.
    ///
    /// # Errors
    /// - `InvalidPointBuffer` if the length is not a multiple of 3
    /// - `AllocationFailed` if the occupancy buffer cannot be reserved
    pub fn from_flat(coords: &[f32]) -> Result<Self> {
        Self::from_flat_with_config(coords, BuildConfig::default())
    }

    /// Build a grid from a flattened buffer using `config`.
    pub fn from_flat_with_config(coords: &[f32], config: BuildConfig) -> Result<Self> {
        if coords.len() % 3 != 0 {
            return Err(OverlapError::InvalidPointBuffer { len: coords.len() });
        }
        Self::build(
            coords.chunks_exact(3).map(|c| Point3::new(c[0], c[1], c[2])),
            config,
        )
    }

    fn build<I>(points: I, config: BuildConfig) -> Result<Self>
    where
        I: Iterator<Item = Point3> + Clone,
    {
        let mut cells = alloc_cells()?;

        let Some(bounds) = Aabb::from_points(points.clone()) else {
            log::debug!("built empty overlap grid");
            return Ok(Self {
                bounds: Aabb::EMPTY,
                scale: 0.0,
                cells,
            });
        };

        let scale = compute_scale(bounds.max_extent());
        if scale == 0.0 {
            log::trace!("degenerate or unbounded bounds {:?}, all points map to cell 0", bounds);
        }

        let mut raw: Cells = [0; GRID_CELLS];
        let mut count = 0usize;
        for p in points.filter(|p| !p.has_nan()) {
            raw[point_to_index(p, bounds.min, scale)] = 1;
            count += 1;
        }

        dilate(&raw, &mut cells, config);

        let grid = Self {
            bounds,
            scale,
            cells,
        };
        log::debug!(
            "built overlap grid: {} points, bounds {:?}..{:?}, scale {}, {} occupied cells",
            count,
            grid.bounds.min.as_array(),
            grid.bounds.max.as_array(),
            grid.scale,
            grid.occupied_cells()
        );
        Ok(grid)
    }

    /// Bounding box of the input points (zero box for an empty input).
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Factor mapping an offset from `bounds().min` to a cell coordinate.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Raw occupancy flags (0 or 1) in `(x << 8) + (y << 4) + z` order.
    #[inline]
    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Number of occupied cells after dilation.
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// True when no cell is occupied, i.e. every query returns `false`.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Clamped cell that `point` maps to. Does not check the bounding box.
    #[inline]
    pub fn cell_of(&self, point: Point3) -> CellCoord {
        point_to_cell(point, self.bounds.min, self.scale)
    }

    /// Occupancy of `cell`; out-of-range components are clamped.
    #[inline]
    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        self.cells[cell_index(clamp(cell.x), clamp(cell.y), clamp(cell.z))] != 0
    }

    /// Test whether `point` lies near any input point.
    ///
    /// Points outside the bounding box (including any NaN coordinate) never overlap.
    ///
    /// # Performance
    /// Six comparisons, one multiply-add per axis and a single byte load.
    #[inline]
    pub fn overlaps(&self, point: Point3) -> bool {
        self.bounds.contains(point)
            && self.cells[point_to_index(point, self.bounds.min, self.scale)] != 0
    }
}

impl fmt::Debug for OverlapGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlapGrid")
            .field("bounds", &self.bounds)
            .field("scale", &self.scale)
            .field("occupied_cells", &self.occupied_cells())
            .finish()
    }
}

/// Build a grid from `points`.
///
/// Free-function form of [`OverlapGrid::new`].
pub fn create(points: &[Point3]) -> Result<OverlapGrid> {
    OverlapGrid::new(points)
}

/// Query an optional grid; an absent grid never overlaps.
#[inline]
pub fn overlaps(grid: Option<&OverlapGrid>, point: Point3) -> bool {
    grid.is_some_and(|g| g.overlaps(point))
}

/// Release a grid. Passing `None` is a no-op.
pub fn destroy(grid: Option<OverlapGrid>) {
    drop(grid);
}

fn alloc_cells() -> Result<Box<Cells>> {
    let failed = || {
        log::warn!("failed to allocate {} byte occupancy grid", GRID_CELLS);
        OverlapError::AllocationFailed { bytes: GRID_CELLS }
    };

    let mut buf = Vec::new();
    buf.try_reserve_exact(GRID_CELLS).map_err(|_| failed())?;
    buf.resize(GRID_CELLS, 0u8);
    buf.into_boxed_slice().try_into().map_err(|_| failed())
}

/// Dilated occupancy of cell `index`: set if it or any neighbour is set in `raw`.
#[inline]
fn dilate_cell(raw: &Cells, index: usize) -> u8 {
    if raw[index] != 0 {
        return 1;
    }
    let c = CellCoord::from_index(index);
    let (x, y, z) = (c.x as i32, c.y as i32, c.z as i32);
    NEIGHBOR_OFFSETS
        .iter()
        .any(|[dx, dy, dz]| raw[cell_index(x + dx, y + dy, z + dz)] != 0) as u8
}

fn dilate(raw: &Cells, out: &mut Cells, config: BuildConfig) {
    if config.uses_parallel_dilation() {
        dilate_parallel(raw, out, config.num_threads);
    } else {
        dilate_sequential(raw, out);
    }
}

fn dilate_sequential(raw: &Cells, out: &mut Cells) {
    for (i, cell) in out.iter_mut().enumerate() {
        *cell = dilate_cell(raw, i);
    }
}

#[cfg(not(feature = "rayon"))]
fn dilate_parallel(raw: &Cells, out: &mut Cells, _num_threads: usize) {
    dilate_sequential(raw, out);
}

#[cfg(feature = "rayon")]
fn dilate_parallel(raw: &Cells, out: &mut Cells, num_threads: usize) {
    use rayon::prelude::*;

    let run = |out: &mut Cells| {
        out.par_iter_mut()
            .enumerate()
            .for_each(|(i, cell)| *cell = dilate_cell(raw, i));
    };

    if num_threads == 0 {
        run(out);
        return;
    }

    match rayon::ThreadPoolBuilder::new().num_threads(num_threads).build() {
        Ok(pool) => pool.install(|| run(out)),
        Err(err) => {
            log::warn!("falling back to global rayon pool: {}", err);
            run(out);
        }
    }
}
