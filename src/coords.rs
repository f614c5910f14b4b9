//! Coordinate mathematics for the occupancy grid.
//!
//! Maps world-space points to clamped cell coordinates and cell coordinates to
//! flat indices in the `(x << 8) + (y << 4) + z` layout.

use crate::types::{CellCoord, Point3};

/// Bits per axis of the flat cell index.
pub const GRID_SHIFT: u32 = 4;

/// Cells per axis.
pub const GRID_DIM: u32 = 1 << GRID_SHIFT;

/// Largest valid cell coordinate on any axis.
pub const GRID_MAX: u32 = GRID_DIM - 1;

/// Total number of cells in the grid.
pub const GRID_CELLS: usize = 1 << (3 * GRID_SHIFT);

/// Offsets of the 26 cells surrounding a cell (the zero offset is excluded).
pub const NEIGHBOR_OFFSETS: [[i32; 3]; 26] = neighbor_offsets();

const fn neighbor_offsets() -> [[i32; 3]; 26] {
    let mut offsets = [[0; 3]; 26];
    let mut n = 0;
    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                if dx != 0 || dy != 0 || dz != 0 {
                    offsets[n] = [dx, dy, dz];
                    n += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    offsets
}

/// Clamp a signed axis coordinate into `0..=GRID_MAX`.
#[inline]
pub const fn clamp_axis(v: i32) -> u32 {
    if v < 0 {
        0
    } else if v > GRID_MAX as i32 {
        GRID_MAX
    } else {
        v as u32
    }
}

/// Flat index of the cell at `(x, y, z)`, each axis clamped into `0..=GRID_MAX` first.
///
/// Never returns an index `>= GRID_CELLS`.
#[inline]
pub const fn cell_index(x: i32, y: i32, z: i32) -> usize {
    let x = clamp_axis(x) as usize;
    let y = clamp_axis(y) as usize;
    let z = clamp_axis(z) as usize;
    (x << (2 * GRID_SHIFT)) + (y << GRID_SHIFT) + z
}

/// Scale factor that makes `GRID_DIM` cells span the longest side of the box.
///
/// Returns 0 for a zero-volume box and for an unbounded one (an infinite
/// input coordinate), so every point lands in cell (0, 0, 0). Any other extent
/// yields a scale in `(0, f32::MAX]`.
#[inline]
pub fn compute_scale(max_extent: f64) -> f32 {
    if max_extent > 0.0 && max_extent.is_finite() {
        // The extent is at most 2 * f32::MAX, so the quotient stays above
        // f32::MIN_POSITIVE; only subnormal extents need the upper clamp.
        (f64::from(GRID_DIM) / max_extent).min(f64::from(f32::MAX)) as f32
    } else {
        0.0
    }
}

/// Cell containing `point` for a grid anchored at `min` with the given `scale`.
///
/// Each axis is truncated toward zero and then clamped, so any input (including
/// points outside the box or NaN) maps to a valid cell. The offset is taken in
/// f64 so that boxes spanning most of the `f32` range do not overflow.
#[inline]
pub fn point_to_cell(point: Point3, min: Point3, scale: f32) -> CellCoord {
    let scale = f64::from(scale);
    // `as` saturates out-of-range values and maps NaN to 0.
    let axis = |p: f32, lo: f32| clamp_axis(((f64::from(p) - f64::from(lo)) * scale) as i32);
    CellCoord::new(
        axis(point.x, min.x),
        axis(point.y, min.y),
        axis(point.z, min.z),
    )
}

/// Flat index of the cell containing `point`.
#[inline]
pub fn point_to_index(point: Point3, min: Point3, scale: f32) -> usize {
    let cell = point_to_cell(point, min, scale);
    cell_index(cell.x as i32, cell.y as i32, cell.z as i32)
}
