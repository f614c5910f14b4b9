//! C ABI for the overlap grid.
//!
//! Exposes `fpot_create`, `fpot_overlaps` and `fpot_destroy` operating on an
//! opaque, heap-allocated [`OverlapGrid`] handle. Points are passed as packed
//! `[x, y, z]` float triples.

use std::slice;

use crate::error::{OverlapError, Result};
use crate::grid::OverlapGrid;
use crate::types::Point3;

/// Build a grid from `n_points` packed triples at `points` and store it in `*out`.
///
/// Returns `false` and leaves `*out` untouched on failure. The caller keeps
/// ownership of `points` and may free it as soon as this returns.
///
/// # Safety
/// - `out` must be null or valid for a pointer write.
/// - `points` must be null (only when `n_points == 0`) or point to
///   `3 * n_points` readable `f32` values.
#[no_mangle]
pub unsafe extern "C" fn fpot_create(
    out: *mut *mut OverlapGrid,
    points: *const f32,
    n_points: usize,
) -> bool {
    // SAFETY: forwarded from the caller contract above.
    match unsafe { create_handle(out, points, n_points) } {
        Ok(handle) => {
            // SAFETY: `create_handle` only succeeds when `out` is non-null.
            unsafe { *out = handle };
            true
        }
        Err(err) => {
            log::warn!("fpot_create failed: {}", err);
            false
        }
    }
}

unsafe fn create_handle(
    out: *mut *mut OverlapGrid,
    points: *const f32,
    n_points: usize,
) -> Result<*mut OverlapGrid> {
    if out.is_null() {
        return Err(OverlapError::NullOutput);
    }
    let coords: &[f32] = if n_points == 0 {
        &[]
    } else if points.is_null() {
        return Err(OverlapError::NullPoints { count: n_points });
    } else {
        let len = n_points
            .checked_mul(3)
            .ok_or(OverlapError::InvalidPointBuffer { len: usize::MAX })?;
        // SAFETY: caller guarantees `3 * n_points` readable floats.
        unsafe { slice::from_raw_parts(points, len) }
    };
    let grid = OverlapGrid::from_flat(coords)?;
    Ok(Box::into_raw(Box::new(grid)))
}

/// Release a grid created by [`fpot_create`]. Null is a no-op.
///
/// # Safety
/// `grid` must be null or a handle returned by `fpot_create` that has not
/// already been destroyed.
#[no_mangle]
pub unsafe extern "C" fn fpot_destroy(grid: *mut OverlapGrid) {
    if grid.is_null() {
        return;
    }
    // SAFETY: non-null handles come from `Box::into_raw` in `create_handle`.
    drop(unsafe { Box::from_raw(grid) });
}

/// Test whether the point `{x, y, z}` at `point` overlaps `grid`.
///
/// A null grid or a null point never overlaps.
///
/// # Safety
/// `grid` must be null or a live handle from [`fpot_create`]; `point` must be
/// null or point to 3 readable `f32` values.
#[no_mangle]
pub unsafe extern "C" fn fpot_overlaps(grid: *const OverlapGrid, point: *const f32) -> bool {
    if point.is_null() {
        return false;
    }
    // SAFETY: caller guarantees both pointers are valid when non-null.
    let (grid, p) = unsafe { (grid.as_ref(), *point.cast::<[f32; 3]>()) };
    crate::grid::overlaps(grid, Point3::from(p))
}
