//! Tests for the C ABI surface.

use overlap_grid::ffi::{fpot_create, fpot_destroy, fpot_overlaps};
use overlap_grid::OverlapGrid;
use std::ptr;

#[test]
fn test_create_query_destroy() {
    let points: [f32; 6] = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
    let mut grid: *mut OverlapGrid = ptr::null_mut();

    unsafe {
        assert!(fpot_create(&mut grid, points.as_ptr(), 2));
        assert!(!grid.is_null());

        assert!(fpot_overlaps(grid, [0.0f32, 0.0, 0.0].as_ptr()));
        assert!(fpot_overlaps(grid, [1.0f32, 1.0, 1.0].as_ptr()));
        assert!(!fpot_overlaps(grid, [2.0f32, 0.0, 0.0].as_ptr()));

        fpot_destroy(grid);
    }
}

#[test]
fn test_input_may_be_freed_after_create() {
    let mut grid: *mut OverlapGrid = ptr::null_mut();
    {
        let points = vec![1.0f32, 2.0, 3.0];
        unsafe { assert!(fpot_create(&mut grid, points.as_ptr(), 1)) };
    }

    unsafe {
        assert!(fpot_overlaps(grid, [1.0f32, 2.0, 3.0].as_ptr()));
        assert!(!fpot_overlaps(grid, [1.0f32, 2.0, 4.0].as_ptr()));
        fpot_destroy(grid);
    }
}

#[test]
fn test_zero_points() {
    let mut grid: *mut OverlapGrid = ptr::null_mut();

    unsafe {
        assert!(fpot_create(&mut grid, ptr::null(), 0));
        assert!(!grid.is_null());
        assert!(!fpot_overlaps(grid, [0.0f32, 0.0, 0.0].as_ptr()));
        fpot_destroy(grid);
    }
}

#[test]
fn test_null_output_fails() {
    let points: [f32; 3] = [0.0, 0.0, 0.0];
    unsafe {
        assert!(!fpot_create(ptr::null_mut(), points.as_ptr(), 1));
    }
}

#[test]
fn test_null_points_with_count_fails() {
    let mut grid: *mut OverlapGrid = ptr::null_mut();
    unsafe {
        assert!(!fpot_create(&mut grid, ptr::null(), 4));
    }
    assert!(grid.is_null(), "output must be left unset on failure");
}

#[test]
fn test_null_handles_are_safe() {
    unsafe {
        assert!(!fpot_overlaps(ptr::null(), [0.0f32, 0.0, 0.0].as_ptr()));
        fpot_destroy(ptr::null_mut());
    }

    let mut grid: *mut OverlapGrid = ptr::null_mut();
    unsafe {
        assert!(fpot_create(&mut grid, [5.0f32, 5.0, 5.0].as_ptr(), 1));
        assert!(!fpot_overlaps(grid, ptr::null()));
        fpot_destroy(grid);
    }
}
