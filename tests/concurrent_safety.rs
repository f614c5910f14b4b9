//! Concurrent safety tests for overlap_grid.
//!
//! The grid is immutable after construction; these tests verify that any
//! number of readers observe the same answers without synchronization.

use overlap_grid::{BuildConfig, OverlapGrid, Point3};
use std::sync::Arc;
use std::thread;

// =============================================================================
// Test Grid Factories
// =============================================================================

/// Point `(i, j)` of a sphere shell of radius 4 around (5, 5, 5).
fn shell_point(i: usize, j: usize) -> Point3 {
    let theta = i as f32 / 32.0 * std::f32::consts::TAU;
    let phi = j as f32 / 15.0 * std::f32::consts::PI;
    Point3::new(
        5.0 + 4.0 * phi.sin() * theta.cos(),
        5.0 + 4.0 * phi.sin() * theta.sin(),
        5.0 + 4.0 * phi.cos(),
    )
}

fn create_shell_grid() -> OverlapGrid {
    let mut points = Vec::new();
    for i in 0..32 {
        for j in 0..16 {
            points.push(shell_point(i, j));
        }
    }
    OverlapGrid::new(&points).unwrap()
}

fn query_points(n: usize) -> Vec<Point3> {
    (0..n)
        .map(|i| {
            let seed = i as f32;
            Point3::new(
                ((seed * 0.1) % 1.0) * 10.0,
                ((seed * 0.17) % 1.0) * 10.0,
                ((seed * 0.23) % 1.0) * 10.0,
            )
        })
        .collect()
}

// =============================================================================
// Concurrent Read Tests
// =============================================================================

#[test]
fn test_concurrent_reads_match_sequential() {
    let grid = Arc::new(create_shell_grid());
    let points = Arc::new(query_points(2000));
    let expected = grid.overlaps_batch(&points);

    let num_threads = 8;
    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let grid = Arc::clone(&grid);
            let points = Arc::clone(&points);
            thread::spawn(move || grid.overlaps_batch(&points))
        })
        .collect();

    for handle in handles {
        let results = handle.join().expect("Thread panicked");
        assert_eq!(results, expected);
    }
}

#[test]
fn test_concurrent_reads_same_point() {
    let grid = Arc::new(create_shell_grid());
    let point = shell_point(0, 7);
    let expected = grid.overlaps(point);
    assert!(expected);

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let grid = Arc::clone(&grid);
            thread::spawn(move || (0..1000).all(|_| grid.overlaps(point) == expected))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("Thread panicked"));
    }
}

#[test]
fn test_scoped_borrowed_readers() {
    let grid = create_shell_grid();
    let points = query_points(512);
    let expected = grid.count_overlaps(&points);
    let grid = &grid;

    thread::scope(|s| {
        let handles: Vec<_> = points
            .chunks(64)
            .map(|chunk| s.spawn(move || grid.count_overlaps(chunk)))
            .collect();
        let total: usize = handles
            .into_iter()
            .map(|h| h.join().expect("Thread panicked"))
            .sum();
        assert_eq!(total, expected);
    });
}

#[test]
fn test_grids_built_on_many_threads_agree() {
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(create_shell_grid))
        .collect();
    let grids: Vec<OverlapGrid> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked"))
        .collect();

    for grid in &grids[1..] {
        assert_eq!(grid, &grids[0]);
    }
}

#[test]
fn test_parallel_config_agrees_with_sequential() {
    let points = query_points(300);
    let sequential = OverlapGrid::new(&points).unwrap();
    let parallel = OverlapGrid::with_config(
        &points,
        BuildConfig::new().with_parallel_dilation(true).with_num_threads(4),
    )
    .unwrap();

    // Without the `rayon` feature the parallel flag falls back to sequential.
    assert_eq!(sequential, parallel);
}
