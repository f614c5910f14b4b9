//! Core value types for the overlap grid.
//!
//! Provides the point, cell coordinate and bounding box types used throughout the crate.

use core::ops::Sub;

use crate::coords::{GRID_MAX, GRID_SHIFT};

/// A 3D point with named fields for clarity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Point3 {
    /// The origin.
    pub const ZERO: Self = Self::splat(0.0);

    /// Create a new Point3.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a Point3 with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Component-wise minimum.
    ///
    /// A NaN component in `other` never replaces the component of `self`.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: if other.x < self.x { other.x } else { self.x },
            y: if other.y < self.y { other.y } else { self.y },
            z: if other.z < self.z { other.z } else { self.z },
        }
    }

    /// Component-wise maximum.
    ///
    /// A NaN component in `other` never replaces the component of `self`.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: if other.x > self.x { other.x } else { self.x },
            y: if other.y > self.y { other.y } else { self.y },
            z: if other.z > self.z { other.z } else { self.z },
        }
    }

    /// True when any component is NaN.
    #[inline]
    pub fn has_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

impl From<[f32; 3]> for Point3 {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl From<Point3> for [f32; 3] {
    #[inline]
    fn from(p: Point3) -> Self {
        p.as_array()
    }
}

impl From<(f32, f32, f32)> for Point3 {
    #[inline]
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// Cell coordinates inside the occupancy grid, each axis in `0..=GRID_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellCoord {
    /// X cell coordinate.
    pub x: u32,
    /// Y cell coordinate.
    pub y: u32,
    /// Z cell coordinate.
    pub z: u32,
}

impl CellCoord {
    /// Create a new CellCoord.
    ///
    /// Components are not clamped; use [`crate::coords::cell_index`] when indexing
    /// with values that may be out of range.
    #[inline]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [u32; 3] {
        [self.x, self.y, self.z]
    }

    /// Unpack a flat grid index into its (x, y, z) cell.
    ///
    /// Inverse of the `(x << 8) + (y << 4) + z` layout.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        let index = index as u32;
        Self {
            x: (index >> (2 * GRID_SHIFT)) & GRID_MAX,
            y: (index >> GRID_SHIFT) & GRID_MAX,
            z: index & GRID_MAX,
        }
    }
}

impl From<[u32; 3]> for CellCoord {
    #[inline]
    fn from(arr: [u32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl From<CellCoord> for [u32; 3] {
    #[inline]
    fn from(c: CellCoord) -> Self {
        c.as_array()
    }
}

/// Axis-aligned bounding box.
///
/// The box is closed: points lying exactly on `min` or `max` are inside.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    /// Per-axis minimum.
    pub min: Point3,
    /// Per-axis maximum.
    pub max: Point3,
}

impl Aabb {
    /// Zero-volume box at the origin, used for empty point sets.
    pub const EMPTY: Self = Self::new(Point3::ZERO, Point3::ZERO);

    /// Create a box from its corners.
    #[inline]
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Tight box around `points` computed in a single pass.
    ///
    /// Points with a NaN coordinate are skipped; infinite coordinates are kept.
    /// Returns `None` when no point remains.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut valid = points.into_iter().filter(|p| !p.has_nan());
        let first = valid.next()?;
        Some(valid.fold(Self::new(first, first), |acc, p| {
            Self::new(acc.min.min(p), acc.max.max(p))
        }))
    }

    /// Closed containment test. Any NaN coordinate yields `false`.
    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        p.x >= self.min.x
            && p.y >= self.min.y
            && p.z >= self.min.z
            && p.x <= self.max.x
            && p.y <= self.max.y
            && p.z <= self.max.z
    }

    /// Size of the box along each axis.
    #[inline]
    pub fn extent(&self) -> Point3 {
        self.max - self.min
    }

    /// Length of the longest side, computed in f64.
    ///
    /// The difference of two finite `f32` corners always fits in an `f64`, so
    /// this is finite for any finite box. An axis whose corners are the same
    /// infinity has no defined length and is ignored.
    #[inline]
    pub fn max_extent(&self) -> f64 {
        let side = |lo: f32, hi: f32| f64::from(hi) - f64::from(lo);
        libm::fmax(
            libm::fmax(side(self.min.x, self.max.x), side(self.min.y, self.max.y)),
            side(self.min.z, self.max.z),
        )
    }

    /// True when the box has zero size on every axis.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.max_extent() == 0.0
    }
}
