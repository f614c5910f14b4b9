//! Error types for overlap grid operations.

use thiserror::Error;

/// Errors that can occur while constructing an overlap grid.
///
/// Queries never fail; out-of-range or degenerate query points resolve to "no overlap".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapError {
    /// The occupancy buffer could not be allocated.
    #[error("failed to allocate {bytes} byte occupancy grid")]
    AllocationFailed {
        /// Size of the requested buffer.
        bytes: usize,
    },

    /// A flattened point buffer did not hold a whole number of `[x, y, z]` triples.
    #[error("point buffer length {len} is not a multiple of 3")]
    InvalidPointBuffer {
        /// Length of the rejected buffer.
        len: usize,
    },

    /// The C entry point was given no location to store the created grid.
    #[cfg(feature = "ffi")]
    #[error("output handle pointer is null")]
    NullOutput,

    /// The C entry point was given a null point array with a non-zero count.
    #[cfg(feature = "ffi")]
    #[error("point array is null but {count} points were requested")]
    NullPoints {
        /// Number of points the caller claimed to pass.
        count: usize,
    },
}

/// Result type for overlap grid operations.
pub type Result<T> = core::result::Result<T, OverlapError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_error_display() {
        let err = OverlapError::AllocationFailed { bytes: 4096 };
        assert_eq!(format!("{}", err), "failed to allocate 4096 byte occupancy grid");

        let err = OverlapError::InvalidPointBuffer { len: 7 };
        assert_eq!(format!("{}", err), "point buffer length 7 is not a multiple of 3");
    }

    #[cfg(feature = "ffi")]
    #[test]
    fn test_ffi_error_display() {
        let err = OverlapError::NullOutput;
        assert_eq!(format!("{}", err), "output handle pointer is null");

        let err = OverlapError::NullPoints { count: 3 };
        assert_eq!(
            format!("{}", err),
            "point array is null but 3 points were requested"
        );
    }

    #[test]
    fn test_error_equality() {
        let a = OverlapError::InvalidPointBuffer { len: 4 };
        let b = OverlapError::InvalidPointBuffer { len: 4 };
        let c = OverlapError::InvalidPointBuffer { len: 5 };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
