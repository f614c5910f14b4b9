//! Build configuration.

/// Options controlling how an [`OverlapGrid`](crate::OverlapGrid) is built
/// (immutable after construction).
///
/// Grid resolution is fixed at [`GRID_DIM`](crate::GRID_DIM) cells per axis and
/// is not part of the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildConfig {
    /// Run the dilation pass on the rayon thread pool.
    ///
    /// Only honoured when the `rayon` feature is enabled.
    pub parallel_dilation: bool,
    /// Worker count for parallel dilation; 0 uses rayon's global pool.
    pub num_threads: usize,
}

impl BuildConfig {
    /// Sequential build.
    #[inline]
    pub const fn new() -> Self {
        Self {
            parallel_dilation: false,
            num_threads: 0,
        }
    }

    /// Enable or disable the parallel dilation pass.
    #[inline]
    pub const fn with_parallel_dilation(mut self, parallel: bool) -> Self {
        self.parallel_dilation = parallel;
        self
    }

    /// Use a dedicated pool of `num_threads` workers for parallel dilation.
    #[inline]
    pub const fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Whether this build will actually dilate in parallel.
    #[inline]
    pub const fn uses_parallel_dilation(&self) -> bool {
        cfg!(feature = "rayon") && self.parallel_dilation
    }
}
