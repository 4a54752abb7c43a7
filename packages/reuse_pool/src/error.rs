use thiserror::Error;

/// Errors that can occur when configuring an object pool.
///
/// All of these are detected when the pool is built, before any instance is manufactured.
/// Operating on a successfully built pool never fails.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The caller asked for more preloaded instances than the initial capacity can hold.
    #[error("preload count ({preload_count}) cannot be bigger than initial capacity ({initial_capacity})")]
    PreloadExceedsCapacity {
        /// The requested number of instances to create at construction time.
        preload_count: usize,

        /// The requested initial capacity of the pool.
        initial_capacity: usize,
    },

    /// The growth factor was not a finite number bigger than one.
    #[error("growth factor ({growth_factor}) must be a finite number bigger than one")]
    InvalidGrowthFactor {
        /// The rejected growth factor.
        growth_factor: f64,
    },

    /// A segmented pool was configured with zero-length segments.
    #[error("segment length must be at least one")]
    ZeroSegmentLength,
}

/// A specialized `Result` type for pool construction, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
