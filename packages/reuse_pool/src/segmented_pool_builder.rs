use std::fmt;
use std::marker::PhantomData;
use std::num::NonZero;

use crate::{DEFAULT_INITIAL_CAPACITY, Error, Factory, SegmentedPool, Sizing};

/// Builder for creating an instance of [`SegmentedPool`].
///
/// The segmented pool has no growth factor: it always grows by exactly one segment.
///
/// # Examples
///
/// ```
/// use reuse_pool::SegmentedPool;
///
/// let pool = SegmentedPool::builder(String::new)
///     .segment_length(128)
///     .preload_count(16)
///     .build()
///     .unwrap();
///
/// assert_eq!(pool.segment_length(), 128);
/// ```
#[must_use]
pub struct SegmentedPoolBuilder<T, F> {
    factory: F,
    segment_length: usize,
    preload_count: Option<usize>,

    _item: PhantomData<fn() -> T>,
}

impl<T, F> SegmentedPoolBuilder<T, F>
where
    F: Factory<T>,
{
    pub(crate) fn new(factory: F) -> Self {
        Self {
            factory,
            segment_length: DEFAULT_INITIAL_CAPACITY,
            preload_count: None,
            _item: PhantomData,
        }
    }

    /// Sets the number of slots in every segment. Must not be zero.
    pub fn segment_length(mut self, segment_length: usize) -> Self {
        self.segment_length = segment_length;
        self
    }

    /// Sets how many instances to create whenever a segment is linked on the right, including the
    /// first segment. Defaults to the segment length. Must not exceed the segment length.
    pub fn preload_count(mut self, preload_count: usize) -> Self {
        self.preload_count = Some(preload_count);
        self
    }

    /// Validates the configuration, preloads the first segment and returns the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment length is zero or the preload count exceeds it.
    pub fn build(self) -> crate::Result<SegmentedPool<T, F>> {
        let segment_length = NonZero::new(self.segment_length).ok_or(Error::ZeroSegmentLength)?;
        let sizing = Sizing::new(segment_length.get(), self.preload_count)?;

        Ok(SegmentedPool::new_inner(
            segment_length,
            sizing.preload_count,
            self.factory,
        ))
    }
}

impl<T, F> fmt::Debug for SegmentedPoolBuilder<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentedPoolBuilder")
            .field(
                "item_type",
                &std::format_args!("{}", std::any::type_name::<T>()),
            )
            .field("segment_length", &self.segment_length)
            .field("preload_count", &self.preload_count)
            .finish_non_exhaustive()
    }
}
