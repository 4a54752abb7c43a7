use std::fmt;
use std::marker::PhantomData;

use crate::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_OVERFLOW_CAPACITY_FACTOR, Factory, Sizing, TieredPool,
};

/// Builder for creating an instance of [`TieredPool`].
///
/// # Examples
///
/// ```
/// use reuse_pool::TieredPool;
///
/// let pool = TieredPool::builder(String::new)
///     .initial_capacity(10)
///     .preload_count(5)
///     .overflow_capacity_factor(4)
///     .build()
///     .unwrap();
///
/// assert_eq!(pool.capacity(), 10);
/// assert_eq!(pool.overflow_len(), 0);
/// ```
#[must_use]
pub struct TieredPoolBuilder<T, F> {
    factory: F,
    initial_capacity: usize,
    preload_count: Option<usize>,
    overflow_capacity_factor: usize,

    _item: PhantomData<fn() -> T>,
}

impl<T, F> TieredPoolBuilder<T, F>
where
    F: Factory<T>,
{
    pub(crate) fn new(factory: F) -> Self {
        Self {
            factory,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            preload_count: None,
            overflow_capacity_factor: DEFAULT_OVERFLOW_CAPACITY_FACTOR,
            _item: PhantomData,
        }
    }

    /// Sets the number of slots in the fixed array. The array never grows.
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets how many instances to create when the pool is created. Defaults to the
    /// initial capacity. Must not exceed the initial capacity.
    pub fn preload_count(mut self, preload_count: usize) -> Self {
        self.preload_count = Some(preload_count);
        self
    }

    /// Sets how many times the initial capacity the overflow tier allocates whenever it runs out
    /// of room.
    ///
    /// The overflow tier always allocates room for at least one instance at a time.
    pub fn overflow_capacity_factor(mut self, overflow_capacity_factor: usize) -> Self {
        self.overflow_capacity_factor = overflow_capacity_factor;
        self
    }

    /// Validates the configuration, preloads the requested instances and returns the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the preload count exceeds the initial capacity.
    pub fn build(self) -> crate::Result<TieredPool<T, F>> {
        let sizing = Sizing::new(self.initial_capacity, self.preload_count)?;

        Ok(TieredPool::new_inner(
            sizing,
            self.overflow_capacity_factor,
            self.factory,
        ))
    }
}

impl<T, F> fmt::Debug for TieredPoolBuilder<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TieredPoolBuilder")
            .field(
                "item_type",
                &std::format_args!("{}", std::any::type_name::<T>()),
            )
            .field("initial_capacity", &self.initial_capacity)
            .field("preload_count", &self.preload_count)
            .field("overflow_capacity_factor", &self.overflow_capacity_factor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use testing::NumberFactory;

    use super::*;
    use crate::Error;

    #[test]
    fn preload_over_capacity_creates_nothing() {
        let numbers = NumberFactory::new();

        let result = TieredPool::builder(numbers.factory())
            .initial_capacity(5)
            .preload_count(6)
            .build();

        assert!(matches!(result, Err(Error::PreloadExceedsCapacity { .. })));
        assert_eq!(numbers.created(), 0);
    }

    #[test]
    fn zero_overflow_factor_still_overflows() {
        let mut pool = TieredPool::builder(String::new)
            .initial_capacity(1)
            .overflow_capacity_factor(0)
            .build()
            .unwrap();

        for _ in 0..3 {
            pool.release(String::new());
        }

        assert_eq!(pool.overflow_len(), 3);
    }

    #[test]
    fn debug_output_lists_settings() {
        let builder = TieredPool::builder(String::new).overflow_capacity_factor(7);

        let output = format!("{builder:?}");
        assert!(output.contains("overflow_capacity_factor: 7"));
    }
}
