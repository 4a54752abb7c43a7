use std::fmt;
use std::marker::PhantomData;

use crate::{DEFAULT_INITIAL_CAPACITY, Factory, LinkedPool, Sizing};

/// Builder for creating an instance of [`LinkedPool`].
///
/// # Examples
///
/// ```
/// use reuse_pool::LinkedPool;
///
/// let pool = LinkedPool::builder(String::new)
///     .initial_capacity(100)
///     .preload_count(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(pool.len(), 10);
/// ```
#[must_use]
pub struct LinkedPoolBuilder<T, F> {
    factory: F,
    initial_capacity: usize,
    preload_count: Option<usize>,

    _item: PhantomData<fn() -> T>,
}

impl<T, F> LinkedPoolBuilder<T, F>
where
    F: Factory<T>,
{
    pub(crate) fn new(factory: F) -> Self {
        Self {
            factory,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            preload_count: None,
            _item: PhantomData,
        }
    }

    /// Sets how many instances the pool holds before it links additional storage. Storage is
    /// always added in chunks of this size.
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

    /// Validates the configuration, preloads the requested instances and returns the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the preload count exceeds the initial capacity.
    pub fn build(self) -> crate::Result<LinkedPool<T, F>> {
        let sizing = Sizing::new(self.initial_capacity, self.preload_count)?;

        Ok(LinkedPool::new_inner(sizing, self.factory))
    }
}

impl<T, F> fmt::Debug for LinkedPoolBuilder<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedPoolBuilder")
            .field(
                "item_type",
                &std::format_args!("{}", std::any::type_name::<T>()),
            )
            .field("initial_capacity", &self.initial_capacity)
            .field("preload_count", &self.preload_count)
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

        let result = LinkedPool::builder(numbers.factory())
            .initial_capacity(5)
            .preload_count(6)
            .build();

        assert!(matches!(result, Err(Error::PreloadExceedsCapacity { .. })));
        assert_eq!(numbers.created(), 0);
    }

    #[test]
    fn preload_defaults_to_capacity() {
        let numbers = NumberFactory::new();

        let pool = LinkedPool::builder(numbers.factory())
            .initial_capacity(7)
            .build()
            .unwrap();

        assert_eq!(pool.len(), 7);
        assert_eq!(numbers.created(), 7);
    }
}
