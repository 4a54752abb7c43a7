use std::fmt;
use std::marker::PhantomData;

use crate::{
    ArrayPool, DEFAULT_GROWTH_FACTOR, DEFAULT_INITIAL_CAPACITY, Factory, GrowthFactor, Sizing,
};

/// Builder for creating an instance of [`ArrayPool`].
///
/// You only need to use this builder if you want to customize the pool configuration.
/// The default configuration used by [`ArrayPool::new()`][1] is sufficient for many use cases.
///
/// # Examples
///
/// ```
/// use reuse_pool::ArrayPool;
///
/// let pool = ArrayPool::builder(String::new)
///     .initial_capacity(64)
///     .preload_count(8)
///     .growth_factor(1.5)
///     .build()
///     .unwrap();
///
/// assert_eq!(pool.capacity(), 64);
/// ```
///
/// [1]: ArrayPool::new
#[must_use]
pub struct ArrayPoolBuilder<T, F> {
    factory: F,
    initial_capacity: usize,
    preload_count: Option<usize>,
    growth_factor: f64,

    _item: PhantomData<fn() -> T>,
}

impl<T, F> ArrayPoolBuilder<T, F>
where
    F: Factory<T>,
{
    pub(crate) fn new(factory: F) -> Self {
        Self {
            factory,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            preload_count: None,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            _item: PhantomData,
        }
    }

    /// Sets the number of slots in the backing array when the pool is created.
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

    /// Sets the ratio by which the backing array grows when it runs out of room. Must be
    /// a finite number bigger than one.
    pub fn growth_factor(mut self, growth_factor: f64) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Validates the configuration, preloads the requested instances and returns the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the preload count exceeds the initial capacity or if the growth
    /// factor is invalid. No instance is created in that case.
    pub fn build(self) -> crate::Result<ArrayPool<T, F>> {
        let growth_factor = GrowthFactor::new(self.growth_factor)?;
        let sizing = Sizing::new(self.initial_capacity, self.preload_count)?;

        Ok(ArrayPool::new_inner(sizing, growth_factor, self.factory))
    }
}

impl<T, F> fmt::Debug for ArrayPoolBuilder<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayPoolBuilder")
            .field(
                "item_type",
                &std::format_args!("{}", std::any::type_name::<T>()),
            )
            .field("initial_capacity", &self.initial_capacity)
            .field("preload_count", &self.preload_count)
            .field("growth_factor", &self.growth_factor)
            .finish_non_exhaustive()
    }
}
