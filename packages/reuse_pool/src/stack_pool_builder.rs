use std::fmt;
use std::marker::PhantomData;

use crate::{
    DEFAULT_GROWTH_FACTOR, DEFAULT_INITIAL_CAPACITY, Factory, GrowthFactor, Sizing, StackPool,
};

/// Builder for creating an instance of [`StackPool`].
///
/// # Examples
///
/// ```
/// use reuse_pool::StackPool;
///
/// let pool = StackPool::builder(Vec::<u8>::new)
///     .initial_capacity(32)
///     .preload_count(4)
///     .build()
///     .unwrap();
///
/// assert_eq!(pool.capacity(), 32);
/// ```
#[must_use]
pub struct StackPoolBuilder<T, F> {
    factory: F,
    initial_capacity: usize,
    preload_count: Option<usize>,
    growth_factor: f64,

    _item: PhantomData<fn() -> T>,
}

impl<T, F> StackPoolBuilder<T, F>
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

    /// Sets the ratio by which the backing array grows when a release finds it full.
    pub fn growth_factor(mut self, growth_factor: f64) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Validates the configuration, preloads the requested instances and returns the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the preload count exceeds the initial capacity or if the growth
    /// factor is not a finite number bigger than one.
    pub fn build(self) -> crate::Result<StackPool<T, F>> {
        let growth_factor = GrowthFactor::new(self.growth_factor)?;
        let sizing = Sizing::new(self.initial_capacity, self.preload_count)?;

        Ok(StackPool::new_inner(sizing, growth_factor, self.factory))
    }
}

impl<T, F> fmt::Debug for StackPoolBuilder<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackPoolBuilder")
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
