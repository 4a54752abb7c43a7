use std::fmt;

use crate::{ChunkedStack, Factory, LinkedPoolBuilder, ObjectPool, Sizing};

/// An object pool that keeps its spare instances in a [`ChunkedStack`].
///
/// Released instances are appended to the stack and [`get()`][Self::get] removes the last one,
/// manufacturing a new instance when the stack is empty. The stack grows in chunks of the initial
/// capacity, so the pool never copies instances and never needs a growth factor.
///
/// # Example
///
/// ```
/// use reuse_pool::LinkedPool;
///
/// let mut pool = LinkedPool::builder(Vec::<u8>::new)
///     .initial_capacity(8)
///     .preload_count(2)
///     .build()
///     .unwrap();
///
/// assert_eq!(pool.len(), 2);
///
/// let buffer = pool.get();
/// assert_eq!(pool.len(), 1);
///
/// pool.release(buffer);
/// assert_eq!(pool.len(), 2);
/// ```
pub struct LinkedPool<T, F> {
    spares: ChunkedStack<T>,
    factory: F,
}

impl<T, F> LinkedPool<T, F>
where
    F: Factory<T>,
{
    /// Creates a pool with the default configuration, using `factory` to create instances.
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self::new_inner(Sizing::DEFAULT, factory)
    }

    /// Starts building a pool that uses `factory` to create instances.
    pub fn builder(factory: F) -> LinkedPoolBuilder<T, F> {
        LinkedPoolBuilder::new(factory)
    }

    pub(crate) fn new_inner(sizing: Sizing, mut factory: F) -> Self {
        let mut spares = ChunkedStack::with_chunk_length(sizing.initial_capacity);

        for _ in 0..sizing.preload_count {
            spares.push_back(factory.new_instance());
        }

        tracing::trace!(
            initial_capacity = sizing.initial_capacity,
            preload_count = sizing.preload_count,
            "created linked pool"
        );

        Self { spares, factory }
    }

    /// The number of spare instances in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spares.len()
    }

    /// Whether the pool holds no spare instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spares.is_empty()
    }

    /// Removes the most recently released instance, or manufactures one if the pool is empty.
    #[must_use]
    pub fn get(&mut self) -> T {
        self.spares
            .pop_back()
            .unwrap_or_else(|| self.factory.new_instance())
    }

    /// Adds an instance to the pool.
    ///
    /// The instance does not need to have come from this pool.
    pub fn release(&mut self, item: T) {
        self.spares.push_back(item);
    }
}

impl<T, F> ObjectPool<T> for LinkedPool<T, F>
where
    F: Factory<T>,
{
    #[inline]
    fn get(&mut self) -> T {
        Self::get(self)
    }

    #[inline]
    fn release(&mut self, item: T) {
        Self::release(self, item);
    }
}

impl<T, F> fmt::Debug for LinkedPool<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedPool")
            .field("spares", &self.spares)
            .finish_non_exhaustive()
    }
}
