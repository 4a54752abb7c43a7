use std::fmt;

use crate::{
    ChunkedStack, Factory, ObjectPool, Sizing, Slots, TieredPoolBuilder, empty_slots, preload,
};

/// How many times the initial capacity the overflow tier allocates at once, unless configured
/// otherwise.
pub const DEFAULT_OVERFLOW_CAPACITY_FACTOR: usize = 3;

/// An object pool with a fixed-size array in front of an unbounded overflow stack.
///
/// The array never grows. Releases go to the array while it has room and to the overflow
/// [`ChunkedStack`] otherwise. [`get()`][Self::get] always drains the overflow first, then the
/// array, and manufactures a new instance only when both are empty.
///
/// # Example
///
/// ```
/// use reuse_pool::TieredPool;
///
/// let mut pool = TieredPool::builder(String::new)
///     .initial_capacity(1)
///     .build()
///     .unwrap();
///
/// let first = pool.get();
/// pool.release(first);
///
/// // The array is full again, so this one goes to the overflow tier.
/// pool.release(String::from("extra"));
/// assert_eq!(pool.overflow_len(), 1);
///
/// assert_eq!(pool.get(), "extra");
/// ```
pub struct TieredPool<T, F> {
    /// Slots before the cursor are empty. Slots from the cursor onwards hold spare instances,
    /// except for slots that were never preloaded.
    slots: Slots<T>,
    cursor: usize,

    overflow: ChunkedStack<T>,
    factory: F,
}

impl<T, F> TieredPool<T, F>
where
    F: Factory<T>,
{
    /// Creates a pool with the default configuration, using `factory` to create instances.
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self::new_inner(Sizing::DEFAULT, DEFAULT_OVERFLOW_CAPACITY_FACTOR, factory)
    }

    /// Starts building a pool that uses `factory` to create instances.
    pub fn builder(factory: F) -> TieredPoolBuilder<T, F> {
        TieredPoolBuilder::new(factory)
    }

    pub(crate) fn new_inner(
        sizing: Sizing,
        overflow_capacity_factor: usize,
        mut factory: F,
    ) -> Self {
        let mut slots = empty_slots(sizing.initial_capacity);
        preload(slots.iter_mut().take(sizing.preload_count), &mut factory);

        let overflow_chunk_length = sizing
            .initial_capacity
            .saturating_mul(overflow_capacity_factor);

        tracing::trace!(
            initial_capacity = sizing.initial_capacity,
            preload_count = sizing.preload_count,
            overflow_chunk_length,
            "created tiered pool"
        );

        Self {
            slots,
            cursor: 0,
            overflow: ChunkedStack::with_chunk_length(overflow_chunk_length),
            factory,
        }
    }

    /// The number of slots in the fixed array.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The number of spare instances in the overflow tier.
    #[must_use]
    pub fn overflow_len(&self) -> usize {
        self.overflow.len()
    }

    /// Dispenses an instance from the overflow tier, then from the array, manufacturing one if
    /// both are empty.
    #[must_use]
    pub fn get(&mut self) -> T {
        if let Some(item) = self.overflow.pop_back() {
            return item;
        }

        let Some(slot) = self.slots.get_mut(self.cursor) else {
            return self.factory.new_instance();
        };

        let spare = slot.take();

        self.cursor = self
            .cursor
            .checked_add(1)
            .expect("the cursor was inside the array, so it cannot exceed its length");

        spare.unwrap_or_else(|| self.factory.new_instance())
    }

    /// Returns an instance to the array if it has room, otherwise to the overflow tier.
    ///
    /// The instance does not need to have come from this pool.
    pub fn release(&mut self, item: T) {
        if self.cursor == 0 {
            self.overflow.push_back(item);
            return;
        }

        self.cursor = self
            .cursor
            .checked_sub(1)
            .expect("we checked above that the cursor is not zero");

        let slot = self
            .slots
            .get_mut(self.cursor)
            .expect("the cursor was decremented from a position inside the array");

        debug_assert!(slot.is_none(), "slots before the cursor are always empty");
        *slot = Some(item);
    }

    #[cfg(test)]
    pub(crate) fn slot(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }
}

impl<T, F> ObjectPool<T> for TieredPool<T, F>
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

impl<T, F> fmt::Debug for TieredPool<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TieredPool")
            .field(
                "item_type",
                &std::format_args!("{}", std::any::type_name::<T>()),
            )
            .field("capacity", &self.slots.len())
            .field("cursor", &self.cursor)
            .field("overflow", &self.overflow)
            .finish_non_exhaustive()
    }
}
