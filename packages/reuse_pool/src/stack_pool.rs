use std::{fmt, mem};

use crate::{
    Factory, GrowthFactor, ObjectPool, RetiredBuffers, Sizing, Slots, StackPoolBuilder,
    empty_slots, move_all, preload,
};

/// An object pool backed by an array used as a stack.
///
/// Released instances are pushed on top of the stack and [`get()`][Self::get] pops the top
/// instance, so the pool is strictly last-in-first-out. Preloaded instances start at the top of
/// the array.
///
/// The pool only ever grows on [`release()`][Self::release], when the stack is full. Growth copies
/// the existing instances into the same positions of a bigger array, so an instance never changes
/// its index. A [`get()`][Self::get] on an empty stack manufactures a new instance instead of
/// growing.
///
/// Like [`ArrayPool`][crate::ArrayPool], the pool keeps outgrown arrays until
/// [`flush_retired()`][Self::flush_retired] is called.
///
/// # Example
///
/// ```
/// use reuse_pool::StackPool;
///
/// let mut pool = StackPool::builder(String::new)
///     .initial_capacity(4)
///     .preload_count(0)
///     .build()
///     .unwrap();
///
/// pool.release(String::from("first"));
/// pool.release(String::from("second"));
///
/// assert_eq!(pool.get(), "second");
/// assert_eq!(pool.get(), "first");
/// ```
pub struct StackPool<T, F> {
    /// Slots before the cursor form the stack. Slots from the cursor onwards are empty.
    ///
    /// Slots inside the stack may also be empty if the pool was not fully preloaded.
    slots: Slots<T>,
    cursor: usize,

    factory: F,
    growth_factor: GrowthFactor,
    retired: RetiredBuffers<T>,
}

impl<T, F> StackPool<T, F>
where
    F: Factory<T>,
{
    /// Creates a pool with the default configuration, using `factory` to create instances.
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self::new_inner(Sizing::DEFAULT, GrowthFactor::DEFAULT, factory)
    }

    /// Starts building a pool that uses `factory` to create instances.
    pub fn builder(factory: F) -> StackPoolBuilder<T, F> {
        StackPoolBuilder::new(factory)
    }

    pub(crate) fn new_inner(sizing: Sizing, growth_factor: GrowthFactor, mut factory: F) -> Self {
        let mut slots = empty_slots(sizing.initial_capacity);

        let first_preloaded = sizing
            .initial_capacity
            .checked_sub(sizing.preload_count)
            .expect("sizing guarantees that the preload count does not exceed the capacity");
        preload(slots.iter_mut().skip(first_preloaded), &mut factory);

        tracing::trace!(
            initial_capacity = sizing.initial_capacity,
            preload_count = sizing.preload_count,
            growth_factor = growth_factor.get(),
            "created stack pool"
        );

        Self {
            cursor: slots.len(),
            slots,
            factory,
            growth_factor,
            retired: RetiredBuffers::new(),
        }
    }

    /// The number of slots in the backing array.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The number of outgrown arrays that the pool is keeping until the next
    /// [`flush_retired()`][Self::flush_retired].
    #[cfg_attr(test, mutants::skip)] // Trivial accessor.
    #[must_use]
    pub fn retired_count(&self) -> usize {
        self.retired.len()
    }

    /// Deallocates the arrays that the pool has outgrown and returns how many there were.
    pub fn flush_retired(&mut self) -> usize {
        self.retired.flush()
    }

    /// Pops the most recently released instance, or manufactures one if the stack is empty.
    #[must_use]
    pub fn get(&mut self) -> T {
        if self.cursor == 0 {
            return self.factory.new_instance();
        }

        self.cursor = self
            .cursor
            .checked_sub(1)
            .expect("we checked above that the cursor is not zero");

        self.slots
            .get_mut(self.cursor)
            .expect("the cursor is always within the array")
            .take()
            .unwrap_or_else(|| self.factory.new_instance())
    }

    /// Pushes an instance onto the stack, growing the backing array if it is full.
    ///
    /// The instance does not need to have come from this pool.
    pub fn release(&mut self, item: T) {
        if self.cursor == self.slots.len() {
            self.grow();
        }

        let slot = self
            .slots
            .get_mut(self.cursor)
            .expect("the cursor is always before the end of the array after growing");

        debug_assert!(slot.is_none(), "slots at or after the cursor are always empty");
        *slot = Some(item);

        self.cursor = self
            .cursor
            .checked_add(1)
            .expect("the cursor was inside the array, so it cannot exceed its length");
    }

    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = self.growth_factor.grow(old_capacity);

        // Instances keep their indexes, so the cursor stays valid.
        let mut old_slots = mem::replace(&mut self.slots, empty_slots(new_capacity));
        move_all(&mut old_slots, self.slots.iter_mut());
        self.retired.retire(old_slots);

        tracing::debug!(old_capacity, new_capacity, "grew stack pool");
    }

    #[cfg(test)]
    pub(crate) fn slot(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }
}

impl<T, F> ObjectPool<T> for StackPool<T, F>
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

impl<T, F> fmt::Debug for StackPool<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackPool")
            .field(
                "item_type",
                &std::format_args!("{}", std::any::type_name::<T>()),
            )
            .field("capacity", &self.slots.len())
            .field("cursor", &self.cursor)
            .field("growth_factor", &self.growth_factor.get())
            .field("retired", &self.retired)
            .finish_non_exhaustive()
    }
}
