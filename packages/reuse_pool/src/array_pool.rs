use std::{fmt, mem};

use crate::{
    ArrayPoolBuilder, Factory, GrowthFactor, ObjectPool, RetiredBuffers, Sizing, Slots,
    empty_slots, move_all, preload,
};

/// An object pool backed by a single contiguous array. This is the fastest pool in the crate.
///
/// Instances are dispensed from and returned to a cursor that moves through the array, so the
/// most recently released instance is the next one handed out. When the array runs out of room
/// in either direction, the pool replaces it with a bigger one:
///
/// * If [`get()`][Self::get] finds every slot dispensed, the pool swaps in a bigger, empty array
///   and manufactures the requested instance. Nothing needs to be copied because the old array
///   holds no instances at that point.
/// * If [`release()`][Self::release] finds every slot occupied, the pool moves the existing
///   instances to the tail of a bigger array, which leaves room in front of them.
///
/// Each new capacity is the old capacity times the [growth factor][ArrayPoolBuilder::growth_factor],
/// rounded down, and always at least one slot bigger.
///
/// # Retired buffers
///
/// Arrays that the pool has outgrown are not deallocated right away but kept by the pool, so that
/// growth on a hot path does not also pay for deallocation. Call [`flush_retired()`][1] at a
/// convenient time to deallocate them. The pool never does this on its own.
///
/// # Example
///
/// ```
/// use reuse_pool::ArrayPool;
///
/// let mut pool = ArrayPool::builder(|| Vec::<u8>::with_capacity(1024))
///     .initial_capacity(4)
///     .preload_count(2)
///     .build()
///     .unwrap();
///
/// let mut buffer = pool.get();
/// buffer.extend_from_slice(b"payload");
/// buffer.clear();
/// pool.release(buffer);
///
/// // Released instances are handed out again before any new ones are created.
/// assert_eq!(pool.get().capacity(), 1024);
/// ```
///
/// [1]: Self::flush_retired
pub struct ArrayPool<T, F> {
    /// Slots before the cursor have been dispensed and are empty. Slots from the cursor onwards
    /// hold spare instances, except for any that the pool never preloaded.
    slots: Slots<T>,
    cursor: usize,

    factory: F,
    growth_factor: GrowthFactor,
    retired: RetiredBuffers<T>,
}

impl<T, F> ArrayPool<T, F>
where
    F: Factory<T>,
{
    /// Creates a pool with the default configuration, using `factory` to create instances.
    ///
    /// The default pool has an initial capacity of
    /// [`DEFAULT_INITIAL_CAPACITY`][crate::DEFAULT_INITIAL_CAPACITY], entirely preloaded, and
    /// grows by [`DEFAULT_GROWTH_FACTOR`][crate::DEFAULT_GROWTH_FACTOR].
    ///
    /// # Example
    ///
    /// ```
    /// use reuse_pool::{ArrayPool, DEFAULT_INITIAL_CAPACITY};
    ///
    /// let pool = ArrayPool::new(String::new);
    /// assert_eq!(pool.capacity(), DEFAULT_INITIAL_CAPACITY);
    /// ```
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self::new_inner(Sizing::DEFAULT, GrowthFactor::DEFAULT, factory)
    }

    /// Starts building a pool that uses `factory` to create instances.
    ///
    /// Use this when you want to customize the pool configuration beyond the defaults.
    pub fn builder(factory: F) -> ArrayPoolBuilder<T, F> {
        ArrayPoolBuilder::new(factory)
    }

    pub(crate) fn new_inner(sizing: Sizing, growth_factor: GrowthFactor, mut factory: F) -> Self {
        let mut slots = empty_slots(sizing.initial_capacity);
        preload(slots.iter_mut().take(sizing.preload_count), &mut factory);

        tracing::trace!(
            initial_capacity = sizing.initial_capacity,
            preload_count = sizing.preload_count,
            growth_factor = growth_factor.get(),
            "created array pool"
        );

        Self {
            slots,
            cursor: 0,
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
    ///
    /// # Example
    ///
    /// ```
    /// use reuse_pool::ArrayPool;
    ///
    /// let mut pool = ArrayPool::builder(String::new)
    ///     .initial_capacity(1)
    ///     .build()
    ///     .unwrap();
    ///
    /// // Releasing into a full pool makes it grow.
    /// pool.release(String::from("extra"));
    ///
    /// assert_eq!(pool.flush_retired(), 1);
    /// assert_eq!(pool.flush_retired(), 0);
    /// ```
    pub fn flush_retired(&mut self) -> usize {
        self.retired.flush()
    }

    /// Dispenses an instance, preferring the most recently released one.
    ///
    /// If the pool holds no spare instance, the factory creates a new one. If every slot has been
    /// dispensed, the backing array grows first.
    #[must_use]
    pub fn get(&mut self) -> T {
        if self.cursor == self.slots.len() {
            self.grow_for_get();
        }

        let spare = self
            .slots
            .get_mut(self.cursor)
            .expect("the cursor is always before the end of the array after growing")
            .take();

        self.cursor = self
            .cursor
            .checked_add(1)
            .expect("the cursor was inside the array, so it cannot exceed its length");

        spare.unwrap_or_else(|| self.factory.new_instance())
    }

    /// Returns an instance to the pool, growing the backing array if it is full.
    ///
    /// The instance does not need to have come from this pool.
    pub fn release(&mut self, item: T) {
        if self.cursor == 0 {
            self.grow_for_release();
        }

        self.cursor = self
            .cursor
            .checked_sub(1)
            .expect("growing always moves the cursor past the start of the array");

        let slot = self
            .slots
            .get_mut(self.cursor)
            .expect("the cursor was decremented from a position inside the array");

        debug_assert!(slot.is_none(), "slots before the cursor are always empty");
        *slot = Some(item);
    }

    fn grow_for_get(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = self.growth_factor.grow(old_capacity);

        // The cursor is at the end, so every slot of the old array has been dispensed and there
        // is nothing to carry over. The cursor stays where it is, at the start of the new slots.
        let old_slots = mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.retired.retire(old_slots);

        tracing::debug!(
            old_capacity,
            new_capacity,
            direction = "back",
            "grew array pool"
        );
    }

    fn grow_for_release(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = self.growth_factor.grow(old_capacity);

        let offset = new_capacity
            .checked_sub(old_capacity)
            .expect("growth always increases capacity");

        // Existing instances move to the tail of the new array, leaving room in front of them.
        let mut old_slots = mem::replace(&mut self.slots, empty_slots(new_capacity));
        move_all(&mut old_slots, self.slots.iter_mut().skip(offset));
        self.retired.retire(old_slots);

        self.cursor = offset;

        tracing::debug!(
            old_capacity,
            new_capacity,
            direction = "front",
            "grew array pool"
        );
    }

    #[cfg(test)]
    pub(crate) fn slot(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }
}

impl<T, F> ObjectPool<T> for ArrayPool<T, F>
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

impl<T, F> fmt::Debug for ArrayPool<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayPool")
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

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::assert_impl_all;
    use testing::NumberFactory;

    use super::*;
    use crate::Error;

    assert_impl_all!(ArrayPool<String, fn() -> String>: Send, fmt::Debug);

    fn pool(
        initial_capacity: usize,
        preload_count: usize,
        numbers: &NumberFactory,
    ) -> ArrayPool<u64, impl FnMut() -> u64 + use<>> {
        ArrayPool::builder(numbers.factory())
            .initial_capacity(initial_capacity)
            .preload_count(preload_count)
            .growth_factor(2.0)
            .build()
            .unwrap()
    }

    #[test]
    fn preload_fills_front() {
        let numbers = NumberFactory::new();
        let pool = pool(5, 3, &numbers);

        assert_eq!(numbers.created(), 3);
        assert_eq!(pool.capacity(), 5);
        assert_eq!(pool.slot(0), Some(&0));
        assert_eq!(pool.slot(1), Some(&1));
        assert_eq!(pool.slot(2), Some(&2));
        assert_eq!(pool.slot(3), None);
        assert_eq!(pool.slot(4), None);
    }

    #[test]
    fn get_triggers_growth_when_drained() {
        let numbers = NumberFactory::new();
        let mut pool = pool(2, 2, &numbers);

        assert_eq!(pool.get(), 0);
        assert_eq!(pool.get(), 1);
        assert_eq!(pool.capacity(), 2);

        // The preload is exhausted, so this grows the pool and manufactures.
        assert_eq!(pool.get(), 2);
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.slot(0), None);
        assert_eq!(pool.slot(1), None);
    }

    #[test]
    fn multiple_growth_steps_on_get() {
        let numbers = NumberFactory::new();
        let mut pool = pool(3, 3, &numbers);

        for expected in 0..3 {
            assert_eq!(pool.get(), expected);
        }

        assert_eq!(pool.get(), 3);
        assert_eq!(pool.capacity(), 6);

        assert_eq!(pool.get(), 4);
        assert_eq!(pool.get(), 5);
        assert_eq!(pool.capacity(), 6);

        assert_eq!(pool.get(), 6);
        assert_eq!(pool.capacity(), 12);
        assert_eq!(pool.retired_count(), 2);
    }

    #[test]
    fn release_then_get_does_not_grow() {
        let numbers = NumberFactory::new();
        let mut pool = pool(2, 2, &numbers);

        let _a = pool.get();
        let b = pool.get();

        pool.release(b);
        assert_eq!(pool.get(), b);
        assert_eq!(pool.capacity(), 2);

        let _d = pool.get();
        assert_eq!(pool.capacity(), 4);
    }

    #[test]
    fn release_without_growth_fills_toward_front() {
        let numbers = NumberFactory::new();
        let mut pool = pool(5, 3, &numbers);

        let first = pool.get();
        let second = pool.get();

        pool.release(second);
        assert_eq!(pool.slot(1), Some(&second));

        pool.release(first);
        assert_eq!(pool.slot(0), Some(&first));
        assert_eq!(pool.capacity(), 5);
    }

    #[test]
    fn release_into_full_pool_shifts_to_tail() {
        let numbers = NumberFactory::new();
        let mut pool = pool(2, 2, &numbers);

        let a = pool.get();
        let b = pool.get();
        pool.release(b);
        pool.release(a);

        pool.release(999);

        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.slot(0), None);
        assert_eq!(pool.slot(1), Some(&999));
        assert_eq!(pool.slot(2), Some(&a));
        assert_eq!(pool.slot(3), Some(&b));

        assert_eq!(pool.get(), 999);
        assert_eq!(pool.get(), a);

        pool.release(600);
        assert_eq!(pool.slot(2), Some(&600));
    }

    #[test]
    fn release_growth_with_larger_pool() {
        let numbers = NumberFactory::new();
        let mut pool = pool(4, 4, &numbers);

        let taken: Vec<_> = (0..4).map(|_| pool.get()).collect();
        for item in taken.iter().rev() {
            pool.release(*item);
        }

        pool.release(700);

        assert_eq!(pool.capacity(), 8);
        assert_eq!(pool.slot(3), Some(&700));
        for index in 0..3 {
            assert_eq!(pool.slot(index), None);
        }
        for index in 4..8 {
            assert!(pool.slot(index).is_some());
        }

        assert_eq!(pool.get(), 700);
        assert_eq!(numbers.created(), 4);
    }

    #[test]
    fn round_trip_returns_same_instance() {
        let numbers = NumberFactory::new();
        let mut pool = pool(4, 2, &numbers);

        let item = pool.get();
        pool.release(item);

        assert_eq!(pool.get(), item);
    }

    #[test]
    fn never_preloaded_slots_are_manufactured_on_demand() {
        let numbers = NumberFactory::new();
        let mut pool = pool(4, 1, &numbers);

        assert_eq!(pool.get(), 0);
        assert_eq!(numbers.created(), 1);

        assert_eq!(pool.get(), 1);
        assert_eq!(numbers.created(), 2);
        assert_eq!(pool.capacity(), 4);
    }

    #[test]
    fn zero_capacity_grows_to_one() {
        let numbers = NumberFactory::new();
        let mut pool = pool(0, 0, &numbers);

        assert_eq!(pool.get(), 0);
        assert_eq!(pool.capacity(), 1);

        let mut pool = ArrayPool::builder(numbers.factory())
            .initial_capacity(0)
            .build()
            .unwrap();

        pool.release(42);
        assert_eq!(pool.capacity(), 1);
        assert_eq!(pool.get(), 42);
    }

    #[test]
    fn flush_is_idempotent() {
        let numbers = NumberFactory::new();
        let mut pool = pool(1, 1, &numbers);

        pool.release(10);
        pool.release(11);
        pool.release(12);

        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.retired_count(), 2);
        assert_eq!(pool.flush_retired(), 2);
        assert_eq!(pool.flush_retired(), 0);

        assert_eq!(pool.get(), 12);
        assert_eq!(pool.get(), 11);
        assert_eq!(pool.get(), 10);
        assert_eq!(pool.get(), 0);
    }

    #[test]
    fn preload_over_capacity_creates_nothing() {
        let numbers = NumberFactory::new();

        let result = ArrayPool::builder(numbers.factory())
            .initial_capacity(2)
            .preload_count(4)
            .build();

        assert!(matches!(result, Err(Error::PreloadExceedsCapacity { .. })));
        assert_eq!(numbers.created(), 0);
    }

    #[test]
    fn invalid_growth_factor_creates_nothing() {
        let numbers = NumberFactory::new();

        let result = ArrayPool::builder(numbers.factory())
            .growth_factor(1.0)
            .build();

        assert!(matches!(result, Err(Error::InvalidGrowthFactor { .. })));
        assert_eq!(numbers.created(), 0);
    }

    #[test]
    fn default_configuration() {
        let numbers = NumberFactory::new();
        let pool = ArrayPool::new(numbers.factory());

        assert_eq!(pool.capacity(), crate::DEFAULT_INITIAL_CAPACITY);
        assert_eq!(numbers.created(), crate::DEFAULT_INITIAL_CAPACITY as u64);
        assert_eq!(pool.retired_count(), 0);
    }

    #[test]
    fn debug_output_names_pool() {
        let pool = ArrayPool::new(String::new);

        let output = format!("{pool:?}");
        assert!(output.contains("ArrayPool"));
        assert!(output.contains("String"));
    }

    #[test]
    fn dropping_pool_drops_spares() {
        use std::rc::Rc;

        let item = Rc::new(());
        let mut pool = ArrayPool::builder(|| Rc::new(()))
            .initial_capacity(2)
            .preload_count(0)
            .build()
            .unwrap();

        pool.release(Rc::clone(&item));
        pool.release(Rc::clone(&item));
        pool.release(Rc::clone(&item));
        assert_eq!(Rc::strong_count(&item), 4);

        drop(pool);
        assert_eq!(Rc::strong_count(&item), 1);
    }
}
