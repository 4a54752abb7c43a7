use std::fmt;
use std::num::NonZero;

use crate::{
    DEFAULT_INITIAL_CAPACITY, Factory, ObjectPool, SegmentedPoolBuilder, Slots, empty_slots,
    preload,
};

/// One fixed-length array in the chain of a [`SegmentedPool`].
///
/// Neighbors are indexes into the pool's segment arena.
struct Segment<T> {
    slots: Slots<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<T> Segment<T> {
    fn new(slots: Slots<T>) -> Self {
        Self {
            slots,
            prev: None,
            next: None,
        }
    }
}

/// An object pool that grows by chaining fixed-length segments instead of resizing an array.
///
/// The pool is a doubly linked chain of segments that all have the same length. A cursor points
/// to a position inside the current segment. [`get()`][Self::get] dispenses at the cursor and
/// moves it right; [`release()`][Self::release] moves the cursor left and stores the instance
/// there, so the pool is last-in-first-out.
///
/// When the cursor runs off the right end of the chain, a new segment is linked on the right and
/// preloaded with the same number of instances as the first segment. When it runs off the left
/// end, a new empty segment is linked on the left. Existing instances are never copied and
/// segments are never deallocated before the pool itself, so re-traversing the chain reuses the
/// segments that are already there.
///
/// # Example
///
/// ```
/// use reuse_pool::SegmentedPool;
///
/// let mut pool = SegmentedPool::builder(String::new)
///     .segment_length(2)
///     .build()
///     .unwrap();
///
/// for _ in 0..3 {
///     _ = pool.get();
/// }
///
/// // The third get linked a second segment on the right.
/// assert_eq!(pool.segment_count(), 2);
/// ```
pub struct SegmentedPool<T, F> {
    /// All segments ever allocated, in allocation order. Chain order is given by the links.
    segments: Vec<Segment<T>>,
    current: usize,

    /// Position inside the current segment, in `0..=segment_length`.
    cursor: usize,

    segment_length: usize,
    preload_count: usize,

    factory: F,
}

impl<T, F> SegmentedPool<T, F>
where
    F: Factory<T>,
{
    /// Creates a pool with the default configuration, using `factory` to create instances.
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self::new_inner(
            DEFAULT_INITIAL_CAPACITY
                .try_into()
                .expect("the default segment length is not zero"),
            DEFAULT_INITIAL_CAPACITY,
            factory,
        )
    }

    /// Starts building a pool that uses `factory` to create instances.
    pub fn builder(factory: F) -> SegmentedPoolBuilder<T, F> {
        SegmentedPoolBuilder::new(factory)
    }

    pub(crate) fn new_inner(
        segment_length: NonZero<usize>,
        preload_count: usize,
        mut factory: F,
    ) -> Self {
        let segment_length = segment_length.get();

        let first = Segment::new(Self::preloaded_slots(
            segment_length,
            preload_count,
            &mut factory,
        ));

        tracing::trace!(segment_length, preload_count, "created segmented pool");

        Self {
            segments: vec![first],
            current: 0,
            cursor: 0,
            segment_length,
            preload_count,
            factory,
        }
    }

    fn preloaded_slots(segment_length: usize, preload_count: usize, factory: &mut F) -> Slots<T> {
        let mut slots = empty_slots(segment_length);
        preload(slots.iter_mut().take(preload_count), factory);
        slots
    }

    /// The number of segments the pool has allocated.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The number of slots in every segment.
    #[cfg_attr(test, mutants::skip)] // Trivial accessor.
    #[must_use]
    pub fn segment_length(&self) -> usize {
        self.segment_length
    }

    /// Dispenses the instance at the cursor, manufacturing one if the slot is empty.
    #[must_use]
    pub fn get(&mut self) -> T {
        if self.cursor == self.segment_length {
            let next = self.current_segment().next;
            self.current = match next {
                Some(next) => next,
                None => self.link_right(),
            };
            self.cursor = 0;
        }

        let cursor = self.cursor;
        let spare = self
            .current_segment_mut()
            .slots
            .get_mut(cursor)
            .expect("the cursor is always within the segment after moving to the next one")
            .take();

        self.cursor = self
            .cursor
            .checked_add(1)
            .expect("the cursor was inside the segment, so it cannot exceed its length");

        spare.unwrap_or_else(|| self.factory.new_instance())
    }

    /// Stores an instance in the slot before the cursor, linking a new segment on the left if the
    /// cursor is at the start of the chain.
    ///
    /// The instance does not need to have come from this pool.
    pub fn release(&mut self, item: T) {
        if self.cursor == 0 {
            let prev = self.current_segment().prev;
            self.current = match prev {
                Some(prev) => prev,
                None => self.link_left(),
            };
            self.cursor = self.segment_length;
        }

        self.cursor = self
            .cursor
            .checked_sub(1)
            .expect("we ensured above that the cursor is not zero");

        let cursor = self.cursor;
        let slot = self
            .current_segment_mut()
            .slots
            .get_mut(cursor)
            .expect("the cursor is always within the segment");

        debug_assert!(slot.is_none(), "slots before the cursor are always empty");
        *slot = Some(item);
    }

    /// Links a preloaded segment after the current one and returns its index.
    fn link_right(&mut self) -> usize {
        let slots =
            Self::preloaded_slots(self.segment_length, self.preload_count, &mut self.factory);

        let mut segment = Segment::new(slots);
        segment.prev = Some(self.current);

        self.link(segment, |current, new_index| current.next = Some(new_index))
    }

    /// Links an empty segment before the current one and returns its index.
    fn link_left(&mut self) -> usize {
        let mut segment = Segment::new(empty_slots(self.segment_length));
        segment.next = Some(self.current);

        self.link(segment, |current, new_index| current.prev = Some(new_index))
    }

    fn link(&mut self, segment: Segment<T>, attach: impl FnOnce(&mut Segment<T>, usize)) -> usize {
        let new_index = self.segments.len();
        self.segments.push(segment);
        attach(self.current_segment_mut(), new_index);

        tracing::debug!(
            segment_length = self.segment_length,
            segment_count = self.segments.len(),
            "linked new segment to segmented pool"
        );

        new_index
    }

    fn current_segment(&self) -> &Segment<T> {
        self.segments
            .get(self.current)
            .expect("the current segment index always refers to an allocated segment")
    }

    fn current_segment_mut(&mut self) -> &mut Segment<T> {
        self.segments
            .get_mut(self.current)
            .expect("the current segment index always refers to an allocated segment")
    }

    /// Slot contents in chain order, from the leftmost segment to the rightmost.
    #[cfg(test)]
    pub(crate) fn chain(&self) -> Vec<Option<&T>> {
        let segment = |index: usize| self.segments.get(index).unwrap();

        let mut leftmost = self.current;
        while let Some(prev) = segment(leftmost).prev {
            leftmost = prev;
        }

        let mut result = Vec::new();
        let mut next = Some(leftmost);
        while let Some(index) = next {
            result.extend(segment(index).slots.iter().map(Option::as_ref));
            next = segment(index).next;
        }

        result
    }
}

impl<T, F> ObjectPool<T> for SegmentedPool<T, F>
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

impl<T, F> fmt::Debug for SegmentedPool<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentedPool")
            .field(
                "item_type",
                &std::format_args!("{}", std::any::type_name::<T>()),
            )
            .field("segment_length", &self.segment_length)
            .field("segment_count", &self.segments.len())
            .field("current", &self.current)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
