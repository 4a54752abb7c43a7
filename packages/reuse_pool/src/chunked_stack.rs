use std::fmt;

use crate::{Slots, empty_slots};

/// A last-in-first-out sequence that grows by linking fixed-size chunks instead of reallocating.
///
/// Items never move once pushed. When the last chunk is full, a new chunk is allocated and
/// appended; chunks are kept after they empty out, so a stack that oscillates around the same
/// size stops allocating once it has seen its peak. This makes it suitable as the storage of a
/// pool that must not generate allocator traffic in steady state.
///
/// # Example
///
/// ```
/// use reuse_pool::ChunkedStack;
///
/// let mut stack = ChunkedStack::with_chunk_length(2);
/// stack.push_back("a");
/// stack.push_back("b");
/// stack.push_back("c"); // Links a second chunk.
///
/// assert_eq!(stack.len(), 3);
/// assert_eq!(stack.pop_back(), Some("c"));
/// assert_eq!(stack.pop_back(), Some("b"));
/// assert_eq!(stack.pop_back(), Some("a"));
/// assert_eq!(stack.pop_back(), None);
///
/// // The second chunk is retained for reuse.
/// assert_eq!(stack.capacity(), 4);
/// ```
pub struct ChunkedStack<T> {
    chunks: Vec<Slots<T>>,
    chunk_length: usize,

    /// Index of the chunk that holds the last item, or that receives the next item if the stack
    /// is empty.
    tail_chunk: usize,

    /// Number of occupied slots in the tail chunk. All chunks before the tail chunk are full,
    /// all chunks after it are empty.
    tail_offset: usize,

    len: usize,
}

impl<T> ChunkedStack<T> {
    /// Creates an empty stack that allocates storage `chunk_length` items at a time.
    ///
    /// The first chunk is allocated immediately. A chunk length of zero is treated as one.
    #[must_use]
    pub fn with_chunk_length(chunk_length: usize) -> Self {
        let chunk_length = chunk_length.max(1);

        Self {
            chunks: vec![empty_slots(chunk_length)],
            chunk_length,
            tail_chunk: 0,
            tail_offset: 0,
            len: 0,
        }
    }

    /// The number of items in the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the stack holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of items the stack can hold without allocating another chunk.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.chunks
            .len()
            .checked_mul(self.chunk_length)
            .expect("allocated chunks always fit in memory, so their total length fits in usize")
    }

    /// Appends an item after the last one.
    pub fn push_back(&mut self, item: T) {
        if self.tail_offset == self.chunk_length {
            self.advance_tail_chunk();
        }

        let slot = self
            .chunks
            .get_mut(self.tail_chunk)
            .and_then(|chunk| chunk.get_mut(self.tail_offset))
            .expect("the tail chunk always has a vacant slot at the tail offset after advancing");

        debug_assert!(slot.is_none());
        *slot = Some(item);

        self.tail_offset = self
            .tail_offset
            .checked_add(1)
            .expect("bounded by the chunk length");
        self.len = self.len.checked_add(1).expect("bounded by the capacity");
    }

    /// Removes and returns the last item, or `None` if the stack is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        if self.tail_offset == 0 {
            // The tail chunk is empty, so the last item is at the end of the previous chunk.
            self.tail_chunk = self
                .tail_chunk
                .checked_sub(1)
                .expect("the stack is not empty, so there is a full chunk before an empty tail");
            self.tail_offset = self.chunk_length;
        }

        self.tail_offset = self
            .tail_offset
            .checked_sub(1)
            .expect("we ensured above that the tail offset is not zero");
        self.len = self
            .len
            .checked_sub(1)
            .expect("we checked above that the stack is not empty");

        self.chunks
            .get_mut(self.tail_chunk)
            .and_then(|chunk| chunk.get_mut(self.tail_offset))
            .expect("the slot before the tail offset is always within the tail chunk")
            .take()
    }

    /// Drops all items but keeps the allocated chunks for reuse.
    pub fn clear(&mut self) {
        let used_chunks = self
            .tail_chunk
            .checked_add(1)
            .expect("bounded by the number of chunks");

        for chunk in self.chunks.iter_mut().take(used_chunks) {
            chunk.fill_with(|| None);
        }

        self.tail_chunk = 0;
        self.tail_offset = 0;
        self.len = 0;
    }

    fn advance_tail_chunk(&mut self) {
        self.tail_chunk = self
            .tail_chunk
            .checked_add(1)
            .expect("bounded by the number of chunks");
        self.tail_offset = 0;

        if self.tail_chunk == self.chunks.len() {
            self.chunks.push(empty_slots(self.chunk_length));

            tracing::debug!(
                chunk_length = self.chunk_length,
                chunk_count = self.chunks.len(),
                "linked new chunk to chunked stack"
            );
        }
    }

    #[cfg(test)]
    pub(crate) fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

impl<T> fmt::Debug for ChunkedStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkedStack")
            .field(
                "item_type",
                &std::format_args!("{}", std::any::type_name::<T>()),
            )
            .field("len", &self.len)
            .field("chunk_length", &self.chunk_length)
            .field("chunk_count", &self.chunks.len())
            .finish_non_exhaustive()
    }
}
