use std::fmt;

use crate::Slots;

/// Holds on to backing buffers that a pool has outgrown, so that growing does not immediately
/// return memory to the allocator.
///
/// Every buffer placed here is already empty: the pool moves or dispenses all instances before
/// retiring a buffer. The ledger is the sole owner of its buffers until [`flush()`][Self::flush]
/// deallocates them. Nothing ever flushes the ledger implicitly.
pub(crate) struct RetiredBuffers<T> {
    buffers: Vec<Slots<T>>,
}

impl<T> RetiredBuffers<T> {
    pub(crate) fn new() -> Self {
        Self {
            buffers: Vec::new(),
        }
    }

    /// Takes ownership of a buffer that is no longer in use.
    pub(crate) fn retire(&mut self, buffer: Slots<T>) {
        debug_assert!(
            buffer.iter().all(Option::is_none),
            "a retired buffer must not hold any instances"
        );

        self.buffers.push(buffer);
    }

    /// Deallocates every retained buffer and returns how many there were.
    pub(crate) fn flush(&mut self) -> usize {
        let count = self.buffers.len();
        self.buffers.clear();

        tracing::debug!(released_buffers = count, "flushed retired pool buffers");

        count
    }

    #[cfg_attr(test, mutants::skip)] // Trivial accessor.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.buffers.len()
    }
}

impl<T> fmt::Debug for RetiredBuffers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetiredBuffers")
            .field("count", &self.buffers.len())
            .field(
                "total_slots",
                &self.buffers.iter().map(|b| b.len()).sum::<usize>(),
            )
            .finish()
    }
}
