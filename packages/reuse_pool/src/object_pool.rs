/// The contract shared by every pool in this crate: dispense instances through
/// [`get()`][Self::get] and take them back through [`release()`][Self::release].
///
/// Use this trait to write code that is generic over the pool's growth strategy.
///
/// # Example
///
/// ```
/// use reuse_pool::{ArrayPool, LinkedPool, ObjectPool};
///
/// fn churn(pool: &mut impl ObjectPool<Vec<u8>>) -> usize {
///     let mut buffer = pool.get();
///     buffer.clear();
///     buffer.extend_from_slice(b"hello");
///     let len = buffer.len();
///     pool.release(buffer);
///     len
/// }
///
/// assert_eq!(churn(&mut ArrayPool::new(Vec::new)), 5);
/// assert_eq!(churn(&mut LinkedPool::new(Vec::new)), 5);
/// ```
///
/// # Thread safety
///
/// Pools are plain single-threaded data structures without any internal synchronization. If
/// several threads need pooled instances, give each thread its own pool.
pub trait ObjectPool<T> {
    /// Dispenses an instance from the pool.
    ///
    /// This never fails: if the pool holds no spare instance, a new one is manufactured by the
    /// pool's [factory][crate::Factory].
    #[must_use]
    fn get(&mut self) -> T;

    /// Returns an instance to the pool.
    ///
    /// The instance does not need to have come from this pool. The pool grows as needed to
    /// accommodate it. The pool does not reset the instance; callers that need a clean state
    /// reset it themselves.
    fn release(&mut self, item: T);
}
