/// Manufactures new instances for a pool whenever it has no spare instance to hand out.
///
/// Every closure or function of the form `FnMut() -> T` is a factory, so most callers never
/// implement this trait by hand:
///
/// ```
/// use reuse_pool::{ArrayPool, Factory};
///
/// // A function item works as a factory.
/// let mut pool = ArrayPool::new(String::new);
/// let s = pool.get();
/// assert!(s.is_empty());
///
/// // So does a closure that captures state.
/// let mut next_id = 0_u64;
/// let mut ids = move || {
///     next_id += 1;
///     next_id
/// };
/// assert_eq!(ids.new_instance(), 1);
/// assert_eq!(ids.new_instance(), 2);
/// ```
///
/// A factory may have side effects but must be safe to call any number of times.
pub trait Factory<T> {
    /// Creates a fresh, usable instance.
    fn new_instance(&mut self) -> T;
}

impl<T, F> Factory<T> for F
where
    F: FnMut() -> T,
{
    #[inline]
    fn new_instance(&mut self) -> T {
        self()
    }
}
