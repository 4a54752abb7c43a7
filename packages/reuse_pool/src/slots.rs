use std::iter;

use crate::Factory;

/// Fixed-length backing storage of an array-backed pool.
///
/// A slot is `Some` while it holds an instance ready to be dispensed and `None` otherwise. Slots
/// are emptied with [`Option::take()`] when an instance is dispensed, so the pool never keeps
/// hold of an instance that a caller owns.
pub(crate) type Slots<T> = Box<[Option<T>]>;

/// Allocates `len` empty slots.
#[must_use]
pub(crate) fn empty_slots<T>(len: usize) -> Slots<T> {
    iter::repeat_with(|| None).take(len).collect()
}

/// Fills every slot yielded by `slots` with a freshly manufactured instance.
pub(crate) fn preload<'a, T, F>(slots: impl Iterator<Item = &'a mut Option<T>>, factory: &mut F)
where
    T: 'a,
    F: Factory<T>,
{
    for slot in slots {
        *slot = Some(factory.new_instance());
    }
}

/// Moves every instance from `from` into the slots yielded by `into`, leaving `from` empty.
pub(crate) fn move_all<'a, T>(from: &mut [Option<T>], into: impl Iterator<Item = &'a mut Option<T>>)
where
    T: 'a,
{
    for (source, target) in from.iter_mut().zip(into) {
        *target = source.take();
    }
}
