use crate::Error;

/// The initial capacity used by every pool unless configured otherwise.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Validated initial size of a pool: how many slots to allocate up front and how many of them to
/// fill with freshly manufactured instances.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Sizing {
    pub(crate) initial_capacity: usize,
    pub(crate) preload_count: usize,
}

impl Sizing {
    /// The whole default capacity is preloaded.
    pub(crate) const DEFAULT: Self = Self {
        initial_capacity: DEFAULT_INITIAL_CAPACITY,
        preload_count: DEFAULT_INITIAL_CAPACITY,
    };

    /// If no preload count is given, the entire initial capacity is preloaded.
    pub(crate) fn new(
        initial_capacity: usize,
        preload_count: Option<usize>,
    ) -> crate::Result<Self> {
        let preload_count = preload_count.unwrap_or(initial_capacity);

        if preload_count > initial_capacity {
            return Err(Error::PreloadExceedsCapacity {
                preload_count,
                initial_capacity,
            });
        }

        Ok(Self {
            initial_capacity,
            preload_count,
        })
    }
}
