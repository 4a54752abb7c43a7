#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Object pools that let single-threaded hot paths reuse instances instead of allocating new ones.
//!
//! A pool hands out instances with `get()` and takes them back with `release()`. When the pool has
//! no spare instance, `get()` asks the pool's [`Factory`] for a new one, so `get()` never fails.
//! Any instance may be released, including ones that never came from the pool. All pools are
//! last-in-first-out: the most recently released instance is the next one dispensed.
//!
//! The crate offers five pools that differ in how they store spare instances and how they grow:
//!
//! | Pool | Storage | Growth |
//! |---|---|---|
//! | [`ArrayPool`] | one array, dispensing from the front | resizes on get and on release; retires the old array |
//! | [`StackPool`] | one array used as a stack | resizes on release only; retires the old array |
//! | [`SegmentedPool`] | chain of fixed-length segments | links a new segment; never copies |
//! | [`LinkedPool`] | [`ChunkedStack`] | links a new chunk; never copies |
//! | [`TieredPool`] | fixed array plus [`ChunkedStack`] overflow | array never grows; overflow links chunks |
//!
//! All pools implement [`ObjectPool`], so code can be generic over the storage strategy.
//!
//! # Outgrown arrays
//!
//! [`ArrayPool`] and [`StackPool`] do not deallocate an array they have outgrown. They keep it
//! until the owner calls `flush_retired()`, so the caller decides when deallocation happens.
//!
//! # Configuration
//!
//! Every pool has a `new(factory)` constructor with the default configuration and a
//! `builder(factory)` for customizing it. Invalid configurations are rejected with an [`Error`]
//! before any instance is created.
//!
//! ```
//! use reuse_pool::{ArrayPool, ObjectPool, StackPool};
//!
//! fn warm_up(pool: &mut impl ObjectPool<Vec<u8>>) {
//!     let buffer = pool.get();
//!     pool.release(buffer);
//! }
//!
//! let mut array_pool = ArrayPool::new(Vec::new);
//! let mut stack_pool = StackPool::builder(Vec::new)
//!     .initial_capacity(4)
//!     .growth_factor(1.5)
//!     .build()
//!     .unwrap();
//!
//! warm_up(&mut array_pool);
//! warm_up(&mut stack_pool);
//! ```
//!
//! # Thread safety
//!
//! The pools perform no synchronization. They can be moved to another thread if their contents and
//! factory can, but all operations require `&mut self`.

mod array_pool;
mod array_pool_builder;
mod chunked_stack;
mod error;
mod factory;
mod growth;
mod linked_pool;
mod linked_pool_builder;
mod object_pool;
mod retired;
mod segmented_pool;
mod segmented_pool_builder;
mod sizing;
mod slots;
mod stack_pool;
mod stack_pool_builder;
mod tiered_pool;
mod tiered_pool_builder;

pub use array_pool::*;
pub use array_pool_builder::*;
pub use chunked_stack::*;
pub use error::*;
pub use factory::*;
pub use growth::DEFAULT_GROWTH_FACTOR;
pub(crate) use growth::GrowthFactor;
pub use linked_pool::*;
pub use linked_pool_builder::*;
pub use object_pool::*;
pub(crate) use retired::*;
pub use segmented_pool::*;
pub use segmented_pool_builder::*;
pub use sizing::DEFAULT_INITIAL_CAPACITY;
pub(crate) use sizing::Sizing;
pub(crate) use slots::*;
pub use stack_pool::*;
pub use stack_pool_builder::*;
pub use tiered_pool::*;
pub use tiered_pool_builder::*;
