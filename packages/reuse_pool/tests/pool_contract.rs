//! Behavior that every pool shares, exercised through the public API only.

use std::rc::Rc;

use reuse_pool::{ArrayPool, Error, LinkedPool, ObjectPool, SegmentedPool, StackPool, TieredPool};
use testing::NumberFactory;

fn round_trip(pool: &mut impl ObjectPool<Rc<str>>) {
    let item = pool.get();
    let same = Rc::clone(&item);

    pool.release(item);
    let again = pool.get();

    assert!(Rc::ptr_eq(&same, &again));
}

#[test]
fn round_trip_returns_same_instance() {
    let factory = || Rc::<str>::from("pooled");

    round_trip(&mut ArrayPool::new(factory));
    round_trip(&mut StackPool::new(factory));
    round_trip(&mut SegmentedPool::new(factory));
    round_trip(&mut LinkedPool::new(factory));
    round_trip(&mut TieredPool::new(factory));
}

#[test]
fn empty_pools_manufacture_on_demand() {
    let numbers = NumberFactory::new();

    let mut array = ArrayPool::builder(numbers.factory())
        .initial_capacity(0)
        .build()
        .unwrap();
    let mut stack = StackPool::builder(numbers.factory())
        .initial_capacity(0)
        .build()
        .unwrap();
    let mut linked = LinkedPool::builder(numbers.factory())
        .initial_capacity(0)
        .build()
        .unwrap();
    let mut tiered = TieredPool::builder(numbers.factory())
        .initial_capacity(0)
        .build()
        .unwrap();

    assert_eq!(array.get(), 0);
    assert_eq!(stack.get(), 1);
    assert_eq!(linked.get(), 2);
    assert_eq!(tiered.get(), 3);
}

#[test]
fn array_pool_growth_is_precise() {
    let mut pool = ArrayPool::builder(String::new)
        .initial_capacity(2)
        .preload_count(2)
        .growth_factor(2.0)
        .build()
        .unwrap();

    _ = pool.get();
    _ = pool.get();
    assert_eq!(pool.capacity(), 2);

    _ = pool.get();
    assert_eq!(pool.capacity(), 4);
}

#[test]
fn stack_pool_is_lifo() {
    let mut pool = StackPool::builder(String::new)
        .initial_capacity(4)
        .preload_count(2)
        .build()
        .unwrap();

    pool.release("X".to_owned());
    pool.release("Y".to_owned());

    assert_eq!(pool.get(), "Y");
    assert_eq!(pool.get(), "X");
}

#[test]
fn segmented_pool_accepts_many_external_instances() {
    let mut pool = SegmentedPool::builder(String::new)
        .segment_length(2)
        .preload_count(2)
        .build()
        .unwrap();

    _ = pool.get();
    _ = pool.get();
    _ = pool.get();
    _ = pool.get();

    for i in 0..10 {
        pool.release(format!("external-{i}"));
    }

    for i in (0..10).rev() {
        assert_eq!(pool.get(), format!("external-{i}"));
    }
}

#[test]
fn invalid_configuration_creates_nothing() {
    let numbers = NumberFactory::new();

    let errors = [
        ArrayPool::builder(numbers.factory())
            .initial_capacity(1)
            .preload_count(2)
            .build()
            .unwrap_err(),
        StackPool::builder(numbers.factory())
            .initial_capacity(1)
            .preload_count(2)
            .build()
            .unwrap_err(),
        SegmentedPool::builder(numbers.factory())
            .segment_length(1)
            .preload_count(2)
            .build()
            .unwrap_err(),
        LinkedPool::builder(numbers.factory())
            .initial_capacity(1)
            .preload_count(2)
            .build()
            .unwrap_err(),
        TieredPool::builder(numbers.factory())
            .initial_capacity(1)
            .preload_count(2)
            .build()
            .unwrap_err(),
    ];

    for error in errors {
        assert_eq!(
            error,
            Error::PreloadExceedsCapacity {
                preload_count: 2,
                initial_capacity: 1
            }
        );
    }

    assert_eq!(numbers.created(), 0);
}

#[test]
fn flush_is_idempotent() {
    let mut array = ArrayPool::builder(String::new)
        .initial_capacity(1)
        .build()
        .unwrap();
    let mut stack = StackPool::builder(String::new)
        .initial_capacity(1)
        .build()
        .unwrap();

    for _ in 0..5 {
        array.release(String::new());
        stack.release(String::new());
    }

    assert!(array.flush_retired() > 0);
    assert_eq!(array.flush_retired(), 0);
    assert_eq!(array.retired_count(), 0);

    assert!(stack.flush_retired() > 0);
    assert_eq!(stack.flush_retired(), 0);
    assert_eq!(stack.retired_count(), 0);
}

#[test]
fn dropping_pools_drops_spares() {
    let item = Rc::new(());

    {
        let mut array = ArrayPool::builder(|| Rc::new(()))
            .initial_capacity(2)
            .build()
            .unwrap();
        let mut stack = StackPool::builder(|| Rc::new(()))
            .initial_capacity(2)
            .build()
            .unwrap();
        let mut segmented = SegmentedPool::builder(|| Rc::new(()))
            .segment_length(2)
            .build()
            .unwrap();
        let mut linked = LinkedPool::builder(|| Rc::new(()))
            .initial_capacity(2)
            .build()
            .unwrap();
        let mut tiered = TieredPool::builder(|| Rc::new(()))
            .initial_capacity(2)
            .build()
            .unwrap();

        for _ in 0..3 {
            array.release(Rc::clone(&item));
            stack.release(Rc::clone(&item));
            segmented.release(Rc::clone(&item));
            linked.release(Rc::clone(&item));
            tiered.release(Rc::clone(&item));
        }

        assert_eq!(Rc::strong_count(&item), 16);
    }

    assert_eq!(Rc::strong_count(&item), 1);
}
