#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))] // This is all test code, no need to test it.

//! Private helpers for testing and benchmarking the object pools.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Hands out factories that produce consecutive numbers and remembers how many numbers all of
/// them have produced.
///
/// Pools under test own their factory, so the counter is shared between this value and every
/// factory created from it. The first number produced is 0.
///
/// # Example
///
/// ```rust
/// use testing::NumberFactory;
///
/// let numbers = NumberFactory::new();
/// let mut factory = numbers.factory();
///
/// assert_eq!(factory(), 0);
/// assert_eq!(factory(), 1);
/// assert_eq!(numbers.created(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct NumberFactory {
    next: Rc<Cell<u64>>,
}

impl NumberFactory {
    /// Creates a counter that starts at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many numbers the factories have produced so far.
    #[must_use]
    pub fn created(&self) -> u64 {
        self.next.get()
    }

    /// Returns a factory closure that produces the next number every time it is called.
    pub fn factory(&self) -> impl FnMut() -> u64 + use<> {
        let next = Rc::clone(&self.next);

        move || {
            let number = next.get();
            next.set(number.checked_add(1).expect("test never creates u64::MAX numbers"));
            number
        }
    }
}

/// Runs a test with a timeout so that a pool bug that causes an endless loop fails the test
/// instead of hanging the build.
///
/// The timeout is 10 seconds, or 60 seconds under Miri.
///
/// When the `MUTATION_TESTING` environment variable is set to "1", the watchdog is disabled and
/// the test function is executed directly, so that mutation testing can detect hanging mutations.
///
/// # Panics
///
/// Panics if the test exceeds the timeout (when not in mutation testing mode).
///
/// # Example
///
/// ```rust
/// use testing::with_watchdog;
///
/// let sum = with_watchdog(|| (0..100_u32).sum::<u32>());
/// assert_eq!(sum, 4950);
/// ```
pub fn with_watchdog<F, R>(test_fn: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    if std::env::var("MUTATION_TESTING").as_deref() == Ok("1") {
        return test_fn();
    }

    let timeout = if cfg!(miri) {
        Duration::from_secs(60)
    } else {
        Duration::from_secs(10)
    };

    let (tx, rx) = mpsc::channel();

    let test_handle = thread::spawn(move || {
        // If this fails, the receiver has already timed out.
        drop(tx.send(test_fn()));
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => {
            test_handle.join().expect("test thread sent its result before exiting");
            result
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            panic!("test exceeded {} second timeout", timeout.as_secs());
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => match test_handle.join() {
            Ok(()) => panic!("test thread disconnected without sending a result"),
            Err(e) => std::panic::resume_unwind(e),
        },
    }
}

/// Calculates the difference between two f64 values and considers
/// them equal if the difference is not more than `close_enough`.
///
/// This is a "correctly performed" floating point equality comparison.
#[must_use]
pub fn f64_diff_abs(a: f64, b: f64, close_enough: f64) -> f64 {
    let diff = (a - b).abs();

    if diff <= close_enough { 0.0 } else { diff }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn factories_share_counter() {
        let numbers = NumberFactory::new();
        let mut first = numbers.factory();
        let mut second = numbers.factory();

        assert_eq!(first(), 0);
        assert_eq!(second(), 1);
        assert_eq!(first(), 2);
        assert_eq!(numbers.created(), 3);
    }

    #[test]
    fn watchdog_returns_result() {
        assert_eq!(with_watchdog(|| "hello world"), "hello world");
    }

    #[test]
    fn close_values_have_no_difference() {
        assert_eq!(f64_diff_abs(1.0, 1.000_01, 0.001), 0.0);
        assert!(f64_diff_abs(1.0, 2.0, 0.001) > 0.5);
    }
}
