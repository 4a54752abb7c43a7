use crate::Error;

/// The growth factor used by the array-backed pools unless configured otherwise.
pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;

/// A validated ratio by which an array-backed pool scales its capacity when it runs out of room.
///
/// Growth always makes progress: a new capacity is at least one slot bigger than the old one,
/// no matter how close to one the factor is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GrowthFactor(f64);

impl GrowthFactor {
    pub(crate) const DEFAULT: Self = Self(DEFAULT_GROWTH_FACTOR);

    /// The factor must be finite and strictly bigger than one.
    pub(crate) fn new(growth_factor: f64) -> crate::Result<Self> {
        if growth_factor.is_finite() && growth_factor > 1.0 {
            Ok(Self(growth_factor))
        } else {
            Err(Error::InvalidGrowthFactor { growth_factor })
        }
    }

    #[cfg_attr(test, mutants::skip)] // Trivial accessor.
    #[must_use]
    pub(crate) fn get(self) -> f64 {
        self.0
    }

    /// Calculates the capacity that replaces `capacity` during growth.
    ///
    /// This is `floor(factor * capacity)`, raised to `capacity + 1` if the product does not
    /// exceed the old capacity.
    #[must_use]
    pub(crate) fn grow(self, capacity: usize) -> usize {
        #[expect(
            clippy::cast_precision_loss,
            reason = "capacities that lose precision as f64 do not fit in memory anyway"
        )]
        let scaled = (capacity as f64 * self.0).floor();

        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "the product is non-negative and float-to-int casts saturate"
        )]
        let scaled = scaled as usize;

        let minimum = capacity
            .checked_add(1)
            .expect("a pool holding usize::MAX slots cannot exist, so this cannot overflow");

        scaled.max(minimum)
    }
}
