//! Monetary amounts in integer minor units.
//!
//! All prices and totals in the storefront are carried as whole minor units
//! (cents), keeping cart arithmetic exact. Serialises transparently as the
//! raw integer, which is also the wire representation used by the backend
//! contract.

use std::iter::Sum;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A monetary amount in minor units (cents).
///
/// # Examples
/// ```
/// use techzone_backend::domain::Money;
///
/// let unit_price = Money::from_minor(1_000);
/// assert_eq!(unit_price.times(2), Money::from_minor(2_000));
/// assert_eq!(unit_price.to_string(), "10.00");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64, example = 149_900)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Construct from minor units.
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// The underlying amount in minor units.
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Multiply by a line quantity, saturating on overflow.
    ///
    /// Quantities are small (bounded by available stock), so saturation is a
    /// guard rather than an expected path.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    /// True when the amount is exactly zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Money::from_minor(1_000), 2, Money::from_minor(2_000))]
    #[case(Money::ZERO, 10, Money::ZERO)]
    #[case(Money::from_minor(149_900), 3, Money::from_minor(449_700))]
    fn multiplies_by_quantity(#[case] price: Money, #[case] qty: u32, #[case] expected: Money) {
        assert_eq!(price.times(qty), expected);
    }

    #[test]
    fn sums_an_iterator_of_amounts() {
        let total: Money = [100, 250, 50].into_iter().map(Money::from_minor).sum();
        assert_eq!(total, Money::from_minor(400));
    }

    #[rstest]
    #[case(Money::from_minor(149_900), "1499.00")]
    #[case(Money::from_minor(5), "0.05")]
    #[case(Money::from_minor(-1_234), "-12.34")]
    fn formats_with_two_decimals(#[case] amount: Money, #[case] expected: &str) {
        assert_eq!(amount.to_string(), expected);
    }

    #[test]
    fn serialises_as_a_bare_integer() {
        let encoded = serde_json::to_string(&Money::from_minor(1_999)).expect("serialise");
        assert_eq!(encoded, "1999");
    }
}
