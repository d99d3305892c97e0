//! Type-safe price representation using decimal arithmetic.
//!
//! The backend serializes prices as plain JSON numbers (rubles, two decimal
//! places at most), so `Price` is `#[serde(transparent)]` over a
//! [`rust_decimal::Decimal`] deserialized with the `serde-float` feature.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the store's display currency (rubles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from whole rubles.
    #[must_use]
    pub fn from_rubles(rubles: i64) -> Self {
        Self(Decimal::from(rubles))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price multiplied by a quantity (for order line totals).
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Sum of two prices.
    #[must_use]
    pub fn plus(&self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Matches the backend's order summary formatting ("1234.50 ₽")
        write!(f, "{:.2} ₽", self.0)
    }
}
