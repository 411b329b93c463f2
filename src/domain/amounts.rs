//! Token composition of a position.

use core::fmt;

use super::Price;
use crate::error::SimError;

/// A pair of token amounts in token units.
///
/// Follows the crate-wide convention: price = units of token Y per unit
/// of token X, so Y is the quote and a position's value in quote units
/// is `amount_x * price + amount_y`.
///
/// # Examples
///
/// ```
/// use clmm_sim::domain::{Price, TokenAmounts};
///
/// let amounts = TokenAmounts::new(2.0, 1.0).expect("valid amounts");
/// let price = Price::new(3.0).expect("valid price");
/// assert!((amounts.value_at(price) - 7.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenAmounts {
    amount_x: f64,
    amount_y: f64,
}

impl TokenAmounts {
    /// Empty composition.
    pub const ZERO: Self = Self {
        amount_x: 0.0,
        amount_y: 0.0,
    };

    /// Creates a new `TokenAmounts` pair.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidQuantity`] if either amount is
    /// negative, NaN, or infinite.
    pub fn new(amount_x: f64, amount_y: f64) -> crate::error::Result<Self> {
        if !amount_x.is_finite() || amount_x < 0.0 || !amount_y.is_finite() || amount_y < 0.0 {
            return Err(SimError::InvalidQuantity(
                "token amounts must be finite and non-negative",
            ));
        }
        Ok(Self { amount_x, amount_y })
    }

    /// A single-sided deposit of token X.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidQuantity`] on a negative or non-finite
    /// amount.
    pub fn only_x(amount_x: f64) -> crate::error::Result<Self> {
        Self::new(amount_x, 0.0)
    }

    /// A single-sided deposit of token Y.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidQuantity`] on a negative or non-finite
    /// amount.
    pub fn only_y(amount_y: f64) -> crate::error::Result<Self> {
        Self::new(0.0, amount_y)
    }

    /// Returns the amount of token X.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.amount_x
    }

    /// Returns the amount of token Y.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.amount_y
    }

    /// Value of this composition in quote (Y) units at the given price.
    #[must_use]
    pub fn value_at(&self, price: Price) -> f64 {
        self.amount_x * price.get() + self.amount_y
    }

    /// Returns `true` if both amounts are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount_x == 0.0 && self.amount_y == 0.0
    }
}

impl fmt::Display for TokenAmounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {}, y: {})", self.amount_x, self.amount_y)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn price(v: f64) -> Price {
        let Ok(p) = Price::new(v) else {
            panic!("valid price expected");
        };
        p
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_valid() {
        let Ok(a) = TokenAmounts::new(1.0, 2.0) else {
            panic!("expected Ok");
        };
        assert!((a.x() - 1.0).abs() < f64::EPSILON);
        assert!((a.y() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_zero_is_valid() {
        let Ok(a) = TokenAmounts::new(0.0, 0.0) else {
            panic!("expected Ok");
        };
        assert!(a.is_zero());
    }

    #[test]
    fn new_negative_rejected() {
        assert!(TokenAmounts::new(-1.0, 0.0).is_err());
        assert!(TokenAmounts::new(0.0, -1.0).is_err());
    }

    #[test]
    fn new_non_finite_rejected() {
        assert!(TokenAmounts::new(f64::NAN, 0.0).is_err());
        assert!(TokenAmounts::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn single_sided_constructors() {
        let (Ok(x), Ok(y)) = (TokenAmounts::only_x(5.0), TokenAmounts::only_y(7.0)) else {
            panic!("expected Ok");
        };
        assert!((x.x() - 5.0).abs() < f64::EPSILON && x.y() == 0.0);
        assert!((y.y() - 7.0).abs() < f64::EPSILON && y.x() == 0.0);
    }

    // -- value_at -----------------------------------------------------------

    #[test]
    fn value_weighs_x_by_price() {
        let Ok(a) = TokenAmounts::new(2.0, 1.0) else {
            panic!("expected Ok");
        };
        assert!((a.value_at(price(3.0)) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn value_of_zero_is_zero() {
        assert!(TokenAmounts::ZERO.value_at(price(123.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn value_of_pure_quote_ignores_price() {
        let Ok(a) = TokenAmounts::only_y(10.0) else {
            panic!("expected Ok");
        };
        assert!((a.value_at(price(0.5)) - 10.0).abs() < f64::EPSILON);
        assert!((a.value_at(price(50.0)) - 10.0).abs() < f64::EPSILON);
    }

    // -- Display ------------------------------------------------------------

    #[test]
    fn display() {
        let Ok(a) = TokenAmounts::new(1.5, 2.5) else {
            panic!("expected Ok");
        };
        assert_eq!(format!("{a}"), "(x: 1.5, y: 2.5)");
    }
}
