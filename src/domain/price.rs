//! Exchange rate between the pool's two tokens.

use core::fmt;

use super::SqrtPrice;
use crate::error::SimError;

/// Exchange rate quoted as *units of token Y per unit of token X*.
///
/// Wraps an `f64` value that must be finite and strictly positive — the
/// tick ladder `price = 1.0001^tick` never reaches zero, and every
/// downstream formula divides by a price or its square root.
///
/// # Examples
///
/// ```
/// use clmm_sim::domain::Price;
///
/// let price = Price::new(1.5);
/// assert!(price.is_ok());
/// assert!(Price::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(f64);

impl Price {
    /// Price ratio of 1:1.
    pub const ONE: Self = Self(1.0);

    /// Creates a new `Price` from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidPrice`] if the value is zero, negative,
    /// NaN, or infinite.
    pub fn new(value: f64) -> crate::error::Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(SimError::InvalidPrice(
                "price must be finite and strictly positive",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Returns the square root of this price as a [`SqrtPrice`].
    #[must_use]
    pub fn sqrt(&self) -> SqrtPrice {
        SqrtPrice::raw(self.0.sqrt())
    }

    /// Returns the dimensionless ratio `self / base`.
    ///
    /// This is the `k` parameter of the impermanent-loss formulas.
    #[must_use]
    pub fn ratio_over(&self, base: Self) -> f64 {
        self.0 / base.0
    }

    /// Scales this price by a percentage change.
    ///
    /// Returns `None` when the shifted price is no longer positive and
    /// finite (large negative steps on a curve grid).
    #[must_use]
    pub fn shifted_by_percent(&self, percent: f64) -> Option<Self> {
        let shifted = self.0 * (1.0 + percent / 100.0);
        Self::new(shifted).ok()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_valid() {
        let Ok(p) = Price::new(1.5) else {
            panic!("expected Ok");
        };
        assert!((p.get() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn new_zero_rejected() {
        assert!(Price::new(0.0).is_err());
    }

    #[test]
    fn new_negative_rejected() {
        assert!(Price::new(-1.0).is_err());
    }

    #[test]
    fn new_non_finite_rejected() {
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
        assert!(Price::new(f64::NEG_INFINITY).is_err());
    }

    // -- sqrt ---------------------------------------------------------------

    #[test]
    fn sqrt_of_four_is_two() {
        let Ok(p) = Price::new(4.0) else {
            panic!("expected Ok");
        };
        assert!((p.sqrt().get() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sqrt_of_one() {
        assert!((Price::ONE.sqrt().get() - 1.0).abs() < f64::EPSILON);
    }

    // -- ratio_over ---------------------------------------------------------

    #[test]
    fn ratio_over_base() {
        let (Ok(a), Ok(b)) = (Price::new(3.0), Price::new(2.0)) else {
            panic!("expected Ok");
        };
        assert!((a.ratio_over(b) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_over_self_is_one() {
        let Ok(p) = Price::new(123.456) else {
            panic!("expected Ok");
        };
        assert!((p.ratio_over(p) - 1.0).abs() < f64::EPSILON);
    }

    // -- shifted_by_percent -------------------------------------------------

    #[test]
    fn shift_up_fifty_percent() {
        let Ok(p) = Price::new(2.0) else {
            panic!("expected Ok");
        };
        let Some(shifted) = p.shifted_by_percent(50.0) else {
            panic!("expected Some");
        };
        assert!((shifted.get() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn shift_to_zero_is_none() {
        assert!(Price::ONE.shifted_by_percent(-100.0).is_none());
    }

    #[test]
    fn shift_below_zero_is_none() {
        assert!(Price::ONE.shifted_by_percent(-150.0).is_none());
    }

    // -- Display and ordering -----------------------------------------------

    #[test]
    fn display() {
        let Ok(p) = Price::new(1.5) else {
            panic!("expected Ok");
        };
        assert_eq!(format!("{p}"), "1.5");
    }

    #[test]
    fn ordering() {
        let (Ok(a), Ok(b)) = (Price::new(1.0), Price::new(2.0)) else {
            panic!("expected Ok");
        };
        assert!(a < b);
    }
}
