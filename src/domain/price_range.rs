//! Price range of a concentrated position.

use core::fmt;

use super::{Price, Regime, SqrtPrice, Tick};
use crate::error::SimError;
use crate::math::{align_tick_to_spacing, price_at_tick, sqrt_price_x64_at_tick, tick_at_price};

/// The tick-bounded price range of a concentrated liquidity position.
///
/// Holds the tick boundaries together with their derived prices and sqrt
/// prices, all computed once through the fixed-point ladder at
/// construction. Invariants: `tick_lower < tick_upper`, hence
/// `0 < price_lower < price_upper`.
///
/// # Examples
///
/// ```
/// use clmm_sim::domain::{PriceRange, Tick};
///
/// let lower = Tick::new(-1000).expect("valid tick");
/// let upper = Tick::new(1000).expect("valid tick");
/// let range = PriceRange::new(lower, upper).expect("valid range");
/// assert!(range.price_lower().get() < range.price_upper().get());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceRange {
    tick_lower: Tick,
    tick_upper: Tick,
    sqrt_lower: SqrtPrice,
    sqrt_upper: SqrtPrice,
    price_lower: Price,
    price_upper: Price,
}

impl PriceRange {
    /// Creates a range from tick boundaries.
    ///
    /// Derived prices come from the Q64.64 ladder, so two ranges built
    /// from the same ticks are bit-identical on every platform.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRange`] if `tick_lower >= tick_upper`.
    pub fn new(tick_lower: Tick, tick_upper: Tick) -> crate::error::Result<Self> {
        if tick_lower.get() >= tick_upper.get() {
            return Err(SimError::InvalidRange(
                "lower tick must be below upper tick",
            ));
        }

        let sqrt_lower = sqrt_price_x64_at_tick(tick_lower)?.to_float();
        let sqrt_upper = sqrt_price_x64_at_tick(tick_upper)?.to_float();
        let price_lower = Price::new(sqrt_lower.square())?;
        let price_upper = Price::new(sqrt_upper.square())?;

        Ok(Self {
            tick_lower,
            tick_upper,
            sqrt_lower,
            sqrt_upper,
            price_lower,
            price_upper,
        })
    }

    /// Creates a range from price boundaries, widening outward to whole
    /// ticks (floor below, ceil above) so the requested span is always
    /// covered.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRange`] if `lower >= upper`, or
    /// [`SimError::InvalidTick`] if a boundary leaves the tick span.
    pub fn from_prices(lower: Price, upper: Price) -> crate::error::Result<Self> {
        if lower.get() >= upper.get() {
            return Err(SimError::InvalidRange(
                "lower price must be below upper price",
            ));
        }

        let tick_lower = tick_at_price(lower)?;
        let mut tick_upper = tick_at_price(upper)?;
        if price_at_tick(tick_upper)?.get() < upper.get() {
            tick_upper = tick_upper
                .checked_add(1)
                .ok_or(SimError::InvalidTick("upper price exceeds the tick span"))?;
        }

        Self::new(tick_lower, tick_upper)
    }

    /// Creates a range centered on `current` covering `width_ratio` of
    /// its price (e.g. `0.1` for ±5%), with boundaries aligned outward
    /// to the pool's tick spacing. The aligned range never narrows below
    /// the request.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidQuantity`] if `width_ratio` is not within
    ///   `(0, 2)`.
    /// - [`SimError::InvalidConfiguration`] if `spacing` is zero.
    /// - [`SimError::InvalidTick`] if an aligned boundary leaves the
    ///   tick span.
    pub fn centered(current: Price, width_ratio: f64, spacing: u16) -> crate::error::Result<Self> {
        if !width_ratio.is_finite() || width_ratio <= 0.0 || width_ratio >= 2.0 {
            return Err(SimError::InvalidQuantity(
                "width ratio must be within (0, 2)",
            ));
        }
        if spacing == 0 {
            return Err(SimError::InvalidConfiguration(
                "tick spacing must be greater than zero",
            ));
        }

        let half = width_ratio / 2.0;
        let lower = Price::new(current.get() * (1.0 - half))?;
        let upper = Price::new(current.get() * (1.0 + half))?;

        let tick_lower = align_tick_to_spacing(tick_at_price(lower)?, spacing, false)?;
        let mut raw_upper = tick_at_price(upper)?;
        if price_at_tick(raw_upper)?.get() < upper.get() {
            raw_upper = raw_upper
                .checked_add(1)
                .ok_or(SimError::InvalidTick("upper price exceeds the tick span"))?;
        }
        let tick_upper = align_tick_to_spacing(raw_upper, spacing, true)?;

        Self::new(tick_lower, tick_upper)
    }

    /// Returns the lower tick boundary.
    #[must_use]
    pub const fn tick_lower(&self) -> Tick {
        self.tick_lower
    }

    /// Returns the upper tick boundary.
    #[must_use]
    pub const fn tick_upper(&self) -> Tick {
        self.tick_upper
    }

    /// Returns the derived lower price.
    #[must_use]
    pub const fn price_lower(&self) -> Price {
        self.price_lower
    }

    /// Returns the derived upper price.
    #[must_use]
    pub const fn price_upper(&self) -> Price {
        self.price_upper
    }

    /// Returns the sqrt price at the lower boundary.
    #[must_use]
    pub const fn sqrt_price_lower(&self) -> SqrtPrice {
        self.sqrt_lower
    }

    /// Returns the sqrt price at the upper boundary.
    #[must_use]
    pub const fn sqrt_price_upper(&self) -> SqrtPrice {
        self.sqrt_upper
    }

    /// Price width of the range relative to its mid price.
    ///
    /// A ±5% range has a width ratio of roughly `0.1`; capital
    /// efficiency is approximately its inverse.
    #[must_use]
    pub fn width_ratio(&self) -> f64 {
        let mid = (self.price_lower.get() + self.price_upper.get()) / 2.0;
        (self.price_upper.get() - self.price_lower.get()) / mid
    }

    /// Returns `true` if `price` lies strictly inside the range.
    #[must_use]
    pub fn contains_price(&self, price: Price) -> bool {
        self.regime_of_price(price).is_in_range()
    }

    /// Classifies a price against this range.
    #[must_use]
    pub fn regime_of_price(&self, price: Price) -> Regime {
        Regime::classify(price.sqrt(), self.sqrt_lower, self.sqrt_upper)
    }

    /// Relative position of a price within the range: `0` at the lower
    /// bound, `1` at the upper, clamped outside.
    #[must_use]
    pub fn relative_position(&self, price: Price) -> f64 {
        let span = self.price_upper.get() - self.price_lower.get();
        ((price.get() - self.price_lower.get()) / span).clamp(0.0, 1.0)
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PriceRange([{}, {}], ticks [{}, {}])",
            self.price_lower, self.price_upper, self.tick_lower, self.tick_upper
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tick(v: i32) -> Tick {
        let Ok(t) = Tick::new(v) else {
            panic!("valid tick expected");
        };
        t
    }

    fn price(v: f64) -> Price {
        let Ok(p) = Price::new(v) else {
            panic!("valid price expected");
        };
        p
    }

    fn range(lower: i32, upper: i32) -> PriceRange {
        let Ok(r) = PriceRange::new(tick(lower), tick(upper)) else {
            panic!("valid range expected");
        };
        r
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn valid_range() {
        let r = range(-1_000, 1_000);
        assert_eq!(r.tick_lower().get(), -1_000);
        assert_eq!(r.tick_upper().get(), 1_000);
    }

    #[test]
    fn equal_ticks_rejected() {
        assert!(PriceRange::new(tick(0), tick(0)).is_err());
    }

    #[test]
    fn inverted_ticks_rejected() {
        assert!(PriceRange::new(tick(100), tick(-100)).is_err());
    }

    #[test]
    fn derived_prices_ordered_and_positive() {
        let r = range(-2_000, 3_000);
        assert!(r.price_lower().get() > 0.0);
        assert!(r.price_lower().get() < r.price_upper().get());
    }

    #[test]
    fn derived_prices_match_tick_ladder() {
        let r = range(-1_000, 1_000);
        let expected_lower = 1.0001f64.powi(-1_000);
        let expected_upper = 1.0001f64.powi(1_000);
        assert!((r.price_lower().get() - expected_lower).abs() / expected_lower < 1e-9);
        assert!((r.price_upper().get() - expected_upper).abs() / expected_upper < 1e-9);
    }

    // -- from_prices --------------------------------------------------------

    #[test]
    fn from_prices_covers_request() {
        let Ok(r) = PriceRange::from_prices(price(0.9), price(1.1)) else {
            panic!("expected Ok");
        };
        assert!(r.price_lower().get() <= 0.9);
        assert!(r.price_upper().get() >= 1.1);
    }

    #[test]
    fn from_prices_inverted_rejected() {
        assert!(PriceRange::from_prices(price(1.1), price(0.9)).is_err());
        assert!(PriceRange::from_prices(price(1.0), price(1.0)).is_err());
    }

    #[test]
    fn from_prices_narrow_span_still_non_empty() {
        let Ok(r) = PriceRange::from_prices(price(1.000_01), price(1.000_04)) else {
            panic!("expected Ok");
        };
        assert!(r.tick_lower() < r.tick_upper());
    }

    // -- centered -----------------------------------------------------------

    #[test]
    fn centered_contains_current_price() {
        let Ok(r) = PriceRange::centered(price(1.0), 0.1, 10) else {
            panic!("expected Ok");
        };
        assert!(r.contains_price(price(1.0)));
    }

    #[test]
    fn centered_never_narrows_request() {
        let Ok(r) = PriceRange::centered(price(2.0), 0.2, 60) else {
            panic!("expected Ok");
        };
        assert!(r.price_lower().get() <= 2.0 * 0.9);
        assert!(r.price_upper().get() >= 2.0 * 1.1);
    }

    #[test]
    fn centered_boundaries_aligned() {
        let Ok(r) = PriceRange::centered(price(1.0), 0.1, 60) else {
            panic!("expected Ok");
        };
        assert!(r.tick_lower().is_aligned(60));
        assert!(r.tick_upper().is_aligned(60));
    }

    #[test]
    fn centered_rejects_bad_width() {
        assert!(PriceRange::centered(price(1.0), 0.0, 10).is_err());
        assert!(PriceRange::centered(price(1.0), 2.0, 10).is_err());
        assert!(PriceRange::centered(price(1.0), f64::NAN, 10).is_err());
    }

    #[test]
    fn centered_rejects_zero_spacing() {
        assert!(PriceRange::centered(price(1.0), 0.1, 0).is_err());
    }

    // -- width_ratio --------------------------------------------------------

    #[test]
    fn width_ratio_of_symmetric_range() {
        let Ok(r) = PriceRange::from_prices(price(0.95), price(1.05)) else {
            panic!("expected Ok");
        };
        assert!((r.width_ratio() - 0.1).abs() < 0.01);
    }

    #[test]
    fn wider_range_has_larger_ratio() {
        let narrow = range(-100, 100);
        let wide = range(-1_000, 1_000);
        assert!(wide.width_ratio() > narrow.width_ratio());
    }

    // -- Regime and position ------------------------------------------------

    #[test]
    fn regime_classification() {
        let r = range(-1_000, 1_000);
        assert_eq!(r.regime_of_price(price(1.0)), Regime::InRange);
        assert_eq!(r.regime_of_price(price(0.5)), Regime::BelowRange);
        assert_eq!(r.regime_of_price(price(2.0)), Regime::AboveRange);
    }

    #[test]
    fn contains_price_excludes_outside() {
        let r = range(-1_000, 1_000);
        assert!(r.contains_price(price(1.0)));
        assert!(!r.contains_price(price(2.0)));
    }

    #[test]
    fn relative_position_spans_zero_to_one() {
        let r = range(-1_000, 1_000);
        assert!(r.relative_position(r.price_lower()).abs() < 1e-12);
        assert!((r.relative_position(r.price_upper()) - 1.0).abs() < 1e-12);
        assert!(r.relative_position(price(0.0001)) == 0.0);
        assert!(r.relative_position(price(100.0)) == 1.0);
    }

    // -- Display ------------------------------------------------------------

    #[test]
    fn display_mentions_ticks() {
        let r = range(-100, 100);
        let s = format!("{r}");
        assert!(s.contains("Tick(-100)"));
        assert!(s.contains("Tick(100)"));
    }
}
