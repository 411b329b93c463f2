//! Square-root price representations.
//!
//! Two forms coexist:
//!
//! - [`SqrtPriceX64`] — Q64.64 unsigned fixed point, `sqrt(price) * 2^64`.
//!   This is the reproducible, platform-independent representation used
//!   by the tick ladder; conversions to and from ticks are exact and
//!   monotonic.
//! - [`SqrtPrice`] — a positive finite `f64`, the working form consumed
//!   by the position amount formulas once precision-critical conversions
//!   are behind us.

use core::fmt;

use crate::error::SimError;

/// `2^64` as `f64`, the Q64.64 scale factor.
const Q64_SCALE: f64 = 18_446_744_073_709_551_616.0;

/// Q64.64 sqrt price at [`Tick::MIN`](super::Tick::MIN) (`-443636`).
const MIN_SQRT_PRICE_X64: u128 = 4_295_048_016;

/// Q64.64 sqrt price at [`Tick::MAX`](super::Tick::MAX) (`443636`).
const MAX_SQRT_PRICE_X64: u128 = 79_226_673_515_401_279_963_822_778_343;

/// A square-root price in Q64.64 unsigned fixed point.
///
/// Encodes `sqrt(price) * 2^64`. The valid span mirrors the tick range:
/// [`MIN`](Self::MIN) at tick `-443636` up to [`MAX`](Self::MAX) at tick
/// `443636`. Within that span every value fits comfortably in `u128`.
///
/// # Examples
///
/// ```
/// use clmm_sim::domain::SqrtPriceX64;
///
/// // sqrt(1.0) in Q64.64 is exactly 2^64.
/// assert_eq!(SqrtPriceX64::ONE.get(), 1u128 << 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SqrtPriceX64(u128);

impl SqrtPriceX64 {
    /// Smallest encodable sqrt price (tick `-443636`).
    pub const MIN: Self = Self(MIN_SQRT_PRICE_X64);

    /// Largest encodable sqrt price (tick `443636`).
    pub const MAX: Self = Self(MAX_SQRT_PRICE_X64);

    /// `sqrt(1.0) * 2^64`, the sqrt price at tick zero.
    pub const ONE: Self = Self(1u128 << 64);

    /// Creates a new `SqrtPriceX64` with range validation.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidPrice`] if `value` is outside
    /// `[MIN, MAX]`.
    pub const fn new(value: u128) -> crate::error::Result<Self> {
        if value < MIN_SQRT_PRICE_X64 || value > MAX_SQRT_PRICE_X64 {
            return Err(SimError::InvalidPrice(
                "sqrt price outside the Q64.64 representable span",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw Q64.64 integer.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Converts to the floating working form, `raw / 2^64`.
    #[must_use]
    pub fn to_float(&self) -> SqrtPrice {
        #[allow(clippy::cast_precision_loss)]
        SqrtPrice::raw(self.0 as f64 / Q64_SCALE)
    }
}

impl fmt::Display for SqrtPriceX64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SqrtPriceX64({})", self.0)
    }
}

/// A square-root price as a positive finite float.
///
/// The amount calculator works in this form: in-range token amounts are
/// linear in `sqrt(price)` and `1/sqrt(price)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SqrtPrice(f64);

impl SqrtPrice {
    /// `sqrt(1.0)`.
    pub const ONE: Self = Self(1.0);

    /// Creates a new `SqrtPrice` from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidPrice`] if the value is zero, negative,
    /// NaN, or infinite.
    pub fn new(value: f64) -> crate::error::Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(SimError::InvalidPrice(
                "sqrt price must be finite and strictly positive",
            ));
        }
        Ok(Self(value))
    }

    /// Crate-internal constructor for values already known positive and
    /// finite (square roots of validated prices, scaled Q64.64 values).
    pub(crate) const fn raw(value: f64) -> Self {
        Self(value)
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Squares back to a plain price value.
    #[must_use]
    pub fn square(&self) -> f64 {
        self.0 * self.0
    }
}

impl fmt::Display for SqrtPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
