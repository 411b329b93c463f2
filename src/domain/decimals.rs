//! Token decimal places.

use crate::error::SimError;

/// Maximum allowed decimal places (EVM standard).
const MAX_DECIMALS: u8 = 18;

/// Number of decimal places of an on-chain token amount.
///
/// Used only at the boundary to scale raw integer amounts into the token
/// units the simulator works in; the core arithmetic is decimals-agnostic
/// once amounts are in token units. Valid range is `0..=18`.
///
/// # Examples
///
/// ```
/// use clmm_sim::domain::Decimals;
///
/// let usdc = Decimals::new(6).expect("6 is valid");
/// assert!((usdc.to_token_units(1_500_000) - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decimals(u8);

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Maximum standard decimal places (18).
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `value` exceeds 18.
    pub const fn new(value: u8) -> crate::error::Result<Self> {
        if value > MAX_DECIMALS {
            return Err(SimError::InvalidConfiguration("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Scales a raw on-chain integer amount into token units.
    ///
    /// With `decimals = 6`, a raw amount of `1_500_000` yields `1.5`.
    #[must_use]
    pub fn to_token_units(&self, raw: u128) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let value = raw as f64;
        value / self.factor()
    }

    /// Scales a token-unit amount back to a raw on-chain integer,
    /// truncating fractional dust.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidQuantity`] if `units` is negative or
    /// non-finite.
    pub fn to_raw(&self, units: f64) -> crate::error::Result<u128> {
        if !units.is_finite() || units < 0.0 {
            return Err(SimError::InvalidQuantity(
                "token units must be finite and non-negative",
            ));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok((units * self.factor()) as u128)
    }

    /// Returns `10^decimals` as `f64`.
    fn factor(&self) -> f64 {
        10f64.powi(i32::from(self.0))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_common_values() {
        for v in [0u8, 6, 8, 18] {
            assert!(Decimals::new(v).is_ok());
        }
    }

    #[test]
    fn invalid_above_max() {
        assert!(Decimals::new(19).is_err());
        assert!(Decimals::new(u8::MAX).is_err());
    }

    #[test]
    fn constants() {
        assert_eq!(Decimals::ZERO.get(), 0);
        assert_eq!(Decimals::MAX.get(), 18);
        assert_eq!(Decimals::default(), Decimals::ZERO);
    }

    // -- to_token_units -----------------------------------------------------

    #[test]
    fn scales_usdc_raw_amount() {
        let Ok(d) = Decimals::new(6) else {
            panic!("expected Ok");
        };
        assert!((d.to_token_units(1_500_000) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn zero_decimals_is_identity() {
        assert!((Decimals::ZERO.to_token_units(42) - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn eighteen_decimals() {
        let one_eth_raw = 1_000_000_000_000_000_000u128;
        assert!((Decimals::MAX.to_token_units(one_eth_raw) - 1.0).abs() < 1e-12);
    }

    // -- to_raw -------------------------------------------------------------

    #[test]
    fn raw_round_trip() {
        let Ok(d) = Decimals::new(8) else {
            panic!("expected Ok");
        };
        let Ok(raw) = d.to_raw(2.5) else {
            panic!("expected Ok");
        };
        assert_eq!(raw, 250_000_000);
        assert!((d.to_token_units(raw) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn raw_truncates_dust() {
        let Ok(d) = Decimals::new(2) else {
            panic!("expected Ok");
        };
        assert_eq!(d.to_raw(1.239), Ok(123));
    }

    #[test]
    fn raw_rejects_negative() {
        let Ok(d) = Decimals::new(6) else {
            panic!("expected Ok");
        };
        assert!(d.to_raw(-1.0).is_err());
        assert!(d.to_raw(f64::NAN).is_err());
    }
}
