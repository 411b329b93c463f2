//! Trading fee rate of a pool.

use core::fmt;

use crate::error::SimError;

/// Basis-point denominator (10 000 = 100%).
const BPS_DENOMINATOR: f64 = 10_000.0;

/// A pool's trading fee as a decimal fraction of swap volume.
///
/// The snapshot feed delivers fee tiers as fractions (`0.003` = 0.30%).
/// Valid values lie in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use clmm_sim::domain::FeeRate;
///
/// let fee = FeeRate::new(0.003).expect("valid fee");
/// assert!((fee.as_percent() - 0.3).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeRate(f64);

impl FeeRate {
    /// 0.01% fee tier.
    pub const RATE_0_01_PERCENT: Self = Self(0.0001);

    /// 0.05% fee tier.
    pub const RATE_0_05_PERCENT: Self = Self(0.0005);

    /// 0.30% fee tier.
    pub const RATE_0_30_PERCENT: Self = Self(0.003);

    /// 1.00% fee tier.
    pub const RATE_1_00_PERCENT: Self = Self(0.01);

    /// Creates a new `FeeRate` from a decimal fraction.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the value is NaN,
    /// infinite, or outside `[0, 1]`.
    pub fn new(fraction: f64) -> crate::error::Result<Self> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(SimError::InvalidConfiguration(
                "fee rate must be a fraction within [0, 1]",
            ));
        }
        Ok(Self(fraction))
    }

    /// Creates a `FeeRate` from basis points (`30` = 0.30%).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `bps` exceeds
    /// 10 000 (100%).
    pub fn from_basis_points(bps: u32) -> crate::error::Result<Self> {
        if bps > 10_000 {
            return Err(SimError::InvalidConfiguration(
                "fee rate must not exceed 10000 basis points (100%)",
            ));
        }
        Ok(Self(f64::from(bps) / BPS_DENOMINATOR))
    }

    /// Returns the fee as a decimal fraction.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Returns the fee as a percentage (`0.003` → `0.3`).
    #[must_use]
    pub fn as_percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_valid_fraction() {
        let Ok(fee) = FeeRate::new(0.003) else {
            panic!("expected Ok");
        };
        assert!((fee.get() - 0.003).abs() < f64::EPSILON);
    }

    #[test]
    fn new_zero_is_valid() {
        assert!(FeeRate::new(0.0).is_ok());
    }

    #[test]
    fn new_one_is_valid() {
        assert!(FeeRate::new(1.0).is_ok());
    }

    #[test]
    fn new_above_one_rejected() {
        assert!(FeeRate::new(1.000_1).is_err());
    }

    #[test]
    fn new_negative_rejected() {
        assert!(FeeRate::new(-0.003).is_err());
    }

    #[test]
    fn new_non_finite_rejected() {
        assert!(FeeRate::new(f64::NAN).is_err());
        assert!(FeeRate::new(f64::INFINITY).is_err());
    }

    // -- from_basis_points --------------------------------------------------

    #[test]
    fn thirty_bps_is_standard_tier() {
        let Ok(fee) = FeeRate::from_basis_points(30) else {
            panic!("expected Ok");
        };
        assert_eq!(fee, FeeRate::RATE_0_30_PERCENT);
    }

    #[test]
    fn max_bps_is_full_fee() {
        let Ok(fee) = FeeRate::from_basis_points(10_000) else {
            panic!("expected Ok");
        };
        assert!((fee.get() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bps_above_max_rejected() {
        assert!(FeeRate::from_basis_points(10_001).is_err());
    }

    // -- Accessors and display ----------------------------------------------

    #[test]
    fn standard_tiers() {
        assert!((FeeRate::RATE_0_01_PERCENT.get() - 0.0001).abs() < f64::EPSILON);
        assert!((FeeRate::RATE_0_05_PERCENT.get() - 0.0005).abs() < f64::EPSILON);
        assert!((FeeRate::RATE_1_00_PERCENT.get() - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn as_percent() {
        assert!((FeeRate::RATE_0_30_PERCENT.as_percent() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", FeeRate::RATE_1_00_PERCENT), "1%");
    }
}
