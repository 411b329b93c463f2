//! Immutable market snapshot consumed by every simulation.

use crate::domain::{Decimals, FeeRate, Price, Tick};
use crate::error::SimError;

/// A complete, validated snapshot of the pool the position lives in.
///
/// The surrounding system fetches and normalizes live pool data on its
/// own asynchronous path; the simulator is only ever invoked with a
/// fully populated snapshot and never re-entered with partial input.
///
/// TVL, volume, and reward figures of `0.0` mean "unknown": yield
/// outputs degrade to zero instead of erroring.
///
/// # Validation
///
/// - `tick_spacing` must be greater than zero.
/// - USD figures must be finite and non-negative.
/// - Price, fee rate, and decimals are validated at their own
///   construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolSnapshot {
    current_price: Price,
    fee_rate: FeeRate,
    tick_spacing: u16,
    decimals_x: Decimals,
    decimals_y: Decimals,
    tvl_usd: f64,
    daily_volume_usd: f64,
    daily_rewards_usd: f64,
}

impl PoolSnapshot {
    /// Creates a new snapshot.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidConfiguration`] if `tick_spacing` is zero.
    /// - [`SimError::InvalidQuantity`] if a USD figure is negative, NaN,
    ///   or infinite.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        current_price: Price,
        fee_rate: FeeRate,
        tick_spacing: u16,
        decimals_x: Decimals,
        decimals_y: Decimals,
        tvl_usd: f64,
        daily_volume_usd: f64,
        daily_rewards_usd: f64,
    ) -> crate::error::Result<Self> {
        let snapshot = Self {
            current_price,
            fee_rate,
            tick_spacing,
            decimals_x,
            decimals_y,
            tvl_usd,
            daily_volume_usd,
            daily_rewards_usd,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Validates all snapshot invariants.
    ///
    /// # Errors
    ///
    /// See [`PoolSnapshot::new`].
    pub fn validate(&self) -> crate::error::Result<()> {
        if !Tick::spacing_is_valid(self.tick_spacing) {
            return Err(SimError::InvalidConfiguration(
                "tick spacing must be greater than zero",
            ));
        }
        for figure in [self.tvl_usd, self.daily_volume_usd, self.daily_rewards_usd] {
            if !figure.is_finite() || figure < 0.0 {
                return Err(SimError::InvalidQuantity(
                    "TVL, volume, and reward figures must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }

    /// Returns the current pool price (Y per X).
    #[must_use]
    pub const fn current_price(&self) -> Price {
        self.current_price
    }

    /// Returns the pool's fee rate.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Returns the tick spacing of the pool's fee tier.
    #[must_use]
    pub const fn tick_spacing(&self) -> u16 {
        self.tick_spacing
    }

    /// Returns the decimals of token X.
    #[must_use]
    pub const fn decimals_x(&self) -> Decimals {
        self.decimals_x
    }

    /// Returns the decimals of token Y.
    #[must_use]
    pub const fn decimals_y(&self) -> Decimals {
        self.decimals_y
    }

    /// Returns the pool's total value locked in USD (`0.0` = unknown).
    #[must_use]
    pub const fn tvl_usd(&self) -> f64 {
        self.tvl_usd
    }

    /// Returns the pool's daily trade volume in USD (`0.0` = unknown).
    #[must_use]
    pub const fn daily_volume_usd(&self) -> f64 {
        self.daily_volume_usd
    }

    /// Returns the pool's daily mining-reward emission in USD
    /// (`0.0` = none or unknown).
    #[must_use]
    pub const fn daily_rewards_usd(&self) -> f64 {
        self.daily_rewards_usd
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

    fn decimals(v: u8) -> Decimals {
        let Ok(d) = Decimals::new(v) else {
            panic!("valid decimals expected");
        };
        d
    }

    fn valid_snapshot() -> PoolSnapshot {
        let Ok(s) = PoolSnapshot::new(
            price(1.0),
            FeeRate::RATE_0_30_PERCENT,
            10,
            decimals(6),
            decimals(18),
            1_000_000.0,
            10_000.0,
            0.0,
        ) else {
            panic!("expected Ok");
        };
        s
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn valid_snapshot_accepted() {
        let s = valid_snapshot();
        assert!(s.validate().is_ok());
    }

    #[test]
    fn zero_tvl_and_volume_are_valid_unknowns() {
        let result = PoolSnapshot::new(
            price(1.0),
            FeeRate::RATE_0_30_PERCENT,
            60,
            decimals(6),
            decimals(6),
            0.0,
            0.0,
            0.0,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn zero_tick_spacing_rejected() {
        let result = PoolSnapshot::new(
            price(1.0),
            FeeRate::RATE_0_30_PERCENT,
            0,
            decimals(6),
            decimals(18),
            0.0,
            0.0,
            0.0,
        );
        assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
    }

    #[test]
    fn negative_tvl_rejected() {
        let result = PoolSnapshot::new(
            price(1.0),
            FeeRate::RATE_0_30_PERCENT,
            10,
            decimals(6),
            decimals(18),
            -1.0,
            0.0,
            0.0,
        );
        assert!(matches!(result, Err(SimError::InvalidQuantity(_))));
    }

    #[test]
    fn non_finite_volume_rejected() {
        let result = PoolSnapshot::new(
            price(1.0),
            FeeRate::RATE_0_30_PERCENT,
            10,
            decimals(6),
            decimals(18),
            0.0,
            f64::NAN,
            0.0,
        );
        assert!(matches!(result, Err(SimError::InvalidQuantity(_))));
    }

    // -- Accessors ----------------------------------------------------------

    #[test]
    fn accessors() {
        let s = valid_snapshot();
        assert_eq!(s.current_price(), price(1.0));
        assert_eq!(s.fee_rate(), FeeRate::RATE_0_30_PERCENT);
        assert_eq!(s.tick_spacing(), 10);
        assert_eq!(s.decimals_x().get(), 6);
        assert_eq!(s.decimals_y().get(), 18);
        assert!((s.tvl_usd() - 1_000_000.0).abs() < f64::EPSILON);
        assert!((s.daily_volume_usd() - 10_000.0).abs() < f64::EPSILON);
        assert!(s.daily_rewards_usd().abs() < f64::EPSILON);
    }

    #[test]
    fn copy_and_equality() {
        let a = valid_snapshot();
        let b = a;
        assert_eq!(a, b);
    }
}
