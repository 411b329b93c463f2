//! Fee-derived yield estimation.
//!
//! A concentrated position's fee share is its TVL share boosted by
//! capital efficiency — the inverse of its range width — capped so a
//! position can never claim more than the whole pool's fees. Earned fees
//! are split between the protocol and the LP, and the LP's daily take is
//! compounded to an APY.

use core::fmt;

use crate::domain::FeeRate;
use crate::error::SimError;

/// Cap on the capital-efficiency multiplier; bounds the blow-up of
/// pathologically narrow ranges.
const CAPITAL_EFFICIENCY_CAP: f64 = 100.0;

/// Ceiling on reported APY, in percent. Near-zero-denominator inputs
/// would otherwise compound to meaningless numbers.
const MAX_APY_PERCENT: f64 = 1_000_000.0;

/// Compounding periods per year.
const DAYS_PER_YEAR: f64 = 365.0;

/// Protocol/LP split of earned trading fees.
///
/// The protocol retains a fixed fraction of every fee; the LP receives
/// the remainder. Defaults to a 20% protocol share.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeSplit(f64);

impl FeeSplit {
    /// Creates a split where the protocol retains `protocol_share`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the share is NaN,
    /// infinite, or outside `[0, 1]`.
    pub fn new(protocol_share: f64) -> crate::error::Result<Self> {
        if !protocol_share.is_finite() || !(0.0..=1.0).contains(&protocol_share) {
            return Err(SimError::InvalidConfiguration(
                "protocol fee share must be a fraction within [0, 1]",
            ));
        }
        Ok(Self(protocol_share))
    }

    /// Fraction of fees retained by the protocol.
    #[must_use]
    pub const fn protocol_share(&self) -> f64 {
        self.0
    }

    /// Fraction of fees passed to the LP.
    #[must_use]
    pub fn lp_share(&self) -> f64 {
        1.0 - self.0
    }
}

impl Default for FeeSplit {
    /// Protocol retains 20%.
    fn default() -> Self {
        Self(0.2)
    }
}

impl fmt::Display for FeeSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "protocol {}% / LP {}%", self.0 * 100.0, self.lp_share() * 100.0)
    }
}

/// Result of a fee-yield estimation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApyEstimate {
    apy_percent: f64,
    daily_fees_total_usd: f64,
    daily_fees_lp_usd: f64,
    daily_fees_protocol_usd: f64,
    capital_efficiency: f64,
    effective_share: f64,
}

impl ApyEstimate {
    /// The all-zero estimate returned for unknown TVL or valueless
    /// positions.
    pub const ZERO: Self = Self {
        apy_percent: 0.0,
        daily_fees_total_usd: 0.0,
        daily_fees_lp_usd: 0.0,
        daily_fees_protocol_usd: 0.0,
        capital_efficiency: 0.0,
        effective_share: 0.0,
    };

    /// Annualized yield in percent, daily compounded, capped at
    /// 1 000 000%.
    #[must_use]
    pub const fn apy_percent(&self) -> f64 {
        self.apy_percent
    }

    /// Total daily fees attributed to the position in USD, before the
    /// protocol cut.
    #[must_use]
    pub const fn daily_fees_total_usd(&self) -> f64 {
        self.daily_fees_total_usd
    }

    /// Daily fees accruing to the LP in USD.
    #[must_use]
    pub const fn daily_fees_lp_usd(&self) -> f64 {
        self.daily_fees_lp_usd
    }

    /// Daily fees retained by the protocol in USD.
    #[must_use]
    pub const fn daily_fees_protocol_usd(&self) -> f64 {
        self.daily_fees_protocol_usd
    }

    /// Capital-efficiency multiplier applied to the TVL share.
    #[must_use]
    pub const fn capital_efficiency(&self) -> f64 {
        self.capital_efficiency
    }

    /// Effective share of pool fees captured by the position.
    #[must_use]
    pub const fn effective_share(&self) -> f64 {
        self.effective_share
    }
}

/// Estimates fee APY for a position of the given value and range width.
///
/// ```text
/// capital_efficiency = min(1 / range_width_ratio, 100)
/// effective_share    = min(value / tvl · capital_efficiency, 1)
/// daily_fees         = volume · fee_rate · effective_share
/// apy                = (1 + lp_fees / value)^365 − 1
/// ```
///
/// A non-positive position value or pool TVL ("unknown") degrades to
/// [`ApyEstimate::ZERO`] rather than erroring.
///
/// # Errors
///
/// - [`SimError::InvalidQuantity`] if `daily_volume_usd` is negative or
///   non-finite, if `position_value_usd`/`pool_tvl_usd` are non-finite,
///   or if `range_width_ratio` is non-positive or non-finite.
pub fn estimate_apy(
    daily_volume_usd: f64,
    fee_rate: FeeRate,
    position_value_usd: f64,
    pool_tvl_usd: f64,
    range_width_ratio: f64,
    split: FeeSplit,
) -> crate::error::Result<ApyEstimate> {
    if !daily_volume_usd.is_finite() || daily_volume_usd < 0.0 {
        return Err(SimError::InvalidQuantity(
            "daily volume must be finite and non-negative",
        ));
    }
    if !position_value_usd.is_finite() || !pool_tvl_usd.is_finite() {
        return Err(SimError::InvalidQuantity(
            "position value and TVL must be finite",
        ));
    }
    if !range_width_ratio.is_finite() || range_width_ratio <= 0.0 {
        return Err(SimError::InvalidQuantity(
            "range width ratio must be finite and positive",
        ));
    }

    if position_value_usd <= 0.0 || pool_tvl_usd <= 0.0 {
        return Ok(ApyEstimate::ZERO);
    }

    let capital_efficiency = (1.0 / range_width_ratio).min(CAPITAL_EFFICIENCY_CAP);
    let effective_share = (position_value_usd / pool_tvl_usd * capital_efficiency).min(1.0);

    let daily_fees_total_usd = daily_volume_usd * fee_rate.get() * effective_share;
    let daily_fees_protocol_usd = daily_fees_total_usd * split.protocol_share();
    let daily_fees_lp_usd = daily_fees_total_usd - daily_fees_protocol_usd;

    let daily_yield = daily_fees_lp_usd / position_value_usd;
    let apy_percent =
        (((1.0 + daily_yield).powf(DAYS_PER_YEAR) - 1.0) * 100.0).min(MAX_APY_PERCENT);

    Ok(ApyEstimate {
        apy_percent,
        daily_fees_total_usd,
        daily_fees_lp_usd,
        daily_fees_protocol_usd,
        capital_efficiency,
        effective_share,
    })
}

/// Annualized mining-reward APR in percent for a position.
///
/// Emissions are allocated pro-rata by TVL share — deposited value, not
/// fee share, so no capital-efficiency boost applies. Unknown (zero or
/// negative) rewards, value, or TVL degrade to `0.0`.
#[must_use]
pub fn reward_apr(daily_rewards_usd: f64, position_value_usd: f64, pool_tvl_usd: f64) -> f64 {
    if !daily_rewards_usd.is_finite()
        || !position_value_usd.is_finite()
        || !pool_tvl_usd.is_finite()
        || daily_rewards_usd <= 0.0
        || position_value_usd <= 0.0
        || pool_tvl_usd <= 0.0
    {
        return 0.0;
    }

    let share = (position_value_usd / pool_tvl_usd).min(1.0);
    daily_rewards_usd * share / position_value_usd * DAYS_PER_YEAR * 100.0
}
