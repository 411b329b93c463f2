//! Rebalance break-even analysis.
//!
//! Moving a position to a new range costs two transactions (withdraw and
//! redeposit). The advisor compares the fee yield of the current and
//! candidate ranges, computes how many days of extra fees cover the gas,
//! and walks an ordered decision table to a recommendation.

use core::fmt;

use crate::config::PoolSnapshot;
use crate::domain::PriceRange;
use crate::error::SimError;
use crate::sim::fees::{estimate_apy, ApyEstimate, FeeSplit};

/// A rebalance is two transactions: withdraw and redeposit.
const REBALANCE_TX_COUNT: f64 = 2.0;

/// Break-even faster than this is an easy yes.
const FAST_BREAK_EVEN_DAYS: f64 = 7.0;

/// Break-even slower than this is an easy no.
const SLOW_BREAK_EVEN_DAYS: f64 = 30.0;

/// Fee deltas below this are treated as zero improvement.
const MIN_FEE_DELTA_USD: f64 = 1e-9;

/// Advisor verdict on a candidate range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Recommendation {
    /// The move pays for itself quickly or restores fee earning.
    Recommended,
    /// The move is marginal either way.
    Neutral,
    /// The move does not pay for itself.
    NotRecommended,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recommended => write!(f, "recommended"),
            Self::Neutral => write!(f, "neutral"),
            Self::NotRecommended => write!(f, "not recommended"),
        }
    }
}

/// Outcome of a rebalance evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RebalanceScenario {
    new_range: PriceRange,
    gas_cost_usd: f64,
    current_apy_percent: f64,
    projected_apy_percent: f64,
    daily_fee_delta_usd: f64,
    break_even_days: f64,
    recommendation: Recommendation,
    reason: String,
}

impl RebalanceScenario {
    /// The candidate range that was evaluated.
    #[must_use]
    pub const fn new_range(&self) -> PriceRange {
        self.new_range
    }

    /// Total gas cost of the rebalance (two transactions) in USD.
    #[must_use]
    pub const fn gas_cost_usd(&self) -> f64 {
        self.gas_cost_usd
    }

    /// Fee APY of the current range, in percent.
    #[must_use]
    pub const fn current_apy_percent(&self) -> f64 {
        self.current_apy_percent
    }

    /// Fee APY of the candidate range, in percent.
    #[must_use]
    pub const fn projected_apy_percent(&self) -> f64 {
        self.projected_apy_percent
    }

    /// Change in daily LP fees from the move, in USD.
    #[must_use]
    pub const fn daily_fee_delta_usd(&self) -> f64 {
        self.daily_fee_delta_usd
    }

    /// Days of extra fees needed to cover gas; infinite when the move
    /// earns no extra fees.
    #[must_use]
    pub const fn break_even_days(&self) -> f64 {
        self.break_even_days
    }

    /// Advisor verdict.
    #[must_use]
    pub const fn recommendation(&self) -> Recommendation {
        self.recommendation
    }

    /// Human-readable justification for the verdict.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Evaluates moving a position from `old_range` to `new_range`.
///
/// APYs come from the fee estimator using each range's width; the
/// break-even time divides the gas cost by the daily LP-fee improvement.
/// The decision table is checked in order:
///
/// 1. new range excludes the current price → not recommended;
/// 2. old range out of range, new in range → recommended (restores fee
///    earning, whatever the gas);
/// 3. break-even under 7 days → recommended;
/// 4. break-even over 30 days (or no improvement) → not recommended;
/// 5. otherwise → neutral.
///
/// # Errors
///
/// - [`SimError::InvalidQuantity`] if `position_value_usd` is non-finite
///   or `gas_cost_per_tx_usd` is negative or non-finite, or propagated
///   from the fee estimator.
pub fn evaluate_rebalance(
    snapshot: &PoolSnapshot,
    old_range: &PriceRange,
    new_range: &PriceRange,
    position_value_usd: f64,
    gas_cost_per_tx_usd: f64,
) -> crate::error::Result<RebalanceScenario> {
    if !gas_cost_per_tx_usd.is_finite() || gas_cost_per_tx_usd < 0.0 {
        return Err(SimError::InvalidQuantity(
            "gas cost must be finite and non-negative",
        ));
    }

    let gas_cost_usd = gas_cost_per_tx_usd * REBALANCE_TX_COUNT;
    let split = FeeSplit::default();

    let old_estimate: ApyEstimate = estimate_apy(
        snapshot.daily_volume_usd(),
        snapshot.fee_rate(),
        position_value_usd,
        snapshot.tvl_usd(),
        old_range.width_ratio(),
        split,
    )?;
    let new_estimate: ApyEstimate = estimate_apy(
        snapshot.daily_volume_usd(),
        snapshot.fee_rate(),
        position_value_usd,
        snapshot.tvl_usd(),
        new_range.width_ratio(),
        split,
    )?;

    let daily_fee_delta_usd =
        new_estimate.daily_fees_lp_usd() - old_estimate.daily_fees_lp_usd();
    let break_even_days = if daily_fee_delta_usd > MIN_FEE_DELTA_USD {
        gas_cost_usd / daily_fee_delta_usd
    } else {
        f64::INFINITY
    };

    let price = snapshot.current_price();
    let old_in_range = old_range.contains_price(price);
    let new_in_range = new_range.contains_price(price);

    let (recommendation, reason) = if !new_in_range {
        (
            Recommendation::NotRecommended,
            "the new range excludes the current price; the position would start out of range"
                .to_owned(),
        )
    } else if !old_in_range {
        (
            Recommendation::Recommended,
            "restores in-range status: the current range has stopped earning fees".to_owned(),
        )
    } else if break_even_days < FAST_BREAK_EVEN_DAYS {
        (
            Recommendation::Recommended,
            format!("gas cost is recovered in about {break_even_days:.1} days of extra fees"),
        )
    } else if break_even_days > SLOW_BREAK_EVEN_DAYS {
        let reason = if break_even_days.is_finite() {
            format!("extra fees would need about {break_even_days:.0} days to cover gas")
        } else {
            "the new range would not earn more fees than the current one".to_owned()
        };
        (Recommendation::NotRecommended, reason)
    } else {
        (
            Recommendation::Neutral,
            format!("break-even in about {break_even_days:.0} days; the improvement is marginal"),
        )
    };

    Ok(RebalanceScenario {
        new_range: *new_range,
        gas_cost_usd,
        current_apy_percent: old_estimate.apy_percent(),
        projected_apy_percent: new_estimate.apy_percent(),
        daily_fee_delta_usd,
        break_even_days,
        recommendation,
        reason,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Decimals, FeeRate, Price};

    fn price(v: f64) -> Price {
        let Ok(p) = Price::new(v) else {
            panic!("valid price expected");
        };
        p
    }

    fn range(lower: f64, upper: f64) -> PriceRange {
        let Ok(r) = PriceRange::from_prices(price(lower), price(upper)) else {
            panic!("valid range expected");
        };
        r
    }

    fn snapshot() -> PoolSnapshot {
        let Ok(d) = Decimals::new(6) else {
            panic!("valid decimals expected");
        };
        let Ok(s) = PoolSnapshot::new(
            price(1.0),
            FeeRate::RATE_0_30_PERCENT,
            10,
            d,
            d,
            1_000_000.0,
            10_000.0,
            0.0,
        ) else {
            panic!("valid snapshot expected");
        };
        s
    }

    fn evaluate(
        old: &PriceRange,
        new: &PriceRange,
        gas_per_tx: f64,
    ) -> RebalanceScenario {
        let Ok(s) = evaluate_rebalance(&snapshot(), old, new, 1_000.0, gas_per_tx) else {
            panic!("expected Ok");
        };
        s
    }

    // -- Decision table -----------------------------------------------------

    #[test]
    fn restoring_in_range_status_is_recommended_regardless_of_gas() {
        // Price sits at 1.0; the old range is stranded below it.
        let old = range(0.5, 0.8);
        let new = range(0.9, 1.1);
        let s = evaluate(&old, &new, 10_000.0);
        assert_eq!(s.recommendation(), Recommendation::Recommended);
        assert!(s.reason().contains("restores in-range status"));
    }

    #[test]
    fn new_range_excluding_price_is_rejected_first() {
        // Both stranded; the exclusion rule wins over the restore rule.
        let old = range(0.5, 0.8);
        let new = range(1.2, 1.5);
        let s = evaluate(&old, &new, 0.0);
        assert_eq!(s.recommendation(), Recommendation::NotRecommended);
        assert!(s.reason().contains("excludes the current price"));
    }

    #[test]
    fn fast_break_even_is_recommended() {
        // Narrowing 0.2 → 0.1 width doubles LP fees (0.12 → 0.24/day).
        let old = range(0.9, 1.1);
        let new = range(0.95, 1.05);
        let s = evaluate(&old, &new, 0.3);
        assert!(s.break_even_days() < FAST_BREAK_EVEN_DAYS);
        assert_eq!(s.recommendation(), Recommendation::Recommended);
        assert!(s.reason().contains("recovered"));
    }

    #[test]
    fn moderate_break_even_is_neutral() {
        let old = range(0.9, 1.1);
        let new = range(0.95, 1.05);
        let s = evaluate(&old, &new, 0.9);
        assert!(s.break_even_days() >= FAST_BREAK_EVEN_DAYS);
        assert!(s.break_even_days() <= SLOW_BREAK_EVEN_DAYS);
        assert_eq!(s.recommendation(), Recommendation::Neutral);
    }

    #[test]
    fn slow_break_even_is_rejected() {
        let old = range(0.9, 1.1);
        let new = range(0.95, 1.05);
        let s = evaluate(&old, &new, 2.5);
        assert!(s.break_even_days() > SLOW_BREAK_EVEN_DAYS);
        assert_eq!(s.recommendation(), Recommendation::NotRecommended);
    }

    #[test]
    fn widening_earns_nothing_extra_and_is_rejected() {
        let old = range(0.95, 1.05);
        let new = range(0.8, 1.2);
        let s = evaluate(&old, &new, 1.0);
        assert!(s.daily_fee_delta_usd() < 0.0);
        assert!(s.break_even_days().is_infinite());
        assert_eq!(s.recommendation(), Recommendation::NotRecommended);
        assert!(s.reason().contains("would not earn more fees"));
    }

    // -- Economics ----------------------------------------------------------

    #[test]
    fn gas_cost_counts_two_transactions() {
        let old = range(0.9, 1.1);
        let new = range(0.95, 1.05);
        let s = evaluate(&old, &new, 5.0);
        assert!((s.gas_cost_usd() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn narrower_range_projects_higher_apy() {
        let old = range(0.9, 1.1);
        let new = range(0.95, 1.05);
        let s = evaluate(&old, &new, 1.0);
        assert!(s.projected_apy_percent() > s.current_apy_percent());
    }

    #[test]
    fn break_even_divides_gas_by_fee_delta() {
        let old = range(0.9, 1.1);
        let new = range(0.95, 1.05);
        let s = evaluate(&old, &new, 0.9);
        let expected = s.gas_cost_usd() / s.daily_fee_delta_usd();
        assert!((s.break_even_days() - expected).abs() < 1e-9);
    }

    // -- Validation ---------------------------------------------------------

    #[test]
    fn negative_gas_rejected() {
        let old = range(0.9, 1.1);
        let new = range(0.95, 1.05);
        let r = evaluate_rebalance(&snapshot(), &old, &new, 1_000.0, -1.0);
        assert!(matches!(r, Err(SimError::InvalidQuantity(_))));
    }

    #[test]
    fn non_finite_value_rejected() {
        let old = range(0.9, 1.1);
        let new = range(0.95, 1.05);
        let r = evaluate_rebalance(&snapshot(), &old, &new, f64::NAN, 1.0);
        assert!(r.is_err());
    }
}
