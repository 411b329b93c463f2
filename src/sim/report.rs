//! Full-snapshot position simulation.
//!
//! One call assembles everything a range choice needs to be judged:
//! liquidity and reconciled amounts, the IL breakdown since entry, an IL
//! curve over a price grid, fee and reward yield, and the composite
//! health score. Pure over its inputs — two identical invocations
//! produce identical reports.

use crate::config::PoolSnapshot;
use crate::domain::{Liquidity, Price, PriceRange, Regime, TokenAmounts};
use crate::error::SimError;
use crate::sim::fees::{estimate_apy, reward_apr, ApyEstimate, FeeSplit};
use crate::sim::health::{position_health, HealthReport};
use crate::sim::il::{il_curve, value_based_il, CurveGrid, CurvePoint, IlBreakdown};

/// Days per year for the simple-APR conversion fed to the health score.
const DAYS_PER_YEAR: f64 = 365.0;

/// A hypothetical or existing position to simulate.
///
/// The deposit is priced at `entry_price`; `days_held` is how long the
/// position has been open (zero for a fresh evaluation, in which case
/// entry price and current price usually coincide).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionSpec {
    deposit: TokenAmounts,
    entry_price: Price,
    range: PriceRange,
    days_held: f64,
}

impl PositionSpec {
    /// Creates a new position specification.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidQuantity`] if `days_held` is negative
    /// or non-finite.
    pub fn new(
        deposit: TokenAmounts,
        entry_price: Price,
        range: PriceRange,
        days_held: f64,
    ) -> crate::error::Result<Self> {
        if !days_held.is_finite() || days_held < 0.0 {
            return Err(SimError::InvalidQuantity(
                "days held must be finite and non-negative",
            ));
        }
        Ok(Self {
            deposit,
            entry_price,
            range,
            days_held,
        })
    }

    /// Returns the raw deposit.
    #[must_use]
    pub const fn deposit(&self) -> TokenAmounts {
        self.deposit
    }

    /// Returns the entry price.
    #[must_use]
    pub const fn entry_price(&self) -> Price {
        self.entry_price
    }

    /// Returns the chosen range.
    #[must_use]
    pub const fn range(&self) -> PriceRange {
        self.range
    }

    /// Returns the holding period in days.
    #[must_use]
    pub const fn days_held(&self) -> f64 {
        self.days_held
    }
}

/// Everything the simulator can say about one position at one snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationReport {
    liquidity: Liquidity,
    amounts: TokenAmounts,
    position_value: f64,
    regime: Regime,
    il: IlBreakdown,
    curve: Vec<CurvePoint>,
    fee_yield: ApyEstimate,
    reward_apr_percent: f64,
    health: HealthReport,
}

impl SimulationReport {
    /// Liquidity derived from the deposit at the entry price.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    /// Token composition at the current price.
    #[must_use]
    pub const fn amounts(&self) -> TokenAmounts {
        self.amounts
    }

    /// Position value in quote units at the current price. The quote
    /// token is treated as the USD-denominated side for yield math.
    #[must_use]
    pub const fn position_value(&self) -> f64 {
        self.position_value
    }

    /// Regime of the current price relative to the chosen range.
    #[must_use]
    pub const fn regime(&self) -> Regime {
        self.regime
    }

    /// IL breakdown from entry price to current price.
    #[must_use]
    pub const fn il(&self) -> &IlBreakdown {
        &self.il
    }

    /// IL curve sampled over the requested grid.
    #[must_use]
    pub fn curve(&self) -> &[CurvePoint] {
        &self.curve
    }

    /// Fee-yield estimate for the chosen range.
    #[must_use]
    pub const fn fee_yield(&self) -> &ApyEstimate {
        &self.fee_yield
    }

    /// Mining-reward APR in percent.
    #[must_use]
    pub const fn reward_apr_percent(&self) -> f64 {
        self.reward_apr_percent
    }

    /// Composite health report.
    #[must_use]
    pub const fn health(&self) -> &HealthReport {
        &self.health
    }
}

/// Runs the full simulation pipeline for one position against one
/// snapshot: amounts → liquidity → IL curve → yield → health.
///
/// # Errors
///
/// - Propagates validation errors from the snapshot and any engine.
pub fn simulate(
    snapshot: &PoolSnapshot,
    spec: &PositionSpec,
    grid: &CurveGrid,
) -> crate::error::Result<SimulationReport> {
    snapshot.validate()?;

    let current = snapshot.current_price();
    let range = spec.range();

    // Entry → current replay also yields liquidity and the reconciled
    // composition at the current price.
    let il = value_based_il(spec.entry_price(), current, &range, &spec.deposit())?;
    let amounts = il.final_amounts();
    let position_value = amounts.value_at(current);

    let curve = il_curve(current, &range, &spec.deposit(), grid);

    let fee_yield = estimate_apy(
        snapshot.daily_volume_usd(),
        snapshot.fee_rate(),
        position_value,
        snapshot.tvl_usd(),
        range.width_ratio(),
        FeeSplit::default(),
    )?;
    let reward_apr_percent =
        reward_apr(snapshot.daily_rewards_usd(), position_value, snapshot.tvl_usd());

    let fee_apr_percent = if position_value > 0.0 {
        fee_yield.daily_fees_lp_usd() / position_value * DAYS_PER_YEAR * 100.0
    } else {
        0.0
    };
    let health = position_health(
        current,
        &range,
        il.il_percent(),
        fee_apr_percent,
        spec.days_held(),
    )?;

    Ok(SimulationReport {
        liquidity: il.liquidity(),
        amounts,
        position_value,
        regime: il.regime(),
        il,
        curve,
        fee_yield,
        reward_apr_percent,
        health,
    })
}
