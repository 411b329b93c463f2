//! Impermanent loss of a concentrated position.
//!
//! Two independent derivations of the same quantity coexist:
//!
//! - [`value_based_il`] — the primary method. Derives liquidity from the
//!   entry deposit, replays the position at the target price, and
//!   compares pool value against holding the reconciled initial split.
//!   Handles all three regimes, including out-of-range targets.
//! - [`analytical_il`] — a closed form valid while price stays inside
//!   the range, assuming entry at the range's geometric center. Used to
//!   cross-validate the value-based method in property tests.
//!
//! [`il_curve`] samples the value-based method over a percentage grid,
//! attaching the full-range ("V2") reference IL and an amplification
//! ratio to every point.

use crate::domain::{Liquidity, Price, PriceRange, Regime, TokenAmounts};
use crate::error::SimError;
use crate::math::{amounts_from_liquidity, liquidity_from_amounts};

/// Upper bound on curve subdivisions, keeping every generation bounded.
const MAX_GRID_STEPS: u32 = 10_000;

/// Reference IL below which the amplification ratio is reported as zero
/// (the full-range loss vanishes quadratically near `k = 1`).
const AMPLIFICATION_FLOOR: f64 = 1e-12;

/// Full breakdown of a value-based IL computation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IlBreakdown {
    entry_price: Price,
    target_price: Price,
    il_percent: f64,
    value_hold: f64,
    value_pool: f64,
    liquidity: Liquidity,
    initial_amounts: TokenAmounts,
    final_amounts: TokenAmounts,
    regime: Regime,
    degenerate: bool,
}

impl IlBreakdown {
    /// Entry price the deposit was priced at.
    #[must_use]
    pub const fn entry_price(&self) -> Price {
        self.entry_price
    }

    /// Target price the position was replayed at.
    #[must_use]
    pub const fn target_price(&self) -> Price {
        self.target_price
    }

    /// Impermanent loss in percent; negative when the position
    /// underperforms holding.
    #[must_use]
    pub const fn il_percent(&self) -> f64 {
        self.il_percent
    }

    /// Value (in quote units) of holding the reconciled initial split,
    /// repriced at the target.
    #[must_use]
    pub const fn value_hold(&self) -> f64 {
        self.value_hold
    }

    /// Value (in quote units) of the position at the target price.
    #[must_use]
    pub const fn value_pool(&self) -> f64 {
        self.value_pool
    }

    /// Liquidity derived from the entry deposit.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    /// Initial amounts reconciled onto the constant-liquidity curve.
    ///
    /// These may differ slightly from the raw deposit: liquidity is a
    /// single scalar, so a deposit off the curve is projected onto it.
    #[must_use]
    pub const fn initial_amounts(&self) -> TokenAmounts {
        self.initial_amounts
    }

    /// Amounts held at the target price.
    #[must_use]
    pub const fn final_amounts(&self) -> TokenAmounts {
        self.final_amounts
    }

    /// Regime of the target price relative to the range.
    #[must_use]
    pub const fn regime(&self) -> Regime {
        self.regime
    }

    /// `true` when the deposit implied no usable liquidity and the
    /// result is the neutral zero-IL placeholder.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}

/// Computes value-based impermanent loss at a target price.
///
/// The deposit is converted to liquidity at `entry_price`, the *actual*
/// initial amounts are recomputed from that liquidity (reconciliation
/// onto the curve), and the position is replayed at `target_price`:
///
/// ```text
/// value_hold = initial_x · target + initial_y
/// value_pool = final_x · target + final_y
/// il_percent = (value_pool / value_hold − 1) · 100
/// ```
///
/// A deposit whose ratio is inconsistent with any point on the curve
/// (zero or single-sided at an in-range entry) implies zero liquidity;
/// the result is then a neutral zero-IL breakdown flagged
/// [`degenerate`](IlBreakdown::is_degenerate) rather than an error, so
/// batch curve generation is never aborted.
///
/// # Errors
///
/// Propagates [`SimError::InvalidRange`] / [`SimError::DegenerateRange`]
/// from the amount calculator if the range is malformed (cannot occur
/// for a constructed [`PriceRange`]).
pub fn value_based_il(
    entry_price: Price,
    target_price: Price,
    range: &PriceRange,
    deposit: &TokenAmounts,
) -> crate::error::Result<IlBreakdown> {
    let (sl, su) = (range.sqrt_price_lower(), range.sqrt_price_upper());
    let regime = Regime::classify(target_price.sqrt(), sl, su);

    let liquidity = liquidity_from_amounts(entry_price.sqrt(), sl, su, deposit)?;
    if liquidity.is_zero() {
        let value = deposit.value_at(target_price);
        return Ok(IlBreakdown {
            entry_price,
            target_price,
            il_percent: 0.0,
            value_hold: value,
            value_pool: value,
            liquidity,
            initial_amounts: *deposit,
            final_amounts: *deposit,
            regime,
            degenerate: true,
        });
    }

    let initial_amounts = amounts_from_liquidity(entry_price.sqrt(), sl, su, liquidity)?;
    let final_amounts = amounts_from_liquidity(target_price.sqrt(), sl, su, liquidity)?;

    let value_hold = initial_amounts.value_at(target_price);
    let value_pool = final_amounts.value_at(target_price);
    let il_percent = if value_hold > 0.0 {
        (value_pool / value_hold - 1.0) * 100.0
    } else {
        0.0
    };

    Ok(IlBreakdown {
        entry_price,
        target_price,
        il_percent,
        value_hold,
        value_pool,
        liquidity,
        initial_amounts,
        final_amounts,
        regime,
        degenerate: false,
    })
}

/// Full-range ("V2") impermanent loss in percent for a price ratio `k`:
/// `(2·√k / (1 + k) − 1) · 100`.
///
/// Degrades to `0.0` for non-finite or non-positive ratios.
#[must_use]
pub fn full_range_il(price_ratio: f64) -> f64 {
    if !price_ratio.is_finite() || price_ratio <= 0.0 {
        return 0.0;
    }
    (2.0 * price_ratio.sqrt() / (1.0 + price_ratio) - 1.0) * 100.0
}

/// Closed-form concentrated IL in percent for an in-range price ratio.
///
/// Assumes entry at the geometric center `√(Pl·Pu)` of the range. With
/// `n = √(Pu/Pl)`, the constant-liquidity curve gives exactly
///
/// ```text
/// IL_clmm(k) = IL_v2(k) · √n / (√n − 1)
/// ```
///
/// — the full-range loss amplified by the range-width factor. Serves as
/// the independent oracle for [`value_based_il`].
///
/// # Errors
///
/// - [`SimError::InvalidQuantity`] if `price_ratio` is non-finite or
///   non-positive.
/// - [`SimError::InvalidRange`] if `price_lower >= price_upper`, or if
///   the ratio moves the price outside the range (the closed form only
///   holds in range).
pub fn analytical_il(
    price_ratio: f64,
    price_lower: Price,
    price_upper: Price,
) -> crate::error::Result<f64> {
    if !price_ratio.is_finite() || price_ratio <= 0.0 {
        return Err(SimError::InvalidQuantity(
            "price ratio must be finite and positive",
        ));
    }
    if price_lower.get() >= price_upper.get() {
        return Err(SimError::InvalidRange(
            "lower price must be below upper price",
        ));
    }

    let n = (price_upper.get() / price_lower.get()).sqrt();
    if price_ratio < 1.0 / n || price_ratio > n {
        return Err(SimError::InvalidRange(
            "price ratio leaves the range; the closed form is in-range only",
        ));
    }

    let sqrt_n = n.sqrt();
    Ok(full_range_il(price_ratio) * sqrt_n / (sqrt_n - 1.0))
}

/// A percentage grid for [`il_curve`].
///
/// Samples `steps + 1` points evenly across `[min_percent, max_percent]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveGrid {
    min_percent: f64,
    max_percent: f64,
    steps: u32,
}

impl CurveGrid {
    /// Creates a new grid.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the bounds are
    /// non-finite or inverted, or `steps` is zero or above 10 000.
    pub fn new(min_percent: f64, max_percent: f64, steps: u32) -> crate::error::Result<Self> {
        if !min_percent.is_finite() || !max_percent.is_finite() || min_percent >= max_percent {
            return Err(SimError::InvalidConfiguration(
                "grid bounds must be finite with min below max",
            ));
        }
        if steps == 0 || steps > MAX_GRID_STEPS {
            return Err(SimError::InvalidConfiguration(
                "grid steps must be within 1..=10000",
            ));
        }
        Ok(Self {
            min_percent,
            max_percent,
            steps,
        })
    }

    /// Lower bound of the grid in percent.
    #[must_use]
    pub const fn min_percent(&self) -> f64 {
        self.min_percent
    }

    /// Upper bound of the grid in percent.
    #[must_use]
    pub const fn max_percent(&self) -> f64 {
        self.max_percent
    }

    /// Number of subdivisions (the curve has `steps + 1` samples).
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    /// Percentage at sample index `i`.
    fn percent_at(&self, i: u32) -> f64 {
        let fraction = f64::from(i) / f64::from(self.steps);
        self.min_percent + (self.max_percent - self.min_percent) * fraction
    }
}

impl Default for CurveGrid {
    /// `[-50%, +100%]` in 30 subdivisions.
    fn default() -> Self {
        Self {
            min_percent: -50.0,
            max_percent: 100.0,
            steps: 30,
        }
    }
}

/// One sample of an IL curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    price_change_percent: f64,
    target_price: Price,
    il_percent: f64,
    il_reference_percent: f64,
    value_hold: f64,
    value_pool: f64,
    regime: Regime,
    amplification: f64,
}

impl CurvePoint {
    /// Price change of this sample relative to the current price.
    #[must_use]
    pub const fn price_change_percent(&self) -> f64 {
        self.price_change_percent
    }

    /// Absolute target price of this sample.
    #[must_use]
    pub const fn target_price(&self) -> Price {
        self.target_price
    }

    /// Concentrated (value-based) IL in percent.
    #[must_use]
    pub const fn il_percent(&self) -> f64 {
        self.il_percent
    }

    /// Full-range reference IL in percent at the same ratio.
    #[must_use]
    pub const fn il_reference_percent(&self) -> f64 {
        self.il_reference_percent
    }

    /// Hold-strategy value at the target price.
    #[must_use]
    pub const fn value_hold(&self) -> f64 {
        self.value_hold
    }

    /// Position value at the target price.
    #[must_use]
    pub const fn value_pool(&self) -> f64 {
        self.value_pool
    }

    /// Regime of the target price.
    #[must_use]
    pub const fn regime(&self) -> Regime {
        self.regime
    }

    /// `|IL_clmm / IL_v2|`, doubled when the target is out of range —
    /// where concentrated IL diverges most sharply from full-range IL.
    #[must_use]
    pub const fn amplification(&self) -> f64 {
        self.amplification
    }
}

/// Samples value-based IL across a percentage grid.
///
/// Pure and deterministic: identical inputs produce an identical
/// sequence. Samples with a non-positive target price (extreme negative
/// steps) are skipped silently, and a degenerate computation at one
/// sample never prevents the rest.
#[must_use]
pub fn il_curve(
    current_price: Price,
    range: &PriceRange,
    deposit: &TokenAmounts,
    grid: &CurveGrid,
) -> Vec<CurvePoint> {
    let mut points = Vec::with_capacity(grid.steps() as usize + 1);

    for i in 0..=grid.steps() {
        let percent = grid.percent_at(i);
        let Some(target) = current_price.shifted_by_percent(percent) else {
            continue;
        };
        let Ok(breakdown) = value_based_il(current_price, target, range, deposit) else {
            continue;
        };

        let ratio = target.ratio_over(current_price);
        let reference = full_range_il(ratio);
        let mut amplification = if reference.abs() < AMPLIFICATION_FLOOR {
            0.0
        } else {
            (breakdown.il_percent() / reference).abs()
        };
        if !breakdown.regime().is_in_range() {
            amplification *= 2.0;
        }

        points.push(CurvePoint {
            price_change_percent: percent,
            target_price: target,
            il_percent: breakdown.il_percent(),
            il_reference_percent: reference,
            value_hold: breakdown.value_hold(),
            value_pool: breakdown.value_pool(),
            regime: breakdown.regime(),
            amplification,
        });
    }

    points
}
