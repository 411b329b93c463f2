//! Composite position-health scoring.
//!
//! Four independently capped sub-scores sum to a 0–100 score:
//!
//! | Sub-score | Cap | Signal |
//! |-----------|-----|--------|
//! | range position | 30 | proximity to the range center, 0 out of range |
//! | impermanent loss | 25 | linear penalty, 5 points per percent of IL |
//! | net trend | 25 | accrued fees plus IL, neutral at 12.5 |
//! | capital efficiency | 20 | one point per efficiency multiple, capped |
//!
//! The total maps to a discrete status tier, and a short summary is
//! chosen by an ordered decision table: out-of-range > heavy IL >
//! fees-outpacing-IL > default.

use core::fmt;

use crate::domain::{Price, PriceRange};
use crate::error::SimError;

/// Days per year used to convert an APR into accrued fees.
const DAYS_PER_YEAR: f64 = 365.0;

/// IL penalty slope: points deducted per percent of impermanent loss.
const IL_PENALTY_PER_PERCENT: f64 = 5.0;

/// IL beyond which the summary calls the loss heavy.
const HEAVY_IL_PERCENT: f64 = 5.0;

/// Discrete health tier of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthStatus {
    /// Score 80 and above.
    Excellent,
    /// Score 65 to 80.
    Good,
    /// Score 45 to 65.
    Fair,
    /// Score 25 to 45.
    Poor,
    /// Score below 25.
    Critical,
}

impl HealthStatus {
    const fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 65.0 {
            Self::Good
        } else if score >= 45.0 {
            Self::Fair
        } else if score >= 25.0 {
            Self::Poor
        } else {
            Self::Critical
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Composite health report for a position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthReport {
    score: f64,
    status: HealthStatus,
    range_score: f64,
    il_score: f64,
    trend_score: f64,
    efficiency_score: f64,
    summary: String,
}

impl HealthReport {
    /// Composite score in `[0, 100]`.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Discrete status tier.
    #[must_use]
    pub const fn status(&self) -> HealthStatus {
        self.status
    }

    /// Proximity-to-center sub-score (0–30).
    #[must_use]
    pub const fn range_score(&self) -> f64 {
        self.range_score
    }

    /// Impermanent-loss sub-score (0–25).
    #[must_use]
    pub const fn il_score(&self) -> f64 {
        self.il_score
    }

    /// Net-of-fees trend sub-score (0–25).
    #[must_use]
    pub const fn trend_score(&self) -> f64 {
        self.trend_score
    }

    /// Capital-efficiency sub-score (0–20).
    #[must_use]
    pub const fn efficiency_score(&self) -> f64 {
        self.efficiency_score
    }

    /// Short natural-language assessment.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

/// Scores a position's health at the current price.
///
/// `il_percent` is the position's impermanent loss since entry (negative
/// when underperforming), `fee_apr_percent` its fee APR, and `days_held`
/// the holding period used to accrue fees against the loss.
///
/// # Errors
///
/// Returns [`SimError::InvalidQuantity`] if `il_percent` is non-finite,
/// or `fee_apr_percent` / `days_held` are negative or non-finite.
pub fn position_health(
    current_price: Price,
    range: &PriceRange,
    il_percent: f64,
    fee_apr_percent: f64,
    days_held: f64,
) -> crate::error::Result<HealthReport> {
    if !il_percent.is_finite() {
        return Err(SimError::InvalidQuantity("IL percent must be finite"));
    }
    if !fee_apr_percent.is_finite() || fee_apr_percent < 0.0 {
        return Err(SimError::InvalidQuantity(
            "fee APR must be finite and non-negative",
        ));
    }
    if !days_held.is_finite() || days_held < 0.0 {
        return Err(SimError::InvalidQuantity(
            "days held must be finite and non-negative",
        ));
    }

    let in_range = range.contains_price(current_price);

    // 0 at a boundary or outside, 30 at the exact center.
    let range_score = if in_range {
        let offset = (range.relative_position(current_price) - 0.5).abs() * 2.0;
        30.0 * (1.0 - offset)
    } else {
        0.0
    };

    let il_score = (25.0 - il_percent.abs() * IL_PENALTY_PER_PERCENT).clamp(0.0, 25.0);

    let accrued_fees_percent = fee_apr_percent / DAYS_PER_YEAR * days_held;
    let net_percent = accrued_fees_percent + il_percent;
    let trend_score = (12.5 + net_percent * IL_PENALTY_PER_PERCENT).clamp(0.0, 25.0);

    let capital_efficiency = (1.0 / range.width_ratio()).min(100.0);
    let efficiency_score = capital_efficiency.min(20.0);

    let score = range_score + il_score + trend_score + efficiency_score;

    let summary = if !in_range {
        "price is outside the range; the position is single-sided and earning no fees"
    } else if il_percent < -HEAVY_IL_PERCENT {
        "impermanent loss is running heavy for this range; consider widening or rebalancing"
    } else if accrued_fees_percent > 0.0 && accrued_fees_percent >= il_percent.abs() {
        "fee income is outpacing impermanent loss"
    } else {
        "position is in range and operating normally"
    };

    Ok(HealthReport {
        score,
        status: HealthStatus::for_score(score),
        range_score,
        il_score,
        trend_score,
        efficiency_score,
        summary: summary.to_owned(),
    })
}
