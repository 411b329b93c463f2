//! Convenience re-exports for common types and functions.
//!
//! A single import brings the whole simulation surface into scope:
//!
//! ```rust
//! use clmm_sim::prelude::*;
//! ```

pub use crate::config::PoolSnapshot;
pub use crate::domain::{
    Decimals, FeeRate, Liquidity, Price, PriceRange, Regime, SqrtPrice, SqrtPriceX64, Tick,
    TokenAmounts,
};
pub use crate::error::{Result, SimError};
pub use crate::math::{
    align_tick_to_spacing, amounts_from_liquidity, liquidity_from_amounts, price_at_tick,
    sqrt_price_x64_at_tick, tick_at_price, tick_at_sqrt_price_x64,
};
pub use crate::sim::{
    analytical_il, estimate_apy, evaluate_rebalance, full_range_il, il_curve, position_health,
    reward_apr, simulate, value_based_il, ApyEstimate, CurveGrid, CurvePoint, FeeSplit,
    HealthReport, HealthStatus, IlBreakdown, PositionSpec, RebalanceScenario, Recommendation,
    SimulationReport,
};
