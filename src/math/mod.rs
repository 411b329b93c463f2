//! Numeric kernels of the simulator.
//!
//! Two layers, leaves first:
//!
//! - `tick_math` — fixed-point conversion between ticks, Q64.64 sqrt
//!   prices, and floating prices, plus spacing alignment.
//! - `liquidity_math` — the three-regime duality between a position's
//!   liquidity and its token composition.
//!
//! Everything here is a pure function over validated domain values.

mod liquidity_math;
mod tick_math;

pub use liquidity_math::{amounts_from_liquidity, liquidity_from_amounts};
pub use tick_math::{
    align_tick_to_spacing, price_at_tick, sqrt_price_x64_at_tick, tick_at_price,
    tick_at_sqrt_price_x64,
};
