//! Fundamental domain value types of the simulator.
//!
//! All types are newtypes or small structs with validated constructors
//! enforcing the invariants the engines rely on: ticks stay on the
//! ladder, prices are strictly positive, liquidity and amounts are
//! non-negative, ranges are non-empty.
//!
//! The crate-wide token convention lives here: price is quoted as units
//! of token Y per unit of token X. Below its range a position holds only
//! X, above it only Y; see [`Regime`].

mod amounts;
mod decimals;
mod fee_rate;
mod liquidity;
mod price;
mod price_range;
mod regime;
mod sqrt_price;
mod tick;

pub use amounts::TokenAmounts;
pub use decimals::Decimals;
pub use fee_rate::FeeRate;
pub use liquidity::Liquidity;
pub use price::Price;
pub use price_range::PriceRange;
pub use regime::Regime;
pub use sqrt_price::{SqrtPrice, SqrtPriceX64};
pub use tick::Tick;
