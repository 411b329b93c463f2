//! # CLMM Sim
//!
//! Closed-form, single-snapshot simulator for concentrated-liquidity
//! market-maker (CLMM) positions.
//!
//! Given a hypothetical deposit over a chosen price range, the crate
//! computes how the position's token composition, value, impermanent
//! loss (IL), fee income, and risk profile evolve as the market price
//! moves — before any capital is committed — and whether moving to a new
//! range would pay for its gas.
//!
//! Everything is a pure function over immutable value types: no I/O, no
//! shared state, no on-chain interaction. Live pool data (price, fee
//! tier, TVL, volume) arrives pre-validated in a [`PoolSnapshot`](config::PoolSnapshot);
//! fetching and caching it is the surrounding system's job.
//!
//! # Quick Start
//!
//! ```rust
//! use clmm_sim::prelude::*;
//!
//! // Market snapshot: price 1.0, 0.30% fee tier, spacing 10,
//! // $1M TVL, $10k daily volume, no reward emissions.
//! let snapshot = PoolSnapshot::new(
//!     Price::new(1.0)?,
//!     FeeRate::RATE_0_30_PERCENT,
//!     10,
//!     Decimals::new(6)?,
//!     Decimals::new(6)?,
//!     1_000_000.0,
//!     10_000.0,
//!     0.0,
//! )?;
//!
//! // A ±5% range around the current price, aligned to tick spacing.
//! let range = PriceRange::centered(snapshot.current_price(), 0.1, snapshot.tick_spacing())?;
//!
//! // Simulate a fresh 500/500 deposit over a ±50% price sweep.
//! let spec = PositionSpec::new(
//!     TokenAmounts::new(500.0, 500.0)?,
//!     snapshot.current_price(),
//!     range,
//!     0.0,
//! )?;
//! let grid = CurveGrid::new(-50.0, 50.0, 20)?;
//! let report = simulate(&snapshot, &spec, &grid)?;
//!
//! assert!(!report.liquidity().is_zero());
//! assert!(report.fee_yield().apy_percent() > 0.0);
//! assert_eq!(report.curve().len(), 21);
//! # Ok::<(), clmm_sim::SimError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  builds PoolSnapshot + PositionSpec
//! └──────┬───────┘
//!        │ simulate(&snapshot, &spec, &grid)
//!        ▼
//! ┌──────────────┐
//! │     sim       │  IL engine, fee yield, health, rebalance
//! └──────┬───────┘
//!        │ amounts ⇄ liquidity, tick ⇄ price
//!        ▼
//! ┌──────────────┐
//! │     math      │  Q64.64 tick ladder, three-regime duality
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │    domain     │  Tick, Price, PriceRange, Liquidity, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Validated newtype value types: [`Tick`](domain::Tick), [`Price`](domain::Price), [`PriceRange`](domain::PriceRange), [`Liquidity`](domain::Liquidity), … |
//! | [`math`] | Fixed-point tick/price conversion and the liquidity/amount duality |
//! | [`sim`] | Impermanent loss, fee yield, position health, rebalance advice, full reports |
//! | [`config`] | [`PoolSnapshot`](config::PoolSnapshot): the validated market snapshot |
//! | [`error`] | [`SimError`](error::SimError) unified error enum |
//! | [`prelude`] | Convenience re-exports |
//!
//! # Token Convention
//!
//! Price is quoted as units of token Y per unit of token X; Y is the
//! quote side. A position that falls below its range holds only X, one
//! that rises above it holds only Y. The convention is applied
//! uniformly across the amount calculator, the IL engine, and the
//! yield estimators.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` on snapshots, specs, and reports |

pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod prelude;
pub mod sim;

pub use error::{Result, SimError};
