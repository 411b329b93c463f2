//! Unified error types for the CLMM position simulator.
//!
//! All fallible operations across the crate return [`SimError`] as their
//! error type. Variants carry a static description of the violated
//! precondition.
//!
//! Degenerate *computations* (an implied liquidity of zero, a curve point
//! with a non-positive target price) are not errors: they are recovered
//! locally with a defined zero/neutral result so that a single bad sample
//! never aborts a batch. Only invalid *inputs* surface as `SimError`.

use core::fmt;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, SimError>;

/// Unified error enum for all simulator operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimError {
    /// A price was non-positive, NaN, or infinite.
    InvalidPrice(&'static str),
    /// A tick index was outside the supported range.
    InvalidTick(&'static str),
    /// A price or tick range was empty or inverted.
    InvalidRange(&'static str),
    /// A liquidity value was negative, NaN, or infinite.
    InvalidLiquidity(&'static str),
    /// A quantity (amount, TVL, volume, duration) was negative, NaN, or
    /// infinite.
    InvalidQuantity(&'static str),
    /// A configuration parameter (tick spacing, fee rate, curve grid,
    /// fee split) was out of bounds.
    InvalidConfiguration(&'static str),
    /// A range collapsed to zero width, leaving the regime branch with a
    /// zero denominator.
    DegenerateRange(&'static str),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrice(msg) => write!(f, "invalid price: {msg}"),
            Self::InvalidTick(msg) => write!(f, "invalid tick: {msg}"),
            Self::InvalidRange(msg) => write!(f, "invalid range: {msg}"),
            Self::InvalidLiquidity(msg) => write!(f, "invalid liquidity: {msg}"),
            Self::InvalidQuantity(msg) => write!(f, "invalid quantity: {msg}"),
            Self::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            Self::DegenerateRange(msg) => write!(f, "degenerate range: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}
