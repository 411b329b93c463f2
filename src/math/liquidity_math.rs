//! Liquidity ⇄ token-amount duality across the three price regimes.
//!
//! Within a range, a position of liquidity `L` between sqrt prices
//! `√Pl < √P < √Pu` holds
//!
//! ```text
//! amount_x = L · (1/√P − 1/√Pu)
//! amount_y = L · (√P − √Pl)
//! ```
//!
//! Below the range the composition freezes at 100% X
//! (`L · (1/√Pl − 1/√Pu)`), above it at 100% Y (`L · (√Pu − √Pl)`),
//! continuously with the in-range curve. [`liquidity_from_amounts`] is
//! the branch-matched inverse; in range each token implies a liquidity
//! independently and the *minimum* binds — the scarcer token caps the
//! position.

use crate::domain::{Liquidity, Regime, SqrtPrice, TokenAmounts};
use crate::error::SimError;

/// Validates sqrt-price bounds shared by both directions.
fn check_bounds(sqrt_lower: SqrtPrice, sqrt_upper: SqrtPrice) -> crate::error::Result<()> {
    if sqrt_lower.get() > sqrt_upper.get() {
        return Err(SimError::InvalidRange(
            "lower sqrt price must not exceed upper sqrt price",
        ));
    }
    if sqrt_lower.get() == sqrt_upper.get() {
        return Err(SimError::DegenerateRange(
            "range width is zero; amounts are undefined",
        ));
    }
    Ok(())
}

/// Computes the token composition of a position at a given price.
///
/// Branches on [`Regime`]; out-of-range positions are single-sided.
///
/// # Errors
///
/// - [`SimError::InvalidRange`] if the bounds are inverted.
/// - [`SimError::DegenerateRange`] if the bounds coincide.
///
/// # Examples
///
/// ```
/// use clmm_sim::domain::{Liquidity, SqrtPrice};
/// use clmm_sim::math::amounts_from_liquidity;
///
/// let sp = SqrtPrice::new(1.0).expect("valid");
/// let lower = SqrtPrice::new(0.95).expect("valid");
/// let upper = SqrtPrice::new(1.05).expect("valid");
/// let liq = Liquidity::new(100.0).expect("valid");
///
/// let amounts = amounts_from_liquidity(sp, lower, upper, liq).expect("in range");
/// assert!(amounts.x() > 0.0 && amounts.y() > 0.0);
/// ```
pub fn amounts_from_liquidity(
    sqrt_price: SqrtPrice,
    sqrt_lower: SqrtPrice,
    sqrt_upper: SqrtPrice,
    liquidity: Liquidity,
) -> crate::error::Result<TokenAmounts> {
    check_bounds(sqrt_lower, sqrt_upper)?;

    let l = liquidity.get();
    let (sl, su) = (sqrt_lower.get(), sqrt_upper.get());

    match Regime::classify(sqrt_price, sqrt_lower, sqrt_upper) {
        Regime::BelowRange => TokenAmounts::new(l * (1.0 / sl - 1.0 / su), 0.0),
        Regime::AboveRange => TokenAmounts::new(0.0, l * (su - sl)),
        Regime::InRange => {
            let sp = sqrt_price.get();
            TokenAmounts::new(l * (1.0 / sp - 1.0 / su), l * (sp - sl))
        }
    }
}

/// Derives the liquidity implied by a token deposit at a given price.
///
/// Branch-matched to [`amounts_from_liquidity`]: out of range, only the
/// held token implies liquidity; in range both do, and the minimum of
/// the two binds. Deposits whose ratio is inconsistent with any point on
/// the constant-liquidity curve (e.g. a single-sided deposit at an
/// in-range price) imply zero liquidity — clamped, not an error, so the
/// caller can flag the degenerate case downstream.
///
/// # Errors
///
/// - [`SimError::InvalidRange`] if the bounds are inverted.
/// - [`SimError::DegenerateRange`] if the bounds coincide.
pub fn liquidity_from_amounts(
    sqrt_price: SqrtPrice,
    sqrt_lower: SqrtPrice,
    sqrt_upper: SqrtPrice,
    amounts: &TokenAmounts,
) -> crate::error::Result<Liquidity> {
    check_bounds(sqrt_lower, sqrt_upper)?;

    let (sl, su) = (sqrt_lower.get(), sqrt_upper.get());

    let implied = match Regime::classify(sqrt_price, sqrt_lower, sqrt_upper) {
        Regime::BelowRange => amounts.x() / (1.0 / sl - 1.0 / su),
        Regime::AboveRange => amounts.y() / (su - sl),
        Regime::InRange => {
            let sp = sqrt_price.get();
            let by_x = amounts.x() / (1.0 / sp - 1.0 / su);
            let by_y = amounts.y() / (sp - sl);
            by_x.min(by_y)
        }
    };

    Ok(Liquidity::clamped(implied))
}
