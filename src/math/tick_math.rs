//! Tick-to-price conversion on the `1.0001^tick` ladder.
//!
//! The precision-critical direction, tick → sqrt price, runs in Q64.64
//! fixed point: a doubling ladder multiplies precomputed constants
//! `sqrt(1.0001)^(2^i) * 2^64`, one per set bit of the tick magnitude,
//! with 256-bit intermediates. The result is bit-reproducible across
//! platforms and strictly monotonic in tick, which a floating
//! `powf`/`sqrt` round trip does not guarantee.
//!
//! The inverse direction uses a logarithm (the one deliberate floating-
//! point step) and then corrects against the forward ladder so the
//! returned tick is the greatest whose fixed-point sqrt price does not
//! exceed the input.
//!
//! # Functions
//!
//! - [`sqrt_price_x64_at_tick`] — Q64.64 `sqrt(1.0001^tick)`.
//! - [`tick_at_sqrt_price_x64`] — floor-semantics inverse.
//! - [`price_at_tick`] / [`tick_at_price`] — floating convenience
//!   wrappers with `tick = floor(log_1.0001(price))`.
//! - [`align_tick_to_spacing`] — floor/ceil a tick onto a spacing grid.

use primitive_types::U256;

use crate::domain::{Price, SqrtPriceX64, Tick};
use crate::error::SimError;

/// Base of the tick-price exponential: `price = BASE^tick`.
const BASE: f64 = 1.0001;

/// Tolerance for snapping a floating-point tick value to the nearest
/// integer. This prevents round-trip errors caused by IEEE 754 rounding
/// when converting `tick → price → tick`.
const SNAP_EPSILON: f64 = 1e-9;

/// Q64.64 ladder constants: `floor(sqrt(1.0001)^(2^i) * 2^64)` for
/// `i = 0..19`. Bit 18 covers `2^18 = 262144`, enough for the maximum
/// tick magnitude of 443 636.
const SQRT_LADDER: [u128; 19] = [
    18_447_666_387_855_959_850,
    18_448_588_748_116_922_571,
    18_450_433_606_991_734_263,
    18_454_123_878_217_468_680,
    18_461_506_635_090_006_701,
    18_476_281_010_653_910_144,
    18_505_865_242_158_250_041,
    18_565_175_891_880_433_522,
    18_684_368_066_214_940_582,
    18_925_053_041_275_764_671,
    19_415_764_168_677_886_926,
    20_435_687_552_633_177_494,
    22_639_080_592_224_303_007,
    27_784_196_929_998_399_742,
    41_848_122_137_994_986_128,
    94_936_283_578_220_370_716,
    488_590_176_327_622_479_860,
    12_941_056_668_319_229_769_860,
    9_078_618_265_828_848_800_676_189,
];

/// Computes the Q64.64 sqrt price at a tick: `sqrt(1.0001^tick) * 2^64`.
///
/// Positive magnitudes run the multiplication ladder; negative ticks
/// invert the positive result (`2^128 / ratio`, the Q64.64 reciprocal).
/// Strictly increasing in tick.
///
/// # Errors
///
/// Returns [`SimError::InvalidPrice`] if the result falls outside the
/// representable span (cannot occur for a validated [`Tick`], but
/// guarded for safety).
///
/// # Examples
///
/// ```
/// use clmm_sim::domain::{SqrtPriceX64, Tick};
/// use clmm_sim::math::sqrt_price_x64_at_tick;
///
/// let sp = sqrt_price_x64_at_tick(Tick::ZERO).expect("tick 0 is valid");
/// assert_eq!(sp, SqrtPriceX64::ONE);
/// ```
#[must_use = "this returns the computed sqrt price and does not modify state"]
pub fn sqrt_price_x64_at_tick(tick: Tick) -> crate::error::Result<SqrtPriceX64> {
    let abs_tick = tick.get().unsigned_abs();

    let mut ratio = U256::from(1u128 << 64);
    for (bit, multiplier) in SQRT_LADDER.iter().enumerate() {
        if abs_tick & (1u32 << bit) != 0 {
            ratio = (ratio * U256::from(*multiplier)) >> 64u32;
        }
    }

    if tick.get() < 0 {
        ratio = (U256::one() << 128u32) / ratio;
    }

    SqrtPriceX64::new(ratio.low_u128())
}

/// Computes the greatest tick whose Q64.64 sqrt price is ≤ the input.
///
/// The logarithmic estimate is corrected against
/// [`sqrt_price_x64_at_tick`], so the floor semantics match the forward
/// conversion exactly and `tick_at_sqrt_price_x64(sqrt_price_x64_at_tick(t)) == t`
/// for every valid tick.
///
/// # Errors
///
/// Returns [`SimError::InvalidTick`] if the corrected tick leaves the
/// valid range (only possible for inputs at the very edge of the span).
#[must_use = "this returns the computed tick and does not modify state"]
pub fn tick_at_sqrt_price_x64(sqrt_price: SqrtPriceX64) -> crate::error::Result<Tick> {
    // tick = log_1.0001(price) = 2 * ln(sqrt_price) / ln(1.0001)
    let raw = 2.0 * sqrt_price.to_float().get().ln() / BASE.ln();

    let rounded = raw.round();
    let estimate = if (raw - rounded).abs() < SNAP_EPSILON {
        rounded
    } else {
        raw.floor()
    };

    #[allow(clippy::cast_possible_truncation)]
    let mut tick = (estimate as i32).clamp(Tick::MIN.get(), Tick::MAX.get());

    // The float estimate is within a small fraction of a tick; one
    // correction step in each direction restores exact floor semantics.
    if sqrt_price_x64_at_tick(Tick::new(tick)?)? > sqrt_price {
        tick -= 1;
    } else if tick < Tick::MAX.get() && sqrt_price_x64_at_tick(Tick::new(tick + 1)?)? <= sqrt_price
    {
        tick += 1;
    }

    Tick::new(tick)
}

/// Computes the price at a given tick: `price = 1.0001^tick`.
///
/// All valid [`Tick`] values produce finite, strictly positive prices.
///
/// # Errors
///
/// Returns [`SimError::InvalidPrice`] if the computed price is not
/// finite or not positive (should not occur for valid ticks, but guarded
/// for safety).
///
/// # Examples
///
/// ```
/// use clmm_sim::domain::Tick;
/// use clmm_sim::math::price_at_tick;
///
/// let price = price_at_tick(Tick::ZERO).expect("tick 0 is valid");
/// assert!((price.get() - 1.0).abs() < f64::EPSILON);
/// ```
#[must_use = "this returns the computed price and does not modify state"]
pub fn price_at_tick(tick: Tick) -> crate::error::Result<Price> {
    #[allow(clippy::cast_lossless)]
    let price = BASE.powf(tick.get() as f64);
    Price::new(price)
}

/// Computes the greatest tick whose price is ≤ the given price.
///
/// Implements `floor(log_1.0001(price))` with a snap-to-nearest
/// adjustment (within [`SNAP_EPSILON`]) so that
/// `tick_at_price(price_at_tick(t)) == t` for all valid ticks.
///
/// # Errors
///
/// Returns [`SimError::InvalidTick`] if the resulting tick falls outside
/// the valid range.
#[must_use = "this returns the computed tick and does not modify state"]
pub fn tick_at_price(price: Price) -> crate::error::Result<Tick> {
    let raw = price.get().ln() / BASE.ln();

    let rounded = raw.round();
    let tick_f64 = if (raw - rounded).abs() < SNAP_EPSILON {
        rounded
    } else {
        raw.floor()
    };

    if !tick_f64.is_finite() {
        return Err(SimError::InvalidTick("price produces non-finite tick value"));
    }

    // Values outside i32 are caught by Tick::new after saturation.
    #[allow(clippy::cast_possible_truncation)]
    let tick_i32 = tick_f64 as i32;
    Tick::new(tick_i32)
}

/// Aligns a tick onto a spacing grid.
///
/// Lower range bounds pass `round_up = false` (floor toward −∞), upper
/// bounds pass `round_up = true` (ceil toward +∞), so an automatically
/// centered range never narrows below the caller's request. Alignment is
/// Euclidean, hence idempotent and correct for negative ticks.
///
/// # Errors
///
/// - [`SimError::InvalidConfiguration`] if `spacing` is zero.
/// - [`SimError::InvalidTick`] if the aligned tick leaves the valid
///   range.
///
/// # Examples
///
/// ```
/// use clmm_sim::domain::Tick;
/// use clmm_sim::math::align_tick_to_spacing;
///
/// let tick = Tick::new(-95).expect("valid tick");
/// let lower = align_tick_to_spacing(tick, 10, false).expect("aligns");
/// let upper = align_tick_to_spacing(tick, 10, true).expect("aligns");
/// assert_eq!(lower.get(), -100);
/// assert_eq!(upper.get(), -90);
/// ```
pub fn align_tick_to_spacing(
    tick: Tick,
    spacing: u16,
    round_up: bool,
) -> crate::error::Result<Tick> {
    if spacing == 0 {
        return Err(SimError::InvalidConfiguration(
            "tick spacing must be greater than zero",
        ));
    }

    let step = i32::from(spacing);
    let rem = tick.get().rem_euclid(step);
    if rem == 0 {
        return Ok(tick);
    }

    let floored = tick.get() - rem;
    let aligned = if round_up { floored + step } else { floored };
    Tick::new(aligned)
}
