//! Property-based tests using `proptest` for simulator invariants.
//!
//! Covers the crate-level properties:
//!
//! 1. **Fixed-point round trip** — `tick_at_sqrt_price_x64` inverts
//!    `sqrt_price_x64_at_tick` exactly.
//! 2. **Monotonicity** — the fixed-point ladder is strictly increasing.
//! 3. **Float round trip** — `tick_at_price(price_at_tick(t))` within
//!    ±1 tick, and `price_at_tick(tick_at_price(p))` never exceeds `p`
//!    beyond float tolerance.
//! 4. **Alignment** — `align_tick_to_spacing` is idempotent and never
//!    narrows toward the requested side.
//! 5. **Regime consistency** — out-of-range positions are single-sided.
//! 6. **Liquidity inverse** — amounts ∘ liquidity ≈ identity in range.
//! 7. **IL zero point and sign** — no IL at the entry price, never a
//!    gain for on-curve entries.
//! 8. **Cross-validation** — value-based IL matches the analytical
//!    closed form for geometric-centered ranges.
//! 9. **Curve determinism** — identical inputs, identical sequences.

use proptest::prelude::*;

use crate::domain::{Price, PriceRange, Regime, SqrtPrice, TokenAmounts};
use crate::math::{
    align_tick_to_spacing, amounts_from_liquidity, liquidity_from_amounts, price_at_tick,
    sqrt_price_x64_at_tick, tick_at_price, tick_at_sqrt_price_x64,
};
use crate::sim::il::{analytical_il, il_curve, value_based_il, CurveGrid};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tick(v: i32) -> crate::domain::Tick {
    let Ok(t) = crate::domain::Tick::new(v) else {
        panic!("valid tick expected");
    };
    t
}

fn price(v: f64) -> Price {
    let Ok(p) = Price::new(v) else {
        panic!("valid price expected");
    };
    p
}

fn sqrt_price(v: f64) -> SqrtPrice {
    let Ok(s) = SqrtPrice::new(v) else {
        panic!("valid sqrt price expected");
    };
    s
}

/// Tick-symmetric range around a center tick, with the on-curve deposit
/// of one unit of liquidity at the center price.
fn centered_fixture(center: i32, half_width: i32) -> (PriceRange, Price, TokenAmounts) {
    let Ok(range) = PriceRange::new(tick(center - half_width), tick(center + half_width)) else {
        panic!("valid range expected");
    };
    let Ok(entry) = price_at_tick(tick(center)) else {
        panic!("valid center price expected");
    };
    let s0 = entry.sqrt().get();
    let sl = range.sqrt_price_lower().get();
    let su = range.sqrt_price_upper().get();
    let Ok(deposit) = TokenAmounts::new(1.0 / s0 - 1.0 / su, s0 - sl) else {
        panic!("valid deposit expected");
    };
    (range, entry, deposit)
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Ticks comfortably inside the supported span.
fn tick_strategy() -> impl Strategy<Value = i32> {
    -400_000i32..=400_000i32
}

/// Prices across eight orders of magnitude.
fn price_strategy() -> impl Strategy<Value = f64> {
    (-40i32..=40i32, 1_000u32..=9_999u32)
        .prop_map(|(exp, mantissa)| f64::from(mantissa) / 1_000.0 * 2f64.powi(exp))
}

/// Standard pool spacings.
fn spacing_strategy() -> impl Strategy<Value = u16> {
    prop_oneof![Just(1u16), Just(10), Just(60), Just(200)]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    // -- 1. Fixed-point round trip ------------------------------------------

    #[test]
    fn prop_fixed_point_round_trip_exact(t in tick_strategy()) {
        let Ok(sp) = sqrt_price_x64_at_tick(tick(t)) else {
            panic!("forward conversion failed for tick {t}");
        };
        let Ok(rt) = tick_at_sqrt_price_x64(sp) else {
            panic!("inverse conversion failed for tick {t}");
        };
        prop_assert_eq!(rt.get(), t);
    }

    // -- 2. Monotonicity ----------------------------------------------------

    #[test]
    fn prop_ladder_strictly_increasing(t in -400_000i32..400_000i32, step in 1i32..=1_000i32) {
        let higher = (t + step).min(400_000);
        let Ok(lo) = sqrt_price_x64_at_tick(tick(t)) else {
            panic!("forward conversion failed");
        };
        let Ok(hi) = sqrt_price_x64_at_tick(tick(higher)) else {
            panic!("forward conversion failed");
        };
        prop_assert!(hi > lo);
    }

    // -- 3. Float round trip ------------------------------------------------

    #[test]
    fn prop_float_round_trip_within_one_tick(t in tick_strategy()) {
        let Ok(p) = price_at_tick(tick(t)) else {
            panic!("price_at_tick failed");
        };
        let Ok(rt) = tick_at_price(p) else {
            panic!("tick_at_price failed");
        };
        prop_assert!((rt.get() - t).abs() <= 1);
    }

    #[test]
    fn prop_tick_price_floor_contract(p in price_strategy()) {
        let Ok(t) = tick_at_price(price(p)) else {
            panic!("tick_at_price failed for {p}");
        };
        let Ok(back) = price_at_tick(t) else {
            panic!("price_at_tick failed");
        };
        // Floor semantics up to the snap tolerance.
        prop_assert!(back.get() <= p * (1.0 + 1e-9));
    }

    // -- 4. Alignment -------------------------------------------------------

    #[test]
    fn prop_alignment_idempotent_and_directional(
        t in -100_000i32..=100_000i32,
        spacing in spacing_strategy(),
        round_up in any::<bool>(),
    ) {
        let Ok(once) = align_tick_to_spacing(tick(t), spacing, round_up) else {
            panic!("alignment failed");
        };
        let Ok(twice) = align_tick_to_spacing(once, spacing, round_up) else {
            panic!("re-alignment failed");
        };
        prop_assert_eq!(once, twice);
        prop_assert!(once.is_aligned(spacing));
        if round_up {
            prop_assert!(once.get() >= t);
        } else {
            prop_assert!(once.get() <= t);
        }
        prop_assert!((once.get() - t).abs() < i32::from(spacing));
    }

    // -- 5. Regime consistency ----------------------------------------------

    #[test]
    fn prop_out_of_range_positions_are_single_sided(
        sp in 0.01f64..100.0f64,
        liquidity in 0.001f64..1_000_000.0f64,
    ) {
        let lower = sqrt_price(0.9);
        let upper = sqrt_price(1.1);
        let Ok(liq) = crate::domain::Liquidity::new(liquidity) else {
            panic!("valid liquidity expected");
        };
        let Ok(amounts) = amounts_from_liquidity(sqrt_price(sp), lower, upper, liq) else {
            panic!("amounts failed");
        };
        match Regime::classify(sqrt_price(sp), lower, upper) {
            Regime::BelowRange => prop_assert!(amounts.y() == 0.0),
            Regime::AboveRange => prop_assert!(amounts.x() == 0.0),
            Regime::InRange => {
                prop_assert!(amounts.x() > 0.0);
                prop_assert!(amounts.y() > 0.0);
            }
        }
    }

    // -- 6. Liquidity inverse -----------------------------------------------

    #[test]
    fn prop_liquidity_inverse_round_trip(
        sp in 0.91f64..1.09f64,
        liquidity in 0.001f64..1_000_000.0f64,
    ) {
        let lower = sqrt_price(0.9);
        let upper = sqrt_price(1.1);
        let Ok(liq) = crate::domain::Liquidity::new(liquidity) else {
            panic!("valid liquidity expected");
        };
        let Ok(amounts) = amounts_from_liquidity(sqrt_price(sp), lower, upper, liq) else {
            panic!("amounts failed");
        };
        let Ok(implied) = liquidity_from_amounts(sqrt_price(sp), lower, upper, &amounts) else {
            panic!("liquidity failed");
        };
        let rel = (implied.get() - liquidity).abs() / liquidity;
        prop_assert!(rel < 1e-9, "round trip drifted: {} vs {liquidity}", implied.get());
    }

    // -- 7. IL zero point and sign ------------------------------------------

    #[test]
    fn prop_il_zero_at_entry(center in -20_000i32..=20_000i32, half in 100i32..=5_000i32) {
        let (range, entry, deposit) = centered_fixture(center, half);
        let Ok(b) = value_based_il(entry, entry, &range, &deposit) else {
            panic!("value_based_il failed");
        };
        prop_assert!(b.il_percent().abs() < 1e-9);
    }

    #[test]
    fn prop_il_never_positive_for_on_curve_entry(
        center in -20_000i32..=20_000i32,
        half in 100i32..=5_000i32,
        shift in -80.0f64..=300.0f64,
    ) {
        let (range, entry, deposit) = centered_fixture(center, half);
        let Some(target) = entry.shifted_by_percent(shift) else {
            return Ok(());
        };
        let Ok(b) = value_based_il(entry, target, &range, &deposit) else {
            panic!("value_based_il failed");
        };
        prop_assert!(b.il_percent() <= 1e-9);
    }

    // -- 8. Analytical cross-validation -------------------------------------

    #[test]
    fn prop_value_based_matches_analytical_in_range(
        center in -20_000i32..=20_000i32,
        half in 400i32..=5_000i32,
        ratio in 0.97f64..=1.03f64,
    ) {
        let (range, entry, deposit) = centered_fixture(center, half);
        let Ok(expected) = analytical_il(ratio, range.price_lower(), range.price_upper())
        else {
            panic!("analytical_il failed");
        };
        let Ok(target) = Price::new(entry.get() * ratio) else {
            panic!("valid target expected");
        };
        let Ok(b) = value_based_il(entry, target, &range, &deposit) else {
            panic!("value_based_il failed");
        };
        prop_assert!(
            (b.il_percent() - expected).abs() < 1e-4,
            "value-based {} vs analytical {expected}",
            b.il_percent()
        );
    }

    // -- 9. Curve determinism -----------------------------------------------

    #[test]
    fn prop_curve_deterministic(
        center in -10_000i32..=10_000i32,
        half in 100i32..=3_000i32,
        steps in 1u32..=60u32,
    ) {
        let (range, entry, deposit) = centered_fixture(center, half);
        let Ok(grid) = CurveGrid::new(-60.0, 120.0, steps) else {
            panic!("valid grid expected");
        };
        let a = il_curve(entry, &range, &deposit, &grid);
        let b = il_curve(entry, &range, &deposit, &grid);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), steps as usize + 1);
        prop_assert!(a.iter().all(|p| p.target_price().get() > 0.0));
    }
}
