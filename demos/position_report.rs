//! Position simulation walkthrough.
//!
//! Builds a market snapshot, simulates a concentrated position over a
//! ±5% range, prints the IL curve and yield figures, and asks the
//! rebalance advisor about a narrower candidate range.
//!
//! # Run
//!
//! ```bash
//! cargo run --example position_report
//! ```

use clmm_sim::prelude::*;

fn main() -> clmm_sim::Result<()> {
    println!("=== CLMM Position Simulation ===\n");

    // ── 1. Market snapshot ──────────────────────────────────────────────
    //    Price 1.0 (Y per X), 0.30% fee tier, spacing 10, $1M TVL,
    //    $250k daily volume, $50/day reward emissions.
    let snapshot = PoolSnapshot::new(
        Price::new(1.0)?,
        FeeRate::RATE_0_30_PERCENT,
        10,
        Decimals::new(6)?,
        Decimals::new(18)?,
        1_000_000.0,
        250_000.0,
        50.0,
    )?;
    println!("Snapshot: price {}, fee {}", snapshot.current_price(), snapshot.fee_rate());
    println!(
        "  TVL ${:.0}, volume ${:.0}/day",
        snapshot.tvl_usd(),
        snapshot.daily_volume_usd()
    );

    // ── 2. Choose a range: ±5% around the current price ─────────────────
    let range = PriceRange::centered(snapshot.current_price(), 0.1, snapshot.tick_spacing())?;
    println!("\nRange: {range}");
    println!("  width ratio:       {:.4}", range.width_ratio());

    // ── 3. Simulate a fresh 5 000 + 5 000 deposit ───────────────────────
    let spec = PositionSpec::new(
        TokenAmounts::new(5_000.0, 5_000.0)?,
        snapshot.current_price(),
        range,
        0.0,
    )?;
    let grid = CurveGrid::new(-30.0, 30.0, 12)?;
    let report = simulate(&snapshot, &spec, &grid)?;

    println!("\n--- Position ---");
    println!("  liquidity:         {:.2}", report.liquidity().get());
    println!("  composition:       {}", report.amounts());
    println!("  value:             {:.2}", report.position_value());
    println!("  regime:            {}", report.regime());

    // ── 4. IL curve over a ±30% price sweep ─────────────────────────────
    println!("\n--- IL curve ---");
    println!("  {:>8}  {:>10}  {:>10}  {:>6}", "move", "CLMM IL", "V2 IL", "amp");
    for point in report.curve() {
        println!(
            "  {:>7.1}%  {:>9.3}%  {:>9.3}%  {:>6.1}",
            point.price_change_percent(),
            point.il_percent(),
            point.il_reference_percent(),
            point.amplification(),
        );
    }

    // ── 5. Yield and health ─────────────────────────────────────────────
    let fees = report.fee_yield();
    println!("\n--- Yield ---");
    println!("  capital efficiency: {:.1}x", fees.capital_efficiency());
    println!("  LP fees:            ${:.2}/day", fees.daily_fees_lp_usd());
    println!("  fee APY:            {:.2}%", fees.apy_percent());
    println!("  reward APR:         {:.2}%", report.reward_apr_percent());

    let health = report.health();
    println!("\n--- Health ---");
    println!("  score:              {:.0}/100 ({})", health.score(), health.status());
    println!("  note:               {}", health.summary());

    // ── 6. Ask the advisor about a narrower range ───────────────────────
    let candidate = PriceRange::centered(snapshot.current_price(), 0.04, snapshot.tick_spacing())?;
    let scenario = evaluate_rebalance(&snapshot, &range, &candidate, report.position_value(), 2.0)?;

    println!("\n--- Rebalance to {candidate} ---");
    println!("  projected APY:      {:.2}%", scenario.projected_apy_percent());
    println!("  fee delta:          ${:+.2}/day", scenario.daily_fee_delta_usd());
    println!("  break-even:         {:.1} days", scenario.break_even_days());
    println!("  verdict:            {}", scenario.recommendation());
    println!("  reason:             {}", scenario.reason());

    println!("\n=== Done ===");
    Ok(())
}
