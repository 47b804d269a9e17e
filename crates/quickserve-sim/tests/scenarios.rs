//! End-to-end simulator scenarios driven by a manual clock and seeded RNG.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use quickserve_core::clock::{Clock, ManualClock};
use quickserve_core::rng;
use quickserve_sim::config::{self, SimConfig};
use quickserve_sim::context::SimContext;
use quickserve_sim::obs::SimMetrics;
use quickserve_sim::orders::{OrderSimulator, OrderState};
use quickserve_sim::runner::Generator;

fn context(cfg: SimConfig, clock: &ManualClock, seed: u64) -> SimContext {
    SimContext::new(
        cfg,
        Box::new(clock.clone()),
        Box::new(rng::seeded(seed)),
        Arc::new(SimMetrics::new()),
    )
}

#[test]
fn capacity_one_admits_second_order_after_first_vacates() {
    let cfg = config::load_from_str(
        r#"
version: 1
categories:
  - item: fries
    processing_ms: { min: 170, max: 200 }
    machines: 1
"#,
    )
    .unwrap();
    let clock = ManualClock::new(1_000.0);
    let ctx = context(cfg, &clock, 1);
    let mut sim = OrderSimulator::new(ctx.cfg());

    let first = sim.submit(&ctx, "fries", 180.0);
    let second = sim.submit(&ctx, "fries", 190.0);

    sim.update_metrics(&ctx);
    let now = clock.now_ms();
    let state = |sim: &OrderSimulator, id: u64, now: f64| {
        sim.active().iter().find(|o| o.id == id).map(|o| o.state(now))
    };
    assert_eq!(state(&sim, first, now), Some(OrderState::Processing));
    assert_eq!(state(&sim, second, now), Some(OrderState::Queued));

    // still running: the second order keeps waiting
    clock.advance(100.0);
    sim.update_metrics(&ctx);
    assert_eq!(state(&sim, second, clock.now_ms()), Some(OrderState::Queued));

    // first completes and vacates the machine
    clock.advance(80.0);
    let report = sim.update_metrics(&ctx);
    assert_eq!(report.completed, 1);
    assert_eq!(state(&sim, first, clock.now_ms()), None);
    assert_eq!(sim.machines().busy("fries"), 0);

    // next tick admits the second order
    clock.advance(10.0);
    let report = sim.update_metrics(&ctx);
    assert_eq!(report.admitted, 1);
    let admitted = sim.active().iter().find(|o| o.id == second).unwrap();
    assert_eq!(admitted.state(clock.now_ms()), OrderState::Processing);
    assert_eq!(admitted.start_ms, Some(1_190.0));
    assert_eq!(sim.machines().busy("fries"), 1);
}

#[test]
fn invariants_hold_over_many_ticks() {
    let mut cfg = SimConfig::default();
    for c in &mut cfg.categories {
        c.machines = 3;
    }
    let clock = ManualClock::new(0.0);
    let mut ctx = context(cfg, &clock, 99);
    let mut sim = OrderSimulator::new(ctx.cfg());

    let mut recorded = 0usize;
    for _ in 0..2_000 {
        sim.generate_orders(&mut ctx);

        let now = clock.now_ms();
        let completing: Vec<u64> = sim
            .active()
            .iter()
            .filter(|o| o.is_completed(now))
            .map(|o| o.id)
            .collect();
        let window_before: usize = ["fries", "milkshake"]
            .iter()
            .map(|i| sim.window(i).map_or(0, |w| w.len()))
            .sum();

        let report = sim.update_metrics(&ctx);

        // completed orders leave the active set
        for id in &completing {
            assert!(sim.active().iter().all(|o| o.id != *id));
        }
        // and land in a window exactly once (nothing is old enough to prune)
        let window_after: usize = ["fries", "milkshake"]
            .iter()
            .map(|i| sim.window(i).map_or(0, |w| w.len()))
            .sum();
        assert_eq!(report.pruned, 0);
        assert_eq!(window_after, window_before + report.completed);
        assert!(report.completed >= completing.len());
        recorded += report.completed;

        for item in ["fries", "milkshake"] {
            let busy = sim.machines().busy(item);
            assert!(busy <= sim.machines().capacity(item));

            let processing = sim.active().iter().filter(|o| o.item == item && !o.queued).count();
            assert_eq!(processing as u32, busy, "busy count matches admitted orders");
        }
        for o in sim.active() {
            assert_eq!(o.queued, o.start_ms.is_none());
            assert!(!o.is_expired(now), "expired orders leave the active set");
        }

        clock.advance(4.0);
    }

    assert!(recorded > 0);
    let m = ctx.metrics();
    let counted: u64 = ["fries", "milkshake"]
        .iter()
        .map(|i| m.order_processing_ms.snapshot(&[("item", i)]).map_or(0, |h| h.count))
        .sum();
    assert_eq!(counted as usize, recorded);
}

#[test]
fn warm_up_penalty_fraction_matches_probability() {
    let cfg = SimConfig::default();
    let probability = cfg.slow_machine.probability;
    let clock = ManualClock::new(0.0);
    let mut ctx = context(cfg, &clock, 2024);
    let mut sim = OrderSimulator::new(ctx.cfg());

    // before warm-up nothing is inflated
    for _ in 0..500 {
        sim.generate_orders(&mut ctx);
    }
    let inflated = |sim: &OrderSimulator, ctx: &SimContext, skip: usize| {
        let orders = &sim.active()[skip..];
        let n = orders
            .iter()
            .filter(|o| o.processing_ms > ctx.cfg().category(&o.item).unwrap().processing_ms.max)
            .count();
        (n, orders.len())
    };
    assert_eq!(inflated(&sim, &ctx, 0).0, 0);

    clock.advance(ctx.cfg().slow_machine.warmup_ms);
    let skip = sim.active().len();
    for _ in 0..10_000 {
        sim.generate_orders(&mut ctx);
    }
    let (n, total) = inflated(&sim, &ctx, skip);
    let fraction = n as f64 / total as f64;
    assert!(total > 30_000);
    assert!(
        (fraction - probability).abs() < 0.01,
        "fraction={fraction} probability={probability}"
    );
}

#[test]
fn active_set_stays_bounded_under_default_load() {
    let clock = ManualClock::new(0.0);
    let ctx = context(SimConfig::default(), &clock, 77);
    let metrics = Arc::clone(ctx.metrics());
    let mut generator = Generator::new(ctx);

    // arrivals outpace default machine throughput; anything alive was
    // created within the last two maximum processing times plus a tick
    let longest = generator
        .ctx()
        .cfg()
        .categories
        .iter()
        .map(|c| c.processing_ms.max)
        .fold(0.0, f64::max);
    let per_tick = f64::from(generator.ctx().cfg().orders_per_tick.max);
    let interval = generator.ctx().cfg().tick_interval_ms as f64;
    let bound = ((2.0 * longest / interval + 2.0) * per_tick) as usize;

    let mut expired = 0;
    for _ in 0..6_000 {
        let report = generator.tick();
        expired += report.expired;
        let active = generator.orders().active().len();
        assert!(active <= bound, "active set grew to {active} (bound {bound})");
        clock.advance(interval);
    }

    assert!(expired > 0);
    let dropped: u64 = ["fries", "milkshake"]
        .iter()
        .map(|i| metrics.orders_expired.get(&[("item", i)]).unwrap_or(0))
        .sum();
    assert_eq!(dropped as usize, expired);
    let queued = metrics.queued_orders.get(&[("item", "all")]).unwrap();
    assert!(queued <= bound as f64);
}

#[test]
fn generator_exports_a_scrapeable_snapshot() {
    let clock = ManualClock::new(0.0);
    let ctx = context(SimConfig::default(), &clock, 5);
    let metrics = Arc::clone(ctx.metrics());
    let mut generator = Generator::new(ctx);

    for _ in 0..50 {
        generator.tick();
        clock.advance(10.0);
    }

    let text = metrics.render();
    assert!(text.contains("# TYPE fastfood_orders_total counter"));
    assert!(text.contains("fastfood_busy_machines{item=\"all\"}"));
    assert!(text.contains("fastfood_order_processing_milliseconds_bucket{item=\"fries\",le=\"+Inf\"}"));
    assert!(text.contains("restroom_occupancy{restroom=\"men\"}"));
    assert!(text.contains("quickserve_sim_ticks_total 50\n"));
}
