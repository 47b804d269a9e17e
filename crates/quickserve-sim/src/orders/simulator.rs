//! Order lifecycle: generation, admission, completion, and per-tick
//! statistics.
//!
//! The simulator owns every active order. One tick is
//! `generate_orders` followed by `update_metrics`; nothing else mutates the
//! active set.

use std::collections::BTreeMap;

use crate::config::{SimConfig, AGGREGATE_LABEL};
use crate::context::SimContext;
use crate::obs::SimMetrics;

use super::machines::MachinePool;
use super::order::Order;
use super::stats::{CategoryStats, SampleSet};
use super::window::{Sample, SlidingWindow};

/// What one `update_metrics` call did, plus the statistics it published.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub admitted: usize,
    pub completed: usize,
    /// Queued orders dropped without ever reaching a machine.
    pub expired: usize,
    pub pruned: usize,
    /// Keyed by category, plus [`AGGREGATE_LABEL`] for the cross-category
    /// aggregate.
    pub stats: BTreeMap<String, CategoryStats>,
}

pub struct OrderSimulator {
    active: Vec<Order>,
    machines: MachinePool,
    windows: BTreeMap<String, SlidingWindow>,
    total_created: u64,
    next_id: u64,
}

impl OrderSimulator {
    pub fn new(cfg: &SimConfig) -> Self {
        Self {
            active: Vec::new(),
            machines: MachinePool::from_categories(&cfg.categories),
            windows: cfg
                .categories
                .iter()
                .map(|c| (c.item.clone(), SlidingWindow::default()))
                .collect(),
            total_created: 0,
            next_id: 1,
        }
    }

    /// Active orders in arrival order.
    pub fn active(&self) -> &[Order] {
        &self.active
    }

    pub fn machines(&self) -> &MachinePool {
        &self.machines
    }

    pub fn window(&self, item: &str) -> Option<&SlidingWindow> {
        self.windows.get(item)
    }

    pub fn total_created(&self) -> u64 {
        self.total_created
    }

    /// Append one queued order created now. Returns its id.
    pub fn submit(&mut self, ctx: &SimContext, item: &str, processing_ms: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.active.push(Order::new(id, item, processing_ms, ctx.now_ms()));
        self.total_created += 1;
        ctx.metrics.orders_created.inc(&[("item", item)]);
        id
    }

    /// Create this tick's batch of random orders. Returns how many.
    pub fn generate_orders(&mut self, ctx: &mut SimContext) -> usize {
        let now = ctx.now_ms();
        let warmed_up = ctx.warmed_up(now);
        let range = ctx.cfg.orders_per_tick;
        let n = ctx.rng.int_inclusive(range.min, range.max);

        for _ in 0..n {
            let idx = ctx.rng.index(ctx.cfg.categories.len());
            let Some(cat) = ctx.cfg.categories.get(idx) else { continue };
            let item = cat.item.clone();
            let (lo, hi) = (cat.processing_ms.min, cat.processing_ms.max);

            let mut processing_ms = ctx.rng.uniform(lo, hi);
            if warmed_up && ctx.rng.chance(ctx.cfg.slow_machine.probability) {
                processing_ms += ctx.cfg.slow_machine.penalty_ms;
            }
            self.submit(ctx, &item, processing_ms);
        }
        n as usize
    }

    /// Try to put one queued order on a machine.
    ///
    /// `false` (and no change) when the order is unknown, already admitted,
    /// or its category has no free machine.
    pub fn start_processing(&mut self, order_id: u64, ctx: &SimContext) -> bool {
        let now = ctx.now_ms();
        let Some(order) = self.active.iter_mut().find(|o| o.id == order_id) else {
            return false;
        };
        admit(order, &mut self.machines, now, &ctx.metrics)
    }

    /// Admit, complete, prune, and republish every gauge.
    pub fn update_metrics(&mut self, ctx: &SimContext) -> TickReport {
        let now = ctx.now_ms();
        let metrics = &ctx.metrics;

        // 1) admission, in arrival order
        let mut admitted = 0;
        for order in self.active.iter_mut() {
            if order.queued && admit(order, &mut self.machines, now, metrics) {
                admitted += 1;
            }
        }

        // 2) + 3) completion, expiry, and removal
        let mut done = Vec::new();
        let mut expired = 0;
        for order in std::mem::take(&mut self.active) {
            if order.is_completed(now) {
                done.push(order);
            } else if order.is_expired(now) {
                expired += 1;
                metrics.orders_expired.inc(&[("item", order.item.as_str())]);
                tracing::trace!(id = order.id, item = %order.item, "queued order expired");
            } else {
                self.active.push(order);
            }
        }

        for order in &done {
            self.record_completion(order, now, &ctx.cfg, metrics);
        }

        // 4) recompute
        let (pruned, stats) = self.recompute(now, &ctx.cfg, metrics);

        TickReport {
            admitted,
            completed: done.len(),
            expired,
            pruned,
            stats,
        }
    }

    fn record_completion(&mut self, order: &Order, now: f64, cfg: &SimConfig, metrics: &SimMetrics) {
        self.machines.release(&order.item);

        let processing_ms = order.elapsed_ms(now);
        let total_ms = order.total_ms(now);
        let slow = total_ms > cfg.slow_total_ms;

        self.windows.entry(order.item.clone()).or_default().push(Sample {
            at_ms: now,
            processing_ms,
            total_ms,
            slow,
        });

        let labels = [("item", order.item.as_str())];
        metrics.order_processing_ms.observe(&labels, processing_ms);
        metrics.process_sliding_ms.observe(&labels, processing_ms);
        metrics.total_time_ms.observe(&labels, total_ms);
        if slow {
            metrics.slow_orders.inc(&labels);
        }
        tracing::trace!(id = order.id, item = %order.item, processing_ms, total_ms, slow, "order completed");
    }

    fn recompute(
        &mut self,
        now: f64,
        cfg: &SimConfig,
        metrics: &SimMetrics,
    ) -> (usize, BTreeMap<String, CategoryStats>) {
        let mut pruned = 0;
        let mut stats = BTreeMap::new();
        let mut all = SampleSet::default();
        let mut all_queued = 0;

        for cat in &cfg.categories {
            let item = cat.item.as_str();
            let window = self.windows.entry(cat.item.clone()).or_default();
            pruned += window.prune(now, cfg.window.retention_ms);

            let mut set = SampleSet::default();
            let mut queued = 0;
            for order in self.active.iter().filter(|o| o.item == item) {
                let total_ms = order.total_ms(now);
                set.total.push(total_ms);
                set.slow.push(total_ms > cfg.slow_total_ms);
                if order.queued {
                    queued += 1;
                } else {
                    set.processing.push(order.elapsed_ms(now));
                }
            }
            for s in window.recent(now, cfg.window.recency_ms) {
                set.processing.push(s.processing_ms);
                set.total.push(s.total_ms);
                set.slow.push(s.slow);
            }

            let summary = set.summarize(queued, self.machines.busy(item));
            publish(metrics, item, &summary);

            all.extend_from(&set);
            all_queued += queued;
            stats.insert(cat.item.clone(), summary);
        }

        let aggregate = all.summarize(all_queued, self.machines.total_busy());
        publish(metrics, AGGREGATE_LABEL, &aggregate);
        stats.insert(AGGREGATE_LABEL.to_string(), aggregate);

        metrics.orders_generated.set(&[], self.total_created as f64);
        (pruned, stats)
    }
}

/// The sole admission decision point.
fn admit(order: &mut Order, machines: &mut MachinePool, now: f64, metrics: &SimMetrics) -> bool {
    if !order.queued {
        return false;
    }
    if !machines.try_acquire(&order.item) {
        return false;
    }
    order.begin(now);
    metrics
        .order_wait_ms
        .observe(&[("item", order.item.as_str())], order.total_ms(now));
    true
}

/// Write one category's gauges. With no samples at all every derived gauge
/// goes to zero; a tail gauge is only written with two or more samples.
fn publish(metrics: &SimMetrics, item: &str, s: &CategoryStats) {
    let labels = [("item", item)];
    metrics.queued_orders.set(&labels, s.queued as f64);
    metrics.busy_machines.set(&labels, f64::from(s.busy));

    if !s.has_samples() {
        metrics.average_process_ms.set(&labels, 0.0);
        metrics.p99_process_ms.set(&labels, 0.0);
        metrics.average_total_ms.set(&labels, 0.0);
        metrics.p99_total_ms.set(&labels, 0.0);
        metrics.slow_percentage.set(&labels, 0.0);
        return;
    }

    metrics.average_process_ms.set(&labels, s.processing.mean.unwrap_or(0.0));
    if let Some(p99) = s.processing.p99 {
        metrics.p99_process_ms.set(&labels, p99);
    }
    metrics.average_total_ms.set(&labels, s.total.mean.unwrap_or(0.0));
    if let Some(p99) = s.total.p99 {
        metrics.p99_total_ms.set(&labels, p99);
    }
    metrics.slow_percentage.set(&labels, s.slow_percentage.unwrap_or(0.0));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use quickserve_core::clock::{Clock, ManualClock};
    use quickserve_core::rng;

    use super::*;
    use crate::config::{CategoryConfig, MsRange};
    use crate::orders::OrderState;

    fn cfg_with(machines: u32) -> SimConfig {
        SimConfig {
            categories: vec![
                CategoryConfig {
                    item: "fries".into(),
                    processing_ms: MsRange { min: 170.0, max: 200.0 },
                    machines,
                },
                CategoryConfig {
                    item: "milkshake".into(),
                    processing_ms: MsRange { min: 100.0, max: 150.0 },
                    machines,
                },
            ],
            ..SimConfig::default()
        }
    }

    fn ctx(cfg: SimConfig, clock: &ManualClock) -> SimContext {
        SimContext::new(
            cfg,
            Box::new(clock.clone()),
            Box::new(rng::seeded(7)),
            Arc::new(SimMetrics::new()),
        )
    }

    #[test]
    fn start_processing_is_capacity_gated() {
        let clock = ManualClock::new(0.0);
        let ctx = ctx(cfg_with(1), &clock);
        let mut sim = OrderSimulator::new(ctx.cfg());

        let a = sim.submit(&ctx, "fries", 180.0);
        let b = sim.submit(&ctx, "fries", 180.0);

        assert!(sim.start_processing(a, &ctx));
        assert!(!sim.start_processing(a, &ctx), "already admitted");
        assert!(!sim.start_processing(b, &ctx), "no free machine");
        assert!(!sim.start_processing(999, &ctx), "unknown order");

        assert_eq!(sim.machines().busy("fries"), 1);
        assert!(sim.active()[1].queued);
        assert_eq!(sim.active()[1].start_ms, None);
    }

    #[test]
    fn completed_orders_leave_active_set_and_land_in_window_once() {
        let clock = ManualClock::new(0.0);
        let ctx = ctx(cfg_with(10), &clock);
        let mut sim = OrderSimulator::new(ctx.cfg());

        sim.submit(&ctx, "fries", 180.0);
        sim.submit(&ctx, "milkshake", 120.0);
        let report = sim.update_metrics(&ctx);
        assert_eq!(report.admitted, 2);
        assert_eq!(report.completed, 0);

        clock.advance(150.0);
        let report = sim.update_metrics(&ctx);
        assert_eq!(report.completed, 1);
        assert_eq!(sim.active().len(), 1);
        assert_eq!(sim.active()[0].item, "fries");
        assert_eq!(sim.window("milkshake").map(|w| w.len()), Some(1));
        assert_eq!(sim.machines().busy("milkshake"), 0);

        clock.advance(50.0);
        sim.update_metrics(&ctx);
        sim.update_metrics(&ctx);
        assert!(sim.active().is_empty());
        assert_eq!(sim.window("fries").map(|w| w.len()), Some(1));
        assert_eq!(sim.window("milkshake").map(|w| w.len()), Some(1));

        let s = sim.window("fries").and_then(|w| w.iter().next().copied());
        let s = s.expect("fries sample");
        assert_eq!(s.processing_ms, 200.0);
        assert_eq!(s.total_ms, 200.0);
        assert!(!s.slow);
    }

    #[test]
    fn slow_orders_are_counted_by_total_time() {
        let clock = ManualClock::new(0.0);
        let ctx = ctx(cfg_with(1), &clock);
        let mut sim = OrderSimulator::new(ctx.cfg());

        sim.submit(&ctx, "fries", 300.0);
        sim.submit(&ctx, "fries", 350.0);
        sim.update_metrics(&ctx);

        clock.set(300.0);
        sim.update_metrics(&ctx); // first completes and frees the machine
        sim.update_metrics(&ctx); // second admitted at 300, before its expiry at 350
        clock.set(650.0);
        sim.update_metrics(&ctx); // second completes: total 650 > 400

        let m = ctx.metrics();
        assert_eq!(m.slow_orders.get(&[("item", "fries")]), Some(1));
        assert_eq!(m.order_wait_ms.snapshot(&[("item", "fries")]).map(|h| h.count), Some(2));
        assert_eq!(m.total_time_ms.snapshot(&[("item", "fries")]).map(|h| h.sum), Some(950.0));
    }

    #[test]
    fn queued_orders_expire_without_sample_or_release() {
        let clock = ManualClock::new(0.0);
        let ctx = ctx(cfg_with(1), &clock);
        let mut sim = OrderSimulator::new(ctx.cfg());

        let served = sim.submit(&ctx, "fries", 200.0);
        let starved = sim.submit(&ctx, "fries", 150.0);
        sim.update_metrics(&ctx);
        assert!(sim.active().iter().any(|o| o.id == starved && o.queued));

        // still waiting once its own processing time has passed
        clock.set(150.0);
        let report = sim.update_metrics(&ctx);
        assert_eq!(report.expired, 1);
        assert_eq!(report.completed, 0);
        assert!(sim.active().iter().all(|o| o.id != starved));
        assert_eq!(sim.machines().busy("fries"), 1, "expiry frees no machine");
        assert_eq!(sim.window("fries").map(|w| w.len()), Some(0));

        clock.set(200.0);
        let report = sim.update_metrics(&ctx);
        assert_eq!(report.completed, 1);
        assert_eq!(report.expired, 0);
        assert!(sim.active().iter().all(|o| o.id != served));
        assert_eq!(sim.machines().busy("fries"), 0);

        let m = ctx.metrics();
        assert_eq!(m.orders_expired.get(&[("item", "fries")]), Some(1));
        assert_eq!(m.total_time_ms.snapshot(&[("item", "fries")]).map(|h| h.count), Some(1));
        assert_eq!(m.order_wait_ms.snapshot(&[("item", "fries")]).map(|h| h.count), Some(1));
    }

    #[test]
    fn single_sample_leaves_p99_unset() {
        let clock = ManualClock::new(0.0);
        let ctx = ctx(cfg_with(10), &clock);
        let mut sim = OrderSimulator::new(ctx.cfg());

        sim.submit(&ctx, "fries", 180.0);
        sim.update_metrics(&ctx);

        let m = ctx.metrics();
        let fries = [("item", "fries")];
        assert_eq!(m.average_process_ms.get(&fries), Some(0.0));
        assert_eq!(m.p99_process_ms.get(&fries), None);
        assert_eq!(m.p99_total_ms.get(&fries), None);
        assert_eq!(m.busy_machines.get(&fries), Some(1.0));
    }

    #[test]
    fn empty_category_resets_derived_gauges_to_zero() {
        let clock = ManualClock::new(0.0);
        let ctx = ctx(cfg_with(10), &clock);
        let mut sim = OrderSimulator::new(ctx.cfg());

        sim.submit(&ctx, "fries", 100.0);
        sim.submit(&ctx, "fries", 100.0);
        sim.update_metrics(&ctx);
        clock.advance(50.0);
        sim.update_metrics(&ctx);

        let m = ctx.metrics();
        let fries = [("item", "fries")];
        assert_eq!(m.p99_process_ms.get(&fries), Some(50.0));
        assert_eq!(m.average_total_ms.get(&fries), Some(50.0));

        // both complete at 100, then fall out of the 100 ms recency filter
        clock.advance(50.0);
        sim.update_metrics(&ctx);
        clock.advance(101.0);
        let report = sim.update_metrics(&ctx);

        assert!(!report.stats["fries"].has_samples());
        for g in [
            &m.average_process_ms,
            &m.p99_process_ms,
            &m.average_total_ms,
            &m.p99_total_ms,
            &m.slow_percentage,
        ] {
            assert_eq!(g.get(&fries), Some(0.0));
        }
        assert_eq!(m.queued_orders.get(&fries), Some(0.0));
    }

    #[test]
    fn pruned_samples_never_contribute() {
        let clock = ManualClock::new(0.0);
        let mut cfg = cfg_with(10);
        cfg.window.retention_ms = 50.0;
        cfg.window.recency_ms = 1_000.0;
        let ctx = ctx(cfg, &clock);
        let mut sim = OrderSimulator::new(ctx.cfg());

        sim.submit(&ctx, "milkshake", 100.0);
        sim.update_metrics(&ctx);
        clock.set(100.0);
        let report = sim.update_metrics(&ctx);
        assert_eq!(report.stats["milkshake"].processing.count, 1);

        // inside recency, outside retention
        clock.set(151.0);
        let report = sim.update_metrics(&ctx);
        assert_eq!(report.pruned, 1);
        assert_eq!(report.stats["milkshake"].processing.count, 0);
        assert_eq!(sim.window("milkshake").map(|w| w.len()), Some(0));
    }

    #[test]
    fn aggregate_combines_every_category() {
        let clock = ManualClock::new(0.0);
        let ctx = ctx(cfg_with(1), &clock);
        let mut sim = OrderSimulator::new(ctx.cfg());

        sim.submit(&ctx, "fries", 180.0);
        sim.submit(&ctx, "fries", 180.0);
        sim.submit(&ctx, "milkshake", 120.0);
        let report = sim.update_metrics(&ctx);

        let all = &report.stats[AGGREGATE_LABEL];
        assert_eq!(all.queued, 1);
        assert_eq!(all.busy, 2);
        assert_eq!(all.total.count, 3);
        assert_eq!(all.processing.count, 2);
        assert_eq!(ctx.metrics().busy_machines.get(&[("item", "all")]), Some(2.0));
        assert_eq!(ctx.metrics().orders_generated.get(&[]), Some(3.0));
    }

    #[test]
    fn generated_orders_follow_configured_ranges() {
        let clock = ManualClock::new(0.0);
        let mut ctx = ctx(cfg_with(10), &clock);
        let mut sim = OrderSimulator::new(ctx.cfg());

        let mut created = 0;
        for _ in 0..200 {
            let n = sim.generate_orders(&mut ctx);
            assert!((2..=5).contains(&n));
            created += n;
        }
        assert_eq!(sim.total_created(), created as u64);
        for o in sim.active() {
            assert_eq!(o.state(clock.now_ms()), OrderState::Queued);
            let range = ctx.cfg().category(&o.item).map(|c| c.processing_ms);
            let range = range.expect("known category");
            // no penalty before warm-up
            assert!(o.processing_ms >= range.min && o.processing_ms <= range.max);
        }
    }
}
