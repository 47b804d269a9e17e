//! Tick loop.
//!
//! One task owns the simulator and ambient state and runs
//! `generate_orders -> update_metrics -> perturb` then sleeps the tick
//! interval, until the shutdown future resolves.

use std::future::Future;
use std::time::Duration;

use crate::ambient::AmbientState;
use crate::config::AGGREGATE_LABEL;
use crate::context::SimContext;
use crate::orders::{OrderSimulator, TickReport};

/// Heartbeat log cadence, in ticks.
const HEARTBEAT_TICKS: u64 = 1_000;

pub struct Generator {
    ctx: SimContext,
    orders: OrderSimulator,
    ambient: Option<AmbientState>,
    ticks: u64,
}

impl Generator {
    pub fn new(ctx: SimContext) -> Self {
        let orders = OrderSimulator::new(ctx.cfg());
        let ambient = ctx
            .cfg()
            .ambient
            .enabled
            .then(|| AmbientState::new(&ctx.cfg().ambient));
        Self {
            ctx,
            orders,
            ambient,
            ticks: 0,
        }
    }

    pub fn ctx(&self) -> &SimContext {
        &self.ctx
    }

    pub fn orders(&self) -> &OrderSimulator {
        &self.orders
    }

    pub fn ambient(&self) -> Option<&AmbientState> {
        self.ambient.as_ref()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one full tick.
    pub fn tick(&mut self) -> TickReport {
        let generated = self.orders.generate_orders(&mut self.ctx);
        let report = self.orders.update_metrics(&self.ctx);
        if let Some(ambient) = self.ambient.as_mut() {
            ambient.perturb(&mut self.ctx);
        }

        self.ticks += 1;
        self.ctx.metrics.ticks.inc(&[]);

        tracing::trace!(
            tick = self.ticks,
            generated,
            admitted = report.admitted,
            completed = report.completed,
            expired = report.expired,
            pruned = report.pruned,
            "tick"
        );
        if self.ticks % HEARTBEAT_TICKS == 0 {
            if let Some(all) = report.stats.get(AGGREGATE_LABEL) {
                tracing::debug!(
                    tick = self.ticks,
                    created = self.orders.total_created(),
                    queued = all.queued,
                    busy = all.busy,
                    avg_total_ms = ?all.total.mean,
                    p99_total_ms = ?all.total.p99,
                    slow_pct = ?all.slow_percentage,
                    "order simulator heartbeat"
                );
            }
        }
        report
    }

    /// Tick until `shutdown` resolves. A tick in progress always finishes.
    pub async fn run_until<F>(mut self, shutdown: F) -> Self
    where
        F: Future<Output = ()>,
    {
        let interval = Duration::from_millis(self.ctx.cfg().tick_interval_ms);
        tokio::pin!(shutdown);

        loop {
            self.tick();
            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }

        tracing::info!(ticks = self.ticks, created = self.orders.total_created(), "tick loop stopped");
        self
    }
}
