//! Metric families published by the order exporter.

use quickserve_core::obs::{CounterVec, GaugeVec, HistogramVec};

/// Queue wait before a machine picks the order up.
pub const WAIT_BUCKETS_MS: [f64; 10] = [0.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1_000.0, 2_500.0, 5_000.0];
/// Time on the machine; the configured ranges sit between 100 and 200 ms,
/// slow-machine penalties push orders past 280 ms.
pub const PROCESSING_BUCKETS_MS: [f64; 9] = [100.0, 125.0, 150.0, 175.0, 200.0, 250.0, 300.0, 400.0, 500.0];
/// Creation to completion.
pub const TOTAL_BUCKETS_MS: [f64; 10] = [100.0, 150.0, 200.0, 250.0, 300.0, 400.0, 500.0, 1_000.0, 2_500.0, 5_000.0];

pub struct SimMetrics {
    pub orders_created: CounterVec,
    pub orders_generated: GaugeVec,
    pub queued_orders: GaugeVec,
    pub busy_machines: GaugeVec,
    pub average_process_ms: GaugeVec,
    pub p99_process_ms: GaugeVec,
    pub average_total_ms: GaugeVec,
    pub p99_total_ms: GaugeVec,
    pub slow_percentage: GaugeVec,
    pub slow_orders: CounterVec,
    pub orders_expired: CounterVec,
    pub order_wait_ms: HistogramVec,
    pub order_processing_ms: HistogramVec,
    pub process_sliding_ms: HistogramVec,
    pub total_time_ms: HistogramVec,

    pub temperature_celsius: GaugeVec,
    pub noise_decibels: GaugeVec,
    pub power_draw_kilowatts: GaugeVec,
    pub freezer_temperature_celsius: GaugeVec,
    pub ambient_spikes: CounterVec,
    pub restroom_occupancy: GaugeVec,
    pub restroom_queue: GaugeVec,
    pub restroom_visits: CounterVec,
    pub restroom_handwashes: CounterVec,

    pub ticks: CounterVec,
}

impl Default for SimMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SimMetrics {
    pub fn new() -> Self {
        Self {
            orders_created: CounterVec::default(),
            orders_generated: GaugeVec::default(),
            queued_orders: GaugeVec::default(),
            busy_machines: GaugeVec::default(),
            average_process_ms: GaugeVec::default(),
            p99_process_ms: GaugeVec::default(),
            average_total_ms: GaugeVec::default(),
            p99_total_ms: GaugeVec::default(),
            slow_percentage: GaugeVec::default(),
            slow_orders: CounterVec::default(),
            orders_expired: CounterVec::default(),
            order_wait_ms: HistogramVec::new(&WAIT_BUCKETS_MS),
            order_processing_ms: HistogramVec::new(&PROCESSING_BUCKETS_MS),
            process_sliding_ms: HistogramVec::new(&PROCESSING_BUCKETS_MS),
            total_time_ms: HistogramVec::new(&TOTAL_BUCKETS_MS),
            temperature_celsius: GaugeVec::default(),
            noise_decibels: GaugeVec::default(),
            power_draw_kilowatts: GaugeVec::default(),
            freezer_temperature_celsius: GaugeVec::default(),
            ambient_spikes: CounterVec::default(),
            restroom_occupancy: GaugeVec::default(),
            restroom_queue: GaugeVec::default(),
            restroom_visits: CounterVec::default(),
            restroom_handwashes: CounterVec::default(),
            ticks: CounterVec::default(),
        }
    }

    /// Render every family in Prometheus text format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.orders_created.render("fastfood_orders_total", "Total orders generated for the lunch window.", &mut out);
        self.orders_generated.render("fastfood_orders_generated", "Number of orders generated for the simulation window.", &mut out);
        self.queued_orders.render("fastfood_queued_orders", "Number of orders waiting for a free machine.", &mut out);
        self.busy_machines.render("fastfood_busy_machines", "Number of machines currently processing orders.", &mut out);
        self.average_process_ms.render("fastfood_average_process_milliseconds", "Average processing time for active and recently completed orders in milliseconds.", &mut out);
        self.p99_process_ms.render("fastfood_p99_process_milliseconds", "99th percentile of processing time in milliseconds.", &mut out);
        self.average_total_ms.render("fastfood_average_total_milliseconds", "Average total time from order creation to completion (queue + processing) in milliseconds.", &mut out);
        self.p99_total_ms.render("fastfood_p99_total_milliseconds", "99th percentile of total time (queue + processing) in milliseconds.", &mut out);
        self.slow_percentage.render("fastfood_slow_orders_percentage", "Percentage of active and recently completed orders whose total time exceeds the slow threshold.", &mut out);
        self.slow_orders.render("fastfood_slow_orders_total", "Total number of completed orders whose total time exceeded the slow threshold.", &mut out);
        self.orders_expired.render("fastfood_expired_orders_total", "Queued orders dropped unserved once their processing time had passed.", &mut out);
        self.order_wait_ms.render("fastfood_order_wait_milliseconds", "Queue wait time before a machine picks an order (in milliseconds).", &mut out);
        self.order_processing_ms.render("fastfood_order_processing_milliseconds", "Processing duration from start to finish (in milliseconds).", &mut out);
        self.process_sliding_ms.render("fastfood_process_time_sliding_milliseconds", "Processing time in sliding window for percentile calculation (in milliseconds).", &mut out);
        self.total_time_ms.render("fastfood_total_time_milliseconds", "Total time from order creation to completion (queue + processing) in milliseconds.", &mut out);

        self.temperature_celsius.render("restaurant_temperature_celsius", "Dining room air temperature.", &mut out);
        self.noise_decibels.render("restaurant_noise_decibels", "Dining room noise level.", &mut out);
        self.power_draw_kilowatts.render("restaurant_power_draw_kilowatts", "Total electrical power draw.", &mut out);
        self.freezer_temperature_celsius.render("restaurant_freezer_temperature_celsius", "Walk-in freezer temperature.", &mut out);
        self.ambient_spikes.render("restaurant_ambient_spikes_total", "Short-lived ambient spikes started, by kind.", &mut out);
        self.restroom_occupancy.render("restroom_occupancy", "Occupied stalls per restroom.", &mut out);
        self.restroom_queue.render("restroom_queue_length", "People waiting per restroom.", &mut out);
        self.restroom_visits.render("restroom_visits_total", "Restroom visits, counted on every occupancy increase.", &mut out);
        self.restroom_handwashes.render("restroom_handwashes_total", "Hand washes following a restroom visit.", &mut out);

        self.ticks.render("quickserve_sim_ticks_total", "Simulator ticks executed.", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_every_family_once() {
        let m = SimMetrics::new();
        m.orders_created.inc(&[("item", "fries")]);
        m.busy_machines.set(&[("item", "fries")], 3.0);
        let out = m.render();

        assert_eq!(out.matches("# TYPE fastfood_orders_total counter").count(), 1);
        assert!(out.contains("fastfood_orders_total{item=\"fries\"} 1\n"));
        assert!(out.contains("fastfood_busy_machines{item=\"fries\"} 3\n"));
        assert!(out.contains("# TYPE fastfood_order_wait_milliseconds histogram"));
        assert!(out.contains("# TYPE restroom_visits_total counter"));
    }
}
