use std::collections::VecDeque;

/// Measurements of one completed order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Completion timestamp.
    pub at_ms: f64,
    pub processing_ms: f64,
    pub total_ms: f64,
    pub slow: bool,
}

/// Bounded-retention buffer of completed-order samples for one category.
#[derive(Debug, Clone, Default)]
pub struct SlidingWindow {
    samples: VecDeque<Sample>,
}

impl SlidingWindow {
    pub fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
    }

    /// Drop samples older than `retention_ms`. Returns how many were dropped.
    pub fn prune(&mut self, now_ms: f64, retention_ms: f64) -> usize {
        let before = self.samples.len();
        self.samples.retain(|s| now_ms - s.at_ms <= retention_ms);
        before - self.samples.len()
    }

    /// Samples completed within the last `recency_ms`.
    pub fn recent(&self, now_ms: f64, recency_ms: f64) -> impl Iterator<Item = &Sample> {
        self.samples
            .iter()
            .filter(move |s| now_ms - s.at_ms <= recency_ms)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}
