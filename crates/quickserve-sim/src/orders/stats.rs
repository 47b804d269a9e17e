//! Aggregate statistics over a set of timing samples.

/// Percentile rank used for the tail gauges.
pub const P99: f64 = 0.99;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Value at index `floor(n * q)` of the ascending-sorted samples.
///
/// Needs at least two samples; a single observation is not a tail.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let idx = ((sorted.len() as f64 * q) as usize).min(sorted.len() - 1);
    Some(sorted[idx])
}

/// Share of `flags` that are `true`, as a percentage in `[0, 100]`.
pub fn percentage(flags: &[bool]) -> Option<f64> {
    if flags.is_empty() {
        return None;
    }
    let hits = flags.iter().filter(|f| **f).count();
    Some(hits as f64 / flags.len() as f64 * 100.0)
}

/// One timing series: mean plus p99 (p99 only with two or more samples).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub p99: Option<f64>,
}

impl SeriesStats {
    pub fn of(values: &[f64]) -> Self {
        Self {
            count: values.len(),
            mean: mean(values),
            p99: percentile(values, P99),
        }
    }
}

/// Everything published for one category (or the aggregate) in a tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryStats {
    pub queued: usize,
    pub busy: u32,
    pub processing: SeriesStats,
    pub total: SeriesStats,
    pub slow_percentage: Option<f64>,
}

impl CategoryStats {
    pub fn has_samples(&self) -> bool {
        self.processing.count > 0 || self.total.count > 0
    }
}

/// Raw samples collected for one category before summarizing.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    pub processing: Vec<f64>,
    pub total: Vec<f64>,
    pub slow: Vec<bool>,
}

impl SampleSet {
    pub fn extend_from(&mut self, other: &SampleSet) {
        self.processing.extend_from_slice(&other.processing);
        self.total.extend_from_slice(&other.total);
        self.slow.extend_from_slice(&other.slow);
    }

    pub fn summarize(&self, queued: usize, busy: u32) -> CategoryStats {
        CategoryStats {
            queued,
            busy,
            processing: SeriesStats::of(&self.processing),
            total: SeriesStats::of(&self.total),
            slow_percentage: percentage(&self.slow),
        }
    }
}
