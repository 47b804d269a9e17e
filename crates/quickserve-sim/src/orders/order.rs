/// One synthetic order.
///
/// `start_ms` stays `None` until a machine picks the order up, so a queued
/// order can never look completed. A queued order that is still waiting at
/// `created_ms + processing_ms` has expired and is dropped unserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: u64,
    pub item: String,
    pub processing_ms: f64,
    pub created_ms: f64,
    pub start_ms: Option<f64>,
    pub queued: bool,
}

/// Lifecycle state derived from the order's fields at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Queued,
    Processing,
    Completed,
}

impl Order {
    pub fn new(id: u64, item: impl Into<String>, processing_ms: f64, created_ms: f64) -> Self {
        Self {
            id,
            item: item.into(),
            processing_ms,
            created_ms,
            start_ms: None,
            queued: true,
        }
    }

    pub fn is_completed(&self, now_ms: f64) -> bool {
        match (self.queued, self.start_ms) {
            (false, Some(start)) => now_ms >= start + self.processing_ms,
            _ => false,
        }
    }

    /// Still queued once its own processing time has passed since creation.
    pub fn is_expired(&self, now_ms: f64) -> bool {
        self.queued && now_ms >= self.created_ms + self.processing_ms
    }

    /// Time spent on a machine so far; zero while queued.
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        self.start_ms.map_or(0.0, |start| now_ms - start)
    }

    /// Time since the order entered the system (queue + processing).
    pub fn total_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.created_ms
    }

    pub fn state(&self, now_ms: f64) -> OrderState {
        if self.queued {
            OrderState::Queued
        } else if self.is_completed(now_ms) {
            OrderState::Completed
        } else {
            OrderState::Processing
        }
    }

    /// Mark as picked up by a machine.
    pub(crate) fn begin(&mut self, now_ms: f64) {
        self.queued = false;
        self.start_ms = Some(now_ms);
    }
}
