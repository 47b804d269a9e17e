use quickserve_core::rng::RandomSource;

use crate::config::RestroomConfig;

/// Occupancy and waiting line of one restroom.
#[derive(Debug, Clone, PartialEq)]
pub struct Restroom {
    pub name: String,
    stalls: u32,
    max_queue: u32,
    occupancy: u32,
    queue: u32,
}

/// Outcome of one restroom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestroomStep {
    pub occupancy_delta: i64,
    pub new_visits: u64,
    pub handwashes: u64,
}

impl Restroom {
    pub fn new(cfg: &RestroomConfig) -> Self {
        Self {
            name: cfg.name.clone(),
            stalls: cfg.stalls,
            max_queue: cfg.max_queue,
            occupancy: 0,
            queue: 0,
        }
    }

    pub fn occupancy(&self) -> u32 {
        self.occupancy
    }

    pub fn queue(&self) -> u32 {
        self.queue
    }

    pub fn stalls(&self) -> u32 {
        self.stalls
    }

    /// Move occupancy by -1, 0 or +1 (clamped to the stall count). The line
    /// only grows while every stall is taken and drains one person per tick
    /// otherwise.
    pub fn step(&mut self, rng: &mut dyn RandomSource, handwash_probability: f64) -> RestroomStep {
        let before = self.occupancy;
        let delta = i64::from(rng.int_inclusive(0, 2)) - 1;
        let target = (i64::from(before) + delta).clamp(0, i64::from(self.stalls));
        self.occupancy = u32::try_from(target).unwrap_or(self.stalls);

        if self.occupancy == self.stalls {
            let q = i64::from(rng.int_inclusive(0, 2)) - 1;
            let q = (i64::from(self.queue) + q).clamp(0, i64::from(self.max_queue));
            self.queue = u32::try_from(q).unwrap_or(self.max_queue);
        } else {
            self.queue = self.queue.saturating_sub(1);
        }

        let occupancy_delta = i64::from(self.occupancy) - i64::from(before);
        let new_visits = u64::try_from(occupancy_delta).unwrap_or(0);
        let handwashes = (0..new_visits)
            .filter(|_| rng.chance(handwash_probability))
            .count() as u64;

        RestroomStep { occupancy_delta, new_visits, handwashes }
    }
}
