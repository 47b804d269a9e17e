use quickserve_core::rng::RandomSource;

/// Random walk clamped to `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedWalk {
    value: f64,
    min: f64,
    max: f64,
    step: f64,
}

impl BoundedWalk {
    pub const fn new(start: f64, min: f64, max: f64, step: f64) -> Self {
        Self { value: start, min, max, step }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Move by a uniform draw in `[-step, step]` and clamp.
    pub fn step(&mut self, rng: &mut dyn RandomSource) -> f64 {
        let delta = rng.uniform(-self.step, self.step);
        self.value = (self.value + delta).clamp(self.min, self.max);
        self.value
    }
}

/// Short-lived offset added on top of a walk.
///
/// Each idle tick starts a spike with `probability`; once started it lasts
/// `duration_ticks` ticks, including the one that triggered it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spike {
    probability: f64,
    magnitude: f64,
    duration_ticks: u32,
    remaining: u32,
}

/// Offset for this tick and whether a new spike started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpikeTick {
    pub offset: f64,
    pub started: bool,
}

impl Spike {
    pub const fn new(probability: f64, magnitude: f64, duration_ticks: u32) -> Self {
        Self { probability, magnitude, duration_ticks, remaining: 0 }
    }

    pub fn active(&self) -> bool {
        self.remaining > 0
    }

    pub fn tick(&mut self, rng: &mut dyn RandomSource) -> SpikeTick {
        if self.remaining > 0 {
            self.remaining -= 1;
            return SpikeTick { offset: self.magnitude, started: false };
        }
        if self.duration_ticks > 0 && rng.chance(self.probability) {
            self.remaining = self.duration_ticks - 1;
            return SpikeTick { offset: self.magnitude, started: true };
        }
        SpikeTick { offset: 0.0, started: false }
    }
}
