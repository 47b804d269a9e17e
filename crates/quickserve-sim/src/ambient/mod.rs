//! Ambient restaurant readings, perturbed once per tick.
//!
//! Independent of the order simulator: nothing here reads or writes order
//! state, and the order simulator never reads these readings.

pub mod restroom;
pub mod walk;

use crate::config::AmbientSection;
use crate::context::SimContext;

pub use restroom::{Restroom, RestroomStep};
pub use walk::{BoundedWalk, Spike, SpikeTick};

// start, min, max, max step per tick
const TEMPERATURE: BoundedWalk = BoundedWalk::new(21.0, 18.0, 26.0, 0.1);
const NOISE: BoundedWalk = BoundedWalk::new(60.0, 45.0, 80.0, 1.5);
const POWER: BoundedWalk = BoundedWalk::new(35.0, 20.0, 55.0, 0.4);
const FREEZER: BoundedWalk = BoundedWalk::new(-18.0, -22.0, -15.0, 0.05);

// probability per idle tick, magnitude, duration in ticks
const NOISE_BURST: Spike = Spike::new(0.01, 15.0, 30);
const POWER_SURGE: Spike = Spike::new(0.005, 20.0, 50);
const DEFROST_CYCLE: Spike = Spike::new(0.001, 10.0, 300);

/// Published values after one perturbation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AmbientReading {
    pub temperature_celsius: f64,
    pub noise_decibels: f64,
    pub power_draw_kilowatts: f64,
    pub freezer_temperature_celsius: f64,
    pub restrooms: Vec<(String, RestroomStep)>,
}

pub struct AmbientState {
    temperature: BoundedWalk,
    noise: BoundedWalk,
    noise_burst: Spike,
    power: BoundedWalk,
    power_surge: Spike,
    freezer: BoundedWalk,
    defrost: Spike,
    restrooms: Vec<Restroom>,
    handwash_probability: f64,
}

impl AmbientState {
    pub fn new(cfg: &AmbientSection) -> Self {
        Self {
            temperature: TEMPERATURE,
            noise: NOISE,
            noise_burst: NOISE_BURST,
            power: POWER,
            power_surge: POWER_SURGE,
            freezer: FREEZER,
            defrost: DEFROST_CYCLE,
            restrooms: cfg.restrooms.iter().map(Restroom::new).collect(),
            handwash_probability: cfg.handwash_probability,
        }
    }

    pub fn restrooms(&self) -> &[Restroom] {
        &self.restrooms
    }

    /// Advance every reading one tick and publish it. Restroom counters are
    /// registered on the first tick so every restroom scrapes from zero.
    pub fn perturb(&mut self, ctx: &mut SimContext) -> AmbientReading {
        let rng = ctx.rng.as_mut();
        let m = &ctx.metrics;

        let temperature = self.temperature.step(rng);

        let burst = self.noise_burst.tick(rng);
        let noise = self.noise.step(rng) + burst.offset;

        let surge = self.power_surge.tick(rng);
        let power = self.power.step(rng) + surge.offset;

        let defrost = self.defrost.tick(rng);
        let freezer = self.freezer.step(rng) + defrost.offset;

        for (kind, spike) in [("noise_burst", burst), ("power_surge", surge), ("defrost", defrost)] {
            if spike.started {
                m.ambient_spikes.inc(&[("kind", kind)]);
                tracing::debug!(kind, magnitude = spike.offset, "ambient spike started");
            }
        }

        m.temperature_celsius.set(&[], temperature);
        m.noise_decibels.set(&[], noise);
        m.power_draw_kilowatts.set(&[], power);
        m.freezer_temperature_celsius.set(&[], freezer);

        let mut restrooms = Vec::with_capacity(self.restrooms.len());
        for room in &mut self.restrooms {
            let step = room.step(rng, self.handwash_probability);
            let labels = [("restroom", room.name.as_str())];
            m.restroom_occupancy.set(&labels, f64::from(room.occupancy()));
            m.restroom_queue.set(&labels, f64::from(room.queue()));
            m.restroom_visits.touch(&labels);
            m.restroom_handwashes.touch(&labels);
            if step.new_visits > 0 {
                m.restroom_visits.add(&labels, step.new_visits);
            }
            if step.handwashes > 0 {
                m.restroom_handwashes.add(&labels, step.handwashes);
            }
            restrooms.push((room.name.clone(), step));
        }

        AmbientReading {
            temperature_celsius: temperature,
            noise_decibels: noise,
            power_draw_kilowatts: power,
            freezer_temperature_celsius: freezer,
            restrooms,
        }
    }
}
