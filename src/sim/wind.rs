// wind.rs - Periodic gusts
//
// Two counters drive a three-phase cycle:
//   Idle      freq <= frequency                 nothing happens
//   Gusting   freq >  frequency, interval < n   one random gust per frame
//   Resetting freq >  frequency, interval >= n  both counters back to 0
//
// `freq` ticks every frame before the phase is evaluated, so with the
// default 400/200 the cycle is 400 calm frames, 200 gusts, one reset.

use log::{debug, trace};

use crate::config::SimConfig;
use crate::rng::SimRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindPhase {
    Idle,
    Gusting,
    Resetting,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WindField {
    strength: f32,
    freq_counter: u32,
    interval_counter: u32,

    gust_strength: f32,
    frequency: u32,
    interval: u32,
}

impl WindField {
    pub fn new(gust_strength: f32, frequency: u32, interval: u32) -> Self {
        Self {
            strength: 0.0,
            freq_counter: 0,
            interval_counter: 0,
            gust_strength,
            frequency,
            interval,
        }
    }

    pub fn from_config(cfg: &SimConfig) -> Self {
        Self::new(cfg.gust_strength, cfg.wind_frequency, cfg.wind_interval)
    }

    /// Sum of every gust so far. Biases spawn position and seeds the drift of
    /// newly spawned flakes.
    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn counters(&self) -> (u32, u32) {
        (self.freq_counter, self.interval_counter)
    }

    pub fn phase(&self) -> WindPhase {
        if self.freq_counter <= self.frequency {
            WindPhase::Idle
        } else if self.interval_counter < self.interval {
            WindPhase::Gusting
        } else {
            WindPhase::Resetting
        }
    }

    /// Advance one frame. Returns the gust to add to every flake's drift, if
    /// this frame is a gusting one.
    pub fn step(&mut self, rng: &mut SimRng) -> Option<f32> {
        self.freq_counter += 1;

        match self.phase() {
            WindPhase::Idle => None,
            WindPhase::Gusting => {
                if self.interval_counter == 0 {
                    debug!("wind: gusts start (strength {:.3})", self.strength);
                }
                let gust = self.gust_strength * rng.signed();
                self.strength += gust;
                self.interval_counter += 1;
                trace!("wind: gust {gust:+.4} -> {:.3}", self.strength);
                Some(gust)
            }
            WindPhase::Resetting => {
                debug!("wind: calm (strength {:.3})", self.strength);
                self.freq_counter = 0;
                self.interval_counter = 0;
                None
            }
        }
    }
}
