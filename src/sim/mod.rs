// sim/ - Snowflake simulation
//
// ParticleField owns every live flake and the pool of detached dendrites
// that are melting away. One `tick` is one animation frame.

mod dendrite;
mod snowflake;
mod wind;

pub use dendrite::{distance, Dendrite};
pub use snowflake::Snowflake;
pub use wind::{WindField, WindPhase};

use log::{debug, info};

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::render::Canvas;
use crate::rng::SimRng;

/// Counts reported after each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub snowflakes: usize,
    pub attached: usize,
    pub melting: usize,
    pub wind: f32,
}

pub struct ParticleField {
    cfg: SimConfig,
    rng: SimRng,

    snowflakes: Vec<Snowflake>,
    melting: Vec<Dendrite>,
    wind: WindField,

    // Last pointer position in simulation coordinates
    pointer: (f32, f32),
    frame: u64,
}

impl ParticleField {
    pub fn new(cfg: SimConfig, rng: SimRng) -> Result<Self, ConfigError> {
        cfg.validate()?;
        info!(
            "snowfield: {}x{}, {} flakes, wind {}, pointer {}",
            cfg.viewport.width,
            cfg.viewport.height,
            cfg.target_count,
            cfg.wind,
            cfg.follow_pointer
        );
        Ok(Self {
            wind: WindField::from_config(&cfg),
            snowflakes: Vec::with_capacity(cfg.target_count),
            melting: Vec::new(),
            pointer: (0.0, 0.0),
            frame: 0,
            cfg,
            rng,
        })
    }

    pub fn config(&self) -> &SimConfig { &self.cfg }
    pub fn snowflakes(&self) -> &[Snowflake] { &self.snowflakes }
    pub fn snowflakes_mut(&mut self) -> &mut [Snowflake] { &mut self.snowflakes }
    pub fn melting(&self) -> &[Dendrite] { &self.melting }
    pub fn wind(&self) -> &WindField { &self.wind }

    /// Run one frame, drawing onto `canvas`.
    pub fn tick<C: Canvas>(&mut self, canvas: &mut C) -> FrameStats {
        self.frame += 1;

        canvas.background(self.cfg.background);
        canvas.translate(self.cfg.viewport.origin_x, self.cfg.viewport.origin_y);
        canvas.stroke_weight(crate::config::STROKE_WEIGHT);

        self.spawn_if_needed();
        if self.cfg.follow_pointer {
            self.follow_pointer();
        }
        self.update_snowflakes(canvas);
        if self.cfg.wind {
            self.apply_wind();
        }
        if self.cfg.fall {
            self.advance_fall();
        }
        self.melt_pool(canvas);
        self.despawn_offscreen();

        self.stats()
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frame: self.frame,
            snowflakes: self.snowflakes.len(),
            attached: self.snowflakes.iter().map(|s| s.dendrites.len()).sum(),
            melting: self.melting.len(),
            wind: self.wind.strength(),
        }
    }

    /// Add one flake if the population is short. Falling flakes start above
    /// the canvas at a staggered height, pushed upwind by the current
    /// strength; a pointer-following flake starts at the pointer.
    pub fn spawn_if_needed(&mut self) {
        if self.snowflakes.len() >= self.cfg.target_count {
            return;
        }

        let (x, y) = if self.cfg.follow_pointer {
            self.pointer
        } else {
            let base = self.cfg.viewport.height;
            let wind = if self.cfg.wind { self.wind.strength() } else { 0.0 };
            let x = self.rng.unit() * base - 0.5 * base - base * wind / 3.0;
            let y = self.cfg.viewport.visible_top() - self.cfg.spawn_stagger * self.rng.unit();
            (x, y)
        };

        let flake = Snowflake::spawn(x, y, self.wind.strength(), &self.cfg, &mut self.rng);
        debug!("spawn flake at ({x:.1}, {y:.1}), fall {:.2}", flake.fall_rate);
        self.snowflakes.push(flake);
    }

    /// Grow/shed dendrites and draw, flake by flake.
    pub fn update_snowflakes<C: Canvas>(&mut self, canvas: &mut C) {
        for flake in &mut self.snowflakes {
            flake.manage_dendrites(&self.cfg, &mut self.rng, &mut self.melting);
            flake.draw(&self.cfg, canvas);
        }
    }

    /// Grow/shed dendrites on every flake without drawing.
    pub fn manage_dendrites(&mut self) -> usize {
        let mut shed = 0;
        for flake in &mut self.snowflakes {
            shed += flake.manage_dendrites(&self.cfg, &mut self.rng, &mut self.melting);
        }
        shed
    }

    /// Drift every flake by its velocity, then step the wind; a gust is added
    /// to every flake's velocity.
    pub fn apply_wind(&mut self) {
        for flake in &mut self.snowflakes {
            flake.x += flake.x_vel;
        }

        if let Some(gust) = self.wind.step(&mut self.rng) {
            for flake in &mut self.snowflakes {
                flake.x_vel += gust;
            }
        }
    }

    pub fn advance_fall(&mut self) {
        for flake in &mut self.snowflakes {
            flake.y += flake.fall_rate;
        }
    }

    /// Draw every melting dendrite, then fade it. A dendrite already below
    /// the cutoff is drawn one last time and dropped.
    pub fn melt_pool<C: Canvas>(&mut self, canvas: &mut C) {
        if self.melting.is_empty() {
            return;
        }
        canvas.no_stroke();

        let (rate, cutoff) = (self.cfg.melt_rate, self.cfg.melt_cutoff);
        self.melting.retain_mut(|d| {
            d.draw(canvas);
            d.melt(rate, cutoff)
        });
    }

    /// Remove flakes that fell past the despawn line. Their dendrites were
    /// already shed this frame if far enough; the rest go with them.
    pub fn despawn_offscreen(&mut self) {
        let line = self.cfg.despawn_line();
        let before = self.snowflakes.len();
        self.snowflakes.retain(|s| s.y <= line);

        let gone = before - self.snowflakes.len();
        if gone > 0 {
            debug!("despawned {gone} flake(s) below y={line}");
        }
    }

    /// Pointer position in canvas pixels.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = self.cfg.viewport.to_local(x, y);
    }

    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    fn follow_pointer(&mut self) {
        let (px, py) = self.pointer;
        for flake in &mut self.snowflakes {
            flake.x = px;
            flake.y = py;
        }
    }

    /// Drop every flake and remnant and restart the wind cycle.
    pub fn reset(&mut self, cfg: SimConfig) -> Result<(), ConfigError> {
        cfg.validate()?;
        self.wind = WindField::from_config(&cfg);
        self.cfg = cfg;
        self.snowflakes.clear();
        self.melting.clear();
        self.frame = 0;
        Ok(())
    }
}
