// dendrite.rs - Satellite points around a nucleus
//
// A dendrite is pinned where it was created. Only its opacity changes:
// fading in while attached, melting away once detached.

use crate::config::SimConfig;
use crate::render::{Canvas, Rgb};
use crate::rng::SimRng;

#[derive(Clone, Debug, PartialEq)]
pub struct Dendrite {
    x: f32,
    y: f32,
    pub(crate) opacity: f32,
    color: Rgb,
    size: f32,
}

impl Dendrite {
    pub fn new(x: f32, y: f32, color: Rgb, size: f32) -> Self {
        Self {
            x,
            y,
            opacity: 0.0,
            color,
            size,
        }
    }

    /// New dendrite at (x, y) with a jittered color and size, fully transparent.
    pub fn spawn(x: f32, y: f32, cfg: &SimConfig, rng: &mut SimRng) -> Self {
        let dev = cfg.dendrite_color_dev;
        let mut channel = |base: u8| (base as f32 + rng.unit() * dev - dev * 0.5).floor();
        let base = cfg.dendrite_base;
        let (r, g, b) = (channel(base.r), channel(base.g), channel(base.b));

        let size = rng.around(cfg.dendrite_size, cfg.dendrite_size_dev);
        Self::new(x, y, Rgb::clamped(r, g, b), size)
    }

    pub fn x(&self) -> f32 { self.x }
    pub fn y(&self) -> f32 { self.y }
    pub fn opacity(&self) -> f32 { self.opacity }
    pub fn color(&self) -> Rgb { self.color }
    pub fn size(&self) -> f32 { self.size }

    #[inline]
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        distance(self.x, self.y, x, y)
    }

    /// Step toward `goal`: climb by `step` while well below it, then snap.
    pub fn fade_toward(&mut self, goal: f32, step: f32, tolerance: f32) {
        let goal = goal.clamp(0.0, 1.0);
        if self.opacity < goal - tolerance {
            self.opacity = (self.opacity + step).min(1.0);
        } else {
            self.opacity = goal;
        }
    }

    /// One melt step. Returns false once the dendrite has faded past `cutoff`
    /// and should be dropped; otherwise loses `rate` opacity.
    pub fn melt(&mut self, rate: f32, cutoff: f32) -> bool {
        if self.opacity < cutoff {
            return false;
        }
        self.opacity = (self.opacity - rate).max(0.0);
        true
    }

    /// Filled circle in its own color at its current opacity.
    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        canvas.fill(self.color.with_alpha(self.opacity));
        canvas.ellipse(self.x, self.y, self.size);
    }
}

#[inline]
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let (dx, dy) = (x1 - x2, y1 - y2);
    (dx * dx + dy * dy).sqrt()
}
