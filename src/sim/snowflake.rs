// snowflake.rs - A nucleus with up to `max_dendrites` satellites
//
// Dendrites are placed around the nucleus where it is *now* and never move.
// As the nucleus falls and drifts they are left behind; once one is farther
// than the detach radius it is handed to the melting pool.

use super::dendrite::Dendrite;
use crate::config::SimConfig;
use crate::render::Canvas;
use crate::rng::SimRng;

#[derive(Clone, Debug)]
pub struct Snowflake {
    pub x: f32,
    pub y: f32,
    pub fall_rate: f32,
    pub x_vel: f32,

    // Per-instance band and size
    pub min_den_distance: f32,
    pub max_den_distance: f32,
    pub nucleus_size: f32,

    pub(crate) dendrites: Vec<Dendrite>,
}

impl Snowflake {
    /// Flake with an explicit band and no dendrites.
    pub fn new(x: f32, y: f32, min_den_distance: f32, max_den_distance: f32, nucleus_size: f32) -> Self {
        Self {
            x,
            y,
            fall_rate: 0.0,
            x_vel: 0.0,
            min_den_distance,
            max_den_distance,
            nucleus_size,
            dendrites: Vec::new(),
        }
    }

    /// Randomized flake at (x, y). New flakes inherit the current wind as drift.
    pub fn spawn(x: f32, y: f32, wind: f32, cfg: &SimConfig, rng: &mut SimRng) -> Self {
        let fall_rate = if cfg.fall {
            rng.around(cfg.fall_rate, cfg.fall_rate_dev)
        } else {
            0.0
        };
        let max_den_distance = rng.around(cfg.max_den_distance, cfg.den_distance_dev);
        let min_den_distance = rng.around(cfg.min_den_distance, cfg.den_distance_dev);
        let nucleus_size = rng.around(cfg.nucleus_size, cfg.nucleus_size_dev);

        Self {
            fall_rate,
            x_vel: if cfg.wind { wind } else { 0.0 },
            ..Self::new(x, y, min_den_distance, max_den_distance, nucleus_size)
        }
    }

    pub fn dendrites(&self) -> &[Dendrite] {
        &self.dendrites
    }

    /// Grow one dendrite (if below the cap), then shed every dendrite now
    /// beyond `cfg.max_den_distance` into `pool`. Returns how many were shed.
    pub fn manage_dendrites(&mut self, cfg: &SimConfig, rng: &mut SimRng, pool: &mut Vec<Dendrite>) -> usize {
        if self.dendrites.len() < cfg.max_dendrites {
            self.grow(cfg, rng);
        }
        self.shed(cfg.max_den_distance, pool)
    }

    /// Attach a dendrite at a random angle and radius inside this flake's band.
    pub fn grow(&mut self, cfg: &SimConfig, rng: &mut SimRng) {
        let theta = rng.angle_degrees().to_radians();
        let r = rng.between(self.min_den_distance, self.max_den_distance);
        let x = r * theta.cos() + self.x;
        let y = r * theta.sin() + self.y;
        self.dendrites.push(Dendrite::spawn(x, y, cfg, rng));
    }

    /// Move dendrites farther than `radius` from the nucleus into `pool`.
    /// Order inside the flake is irrelevant, so removal is a swap.
    pub fn shed(&mut self, radius: f32, pool: &mut Vec<Dendrite>) -> usize {
        let mut shed = 0;
        let mut i = 0;
        while i < self.dendrites.len() {
            if self.dendrites[i].distance_to(self.x, self.y) > radius {
                pool.push(self.dendrites.swap_remove(i));
                shed += 1;
            } else {
                i += 1;
            }
        }
        shed
    }

    /// Draw connecting lines, dendrites and nucleus, fading dendrites in as
    /// they go. The line uses the opacity from before this frame's fade step.
    pub fn draw<C: Canvas>(&mut self, cfg: &SimConfig, canvas: &mut C) {
        let (nx, ny) = (self.x, self.y);
        let reach = 2.0 * self.max_den_distance;

        for d in &mut self.dendrites {
            canvas.stroke(cfg.line_color.with_alpha(d.opacity()));
            canvas.line(d.x(), d.y(), nx, ny);
            canvas.no_stroke();

            let goal = 1.0 - d.distance_to(nx, ny) / reach;
            d.fade_toward(goal, cfg.fade_step, cfg.fade_tolerance);
            d.draw(canvas);
        }

        canvas.no_stroke();
        canvas.fill(cfg.nucleus_color);
        canvas.ellipse(nx, ny, self.nucleus_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Rgb;
    use pretty_assertions::assert_eq;

    fn fixed_cfg() -> SimConfig {
        SimConfig {
            den_distance_dev: 0.0,
            ..SimConfig::autonomous()
        }
    }

    #[test]
    fn first_step_grows_one_dendrite_in_band() {
        let cfg = fixed_cfg();
        let mut rng = SimRng::from_seed_u64(1);
        let mut pool = Vec::new();
        let mut flake = Snowflake::new(0.0, 0.0, 15.0, 70.0, 15.0);

        flake.manage_dendrites(&cfg, &mut rng, &mut pool);

        assert_eq!(flake.dendrites().len(), 1);
        let dist = flake.dendrites()[0].distance_to(0.0, 0.0);
        assert!((15.0 - 1e-3..=70.0 + 1e-3).contains(&dist), "distance {dist}");
        assert!(pool.is_empty());
    }

    #[test]
    fn never_exceeds_max_dendrites() {
        let cfg = fixed_cfg();
        let mut rng = SimRng::from_seed_u64(2);
        let mut pool = Vec::new();
        let mut flake = Snowflake::new(0.0, 0.0, 15.0, 60.0, 15.0);

        for _ in 0..50 {
            flake.manage_dendrites(&cfg, &mut rng, &mut pool);
            assert!(flake.dendrites().len() <= cfg.max_dendrites);
        }
        assert_eq!(flake.dendrites().len(), cfg.max_dendrites);
    }

    #[test]
    fn detaches_when_nucleus_moves_away() {
        let cfg = fixed_cfg();
        let mut rng = SimRng::from_seed_u64(3);
        let mut pool = Vec::new();
        let mut flake = Snowflake::new(0.0, 0.0, 15.0, 70.0, 15.0);
        let mut d = Dendrite::new(0.0, 70.0, Rgb::new(90, 60, 200), 27.0);
        d.opacity = 0.42;
        flake.dendrites.push(d.clone());

        // Still exactly on the radius: stays.
        assert_eq!(flake.shed(70.0, &mut pool), 0);

        // Nucleus moves so the distance becomes 75.
        flake.y = -5.0;
        let shed = flake.shed(cfg.max_den_distance, &mut pool);

        assert_eq!(shed, 1);
        assert!(flake.dendrites().is_empty());
        assert_eq!(pool, vec![d]);

        // Management on an empty flake regrows but never touches the pool entry.
        flake.manage_dendrites(&cfg, &mut rng, &mut pool);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].opacity(), 0.42);
    }

    #[test]
    fn shed_visits_every_dendrite() {
        let mut pool = Vec::new();
        let mut flake = Snowflake::new(0.0, 0.0, 15.0, 70.0, 15.0);
        for y in [100.0, 10.0, 200.0, 300.0, 20.0] {
            flake.dendrites.push(Dendrite::new(0.0, y, Rgb::new(1, 1, 1), 30.0));
        }

        assert_eq!(flake.shed(70.0, &mut pool), 3);
        assert_eq!(flake.dendrites().len(), 2);
        assert_eq!(pool.len(), 3);
        assert!(flake.dendrites().iter().all(|d| d.y() < 70.0));
        assert!(pool.iter().all(|d| d.y() > 70.0));
    }

    #[test]
    fn positions_stay_fixed_while_attached() {
        let cfg = fixed_cfg();
        let mut rng = SimRng::from_seed_u64(4);
        let mut pool = Vec::new();
        let mut flake = Snowflake::new(0.0, 0.0, 15.0, 70.0, 15.0);
        flake.manage_dendrites(&cfg, &mut rng, &mut pool);
        let (x, y) = (flake.dendrites()[0].x(), flake.dendrites()[0].y());

        let mut list = crate::render::DrawList::new();
        for _ in 0..5 {
            flake.draw(&cfg, &mut list);
            flake.manage_dendrites(&cfg, &mut rng, &mut pool);
        }
        assert_eq!((flake.dendrites()[0].x(), flake.dendrites()[0].y()), (x, y));
    }

    #[test]
    fn spawn_respects_feature_switches() {
        let mut rng = SimRng::from_seed_u64(5);
        let cfg = SimConfig::autonomous();
        let falling = Snowflake::spawn(0.0, -300.0, 0.25, &cfg, &mut rng);
        assert!((2.5..3.5).contains(&falling.fall_rate));
        assert!((60.0..80.0).contains(&falling.max_den_distance));
        assert!((5.0..25.0).contains(&falling.min_den_distance));
        assert!((10.0..20.0).contains(&falling.nucleus_size));
        assert_eq!(falling.x_vel, 0.25);

        let cfg = SimConfig::pointer_following();
        let held = Snowflake::spawn(0.0, 0.0, 0.25, &cfg, &mut rng);
        assert_eq!(held.fall_rate, 0.0);
        assert_eq!(held.x_vel, 0.0);
        assert_eq!(held.max_den_distance, 70.0);
        assert_eq!(held.min_den_distance, 15.0);
        assert_eq!(held.nucleus_size, 15.0);
    }
}
