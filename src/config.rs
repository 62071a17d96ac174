// config.rs - Simulation constants and the per-variant config
//
// Both variants (falling snow, pointer-following flake) run the same core;
// they differ only in the values below.

use crate::error::ConfigError;
use crate::render::{Rgb, Rgba};

// Canvas
pub const CANVAS_SIZE: f32 = 600.0;
pub const BG_GRAY: f32 = 20.0;
pub const STROKE_WEIGHT: f32 = 2.0;

// Population
pub const SNOWFLAKE_COUNT: usize = 9;
pub const MAX_DENDRITES: usize = 5;

// Dendrite placement
pub const MAX_DEN_DISTANCE: f32 = 70.0;
pub const MIN_DEN_DISTANCE: f32 = 15.0;
pub const DEN_DISTANCE_DEV: f32 = 10.0;

// Sizes (diameters)
pub const DENDRITE_SIZE: f32 = 30.0;
pub const DENDRITE_SIZE_DEV: f32 = 10.0;
pub const NUCLEUS_SIZE: f32 = 15.0;
pub const NUCLEUS_SIZE_DEV: f32 = 5.0;

// Spawn / despawn
pub const DESPAWN_MARGIN: f32 = MAX_DEN_DISTANCE + DEN_DISTANCE_DEV;
pub const SPAWN_STAGGER: f32 = 400.0;

// Colors
pub const NUCLEUS_COLOR: Rgba = Rgba::new(160.0, 150.0, 240.0, 0.8);
pub const LINE_COLOR: Rgb = Rgb::new(82, 126, 201);
pub const DENDRITE_BASE: Rgb = Rgb::new(100, 70, 205);
pub const DENDRITE_COLOR_DEV: f32 = 70.0;

// Motion
pub const FALL_RATE: f32 = 3.0;
pub const FALL_RATE_DEV: f32 = 0.5;

// Opacity
pub const MELT_RATE: f32 = 0.01;
pub const MELT_CUTOFF: f32 = 0.05;
pub const FADE_STEP: f32 = 0.03;
pub const FADE_TOLERANCE: f32 = 0.05;

// Wind
pub const GUST_STRENGTH: f32 = 0.1;
pub const WIND_INTERVAL: u32 = 200;
pub const WIND_FREQUENCY: u32 = 400;

/// Canvas dimensions plus the point the simulation treats as (0, 0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl Viewport {
    /// 1.5:1 canvas with the origin at (base/2, base/2).
    pub fn from_base(base: f32) -> Self {
        Self {
            width: base * 1.5,
            height: base,
            origin_x: base * 0.5,
            origin_y: base * 0.5,
        }
    }

    /// Origin at the canvas center.
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            origin_x: width * 0.5,
            origin_y: height * 0.5,
        }
    }

    /// Canvas pixel coordinates -> simulation coordinates.
    #[inline]
    pub fn to_local(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.origin_x, y - self.origin_y)
    }

    /// Lowest visible y in simulation coordinates.
    #[inline]
    pub fn visible_bottom(&self) -> f32 {
        self.height - self.origin_y
    }

    /// Highest visible y in simulation coordinates.
    #[inline]
    pub fn visible_top(&self) -> f32 {
        -self.origin_y
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub viewport: Viewport,

    pub target_count: usize,
    pub max_dendrites: usize,

    pub max_den_distance: f32,
    pub min_den_distance: f32,
    pub den_distance_dev: f32,

    pub dendrite_size: f32,
    pub dendrite_size_dev: f32,
    pub nucleus_size: f32,
    pub nucleus_size_dev: f32,

    pub fall_rate: f32,
    pub fall_rate_dev: f32,
    pub spawn_stagger: f32,
    pub despawn_margin: f32,

    pub melt_rate: f32,
    pub melt_cutoff: f32,
    pub fade_step: f32,
    pub fade_tolerance: f32,

    pub background: f32,
    pub nucleus_color: Rgba,
    pub line_color: Rgb,
    pub dendrite_base: Rgb,
    pub dendrite_color_dev: f32,

    pub gust_strength: f32,
    pub wind_interval: u32,
    pub wind_frequency: u32,

    // Feature switches
    pub fall: bool,
    pub wind: bool,
    pub follow_pointer: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::autonomous()
    }
}

impl SimConfig {
    /// Falling snow: nine wind-blown flakes with randomized sizes.
    pub fn autonomous() -> Self {
        Self {
            viewport: Viewport::from_base(CANVAS_SIZE),
            target_count: SNOWFLAKE_COUNT,
            max_dendrites: MAX_DENDRITES,
            max_den_distance: MAX_DEN_DISTANCE,
            min_den_distance: MIN_DEN_DISTANCE,
            den_distance_dev: DEN_DISTANCE_DEV,
            dendrite_size: DENDRITE_SIZE,
            dendrite_size_dev: DENDRITE_SIZE_DEV,
            nucleus_size: NUCLEUS_SIZE,
            nucleus_size_dev: NUCLEUS_SIZE_DEV,
            fall_rate: FALL_RATE,
            fall_rate_dev: FALL_RATE_DEV,
            spawn_stagger: SPAWN_STAGGER,
            despawn_margin: DESPAWN_MARGIN,
            melt_rate: MELT_RATE,
            melt_cutoff: MELT_CUTOFF,
            fade_step: FADE_STEP,
            fade_tolerance: FADE_TOLERANCE,
            background: BG_GRAY,
            nucleus_color: NUCLEUS_COLOR,
            line_color: LINE_COLOR,
            dendrite_base: DENDRITE_BASE,
            dendrite_color_dev: DENDRITE_COLOR_DEV,
            gust_strength: GUST_STRENGTH,
            wind_interval: WIND_INTERVAL,
            wind_frequency: WIND_FREQUENCY,
            fall: true,
            wind: true,
            follow_pointer: false,
        }
    }

    /// A single flake glued to the pointer. Fixed band and sizes, no fall, no wind.
    pub fn pointer_following() -> Self {
        Self {
            viewport: Viewport::centered(CANVAS_SIZE * 1.5, CANVAS_SIZE),
            target_count: 1,
            den_distance_dev: 0.0,
            dendrite_size_dev: 0.0,
            nucleus_size_dev: 0.0,
            fall_rate: 0.0,
            fall_rate_dev: 0.0,
            spawn_stagger: 0.0,
            fall: false,
            wind: false,
            follow_pointer: true,
            ..Self::autonomous()
        }
    }

    /// Look up a preset by the name the host passes in.
    pub fn for_variant(name: &str) -> Result<Self, ConfigError> {
        match name {
            "autonomous" | "snowfall" => Ok(Self::autonomous()),
            "pointer" | "pointer-following" => Ok(Self::pointer_following()),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_count == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.max_dendrites == 0 {
            return Err(ConfigError::NoDendrites);
        }

        // Every per-instance band drawn with the deviation must stay ordered.
        let lo = self.min_den_distance - self.den_distance_dev;
        let hi = self.max_den_distance - self.den_distance_dev;
        if lo < 0.0 || self.min_den_distance + self.den_distance_dev > hi {
            return Err(ConfigError::InvalidDistanceBand {
                min: self.min_den_distance,
                max: self.max_den_distance,
                dev: self.den_distance_dev,
            });
        }

        let vp = &self.viewport;
        if !(vp.width > 0.0 && vp.height > 0.0) {
            return Err(ConfigError::InvalidViewport {
                width: vp.width,
                height: vp.height,
            });
        }

        if !(self.melt_rate > 0.0 && self.melt_cutoff > 0.0 && self.melt_cutoff < 1.0) {
            return Err(ConfigError::InvalidMelt {
                rate: self.melt_rate,
                cutoff: self.melt_cutoff,
            });
        }

        Ok(())
    }

    /// y beyond which a snowflake is removed.
    #[inline]
    pub fn despawn_line(&self) -> f32 {
        self.viewport.visible_bottom() + self.despawn_margin
    }
}
