use js_sys::Math;
use wasm_bindgen::prelude::*;

// ============================================================================
// SNOWFLAKE ENGINE - Falling, growing and melting snowflakes
// ============================================================================

pub mod config;
pub mod error;
pub mod logger;
pub mod render;
pub mod rng;
pub mod sim;

pub use config::{SimConfig, Viewport};
pub use error::ConfigError;
pub use render::{Canvas, DrawList, Rgb, Rgba};
pub use rng::SimRng;
pub use sim::{Dendrite, FrameStats, ParticleField, Snowflake, WindField, WindPhase};

#[wasm_bindgen(start)]
pub fn start() {
    logger::init();
    log::info!("WASM loaded (v{})", env!("CARGO_PKG_VERSION"));
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").into()
}

/// Host-side handle: the JS frame loop calls `tick` once per
/// requestAnimationFrame and replays `commands()` onto its 2D context.
#[wasm_bindgen]
pub struct SnowWorld {
    field: ParticleField,
    draw: DrawList,
    stats: FrameStats,
}

#[wasm_bindgen]
impl SnowWorld {
    /// `variant` is "autonomous" or "pointer". Without a seed the snowfall is
    /// seeded from `Math.random`.
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str, seed: Option<f64>) -> Result<SnowWorld, JsValue> {
        let cfg = SimConfig::for_variant(variant).map_err(to_js)?;
        let seed = seed.unwrap_or_else(|| Math::random() * u32::MAX as f64) as u64;
        let field = ParticleField::new(cfg, SimRng::from_seed_u64(seed)).map_err(to_js)?;

        Ok(Self {
            field,
            draw: DrawList::new(),
            stats: FrameStats::default(),
        })
    }

    pub fn tick(&mut self) {
        self.draw.clear();
        self.stats = self.field.tick(&mut self.draw);
    }

    /// Pointer position in canvas pixels.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.field.set_pointer(x, y);
    }

    /// New canvas size. The origin keeps its relative position; all flakes
    /// and remnants are dropped.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        let mut cfg = self.field.config().clone();
        let old = cfg.viewport;
        cfg.viewport = Viewport {
            width,
            height,
            origin_x: width * old.origin_x / old.width,
            origin_y: height * old.origin_y / old.height,
        };
        self.field.reset(cfg).map_err(to_js)?;
        self.stats = FrameStats::default();
        Ok(())
    }

    /// Copy of this frame's command stream.
    pub fn commands(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.draw.as_slice())
    }

    // Zero-copy access for hosts that read wasm memory directly
    pub fn output_ptr(&self) -> *const f32 { self.draw.ptr() }
    pub fn output_len(&self) -> usize { self.draw.len() }

    pub fn width(&self) -> f32 { self.field.config().viewport.width }
    pub fn height(&self) -> f32 { self.field.config().viewport.height }
    pub fn frame(&self) -> f64 { self.stats.frame as f64 }
    pub fn snowflake_count(&self) -> usize { self.stats.snowflakes }
    pub fn dendrite_count(&self) -> usize { self.stats.attached }
    pub fn melting_count(&self) -> usize { self.stats.melting }
    pub fn wind(&self) -> f32 { self.stats.wind }
}

fn to_js(err: ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
