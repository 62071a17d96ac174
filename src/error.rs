// error.rs - Construction-time configuration errors
//
// The per-frame simulation cannot fail; only building a world from a bad
// config can.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("target snowflake count must be at least 1")]
    EmptyPopulation,

    #[error("max_dendrites must be at least 1")]
    NoDendrites,

    #[error(
        "invalid dendrite distance band {min}..{max} (dev {dev}): need min - dev >= 0 and min + dev <= max - dev"
    )]
    InvalidDistanceBand { min: f32, max: f32, dev: f32 },

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("invalid melt parameters: rate {rate}, cutoff {cutoff}")]
    InvalidMelt { rate: f32, cutoff: f32 },

    #[error("unknown variant '{0}' (expected 'autonomous' or 'pointer')")]
    UnknownVariant(String),
}
