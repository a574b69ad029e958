//! Error type shared by the simulation core and the scenario builder

use thiserror::Error;

/// Invalid-configuration failures
///
/// Degenerate geometry during a tick (zero separation) is never reported here,
/// it is guarded and counted in the tick diagnostics instead
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("particle count must be at least 1, got {0}")]
    InvalidParticleCount(usize),

    #[error("particle {index}: mass must be positive and finite, got {mass}")]
    NonPositiveMass { index: usize, mass: f64 },

    #[error("particle {index}: radius must be positive and finite, got {radius}")]
    NonPositiveRadius { index: usize, radius: f64 },

    #[error("density must be positive and finite, got {0}")]
    NonPositiveDensity(f64),

    #[error("timestep must be positive and finite, got {0}")]
    NonPositiveTimestep(f64),

    #[error("gravitational constant must be non-negative and finite, got {0}")]
    InvalidGravitationalConstant(f64),

    #[error("restitution coefficient must lie in [0, 1], got {0}")]
    InvalidRestitution(f64),

    #[error("minimum separation must be positive and finite, got {0}")]
    InvalidMinSeparation(f64),

    #[error("{name}: range min {min} must not exceed max {max}")]
    InvertedRange { name: &'static str, min: f64, max: f64 },

    #[error("{name}: range must be positive, got min {min}")]
    NonPositiveRange { name: &'static str, min: f64 },

    #[error("{name}: expected a {expected}-component vector, got {got}")]
    DimensionMismatch { name: &'static str, expected: usize, got: usize },

    #[error("unsupported dimension {0}, expected 2 or 3")]
    UnsupportedDimension(u8),

    #[error("{name}: value must be finite")]
    NonFinite { name: &'static str },

    #[error("particle {index}: explicit body needs a mass under a uniform mass policy")]
    MissingMass { index: usize },
}
