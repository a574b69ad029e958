//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size and headless run length,
//! - gravitational constant `G` and the zero-separation guard,
//! - random seed for initial placement

use crate::error::SimError;

/// Reference gravitational constant of the source demos, written there as
/// `6.67408 * 10e-11`. About ten times the physical value; a tuning knob
pub const DEFAULT_G: f64 = 6.67408e-10;

/// Fixed tick length at 60 frames per second
pub const DEFAULT_DT: f64 = 1.0 / 60.0;

/// Pairs closer than this are skipped by gravity and by elastic contact
pub const DEFAULT_MIN_SEPARATION: f64 = 1.0e-6;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64,             // step size
    pub G: f64,              // gravitational constant
    pub min_separation: f64, // zero-separation guard
    pub seed: u64,           // deterministic seed
    pub ticks: u64,          // headless run length
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            G: DEFAULT_G,
            min_separation: DEFAULT_MIN_SEPARATION,
            seed: 42,
            ticks: 600,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<(), SimError> {
        validate_dt(self.dt)?;
        if !(self.G.is_finite() && self.G >= 0.0) {
            return Err(SimError::InvalidGravitationalConstant(self.G));
        }
        if !(self.min_separation.is_finite() && self.min_separation > 0.0) {
            return Err(SimError::InvalidMinSeparation(self.min_separation));
        }
        Ok(())
    }
}

pub fn validate_dt(dt: f64) -> Result<(), SimError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(SimError::NonPositiveTimestep(dt))
    }
}
