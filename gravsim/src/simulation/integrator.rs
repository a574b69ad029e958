//! Fixed-step time integration for the live set
//!
//! A single semi-implicit Euler pass at the end of the tick. `dt` is supplied by
//! the caller and never measured from the wall clock

use super::states::Particle;

/// Advance every particle by `dt` from its accumulated force, then clear the
/// accumulators. An empty set is a no-op
pub fn semi_implicit_euler<const D: usize>(particles: &mut [Particle<D>], dt: f64) {
    for p in particles.iter_mut() {
        p.integrate(dt);
    }
}
