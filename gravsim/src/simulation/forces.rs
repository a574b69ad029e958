//! Force contributors for the n-body engine
//!
//! Defines the force trait, the set that sums its terms into each particle's
//! accumulator, and direct-sum Newtonian gravity with a zero-separation guard

use crate::simulation::states::{NVec, Particle};

/// Collection of force terms (gravity, drag, etc.)
/// Each term implements [`Force`] and their contributions are summed into the
/// force accumulator of every particle
pub struct ForceSet<const D: usize> {
    terms: Vec<Box<dyn Force<D> + Send + Sync>>,
}

impl<const D: usize> Default for ForceSet<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> ForceSet<D> {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add a force term
    pub fn with(mut self, term: impl Force<D> + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Zero every accumulator, then let each term add its contribution.
    /// Returns the number of pairs the terms had to skip as degenerate
    pub fn accumulate(&self, particles: &mut [Particle<D>]) -> usize {
        // Zero accumulators
        for p in particles.iter_mut() {
            p.force = NVec::<D>::zeros();
        }
        // Iterate over all force contributors
        let mut guarded = 0;
        for term in &self.terms {
            guarded += term.apply(particles);
        }
        guarded
    }
}

/// Source of forces on a live set
/// Implementations add into each particle's accumulator via
/// [`Particle::apply_force`] and never touch position or velocity
pub trait Force<const D: usize> {
    /// Returns the number of degenerate pairs skipped
    fn apply(&self, particles: &mut [Particle<D>]) -> usize;
}

/// Newtonian gravity, direct O(n^2) sum
///
/// Direction convention: the particle initiating the pair is pulled toward the
/// other one. Each unordered pair is visited once and the same force is applied
/// with opposite signs, so every particle receives exactly one contribution
/// from every other particle and the system's net force stays at zero
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64,              // gravitational constant
    pub min_separation: f64, // pairs closer than this are skipped
}

impl<const D: usize> Force<D> for NewtonianGravity {
    fn apply(&self, particles: &mut [Particle<D>]) -> usize {
        let n = particles.len();
        if n < 2 { // Nothing to pair
            return 0;
        }

        let min2 = self.min_separation * self.min_separation;
        let mut guarded = 0;

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let xi = particles[i].x; // position of body i
            let mi = particles[i].m; // mass of body i

            for j in (i + 1)..n {
                let xj = particles[j].x; // position of body j
                let mj = particles[j].m; // mass of body j

                // r points from i to j, so i is pulled along +r and j along -r
                let r = xj - xi;
                let r2 = r.norm_squared();

                // Coincident (or nearly) positions: direction and magnitude
                // are undefined, skip the pair
                if r2 < min2 {
                    guarded += 1;
                    continue;
                }

                // |F| = G m_i m_j / r^2 along the unit vector r / |r|,
                // folded into r * (G m_i m_j / |r|^3)
                let inv_r = r2.sqrt().recip();
                let f = r * (self.G * mi * mj * inv_r * inv_r * inv_r);

                particles[i].apply_force(f);
                particles[j].apply_force(-f);
            }
        }

        guarded
    }
}
