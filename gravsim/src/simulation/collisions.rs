//! Collision detection and response
//!
//! Two interchangeable policies act on overlapping pairs, where two particles
//! overlap when their centres are no further apart than the sum of their radii:
//! - merge: perfectly inelastic, the pair fuses and the live set shrinks
//! - elastic: impulse along the contact normal, the population is preserved
//!
//! Plus the boundary treatment that goes with each policy (cull or reflect)

use crate::simulation::states::{Bounds, NVec, Particle};

/// Which collision response a simulation runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionPolicy {
    /// Perfectly inelastic merging, runs before force accumulation
    Merge,
    /// Impulse response with restitution coefficient `e` in [0, 1], runs after
    /// force accumulation
    Elastic { restitution: f64 },
}

/// Fuse `b` into `a`, conserving mass and linear momentum.
/// The merged radius keeps the summed cross-section, `sqrt(ra^2 + rb^2)`, not
/// the summed volume
pub fn merge_into<const D: usize>(a: &mut Particle<D>, b: &Particle<D>) {
    let total = a.m + b.m;
    a.x = (a.x * a.m + b.x * b.m) / total;
    a.v = (a.v * a.m + b.v * b.m) / total;
    a.m = total;
    a.radius = (a.radius * a.radius + b.radius * b.radius).sqrt();
}

/// Merge every overlapping pair and compact the live set.
/// Returns the number of particles absorbed
///
/// Scan order: outer index forward, inner index backward over every other live
/// particle. A hit marks the inner particle as removed so it is never visited
/// again; the absorbing particle keeps its updated position and radius for the
/// rest of its inner scan, so a cluster of three or more collapses into the
/// lowest surviving index in one tick. Removed particles are dropped in a single
/// pass at the end
pub fn resolve_merges<const D: usize>(particles: &mut Vec<Particle<D>>) -> usize {
    let n = particles.len();
    if n < 2 {
        return 0;
    }

    let mut removed = vec![false; n];
    let mut merges = 0;

    for i in 0..n {
        if removed[i] {
            continue;
        }
        for j in (0..n).rev() {
            if j == i || removed[j] {
                continue;
            }
            if !particles[i].collided(&particles[j]) {
                continue;
            }
            let absorbed = particles[j];
            merge_into(&mut particles[i], &absorbed);
            removed[j] = true;
            merges += 1;
        }
    }

    if merges > 0 {
        let mut flags = removed.iter();
        particles.retain(|_| !flags.next().copied().unwrap_or(false));
    }
    merges
}

/// Result of one elastic pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactReport {
    pub contacts: usize, // pairs that received an impulse
    pub guarded: usize,  // overlapping pairs skipped for lack of a normal
}

/// Zero both force accumulators of every overlapping pair, so the gravity
/// computed earlier in the tick is not integrated on top of the contact, and
/// apply an impulse to those pairs that are still approaching
///
/// Point-mass contact: the rotational terms of the impulse denominator are
/// left out. Each unordered pair is resolved once; separating or resting pairs
/// get no impulse so that repeated overlap does not pull them back together
pub fn resolve_elastic<const D: usize>(
    particles: &mut [Particle<D>],
    restitution: f64,
    min_separation: f64,
) -> ContactReport {
    let mut report = ContactReport::default();
    let n = particles.len();

    for i in 0..n {
        for j in (i + 1)..n {
            if !particles[i].collided(&particles[j]) {
                continue;
            }

            let (head, tail) = particles.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            a.force = NVec::<D>::zeros();
            b.force = NVec::<D>::zeros();

            let d = a.x - b.x;
            let dist = d.norm();
            if dist < min_separation {
                report.guarded += 1;
                continue;
            }

            // normal points from b to a
            let normal = d / dist;
            let vn = (a.v - b.v).dot(&normal);
            if vn >= 0.0 {
                continue;
            }

            let j_impulse = (1.0 + restitution) * vn / (a.m.recip() + b.m.recip());
            a.v -= normal * (j_impulse / a.m);
            b.v += normal * (j_impulse / b.m);
            report.contacts += 1;
        }
    }

    report
}

/// Drop every particle whose position lies outside `bounds`.
/// Returns the number removed
pub fn cull_out_of_bounds<const D: usize>(particles: &mut Vec<Particle<D>>, bounds: &Bounds<D>) -> usize {
    let before = particles.len();
    particles.retain(|p| bounds.contains(&p.x));
    before - particles.len()
}

/// Clamp escaped particles back onto the wall and flip the outward velocity
/// component. Returns the number of wall hits
pub fn reflect_at_bounds<const D: usize>(particles: &mut [Particle<D>], bounds: &Bounds<D>) -> usize {
    let mut hits = 0;
    for p in particles.iter_mut() {
        for k in 0..D {
            if p.x[k] < bounds.min[k] {
                p.x[k] = bounds.min[k];
                p.v[k] = p.v[k].abs();
                hits += 1;
            } else if p.x[k] > bounds.max[k] {
                p.x[k] = bounds.max[k];
                p.v[k] = -p.v[k].abs();
                hits += 1;
            }
        }
    }
    hits
}
