//! Core state types for the N-body simulation.
//!
//! Defines the particle record and the rectangular bounds, generic over the
//! dimension `D` (2 or 3) which stays fixed for one simulation instance:
//! - `Particle<D>` position, velocity, force accumulator, radius, mass
//! - `Bounds<D>`   axis-aligned box used for spawning, culling and reflection
//! - `ParticleSnapshot<D>` read-only copy handed to renderers between ticks

use std::f64::consts::PI;

use nalgebra::{SVector, Vector2, Vector3};

use crate::error::SimError;

pub type NVec<const D: usize> = SVector<f64, D>;
pub type NVec2 = Vector2<f64>;
pub type NVec3 = Vector3<f64>;

/// Mass of a sphere of `radius` at uniform `density`
pub fn mass_from_radius(radius: f64, density: f64) -> f64 {
    density * (4.0 / 3.0) * PI * radius.powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle<const D: usize> {
    pub x: NVec<D>, // position
    pub v: NVec<D>, // velocity
    /// Raw force accumulated during the current tick. Divided by mass exactly
    /// once, in [`Particle::integrate`]
    pub force: NVec<D>,
    pub radius: f64, // collision radius
    pub m: f64,      // mass
}

impl<const D: usize> Particle<D> {
    /// Particle at rest with an explicit mass
    pub fn new(x: NVec<D>, radius: f64, m: f64) -> Result<Self, SimError> {
        Self::with_velocity(x, NVec::<D>::zeros(), radius, m)
    }

    pub fn with_velocity(x: NVec<D>, v: NVec<D>, radius: f64, m: f64) -> Result<Self, SimError> {
        let p = Self {
            x,
            v,
            force: NVec::<D>::zeros(),
            radius,
            m,
        };
        p.validate(0)?;
        Ok(p)
    }

    /// Particle at rest whose mass is derived from its radius
    pub fn from_density(x: NVec<D>, radius: f64, density: f64) -> Result<Self, SimError> {
        if !(density.is_finite() && density > 0.0) {
            return Err(SimError::NonPositiveDensity(density));
        }
        Self::new(x, radius, mass_from_radius(radius, density))
    }

    /// Check the live-particle invariants, reporting `index` on failure
    pub fn validate(&self, index: usize) -> Result<(), SimError> {
        if !(self.m.is_finite() && self.m > 0.0) {
            return Err(SimError::NonPositiveMass { index, mass: self.m });
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SimError::NonPositiveRadius { index, radius: self.radius });
        }
        if !self.x.iter().chain(self.v.iter()).all(|c| c.is_finite()) {
            return Err(SimError::NonFinite { name: "particle state" });
        }
        Ok(())
    }

    pub fn apply_force(&mut self, f: NVec<D>) {
        self.force += f;
    }

    /// Semi-implicit Euler: velocity first, then position from the new velocity.
    /// Clears the force accumulator
    pub fn integrate(&mut self, dt: f64) {
        self.v += (self.force / self.m) * dt;
        self.x += self.v * dt;
        self.force = NVec::<D>::zeros();
    }

    pub fn momentum(&self) -> NVec<D> {
        self.v * self.m
    }

    /// `true` when the spheres touch or overlap
    pub fn collided(&self, other: &Self) -> bool {
        (other.x - self.x).norm() <= self.radius + other.radius
    }
}

/// Axis-aligned box `[min, max]` on every axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<const D: usize> {
    pub min: NVec<D>,
    pub max: NVec<D>,
}

impl<const D: usize> Bounds<D> {
    pub fn new(min: NVec<D>, max: NVec<D>) -> Result<Self, SimError> {
        for k in 0..D {
            if !(min[k].is_finite() && max[k].is_finite()) {
                return Err(SimError::NonFinite { name: "bounds" });
            }
            if min[k] > max[k] {
                return Err(SimError::InvertedRange { name: "bounds", min: min[k], max: max[k] });
            }
            // uniform sampling over the box needs a representable extent
            if !(max[k] - min[k]).is_finite() {
                return Err(SimError::NonFinite { name: "bounds extent" });
            }
        }
        Ok(Self { min, max })
    }

    /// Box centred on `center` extending `half_extent` along each axis
    pub fn centered(center: NVec<D>, half_extent: NVec<D>) -> Result<Self, SimError> {
        Self::new(center - half_extent, center + half_extent)
    }

    /// Points on the boundary count as inside
    pub fn contains(&self, p: &NVec<D>) -> bool {
        (0..D).all(|k| p[k] >= self.min[k] && p[k] <= self.max[k])
    }
}

/// Read-only copy of one particle for the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSnapshot<const D: usize> {
    pub position: NVec<D>,
    pub radius: f64,
    pub velocity: NVec<D>,
    pub mass: f64,
}

impl<const D: usize> From<&Particle<D>> for ParticleSnapshot<D> {
    fn from(p: &Particle<D>) -> Self {
        Self {
            position: p.x,
            radius: p.radius,
            velocity: p.v,
            mass: p.m,
        }
    }
}
