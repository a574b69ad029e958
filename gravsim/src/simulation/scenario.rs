//! Build fully-initialized simulation scenarios
//!
//! Two entry points:
//! - [`initialize`] spawns a random batch into a region and wraps it in a
//!   [`SimulationState`]
//! - [`Scenario::build`] maps a YAML-facing [`ScenarioConfig`] onto the runtime
//!   types, spawning and appending explicit bodies as configured
//!
//! The dimension is the const parameter `D`; a config whose `dimension` does
//! not match is rejected

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{BodyConfig, BoundsConfig, MassConfig, PolicyConfig, ScenarioConfig};
use crate::error::SimError;
use crate::simulation::collisions::CollisionPolicy;
use crate::simulation::engine::SimulationState;
use crate::simulation::params::Parameters;
use crate::simulation::states::{mass_from_radius, Bounds, NVec, Particle};

/// Closed interval `[min, max]` sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformRange {
    pub min: f64,
    pub max: f64,
}

impl UniformRange {
    /// Both ends must be positive and finite with `min <= max`
    pub fn positive(name: &'static str, min: f64, max: f64) -> Result<Self, SimError> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(SimError::NonFinite { name });
        }
        if min > max {
            return Err(SimError::InvertedRange { name, min, max });
        }
        if min <= 0.0 {
            return Err(SimError::NonPositiveRange { name, min });
        }
        Ok(Self { min, max })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MassPolicy {
    /// Mass drawn independently of radius
    Uniform(UniformRange),
    /// Mass derived from radius at this density
    Density(f64),
}

impl MassPolicy {
    fn validate(&self) -> Result<(), SimError> {
        match *self {
            MassPolicy::Uniform(range) => UniformRange::positive("mass", range.min, range.max).map(|_| ()),
            MassPolicy::Density(density) if density.is_finite() && density > 0.0 => Ok(()),
            MassPolicy::Density(density) => Err(SimError::NonPositiveDensity(density)),
        }
    }
}

/// Random spawn description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnBatch<const D: usize> {
    pub count: usize,
    pub region: Bounds<D>,
    pub radius: UniformRange,
    pub mass: MassPolicy,
}

/// Spawn `batch.count` particles at rest, uniformly inside `batch.region`
pub fn spawn_particles<const D: usize, R: Rng + ?Sized>(
    batch: &SpawnBatch<D>,
    rng: &mut R,
) -> Result<Vec<Particle<D>>, SimError> {
    if batch.count == 0 {
        return Err(SimError::InvalidParticleCount(batch.count));
    }
    UniformRange::positive("radius", batch.radius.min, batch.radius.max)?;
    batch.mass.validate()?;

    let mut particles = Vec::with_capacity(batch.count);
    for _ in 0..batch.count {
        let x = NVec::<D>::from_fn(|k, _| rng.gen_range(batch.region.min[k]..=batch.region.max[k]));
        let radius = batch.radius.sample(rng);
        let m = match batch.mass {
            MassPolicy::Uniform(range) => range.sample(rng),
            MassPolicy::Density(density) => mass_from_radius(radius, density),
        };
        particles.push(Particle::new(x, radius, m)?);
    }
    Ok(particles)
}

/// Spawn a batch and wrap it in a ready-to-step simulation
pub fn initialize<const D: usize, R: Rng + ?Sized>(
    batch: &SpawnBatch<D>,
    policy: CollisionPolicy,
    bounds: Option<Bounds<D>>,
    params: &Parameters,
    rng: &mut R,
) -> Result<SimulationState<D>, SimError> {
    let particles = spawn_particles(batch, rng)?;
    SimulationState::new(particles, policy, bounds, params)
}

/// A fully-initialized runtime bundle built from a [`ScenarioConfig`]
pub struct Scenario<const D: usize> {
    pub parameters: Parameters,
    pub state: SimulationState<D>,
}

impl<const D: usize> Scenario<D> {
    pub fn build(cfg: &ScenarioConfig) -> Result<Self, SimError> {
        if !matches!(cfg.engine.dimension, 2 | 3) {
            return Err(SimError::UnsupportedDimension(cfg.engine.dimension));
        }
        if cfg.engine.dimension as usize != D {
            return Err(SimError::DimensionMismatch {
                name: "engine.dimension",
                expected: D,
                got: cfg.engine.dimension as usize,
            });
        }

        // Parameters (runtime) from ParametersConfig
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            G: p_cfg.G,
            min_separation: p_cfg.min_separation,
            seed: p_cfg.seed,
            ticks: p_cfg.ticks,
        };
        parameters.validate()?;
        if !(0.0..=1.0).contains(&p_cfg.restitution) {
            return Err(SimError::InvalidRestitution(p_cfg.restitution));
        }

        let policy = match cfg.engine.policy {
            PolicyConfig::Merge => CollisionPolicy::Merge,
            PolicyConfig::Elastic => CollisionPolicy::Elastic {
                restitution: p_cfg.restitution,
            },
        };

        let bounds = cfg.bounds.as_ref().map(bounds_from_config::<D>).transpose()?;

        let mut rng = StdRng::seed_from_u64(parameters.seed);
        let mut particles = Vec::new();
        let mut mass_policy = None;

        if let Some(spawn) = &cfg.spawn {
            let mass = match spawn.mass {
                MassConfig::Uniform { min, max } => MassPolicy::Uniform(UniformRange { min, max }),
                MassConfig::Density { density } => MassPolicy::Density(density),
            };
            let batch = SpawnBatch {
                count: spawn.count,
                region: bounds_from_config(&spawn.region)?,
                radius: UniformRange {
                    min: spawn.radius.min,
                    max: spawn.radius.max,
                },
                mass,
            };
            particles = spawn_particles(&batch, &mut rng)?;
            mass_policy = Some(mass);
        }

        let offset = particles.len();
        for (i, bc) in cfg.bodies.iter().enumerate() {
            particles.push(body_from_config(offset + i, bc, mass_policy)?);
        }

        if particles.is_empty() {
            return Err(SimError::InvalidParticleCount(0));
        }

        info!(
            "built {}D {:?} scenario: {} particles, dt = {}, G = {:e}",
            D,
            cfg.engine.policy,
            particles.len(),
            parameters.dt,
            parameters.G
        );

        let state = SimulationState::new(particles, policy, bounds, &parameters)?;
        Ok(Self { parameters, state })
    }
}

/// Copy a config vector into an `NVec`, checking length and finiteness
pub fn vector_from_slice<const D: usize>(name: &'static str, v: &[f64]) -> Result<NVec<D>, SimError> {
    if v.len() != D {
        return Err(SimError::DimensionMismatch { name, expected: D, got: v.len() });
    }
    if !v.iter().all(|c| c.is_finite()) {
        return Err(SimError::NonFinite { name });
    }
    Ok(NVec::<D>::from_column_slice(v))
}

fn bounds_from_config<const D: usize>(bc: &BoundsConfig) -> Result<Bounds<D>, SimError> {
    Bounds::new(vector_from_slice("bounds.min", &bc.min)?, vector_from_slice("bounds.max", &bc.max)?)
}

fn body_from_config<const D: usize>(
    index: usize,
    bc: &BodyConfig,
    mass_policy: Option<MassPolicy>,
) -> Result<Particle<D>, SimError> {
    let x = vector_from_slice("body.x", &bc.x)?;
    let v = match &bc.v {
        Some(v) => vector_from_slice("body.v", v)?,
        None => NVec::<D>::zeros(),
    };
    let m = match (mass_policy, bc.m) {
        (Some(MassPolicy::Density(density)), _) => {
            if !(density.is_finite() && density > 0.0) {
                return Err(SimError::NonPositiveDensity(density));
            }
            mass_from_radius(bc.radius, density)
        }
        (_, Some(m)) => m,
        (_, None) => return Err(SimError::MissingMass { index }),
    };
    let p = Particle { x, v, force: NVec::<D>::zeros(), radius: bc.radius, m };
    p.validate(index)?;
    Ok(p)
}
