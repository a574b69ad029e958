//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – dimension and collision policy
//! - [`ParametersConfig`] – timestep, physical constants, seed, run length
//! - [`BoundsConfig`]     – optional simulation box (merge culls, elastic reflects)
//! - [`SpawnConfig`]      – optional batch of randomly placed particles
//! - [`BodyConfig`]       – optional explicit particles
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! A 2D merge scenario matching these types:
//!
//! ```yaml
//! engine:
//!   dimension: 2            # 2 or 3
//!   policy: "merge"         # or "elastic"
//!
//! parameters:
//!   dt: 0.016666666666666666
//!   G: 6.67408e-10
//!   restitution: 0.0        # elastic only
//!   min_separation: 1.0e-6  # pairs closer than this are skipped
//!   seed: 42
//!   ticks: 600
//!
//! bounds:
//!   min: [0.0, 0.0]
//!   max: [360.0, 360.0]
//!
//! spawn:
//!   count: 200
//!   region: { min: [0.0, 0.0], max: [360.0, 360.0] }
//!   radius: { min: 0.25, max: 1.0 }
//!   mass: { kind: "uniform", min: 1.0e13, max: 3.0e13 }
//!
//! bodies:
//!   - x: [ 180.0, 180.0 ]
//!     v: [ 0.0, 0.0 ]
//!     radius: 2.0
//!     m: 5.0e13
//! ```
//!
//! The builder in `simulation::scenario` validates this and maps it onto the
//! runtime types.

use serde::Deserialize;

use crate::simulation::params::{DEFAULT_DT, DEFAULT_G, DEFAULT_MIN_SEPARATION};

/// Collision response, `policy: "merge"` or `policy: "elastic"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyConfig {
    #[serde(rename = "merge")] // Perfectly inelastic merging, population shrinks
    Merge,

    #[serde(rename = "elastic")] // Impulse-based bouncing, population is fixed
    Elastic,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub dimension: u8,          // 2 or 3
    pub policy: PolicyConfig,   // collision response
}

fn default_min_separation() -> f64 {
    DEFAULT_MIN_SEPARATION
}

fn default_seed() -> u64 {
    42
}

fn default_ticks() -> u64 {
    600
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,                // fixed time step
    pub G: f64,                 // gravitational constant
    #[serde(default)]
    pub restitution: f64,       // elastic contacts, 0..=1
    #[serde(default = "default_min_separation")]
    pub min_separation: f64,    // zero-separation guard
    #[serde(default = "default_seed")]
    pub seed: u64,              // deterministic seed to make runs reproducible
    #[serde(default = "default_ticks")]
    pub ticks: u64,             // headless run length
}

#[derive(Deserialize, Debug, Clone)]
pub struct BoundsConfig {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

/// Closed interval sampled uniformly
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct RangeConfig {
    pub min: f64,
    pub max: f64,
}

/// How spawned particles get their mass
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MassConfig {
    Uniform { min: f64, max: f64 }, // independent of radius
    Density { density: f64 },       // density * 4/3 pi r^3
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpawnConfig {
    pub count: usize,
    pub region: BoundsConfig,
    pub radius: RangeConfig,
    pub mass: MassConfig,
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>,            // initial position
    #[serde(default)]
    pub v: Option<Vec<f64>>,    // initial velocity, at rest when omitted
    pub radius: f64,            // collision radius
    #[serde(default)]
    pub m: Option<f64>,         // mass, required unless the spawn mass policy is density
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub bounds: Option<BoundsConfig>,
    #[serde(default)]
    pub spawn: Option<SpawnConfig>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    /// 2D merging demo: 200 particles scattered over a 360x360 canvas that
    /// doubles as the culling bounds
    pub fn merge_demo() -> Self {
        let canvas = BoundsConfig {
            min: vec![0.0, 0.0],
            max: vec![360.0, 360.0],
        };
        Self {
            engine: EngineConfig {
                dimension: 2,
                policy: PolicyConfig::Merge,
            },
            parameters: ParametersConfig {
                dt: DEFAULT_DT,
                G: DEFAULT_G,
                restitution: 0.0,
                min_separation: DEFAULT_MIN_SEPARATION,
                seed: default_seed(),
                ticks: default_ticks(),
            },
            bounds: Some(canvas.clone()),
            spawn: Some(SpawnConfig {
                count: 200,
                region: canvas,
                radius: RangeConfig { min: 0.25, max: 1.0 },
                mass: MassConfig::Uniform { min: 1.0e13, max: 3.0e13 },
            }),
            bodies: Vec::new(),
        }
    }

    /// 3D bouncing demo: 150 equal spheres of radius 3 in a +/-90 box with
    /// fully inelastic contacts
    pub fn elastic_demo() -> Self {
        let cube = BoundsConfig {
            min: vec![-90.0, -90.0, -90.0],
            max: vec![90.0, 90.0, 90.0],
        };
        Self {
            engine: EngineConfig {
                dimension: 3,
                policy: PolicyConfig::Elastic,
            },
            parameters: ParametersConfig {
                dt: DEFAULT_DT,
                G: DEFAULT_G,
                restitution: 0.0,
                min_separation: DEFAULT_MIN_SEPARATION,
                seed: default_seed(),
                ticks: default_ticks(),
            },
            bounds: Some(cube.clone()),
            spawn: Some(SpawnConfig {
                count: 150,
                region: cube,
                radius: RangeConfig { min: 3.0, max: 3.0 },
                mass: MassConfig::Density { density: 4.0e10 },
            }),
            bodies: Vec::new(),
        }
    }
}
