pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::SimError;

pub use simulation::states::{mass_from_radius, Bounds, NVec, NVec2, NVec3, Particle, ParticleSnapshot};
pub use simulation::params::Parameters;
pub use simulation::forces::{Force, ForceSet, NewtonianGravity};
pub use simulation::collisions::{resolve_elastic, resolve_merges, CollisionPolicy, ContactReport};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::engine::{center_of_mass, snapshot, step, Diagnostics, SimulationState, TickReport};
pub use simulation::scenario::{initialize, spawn_particles, MassPolicy, Scenario, SpawnBatch, UniformRange};

pub use configuration::config::{
    BodyConfig, BoundsConfig, EngineConfig, MassConfig, ParametersConfig, PolicyConfig, RangeConfig, ScenarioConfig,
    SpawnConfig,
};

pub use benchmark::benchmark::bench_step;
