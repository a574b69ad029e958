//! Simulation step orchestrator
//!
//! Owns the live set and sequences one tick per collision policy:
//! - merge:   merge -> gravity -> integrate -> cull out-of-bounds
//! - elastic: gravity -> elastic contacts (zero touched accumulators)
//!            -> integrate -> reflect at bounds
//!
//! A tick runs to completion before anything else can look at the state;
//! renderers only get [`ParticleSnapshot`]s between ticks

use log::{debug, trace, warn};

use crate::error::SimError;
use crate::simulation::collisions::{
    cull_out_of_bounds, reflect_at_bounds, resolve_elastic, resolve_merges, CollisionPolicy,
};
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::params::{validate_dt, Parameters};
use crate::simulation::states::{Bounds, NVec, Particle, ParticleSnapshot};

/// What happened during a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport<const D: usize> {
    pub tick: u64,
    pub merges: usize,
    pub culled: usize,
    pub contacts: usize,
    pub wall_hits: usize,
    pub guarded_pairs: usize,
    pub population: usize,
    pub center_of_mass: Option<NVec<D>>,
}

/// Running totals over the lifetime of a simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub ticks: u64,
    pub merges: u64,
    pub culled: u64,
    pub contacts: u64,
    pub wall_hits: u64,
    pub guarded_pairs: u64,
}

impl Diagnostics {
    fn record<const D: usize>(&mut self, r: &TickReport<D>) {
        self.ticks += 1;
        self.merges += r.merges as u64;
        self.culled += r.culled as u64;
        self.contacts += r.contacts as u64;
        self.wall_hits += r.wall_hits as u64;
        self.guarded_pairs += r.guarded_pairs as u64;
    }
}

pub struct SimulationState<const D: usize> {
    pub particles: Vec<Particle<D>>,   // live set
    pub t: f64,                        // simulated time
    pub tick: u64,                     // completed ticks
    pub policy: CollisionPolicy,
    pub bounds: Option<Bounds<D>>,     // merge culls, elastic reflects, None = open space
    pub min_separation: f64,           // zero-separation guard for contacts
    pub forces: ForceSet<D>,
    pub diagnostics: Diagnostics,
    exhausted_logged: bool,
}

impl<const D: usize> SimulationState<D> {
    /// Validate the particles and parameters and register Newtonian gravity.
    /// `params.dt` is checked here but each [`SimulationState::advance`] takes
    /// its own `dt`
    pub fn new(
        particles: Vec<Particle<D>>,
        policy: CollisionPolicy,
        bounds: Option<Bounds<D>>,
        params: &Parameters,
    ) -> Result<Self, SimError> {
        params.validate()?;
        if let CollisionPolicy::Elastic { restitution } = policy {
            if !(0.0..=1.0).contains(&restitution) {
                return Err(SimError::InvalidRestitution(restitution));
            }
        }
        for (i, p) in particles.iter().enumerate() {
            p.validate(i)?;
        }

        let forces = ForceSet::new().with(NewtonianGravity {
            G: params.G,
            min_separation: params.min_separation,
        });

        Ok(Self {
            particles,
            t: 0.0,
            tick: 0,
            policy,
            bounds,
            min_separation: params.min_separation,
            forces,
            diagnostics: Diagnostics::default(),
            exhausted_logged: false,
        })
    }

    /// Run one tick of length `dt` in place
    pub fn advance(&mut self, dt: f64) -> Result<TickReport<D>, SimError> {
        validate_dt(dt)?;

        let mut merges = 0;
        let mut culled = 0;
        let mut contacts = 0;
        let mut wall_hits = 0;
        let guarded_pairs;

        match self.policy {
            CollisionPolicy::Merge => {
                merges = resolve_merges(&mut self.particles);
                guarded_pairs = self.forces.accumulate(&mut self.particles);
                semi_implicit_euler(&mut self.particles, dt);
                if let Some(bounds) = &self.bounds {
                    culled = cull_out_of_bounds(&mut self.particles, bounds);
                }
            }
            CollisionPolicy::Elastic { restitution } => {
                let gravity_guarded = self.forces.accumulate(&mut self.particles);
                let report = resolve_elastic(&mut self.particles, restitution, self.min_separation);
                contacts = report.contacts;
                guarded_pairs = gravity_guarded + report.guarded;
                semi_implicit_euler(&mut self.particles, dt);
                if let Some(bounds) = &self.bounds {
                    wall_hits = reflect_at_bounds(&mut self.particles, bounds);
                }
            }
        }

        self.t += dt;
        self.tick += 1;

        let report = TickReport {
            tick: self.tick,
            merges,
            culled,
            contacts,
            wall_hits,
            guarded_pairs,
            population: self.particles.len(),
            center_of_mass: self.center_of_mass(),
        };
        self.diagnostics.record(&report);

        if guarded_pairs > 0 {
            debug!("tick {}: skipped {} coincident pair(s)", self.tick, guarded_pairs);
        }
        if merges > 0 || culled > 0 {
            debug!(
                "tick {}: {} merge(s), {} culled, {} live",
                self.tick, merges, culled, report.population
            );
        }
        if report.population <= 1 && !self.exhausted_logged {
            warn!("tick {}: live set down to {} particle(s)", self.tick, report.population);
            self.exhausted_logged = true;
        }
        trace!("tick {}: center of mass {:?}", self.tick, report.center_of_mass);

        Ok(report)
    }

    /// Mass-weighted average position, `None` for an empty live set
    pub fn center_of_mass(&self) -> Option<NVec<D>> {
        let total = self.total_mass();
        if self.particles.is_empty() || total <= 0.0 {
            return None;
        }
        let weighted = self
            .particles
            .iter()
            .fold(NVec::<D>::zeros(), |acc, p| acc + p.x * p.m);
        Some(weighted / total)
    }

    pub fn total_mass(&self) -> f64 {
        self.particles.iter().map(|p| p.m).sum()
    }

    pub fn total_momentum(&self) -> NVec<D> {
        self.particles
            .iter()
            .fold(NVec::<D>::zeros(), |acc, p| acc + p.momentum())
    }

    pub fn snapshot(&self) -> Vec<ParticleSnapshot<D>> {
        self.particles.iter().map(ParticleSnapshot::from).collect()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Consume `state`, advance it one tick and hand it back
pub fn step<const D: usize>(mut state: SimulationState<D>, dt: f64) -> Result<SimulationState<D>, SimError> {
    state.advance(dt)?;
    Ok(state)
}

pub fn snapshot<const D: usize>(state: &SimulationState<D>) -> Vec<ParticleSnapshot<D>> {
    state.snapshot()
}

pub fn center_of_mass<const D: usize>(state: &SimulationState<D>) -> Option<NVec<D>> {
    state.center_of_mass()
}
