use std::time::Instant;

use crate::error::SimError;
use crate::simulation::collisions::CollisionPolicy;
use crate::simulation::engine::SimulationState;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, Particle};

/// Helper to build a deterministic 3D live set of size `n`, no rand needed.
/// Spacing keeps the spheres apart so the tick cost is dominated by gravity
fn make_particles(n: usize) -> Vec<Particle<3>> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            Particle {
                x: NVec3::new(
                    (i_f * 0.37).sin() * 500.0 + i_f,
                    (i_f * 0.13).cos() * 500.0,
                    (i_f * 0.07).sin() * 500.0,
                ),
                v: NVec3::zeros(),
                force: NVec3::zeros(),
                radius: 0.01,
                m: 1.0,
            }
        })
        .collect()
}

/// Time one full elastic tick (gravity + contact scan + integration) for a
/// ladder of population sizes
/// Paste output directly into a spreadsheet to graph
pub fn bench_step() -> Result<(), SimError> {
    let params = Parameters {
        G: 0.1,
        ..Parameters::default()
    };

    println!("N,step_ms");

    for n in [100, 200, 400, 800, 1600, 3200] {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 10 } else { 2 };

        let mut state = SimulationState::new(
            make_particles(n),
            CollisionPolicy::Elastic { restitution: 1.0 },
            None,
            &params,
        )?;

        // Warm-up
        state.advance(params.dt)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            state.advance(params.dt)?;
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
    Ok(())
}
