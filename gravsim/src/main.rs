use gravsim::{bench_step, Scenario, ScenarioConfig, TickReport};

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Preset {
    Merge,   // 2D merging demo
    Elastic, // 3D bouncing demo
}

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long, default_value = "merge_2d.yaml")]
    file_name: String,

    /// Use a built-in scenario instead of a file
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Override the number of ticks to run
    #[arg(long)]
    ticks: Option<u64>,

    /// Time the step for a range of population sizes and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
    Ok(scenario_cfg)
}

/// Headless driver: the snapshot handed out after each tick goes to a
/// logging observer in place of a renderer
fn run<const D: usize>(cfg: &ScenarioConfig, ticks: u64) -> Result<()> {
    let Scenario { parameters, mut state } = Scenario::<D>::build(cfg)?;
    let dt = parameters.dt;
    let log_every = (ticks / 10).max(1);

    info!(
        "running {} ticks, initial mass {:e}, momentum {:?}",
        ticks,
        state.total_mass(),
        state.total_momentum().as_slice()
    );

    for _ in 0..ticks {
        let report: TickReport<D> = state.advance(dt)?;
        let frame = state.snapshot();
        if report.tick % log_every == 0 {
            let fastest = frame.iter().map(|p| p.velocity.norm()).fold(0.0, f64::max);
            info!(
                "tick {:>6}: {} live, fastest {:.3}, center of mass {:?}",
                report.tick,
                frame.len(),
                fastest,
                report.center_of_mass.map(|c| c.as_slice().to_vec())
            );
        }
    }

    let d = state.diagnostics;
    println!("t = {:.4} after {} ticks", state.t, d.ticks);
    println!("live particles:  {}", state.len());
    println!("total mass:      {:e}", state.total_mass());
    println!("total momentum:  {:?}", state.total_momentum().as_slice());
    println!("center of mass:  {:?}", state.center_of_mass().map(|c| c.as_slice().to_vec()));
    println!(
        "merges {}, culled {}, contacts {}, wall hits {}, guarded pairs {}",
        d.merges, d.culled, d.contacts, d.wall_hits, d.guarded_pairs
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_step()?;
        return Ok(());
    }

    let scenario_cfg = match args.preset {
        Some(Preset::Merge) => ScenarioConfig::merge_demo(),
        Some(Preset::Elastic) => ScenarioConfig::elastic_demo(),
        None => load_scenario_from_yaml(&args.file_name)?,
    };
    let ticks = args.ticks.unwrap_or(scenario_cfg.parameters.ticks);

    match scenario_cfg.engine.dimension {
        2 => run::<2>(&scenario_cfg, ticks),
        3 => run::<3>(&scenario_cfg, ticks),
        d => bail!("unsupported dimension {d}, expected 2 or 3"),
    }
}
