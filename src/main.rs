use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use evocar_lib::core::{init_logging, SimConfig, Simulation};
use evocar_lib::data::Pose;
use evocar_lib::demo;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of fixed ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Chassis polygon vertex count
    #[arg(long, default_value_t = 8)]
    vertices: usize,

    /// Number of wheels
    #[arg(long, default_value_t = 2)]
    wheels: usize,

    /// Chassis radius
    #[arg(long, default_value_t = 4.0)]
    radius: f32,
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    SimConfig::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let fingerprint = config.fingerprint();
    let anchor = config.track.anchor;
    let mut sim = Simulation::new(config)?;

    let genome = demo::regular_car(args.vertices, args.wheels, args.radius);
    let spawn = Pose::at(anchor.x, anchor.y + demo::clearance(&genome));
    let vehicle = sim.build_vehicle(&genome, spawn)?;
    tracing::info!(
        vertices = genome.vertex_count(),
        wheels = genome.wheel_count(),
        bodies = vehicle.body_count(),
        "Vehicle built"
    );

    sim.run(args.ticks)?;

    let pose = sim
        .body_pose(vehicle.chassis)
        .context("chassis missing after run")?;
    let displacement = sim.chassis_displacement().unwrap_or_default();
    sim.destroy_vehicle();

    println!("ticks:        {}", sim.clock().ticks());
    println!("elapsed:      {:.3}s", sim.clock().elapsed());
    println!(
        "final pose:   ({:.3}, {:.3}) angle {:.3}",
        pose.position.x, pose.position.y, pose.angle
    );
    println!("displacement: {displacement:.3}");
    println!("config:       {fingerprint}");
    Ok(())
}
