//! Headless driver: runs a world for a fixed number of ticks and reports
//! population statistics through the log.

mod config;
mod telemetry;

use anyhow::Result;
use config::RunnerConfig;
use gridlife_core::EntityKind;
use gridlife_world::{TickSummary, World, WorldStats};
use std::time::Instant;
use tracing::{info, warn};

fn main() -> Result<()> {
    let config = RunnerConfig::load(std::env::args().nth(1))?;

    telemetry::init_telemetry(config.json_logs)?;

    info!(
        seed = config.sim.seed,
        width = config.sim.world.width,
        height = config.sim.world.height,
        num_ticks = config.num_ticks,
        "Starting Gridlife runner"
    );

    let mut world = World::new(config.sim.clone())?;
    let started = Instant::now();

    for _ in 0..config.num_ticks {
        world.iterate();

        if config.report_every > 0 && world.iteration() % config.report_every == 0 {
            emit_population_metrics(&world.stats(), world.last_tick());
        }
    }

    let stats = world.stats();
    emit_run_summary(&stats, started.elapsed().as_secs_f64());
    Ok(())
}

/// Periodic population snapshot
fn emit_population_metrics(stats: &WorldStats, tick: &TickSummary) {
    let max_generation = stats.organisms.iter().map(|o| o.generation).max().unwrap_or(0);

    info!(
        event = "population_metrics",
        iteration = stats.iteration,
        generation = stats.generation,
        organisms = stats.count(EntityKind::Organism),
        resources = stats.count(EntityKind::Resource),
        hazards = stats.count(EntityKind::Hazard),
        obstacles = stats.count(EntityKind::Obstacle),
        avg_health = format!("{:.1}", stats.mean_health()),
        avg_code_length = format!("{:.1}", stats.mean_code_length()),
        max_generation,
        moved = tick.moved,
        blocked = tick.blocked,
        deaths = tick.deaths,
        "Population metrics snapshot"
    );

    if stats.count(EntityKind::Organism) == 0 {
        warn!(iteration = stats.iteration, "Population extinct");
    }
}

fn emit_run_summary(stats: &WorldStats, elapsed_secs: f64) {
    let ticks_per_sec = if elapsed_secs > 0.0 {
        stats.iteration as f64 / elapsed_secs
    } else {
        0.0
    };

    info!(
        event = "run_summary",
        iterations = stats.iteration,
        generations = stats.generation,
        survivors = stats.count(EntityKind::Organism),
        ticks_per_sec = format!("{:.0}", ticks_per_sec),
        "Run complete"
    );

    for organism in stats.organisms.iter().take(10) {
        info!(
            event = "survivor_detail",
            generation = organism.generation,
            health = organism.health,
            age = organism.age,
            code_length = organism.code_length,
            "Survivor"
        );
    }
}
