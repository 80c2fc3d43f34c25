//! Sentry simulation runner
//!
//! Loads a scenario and runs it headless, logging state changes and attacks.
//!
//! Run with: cargo run -p sentry_sim -- scenarios/courtyard.toml
//!
//! Environment overrides:
//! - `SENTRY_SCENARIO`: scenario path when none is given on the command line
//! - `SENTRY_TICKS`, `SENTRY_DT`, `SENTRY_THREADS`: override scenario values
//! - `SENTRY_TRACE`: write one JSON line of snapshots per tick to this path

use sentry_ai::{AgentSnapshot, AttackEffect, BehaviorState};
use sentry_math::Vec2;
use sentry_sim::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::ExitCode;

const DEFAULT_SCENARIO: &str = "scenarios/courtyard.toml";

#[derive(Serialize)]
struct TraceLine<'a> {
    tick: u64,
    target: Vec2,
    agents: &'a [AgentSnapshot],
    attacks: &'a [AttackEffect],
}

/// Resolved run settings: scenario file first, then environment overrides
struct RunConfig {
    scenario: Scenario,
    trace_path: Option<String>,
}

impl RunConfig {
    fn load() -> Result<Self> {
        let path = std::env::args()
            .skip(1)
            .find(|arg| !arg.starts_with("--"))
            .or_else(|| std::env::var("SENTRY_SCENARIO").ok())
            .unwrap_or_else(|| DEFAULT_SCENARIO.to_string());

        let mut scenario = Scenario::load(&path)?;

        if let Some(ticks) = env_parse::<u64>("SENTRY_TICKS") {
            scenario.ticks = ticks;
            log::info!("Ticks from env: {}", ticks);
        }
        if let Some(dt) = env_parse::<f32>("SENTRY_DT") {
            scenario.delta_time = dt;
            log::info!("Delta time from env: {}", dt);
        }
        if let Some(threads) = env_parse::<usize>("SENTRY_THREADS") {
            scenario.threads = threads;
            log::info!("Threads from env: {}", threads);
        }
        scenario.validate()?;

        let trace_path = std::env::var("SENTRY_TRACE").ok().filter(|p| !p.is_empty());
        Ok(Self {
            scenario,
            trace_path,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = std::env::var(key).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("Ignoring unparsable {}={}", key, value);
            None
        }
    }
}

fn run(config: RunConfig) -> Result<()> {
    let scenario = &config.scenario;
    let mut sim = Simulation::from_scenario(scenario)?;
    let mut trace = match &config.trace_path {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };

    log::info!(
        "Running {} ticks at dt={} with {} agents on {} thread(s)",
        scenario.ticks,
        scenario.delta_time,
        sim.world().agent_count(),
        scenario.threads.max(1)
    );

    let mut states: Vec<BehaviorState> = sim.world().agents().map(|a| a.state()).collect();
    let mut total_attacks = 0usize;

    for _ in 0..scenario.ticks {
        sim.step()?;
        let world = sim.world();
        let tick = world.ticks();

        let snapshots = world.snapshots();
        for (previous, snapshot) in states.iter_mut().zip(&snapshots) {
            if *previous != snapshot.state {
                log::info!("[{:>5}] agent#{} {} -> {}", tick, snapshot.id, previous, snapshot.state);
                *previous = snapshot.state;
            }
        }

        let attacks = world.drain_effects();
        for attack in &attacks {
            log::info!(
                "[{:>5}] {} attacks at ({:.2}, {:.2})",
                tick,
                attack.agent,
                attack.position.x,
                attack.position.y
            );
        }
        total_attacks += attacks.len();

        if let Some(out) = trace.as_mut() {
            let line = TraceLine {
                tick,
                target: world.target(),
                agents: &snapshots,
                attacks: &attacks,
            };
            serde_json::to_writer(&mut *out, &line)?;
            out.write_all(b"\n")?;
        }
    }

    if let Some(mut out) = trace {
        out.flush()?;
    }

    for agent in sim.world().agents() {
        log::info!(
            "{} finished in {} at ({:.2}, {:.2})",
            agent.id(),
            agent.state(),
            agent.position().x,
            agent.position().y
        );
    }
    log::info!("Done: {} attacks", total_attacks);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = RunConfig::load().and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
