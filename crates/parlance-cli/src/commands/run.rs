//! Run a single naming-game simulation.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parlance::prelude::*;
use parlance::runtime::metrics::print_convergence;

use crate::config::Config;

/// Flags that override the loaded configuration.
#[derive(Debug, Default)]
pub struct RunOverrides {
    pub ticks: Option<u64>,
    pub seed: Option<u64>,
    pub population: Option<usize>,
    pub literate: Option<usize>,
    pub wrap: Option<bool>,
    pub report_every: Option<u64>,
    pub check_invariants: bool,
    pub json: bool,
}

pub fn run(overrides: RunOverrides, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let mut builder = SimulationBuilder::from_config(config.simulation.clone());
    if let Some(seed) = overrides.seed {
        builder = builder.seed(seed);
    }
    if let Some(n) = overrides.population {
        builder = builder.population_size(n);
    }
    if let Some(n) = overrides.literate {
        builder = builder.literate_count(n);
    }
    if let Some(wrap) = overrides.wrap {
        builder = builder.wrap(wrap);
    }
    if overrides.check_invariants {
        builder = builder.check_invariants(true);
    }
    let ticks = overrides.ticks.unwrap_or(config.run.ticks);
    let report_every = overrides.report_every.unwrap_or(config.run.report_every);
    tracing::debug!(config = ?builder.config(), ticks, report_every, "resolved run configuration");

    let mut sim = builder.build().context("Invalid simulation configuration")?;

    if !overrides.json {
        let c = sim.config();
        println!(
            "{} Running {} ticks: {} agents ({} literate) on a {}x{} {} grid, seed {}",
            "→".blue(),
            ticks.to_string().cyan(),
            c.population_size.to_string().cyan(),
            c.literate_count,
            c.width,
            c.height,
            if sim.field().wraps() { "toroidal" } else { "bounded" },
            c.seed
        );
    }

    let pb = if overrides.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(ticks)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks {msg}")?
            .progress_chars("#>-"),
    );

    for _ in 0..ticks {
        let events = sim
            .tick()
            .with_context(|| format!("Simulation aborted at tick {}", sim.current_tick()))?;
        if verbose {
            let changes = events
                .iter()
                .filter(|e| matches!(e, SimulationEvent::Lexicon(_)))
                .count();
            if changes > 0 {
                pb.println(format!("  tick {}: {} lexicon changes", sim.current_tick(), changes));
            }
        }
        let tick = sim.current_tick();
        if report_every > 0 && tick % report_every == 0 && !overrides.json {
            pb.println(format!(
                "{} tick {} · success {:.3} · dialogs {}",
                "──".dimmed(),
                tick,
                sim.success(),
                sim.stats().total_dialogs
            ));
            pb.println(sim.registry().report().trim_end().to_string());
        }
        pb.set_message(format!("success {:.3}", sim.success()));
        pb.inc(1);
    }
    pb.finish_and_clear();

    if overrides.json {
        println!("{}", sim.snapshot_json()?);
        return Ok(());
    }

    let stats = sim.stats();
    println!();
    println!("{} Simulation complete!", "✓".green().bold());
    println!("  Ticks:               {}", stats.tick.to_string().cyan());
    println!("  Dialogs:             {}", stats.total_dialogs.to_string().cyan());
    println!("  Windowed success:    {}", format!("{:.3}", stats.success).green());
    println!("  Mean agent success:  {}", format!("{:.3}", stats.average_success).green());
    println!(
        "  Words in use:        {} ({} couplings)",
        stats.distinct_words.to_string().yellow(),
        stats.total_couplings
    );
    println!("  Occupied cells:      {}", stats.occupied_cells);
    println!();
    print_convergence(&sim.convergence());

    Ok(())
}
