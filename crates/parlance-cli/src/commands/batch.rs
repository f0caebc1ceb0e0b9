//! Run one configuration over many seeds and summarize.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parlance::prelude::*;

use crate::config::Config;

pub fn run(runs: Option<u64>, ticks: Option<u64>, seed: Option<u64>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let mut base = config.simulation.clone();
    if let Some(seed) = seed {
        base.seed = seed;
    }
    let runs = runs.unwrap_or(config.batch.runs);
    let ticks = ticks.unwrap_or(config.batch.ticks);
    let batch = BatchConfig::new(base, runs, ticks);

    if !json {
        println!(
            "{} Running {} seeds × {} ticks...",
            "→".blue(),
            runs.to_string().cyan(),
            ticks.to_string().cyan()
        );
    }

    let pb = if json { ProgressBar::hidden() } else { ProgressBar::new(runs) };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} runs")?
            .progress_chars("#>-"),
    );
    let report = run_batch(&batch, |_| pb.inc(1)).context("Batch run failed")?;
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("  {:>8} {:>9} {:>9} {:>11} {:>7}", "seed", "success", "agents", "convergence", "words");
    for r in &report.runs {
        println!(
            "  {:>8} {:>9.3} {:>9.3} {:>11.3} {:>7}",
            r.seed, r.success, r.average_success, r.convergence, r.distinct_words
        );
    }
    println!();
    print_spread("Windowed success", report.success);
    print_spread("Mean agent success", report.average_success);
    print_spread("Convergence", report.convergence);

    Ok(())
}

fn print_spread(label: &str, spread: Option<Spread>) {
    match spread {
        Some(s) => println!(
            "  {:<20} mean {}  min {:.3}  max {:.3}",
            label,
            format!("{:.3}", s.mean).green(),
            s.min,
            s.max
        ),
        None => println!("  {:<20} {}", label, "no runs".yellow()),
    }
}
