//! Batch runs: one configuration over many seeds.
//!
//! Each run is independent and sequential. The report aggregates the final
//! windowed success, mean agent success, and convergence across seeds.

use crate::simulation::Simulation;
use parlance_core::config::SimulationConfig;
use parlance_core::error::Result;
use parlance_core::types::Tick;
use serde::Serialize;
use tracing::info;

/// Configuration for a batch of runs.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Every run uses this config with its own seed.
    pub base: SimulationConfig,
    pub seeds: Vec<u64>,
    pub ticks: u64,
}

impl BatchConfig {
    /// `runs` consecutive seeds starting at `base.seed`.
    pub fn new(base: SimulationConfig, runs: u64, ticks: u64) -> Self {
        let seeds = (0..runs).map(|i| base.seed.wrapping_add(i)).collect();
        Self { base, seeds, ticks }
    }
}

/// Final state of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: Tick,
    pub success: f64,
    pub average_success: f64,
    pub convergence: f64,
    pub distinct_words: usize,
    pub total_dialogs: u64,
}

/// Mean, minimum and maximum of one measure across runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spread {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl Spread {
    /// `None` for an empty input.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self { mean, min, max })
    }
}

/// Aggregated batch results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub runs: Vec<RunSummary>,
    pub success: Option<Spread>,
    pub average_success: Option<Spread>,
    pub convergence: Option<Spread>,
}

/// Run every seed of the batch to completion.
///
/// `on_run` is called after each run, e.g. to drive a progress bar.
pub fn run_batch<F>(batch: &BatchConfig, mut on_run: F) -> Result<BatchReport>
where
    F: FnMut(&RunSummary),
{
    let mut runs = Vec::with_capacity(batch.seeds.len());
    for &seed in &batch.seeds {
        let config = SimulationConfig {
            seed,
            record_history: false,
            record_steps: false,
            ..batch.base.clone()
        };
        let mut sim = Simulation::new(config)?;
        for _ in 0..batch.ticks {
            sim.tick()?;
        }
        let stats = sim.stats();
        let summary = RunSummary {
            seed,
            ticks: stats.tick,
            success: stats.success,
            average_success: stats.average_success,
            convergence: sim.convergence().overall,
            distinct_words: stats.distinct_words,
            total_dialogs: stats.total_dialogs,
        };
        info!(seed, success = summary.success, convergence = summary.convergence, "batch run finished");
        on_run(&summary);
        runs.push(summary);
    }

    Ok(BatchReport {
        success: Spread::of(runs.iter().map(|r| r.success)),
        average_success: Spread::of(runs.iter().map(|r| r.average_success)),
        convergence: Spread::of(runs.iter().map(|r| r.convergence)),
        runs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_of_values() {
        let spread = Spread::of([0.2, 0.6, 0.4]).unwrap();
        assert_eq!(spread.min, 0.2);
        assert_eq!(spread.max, 0.6);
        assert!((spread.mean - 0.4).abs() < 1e-12);
        assert_eq!(Spread::of(Vec::new()), None);
    }

    #[test]
    fn batch_runs_each_seed() {
        let base = SimulationConfig {
            population_size: 3,
            width: 3,
            height: 3,
            seed: 10,
            ..Default::default()
        };
        let batch = BatchConfig::new(base, 3, 20);
        assert_eq!(batch.seeds, vec![10, 11, 12]);

        let mut seen = 0;
        let report = run_batch(&batch, |_| seen += 1).unwrap();
        assert_eq!(seen, 3);
        assert_eq!(report.runs.len(), 3);
        assert!(report.runs.iter().all(|r| r.ticks == 20));
        let success = report.success.unwrap();
        assert!(success.min <= success.mean && success.mean <= success.max);
    }

    #[test]
    fn empty_batch_has_no_spread() {
        let batch = BatchConfig::new(SimulationConfig::default(), 0, 10);
        let report = run_batch(&batch, |_| {}).unwrap();
        assert!(report.runs.is_empty());
        assert_eq!(report.convergence, None);
    }
}
