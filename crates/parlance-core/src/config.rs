//! Simulation configuration.
//!
//! One structure carries every parameter of a run. It is validated once,
//! at construction, and is immutable afterwards.

use crate::error::ConfigError;
use crate::retention::RetentionRule;
use serde::{Deserialize, Serialize};

/// Configuration for a naming-game run.
///
/// Defaults reproduce the reference model: five illiterate agents on a
/// bounded 5×5 grid, words judged after five uses, a steep sigmoid
/// centred just below 50% success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of agents, and therefore of meanings (default: 5).
    pub population_size: usize,
    /// Agents pre-seeded with the canonical vocabulary (default: 0).
    pub literate_count: usize,
    /// Outcomes observed before a word is judged, R (default: 5).
    pub change_rate: usize,
    /// Success level at which the retention sigmoid is centred (default: 0.49).
    pub alpha: f64,
    /// Steepness of the retention sigmoid, in degrees per unit success (default: 80).
    pub beta: f64,
    /// Probability of coining a word for an unnamed meaning (default: 0.05).
    pub new_word_rate: f64,
    /// Probability that an exchange carries a pointing cue (default: 0.5).
    pub anticipated_prob: f64,
    /// Capacity of the population success window (default: 100).
    pub success_window: usize,
    /// Grid width in cells (default: 5).
    pub width: u32,
    /// Grid height in cells (default: 5).
    pub height: u32,
    /// Whether the grid is toroidal (default: false).
    pub wrap: bool,
    /// Seed for the run's single random source (default: 0).
    pub seed: u64,
    /// Keep every event in the simulation's history (default: false).
    pub record_history: bool,
    /// Keep a per-tick step record series (default: false).
    pub record_steps: bool,
    /// Verify lexicon/registry invariants after every tick (default: false).
    pub check_invariants: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: 5,
            literate_count: 0,
            change_rate: 5,
            alpha: 0.49,
            beta: 80.0,
            new_word_rate: 0.05,
            anticipated_prob: 0.5,
            success_window: 100,
            width: 5,
            height: 5,
            wrap: false,
            seed: 0,
            record_history: false,
            record_steps: false,
            check_invariants: false,
        }
    }
}

impl SimulationConfig {
    /// Check every parameter range. Called by the runtime before anything is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::not_positive("population_size"));
        }
        if self.literate_count > self.population_size {
            return Err(ConfigError::LiterateExceedsPopulation {
                literate: self.literate_count,
                population: self.population_size,
            });
        }
        if self.population_size > u32::MAX as usize {
            return Err(ConfigError::out_of_range(
                "population_size",
                1.0,
                u32::MAX as f64,
                self.population_size as f64,
            ));
        }
        if self.change_rate == 0 {
            return Err(ConfigError::not_positive("change_rate"));
        }
        if self.success_window == 0 {
            return Err(ConfigError::not_positive("success_window"));
        }
        check_unit("alpha", self.alpha)?;
        if !self.beta.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "beta".to_string(),
                value: self.beta,
            });
        }
        check_unit("new_word_rate", self.new_word_rate)?;
        check_unit("anticipated_prob", self.anticipated_prob)?;
        if self.width == 0 {
            return Err(ConfigError::not_positive("width"));
        }
        if self.height == 0 {
            return Err(ConfigError::not_positive("height"));
        }
        // A 1x1 grid has no neighbour for anyone, wrapped or not.
        if self.width == 1 && self.height == 1 {
            return Err(ConfigError::DegenerateGrid {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// The retention rule parameterised by this configuration.
    pub fn retention(&self) -> RetentionRule {
        RetentionRule::new(self.change_rate, self.alpha, self.beta)
    }

    /// Number of distinct meanings in the population's meaning space.
    pub fn meaning_count(&self) -> usize {
        self.population_size
    }
}

fn check_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite {
            field: field.to_string(),
            value,
        });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::out_of_range(field, 0.0, 1.0, value));
    }
    Ok(())
}
