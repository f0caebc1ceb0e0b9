//! Fluent construction of simulations.
//!
//! # Example
//!
//! ```rust
//! use parlance_runtime::simulation_builder::SimulationBuilder;
//!
//! let mut sim = SimulationBuilder::new()
//!     .population_size(8)
//!     .grid(6, 6)
//!     .wrap(true)
//!     .seed(42)
//!     .build()
//!     .expect("valid configuration");
//!
//! sim.run(10).expect("no invariant violations");
//! assert_eq!(sim.current_tick(), 10);
//! ```

use crate::simulation::Simulation;
use parlance_core::config::SimulationConfig;
use parlance_core::error::Result;

/// Builder for [`Simulation`]. Validation happens in [`SimulationBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    config: SimulationConfig,
}

impl SimulationBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn population_size(mut self, n: usize) -> Self {
        self.config.population_size = n;
        self
    }

    pub fn literate_count(mut self, n: usize) -> Self {
        self.config.literate_count = n;
        self
    }

    /// Observations before a word is judged.
    pub fn change_rate(mut self, r: usize) -> Self {
        self.config.change_rate = r;
        self
    }

    /// Shape of the retention sigmoid.
    pub fn retention(mut self, alpha: f64, beta: f64) -> Self {
        self.config.alpha = alpha;
        self.config.beta = beta;
        self
    }

    pub fn new_word_rate(mut self, p: f64) -> Self {
        self.config.new_word_rate = p;
        self
    }

    pub fn anticipated_prob(mut self, p: f64) -> Self {
        self.config.anticipated_prob = p;
        self
    }

    pub fn success_window(mut self, capacity: usize) -> Self {
        self.config.success_window = capacity;
        self
    }

    pub fn grid(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn wrap(mut self, wrap: bool) -> Self {
        self.config.wrap = wrap;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn record_history(mut self, enabled: bool) -> Self {
        self.config.record_history = enabled;
        self
    }

    pub fn record_steps(mut self, enabled: bool) -> Self {
        self.config.record_steps = enabled;
        self
    }

    pub fn check_invariants(mut self, enabled: bool) -> Self {
        self.config.check_invariants = enabled;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Validate and construct.
    pub fn build(self) -> Result<Simulation> {
        Simulation::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlance_core::error::{ConfigError, ParlanceError};

    #[test]
    fn setters_reach_the_config() {
        let builder = SimulationBuilder::new()
            .population_size(12)
            .literate_count(3)
            .change_rate(7)
            .retention(0.3, 45.0)
            .grid(10, 4)
            .wrap(true)
            .seed(5);
        let config = builder.config();
        assert_eq!(config.population_size, 12);
        assert_eq!(config.literate_count, 3);
        assert_eq!(config.change_rate, 7);
        assert_eq!((config.alpha, config.beta), (0.3, 45.0));
        assert_eq!((config.width, config.height, config.wrap), (10, 4, true));

        let sim = builder.build().unwrap();
        assert_eq!(sim.agents().len(), 12);
    }

    #[test]
    fn build_validates() {
        let result = SimulationBuilder::new().grid(1, 1).build();
        assert!(matches!(
            result,
            Err(ParlanceError::Config(ConfigError::DegenerateGrid { .. }))
        ));
    }
}
