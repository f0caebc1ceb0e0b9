//! # Parlance
//!
//! Spatial naming-game simulation.
//!
//! A population of agents wanders a grid. Agents sharing a cell try to
//! exchange a word for a meaning, sometimes helped by pointing. Each agent
//! keeps private word↔meaning couplings, scores every word it uses, and
//! forgets words whose recent success falls on the wrong side of a steep
//! tangent sigmoid. Over time the population drifts towards a shared
//! vocabulary.
//!
//! ## Quick Start
//!
//! ```rust
//! use parlance::prelude::*;
//!
//! let mut sim = SimulationBuilder::new()
//!     .population_size(6)
//!     .grid(4, 4)
//!     .seed(7)
//!     .check_invariants(true)
//!     .build()
//!     .unwrap();
//!
//! sim.run(100).unwrap();
//!
//! let stats = sim.stats();
//! println!("tick {} success {:.2}", stats.tick, stats.success);
//! print!("{}", sim.registry().report());
//! ```
//!
//! ## Architecture
//!
//! - [`parlance_core`] - Shared types, configuration, the registry, the retention rule
//! - [`parlance_agents`] - Lexicons, word coinage, the exchange protocol
//! - [`parlance_runtime`] - Grid, tick loop, metrics, batch runs
//!
//! ## Key Concepts
//!
//! | Concept | What It Is |
//! |---------|------------|
//! | Meaning | An opaque referent; one per agent index |
//! | Word | A consonant+vowel label |
//! | Coupling | One agent's private meaning↔word association |
//! | Pointing | A cue that fixes which meaning a word refers to |
//! | Retention | Drop/keep decision after `change_rate` uses of a word |

// Re-export all subcrates
pub use parlance_core as core;
pub use parlance_runtime as runtime;
pub use parlance_agents as agents;

/// Prelude module for convenient imports.
///
/// ```rust
/// use parlance::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use parlance_core::types::{
        AgentId, Meaning, Word,
        Cell, Heading,
        Conversation, ExchangeOutcome,
        SimulationState,
        Tick,
    };
    pub use parlance_core::events::LexiconEvent;
    pub use parlance_core::config::SimulationConfig;
    pub use parlance_core::registry::VocabularyRegistry;
    pub use parlance_core::retention::{RetentionRule, Verdict};

    // Core traits
    pub use parlance_core::field::SpatialField;

    // Error types
    pub use parlance_core::error::{
        BoundaryError, ConfigError, InvariantViolation, ParlanceError, Result,
    };

    // Agents
    pub use parlance_agents::language_agent::{AdaptationOutcome, LanguageAgent};
    pub use parlance_agents::lexicon::Lexicon;

    // Runtime
    pub use parlance_runtime::simulation::{
        AgentSnapshot, Simulation, SimulationEvent, SimulationSnapshot, SimulationStats,
    };
    pub use parlance_runtime::simulation_builder::SimulationBuilder;
    pub use parlance_runtime::grid_impl::GridField;
    pub use parlance_runtime::tracker::SuccessTracker;
    pub use parlance_runtime::metrics::{ConvergenceMetrics, StepRecord};
    pub use parlance_runtime::batch::{run_batch, BatchConfig, BatchReport, RunSummary, Spread};
}
