//! Parlance Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use parlance_runtime::prelude::*;
//! ```

// Re-export simulation
pub use crate::simulation::{
    AgentSnapshot, Simulation, SimulationEvent, SimulationSnapshot, SimulationStats,
};

// Re-export simulation builder
pub use crate::simulation_builder::SimulationBuilder;

// Re-export world components
pub use crate::grid_impl::GridField;
pub use crate::tracker::SuccessTracker;
pub use crate::rng::{create_rng, SimRng};

// Re-export metrics
pub use crate::metrics::{ConvergenceMetrics, MeaningConvergence, StepRecord};

// Re-export batch runs
pub use crate::batch::{run_batch, BatchConfig, BatchReport, RunSummary, Spread};

// Re-export from agents
pub use parlance_agents::prelude::*;
