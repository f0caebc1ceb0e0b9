//! Parlance Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use parlance_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    AgentId, Meaning, Word,
    Cell, Heading,
    Conversation, ExchangeOutcome,
    SimulationState,
    Tick,
};

pub use crate::events::LexiconEvent;

pub use crate::config::SimulationConfig;

// Re-export the SpatialField trait
pub use crate::field::SpatialField;

pub use crate::registry::{VocabularyRegistry, WordUsers};

pub use crate::retention::{RetentionRule, Verdict};

// Re-export error types
pub use crate::error::{
    BoundaryError, ConfigError, InvariantViolation, ParlanceError, Result,
};
