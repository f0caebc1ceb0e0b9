//! Error types for Parlance operations.
//!
//! Three families, matching how they are handled:
//! - [`ConfigError`]: rejected at construction, never mid-run.
//! - [`BoundaryError`]: a cell outside a field or an agent the field does not track.
//! - [`InvariantViolation`]: lexicon and registry out of sync. A defect;
//!   the run aborts rather than continuing on corrupted state.
//!
//! Numeric saturation of the retention rule is not an error: it is
//! clamped where it happens (see [`crate::retention`]).

use crate::types::*;
use thiserror::Error;

/// Result type for Parlance operations.
pub type Result<T> = std::result::Result<T, ParlanceError>;

/// Errors that can occur during Parlance operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParlanceError {
    /// Configuration errors.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Spatial field errors.
    #[error("Boundary error: {0}")]
    Boundary(#[from] BoundaryError),
    /// Broken lexicon/registry invariants.
    #[error("Invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),
    /// The simulation was already stopped.
    #[error("Simulation stopped at tick {0}")]
    Stopped(Tick),
    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ParlanceError {
    fn from(e: serde_json::Error) -> Self {
        ParlanceError::Serialization(e.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A count or size that must be at least one.
    #[error("{field} must be positive")]
    NotPositive { field: String },
    /// A real parameter outside its allowed range.
    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
    /// A real parameter that is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: String, value: f64 },
    /// More literate agents requested than agents exist.
    #[error("literate_count {literate} exceeds population_size {population}")]
    LiterateExceedsPopulation { literate: usize, population: usize },
    /// A grid on which no cell has a neighbour.
    #[error("{width}x{height} grid has no neighbouring cells; agents cannot move")]
    DegenerateGrid { width: u32, height: u32 },
}

impl ConfigError {
    pub fn not_positive(field: impl Into<String>) -> Self {
        ConfigError::NotPositive { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        }
    }
}

/// Spatial field errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundaryError {
    /// The cell lies outside the field.
    #[error("cell {cell} outside {width}x{height} field")]
    OutOfBounds { cell: Cell, width: u32, height: u32 },
    /// The field has no record of this agent.
    #[error("{0} is not placed on the field")]
    UnknownAgent(AgentId),
    /// The agent was already placed.
    #[error("{0} is already placed on the field")]
    AlreadyPlaced(AgentId),
}

/// A broken lexicon or registry invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// `meaning2word` and `word2meaning` disagree.
    #[error("{agent}: {word} and {meaning} are not mutual inverses")]
    InverseMismatch {
        agent: AgentId,
        word: Word,
        meaning: Meaning,
    },
    /// The agent privately uses a word the registry does not list it under.
    #[error("{agent} uses {word} for {meaning} but the registry does not list it")]
    RegistryMissing {
        agent: AgentId,
        word: Word,
        meaning: Meaning,
    },
    /// The registry lists the agent under a coupling it does not hold.
    #[error("registry lists {agent} under {word} for {meaning} but the agent does not use it")]
    RegistryStale {
        agent: AgentId,
        word: Word,
        meaning: Meaning,
    },
    /// Deleting a coupling that does not exist.
    #[error("{agent} has no coupling for {word}")]
    MissingCoupling { agent: AgentId, word: Word },
    /// Creating a coupling for a word the agent already uses.
    #[error("{agent} already uses {word}")]
    WordInUse { agent: AgentId, word: Word },
    /// Creating a coupling for a meaning the agent already names.
    #[error("{agent} already has a word for {meaning}")]
    MeaningNamed { agent: AgentId, meaning: Meaning },
    /// A meaning outside the population's meaning space.
    #[error("{meaning} is outside the meaning space")]
    UnknownMeaning { meaning: Meaning },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_render_field_names() {
        let err = ParlanceError::from(ConfigError::out_of_range("alpha", 0.0, 1.0, 1.5));
        assert_eq!(
            err.to_string(),
            "Config error: alpha out of range: 1.5 (must be 0-1)"
        );
    }

    #[test]
    fn invariant_errors_convert_into_top_level() {
        let err: ParlanceError = InvariantViolation::MissingCoupling {
            agent: AgentId::new(2),
            word: Word::from("KO"),
        }
        .into();
        assert!(matches!(err, ParlanceError::Invariant(_)));
        assert!(err.to_string().contains("agent-2 has no coupling for KO"));
    }
}
