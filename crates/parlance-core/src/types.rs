//! Shared types used across all Parlance crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an agent in the population.
///
/// Ids are dense indices `0..population_size` and stay stable for the
/// whole run; agents are never destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl AgentId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of this agent in the population vector.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent-{}", self.0)
    }
}

/// An opaque referent an agent can become aware of and name.
///
/// Meanings share the agents' index space: a population of N agents talks
/// about exactly the meanings `0..N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Meaning(pub u32);

impl Meaning {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<AgentId> for Meaning {
    fn from(id: AgentId) -> Self {
        Self(id.0)
    }
}

impl fmt::Display for Meaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// A short symbolic label built from consonant+vowel syllables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Word {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cell coordinate on the spatial field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Raw coordinate delta from `self` to `other`.
    pub fn delta_to(&self, other: &Cell) -> Heading {
        Heading::new(other.x - self.x, other.y - self.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The last movement delta of an agent.
///
/// On a toroidal field a wrapped step reports the raw coordinate delta,
/// e.g. `(-(width - 1), 0)` when stepping right off the last column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    pub dx: i64,
    pub dy: i64,
}

impl Heading {
    pub fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    /// The four unit headings of a Von Neumann neighbourhood.
    pub const CARDINALS: [Heading; 4] = [
        Heading { dx: -1, dy: 0 },
        Heading { dx: 1, dy: 0 },
        Heading { dx: 0, dy: -1 },
        Heading { dx: 0, dy: 1 },
    ];
}

impl Default for Heading {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// The current tick of the simulation.
pub type Tick = u64;

/// A scored conversation, as seen by the speaker.
///
/// `word` is `None` when the speaker had no word for the meaning, which
/// is the signal for a coinage opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub word: Option<Word>,
    pub meaning: Meaning,
    /// 1.0 on success, 0.0 on failure.
    pub success: f64,
}

impl Conversation {
    pub fn new(word: Option<Word>, meaning: Meaning, success: f64) -> Self {
        Self { word, meaning, success }
    }

    pub fn succeeded(&self) -> bool {
        self.success >= 1.0
    }
}

/// What happened when an agent talked to a cellmate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExchangeOutcome {
    /// One side did not know the meaning yet and learned it.
    /// Unscored; adaptation does not run.
    Discovery {
        hearer: AgentId,
        learner: AgentId,
        meaning: Meaning,
    },
    /// The speaker's pointing overrode the hearer's coupling for `word`.
    /// Unscored; adaptation does not run.
    Correction {
        hearer: AgentId,
        word: Word,
        from: Meaning,
        to: Meaning,
    },
    /// A scored exchange that feeds the success statistics.
    Scored {
        hearer: AgentId,
        conversation: Conversation,
    },
}

impl ExchangeOutcome {
    /// The scored conversation, if this exchange was scored.
    pub fn conversation(&self) -> Option<&Conversation> {
        match self {
            ExchangeOutcome::Scored { conversation, .. } => Some(conversation),
            _ => None,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, ExchangeOutcome::Scored { .. })
    }

    /// The agent that was spoken to.
    pub fn hearer(&self) -> AgentId {
        match self {
            ExchangeOutcome::Discovery { hearer, .. }
            | ExchangeOutcome::Correction { hearer, .. }
            | ExchangeOutcome::Scored { hearer, .. } => *hearer,
        }
    }
}

/// Lifecycle of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationState {
    /// Agents placed, registry and tracker initialized; no tick run yet.
    Constructed,
    /// At least one tick has run.
    Running,
    /// Stopped externally or aborted by an invariant violation.
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meaning_shares_agent_index_space() {
        let id = AgentId::new(7);
        assert_eq!(Meaning::from(id), Meaning::new(7));
        assert_eq!(Meaning::from(id).index(), id.index());
    }

    #[test]
    fn heading_is_raw_delta() {
        let from = Cell::new(4, 2);
        let to = Cell::new(0, 2);
        assert_eq!(from.delta_to(&to), Heading::new(-4, 0));
    }

    #[test]
    fn only_scored_outcomes_carry_conversations() {
        let scored = ExchangeOutcome::Scored {
            hearer: AgentId::new(1),
            conversation: Conversation::new(Some(Word::from("BA")), Meaning::new(0), 1.0),
        };
        let discovery = ExchangeOutcome::Discovery {
            hearer: AgentId::new(1),
            learner: AgentId::new(0),
            meaning: Meaning::new(3),
        };
        assert!(scored.is_scored());
        assert!(scored.conversation().unwrap().succeeded());
        assert!(discovery.conversation().is_none());
        assert_eq!(discovery.hearer(), AgentId::new(1));
        assert_eq!(scored.hearer(), AgentId::new(1));
    }
}
