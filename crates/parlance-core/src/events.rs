//! Lexicon events: the typed trace of vocabulary evolution.
//!
//! Every coupling an agent creates or destroys produces exactly one event.
//! Events are pushed into a caller-supplied buffer; the runtime decides
//! whether to keep them as history or hand them to an observer.

use crate::types::*;
use serde::{Deserialize, Serialize};

/// A change to one agent's private vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LexiconEvent {
    /// The agent became aware of a meaning.
    Discovered { agent: AgentId, meaning: Meaning },
    /// The agent adopted a word it heard, disambiguated by pointing.
    Learned {
        agent: AgentId,
        word: Word,
        meaning: Meaning,
        from: AgentId,
    },
    /// The agent invented a new word for a meaning it could not name.
    Coined {
        agent: AgentId,
        word: Word,
        meaning: Meaning,
    },
    /// The agent dropped a coupling after the retention rule fired.
    Forgot {
        agent: AgentId,
        word: Word,
        meaning: Meaning,
    },
    /// A speaker's pointing remapped the agent's coupling for `word`.
    Corrected {
        agent: AgentId,
        word: Word,
        from: Meaning,
        to: Meaning,
        by: AgentId,
    },
}

impl LexiconEvent {
    /// The agent whose vocabulary changed.
    pub fn agent(&self) -> AgentId {
        match self {
            LexiconEvent::Discovered { agent, .. }
            | LexiconEvent::Learned { agent, .. }
            | LexiconEvent::Coined { agent, .. }
            | LexiconEvent::Forgot { agent, .. }
            | LexiconEvent::Corrected { agent, .. } => *agent,
        }
    }

    /// Short tag for logging and counting.
    pub fn kind(&self) -> &'static str {
        match self {
            LexiconEvent::Discovered { .. } => "discovered",
            LexiconEvent::Learned { .. } => "learned",
            LexiconEvent::Coined { .. } => "coined",
            LexiconEvent::Forgot { .. } => "forgot",
            LexiconEvent::Corrected { .. } => "corrected",
        }
    }
}
