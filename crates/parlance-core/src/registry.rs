//! VocabularyRegistry: who calls what by which word.
//!
//! A population-wide index `meaning → word → {agents}` mirroring every
//! agent's private couplings. It is never consulted by the protocol; it
//! exists so observers can see the vocabulary as a whole.
//!
//! The registry is only changed through [`VocabularyRegistry::register`]
//! and [`VocabularyRegistry::unregister`], which agents call from their
//! own coupling operations. A word entry disappears with its last user;
//! a meaning's word map can become empty but stays present.

use crate::error::InvariantViolation;
use crate::types::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Word usage for a single meaning.
pub type WordUsers = BTreeMap<Word, BTreeSet<AgentId>>;

/// The population-wide vocabulary index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VocabularyRegistry {
    entries: BTreeMap<Meaning, WordUsers>,
}

impl VocabularyRegistry {
    /// A registry with an empty word map for each of `meaning_count` meanings.
    pub fn with_meaning_count(meaning_count: usize) -> Self {
        let entries = (0..meaning_count)
            .map(|i| (Meaning::new(i as u32), WordUsers::new()))
            .collect();
        Self { entries }
    }

    /// Record that `agent` now uses `word` for `meaning`.
    pub fn register(
        &mut self,
        meaning: Meaning,
        word: Word,
        agent: AgentId,
    ) -> Result<(), InvariantViolation> {
        let words = self
            .entries
            .get_mut(&meaning)
            .ok_or(InvariantViolation::UnknownMeaning { meaning })?;
        words.entry(word).or_default().insert(agent);
        Ok(())
    }

    /// Record that `agent` no longer uses `word` for `meaning`.
    ///
    /// Removes the word entry when `agent` was its last user.
    pub fn unregister(
        &mut self,
        meaning: Meaning,
        word: &Word,
        agent: AgentId,
    ) -> Result<(), InvariantViolation> {
        let missing = || InvariantViolation::RegistryMissing {
            agent,
            word: word.clone(),
            meaning,
        };
        let words = self.entries.get_mut(&meaning).ok_or_else(missing)?;
        let users = words.get_mut(word).ok_or_else(missing)?;
        if !users.remove(&agent) {
            return Err(missing());
        }
        if users.is_empty() {
            words.remove(word);
        }
        Ok(())
    }

    /// Agents using `word` for `meaning`.
    pub fn users(&self, meaning: Meaning, word: &Word) -> Option<&BTreeSet<AgentId>> {
        self.entries.get(&meaning)?.get(word)
    }

    /// Whether `agent` is listed under `word` for `meaning`.
    pub fn contains(&self, meaning: Meaning, word: &Word, agent: AgentId) -> bool {
        self.users(meaning, word)
            .map_or(false, |users| users.contains(&agent))
    }

    /// All words in use for a meaning.
    pub fn words_for(&self, meaning: Meaning) -> Option<&WordUsers> {
        self.entries.get(&meaning)
    }

    /// Iterate meanings in order with their word maps.
    pub fn iter(&self) -> impl Iterator<Item = (&Meaning, &WordUsers)> {
        self.entries.iter()
    }

    /// Number of meanings tracked (including those nobody names).
    pub fn meaning_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of distinct (meaning, word) pairs in use.
    pub fn coupling_count(&self) -> usize {
        self.entries.values().map(|words| words.len()).sum()
    }

    /// Total number of agent couplings across the population.
    pub fn usage_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(|words| words.values())
            .map(|users| users.len())
            .sum()
    }

    /// Every (meaning, word, agent) triple, in order.
    pub fn couplings(&self) -> impl Iterator<Item = (Meaning, &Word, AgentId)> + '_ {
        self.entries.iter().flat_map(|(meaning, words)| {
            words
                .iter()
                .flat_map(move |(word, users)| users.iter().map(move |agent| (*meaning, word, *agent)))
        })
    }

    /// Human-readable dump, one line per meaning:
    /// `m0: BA:[0, 3] KO:[1]`.
    pub fn report(&self) -> String {
        let mut out = String::new();
        for (meaning, words) in &self.entries {
            let _ = write!(out, "{}:", meaning);
            for (word, users) in words {
                let ids: Vec<String> = users.iter().map(|a| a.0.to_string()).collect();
                let _ = write!(out, " {}:[{}]", word, ids.join(", "));
            }
            out.push('\n');
        }
        out
    }
}
