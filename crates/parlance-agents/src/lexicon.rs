//! Lexicon: one agent's private vocabulary.
//!
//! Holds the meanings the agent is aware of, its word↔meaning couplings
//! in both directions, and the outcome history of each word in use.
//!
//! Couplings are only created or deleted through [`Lexicon::couple`] and
//! [`Lexicon::decouple`]. Both update the population registry in the same
//! call, so the private maps and the registry cannot drift apart.

use parlance_core::error::InvariantViolation;
use parlance_core::registry::VocabularyRegistry;
use parlance_core::types::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// An agent's private word↔meaning couplings.
#[derive(Debug, Clone, Serialize)]
pub struct Lexicon {
    owner: AgentId,
    meanings: BTreeSet<Meaning>,
    meaning2word: BTreeMap<Meaning, Word>,
    word2meaning: BTreeMap<Word, Meaning>,
    /// Outcomes since the word was created or last kept.
    word_success: BTreeMap<Word, Vec<f64>>,
}

impl Lexicon {
    pub fn new(owner: AgentId) -> Self {
        Self {
            owner,
            meanings: BTreeSet::new(),
            meaning2word: BTreeMap::new(),
            word2meaning: BTreeMap::new(),
            word_success: BTreeMap::new(),
        }
    }

    // --- Meanings ---

    pub fn knows_meaning(&self, meaning: Meaning) -> bool {
        self.meanings.contains(&meaning)
    }

    /// Become aware of a meaning. Returns false if it was already known.
    pub fn learn_meaning(&mut self, meaning: Meaning) -> bool {
        self.meanings.insert(meaning)
    }

    pub fn meanings(&self) -> &BTreeSet<Meaning> {
        &self.meanings
    }

    // --- Couplings ---

    pub fn word_for(&self, meaning: Meaning) -> Option<&Word> {
        self.meaning2word.get(&meaning)
    }

    pub fn meaning_of(&self, word: &Word) -> Option<Meaning> {
        self.word2meaning.get(word).copied()
    }

    pub fn has_word(&self, word: &Word) -> bool {
        self.word2meaning.contains_key(word)
    }

    /// Couplings ordered by meaning.
    pub fn couplings(&self) -> impl Iterator<Item = (Meaning, &Word)> {
        self.meaning2word.iter().map(|(m, w)| (*m, w))
    }

    /// Number of couplings held.
    pub fn len(&self) -> usize {
        self.word2meaning.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word2meaning.is_empty()
    }

    /// Create `word ↔ meaning` and register it.
    ///
    /// The word starts with an empty outcome history. Coupling a meaning
    /// also makes the agent aware of it.
    pub fn couple(
        &mut self,
        word: Word,
        meaning: Meaning,
        registry: &mut VocabularyRegistry,
    ) -> Result<(), InvariantViolation> {
        if self.word2meaning.contains_key(&word) {
            return Err(InvariantViolation::WordInUse {
                agent: self.owner,
                word,
            });
        }
        if self.meaning2word.contains_key(&meaning) {
            return Err(InvariantViolation::MeaningNamed {
                agent: self.owner,
                meaning,
            });
        }
        registry.register(meaning, word.clone(), self.owner)?;
        self.meanings.insert(meaning);
        self.meaning2word.insert(meaning, word.clone());
        self.word2meaning.insert(word.clone(), meaning);
        self.word_success.insert(word, Vec::new());
        Ok(())
    }

    /// Delete the coupling for `word` and unregister it.
    ///
    /// Returns the meaning the word stood for. The meaning itself stays known.
    pub fn decouple(
        &mut self,
        word: &Word,
        registry: &mut VocabularyRegistry,
    ) -> Result<Meaning, InvariantViolation> {
        let meaning = self
            .word2meaning
            .get(word)
            .copied()
            .ok_or_else(|| InvariantViolation::MissingCoupling {
                agent: self.owner,
                word: word.clone(),
            })?;
        if self.meaning2word.get(&meaning) != Some(word) {
            return Err(InvariantViolation::InverseMismatch {
                agent: self.owner,
                word: word.clone(),
                meaning,
            });
        }
        registry.unregister(meaning, word, self.owner)?;
        self.word2meaning.remove(word);
        self.meaning2word.remove(&meaning);
        self.word_success.remove(word);
        Ok(meaning)
    }

    // --- Outcome history ---

    /// Outcomes recorded for `word` since it was created or last kept.
    pub fn history(&self, word: &Word) -> Option<&[f64]> {
        self.word_success.get(word).map(Vec::as_slice)
    }

    /// Append an outcome to `word`'s history, returning the new length.
    pub fn record_outcome(&mut self, word: &Word, success: f64) -> Result<usize, InvariantViolation> {
        let history = self
            .word_success
            .get_mut(word)
            .ok_or_else(|| InvariantViolation::MissingCoupling {
                agent: self.owner,
                word: word.clone(),
            })?;
        history.push(success);
        Ok(history.len())
    }

    /// Restart `word`'s history after it was kept.
    pub fn reset_history(&mut self, word: &Word) {
        if let Some(history) = self.word_success.get_mut(word) {
            history.clear();
        }
    }

    // --- Invariants ---

    /// Check that both maps are exact inverses and that the registry
    /// lists this agent under every coupling it holds.
    pub fn verify(&self, registry: &VocabularyRegistry) -> Result<(), InvariantViolation> {
        if self.meaning2word.len() != self.word2meaning.len() {
            if let Some((meaning, word)) = self
                .meaning2word
                .iter()
                .find(|(m, w)| self.word2meaning.get(*w) != Some(*m))
            {
                return Err(InvariantViolation::InverseMismatch {
                    agent: self.owner,
                    word: word.clone(),
                    meaning: *meaning,
                });
            }
            if let Some((word, meaning)) = self
                .word2meaning
                .iter()
                .find(|(w, m)| self.meaning2word.get(*m) != Some(*w))
            {
                return Err(InvariantViolation::InverseMismatch {
                    agent: self.owner,
                    word: word.clone(),
                    meaning: *meaning,
                });
            }
        }
        for (meaning, word) in &self.meaning2word {
            if self.word2meaning.get(word) != Some(meaning) || !self.word_success.contains_key(word) {
                return Err(InvariantViolation::InverseMismatch {
                    agent: self.owner,
                    word: word.clone(),
                    meaning: *meaning,
                });
            }
            if !registry.contains(*meaning, word, self.owner) {
                return Err(InvariantViolation::RegistryMissing {
                    agent: self.owner,
                    word: word.clone(),
                    meaning: *meaning,
                });
            }
        }
        Ok(())
    }
}
