//! LanguageAgent: one member of the naming-game population.
//!
//! Each tick an agent wanders to a random orthogonal neighbour cell, tries
//! to talk to one agent sharing its new cell, and adapts its vocabulary
//! from the outcome. Speaking mutates the hearer's lexicon directly
//! (discovery, adoption, correction), so agents acting later in the same
//! tick see what earlier agents did.
//!
//! All randomness is drawn from the caller's generator, in a fixed order:
//! neighbour, hearer (redrawn while it equals the speaker), meaning,
//! pointing cue, then either the coinage draw or the retention draw.

use crate::lexicon::Lexicon;
use crate::words::{canonical_word, coin_word};
use parlance_core::config::SimulationConfig;
use parlance_core::error::{ConfigError, InvariantViolation, Result};
use parlance_core::events::LexiconEvent;
use parlance_core::field::SpatialField;
use parlance_core::registry::VocabularyRegistry;
use parlance_core::retention::Verdict;
use parlance_core::types::*;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

/// What the adaptation rule did with a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AdaptationOutcome {
    /// Nothing changed (no coinage draw fired).
    Unchanged,
    /// The outcome was appended; the word is not yet due for judgement.
    Observed,
    /// A new word was coined for the meaning.
    Coined(Word),
    /// The word survived judgement and its history restarted.
    Kept,
    /// The word failed judgement and its coupling was deleted.
    Dropped,
    /// Coinage fired but every one-syllable word is already in use.
    CoinageExhausted,
}

/// A mobile agent with a private lexicon.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageAgent {
    id: AgentId,
    position: Cell,
    heading: Heading,
    lexicon: Lexicon,
    /// Running mean of scored dialog outcomes.
    comm_success: f64,
    number_of_dialogs: u64,
    literate: bool,
}

impl LanguageAgent {
    pub fn new(id: AgentId, position: Cell, heading: Heading) -> Self {
        Self {
            id,
            position,
            heading,
            lexicon: Lexicon::new(id),
            comm_success: 0.0,
            number_of_dialogs: 0,
            literate: false,
        }
    }

    /// Pre-seed the canonical table: every meaning, each with its canonical word.
    pub fn seed_canonical(
        &mut self,
        meaning_count: usize,
        registry: &mut VocabularyRegistry,
    ) -> std::result::Result<(), InvariantViolation> {
        for index in 0..meaning_count {
            let meaning = Meaning::new(index as u32);
            self.lexicon.couple(canonical_word(meaning), meaning, registry)?;
        }
        self.literate = true;
        Ok(())
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Mutable lexicon access. Couplings still go through the
    /// registry-aware `couple`/`decouple`.
    pub fn lexicon_mut(&mut self) -> &mut Lexicon {
        &mut self.lexicon
    }

    pub fn comm_success(&self) -> f64 {
        self.comm_success
    }

    pub fn number_of_dialogs(&self) -> u64 {
        self.number_of_dialogs
    }

    pub fn is_literate(&self) -> bool {
        self.literate
    }

    pub fn knows_meaning(&self, meaning: Meaning) -> bool {
        self.lexicon.knows_meaning(meaning)
    }

    // --- Movement ---

    /// Step to a uniformly chosen orthogonal neighbour.
    ///
    /// Returns the cell the agent left.
    pub fn wander<F, R>(&mut self, field: &mut F, rng: &mut R) -> Result<Cell>
    where
        F: SpatialField + ?Sized,
        R: Rng + ?Sized,
    {
        let neighbors = field.neighbors(&self.position)?;
        if neighbors.is_empty() {
            return Err(ConfigError::DegenerateGrid {
                width: field.width(),
                height: field.height(),
            }
            .into());
        }
        let target = neighbors[rng.random_range(0..neighbors.len())];
        let from = self.position;
        field.move_agent(self.id, target)?;
        self.heading = from.delta_to(&target);
        self.position = target;
        Ok(from)
    }

    // --- Communication ---

    /// Pick a hearer among the occupants of this agent's cell.
    ///
    /// Draws uniformly over all occupants and redraws while the draw is the
    /// speaker itself. `None` when nobody else is there.
    pub fn choose_hearer<R: Rng + ?Sized>(&self, occupants: &[AgentId], rng: &mut R) -> Option<AgentId> {
        if !occupants.iter().any(|other| *other != self.id) {
            return None;
        }
        loop {
            let candidate = occupants[rng.random_range(0..occupants.len())];
            if candidate != self.id {
                return Some(candidate);
            }
        }
    }

    /// A meaning drawn uniformly from the whole meaning space. Never redrawn.
    pub fn choose_meaning<R: Rng + ?Sized>(rng: &mut R, meaning_count: usize) -> Meaning {
        Meaning::new(rng.random_range(0..meaning_count as u32))
    }

    /// Attempt one exchange about `meaning` with `hearer`.
    ///
    /// Discoveries and corrections are returned unscored. Every other path
    /// yields a scored [`Conversation`], including the one where the speaker
    /// has no word for the meaning.
    pub fn speak<R: Rng + ?Sized>(
        &mut self,
        hearer: &mut LanguageAgent,
        meaning: Meaning,
        config: &SimulationConfig,
        rng: &mut R,
        registry: &mut VocabularyRegistry,
        events: &mut Vec<LexiconEvent>,
    ) -> std::result::Result<ExchangeOutcome, InvariantViolation> {
        debug_assert_ne!(self.id, hearer.id, "an agent never talks to itself");

        if self.lexicon.learn_meaning(meaning) {
            debug!(agent = %self.id, %meaning, "speaker discovered meaning");
            events.push(LexiconEvent::Discovered { agent: self.id, meaning });
            return Ok(ExchangeOutcome::Discovery {
                hearer: hearer.id,
                learner: self.id,
                meaning,
            });
        }
        if hearer.lexicon.learn_meaning(meaning) {
            debug!(agent = %hearer.id, %meaning, "hearer discovered meaning");
            events.push(LexiconEvent::Discovered { agent: hearer.id, meaning });
            return Ok(ExchangeOutcome::Discovery {
                hearer: hearer.id,
                learner: hearer.id,
                meaning,
            });
        }

        let anticipated = rng.random_bool(config.anticipated_prob).then_some(meaning);

        let Some(word) = self.lexicon.word_for(meaning).cloned() else {
            return Ok(self.scored(hearer, None, meaning, 0.0));
        };

        match (hearer.lexicon.meaning_of(&word), anticipated) {
            (Some(_), None) => Ok(self.scored(hearer, Some(word), meaning, 1.0)),
            (Some(hearer_meaning), Some(pointed)) if hearer_meaning == pointed => {
                Ok(self.scored(hearer, Some(word), meaning, 1.0))
            }
            (Some(hearer_meaning), Some(pointed)) => {
                hearer.correct(&word, hearer_meaning, pointed, self.id, registry, events)?;
                Ok(ExchangeOutcome::Correction {
                    hearer: hearer.id,
                    word,
                    from: hearer_meaning,
                    to: pointed,
                })
            }
            (None, pointed) => {
                if let Some(pointed) = pointed {
                    if hearer.lexicon.word_for(pointed).is_none() {
                        hearer.lexicon.couple(word.clone(), pointed, registry)?;
                        debug!(agent = %hearer.id, %word, meaning = %pointed, from = %self.id, "learned word");
                        events.push(LexiconEvent::Learned {
                            agent: hearer.id,
                            word: word.clone(),
                            meaning: pointed,
                            from: self.id,
                        });
                    }
                }
                Ok(self.scored(hearer, Some(word), meaning, 0.0))
            }
        }
    }

    fn scored(&self, hearer: &LanguageAgent, word: Option<Word>, meaning: Meaning, success: f64) -> ExchangeOutcome {
        debug!(
            speaker = %self.id,
            hearer = %hearer.id,
            word = word.as_ref().map_or("-", Word::as_str),
            %meaning,
            success,
            "exchange"
        );
        ExchangeOutcome::Scored {
            hearer: hearer.id,
            conversation: Conversation::new(word, meaning, success),
        }
    }

    /// Remap `word` from `from` to `to` on the speaker's say-so.
    ///
    /// If this agent already names `to` with another word, that coupling
    /// is forgotten first so the lexicon stays injective.
    fn correct(
        &mut self,
        word: &Word,
        from: Meaning,
        to: Meaning,
        by: AgentId,
        registry: &mut VocabularyRegistry,
        events: &mut Vec<LexiconEvent>,
    ) -> std::result::Result<(), InvariantViolation> {
        if let Some(displaced) = self.lexicon.word_for(to).cloned() {
            self.lexicon.decouple(&displaced, registry)?;
            debug!(agent = %self.id, word = %displaced, meaning = %to, "forgot displaced word");
            events.push(LexiconEvent::Forgot {
                agent: self.id,
                word: displaced,
                meaning: to,
            });
        }
        self.lexicon.decouple(word, registry)?;
        self.lexicon.couple(word.clone(), to, registry)?;
        debug!(agent = %self.id, %word, %from, %to, %by, "corrected");
        events.push(LexiconEvent::Corrected {
            agent: self.id,
            word: word.clone(),
            from,
            to,
            by,
        });
        Ok(())
    }

    /// Fold a scored outcome into the running success average.
    pub fn record_dialog(&mut self, success: f64) {
        self.number_of_dialogs += 1;
        self.comm_success += (success - self.comm_success) / self.number_of_dialogs as f64;
    }

    // --- Adaptation ---

    /// Update the vocabulary after a scored conversation this agent spoke in.
    pub fn adapt<R: Rng + ?Sized>(
        &mut self,
        conversation: &Conversation,
        config: &SimulationConfig,
        rng: &mut R,
        registry: &mut VocabularyRegistry,
        events: &mut Vec<LexiconEvent>,
    ) -> std::result::Result<AdaptationOutcome, InvariantViolation> {
        match &conversation.word {
            None => self.maybe_coin(conversation.meaning, config, rng, registry, events),
            Some(word) => self.judge_word(word, conversation.success, config, rng, registry, events),
        }
    }

    fn maybe_coin<R: Rng + ?Sized>(
        &mut self,
        meaning: Meaning,
        config: &SimulationConfig,
        rng: &mut R,
        registry: &mut VocabularyRegistry,
        events: &mut Vec<LexiconEvent>,
    ) -> std::result::Result<AdaptationOutcome, InvariantViolation> {
        if !self.lexicon.knows_meaning(meaning) || self.lexicon.word_for(meaning).is_some() {
            return Ok(AdaptationOutcome::Unchanged);
        }
        if !rng.random_bool(config.new_word_rate) {
            return Ok(AdaptationOutcome::Unchanged);
        }
        let lexicon = &self.lexicon;
        let Some(word) = coin_word(rng, |w| lexicon.has_word(w)) else {
            warn!(agent = %self.id, %meaning, "no free syllable left to coin");
            return Ok(AdaptationOutcome::CoinageExhausted);
        };
        self.lexicon.couple(word.clone(), meaning, registry)?;
        debug!(agent = %self.id, %word, %meaning, "coined word");
        events.push(LexiconEvent::Coined {
            agent: self.id,
            word: word.clone(),
            meaning,
        });
        Ok(AdaptationOutcome::Coined(word))
    }

    fn judge_word<R: Rng + ?Sized>(
        &mut self,
        word: &Word,
        success: f64,
        config: &SimulationConfig,
        rng: &mut R,
        registry: &mut VocabularyRegistry,
        events: &mut Vec<LexiconEvent>,
    ) -> std::result::Result<AdaptationOutcome, InvariantViolation> {
        self.lexicon.record_outcome(word, success)?;
        let history = self.lexicon.history(word).unwrap_or_default();
        match config.retention().judge(history, || rng.random::<f64>()) {
            Verdict::Pending => Ok(AdaptationOutcome::Observed),
            Verdict::Keep => {
                self.lexicon.reset_history(word);
                Ok(AdaptationOutcome::Kept)
            }
            Verdict::Drop => {
                let meaning = self.lexicon.decouple(word, registry)?;
                debug!(agent = %self.id, %word, %meaning, "forgot word");
                events.push(LexiconEvent::Forgot {
                    agent: self.id,
                    word: word.clone(),
                    meaning,
                });
                Ok(AdaptationOutcome::Dropped)
            }
        }
    }

    /// Check this agent's lexicon against the registry.
    pub fn verify(&self, registry: &VocabularyRegistry) -> std::result::Result<(), InvariantViolation> {
        self.lexicon.verify(registry)
    }
}
