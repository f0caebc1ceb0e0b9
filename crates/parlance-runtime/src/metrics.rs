//! Population metrics for tracking vocabulary emergence.
//!
//! Computes three families of measurements from simulation state:
//! - Communicative success: windowed population metric and mean agent success
//! - Convergence: how strongly each meaning is dominated by a single word
//! - Step records: the per-tick data series kept by the simulation

use parlance_agents::language_agent::LanguageAgent;
use parlance_core::registry::VocabularyRegistry;
use parlance_core::types::*;
use serde::Serialize;

/// Convergence for one meaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeaningConvergence {
    pub meaning: Meaning,
    /// Distinct words currently used for this meaning.
    pub competing_words: usize,
    /// The word with the most users (lowest word wins ties).
    pub dominant_word: Option<Word>,
    /// Users of the dominant word / all users of the meaning.
    pub dominant_share: f64,
    /// Agents naming this meaning with any word.
    pub users: usize,
}

/// Vocabulary convergence across the population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceMetrics {
    pub per_meaning: Vec<MeaningConvergence>,
    /// Mean dominant share over meanings with at least one word; 0.0 if none.
    pub overall: f64,
    /// Meanings nobody has a word for.
    pub unnamed_meanings: usize,
}

/// One row of the per-tick data series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub tick: Tick,
    /// Windowed population success.
    pub success: f64,
    /// Mean of every agent's running success.
    pub average_success: f64,
    pub total_dialogs: u64,
    /// Distinct (meaning, word) pairs in use.
    pub distinct_words: usize,
    pub convergence: f64,
    /// Number of meanings each agent knows, by agent index.
    pub known_meanings: Vec<usize>,
}

/// Mean of the agents' `comm_success`, 0.0 for an empty population.
pub fn average_success(agents: &[LanguageAgent]) -> f64 {
    if agents.is_empty() {
        return 0.0;
    }
    agents.iter().map(LanguageAgent::comm_success).sum::<f64>() / agents.len() as f64
}

/// Total scored dialogs across the population.
pub fn total_dialogs(agents: &[LanguageAgent]) -> u64 {
    agents.iter().map(LanguageAgent::number_of_dialogs).sum()
}

/// Per-meaning and overall convergence of a registry.
pub fn convergence(registry: &VocabularyRegistry) -> ConvergenceMetrics {
    let mut per_meaning = Vec::with_capacity(registry.meaning_count());
    for (meaning, words) in registry.iter() {
        let users: usize = words.values().map(|agents| agents.len()).sum();
        let mut dominant: Option<(&Word, usize)> = None;
        for (word, agents) in words {
            if dominant.map_or(true, |(_, best)| agents.len() > best) {
                dominant = Some((word, agents.len()));
            }
        }
        let dominant_share = match dominant {
            Some((_, count)) if users > 0 => count as f64 / users as f64,
            _ => 0.0,
        };
        per_meaning.push(MeaningConvergence {
            meaning: *meaning,
            competing_words: words.len(),
            dominant_word: dominant.map(|(word, _)| word.clone()),
            dominant_share,
            users,
        });
    }

    let named: Vec<f64> = per_meaning
        .iter()
        .filter(|m| m.competing_words > 0)
        .map(|m| m.dominant_share)
        .collect();
    let overall = if named.is_empty() {
        0.0
    } else {
        named.iter().sum::<f64>() / named.len() as f64
    };
    ConvergenceMetrics {
        unnamed_meanings: per_meaning.len() - named.len(),
        per_meaning,
        overall,
    }
}

/// Print a convergence table to stdout.
pub fn print_convergence(metrics: &ConvergenceMetrics) {
    println!("── Vocabulary Convergence ──");
    println!("  {:<8} {:>8} {:>8} {:>10}", "meaning", "words", "users", "dominant");
    for m in &metrics.per_meaning {
        let word = m.dominant_word.as_ref().map_or("-", Word::as_str);
        println!(
            "  {:<8} {:>8} {:>8} {:>6} {:.0}%",
            m.meaning.to_string(),
            m.competing_words,
            m.users,
            word,
            m.dominant_share * 100.0
        );
    }
    println!("  overall convergence: {:.3}", metrics.overall);
    println!("  unnamed meanings:    {}", metrics.unnamed_meanings);
}
