//! Naming-game protocol scenarios: coinage, retention, correction.

use parlance_agents::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

fn agents_on_one_cell() -> (LanguageAgent, LanguageAgent, VocabularyRegistry) {
    let a = LanguageAgent::new(AgentId::new(0), Cell::new(2, 2), Heading::default());
    let b = LanguageAgent::new(AgentId::new(1), Cell::new(2, 2), Heading::default());
    (a, b, VocabularyRegistry::with_meaning_count(2))
}

fn scenario_config(change_rate: usize) -> SimulationConfig {
    SimulationConfig {
        population_size: 2,
        change_rate,
        alpha: 0.49,
        beta: 80.0,
        ..Default::default()
    }
}

#[test]
fn forced_coinage_creates_exactly_one_word() {
    let (mut a, mut b, mut registry) = agents_on_one_cell();
    let config = SimulationConfig {
        new_word_rate: 1.0,
        ..scenario_config(1)
    };
    let mut rng = ChaCha12Rng::seed_from_u64(42);
    let mut events = Vec::new();
    let meaning = Meaning::new(0);

    // Unknown to both, then known: two unscored discoveries.
    for _ in 0..2 {
        let outcome = a
            .speak(&mut b, meaning, &config, &mut rng, &mut registry, &mut events)
            .unwrap();
        assert!(!outcome.is_scored(), "discoveries are not scored");
    }

    let outcome = a
        .speak(&mut b, meaning, &config, &mut rng, &mut registry, &mut events)
        .unwrap();
    let conversation = outcome.conversation().expect("speaker without a word is scored").clone();
    assert_eq!(conversation.word, None);

    let adapted = a
        .adapt(&conversation, &config, &mut rng, &mut registry, &mut events)
        .unwrap();
    let AdaptationOutcome::Coined(word) = adapted else {
        panic!("expected a coined word, got {:?}", adapted);
    };

    assert_eq!(a.lexicon().len(), 1, "exactly one coupling");
    assert_eq!(a.lexicon().word_for(meaning), Some(&word));
    assert_eq!(registry.usage_count(), 1, "exactly one registry entry");
    assert!(registry.contains(meaning, &word, a.id()));
    assert!(matches!(events.last(), Some(LexiconEvent::Coined { .. })));
}

#[test]
fn coinage_respects_new_word_rate_zero() {
    let (mut a, _, mut registry) = agents_on_one_cell();
    let config = SimulationConfig {
        new_word_rate: 0.0,
        ..scenario_config(1)
    };
    let mut rng = ChaCha12Rng::seed_from_u64(3);
    let mut events = Vec::new();
    a.lexicon_mut().learn_meaning(Meaning::new(1));

    let conversation = Conversation::new(None, Meaning::new(1), 0.0);
    for _ in 0..50 {
        let adapted = a
            .adapt(&conversation, &config, &mut rng, &mut registry, &mut events)
            .unwrap();
        assert_eq!(adapted, AdaptationOutcome::Unchanged);
    }
    assert!(a.lexicon().is_empty());
}

#[test]
fn all_failures_drop_the_word() {
    let (mut a, _, mut registry) = agents_on_one_cell();
    let config = scenario_config(3);
    let mut rng = ChaCha12Rng::seed_from_u64(8);
    let mut events = Vec::new();
    let word = Word::from("KO");
    a.lexicon_mut().couple(word.clone(), Meaning::new(0), &mut registry).unwrap();

    let failure = Conversation::new(Some(word.clone()), Meaning::new(0), 0.0);
    for _ in 0..2 {
        let adapted = a
            .adapt(&failure, &config, &mut rng, &mut registry, &mut events)
            .unwrap();
        assert_eq!(adapted, AdaptationOutcome::Observed);
    }
    let adapted = a
        .adapt(&failure, &config, &mut rng, &mut registry, &mut events)
        .unwrap();
    assert_eq!(adapted, AdaptationOutcome::Dropped);

    assert!(!a.lexicon().has_word(&word));
    let words = registry
        .words_for(Meaning::new(0))
        .expect("meaning entry survives its last word");
    assert!(words.is_empty(), "sole user gone, word entry removed");
    assert!(matches!(events.as_slice(), [LexiconEvent::Forgot { .. }]));
}

#[test]
fn all_successes_keep_the_word_and_reset_history() {
    let (mut a, _, mut registry) = agents_on_one_cell();
    let config = scenario_config(4);
    let mut rng = ChaCha12Rng::seed_from_u64(8);
    let mut events = Vec::new();
    let word = Word::from("MU");
    a.lexicon_mut().couple(word.clone(), Meaning::new(1), &mut registry).unwrap();

    let success = Conversation::new(Some(word.clone()), Meaning::new(1), 1.0);
    let mut last = AdaptationOutcome::Unchanged;
    for _ in 0..4 {
        last = a
            .adapt(&success, &config, &mut rng, &mut registry, &mut events)
            .unwrap();
    }
    assert_eq!(last, AdaptationOutcome::Kept);
    assert_eq!(a.lexicon().history(&word), Some(&[][..]), "history restarts after keep");
    assert_eq!(a.lexicon().word_for(Meaning::new(1)), Some(&word));
    assert!(events.is_empty());
}

#[test]
fn pointing_corrects_hearer_and_is_not_scored() {
    let (mut a, mut b, mut registry) = agents_on_one_cell();
    let config = SimulationConfig {
        anticipated_prob: 1.0,
        ..scenario_config(5)
    };
    let mut rng = ChaCha12Rng::seed_from_u64(17);
    let mut events = Vec::new();
    let word = Word::from("TA");
    a.lexicon_mut().couple(word.clone(), Meaning::new(0), &mut registry).unwrap();
    a.lexicon_mut().learn_meaning(Meaning::new(1));
    b.lexicon_mut().couple(word.clone(), Meaning::new(1), &mut registry).unwrap();
    b.lexicon_mut().learn_meaning(Meaning::new(0));

    let outcome = a
        .speak(&mut b, Meaning::new(0), &config, &mut rng, &mut registry, &mut events)
        .unwrap();

    assert_eq!(
        outcome,
        ExchangeOutcome::Correction {
            hearer: b.id(),
            word: word.clone(),
            from: Meaning::new(1),
            to: Meaning::new(0),
        }
    );
    assert!(outcome.conversation().is_none(), "corrections carry no score");
    assert_eq!(b.lexicon().meaning_of(&word), Some(Meaning::new(0)));
    assert_eq!(b.lexicon().word_for(Meaning::new(1)), None);
    assert!(registry.contains(Meaning::new(0), &word, b.id()));
    assert!(!registry.contains(Meaning::new(1), &word, b.id()));
    assert!(b.verify(&registry).is_ok());
    assert!(a.verify(&registry).is_ok());
}

#[test]
fn correction_displaces_the_hearers_other_word_for_the_meaning() {
    let (mut a, mut b, mut registry) = agents_on_one_cell();
    let config = SimulationConfig {
        anticipated_prob: 1.0,
        ..scenario_config(5)
    };
    let mut rng = ChaCha12Rng::seed_from_u64(17);
    let mut events = Vec::new();
    let shared = Word::from("TA");
    let local = Word::from("ZO");
    a.lexicon_mut().couple(shared.clone(), Meaning::new(0), &mut registry).unwrap();
    a.lexicon_mut().learn_meaning(Meaning::new(1));
    b.lexicon_mut().couple(shared.clone(), Meaning::new(1), &mut registry).unwrap();
    b.lexicon_mut().couple(local.clone(), Meaning::new(0), &mut registry).unwrap();

    a.speak(&mut b, Meaning::new(0), &config, &mut rng, &mut registry, &mut events)
        .unwrap();

    assert!(!b.lexicon().has_word(&local), "displaced word is forgotten");
    assert_eq!(b.lexicon().word_for(Meaning::new(0)), Some(&shared));
    assert_eq!(b.lexicon().len(), 1);
    assert!(b.verify(&registry).is_ok());
    let kinds: Vec<&str> = events.iter().map(LexiconEvent::kind).collect();
    assert_eq!(kinds, vec!["forgot", "corrected"]);
}
