//! # Parlance Agents
//!
//! The members of a naming-game population.
//!
//! - **lexicon**: an agent's private word↔meaning couplings, kept in
//!   lockstep with the population's `VocabularyRegistry`
//! - **words**: random syllable coinage and the canonical vocabulary
//!   given to literate agents
//! - **language_agent**: movement, the communication protocol, and the
//!   adaptation rule that reinforces, remaps, or forgets couplings

pub mod lexicon;
pub mod words;
pub mod language_agent;
pub mod prelude;
