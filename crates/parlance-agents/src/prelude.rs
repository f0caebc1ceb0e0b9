//! Parlance Agents Prelude: convenient imports for common usage.
//!
//! ```rust
//! use parlance_agents::prelude::*;
//! ```

// Re-export agent types
pub use crate::language_agent::{AdaptationOutcome, LanguageAgent};
pub use crate::lexicon::Lexicon;
pub use crate::words::{canonical_word, coin_word, random_syllable, SYLLABLE_COUNT};

// Re-export from core
pub use parlance_core::prelude::*;
