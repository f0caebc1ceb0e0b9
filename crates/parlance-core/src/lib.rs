//! # Parlance Core
//!
//! Core types and contracts for spatial naming-game simulations.
//!
//! A population of mobile agents wanders a grid. Whenever two agents share
//! a cell they try to exchange a word for a meaning, and each agent adapts
//! its private word↔meaning couplings from the outcome. This crate holds
//! everything the agents and the runtime agree on:
//!
//! - **types**: agent ids, meanings, words, cells, exchange outcomes
//! - **events**: typed lexicon events (Learned, Forgot, Coined, Corrected)
//! - **config**: the validated simulation configuration
//! - **field**: the `SpatialField` contract agents move on
//! - **registry**: the population-wide vocabulary index
//! - **retention**: the tangent-sigmoid rule deciding when a word is dropped
//! - **error**: the error taxonomy
//!
//! ## Quick Start
//!
//! ```rust
//! use parlance_core::prelude::*;
//!
//! let config = SimulationConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let rule = config.retention();
//! assert_eq!(rule.keep_probability(1.0), 1.0);
//! ```

pub mod types;
pub mod events;
pub mod config;
pub mod field;
pub mod registry;
pub mod retention;
pub mod error;
pub mod prelude;
