//! # Parlance Runtime
//!
//! Grid, scheduling, and observation for naming-game populations.
//!
//! The runtime owns the shared world: the grid agents wander on, the
//! population-wide vocabulary registry, the success window, and the single
//! seeded random source. It runs the tick loop and exposes read-only
//! snapshots, per-tick records, and aggregate metrics.

pub mod grid_impl;
pub mod tracker;
pub mod rng;
pub mod simulation;
pub mod simulation_builder;
pub mod metrics;
pub mod batch;
pub mod prelude;
