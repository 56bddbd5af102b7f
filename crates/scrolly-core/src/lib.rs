//! Scrolly Core: shared scene abstractions.
//!
//! This crate defines the types and traits that the tracking core, the
//! in-memory stage and the chart narrative all depend on. It contains no
//! rendering or animation code.

pub mod element;
pub mod error;
pub mod rng;
pub mod selection;
pub mod stage;
pub mod transition;
