//! Scrolly: step tracking context.
//!
//! Responsible for the current step of a narrative, the per-element history
//! of applied attributes, the per-step change log and the count of running
//! transitions that gates navigation.

pub mod application;
pub mod domain;
