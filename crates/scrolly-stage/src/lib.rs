//! Scrolly Stage: in-memory implementation of the `Stage` trait.
//!
//! Holds a tree of identified elements, runs transitions against a virtual
//! clock that only moves when [`MemoryStage::advance`] is called, and renders
//! the tree as SVG markup.
//!
//! [`MemoryStage::advance`]: scrolly_core::stage::Stage::advance

pub mod interpolate;
pub mod memory_stage;
pub mod svg;

pub use memory_stage::MemoryStage;
