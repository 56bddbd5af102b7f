//! Domain model of the step tracking context.

pub mod change_log;
pub mod commands;
pub mod events;
pub mod history;
pub mod manager;
