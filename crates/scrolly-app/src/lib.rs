//! Scrolly: terminal driver library.
//!
//! Exposes configuration, the session wrapper and the frame-ticking event
//! loop so that the binary and the integration tests share one code path.

pub mod config;
pub mod driver;
pub mod error;
