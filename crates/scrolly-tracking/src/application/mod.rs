//! Application services: drawing helpers, navigation, time pumping and
//! progress queries.

pub mod navigation;
pub mod pump;
pub mod query_handlers;
pub mod tracked;
