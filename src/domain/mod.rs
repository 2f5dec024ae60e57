//! Domain aggregates exchanged with the lead tracking backend.

pub mod event;
pub mod lead;
pub mod types;
