//! Network module - frequency-swept two-port representation
//!
//! Provides the Network struct plus cascading, de-embedding, topology
//! transforms, element synthesis and the per-frequency gain/match summaries.

mod core;
mod elements;
mod io;
mod operators;
mod summary;
mod topology;

pub use self::core::{Network, NetworkError};
pub use summary::{DeviceMatch, GainSummary, Termination, Terminations};
