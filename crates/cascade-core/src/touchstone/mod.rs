//! Touchstone file I/O module
//!
//! Reads and writes version 1 Touchstone (.s1p/.s2p) files holding
//! S-parameters.

pub mod parser;
pub mod writer;

pub use parser::{SParamFormat, Touchstone, TouchstoneError};
