//! Mathematical functions module
//!
//! Closed-form two-port algebra: domain conversions, S/ABCD transforms,
//! three-port re-embedding, stability and gain figures, matching.

pub mod conversions;
pub mod matching;
pub mod matrix_ops;
pub mod stability;
pub mod transforms;

pub use conversions::*;
pub use matching::*;
pub use stability::*;
pub use transforms::*;
