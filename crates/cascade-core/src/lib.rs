//! cascade-core: two-port network algebra and matching engine
//!
//! Frequency-swept S-parameter networks, cascading and de-embedding,
//! transistor topology transforms, stability and gain figures, and L-section
//! matching, sequenced through a stack of networks.
//!
//! ## Modules
//!
//! - `frequency` - Frequency sweep representation
//! - `math` - Closed-form 2-port algebra (conversions, transforms, stability, matching)
//! - `network` - Frequency-swept 2-port networks and their operations
//! - `touchstone` - Touchstone v1 file I/O
//! - `value` - Element value and complex literals
//! - `command` - Command tokens
//! - `stack` - Network operation stack

pub mod command;
pub mod constants;
pub mod frequency;
pub mod math;
pub mod network;
pub mod stack;
pub mod touchstone;
pub mod value;

pub use command::{parse_commands, Command, Operation, OutputMode};
pub use frequency::{Frequency, FrequencyUnit};
pub use network::{DeviceMatch, GainSummary, Network, NetworkError, Termination, Terminations};
pub use stack::{Stack, StackError};
pub use touchstone::{SParamFormat, Touchstone, TouchstoneError};
pub use value::{ElementValue, ValueError};
