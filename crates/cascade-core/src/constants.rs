//! Numerical constants for two-port calculations
//!
//! Reference impedance and the tolerances used when comparing data.

/// Reference impedance every network on the stack must be measured against (ohms).
pub const Z0: f64 = 50.0;

/// Relative tolerance when checking that two networks share a frequency grid.
pub const FREQ_REL_TOL: f64 = 1e-9;
