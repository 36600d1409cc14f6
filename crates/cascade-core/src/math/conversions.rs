//! Unit and domain conversion functions
//!
//! Impedance / reflection-coefficient bijection plus the magnitude, dB and
//! phase helpers used when reporting results.

use num_complex::Complex64;
use std::f64::consts::PI;

/// Convert an impedance to a reflection coefficient: (Z - Z0) / (Z + Z0)
///
/// Z = -Z0 yields a non-finite result, which is passed through.
#[inline]
pub fn z_2_gamma(z: Complex64, z0: f64) -> Complex64 {
    (z - z0) / (z + z0)
}

/// Convert a reflection coefficient to an impedance: Z0 (1 + Γ) / (1 - Γ)
///
/// Γ = 1 (open circuit) yields a non-finite result, which is passed through.
#[inline]
pub fn gamma_2_z(gamma: Complex64, z0: f64) -> Complex64 {
    let one = Complex64::new(1.0, 0.0);
    (one + gamma) / (one - gamma) * z0
}

/// Convert complex number to phase in degrees
pub fn complex_2_degree(z: Complex64) -> f64 {
    z.arg() * 180.0 / PI
}

/// Convert (magnitude, degree) to complex
pub fn magdeg_2_reim(mag: f64, deg: f64) -> Complex64 {
    Complex64::from_polar(mag, deg * PI / 180.0)
}

/// Convert dB to magnitude (10^(dB/20))
pub fn db_2_magnitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert magnitude to dB (20*log10(mag))
pub fn magnitude_2_db(mag: f64) -> f64 {
    20.0 * mag.log10()
}

/// Convert a power ratio to dB (10*log10(p))
///
/// Non-positive ratios have no dB value and map to NaN.
pub fn power_2_db(p: f64) -> f64 {
    if p > 0.0 {
        10.0 * p.log10()
    } else {
        f64::NAN
    }
}
