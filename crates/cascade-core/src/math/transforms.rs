//! Two-port parameter transforms
//!
//! S <-> ABCD conversion, the 2-port to 3-port expansion that re-introduces
//! the common (ground) terminal, and the re-embedding transforms built on it:
//! ground lift, common-base and common-collector.
//!
//! All functions work on a single frequency point. Singular cases are not
//! trapped; Inf/NaN entries flow out to the caller.

use ndarray::{arr2, Array2};
use num_complex::Complex64;

use super::conversions::z_2_gamma;
use super::matrix_ops::two_port;

/// Convert S-parameters to ABCD parameters
///
/// Singular when S21 = 0.
pub fn s2abcd(s: &Array2<Complex64>, z0: f64) -> Array2<Complex64> {
    let one = Complex64::new(1.0, 0.0);
    let (s11, s12, s21, s22) = (s[[0, 0]], s[[0, 1]], s[[1, 0]], s[[1, 1]]);
    let den = s21 * 2.0;

    let a = ((one + s11) * (one - s22) + s12 * s21) / den;
    let b = ((one + s11) * (one + s22) - s12 * s21) * z0 / den;
    let c = ((one - s11) * (one - s22) - s12 * s21) / z0 / den;
    let d = ((one - s11) * (one + s22) + s12 * s21) / den;

    two_port(a, b, c, d)
}

/// Convert ABCD parameters to S-parameters
///
/// Singular when A + B/Z0 + C*Z0 + D = 0.
pub fn abcd2s(m: &Array2<Complex64>, z0: f64) -> Array2<Complex64> {
    let (a, b, c, d) = (m[[0, 0]], m[[0, 1]], m[[1, 0]], m[[1, 1]]);
    let den = a + b / z0 + c * z0 + d;

    let s11 = (a + b / z0 - c * z0 - d) / den;
    let s12 = (a * d - b * c) * 2.0 / den;
    let s21 = Complex64::new(2.0, 0.0) / den;
    let s22 = (-a + b / z0 - c * z0 + d) / den;

    two_port(s11, s12, s21, s22)
}

/// Expand a grounded 2-port into the equivalent 3-port
///
/// Assumes the 2-port was measured with the device's third terminal tied to
/// a perfect ground, and that the resulting 3-port has rows and columns that
/// each sum to one (indefinite scattering matrix). Port 3 is the common
/// terminal. Singular when S11 + S12 + S21 + S22 = 4.
pub fn to_three_port(s: &Array2<Complex64>) -> Array2<Complex64> {
    let one = Complex64::new(1.0, 0.0);
    let (s11, s12, s21, s22) = (s[[0, 0]], s[[0, 1]], s[[1, 0]], s[[1, 1]]);

    let d11 = one - s11 - s12;
    let d12 = one - s11 - s21;
    let d21 = one - s12 - s22;
    let d22 = one - s21 - s22;
    let e = s11 + s22 + s12 + s21;
    let den = Complex64::new(4.0, 0.0) - e;

    arr2(&[
        [
            s11 + d11 * d12 / den,
            s12 + d11 * d21 / den,
            d11 * 2.0 / den,
        ],
        [
            s21 + d22 * d12 / den,
            s22 + d22 * d21 / den,
            d22 * 2.0 / den,
        ],
        [d12 * 2.0 / den, d21 * 2.0 / den, e / den],
    ])
}

/// Terminate port `k` of a 3-port in a load with reflection coefficient
/// `gamma` and return the 2-port seen at ports `keep`
///
/// `S'ij = Sij + Sik * gamma * Skj / (1 - gamma * Skk)`
pub fn terminate_three_port(
    s3: &Array2<Complex64>,
    k: usize,
    gamma: Complex64,
    keep: [usize; 2],
) -> Array2<Complex64> {
    let one = Complex64::new(1.0, 0.0);
    let den = one - gamma * s3[[k, k]];
    let entry = |i: usize, j: usize| s3[[i, j]] + s3[[i, k]] * gamma * s3[[k, j]] / den;

    two_port(
        entry(keep[0], keep[0]),
        entry(keep[0], keep[1]),
        entry(keep[1], keep[0]),
        entry(keep[1], keep[1]),
    )
}

/// Lift the common terminal off ground and return it through impedance `z`
///
/// Models e.g. an emitter inductance or degeneration resistor.
pub fn lift_ground(s: &Array2<Complex64>, z: Complex64, z0: f64) -> Array2<Complex64> {
    terminate_three_port(&to_three_port(s), 2, z_2_gamma(z, z0), [0, 1])
}

/// Re-wire a common-emitter device as common-base
///
/// Port 1 (the old input) becomes the grounded terminal; the new input is the
/// old common terminal and the output stays on port 2.
pub fn common_base(s: &Array2<Complex64>) -> Array2<Complex64> {
    terminate_three_port(&to_three_port(s), 0, Complex64::new(-1.0, 0.0), [2, 1])
}

/// Re-wire a common-emitter device as common-collector
///
/// Port 2 (the old output) becomes the grounded terminal; the new output is
/// the old common terminal.
pub fn common_collector(s: &Array2<Complex64>) -> Array2<Complex64> {
    terminate_three_port(&to_three_port(s), 1, Complex64::new(-1.0, 0.0), [0, 2])
}
