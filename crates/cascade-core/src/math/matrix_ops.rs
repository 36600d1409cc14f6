//! Matrix operation helpers
//!
//! Small fixed-size complex matrix routines shared by the transforms, plus
//! the per-frequency iteration helper used by network operations.

use ndarray::{arr2, Array2, Array3, Axis};
use num_complex::Complex64;

/// Build a 2x2 matrix from its four entries
#[inline]
pub fn two_port(m11: Complex64, m12: Complex64, m21: Complex64, m22: Complex64) -> Array2<Complex64> {
    arr2(&[[m11, m12], [m21, m22]])
}

/// Invert a 2x2 complex matrix with the closed form
///
/// A singular matrix is not trapped: its entries come back as Inf/NaN.
#[inline]
pub fn invert_2x2(m: &Array2<Complex64>) -> Array2<Complex64> {
    let a = m[[0, 0]];
    let b = m[[0, 1]];
    let c = m[[1, 0]];
    let d = m[[1, 1]];
    let inv_det = Complex64::new(1.0, 0.0) / (a * d - b * c);

    two_port(d * inv_det, -b * inv_det, -c * inv_det, a * inv_det)
}

/// Multiply two 2x2 complex matrices
#[inline]
pub fn mul_2x2(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    two_port(
        a[[0, 0]] * b[[0, 0]] + a[[0, 1]] * b[[1, 0]],
        a[[0, 0]] * b[[0, 1]] + a[[0, 1]] * b[[1, 1]],
        a[[1, 0]] * b[[0, 0]] + a[[1, 1]] * b[[1, 0]],
        a[[1, 0]] * b[[0, 1]] + a[[1, 1]] * b[[1, 1]],
    )
}

/// Extract the matrix at a single frequency index
#[inline]
pub fn extract_freq_slice(s: &Array3<Complex64>, f: usize) -> Array2<Complex64> {
    s.index_axis(Axis(0), f).to_owned()
}

/// Apply a square-matrix map at every frequency: `result[f] = op(f, s[f])`
///
/// `op` must return a matrix of the same size as its input.
pub fn map_per_freq<F>(s: &Array3<Complex64>, mut op: F) -> Array3<Complex64>
where
    F: FnMut(usize, &Array2<Complex64>) -> Array2<Complex64>,
{
    let mut result = Array3::<Complex64>::zeros(s.raw_dim());
    for (f, mut out) in result.outer_iter_mut().enumerate() {
        out.assign(&op(f, &extract_freq_slice(s, f)));
    }
    result
}
