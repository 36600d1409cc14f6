//! Stability and gain figures of a two-port
//!
//! Every function takes the 2x2 S-matrix at one frequency and returns a real
//! scalar. NaN means "not meaningful for this device at this frequency".

use ndarray::Array2;
use num_complex::Complex64;

#[inline]
fn entries(s: &Array2<Complex64>) -> (Complex64, Complex64, Complex64, Complex64) {
    (s[[0, 0]], s[[0, 1]], s[[1, 0]], s[[1, 1]])
}

/// Determinant S11*S22 - S12*S21
pub fn det(s: &Array2<Complex64>) -> Complex64 {
    let (s11, s12, s21, s22) = entries(s);
    s11 * s22 - s12 * s21
}

/// Rollet stability factor K
///
/// Infinite for a unilateral device (S12*S21 = 0).
pub fn rollet(s: &Array2<Complex64>) -> f64 {
    let (s11, s12, s21, s22) = entries(s);
    let d = det(s);
    (1.0 - s11.norm_sqr() - s22.norm_sqr() + d.norm_sqr()) / (s12 * s21 * 2.0).norm()
}

/// Edwards-Sinsky stability factor mu (>= 1 means unconditionally stable)
pub fn mu(s: &Array2<Complex64>) -> f64 {
    let (s11, s12, s21, s22) = entries(s);
    let d = det(s);
    (1.0 - s11.norm_sqr()) / ((s22 - d * s11.conj()).norm() + (s12 * s21).norm())
}

/// Maximum unilateral transducer gain
pub fn gum(s: &Array2<Complex64>) -> f64 {
    let (s11, _, s21, s22) = entries(s);
    s21.norm_sqr() / ((1.0 - s11.norm_sqr()) * (1.0 - s22.norm_sqr()))
}

/// Unilateral input matching gain
pub fn gui(s: &Array2<Complex64>) -> f64 {
    1.0 / (1.0 - s[[0, 0]].norm_sqr())
}

/// Unilateral output matching gain
pub fn guo(s: &Array2<Complex64>) -> f64 {
    1.0 / (1.0 - s[[1, 1]].norm_sqr())
}

/// Maximum stable gain |S21| / |S12|
pub fn gmsg(s: &Array2<Complex64>) -> f64 {
    s[[1, 0]].norm() / s[[0, 1]].norm()
}

/// Maximum available gain
///
/// Falls back to GUM for a unilateral device and is NaN when K < 1.
pub fn gmag(s: &Array2<Complex64>) -> f64 {
    let k = rollet(s);
    if k.is_infinite() {
        return gum(s);
    }
    if k < 1.0 {
        f64::NAN
    } else {
        gmsg(s) * (k - (k * k - 1.0).sqrt())
    }
}

/// Unilateral figure of merit 1 / |1 - U|^2
///
/// NaN when K < 1.
pub fn gu(s: &Array2<Complex64>) -> f64 {
    let (s11, s12, s21, s22) = entries(s);
    let u = s12 * s21 * (s11 * s22).conj() * gui(s) * guo(s);
    if rollet(s) < 1.0 {
        f64::NAN
    } else {
        1.0 / (Complex64::new(1.0, 0.0) - u).norm_sqr()
    }
}
