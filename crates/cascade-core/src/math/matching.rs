//! Matching solvers
//!
//! Lumped L-section synthesis between two impedances, the simultaneous
//! conjugate match of a two-port, and the terminated reflection coefficients
//! used to evaluate a chosen termination.

use ndarray::Array2;
use num_complex::Complex64;

use super::stability::{det, rollet};

/// Reactances of a lumped L-section
///
/// ```text
/// ZS <---+---X2--< ZL
///        X1
/// ```
/// `x1` is the shunt element on the source side and `x2` the series element
/// towards the load. With `reverse` the source and load are swapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LSection {
    pub x1: f64,
    pub x2: f64,
}

impl LSection {
    /// Solution marking an infeasible match
    pub const INFEASIBLE: LSection = LSection {
        x1: f64::NAN,
        x2: f64::NAN,
    };

    /// True when no real L-section exists for this branch
    pub fn is_infeasible(&self) -> bool {
        self.x1.is_nan() || self.x2.is_nan()
    }
}

/// Solve an L-section match from `zs` to `zl`
///
/// Returns both branches of the quadratic (+Q first, then -Q). If no real
/// solution exists both branches are [`LSection::INFEASIBLE`].
pub fn lmatch(zs: Complex64, zl: Complex64, reverse: bool) -> [LSection; 2] {
    let (zs, zl) = if reverse { (zl, zs) } else { (zs, zl) };
    let (rs, xs) = (zs.re, zs.im);
    let (rl, xl) = (zl.re, zl.im);

    let q_sq = rs / rl - 1.0 + xs * xs / (rs * rl);
    if q_sq < 0.0 {
        return [LSection::INFEASIBLE; 2];
    }
    let q = q_sq.sqrt();
    let den = rs / rl - 1.0;

    let branch = |sign: f64| {
        let num = xs + sign * q * rs;
        // Rs = Rl with Q = 0 is already matched: no shunt element. Any other
        // 0/0 branch stays NaN.
        let x1 = if q_sq == 0.0 && den == 0.0 { 0.0 } else { num / den };
        LSection {
            x1,
            x2: -(xl + sign * q * rl),
        }
    };

    [branch(1.0), branch(-1.0)]
}

/// Sign of a real number with sign(0) = 0
#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Source and load reflection coefficients of the simultaneous conjugate match
///
/// Requires K >= 1. Returns `(NaN, NaN)` for a potentially unstable device or
/// when the selected root falls outside the unit circle.
pub fn smatch(s: &Array2<Complex64>) -> (Complex64, Complex64) {
    let nan = Complex64::new(f64::NAN, f64::NAN);
    if rollet(s) < 1.0 {
        return (nan, nan);
    }

    let (s11, s22) = (s[[0, 0]], s[[1, 1]]);
    let d = det(s);
    let b1 = 1.0 + s11.norm_sqr() - s22.norm_sqr() - d.norm_sqr();
    let b2 = 1.0 + s22.norm_sqr() - s11.norm_sqr() - d.norm_sqr();
    let c1 = s11 - d * s22.conj();
    let c2 = s22 - d * s11.conj();

    let gs = (b1 - sign(b1) * (b1 * b1 - 4.0 * c1.norm_sqr()).sqrt()) / (c1 * 2.0);
    let gl = (b2 - sign(b2) * (b2 * b2 - 4.0 * c2.norm_sqr()).sqrt()) / (c2 * 2.0);

    if gs.norm() >= 1.0 || gl.norm() >= 1.0 {
        return (nan, nan);
    }
    (gs, gl)
}

/// Input reflection coefficient with the output terminated in `gl`
pub fn gin(s: &Array2<Complex64>, gl: Complex64) -> Complex64 {
    let one = Complex64::new(1.0, 0.0);
    s[[0, 0]] + s[[0, 1]] * s[[1, 0]] * gl / (one - s[[1, 1]] * gl)
}

/// Output reflection coefficient with the input terminated in `gs`
pub fn gout(s: &Array2<Complex64>, gs: Complex64) -> Complex64 {
    let one = Complex64::new(1.0, 0.0);
    s[[1, 1]] + s[[0, 1]] * s[[1, 0]] * gs / (one - s[[0, 0]] * gs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::conversions::{gamma_2_z, z_2_gamma};
    use crate::math::matrix_ops::two_port;
    use approx::assert_relative_eq;

    fn polar(mag: f64, deg: f64) -> Complex64 {
        Complex64::from_polar(mag, deg.to_radians())
    }

    fn stable() -> Array2<Complex64> {
        two_port(polar(0.45, 150.0), polar(0.01, -10.0), polar(2.05, 10.0), polar(0.4, -150.0))
    }

    /// Impedance seen through the L-section from the load side
    fn seen_from_load(zs: Complex64, m: LSection) -> Complex64 {
        let shunt = Complex64::new(0.0, m.x1);
        let parallel = zs * shunt / (zs + shunt);
        parallel + Complex64::new(0.0, m.x2)
    }

    #[test]
    fn test_lmatch_already_matched() {
        let z = Complex64::new(50.0, 0.0);
        for m in lmatch(z, z, false) {
            assert_eq!(m.x1, 0.0);
            assert_eq!(m.x2, 0.0);
        }
    }

    #[test]
    fn test_lmatch_equal_resistance_reactive_source() {
        // Rs = Rl with Q = 1: the -Q branch is 0/0 and has no solution
        let zs = Complex64::new(50.0, 50.0);
        let zl = Complex64::new(50.0, 0.0);
        let [plus, minus] = lmatch(zs, zl, false);

        assert!(minus.is_infeasible());
        assert!(minus.x1.is_nan());

        // The +Q branch needs no shunt element, only a series cap cancelling Xs
        assert!(plus.x1.is_infinite());
        assert_eq!(plus.x2, -50.0);
        let z = zs + Complex64::new(0.0, plus.x2);
        assert_relative_eq!(z.re, zl.re, epsilon = 1e-12);
        assert_relative_eq!(z.im, -zl.im, epsilon = 1e-12);
    }

    #[test]
    fn test_lmatch_infeasible() {
        // Rs < Rl with no source reactance: shunt-first topology cannot match
        let result = lmatch(Complex64::new(10.0, 0.0), Complex64::new(50.0, 0.0), false);
        assert!(result.iter().all(|m| m.is_infeasible()));
        assert!(result[0].x1.is_nan() && result[0].x2.is_nan());
    }

    #[test]
    fn test_lmatch_both_branches_conjugate_match() {
        let zs = Complex64::new(50.0, 0.0);
        let zl = Complex64::new(10.0, 15.0);
        let result = lmatch(zs, zl, false);
        assert_ne!(result[0], result[1]);
        for m in result {
            let z = seen_from_load(zs, m);
            assert_relative_eq!(z.re, zl.re, epsilon = 1e-9);
            assert_relative_eq!(z.im, -zl.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_lmatch_reverse_swaps_terminations() {
        let a = Complex64::new(10.0, 15.0);
        let b = Complex64::new(50.0, 0.0);
        assert_eq!(lmatch(a, b, true), lmatch(b, a, false));
    }

    #[test]
    fn test_smatch_stable_device() {
        let s = stable();
        let (gs, gl) = smatch(&s);
        assert!(gs.norm() < 1.0);
        assert!(gl.norm() < 1.0);

        // Both ports conjugately matched
        let gi = gin(&s, gl);
        let go = gout(&s, gs);
        assert_relative_eq!(gi.re, gs.conj().re, epsilon = 1e-9);
        assert_relative_eq!(gi.im, gs.conj().im, epsilon = 1e-9);
        assert_relative_eq!(go.re, gl.conj().re, epsilon = 1e-9);
        assert_relative_eq!(go.im, gl.conj().im, epsilon = 1e-9);
    }

    #[test]
    fn test_smatch_unstable_device() {
        let s = two_port(polar(0.61, -45.0), polar(0.04, 60.0), polar(6.3, 137.0), polar(0.79, -21.0));
        let (gs, gl) = smatch(&s);
        assert!(gs.is_nan());
        assert!(gl.is_nan());
    }

    #[test]
    fn test_smatch_rejects_roots_on_unit_circle() {
        // K = 1 exactly: both roots are double roots with |G| = 1
        let s = two_port(polar(0.75, 0.0), polar(0.5, 0.0), polar(0.5, 0.0), polar(0.0, 0.0));
        assert_eq!(rollet(&s), 1.0);
        let (gs, gl) = smatch(&s);
        assert!(gs.is_nan());
        assert!(gl.is_nan());
    }

    #[test]
    fn test_smatch_picks_inner_root_when_det_exceeds_one() {
        let s = two_port(polar(1.2, 0.0), polar(0.1, 0.0), polar(0.1, 0.0), polar(1.2, 0.0));
        assert!(rollet(&s) > 8.0);
        assert!(det(&s).norm() > 1.0);
        let (gs, gl) = smatch(&s);
        assert!(gs.norm() < 1.0 && gl.norm() < 1.0);
        let gi = gin(&s, gl);
        assert_relative_eq!(gi.re, gs.conj().re, epsilon = 1e-9);
        assert_relative_eq!(gi.im, gs.conj().im, epsilon = 1e-9);
    }

    #[test]
    fn test_gin_with_matched_load() {
        let s = stable();
        assert_eq!(gin(&s, Complex64::new(0.0, 0.0)), s[[0, 0]]);
        assert_eq!(gout(&s, Complex64::new(0.0, 0.0)), s[[1, 1]]);
    }

    #[test]
    fn test_gin_through_impedance_domain() {
        // A 50 ohm load on a thru presents 50 ohm at the input
        let thru = two_port(polar(0.0, 0.0), polar(1.0, 0.0), polar(1.0, 0.0), polar(0.0, 0.0));
        let zl = Complex64::new(25.0, 10.0);
        let zin = gamma_2_z(gin(&thru, z_2_gamma(zl, 50.0)), 50.0);
        assert_relative_eq!(zin.re, 25.0, epsilon = 1e-9);
        assert_relative_eq!(zin.im, 10.0, epsilon = 1e-9);
    }
}
