//! Gain summaries and simultaneous matching on the fixture amplifier

use approx::assert_relative_eq;
use cascade_core::math::conversions::z_2_gamma;
use cascade_core::math::matching::{gin, gout, lmatch, LSection};
use cascade_core::network::Network;
use ndarray::Axis;
use num_complex::Complex64;

const TEST_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/data");

fn amp() -> Network {
    Network::from_touchstone(format!("{}/amp.s2p", TEST_DATA_DIR)).unwrap()
}

/// Impedance seen through an L-section from the series side:
/// jX2 + (jX1 || z)
fn realized(section: &LSection, z: Complex64) -> Complex64 {
    let x1 = Complex64::new(0.0, section.x1);
    let x2 = Complex64::new(0.0, section.x2);
    x2 + x1 * z / (x1 + z)
}

// ============================================================================
// Gain summary
// ============================================================================

#[test]
fn test_gain_summary_flags_unstable_point() {
    let summary = amp().gain_summary();
    assert_eq!(summary.len(), 4);

    // 1000 MHz is potentially unstable: K < 1, no GMAG or GU
    assert!(summary[1].k < 1.0);
    assert!(summary[1].gmag.is_nan());
    assert!(summary[1].gu.is_nan());

    for g in [summary[0], summary[2], summary[3]] {
        assert!(g.k >= 1.0);
        assert!(g.gmag.is_finite());
        assert!(g.gmag <= g.gmsg);
    }
}

#[test]
fn test_gain_summary_values() {
    let g = amp().gain_summary()[0];
    assert_relative_eq!(g.frequency, 500e6, epsilon = 1e-3);
    assert_relative_eq!(g.s21, 2.05 * 2.05, epsilon = 1e-9);
    assert_relative_eq!(g.gmsg, 205.0, epsilon = 1e-9);
    assert_relative_eq!(g.k, 16.169274390243906, epsilon = 1e-9);
    assert_relative_eq!(g.gui, 1.0 / (1.0 - 0.45 * 0.45), epsilon = 1e-12);
}

// ============================================================================
// Simultaneous match
// ============================================================================

#[test]
fn test_simultaneous_match_is_conjugate_at_both_ports() {
    let ntwk = amp();
    for (i, m) in ntwk.device_match().iter().enumerate() {
        let s = ntwk.s.index_axis(Axis(0), i).to_owned();
        if i == 1 {
            assert!(m.gs.is_nan() && m.gl.is_nan());
            continue;
        }
        assert!(m.gs.norm() < 1.0 && m.gl.norm() < 1.0);

        let g_in = gin(&s, m.gl);
        assert_relative_eq!(g_in.re, m.gs.conj().re, epsilon = 1e-9);
        assert_relative_eq!(g_in.im, m.gs.conj().im, epsilon = 1e-9);

        let g_out = gout(&s, m.gs);
        assert_relative_eq!(g_out.re, m.gl.conj().re, epsilon = 1e-9);
        assert_relative_eq!(g_out.im, m.gl.conj().im, epsilon = 1e-9);
    }
}

#[test]
fn test_input_sections_present_source_termination() {
    let system = Complex64::new(50.0, 0.0);
    for m in amp().device_match() {
        if m.zs.is_nan() {
            continue;
        }
        // Through either realizable branch, the 50 ohm source looks like ZS
        for section in m.input.iter().filter(|x| !x.is_infeasible()) {
            let z = realized(section, system);
            assert_relative_eq!(z.re, m.zs.re, epsilon = 1e-6);
            assert_relative_eq!(z.im, m.zs.im, epsilon = 1e-6);
        }
        // Through the output branches the 50 ohm load looks like ZL
        for section in m.output_reversed.iter().filter(|x| !x.is_infeasible()) {
            let z = realized(section, system);
            assert_relative_eq!(z.re, m.zl.re, epsilon = 1e-6);
            assert_relative_eq!(z.im, m.zl.im, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_lmatch_branches_conjugate_match() {
    let zs = Complex64::new(30.0, 10.0);
    let zl = Complex64::new(60.0, -20.0);

    // Shunt on the higher-resistance side only
    assert!(lmatch(zs, zl, false).iter().all(|x| x.is_infeasible()));
    for section in lmatch(zs, zl, true) {
        let z = realized(&section, zl);
        assert_relative_eq!(z.re, zs.conj().re, epsilon = 1e-9);
        assert_relative_eq!(z.im, zs.conj().im, epsilon = 1e-9);
    }
}

#[test]
fn test_matched_reflection_is_zero_at_system_impedance() {
    let g = z_2_gamma(Complex64::new(50.0, 0.0), 50.0);
    assert_eq!(g, Complex64::new(0.0, 0.0));
    let [a, b] = lmatch(Complex64::new(50.0, 0.0), Complex64::new(50.0, 0.0), false);
    assert_eq!((a.x1, a.x2, b.x1, b.x2), (0.0, 0.0, 0.0, 0.0));
}
