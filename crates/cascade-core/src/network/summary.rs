//! Per-frequency gain and matching summaries
//!
//! These records are what the report writers consume: stability and gain
//! figures, and the matching terminations with the L-sections that realize
//! them from a 50 ohm system. Terminations are the simultaneous conjugate
//! match unless the source or load is fixed with [`Terminations`].

use ndarray::{Array2, Array3};
use num_complex::Complex64;

use super::core::Network;
use crate::math::conversions::{gamma_2_z, z_2_gamma};
use crate::math::matching::{gin, gout, lmatch, smatch, LSection};
use crate::math::matrix_ops::{extract_freq_slice, map_per_freq};
use crate::math::stability::{gmag, gmsg, gu, gui, gum, guo, mu, rollet};
use crate::math::transforms::s2abcd;

/// Stability and gain figures at one frequency (linear power ratios)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainSummary {
    /// Frequency in Hz
    pub frequency: f64,
    /// Input impedance with a matched load (from S11)
    pub zin: Complex64,
    /// Output impedance with a matched source (from S22)
    pub zout: Complex64,
    pub gui: f64,
    /// |S21|^2
    pub s21: f64,
    pub guo: f64,
    pub gum: f64,
    pub gmsg: f64,
    pub gmag: f64,
    pub gu: f64,
    /// Rollet K
    pub k: f64,
    pub mu: f64,
}

/// A source or load termination given as a reflection coefficient or an
/// impedance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    Gamma(Complex64),
    Impedance(Complex64),
}

impl Termination {
    /// Reflection coefficient referenced to `z0`
    pub fn gamma(&self, z0: f64) -> Complex64 {
        match *self {
            Termination::Gamma(g) => g,
            Termination::Impedance(z) => z_2_gamma(z, z0),
        }
    }
}

/// Fixed terminations for the matching summary
///
/// With neither side fixed the simultaneous conjugate match is used. With one
/// side fixed the other side is conjugately matched to the device through it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Terminations {
    pub source: Option<Termination>,
    pub load: Option<Termination>,
}

/// Matching terminations at one frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceMatch {
    /// Frequency in Hz
    pub frequency: f64,
    /// Source reflection presented to the device
    pub gs: Complex64,
    /// Device input reflection with `gl` on its output
    pub gin: Complex64,
    /// Device output reflection with `gs` on its input
    pub gout: Complex64,
    /// Load reflection presented to the device
    pub gl: Complex64,
    pub zs: Complex64,
    pub zin: Complex64,
    pub zout: Complex64,
    pub zl: Complex64,
    /// L-sections from a 50 ohm source presenting `zs`
    pub input: [LSection; 2],
    pub input_reversed: [LSection; 2],
    /// L-sections presenting `zl` from a 50 ohm load
    pub output: [LSection; 2],
    pub output_reversed: [LSection; 2],
}

/// (gs, gin, gout, gl) for one frequency
fn reflections(
    s: &Array2<Complex64>,
    source: Option<Complex64>,
    load: Option<Complex64>,
) -> (Complex64, Complex64, Complex64, Complex64) {
    match (source, load) {
        (None, None) => {
            let (gs, gl) = smatch(s);
            (gs, gs.conj(), gl.conj(), gl)
        }
        (Some(gs), None) => {
            let g_out = gout(s, gs);
            let gl = g_out.conj();
            (gs, gin(s, gl), g_out, gl)
        }
        (None, Some(gl)) => {
            let g_in = gin(s, gl);
            let gs = g_in.conj();
            (gs, g_in, gout(s, gs), gl)
        }
        (Some(gs), Some(gl)) => (gs, gin(s, gl), gout(s, gs), gl),
    }
}

impl Network {
    /// Stability and gain figures at every frequency
    pub fn gain_summary(&self) -> Vec<GainSummary> {
        let z0 = self.reference_impedance();
        self.frequency
            .f()
            .iter()
            .enumerate()
            .map(|(i, &frequency)| {
                let s = extract_freq_slice(&self.s, i);
                GainSummary {
                    frequency,
                    zin: gamma_2_z(s[[0, 0]], z0),
                    zout: gamma_2_z(s[[1, 1]], z0),
                    gui: gui(&s),
                    s21: s[[1, 0]].norm_sqr(),
                    guo: guo(&s),
                    gum: gum(&s),
                    gmsg: gmsg(&s),
                    gmag: gmag(&s),
                    gu: gu(&s),
                    k: rollet(&s),
                    mu: mu(&s),
                }
            })
            .collect()
    }

    /// Simultaneous conjugate match and L-section realizations at every frequency
    pub fn device_match(&self) -> Vec<DeviceMatch> {
        self.device_match_terminated(&Terminations::default())
    }

    /// Matching summary with the source and/or load optionally fixed
    pub fn device_match_terminated(&self, terminations: &Terminations) -> Vec<DeviceMatch> {
        let z0 = self.reference_impedance();
        let system = Complex64::new(z0, 0.0);
        let source = terminations.source.map(|t| t.gamma(z0));
        let load = terminations.load.map(|t| t.gamma(z0));
        self.frequency
            .f()
            .iter()
            .enumerate()
            .map(|(i, &frequency)| {
                let s = extract_freq_slice(&self.s, i);
                let (gs, gin, gout, gl) = reflections(&s, source, load);
                let (zs, zl) = (gamma_2_z(gs, z0), gamma_2_z(gl, z0));
                DeviceMatch {
                    frequency,
                    gs,
                    gin,
                    gout,
                    gl,
                    zs,
                    zin: gamma_2_z(gin, z0),
                    zout: gamma_2_z(gout, z0),
                    zl,
                    input: lmatch(system, zs.conj(), false),
                    input_reversed: lmatch(system, zs.conj(), true),
                    output: lmatch(zl.conj(), system, false),
                    output_reversed: lmatch(zl.conj(), system, true),
                }
            })
            .collect()
    }

    /// ABCD parameters at every frequency
    pub fn abcd(&self) -> Array3<Complex64> {
        let z0 = self.reference_impedance();
        map_per_freq(&self.s, |_, s| s2abcd(s, z0))
    }
}
