//! Frequency module - represents a frequency sweep
//!
//! Frequencies are stored in Hz. The unit only controls how the sweep is
//! displayed and written back to Touchstone files.

use crate::constants::FREQ_REL_TOL;

/// Frequency unit enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    Hz,
    KHz,
    MHz,
    #[default]
    GHz,
    THz,
}

impl FrequencyUnit {
    /// Get the multiplier to convert to Hz
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => 1e9,
            FrequencyUnit::THz => 1e12,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hz" => Some(FrequencyUnit::Hz),
            "khz" => Some(FrequencyUnit::KHz),
            "mhz" => Some(FrequencyUnit::MHz),
            "ghz" => Some(FrequencyUnit::GHz),
            "thz" => Some(FrequencyUnit::THz),
            _ => None,
        }
    }

    /// Touchstone option-line spelling
    pub fn label(&self) -> &'static str {
        match self {
            FrequencyUnit::Hz => "HZ",
            FrequencyUnit::KHz => "KHZ",
            FrequencyUnit::MHz => "MHZ",
            FrequencyUnit::GHz => "GHZ",
            FrequencyUnit::THz => "THZ",
        }
    }
}

/// A frequency sweep
#[derive(Debug, Clone, PartialEq)]
pub struct Frequency {
    /// Frequency vector in Hz
    f: Vec<f64>,
    /// Display unit
    unit: FrequencyUnit,
}

impl Frequency {
    /// Create a linear sweep of `npoints` between `start` and `stop`
    ///
    /// # Example
    /// ```
    /// use cascade_core::frequency::{Frequency, FrequencyUnit};
    /// let freq = Frequency::new(100.0, 500.0, 5, FrequencyUnit::MHz);
    /// assert_eq!(freq.f()[1], 200e6);
    /// ```
    pub fn new(start: f64, stop: f64, npoints: usize, unit: FrequencyUnit) -> Self {
        let mult = unit.multiplier();
        let start_hz = start * mult;
        let stop_hz = stop * mult;

        let f = if npoints == 1 {
            vec![start_hz]
        } else {
            let step = (stop_hz - start_hz) / (npoints - 1) as f64;
            (0..npoints).map(|i| start_hz + i as f64 * step).collect()
        };

        Self { f, unit }
    }

    /// Create from a frequency vector given in `unit`
    pub fn from_f(f: Vec<f64>, unit: FrequencyUnit) -> Self {
        let mult = unit.multiplier();
        Self {
            f: f.iter().map(|&x| x * mult).collect(),
            unit,
        }
    }

    /// Get frequency vector in Hz
    #[inline]
    pub fn f(&self) -> &[f64] {
        &self.f
    }

    /// Get frequency vector in the display unit
    pub fn f_scaled(&self) -> Vec<f64> {
        let mult = self.unit.multiplier();
        self.f.iter().map(|&x| x / mult).collect()
    }

    /// Get the number of frequency points
    #[inline]
    pub fn npoints(&self) -> usize {
        self.f.len()
    }

    /// Get the display unit
    #[inline]
    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    /// True when every point is strictly greater than the one before it
    pub fn is_increasing(&self) -> bool {
        self.f.windows(2).all(|w| w[1] > w[0])
    }

    /// True when `other` samples the same frequencies (unit is ignored)
    pub fn same_grid(&self, other: &Frequency) -> bool {
        self.f.len() == other.f.len()
            && self
                .f
                .iter()
                .zip(other.f.iter())
                .all(|(&a, &b)| (a - b).abs() <= FREQ_REL_TOL * a.abs().max(b.abs()))
    }
}
