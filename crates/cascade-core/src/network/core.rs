//! Core Network struct and constructors
//!
//! Contains the fundamental Network data structure, factory methods and the
//! checks applied when a network enters the operation stack.

use ndarray::{Array1, Array3};
use num_complex::Complex64;
use std::path::Path;
use thiserror::Error;

use crate::frequency::Frequency;
use crate::touchstone::{parser::TouchstoneError, Touchstone};

/// Structural network errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("expected a 2-port network, got {0} ports")]
    NotTwoPort(usize),

    #[error("frequency grids differ ({left} vs {right} points or differing frequencies)")]
    FrequencyMismatch { left: usize, right: usize },

    #[error("only networks referenced to {expected} ohms are supported (found {found})")]
    UnsupportedReference { expected: f64, found: Complex64 },

    #[error("network has no frequency points")]
    Empty,

    #[error("frequencies are not strictly increasing")]
    NotIncreasing,
}

/// A frequency-swept N-port network (operations require N = 2)
#[derive(Debug, Clone)]
pub struct Network {
    /// Frequency data
    pub frequency: Frequency,
    /// S-parameter data [nfreq, nports, nports]
    pub s: Array3<Complex64>,
    /// Reference impedance (per port)
    pub z0: Array1<Complex64>,
    /// Comments
    pub comments: Vec<String>,
}

impl Network {
    /// Create a new Network from S-parameters
    pub fn new(frequency: Frequency, s: Array3<Complex64>, z0: Array1<Complex64>) -> Self {
        Self {
            frequency,
            s,
            z0,
            comments: Vec::new(),
        }
    }

    /// Create from a Touchstone file
    pub fn from_touchstone<P: AsRef<Path>>(path: P) -> Result<Self, TouchstoneError> {
        let ts = Touchstone::from_file(path)?;
        Ok(Self::from_touchstone_data(ts))
    }

    /// Create from Touchstone content string
    ///
    /// # Arguments
    /// * `content` - Touchstone file content as string
    /// * `nports` - Number of ports (normally taken from the `.sNp` extension)
    pub fn from_touchstone_content(content: &str, nports: usize) -> Result<Self, TouchstoneError> {
        let ts = Touchstone::from_str(content, nports)?;
        Ok(Self::from_touchstone_data(ts))
    }

    fn from_touchstone_data(ts: Touchstone) -> Self {
        let nfreq = ts.nfreq();
        let nports = ts.nports;

        let s = Array3::from_shape_fn((nfreq, nports, nports), |(f, i, j)| ts.s[f][i][j]);
        let z0 = Array1::from_vec(ts.z0.iter().map(|&x| Complex64::new(x, 0.0)).collect());

        Self {
            frequency: ts.frequency,
            s,
            z0,
            comments: ts.comments,
        }
    }

    /// Get the number of ports
    #[inline]
    pub fn nports(&self) -> usize {
        self.s.shape()[1]
    }

    /// Get the number of frequency points
    #[inline]
    pub fn nfreq(&self) -> usize {
        self.s.shape()[0]
    }

    /// Reference impedance of port 1 (real part)
    #[inline]
    pub fn reference_impedance(&self) -> f64 {
        self.z0.iter().next().map(|z| z.re).unwrap_or(crate::constants::Z0)
    }

    /// Fail unless this is a 2-port network
    pub fn check_two_port(&self) -> Result<(), NetworkError> {
        match self.nports() {
            2 => Ok(()),
            n => Err(NetworkError::NotTwoPort(n)),
        }
    }

    /// Fail unless every port is referenced to exactly `z0` ohms
    pub fn check_reference(&self, z0: f64) -> Result<(), NetworkError> {
        let expected = Complex64::new(z0, 0.0);
        match self.z0.iter().find(|&&z| z != expected) {
            Some(&found) => Err(NetworkError::UnsupportedReference {
                expected: z0,
                found,
            }),
            None => Ok(()),
        }
    }

    /// Fail unless `other` samples the same frequency grid
    pub fn check_same_grid(&self, other: &Network) -> Result<(), NetworkError> {
        if self.frequency.same_grid(&other.frequency) {
            Ok(())
        } else {
            Err(NetworkError::FrequencyMismatch {
                left: self.nfreq(),
                right: other.nfreq(),
            })
        }
    }

    /// Checks applied to every network entering the operation stack
    pub fn validate(&self, z0: f64) -> Result<(), NetworkError> {
        self.check_two_port()?;
        if self.nfreq() == 0 {
            return Err(NetworkError::Empty);
        }
        if !self.frequency.is_increasing() {
            return Err(NetworkError::NotIncreasing);
        }
        self.check_reference(z0)
    }
}
