//! Network operations
//!
//! Cascading and de-embedding in the ABCD domain, port flipping and the
//! in-place per-frequency transform used by the topology operations.

use ndarray::Array2;
use num_complex::Complex64;

use super::core::{Network, NetworkError};
use crate::math::matrix_ops::{extract_freq_slice, invert_2x2, map_per_freq, mul_2x2, two_port};
use crate::math::transforms::{abcd2s, s2abcd};

impl Network {
    /// Cascade with another network (self ** other)
    ///
    /// Connects port 2 of self to port 1 of other. Both networks must be
    /// 2-ports on the same frequency grid.
    pub fn cascade(&self, other: &Network) -> Result<Network, NetworkError> {
        self.check_two_port()?;
        other.check_two_port()?;
        self.check_same_grid(other)?;

        let z0 = self.reference_impedance();
        let s = map_per_freq(&self.s, |f, s_a| {
            let s_b = extract_freq_slice(&other.s, f);
            abcd2s(&mul_2x2(&s2abcd(s_a, z0), &s2abcd(&s_b, z0)), z0)
        });

        Ok(Network::new(self.frequency.clone(), s, self.z0.clone()))
    }

    /// Inverse network for de-embedding
    ///
    /// The ABCD matrix at each frequency is inverted, so that
    /// `a.cascade(&a.inv())` is a zero-length thru. Singular points come back
    /// as NaN entries.
    pub fn inv(&self) -> Result<Network, NetworkError> {
        self.check_two_port()?;

        let z0 = self.reference_impedance();
        let s = map_per_freq(&self.s, |_, s_f| abcd2s(&invert_2x2(&s2abcd(s_f, z0)), z0));

        Ok(Network::new(self.frequency.clone(), s, self.z0.clone()))
    }

    /// Remove a trailing network: self ** inv(trailing)
    pub fn deembed(&self, trailing: &Network) -> Result<Network, NetworkError> {
        self.cascade(&trailing.inv()?)
    }

    /// Remove a leading network: inv(leading) ** self
    pub fn ideembed(&self, leading: &Network) -> Result<Network, NetworkError> {
        leading.inv()?.cascade(self)
    }

    /// Flip the ports of a 2-port network (swap port 1 and port 2)
    pub fn flipped(&self) -> Result<Network, NetworkError> {
        self.check_two_port()?;

        let s = map_per_freq(&self.s, |_, m| two_port(m[[1, 1]], m[[1, 0]], m[[0, 1]], m[[0, 0]]));
        let mut z0 = self.z0.clone();
        z0.swap(0, 1);

        Ok(Network::new(self.frequency.clone(), s, z0))
    }

    /// Replace the S-matrix at every frequency with `op(freq_hz, s)`
    ///
    /// Frequency ordering is preserved.
    pub fn map_two_port<F>(&mut self, mut op: F) -> Result<(), NetworkError>
    where
        F: FnMut(f64, &Array2<Complex64>) -> Array2<Complex64>,
    {
        self.check_two_port()?;
        let freqs = self.frequency.f();
        self.s = map_per_freq(&self.s, |i, m| op(freqs[i], m));
        Ok(())
    }
}
