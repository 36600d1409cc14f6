//! Network I/O functions
//!
//! Converts a Network to Touchstone data and writes it out.

use ndarray::Axis;
use std::path::Path;

use super::core::Network;
use crate::touchstone::{SParamFormat, Touchstone, TouchstoneError};

impl Network {
    /// Write the network to a Touchstone file
    ///
    /// # Example
    /// ```ignore
    /// let ntwk = Network::from_touchstone("input.s2p")?;
    /// ntwk.write_touchstone("output.s2p", SParamFormat::MA)?;
    /// ```
    pub fn write_touchstone<P: AsRef<Path>>(
        &self,
        path: P,
        format: SParamFormat,
    ) -> Result<(), TouchstoneError> {
        self.to_touchstone(format).write(path)
    }

    /// Touchstone text for this network
    pub fn to_touchstone_contents(&self, format: SParamFormat) -> String {
        self.to_touchstone(format).to_string()
    }

    /// Convert Network to Touchstone data
    pub fn to_touchstone(&self, format: SParamFormat) -> Touchstone {
        let s = self
            .s
            .axis_iter(Axis(0))
            .map(|m| m.rows().into_iter().map(|row| row.to_vec()).collect())
            .collect();

        Touchstone {
            nports: self.nports(),
            frequency: self.frequency.clone(),
            s,
            z0: self.z0.iter().map(|z| z.re).collect(),
            comments: self.comments.clone(),
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{Frequency, FrequencyUnit};
    use ndarray::{Array1, Array3};
    use num_complex::Complex64;

    #[test]
    fn test_to_touchstone() {
        let freq = Frequency::new(1.0, 2.0, 2, FrequencyUnit::GHz);
        let mut s = Array3::<Complex64>::zeros((2, 2, 2));
        s[[0, 0, 0]] = Complex64::new(0.1, 0.0);
        s[[0, 1, 0]] = Complex64::new(0.9, 0.0);
        s[[1, 0, 1]] = Complex64::new(0.0, 0.2);

        let z0 = Array1::from_elem(2, Complex64::new(50.0, 0.0));
        let ntwk = Network::new(freq, s, z0);

        let ts = ntwk.to_touchstone(SParamFormat::RI);
        assert_eq!(ts.nports, 2);
        assert_eq!(ts.nfreq(), 2);
        assert_eq!(ts.z0, vec![50.0, 50.0]);
        assert_eq!(ts.s[0][1][0].re, 0.9);
        assert_eq!(ts.s[1][0][1].im, 0.2);
    }

    #[test]
    fn test_contents_reload() {
        let content = "# MHZ S MA R 50\n100 0.5 -45 4.0 120 0.05 60 0.6 -30\n";
        let ntwk = Network::from_touchstone_content(content, 2).unwrap();
        let text = ntwk.to_touchstone_contents(SParamFormat::MA);
        let back = Network::from_touchstone_content(&text, 2).unwrap();

        assert_eq!(back.frequency, ntwk.frequency);
        assert!((back.s[[0, 1, 0]] - ntwk.s[[0, 1, 0]]).norm() < 1e-6);
    }
}
