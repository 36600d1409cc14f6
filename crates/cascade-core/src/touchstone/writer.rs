//! Touchstone file writer
//!
//! Writes S-parameter data in the same version 1 dialect the parser reads.

use num_complex::Complex64;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::parser::{SParamFormat, Touchstone, TouchstoneError};
use crate::constants::Z0;
use crate::math::conversions::{complex_2_degree, magnitude_2_db};

impl fmt::Display for Touchstone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        if self.write_to(&mut buf).is_err() {
            return Err(fmt::Error);
        }
        write!(f, "{}", String::from_utf8_lossy(&buf))
    }
}

impl Touchstone {
    /// Write to a Touchstone file
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), TouchstoneError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write to a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), TouchstoneError> {
        for comment in &self.comments {
            writeln!(writer, "! {}", comment)?;
        }

        writeln!(writer, "{}", self.option_line())?;

        let f_scaled = self.frequency.f_scaled();
        for (freq, s_matrix) in f_scaled.iter().zip(self.s.iter()) {
            write!(writer, "{:<12}", freq)?;
            for c in self.ordered(s_matrix) {
                let (v1, v2) = self.format_complex(c);
                write!(writer, " {:>12.8} {:>12.6}", v1, v2)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    /// Option line describing this data, e.g. `# MHZ S MA R 50`
    pub fn option_line(&self) -> String {
        format!(
            "# {} S {} R {}",
            self.frequency.unit().label(),
            self.format.label(),
            self.z0.first().copied().unwrap_or(Z0)
        )
    }

    /// Matrix entries in file order (S11 S21 S12 S22 for two-ports)
    fn ordered(&self, s_matrix: &[Vec<Complex64>]) -> Vec<Complex64> {
        let n = self.nports;
        if n == 2 {
            vec![s_matrix[0][0], s_matrix[1][0], s_matrix[0][1], s_matrix[1][1]]
        } else {
            s_matrix.iter().flat_map(|row| row.iter().copied()).collect()
        }
    }

    fn format_complex(&self, c: Complex64) -> (f64, f64) {
        match self.format {
            SParamFormat::RI => (c.re, c.im),
            SParamFormat::MA => (c.norm(), complex_2_degree(c)),
            SParamFormat::DB => (magnitude_2_db(c.norm()), complex_2_degree(c)),
        }
    }
}
