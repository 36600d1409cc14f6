//! Touchstone file parser
//!
//! Implements parsing of version 1 Touchstone files. Only S-parameter data
//! for one- and two-port networks is accepted.

use num_complex::Complex64;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::constants::Z0;
use crate::frequency::{Frequency, FrequencyUnit};
use crate::math::conversions::{db_2_magnitude, magdeg_2_reim};

/// Touchstone parsing errors
#[derive(Error, Debug)]
pub enum TouchstoneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid option line: {0}")]
    InvalidOption(String),

    #[error("Invalid file extension: expected .s1p or .s2p")]
    InvalidExtension,

    #[error("Unsupported port count: {0}")]
    UnsupportedPorts(usize),
}

/// S-parameter data format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SParamFormat {
    RI, // Real-Imaginary
    #[default]
    MA, // Magnitude-Angle (degrees)
    DB, // dB-Angle (degrees)
}

impl SParamFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "RI" => Some(SParamFormat::RI),
            "MA" => Some(SParamFormat::MA),
            "DB" => Some(SParamFormat::DB),
            _ => None,
        }
    }

    /// Option-line spelling
    pub fn label(&self) -> &'static str {
        match self {
            SParamFormat::RI => "RI",
            SParamFormat::MA => "MA",
            SParamFormat::DB => "DB",
        }
    }

    /// Decode one value pair into a complex number
    pub fn decode(&self, v1: f64, v2: f64) -> Complex64 {
        match self {
            SParamFormat::RI => Complex64::new(v1, v2),
            SParamFormat::MA => magdeg_2_reim(v1, v2),
            SParamFormat::DB => magdeg_2_reim(db_2_magnitude(v1), v2),
        }
    }
}

/// Contents of the option line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionLine {
    pub unit: FrequencyUnit,
    pub format: SParamFormat,
    pub z0: f64,
}

impl Default for OptionLine {
    fn default() -> Self {
        Self {
            unit: FrequencyUnit::GHz,
            format: SParamFormat::MA,
            z0: Z0,
        }
    }
}

/// Touchstone data container
#[derive(Debug, Clone)]
pub struct Touchstone {
    /// Number of ports
    pub nports: usize,
    /// Frequency data
    pub frequency: Frequency,
    /// S-parameter matrices: [nfreq][nports][nports]
    pub s: Vec<Vec<Vec<Complex64>>>,
    /// Reference impedance (per port)
    pub z0: Vec<f64>,
    /// Comments from the file
    pub comments: Vec<String>,
    /// Data format
    pub format: SParamFormat,
}

impl Touchstone {
    /// Parse a Touchstone file, taking the port count from the extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TouchstoneError> {
        let path = path.as_ref();

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or(TouchstoneError::InvalidExtension)?;
        let nports = Self::parse_extension(ext)?;

        let file = File::open(path)?;
        Self::parse(BufReader::new(file), nports)
    }

    /// Parse extension to get number of ports
    fn parse_extension(ext: &str) -> Result<usize, TouchstoneError> {
        let ext_lower = ext.to_lowercase();
        if ext_lower.len() > 2 && ext_lower.starts_with('s') && ext_lower.ends_with('p') {
            ext_lower[1..ext_lower.len() - 1]
                .parse::<usize>()
                .map_err(|_| TouchstoneError::InvalidExtension)
        } else {
            Err(TouchstoneError::InvalidExtension)
        }
    }

    /// Parse from string content
    ///
    /// # Arguments
    /// * `content` - Touchstone file content as string
    /// * `nports` - Number of ports (normally derived from the file extension)
    ///
    /// # Example
    /// ```
    /// use cascade_core::touchstone::Touchstone;
    /// let content = "# GHz S RI R 50\n1.0 0.1 0.0 0.9 0.0 0.9 0.0 0.1 0.0";
    /// let ts = Touchstone::from_str(content, 2).unwrap();
    /// assert_eq!(ts.nfreq(), 1);
    /// ```
    pub fn from_str(content: &str, nports: usize) -> Result<Self, TouchstoneError> {
        Self::parse(std::io::Cursor::new(content), nports)
    }

    /// Parse from a reader
    fn parse<R: BufRead>(reader: R, nports: usize) -> Result<Self, TouchstoneError> {
        if !(1..=2).contains(&nports) {
            return Err(TouchstoneError::UnsupportedPorts(nports));
        }
        let mut state = ParserState::new(nports);

        for (idx, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let lineno = idx + 1;

            // Anything after '!' is a comment, on any line
            let (data, comment) = match line.find('!') {
                Some(pos) => (&line[..pos], Some(line[pos + 1..].trim())),
                None => (line.as_str(), None),
            };
            if let Some(c) = comment {
                state.comments.push(c.to_string());
            }

            let trimmed = data.trim();
            if trimmed.is_empty() {
                continue;
            }

            if trimmed.starts_with('[') {
                return Err(TouchstoneError::InvalidOption(format!(
                    "version 2 keyword not supported: {}",
                    trimmed
                )));
            }

            if trimmed.starts_with('#') {
                // Only the first option line counts
                if !state.option_parsed {
                    state.options = Self::parse_option_line(trimmed)?;
                    state.option_parsed = true;
                }
                continue;
            }

            state.parse_data_line(trimmed, lineno)?;
        }

        state.finalize()
    }

    /// Parse the option line (# GHz S MA R 50)
    pub fn parse_option_line(line: &str) -> Result<OptionLine, TouchstoneError> {
        let parts: Vec<&str> = line.trim_start_matches('#').split_whitespace().collect();
        let mut options = OptionLine::default();

        let mut i = 0;
        while i < parts.len() {
            let part = parts[i].to_uppercase();

            if let Some(unit) = FrequencyUnit::from_str(&part) {
                options.unit = unit;
            } else if let Some(fmt) = SParamFormat::from_str(&part) {
                options.format = fmt;
            } else if part == "S" {
                // S is the only parameter type carried through the stack
            } else if matches!(part.as_str(), "Y" | "Z" | "G" | "H") {
                return Err(TouchstoneError::InvalidOption(format!(
                    "{} parameters not supported",
                    part
                )));
            } else if part == "R" {
                let value = parts.get(i + 1).ok_or_else(|| {
                    TouchstoneError::InvalidOption("missing reference impedance".to_string())
                })?;
                options.z0 = value.parse::<f64>().map_err(|_| {
                    TouchstoneError::InvalidOption(format!("bad reference impedance: {}", value))
                })?;
                i += 1;
            } else {
                return Err(TouchstoneError::InvalidOption(format!(
                    "unknown option: {}",
                    parts[i]
                )));
            }

            i += 1;
        }

        Ok(options)
    }

    /// Get the number of frequency points
    pub fn nfreq(&self) -> usize {
        self.s.len()
    }
}

/// Internal parser state
struct ParserState {
    nports: usize,
    options: OptionLine,
    option_parsed: bool,
    comments: Vec<String>,

    // Data accumulation
    frequencies: Vec<f64>,
    s_data: Vec<Vec<Vec<Complex64>>>,
    current_freq_data: Vec<f64>,
    /// Line on which the pending record started
    record_line: usize,
}

impl ParserState {
    fn new(nports: usize) -> Self {
        Self {
            nports,
            options: OptionLine::default(),
            option_parsed: false,
            comments: Vec::new(),
            frequencies: Vec::new(),
            s_data: Vec::new(),
            current_freq_data: Vec::new(),
            record_line: 0,
        }
    }

    /// Values making up one frequency record
    fn record_len(&self) -> usize {
        1 + 2 * self.nports * self.nports
    }

    fn parse_data_line(&mut self, line: &str, lineno: usize) -> Result<(), TouchstoneError> {
        if self.current_freq_data.is_empty() {
            self.record_line = lineno;
        }
        for part in line.split_whitespace() {
            let val = part.parse::<f64>().map_err(|_| TouchstoneError::Parse {
                line: lineno,
                message: format!("invalid number '{}'", part),
            })?;
            self.current_freq_data.push(val);
        }

        let expected = self.record_len();
        while self.current_freq_data.len() >= expected {
            self.take_record(lineno)?;
            if !self.current_freq_data.is_empty() {
                self.record_line = lineno;
            }
        }
        Ok(())
    }

    fn take_record(&mut self, lineno: usize) -> Result<(), TouchstoneError> {
        let expected = self.record_len();
        let record: Vec<f64> = self.current_freq_data.drain(0..expected).collect();

        let freq = record[0] * self.options.unit.multiplier();
        if let Some(&last) = self.frequencies.last() {
            if freq <= last {
                return Err(TouchstoneError::Parse {
                    line: lineno,
                    message: "frequencies must be strictly increasing".to_string(),
                });
            }
        }
        self.frequencies.push(freq);

        let n = self.nports;
        let mut s_matrix = vec![vec![Complex64::new(0.0, 0.0); n]; n];
        for (k, pair) in record[1..].chunks_exact(2).enumerate() {
            let c = self.options.format.decode(pair[0], pair[1]);
            // Two-port records are column-major: S11 S21 S12 S22
            let (i, j) = if n == 2 { (k % 2, k / 2) } else { (k / n, k % n) };
            s_matrix[i][j] = c;
        }
        self.s_data.push(s_matrix);
        Ok(())
    }

    fn finalize(self) -> Result<Touchstone, TouchstoneError> {
        if !self.current_freq_data.is_empty() {
            return Err(TouchstoneError::Parse {
                line: self.record_line,
                message: format!(
                    "incomplete record: {} of {} values",
                    self.current_freq_data.len(),
                    self.record_len()
                ),
            });
        }

        let unit = self.options.unit;
        let mult = unit.multiplier();
        let f_unit: Vec<f64> = self.frequencies.iter().map(|&f| f / mult).collect();

        Ok(Touchstone {
            nports: self.nports,
            frequency: Frequency::from_f(f_unit, unit),
            s: self.s_data,
            z0: vec![self.options.z0; self.nports],
            comments: self.comments,
            format: self.options.format,
        })
    }
}
