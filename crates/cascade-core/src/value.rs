//! Element value literals
//!
//! Operands of the element operations are either a complex impedance
//! (`50`, `10+5j`, `-20j`, polar `65/90`) or a component value with a unit
//! suffix: `h` for henry, `f` for farad, optionally with an SI prefix
//! (`10e-9h`, `10nh`, `2.2pf`).

use num_complex::Complex64;
use std::f64::consts::PI;
use std::str::FromStr;
use thiserror::Error;

use crate::math::conversions::magdeg_2_reim;

/// Element literal errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("invalid complex number '{0}'")]
    InvalidComplex(String),

    #[error("invalid component value '{0}'")]
    InvalidComponent(String),
}

/// A lumped element value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementValue {
    /// Frequency-independent impedance (ohms)
    Impedance(Complex64),
    /// Inductance (henry)
    Inductance(f64),
    /// Capacitance (farad)
    Capacitance(f64),
}

impl ElementValue {
    /// Impedance of the element at `freq` (Hz)
    pub fn impedance_at(&self, freq: f64) -> Complex64 {
        let w = 2.0 * PI * freq;
        match *self {
            ElementValue::Impedance(z) => z,
            ElementValue::Inductance(l) => Complex64::new(0.0, w * l),
            ElementValue::Capacitance(c) => Complex64::new(0.0, -1.0 / (w * c)),
        }
    }
}

impl FromStr for ElementValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unit = s.chars().last().map(|c| c.to_ascii_lowercase());
        match unit {
            Some('h') => parse_component(&s[..s.len() - 1])
                .map(ElementValue::Inductance)
                .ok_or_else(|| ValueError::InvalidComponent(s.to_string())),
            Some('f') => parse_component(&s[..s.len() - 1])
                .map(ElementValue::Capacitance)
                .ok_or_else(|| ValueError::InvalidComponent(s.to_string())),
            _ => parse_complex(s).map(ElementValue::Impedance),
        }
    }
}

/// Parse a real component value with an optional SI prefix
fn parse_component(s: &str) -> Option<f64> {
    let scale = match s.chars().last()? {
        'f' => 1e-15,
        'p' => 1e-12,
        'n' => 1e-9,
        'u' => 1e-6,
        'm' => 1e-3,
        'k' => 1e3,
        _ => 1.0,
    };
    let digits = if scale == 1.0 { s } else { &s[..s.len() - 1] };
    digits.parse::<f64>().ok().map(|v| v * scale)
}

/// Parse a complex literal in rectangular (`a+bj`) or polar (`mag/deg`) form
pub fn parse_complex(s: &str) -> Result<Complex64, ValueError> {
    let s = s.trim();
    let invalid = || ValueError::InvalidComplex(s.to_string());

    if let Some((mag, deg)) = s.split_once('/') {
        let mag: f64 = mag.trim().parse().map_err(|_| invalid())?;
        let deg: f64 = deg.trim().parse().map_err(|_| invalid())?;
        return Ok(magdeg_2_reim(mag, deg));
    }

    let body = match s.strip_suffix(['j', 'J', 'i']) {
        Some(body) => body,
        None => return s.parse::<f64>().map(|re| Complex64::new(re, 0.0)).map_err(|_| invalid()),
    };

    // Split at the last sign that is not part of an exponent
    let bytes = body.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'));

    let (re, im) = match split {
        Some(i) => (body[..i].trim(), body[i..].trim()),
        None => ("", body.trim()),
    };

    let re = if re.is_empty() {
        0.0
    } else {
        re.parse::<f64>().map_err(|_| invalid())?
    };
    let im = match im {
        "" | "+" => 1.0,
        "-" => -1.0,
        other => other.parse::<f64>().map_err(|_| invalid())?,
    };

    Ok(Complex64::new(re, im))
}
