//! Column formatting for the reports
//!
//! Each helper renders one value into a fixed-width column. NaN (and, for
//! element values, infinity) renders as `-`.

use cascade_core::math::conversions::{complex_2_degree, power_2_db};
use num_complex::Complex64;
use std::f64::consts::PI;

/// printf-style `%.<precision>g`
pub fn g(x: f64, precision: usize) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let p = precision.max(1);
    let sci = format!("{:.*e}", p - 1, x);
    // Exponent after rounding to p significant digits
    let exp: i32 = match sci.split_once('e') {
        Some((_, e)) => e.parse().unwrap_or(0),
        None => 0,
    };

    if exp < -4 || exp >= p as i32 {
        let (mantissa, _) = sci.split_once('e').unwrap_or((&sci, ""));
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        strip_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Frequency column, left aligned
pub fn freq(mhz: f64) -> String {
    format!("{:<5}", g(mhz, 6))
}

/// Polar pair: magnitude and angle in degrees
pub fn polar(z: Complex64) -> String {
    format!("{:>10} {:>7.2}", g(z.norm(), 4), complex_2_degree(z))
}

/// Reflection coefficient as a polar pair, `-` when undefined
pub fn reflection(z: Complex64) -> String {
    if z.is_nan() {
        format!("{:>18}", "-")
    } else {
        polar(z)
    }
}

/// Complex impedance, e.g. `25.3-12.1j`
pub fn complex(z: Complex64) -> String {
    if z.is_nan() {
        return format!("{:>16}", "-");
    }
    let sign = if z.im < 0.0 || (z.im == 0.0 && z.im.is_sign_negative()) {
        '-'
    } else {
        '+'
    };
    let text = format!("{}{}{}j", g(z.re, 4), sign, g(z.im.abs(), 4));
    format!("{:>16}", text)
}

/// Power ratio in dB
pub fn db(ratio: f64) -> String {
    fixed(power_2_db(ratio))
}

/// Two decimals, six wide
pub fn fixed(x: f64) -> String {
    if x.is_nan() {
        format!("{:>6}", "-")
    } else {
        format!("{:6.2}", x)
    }
}

/// Four significant digits, eight wide
pub fn general(x: f64) -> String {
    if x.is_nan() {
        format!("{:>8}", "-")
    } else {
        format!("{:>8}", g(x, 4))
    }
}

/// Reactance `x` (ohms) at `f` (Hz) as an inductor or capacitor value
pub fn element(x: f64, f: f64) -> String {
    let w = 2.0 * PI * f;
    let value = if x < 0.0 { 1.0 / (w * x) } else { x / w };
    if value.is_nan() || value.is_infinite() {
        return format!("{:>8}", "-");
    }
    if value == 0.0 {
        return format!("{:>8}", "0");
    }
    format!("{:>8}", notation(value, if x < 0.0 { 'F' } else { 'H' }))
}

/// Engineering notation with an SI prefix and unit, e.g. `  2.653pF`
pub fn notation(x: f64, unit: char) -> String {
    const SUFFIX: [&str; 9] = ["f", "p", "n", "u", "m", "", "k", "M", "G"];

    let exp = x.abs().log10().floor();
    let mant = round_to(x / 10f64.powf(exp), 4);
    let p = (exp / 3.0).floor() as i32;
    let value = (mant * 10f64.powf(exp)) / 10f64.powi(3 * p);

    match usize::try_from(p + 5).ok().and_then(|i| SUFFIX.get(i)) {
        Some(suffix) => format!("{:>6}{}{}", g(value.abs(), 4), suffix, unit),
        None => format!("{:>6}{}", g(x.abs(), 4), unit),
    }
}

fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_g_matches_printf() {
        assert_eq!(g(100.0, 6), "100");
        assert_eq!(g(1234.5678, 4), "1235");
        assert_eq!(g(0.5, 4), "0.5");
        assert_eq!(g(0.0001234, 4), "0.0001234");
        assert_eq!(g(0.00001234, 4), "1.234e-05");
        assert_eq!(g(12346.0, 4), "1.235e+04");
        assert_eq!(g(9999.6, 4), "1e+04");
        assert_eq!(g(-2.5, 4), "-2.5");
        assert_eq!(g(1500.0, 6), "1500");
    }

    #[test]
    fn test_columns() {
        assert_eq!(freq(100.0), "100  ");
        assert_eq!(fixed(f64::NAN), "     -");
        assert_eq!(db(100.0), " 20.00");
        assert_eq!(db(-1.0), "     -");
        assert_eq!(general(1.5), "     1.5");
        assert_eq!(complex(Complex64::new(25.0, -3.5)), "         25-3.5j");
        assert_eq!(complex(Complex64::new(f64::NAN, 0.0)).trim(), "-");
        assert_eq!(polar(Complex64::new(0.0, 2.0)), "         2   90.00");
        assert_eq!(reflection(Complex64::new(0.0, 2.0)), polar(Complex64::new(0.0, 2.0)));
        assert_eq!(reflection(Complex64::new(f64::NAN, f64::NAN)), format!("{:>18}", "-"));
    }

    #[test]
    fn test_element_notation() {
        // 50 ohm at 1 GHz: L = 7.958 nH
        assert_eq!(element(50.0, 1e9), " 7.958nH");
        // -50 ohm at 1 GHz: C = 3.183 pF
        assert_eq!(element(-50.0, 1e9), " 3.183pF");
        assert_eq!(element(f64::NAN, 1e9), "       -");
        assert_eq!(element(0.0, 1e9), "       0");
    }
}
