//! Report writers for the final network
//!
//! Frequencies are printed in MHz regardless of the network's own unit.

use std::io::{self, Write};

use cascade_core::math::matching::LSection;
use cascade_core::{DeviceMatch, Network, OutputMode, SParamFormat, Terminations};

use crate::format::{complex, db, element, fixed, freq, general, polar, reflection};

/// Render `ntwk` in the selected mode
///
/// `terminations` only affects the matching reports.
pub fn write_network<W: Write>(
    out: &mut W,
    ntwk: &Network,
    mode: OutputMode,
    terminations: &Terminations,
) -> io::Result<()> {
    match mode {
        OutputMode::SParameters => write_sparam(out, ntwk),
        OutputMode::Abcd => write_abcd(out, ntwk),
        OutputMode::Summary => write_summary(out, ntwk),
        OutputMode::Matching => write_match(out, ntwk, terminations),
        OutputMode::MatchingGamma => write_match_gamma(out, ntwk, terminations),
        OutputMode::Touchstone => {
            write!(out, "{}", ntwk.to_touchstone_contents(SParamFormat::MA))
        }
    }
}

fn mhz(f: f64) -> String {
    freq(f / 1e6)
}

/// S-parameters (mag/deg) with GUM, K and mu in a trailing comment
pub fn write_sparam<W: Write>(out: &mut W, ntwk: &Network) -> io::Result<()> {
    writeln!(out, "# MHZ S MA R 50")?;
    writeln!(
        out,
        "! MHZ           S11                S21                S12                S22      !    GUM        K       MU"
    )?;
    for (i, g) in ntwk.gain_summary().iter().enumerate() {
        let s = |r: usize, c: usize| polar(ntwk.s[[i, r, c]]);
        writeln!(
            out,
            "{} {} {} {} {} ! {} {} {}",
            mhz(g.frequency),
            s(0, 0),
            s(1, 0),
            s(0, 1),
            s(1, 1),
            db(g.gum),
            general(g.k),
            general(g.mu)
        )?;
    }
    Ok(())
}

/// ABCD matrices (mag/deg)
pub fn write_abcd<W: Write>(out: &mut W, ntwk: &Network) -> io::Result<()> {
    writeln!(
        out,
        "MHZ             A                  B                  C                  D"
    )?;
    let abcd = ntwk.abcd();
    for (i, &f) in ntwk.frequency.f().iter().enumerate() {
        let m = |r: usize, c: usize| polar(abcd[[i, r, c]]);
        writeln!(out, "{} {} {} {} {}", mhz(f), m(0, 0), m(0, 1), m(1, 0), m(1, 1))?;
    }
    Ok(())
}

/// Impedances, gains (dB), GU and stability factors
pub fn write_summary<W: Write>(out: &mut W, ntwk: &Network) -> io::Result<()> {
    writeln!(
        out,
        "MHZ           ZIN             ZOUT         GUI    S21    GUO    GUM   GMSG   GMAG     GU        K       MU"
    )?;
    for g in ntwk.gain_summary() {
        writeln!(
            out,
            "{} {} {} {} {} {} {} {} {} {} {} {}",
            mhz(g.frequency),
            complex(g.zin),
            complex(g.zout),
            db(g.gui),
            db(g.s21),
            db(g.guo),
            db(g.gum),
            db(g.gmsg),
            db(g.gmag),
            fixed(g.gu),
            general(g.k),
            general(g.mu)
        )?;
    }
    Ok(())
}

/// Match terminations as impedances and the L-sections realizing them
///
/// Two rows per frequency, one per solution branch.
pub fn write_match<W: Write>(
    out: &mut W,
    ntwk: &Network,
    terminations: &Terminations,
) -> io::Result<()> {
    writeln!(
        out,
        "MHZ          50 |--            50 --|             ZS              ZIN              ZOUT              ZL              |--- 50           ---| 50"
    )?;
    match_rows(out, ntwk, terminations, |m| {
        format!("{} {} {} {}", complex(m.zs), complex(m.zin), complex(m.zout), complex(m.zl))
    })
}

/// Match terminations as reflection coefficients (mag/deg)
pub fn write_match_gamma<W: Write>(
    out: &mut W,
    ntwk: &Network,
    terminations: &Terminations,
) -> io::Result<()> {
    writeln!(
        out,
        "MHZ          50 |--            50 --|                GS                GIN               GOUT                 GL |--- 50           ---| 50"
    )?;
    match_rows(out, ntwk, terminations, |m| {
        format!(
            "{} {} {} {}",
            reflection(m.gs),
            reflection(m.gin),
            reflection(m.gout),
            reflection(m.gl)
        )
    })
}

fn match_rows<W, F>(
    out: &mut W,
    ntwk: &Network,
    terminations: &Terminations,
    terms: F,
) -> io::Result<()>
where
    W: Write,
    F: Fn(&DeviceMatch) -> String,
{
    for m in ntwk.device_match_terminated(terminations) {
        let f = m.frequency;
        let pair = |x: &LSection| format!("{} {}", element(x.x1, f), element(x.x2, f));
        for branch in 0..2 {
            writeln!(
                out,
                "{} {} {} {} {} {}",
                mhz(f),
                pair(&m.input[branch]),
                pair(&m.input_reversed[branch]),
                terms(&m),
                pair(&m.output[branch]),
                pair(&m.output_reversed[branch])
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_core::{Frequency, FrequencyUnit, Termination};
    use ndarray::{Array1, Array3};
    use num_complex::Complex64;

    fn device() -> Network {
        let freq = Frequency::new(500.0, 600.0, 2, FrequencyUnit::MHz);
        let s = Array3::from_shape_fn((2, 2, 2), |(_, i, j)| {
            let (mag, deg): (f64, f64) = match (i, j) {
                (0, 0) => (0.45, 150.0),
                (0, 1) => (0.01, -10.0),
                (1, 0) => (2.05, 10.0),
                _ => (0.4, -150.0),
            };
            Complex64::from_polar(mag, deg.to_radians())
        });
        Network::new(freq, s, Array1::from_elem(2, Complex64::new(50.0, 0.0)))
    }

    fn render_with(mode: OutputMode, terminations: &Terminations) -> String {
        let mut buf = Vec::new();
        write_network(&mut buf, &device(), mode, terminations).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn render(mode: OutputMode) -> String {
        render_with(mode, &Terminations::default())
    }

    #[test]
    fn test_sparam_report() {
        let text = render(OutputMode::SParameters);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "# MHZ S MA R 50");
        assert!(lines[2].starts_with("500  "));
        assert!(lines[2].contains("2.05"));
        assert!(lines[3].starts_with("600  "));
    }

    #[test]
    fn test_match_report_has_two_rows_per_frequency() {
        let text = render(OutputMode::Matching);
        assert_eq!(text.lines().count(), 1 + 2 * 2);
    }

    #[test]
    fn test_gamma_match_report() {
        let text = render(OutputMode::MatchingGamma);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 2 * 2);
        assert!(lines[0].contains("GS") && lines[0].contains("GOUT"));
        // Same L-section columns as the impedance view
        let z_text = render(OutputMode::Matching);
        let z_row = z_text.lines().nth(1).unwrap();
        let head = |row: &str| row.split_whitespace().take(5).collect::<Vec<_>>().join(" ");
        assert_eq!(head(lines[1]), head(z_row));
    }

    #[test]
    fn test_fixed_source_changes_match_report() {
        let gs = Complex64::from_polar(0.475, 166f64.to_radians());
        let fixed_source = Terminations {
            source: Some(Termination::Gamma(gs)),
            load: None,
        };
        let text = render_with(OutputMode::MatchingGamma, &fixed_source);
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains(&polar(gs)));
        assert_ne!(text, render(OutputMode::MatchingGamma));
    }

    #[test]
    fn test_summary_and_abcd_reports() {
        assert_eq!(render(OutputMode::Summary).lines().count(), 3);
        assert_eq!(render(OutputMode::Abcd).lines().count(), 3);
    }

    #[test]
    fn test_touchstone_report_reloads() {
        let text = render(OutputMode::Touchstone);
        let back = Network::from_touchstone_content(&text, 2).unwrap();
        assert_eq!(back.nfreq(), 2);
    }
}
