//! Command tokens
//!
//! Turns the trailing command-line words into typed commands. Operations
//! that read a network from disk are returned as [`Command::Load`] so the
//! caller decides how files are opened; everything else maps directly to a
//! stack [`Operation`], a matching termination or an output mode.

use num_complex::Complex64;
use std::path::PathBuf;

use crate::network::{Network, Termination};
use crate::stack::StackError;
use crate::value::{parse_complex, ElementValue};

/// How the final network is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Touchstone S-parameters with a gain comment per frequency
    #[default]
    SParameters,
    /// ABCD matrices
    Abcd,
    /// Stability and gain table
    Summary,
    /// Match terminations as impedances, with L-section elements
    Matching,
    /// Match terminations as reflection coefficients, with L-section elements
    MatchingGamma,
    /// Plain Touchstone
    Touchstone,
}

/// One stack transition
#[derive(Debug, Clone)]
pub enum Operation {
    Cascade,
    Deembed,
    Ideembed,
    Swap,
    Push(Network),
    Series(ElementValue),
    Shunt(ElementValue),
    Lift(ElementValue),
    CommonBase,
    CommonCollector,
    Flip,
    Copy,
    Pass,
    Block,
    /// Ideal line: |value| is the line impedance, arg the electrical length
    Tline(Complex64),
    OpenStub(Complex64),
    ShortStub(Complex64),
}

impl Operation {
    /// Token spelling, used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Cascade => "cascade",
            Operation::Deembed => "deembed",
            Operation::Ideembed => "ideembed",
            Operation::Swap => "swap",
            Operation::Push(_) => "f",
            Operation::Series(_) => "series",
            Operation::Shunt(_) => "shunt",
            Operation::Lift(_) => "lift",
            Operation::CommonBase => "cbg",
            Operation::CommonCollector => "ccd",
            Operation::Flip => "flip",
            Operation::Copy => "copy",
            Operation::Pass => "pass",
            Operation::Block => "block",
            Operation::Tline(_) => "tline",
            Operation::OpenStub(_) => "open",
            Operation::ShortStub(_) => "short",
        }
    }
}

/// A parsed command-line word (plus its operand, if any)
#[derive(Debug, Clone)]
pub enum Command {
    Mode(OutputMode),
    Load(PathBuf),
    Apply(Operation),
    /// `-gs`/`-zs`: fix the source termination of the matching reports
    SourceTermination(Termination),
    /// `-gl`/`-zl`
    LoadTermination(Termination),
}

/// Parse command words in order
///
/// # Example
/// ```
/// use cascade_core::command::{parse_commands, Command, OutputMode};
/// let cmds = parse_commands(["-series", "10nh", "-s"]).unwrap();
/// assert_eq!(cmds.len(), 2);
/// assert!(matches!(cmds[1], Command::Mode(OutputMode::Summary)));
/// ```
pub fn parse_commands<I, S>(words: I) -> Result<Vec<Command>, StackError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut words = words.into_iter();
    let mut commands = Vec::new();

    while let Some(word) = words.next() {
        let word = word.as_ref();
        let name = word
            .strip_prefix('-')
            .ok_or_else(|| StackError::UnrecognizedOperation(word.to_string()))?;

        let mut operand = || {
            words
                .next()
                .map(|w| w.as_ref().to_string())
                .ok_or_else(|| StackError::MissingOperand(name.to_string()))
        };

        let command = match name {
            "a" => Command::Mode(OutputMode::Abcd),
            "s" | "z" => Command::Mode(OutputMode::Summary),
            "m" => Command::Mode(OutputMode::Matching),
            "g" => Command::Mode(OutputMode::MatchingGamma),
            "n" => Command::Mode(OutputMode::Touchstone),
            "f" => Command::Load(PathBuf::from(operand()?)),
            "cascade" => Command::Apply(Operation::Cascade),
            "deembed" => Command::Apply(Operation::Deembed),
            "ideembed" => Command::Apply(Operation::Ideembed),
            "swap" => Command::Apply(Operation::Swap),
            "cbg" => Command::Apply(Operation::CommonBase),
            "ccd" => Command::Apply(Operation::CommonCollector),
            "flip" => Command::Apply(Operation::Flip),
            "copy" => Command::Apply(Operation::Copy),
            "pass" => Command::Apply(Operation::Pass),
            "block" => Command::Apply(Operation::Block),
            "series" => Command::Apply(Operation::Series(element(name, &operand()?)?)),
            "shunt" => Command::Apply(Operation::Shunt(element(name, &operand()?)?)),
            "lift" => Command::Apply(Operation::Lift(element(name, &operand()?)?)),
            "tline" => Command::Apply(Operation::Tline(complex(name, &operand()?)?)),
            "open" => Command::Apply(Operation::OpenStub(complex(name, &operand()?)?)),
            "short" => Command::Apply(Operation::ShortStub(complex(name, &operand()?)?)),
            "gs" => Command::SourceTermination(Termination::Gamma(complex(name, &operand()?)?)),
            "zs" => Command::SourceTermination(Termination::Impedance(complex(name, &operand()?)?)),
            "gl" => Command::LoadTermination(Termination::Gamma(complex(name, &operand()?)?)),
            "zl" => Command::LoadTermination(Termination::Impedance(complex(name, &operand()?)?)),
            _ => return Err(StackError::UnrecognizedOperation(word.to_string())),
        };
        commands.push(command);
    }

    Ok(commands)
}

fn element(op: &str, text: &str) -> Result<ElementValue, StackError> {
    text.parse().map_err(|source| StackError::InvalidOperand {
        op: op.to_string(),
        source,
    })
}

fn complex(op: &str, text: &str) -> Result<Complex64, StackError> {
    parse_complex(text).map_err(|source| StackError::InvalidOperand {
        op: op.to_string(),
        source,
    })
}
