//! Network operation stack
//!
//! The stack owns every network produced during a run. Operations are applied
//! one at a time; each one computes its result before touching the stack, so
//! a failing operation leaves the stack as it was.

use thiserror::Error;
use tracing::{debug, warn};

use crate::command::Operation;
use crate::constants::Z0;
use crate::network::{Network, NetworkError};
use crate::value::ValueError;

/// Structural errors raised while sequencing operations
#[derive(Error, Debug)]
pub enum StackError {
    #[error("stack underflow: '-{op}' needs {needed} network(s), stack holds {depth}")]
    Underflow {
        op: &'static str,
        needed: usize,
        depth: usize,
    },

    #[error("unrecognized operation '{0}'")]
    UnrecognizedOperation(String),

    #[error("operation '-{0}' requires an operand")]
    MissingOperand(String),

    #[error("invalid operand for '-{op}'")]
    InvalidOperand {
        op: String,
        #[source]
        source: ValueError,
    },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Ordered stack of networks; the last entry is the top
#[derive(Debug, Clone, Default)]
pub struct Stack {
    networks: Vec<Network>,
}

impl Stack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a network from the input boundary
    ///
    /// The network must be a non-empty 2-port referenced to 50 ohms with
    /// strictly increasing frequencies.
    pub fn push(&mut self, ntwk: Network) -> Result<(), StackError> {
        if let Err(err) = ntwk.validate(Z0) {
            warn!(error = %err, "rejected network");
            return Err(err.into());
        }
        self.networks.push(ntwk);
        Ok(())
    }

    /// Number of networks on the stack
    #[inline]
    pub fn depth(&self) -> usize {
        self.networks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Top network, if any
    pub fn top(&self) -> Option<&Network> {
        self.networks.last()
    }

    /// Networks from bottom to top
    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    /// Apply one operation
    pub fn apply(&mut self, op: Operation) -> Result<(), StackError> {
        let name = op.name();
        match op {
            Operation::Cascade => self.combine(name, |a, b| a.cascade(b))?,
            Operation::Deembed => self.combine(name, |a, b| a.deembed(b))?,
            Operation::Ideembed => self.combine(name, |a, b| b.ideembed(a))?,
            Operation::Swap => {
                self.require(name, 2)?;
                let n = self.networks.len();
                self.networks.swap(n - 2, n - 1);
            }
            Operation::Push(ntwk) => self.push(ntwk)?,
            Operation::Series(value) => self.cascade_top(name, |t| {
                Network::series_element(&t.frequency, t.reference_impedance(), &value)
            })?,
            Operation::Shunt(value) => self.cascade_top(name, |t| {
                Network::shunt_element(&t.frequency, t.reference_impedance(), &value)
            })?,
            Operation::Lift(value) => self.transform_top(name, |t| t.lift_ground(&value))?,
            Operation::CommonBase => self.transform_top(name, Network::to_common_base)?,
            Operation::CommonCollector => {
                self.transform_top(name, Network::to_common_collector)?
            }
            Operation::Flip => {
                let flipped = self.peek(name)?.flipped()?;
                self.replace_top(flipped);
            }
            Operation::Copy => {
                let copy = self.peek(name)?.clone();
                self.networks.push(copy);
            }
            Operation::Pass => {
                let t = self.peek(name)?;
                let thru = Network::thru(&t.frequency, t.reference_impedance());
                self.networks.push(thru);
            }
            Operation::Block => {
                let t = self.peek(name)?;
                let block = Network::isolator(&t.frequency, t.reference_impedance());
                self.networks.push(block);
            }
            Operation::Tline(v) => self.cascade_top(name, |t| {
                Network::transmission_line(&t.frequency, t.reference_impedance(), v.norm(), v.arg().to_degrees())
            })?,
            Operation::OpenStub(v) => self.cascade_top(name, |t| {
                Network::open_stub(&t.frequency, t.reference_impedance(), v.norm(), v.arg().to_degrees())
            })?,
            Operation::ShortStub(v) => self.cascade_top(name, |t| {
                Network::short_stub(&t.frequency, t.reference_impedance(), v.norm(), v.arg().to_degrees())
            })?,
        }

        debug!(
            op = name,
            depth = self.depth(),
            nfreq = self.top().map_or(0, Network::nfreq),
            "applied operation"
        );
        Ok(())
    }

    fn require(&self, op: &'static str, needed: usize) -> Result<(), StackError> {
        let depth = self.depth();
        if depth < needed {
            warn!(op, needed, depth, "stack underflow");
            return Err(StackError::Underflow { op, needed, depth });
        }
        Ok(())
    }

    fn peek(&self, op: &'static str) -> Result<&Network, StackError> {
        self.require(op, 1)?;
        self.networks
            .last()
            .ok_or(StackError::Underflow { op, needed: 1, depth: 0 })
    }

    fn replace_top(&mut self, ntwk: Network) {
        self.networks.pop();
        self.networks.push(ntwk);
    }

    /// Pop b, pop a, push `f(a, b)`
    fn combine<F>(&mut self, op: &'static str, f: F) -> Result<(), StackError>
    where
        F: FnOnce(&Network, &Network) -> Result<Network, NetworkError>,
    {
        self.require(op, 2)?;
        let n = self.networks.len();
        let result = f(&self.networks[n - 2], &self.networks[n - 1])?;
        self.networks.truncate(n - 2);
        self.networks.push(result);
        Ok(())
    }

    /// Cascade the top with an element synthesized on its grid
    fn cascade_top<F>(&mut self, op: &'static str, element: F) -> Result<(), StackError>
    where
        F: FnOnce(&Network) -> Network,
    {
        let top = self.peek(op)?;
        let result = top.cascade(&element(top))?;
        self.replace_top(result);
        Ok(())
    }

    /// Transform the top in place
    fn transform_top<F>(&mut self, op: &'static str, f: F) -> Result<(), StackError>
    where
        F: FnOnce(&mut Network) -> Result<(), NetworkError>,
    {
        let mut top = self.peek(op)?.clone();
        f(&mut top)?;
        self.replace_top(top);
        Ok(())
    }
}
