//! cascade command-line interface
//!
//! Reads a two-port network (stdin or `--input`), applies the stack
//! operations given on the command line in order and prints the final top
//! network.

mod format;
mod report;

use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cascade_core::{
    parse_commands, Command, Network, NetworkError, Operation, OutputMode, Stack, StackError,
    Terminations,
};

#[derive(Parser, Debug)]
#[command(name = "cascade")]
#[command(about = "Cascade, de-embed and match two-port S-parameter networks", long_about = None)]
#[command(version)]
#[command(after_help = OPERATIONS_HELP)]
struct Cli {
    /// Read the initial network from FILE instead of stdin
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Stack operations and output modes, applied left to right
    #[arg(
        value_name = "OPERATIONS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    operations: Vec<String>,
}

const OPERATIONS_HELP: &str = "\
Operations:
  -f FILE          push a network read from FILE
  -cascade         pop b, pop a, push a ** b
  -deembed         pop b, pop a, push a ** inv(b)
  -ideembed        pop b, pop a, push inv(a) ** b
  -swap            exchange the two top networks
  -copy            push a copy of the top network
  -flip            exchange port 1 and port 2 of the top network
  -pass            push a matched thru on the top network's frequencies
  -block           push an isolation network on the top network's frequencies
  -series VALUE    cascade a series element onto the top network
  -shunt VALUE     cascade a shunt element onto the top network
  -lift VALUE      return the common terminal to ground through VALUE
  -cbg             convert the top network to common base
  -ccd             convert the top network to common collector
  -tline Z/DEG     cascade an ideal line of impedance Z and length DEG
  -open Z/DEG      cascade an open shunt stub
  -short Z/DEG     cascade a shorted shunt stub

Matching terminations:
  -gs G, -zs Z     fix the source reflection or impedance
  -gl G, -zl Z     fix the load reflection or impedance

Output modes:
  -a  ABCD parameters     -s, -z  gain summary
  -m  matching networks   -g      matching networks in gamma
  -n  plain Touchstone

VALUE is a complex impedance (50, 10+5j, 65/90) or a component with an
h (henry) or f (farad) suffix and optional SI prefix (10nh, 2.2pf).";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cascade: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let commands = parse_commands(&cli.operations)?;
    debug!(count = commands.len(), "parsed commands");

    let mut stack = Stack::new();
    let initial = read_initial(cli.input.as_deref())?;
    info!(nfreq = initial.nfreq(), "loaded initial network");
    stack.push(initial).context("initial network")?;

    let mut mode = OutputMode::default();
    let mut terminations = Terminations::default();
    for command in commands {
        match command {
            Command::Mode(m) => mode = m,
            Command::SourceTermination(t) => terminations.source = Some(t),
            Command::LoadTermination(t) => terminations.load = Some(t),
            Command::Load(path) => {
                let ntwk = read_file(&path)?;
                stack
                    .apply(Operation::Push(ntwk))
                    .with_context(|| format!("network {}", path.display()))?;
            }
            Command::Apply(op) => stack.apply(op)?,
        }
    }

    if let Some(top) = stack.top() {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        report::write_network(&mut out, top, mode, &terminations)?;
        out.flush()?;
    }
    Ok(())
}

fn read_initial(path: Option<&Path>) -> Result<Network> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading network from stdin")?;
            Network::from_touchstone_content(&buf, 2).context("parsing network from stdin")
        }
    }
}

fn read_file(path: &Path) -> Result<Network> {
    Network::from_touchstone(path).with_context(|| format!("reading {}", path.display()))
}

/// Process exit status for a failed run
fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<StackError>() {
            return match e {
                StackError::Underflow { .. } => 2,
                StackError::UnrecognizedOperation(_)
                | StackError::MissingOperand(_)
                | StackError::InvalidOperand { .. } => 4,
                StackError::Network(e) => network_exit_code(e),
            };
        }
        if let Some(e) = cause.downcast_ref::<NetworkError>() {
            return network_exit_code(e);
        }
    }
    1
}

fn network_exit_code(err: &NetworkError) -> u8 {
    match err {
        NetworkError::UnsupportedReference { .. } => 3,
        NetworkError::FrequencyMismatch { .. } | NetworkError::NotTwoPort(_) => 5,
        NetworkError::Empty | NetworkError::NotIncreasing => 1,
    }
}
