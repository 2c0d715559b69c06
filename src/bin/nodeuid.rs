//! Prints a run of identifiers from one generator, one per line.
//!
//! Usage:
//!   nodeuid --node-id 17 --count 10
//!   nodeuid --config nodeuid.toml
//!   NODE_ID=3 nodeuid --node-id-env NODE_ID

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use nodeuid::{GeneratorConfig, IdGenerator};

#[derive(Parser, Debug)]
#[command(name = "nodeuid", version, about = "Generate node-unique 64-bit identifiers")]
struct Args {
    /// Node id of this process (0..=8191, 0..=1023 assignable)
    #[arg(short, long)]
    node_id: Option<u32>,

    /// Environment variable holding the node id
    #[arg(long)]
    node_id_env: Option<String>,

    /// TOML config file; --node-id and --node-id-env override its node settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of identifiers to print
    #[arg(long, default_value_t = 500)]
    count: usize,

    /// Log level (trace, debug, info, warn, error), used when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    log: String,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the identifiers
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> nodeuid::Result<()> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(node_id) = args.node_id {
        config.node_id = Some(node_id);
    } else if let Some(var) = &args.node_id_env {
        config.node_id = None;
        config.node_id_env = Some(var.clone());
    }

    let generator = IdGenerator::from_config(&config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..args.count {
        writeln!(out, "{}", generator.next_id()?)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
