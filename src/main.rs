//! `annotate`: prefix every line of stdin with key=value annotations.
//!
//! ```text
//! $ printf 'started\nready\n' | annotate --flags none --set svc=api --set shard=3
//! [svc=api shard=3] started
//! [svc=api shard=3] ready
//! ```
//!
//! Settings come from an optional TOML config file; command-line flags are
//! applied on top of it. Diagnostics go to stderr through `tracing`. A closed
//! output (`annotate | head -1`) ends the run normally.

use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use annotated_log::config::{load_config, LoggerConfig};
use annotated_log::{Flags, Logger, Value};

#[derive(Parser)]
#[command(name = "annotate")]
#[command(about = "Prefix stdin lines with key=value annotations", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Header flags, e.g. `std`, `none` or `date,time,utc`.
    #[arg(short, long)]
    flags: Option<Flags>,

    /// Annotation to add, in order. Repeatable.
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_annotation)]
    set: Vec<(String, Value)>,

    /// Annotate every line with `error='MSG'`.
    #[arg(short, long, value_name = "MSG")]
    error: Option<String>,
}

fn parse_annotation(arg: &str) -> Result<(String, Value), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {arg:?}"))?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return Err(format!("invalid annotation key {key:?}"));
    }
    Ok((key.to_string(), Value::infer(value)))
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "annotated_log=warn,annotate=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "annotate failed");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoggerConfig::default(),
    };

    let log = build_logger(&config, &cli)?;
    tracing::info!(prefix = %log.prefix(), flags = log.flags().bits(), "annotating stdin");

    pump(io::stdin().lock(), &log)?;
    Ok(())
}

/// Annotate each line of `input` until it ends or the output is closed.
fn pump<R: BufRead>(input: R, log: &Logger) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        match log.output(&log.sprint(&[&line])) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                tracing::debug!("output closed, stopping");
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn build_logger(config: &LoggerConfig, cli: &Cli) -> Result<Logger, Box<dyn Error>> {
    let log = config.build()?;
    if let Some(flags) = cli.flags {
        log.set_flags(flags);
    }
    for (key, value) in &cli.set {
        log.set(key.clone(), value.clone());
    }
    if let Some(msg) = &cli.error {
        log.set_error(msg);
    }
    Ok(log)
}
