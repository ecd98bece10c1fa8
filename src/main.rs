use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use kidcode::{interpret_blocks_with, script, validate_blocks, Config, SystemClock};
use log::{error, info, warn};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "kidcode")]
#[command(about = "Runs a block script and prints the resulting event log as JSON")]
#[command(version)]
struct Args {
  /// Script file: a JSON array of blocks
  #[arg(value_name = "FILE")]
  script: PathBuf,

  /// Most block executions allowed, loop expansion included
  #[arg(long, default_value_t = kidcode::MAX_STEPS)]
  max_steps: u32,

  /// Wall-clock budget in milliseconds
  #[arg(long, default_value_t = kidcode::MAX_EXECUTION_TIME.as_millis() as u64)]
  max_time_ms: u64,

  /// Seed for the randomColor block
  #[arg(long, default_value_t = 0)]
  seed: u64,
}

#[derive(Debug, Error)]
enum CliError {
  #[error("cannot read {path}: {source}")]
  Read {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("cannot encode result: {0}")]
  Encode(#[from] serde_json::Error),
}

fn run(args: Args) -> Result<bool, CliError> {
  let blocks = script::load(&args.script).map_err(|source| CliError::Read {
    path: args.script.clone(),
    source,
  })?;
  for diagnostic in validate_blocks(&blocks) {
    warn!("{diagnostic}");
  }
  let config = Config {
    max_steps: args.max_steps,
    max_execution_time: Duration::from_millis(args.max_time_ms),
    seed: args.seed,
    ..Config::default()
  };
  let result = interpret_blocks_with(&blocks, &config, SystemClock::start());
  info!(
    "{} blocks, {} steps, {} events",
    blocks.len(),
    result.context.step_count,
    result.events.len()
  );
  if let Some(error) = &result.error {
    warn!("{error}");
  }
  println!("{}", serde_json::to_string_pretty(&result)?);
  Ok(result.success)
}

fn main() {
  pretty_env_logger::init();
  match run(Args::parse()) {
    Ok(true) => {}
    Ok(false) => process::exit(2),
    Err(error) => {
      error!("{error}");
      process::exit(1);
    }
  }
}
