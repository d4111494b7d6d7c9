use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LoggingConfig};
use crate::interpreter::{run_until_done, ExitStatus, Halt, Program, VM};

#[derive(Parser, Debug)]
#[command(name = "8255")]
#[command(about = "8255 - run assembly-style scripts", long_about = None)]
pub struct Cli {
    /// Source file to run
    pub filepath: PathBuf,

    /// Step through the program one instruction at a time
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}

/// Run the CLI by parsing process arguments
///
/// Returns the process exit status the program asked for.
pub fn run_cli() -> Result<i32> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run the CLI with provided arguments
pub fn run_cli_from_args(args: Vec<String>) -> Result<i32> {
    let cli = Cli::try_parse_from(args)?;
    run_cli_with_args(cli)
}

fn run_cli_with_args(cli: Cli) -> Result<i32> {
    let config = Config::builder()
        .debug(cli.debug)
        .build()
        .context("Failed to load configuration")?;

    init_logging(&config.logging);

    let source = std::fs::read_to_string(&cli.filepath)
        .with_context(|| format!("Failed to read {}", cli.filepath.display()))?;
    let program = Program::from_source(&source);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut vm = VM::new(program, stdin.lock(), stdout.lock()).with_settings(config.interpreter);

    let halt = run_until_done(&mut vm)?;
    drop(vm);

    if let Halt::Exited(ExitStatus::Message(message)) = &halt {
        let mut stderr = io::stderr();
        writeln!(stderr, "{}", message)?;
    }

    Ok(halt.exit_code())
}

/// Install the stderr log subscriber; `RUST_LOG` wins over the config filter
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
