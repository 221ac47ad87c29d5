//! Entry point of the `acme` demonstration CLI.
//!
//! Wires the `llm` command onto the clap command tree according to the
//! environment, parses arguments, executes the selected command and writes
//! its output to stdout. Failures are logged once with their stable code and
//! mapped to a non-zero exit status.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::CommandFactory;

use clidex_cli::{
    cli::{Cli, CliError, execute},
    config::WiringConfig,
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Wire, parse, execute and flush.
fn try_main() -> Result<()> {
    let config = WiringConfig::from_env().context("failed to read wiring configuration")?;
    let root = config.wire(Cli::command());
    let matches = root.clone().get_matches();
    let output = execute(&root, &matches).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    writer
        .write_all(output.as_bytes())
        .context("failed to write output")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err.downcast_ref::<CliError>().and_then(CliError::code);
        error!(
            error = %format!("{err:#}"),
            code = code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
