//! sleepsort - sort a random array by sleeping on each element
//!
//! Usage: sleepsort <SIZE> <MAXIMUM> [--seed N] [--backend cooperative|threads]

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use sleepsort_cli::{parse_args, run, CliError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(CliError::Argument(e)) => e.exit(),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args).await {
        Ok(report) => {
            // Banner only with a report; failures leave stdout empty
            print!("{}", report.stdout_text());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "sort failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
