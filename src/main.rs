//! issue-notifier CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use issue_notifier::cli::{self, Cli};
use issue_notifier::infrastructure::logging::LoggerImpl;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Cli::parse();

    let _logger = match LoggerImpl::init(&args.log_config()) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("Failed to initialize logging: {err:#}");
            None
        }
    };

    match cli::execute(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            cli::handle_error(&err);
            ExitCode::FAILURE
        }
    }
}
