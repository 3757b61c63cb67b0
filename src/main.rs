//! Storefront Cart CLI

use std::{fmt::Display, process::ExitCode};

use clap::Parser;

mod cli;
mod observability;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(error) = observability::init_subscriber(&cli.logging) {
        report(&error);
        return ExitCode::FAILURE;
    }

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(%error, "command failed");
            report(&error);
            ExitCode::FAILURE
        }
    }
}

#[expect(clippy::print_stderr, reason = "user-facing failure message")]
fn report(error: &dyn Display) {
    eprintln!("{error}");
}
