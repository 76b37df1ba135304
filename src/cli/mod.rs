//! Command line interface for agpack.

mod args;
mod commands;

pub use args::{Args, Command, GenerateArgs, PublishArgs};

use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    match &args.command {
        Command::Generate(cmd) => commands::generate(cmd).await,
        Command::Publish(cmd) => commands::publish(cmd).await,
    }
}
