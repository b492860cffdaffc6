//! Command dispatch for everything that talks to the scoring service.

pub mod analyze;
pub mod config_cmd;
pub mod stats;
pub mod tools;
pub mod util;

use passmeter_core::ScoringClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a service-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    client: &ScoringClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Analyze(args) => analyze::handle(client, args, analyze::Mode::Analyze, global).await,
        Command::Capture(args) => analyze::handle(client, args, analyze::Mode::Capture, global).await,
        Command::Stats => stats::handle(client, global).await,
        Command::Tools => tools::handle(client, global).await,
        // Handled in main before a client is built
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
