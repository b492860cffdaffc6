//! `passmeter-tui`: terminal front end for the passmeter scoring service.
//!
//! Two screens: a tool catalog and a live password validator. The
//! validator feeds every keystroke to a `ValidationOrchestrator`, whose
//! state updates are bridged into the action loop.
//!
//! Logs go to a file (default `/tmp/passmeter-tui.log`) so they never
//! corrupt the terminal.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod state_bridge;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

/// Live password strength checker for the terminal.
#[derive(Parser, Debug)]
#[command(name = "passmeter-tui", version, about)]
struct Cli {
    /// Scoring service origin (e.g., http://localhost:8000)
    #[arg(short = 'u', long, env = "PASSMETER_API_URL")]
    api_url: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/passmeter-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. The returned guard must outlive the app so the
/// non-blocking writer flushes.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "passmeter_tui={log_level},passmeter_core={log_level},passmeter_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("passmeter-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

fn load_settings(cli: &Cli) -> passmeter_config::Config {
    let mut cfg = match passmeter_config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config unreadable, using defaults");
            passmeter_config::Config::default()
        }
    };
    if let Some(ref url) = cli.api_url {
        cfg.api_url = Some(url.clone());
    }
    cfg
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first, so a panic during setup still restores the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let cfg = load_settings(&cli);
    let client = cfg
        .scoring_client()
        .wrap_err("failed to configure the scoring client")?;

    info!(base_url = %client.base_url(), "starting passmeter-tui");

    let mut app = App::new(Arc::new(client), cfg.orchestrator());
    app.run().await?;

    Ok(())
}
