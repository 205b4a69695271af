use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

use callwatch::{CallOutcome, Config, HttpVoiceService, StatusAndCallWidget, TerminalPanel};
use callwatch::client::VoiceServiceApi;

mod doctor;

#[derive(clap::Parser, Debug)]
struct Args {
    /// Base URL of the voice-call service
    #[clap(long)]
    url: Option<String>,

    /// Path to a callwatch.toml config file
    #[clap(long)]
    config: Option<PathBuf>,

    /// Disable colorized output
    #[clap(long)]
    no_color: bool,

    /// Subcommands
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Poll the service and render the status panel (default)
    Watch {
        /// Poll interval in seconds
        #[clap(long)]
        interval: Option<u64>,
        /// Render a single poll and exit
        #[clap(long)]
        once: bool,
    },
    /// Print the raw service status and exit
    Status,
    /// Trigger an outbound call to a phone number
    Call {
        /// Destination in E.164 format (e.g. +15551234567)
        number: String,
    },
    /// Check service health and connectivity
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(url) = &args.url {
        cfg.base_url = url.clone();
    }

    if let Some(Command::Doctor) = args.command {
        return doctor::run_doctor(&cfg.base_url).await;
    }

    let api = Arc::new(HttpVoiceService::new(&cfg.base_url, cfg.request_timeout())?);

    if let Some(Command::Status) = args.command {
        match api.fetch_status().await {
            Ok(report) => {
                println!(
                    "{:<24} {:<28} {}",
                    "openai_api", "model", "active_calls"
                );
                println!(
                    "{:<24} {:<28} {}",
                    report.openai_api,
                    report.model.as_deref().unwrap_or("-"),
                    report.active_calls
                );
            }
            Err(err) => {
                eprintln!("service offline: {err:#}");
            }
        }
        return Ok(());
    }

    let panel = Arc::new(Mutex::new(TerminalPanel::new(!args.no_color)));

    if let Some(Command::Call { number }) = args.command.clone() {
        let widget = StatusAndCallWidget::new(api, panel, &cfg);
        match widget.place_call(&number).await {
            CallOutcome::Placed { .. } => return Ok(()),
            // The panel already showed the failure message.
            CallOutcome::Rejected { .. } | CallOutcome::Failed { .. } => std::process::exit(1),
        }
    }

    // Default: watch mode.
    let (interval, once) = match args.command {
        Some(Command::Watch { interval, once }) => (interval, once),
        _ => (None, false),
    };
    if let Some(secs) = interval {
        cfg.poll_interval_secs = secs;
    }

    let widget = StatusAndCallWidget::new(api, panel, &cfg);
    if once {
        widget.poll_once().await;
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });
    widget.run(shutdown_rx).await;
    Ok(())
}
