use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kiosk_core::{ControllerOptions, HeadlessUi, KioskController, WsChannel};
use shared::domain::ElementId;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod liveness;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "Kiosk display client driven by a robot over WebSocket")]
struct Args {
    #[arg(long, default_value = "kiosk.toml")]
    config: PathBuf,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    no_liveness: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(host) = args.host {
        settings.robot_host = host;
    }
    if let Some(port) = args.port {
        settings.robot_port = port;
    }
    if args.no_liveness {
        settings.liveness_enabled = false;
    }

    if settings.liveness_enabled {
        tokio::spawn(liveness::watch(settings.liveness_endpoint()?));
    }

    let endpoint = settings.robot_endpoint()?;
    info!(%endpoint, "kiosk: connecting to robot");
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let channel = WsChannel::connect(endpoint, events_tx);
    let controller = KioskController::new(
        HeadlessUi::new(),
        channel,
        ControllerOptions {
            prompt_period: settings.prompt_period(),
            primary_surfaces: settings.primary_surfaces.clone(),
        },
    );

    let (input_tx, input_rx) = mpsc::unbounded_channel();
    tokio::spawn(read_activations(input_tx));

    tokio::select! {
        _ = controller.run(events_rx, input_rx) => info!("kiosk: channel and input closed"),
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            info!("kiosk: interrupted");
        }
    }

    Ok(())
}

/// Stdin stands in for the touchscreen: each line is `press <id>` or a bare `<id>`.
async fn read_activations(input: mpsc::UnboundedSender<ElementId>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let Some(id) = parse_activation(&line) else {
                    continue;
                };
                if input.send(id).is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "kiosk: stdin read failed");
                break;
            }
        }
    }
}

fn parse_activation(line: &str) -> Option<ElementId> {
    let line = line.trim();
    let id = line.strip_prefix("press ").map(str::trim).unwrap_or(line);
    (!id.is_empty()).then(|| ElementId::from(id))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
