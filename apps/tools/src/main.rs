//! Developer stand-in for the robot: serves the kiosk's WebSocket endpoints, forwards stdin
//! lines to every connected kiosk and logs the control ids they send back.

use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use clap::{Parser, Subcommand};
use futures::{SinkExt, StreamExt};
use shared::protocol::Command as KioskCommand;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::{self, error::RecvError},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Accept kiosk connections and forward stdin lines to them.
    Relay {
        #[arg(long, default_value = "127.0.0.1:9100")]
        bind: SocketAddr,
        #[arg(long, default_value = "127.0.0.1:9010")]
        liveness_bind: SocketAddr,
    },
    /// Decode a single wire message and print the result.
    Decode { message: String },
}

#[derive(Clone)]
struct RelayState {
    commands: broadcast::Sender<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Relay {
            bind,
            liveness_bind,
        } => relay(bind, liveness_bind).await?,
        Command::Decode { message } => println!("{}", decode(&message)?),
    }

    Ok(())
}

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn decode(message: &str) -> Result<String> {
    match KioskCommand::parse(message) {
        Ok(command) => Ok(serde_json::to_string_pretty(&command)?),
        Err(err) => Ok(format!("rejected: {err}")),
    }
}

async fn relay(bind: SocketAddr, liveness_bind: SocketAddr) -> Result<()> {
    let (commands, _) = broadcast::channel(256);
    let state = RelayState {
        commands: commands.clone(),
    };

    let app = Router::new()
        .route("/modimwebsocketserver", get(kiosk_handler))
        .with_state(state);
    let liveness = Router::new().route("/websocketserver", get(liveness_handler));

    let listener = tokio::net::TcpListener::bind(bind).await?;
    let liveness_listener = tokio::net::TcpListener::bind(liveness_bind).await?;
    info!(%bind, %liveness_bind, "relay: listening");

    tokio::spawn(forward_stdin(commands));
    tokio::spawn(async move {
        if let Err(err) = axum::serve(liveness_listener, liveness).await {
            warn!(error = %err, "relay: liveness server stopped");
        }
    });
    axum::serve(listener, app).await?;
    Ok(())
}

async fn forward_stdin(commands: broadcast::Sender<String>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if let Err(err) = KioskCommand::parse(&line) {
            warn!(error = %err, message = %line, "relay: forwarding message the kiosk will reject");
        }
        match commands.send(line) {
            Ok(kiosks) => info!(kiosks, "relay: command forwarded"),
            Err(_) => warn!("relay: no kiosk connected"),
        }
    }
}

async fn kiosk_handler(ws: WebSocketUpgrade, State(state): State<RelayState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| kiosk_connection(state, socket))
}

async fn kiosk_connection(state: RelayState, socket: WebSocket) {
    info!("relay: kiosk connected");
    let (mut sender, mut receiver) = socket.split();
    let mut commands = state.commands.subscribe();

    let send_task = tokio::spawn(async move {
        while let Some(command) = next_command(&mut commands).await {
            if sender.send(Message::Text(command)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = receiver.next().await {
        if let Message::Text(id) = message {
            info!(id = %id, "relay: button pressed");
        }
    }

    send_task.abort();
    info!("relay: kiosk disconnected");
}

async fn next_command(commands: &mut broadcast::Receiver<String>) -> Option<String> {
    loop {
        match commands.recv().await {
            Ok(command) => return Some(command),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "relay: kiosk fell behind, commands dropped");
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

async fn liveness_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(|mut socket: WebSocket| async move {
        info!("relay: liveness connection");
        while let Some(Ok(_)) = socket.recv().await {}
        info!("relay: liveness connection closed");
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
