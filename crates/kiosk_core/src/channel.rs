use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Opened,
    Closed,
    Error(String),
    Message(String),
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("channel is not open")]
    Unavailable,
    #[error("failed to connect websocket {endpoint}: {reason}")]
    Connect { endpoint: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Connecting,
    Open,
    Closing,
    Closed,
}

pub trait ChannelAdapter {
    fn is_open(&self) -> bool;
    fn send(&mut self, text: &str) -> Result<(), ChannelError>;
    fn close(&mut self);
}

/// WebSocket channel. Connection runs in the background; progress and inbound text are
/// reported as [`ChannelEvent`]s on the sender given to [`WsChannel::connect`].
pub struct WsChannel {
    endpoint: Url,
    outbound: Option<mpsc::UnboundedSender<Message>>,
    state: watch::Receiver<ReadyState>,
    task: JoinHandle<()>,
}

impl WsChannel {
    pub fn connect(endpoint: Url, events: mpsc::UnboundedSender<ChannelEvent>) -> Self {
        let (state_tx, state_rx) = watch::channel(ReadyState::Connecting);
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_socket(endpoint.clone(), outbound_rx, state_tx, events));
        Self {
            endpoint,
            outbound: Some(outbound_tx),
            state: state_rx,
            task,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn ready_state(&self) -> ReadyState {
        *self.state.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl ChannelAdapter for WsChannel {
    fn is_open(&self) -> bool {
        self.outbound.is_some() && self.ready_state() == ReadyState::Open
    }

    fn send(&mut self, text: &str) -> Result<(), ChannelError> {
        if !self.is_open() {
            return Err(ChannelError::Unavailable);
        }
        let Some(outbound) = &self.outbound else {
            return Err(ChannelError::Unavailable);
        };
        outbound
            .send(Message::Text(text.to_string()))
            .map_err(|_| ChannelError::Unavailable)
    }

    fn close(&mut self) {
        if self.outbound.take().is_some() {
            debug!(endpoint = %self.endpoint, "channel: closing");
        }
    }
}

async fn run_socket(
    endpoint: Url,
    mut outbound: mpsc::UnboundedReceiver<Message>,
    state: watch::Sender<ReadyState>,
    events: mpsc::UnboundedSender<ChannelEvent>,
) {
    let stream = match connect_async(endpoint.as_str()).await {
        Ok((stream, _)) => stream,
        Err(err) => {
            let err = ChannelError::Connect {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            };
            warn!(error = %err, "channel: connect failed");
            state.send_replace(ReadyState::Closed);
            let _ = events.send(ChannelEvent::Error(err.to_string()));
            let _ = events.send(ChannelEvent::Closed);
            return;
        }
    };
    state.send_replace(ReadyState::Open);
    let _ = events.send(ChannelEvent::Opened);

    let (mut writer, mut reader) = stream.split();
    loop {
        tokio::select! {
            inbound = reader.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    if events.send(ChannelEvent::Message(text)).is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    let _ = events.send(ChannelEvent::Error(format!(
                        "websocket receive failed: {err}"
                    )));
                    break;
                }
            },
            message = outbound.recv() => match message {
                Some(message) => {
                    if let Err(err) = writer.send(message).await {
                        let _ = events.send(ChannelEvent::Error(format!(
                            "websocket send failed: {err}"
                        )));
                        break;
                    }
                }
                None => {
                    state.send_replace(ReadyState::Closing);
                    let _ = writer.send(Message::Close(None)).await;
                    break;
                }
            },
        }
    }

    state.send_replace(ReadyState::Closed);
    let _ = events.send(ChannelEvent::Closed);
}
