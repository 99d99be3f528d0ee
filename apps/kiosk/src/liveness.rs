//! Second, independent connection to the robot used only to log that it is reachable.
//! Nothing received here reaches the command dispatcher.

use kiosk_core::{ChannelEvent, WsChannel};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

pub async fn watch(endpoint: Url) {
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let _channel = WsChannel::connect(endpoint.clone(), events_tx);

    while let Some(event) = events_rx.recv().await {
        match event {
            ChannelEvent::Opened => info!(%endpoint, "liveness: connection received"),
            ChannelEvent::Closed => info!(%endpoint, "liveness: connection closed"),
            ChannelEvent::Error(err) => warn!(%endpoint, error = %err, "liveness: connection error"),
            ChannelEvent::Message(text) => debug!(message = %text, "liveness: ignoring message"),
        }
    }
}
