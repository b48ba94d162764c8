// Push channel transport - Named events over Server-Sent Events
use crate::domain::events::{ChannelEvent, EventDecodeError};
use crate::infrastructure::sse::SseDecoder;
use async_trait::async_trait;
use futures::stream::Stream;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("failed to connect: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("stream interrupted: {0}")]
    Stream(#[source] reqwest::Error),
}

impl ChannelError {
    /// Whether the failure happened after a `Connect` was reported
    pub fn was_connected(&self) -> bool {
        matches!(self, ChannelError::Stream(_))
    }
}

#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Run one connection, forwarding events until it ends.
    /// Implementations send `ChannelEvent::Connect` once the connection is up.
    async fn run_session(&self, tx: &mpsc::Sender<ChannelEvent>) -> Result<(), ChannelError>;
}

/// Spawn the transport. Reconnects after `reconnect_delay` for as long as
/// the receiver is alive, reporting `Disconnect` whenever a live session ends
/// and once if the server cannot be reached at all.
pub fn subscribe<C>(channel: Arc<C>, reconnect_delay: Duration) -> mpsc::Receiver<ChannelEvent>
where
    C: PushChannel + 'static,
{
    let (tx, rx) = mpsc::channel(100);

    tokio::spawn(async move {
        let mut reported_down = false;
        loop {
            let connected = match channel.run_session(&tx).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Push channel error: {}", e);
                    e.was_connected()
                }
            };

            if (connected || !reported_down) && tx.send(ChannelEvent::Disconnect).await.is_err() {
                break;
            }
            reported_down = true;
            if tx.is_closed() {
                break;
            }

            tracing::debug!("Reconnecting in {:?}", reconnect_delay);
            tokio::time::sleep(reconnect_delay).await;
        }
        tracing::debug!("Push channel subscriber stopped");
    });

    rx
}

#[derive(Debug, Clone)]
pub struct SseChannel {
    client: reqwest::Client,
    url: String,
}

impl SseChannel {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl PushChannel for SseChannel {
    async fn run_session(&self, tx: &mpsc::Sender<ChannelEvent>) -> Result<(), ChannelError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(ChannelError::Connect)?;

        if !response.status().is_success() {
            return Err(ChannelError::Status(response.status()));
        }

        tracing::info!("Subscribed to {}", self.url);
        if tx.send(ChannelEvent::Connect).await.is_err() {
            return Ok(());
        }

        let mut events = Box::pin(event_stream(response));
        while let Some(event) = events.next().await {
            if tx.send(event?).await.is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Decode a streaming response into channel events. Frames that do not
/// decode are logged and skipped.
fn event_stream(response: reqwest::Response) -> impl Stream<Item = Result<ChannelEvent, ChannelError>> {
    async_stream::stream! {
        let mut bytes = response.bytes_stream();
        let mut decoder = SseDecoder::new();

        while let Some(chunk) = bytes.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err(ChannelError::Stream(e));
                    return;
                }
            };
            decoder.push(&chunk);

            while let Some(frame) = decoder.next_frame() {
                let frame = match frame {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::warn!("Skipping frame: {}", e);
                        continue;
                    }
                };
                match ChannelEvent::decode(&frame.event, &frame.data) {
                    Ok(event) => {
                        yield Ok(event);
                    }
                    Err(EventDecodeError::UnknownEvent(name)) => {
                        tracing::debug!("Ignoring unknown event {}", name);
                    }
                    Err(e) => {
                        tracing::warn!("Skipping event: {}", e);
                    }
                }
            }
        }

        if decoder.has_remaining() {
            tracing::warn!("Stream ended with a partial frame");
        }
    }
}
