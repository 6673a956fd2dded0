/*
[INPUT]:  Live channel URL, outbound text frames
[OUTPUT]: Generation-tagged socket events (opened / message / closed)
[POS]:    WebSocket layer - tokio-tungstenite Transport implementation
[UPDATE]: When changing connection handling or frame types
*/

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, warn};
use url::Url;

use crate::http::{DashboardError, Result};
use crate::live::ports::Transport;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const OUTBOUND_BUFFER: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEventKind {
    Opened,
    Message(String),
    Closed { reason: Option<String> },
}

/// Event from one connection, tagged with the generation that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketEvent {
    pub generation: u64,
    pub kind: SocketEventKind,
}

/// WebSocket transport for the live client.
///
/// Every `connect` starts a new generation; events from older generations
/// are left for the driver to discard.
#[derive(Debug)]
pub struct LiveSocket {
    generation: u64,
    events_tx: mpsc::UnboundedSender<SocketEvent>,
    outbound_tx: Option<mpsc::Sender<WsMessage>>,
    task: Option<JoinHandle<()>>,
}

impl LiveSocket {
    /// Create the transport and the receiver its events arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SocketEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let socket = Self {
            generation: 0,
            events_tx,
            outbound_tx: None,
            task: None,
        };
        (socket, events_rx)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_connected(&self) -> bool {
        self.outbound_tx
            .as_ref()
            .is_some_and(|sender| !sender.is_closed())
    }
}

impl Transport for LiveSocket {
    fn connect(&mut self, url: &Url) -> Result<()> {
        self.disconnect();

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|err| DashboardError::Transport(format!("no tokio runtime: {err}")))?;

        self.generation += 1;
        let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_BUFFER);
        self.outbound_tx = Some(outbound_tx);
        self.task = Some(runtime.spawn(run_connection(
            url.to_string(),
            self.generation,
            self.events_tx.clone(),
            outbound_rx,
        )));

        Ok(())
    }

    fn send_text(&mut self, text: String) -> Result<()> {
        let sender = self
            .outbound_tx
            .as_ref()
            .ok_or_else(|| DashboardError::Transport("live channel not connected".to_string()))?;

        sender
            .try_send(WsMessage::Text(text.into()))
            .map_err(|err| DashboardError::Transport(format!("live send failed: {err}")))
    }

    fn disconnect(&mut self) {
        // Dropping the sender closes an open connection with a close frame
        // and abandons one that is still connecting.
        self.outbound_tx = None;
        if let Some(task) = self.task.take()
            && !task.is_finished()
        {
            debug!(generation = self.generation, "releasing live connection task");
        }
    }
}

impl Drop for LiveSocket {
    fn drop(&mut self) {
        self.disconnect();
    }
}

async fn run_connection(
    url: String,
    generation: u64,
    events_tx: mpsc::UnboundedSender<SocketEvent>,
    mut outbound_rx: mpsc::Receiver<WsMessage>,
) {
    let connect = tokio::time::timeout(CONNECT_TIMEOUT, connect_async(url.as_str()));
    tokio::pin!(connect);

    // A dropped sender while connecting means the client tore down; abandon the handshake.
    let connected = loop {
        tokio::select! {
            result = &mut connect => break result,
            outbound = outbound_rx.recv() => match outbound {
                Some(_) => debug!(generation, "dropping frame queued before open"),
                None => {
                    debug!(%url, generation, "live connect abandoned");
                    return;
                }
            },
        }
    };
    let ws_stream = match connected {
        Ok(Ok((ws_stream, _response))) => ws_stream,
        Ok(Err(err)) => {
            warn!(%url, generation, error = %err, "live channel connect error");
            emit(&events_tx, generation, SocketEventKind::Closed {
                reason: Some(err.to_string()),
            });
            return;
        }
        Err(_) => {
            warn!(%url, generation, timeout = ?CONNECT_TIMEOUT, "live channel connect timed out");
            emit(&events_tx, generation, SocketEventKind::Closed {
                reason: Some("connect timed out".to_string()),
            });
            return;
        }
    };

    info!(%url, generation, "live channel opened");
    emit(&events_tx, generation, SocketEventKind::Opened);

    let (mut write, mut read) = ws_stream.split();

    let reason = loop {
        tokio::select! {
            outbound = outbound_rx.recv() => {
                match outbound {
                    Some(message) => {
                        if let Err(err) = write.send(message).await {
                            break Some(err.to_string());
                        }
                    }
                    None => {
                        let _ = write.send(WsMessage::Close(None)).await;
                        break Some("closed by client".to_string());
                    }
                }
            }
            incoming = read.next() => {
                match incoming {
                    Some(Ok(WsMessage::Text(text))) => {
                        emit(&events_tx, generation, SocketEventKind::Message(text.to_string()));
                    }
                    Some(Ok(WsMessage::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                        Ok(text) => emit(&events_tx, generation, SocketEventKind::Message(text)),
                        Err(_) => debug!(generation, bytes = bytes.len(), "dropping non-utf8 binary frame"),
                    },
                    Some(Ok(WsMessage::Close(_))) => {
                        let _ = write.send(WsMessage::Close(None)).await;
                        break Some("closed by server".to_string());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => break Some(err.to_string()),
                    None => break None,
                }
            }
        }
    };

    info!(generation, reason = reason.as_deref().unwrap_or("stream ended"), "live channel closed");
    emit(&events_tx, generation, SocketEventKind::Closed { reason });
}

fn emit(events_tx: &mpsc::UnboundedSender<SocketEvent>, generation: u64, kind: SocketEventKind) {
    if events_tx.send(SocketEvent { generation, kind }).is_err() {
        debug!(generation, "live event receiver dropped");
    }
}
