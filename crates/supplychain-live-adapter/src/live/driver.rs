/*
[INPUT]:  LiveConfig, live channel URL, host handlers, shutdown token
[OUTPUT]: Running live client until shutdown, disable or retry exhaustion
[POS]:    Live layer - tokio event loop feeding the sans-IO client
[UPDATE]: When changing how socket and timer events reach the client
*/

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use super::client::{LiveConfig, LiveUpdateClient};
use super::ports::LiveHandlers;
use super::timer::TimerQueue;
use crate::ws::client::{LiveSocket, SocketEvent, SocketEventKind};

pub type TokioLiveClient = LiveUpdateClient<LiveSocket, TimerQueue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveExit {
    /// Live updates switched off in configuration
    Disabled,
    /// Shutdown token cancelled
    Shutdown,
    /// Reconnect attempts used up
    Exhausted,
}

/// Owns the live client and drives it from socket events and timers.
pub struct LiveRuntime {
    client: TokioLiveClient,
    events: mpsc::UnboundedReceiver<SocketEvent>,
    shutdown: CancellationToken,
}

impl LiveRuntime {
    pub fn new(config: LiveConfig, shutdown: CancellationToken) -> Self {
        let (socket, events) = LiveSocket::new();
        Self {
            client: LiveUpdateClient::new(config, socket, TimerQueue::new()),
            events,
            shutdown,
        }
    }

    pub fn client(&self) -> &TokioLiveClient {
        &self.client
    }

    /// Start the client and process events until it stops.
    pub async fn run(mut self, url: Url, handlers: LiveHandlers) -> LiveExit {
        self.client.start(url, handlers);
        if !self.client.is_started() {
            return LiveExit::Disabled;
        }

        loop {
            if self.client.is_exhausted() {
                self.client.close();
                return LiveExit::Exhausted;
            }

            let deadline = self.client.scheduler().next_deadline();

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("live runtime shutdown requested");
                    self.client.close();
                    return LiveExit::Shutdown;
                }
                event = self.events.recv() => {
                    let Some(event) = event else {
                        self.client.close();
                        return LiveExit::Shutdown;
                    };
                    self.handle_socket_event(event);
                }
                _ = sleep_until_deadline(deadline) => {
                    let due = self.client.scheduler_mut().pop_due(Instant::now());
                    for id in due {
                        self.client.on_timer(id);
                    }
                }
            }
        }
    }

    fn handle_socket_event(&mut self, event: SocketEvent) {
        let current = self.client.transport().generation();
        if event.generation != current {
            debug!(
                generation = event.generation,
                current, "dropping event from superseded connection"
            );
            return;
        }

        match event.kind {
            SocketEventKind::Opened => self.client.on_open(),
            SocketEventKind::Message(text) => self.client.on_message(&text),
            SocketEventKind::Closed { reason } => {
                debug!(reason = reason.as_deref().unwrap_or("none"), "live socket closed");
                self.client.on_close();
            }
        }
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
