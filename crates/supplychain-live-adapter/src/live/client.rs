/*
[INPUT]:  Transport/timer callbacks fed in by a driver, host handlers
[OUTPUT]: Dispatched live events, reconnect scheduling, heartbeats
[POS]:    Live layer - connection state machine (sans-IO)
[UPDATE]: When changing reconnection, heartbeat or dispatch rules
*/

use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use super::backoff::{ReconnectPolicy, ReconnectState};
use super::ports::{LiveHandlers, Scheduler, TimerId, Transport};
use crate::http::DashboardError;
use crate::ws::message::{
    decode_event, log_parse_fail_once, log_unknown_once, InboundEvent, OutboundMessage,
};

pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveConfig {
    pub enabled: bool,
    pub reconnect: ReconnectPolicy,
    pub heartbeat_interval: Duration,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            reconnect: ReconnectPolicy::default(),
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }
}

/// Best-effort live connection with exponential reconnect and heartbeat.
///
/// The client does no I/O of its own. A driver owns the event loop and feeds
/// it `on_open`, `on_message`, `on_close` and `on_timer` one at a time; the
/// client reacts through its `Transport` and `Scheduler` ports.
pub struct LiveUpdateClient<T, S> {
    config: LiveConfig,
    transport: T,
    scheduler: S,
    state: ConnectionState,
    reconnect: ReconnectState,
    url: Option<Url>,
    handlers: Option<LiveHandlers>,
    reconnect_timer: Option<TimerId>,
    heartbeat_timer: Option<TimerId>,
    torn_down: bool,
}

impl<T: Transport, S: Scheduler> LiveUpdateClient<T, S> {
    pub fn new(config: LiveConfig, transport: T, scheduler: S) -> Self {
        Self {
            config,
            transport,
            scheduler,
            state: ConnectionState::Disconnected,
            reconnect: ReconnectState::default(),
            url: None,
            handlers: None,
            reconnect_timer: None,
            heartbeat_timer: None,
            torn_down: false,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn reconnect_attempt(&self) -> u32 {
        self.reconnect.attempt()
    }

    pub fn is_exhausted(&self) -> bool {
        self.reconnect.is_exhausted()
    }

    pub fn is_started(&self) -> bool {
        self.url.is_some() && !self.torn_down
    }

    pub fn config(&self) -> &LiveConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Begin connecting to `url`.
    ///
    /// No-op when live updates are disabled, when already started, or after
    /// `close`.
    pub fn start(&mut self, url: Url, handlers: LiveHandlers) {
        if !self.config.enabled {
            info!(%url, "live updates disabled; not connecting");
            return;
        }
        if self.torn_down || self.url.is_some() {
            debug!(%url, "live client already started");
            return;
        }

        self.url = Some(url);
        self.handlers = Some(handlers);
        self.connect();
    }

    pub fn on_open(&mut self) {
        if self.torn_down || self.state != ConnectionState::Connecting {
            debug!(state = ?self.state, "ignoring open outside of connecting state");
            return;
        }

        self.state = ConnectionState::Open;
        self.reconnect.reset();
        self.heartbeat_timer = Some(self.scheduler.set_interval(self.config.heartbeat_interval));
        info!("live channel connected");

        if let Some(handlers) = self.handlers.as_mut() {
            handlers.observer.on_connected();
        }
    }

    pub fn on_message(&mut self, text: &str) {
        if self.torn_down || self.state != ConnectionState::Open {
            debug!(state = ?self.state, bytes = text.len(), "ignoring message outside of open state");
            return;
        }

        let event = match decode_event(text) {
            Ok(event) => event,
            Err(err) => {
                log_parse_fail_once(&err, text);
                return;
            }
        };

        let Some(handlers) = self.handlers.as_mut() else {
            return;
        };

        match event {
            InboundEvent::OrderUpdate(update) => handlers.events.on_order_update(update),
            InboundEvent::InventoryUpdate(update) => handlers.events.on_inventory_update(update),
            InboundEvent::TrackingUpdate(update) => handlers.events.on_tracking_update(update),
            InboundEvent::Pong => debug!("live heartbeat acknowledged"),
            InboundEvent::Unknown { kind, .. } => log_unknown_once(&kind, text),
        }
    }

    /// Connection closed or failed to open.
    pub fn on_close(&mut self) {
        if self.torn_down {
            return;
        }
        if !matches!(
            self.state,
            ConnectionState::Connecting | ConnectionState::Open
        ) {
            debug!(state = ?self.state, "ignoring duplicate close");
            return;
        }

        self.clear_heartbeat();
        self.state = ConnectionState::Closed;

        match self.reconnect.next_delay(&self.config.reconnect) {
            Some((attempt, delay)) => {
                warn!(
                    attempt,
                    max_attempts = self.config.reconnect.max_attempts,
                    ?delay,
                    "live channel closed; reconnecting with backoff"
                );
                self.reconnect_timer = Some(self.scheduler.set_timeout(delay));
                if let Some(handlers) = self.handlers.as_mut() {
                    handlers.observer.on_reconnect_scheduled(attempt, delay);
                }
            }
            None => {
                self.state = ConnectionState::Disconnected;
                if self.reconnect.mark_exhausted() {
                    let err = DashboardError::ExhaustedRetries {
                        attempts: self.reconnect.attempt(),
                    };
                    warn!(error = %err, "live channel gave up reconnecting");
                    if let Some(handlers) = self.handlers.as_mut() {
                        handlers.observer.on_permanently_disconnected();
                    }
                }
            }
        }
    }

    pub fn on_timer(&mut self, id: TimerId) {
        if self.torn_down {
            return;
        }

        if self.reconnect_timer == Some(id) {
            self.reconnect_timer = None;
            self.connect();
        } else if self.heartbeat_timer == Some(id) {
            self.send_heartbeat();
        } else {
            debug!(timer = id.raw(), "ignoring stale timer");
        }
    }

    /// Tear down the connection and all timers; later callbacks are ignored.
    pub fn close(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if let Some(id) = self.reconnect_timer.take() {
            self.scheduler.clear(id);
        }
        self.clear_heartbeat();

        if matches!(
            self.state,
            ConnectionState::Connecting | ConnectionState::Open
        ) {
            self.transport.disconnect();
        }
        self.state = ConnectionState::Disconnected;
        self.handlers = None;
        info!("live client closed");
    }

    fn connect(&mut self) {
        let Some(url) = self.url.clone() else {
            return;
        };

        self.state = ConnectionState::Connecting;
        debug!(%url, attempt = self.reconnect.attempt(), "connecting live channel");

        if let Err(err) = self.transport.connect(&url) {
            warn!(%url, error = %err, "live channel connect failed");
            self.on_close();
        }
    }

    fn send_heartbeat(&mut self) {
        if self.state != ConnectionState::Open {
            return;
        }

        let sent = OutboundMessage::Ping
            .to_text()
            .and_then(|text| self.transport.send_text(text));
        match sent {
            Ok(()) => debug!("live heartbeat sent"),
            Err(err) => warn!(error = %err, "live heartbeat send failed"),
        }
    }

    fn clear_heartbeat(&mut self) {
        if let Some(id) = self.heartbeat_timer.take() {
            self.scheduler.clear(id);
        }
    }
}
