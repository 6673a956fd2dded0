/*
[INPUT]:  Host-provided transport, timers and callbacks
[OUTPUT]: Trait seams the live client is written against
[POS]:    Live layer - ports (no I/O lives here)
[UPDATE]: When the client needs a new capability from its host
*/

use std::time::Duration;
use url::Url;

use crate::http::Result;
use crate::types::{InventoryUpdate, OrderUpdate, TrackingUpdate};

/// Handle to a pending timeout or interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Timer port.
///
/// Fired timers are reported back through `LiveUpdateClient::on_timer`.
pub trait Scheduler {
    fn set_timeout(&mut self, delay: Duration) -> TimerId;
    fn set_interval(&mut self, period: Duration) -> TimerId;
    /// Clearing an unknown or already fired id is a no-op.
    fn clear(&mut self, id: TimerId);
}

/// Connection port.
///
/// `connect` only begins connecting; the outcome arrives later as
/// `on_open` or `on_close`. An `Err` from `connect` is treated as an
/// immediate close.
pub trait Transport {
    fn connect(&mut self, url: &Url) -> Result<()>;
    fn send_text(&mut self, text: String) -> Result<()>;
    fn disconnect(&mut self);
}

/// Per-type event handlers
pub trait EventHandlers: Send {
    fn on_order_update(&mut self, update: OrderUpdate);
    fn on_inventory_update(&mut self, update: InventoryUpdate);
    fn on_tracking_update(&mut self, update: TrackingUpdate);
}

/// Connection lifecycle notifications for the host
pub trait ConnectionObserver: Send {
    fn on_connected(&mut self);

    fn on_reconnect_scheduled(&mut self, _attempt: u32, _delay: Duration) {}

    /// Fired at most once per client.
    fn on_permanently_disconnected(&mut self);
}

/// Everything the host hands over on `start`
pub struct LiveHandlers {
    pub events: Box<dyn EventHandlers>,
    pub observer: Box<dyn ConnectionObserver>,
}

impl LiveHandlers {
    pub fn new(
        events: impl EventHandlers + 'static,
        observer: impl ConnectionObserver + 'static,
    ) -> Self {
        Self {
            events: Box::new(events),
            observer: Box::new(observer),
        }
    }
}
