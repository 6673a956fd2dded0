/*
[INPUT]:  Test configuration and fake host requirements
[OUTPUT]: Shared test doubles for transport, timers, handlers and view
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for supplychain-live-adapter tests

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use supplychain_live_adapter::http::search::SearchTarget;
use supplychain_live_adapter::{
    ConnectionObserver, DashboardError, DashboardStats, DashboardView, EventHandlers,
    InventoryUpdate, LiveHandlers, NotificationLevel, OrderStatus, OrderUpdate, RecordId,
    Scheduler, TimerId, TrackingEvent, TrackingUpdate, Transport,
};
use url::Url;
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn live_url() -> Url {
    Url::parse("ws://dashboard.test/ws/live/").expect("static url")
}

/// Transport that only records what the client asked for
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub connects: Vec<String>,
    pub sent: Vec<String>,
    pub disconnects: usize,
}

impl Transport for RecordingTransport {
    fn connect(&mut self, url: &Url) -> supplychain_live_adapter::Result<()> {
        self.connects.push(url.to_string());
        Ok(())
    }

    fn send_text(&mut self, text: String) -> supplychain_live_adapter::Result<()> {
        self.sent.push(text);
        Ok(())
    }

    fn disconnect(&mut self) {
        self.disconnects += 1;
    }
}

/// Transport whose sends always fail
#[derive(Debug, Default)]
pub struct BrokenPipeTransport;

impl Transport for BrokenPipeTransport {
    fn connect(&mut self, _url: &Url) -> supplychain_live_adapter::Result<()> {
        Ok(())
    }

    fn send_text(&mut self, _text: String) -> supplychain_live_adapter::Result<()> {
        Err(DashboardError::Transport("broken pipe".to_string()))
    }

    fn disconnect(&mut self) {}
}

/// Scheduler that never fires on its own; tests fire ids by hand
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pub timeouts: Vec<(TimerId, Duration)>,
    pub intervals: Vec<(TimerId, Duration)>,
    pub active: BTreeSet<TimerId>,
}

impl ManualScheduler {
    pub fn timeout_delays(&self) -> Vec<Duration> {
        self.timeouts.iter().map(|(_, delay)| *delay).collect()
    }

    pub fn last_timeout(&self) -> Option<TimerId> {
        self.timeouts.last().map(|(id, _)| *id)
    }

    pub fn last_interval(&self) -> Option<TimerId> {
        self.intervals.last().map(|(id, _)| *id)
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.active.contains(&id)
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.next += 1;
        let id = TimerId::new(self.next);
        self.timeouts.push((id, delay));
        self.active.insert(id);
        id
    }

    fn set_interval(&mut self, period: Duration) -> TimerId {
        self.next += 1;
        let id = TimerId::new(self.next);
        self.intervals.push((id, period));
        self.active.insert(id);
        id
    }

    fn clear(&mut self, id: TimerId) {
        self.active.remove(&id);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Order(OrderUpdate),
    Inventory(InventoryUpdate),
    Tracking(TrackingUpdate),
    Connected,
    ReconnectScheduled(u32, Duration),
    PermanentlyDisconnected,
}

/// Handler and observer sharing one ordered call log
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().expect("call log").clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| pred(call)).count()
    }

    pub fn handlers(&self) -> LiveHandlers {
        LiveHandlers::new(self.clone(), self.clone())
    }

    fn push(&self, call: Call) {
        self.0.lock().expect("call log").push(call);
    }
}

impl EventHandlers for CallLog {
    fn on_order_update(&mut self, update: OrderUpdate) {
        self.push(Call::Order(update));
    }

    fn on_inventory_update(&mut self, update: InventoryUpdate) {
        self.push(Call::Inventory(update));
    }

    fn on_tracking_update(&mut self, update: TrackingUpdate) {
        self.push(Call::Tracking(update));
    }
}

impl ConnectionObserver for CallLog {
    fn on_connected(&mut self) {
        self.push(Call::Connected);
    }

    fn on_reconnect_scheduled(&mut self, attempt: u32, delay: Duration) {
        self.push(Call::ReconnectScheduled(attempt, delay));
    }

    fn on_permanently_disconnected(&mut self) {
        self.push(Call::PermanentlyDisconnected);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    OrderStatus(String, OrderStatus),
    StockLevel(String, i64),
    Tracking(String, String),
    Notification(NotificationLevel, String),
    Stats(DashboardStats),
    Search(SearchTarget, String),
}

/// Rendering port that records every call
#[derive(Debug, Default)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().expect("view calls").clone()
    }

    pub fn contains(&self, call: &ViewCall) -> bool {
        self.calls().contains(call)
    }

    fn push(&self, call: ViewCall) {
        self.calls.lock().expect("view calls").push(call);
    }
}

impl DashboardView for RecordingView {
    fn render_order_status(&self, order_id: &RecordId, status: OrderStatus) {
        self.push(ViewCall::OrderStatus(order_id.to_string(), status));
    }

    fn render_stock_level(&self, product_id: &RecordId, quantity: i64) {
        self.push(ViewCall::StockLevel(product_id.to_string(), quantity));
    }

    fn render_tracking_event(&self, order_id: &RecordId, event: &TrackingEvent) {
        self.push(ViewCall::Tracking(order_id.to_string(), event.title.clone()));
    }

    fn show_notification(&self, message: &str, level: NotificationLevel) {
        self.push(ViewCall::Notification(level, message.to_string()));
    }

    fn render_stats(&self, stats: &DashboardStats) {
        self.push(ViewCall::Stats(stats.clone()));
    }

    fn render_search_results(&self, target: SearchTarget, body: &str) {
        self.push(ViewCall::Search(target, body.to_string()));
    }
}

pub const ORDER_UPDATE: &str =
    r#"{"type":"order_update","order_id":"5c1e","order_number":"ORD-1001","status":"shipped"}"#;

pub const LOW_STOCK_UPDATE: &str =
    r#"{"type":"inventory_update","product_id":7,"available_stock":0,"needs_reorder":true}"#;

pub const TRACKING_UPDATE: &str = r#"{"type":"tracking_update","order_id":"5c1e","event":{"event_type":"in_transit","title":"Left hub","location":"Rotterdam"}}"#;
