/*
[INPUT]:  Decoded live events, dashboard counters, search responses
[OUTPUT]: Host-side rendering side effects
[POS]:    Rendering port - implemented by the host, never by this crate
[UPDATE]: When a new kind of fragment needs patching
*/

use crate::http::search::SearchTarget;
use crate::types::{DashboardStats, NotificationLevel, OrderStatus, RecordId, TrackingEvent};

/// Presentational helpers supplied by the host.
///
/// Calls are synchronous and must not block; implementations patch whatever
/// surface they own (DOM, terminal, test recorder).
pub trait DashboardView: Send + Sync {
    fn render_order_status(&self, order_id: &RecordId, status: OrderStatus);

    fn render_stock_level(&self, product_id: &RecordId, quantity: i64);

    fn render_tracking_event(&self, order_id: &RecordId, event: &TrackingEvent);

    fn show_notification(&self, message: &str, level: NotificationLevel);

    fn render_stats(&self, _stats: &DashboardStats) {}

    fn render_search_results(&self, _target: SearchTarget, _body: &str) {}
}
