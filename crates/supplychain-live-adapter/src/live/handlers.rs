/*
[INPUT]:  Decoded live events and connection lifecycle callbacks
[OUTPUT]: Rendering-port calls and host notifications
[POS]:    Live layer - default handlers wiring events to a DashboardView
[UPDATE]: When changing what each event patches or announces
*/

use std::sync::Arc;
use std::time::Duration;

use super::ports::{ConnectionObserver, EventHandlers, LiveHandlers};
use crate::types::{InventoryUpdate, NotificationLevel, OrderUpdate, TrackingUpdate};
use crate::view::DashboardView;

/// Routes each live event to the matching view fragment
pub struct DashboardHandlers<V> {
    view: Arc<V>,
}

impl<V: DashboardView> DashboardHandlers<V> {
    pub fn new(view: Arc<V>) -> Self {
        Self { view }
    }
}

impl<V: DashboardView + 'static> EventHandlers for DashboardHandlers<V> {
    fn on_order_update(&mut self, update: OrderUpdate) {
        self.view.render_order_status(&update.order_id, update.status);
        self.view.show_notification(
            &format!(
                "Order {} status updated to {}",
                update.reference(),
                update.status
            ),
            NotificationLevel::Info,
        );
    }

    fn on_inventory_update(&mut self, update: InventoryUpdate) {
        self.view
            .render_stock_level(&update.product_id, update.available_stock);
        if update.needs_reorder {
            self.view.show_notification(
                &format!(
                    "Low stock alert: {} ({} available)",
                    update.display_name(),
                    update.available_stock
                ),
                NotificationLevel::Warning,
            );
        }
    }

    fn on_tracking_update(&mut self, update: TrackingUpdate) {
        self.view
            .render_tracking_event(&update.order_id, &update.event);
        let reference = update
            .order_number
            .clone()
            .unwrap_or_else(|| update.order_id.to_string());
        self.view.show_notification(
            &format!("Order {}: {}", reference, update.event.title),
            NotificationLevel::Info,
        );
    }
}

/// Surfaces connection lifecycle as view notifications
pub struct ViewObserver<V> {
    view: Arc<V>,
}

impl<V: DashboardView> ViewObserver<V> {
    pub fn new(view: Arc<V>) -> Self {
        Self { view }
    }
}

impl<V: DashboardView + 'static> ConnectionObserver for ViewObserver<V> {
    fn on_connected(&mut self) {
        self.view
            .show_notification("Live updates connected", NotificationLevel::Success);
    }

    fn on_reconnect_scheduled(&mut self, attempt: u32, delay: Duration) {
        self.view.show_notification(
            &format!(
                "Live updates interrupted; retry {attempt} in {}s",
                delay.as_secs()
            ),
            NotificationLevel::Warning,
        );
    }

    fn on_permanently_disconnected(&mut self) {
        self.view.show_notification(
            "Live updates unavailable; reload to try again",
            NotificationLevel::Danger,
        );
    }
}

/// Default handler bundle rendering into `view`
pub fn dashboard_handlers<V: DashboardView + 'static>(view: Arc<V>) -> LiveHandlers {
    LiveHandlers::new(
        DashboardHandlers::new(view.clone()),
        ViewObserver::new(view),
    )
}
