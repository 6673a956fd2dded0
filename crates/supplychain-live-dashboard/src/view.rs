/*
[INPUT]:  Live events, dashboard counters, tracking and inventory responses
[OUTPUT]: Styled lines on stdout
[POS]:    Presentation layer - terminal rendering of the dashboard port
[UPDATE]: When changing what the watcher prints
*/

use chrono::Local;
use console::style;
use supplychain_live_adapter::{
    DashboardStats, DashboardView, InventoryStatusEntry, NotificationLevel, OrderStatus,
    OrderTracking, RecordId, SearchTarget, StockStatus, TrackingEvent,
};
use tracing::debug;

/// Prints every dashboard update as one line on stdout.
#[derive(Debug, Default)]
pub struct TerminalView;

impl TerminalView {
    pub fn new() -> Self {
        Self
    }

    fn emit(&self, line: String) {
        println!("{} {}", style(Local::now().format("%H:%M:%S")).dim(), line);
    }

    pub fn print_tracking(&self, tracking: &OrderTracking) {
        println!(
            "{} {}",
            style(format!("Order {}", tracking.order_number)).bold(),
            style(tracking.status).cyan()
        );
        if tracking.tracking_events.is_empty() {
            println!("{}", style("No tracking events yet.").yellow());
            return;
        }
        for event in &tracking.tracking_events {
            println!("  {}", timeline_line(event));
        }
    }

    pub fn print_inventory(&self, entries: &[InventoryStatusEntry]) {
        if entries.is_empty() {
            println!("{}", style("No active products.").yellow());
            return;
        }
        for entry in entries {
            let line = inventory_line(entry);
            match entry.stock_status {
                StockStatus::InStock => println!("{}", line),
                StockStatus::LowStock => println!("{}", style(line).yellow()),
                StockStatus::OutOfStock => println!("{}", style(line).red()),
            }
        }
    }
}

impl DashboardView for TerminalView {
    fn render_order_status(&self, order_id: &RecordId, status: OrderStatus) {
        self.emit(format!("order {} -> {}", order_id, style(status).cyan()));
    }

    fn render_stock_level(&self, product_id: &RecordId, quantity: i64) {
        self.emit(format!("stock {product_id}: {quantity} available"));
    }

    fn render_tracking_event(&self, order_id: &RecordId, event: &TrackingEvent) {
        self.emit(format!("order {order_id}: {}", timeline_line(event)));
    }

    fn show_notification(&self, message: &str, level: NotificationLevel) {
        let styled = match level {
            NotificationLevel::Info => style(message).blue(),
            NotificationLevel::Success => style(message).green(),
            NotificationLevel::Warning => style(message).yellow(),
            NotificationLevel::Danger => style(message).red().bold(),
        };
        self.emit(styled.to_string());
    }

    fn render_stats(&self, stats: &DashboardStats) {
        let line = stats_line(stats);
        if line.is_empty() {
            debug!("dashboard stats response carried no counters");
            return;
        }
        self.emit(line);
    }

    fn render_search_results(&self, target: SearchTarget, body: &str) {
        println!("{}", style(format!("{target} results")).bold());
        println!("{body}");
    }
}

/// `key=value` pairs for every counter present, known counters first.
pub fn stats_line(stats: &DashboardStats) -> String {
    let known = [
        ("products", stats.total_products),
        ("active_products", stats.active_products),
        ("orders", stats.total_orders),
        ("pending", stats.pending_orders),
        ("active_orders", stats.active_orders),
        ("low_stock", stats.low_stock_products),
    ];

    let mut parts: Vec<String> = known
        .iter()
        .filter_map(|(name, value)| value.map(|v| format!("{name}={v}")))
        .collect();
    parts.extend(
        stats
            .extra
            .iter()
            .filter(|(_, value)| value.is_number() || value.is_string())
            .map(|(name, value)| match value.as_str() {
                Some(text) => format!("{name}={text}"),
                None => format!("{name}={value}"),
            }),
    );
    parts.join(" ")
}

pub fn timeline_line(event: &TrackingEvent) -> String {
    let mut line = format!("[{}] {}", event.event_type.label(), event.title);
    if !event.location.is_empty() {
        line.push_str(&format!(" @ {}", event.location));
    }
    if let Some(timestamp) = event.timestamp {
        line.push_str(&format!(" ({})", timestamp.format("%Y-%m-%d %H:%M")));
    }
    line
}

pub fn inventory_line(entry: &InventoryStatusEntry) -> String {
    let mut line = format!(
        "{:<12} {:<32} {:>6} available ({} reserved)",
        entry.sku, entry.product_name, entry.available_stock, entry.reserved_stock
    );
    if entry.needs_reorder {
        line.push_str(&format!(" reorder at {}", entry.reorder_point));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplychain_live_adapter::TrackingEventType;

    #[test]
    fn stats_line_skips_missing_counters() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"total_orders": 14, "pending_orders": 3, "open_tickets": 2, "chart": [1, 2]}"#,
        )
        .unwrap();
        assert_eq!(stats_line(&stats), "orders=14 pending=3 open_tickets=2");
        assert_eq!(stats_line(&DashboardStats::default()), "");
    }

    #[test]
    fn timeline_line_includes_location() {
        let event = TrackingEvent {
            event_type: TrackingEventType::InTransit,
            title: "Left hub".to_string(),
            description: String::new(),
            location: "Rotterdam".to_string(),
            timestamp: None,
        };
        let line = timeline_line(&event);
        assert!(line.ends_with("Left hub @ Rotterdam"), "{line}");
    }

    #[test]
    fn inventory_line_flags_reorder() {
        let entry = InventoryStatusEntry {
            product_id: RecordId::Int(7),
            product_name: "Hex bolt M8".to_string(),
            sku: "BOLT-M8".to_string(),
            current_stock: 12,
            available_stock: 10,
            reserved_stock: 2,
            stock_status: StockStatus::LowStock,
            needs_reorder: true,
            reorder_point: 20,
        };
        let line = inventory_line(&entry);
        assert!(line.starts_with("BOLT-M8"));
        assert!(line.ends_with("reorder at 20"));
    }
}
