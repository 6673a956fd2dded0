/*
[INPUT]:  Live event payloads and dashboard JSON responses
[OUTPUT]: Strongly typed records passed through to the rendering port
[POS]:    Data layer - payload records (no behaviour beyond small derivations)
[UPDATE]: When server payload fields change
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::enums::{OrderStatus, PaymentStatus, StockStatus, TrackingEventType};

/// Reorder point the server applies when none is configured for a product.
pub const DEFAULT_REORDER_POINT: i64 = 20;

/// Primary key of a server-side record.
///
/// Older endpoints emit integer ids, newer ones emit UUID strings; both are
/// displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{id}"),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// `order_update` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub order_id: RecordId,
    #[serde(default)]
    pub order_number: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

impl OrderUpdate {
    /// Human-facing reference: order number when present, otherwise the id.
    pub fn reference(&self) -> String {
        self.order_number
            .clone()
            .unwrap_or_else(|| self.order_id.to_string())
    }
}

/// `inventory_update` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryUpdate {
    pub product_id: RecordId,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub current_stock: Option<i64>,
    pub available_stock: i64,
    #[serde(default)]
    pub reserved_stock: Option<i64>,
    #[serde(default)]
    pub reorder_point: Option<i64>,
    #[serde(default)]
    pub needs_reorder: bool,
    #[serde(default)]
    pub stock_status: Option<StockStatus>,
}

impl InventoryUpdate {
    /// Stock status as sent, or derived from available stock.
    pub fn stock_status(&self) -> StockStatus {
        self.stock_status.unwrap_or_else(|| {
            StockStatus::classify(
                self.available_stock,
                self.reorder_point.unwrap_or(DEFAULT_REORDER_POINT),
            )
        })
    }

    pub fn display_name(&self) -> String {
        self.product_name
            .clone()
            .unwrap_or_else(|| format!("product {}", self.product_id))
    }
}

/// Single entry on an order's tracking timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub event_type: TrackingEventType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// `tracking_update` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingUpdate {
    pub order_id: RecordId,
    #[serde(default)]
    pub order_number: Option<String>,
    pub event: TrackingEvent,
}

/// Dashboard counters
///
/// Supplier dashboards carry product counters, customer dashboards only the
/// order ones; anything else the server adds lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_products: Option<u64>,
    #[serde(default)]
    pub active_products: Option<u64>,
    #[serde(default)]
    pub total_orders: Option<u64>,
    #[serde(default)]
    pub pending_orders: Option<u64>,
    #[serde(default)]
    pub active_orders: Option<u64>,
    #[serde(default)]
    pub low_stock_products: Option<u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// GET /api/orders/{id}/tracking/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTracking {
    pub order_number: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub tracking_events: Vec<TrackingEvent>,
}

/// Row of GET /api/inventory/status/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStatusEntry {
    pub product_id: RecordId,
    pub product_name: String,
    pub sku: String,
    pub current_stock: i64,
    pub available_stock: i64,
    pub reserved_stock: i64,
    pub stock_status: StockStatus,
    pub needs_reorder: bool,
    pub reorder_point: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStatusResponse {
    #[serde(default)]
    pub inventory: Vec<InventoryStatusEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_numbers_and_uuids() {
        let numeric: RecordId = serde_json::from_str("7").unwrap();
        assert_eq!(numeric, RecordId::Int(7));
        assert_eq!(numeric.to_string(), "7");

        let uuid: RecordId =
            serde_json::from_str("\"0b7e3a52-8f6a-4c2f-9a55-3f1f0e6f9d10\"").unwrap();
        assert_eq!(uuid.to_string(), "0b7e3a52-8f6a-4c2f-9a55-3f1f0e6f9d10");
    }

    #[test]
    fn inventory_status_derived_when_missing() {
        let update: InventoryUpdate = serde_json::from_str(
            r#"{"product_id": 7, "available_stock": 12, "needs_reorder": true}"#,
        )
        .unwrap();
        assert_eq!(update.stock_status(), StockStatus::LowStock);
        assert_eq!(update.display_name(), "product 7");
    }

    #[test]
    fn tracking_event_parses_django_isoformat() {
        let event: TrackingEvent = serde_json::from_str(
            r#"{
                "event_type": "in_transit",
                "title": "Left hub",
                "description": "Departed Rotterdam",
                "location": "Rotterdam",
                "timestamp": "2024-05-01T10:00:00.123456+00:00"
            }"#,
        )
        .unwrap();
        assert_eq!(event.event_type, TrackingEventType::InTransit);
        assert!(event.timestamp.is_some());
    }

    #[test]
    fn dashboard_stats_keeps_unknown_counters() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"total_orders": 14, "pending_orders": 3, "open_tickets": 2}"#,
        )
        .unwrap();
        assert_eq!(stats.total_orders, Some(14));
        assert_eq!(stats.total_products, None);
        assert_eq!(stats.extra.get("open_tickets"), Some(&serde_json::json!(2)));
    }
}
