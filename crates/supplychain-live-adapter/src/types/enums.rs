/*
[INPUT]:  Dashboard schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for live events and HTTP payloads
[UPDATE]: When server-side choice lists change or new types added
*/

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    #[serde(alias = "canceled")]
    Cancelled,
    Returned,
    #[serde(other)]
    Unrecognized,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
            OrderStatus::Unrecognized => "unrecognized",
        }
    }

    /// Orders still moving through the pipeline
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending
                | OrderStatus::Confirmed
                | OrderStatus::Processing
                | OrderStatus::Shipped
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingEventType {
    OrderPlaced,
    OrderConfirmed,
    InProduction,
    QualityCheck,
    Packaged,
    Shipped,
    InTransit,
    OutForDelivery,
    Delivered,
    Exception,
    #[serde(other)]
    Unrecognized,
}

impl TrackingEventType {
    pub fn label(&self) -> &'static str {
        match self {
            TrackingEventType::OrderPlaced => "Order Placed",
            TrackingEventType::OrderConfirmed => "Order Confirmed",
            TrackingEventType::InProduction => "In Production",
            TrackingEventType::QualityCheck => "Quality Check",
            TrackingEventType::Packaged => "Packaged",
            TrackingEventType::Shipped => "Shipped",
            TrackingEventType::InTransit => "In Transit",
            TrackingEventType::OutForDelivery => "Out for Delivery",
            TrackingEventType::Delivered => "Delivered",
            TrackingEventType::Exception => "Exception/Delay",
            TrackingEventType::Unrecognized => "Update",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Classify available stock against the reorder point.
    pub fn classify(available_stock: i64, reorder_point: i64) -> Self {
        if available_stock <= 0 {
            StockStatus::OutOfStock
        } else if available_stock <= reorder_point {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Severity attached to host notifications (maps onto alert styles)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Danger,
}
