/*
[INPUT]:  Raw live channel text frames
[OUTPUT]: Parsed InboundEvent values, serialized outbound frames
[POS]:    WebSocket layer - message parsing and validation
[UPDATE]: When adding new event types or changing format
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

use crate::http::{DashboardError, Result};
use crate::types::{InventoryUpdate, OrderUpdate, TrackingUpdate};

const UNKNOWN_LOG_LIMIT: usize = 3;
const PARSE_FAIL_LOG_LIMIT: usize = 3;
const RAW_LOG_MAX_BYTES: usize = 1024;

static UNKNOWN_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);
static PARSE_FAIL_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Server-pushed live events, keyed on the `type` field
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    OrderUpdate(OrderUpdate),
    InventoryUpdate(InventoryUpdate),
    TrackingUpdate(TrackingUpdate),
    /// Reply to our heartbeat; nothing tracks it
    Pong,
    Unknown { kind: String, payload: Value },
}

impl InboundEvent {
    pub fn kind(&self) -> &str {
        match self {
            InboundEvent::OrderUpdate(_) => "order_update",
            InboundEvent::InventoryUpdate(_) => "inventory_update",
            InboundEvent::TrackingUpdate(_) => "tracking_update",
            InboundEvent::Pong => "pong",
            InboundEvent::Unknown { kind, .. } => kind,
        }
    }
}

/// Client-to-server frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    Ping,
}

impl OutboundMessage {
    pub fn to_text(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Decode one text frame.
///
/// Fails with `MalformedPayload` when the frame is not a JSON object with a
/// string `type`, or when a known type carries fields of the wrong shape.
pub fn decode_event(text: &str) -> Result<InboundEvent> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| DashboardError::MalformedPayload(err.to_string()))?;

    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| DashboardError::MalformedPayload("missing string field `type`".to_string()))?
        .to_string();

    let event = match kind.as_str() {
        "order_update" => InboundEvent::OrderUpdate(from_payload(value)?),
        "inventory_update" => InboundEvent::InventoryUpdate(from_payload(value)?),
        "tracking_update" => InboundEvent::TrackingUpdate(from_payload(value)?),
        "pong" => InboundEvent::Pong,
        _ => InboundEvent::Unknown {
            kind,
            payload: value,
        },
    };

    Ok(event)
}

fn from_payload<T: for<'de> Deserialize<'de>>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| DashboardError::MalformedPayload(err.to_string()))
}

pub(crate) fn log_unknown_once(kind: &str, raw: &str) {
    let count = UNKNOWN_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < UNKNOWN_LOG_LIMIT {
        info!(
            sample_index = count + 1,
            sample_limit = UNKNOWN_LOG_LIMIT,
            kind,
            "live message type unrecognized"
        );
        let preview = truncate_for_log(raw, RAW_LOG_MAX_BYTES);
        debug!(kind, message = %preview, "live message type unrecognized");
    } else {
        debug!(kind, bytes = raw.len(), "live message type unrecognized");
    }
}

pub(crate) fn log_parse_fail_once(err: &DashboardError, raw: &str) {
    let count = PARSE_FAIL_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < PARSE_FAIL_LOG_LIMIT {
        info!(
            sample_index = count + 1,
            sample_limit = PARSE_FAIL_LOG_LIMIT,
            error = %err,
            bytes = raw.len(),
            "live message parse failed"
        );
        let preview = truncate_for_log(raw, RAW_LOG_MAX_BYTES);
        debug!(error = %err, message = %preview, "live message parse failed");
    } else {
        debug!(error = %err, bytes = raw.len(), "live message parse failed");
    }
}

pub(crate) fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::with_capacity(end + 3);
    out.push_str(&value[..end]);
    out.push_str("...");
    out
}
