/*
[INPUT]:  Live channel URL and frames
[OUTPUT]: Socket events and decoded live messages
[POS]:    WebSocket layer - real-time data stream
[UPDATE]: When adding new event types or changing connection logic
*/

pub mod client;
pub mod message;

pub use client::{LiveSocket, SocketEvent, SocketEventKind};
pub use message::{decode_event, InboundEvent, OutboundMessage};
