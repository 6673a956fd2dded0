/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public supply-chain live adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod live;
pub mod types;
pub mod view;
pub mod ws;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    DashboardClient,
    DashboardError,
    InstantSearch,
    Result,
    SearchInput,
    SearchQuery,
    SearchTarget,
    StatsSource,
};

// Re-export commonly used types from live
pub use live::{
    dashboard_handlers,
    ConnectionObserver,
    ConnectionState,
    DashboardRefresher,
    EventHandlers,
    LiveConfig,
    LiveExit,
    LiveHandlers,
    LiveRuntime,
    LiveUpdateClient,
    ReconnectPolicy,
    RefreshSummary,
    Scheduler,
    TimerId,
    TimerQueue,
    Transport,
};

// Re-export all types
pub use types::*;

pub use view::DashboardView;

// Re-export commonly used types from ws
pub use ws::{decode_event, InboundEvent, LiveSocket, OutboundMessage};
