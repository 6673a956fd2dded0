/*
[INPUT]:  Live channel configuration, host handlers, timers
[OUTPUT]: Reconnecting live client, its tokio driver and dashboard refresher
[POS]:    Live layer - connection lifecycle and periodic refresh
[UPDATE]: When adding ports or changing reconnection logic
*/

pub mod backoff;
pub mod client;
pub mod driver;
pub mod handlers;
pub mod ports;
pub mod refresh;
pub mod timer;

pub use backoff::{ReconnectPolicy, ReconnectState};
pub use client::{ConnectionState, LiveConfig, LiveUpdateClient};
pub use driver::{LiveExit, LiveRuntime, TokioLiveClient};
pub use handlers::{dashboard_handlers, DashboardHandlers, ViewObserver};
pub use ports::{ConnectionObserver, EventHandlers, LiveHandlers, Scheduler, TimerId, Transport};
pub use refresh::{DashboardRefresher, RefreshSummary};
pub use timer::TimerQueue;
