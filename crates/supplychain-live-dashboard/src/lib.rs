/*
[INPUT]:  Public API exports for supplychain-live-dashboard crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod search;
pub mod view;

// Re-export main types for convenience
pub use config::DashboardConfig;
pub use search::run_instant_search;
pub use view::TerminalView;
