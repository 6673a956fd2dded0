/*
[INPUT]:  HTTP client configuration and dashboard endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - fire-and-forget dashboard collaborators
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod dashboard;
pub mod error;
pub mod search;

pub use error::{DashboardError, Result};

pub use client::{ClientConfig, DashboardClient, DEFAULT_STATS_PATH};
pub use dashboard::StatsSource;
pub use search::{InstantSearch, SearchInput, SearchQuery, SearchTarget};
