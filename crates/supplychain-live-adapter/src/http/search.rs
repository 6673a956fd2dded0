/*
[INPUT]:  Search target key and the text typed into its filter box
[OUTPUT]: Debounced search queries and pass-through result bodies
[POS]:    HTTP layer - instant search/filter endpoints
[UPDATE]: When list pages gain or rename filter parameters
*/

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Method;
use tracing::debug;

use crate::http::{DashboardClient, Result};
use crate::live::ports::{Scheduler, TimerId};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// List page an instant-search box filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchTarget {
    Products,
    Suppliers,
    Orders,
    Inventory,
}

impl SearchTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchTarget::Products => "products",
            SearchTarget::Suppliers => "suppliers",
            SearchTarget::Orders => "orders",
            SearchTarget::Inventory => "inventory",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            SearchTarget::Products => "/products/",
            SearchTarget::Suppliers => "/suppliers/",
            SearchTarget::Orders => "/orders/",
            SearchTarget::Inventory => "/inventory/",
        }
    }

    /// Query parameter the list view filters on
    pub fn param(&self) -> &'static str {
        match self {
            SearchTarget::Products | SearchTarget::Suppliers => "search",
            SearchTarget::Orders => "status",
            SearchTarget::Inventory => "stock_status",
        }
    }
}

impl fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchTarget {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "products" | "product" => Ok(SearchTarget::Products),
            "suppliers" | "supplier" => Ok(SearchTarget::Suppliers),
            "orders" | "order" => Ok(SearchTarget::Orders),
            "inventory" => Ok(SearchTarget::Inventory),
            other => Err(format!(
                "unknown search target `{other}` (expected products, suppliers, orders or inventory)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub target: SearchTarget,
    pub query: String,
}

impl DashboardClient {
    /// Run one instant-search query; the body is returned verbatim
    ///
    /// GET /{target}/?{param}={query}
    pub async fn search(&self, target: SearchTarget, query: &str) -> Result<String> {
        let mut url = self.url(target.path())?;
        url.query_pairs_mut().append_pair(target.param(), query);
        debug!(%target, query, "instant search request");
        self.send_text(self.request(Method::GET, url)).await
    }
}

/// What the host should do after a keystroke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInput {
    /// Query armed; wait for the debounce timer
    Pending,
    /// Box emptied; clear results without a request
    Clear,
}

/// Debounces keystrokes in one search box.
///
/// Only the last text typed within the debounce window becomes a query,
/// and re-submitting the query already sent is suppressed.
pub struct InstantSearch<S> {
    target: SearchTarget,
    debounce: Duration,
    scheduler: S,
    pending: Option<(TimerId, String)>,
    last_sent: Option<String>,
}

impl<S: Scheduler> InstantSearch<S> {
    pub fn new(target: SearchTarget, debounce: Duration, scheduler: S) -> Self {
        Self {
            target,
            debounce,
            scheduler,
            pending: None,
            last_sent: None,
        }
    }

    pub fn target(&self) -> SearchTarget {
        self.target
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn on_input(&mut self, text: &str) -> SearchInput {
        if let Some((id, _)) = self.pending.take() {
            self.scheduler.clear(id);
        }

        let query = text.trim();
        if query.is_empty() {
            self.last_sent = None;
            return SearchInput::Clear;
        }

        let id = self.scheduler.set_timeout(self.debounce);
        self.pending = Some((id, query.to_string()));
        SearchInput::Pending
    }

    /// Timer fired; returns the query to send, if any.
    pub fn on_timer(&mut self, id: TimerId) -> Option<SearchQuery> {
        match &self.pending {
            Some((pending_id, _)) if *pending_id == id => {}
            _ => return None,
        }
        let (_, query) = self.pending.take()?;

        if self.last_sent.as_deref() == Some(query.as_str()) {
            debug!(target = %self.target, %query, "search unchanged; skipping request");
            return None;
        }
        self.last_sent = Some(query.clone());

        Some(SearchQuery {
            target: self.target,
            query,
        })
    }
}
