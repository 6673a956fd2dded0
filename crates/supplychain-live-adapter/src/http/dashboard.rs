/*
[INPUT]:  Order ids, configured stats path
[OUTPUT]: Dashboard counters, order tracking timelines, inventory status
[POS]:    HTTP layer - read-only dashboard endpoints
[UPDATE]: When adding new dashboard endpoints or changing response format
*/

use async_trait::async_trait;
use reqwest::Method;

use crate::http::{DashboardClient, Result};
use crate::types::{DashboardStats, InventoryStatusEntry, InventoryStatusResponse, OrderTracking, RecordId};

/// Anything that can produce a fresh set of dashboard counters
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_stats(&self) -> Result<DashboardStats>;
}

impl DashboardClient {
    /// Fetch dashboard counters
    ///
    /// GET {stats_path}
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let url = self.url(self.stats_path())?;
        self.send_json(self.request(Method::GET, url)).await
    }

    /// Tracking timeline for one order
    ///
    /// GET /api/orders/{order_id}/tracking/
    pub async fn order_tracking(&self, order_id: &RecordId) -> Result<OrderTracking> {
        let url = self.url(&format!("/api/orders/{}/tracking/", order_id))?;
        self.send_json(self.request(Method::GET, url)).await
    }

    /// Stock levels for the signed-in supplier's active products
    ///
    /// GET /api/inventory/status/
    pub async fn inventory_status(&self) -> Result<Vec<InventoryStatusEntry>> {
        let url = self.url("/api/inventory/status/")?;
        let response: InventoryStatusResponse = self.send_json(self.request(Method::GET, url)).await?;
        Ok(response.inventory)
    }
}

#[async_trait]
impl StatsSource for DashboardClient {
    async fn fetch_stats(&self) -> Result<DashboardStats> {
        self.dashboard_stats().await
    }
}
