// Dashboard endpoint

use tracing::debug;

use crate::client::StoreClient;
use crate::error::Error;
use crate::models::DashboardStats;

impl StoreClient {
    /// Fetch the aggregate inventory statistics.
    ///
    /// `GET /api/dashboard` -- computed server-side; clients refetch on
    /// each dashboard visit rather than deriving locally.
    pub async fn get_stats(&self) -> Result<DashboardStats, Error> {
        let url = self.api_url("dashboard");
        debug!("fetching dashboard stats");
        self.get(url).await
    }
}
