//! Dashboard Endpoints

use super::ApiClient;
use crate::error::ApiError;
use crate::models::DashboardStats;

pub async fn dashboard_stats(api: &ApiClient) -> Result<DashboardStats, ApiError> {
    api.get("/dashboard/stats", &[]).await
}
