//! Notification Endpoints

use reqwest::Method;
use serde_json::json;

use super::{segment, ApiClient};
use crate::error::ApiError;
use crate::models::Notification;

pub async fn list_notifications(api: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    api.get("/notifications", &[]).await
}

pub async fn mark_notification_read(api: &ApiClient, id: &str) -> Result<Notification, ApiError> {
    api.put(&format!("/notifications/{}/read", segment(id)), &json!({})).await
}

pub async fn mark_all_notifications_read(api: &ApiClient) -> Result<(), ApiError> {
    api.send_discarding(Method::PUT, "/notifications/read-all", &json!({})).await
}
