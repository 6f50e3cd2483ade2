//! User Endpoints

use super::{segment, ApiClient};
use crate::error::ApiError;
use crate::models::{ProfileUpdate, User};

pub async fn current_user(api: &ApiClient) -> Result<User, ApiError> {
    api.get("/users/me", &[]).await
}

pub async fn update_profile(api: &ApiClient, update: &ProfileUpdate) -> Result<User, ApiError> {
    api.put("/users/me", update).await
}

pub async fn list_users(api: &ApiClient) -> Result<Vec<User>, ApiError> {
    api.get("/users", &[]).await
}

pub async fn get_user(api: &ApiClient, id: &str) -> Result<User, ApiError> {
    api.get(&format!("/users/{}", segment(id)), &[]).await
}

/// Server-side user search used when picking project members
pub async fn search_users(api: &ApiClient, query: &str) -> Result<Vec<User>, ApiError> {
    api.get("/users/search", &[("q", query)]).await
}
