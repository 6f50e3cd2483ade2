//! Project Endpoints

use reqwest::Method;

use super::{segment, ApiClient};
use crate::error::ApiError;
use crate::models::{CreateProjectRequest, Project, UpdateProjectRequest, User};

pub async fn list_projects(api: &ApiClient) -> Result<Vec<Project>, ApiError> {
    api.get("/projects", &[]).await
}

/// Newest projects first, at most `limit`
pub async fn recent_projects(api: &ApiClient, limit: usize) -> Result<Vec<Project>, ApiError> {
    let limit = limit.to_string();
    api.get("/projects", &[("limit", limit.as_str()), ("sort", "-createdAt")]).await
}

pub async fn get_project(api: &ApiClient, id: &str) -> Result<Project, ApiError> {
    api.get(&format!("/projects/{}", segment(id)), &[]).await
}

pub async fn project_members(api: &ApiClient, id: &str) -> Result<Vec<User>, ApiError> {
    api.get(&format!("/projects/{}/members", segment(id)), &[]).await
}

pub async fn create_project(api: &ApiClient, request: &CreateProjectRequest) -> Result<(), ApiError> {
    api.send_discarding(Method::POST, "/projects", request).await
}

pub async fn update_project(api: &ApiClient, id: &str, request: &UpdateProjectRequest) -> Result<(), ApiError> {
    api.send_discarding(Method::PUT, &format!("/projects/{}", segment(id)), request).await
}

pub async fn delete_project(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.delete(&format!("/projects/{}", segment(id))).await
}
