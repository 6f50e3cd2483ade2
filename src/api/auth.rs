//! Auth Endpoints

use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, ForgotPasswordRequest, LoginCredentials, RegisterData, ResetPasswordRequest};

pub async fn login(api: &ApiClient, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
    api.post("/auth/login", credentials).await
}

pub async fn register(api: &ApiClient, data: &RegisterData) -> Result<AuthResponse, ApiError> {
    api.post("/auth/register", data).await
}

pub async fn forgot_password(api: &ApiClient, email: &str) -> Result<(), ApiError> {
    let body = ForgotPasswordRequest { email: email.to_string() };
    api.send_discarding(Method::POST, "/auth/forgot-password", &body).await
}

pub async fn reset_password(api: &ApiClient, token: &str, password: &str) -> Result<(), ApiError> {
    let body = ResetPasswordRequest {
        token: token.to_string(),
        password: password.to_string(),
    };
    api.send_discarding(Method::POST, "/auth/reset-password", &body).await
}
