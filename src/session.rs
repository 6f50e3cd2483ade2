//! Session Holder
//!
//! Owns the sign-in lifecycle: the start-up token check, login, register,
//! logout and 401 handling. Also keeps the navbar's notification list
//! current, since that list belongs to the signed-in user.

use chrono::Utc;
use leptos::prelude::*;
use tracing::{error, info, warn};

use crate::api::{self, ApiClient};
use crate::error::ApiError;
use crate::jwt::{self, TokenState};
use crate::models::{AuthResponse, LoginCredentials, RegisterData, User};
use crate::router::{Navigator, Route};
use crate::store::{
    store_mark_all_read, store_mark_read, store_set_notifications, store_sign_in, store_sign_out,
    store_update_notification, AppStore, AppStateStoreFields, SessionStatus,
};

const DEFAULT_LANDING: &str = "/dashboard";

/// What the start-up check does with the stored token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupAction {
    Anonymous,
    /// Clear the token and go to login
    Logout(String),
    FetchUser,
}

pub fn startup_action(state: &TokenState) -> StartupAction {
    match state {
        TokenState::Missing => StartupAction::Anonymous,
        TokenState::Invalid(reason) => StartupAction::Logout(reason.clone()),
        TokenState::Expired => StartupAction::Logout("token expired".to_string()),
        TokenState::Valid(_) => StartupAction::FetchUser,
    }
}

#[derive(Clone, Copy)]
pub struct AuthSession {
    api: ApiClient,
    store: AppStore,
    nav: Navigator,
}

impl AuthSession {
    pub fn new(api: ApiClient, store: AppStore, nav: Navigator) -> Self {
        Self { api, store, nav }
    }

    pub fn api(&self) -> ApiClient {
        self.api
    }

    pub fn store(&self) -> AppStore {
        self.store
    }

    /// Run once at start-up: validate the stored token and load the user
    pub async fn check_auth_status(&self) {
        let token = self.api.tokens().load();
        match startup_action(&jwt::inspect(token.as_deref(), Utc::now())) {
            StartupAction::Anonymous => {
                self.store.status().set(SessionStatus::Anonymous);
            }
            StartupAction::Logout(reason) => {
                info!("discarding stored token: {}", reason);
                self.logout();
            }
            StartupAction::FetchUser => match api::current_user(&self.api).await {
                Ok(user) => {
                    info!(user_id = %user.id, "session restored");
                    store_sign_in(&self.store, user);
                    self.load_notifications().await;
                }
                Err(e) => {
                    warn!("failed to load current user: {}", e);
                    self.logout();
                }
            },
        }
    }

    pub async fn login(&self, credentials: LoginCredentials, return_url: Option<String>) -> Result<(), String> {
        match api::login(&self.api, &credentials).await {
            Ok(response) => {
                self.accept(response)?;
                let target = return_url.filter(|url| url.starts_with('/'));
                self.nav.navigate_path(target.as_deref().unwrap_or(DEFAULT_LANDING));
                self.load_notifications().await;
                Ok(())
            }
            Err(e) => {
                error!("login failed: {}", e);
                Err(e.user_message_or("Login failed"))
            }
        }
    }

    pub async fn register(&self, data: RegisterData) -> Result<(), String> {
        match api::register(&self.api, &data).await {
            Ok(response) => {
                self.accept(response)?;
                self.nav.navigate_path(DEFAULT_LANDING);
                Ok(())
            }
            Err(e) => {
                error!("registration failed: {}", e);
                Err(e.user_message_or("Registration failed"))
            }
        }
    }

    fn accept(&self, response: AuthResponse) -> Result<(), String> {
        self.api.tokens().save(&response.token).map_err(|e| {
            error!("failed to store token: {}", e);
            e.user_message()
        })?;
        info!(user_id = %response.user.id, "signed in");
        store_sign_in(&self.store, response.user);
        Ok(())
    }

    pub fn logout(&self) {
        self.api.tokens().clear();
        store_sign_out(&self.store);
        self.nav.navigate(Route::Login { return_url: None });
    }

    /// Log a failed call, end the session on 401, and return the text to show
    pub fn handle_error(&self, context: &str, err: &ApiError) -> String {
        error!("{}: {}", context, err);
        if err.is_unauthorized() {
            self.logout();
        }
        err.user_message()
    }

    /// Replace the stored user, e.g. after a profile edit
    pub fn refresh_user(&self, user: User) {
        store_sign_in(&self.store, user);
    }

    pub fn current_user(&self) -> Option<User> {
        self.store.user().get()
    }

    // ========================
    // Notifications
    // ========================

    pub async fn load_notifications(&self) {
        match api::list_notifications(&self.api).await {
            Ok(list) => store_set_notifications(&self.store, list),
            Err(e) => {
                if e.is_unauthorized() {
                    store_set_notifications(&self.store, Vec::new());
                }
                self.handle_error("failed to load notifications", &e);
            }
        }
    }

    pub async fn mark_notification_read(&self, id: String) -> Result<(), String> {
        match api::mark_notification_read(&self.api, &id).await {
            Ok(updated) => {
                store_mark_read(&self.store, &id);
                store_update_notification(&self.store, updated);
                Ok(())
            }
            Err(e) => Err(self.handle_error("failed to mark notification read", &e)),
        }
    }

    pub async fn mark_all_notifications_read(&self) -> Result<(), String> {
        match api::mark_all_notifications_read(&self.api).await {
            Ok(()) => {
                store_mark_all_read(&self.store);
                Ok(())
            }
            Err(e) => Err(self.handle_error("failed to mark notifications read", &e)),
        }
    }
}

/// Get the session from context
pub fn use_session() -> AuthSession {
    expect_context::<AuthSession>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::Claims;

    #[test]
    fn test_expired_or_invalid_token_logs_out() {
        assert!(matches!(startup_action(&TokenState::Expired), StartupAction::Logout(_)));
        assert_eq!(
            startup_action(&TokenState::Invalid("bad payload".into())),
            StartupAction::Logout("bad payload".into())
        );
    }

    #[test]
    fn test_missing_token_is_anonymous() {
        assert_eq!(startup_action(&TokenState::Missing), StartupAction::Anonymous);
    }

    #[test]
    fn test_valid_token_fetches_user() {
        let claims = Claims { user_id: Some("u1".into()), email: None, role: None, exp: None };
        assert_eq!(startup_action(&TokenState::Valid(claims)), StartupAction::FetchUser);
    }
}
