//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds the
//! session (user and flags) and the notification list shown in the navbar.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Notification, User};

/// Where the start-up session check stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// Token present but not yet confirmed by the server
    #[default]
    Checking,
    Anonymous,
    Authenticated,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, if any
    pub user: Option<User>,
    pub status: SessionStatus,
    pub is_logged_in: bool,
    pub is_admin: bool,
    /// Notifications of the signed-in user, as last fetched
    pub notifications: Vec<Notification>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Record a confirmed user; the admin flag follows the user's role
pub fn store_sign_in(store: &AppStore, user: User) {
    store.is_admin().set(user.is_admin());
    store.user().set(Some(user));
    store.is_logged_in().set(true);
    store.status().set(SessionStatus::Authenticated);
}

/// Forget the user, flags and notifications
pub fn store_sign_out(store: &AppStore) {
    store.user().set(None);
    store.is_logged_in().set(false);
    store.is_admin().set(false);
    store.status().set(SessionStatus::Anonymous);
    store.notifications().write().clear();
}

pub fn store_set_notifications(store: &AppStore, notifications: Vec<Notification>) {
    store.notifications().set(notifications);
}

/// Replace one notification with the server's copy
pub fn store_update_notification(store: &AppStore, updated: Notification) {
    replace_notification(&mut store.notifications().write(), updated);
}

pub fn store_mark_read(store: &AppStore, id: &str) {
    mark_read(&mut store.notifications().write(), id);
}

pub fn store_mark_all_read(store: &AppStore) {
    mark_all_read(&mut store.notifications().write());
}

// ========================
// Notification list edits
// ========================

pub fn replace_notification(list: &mut [Notification], updated: Notification) {
    if let Some(slot) = list.iter_mut().find(|n| n.id == updated.id) {
        *slot = updated;
    }
}

/// Returns whether a notification with `id` was found
pub fn mark_read(list: &mut [Notification], id: &str) -> bool {
    match list.iter_mut().find(|n| n.id == id) {
        Some(n) => {
            n.read = true;
            true
        }
        None => false,
    }
}

pub fn mark_all_read(list: &mut [Notification]) {
    list.iter_mut().for_each(|n| n.read = true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::unread_count;
    use serde_json::json;

    fn sample() -> Vec<Notification> {
        serde_json::from_value(json!([
            { "id": "n1", "message": "a" },
            { "id": "n2", "message": "b" },
            { "id": "n3", "message": "c", "read": true },
        ]))
        .unwrap()
    }

    #[test]
    fn test_mark_read() {
        let mut list = sample();
        assert_eq!(unread_count(&list), 2);
        assert!(mark_read(&mut list, "n1"));
        assert!(!mark_read(&mut list, "missing"));
        assert_eq!(unread_count(&list), 1);
        mark_all_read(&mut list);
        assert_eq!(unread_count(&list), 0);
    }

    #[test]
    fn test_replace_notification() {
        let mut list = sample();
        let mut updated = list[1].clone();
        updated.read = true;
        updated.message = "edited".into();
        replace_notification(&mut list, updated);
        assert_eq!(list[1].message, "edited");
        assert!(list[1].read);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_default_state_is_checking() {
        let state = AppState::default();
        assert_eq!(state.status, SessionStatus::Checking);
        assert!(!state.is_logged_in);
        assert!(state.user.is_none());
    }
}
