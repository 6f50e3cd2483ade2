//! Navbar Component
//!
//! Top bar with section links, the unread-notification badge and the user
//! menu. Anonymous visitors get login and sign-up links instead.

use leptos::prelude::*;

use crate::filters::unread_count;
use crate::format::initials;
use crate::router::{use_navigator, Route};
use crate::session::use_session;
use crate::store::{use_app_store, AppStateStoreFields};

const LINKS: &[(&str, Route)] = &[
    ("Dashboard", Route::Dashboard),
    ("Projects", Route::Projects),
    ("Tasks", Route::Tasks),
    ("Kanban", Route::Kanban),
];

#[component]
pub fn Navbar() -> impl IntoView {
    let store = use_app_store();
    let session = use_session();
    let nav = use_navigator();

    let (menu_open, set_menu_open) = signal(false);
    let unread = Memo::new(move |_| store.notifications().with(|list| unread_count(list)));
    let user_initials = move || {
        store
            .user()
            .with(|u| u.as_ref().map(|u| initials(&u.first_name, &u.last_name)))
            .unwrap_or_else(|| "??".to_string())
    };
    let user_name = move || store.user().with(|u| u.as_ref().map(|u| u.full_name()).unwrap_or_default());

    let is_current = move |route: &Route| {
        let current = nav.route();
        match route {
            Route::Projects => matches!(current, Route::Projects | Route::ProjectNew | Route::ProjectEdit(_)),
            Route::Tasks => matches!(current, Route::Tasks | Route::TaskNew | Route::TaskEdit(_)),
            other => current == *other,
        }
    };

    view! {
        <header class="navbar">
            <div class="navbar-container">
                <a class="navbar-brand" href=Route::Home.href()>
                    <span class="material-icons">"view_kanban"</span>
                    <span>"ProjectFlow"</span>
                </a>

                <Show
                    when=move || store.is_logged_in().get()
                    fallback=|| view! {
                        <div class="navbar-auth">
                            <a class="btn btn-outline" href=Route::Login { return_url: None }.href()>"Log in"</a>
                            <a class="btn btn-primary" href=Route::Register.href()>"Sign up"</a>
                        </div>
                    }
                >
                    <nav class="navbar-links">
                        {LINKS
                            .iter()
                            .map(|(label, route)| {
                                let target = route.clone();
                                view! {
                                    <a
                                        class="nav-link"
                                        class:active=move || is_current(&target)
                                        href=route.href()
                                    >
                                        {*label}
                                    </a>
                                }
                            })
                            .collect_view()}
                        <Show when=move || store.is_admin().get()>
                            <a class="nav-link" class:active=move || is_current(&Route::Admin) href=Route::Admin.href()>
                                "Admin"
                            </a>
                        </Show>
                    </nav>

                    <div class="navbar-actions">
                        <a class="notification-bell" href=Route::Notifications.href() title="Notifications">
                            <span class="material-icons">"notifications"</span>
                            <Show when=move || { unread.get() > 0 }>
                                <span class="badge">{move || unread.get()}</span>
                            </Show>
                        </a>

                        <div class="user-menu">
                            <button
                                type="button"
                                class="avatar"
                                title=user_name
                                on:click=move |_| set_menu_open.update(|open| *open = !*open)
                            >
                                {user_initials}
                            </button>
                            <Show when=move || menu_open.get()>
                                <div class="dropdown" on:click=move |_| set_menu_open.set(false)>
                                    <div class="dropdown-header">{user_name}</div>
                                    <a class="dropdown-item" href=Route::Profile.href()>
                                        <span class="material-icons">"person"</span>
                                        "Profile"
                                    </a>
                                    <button type="button" class="dropdown-item" on:click=move |_| session.logout()>
                                        <span class="material-icons">"logout"</span>
                                        "Log out"
                                    </button>
                                </div>
                            </Show>
                        </div>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Utc::now().format("%Y").to_string();
    view! {
        <footer class="footer">
            <div class="footer-container">
                <span>{format!("© {} ProjectFlow", year)}</span>
                <nav class="footer-links">
                    <a href=Route::Home.href()>"Home"</a>
                    <a href=Route::Dashboard.href()>"Dashboard"</a>
                    <a href=Route::Projects.href()>"Projects"</a>
                </nav>
            </div>
        </footer>
    }
}
