//! Admin Pages

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{ErrorBanner, Loading};
use crate::filters::filter_users;
use crate::format::initials;
use crate::logging::recent_lines;
use crate::models::User;
use crate::router::Route;
use crate::session::use_session;

/// Log lines shown on the admin dashboard
const LOG_TAIL: usize = 50;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let (lines, set_lines) = signal(recent_lines(LOG_TAIL));

    view! {
        <div class="admin-dashboard">
            <h1>"Admin Dashboard"</h1>
            <div class="admin-nav">
                <a href=Route::AdminUsers.href() class="btn btn-primary">"User Management"</a>
            </div>

            <section class="admin-logs">
                <div class="card-header">
                    <h2 class="card-title">"Recent client log"</h2>
                    <button type="button" class="btn btn-outline" on:click=move |_| set_lines.set(recent_lines(LOG_TAIL))>
                        <span class="material-icons">"refresh"</span>
                        "Refresh"
                    </button>
                </div>
                <Show
                    when=move || !lines.with(Vec::is_empty)
                    fallback=|| view! { <p class="text-muted">"No log lines recorded yet."</p> }
                >
                    <pre class="log-lines">
                        {move || {
                            lines
                                .get()
                                .into_iter()
                                .map(|line| view! {
                                    <div class=format!("log-line log-{}", line.level.as_str().to_lowercase())>
                                        {format!("{} {:>5} {}", line.at.format("%H:%M:%S"), line.level, line.message)}
                                    </div>
                                })
                                .collect_view()
                        }}
                    </pre>
                </Show>
            </section>
        </div>
    }
}

#[component]
pub fn UserManagementPage() -> impl IntoView {
    let session = use_session();
    let api = session.api();

    let (users, set_users) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);
    let (query, set_query) = signal(String::new());

    spawn_local(async move {
        match api::list_users(&api).await {
            Ok(list) => {
                set_users.try_set(list);
            }
            Err(e) => {
                set_error.try_set(Some(session.handle_error("failed to load users", &e)));
            }
        }
        set_loading.try_set(false);
    });

    let filtered = Memo::new(move |_| users.with(|list| query.with(|q| filter_users(list, q))));

    view! {
        <div class="user-management">
            <div class="page-header">
                <h1>"User Management"</h1>
                <p class="page-subtitle">
                    {move || format!("{} of {} users", filtered.with(Vec::len), users.with(Vec::len))}
                </p>
            </div>

            <div class="search-input-group">
                <span class="material-icons">"search"</span>
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search by name, username or email..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
            </div>

            <ErrorBanner message=error />

            <Show when=move || !loading.get() fallback=|| view! { <Loading text="Loading users..." /> }>
                <table class="users-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Username"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || filtered.get()
                            key=|u| u.id.clone()
                            children=|user| view! {
                                <tr>
                                    <td class="user-cell">
                                        <span class="user-avatar">{initials(&user.first_name, &user.last_name)}</span>
                                        {user.full_name()}
                                    </td>
                                    <td>{user.username.clone().unwrap_or_default()}</td>
                                    <td>{user.email.clone()}</td>
                                    <td>
                                        <span class=if user.is_admin() { "role-badge role-admin" } else { "role-badge" }>
                                            {if user.is_admin() { "Admin" } else { "User" }}
                                        </span>
                                    </td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || filtered.with(Vec::is_empty)>
                    <p class="text-muted">"No users match your search."</p>
                </Show>
            </Show>
        </div>
    }
}
