//! Notifications Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{ErrorBanner, Loading};
use crate::filters::{unread_count, visible_notifications};
use crate::format::timestamp;
use crate::router::use_navigator;
use crate::session::use_session;
use crate::store::AppStateStoreFields;

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let session = use_session();
    let store = session.store();
    let nav = use_navigator();

    let (loading, set_loading) = signal(true);
    let (unread_only, set_unread_only) = signal(false);
    let (error, set_error) = signal(None::<String>);

    spawn_local(async move {
        session.load_notifications().await;
        set_loading.try_set(false);
    });

    let unread = Memo::new(move |_| store.notifications().with(|list| unread_count(list)));
    let visible = Memo::new(move |_| {
        let only_unread = unread_only.get();
        store.notifications().with(|list| visible_notifications(list, only_unread))
    });

    let mark_read = move |id: String| {
        spawn_local(async move {
            if let Err(message) = session.mark_notification_read(id).await {
                set_error.try_set(Some(message));
            }
        });
    };

    let mark_all_read = move |_| {
        spawn_local(async move {
            if let Err(message) = session.mark_all_notifications_read().await {
                set_error.try_set(Some(message));
            }
        });
    };

    view! {
        <div class="notifications">
            <div class="page-header">
                <div>
                    <h1>"Notifications"</h1>
                    <p class="page-subtitle">
                        {move || match unread.get() {
                            0 => "You're all caught up".to_string(),
                            1 => "1 unread notification".to_string(),
                            n => format!("{} unread notifications", n),
                        }}
                    </p>
                </div>
                <div class="header-actions">
                    <label class="form-checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || unread_only.get()
                            on:change=move |ev| set_unread_only.set(event_target_checked(&ev))
                        />
                        <span>"Unread only"</span>
                    </label>
                    <button
                        type="button"
                        class="btn btn-outline"
                        disabled=move || unread.get() == 0
                        on:click=mark_all_read
                    >
                        <span class="material-icons">"done_all"</span>
                        "Mark all as read"
                    </button>
                </div>
            </div>

            <ErrorBanner message=error />

            <Show when=move || !loading.get() fallback=|| view! { <Loading text="Loading notifications..." /> }>
                <Show
                    when=move || !visible.with(Vec::is_empty)
                    fallback=move || view! {
                        <div class="empty-state">
                            <span class="material-icons">"notifications_none"</span>
                            <p>
                                {move || if unread_only.get() { "No unread notifications" } else { "No notifications yet" }}
                            </p>
                        </div>
                    }
                >
                    <div class="notification-list">
                        <For
                            each=move || visible.get()
                            key=|n| (n.id.clone(), n.read)
                            children=move |notification| {
                                let id = notification.id.clone();
                                let unread = !notification.read;
                                let link = notification.link.clone().filter(|l| l.starts_with('/'));
                                view! {
                                    <div class="notification-item" class:unread=unread>
                                        <span class="material-icons">{notification.kind.icon()}</span>
                                        <div
                                            class="notification-content"
                                            class:clickable=link.is_some()
                                            on:click=move |_| {
                                                if let Some(path) = link.as_deref() {
                                                    nav.navigate_path(path);
                                                }
                                            }
                                        >
                                            <p>{notification.message.clone()}</p>
                                            {notification.created_at.map(|d| view! { <small>{timestamp(d)}</small> })}
                                        </div>
                                        {unread.then(|| view! {
                                            <button
                                                type="button"
                                                class="btn btn-ghost btn-sm"
                                                title="Mark as read"
                                                on:click=move |_| mark_read(id.clone())
                                            >
                                                <span class="material-icons">"done"</span>
                                            </button>
                                        })}
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
