//! Member Picker Component
//!
//! Search box with suggestions plus the list of chosen members. The owning
//! page decides where suggestions come from.

use std::future::Future;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::format::initials;
use crate::models::User;

/// Quiet period before a member search runs
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Run `job` after `ms` unless another call on the same `generation` came first
pub fn debounce<F, Fut>(generation: StoredValue<u32>, ms: u32, job: F)
where
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let ticket = generation.get_value().wrapping_add(1);
    generation.set_value(ticket);
    spawn_local(async move {
        TimeoutFuture::new(ms).await;
        if generation.try_get_value() == Some(ticket) {
            job().await;
        }
    });
}

fn user_initials(user: &User) -> String {
    initials(&user.first_name, &user.last_name)
}

/// # Arguments
/// * `query` - Search box contents
/// * `results` - Suggestions for the current query
/// * `selected` - Chosen members
/// * `on_search` - Called with the new query on every keystroke
/// * `owner` - Member that cannot be removed
#[component]
pub fn MemberPicker(
    query: RwSignal<String>,
    results: RwSignal<Vec<User>>,
    selected: RwSignal<Vec<User>>,
    #[prop(into)] on_search: Callback<String>,
    #[prop(into, optional)] owner: MaybeProp<String>,
) -> impl IntoView {
    let is_selected = move |id: &str| selected.with(|list| list.iter().any(|m| m.id == id));

    let add_member = move |user: User| {
        if is_selected(&user.id) {
            return;
        }
        selected.update(|list| list.push(user));
        query.set(String::new());
        results.set(Vec::new());
    };

    let remove_member = move |id: String| selected.update(|list| list.retain(|m| m.id != id));

    view! {
        <div class="members-section">
            <div class="member-search">
                <div class="search-input-wrapper">
                    <span class="material-icons search-icon">"search"</span>
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search users by name or email..."
                        prop:value=move || query.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            query.set(value.clone());
                            on_search.run(value);
                        }
                    />
                </div>

                <Show when=move || !results.with(Vec::is_empty) && !query.with(String::is_empty)>
                    <div class="search-results">
                        <For
                            each=move || results.get()
                            key=|u| u.id.clone()
                            children=move |user| {
                                let id = user.id.clone();
                                let added = move || is_selected(&id);
                                let added_class = added.clone();
                                let picked = user.clone();
                                view! {
                                    <div
                                        class="search-result-item"
                                        class:disabled=added_class
                                        on:click=move |_| add_member(picked.clone())
                                    >
                                        <div class="user-avatar">{user_initials(&user)}</div>
                                        <div class="user-info">
                                            <div class="user-name">{user.full_name()}</div>
                                            <div class="user-email">{user.email.clone()}</div>
                                        </div>
                                        <span class="material-icons">
                                            {move || if added() { "check_circle" } else { "add" }}
                                        </span>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </div>

            <Show when=move || !selected.with(Vec::is_empty)>
                <div class="selected-members">
                    <h4 class="members-title">{move || format!("Selected Members ({})", selected.with(Vec::len))}</h4>
                    <div class="members-list">
                        <For
                            each=move || selected.get()
                            key=|m| m.id.clone()
                            children=move |member| {
                                let id = member.id.clone();
                                let is_owner = owner.get_untracked().as_deref() == Some(id.as_str());
                                view! {
                                    <div class="member-item" class:owner=is_owner>
                                        <div class="member-avatar">{user_initials(&member)}</div>
                                        <div class="member-info">
                                            <div class="member-name">{member.full_name()}</div>
                                            <div class="member-email">{member.email.clone()}</div>
                                            {is_owner.then(|| view! {
                                                <div class="member-role owner-role">
                                                    <span class="material-icons">"star"</span>
                                                    "Project Owner"
                                                </div>
                                            })}
                                        </div>
                                        {(!is_owner).then(|| view! {
                                            <button
                                                type="button"
                                                class="remove-member"
                                                title="Remove member"
                                                on:click=move |_| remove_member(id.clone())
                                            >
                                                <span class="material-icons">"close"</span>
                                            </button>
                                        })}
                                    </div>
                                }
                            }
                        />
                    </div>
                </div>
            </Show>
        </div>
    }
}
