//! Edit Project Page
//!
//! Member suggestions come from the full user list, loaded once and searched
//! locally after a short pause in typing.

use futures::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use crate::api::{self, ApiClient};
use crate::components::member_picker::{debounce, SEARCH_DEBOUNCE_MS};
use crate::components::{DeleteConfirmButton, ErrorBanner, FieldMessage, Loading, MemberPicker, Touched};
use crate::error::ApiError;
use crate::filters::search_members;
use crate::forms::{can_submit, ProjectEditForm};
use crate::models::{Priority, Project, ProjectStatus, Ref, User};
use crate::router::{use_navigator, Route};
use crate::session::use_session;

/// Populated members as-is; bare ids are fetched, and the ones that fail dropped
async fn resolve_members(api: &ApiClient, project: &Project) -> Vec<User> {
    let lookups = project.members.iter().map(|member| async move {
        match member {
            Ref::Populated(user) => Some(user.clone()),
            Ref::Id(id) => match api::get_user(api, id).await {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(user_id = %id, "member lookup failed: {}", e);
                    None
                }
            },
        }
    });
    join_all(lookups).await.into_iter().flatten().collect()
}

#[component]
pub fn ProjectEditPage(id: String) -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let nav = use_navigator();
    let id = StoredValue::new(id);

    let form = RwSignal::new(ProjectEditForm::default());
    let touched = Touched::new();
    let (project, set_project) = signal(None::<Project>);
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (deleting, set_deleting) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let all_users = StoredValue::new(Vec::<User>::new());
    let query = RwSignal::new(String::new());
    let results = RwSignal::new(Vec::<User>::new());
    let selected = RwSignal::new(Vec::<User>::new());
    let search_generation = StoredValue::new(0u32);

    spawn_local(async move {
        let project_id = id.get_value();
        let (project_res, users_res) = futures::join!(api::get_project(&api, &project_id), api::list_users(&api));
        match users_res {
            Ok(users) => all_users.set_value(users),
            Err(e) => warn!("user list unavailable: {}", e),
        }
        match project_res {
            Ok(loaded) => {
                form.try_set(ProjectEditForm::from_project(&loaded));
                let members = resolve_members(&api, &loaded).await;
                selected.try_set(members);
                set_project.try_set(Some(loaded));
            }
            Err(e) => {
                session.handle_error("failed to load project", &e);
            }
        }
        set_loading.try_set(false);
    });

    let owner = Signal::derive(move || {
        project.with(|p| p.as_ref().and_then(|p| p.owner.as_ref()).map(|o| o.id().to_string()))
    });

    let refresh_results = move || {
        let term = query.get_untracked();
        let found = all_users.with_value(|users| selected.with_untracked(|chosen| search_members(users, &term, chosen)));
        results.try_set(found);
    };

    let on_search = move |_term: String| {
        debounce(search_generation, SEARCH_DEBOUNCE_MS, move || async move { refresh_results() });
    };

    // A removed member shows up in the open suggestions again
    Effect::new(move |prev: Option<usize>| {
        let count = selected.with(Vec::len);
        if prev.is_some_and(|p| count < p) {
            refresh_results();
        }
        count
    });

    let report = move |context: &str, e: &ApiError| {
        set_error.try_set(Some(session.handle_error(context, e)));
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if !can_submit(current.is_valid(), saving.get_untracked()) {
            touched.mark("name");
            return;
        }
        let request = current.to_request(&selected.get_untracked());
        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::update_project(&api, &id.get_value(), &request).await {
                Ok(()) => {
                    info!(project_id = %id.get_value(), "project updated");
                    nav.navigate(Route::Projects);
                }
                Err(e) => report("failed to update project", &e),
            }
            set_saving.try_set(false);
        });
    };

    let on_delete = move |_: ()| {
        set_deleting.set(true);
        spawn_local(async move {
            match api::delete_project(&api, &id.get_value()).await {
                Ok(()) => {
                    info!(project_id = %id.get_value(), "project deleted");
                    nav.navigate(Route::Projects);
                }
                Err(e) => report("failed to delete project", &e),
            }
            set_deleting.try_set(false);
        });
    };

    view! {
        <div class="project-edit">
            <div class="page-header">
                <button type="button" class="btn btn-ghost" on:click=move |_| nav.navigate(Route::Projects)>
                    <span class="material-icons">"arrow_back"</span>
                    "Back to Projects"
                </button>
                <Show when=move || project.with(Option::is_some)>
                    <DeleteConfirmButton
                        label="Delete Project"
                        button_class="btn btn-outline"
                        disabled=deleting
                        on_confirm=on_delete
                    />
                </Show>
            </div>

            <ErrorBanner message=error />

            <Show when=move || !loading.get() fallback=|| view! { <Loading text="Loading project..." /> }>
                <Show
                    when=move || project.with(Option::is_some)
                    fallback=|| view! {
                        <div class="error-container">
                            <div class="error-content">
                                <span class="material-icons error-icon">"error_outline"</span>
                                <h2>"Project Not Found"</h2>
                                <p>"The project you're looking for doesn't exist or has been deleted."</p>
                                <a class="btn btn-primary" href=Route::Projects.href()>"Go to Projects"</a>
                            </div>
                        </div>
                    }
                >
                    <div class="form-container">
                        <h1 class="form-title">"Edit Project"</h1>
                        <form class="project-form" on:submit=on_submit>
                            <div class="form-group">
                                <label for="name" class="form-label">"Project Name *"</label>
                                <input
                                    id="name"
                                    type="text"
                                    class="form-input"
                                    placeholder="Enter project name"
                                    prop:value=move || form.with(|f| f.name.clone())
                                    on:input=move |ev| {
                                        form.update(|f| f.name = event_target_value(&ev));
                                        touched.mark("name");
                                    }
                                    on:blur=move |_| touched.mark("name")
                                />
                                <FieldMessage touched=touched field="name" label="Project name" error=move || form.with(|f| f.name_error()) />
                            </div>

                            <div class="form-group">
                                <label for="description" class="form-label">"Description"</label>
                                <textarea
                                    id="description"
                                    class="form-textarea"
                                    rows="4"
                                    placeholder="Describe your project..."
                                    prop:value=move || form.with(|f| f.description.clone())
                                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                                ></textarea>
                            </div>

                            <div class="form-row">
                                <div class="form-group">
                                    <label for="status" class="form-label">"Status"</label>
                                    <select
                                        id="status"
                                        class="form-select"
                                        prop:value=move || form.with(|f| f.status.as_str())
                                        on:change=move |ev| {
                                            if let Ok(s) = event_target_value(&ev).parse::<ProjectStatus>() {
                                                form.update(|f| f.status = s);
                                            }
                                        }
                                    >
                                        {ProjectStatus::ALL
                                            .iter()
                                            .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                            .collect_view()}
                                    </select>
                                </div>
                                <div class="form-group">
                                    <label for="priority" class="form-label">"Priority"</label>
                                    <select
                                        id="priority"
                                        class="form-select"
                                        prop:value=move || form.with(|f| f.priority.clone())
                                        on:change=move |ev| form.update(|f| f.priority = event_target_value(&ev))
                                    >
                                        <option value="">"No priority"</option>
                                        {Priority::ALL
                                            .iter()
                                            .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                                            .collect_view()}
                                    </select>
                                </div>
                            </div>

                            <div class="form-group">
                                <label for="dueDate" class="form-label">"Due Date"</label>
                                <input
                                    id="dueDate"
                                    type="date"
                                    class="form-input"
                                    prop:value=move || form.with(|f| f.due_date.clone())
                                    on:input=move |ev| form.update(|f| f.due_date = event_target_value(&ev))
                                />
                            </div>

                            <div class="form-group">
                                <label class="form-label">"Team Members"</label>
                                <MemberPicker query=query results=results selected=selected on_search=on_search owner=owner />
                                <Show when=move || selected.with(Vec::is_empty)>
                                    <div class="empty-members">
                                        <span class="material-icons">"group_add"</span>
                                        <p>"No team members added yet"</p>
                                        <small>"Search and add members to collaborate on this project"</small>
                                    </div>
                                </Show>
                            </div>

                            <div class="form-actions">
                                <button type="button" class="btn btn-outline" on:click=move |_| nav.navigate(Route::Projects)>
                                    "Cancel"
                                </button>
                                <button
                                    type="submit"
                                    class="btn btn-primary"
                                    disabled=move || !can_submit(form.with(ProjectEditForm::is_valid), saving.get())
                                >
                                    {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                                </button>
                            </div>
                        </form>
                    </div>
                </Show>
            </Show>
        </div>
    }
}
