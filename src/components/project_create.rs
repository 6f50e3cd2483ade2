//! Create Project Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use crate::api;
use crate::components::member_picker::{debounce, SEARCH_DEBOUNCE_MS};
use crate::components::{ErrorBanner, FieldMessage, MemberPicker, Touched};
use crate::filters::{exclude_selected, MIN_SEARCH_LEN};
use crate::forms::{can_submit, FieldError, ProjectForm};
use crate::models::{Priority, ProjectStatus, User};
use crate::router::{use_navigator, Route};
use crate::session::use_session;

#[component]
pub fn ProjectCreatePage() -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let nav = use_navigator();

    let form = RwSignal::new(ProjectForm::default());
    let touched = Touched::new();
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let query = RwSignal::new(String::new());
    let results = RwSignal::new(Vec::<User>::new());
    let selected = RwSignal::new(Vec::<User>::new());
    let search_generation = StoredValue::new(0u32);

    let on_search = move |term: String| {
        if term.trim().chars().count() < MIN_SEARCH_LEN {
            results.set(Vec::new());
            return;
        }
        debounce(search_generation, SEARCH_DEBOUNCE_MS, move || async move {
            match api::search_users(&api, term.trim()).await {
                Ok(found) => {
                    let chosen = selected.get_untracked();
                    results.try_set(exclude_selected(found, &chosen));
                }
                Err(e) => {
                    warn!("user search failed: {}", e);
                    results.try_set(Vec::new());
                }
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if !can_submit(current.is_valid(), submitting.get_untracked()) {
            touched.mark("name");
            return;
        }
        let request = current.to_request(&selected.get_untracked());
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::create_project(&api, &request).await {
                Ok(()) => {
                    info!(name = %request.name, "project created");
                    nav.navigate(Route::Projects);
                }
                Err(e) => {
                    set_error.try_set(Some(session.handle_error("failed to create project", &e)));
                }
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <div class="project-create">
            <div class="page-header">
                <div class="header-content">
                    <button type="button" class="back-button" on:click=move |_| nav.navigate(Route::Projects)>
                        <span class="material-icons">"arrow_back"</span>
                    </button>
                    <div class="header-text">
                        <h1 class="page-title">"Create New Project"</h1>
                        <p class="page-subtitle">"Set up a new project to organize your tasks and collaborate with your team."</p>
                    </div>
                </div>
            </div>

            <div class="form-container">
                <ErrorBanner message=error />

                <form class="project-form" on:submit=on_submit>
                    <div class="form-section">
                        <div class="section-header">
                            <h2 class="section-title">"Basic Information"</h2>
                            <p class="section-description">"Provide the essential details for your project."</p>
                        </div>

                        <div class="form-grid">
                            <div class="form-group full-width">
                                <label for="name" class="form-label">"Project Name " <span class="required">"*"</span></label>
                                <input
                                    id="name"
                                    type="text"
                                    class="form-input"
                                    placeholder="Enter project name"
                                    class:error=move || touched.has("name") && form.with(|f| f.name_error().is_some())
                                    prop:value=move || form.with(|f| f.name.clone())
                                    on:input=move |ev| {
                                        form.update(|f| f.name = event_target_value(&ev));
                                        touched.mark("name");
                                    }
                                    on:blur=move |_| touched.mark("name")
                                />
                                <FieldMessage touched=touched field="name" label="Project name" error=move || form.with(|f| f.name_error()) />
                            </div>

                            <div class="form-group full-width">
                                <label for="description" class="form-label">"Description"</label>
                                <textarea
                                    id="description"
                                    class="form-textarea"
                                    rows="4"
                                    placeholder="Describe your project goals, scope, and key deliverables..."
                                    prop:value=move || form.with(|f| f.description.clone())
                                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                                ></textarea>
                            </div>

                            <div class="form-group">
                                <label for="priority" class="form-label">"Priority " <span class="required">"*"</span></label>
                                <select
                                    id="priority"
                                    class="form-select"
                                    prop:value=move || form.with(|f| f.priority.as_str())
                                    on:change=move |ev| {
                                        if let Ok(p) = event_target_value(&ev).parse::<Priority>() {
                                            form.update(|f| f.priority = p);
                                        }
                                    }
                                >
                                    {Priority::ALL
                                        .iter()
                                        .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                                        .collect_view()}
                                </select>
                            </div>

                            <div class="form-group">
                                <label for="status" class="form-label">"Status " <span class="required">"*"</span></label>
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
                        </div>
                    </div>

                    <div class="form-section">
                        <div class="section-header">
                            <h2 class="section-title">"Timeline"</h2>
                            <p class="section-description">"Set the project start and end dates."</p>
                        </div>
                        <div class="form-grid">
                            <div class="form-group">
                                <label for="startDate" class="form-label">"Start Date"</label>
                                <input
                                    id="startDate"
                                    type="date"
                                    class="form-input"
                                    prop:value=move || form.with(|f| f.start_date.clone())
                                    on:input=move |ev| form.update(|f| f.start_date = event_target_value(&ev))
                                />
                            </div>
                            <div class="form-group">
                                <label for="endDate" class="form-label">"End Date"</label>
                                <input
                                    id="endDate"
                                    type="date"
                                    class="form-input"
                                    class:error=move || form.with(|f| f.date_error().is_some())
                                    prop:value=move || form.with(|f| f.end_date.clone())
                                    on:input=move |ev| form.update(|f| f.end_date = event_target_value(&ev))
                                />
                                <Show when=move || form.with(|f| f.date_error().is_some())>
                                    <div class="field-error">{FieldError::EndBeforeStart.message("End date")}</div>
                                </Show>
                            </div>
                        </div>
                    </div>

                    <div class="form-section">
                        <div class="section-header">
                            <h2 class="section-title">"Team Members"</h2>
                            <p class="section-description">"Add team members to collaborate on this project."</p>
                        </div>
                        <MemberPicker query=query results=results selected=selected on_search=on_search />
                    </div>

                    <div class="form-actions">
                        <button
                            type="button"
                            class="btn btn-outline"
                            disabled=move || submitting.get()
                            on:click=move |_| nav.navigate(Route::Projects)
                        >
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || !can_submit(form.with(ProjectForm::is_valid), submitting.get())
                        >
                            {move || if submitting.get() { "Creating..." } else { "Create Project" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
