//! Create Task Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use crate::api;
use crate::components::task_form::bind_form_shortcuts;
use crate::components::{ErrorBanner, TaskFields, Touched};
use crate::forms::{can_submit, TaskForm};
use crate::models::{Project, User};
use crate::router::{use_navigator, Route};
use crate::session::use_session;

#[component]
pub fn TaskCreatePage() -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let nav = use_navigator();

    let form = RwSignal::new(TaskForm::default());
    let touched = Touched::new();
    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (members, set_members) = signal(Vec::<User>::new());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);

    spawn_local(async move {
        match api::list_projects(&api).await {
            Ok(list) => {
                set_projects.try_set(list);
            }
            Err(e) => {
                set_error.try_set(Some(session.handle_error("failed to load projects", &e)));
            }
        }
    });

    let on_project_change = move |project_id: String| {
        set_members.set(Vec::new());
        if project_id.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::project_members(&api, &project_id).await {
                Ok(list) => {
                    // Ignore answers for a project that is no longer selected
                    if form.with_untracked(|f| f.project == project_id) {
                        set_members.try_set(list);
                    }
                }
                Err(e) => warn!(project_id = %project_id, "project members unavailable: {}", e),
            }
        });
    };

    let submit = move || {
        let current = form.get_untracked();
        if !can_submit(current.is_valid(), submitting.get_untracked()) {
            touched.mark("title");
            touched.mark("project");
            return;
        }
        let payload = current.to_payload();
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::create_task(&api, &payload).await {
                Ok(()) => {
                    info!(title = %payload.title, "task created");
                    nav.navigate(Route::Tasks);
                }
                Err(e) => {
                    set_error.try_set(Some(session.handle_error("failed to create task", &e)));
                }
            }
            set_submitting.try_set(false);
        });
    };

    bind_form_shortcuts(submit, move || nav.navigate(Route::Tasks));

    view! {
        <div class="task-create">
            <div class="page-header">
                <div class="breadcrumb">
                    <a href=Route::Dashboard.href() class="breadcrumb-link">"Dashboard"</a>
                    <span class="breadcrumb-separator"><span class="material-icons">"chevron_right"</span></span>
                    <a href=Route::Tasks.href() class="breadcrumb-link">"Tasks"</a>
                    <span class="breadcrumb-separator"><span class="material-icons">"chevron_right"</span></span>
                    <span class="breadcrumb-current">"New Task"</span>
                </div>
                <div class="page-title-section">
                    <div class="page-icon"><span class="material-icons">"add_task"</span></div>
                    <div>
                        <h1 class="page-title">"Create New Task"</h1>
                        <p class="page-subtitle">"Add a new task to organize your work"</p>
                    </div>
                </div>
            </div>

            <div class="task-create-content">
                <div class="create-form-container">
                    <ErrorBanner message=error />
                    <form
                        class="task-form"
                        on:submit=move |ev: web_sys::SubmitEvent| {
                            ev.prevent_default();
                            submit();
                        }
                    >
                        <TaskFields
                            form=form
                            touched=touched
                            projects=projects
                            assignees=members
                            on_project_change=on_project_change
                        />
                        <div class="form-actions">
                            <button
                                type="button"
                                class="btn btn-outline"
                                disabled=move || submitting.get()
                                on:click=move |_| nav.navigate(Route::Tasks)
                            >
                                "Cancel"
                            </button>
                            <button
                                type="submit"
                                class="btn btn-primary"
                                disabled=move || !can_submit(form.with(TaskForm::is_valid), submitting.get())
                            >
                                {move || if submitting.get() { "Creating..." } else { "Create Task" }}
                            </button>
                        </div>
                    </form>
                </div>

                <aside class="side-panel">
                    <div class="help-card">
                        <h4>"Keyboard Shortcuts"</h4>
                        <div class="shortcut-list">
                            <div class="shortcut-item"><span>"Save task"</span><kbd>"Ctrl + Enter"</kbd></div>
                            <div class="shortcut-item"><span>"Cancel"</span><kbd>"Esc"</kbd></div>
                        </div>
                    </div>
                </aside>
            </div>
        </div>
    }
}
