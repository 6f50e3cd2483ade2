//! Task Form Fields
//!
//! Inputs shared by the create and edit pages.

use leptos::ev;
use leptos::prelude::*;

use crate::components::{FieldMessage, Touched};
use crate::forms::TaskForm;
use crate::models::{Priority, Project, TaskStatus, User};

const STATUS_OPTIONS: [TaskStatus; 4] = [
    TaskStatus::Pending,
    TaskStatus::InProgress,
    TaskStatus::Review,
    TaskStatus::Completed,
];

/// `Ctrl+Enter` runs `submit`, `Escape` runs `cancel`, while the calling view lives
pub fn bind_form_shortcuts(submit: impl Fn() + 'static, cancel: impl Fn() + 'static) {
    let handle = window_event_listener(ev::keydown, move |ev| {
        if ev.ctrl_key() && ev.key() == "Enter" {
            ev.prevent_default();
            submit();
        } else if ev.key() == "Escape" {
            ev.prevent_default();
            cancel();
        }
    });
    on_cleanup(move || handle.remove());
}

/// # Arguments
/// * `form` - Values being edited
/// * `projects` - Options for the project select
/// * `assignees` - Options for the assignee select
/// * `on_project_change` - Called after the project select changes
#[component]
pub fn TaskFields(
    form: RwSignal<TaskForm>,
    touched: Touched,
    #[prop(into)] projects: Signal<Vec<Project>>,
    #[prop(into)] assignees: Signal<Vec<User>>,
    #[prop(into, optional)] on_project_change: Option<Callback<String>>,
) -> impl IntoView {
    let no_project = move || form.with(|f| f.project.is_empty());

    view! {
        <div class="form-section">
            <h3 class="section-title">
                <span class="material-icons">"info"</span>
                "Basic Information"
            </h3>
            <div class="form-group">
                <label for="title" class="form-label required">"Task Title"</label>
                <input
                    id="title"
                    type="text"
                    class="form-input"
                    placeholder="Enter task title..."
                    class:error=move || touched.has("title") && form.with(|f| f.title_error().is_some())
                    prop:value=move || form.with(|f| f.title.clone())
                    on:input=move |ev| {
                        form.update(|f| f.title = event_target_value(&ev));
                        touched.mark("title");
                    }
                    on:blur=move |_| touched.mark("title")
                />
                <FieldMessage touched=touched field="title" label="Task title" error=move || form.with(|f| f.title_error()) />
            </div>
            <div class="form-group">
                <label for="description" class="form-label">"Description"</label>
                <textarea
                    id="description"
                    class="form-textarea"
                    rows="4"
                    placeholder="Describe what needs to be done..."
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>
            </div>
        </div>

        <div class="form-section">
            <h3 class="section-title">
                <span class="material-icons">"assignment"</span>
                "Assignment & Project"
            </h3>
            <div class="form-row">
                <div class="form-group">
                    <label for="project" class="form-label required">"Project"</label>
                    <select
                        id="project"
                        class="form-select"
                        class:error=move || touched.has("project") && no_project()
                        prop:value=move || {
                            projects.track();
                            form.with(|f| f.project.clone())
                        }
                        on:change=move |ev| {
                            let project = event_target_value(&ev);
                            form.update(|f| f.select_project(project.clone()));
                            touched.mark("project");
                            if let Some(callback) = on_project_change {
                                callback.run(project);
                            }
                        }
                    >
                        <option value="">"Select a project..."</option>
                        <For
                            each=move || projects.get()
                            key=|p| p.id.clone()
                            children=|p| view! { <option value=p.id.clone()>{p.name.clone()}</option> }
                        />
                    </select>
                    <FieldMessage touched=touched field="project" label="Project" error=move || form.with(|f| f.project_error()) />
                </div>
                <div class="form-group">
                    <label for="assignedTo" class="form-label">"Assign To"</label>
                    <select
                        id="assignedTo"
                        class="form-select"
                        disabled=no_project
                        prop:value=move || {
                            assignees.track();
                            form.with(|f| f.assigned_to.clone())
                        }
                        on:change=move |ev| form.update(|f| f.assigned_to = event_target_value(&ev))
                    >
                        <option value="">"Unassigned"</option>
                        <For
                            each=move || assignees.get()
                            key=|u| u.id.clone()
                            children=|u| view! { <option value=u.id.clone()>{u.full_name()}</option> }
                        />
                    </select>
                    <Show when=no_project>
                        <div class="form-hint">
                            <span class="material-icons">"info"</span>
                            "Select a project first to see available members"
                        </div>
                    </Show>
                </div>
            </div>
        </div>

        <div class="form-section">
            <h3 class="section-title">
                <span class="material-icons">"tune"</span>
                "Task Details"
            </h3>
            <div class="form-row">
                <div class="form-group">
                    <label for="status" class="form-label">"Status"</label>
                    <select
                        id="status"
                        class="form-select"
                        prop:value=move || form.with(|f| f.status.as_str())
                        on:change=move |ev| {
                            if let Ok(status) = event_target_value(&ev).parse::<TaskStatus>() {
                                form.update(|f| f.status = status);
                            }
                        }
                    >
                        {STATUS_OPTIONS
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
                        <option value="">"No Priority"</option>
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
                <div class="form-hint">
                    <span class="material-icons">"info"</span>
                    "Leave empty if no due date is required"
                </div>
            </div>
        </div>
    }
}
