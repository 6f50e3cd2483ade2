//! Task List Page

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use crate::api;
use crate::components::{ErrorBanner, Loading};
use crate::filters::{count_overdue, count_with_status, sort_newest_first, TaskFilter};
use crate::format::{initials, is_overdue, relative_day};
use crate::kanban::set_status;
use crate::markdown::excerpt;
use crate::models::{Priority, Project, Task, TaskStatus};
use crate::router::{use_navigator, Route};
use crate::session::use_session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    List,
    Grid,
}

const STATUS_OPTIONS: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed];

#[component]
pub fn TaskListPage() -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let nav = use_navigator();

    let (tasks, set_tasks) = signal(Vec::<Task>::new());
    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);
    let filter = RwSignal::new(TaskFilter::default());
    let (view_mode, set_view_mode) = signal(ViewMode::List);

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            let (tasks_res, projects_res) = futures::join!(api::list_tasks(&api), api::list_projects(&api));
            match tasks_res {
                Ok(mut list) => {
                    sort_newest_first(&mut list);
                    info!("loaded {} tasks", list.len());
                    set_tasks.try_set(list);
                }
                Err(e) => {
                    set_error.try_set(Some(session.handle_error("failed to load tasks", &e)));
                }
            }
            match projects_res {
                Ok(list) => {
                    set_projects.try_set(list);
                }
                Err(e) => warn!("project filter options unavailable: {}", e),
            }
            set_loading.try_set(false);
        });
    };
    load();

    let filtered = Memo::new(move |_| tasks.with(|list| filter.with(|f| f.apply(list))));

    let toggle_status = move |id: String, current: TaskStatus| {
        let next = current.toggled();
        spawn_local(async move {
            match api::put_task_status(&api, &id, next).await {
                Ok(()) => {
                    set_tasks.try_update(|list| set_status(list, &id, next));
                }
                Err(e) => {
                    set_error.try_set(Some(session.handle_error("failed to update task status", &e)));
                }
            }
        });
    };

    let stat = move |label: &'static str, count: Signal<usize>| {
        view! {
            <div class="stat-item">
                <span class="stat-number">{count}</span>
                <span class="stat-label">{label}</span>
            </div>
        }
    };

    view! {
        <div class="tasks-page">
            <div class="page-header">
                <div class="header-content">
                    <div class="header-text">
                        <h1 class="page-title">"Tasks"</h1>
                        <p class="page-subtitle">"Manage and track all your tasks across projects"</p>
                    </div>
                    <div class="header-actions">
                        <button type="button" class="btn btn-outline" on:click=move |_| load()>
                            <span class="material-icons">"refresh"</span>
                            "Refresh"
                        </button>
                        <a class="btn btn-primary" href=Route::TaskNew.href()>
                            <span class="material-icons">"add"</span>
                            "New Task"
                        </a>
                    </div>
                </div>
            </div>

            <div class="filters-section">
                <div class="filters-content">
                    <div class="search-input-group">
                        <span class="material-icons">"search"</span>
                        <input
                            type="text"
                            class="search-input"
                            placeholder="Search tasks..."
                            prop:value=move || filter.with(|f| f.search.clone())
                            on:input=move |ev| filter.update(|f| f.search = event_target_value(&ev))
                        />
                    </div>
                    <div class="filter-controls">
                        <select
                            class="filter-select"
                            prop:value=move || filter.with(|f| f.status.map(|s| s.as_str()).unwrap_or(""))
                            on:change=move |ev| filter.update(|f| f.status = event_target_value(&ev).parse().ok())
                        >
                            <option value="">"All Status"</option>
                            {STATUS_OPTIONS
                                .iter()
                                .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                .collect_view()}
                        </select>
                        <select
                            class="filter-select"
                            prop:value=move || filter.with(|f| f.priority.map(|p| p.as_str()).unwrap_or(""))
                            on:change=move |ev| filter.update(|f| f.priority = event_target_value(&ev).parse().ok())
                        >
                            <option value="">"All Priorities"</option>
                            {Priority::ALL
                                .iter()
                                .rev()
                                .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                                .collect_view()}
                        </select>
                        <select
                            class="filter-select"
                            prop:value=move || filter.with(|f| f.project.clone().unwrap_or_default())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                filter.update(|f| f.project = (!value.is_empty()).then_some(value));
                            }
                        >
                            <option value="">"All Projects"</option>
                            <For
                                each=move || projects.get()
                                key=|p| p.id.clone()
                                children=|p| view! { <option value=p.id.clone()>{p.name.clone()}</option> }
                            />
                        </select>
                        <Show when=move || filter.with(TaskFilter::is_active)>
                            <button type="button" class="btn btn-ghost" on:click=move |_| filter.set(TaskFilter::default())>
                                <span class="material-icons">"clear"</span>
                                "Clear"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>

            <div class="view-toggle">
                <div class="view-options">
                    <button
                        type="button"
                        class="view-btn"
                        class:active=move || view_mode.get() == ViewMode::List
                        on:click=move |_| set_view_mode.set(ViewMode::List)
                    >
                        <span class="material-icons">"view_list"</span>
                        "List"
                    </button>
                    <button
                        type="button"
                        class="view-btn"
                        class:active=move || view_mode.get() == ViewMode::Grid
                        on:click=move |_| set_view_mode.set(ViewMode::Grid)
                    >
                        <span class="material-icons">"grid_view"</span>
                        "Grid"
                    </button>
                </div>
                <div class="results-info">
                    <span class="results-count">
                        {move || format!("{} of {} tasks", filtered.with(Vec::len), tasks.with(Vec::len))}
                    </span>
                </div>
            </div>

            <ErrorBanner message=error />

            <Show when=move || !loading.get() fallback=|| view! { <Loading text="Loading tasks..." /> }>
                <Show
                    when=move || !filtered.with(Vec::is_empty)
                    fallback=move || {
                        if filter.with(TaskFilter::is_active) {
                            view! {
                                <div class="empty-state">
                                    <span class="material-icons">"search_off"</span>
                                    <h3>"No tasks match your filters"</h3>
                                    <p>"Try adjusting your search criteria or clearing the filters."</p>
                                    <button type="button" class="btn btn-outline" on:click=move |_| filter.set(TaskFilter::default())>
                                        "Clear Filters"
                                    </button>
                                </div>
                            }
                            .into_any()
                        } else {
                            view! {
                                <div class="empty-state">
                                    <span class="material-icons">"task_alt"</span>
                                    <h3>"No tasks yet"</h3>
                                    <p>"Create your first task to start organizing your work."</p>
                                    <a class="btn btn-primary" href=Route::TaskNew.href()>"Create Task"</a>
                                </div>
                            }
                            .into_any()
                        }
                    }
                >
                    <div class=move || match view_mode.get() {
                        ViewMode::List => "tasks-container view-list",
                        ViewMode::Grid => "tasks-container view-grid",
                    }>
                        <For
                            each=move || filtered.get()
                            key=|t| (t.id.clone(), t.status)
                            children=move |task| {
                                let id = task.id.clone();
                                let status = task.status;
                                let edit_route = Route::TaskEdit(id.clone());
                                let now = Utc::now();
                                let assignee = task.assignee().filter(|u| u.has_names()).cloned();
                                view! {
                                    <div class="task-card" on:click=move |_| nav.navigate(edit_route.clone())>
                                        <div class="task-header">
                                            <div class=format!("task-status-indicator status-{}", status.as_str())>
                                                <span class="material-icons">{status.icon()}</span>
                                            </div>
                                            {task.priority.map(|p| view! {
                                                <span class=format!("task-priority priority-{}", p.as_str())>{p.label()}</span>
                                            })}
                                        </div>
                                        <div class="task-content">
                                            <h3 class="task-title">{task.title.clone()}</h3>
                                            {task.description.as_deref().filter(|d| !d.is_empty()).map(|d| view! {
                                                <p class="task-description">{excerpt(d, 140)}</p>
                                            })}
                                            <div class="task-project">
                                                <span class="material-icons">"folder"</span>
                                                {task.project_name().unwrap_or("").to_string()}
                                            </div>
                                        </div>
                                        <div class="task-footer">
                                            <div class="task-assignee">
                                                {match assignee {
                                                    Some(user) => view! {
                                                        <div class="assignee-avatar">{initials(&user.first_name, &user.last_name)}</div>
                                                        <span class="assignee-name">{user.full_name()}</span>
                                                    }
                                                    .into_any(),
                                                    None => view! {
                                                        <div class="assignee-avatar unassigned">
                                                            <span class="material-icons">"person_outline"</span>
                                                        </div>
                                                        <span class="assignee-name text-muted">"Unassigned"</span>
                                                    }
                                                    .into_any(),
                                                }}
                                            </div>
                                            {task.due_date.map(|d| view! {
                                                <div class="task-due-date" class:overdue=is_overdue(Some(d), now)>
                                                    <span class="material-icons">"schedule"</span>
                                                    {relative_day(d, now)}
                                                </div>
                                            })}
                                        </div>
                                        <div class="task-actions">
                                            <button
                                                type="button"
                                                class="task-action-btn"
                                                on:click=move |ev| {
                                                    ev.stop_propagation();
                                                    toggle_status(id.clone(), status);
                                                }
                                            >
                                                <span class="material-icons">
                                                    {if status == TaskStatus::Completed { "undo" } else { "check" }}
                                                </span>
                                            </button>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>

            <div class="quick-stats">
                {stat("To Do", Signal::derive(move || tasks.with(|t| count_with_status(t, TaskStatus::Pending))))}
                {stat("In Progress", Signal::derive(move || tasks.with(|t| count_with_status(t, TaskStatus::InProgress))))}
                {stat("Completed", Signal::derive(move || tasks.with(|t| count_with_status(t, TaskStatus::Completed))))}
                {stat("Overdue", Signal::derive(move || tasks.with(|t| count_overdue(t, Utc::now()))))}
            </div>
        </div>
    }
}
