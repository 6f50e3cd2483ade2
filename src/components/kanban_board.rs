//! Kanban Board Page
//!
//! Cards move between columns with mouse drag and drop. A drop updates the
//! board at once and then patches the task; a failed patch moves it back.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;
use tracing::{info, warn};

use crate::api;
use crate::components::{ErrorBanner, Loading};
use crate::format::{initials, is_overdue, relative_day};
use crate::kanban::{bucket_tasks, plan_drop, revert_status, set_status, Column};
use crate::markdown::excerpt;
use crate::models::{Project, Task};
use crate::router::{use_navigator, Route};
use crate::session::use_session;

fn column_icon(column: Column) -> &'static str {
    match column {
        Column::Todo => "schedule",
        Column::InProgress => "autorenew",
        Column::Done => "check_circle",
    }
}

fn column_class(column: Column) -> &'static str {
    match column {
        Column::Todo => "todo",
        Column::InProgress => "inprogress",
        Column::Done => "done",
    }
}

#[component]
pub fn KanbanPage() -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let nav = use_navigator();

    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (loading_projects, set_loading_projects) = signal(true);
    let (selected, set_selected) = signal(String::new());
    let (tasks, set_tasks) = signal(Vec::<Task>::new());
    let (loading_tasks, set_loading_tasks) = signal(false);
    let (load_error, set_load_error) = signal(None::<String>);
    let (move_error, set_move_error) = signal(None::<String>);

    spawn_local(async move {
        match api::list_projects(&api).await {
            Ok(list) => {
                set_projects.try_set(list);
            }
            Err(e) => {
                session.handle_error("failed to load projects", &e);
                set_load_error.try_set(Some("Failed to load projects. Please try again.".to_string()));
            }
        }
        set_loading_projects.try_set(false);
    });

    let load_tasks = move || {
        let project_id = selected.get_untracked();
        if project_id.is_empty() {
            return;
        }
        set_loading_tasks.set(true);
        set_load_error.set(None);
        spawn_local(async move {
            match api::project_tasks(&api, &project_id).await {
                Ok(list) => {
                    // Ignore answers for a project that is no longer selected
                    if selected.try_get_untracked().as_deref() == Some(project_id.as_str()) {
                        info!(project_id = %project_id, "loaded {} tasks for board", list.len());
                        set_tasks.try_set(list);
                    }
                }
                Err(e) => {
                    session.handle_error("failed to load board tasks", &e);
                    set_tasks.try_set(Vec::new());
                    set_load_error.try_set(Some("Failed to load tasks for this project. Please try again.".to_string()));
                }
            }
            set_loading_tasks.try_set(false);
        });
    };

    let on_project_change = move |project_id: String| {
        set_selected.set(project_id.clone());
        set_tasks.set(Vec::new());
        set_load_error.set(None);
        set_move_error.set(None);
        if !project_id.is_empty() {
            load_tasks();
        }
    };

    let selected_project = Memo::new(move |_| {
        let id = selected.get();
        projects.with(|list| list.iter().find(|p| p.id == id).cloned())
    });

    let board = Memo::new(move |_| selected.with(|id| tasks.with(|list| bucket_tasks(list, id))));

    let dnd = create_dnd_signals::<String, Column>();

    bind_global_mouseup(dnd, move |task_id: String, column: Column| {
        let Some(next) = tasks.with_untracked(|list| plan_drop(list, &task_id, column)) else {
            return;
        };
        let Some(previous) = set_tasks.try_update(|list| set_status(list, &task_id, next)).flatten() else {
            return;
        };
        set_move_error.set(None);
        spawn_local(async move {
            match api::patch_task_status(&api, &task_id, next).await {
                Ok(()) => info!(task_id = %task_id, status = next.as_str(), "task moved"),
                Err(e) => {
                    let reverted = set_tasks.try_update(|list| revert_status(list, &task_id, next, previous));
                    if reverted == Some(true) {
                        warn!(task_id = %task_id, "move rejected, restored {}", previous.as_str());
                    }
                    set_move_error.try_set(Some(session.handle_error("failed to update task status", &e)));
                }
            }
        });
    });

    let render_column = move |column: Column| {
        let on_mouseenter = make_on_target_mouseenter(dnd, column);
        let on_mouseleave = make_on_mouseleave(dnd);
        let count = move || board.with(|b| b.column(column).len());
        view! {
            <div class="kanban-column">
                <div class=format!("column-header {}-header", column_class(column))>
                    <div class="column-title">
                        <span class="material-icons">{column_icon(column)}</span>
                        <h3>{column.title()}</h3>
                        <span class="task-count">{count}</span>
                    </div>
                </div>
                <div
                    class=move || {
                        if dnd.is_drop_target(&column) { "column-content drag-over" } else { "column-content" }
                    }
                    on:mouseenter=on_mouseenter
                    on:mouseleave=on_mouseleave
                >
                    <Show
                        when=move || (count() > 0)
                        fallback=move || view! {
                            <div class="empty-column">
                                <span class="material-icons">{column_icon(column)}</span>
                                <p>{format!("No tasks in {}", column.title())}</p>
                            </div>
                        }
                    >
                        <For
                            each=move || board.with(|b| b.column(column).to_vec())
                            key=|t| (t.id.clone(), t.status)
                            children=move |task| {
                                let id = task.id.clone();
                                let on_mousedown = make_on_mousedown(dnd, id.clone());
                                let drag_key = id.clone();
                                let now = Utc::now();
                                let assignee = task.assignee().cloned();
                                view! {
                                    <div
                                        class="task-card"
                                        class:dragging=move || dnd.is_dragging(&drag_key)
                                        on:mousedown=on_mousedown
                                        on:click=move |_| {
                                            if !dnd.drag_just_ended.get_untracked() {
                                                nav.navigate(Route::TaskEdit(id.clone()));
                                            }
                                        }
                                    >
                                        <div class="task-header">
                                            <h4 class="task-title">{task.title.clone()}</h4>
                                            {task.priority.map(|p| view! {
                                                <span class=format!("task-priority priority-{}", p.as_str())>{p.label()}</span>
                                            })}
                                        </div>
                                        {task.description.as_deref().filter(|d| !d.is_empty()).map(|d| view! {
                                            <p class="task-description">{excerpt(d, 120)}</p>
                                        })}
                                        <div class="task-footer">
                                            {assignee.map(|user| view! {
                                                <div class="task-assignee">
                                                    <span class="assignee-avatar">{initials(&user.first_name, &user.last_name)}</span>
                                                    <span class="assignee-name">{user.full_name()}</span>
                                                </div>
                                            })}
                                            {task.due_date.map(|d| view! {
                                                <div class="task-due-date" class:overdue=is_overdue(Some(d), now)>
                                                    <span class="material-icons">"schedule"</span>
                                                    {relative_day(d, now)}
                                                </div>
                                            })}
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </Show>
                </div>
            </div>
        }
    };

    view! {
        <div class=move || if dnd.is_active() { "kanban-container dnd-active" } else { "kanban-container" }>
            <div class="kanban-header">
                <div class="header-content">
                    <h1 class="kanban-title">"Kanban Board"</h1>
                    <p class="kanban-subtitle">"Manage your tasks visually across different stages"</p>
                </div>
                <div class="header-actions">
                    <a class="btn btn-outline" href=Route::TaskNew.href()>
                        <span class="material-icons">"add_task"</span>
                        "New Task"
                    </a>
                </div>
            </div>

            <div class="project-selector">
                <div class="selector-content">
                    <label class="selector-label">
                        <span class="material-icons">"folder"</span>
                        "Select Project:"
                    </label>
                    <select
                        class="project-select"
                        disabled=move || loading_projects.get()
                        prop:value=move || selected.get()
                        on:change=move |ev| on_project_change(event_target_value(&ev))
                    >
                        <option value="">"Choose a project..."</option>
                        <For
                            each=move || projects.get()
                            key=|p| p.id.clone()
                            children=|p| view! { <option value=p.id.clone()>{p.name.clone()}</option> }
                        />
                    </select>
                </div>
                {move || selected_project.get().map(|p| view! {
                    <div class="project-info">
                        <h3>{p.name.clone()}</h3>
                        {p.description.clone().filter(|d| !d.is_empty()).map(|d| view! { <p>{d}</p> })}
                    </div>
                })}
            </div>

            <ErrorBanner message=move_error />

            <Show when=move || loading_tasks.get()>
                <Loading text="Loading tasks..." />
            </Show>

            {move || load_error.get().map(|message| view! {
                <div class="error-container">
                    <div class="error-icon"><span class="material-icons">"error_outline"</span></div>
                    <div class="error-content">
                        <h3>"Error Loading Tasks"</h3>
                        <p>{message}</p>
                        <button type="button" class="btn btn-primary" on:click=move |_| load_tasks()>"Try Again"</button>
                    </div>
                </div>
            })}

            <Show when=move || selected_project.with(Option::is_some) && !loading_tasks.get() && load_error.with(Option::is_none)>
                <div class="kanban-board">
                    {Column::ALL.into_iter().map(render_column).collect_view()}
                </div>
            </Show>

            <Show when=move || selected.with(String::is_empty) && !loading_projects.get()>
                <div class="empty-state">
                    <span class="material-icons">"view_kanban"</span>
                    <h3>"Select a project"</h3>
                    <p>"Choose a project above to see its tasks on the board."</p>
                </div>
            </Show>
        </div>
    }
}
