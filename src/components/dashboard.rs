//! Dashboard Page
//!
//! Stats, recent projects and recent tasks load in parallel. A failed panel
//! keeps its empty default; the others still render.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use crate::api;
use crate::components::{Loading, ProgressRing};
use crate::format::{relative_day, short_date};
use crate::models::{DashboardStats, Project, Task};
use crate::router::Route;
use crate::session::use_session;
use crate::store::AppStateStoreFields;

const RECENT_PROJECTS: usize = 3;
const RECENT_TASKS: usize = 4;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let store = session.store();

    let (stats, set_stats) = signal(DashboardStats::default());
    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (tasks, set_tasks) = signal(Vec::<Task>::new());
    let (loading, set_loading) = signal(true);

    spawn_local(async move {
        let (stats_res, projects_res, tasks_res) = futures::join!(
            api::dashboard_stats(&api),
            api::recent_projects(&api, RECENT_PROJECTS),
            api::recent_tasks(&api, RECENT_TASKS),
        );
        let mut unauthorized = false;
        match stats_res {
            Ok(s) => {
                set_stats.try_set(s);
            }
            Err(e) => {
                unauthorized |= e.is_unauthorized();
                warn!("dashboard stats unavailable: {}", e);
            }
        }
        match projects_res {
            Ok(p) => {
                set_projects.try_set(p);
            }
            Err(e) => {
                unauthorized |= e.is_unauthorized();
                warn!("recent projects unavailable: {}", e);
            }
        }
        match tasks_res {
            Ok(t) => {
                set_tasks.try_set(t);
            }
            Err(e) => {
                unauthorized |= e.is_unauthorized();
                warn!("recent tasks unavailable: {}", e);
            }
        }
        set_loading.try_set(false);
        if unauthorized {
            session.logout();
        }
    });

    let first_name = move || {
        store
            .user()
            .with(|u| u.as_ref().map(|u| u.first_name.clone()))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "there".to_string())
    };

    let stat_cards = move || {
        let s = stats.get();
        [
            ("stat-primary", "folder", s.total_projects, "Total Projects"),
            ("stat-warning", "task_alt", s.active_tasks, "Active Tasks"),
            ("stat-success", "check_circle", s.completed_tasks, "Completed Tasks"),
            ("stat-error", "schedule", s.overdue_tasks, "Overdue Tasks"),
        ]
        .into_iter()
        .map(|(class, icon, value, label)| view! {
            <div class=format!("stat-card {}", class)>
                <div class="stat-icon"><span class="material-icons">{icon}</span></div>
                <div class="stat-content">
                    <h3 class="stat-number">{value}</h3>
                    <p class="stat-label">{label}</p>
                </div>
            </div>
        })
        .collect_view()
    };

    view! {
        <div class="dashboard">
            <div class="dashboard-header">
                <div>
                    <h1 class="dashboard-title">{move || format!("Welcome back, {}!", first_name())}</h1>
                    <p class="dashboard-subtitle">"Here's what's happening with your projects today."</p>
                </div>
                <div class="dashboard-actions">
                    <a class="btn btn-outline" href=Route::ProjectNew.href()>
                        <span class="material-icons">"add"</span>
                        "New Project"
                    </a>
                    <a class="btn btn-primary" href=Route::TaskNew.href()>
                        <span class="material-icons">"add_task"</span>
                        "New Task"
                    </a>
                </div>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <Loading text="Loading your dashboard..." /> }>
                <div class="stats-grid">{stat_cards}</div>

                <div class="content-grid">
                    <div class="dashboard-card">
                        <div class="card-header">
                            <h2 class="card-title">"Recent Projects"</h2>
                            <a href=Route::Projects.href() class="card-action">"View all"</a>
                        </div>
                        <div class="card-content">
                            <Show
                                when=move || !projects.with(Vec::is_empty)
                                fallback=|| view! {
                                    <div class="empty-state">
                                        <span class="material-icons">"folder_open"</span>
                                        <p>"No projects yet. Create your first project to get started!"</p>
                                        <a class="btn btn-primary" href=Route::ProjectNew.href()>"Create Project"</a>
                                    </div>
                                }
                            >
                                <div class="project-list">
                                    <For
                                        each=move || projects.get()
                                        key=|p| p.id.clone()
                                        children=move |project| {
                                            let members = project.members.len();
                                            view! {
                                                <a class="project-item" href=Route::ProjectEdit(project.id.clone()).href()>
                                                    <div class="project-info">
                                                        <h4 class="project-name">{project.name.clone()}</h4>
                                                        <p class="project-description">
                                                            {project.description.clone().filter(|d| !d.is_empty())
                                                                .unwrap_or_else(|| "No description available".to_string())}
                                                        </p>
                                                        <div class="project-meta">
                                                            <span class="project-members">
                                                                <span class="material-icons">"group"</span>
                                                                {format!("{} member{}", members, if members == 1 { "" } else { "s" })}
                                                            </span>
                                                            {project.created_at.map(|d| view! {
                                                                <span class="project-created">
                                                                    <span class="material-icons">"schedule"</span>
                                                                    {format!("Created {}", short_date(d))}
                                                                </span>
                                                            })}
                                                        </div>
                                                    </div>
                                                    <ProgressRing percent=project.progress() />
                                                </a>
                                            }
                                        }
                                    />
                                </div>
                            </Show>
                        </div>
                    </div>

                    <div class="dashboard-card">
                        <div class="card-header">
                            <h2 class="card-title">"Recent Tasks"</h2>
                            <a href=Route::Tasks.href() class="card-action">"View all"</a>
                        </div>
                        <div class="card-content">
                            <Show
                                when=move || !tasks.with(Vec::is_empty)
                                fallback=|| view! {
                                    <div class="empty-state">
                                        <span class="material-icons">"task"</span>
                                        <p>"No tasks yet. Create a task to start tracking work."</p>
                                        <a class="btn btn-primary" href=Route::TaskNew.href()>"Create Task"</a>
                                    </div>
                                }
                            >
                                <div class="task-list">
                                    <For
                                        each=move || tasks.get()
                                        key=|t| t.id.clone()
                                        children=move |task| {
                                            let now = Utc::now();
                                            view! {
                                                <a class="task-item" href=Route::TaskEdit(task.id.clone()).href()>
                                                    <div class=format!("task-status status-{}", task.status.as_str())>
                                                        <span class="material-icons">{task.status.icon()}</span>
                                                    </div>
                                                    <div class="task-info">
                                                        <h4 class="task-title">{task.title.clone()}</h4>
                                                        <p class="task-project">{task.project_name().unwrap_or("").to_string()}</p>
                                                    </div>
                                                    <div class="task-meta">
                                                        {task.priority.map(|p| view! {
                                                            <span class=format!("task-priority priority-{}", p.as_str())>{p.label()}</span>
                                                        })}
                                                        {task.due_date.map(|d| view! {
                                                            <span class="task-due">{relative_day(d, now)}</span>
                                                        })}
                                                    </div>
                                                </a>
                                            }
                                        }
                                    />
                                </div>
                            </Show>
                        </div>
                    </div>
                </div>

                <div class="quick-actions">
                    <a href=Route::ProjectNew.href() class="quick-action">
                        <span class="material-icons">"create_new_folder"</span>
                        "New Project"
                    </a>
                    <a href=Route::TaskNew.href() class="quick-action">
                        <span class="material-icons">"add_task"</span>
                        "New Task"
                    </a>
                    <a href=Route::Kanban.href() class="quick-action">
                        <span class="material-icons">"view_kanban"</span>
                        "Kanban Board"
                    </a>
                    <a href=Route::Projects.href() class="quick-action">
                        <span class="material-icons">"folder"</span>
                        "All Projects"
                    </a>
                </div>
            </Show>
        </div>
    }
}
