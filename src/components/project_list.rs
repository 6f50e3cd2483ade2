//! Project List Page
//!
//! Loads every project once and filters in memory.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::info;

use crate::api;
use crate::components::{DeleteConfirmButton, ErrorBanner, Loading, PriorityBadge, ProjectStatusBadge};
use crate::filters::ProjectFilter;
use crate::format::{is_overdue, short_date};
use crate::markdown::excerpt;
use crate::models::{Priority, Project, ProjectStatus};
use crate::router::{use_navigator, Route};
use crate::session::use_session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Grid,
    List,
}

#[component]
pub fn ProjectListPage() -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let nav = use_navigator();

    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);
    let filter = RwSignal::new(ProjectFilter::default());
    let (show_filters, set_show_filters) = signal(false);
    let (view_mode, set_view_mode) = signal(ViewMode::Grid);

    spawn_local(async move {
        match api::list_projects(&api).await {
            Ok(list) => {
                info!("loaded {} projects", list.len());
                set_projects.try_set(list);
            }
            Err(e) => {
                set_error.try_set(Some(session.handle_error("failed to load projects", &e)));
            }
        }
        set_loading.try_set(false);
    });

    let filtered = Memo::new(move |_| projects.with(|list| filter.with(|f| f.apply(list))));

    let delete_project = move |id: String| {
        spawn_local(async move {
            match api::delete_project(&api, &id).await {
                Ok(()) => {
                    info!(project_id = %id, "project deleted");
                    set_projects.try_update(|list| list.retain(|p| p.id != id));
                }
                Err(e) => {
                    set_error.try_set(Some(session.handle_error("failed to delete project", &e)));
                }
            }
        });
    };

    view! {
        <div class="projects-page">
            <div class="page-header">
                <div class="header-content">
                    <div class="header-text">
                        <h1 class="page-title">"Projects"</h1>
                        <p class="page-subtitle">"Manage and track all your projects in one place"</p>
                    </div>
                    <div class="header-actions">
                        <button type="button" class="btn btn-outline" on:click=move |_| set_show_filters.update(|v| *v = !*v)>
                            <span class="material-icons">"filter_list"</span>
                            "Filters"
                        </button>
                        <a class="btn btn-primary" href=Route::ProjectNew.href()>
                            <span class="material-icons">"add"</span>
                            "New Project"
                        </a>
                    </div>
                </div>

                <Show when=move || show_filters.get()>
                    <div class="filter-bar">
                        <div class="filter-group">
                            <label>"Status"</label>
                            <select
                                class="filter-select"
                                prop:value=move || filter.with(|f| f.status.map(|s| s.as_str()).unwrap_or(""))
                                on:change=move |ev| filter.update(|f| f.status = event_target_value(&ev).parse().ok())
                            >
                                <option value="">"All Status"</option>
                                {ProjectStatus::ALL
                                    .iter()
                                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="filter-group">
                            <label>"Priority"</label>
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
                        </div>
                        <div class="filter-group">
                            <label>"Search"</label>
                            <div class="search-input">
                                <span class="material-icons">"search"</span>
                                <input
                                    type="text"
                                    placeholder="Search projects..."
                                    prop:value=move || filter.with(|f| f.search.clone())
                                    on:input=move |ev| filter.update(|f| f.search = event_target_value(&ev))
                                />
                            </div>
                        </div>
                        <div class="filter-group">
                            <label>"View"</label>
                            <div class="view-toggle">
                                <button
                                    type="button"
                                    class="view-btn"
                                    class:active=move || view_mode.get() == ViewMode::Grid
                                    on:click=move |_| set_view_mode.set(ViewMode::Grid)
                                >
                                    <span class="material-icons">"grid_view"</span>
                                </button>
                                <button
                                    type="button"
                                    class="view-btn"
                                    class:active=move || view_mode.get() == ViewMode::List
                                    on:click=move |_| set_view_mode.set(ViewMode::List)
                                >
                                    <span class="material-icons">"view_list"</span>
                                </button>
                            </div>
                        </div>
                    </div>
                </Show>
            </div>

            <ErrorBanner message=error />

            <Show when=move || !loading.get() fallback=|| view! { <Loading text="Loading projects..." /> }>
                <div class="projects-count">
                    <p>{move || format!("{} of {} projects", filtered.with(Vec::len), projects.with(Vec::len))}</p>
                </div>

                <Show
                    when=move || !filtered.with(Vec::is_empty)
                    fallback=move || {
                        if filter.with(ProjectFilter::is_active) {
                            view! {
                                <div class="empty-state">
                                    <span class="material-icons">"search_off"</span>
                                    <h3>"No projects found"</h3>
                                    <p>"Try adjusting your filters or search terms"</p>
                                    <button type="button" class="btn btn-outline" on:click=move |_| filter.set(ProjectFilter::default())>
                                        "Clear Filters"
                                    </button>
                                </div>
                            }
                            .into_any()
                        } else {
                            view! {
                                <div class="empty-state">
                                    <span class="material-icons">"folder_open"</span>
                                    <h3>"No projects yet"</h3>
                                    <p>"Create your first project to start organizing your work"</p>
                                    <a class="btn btn-primary" href=Route::ProjectNew.href()>"Create Project"</a>
                                </div>
                            }
                            .into_any()
                        }
                    }
                >
                    <div class=move || match view_mode.get() {
                        ViewMode::Grid => "projects-container view-grid",
                        ViewMode::List => "projects-container view-list",
                    }>
                        <For
                            each=move || filtered.get()
                            key=|p| p.id.clone()
                            children=move |project| {
                                let id = project.id.clone();
                                let edit_route = Route::ProjectEdit(id.clone());
                                let progress = project.progress();
                                let members = project.members.len();
                                let now = Utc::now();
                                view! {
                                    <div class="project-card" on:click=move |_| nav.navigate(edit_route.clone())>
                                        <div class="project-header">
                                            <div class="project-title-section">
                                                <h3 class="project-name">{project.name.clone()}</h3>
                                                <div class="project-badges">
                                                    <ProjectStatusBadge status=project.status />
                                                    <PriorityBadge priority=project.priority />
                                                </div>
                                            </div>
                                            <div class="project-actions" on:click=|ev| ev.stop_propagation()>
                                                <DeleteConfirmButton
                                                    label=""
                                                    button_class="action-btn"
                                                    on_confirm=move |_| delete_project(id.clone())
                                                />
                                            </div>
                                        </div>

                                        {project.description.as_deref().filter(|d| !d.is_empty()).map(|d| view! {
                                            <p class="project-description">{excerpt(d, 160)}</p>
                                        })}

                                        <div class="project-progress">
                                            <div class="progress-header">
                                                <span class="progress-label">"Progress"</span>
                                                <span class="progress-percentage">{format!("{}%", progress)}</span>
                                            </div>
                                            <div class="progress-bar">
                                                <div class="progress-fill" style:width=format!("{}%", progress)></div>
                                            </div>
                                            <div class="progress-details">
                                                <span class="task-count">
                                                    {format!(
                                                        "{}/{} tasks completed",
                                                        project.completed_task_count.unwrap_or(0),
                                                        project.task_count.unwrap_or(0),
                                                    )}
                                                </span>
                                            </div>
                                        </div>

                                        <div class="project-footer">
                                            <span class="members-label">
                                                <span class="material-icons">"group"</span>
                                                {format!("{} member{}", members, if members == 1 { "" } else { "s" })}
                                            </span>
                                            <div class="project-dates">
                                                {project.due_date.map(|d| view! {
                                                    <span class="due-date" class:overdue=is_overdue(Some(d), now)>
                                                        <span class="material-icons">"schedule"</span>
                                                        {format!("Due {}", short_date(d))}
                                                    </span>
                                                })}
                                                {project.created_at.map(|d| view! {
                                                    <span class="created-date">{format!("Created {}", short_date(d))}</span>
                                                })}
                                            </div>
                                        </div>
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
