//! Edit Task Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use crate::api;
use crate::components::{DeleteConfirmButton, ErrorBanner, Loading, TaskFields, TaskStatusBadge, Touched};
use crate::error::ApiError;
use crate::forms::{can_submit, TaskForm};
use crate::format::timestamp;
use crate::markdown::render_description;
use crate::models::{Project, Task, User};
use crate::router::{use_navigator, Route};
use crate::session::use_session;

#[component]
pub fn TaskEditPage(id: String) -> impl IntoView {
    let session = use_session();
    let api = session.api();
    let nav = use_navigator();
    let id = StoredValue::new(id);

    let form = RwSignal::new(TaskForm::default());
    let touched = Touched::new();
    let (task, set_task) = signal(None::<Task>);
    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (users, set_users) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);

    spawn_local(async move {
        let task_id = id.get_value();
        let (task_res, projects_res, users_res) = futures::join!(
            api::get_task(&api, &task_id),
            api::list_projects(&api),
            api::list_users(&api),
        );
        match projects_res {
            Ok(list) => {
                set_projects.try_set(list);
            }
            Err(e) => warn!("project options unavailable: {}", e),
        }
        match users_res {
            Ok(list) => {
                set_users.try_set(list);
            }
            Err(e) => warn!("assignee options unavailable: {}", e),
        }
        match task_res {
            Ok(loaded) => {
                form.try_set(TaskForm::from_task(&loaded));
                set_task.try_set(Some(loaded));
            }
            Err(e) => {
                session.handle_error("failed to load task", &e);
            }
        }
        set_loading.try_set(false);
    });

    let report = move |context: &str, e: &ApiError| {
        set_error.try_set(Some(session.handle_error(context, e)));
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
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
            match api::update_task(&api, &id.get_value(), &payload).await {
                Ok(()) => {
                    info!(task_id = %id.get_value(), "task updated");
                    nav.navigate(Route::Tasks);
                }
                Err(e) => report("failed to update task", &e),
            }
            set_submitting.try_set(false);
        });
    };

    let on_delete = move |_: ()| {
        set_submitting.set(true);
        spawn_local(async move {
            match api::delete_task(&api, &id.get_value()).await {
                Ok(()) => {
                    info!(task_id = %id.get_value(), "task deleted");
                    nav.navigate(Route::Tasks);
                }
                Err(e) => report("failed to delete task", &e),
            }
            set_submitting.try_set(false);
        });
    };

    let details = move || {
        task.get().map(|t| {
            let creator = t
                .created_by
                .as_ref()
                .and_then(|r| r.populated())
                .map(User::full_name)
                .filter(|n| !n.is_empty());
            let description = t.description.as_deref().filter(|d| !d.trim().is_empty()).map(render_description);
            view! {
                <aside class="task-info-panel">
                    <div class="info-row">
                        <span class="info-label">"Status"</span>
                        <TaskStatusBadge status=t.status />
                    </div>
                    {creator.map(|name| view! {
                        <div class="info-row">
                            <span class="info-label">"Created by"</span>
                            <span>{name}</span>
                        </div>
                    })}
                    {t.created_at.map(|d| view! {
                        <div class="info-row">
                            <span class="info-label">"Created"</span>
                            <span>{timestamp(d)}</span>
                        </div>
                    })}
                    {t.updated_at.map(|d| view! {
                        <div class="info-row">
                            <span class="info-label">"Last updated"</span>
                            <span>{timestamp(d)}</span>
                        </div>
                    })}
                    {description.map(|html| view! {
                        <div class="description-preview markdown-body" inner_html=html></div>
                    })}
                </aside>
            }
        })
    };

    view! {
        <div class="task-edit">
            <div class="page-header">
                <div class="header-title">
                    <button type="button" class="btn btn-ghost" on:click=move |_| nav.navigate(Route::Tasks)>
                        <span class="material-icons">"arrow_back"</span>
                    </button>
                    <h1>"Edit Task"</h1>
                </div>
            </div>

            <ErrorBanner message=error />

            <Show when=move || !loading.get() fallback=|| view! { <Loading text="Loading task..." /> }>
                <Show
                    when=move || task.with(Option::is_some)
                    fallback=|| view! {
                        <div class="error-container">
                            <span class="material-icons error-icon">"error_outline"</span>
                            <h2>"Task Not Found"</h2>
                            <p>"The task you're looking for doesn't exist or has been deleted."</p>
                            <a class="btn btn-primary" href=Route::Tasks.href()>"Go to Tasks"</a>
                        </div>
                    }
                >
                    <div class="task-edit-content">
                        <form class="task-form" on:submit=on_submit>
                            <TaskFields form=form touched=touched projects=projects assignees=users />
                            <div class="form-actions">
                                <DeleteConfirmButton
                                    label="Delete Task"
                                    button_class="btn btn-error-outline"
                                    disabled=submitting
                                    on_confirm=on_delete
                                />
                                <div class="form-actions-right">
                                    <button type="button" class="btn btn-outline" on:click=move |_| nav.navigate(Route::Tasks)>
                                        "Cancel"
                                    </button>
                                    <button
                                        type="submit"
                                        class="btn btn-primary"
                                        disabled=move || !can_submit(form.with(TaskForm::is_valid), submitting.get())
                                    >
                                        {move || if submitting.get() { "Saving..." } else { "Save Changes" }}
                                    </button>
                                </div>
                            </div>
                        </form>
                        {details}
                    </div>
                </Show>
            </Show>
        </div>
    }
}
