//! Landing and Not-Found Pages

use leptos::prelude::*;

use crate::router::Route;
use crate::store::{use_app_store, AppStateStoreFields};

const FEATURES: &[(&str, &str, &str)] = &[
    ("assignment", "Task Management", "Create, assign and track tasks with deadlines, priorities and detailed descriptions."),
    ("dashboard", "Kanban Boards", "Visualize workflows on a board and move work forward with drag and drop."),
    ("groups", "Team Collaboration", "Invite members to projects and keep everyone on the same page."),
    ("notifications", "Notifications", "Stay informed when tasks are assigned, updated or completed."),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="home-page">
            <section class="hero">
                <div class="hero-content">
                    <h1 class="hero-title">"Simplify Your " <span class="text-accent">"Project Management"</span></h1>
                    <p class="hero-subtitle">
                        "A powerful, intuitive platform for teams to collaborate, organize tasks and deliver projects on time."
                    </p>
                    <div class="hero-buttons">
                        <Show
                            when=move || store.is_logged_in().get()
                            fallback=|| view! {
                                <a class="btn btn-primary" href=Route::Register.href()>"Get Started Free"</a>
                                <a class="btn btn-outline" href=Route::Login { return_url: None }.href()>"Log in"</a>
                            }
                        >
                            <a class="btn btn-primary" href=Route::Dashboard.href()>"Go to Dashboard"</a>
                        </Show>
                    </div>
                </div>
            </section>

            <section class="features">
                <div class="section-header">
                    <h2>"Everything You Need to Manage Projects"</h2>
                </div>
                <div class="features-grid">
                    {FEATURES
                        .iter()
                        .map(|(icon, title, text)| view! {
                            <div class="feature-card">
                                <div class="feature-icon">
                                    <span class="material-icons">{*icon}</span>
                                </div>
                                <h3>{*title}</h3>
                                <p>{*text}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </section>
        </div>
    }
}

#[component]
pub fn NotFoundPage(path: String) -> impl IntoView {
    view! {
        <div class="not-found">
            <h1 class="not-found-title">"404"</h1>
            <h2 class="not-found-subtitle">"Page Not Found"</h2>
            <p class="not-found-message">
                {format!("Nothing lives at {}. It may have been moved or deleted.", path)}
            </p>
            <a class="btn btn-primary" href=Route::Home.href()>"Go to Home"</a>
        </div>
    }
}
