//! ProjectFlow App
//!
//! Root component: provides the shared services, runs the start-up session
//! check and renders the page for the current route behind the guard.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use tracing::debug;

use crate::api::ApiClient;
use crate::components::*;
use crate::config::Config;
use crate::router::{check_access, Access, Navigator, Route};
use crate::session::AuthSession;
use crate::store::{AppState, AppStateStoreFields};

fn render_route(route: Route) -> AnyView {
    match route {
        Route::Home => view! { <HomePage /> }.into_any(),
        Route::Login { return_url } => view! { <LoginPage return_url=return_url /> }.into_any(),
        Route::Register => view! { <RegisterPage /> }.into_any(),
        Route::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        Route::ResetPassword { token } => view! { <ResetPasswordPage token=token /> }.into_any(),
        Route::Dashboard => view! { <DashboardPage /> }.into_any(),
        Route::Projects => view! { <ProjectListPage /> }.into_any(),
        Route::ProjectNew => view! { <ProjectCreatePage /> }.into_any(),
        Route::ProjectEdit(id) => view! { <ProjectEditPage id=id /> }.into_any(),
        Route::Tasks => view! { <TaskListPage /> }.into_any(),
        Route::TaskNew => view! { <TaskCreatePage /> }.into_any(),
        Route::TaskEdit(id) => view! { <TaskEditPage id=id /> }.into_any(),
        Route::Kanban => view! { <KanbanPage /> }.into_any(),
        Route::Profile => view! { <ProfilePage /> }.into_any(),
        Route::Notifications => view! { <NotificationsPage /> }.into_any(),
        Route::Admin => view! { <AdminDashboardPage /> }.into_any(),
        Route::AdminUsers => view! { <UserManagementPage /> }.into_any(),
        Route::NotFound(path) => view! { <NotFoundPage path=path /> }.into_any(),
    }
}

#[component]
pub fn App(config: Config) -> impl IntoView {
    let api = ApiClient::new(&config);
    let store = Store::new(AppState::default());
    let nav = Navigator::new();
    let session = AuthSession::new(api, store, nav);

    // Provide services to all pages
    provide_context(config);
    provide_context(store);
    provide_context(nav);
    provide_context(session);

    spawn_local(async move {
        session.check_auth_status().await;
    });

    // Route plus what the guard says about it
    let guarded = Memo::new(move |_| {
        let route = nav.route();
        let access = check_access(&route, store.status().get(), store.is_admin().get());
        (route, access)
    });

    Effect::new(move |_| {
        if let (route, Access::Redirect(target)) = guarded.get() {
            debug!("guard redirect from {} to {}", route.path(), target.path());
            nav.navigate(target);
        }
    });

    view! {
        <div class="app-layout">
            <Navbar />
            <main class="main-content">
                {move || {
                    let (route, access) = guarded.get();
                    match access {
                        Access::Granted => render_route(route),
                        Access::Pending => view! { <Loading text="Checking session..." /> }.into_any(),
                        Access::Redirect(_) => ().into_any(),
                    }
                }}
            </main>
            <Footer />
        </div>
    }
}
