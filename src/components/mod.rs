//! UI Components
//!
//! Pages and the reusable Leptos widgets they are built from.

mod admin;
mod auth;
mod badges;
mod dashboard;
mod delete_confirm_button;
mod form_field;
mod home;
mod kanban_board;
pub mod member_picker;
mod navbar;
mod notifications_page;
mod password_recovery;
mod profile;
mod project_create;
mod project_edit;
mod project_list;
pub mod task_form;
mod task_create;
mod task_edit;
mod task_list;

pub use admin::{AdminDashboardPage, UserManagementPage};
pub use auth::{LoginPage, RegisterPage};
pub use badges::{PriorityBadge, ProgressRing, ProjectStatusBadge, TaskStatusBadge};
pub use dashboard::DashboardPage;
pub use delete_confirm_button::DeleteConfirmButton;
pub use form_field::{ErrorBanner, FieldMessage, Loading, Touched};
pub use home::{HomePage, NotFoundPage};
pub use kanban_board::KanbanPage;
pub use member_picker::MemberPicker;
pub use navbar::{Footer, Navbar};
pub use notifications_page::NotificationsPage;
pub use password_recovery::{ForgotPasswordPage, ResetPasswordPage};
pub use profile::ProfilePage;
pub use project_create::ProjectCreatePage;
pub use project_edit::ProjectEditPage;
pub use project_list::ProjectListPage;
pub use task_create::TaskCreatePage;
pub use task_edit::TaskEditPage;
pub use task_form::TaskFields;
pub use task_list::TaskListPage;
