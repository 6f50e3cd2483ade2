//! Frontend Models
//!
//! Data structures mirroring the REST API's JSON. Ids arrive as `_id` or
//! `id`; reference fields arrive either as an id or as a populated object.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserialize an optional field, treating malformed values as absent
fn lenient<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Move every `_id` onto `id`, dropping a duplicate `id` key
///
/// Documents may carry both keys at once; serde's alias would see the
/// pair as a duplicate field.
pub fn normalize_ids(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(id) = map.remove("_id") {
                map.insert("id".to_string(), id);
            }
            map.values_mut().for_each(normalize_ids);
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_ids),
        _ => {}
    }
}

/// Decode a response body after id normalization
pub fn from_api<T: DeserializeOwned>(mut value: Value) -> Result<T, serde_json::Error> {
    normalize_ids(&mut value);
    serde_json::from_value(value)
}

/// Entities addressable by id
pub trait HasId {
    fn id(&self) -> &str;
}

/// A reference that is either a bare id or the populated entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Populated(T),
    Id(String),
}

impl<T: HasId> Ref<T> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Populated(entity) => entity.id(),
            Ref::Id(id) => id,
        }
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            Ref::Populated(entity) => Some(entity),
            Ref::Id(_) => None,
        }
    }
}

// ========================
// Users
// ========================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Both names present; populated assignees without them are unusable
    pub fn has_names(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty()
    }
}

impl HasId for User {
    fn id(&self) -> &str {
        &self.id
    }
}

// ========================
// Shared enums
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown priority `{s}`"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    Active,
    Completed,
    #[serde(alias = "on-hold")]
    OnHold,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::Planning,
        ProjectStatus::Active,
        ProjectStatus::OnHold,
        ProjectStatus::Completed,
        ProjectStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on_hold",
            ProjectStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = if s == "on-hold" { "on_hold" } else { s };
        ProjectStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| format!("unknown project status `{s}`"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Review,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Review => "review",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Completed => "Done",
        }
    }

    /// Material icon name
    pub fn icon(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "schedule",
            TaskStatus::InProgress => "autorenew",
            TaskStatus::Review => "rate_review",
            TaskStatus::Completed => "check_circle",
        }
    }

    /// Completion checkbox behaviour on the task list
    pub fn toggled(&self) -> TaskStatus {
        match self {
            TaskStatus::Completed => TaskStatus::Pending,
            _ => TaskStatus::Completed,
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| format!("unknown task status `{s}`"))
    }
}

// ========================
// Projects
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<ProjectStatus>,
    #[serde(default, deserialize_with = "lenient")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub owner: Option<Ref<User>>,
    #[serde(default)]
    pub members: Vec<Ref<User>>,
    #[serde(default, deserialize_with = "lenient")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub task_count: Option<u32>,
    #[serde(default)]
    pub completed_task_count: Option<u32>,
}

impl Project {
    /// Percentage of completed tasks; 0 unless both counts are known and non-zero
    pub fn progress(&self) -> u32 {
        match (self.task_count, self.completed_task_count) {
            (Some(total), Some(done)) if total > 0 && done > 0 => {
                ((done as f64 / total as f64) * 100.0).round() as u32
            }
            _ => 0,
        }
    }
}

impl HasId for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Project as embedded in a populated task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl HasId for ProjectSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

// ========================
// Tasks
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "lenient")]
    pub priority: Option<Priority>,
    pub project: Ref<ProjectSummary>,
    #[serde(default, deserialize_with = "lenient")]
    pub assigned_to: Option<Ref<User>>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_by: Option<Ref<User>>,
    #[serde(default, deserialize_with = "lenient")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn project_id(&self) -> &str {
        self.project.id()
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.populated().map(|p| p.name.as_str()).filter(|n| !n.is_empty())
    }

    pub fn assignee(&self) -> Option<&User> {
        self.assigned_to.as_ref().and_then(Ref::populated)
    }
}

impl HasId for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

// ========================
// Notifications
// ========================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
    TaskAssigned,
    TaskUpdated,
    TaskCompleted,
    ProjectInvitation,
    ProjectUpdated,
    Info,
    Warning,
    Error,
    #[default]
    Default,
    Other(String),
}

impl NotificationKind {
    /// Material icon name
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::TaskAssigned => "assignment_ind",
            NotificationKind::TaskUpdated => "update",
            NotificationKind::TaskCompleted => "task_alt",
            NotificationKind::ProjectInvitation => "group_add",
            NotificationKind::ProjectUpdated => "edit",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
            _ => "notifications",
        }
    }
}

impl From<String> for NotificationKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "task_assigned" => NotificationKind::TaskAssigned,
            "task_updated" => NotificationKind::TaskUpdated,
            "task_completed" => NotificationKind::TaskCompleted,
            "project_invitation" => NotificationKind::ProjectInvitation,
            "project_updated" => NotificationKind::ProjectUpdated,
            "info" => NotificationKind::Info,
            "warning" => NotificationKind::Warning,
            "error" => NotificationKind::Error,
            "default" | "" => NotificationKind::Default,
            _ => NotificationKind::Other(s),
        }
    }
}

impl From<NotificationKind> for String {
    fn from(kind: NotificationKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationKind::TaskAssigned => "task_assigned",
            NotificationKind::TaskUpdated => "task_updated",
            NotificationKind::TaskCompleted => "task_completed",
            NotificationKind::ProjectInvitation => "project_invitation",
            NotificationKind::ProjectUpdated => "project_updated",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
            NotificationKind::Default => "default",
            NotificationKind::Other(s) => s,
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(alias = "_id", alias = "notificationId")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default, alias = "isRead")]
    pub read: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub related_entity_id: Option<String>,
}

// ========================
// Dashboard
// ========================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_projects: u32,
    pub active_tasks: u32,
    pub completed_tasks: u32,
    pub overdue_tasks: u32,
}

// ========================
// Request bodies
// ========================

#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub members: Vec<String>,
    pub priority: Priority,
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub members: Vec<String>,
}

/// Body for task create and full update; absent optionals go out as `null`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    pub description: Option<String>,
    pub project: String,
    pub assigned_to: Option<String>,
    pub status: TaskStatus,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_accepts_document_id() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1", "firstName": "Ada", "lastName": "Lovelace",
            "email": "ada@example.com", "role": "admin"
        }))
        .unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.is_admin());
        assert_eq!(user.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_records_with_both_id_keys_decode() {
        let projects: Vec<Project> = from_api(json!([{
            "_id": "p1", "id": "p1", "name": "P",
            "owner": { "_id": "u1", "id": "u1", "firstName": "Ada" },
            "members": [{ "_id": "u2", "id": "u2" }, "u3"]
        }]))
        .unwrap();
        assert_eq!(projects[0].id, "p1");
        assert_eq!(projects[0].owner.as_ref().map(|o| o.id()), Some("u1"));
        assert_eq!(projects[0].members.iter().map(|m| m.id()).collect::<Vec<_>>(), ["u2", "u3"]);

        let user: User = from_api(json!({ "_id": "u1", "id": "virtual", "email": "a@b.c" })).unwrap();
        assert_eq!(user.id, "u1");
    }

    #[test]
    fn test_unknown_role_is_user() {
        let user: User = serde_json::from_value(json!({ "id": "u2", "role": "manager" })).unwrap();
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_task_reference_shapes() {
        let populated: Task = serde_json::from_value(json!({
            "_id": "t1", "title": "Write docs", "status": "in_progress",
            "project": { "_id": "p1", "name": "Docs" },
            "assignedTo": { "_id": "u1", "firstName": "Ada", "lastName": "L" }
        }))
        .unwrap();
        assert_eq!(populated.project_id(), "p1");
        assert_eq!(populated.project_name(), Some("Docs"));
        assert_eq!(populated.assignee().map(|u| u.id.as_str()), Some("u1"));

        let bare: Task = serde_json::from_value(json!({
            "_id": "t2", "title": "Ship", "status": "pending",
            "project": "p1", "assignedTo": "u9"
        }))
        .unwrap();
        assert_eq!(bare.project_id(), "p1");
        assert_eq!(bare.project_name(), None);
        assert!(bare.assignee().is_none());
        assert_eq!(bare.assigned_to.as_ref().map(|r| r.id()), Some("u9"));
    }

    #[test]
    fn test_malformed_optionals_are_dropped() {
        let task: Task = serde_json::from_value(json!({
            "_id": "t3", "title": "x", "status": "review", "project": "p1",
            "priority": "", "dueDate": "not a date"
        }))
        .unwrap();
        assert_eq!(task.priority, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.status, TaskStatus::Review);
    }

    #[test]
    fn test_project_status_accepts_hyphenated_hold() {
        let project: Project =
            serde_json::from_value(json!({ "_id": "p1", "name": "X", "status": "on-hold" })).unwrap();
        assert_eq!(project.status, Some(ProjectStatus::OnHold));
        assert_eq!("on-hold".parse::<ProjectStatus>(), Ok(ProjectStatus::OnHold));
    }

    #[test]
    fn test_project_progress() {
        let mut project: Project =
            serde_json::from_value(json!({ "_id": "p1", "name": "X" })).unwrap();
        assert_eq!(project.progress(), 0);
        project.task_count = Some(3);
        project.completed_task_count = Some(2);
        assert_eq!(project.progress(), 67);
        project.completed_task_count = Some(0);
        assert_eq!(project.progress(), 0);
    }

    #[test]
    fn test_notification_kind_roundtrips_unknown() {
        let n: Notification = serde_json::from_value(json!({
            "id": "n1", "message": "hi", "type": "sprint_started", "isRead": true
        }))
        .unwrap();
        assert!(n.read);
        assert_eq!(n.kind, NotificationKind::Other("sprint_started".into()));
        assert_eq!(n.kind.icon(), "notifications");
        assert_eq!(serde_json::to_value(&n.kind).unwrap(), json!("sprint_started"));
    }

    #[test]
    fn test_task_payload_sends_nulls() {
        let payload = TaskPayload {
            title: "T".into(),
            description: None,
            project: "p1".into(),
            assigned_to: None,
            status: TaskStatus::Pending,
            priority: None,
            due_date: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["assignedTo"], Value::Null);
        assert_eq!(value["priority"], Value::Null);
        assert_eq!(value["status"], json!("pending"));
    }
}
