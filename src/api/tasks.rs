//! Task Endpoints
//!
//! Task lists are decoded entry by entry so one malformed task does not
//! sink the whole view.

use reqwest::Method;
use serde_json::Value;
use tracing::warn;

use super::{segment, ApiClient};
use crate::error::ApiError;
use crate::models::{from_api, Ref, StatusUpdate, Task, TaskPayload, TaskStatus};

/// Keep the tasks a view can render; drop or repair the rest
pub fn decode_tasks(raw: Vec<Value>) -> Vec<Task> {
    raw.into_iter().filter_map(decode_task).collect()
}

/// Status text that names no known status; `None` when absent or known
fn unknown_status(raw: &Value) -> Option<&str> {
    raw.get("status")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty() && s.parse::<TaskStatus>().is_err())
}

fn decode_task(raw: Value) -> Option<Task> {
    if let Some(status) = unknown_status(&raw) {
        let id = raw.get("_id").or(raw.get("id")).and_then(Value::as_str).unwrap_or_default();
        warn!(task_id = %id, "dropping task with unknown status `{}`", status);
        return None;
    }
    let mut task = match from_api::<Task>(raw) {
        Ok(task) => task,
        Err(e) => {
            warn!("dropping malformed task: {}", e);
            return None;
        }
    };
    if task.id.is_empty() || task.title.trim().is_empty() {
        warn!(task_id = %task.id, "dropping task without id or title");
        return None;
    }
    if task.project_id().is_empty() {
        warn!(task_id = %task.id, "dropping task without a project");
        return None;
    }
    if let Some(Ref::Populated(user)) = &task.assigned_to {
        if !user.has_names() {
            warn!(task_id = %task.id, "clearing assignee without names");
            task.assigned_to = None;
        }
    }
    Some(task)
}

async fn get_tasks(api: &ApiClient, query: &[(&str, &str)]) -> Result<Vec<Task>, ApiError> {
    let raw: Vec<Value> = api.get("/tasks", query).await?;
    Ok(decode_tasks(raw))
}

pub async fn list_tasks(api: &ApiClient) -> Result<Vec<Task>, ApiError> {
    get_tasks(api, &[]).await
}

/// Newest tasks first with their project populated, at most `limit`
pub async fn recent_tasks(api: &ApiClient, limit: usize) -> Result<Vec<Task>, ApiError> {
    let limit = limit.to_string();
    get_tasks(api, &[("limit", limit.as_str()), ("sort", "-createdAt"), ("populate", "project")]).await
}

/// Tasks of one project with assignee and project populated
pub async fn project_tasks(api: &ApiClient, project_id: &str) -> Result<Vec<Task>, ApiError> {
    get_tasks(api, &[("project", project_id), ("populate", "assignedTo,project")]).await
}

pub async fn get_task(api: &ApiClient, id: &str) -> Result<Task, ApiError> {
    api.get(&format!("/tasks/{}", segment(id)), &[]).await
}

pub async fn create_task(api: &ApiClient, payload: &TaskPayload) -> Result<(), ApiError> {
    api.send_discarding(Method::POST, "/tasks", payload).await
}

pub async fn update_task(api: &ApiClient, id: &str, payload: &TaskPayload) -> Result<(), ApiError> {
    api.send_discarding(Method::PUT, &format!("/tasks/{}", segment(id)), payload).await
}

/// Partial status change, used by the Kanban board
pub async fn patch_task_status(api: &ApiClient, id: &str, status: TaskStatus) -> Result<(), ApiError> {
    api.send_discarding(Method::PATCH, &format!("/tasks/{}", segment(id)), &StatusUpdate { status }).await
}

/// Status-only update, used by the task list's completion toggle
pub async fn put_task_status(api: &ApiClient, id: &str, status: TaskStatus) -> Result<(), ApiError> {
    api.send_discarding(Method::PUT, &format!("/tasks/{}", segment(id)), &StatusUpdate { status }).await
}

pub async fn delete_task(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.delete(&format!("/tasks/{}", segment(id))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_keeps_valid_and_drops_invalid() {
        let raw = vec![
            json!({ "_id": "t1", "title": "ok", "status": "pending", "project": { "_id": "p1", "name": "P" } }),
            json!({ "_id": "t2", "status": "pending", "project": "p1" }),
            json!({ "_id": "t3", "title": "no status", "project": "p1" }),
            json!({ "_id": "t4", "title": "no project", "status": "pending" }),
            json!({ "_id": "t5", "title": "bad project", "status": "pending", "project": { "name": "P" } }),
            json!({ "_id": "", "title": "blank id", "status": "pending", "project": "p1" }),
        ];
        let tasks = decode_tasks(raw);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1"]);
    }

    #[test]
    fn test_decode_accepts_both_id_keys() {
        let raw = vec![json!({
            "_id": "t1", "id": "t1", "title": "ok", "status": "review",
            "project": { "_id": "p1", "id": "p1", "name": "P" }
        })];
        let tasks = decode_tasks(raw);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].project_id(), "p1");
    }

    #[test]
    fn test_unknown_status_is_reported_separately() {
        let blocked = json!({ "_id": "t1", "title": "a", "status": "blocked", "project": "p1" });
        let known = json!({ "_id": "t2", "title": "b", "status": "completed", "project": "p1" });
        assert_eq!(unknown_status(&blocked), Some("blocked"));
        assert_eq!(unknown_status(&known), None);
        assert_eq!(unknown_status(&json!({ "_id": "t3" })), None);
        let tasks = decode_tasks(vec![blocked, known]);
        assert_eq!(tasks.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(), ["t2"]);
    }

    #[test]
    fn test_decode_clears_nameless_assignee() {
        let raw = vec![
            json!({ "_id": "t1", "title": "a", "status": "pending", "project": "p1",
                    "assignedTo": { "_id": "u1", "firstName": "Ada" } }),
            json!({ "_id": "t2", "title": "b", "status": "pending", "project": "p1",
                    "assignedTo": { "_id": "u2", "firstName": "Ada", "lastName": "L" } }),
        ];
        let tasks = decode_tasks(raw);
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].assigned_to.is_none());
        assert_eq!(tasks[1].assignee().map(|u| u.id.as_str()), Some("u2"));
    }
}
