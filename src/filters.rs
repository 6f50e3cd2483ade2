//! Client-side List Filtering
//!
//! Collections are fetched whole; these predicates narrow and order them
//! for display.

use chrono::{DateTime, Utc};

use crate::models::{Notification, Priority, Project, ProjectStatus, Task, TaskStatus, User};

/// Minimum query length before member search runs
pub const MIN_SEARCH_LEN: usize = 2;
/// Most suggestions shown by the local member search
pub const LOCAL_SEARCH_LIMIT: usize = 8;

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub search: String,
}

impl ProjectFilter {
    pub fn is_active(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || !self.search.trim().is_empty()
    }

    pub fn matches(&self, project: &Project) -> bool {
        if self.status.is_some_and(|s| project.status != Some(s)) {
            return false;
        }
        if self.priority.is_some_and(|p| project.priority != Some(p)) {
            return false;
        }
        let term = self.search.trim().to_lowercase();
        term.is_empty()
            || contains_ci(&project.name, &term)
            || project.description.as_deref().is_some_and(|d| contains_ci(d, &term))
    }

    pub fn apply(&self, projects: &[Project]) -> Vec<Project> {
        projects.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub search: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub project: Option<String>,
}

impl TaskFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || self.status.is_some()
            || self.priority.is_some()
            || self.project.is_some()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|s| task.status != s) {
            return false;
        }
        if self.priority.is_some_and(|p| task.priority != Some(p)) {
            return false;
        }
        if self.project.as_deref().is_some_and(|id| task.project_id() != id) {
            return false;
        }
        let term = self.search.trim().to_lowercase();
        term.is_empty()
            || contains_ci(&task.title, &term)
            || task.description.as_deref().is_some_and(|d| contains_ci(d, &term))
    }

    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Newest `createdAt` first; tasks without a timestamp sink to the end
pub fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

pub fn count_with_status(tasks: &[Task], status: TaskStatus) -> usize {
    tasks.iter().filter(|t| t.status == status).count()
}

/// Tasks whose due date has passed, whatever their status
pub fn count_overdue(tasks: &[Task], now: DateTime<Utc>) -> usize {
    tasks.iter().filter(|t| t.due_date.is_some_and(|d| d < now)).count()
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

pub fn visible_notifications(notifications: &[Notification], unread_only: bool) -> Vec<Notification> {
    notifications
        .iter()
        .filter(|n| !unread_only || !n.read)
        .cloned()
        .collect()
}

/// Member suggestions from an already loaded user list.
///
/// Matches first name, last name or email; skips users already selected.
/// Returns nothing until the query reaches [`MIN_SEARCH_LEN`].
pub fn search_members(users: &[User], query: &str, selected: &[User]) -> Vec<User> {
    let term = query.trim().to_lowercase();
    if term.chars().count() < MIN_SEARCH_LEN {
        return Vec::new();
    }
    users
        .iter()
        .filter(|u| !selected.iter().any(|s| s.id == u.id))
        .filter(|u| {
            contains_ci(&u.first_name, &term) || contains_ci(&u.last_name, &term) || contains_ci(&u.email, &term)
        })
        .take(LOCAL_SEARCH_LIMIT)
        .cloned()
        .collect()
}

/// Drop server search results that are already selected
pub fn exclude_selected(results: Vec<User>, selected: &[User]) -> Vec<User> {
    results
        .into_iter()
        .filter(|u| !selected.iter().any(|s| s.id == u.id))
        .collect()
}

/// User management search over name, username and email; empty query keeps all
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    let term = query.trim().to_lowercase();
    users
        .iter()
        .filter(|u| {
            term.is_empty()
                || contains_ci(&u.full_name(), &term)
                || contains_ci(&u.email, &term)
                || u.username.as_deref().is_some_and(|n| contains_ci(n, &term))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn project(name: &str, status: &str, priority: &str, description: &str) -> Project {
        serde_json::from_value(json!({
            "_id": name, "name": name, "status": status, "priority": priority, "description": description
        }))
        .unwrap()
    }

    fn task(id: &str, status: &str, created: Option<&str>, due: Option<&str>) -> Task {
        let project = if id == "c" { "p2" } else { "p1" };
        serde_json::from_value(json!({
            "_id": id, "title": format!("Task {id}"), "description": "write the report",
            "status": status, "priority": "high", "project": project,
            "createdAt": created, "dueDate": due
        }))
        .unwrap()
    }

    fn user(id: &str, first: &str, last: &str, email: &str) -> User {
        serde_json::from_value(json!({
            "_id": id, "firstName": first, "lastName": last, "email": email
        }))
        .unwrap()
    }

    #[test]
    fn test_project_filter() {
        let projects = vec![
            project("Apollo", "active", "high", "moon landing"),
            project("Gemini", "planning", "low", "two seats"),
        ];
        let mut filter = ProjectFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&projects).len(), 2);

        filter.search = "MOON".into();
        assert_eq!(filter.apply(&projects)[0].name, "Apollo");

        filter.search.clear();
        filter.status = Some(ProjectStatus::Planning);
        assert!(filter.is_active());
        assert_eq!(filter.apply(&projects)[0].name, "Gemini");

        filter.priority = Some(Priority::High);
        assert!(filter.apply(&projects).is_empty());
    }

    #[test]
    fn test_task_filter_and_sort() {
        let mut tasks = vec![
            task("a", "pending", Some("2025-01-01T00:00:00Z"), None),
            task("b", "completed", Some("2025-02-01T00:00:00Z"), None),
            task("c", "pending", None, None),
        ];
        sort_newest_first(&mut tasks);
        let order: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);

        let filter = TaskFilter {
            status: Some(TaskStatus::Pending),
            project: Some("p1".into()),
            ..Default::default()
        };
        assert!(filter.is_active());
        let hits = filter.apply(&tasks);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");

        let search = TaskFilter { search: "REPORT".into(), ..Default::default() };
        assert_eq!(search.apply(&tasks).len(), 3);
    }

    #[test]
    fn test_counts() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let tasks = vec![
            task("a", "pending", None, Some("2025-02-01T00:00:00Z")),
            task("b", "completed", None, Some("2025-02-01T00:00:00Z")),
            task("c", "in_progress", None, Some("2025-04-01T00:00:00Z")),
        ];
        assert_eq!(count_with_status(&tasks, TaskStatus::Pending), 1);
        assert_eq!(count_overdue(&tasks, now), 2);
    }

    #[test]
    fn test_notifications() {
        let list: Vec<Notification> = serde_json::from_value(json!([
            { "id": "1", "message": "a", "read": false },
            { "id": "2", "message": "b", "read": true },
        ]))
        .unwrap();
        assert_eq!(unread_count(&list), 1);
        assert_eq!(visible_notifications(&list, true).len(), 1);
        assert_eq!(visible_notifications(&list, false).len(), 2);
    }

    #[test]
    fn test_member_search_limits() {
        let users: Vec<User> = (0..12).map(|i| user(&i.to_string(), "Sam", &format!("S{i}"), "x@y.z")).collect();
        assert!(search_members(&users, "s", &[]).is_empty());
        assert_eq!(search_members(&users, "sa", &[]).len(), LOCAL_SEARCH_LIMIT);

        let selected = vec![users[0].clone()];
        let hits = search_members(&users[..3], "sam", &selected);
        assert_eq!(hits.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(), vec!["1", "2"]);
        assert_eq!(exclude_selected(users[..3].to_vec(), &selected).len(), 2);
    }

    #[test]
    fn test_filter_users() {
        let users = vec![user("1", "Ada", "Lovelace", "ada@x.io"), user("2", "Alan", "Turing", "alan@y.io")];
        assert_eq!(filter_users(&users, "").len(), 2);
        assert_eq!(filter_users(&users, "turing")[0].id, "2");
        assert_eq!(filter_users(&users, "x.io")[0].id, "1");
    }
}
