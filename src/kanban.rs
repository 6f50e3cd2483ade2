//! Kanban Board Logic
//!
//! Buckets a project's tasks into three columns and applies status changes
//! in memory so the board can update before the server answers.

use crate::models::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Todo,
    InProgress,
    Done,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Todo, Column::InProgress, Column::Done];

    pub fn title(&self) -> &'static str {
        match self {
            Column::Todo => "To Do",
            Column::InProgress => "In Progress",
            Column::Done => "Done",
        }
    }

    /// Status given to a task dropped on this column
    pub fn status(&self) -> TaskStatus {
        match self {
            Column::Todo => TaskStatus::Pending,
            Column::InProgress => TaskStatus::InProgress,
            Column::Done => TaskStatus::Completed,
        }
    }

    /// Column a task with `status` is shown in; review shares In Progress
    pub fn for_status(status: TaskStatus) -> Column {
        match status {
            TaskStatus::Pending => Column::Todo,
            TaskStatus::InProgress | TaskStatus::Review => Column::InProgress,
            TaskStatus::Completed => Column::Done,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl Board {
    pub fn column(&self, column: Column) -> &[Task] {
        match column {
            Column::Todo => &self.todo,
            Column::InProgress => &self.in_progress,
            Column::Done => &self.done,
        }
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split the tasks of `project_id` into columns, keeping their order
pub fn bucket_tasks(tasks: &[Task], project_id: &str) -> Board {
    let mut board = Board::default();
    for task in tasks.iter().filter(|t| t.project_id() == project_id) {
        let bucket = match Column::for_status(task.status) {
            Column::Todo => &mut board.todo,
            Column::InProgress => &mut board.in_progress,
            Column::Done => &mut board.done,
        };
        bucket.push(task.clone());
    }
    board
}

/// Status a drop should apply, or `None` when the task stays in its column
pub fn plan_drop(tasks: &[Task], task_id: &str, column: Column) -> Option<TaskStatus> {
    let task = tasks.iter().find(|t| t.id == task_id)?;
    if Column::for_status(task.status) == column {
        return None;
    }
    Some(column.status())
}

/// Set a task's status in place, returning the status it had before
pub fn set_status(tasks: &mut [Task], task_id: &str, status: TaskStatus) -> Option<TaskStatus> {
    let task = tasks.iter_mut().find(|t| t.id == task_id)?;
    Some(std::mem::replace(&mut task.status, status))
}

/// Undo a failed move; a task that has moved on since keeps its newer status
pub fn revert_status(tasks: &mut [Task], task_id: &str, applied: TaskStatus, previous: TaskStatus) -> bool {
    match tasks.iter_mut().find(|t| t.id == task_id) {
        Some(task) if task.status == applied => {
            task.status = previous;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task(id: &str, project: &str, status: &str) -> Task {
        serde_json::from_value(json!({
            "_id": id, "title": id, "status": status, "project": project
        }))
        .unwrap()
    }

    fn sample() -> Vec<Task> {
        vec![
            task("a", "p1", "pending"),
            task("b", "p1", "in_progress"),
            task("c", "p1", "review"),
            task("d", "p1", "completed"),
            task("e", "p2", "pending"),
            task("f", "p1", "pending"),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_bucket_partitions_selected_project() {
        let tasks = sample();
        let board = bucket_tasks(&tasks, "p1");
        assert_eq!(ids(&board.todo), vec!["a", "f"]);
        assert_eq!(ids(&board.in_progress), vec!["b", "c"]);
        assert_eq!(ids(&board.done), vec!["d"]);

        let in_project = tasks.iter().filter(|t| t.project_id() == "p1").count();
        assert_eq!(board.len(), in_project);
        let mut all: Vec<&str> = Column::ALL.iter().flat_map(|c| ids(board.column(*c))).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), in_project);
    }

    #[test]
    fn test_unknown_project_is_empty() {
        assert!(bucket_tasks(&sample(), "nope").is_empty());
    }

    #[test]
    fn test_drop_on_same_column_is_noop() {
        let tasks = sample();
        assert_eq!(plan_drop(&tasks, "a", Column::Todo), None);
        assert_eq!(plan_drop(&tasks, "c", Column::InProgress), None);
        assert_eq!(plan_drop(&tasks, "a", Column::Done), Some(TaskStatus::Completed));
        assert_eq!(plan_drop(&tasks, "missing", Column::Done), None);
    }

    #[test]
    fn test_status_change_is_reversible() {
        let mut tasks = sample();
        let before = tasks.clone();
        let previous = set_status(&mut tasks, "b", TaskStatus::Completed).unwrap();
        assert_eq!(previous, TaskStatus::InProgress);
        assert_eq!(ids(&bucket_tasks(&tasks, "p1").done), vec!["b", "d"]);

        set_status(&mut tasks, "b", previous);
        assert_eq!(tasks, before);
        assert_eq!(set_status(&mut tasks, "missing", TaskStatus::Pending), None);
    }

    #[test]
    fn test_revert_skips_a_newer_move() {
        let mut tasks = sample();
        let first = set_status(&mut tasks, "a", TaskStatus::InProgress).unwrap();
        set_status(&mut tasks, "a", TaskStatus::Completed);

        assert!(!revert_status(&mut tasks, "a", TaskStatus::InProgress, first));
        assert_eq!(tasks[0].status, TaskStatus::Completed);

        assert!(revert_status(&mut tasks, "a", TaskStatus::Completed, TaskStatus::InProgress));
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        assert!(!revert_status(&mut tasks, "missing", TaskStatus::Pending, TaskStatus::Completed));
    }
}
