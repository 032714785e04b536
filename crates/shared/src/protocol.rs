use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Priority, Task, TaskId, TaskStatus, UserId};

/// Wire shape of a task. Older backend builds send `taskName` instead of
/// `title`; both are accepted here so nothing downstream ever branches on
/// the response shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub id: TaskId,
    #[serde(alias = "taskName")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "TaskPayload::default_status")]
    pub status: TaskStatus,
    #[serde(default = "TaskPayload::default_priority")]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl TaskPayload {
    fn default_status() -> TaskStatus {
        TaskStatus::Pending
    }

    fn default_priority() -> Priority {
        Priority::Medium
    }

    pub fn into_task(self) -> Task {
        Task {
            id: self.id,
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
        }
    }
}

impl From<Task> for TaskPayload {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
        }
    }
}

/// The list endpoint returns either a bare array or a pagination envelope
/// with a `content` field. Both are valid; normalize immediately.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TaskListResponse {
    Bare(Vec<TaskPayload>),
    Paged { content: Vec<TaskPayload> },
}

impl TaskListResponse {
    pub fn into_tasks(self) -> Vec<Task> {
        let payloads = match self {
            Self::Bare(payloads) => payloads,
            Self::Paged { content } => content,
        };
        payloads.into_iter().map(TaskPayload::into_task).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Partial task update; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_payload_accepts_legacy_task_name_field() {
        let payload: TaskPayload = serde_json::from_str(
            r#"{"id": 7, "taskName": "Ship the board view", "status": "IN_PROGRESS", "priority": "HIGH"}"#,
        )
        .unwrap();
        let task = payload.into_task();
        assert_eq!(task.id, TaskId(7));
        assert_eq!(task.title, "Ship the board view");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.description, None);
    }

    #[test]
    fn task_payload_defaults_missing_status_and_priority() {
        let payload: TaskPayload =
            serde_json::from_str(r#"{"id": 1, "title": "Bare minimum"}"#).unwrap();
        assert_eq!(payload.status, TaskStatus::Pending);
        assert_eq!(payload.priority, Priority::Medium);
    }

    #[test]
    fn task_list_response_normalizes_both_shapes() {
        let bare: TaskListResponse =
            serde_json::from_str(r#"[{"id": 1, "title": "a"}, {"id": 2, "title": "b"}]"#).unwrap();
        assert_eq!(bare.into_tasks().len(), 2);

        let paged: TaskListResponse =
            serde_json::from_str(r#"{"content": [{"id": 3, "title": "c"}]}"#).unwrap();
        let tasks = paged.into_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, TaskId(3));
    }

    #[test]
    fn task_patch_serializes_only_set_fields() {
        let patch = TaskPatch {
            status: Some(TaskStatus::Completed),
            ..TaskPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "COMPLETED" }));
    }

    #[test]
    fn due_date_round_trips_as_iso_date() {
        let payload: TaskPayload =
            serde_json::from_str(r#"{"id": 4, "title": "d", "dueDate": "2026-03-15"}"#).unwrap();
        assert_eq!(
            payload.due_date,
            Some(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap())
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["dueDate"], "2026-03-15");
    }
}
