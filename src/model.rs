//! Typed records for the Todoist REST wire format.
//!
//! These mirror the JSON the API returns; the engine itself never touches
//! them. Fields the server may omit are optional or defaulted so partial
//! payloads decode cleanly.

use serde::{Deserialize, Serialize};

/// Task priority, carried on the wire as an integer from 1 (normal, the
/// default) to 4 (urgent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Priority {
    #[default]
    Normal,
    Medium,
    High,
    Urgent,
}

impl From<u8> for Priority {
    fn from(value: u8) -> Self {
        match value {
            2 => Priority::Medium,
            3 => Priority::High,
            4 => Priority::Urgent,
            _ => Priority::Normal,
        }
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Normal => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }
}

/// A task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(default)]
    pub project_id: i64,
    pub content: String,
    #[serde(default)]
    pub completed: bool,
    /// Labels attached to the task; absent when the task has none.
    #[serde(default)]
    pub label_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub order: i32,
    /// Indentation level, 1 to 5.
    #[serde(default)]
    pub indent: i32,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due: Option<Due>,
    /// Link to the task in the Todoist web UI.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub comment_count: i32,
}

/// When a task is due.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Due {
    /// Human-readable form in arbitrary format ("tomorrow at 9am").
    #[serde(default)]
    pub string: Option<String>,
    /// Date in YYYY-MM-DD, in the user's timezone.
    #[serde(default)]
    pub date: Option<String>,
    /// RFC 3339 timestamp in UTC; only present when a due *time* was set.
    #[serde(default)]
    pub datetime: Option<String>,
    /// User timezone (tzdata name or "UTC±HH:MM" offset); only present
    /// when a due time was set.
    #[serde(default)]
    pub timezone: Option<String>,
}

/// A project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub order: i32,
    /// Indentation level, 1 to 4.
    #[serde(default)]
    pub indent: i32,
    #[serde(default)]
    pub comment_count: i32,
}

/// A label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub order: i32,
}

/// A comment on a task or a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    /// Set for task comments.
    #[serde(default)]
    pub task_id: Option<i64>,
    /// Set for project comments.
    #[serde(default)]
    pub project_id: Option<i64>,
    /// Insertion time, RFC 3339 in UTC.
    #[serde(default)]
    pub posted: Option<String>,
    pub content: String,
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

/// A file attached to a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub upload_state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn priority_wire_values() {
        assert_eq!(serde_json::to_value(Priority::Normal).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(Priority::Urgent).unwrap(), json!(4));
        assert_eq!(
            serde_json::from_value::<Priority>(json!(3)).unwrap(),
            Priority::High
        );
        // out-of-range values degrade to the wire default
        assert_eq!(
            serde_json::from_value::<Priority>(json!(9)).unwrap(),
            Priority::Normal
        );
    }

    #[test]
    fn task_decodes_from_full_payload() {
        let task: Task = serde_json::from_value(json!({
            "id": 2995104339_i64,
            "project_id": 2203306141_i64,
            "content": "Buy Milk",
            "completed": false,
            "label_ids": [2156154810_i64],
            "order": 1,
            "indent": 1,
            "priority": 4,
            "due": {
                "string": "tomorrow at 12",
                "date": "2026-08-08",
                "datetime": "2026-08-08T10:00:00Z",
                "timezone": "Europe/Madrid"
            },
            "url": "https://todoist.com/showTask?id=2995104339",
            "comment_count": 10
        }))
        .unwrap();

        assert_eq!(task.id, 2995104339);
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.label_ids, Some(vec![2156154810]));
        let due = task.due.unwrap();
        assert_eq!(due.date.as_deref(), Some("2026-08-08"));
        assert_eq!(due.timezone.as_deref(), Some("Europe/Madrid"));
    }

    #[test]
    fn task_decodes_from_sparse_payload() {
        let task: Task =
            serde_json::from_value(json!({"id": 1, "content": "Bare minimum"})).unwrap();

        assert_eq!(task.priority, Priority::Normal);
        assert!(task.label_ids.is_none());
        assert!(task.due.is_none());
        assert!(!task.completed);
        assert_eq!(task.comment_count, 0);
    }

    #[test]
    fn comment_sides_are_optional() {
        let for_task: Comment = serde_json::from_value(json!({
            "id": 10, "task_id": 7, "content": "on a task", "posted": "2026-08-07T09:00:00Z"
        }))
        .unwrap();
        let for_project: Comment = serde_json::from_value(json!({
            "id": 11, "project_id": 3, "content": "on a project"
        }))
        .unwrap();

        assert_eq!(for_task.task_id, Some(7));
        assert!(for_task.project_id.is_none());
        assert_eq!(for_project.project_id, Some(3));
        assert!(for_project.task_id.is_none());
    }

    #[test]
    fn attachment_decodes_inside_comment() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 12,
            "task_id": 7,
            "content": "see file",
            "attachment": {
                "file_name": "report.pdf",
                "file_size": 12345,
                "file_type": "application/pdf",
                "file_url": "https://cdn.example.com/report.pdf",
                "upload_state": "completed"
            }
        }))
        .unwrap();

        let attachment = comment.attachment.unwrap();
        assert_eq!(attachment.file_name.as_deref(), Some("report.pdf"));
        assert_eq!(attachment.file_size, Some(12345));
    }
}
