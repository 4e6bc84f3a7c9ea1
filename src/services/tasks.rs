//! Task operations.

use http::Method;
use serde::Serialize;

use super::{applied, decode_json_ok, fresh_request_id};
use crate::model::{Priority, Task};
use crate::{CallSpec, Client, Result};

/// Fields for creating a task.
///
/// Only `content` is required; a draft with everything else unset lands in
/// the inbox with normal priority. The three due representations
/// (natural-language string, date, datetime) are mutually exclusive on the
/// server side — set at most one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskDraft {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Due date in natural language ("tomorrow at 9am").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
    /// Language of `due_string` (two-letter code).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_lang: Option<String>,
    /// Due date as YYYY-MM-DD (full-day task).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Due instant as an RFC 3339 timestamp in UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_datetime: Option<String>,
}

impl TaskDraft {
    /// Creates a draft with the given content and nothing else set.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

/// Fields for updating a task; unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_datetime: Option<String>,
}

/// Service for [`Task`] resources.
///
/// # Examples
///
/// ```no_run
/// use todoist_rest::{services::{TaskDraft, TaskService}, Client};
///
/// # async fn example() -> Result<(), todoist_rest::Error> {
/// # let client = Client::builder()
/// #     .base_url("https://api.todoist.com/rest/v1/")
/// #     .token("my-token")
/// #     .build()?;
/// let tasks = TaskService::new(client);
///
/// if let Some(created) = tasks.create(&TaskDraft::new("Buy milk")).await? {
///     println!("created task {}", created.id);
///     tasks.close(created.id).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TaskService {
    client: Client,
}

impl TaskService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists all active tasks.
    pub async fn all(&self) -> Result<Option<Vec<Task>>> {
        let exchange = self
            .client
            .execute(&CallSpec::new(Method::GET, "tasks"))
            .await?;
        decode_json_ok(&exchange)
    }

    /// Creates a task. Returns the created task, or `None` when the server
    /// did not answer with one.
    pub async fn create(&self, draft: &TaskDraft) -> Result<Option<Task>> {
        let spec = CallSpec::new(Method::POST, "tasks")
            .with_request_id(fresh_request_id())
            .with_json_body(draft)?;
        let exchange = self.client.execute(&spec).await?;
        decode_json_ok(&exchange)
    }

    /// Fetches one task; `None` when it does not exist.
    pub async fn get(&self, task_id: i64) -> Result<Option<Task>> {
        let exchange = self
            .client
            .execute(&CallSpec::new(Method::GET, format!("tasks/{task_id}")))
            .await?;
        decode_json_ok(&exchange)
    }

    /// Applies the given changes. Returns `true` when the server confirmed
    /// the update.
    pub async fn update(&self, task_id: i64, changes: &TaskChanges) -> Result<bool> {
        let spec = CallSpec::new(Method::POST, format!("tasks/{task_id}"))
            .with_request_id(fresh_request_id())
            .with_json_body(changes)?;
        let exchange = self.client.execute(&spec).await?;
        Ok(applied(&exchange))
    }

    /// Closes (completes) the task.
    pub async fn close(&self, task_id: i64) -> Result<bool> {
        let spec = CallSpec::new(Method::POST, format!("tasks/{task_id}/close"));
        let exchange = self.client.execute(&spec).await?;
        Ok(applied(&exchange))
    }

    /// Reopens a closed task.
    pub async fn reopen(&self, task_id: i64) -> Result<bool> {
        let spec = CallSpec::new(Method::POST, format!("tasks/{task_id}/reopen"));
        let exchange = self.client.execute(&spec).await?;
        Ok(applied(&exchange))
    }

    /// Deletes the task.
    pub async fn delete(&self, task_id: i64) -> Result<bool> {
        let spec = CallSpec::new(Method::DELETE, format!("tasks/{task_id}"));
        let exchange = self.client.execute(&spec).await?;
        Ok(applied(&exchange))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_draft_serializes_to_content_only() {
        let draft = TaskDraft::new("Buy milk");
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"content": "Buy milk"})
        );
    }

    #[test]
    fn full_draft_serializes_all_set_fields() {
        let draft = TaskDraft {
            project_id: Some(42),
            order: Some(1),
            label_ids: Some(vec![7, 8]),
            priority: Some(Priority::Urgent),
            due_string: Some("tomorrow at 9".to_string()),
            due_lang: Some("en".to_string()),
            ..TaskDraft::new("Plan trip")
        };

        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "content": "Plan trip",
                "project_id": 42,
                "order": 1,
                "label_ids": [7, 8],
                "priority": 4,
                "due_string": "tomorrow at 9",
                "due_lang": "en"
            })
        );
    }

    #[test]
    fn empty_changes_serialize_to_empty_object() {
        assert_eq!(
            serde_json::to_value(TaskChanges::default()).unwrap(),
            json!({})
        );
    }
}
