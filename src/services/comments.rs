//! Comment operations.
//!
//! Comments hang off either a task or a project; listing filters by a
//! query parameter and creation carries the owning id in the body.

use http::Method;
use serde_json::json;

use super::{applied, decode_json_ok, fresh_request_id};
use crate::model::Comment;
use crate::{CallSpec, Client, Result};

/// Service for [`Comment`] resources.
#[derive(Debug, Clone)]
pub struct CommentService {
    client: Client,
}

impl CommentService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists all comments on a task.
    pub async fn all_for_task(&self, task_id: i64) -> Result<Option<Vec<Comment>>> {
        let spec =
            CallSpec::new(Method::GET, "comments").with_query("task_id", task_id.to_string());
        let exchange = self.client.execute(&spec).await?;
        decode_json_ok(&exchange)
    }

    /// Lists all comments on a project.
    pub async fn all_for_project(&self, project_id: i64) -> Result<Option<Vec<Comment>>> {
        let spec = CallSpec::new(Method::GET, "comments")
            .with_query("project_id", project_id.to_string());
        let exchange = self.client.execute(&spec).await?;
        decode_json_ok(&exchange)
    }

    /// Adds a comment to a task.
    pub async fn create_for_task(&self, task_id: i64, content: &str) -> Result<Option<Comment>> {
        self.create(json!({ "task_id": task_id, "content": content }))
            .await
    }

    /// Adds a comment to a project.
    pub async fn create_for_project(
        &self,
        project_id: i64,
        content: &str,
    ) -> Result<Option<Comment>> {
        self.create(json!({ "project_id": project_id, "content": content }))
            .await
    }

    async fn create(&self, body: serde_json::Value) -> Result<Option<Comment>> {
        let spec = CallSpec::new(Method::POST, "comments")
            .with_request_id(fresh_request_id())
            .with_json_body(&body)?;
        let exchange = self.client.execute(&spec).await?;
        decode_json_ok(&exchange)
    }

    /// Fetches one comment; `None` when it does not exist.
    pub async fn get(&self, comment_id: i64) -> Result<Option<Comment>> {
        let exchange = self
            .client
            .execute(&CallSpec::new(
                Method::GET,
                format!("comments/{comment_id}"),
            ))
            .await?;
        decode_json_ok(&exchange)
    }

    /// Rewrites the comment's content. Returns `true` when the server
    /// confirmed the update.
    pub async fn update(&self, comment_id: i64, content: &str) -> Result<bool> {
        let spec = CallSpec::new(Method::POST, format!("comments/{comment_id}"))
            .with_request_id(fresh_request_id())
            .with_json_body(&json!({ "content": content }))?;
        let exchange = self.client.execute(&spec).await?;
        Ok(applied(&exchange))
    }

    /// Deletes the comment.
    pub async fn delete(&self, comment_id: i64) -> Result<bool> {
        let spec = CallSpec::new(Method::DELETE, format!("comments/{comment_id}"));
        let exchange = self.client.execute(&spec).await?;
        Ok(applied(&exchange))
    }
}
