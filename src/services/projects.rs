//! Project operations.

use http::Method;
use serde_json::json;

use super::{applied, decode_json_ok, fresh_request_id};
use crate::model::Project;
use crate::{CallSpec, Client, Result};

/// Service for [`Project`] resources.
#[derive(Debug, Clone)]
pub struct ProjectService {
    client: Client,
}

impl ProjectService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists all projects.
    pub async fn all(&self) -> Result<Option<Vec<Project>>> {
        let exchange = self
            .client
            .execute(&CallSpec::new(Method::GET, "projects"))
            .await?;
        decode_json_ok(&exchange)
    }

    /// Creates a project with the given name.
    pub async fn create(&self, name: &str) -> Result<Option<Project>> {
        let spec = CallSpec::new(Method::POST, "projects")
            .with_request_id(fresh_request_id())
            .with_json_body(&json!({ "name": name }))?;
        let exchange = self.client.execute(&spec).await?;
        decode_json_ok(&exchange)
    }

    /// Fetches one project; `None` when it does not exist.
    pub async fn get(&self, project_id: i64) -> Result<Option<Project>> {
        let exchange = self
            .client
            .execute(&CallSpec::new(
                Method::GET,
                format!("projects/{project_id}"),
            ))
            .await?;
        decode_json_ok(&exchange)
    }

    /// Renames the project. Returns `true` when the server confirmed the
    /// update.
    pub async fn update(&self, project_id: i64, name: &str) -> Result<bool> {
        let spec = CallSpec::new(Method::POST, format!("projects/{project_id}"))
            .with_request_id(fresh_request_id())
            .with_json_body(&json!({ "name": name }))?;
        let exchange = self.client.execute(&spec).await?;
        Ok(applied(&exchange))
    }

    /// Deletes the project.
    pub async fn delete(&self, project_id: i64) -> Result<bool> {
        let spec = CallSpec::new(Method::DELETE, format!("projects/{project_id}"));
        let exchange = self.client.execute(&spec).await?;
        Ok(applied(&exchange))
    }
}
