//! Label operations.

use http::Method;
use serde_json::json;

use super::{applied, decode_json_ok, fresh_request_id};
use crate::model::Label;
use crate::{CallSpec, Client, Result};

/// Service for [`Label`] resources.
#[derive(Debug, Clone)]
pub struct LabelService {
    client: Client,
}

impl LabelService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists all labels.
    pub async fn all(&self) -> Result<Option<Vec<Label>>> {
        let exchange = self
            .client
            .execute(&CallSpec::new(Method::GET, "labels"))
            .await?;
        decode_json_ok(&exchange)
    }

    /// Creates a label with the given name.
    pub async fn create(&self, name: &str) -> Result<Option<Label>> {
        let spec = CallSpec::new(Method::POST, "labels")
            .with_request_id(fresh_request_id())
            .with_json_body(&json!({ "name": name }))?;
        let exchange = self.client.execute(&spec).await?;
        decode_json_ok(&exchange)
    }

    /// Fetches one label; `None` when it does not exist.
    pub async fn get(&self, label_id: i64) -> Result<Option<Label>> {
        let exchange = self
            .client
            .execute(&CallSpec::new(Method::GET, format!("labels/{label_id}")))
            .await?;
        decode_json_ok(&exchange)
    }

    /// Renames the label. Returns `true` when the server confirmed the
    /// update.
    pub async fn update(&self, label_id: i64, name: &str) -> Result<bool> {
        let spec = CallSpec::new(Method::POST, format!("labels/{label_id}"))
            .with_request_id(fresh_request_id())
            .with_json_body(&json!({ "name": name }))?;
        let exchange = self.client.execute(&spec).await?;
        Ok(applied(&exchange))
    }

    /// Deletes the label.
    pub async fn delete(&self, label_id: i64) -> Result<bool> {
        let spec = CallSpec::new(Method::DELETE, format!("labels/{label_id}"));
        let exchange = self.client.execute(&spec).await?;
        Ok(applied(&exchange))
    }
}
