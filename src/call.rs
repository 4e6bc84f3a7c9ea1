//! Logical call specifications.
//!
//! A [`CallSpec`] describes one API call independent of the wire: verb,
//! resource path, optional correlation id, ordered query parameters, and an
//! optional JSON body. The client turns a spec into an HTTP request the
//! same way every time, so a spec can be executed repeatedly (retries)
//! without drift.

use http::Method;
use serde::Serialize;

use crate::{Error, Result};

/// Specification of a single logical API call.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use todoist_rest::CallSpec;
///
/// let spec = CallSpec::new(Method::GET, "comments")
///     .with_query("task_id", "42")
///     .with_request_id("4f9d…");
/// assert_eq!(spec.path, "comments");
/// ```
#[derive(Debug, Clone)]
pub struct CallSpec {
    /// The HTTP verb.
    pub method: Method,

    /// Resource path relative to the base URL (may embed identifiers,
    /// e.g. `tasks/42/close`).
    pub path: String,

    /// Optional correlation id, sent as the `X-Request-Id` header.
    ///
    /// Callers vary this per logical call, not per retry — retries of one
    /// call reuse the same id.
    pub request_id: Option<String>,

    /// Query parameters in the order they will appear on the URL. Keys are
    /// unique within one call.
    pub query: Vec<(String, String)>,

    /// JSON body payload, if any.
    pub body: Option<serde_json::Value>,
}

impl CallSpec {
    /// Creates a spec with the given verb and resource path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            request_id: None,
            query: Vec::new(),
            body: None,
        }
    }

    /// Sets the correlation id for this call.
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Appends a query parameter.
    ///
    /// Writing a key that is already present replaces its value in place,
    /// keeping keys unique and order stable.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    /// Sets the body payload, converting it to a JSON value up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodySerialization`] if the payload cannot be
    /// represented as JSON.
    pub fn with_json_body<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(Error::BodySerialization)?);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_params_keep_insertion_order() {
        let spec = CallSpec::new(Method::GET, "comments")
            .with_query("task_id", "7")
            .with_query("limit", "10");

        assert_eq!(
            spec.query,
            vec![
                ("task_id".to_string(), "7".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn duplicate_query_key_replaces_in_place() {
        let spec = CallSpec::new(Method::GET, "comments")
            .with_query("task_id", "7")
            .with_query("limit", "10")
            .with_query("task_id", "8");

        assert_eq!(
            spec.query,
            vec![
                ("task_id".to_string(), "8".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn body_is_converted_eagerly() {
        let spec = CallSpec::new(Method::POST, "tasks")
            .with_json_body(&json!({"content": "buy milk"}))
            .unwrap();

        assert_eq!(spec.body, Some(json!({"content": "buy milk"})));
    }

    #[test]
    fn no_body_by_default() {
        let spec = CallSpec::new(Method::GET, "tasks");
        assert!(spec.body.is_none());
        assert!(spec.request_id.is_none());
        assert!(spec.query.is_empty());
    }
}
