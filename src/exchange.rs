//! Raw result of a completed HTTP exchange.
//!
//! The engine never decodes domain models. A completed call — whatever its
//! status — is returned as an [`Exchange`] carrying the raw body text plus
//! transaction metadata, and the calling service decides what the status
//! and content type mean.

use std::time::Duration;

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{Error, Result};

/// A completed HTTP exchange.
///
/// Returned for every response the engine does not normalize into a raised
/// failure — including logical non-successes like 404, which the caller
/// interprets as absence rather than an error.
///
/// # Examples
///
/// ```no_run
/// use http::Method;
/// use todoist_rest::{CallSpec, Client};
///
/// # async fn example() -> Result<(), todoist_rest::Error> {
/// # let client = Client::builder()
/// #     .base_url("https://api.todoist.com/rest/v1/")
/// #     .token("my-token")
/// #     .build()?;
/// let exchange = client.execute(&CallSpec::new(Method::GET, "projects")).await?;
/// println!("status {} in {:?}", exchange.status, exchange.elapsed);
/// if exchange.status == 200 && exchange.is_json() {
///     let projects: Vec<todoist_rest::model::Project> = exchange.json()?;
///     println!("{} projects", projects.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Exchange {
    /// The HTTP status code.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// The raw response body as text.
    pub body: String,

    /// The effective request URI (after any redirects).
    pub url: Url,

    /// Total elapsed time for the call, across all attempts.
    pub elapsed: Duration,

    /// Number of attempts made (1 when no retry was needed).
    pub attempts: u32,
}

impl Exchange {
    /// Returns the `Content-Type` header value, if present and readable.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(http::header::CONTENT_TYPE)?
            .to_str()
            .ok()
    }

    /// Returns `true` if the response declares a JSON content type.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.starts_with("application/json"))
    }

    /// Decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] with the raw body preserved when the body
    /// does not match the expected shape.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| Error::Decode {
            raw_body: self.body.clone(),
            serde_error: e.to_string(),
            status: self.status,
        })
    }

    /// Returns a response header value by name, if present and readable.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Returns `true` if the call needed more than one attempt.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }
}
