//! Per-attempt exchange tracing.
//!
//! Every attempt the client makes — success, transient failure, or terminal
//! failure — is handed to an [`ExchangeObserver`] before the retry loop
//! moves on. The observer is a pure side channel: it cannot change the
//! outcome of a call, and a failure while producing the record (say, a body
//! that claims to be JSON but is not) must degrade to logging raw text
//! rather than surfacing.
//!
//! Observers are injected on the client; the default [`TracingObserver`]
//! emits one structured `tracing` event per attempt and leaves sink
//! selection to whatever subscriber the host application installs.

use http::{HeaderMap, Method, StatusCode};
use serde::Serialize;
use url::Url;

/// Where a recorded request parameter was carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Header,
    Query,
    Body,
}

/// One request parameter as a name/value/kind triple.
#[derive(Debug, Clone, Serialize)]
pub struct Param {
    pub name: String,
    pub value: String,
    pub kind: ParamKind,
}

impl Param {
    pub(crate) fn new(name: impl Into<String>, value: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
        }
    }
}

/// Response half of an attempt record, present when the server answered.
#[derive(Debug)]
pub struct ResponseTrace<'a> {
    /// The response status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: &'a HeaderMap,
    /// The response URI (after any redirects).
    pub url: &'a Url,
    /// The declared content type, if any.
    pub content_type: Option<&'a str>,
    /// The raw body text.
    pub body: &'a str,
}

/// Everything recorded about one attempt.
#[derive(Debug)]
pub struct AttemptTrace<'a> {
    /// The target resource path.
    pub resource: &'a str,
    /// The HTTP verb.
    pub method: &'a Method,
    /// The fully resolved request URI.
    pub url: &'a Url,
    /// Request parameters (headers, query, body) as name/value/kind triples.
    pub params: &'a [Param],
    /// 1-based attempt number within the call.
    pub attempt: u32,
    /// Elapsed milliseconds for this attempt.
    pub elapsed_ms: u64,
    /// The response, when one arrived (also present for the normalized 5xx
    /// failure path).
    pub response: Option<ResponseTrace<'a>>,
    /// The raised failure, when the attempt did not complete the call.
    pub error: Option<&'a crate::Error>,
}

/// Observer invoked once per attempt, regardless of outcome.
///
/// Implementations must not panic; the client calls them on every path,
/// including the one about to propagate a terminal failure.
pub trait ExchangeObserver: Send + Sync {
    /// Records one attempt.
    fn record(&self, trace: &AttemptTrace<'_>);
}

/// Default observer emitting structured `tracing` events.
///
/// Successful attempts log at `info`, failed attempts at `warn`. When a
/// response is a JSON success the body is logged in parsed (compact) form;
/// anything else is logged as raw text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExchangeObserver for TracingObserver {
    fn record(&self, trace: &AttemptTrace<'_>) {
        let params = serde_json::to_string(trace.params).unwrap_or_else(|_| "[]".to_string());

        match (&trace.response, trace.error) {
            (Some(response), None) => {
                tracing::info!(
                    resource = trace.resource,
                    method = %trace.method,
                    uri = %trace.url,
                    parameters = %params,
                    attempt = trace.attempt,
                    elapsed_ms = trace.elapsed_ms,
                    status = response.status.as_u16(),
                    response_uri = %response.url,
                    response_headers = ?response.headers,
                    body = %loggable_body(response),
                    "request completed"
                );
            }
            (Some(response), Some(error)) => {
                tracing::warn!(
                    resource = trace.resource,
                    method = %trace.method,
                    uri = %trace.url,
                    parameters = %params,
                    attempt = trace.attempt,
                    elapsed_ms = trace.elapsed_ms,
                    status = response.status.as_u16(),
                    response_uri = %response.url,
                    response_headers = ?response.headers,
                    body = %loggable_body(response),
                    error = %error,
                    "request attempt failed"
                );
            }
            (None, Some(error)) => {
                tracing::warn!(
                    resource = trace.resource,
                    method = %trace.method,
                    uri = %trace.url,
                    parameters = %params,
                    attempt = trace.attempt,
                    elapsed_ms = trace.elapsed_ms,
                    error = %error,
                    "request attempt failed before a response arrived"
                );
            }
            (None, None) => {}
        }
    }
}

/// Renders the body for the trace record.
///
/// JSON successes are re-serialized from the parsed value; a body that
/// fails to parse falls back to raw text instead of failing the record.
fn loggable_body(response: &ResponseTrace<'_>) -> String {
    let is_json = response
        .content_type
        .is_some_and(|ct| ct.starts_with("application/json"));

    if response.status.is_success() && is_json {
        match serde_json::from_str::<serde_json::Value>(response.body) {
            Ok(value) => value.to_string(),
            Err(_) => response.body.to_string(),
        }
    } else {
        response.body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_trace<'a>(
        status: StatusCode,
        headers: &'a HeaderMap,
        url: &'a Url,
        content_type: Option<&'a str>,
        body: &'a str,
    ) -> ResponseTrace<'a> {
        ResponseTrace {
            status,
            headers,
            url,
            content_type,
            body,
        }
    }

    #[test]
    fn json_success_body_is_parsed() {
        let headers = HeaderMap::new();
        let url = Url::parse("https://api.todoist.com/rest/v1/tasks").unwrap();
        let trace = response_trace(
            StatusCode::OK,
            &headers,
            &url,
            Some("application/json"),
            "{\n  \"id\": 1\n}",
        );

        assert_eq!(loggable_body(&trace), "{\"id\":1}");
    }

    #[test]
    fn malformed_json_falls_back_to_raw_text() {
        let headers = HeaderMap::new();
        let url = Url::parse("https://api.todoist.com/rest/v1/tasks").unwrap();
        let trace = response_trace(
            StatusCode::OK,
            &headers,
            &url,
            Some("application/json"),
            "oops",
        );

        assert_eq!(loggable_body(&trace), "oops");
    }

    #[test]
    fn non_success_body_stays_raw() {
        let headers = HeaderMap::new();
        let url = Url::parse("https://api.todoist.com/rest/v1/tasks").unwrap();
        let trace = response_trace(
            StatusCode::NOT_FOUND,
            &headers,
            &url,
            Some("application/json"),
            "{\"error\": \"missing\"}",
        );

        assert_eq!(loggable_body(&trace), "{\"error\": \"missing\"}");
    }

    #[test]
    fn params_serialize_as_triples() {
        let params = vec![
            Param::new("Cache-Control", "no-cache", ParamKind::Header),
            Param::new("task_id", "7", ParamKind::Query),
        ];
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(
            json,
            "[{\"name\":\"Cache-Control\",\"value\":\"no-cache\",\"kind\":\"header\"},\
             {\"name\":\"task_id\",\"value\":\"7\",\"kind\":\"query\"}]"
        );
    }
}
