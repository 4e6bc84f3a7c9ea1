//! Per-resource services: thin typed mappings over the execution engine.
//!
//! Every operation follows the same interpretation contract on the
//! returned [`Exchange`](crate::Exchange): a 200 with a JSON content type
//! decodes into the typed model, a 204 means the mutation applied, and any
//! other status is a logical non-success — `None` or `false`, never an
//! error. Mutating operations send a fresh UUID correlation id per logical
//! call; retries within that call reuse it.

mod comments;
mod labels;
mod projects;
mod tasks;

pub use comments::CommentService;
pub use labels::LabelService;
pub use projects::ProjectService;
pub use tasks::{TaskChanges, TaskDraft, TaskService};

use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::{Exchange, Result};

/// Decodes the body when the exchange is a JSON 200; any other outcome is
/// logical absence.
pub(crate) fn decode_json_ok<T: DeserializeOwned>(exchange: &Exchange) -> Result<Option<T>> {
    if exchange.status == StatusCode::OK && exchange.is_json() {
        exchange.json().map(Some)
    } else {
        Ok(None)
    }
}

/// A 204 means the server applied the mutation.
pub(crate) fn applied(exchange: &Exchange) -> bool {
    exchange.status == StatusCode::NO_CONTENT
}

/// Correlation id for one logical mutating call.
pub(crate) fn fresh_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;
    use std::time::Duration;
    use url::Url;

    fn exchange(status: StatusCode, content_type: Option<&'static str>, body: &str) -> Exchange {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static(ct),
            );
        }
        Exchange {
            status,
            headers,
            body: body.to_string(),
            url: Url::parse("https://api.todoist.com/rest/v1/tasks").expect("static url"),
            elapsed: Duration::from_millis(5),
            attempts: 1,
        }
    }

    #[test]
    fn json_ok_decodes() {
        let ex = exchange(StatusCode::OK, Some("application/json"), "[1, 2, 3]");
        let decoded: Option<Vec<i64>> = decode_json_ok(&ex).unwrap();
        assert_eq!(decoded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn non_matching_status_is_absence() {
        let ex = exchange(StatusCode::NOT_FOUND, Some("application/json"), "{}");
        let decoded: Option<Vec<i64>> = decode_json_ok(&ex).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn ok_without_json_content_type_is_absence() {
        let ex = exchange(StatusCode::OK, Some("text/html"), "<html></html>");
        let decoded: Option<Vec<i64>> = decode_json_ok(&ex).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn malformed_json_on_ok_is_an_error() {
        let ex = exchange(StatusCode::OK, Some("application/json"), "not json");
        let decoded: Result<Option<Vec<i64>>> = decode_json_ok(&ex);
        assert!(decoded.is_err());
    }

    #[test]
    fn only_no_content_counts_as_applied() {
        assert!(applied(&exchange(StatusCode::NO_CONTENT, None, "")));
        assert!(!applied(&exchange(StatusCode::OK, None, "")));
        assert!(!applied(&exchange(StatusCode::NOT_FOUND, None, "")));
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(fresh_request_id(), fresh_request_id());
    }
}
