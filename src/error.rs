//! Error types for Todoist API calls.
//!
//! The engine distinguishes two families of failure: transient transport
//! trouble that is worth retrying, and terminal errors that are surfaced to
//! the caller immediately. Non-success HTTP statuses other than 5xx are not
//! errors at all — they come back as ordinary [`Exchange`](crate::Exchange)
//! values for the caller to interpret.

use http::StatusCode;

/// The main error type for Todoist API calls.
///
/// # Examples
///
/// ```no_run
/// use todoist_rest::{CallSpec, Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .base_url("https://api.todoist.com/rest/v1/")
///     .token("my-token")
///     .build()?;
///
/// let spec = CallSpec::new(http::Method::GET, "tasks");
/// match client.execute(&spec).await {
///     Ok(exchange) => println!("status {}", exchange.status),
///     Err(Error::RetriesExhausted { attempts, last_error }) => {
///         eprintln!("gave up after {attempts} attempts: {last_error}");
///     }
///     Err(e) => eprintln!("call failed: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A transport-level error occurred (connection failed, timeout,
    /// request cancelled, and so on).
    ///
    /// Wraps the underlying `reqwest::Error`. Whether the failure is
    /// retried depends on its categorized cause — see
    /// [`Error::is_transient`].
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a 5xx status.
    ///
    /// A 5xx response is normalized into a raised failure before
    /// classification, so the retry loop handles it exactly like a
    /// transport timeout. Every other status is returned to the caller as
    /// a completed exchange.
    #[error("server error {status}: {body}")]
    ServerError {
        /// The HTTP status code (always 5xx).
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// The retry budget was spent without a successful exchange.
    ///
    /// Carries the number of attempts made and the last transient failure
    /// encountered before giving up.
    #[error("retries exhausted after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Total attempts made (initial call plus retries).
        attempts: u32,
        /// The last transient failure.
        last_error: Box<Error>,
    },

    /// Failed to deserialize a response body into the expected type.
    ///
    /// Produced by [`Exchange::json`](crate::Exchange::json); preserves the
    /// raw body so schema mismatches can be debugged from logs.
    #[error("failed to deserialize response (status {status}): {serde_error}")]
    Decode {
        /// The raw response body that failed to deserialize.
        raw_body: String,
        /// The serde error message.
        serde_error: String,
        /// The HTTP status code of the response.
        status: StatusCode,
    },

    /// Failed to serialize a request body to JSON.
    #[error("failed to serialize request body: {0}")]
    BodySerialization(#[source] serde_json::Error),

    /// Invalid client configuration (blank credential, zero retry budget,
    /// and so on).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The base URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if this failure is worth retrying.
    ///
    /// Transient failures are transport errors whose categorized cause is a
    /// timeout, a closed connection, a cancelled request, or an otherwise
    /// unclassified transport problem — plus the normalized 5xx condition.
    /// Everything else (request construction errors, body serialization
    /// errors, decode errors, configuration errors) is terminal.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Transport(e) => {
                e.is_timeout() || e.is_connect() || e.is_request() || e.is_body()
            }
            Error::ServerError { .. } => true,
            _ => false,
        }
    }

    /// Returns the HTTP status code if this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::ServerError { status, .. } => Some(*status),
            Error::Decode { status, .. } => Some(*status),
            Error::Transport(e) => e.status(),
            Error::RetriesExhausted { last_error, .. } => last_error.status(),
            _ => None,
        }
    }
}

/// A specialized `Result` type for Todoist API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_is_transient() {
        let err = Error::ServerError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn decode_error_is_terminal() {
        let err = Error::Decode {
            raw_body: "not json".to_string(),
            serde_error: "expected value".to_string(),
            status: StatusCode::OK,
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn configuration_error_is_terminal() {
        let err = Error::Configuration("token must not be blank".to_string());
        assert!(!err.is_transient());
    }

    #[test]
    fn exhaustion_reports_inner_status() {
        let err = Error::RetriesExhausted {
            attempts: 4,
            last_error: Box::new(Error::ServerError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            }),
        };
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!err.is_transient());
    }
}
