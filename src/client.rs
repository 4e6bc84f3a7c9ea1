//! HTTP client with retry logic and per-attempt tracing.
//!
//! The [`Client`] type is the request-execution engine: it turns a
//! [`CallSpec`] into an authenticated HTTP exchange, retries transient
//! failures with a fixed delay, and hands every attempt to the configured
//! [`ExchangeObserver`]. Use [`ClientBuilder`] to configure and create
//! clients.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use http::header;
use url::Url;

use crate::{
    call::CallSpec,
    exchange::Exchange,
    retry::RetryPolicy,
    trace::{AttemptTrace, ExchangeObserver, Param, ParamKind, ResponseTrace, TracingObserver},
    Error, Result,
};

/// An HTTP client for the Todoist REST API.
///
/// The client is immutable once built and cheap to clone; one instance is
/// meant to be shared by all resource services and across concurrent
/// callers. Each call runs its own sequential attempt loop — there is no
/// shared mutable state between calls.
///
/// # Examples
///
/// ```no_run
/// use http::Method;
/// use todoist_rest::{CallSpec, Client};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), todoist_rest::Error> {
/// let client = Client::builder()
///     .base_url("https://api.todoist.com/rest/v1/")
///     .token("my-token")
///     .max_retries(3)
///     .retry_delay(Duration::from_secs(5))
///     .build()?;
///
/// let exchange = client.execute(&CallSpec::new(Method::GET, "tasks")).await?;
/// println!("{} in {:?}", exchange.status, exchange.elapsed);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    retry: RetryPolicy,
    timeout: Option<Duration>,
    observer: Arc<dyn ExchangeObserver>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("token", &"<redacted>")
            .field("retry", &self.inner.retry)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

impl Client {
    /// Creates a new `ClientBuilder`.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Executes a call specification against the API.
    ///
    /// The attempt loop runs until one of three terminal outcomes:
    ///
    /// - the exchange completes without a raised failure and without a 5xx
    ///   status — the raw [`Exchange`] is returned, whatever the status
    ///   (a 404 is a result, not an error);
    /// - a raised failure is classified terminal — it propagates
    ///   immediately, with no delay;
    /// - a transient failure occurs with the retry budget spent — the last
    ///   failure propagates as [`Error::RetriesExhausted`].
    ///
    /// A transient failure with budget remaining sleeps the configured
    /// fixed delay and attempts again. Every attempt is recorded by the
    /// observer before the loop moves on. Dropping the returned future
    /// cancels the call at the current suspension point (the in-flight
    /// attempt or the retry sleep).
    pub async fn execute(&self, spec: &CallSpec) -> Result<Exchange> {
        let url = self.resolve_url(spec)?;
        let params = self.param_records(spec);
        let started = Instant::now();
        let mut retries: u32 = 0;

        loop {
            let attempt = retries + 1;
            let attempt_started = Instant::now();

            let failure: Error = match self.attempt(spec, url.clone()).await {
                Ok(response) => {
                    let status = response.status();
                    let response_url = response.url().clone();
                    let headers = response.headers().clone();

                    match response.text().await {
                        Ok(body) => {
                            let content_type = headers
                                .get(header::CONTENT_TYPE)
                                .and_then(|v| v.to_str().ok());
                            let response_trace = ResponseTrace {
                                status,
                                headers: &headers,
                                url: &response_url,
                                content_type,
                                body: &body,
                            };

                            if status.is_server_error() {
                                let err = Error::ServerError {
                                    status,
                                    body: body.clone(),
                                };
                                self.observe(
                                    spec,
                                    &url,
                                    &params,
                                    attempt,
                                    attempt_started,
                                    Some(response_trace),
                                    Some(&err),
                                );
                                err
                            } else {
                                self.observe(
                                    spec,
                                    &url,
                                    &params,
                                    attempt,
                                    attempt_started,
                                    Some(response_trace),
                                    None,
                                );
                                return Ok(Exchange {
                                    status,
                                    headers,
                                    body,
                                    url: response_url,
                                    elapsed: started.elapsed(),
                                    attempts: attempt,
                                });
                            }
                        }
                        Err(e) => {
                            let err = Error::Transport(e);
                            self.observe(
                                spec,
                                &url,
                                &params,
                                attempt,
                                attempt_started,
                                None,
                                Some(&err),
                            );
                            err
                        }
                    }
                }
                Err(e) => {
                    let err = Error::Transport(e);
                    self.observe(
                        spec,
                        &url,
                        &params,
                        attempt,
                        attempt_started,
                        None,
                        Some(&err),
                    );
                    err
                }
            };

            if !failure.is_transient() {
                return Err(failure);
            }

            match self.inner.retry.delay_before_retry(retries) {
                Some(delay) => {
                    tracing::warn!(
                        delay_ms = delay.as_millis() as u64,
                        attempt = attempt,
                        method = %spec.method,
                        resource = %spec.path,
                        error = %failure,
                        "transient failure, retrying after delay"
                    );
                    tokio::time::sleep(delay).await;
                    retries += 1;
                }
                None => {
                    return Err(Error::RetriesExhausted {
                        attempts: attempt,
                        last_error: Box::new(failure),
                    });
                }
            }
        }
    }

    /// Executes a single attempt.
    async fn attempt(
        &self,
        spec: &CallSpec,
        url: Url,
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        tracing::debug!(method = %spec.method, url = %url, "executing HTTP request");
        self.build_request(spec, url).send().await
    }

    /// Assembles the wire request for one attempt.
    ///
    /// Deterministic in the spec and configuration: repeated builds of the
    /// same spec produce structurally identical requests.
    fn build_request(&self, spec: &CallSpec, url: Url) -> reqwest::RequestBuilder {
        let mut request = self
            .inner
            .http
            .request(spec.method.clone(), url)
            .header(header::CACHE_CONTROL, "no-cache")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.inner.token),
            );

        if let Some(id) = &spec.request_id {
            request = request.header("X-Request-Id", id);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        // .json() also sets Content-Type: application/json; without a body
        // neither the header nor an empty body marker is sent.
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        request
    }

    /// Resolves the full request URL: base joined with the resource path,
    /// query parameters appended in spec order.
    fn resolve_url(&self, spec: &CallSpec) -> Result<Url> {
        let mut url = self.inner.base_url.join(spec.path.trim_start_matches('/'))?;
        for (key, value) in &spec.query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    /// Request parameters as name/value/kind triples for the trace record.
    /// The bearer credential is redacted.
    fn param_records(&self, spec: &CallSpec) -> Vec<Param> {
        let mut params = vec![
            Param::new("Cache-Control", "no-cache", ParamKind::Header),
            Param::new("Authorization", "Bearer <redacted>", ParamKind::Header),
        ];

        if let Some(id) = &spec.request_id {
            params.push(Param::new("X-Request-Id", id.clone(), ParamKind::Header));
        }

        for (key, value) in &spec.query {
            params.push(Param::new(key.clone(), value.clone(), ParamKind::Query));
        }

        if let Some(body) = &spec.body {
            params.push(Param::new("body", body.to_string(), ParamKind::Body));
        }

        params
    }

    #[allow(clippy::too_many_arguments)]
    fn observe(
        &self,
        spec: &CallSpec,
        url: &Url,
        params: &[Param],
        attempt: u32,
        attempt_started: Instant,
        response: Option<ResponseTrace<'_>>,
        error: Option<&Error>,
    ) {
        let trace = AttemptTrace {
            resource: &spec.path,
            method: &spec.method,
            url,
            params,
            attempt,
            elapsed_ms: attempt_started.elapsed().as_millis() as u64,
            response,
            error,
        };
        self.inner.observer.record(&trace);
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// All four configuration values are validated in [`build`](Self::build);
/// construction fails fast on the first violated constraint.
///
/// # Examples
///
/// ```no_run
/// use todoist_rest::Client;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), todoist_rest::Error> {
/// let client = Client::builder()
///     .base_url("https://api.todoist.com/rest/v1/")
///     .token("my-token")
///     .retry_delay(Duration::from_secs(2))
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    max_retries: u32,
    retry_delay: Duration,
    timeout: Option<Duration>,
    observer: Option<Arc<dyn ExchangeObserver>>,
}

impl ClientBuilder {
    /// Creates a builder with the default retry policy (3 retries, 5 s
    /// fixed delay).
    pub fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            max_retries: RetryPolicy::DEFAULT_MAX_RETRIES,
            retry_delay: RetryPolicy::DEFAULT_DELAY,
            timeout: None,
            observer: None,
        }
    }

    /// Sets the base URL of the API (required, non-blank).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the bearer credential (required, non-blank).
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the maximum number of retries after the initial attempt
    /// (must be positive; default 3).
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the fixed delay between attempts (must be positive; default 5 s).
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets the per-attempt request timeout. A timed-out attempt is a
    /// transient failure and is retried under the normal policy.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replaces the default `tracing`-backed observer.
    pub fn observer(mut self, observer: Arc<dyn ExchangeObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the base URL or token is
    /// missing or blank, the retry count is zero, or the retry delay is
    /// zero; [`Error::InvalidUrl`] when the base URL does not parse.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Configuration("base URL is required".to_string()))?;
        if base_url.trim().is_empty() {
            return Err(Error::Configuration(
                "base URL must not be blank".to_string(),
            ));
        }

        let token = self
            .token
            .ok_or_else(|| Error::Configuration("authorization token is required".to_string()))?;
        if token.trim().is_empty() {
            return Err(Error::Configuration(
                "authorization token must not be blank".to_string(),
            ));
        }

        if self.max_retries == 0 {
            return Err(Error::Configuration(
                "max_retries must be positive".to_string(),
            ));
        }

        if self.retry_delay.is_zero() {
            return Err(Error::Configuration(
                "retry_delay must be positive".to_string(),
            ));
        }

        let mut base_url = Url::parse(&base_url)?;
        // Url::join resolves relative to the last path segment, so the
        // base path must end with '/' for "tasks" to land under it.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                token,
                retry: RetryPolicy::new(self.max_retries, self.retry_delay),
                timeout: self.timeout,
                observer: self
                    .observer
                    .unwrap_or_else(|| Arc::new(TracingObserver)),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
