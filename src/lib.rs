//! # todoist-rest — a typed client for the Todoist REST API
//!
//! An async client library exposing CRUD operations for tasks, projects,
//! labels, and comments, built on `reqwest`. Every call runs through one
//! resilient execution engine that handles bearer authentication, retry of
//! transient failures with a fixed delay, and structured per-attempt
//! tracing.
//!
//! ## Quick Start
//!
//! ```no_run
//! use todoist_rest::{services::{TaskDraft, TaskService}, Client};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), todoist_rest::Error> {
//!     let client = Client::builder()
//!         .base_url("https://api.todoist.com/rest/v1/")
//!         .token(std::env::var("TODOIST_TOKEN").expect("TODOIST_TOKEN not set"))
//!         .max_retries(3)
//!         .retry_delay(Duration::from_secs(5))
//!         .build()?;
//!
//!     let tasks = TaskService::new(client.clone());
//!
//!     if let Some(all) = tasks.all().await? {
//!         println!("{} active tasks", all.len());
//!     }
//!
//!     if let Some(task) = tasks.create(&TaskDraft::new("Write the report")).await? {
//!         println!("created {} ({})", task.id, task.content);
//!         tasks.close(task.id).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## How calls execute
//!
//! Services translate each operation into a [`CallSpec`] and hand it to
//! [`Client::execute`], which drives the attempt loop:
//!
//! - transport failures (timeout, closed connection, cancelled request,
//!   unclassified transport errors) and 5xx responses are **transient** —
//!   retried after a fixed delay, up to the configured budget;
//! - any other raised failure is **terminal** and propagates immediately;
//! - any other HTTP status — including 404 — is **not an error**: it comes
//!   back as a raw [`Exchange`] and the service layer interprets it
//!   (200 + JSON ⇒ decode the model, 204 ⇒ applied, anything else ⇒
//!   absence).
//!
//! Every attempt, successful or not, is reported to the client's
//! [`ExchangeObserver`] before the loop moves on. The default observer
//! emits structured [`tracing`] events; install any subscriber to collect
//! them, or inject your own observer for custom sinks.
//!
//! ## Direct engine access
//!
//! The services cover the API surface, but nothing stops you from issuing
//! calls yourself:
//!
//! ```no_run
//! use http::Method;
//! use todoist_rest::{CallSpec, Client};
//!
//! # async fn example() -> Result<(), todoist_rest::Error> {
//! # let client = Client::builder()
//! #     .base_url("https://api.todoist.com/rest/v1/")
//! #     .token("my-token")
//! #     .build()?;
//! let spec = CallSpec::new(Method::GET, "comments")
//!     .with_query("task_id", "2995104339");
//! let exchange = client.execute(&spec).await?;
//!
//! if exchange.status == 200 && exchange.is_json() {
//!     let comments: Vec<todoist_rest::model::Comment> = exchange.json()?;
//!     println!("{} comments", comments.len());
//! }
//! # Ok(())
//! # }
//! ```

mod call;
mod client;
mod error;
mod exchange;
pub mod model;
mod retry;
pub mod services;
pub mod trace;

pub use call::CallSpec;
pub use client::{Client, ClientBuilder};
pub use error::{Error, Result};
pub use exchange::Exchange;
pub use retry::RetryPolicy;
pub use trace::{ExchangeObserver, TracingObserver};
