//! Client SDK for the Kiln training platform.
//!
//! Kiln hosts document contexts, training jobs (pretraining, alignment,
//! retriever training, merging), deployments, and inference endpoints.
//! This crate wraps the platform's HTTP API:
//!
//! - [`ClientConfig`] resolves credentials and endpoints from overrides,
//!   environment variables, the per-user JSON config file, and defaults.
//! - [`ApiClient`] is the dispatch chokepoint: one authenticated request
//!   per call, success classified by status code, failures carrying the
//!   raw response text. [`RetryPolicy`] adds fixed-delay retries.
//! - [`api`] holds one thin wrapper per platform operation.
//! - [`TrainedModel`] is a readiness-checked handle for
//!   retrieve/generate/embed queries.
//!
//! ```no_run
//! use kiln_client::{ApiClient, ClientConfig, TrainedModel};
//!
//! # async fn demo() -> Result<(), kiln_client::ClientError> {
//! let client = ApiClient::new(ClientConfig::from_env())?;
//! let model = TrainedModel::connect(&client, "support-bot").await?;
//! let answer = model.generate("How do I reset my password?", 3, &[]).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod retry;
pub mod routes;
pub mod status;

pub use client::{ApiClient, AUTH_HEADER, ORG_HEADER};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use model::{FilterType, QueryFilter, TrainedModel};
pub use retry::RetryPolicy;
pub use routes::{JobKind, Route};
pub use status::JobStatus;
