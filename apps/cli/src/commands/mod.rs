//! Command implementations.

pub mod configure;
pub mod jobs;
pub mod org;
pub mod query;
pub mod status;
pub mod train;
pub mod types;
pub mod upload;

use anyhow::{Context, Result};
use kiln_client::{ApiClient, ClientConfig};

/// Build an authenticated client from the resolved configuration.
pub fn client() -> Result<ApiClient> {
    ApiClient::new(ClientConfig::from_env())
        .context("Failed to initialize the Kiln client. Run `kiln configure` first.")
}
