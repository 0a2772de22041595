//! Org command: print the current organization.

use super::client;
use anyhow::{Context, Result};
use colored::Colorize;
use kiln_client::api;

pub async fn execute() -> Result<()> {
    let client = client()?;
    let org = api::whoami(&client).await.context("Error getting current org")?;
    println!("Current org: {}", org.cyan());
    Ok(())
}
