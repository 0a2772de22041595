//! Status command: one status check for a training job.

use super::client;
use anyhow::{Context, Result};
use colored::Colorize;
use kiln_client::JobStatus;
use kiln_client::api;

pub async fn execute(name: &str) -> Result<()> {
    let client = client()?;
    let status = api::model_status(&client, name)
        .await
        .with_context(|| format!("Error checking status of {name}"))?;

    let status_str = match status.status {
        JobStatus::TrainingComplete => status.status.to_string().green(),
        JobStatus::Failed => status.status.to_string().red(),
        JobStatus::Processing => status.status.to_string().yellow(),
        JobStatus::Pending => status.status.to_string().blue(),
        JobStatus::Unknown(_) => status.status.to_string().normal(),
    };
    println!("{} ({}): {}", name.cyan(), status.id.dimmed(), status_str);
    Ok(())
}
