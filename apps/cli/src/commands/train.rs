//! Train command: submit a model training job.

use super::client;
use anyhow::{Context, Result};
use colored::Colorize;
use kiln_client::api;

pub async fn execute(
    name: &str,
    context: Option<&str>,
    instructions: Option<&str>,
    generator: &str,
) -> Result<()> {
    let client = client()?;

    api::train_model(&client, name, context, instructions, generator)
        .await
        .with_context(|| format!("Error training model {name}"))?;

    // The status page lives under the org in the web app.
    let org = api::whoami(&client).await.context("Error getting current org")?;
    let status_url = format!("{}/{}/models/{}/training", client.config().app_url, org, name);

    println!("{} Model {} set for training.", "✓".green(), name.cyan());
    println!("View status at {}", status_url.cyan());
    println!("Or poll with: {}", format!("kiln status {name}").dimmed());
    Ok(())
}
