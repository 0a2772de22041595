//! Retrieve/generate commands against a trained model.

use super::client;
use anyhow::{Context, Result};
use kiln_client::TrainedModel;

pub async fn retrieve(name: &str, query: &str, size: usize) -> Result<()> {
    let client = client()?;
    let model = TrainedModel::connect(&client, name).await.context("Error retrieving")?;
    let response = model.retrieve(query, size, &[]).await.context("Error retrieving")?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub async fn generate(name: &str, query: &str, size: usize) -> Result<()> {
    let client = client()?;
    let model = TrainedModel::connect(&client, name).await.context("Error generating")?;
    let response = model.generate(query, size, &[]).await.context("Error generating")?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
