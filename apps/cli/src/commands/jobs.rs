//! Job-kind lifecycle commands: listing and weight download.

use super::client;
use crate::handlers::weights;
use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::Table;
use kiln_client::{JobKind, JobStatus, api};
use serde_json::Value;
use std::path::PathBuf;

fn str_field<'a>(row: &'a Value, keys: &[&str]) -> &'a str {
    keys.iter().find_map(|key| row.get(*key).and_then(Value::as_str)).unwrap_or("-")
}

/// List jobs of a kind in a grouped, captioned table.
pub async fn list(kind: JobKind) -> Result<()> {
    let client = client()?;
    let rows = match kind {
        JobKind::Pretraining => api::list_pretrainings(&client).await,
        JobKind::Merging => api::list_mergings(&client).await,
        other => anyhow::bail!("Listing is not available for {other} jobs"),
    }
    .with_context(|| format!("Error listing {kind} jobs"))?;

    if rows.is_empty() {
        println!("{}", format!("No {kind} jobs found.").dimmed());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Status", "Base Model", "Last Updated"]);

    let mut counts: Vec<(JobStatus, usize)> = Vec::new();
    for row in &rows {
        let state = JobStatus::from_remote(str_field(row, &["processing_state"]));
        match counts.iter().position(|(s, _)| *s == state) {
            Some(index) => counts[index].1 += 1,
            None => counts.push((state, 1)),
        }

        table.add_row(vec![
            str_field(row, &["name"]),
            str_field(row, &["status"]),
            str_field(row, &["base_generator", "base_model"]),
            str_field(row, &["updated_at", "created_at"]),
        ]);
    }

    println!("{table}");

    let captions: Vec<String> = counts
        .iter()
        .map(|(state, n)| match state {
            JobStatus::Failed => format!("Failed: {n}").red().to_string(),
            JobStatus::TrainingComplete => format!("Completed: {n}").green().to_string(),
            JobStatus::Processing => format!("Processing: {n}").yellow().to_string(),
            JobStatus::Pending => format!("Pending: {n}").blue().to_string(),
            JobStatus::Unknown(s) => format!("{s}: {n}"),
        })
        .collect();
    println!("{}", captions.join(" | "));
    Ok(())
}

/// Download a trained job's weight archive.
pub async fn download(kind: JobKind, name: &str, out: Option<PathBuf>) -> Result<()> {
    let client = client()?;
    weights::download(&client, kind, name, out)
        .await
        .with_context(|| format!("Error downloading {kind} weights"))
}
