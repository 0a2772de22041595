//! Streaming download of trained weight archives.

use anyhow::{Context, Result};
use colored::Colorize;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use kiln_client::api::download_weights;
use kiln_client::{ApiClient, JobKind};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Stream a weight archive to disk, chunk by chunk.
///
/// The archive is never buffered whole; bytes are written as they arrive.
pub async fn download(
    client: &ApiClient,
    kind: JobKind,
    id_or_name: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let out = out.unwrap_or_else(|| PathBuf::from(format!("{id_or_name}.tar.gz")));
    println!("Downloading {kind} model weights for {id_or_name} to {}", out.display());

    let response = download_weights(client, kind, id_or_name).await?;

    let progress = match response.content_length() {
        Some(total) => {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::with_template(
                    "[{bar:40.cyan}] {bytes}/{total_bytes} {bytes_per_sec} ({elapsed})",
                )
                .unwrap(),
            );
            bar
        }
        None => ProgressBar::new_spinner(),
    };

    let mut file = tokio::fs::File::create(&out)
        .await
        .with_context(|| format!("Failed to create {}", out.display()))?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Failed while streaming weights")?;
        file.write_all(&chunk).await?;
        progress.inc(chunk.len() as u64);
    }
    file.flush().await?;
    progress.finish_and_clear();

    println!("{} Downloaded {}", "✓".green(), out.display().to_string().cyan());
    Ok(())
}
