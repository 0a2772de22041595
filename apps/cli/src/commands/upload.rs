//! Upload commands: documents into contexts, QA pairs into QA sets.

use super::client;
use crate::handlers::upload::{UploadOptions, upload_context, upload_qa_files};
use anyhow::{Result, bail};
use colored::Colorize;
use std::path::PathBuf;

pub async fn context(
    name: &str,
    mut files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
    doc_name: &str,
    doc_text: &str,
    chunk_size_mb: u64,
) -> Result<()> {
    if files.is_empty() && directories.is_empty() {
        bail!("At least one --file or --directory must be provided");
    }
    files.extend(directories);

    let client = client()?;
    let options = UploadOptions {
        doc_name: doc_name.to_string(),
        doc_text: doc_text.to_string(),
        chunk_size_mb,
    };
    let uploaded = upload_context(&client, name, files, &options).await?;
    println!("{} Uploaded {} document(s) to context {}", "✓".green(), uploaded, name.cyan());
    Ok(())
}

pub async fn qa(name: &str, files: Vec<PathBuf>) -> Result<()> {
    let client = client()?;
    let uploaded = upload_qa_files(&client, name, files).await?;
    println!("{} Uploaded {} QA pair(s) to set {}", "✓".green(), uploaded, name.cyan());
    Ok(())
}
