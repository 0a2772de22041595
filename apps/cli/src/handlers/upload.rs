//! Batch upload of documents and QA pairs from local files.
//!
//! Accepts files and directories; directories expand one level to their
//! non-directory children. Files are parsed per extension (`.txt` is one
//! doc, `.jsonl`/`.csv` one doc per row) and uploaded in chunks so a large
//! corpus never has to fit in memory at once. One chunk is in flight at a
//! time; the next is sent only after the previous response arrives.

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use kiln_client::ApiClient;
use kiln_client::api::{self, Doc, MAX_QA_PAIRS_PER_UPLOAD, QaPair};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Extensions accepted for context uploads.
pub const VALID_CONTEXT_EXTENSIONS: [&str; 3] = ["txt", "jsonl", "csv"];
/// Extensions accepted for QA uploads (row-oriented formats only).
pub const VALID_QA_EXTENSIONS: [&str; 2] = ["jsonl", "csv"];

const ONE_MB: u64 = 1024 * 1024;

/// Options for a context upload.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Column/key holding the doc name in jsonl/csv files.
    pub doc_name: String,
    /// Column/key holding the doc text in jsonl/csv files.
    pub doc_text: String,
    /// Upload chunk cap in megabytes.
    pub chunk_size_mb: u64,
}

/// Upload documents from `paths` into a context, chunked by file size.
///
/// Returns the number of documents uploaded.
pub async fn upload_context(
    client: &ApiClient,
    context: &str,
    paths: Vec<PathBuf>,
    options: &UploadOptions,
) -> Result<usize> {
    let files = expand_paths(paths)?;
    validate_extensions(&files, &VALID_CONTEXT_EXTENSIONS)?;
    if files.is_empty() {
        bail!("No files to upload");
    }

    let sized: Vec<(PathBuf, u64)> = files
        .into_iter()
        .map(|file| {
            let size = file
                .metadata()
                .with_context(|| format!("Failed to stat {}", file.display()))?
                .len();
            Ok((file, size))
        })
        .collect::<Result<_>>()?;
    let chunks = plan_chunks(sized, options.chunk_size_mb * ONE_MB)?;

    let progress = ProgressBar::new(chunks.iter().map(Vec::len).sum::<usize>() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{bar:40}] {pos}/{len} file(s) {msg}")
            .unwrap(),
    );

    let mut uploaded = 0;
    for chunk in chunks {
        let mut docs = Vec::new();
        for file in &chunk {
            docs.extend(parse_docs(file, options)?);
            progress.inc(1);
        }
        progress.set_message(format!("uploading {} doc(s)", docs.len()));
        api::upload_docs(client, context, &docs).await?;
        uploaded += docs.len();
    }

    progress.finish_and_clear();
    Ok(uploaded)
}

/// Upload QA pairs from `files` into a QA set, in platform-cap batches.
///
/// Returns the number of pairs uploaded.
pub async fn upload_qa_files(
    client: &ApiClient,
    qa_set: &str,
    files: Vec<PathBuf>,
) -> Result<usize> {
    let files = expand_paths(files)?;
    validate_extensions(&files, &VALID_QA_EXTENSIONS)?;
    if files.is_empty() {
        bail!("No files to upload");
    }

    let mut pairs = Vec::new();
    for file in &files {
        pairs.extend(parse_qa_pairs(file)?);
    }

    let progress = ProgressBar::new(pairs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{bar:40}] {pos}/{len} pair(s)").unwrap(),
    );
    for batch in pairs.chunks(MAX_QA_PAIRS_PER_UPLOAD) {
        api::upload_qa_pairs(client, qa_set, batch).await?;
        progress.inc(batch.len() as u64);
    }

    progress.finish_and_clear();
    Ok(pairs.len())
}

/// Expand directories one level into their non-directory children.
/// Duplicates are dropped; input order (with sorted directory listings) is
/// preserved.
fn expand_paths(paths: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    let mut seen = BTreeSet::new();
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut children: Vec<PathBuf> = std::fs::read_dir(&path)
                .with_context(|| format!("Failed to read directory {}", path.display()))?
                .filter_map(std::result::Result::ok)
                .map(|entry| entry.path())
                .filter(|child| !child.is_dir())
                .collect();
            children.sort();
            for child in children {
                if seen.insert(child.clone()) {
                    files.push(child);
                }
            }
        } else if seen.insert(path.clone()) {
            files.push(path);
        }
    }
    Ok(files)
}

fn validate_extensions(files: &[PathBuf], allowed: &[&str]) -> Result<()> {
    for file in files {
        let extension = file.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !file.is_file() || !allowed.contains(&extension) {
            bail!(
                "{} is not a file or has an invalid extension; allowed: {}",
                file.display(),
                allowed.iter().map(|e| format!(".{e}")).collect::<Vec<_>>().join(" ")
            );
        }
    }
    Ok(())
}

/// Group files into upload chunks whose byte totals stay under `cap`.
///
/// Order is preserved and every file lands in exactly one chunk. A single
/// file over the cap cannot be chunked and is an error.
fn plan_chunks(files: Vec<(PathBuf, u64)>, cap: u64) -> Result<Vec<Vec<PathBuf>>> {
    let mut chunks = Vec::new();
    let mut current = Vec::new();
    let mut current_bytes = 0u64;

    for (file, size) in files {
        if size > cap {
            bail!(
                "{} ({} MB) exceeds the chunk size of {} MB. Raise --chunk-size.",
                file.display(),
                size / ONE_MB,
                cap / ONE_MB
            );
        }
        if current_bytes + size > cap && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_bytes = 0;
        }
        current_bytes += size;
        current.push(file);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    Ok(chunks)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn missing_column(column: &str, file: &Path, flag: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "'{}' not found in {}. Rename the column/key or pass {} to specify your own.",
        column,
        file.display(),
        flag
    )
}

/// Parse one file into documents, per its extension.
fn parse_docs(file: &Path, options: &UploadOptions) -> Result<Vec<Doc>> {
    match file.extension().and_then(|e| e.to_str()) {
        Some("txt") => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(vec![Doc::new(name, text)])
        }
        Some("jsonl") => docs_from_jsonl(file, options),
        Some("csv") => docs_from_csv(file, options),
        _ => bail!(
            "File type not valid for {}. Must be one of: .txt .jsonl .csv",
            file.display()
        ),
    }
}

fn docs_from_jsonl(file: &Path, options: &UploadOptions) -> Result<Vec<Doc>> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mut docs = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut row: Map<String, Value> = serde_json::from_str(line)
            .with_context(|| format!("{}:{} is not a JSON object", file.display(), index + 1))?;
        let name = row
            .remove(&options.doc_name)
            .ok_or_else(|| missing_column(&options.doc_name, file, "--doc-name"))?;
        let text = row
            .remove(&options.doc_text)
            .ok_or_else(|| missing_column(&options.doc_text, file, "--doc-text"))?;
        // Remaining keys are metadata.
        docs.push(Doc {
            name: value_to_string(&name),
            text: value_to_string(&text),
            meta: row,
        });
    }
    Ok(docs)
}

fn docs_from_csv(file: &Path, options: &UploadOptions) -> Result<Vec<Doc>> {
    let mut reader = csv::Reader::from_path(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let headers = reader.headers()?.clone();
    let name_index = headers
        .iter()
        .position(|h| h == options.doc_name)
        .ok_or_else(|| missing_column(&options.doc_name, file, "--doc-name"))?;
    let text_index = headers
        .iter()
        .position(|h| h == options.doc_text)
        .ok_or_else(|| missing_column(&options.doc_text, file, "--doc-text"))?;

    let mut docs = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Failed to parse {}", file.display()))?;
        let mut meta = Map::new();
        for (index, header) in headers.iter().enumerate() {
            if index != name_index && index != text_index {
                meta.insert(
                    header.to_string(),
                    Value::String(record.get(index).unwrap_or("").to_string()),
                );
            }
        }
        docs.push(Doc {
            name: record.get(name_index).unwrap_or("").to_string(),
            text: record.get(text_index).unwrap_or("").to_string(),
            meta,
        });
    }
    Ok(docs)
}

/// Parse one jsonl/csv file into QA pairs with `question`/`answer` columns.
fn parse_qa_pairs(file: &Path) -> Result<Vec<QaPair>> {
    let options = UploadOptions {
        doc_name: "question".to_string(),
        doc_text: "answer".to_string(),
        chunk_size_mb: 0,
    };
    let docs = match file.extension().and_then(|e| e.to_str()) {
        Some("jsonl") => docs_from_jsonl(file, &options)?,
        Some("csv") => docs_from_csv(file, &options)?,
        _ => bail!("QA files must be .jsonl or .csv, got {}", file.display()),
    };
    Ok(docs
        .into_iter()
        .map(|doc| QaPair { question: doc.name, answer: doc.text })
        .collect())
}
