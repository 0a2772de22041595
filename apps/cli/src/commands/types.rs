//! Nested subcommand definitions.

use clap::Subcommand;
use std::path::PathBuf;

/// Upload data to the platform.
#[derive(Subcommand, Debug)]
pub enum UploadCommand {
    /// Upload document(s) to a context
    ///
    /// If a directory is provided, all valid files in the directory are
    /// uploaded. At least one of --file or --directory must be provided.
    /// For CSV/JSONL files, every column that is not the name or text
    /// column is uploaded as extra metadata with the doc; metadata can be
    /// filtered on during generation and retrieval.
    Context {
        /// Name of the context
        name: String,

        /// Path to a document
        #[arg(long)]
        file: Vec<PathBuf>,

        /// Path to a directory of documents
        #[arg(long)]
        directory: Vec<PathBuf>,

        /// Column/key holding the doc name, for jsonl or csv files
        #[arg(long, default_value = "name")]
        doc_name: String,

        /// Column/key holding the doc text, for jsonl or csv files
        #[arg(long, default_value = "text")]
        doc_text: String,

        /// Chunk size in megabytes (MB) to limit memory usage during uploads
        #[arg(long, default_value_t = 512)]
        chunk_size: u64,
    },

    /// Upload question/answer pairs to a QA set
    ///
    /// Files must be CSV or JSONL with `question` and `answer` columns.
    Qa {
        /// Name of the QA set
        name: String,

        /// Path to a CSV/JSONL file of QA pairs
        #[arg(long, required = true)]
        file: Vec<PathBuf>,
    },
}

/// Manage pretraining (CPT) jobs.
#[derive(Subcommand, Debug)]
pub enum CptCommand {
    /// List all CPT jobs
    List,

    /// Download CPT weights
    Download {
        /// Name of the CPT model to download weights for
        #[arg(long)]
        name: String,

        /// Path to download the archive to
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Manage alignment (SFT) jobs.
#[derive(Subcommand, Debug)]
pub enum SftCommand {
    /// Download SFT weights
    Download {
        /// Name of the SFT model to download weights for
        #[arg(long)]
        name: String,

        /// Path to download the archive to
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Manage retriever jobs.
#[derive(Subcommand, Debug)]
pub enum RetrieverCommand {
    /// Download retriever weights
    Download {
        /// Name of the retriever model to download weights for
        #[arg(long)]
        name: String,

        /// Path to download the archive to
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Manage merging jobs.
#[derive(Subcommand, Debug)]
pub enum MergingCommand {
    /// List all merging jobs
    List,

    /// Download merged-model weights
    Download {
        /// Name of the merging job to download weights for
        #[arg(long)]
        name: String,

        /// Path to download the archive to
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
