//! Kiln CLI - command-line interface for the Kiln training platform
//!
//! Provides a `kiln` command for uploading data, starting remote training
//! jobs, polling their status, querying deployed models, and downloading
//! trained weights.

mod commands;
mod handlers;

use clap::{CommandFactory, Parser, Subcommand};
use commands::types::{CptCommand, MergingCommand, RetrieverCommand, SftCommand, UploadCommand};
use commands::{configure, jobs, org, query, status, train, upload};
use kiln_client::JobKind;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Kiln CLI - train and query adapted models on the Kiln platform
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    author,
    version,
    about = "Kiln - train and query adapted models",
    long_about = "Command-line interface for the Kiln platform.\nUpload documents and QA sets, start remote training jobs, poll their status,\nquery deployed models, and download trained weights."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the configuration file for the SDK and CLI
    Configure {
        /// Your API key. Defaults to the KILN_API_KEY environment variable.
        #[arg(long)]
        api_key: Option<String>,

        /// The API base URL.
        #[arg(long)]
        api_url: Option<String>,

        /// Your organization. If not provided, your default organization is used.
        #[arg(long)]
        org: Option<String>,
    },

    /// Print the current organization
    Org,

    /// Submit a model training job
    Train {
        /// Name of the model
        name: String,

        /// Name of the context to ground the model on
        #[arg(long)]
        context: Option<String>,

        /// Instructions for the model
        #[arg(long)]
        instructions: Option<String>,

        /// Generator type
        #[arg(long, default_value = "Command")]
        generator: String,
    },

    /// Check the status of a model training job
    Status {
        /// Name of the model
        name: String,
    },

    /// Retrieve contexts from a trained model
    Retrieve {
        /// Model name
        name: String,

        /// Query string
        #[arg(long)]
        query: String,

        /// Maximum number of context results
        #[arg(long, default_value_t = 3)]
        size: usize,
    },

    /// Generate from a trained model
    Generate {
        /// Model name
        name: String,

        /// Query string
        #[arg(long)]
        query: String,

        /// Maximum number of context results to ground on
        #[arg(long, default_value_t = 3)]
        size: usize,
    },

    /// Upload data to the platform
    #[command(subcommand)]
    Upload(UploadCommand),

    /// Manage pretraining (CPT) jobs and weights
    #[command(subcommand)]
    Cpt(CptCommand),

    /// Manage alignment (SFT) jobs and weights
    #[command(subcommand)]
    Sft(SftCommand),

    /// Manage retriever jobs and weights
    #[command(subcommand)]
    Retriever(RetrieverCommand),

    /// Manage merging jobs and weights
    #[command(subcommand)]
    Merging(MergingCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = args.log_level.parse::<Level>().unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // No command: show help.
    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Configure { api_key, api_url, org } => {
            configure::execute(api_key, api_url, org)?;
        }
        Command::Org => {
            org::execute().await?;
        }
        Command::Train { name, context, instructions, generator } => {
            train::execute(&name, context.as_deref(), instructions.as_deref(), &generator)
                .await?;
        }
        Command::Status { name } => {
            status::execute(&name).await?;
        }
        Command::Retrieve { name, query: q, size } => {
            query::retrieve(&name, &q, size).await?;
        }
        Command::Generate { name, query: q, size } => {
            query::generate(&name, &q, size).await?;
        }
        Command::Upload(cmd) => match cmd {
            UploadCommand::Context { name, file, directory, doc_name, doc_text, chunk_size } => {
                upload::context(&name, file, directory, &doc_name, &doc_text, chunk_size).await?;
            }
            UploadCommand::Qa { name, file } => {
                upload::qa(&name, file).await?;
            }
        },
        Command::Cpt(cmd) => match cmd {
            CptCommand::List => jobs::list(JobKind::Pretraining).await?,
            CptCommand::Download { name, out } => {
                jobs::download(JobKind::Pretraining, &name, out).await?;
            }
        },
        Command::Sft(cmd) => match cmd {
            SftCommand::Download { name, out } => {
                jobs::download(JobKind::Alignment, &name, out).await?;
            }
        },
        Command::Retriever(cmd) => match cmd {
            RetrieverCommand::Download { name, out } => {
                jobs::download(JobKind::Retriever, &name, out).await?;
            }
        },
        Command::Merging(cmd) => match cmd {
            MergingCommand::List => jobs::list(JobKind::Merging).await?,
            MergingCommand::Download { name, out } => {
                jobs::download(JobKind::Merging, &name, out).await?;
            }
        },
    }

    Ok(())
}
