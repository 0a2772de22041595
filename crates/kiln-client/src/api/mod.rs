//! Typed wrappers around the platform operations.
//!
//! Each function builds one JSON payload and performs one dispatcher call
//! (through the client's retry policy). Caller input is validated before
//! anything touches the network.

pub mod alignment;
pub mod contexts;
pub mod deployment;
pub mod identity;
pub mod merging;
pub mod pretraining;
pub mod training;
pub mod weights;

pub use alignment::{MAX_QA_PAIRS_PER_UPLOAD, QaPair, start_alignment, upload_qa_pairs};
pub use contexts::{Doc, upload_doc, upload_docs};
pub use deployment::{deployment_status, start_deployment, stop_deployment};
pub use identity::whoami;
pub use merging::{list_mergings, start_merging};
pub use pretraining::{list_pretrainings, start_pretraining, upload_corpus_folder};
pub use training::{
    ModelStatus, model_status, retriever_status, train_model, train_retriever,
};
pub use weights::download_weights;
