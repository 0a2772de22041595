//! Symbolic routes for the platform API.
//!
//! Each route is a closed enum variant carrying its URL path template.
//! Templates with an `{id_or_name}` placeholder must be resolved with
//! [`Route::resolve`] before dispatch; the remaining routes are used
//! through [`Route::template`] directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder token substituted with a caller-supplied identifier.
const ID_PLACEHOLDER: &str = "{id_or_name}";

/// Symbolic name for a remote API path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Document/context upload.
    Contexts,
    /// Model training submission.
    TrainModel,
    /// Model training status poll.
    TrainModelStatus,
    /// Retrieval query against a deployed model.
    Retrieve,
    /// Generation query against a deployed model.
    Generate,
    /// Embedding query against a deployed model.
    Embed,
    /// Identity/organization lookup.
    Whoami,
    /// Pretraining corpus registration.
    CorpusUpload,
    /// Pretraining job submission.
    StartPretraining,
    /// Pretraining job listing.
    ListPretrainings,
    /// QA pair upload for alignment.
    QaUpload,
    /// Alignment job submission.
    StartAlignment,
    /// Retriever training submission.
    TrainRetriever,
    /// Retriever training status poll.
    TrainRetrieverStatus,
    /// Merging job submission.
    StartMerging,
    /// Merging job listing.
    ListMergings,
    /// Deployment creation.
    StartDeployment,
    /// Deployment teardown.
    StopDeployment,
    /// Deployment status poll.
    DeploymentStatus,
}

impl Route {
    /// The URL path template for this route.
    pub const fn template(self) -> &'static str {
        match self {
            Self::Contexts => "contexts",
            Self::TrainModel => "models/train",
            Self::TrainModelStatus => "models/status/{id_or_name}",
            Self::Retrieve => "models/retrieve",
            Self::Generate => "models/generate",
            Self::Embed => "models/embed",
            Self::Whoami => "whoami",
            Self::CorpusUpload => "pretraining/corpusUpload",
            Self::StartPretraining => "pretraining/startTraining",
            Self::ListPretrainings => "pretraining/list",
            Self::QaUpload => "alignment/qaUpload",
            Self::StartAlignment => "alignment/startAlignment",
            Self::TrainRetriever => "retrievers/train",
            Self::TrainRetrieverStatus => "retrievers/status/{id_or_name}",
            Self::StartMerging => "merging/start",
            Self::ListMergings => "merging/list",
            Self::StartDeployment => "deployment/start",
            Self::StopDeployment => "deployment/stop",
            Self::DeploymentStatus => "deployment/status/{id_or_name}",
        }
    }

    /// Resolve the template's identifier placeholder.
    pub fn resolve(self, id_or_name: &str) -> String {
        substitute(self.template(), id_or_name)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

/// Remote job kinds with independent lifecycle and weight endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    /// Continued pretraining on a corpus.
    Pretraining,
    /// Alignment training on QA pairs.
    Alignment,
    /// Retriever training.
    Retriever,
    /// Model merging.
    Merging,
}

impl JobKind {
    /// Stable wire name of the job kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretraining => "pretraining",
            Self::Alignment => "alignment",
            Self::Retriever => "retriever",
            Self::Merging => "merging",
        }
    }

    /// Path of the binary weight archive for a trained job.
    pub fn weights_path(self, id_or_name: &str) -> String {
        substitute(&format!("{}/{}/weights", self.as_str(), ID_PLACEHOLDER), id_or_name)
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substitute the identifier placeholder in a path template, exactly once.
fn substitute(template: &str, id_or_name: &str) -> String {
    template.replacen(ID_PLACEHOLDER, id_or_name, 1)
}
