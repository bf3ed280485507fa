#![doc = include_str!("../README.md")]
#![deny(clippy::all)]

use std::path::PathBuf;

pub mod doc;
pub mod executor;
pub mod runner;
pub mod server;
pub mod snapshot;

pub use executor::{Executor, RunResults, StepOutputs};
pub use runner::Runner;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The workflow document is structurally malformed: unparseable, no
    /// steps, duplicate or missing names, a step without an FMU.
    #[error("invalid workflow: {0}")]
    InvalidWorkflow(String),

    /// A `start_from` reference could not be resolved against the results
    /// recorded so far.
    #[error("{0}")]
    DataFlow(String),

    /// A step references an FMU file that does not exist or is unreadable.
    #[error("step {step} references missing FMU {}: {source}", .path.display())]
    MissingFmu {
        step: String,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The FMI driver failed while executing a step.
    #[error("step {step} failed: {source}")]
    Step {
        step: String,
        source: cads_fmi::Error,
    },

    /// The working root could not be resolved.
    #[error("{0}")]
    WorkingRoot(String),

    /// Reading the workflow document failed.
    #[error("failed to read workflow {}: {source}", .path.display())]
    ReadWorkflow {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing a result snapshot failed.
    #[error("failed to write result snapshot {}: {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
