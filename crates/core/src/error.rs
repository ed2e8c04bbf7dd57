//! Error taxonomy for graph loading and comparison
//!
//! Only input problems are errors. A missing path between the target and one
//! of its neighbors inside a contextual graph, or a contextual file that turns
//! out to be the initial graph itself, are ordinary outcomes and never show up
//! here.

use std::path::PathBuf;

/// Errors raised while building, loading or saving graphs
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Graph data is malformed (bad node or edge collections)
    #[error("malformed graph input: {reason}")]
    GraphInput { reason: String },

    /// A persisted graph could not be decoded
    #[error("failed to deserialize graph from {}: {source}", path.display())]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem access failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GraphError {
    pub(crate) fn input(reason: impl Into<String>) -> Self {
        GraphError::GraphInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = GraphError> = std::result::Result<T, E>;
