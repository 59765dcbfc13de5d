use crate::model::NodeId;
use thiserror::Error;

/// Errors raised while reading or writing flow documents and event scripts.
///
/// The editing engine itself never fails; only the file and JSON helpers around it do.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Could not read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Could not write '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Why a graph command or editor event was ignored instead of applied.
///
/// These are reported through `CommandOutcome::Ignored` and logged, never propagated as errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    #[error("Node '{0}' does not exist")]
    UnknownNode(NodeId),

    #[error("The start node cannot be deleted")]
    ProtectedStartNode,

    #[error("The editor is read-only")]
    ReadOnly,

    #[error("Drop payload carries no node type")]
    EmptyNodeType,

    #[error("'{0}' is not a known node type")]
    UnknownNodeType(String),

    #[error("No node is selected")]
    NothingSelected,
}
