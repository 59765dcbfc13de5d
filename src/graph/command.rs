use crate::error::IgnoreReason;
use crate::model::{NodeId, NodeType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named mutation of the node collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum GraphCommand {
    #[serde(rename_all = "camelCase")]
    AddNode {
        node_type: NodeType,
        sub_type: String,
        x: f64,
        y: f64,
    },
    MoveNode {
        id: NodeId,
        x: f64,
        y: f64,
    },
    UpdateLabel {
        id: NodeId,
        label: String,
    },
    UpdateConfig {
        id: NodeId,
        patch: Map<String, Value>,
    },
    DeleteNode {
        id: NodeId,
    },
}

/// Result of applying a command. Nothing in the engine fails; commands are either applied
/// or ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// A node was inserted under this id.
    Created(NodeId),
    Ignored(IgnoreReason),
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, CommandOutcome::Ignored(_))
    }

    pub fn created_id(&self) -> Option<&str> {
        match self {
            CommandOutcome::Created(id) => Some(id),
            _ => None,
        }
    }
}
