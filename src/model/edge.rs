use super::node::NodeId;
use serde::{Deserialize, Serialize};

/// A derived control-flow transition. Edges are never authored directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    /// The unlabeled edge produced by a `nextNodeId` reference.
    pub fn linear(source: &str, target: &str) -> Self {
        Self {
            id: format!("e_{}_to_{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            label: None,
        }
    }

    /// The edge produced by the branch at `index` of a condition node.
    /// An empty branch name falls back to `"Branch {index + 1}"`.
    pub fn branch(source: &str, index: usize, name: &str, target: &str) -> Self {
        let label = if name.is_empty() {
            format!("Branch {}", index + 1)
        } else {
            name.to_string()
        };
        Self {
            id: format!("e_{}_br_{}", source, index),
            source: source.to_string(),
            target: target.to_string(),
            label: Some(label),
        }
    }
}
