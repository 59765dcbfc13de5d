use super::edge::Edge;
use super::node::Node;
use super::snapshot::GraphSnapshot;
use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use std::fs;

/// The JSON form of a flow as exchanged with the persistence layer.
///
/// `edges` is accepted on load for compatibility only; the editor always re-derives them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl FlowDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a flow document from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Writes the document as pretty-printed JSON.
    pub fn save(&self, path: &str) -> Result<(), DocumentError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| DocumentError::Write {
            path: path.to_string(),
            source,
        })
    }
}

impl From<GraphSnapshot> for FlowDocument {
    fn from(snapshot: GraphSnapshot) -> Self {
        Self {
            nodes: snapshot.nodes,
            edges: snapshot.edges,
        }
    }
}

impl From<&GraphSnapshot> for FlowDocument {
    fn from(snapshot: &GraphSnapshot) -> Self {
        snapshot.clone().into()
    }
}
