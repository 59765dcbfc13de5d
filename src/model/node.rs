use super::config::NodeConfig;
use crate::toolbox;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Stable, serializable node identifier. All cross-node references are plain ids.
pub type NodeId = String;

/// Id of the anchor node every flow starts from. It is bootstrapped when missing and never deleted.
pub const START_NODE_ID: &str = "start";

/// World position given to a bootstrapped start node.
pub const START_NODE_POSITION: (f64, f64) = (100.0, 100.0);

/// The coarse category of a flow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Start,
    Listen,
    Branch,
    AiAgent,
    Logic,
    Action,
    Data,
}

impl NodeType {
    pub const ALL: [NodeType; 7] = [
        NodeType::Start,
        NodeType::Listen,
        NodeType::Branch,
        NodeType::AiAgent,
        NodeType::Logic,
        NodeType::Action,
        NodeType::Data,
    ];

    /// The wire name used in drop payloads and flow documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Start => "START",
            NodeType::Listen => "LISTEN",
            NodeType::Branch => "BRANCH",
            NodeType::AiAgent => "AI_AGENT",
            NodeType::Logic => "LOGIC",
            NodeType::Action => "ACTION",
            NodeType::Data => "DATA",
        }
    }

    /// Human-readable name, used as the fallback label for unregistered subtypes.
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeType::Start => "Start",
            NodeType::Listen => "Listen",
            NodeType::Branch => "Branch",
            NodeType::AiAgent => "AI Agent",
            NodeType::Logic => "Logic",
            NodeType::Action => "Action",
            NodeType::Data => "Data",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A typed step in the flow graph.
///
/// `x`/`y` are world coordinates. The `config` variant is fixed by `sub_type` at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "NodeRecord")]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub sub_type: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub config: NodeConfig,
}

impl Node {
    /// Creates a node with an empty configuration for its subtype.
    pub fn new(
        id: impl Into<NodeId>,
        node_type: NodeType,
        sub_type: impl Into<String>,
        label: impl Into<String>,
        x: f64,
        y: f64,
    ) -> Self {
        let sub_type = sub_type.into();
        Self {
            id: id.into(),
            node_type,
            config: NodeConfig::empty_for(&sub_type),
            sub_type,
            label: label.into(),
            x,
            y,
        }
    }

    /// The implicit anchor node.
    pub fn start() -> Self {
        let (x, y) = START_NODE_POSITION;
        Self::new(
            START_NODE_ID,
            NodeType::Start,
            "start",
            toolbox::default_label(NodeType::Start, "start"),
            x,
            y,
        )
    }

    /// Replaces the configuration with one parsed from an open key-value map.
    pub fn with_config(mut self, config: Map<String, Value>) -> Self {
        self.config = NodeConfig::from_map(&self.sub_type, config);
        self
    }

    pub fn is_start(&self) -> bool {
        self.id == START_NODE_ID
    }
}

/// Lenient wire form of a node. Missing fields fall back to defaults.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRecord {
    id: NodeId,
    #[serde(rename = "type")]
    node_type: NodeType,
    #[serde(default)]
    sub_type: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    config: Option<Map<String, Value>>,
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        Node {
            config: NodeConfig::from_map(&record.sub_type, record.config.unwrap_or_default()),
            id: record.id,
            node_type: record.node_type,
            sub_type: record.sub_type,
            label: record.label,
            x: record.x,
            y: record.y,
        }
    }
}
