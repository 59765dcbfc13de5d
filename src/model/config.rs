use super::node::NodeId;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Subtype whose configuration carries branch expressions.
pub const CONDITION_SUB_TYPE: &str = "condition";

/// Reserved config key holding the linear transition target.
pub const NEXT_NODE_ID_KEY: &str = "nextNodeId";

/// Reserved config key holding a condition node's branches.
pub const EXPRESSIONS_KEY: &str = "expressions";

const TARGET_NODE_ID_KEY: &str = "targetNodeId";

/// One branch of a condition node. The entry is a stable UI row; only its target may be unset.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchExpression {
    pub id: String,
    pub name: String,
    pub logic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_node_id: Option<NodeId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BranchExpression {
    pub fn new(id: impl Into<String>, name: impl Into<String>, logic: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logic: logic.into(),
            ..Default::default()
        }
    }

    pub fn targeting(mut self, target: impl Into<NodeId>) -> Self {
        self.target_node_id = Some(target.into());
        self
    }

    /// Reads the entry at `index` of `config.expressions`.
    ///
    /// Every array slot yields one expression so branch indices match array positions.
    /// A slot that is not an object reads as an empty branch without a target.
    fn from_value(index: usize, value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self {
                id: index.to_string(),
                ..Default::default()
            };
        };
        let extra = fields
            .iter()
            .filter(|(key, _)| {
                !matches!(key.as_str(), "id" | "name" | "logic" | TARGET_NODE_ID_KEY)
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self {
            id: fields
                .get("id")
                .and_then(scalar_to_string)
                .unwrap_or_else(|| index.to_string()),
            name: read_string(fields, "name").unwrap_or_default(),
            logic: read_string(fields, "logic").unwrap_or_default(),
            target_node_id: read_reference(fields, TARGET_NODE_ID_KEY),
            extra,
        }
    }
}

/// Typed view of any subtype that transitions linearly (or terminates when unset).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearConfig {
    pub next_node_id: Option<NodeId>,
}

impl LinearConfig {
    fn parse(map: &Map<String, Value>) -> Self {
        Self {
            next_node_id: read_reference(map, NEXT_NODE_ID_KEY),
        }
    }
}

/// Typed view of a `condition` node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionConfig {
    /// Fallthrough transition, derived exactly like a linear one.
    pub next_node_id: Option<NodeId>,
    pub expressions: Vec<BranchExpression>,
}

impl ConditionConfig {
    fn parse(map: &Map<String, Value>) -> Self {
        let expressions = match map.get(EXPRESSIONS_KEY) {
            Some(Value::Array(entries)) => entries
                .iter()
                .enumerate()
                .map(|(i, entry)| BranchExpression::from_value(i, entry))
                .collect(),
            _ => Vec::new(),
        };
        Self {
            next_node_id: read_reference(map, NEXT_NODE_ID_KEY),
            expressions,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigKind {
    Linear(LinearConfig),
    Condition(ConditionConfig),
}

/// Node configuration: the open key-value map the property forms own, plus a typed view
/// of the two reserved keys, discriminated by the node's subtype.
///
/// The map is kept exactly as written. Malformed reserved values (an empty or non-string
/// reference, a non-array `expressions`) read as unset but are written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    map: Map<String, Value>,
    kind: ConfigKind,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            map: Map::new(),
            kind: ConfigKind::Linear(LinearConfig::default()),
        }
    }
}

impl NodeConfig {
    pub fn empty_for(sub_type: &str) -> Self {
        Self::from_map(sub_type, Map::new())
    }

    /// Builds the view for `sub_type` over an open map.
    pub fn from_map(sub_type: &str, map: Map<String, Value>) -> Self {
        Self::with_variant(sub_type == CONDITION_SUB_TYPE, map)
    }

    fn with_variant(condition: bool, map: Map<String, Value>) -> Self {
        let kind = if condition {
            ConfigKind::Condition(ConditionConfig::parse(&map))
        } else {
            ConfigKind::Linear(LinearConfig::parse(&map))
        };
        Self { map, kind }
    }

    fn reparse(&mut self) {
        let map = std::mem::take(&mut self.map);
        *self = Self::with_variant(self.is_condition(), map);
    }

    pub fn kind(&self) -> &ConfigKind {
        &self.kind
    }

    /// The open-map form, as last written.
    pub fn to_map(&self) -> Map<String, Value> {
        self.map.clone()
    }

    /// Top-level shallow merge: each patch key replaces the existing one, `null` removes it.
    ///
    /// The variant is kept; the typed view is re-read from the merged map.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            if value.is_null() {
                self.map.remove(&key);
            } else {
                self.map.insert(key, value);
            }
        }
        self.reparse();
    }

    pub fn next_node_id(&self) -> Option<&str> {
        match &self.kind {
            ConfigKind::Linear(linear) => linear.next_node_id.as_deref(),
            ConfigKind::Condition(condition) => condition.next_node_id.as_deref(),
        }
    }

    /// Sets `nextNodeId`, or removes the key when `target` is `None`.
    pub fn set_next_node_id(&mut self, target: Option<NodeId>) {
        match target {
            Some(target) => {
                self.map.insert(NEXT_NODE_ID_KEY.to_string(), Value::String(target));
            }
            None => {
                self.map.remove(NEXT_NODE_ID_KEY);
            }
        }
        self.reparse();
    }

    /// Removes `targetNodeId` from the branch at `index`, keeping the entry itself.
    pub fn clear_branch_target(&mut self, index: usize) -> bool {
        let removed = match self.map.get_mut(EXPRESSIONS_KEY) {
            Some(Value::Array(entries)) => match entries.get_mut(index) {
                Some(Value::Object(entry)) => entry.remove(TARGET_NODE_ID_KEY).is_some(),
                _ => false,
            },
            _ => false,
        };
        if removed {
            self.reparse();
        }
        removed
    }

    /// Branches of a condition node, one per array slot; empty for every other variant.
    pub fn expressions(&self) -> &[BranchExpression] {
        match &self.kind {
            ConfigKind::Condition(condition) => &condition.expressions,
            ConfigKind::Linear(_) => &[],
        }
    }

    /// Every key the engine does not interpret for this variant.
    pub fn extra(&self) -> Map<String, Value> {
        let condition = self.is_condition();
        self.map
            .iter()
            .filter(|(key, _)| {
                key.as_str() != NEXT_NODE_ID_KEY && !(condition && key.as_str() == EXPRESSIONS_KEY)
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn is_condition(&self) -> bool {
        matches!(self.kind, ConfigKind::Condition(_))
    }
}

impl Serialize for NodeConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}

/// Reads `key` as a node reference. Empty strings and non-strings count as unset.
fn read_reference(map: &Map<String, Value>, key: &str) -> Option<NodeId> {
    read_string(map, key).filter(|s| !s.is_empty())
}

fn read_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
