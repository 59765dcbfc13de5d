use super::command::{CommandOutcome, GraphCommand};
use super::edges::derive_edges;
use super::ids::{NodeIdSource, TimestampIds};
use super::integrity::clear_references;
use crate::error::IgnoreReason;
use crate::model::{Edge, GraphSnapshot, Node, NodeId, NodeType, START_NODE_ID};
use crate::toolbox;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;

/// Id-keyed node arena. Iteration follows insertion order, which is the collection order
/// edge derivation relies on.
pub type NodeArena = IndexMap<NodeId, Node, ahash::RandomState>;

/// Owns the authoritative node collection, the derived edge cache and the selection.
///
/// Every applied command leaves `edges` equal to `derive_edges(nodes)` before it returns.
pub struct GraphStore {
    nodes: NodeArena,
    edges: Vec<Edge>,
    selection: Option<NodeId>,
    id_source: Box<dyn NodeIdSource>,
}

impl fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphStore")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl GraphStore {
    /// Creates a store using time-based ids for new nodes.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self::with_id_source(nodes, Box::new(TimestampIds::default()))
    }

    pub fn with_id_source(nodes: Vec<Node>, id_source: Box<dyn NodeIdSource>) -> Self {
        let mut store = Self {
            nodes: NodeArena::default(),
            edges: Vec::new(),
            selection: None,
            id_source,
        };
        store.replace_nodes(nodes);
        store
    }

    /// Swaps in a different flow. The start node is bootstrapped, the selection cleared and
    /// edges re-derived.
    pub fn replace_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = Self::bootstrap(nodes);
        self.selection = None;
        self.recompute_edges();
    }

    fn bootstrap(nodes: Vec<Node>) -> NodeArena {
        let mut arena = NodeArena::default();
        if !nodes.iter().any(Node::is_start) {
            log::debug!("Flow has no '{}' node, creating one", START_NODE_ID);
            arena.insert(START_NODE_ID.to_string(), Node::start());
        }
        for node in nodes {
            if let Some(previous) = arena.insert(node.id.clone(), node) {
                log::warn!(
                    "Duplicate node id '{}' in flow; the later definition wins",
                    previous.id
                );
            }
        }
        arena
    }

    // --- Queries ---

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The cached derived edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.values().cloned().collect(),
            edges: self.edges.clone(),
        }
    }

    // --- Selection ---

    pub fn select(&mut self, id: &str) -> CommandOutcome {
        if !self.nodes.contains_key(id) {
            return ignored(IgnoreReason::UnknownNode(id.to_string()));
        }
        self.selection = Some(id.to_string());
        CommandOutcome::Applied
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // --- Commands ---

    pub fn apply(&mut self, command: GraphCommand) -> CommandOutcome {
        match command {
            GraphCommand::AddNode {
                node_type,
                sub_type,
                x,
                y,
            } => self.add_node(node_type, &sub_type, x, y),
            GraphCommand::MoveNode { id, x, y } => self.move_node(&id, x, y),
            GraphCommand::UpdateLabel { id, label } => self.update_label(&id, label),
            GraphCommand::UpdateConfig { id, patch } => self.update_config(&id, patch),
            GraphCommand::DeleteNode { id } => self.delete_node(&id),
        }
    }

    /// Inserts a node with the palette's default label and an empty config, and selects it.
    pub fn add_node(
        &mut self,
        node_type: NodeType,
        sub_type: &str,
        x: f64,
        y: f64,
    ) -> CommandOutcome {
        let id = self.fresh_id();
        let label = toolbox::default_label(node_type, sub_type);
        self.nodes
            .insert(id.clone(), Node::new(id.clone(), node_type, sub_type, label, x, y));
        self.selection = Some(id.clone());
        self.recompute_edges();
        log::debug!(
            "Added {} node '{}' ({}) at ({:.1}, {:.1})",
            node_type,
            id,
            sub_type,
            x,
            y
        );
        CommandOutcome::Created(id)
    }

    /// Updates a node's position. Geometry never changes topology, so edges are left as they are.
    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> CommandOutcome {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.x = x;
                node.y = y;
                log::trace!("Moved '{}' to ({:.1}, {:.1})", id, x, y);
                CommandOutcome::Applied
            }
            None => ignored(IgnoreReason::UnknownNode(id.to_string())),
        }
    }

    pub fn update_label(&mut self, id: &str, label: String) -> CommandOutcome {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.label = label;
                self.recompute_edges();
                CommandOutcome::Applied
            }
            None => ignored(IgnoreReason::UnknownNode(id.to_string())),
        }
    }

    /// Shallow-merges `patch` into the node's config (replace by top-level key).
    pub fn update_config(&mut self, id: &str, patch: Map<String, Value>) -> CommandOutcome {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.config.merge(patch);
                self.recompute_edges();
                CommandOutcome::Applied
            }
            None => ignored(IgnoreReason::UnknownNode(id.to_string())),
        }
    }

    /// Removes a node and clears every reference to it. The start node is never removed.
    pub fn delete_node(&mut self, id: &str) -> CommandOutcome {
        if id == START_NODE_ID {
            return ignored(IgnoreReason::ProtectedStartNode);
        }
        let Some(removed) = self.nodes.shift_remove(id) else {
            return ignored(IgnoreReason::UnknownNode(id.to_string()));
        };

        let cleared = clear_references(self.nodes.values_mut(), &removed.id);
        if self.selection.as_deref() == Some(id) {
            self.selection = None;
        }
        self.recompute_edges();
        log::info!(
            "Deleted node '{}' ({}), cleared {} reference(s)",
            removed.id,
            removed.label,
            cleared
        );
        CommandOutcome::Applied
    }

    fn fresh_id(&mut self) -> NodeId {
        let base = self.id_source.next_id();
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.nodes.contains_key(&candidate) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        candidate
    }

    fn recompute_edges(&mut self) {
        self.edges = derive_edges(self.nodes.values());
    }
}

fn ignored(reason: IgnoreReason) -> CommandOutcome {
    log::debug!("Ignoring command: {}", reason);
    CommandOutcome::Ignored(reason)
}
