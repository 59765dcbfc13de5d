//! The editor instance: the single owner of graph, viewport and interaction state.
//!
//! Every applied mutation, whether it comes from an input event or a named command,
//! re-derives edges inside the store and is published to the observer before the
//! call returns. Read-only editors still select, pan and zoom.

mod observer;

pub use observer::{CoalescingObserver, NullObserver, SnapshotObserver};

use crate::error::IgnoreReason;
use crate::graph::{CommandOutcome, GraphCommand, GraphStore, NodeIdSource, TimestampIds};
use crate::interaction::{EditorEvent, EventResult, InteractionController, InteractionState};
use crate::model::{Edge, FlowDocument, GraphSnapshot, Node, NodeType};
use crate::viewport::Viewport;
use serde_json::{Map, Value};
use std::fmt;

/// Data the property forms need but the graph engine never reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormCatalog {
    /// API and extraction definitions offered by action/data node forms.
    pub api_definitions: Vec<Value>,
    pub label_groups: Vec<Value>,
}

pub struct FlowEditor {
    graph: GraphStore,
    viewport: Viewport,
    interaction: InteractionController,
    catalog: FormCatalog,
    initial_edges: Vec<Edge>,
    observer: Box<dyn SnapshotObserver>,
}

impl fmt::Debug for FlowEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowEditor")
            .field("graph", &self.graph)
            .field("viewport", &self.viewport)
            .field("interaction", &self.interaction)
            .finish_non_exhaustive()
    }
}

pub struct EditorBuilder {
    nodes: Vec<Node>,
    initial_edges: Vec<Edge>,
    read_only: bool,
    viewport: Viewport,
    catalog: FormCatalog,
    observer: Box<dyn SnapshotObserver>,
    id_source: Box<dyn NodeIdSource>,
}

impl EditorBuilder {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            initial_edges: Vec::new(),
            read_only: false,
            viewport: Viewport::default(),
            catalog: FormCatalog::default(),
            observer: Box::new(NullObserver),
            id_source: Box::new(TimestampIds::default()),
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_observer(mut self, observer: impl SnapshotObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn with_id_source(mut self, id_source: impl NodeIdSource + 'static) -> Self {
        self.id_source = Box::new(id_source);
        self
    }

    /// Edges supplied by the host alongside the nodes. Kept for the first render only;
    /// the editor always derives its own.
    pub fn with_initial_edges(mut self, edges: Vec<Edge>) -> Self {
        self.initial_edges = edges;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_form_catalog(mut self, catalog: FormCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn build(self) -> FlowEditor {
        let graph = GraphStore::with_id_source(self.nodes, self.id_source);
        log::info!(
            "Editing flow with {} node(s) and {} derived edge(s){}",
            graph.len(),
            graph.edges().len(),
            if self.read_only { " (read-only)" } else { "" }
        );
        FlowEditor {
            graph,
            viewport: self.viewport,
            interaction: InteractionController::new(self.read_only),
            catalog: self.catalog,
            initial_edges: self.initial_edges,
            observer: self.observer,
        }
    }
}

impl FlowEditor {
    pub fn builder(nodes: Vec<Node>) -> EditorBuilder {
        EditorBuilder::new(nodes)
    }

    /// Builds an editor from a loaded document, carrying its stored edges as the initial edges.
    pub fn from_document(document: FlowDocument) -> EditorBuilder {
        EditorBuilder::new(document.nodes).with_initial_edges(document.edges)
    }

    // --- Accessors ---

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn interaction_state(&self) -> &InteractionState {
        self.interaction.state()
    }

    pub fn selected(&self) -> Option<&str> {
        self.graph.selected()
    }

    pub fn is_read_only(&self) -> bool {
        self.interaction.is_read_only()
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.interaction.set_read_only(read_only);
    }

    pub fn form_catalog(&self) -> &FormCatalog {
        &self.catalog
    }

    pub fn initial_edges(&self) -> &[Edge] {
        &self.initial_edges
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.graph.snapshot()
    }

    // --- Input ---

    /// Routes an input event through the interaction state machine.
    pub fn handle(&mut self, event: EditorEvent) -> EventResult {
        let result = self
            .interaction
            .handle(&event, &mut self.graph, &mut self.viewport);
        if result.graph_changed {
            self.publish();
        }
        self.settle();
        result
    }

    // --- Commands ---

    /// Applies a named mutation. Read-only editors ignore every command.
    pub fn apply(&mut self, command: GraphCommand) -> CommandOutcome {
        if self.is_read_only() {
            log::debug!("Ignoring {:?}: {}", command, IgnoreReason::ReadOnly);
            return CommandOutcome::Ignored(IgnoreReason::ReadOnly);
        }
        let outcome = self.graph.apply(command);
        if outcome.is_applied() {
            self.publish();
        }
        self.settle();
        outcome
    }

    pub fn add_node(
        &mut self,
        node_type: NodeType,
        sub_type: &str,
        x: f64,
        y: f64,
    ) -> CommandOutcome {
        self.apply(GraphCommand::AddNode {
            node_type,
            sub_type: sub_type.to_string(),
            x,
            y,
        })
    }

    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> CommandOutcome {
        self.apply(GraphCommand::MoveNode {
            id: id.to_string(),
            x,
            y,
        })
    }

    pub fn update_label(&mut self, id: &str, label: impl Into<String>) -> CommandOutcome {
        self.apply(GraphCommand::UpdateLabel {
            id: id.to_string(),
            label: label.into(),
        })
    }

    pub fn update_config(&mut self, id: &str, patch: Map<String, Value>) -> CommandOutcome {
        self.apply(GraphCommand::UpdateConfig {
            id: id.to_string(),
            patch,
        })
    }

    pub fn delete_node(&mut self, id: &str) -> CommandOutcome {
        self.apply(GraphCommand::DeleteNode { id: id.to_string() })
    }

    pub fn delete_selected(&mut self) -> CommandOutcome {
        match self.graph.selected().map(str::to_owned) {
            Some(id) => self.delete_node(&id),
            None => CommandOutcome::Ignored(IgnoreReason::NothingSelected),
        }
    }

    pub fn select(&mut self, id: &str) -> CommandOutcome {
        self.graph.select(id)
    }

    pub fn clear_selection(&mut self) {
        self.graph.clear_selection();
    }

    /// Switches to another flow. Selection and any gesture are dropped; the viewport is kept.
    pub fn load_flow(&mut self, nodes: Vec<Node>) {
        self.interaction.reset();
        self.graph.replace_nodes(nodes);
        self.initial_edges.clear();
        log::info!(
            "Switched flow: {} node(s), {} derived edge(s)",
            self.graph.len(),
            self.graph.edges().len()
        );
        self.publish();
        self.settle();
    }

    fn publish(&mut self) {
        let snapshot = self.graph.snapshot();
        self.observer.on_save(&snapshot);
    }

    fn settle(&mut self) {
        if self.interaction.is_idle() {
            self.observer.on_settled();
        }
    }
}
