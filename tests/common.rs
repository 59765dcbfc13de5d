//! Common test utilities for building flows and recording editor output.
use nagare::graph::SequentialIds;
use nagare::prelude::*;
use serde_json::{Map, Value, json};
use std::cell::RefCell;
use std::rc::Rc;

/// Snapshots received by an editor's observer, in order.
#[allow(dead_code)]
pub type SaveLog = Rc<RefCell<Vec<GraphSnapshot>>>;

/// A plain linear node with an empty config.
#[allow(dead_code)]
pub fn node(id: &str, node_type: NodeType, sub_type: &str) -> Node {
    Node::new(id, node_type, sub_type, id.to_uppercase(), 0.0, 0.0)
}

/// A `play_audio` step that transitions to `next`.
#[allow(dead_code)]
pub fn linear(id: &str, next: &str) -> Node {
    node(id, NodeType::Listen, "play_audio").with_config(object(json!({ "nextNodeId": next })))
}

/// A `condition` node whose branches are `(name, target)` pairs.
#[allow(dead_code)]
pub fn condition(id: &str, branches: &[(&str, Option<&str>)]) -> Node {
    let expressions: Vec<Value> = branches
        .iter()
        .enumerate()
        .map(|(i, (name, target))| {
            let mut entry = json!({ "id": format!("x{}", i), "name": name, "logic": "caller.tier == 'vip'" });
            if let Some(target) = target {
                entry["targetNodeId"] = json!(target);
            }
            entry
        })
        .collect();
    node(id, NodeType::Branch, "condition").with_config(object(json!({ "expressions": expressions })))
}

/// Unwraps a `json!` object literal into a config map.
#[allow(dead_code)]
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// The scenario flow: `start -> n1 -> n2`.
#[allow(dead_code)]
pub fn create_simple_flow() -> Vec<Node> {
    vec![
        node("start", NodeType::Start, "start").with_config(object(json!({ "nextNodeId": "n1" }))),
        linear("n1", "n2"),
        node("n2", NodeType::Action, "hangup"),
    ]
}

/// A flow with a condition node `n3` branching to `n4` (VIP) and `n5` (unnamed).
#[allow(dead_code)]
pub fn create_branching_flow() -> Vec<Node> {
    vec![
        node("start", NodeType::Start, "start").with_config(object(json!({ "nextNodeId": "n3" }))),
        condition("n3", &[("VIP", Some("n4")), ("", Some("n5"))]),
        node("n4", NodeType::Action, "transfer"),
        node("n5", NodeType::AiAgent, "llm_prompt"),
    ]
}

/// Builds an editor with deterministic ids (`n_1`, `n_2`, ...) and a recording observer.
#[allow(dead_code)]
pub fn recording_editor(nodes: Vec<Node>, read_only: bool) -> (FlowEditor, SaveLog) {
    let saves: SaveLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&saves);
    let editor = FlowEditor::builder(nodes)
        .with_read_only(read_only)
        .with_id_source(SequentialIds::new("n_"))
        .with_observer(move |snapshot: &GraphSnapshot| sink.borrow_mut().push(snapshot.clone()))
        .build();
    (editor, saves)
}

/// Asserts that every edge of `snapshot` connects two nodes that exist in it.
#[allow(dead_code)]
pub fn assert_no_dangling_edges(snapshot: &GraphSnapshot) {
    for edge in &snapshot.edges {
        assert!(
            snapshot.node(&edge.source).is_some(),
            "edge '{}' has a missing source '{}'",
            edge.id,
            edge.source
        );
        assert!(
            snapshot.node(&edge.target).is_some(),
            "edge '{}' has a missing target '{}'",
            edge.id,
            edge.target
        );
    }
}
