//! # Nagare - Flow Graph Editing Engine
//!
//! **Nagare** is the headless core of an interactive editor for call-handling flows: the
//! graphs a voice bot walks through while on a call (play a prompt, collect digits, branch on
//! a condition, ask an LLM, call an API, transfer, hang up). It owns the node model, derives
//! every edge from node configuration, handles pan/zoom coordinate math and runs the pointer
//! state machine, leaving rendering, property forms and persistence to the host.
//!
//! ## Core Workflow
//!
//! 1.  **Load Nodes**: Parse a `FlowDocument` (or build `Node`s directly). A missing `start`
//!     node is created for you.
//! 2.  **Build an Editor**: Use `FlowEditor::builder` to attach a save observer, a read-only
//!     flag and the opaque catalog the property forms need.
//! 3.  **Feed Events**: Forward pointer, drop and keyboard input as `EditorEvent`s, and form
//!     edits as `update_config` / `update_label` commands.
//! 4.  **Persist Snapshots**: After each applied mutation the observer receives a
//!     `GraphSnapshot` whose edges are already re-derived.
//!
//! Edges are never authored. A node's `config.nextNodeId` yields one edge, and each
//! `config.expressions[i].targetNodeId` of a `condition` node yields a labeled branch edge.
//! Deleting a node clears every reference to it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nagare::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let document = FlowDocument::from_json(r#"{
//!         "nodes": [
//!             { "id": "start", "type": "START", "subType": "start", "label": "Start",
//!               "x": 0, "y": 0, "config": { "nextNodeId": "greet" } },
//!             { "id": "greet", "type": "LISTEN", "subType": "play_audio", "label": "Greeting",
//!               "x": 0, "y": 120 }
//!         ]
//!     }"#)?;
//!
//!     let mut editor = FlowEditor::from_document(document)
//!         .with_observer(|snapshot: &GraphSnapshot| {
//!             println!("saving {} nodes / {} edges", snapshot.nodes.len(), snapshot.edges.len());
//!         })
//!         .build();
//!
//!     // Drop a hang-up step from the palette onto the canvas.
//!     editor.handle(EditorEvent::Drop {
//!         payload: DropPayload::new("ACTION", "hangup"),
//!         client_x: 320.0,
//!         client_y: 240.0,
//!         canvas: Rect::new(0.0, 0.0, 1280.0, 720.0),
//!     });
//!
//!     // Wire the greeting to it, as the property form would.
//!     let hangup = editor.selected().map(str::to_owned).unwrap_or_default();
//!     let patch = json!({ "nextNodeId": hangup });
//!     if let serde_json::Value::Object(patch) = patch {
//!         editor.update_config("greet", patch);
//!     }
//!
//!     for edge in editor.snapshot().edges {
//!         println!("{} -> {}", edge.source, edge.target);
//!     }
//!     Ok(())
//! }
//! ```

pub mod editor;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod model;
pub mod prelude;
pub mod toolbox;
pub mod viewport;
