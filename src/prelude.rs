//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the nagare crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use nagare::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = FlowDocument::from_file("path/to/flow.json")?;
//! let mut editor = FlowEditor::from_document(document).build();
//!
//! editor.handle(EditorEvent::ZoomIn);
//! println!("{} edges", editor.snapshot().edges.len());
//! # Ok(())
//! # }
//! ```

// Editor and its collaborators
pub use crate::editor::{CoalescingObserver, FlowEditor, FormCatalog, SnapshotObserver};
pub use crate::graph::{CommandOutcome, GraphCommand, GraphStore, derive_edges};
pub use crate::interaction::{DropPayload, EditorEvent, InteractionState, Key, PointerTarget};
pub use crate::viewport::Viewport;

// Data model
pub use crate::geometry::{Point, Rect};
pub use crate::model::{
    BranchExpression, ConfigKind, Edge, FlowDocument, GraphSnapshot, Node, NodeConfig, NodeId,
    NodeType, START_NODE_ID,
};

// Error types
pub use crate::error::{DocumentError, IgnoreReason};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
