//! The node collection and everything derived from it.

pub mod command;
pub mod edges;
pub mod ids;
pub mod integrity;
pub mod store;

pub use command::{CommandOutcome, GraphCommand};
pub use edges::derive_edges;
pub use ids::{NodeIdSource, SequentialIds, TimestampIds};
pub use integrity::clear_references;
pub use store::{GraphStore, NodeArena};
