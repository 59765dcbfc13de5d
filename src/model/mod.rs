pub mod config;
pub mod document;
pub mod edge;
pub mod node;
pub mod snapshot;

pub use config::*;
pub use document::*;
pub use edge::*;
pub use node::*;
pub use snapshot::*;
