use crate::model::NodeId;
use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies ids for newly created nodes.
pub trait NodeIdSource {
    fn next_id(&mut self) -> NodeId;
}

/// Time-based ids (`node_<millis>`), bumped past the previous id when the clock has not advanced.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: u128,
}

impl NodeIdSource for TimestampIds {
    fn next_id(&mut self) -> NodeId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        self.last = now.max(self.last + 1);
        format!("node_{}", self.last)
    }
}

/// Deterministic ids (`<prefix><n>`), counting up from 1.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl NodeIdSource for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
