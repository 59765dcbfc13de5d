use crate::error::DocumentError;
use crate::geometry::{Point, Rect};
use crate::model::NodeId;
use serde::{Deserialize, Serialize};
use std::fs;

/// What the pointer landed on when it was pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PointerTarget {
    Background,
    Node { id: NodeId },
}

/// Palette payload carried by a platform drag-and-drop.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPayload {
    #[serde(default)]
    pub node_type: String,
    #[serde(default)]
    pub node_sub_type: String,
}

impl DropPayload {
    pub fn new(node_type: impl Into<String>, node_sub_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            node_sub_type: node_sub_type.into(),
        }
    }
}

/// Keys the editor reacts to. Anything else is carried as `Other` and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Plus,
    Equals,
    Minus,
    Zero,
    Other(String),
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Escape" => Key::Escape,
            "+" => Key::Plus,
            "=" => Key::Equals,
            "-" => Key::Minus,
            "0" => Key::Zero,
            _ => Key::Other(name),
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::Delete => "Delete".to_string(),
            Key::Backspace => "Backspace".to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Plus => "+".to_string(),
            Key::Equals => "=".to_string(),
            Key::Minus => "-".to_string(),
            Key::Zero => "0".to_string(),
            Key::Other(name) => name,
        }
    }
}

/// An input event delivered to the editor. Pointer positions are screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum EditorEvent {
    PointerDown {
        target: PointerTarget,
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    PointerLeave,
    #[serde(rename_all = "camelCase")]
    Drop {
        payload: DropPayload,
        client_x: f64,
        client_y: f64,
        /// Bounding rectangle of the canvas element at drop time.
        canvas: Rect,
    },
    KeyDown {
        key: Key,
    },
    ZoomIn,
    ZoomOut,
    ResetView,
}

impl EditorEvent {
    pub fn pointer_down_on_node(id: impl Into<NodeId>, at: Point) -> Self {
        EditorEvent::PointerDown {
            target: PointerTarget::Node { id: id.into() },
            x: at.x,
            y: at.y,
        }
    }

    pub fn pointer_down_on_background(at: Point) -> Self {
        EditorEvent::PointerDown {
            target: PointerTarget::Background,
            x: at.x,
            y: at.y,
        }
    }

    pub fn pointer_move(at: Point) -> Self {
        EditorEvent::PointerMove { x: at.x, y: at.y }
    }
}

/// Parses a JSON array of events, as used to replay an editing session.
pub fn parse_script(json: &str) -> Result<Vec<EditorEvent>, DocumentError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_script(path: &str) -> Result<Vec<EditorEvent>, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_script(&content)
}
