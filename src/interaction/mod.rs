//! Pointer, drag-and-drop and keyboard handling.
//!
//! The controller is a small state machine (`Idle`, `Panning`, `DraggingNode`) that turns
//! raw input into viewport changes and graph commands. It never stays stuck in a gesture:
//! pointer-up and pointer-leave both release it.

pub mod event;

pub use event::{DropPayload, EditorEvent, Key, PointerTarget, load_script, parse_script};

use crate::error::IgnoreReason;
use crate::geometry::{Point, Rect};
use crate::graph::GraphStore;
use crate::model::{NodeId, NodeType};
use crate::viewport::Viewport;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Dragging the background; `last` is the previous pointer position in screen pixels.
    Panning { last: Point },
    DraggingNode { id: NodeId, last: Point },
}

/// What an event changed, so the owner knows whether to publish a snapshot or repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResult {
    pub graph_changed: bool,
    pub viewport_changed: bool,
    pub selection_changed: bool,
    /// A pan or drag gesture ended with this event.
    pub gesture_released: bool,
}

impl EventResult {
    fn graph(changed: bool) -> Self {
        Self {
            graph_changed: changed,
            selection_changed: changed,
            ..Default::default()
        }
    }

    fn viewport() -> Self {
        Self {
            viewport_changed: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
    read_only: bool,
}

impl InteractionController {
    pub fn new(read_only: bool) -> Self {
        Self {
            state: InteractionState::Idle,
            read_only,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == InteractionState::Idle
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        if read_only && matches!(self.state, InteractionState::DraggingNode { .. }) {
            self.state = InteractionState::Idle;
        }
    }

    /// Abandons any gesture in progress.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    pub fn handle(
        &mut self,
        event: &EditorEvent,
        graph: &mut GraphStore,
        viewport: &mut Viewport,
    ) -> EventResult {
        match event {
            EditorEvent::PointerDown { target, x, y } => {
                self.pointer_down(target, Point::new(*x, *y), graph)
            }
            EditorEvent::PointerMove { x, y } => {
                self.pointer_move(Point::new(*x, *y), graph, viewport)
            }
            EditorEvent::PointerUp | EditorEvent::PointerLeave => self.release(),
            EditorEvent::Drop {
                payload,
                client_x,
                client_y,
                canvas,
            } => self.drop_node(payload, Point::new(*client_x, *client_y), canvas, graph, viewport),
            EditorEvent::KeyDown { key } => self.key_down(key, graph, viewport),
            EditorEvent::ZoomIn => {
                viewport.zoom_in();
                EventResult::viewport()
            }
            EditorEvent::ZoomOut => {
                viewport.zoom_out();
                EventResult::viewport()
            }
            EditorEvent::ResetView => {
                viewport.reset();
                EventResult::viewport()
            }
        }
    }

    fn pointer_down(
        &mut self,
        target: &PointerTarget,
        at: Point,
        graph: &mut GraphStore,
    ) -> EventResult {
        // A press while a gesture is active means the release was lost; end it first.
        let mut result = EventResult {
            gesture_released: self.release().gesture_released,
            ..Default::default()
        };

        match target {
            PointerTarget::Background => {
                result.selection_changed = graph.selected().is_some();
                graph.clear_selection();
                self.state = InteractionState::Panning { last: at };
            }
            PointerTarget::Node { id } => {
                if graph.select(id).is_applied() {
                    result.selection_changed = true;
                    if !self.read_only {
                        self.state = InteractionState::DraggingNode {
                            id: id.clone(),
                            last: at,
                        };
                    }
                }
            }
        }
        log::trace!("Pointer down on {:?} -> {:?}", target, self.state);
        result
    }

    fn pointer_move(
        &mut self,
        at: Point,
        graph: &mut GraphStore,
        viewport: &mut Viewport,
    ) -> EventResult {
        match self.state.clone() {
            InteractionState::Idle => EventResult::default(),
            InteractionState::Panning { last } => {
                let delta = at - last;
                self.state = InteractionState::Panning { last: at };
                viewport.pan(delta.dx, delta.dy);
                EventResult::viewport()
            }
            InteractionState::DraggingNode { id, last } => {
                let Some(node) = graph.node(&id) else {
                    // The node vanished under the pointer.
                    return self.release();
                };
                let delta = viewport.screen_delta_to_world(at - last);
                let (x, y) = (node.x + delta.dx, node.y + delta.dy);
                self.state = InteractionState::DraggingNode { id: id.clone(), last: at };
                EventResult {
                    graph_changed: graph.move_node(&id, x, y).is_applied(),
                    ..Default::default()
                }
            }
        }
    }

    fn release(&mut self) -> EventResult {
        let was_active = !self.is_idle();
        if was_active {
            log::trace!("Releasing {:?}", self.state);
        }
        self.state = InteractionState::Idle;
        EventResult {
            gesture_released: was_active,
            ..Default::default()
        }
    }

    fn drop_node(
        &mut self,
        payload: &DropPayload,
        client: Point,
        canvas: &Rect,
        graph: &mut GraphStore,
        viewport: &Viewport,
    ) -> EventResult {
        if self.read_only {
            log::debug!("Ignoring drop: {}", IgnoreReason::ReadOnly);
            return EventResult::default();
        }
        if payload.node_type.is_empty() {
            log::debug!("Ignoring drop: {}", IgnoreReason::EmptyNodeType);
            return EventResult::default();
        }
        let Ok(node_type) = payload.node_type.parse::<NodeType>() else {
            log::debug!(
                "Ignoring drop: {}",
                IgnoreReason::UnknownNodeType(payload.node_type.clone())
            );
            return EventResult::default();
        };

        let world = viewport.screen_to_world(client, canvas.origin());
        let outcome = graph.add_node(node_type, &payload.node_sub_type, world.x, world.y);
        EventResult::graph(outcome.is_applied())
    }

    fn key_down(
        &mut self,
        key: &Key,
        graph: &mut GraphStore,
        viewport: &mut Viewport,
    ) -> EventResult {
        match key {
            Key::Delete | Key::Backspace => {
                if self.read_only {
                    log::debug!("Ignoring delete key: {}", IgnoreReason::ReadOnly);
                    return EventResult::default();
                }
                let Some(selected) = graph.selected().map(str::to_owned) else {
                    log::debug!("Ignoring delete key: {}", IgnoreReason::NothingSelected);
                    return EventResult::default();
                };
                let applied = graph.delete_node(&selected).is_applied();
                let dragging_selected = matches!(
                    &self.state,
                    InteractionState::DraggingNode { id, .. } if *id == selected
                );
                if applied && dragging_selected {
                    self.state = InteractionState::Idle;
                }
                EventResult::graph(applied)
            }
            Key::Escape => {
                let had_selection = graph.selected().is_some();
                graph.clear_selection();
                EventResult {
                    selection_changed: had_selection,
                    ..Default::default()
                }
            }
            Key::Plus | Key::Equals => {
                viewport.zoom_in();
                EventResult::viewport()
            }
            Key::Minus => {
                viewport.zoom_out();
                EventResult::viewport()
            }
            Key::Zero => {
                viewport.reset();
                EventResult::viewport()
            }
            Key::Other(_) => EventResult::default(),
        }
    }
}
