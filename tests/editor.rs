//! End-to-end tests for the editor: snapshot publication, read-only mode and flow switching.
mod common;
use common::*;
use nagare::prelude::*;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_every_mutation_publishes_a_fresh_snapshot() {
    let (mut editor, saves) = recording_editor(create_simple_flow(), false);

    editor.update_config("n1", object(json!({ "nextNodeId": "start" })));
    editor.update_label("n2", "Bye");
    editor.delete_node("n2");

    let saves = saves.borrow();
    assert_eq!(saves.len(), 3);
    assert!(saves[0].edge("e_n1_to_start").is_some());
    assert_eq!(saves[1].node("n2").unwrap().label, "Bye");
    assert_eq!(saves[2].node_ids(), vec!["start", "n1"]);
    for snapshot in saves.iter() {
        assert_eq!(snapshot.edges, derive_edges(&snapshot.nodes));
    }
}

#[test]
fn test_ignored_commands_publish_nothing() {
    let (mut editor, saves) = recording_editor(create_simple_flow(), false);

    editor.delete_node(START_NODE_ID);
    editor.move_node("ghost", 1.0, 1.0);
    assert_eq!(
        editor.delete_selected(),
        CommandOutcome::Ignored(IgnoreReason::NothingSelected)
    );

    assert!(saves.borrow().is_empty());
}

#[test]
fn test_each_drag_tick_is_published() {
    let (mut editor, saves) = recording_editor(create_simple_flow(), false);

    editor.handle(EditorEvent::pointer_down_on_node("n1", Point::new(0.0, 0.0)));
    for step in 1..=4 {
        editor.handle(EditorEvent::pointer_move(Point::new(step as f64 * 10.0, 0.0)));
    }
    editor.handle(EditorEvent::PointerUp);

    let saves = saves.borrow();
    assert_eq!(saves.len(), 4);
    assert_eq!(saves[3].node("n1").unwrap().x, 40.0);
}

#[test]
fn test_coalescing_observer_forwards_latest_state_on_release() {
    let received: SaveLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    let observer =
        CoalescingObserver::new(move |s: &GraphSnapshot| sink.borrow_mut().push(s.clone()));
    let mut editor = FlowEditor::builder(create_simple_flow()).with_observer(observer).build();

    editor.handle(EditorEvent::pointer_down_on_node("n2", Point::new(0.0, 0.0)));
    editor.handle(EditorEvent::pointer_move(Point::new(10.0, 0.0)));
    editor.handle(EditorEvent::pointer_move(Point::new(25.0, 5.0)));
    assert!(received.borrow().is_empty());

    editor.handle(EditorEvent::PointerLeave);

    let received = received.borrow();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0], editor.snapshot());
    let moved = received[0].node("n2").unwrap();
    assert_eq!((moved.x, moved.y), (25.0, 5.0));
}

#[test]
fn test_coalescing_observer_holds_until_drained() {
    let received: SaveLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    let mut observer =
        CoalescingObserver::new(move |s: &GraphSnapshot| sink.borrow_mut().push(s.clone()));
    assert!(!observer.has_pending());
    observer.flush();
    assert!(received.borrow().is_empty());

    let first = GraphStore::new(create_simple_flow()).snapshot();
    let second = GraphStore::new(create_branching_flow()).snapshot();
    observer.on_save(&first);
    observer.on_save(&second);
    assert!(observer.has_pending());
    assert!(received.borrow().is_empty());

    let _inner = observer.into_inner();

    let received = received.borrow();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0], second);
}

#[test]
fn test_read_only_editor_blocks_mutations() {
    let (mut editor, saves) = recording_editor(create_simple_flow(), true);

    assert_eq!(
        editor.update_config("n1", object(json!({ "nextNodeId": null }))),
        CommandOutcome::Ignored(IgnoreReason::ReadOnly)
    );
    assert!(!editor.update_label("n1", "x").is_applied());
    assert!(!editor.add_node(NodeType::Logic, "wait", 0.0, 0.0).is_applied());
    assert!(!editor.delete_node("n2").is_applied());

    // Selection and viewport still work.
    assert!(editor.select("n2").is_applied());
    editor.handle(EditorEvent::ZoomOut);

    assert_eq!(editor.selected(), Some("n2"));
    assert_eq!(editor.viewport().zoom(), 0.9);
    assert_eq!(editor.snapshot().edges.len(), 2);
    assert!(saves.borrow().is_empty());
}

#[test]
fn test_toggling_read_only_cancels_drag() {
    let (mut editor, _saves) = recording_editor(create_simple_flow(), false);
    editor.handle(EditorEvent::pointer_down_on_node("n1", Point::new(0.0, 0.0)));

    editor.set_read_only(true);

    assert_eq!(*editor.interaction_state(), InteractionState::Idle);
    assert!(editor.is_read_only());
}

#[test]
fn test_drop_then_wire_then_delete() {
    let (mut editor, saves) = recording_editor(create_simple_flow(), false);

    editor.handle(EditorEvent::Drop {
        payload: DropPayload::new("BRANCH", "condition"),
        client_x: 400.0,
        client_y: 200.0,
        canvas: Rect::new(0.0, 0.0, 1024.0, 768.0),
    });
    let branch_id = editor.selected().unwrap().to_string();
    editor.update_config(&branch_id, object(json!({
        "expressions": [
            { "id": "a", "name": "VIP", "logic": "tier == 'gold'", "targetNodeId": "n2" },
            { "id": "b", "name": "", "logic": "true", "targetNodeId": "n1" }
        ]
    })));
    editor.update_config("n1", object(json!({ "nextNodeId": branch_id })));

    let snapshot = editor.snapshot();
    let from_branch: Vec<_> = snapshot.edges_from(&branch_id).map(|e| e.label.clone()).collect();
    assert_eq!(from_branch, vec![Some("VIP".to_string()), Some("Branch 2".to_string())]);

    editor.select("n2");
    editor.handle(EditorEvent::KeyDown { key: Key::Delete });

    let last = saves.borrow().last().cloned().unwrap();
    assert_no_dangling_edges(&last);
    let expressions = last.node(&branch_id).unwrap().config.expressions().to_vec();
    assert_eq!(expressions.len(), 2);
    assert_eq!(expressions[0].target_node_id, None);
    assert_eq!(expressions[0].name, "VIP");
    assert_eq!(saves.borrow().len(), 4);
}

#[test]
fn test_load_flow_switches_graph_and_clears_selection() {
    let (mut editor, saves) = recording_editor(create_simple_flow(), false);
    editor.handle(EditorEvent::ZoomIn);
    editor.handle(EditorEvent::pointer_down_on_node("n1", Point::new(0.0, 0.0)));

    editor.load_flow(vec![condition("n3", &[("only", Some("start"))])]);

    assert_eq!(editor.selected(), None);
    assert_eq!(*editor.interaction_state(), InteractionState::Idle);
    assert_eq!(editor.viewport().zoom(), 1.1);
    let saves = saves.borrow();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].node_ids(), vec!["start", "n3"]);
    assert_eq!(saves[0].edges[0].id, "e_n3_br_0");
}

#[test]
fn test_initial_edges_are_not_used_for_derivation() {
    let stale = Edge::linear("n2", "n1");
    let document = FlowDocument {
        nodes: create_simple_flow(),
        edges: vec![stale.clone()],
    };

    let editor = FlowEditor::from_document(document).build();

    assert_eq!(editor.initial_edges(), &[stale.clone()]);
    assert!(!editor.snapshot().edges.contains(&stale));
    assert_eq!(editor.snapshot().edges.len(), 2);
}

#[test]
fn test_form_catalog_is_passed_through() {
    let catalog = FormCatalog {
        api_definitions: vec![json!({ "id": "crm", "url": "https://crm.example/lookup" })],
        label_groups: vec![json!({ "name": "Billing", "labels": ["refund", "invoice"] })],
    };

    let editor = FlowEditor::builder(vec![]).with_form_catalog(catalog.clone()).build();

    assert_eq!(editor.form_catalog(), &catalog);
    assert_eq!(editor.snapshot().node_ids(), vec!["start"]);
}
