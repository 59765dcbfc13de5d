//! Property tests: random command sequences never break the graph invariants.
mod common;
use common::*;
use nagare::graph::SequentialIds;
use nagare::prelude::*;
use nagare::viewport::{MAX_ZOOM, MIN_ZOOM};
use proptest::prelude::*;
use serde_json::json;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Ids that exist in the seed flow, ids the store will mint, and ids that never exist.
fn arb_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("start".to_string()),
        Just("n1".to_string()),
        Just("n3".to_string()),
        Just("n4".to_string()),
        Just("n5".to_string()),
        Just("n_1".to_string()),
        Just("n_2".to_string()),
        Just("n_3".to_string()),
        Just("ghost".to_string()),
    ]
}

fn arb_reference() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        arb_id().prop_map(|id| json!(id)),
        Just(json!(null)),
        Just(json!("")),
    ]
}

fn arb_command() -> impl Strategy<Value = GraphCommand> {
    let palette: Vec<(NodeType, &'static str)> = nagare::toolbox::entries()
        .iter()
        .filter(|e| e.node_type != NodeType::Start)
        .map(|e| (e.node_type, e.sub_type))
        .collect();

    prop_oneof![
        (prop::sample::select(palette), -500.0..500.0f64, -500.0..500.0f64).prop_map(
            |((node_type, sub_type), x, y)| GraphCommand::AddNode {
                node_type,
                sub_type: sub_type.to_string(),
                x,
                y,
            }
        ),
        (arb_id(), -500.0..500.0f64, -500.0..500.0f64)
            .prop_map(|(id, x, y)| GraphCommand::MoveNode { id, x, y }),
        (arb_id(), arb_reference()).prop_map(|(id, next)| GraphCommand::UpdateConfig {
            id,
            patch: object(json!({ "nextNodeId": next })),
        }),
        (arb_id(), prop::collection::vec(arb_reference(), 0..4)).prop_map(|(id, targets)| {
            let expressions: Vec<_> = targets
                .into_iter()
                .enumerate()
                .map(|(i, target)| json!({ "id": i.to_string(), "name": "", "logic": "true", "targetNodeId": target }))
                .collect();
            GraphCommand::UpdateConfig {
                id,
                patch: object(json!({ "expressions": expressions })),
            }
        }),
        arb_id().prop_map(|id| GraphCommand::DeleteNode { id }),
    ]
}

fn seeded_store() -> GraphStore {
    GraphStore::with_id_source(create_branching_flow(), Box::new(SequentialIds::new("n_")))
}

fn references<'a>(snapshot: &'a GraphSnapshot) -> Vec<&'a str> {
    snapshot
        .nodes
        .iter()
        .flat_map(|n| {
            n.config
                .next_node_id()
                .into_iter()
                .chain(n.config.expressions().iter().filter_map(|e| e.target_node_id.as_deref()))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn edges_always_match_derivation(commands in prop::collection::vec(arb_command(), 1..40)) {
        let mut store = seeded_store();

        for command in commands {
            store.apply(command);

            let snapshot = store.snapshot();
            prop_assert_eq!(&snapshot.edges, &derive_edges(&snapshot.nodes));
            prop_assert!(store.contains(START_NODE_ID));
            for edge in &snapshot.edges {
                prop_assert!(store.contains(&edge.source));
                prop_assert!(store.contains(&edge.target));
            }
            if let Some(selected) = store.selected() {
                prop_assert!(store.contains(selected));
            }
        }
    }

    #[test]
    fn deleted_nodes_leave_no_references(commands in prop::collection::vec(arb_command(), 1..40)) {
        let mut store = seeded_store();

        for command in commands {
            let deleted = match &command {
                GraphCommand::DeleteNode { id } => Some(id.clone()),
                _ => None,
            };
            let applied = store.apply(command).is_applied();

            if let (true, Some(id)) = (applied, deleted) {
                let snapshot = store.snapshot();
                prop_assert!(!references(&snapshot).contains(&id.as_str()));
            }
        }
    }

    #[test]
    fn same_commands_yield_same_snapshot(commands in prop::collection::vec(arb_command(), 0..30)) {
        let mut first = seeded_store();
        let mut second = seeded_store();

        for command in commands {
            prop_assert_eq!(first.apply(command.clone()), second.apply(command));
        }

        prop_assert_eq!(first.snapshot(), second.snapshot());
    }

    #[test]
    fn zoom_stays_in_bounds(steps in prop::collection::vec(any::<bool>(), 0..60)) {
        let mut viewport = Viewport::default();

        for zoom_in in steps {
            if zoom_in {
                viewport.zoom_in();
            } else {
                viewport.zoom_out();
            }
            prop_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&viewport.zoom()));
        }
    }

    #[test]
    fn screen_and_world_transforms_are_inverse(
        pan_x in -1000.0..1000.0f64,
        pan_y in -1000.0..1000.0f64,
        zoom in MIN_ZOOM..=MAX_ZOOM,
        x in -2000.0..2000.0f64,
        y in -2000.0..2000.0f64,
    ) {
        let viewport = Viewport::new(pan_x, pan_y, zoom);
        let origin = Point::new(12.0, 48.0);

        let back = viewport.screen_to_world(viewport.world_to_screen(Point::new(x, y), origin), origin);

        prop_assert!((back.x - x).abs() < 1e-6);
        prop_assert!((back.y - y).abs() < 1e-6);
    }
}
