use crate::model::Node;

/// Clears every reference to `deleted` held by `nodes` and returns how many were cleared.
///
/// A matching `nextNodeId` is removed from the config entirely. A matching branch target
/// is unset while the branch entry itself (id, name, logic) stays in place.
pub fn clear_references<'a>(
    nodes: impl IntoIterator<Item = &'a mut Node>,
    deleted: &str,
) -> usize {
    let mut cleared = 0;
    for node in nodes {
        if node.config.next_node_id() == Some(deleted) {
            node.config.set_next_node_id(None);
            cleared += 1;
        }

        let matching: Vec<usize> = node
            .config
            .expressions()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.target_node_id.as_deref() == Some(deleted))
            .map(|(index, _)| index)
            .collect();
        for index in matching {
            if node.config.clear_branch_target(index) {
                cleared += 1;
            }
        }
    }
    cleared
}
