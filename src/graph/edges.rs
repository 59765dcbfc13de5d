use crate::model::{Edge, Node};
use ahash::AHashSet;

/// Derives the edge list of a node collection.
///
/// Nodes are visited in collection order. Each node contributes its linear edge first
/// (when `nextNodeId` names an existing node), then, for condition nodes, one edge per
/// branch whose target exists, in expression order. The branch index is the
/// entry's position in `config.expressions`. References to missing nodes are
/// skipped. The result depends only on the input, so identical collections always
/// yield identical lists.
pub fn derive_edges<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Vec<Edge> {
    let nodes: Vec<&Node> = nodes.into_iter().collect();
    let known: AHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let exists = |id: &str| known.contains(id);

    let mut edges = Vec::new();
    for node in &nodes {
        if let Some(target) = node.config.next_node_id().filter(|t| exists(*t)) {
            edges.push(Edge::linear(&node.id, target));
        }

        for (index, expression) in node.config.expressions().iter().enumerate() {
            match expression.target_node_id.as_deref() {
                Some(target) if exists(target) => {
                    edges.push(Edge::branch(&node.id, index, &expression.name, target));
                }
                _ => {}
            }
        }
    }
    edges
}
