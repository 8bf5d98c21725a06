//! Selection resolution between the graph view and the reader panel
//!
//! Given the selected node id, compute the set of chunk ids the reader
//! should highlight. Recomputed reactively on every selection or graph
//! change, so it stays synchronous and side-effect free.

use std::collections::HashSet;

use super::builder::GraphData;
use super::node::{NodeId, NodeKind};

/// Resolve the chunk ids to highlight for the current selection.
///
/// - No selection, or a selection that is not a node in `graph`: empty.
/// - A chunk node: that chunk alone.
/// - A topic node: every chunk on a link touching the topic. Both
///   endpoints are checked because a layout pass may have replaced raw
///   ids with resolved node references; either representation
///   normalizes to its id before comparison.
pub fn resolve_highlighted_chunks(
    selected: Option<&NodeId>,
    graph: &GraphData,
) -> HashSet<NodeId> {
    let selected = match selected {
        Some(id) => id,
        None => return HashSet::new(),
    };
    let node = match graph.get_node(selected) {
        Some(node) => node,
        None => return HashSet::new(),
    };

    match node.kind {
        NodeKind::Chunk { .. } => {
            let mut single = HashSet::with_capacity(1);
            single.insert(node.id.clone());
            single
        }
        NodeKind::Topic => graph
            .links
            .iter()
            .filter_map(|link| link.other_end(selected))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Chunk, Keyword};
    use crate::graph::builder::build_graph;
    use crate::graph::link::Endpoint;

    fn sample_graph() -> GraphData {
        let chunks = vec![
            Chunk::new("a", "t1", 0),
            Chunk::new("b", "t2", 1),
            Chunk::new("c", "t3", 2),
        ];
        let keywords = vec![
            Keyword::new("k1", "Graphs", 2).with_chunk_ids(vec!["a".into(), "c".into()]),
            Keyword::new("k2", "Networks", 1).with_chunk_ids(vec!["b".into()]),
        ];
        build_graph(&chunks, &keywords)
    }

    fn ids(set: &HashSet<NodeId>) -> Vec<&str> {
        let mut v: Vec<&str> = set.iter().map(|id| id.as_str()).collect();
        v.sort_unstable();
        v
    }

    // === Scenario: No selection highlights nothing ===
    #[test]
    fn no_selection_is_empty() {
        let graph = sample_graph();
        assert!(resolve_highlighted_chunks(None, &graph).is_empty());
    }

    // === Scenario: Unknown selection highlights nothing ===
    #[test]
    fn unknown_selection_is_empty() {
        let graph = sample_graph();
        let missing = NodeId::from("not-a-node");
        assert!(resolve_highlighted_chunks(Some(&missing), &graph).is_empty());
    }

    // === Scenario: Chunk selection highlights only that chunk ===
    #[test]
    fn chunk_selection_is_singleton() {
        let graph = sample_graph();
        let selected = NodeId::from("b");

        let highlighted = resolve_highlighted_chunks(Some(&selected), &graph);
        assert_eq!(ids(&highlighted), vec!["b"]);
    }

    // === Scenario: Topic selection highlights all linked chunks ===
    #[test]
    fn topic_selection_collects_linked_chunks() {
        let graph = sample_graph();
        let selected = NodeId::from("topic-graphs");

        let highlighted = resolve_highlighted_chunks(Some(&selected), &graph);
        assert_eq!(ids(&highlighted), vec!["a", "c"]);
    }

    // === Scenario: Resolution survives layout-resolved endpoints ===
    #[test]
    fn topic_selection_with_resolved_endpoints() {
        let mut graph = sample_graph();

        // Simulate a layout pass replacing raw ids with node references.
        let resolved: Vec<_> = graph
            .links
            .iter()
            .map(|link| {
                let mut link = link.clone();
                if let Some(node) = graph.get_node(link.source.node_id()) {
                    link.source = Endpoint::from(node.clone());
                }
                if let Some(node) = graph.get_node(link.target.node_id()) {
                    link.target = Endpoint::from(node.clone());
                }
                link
            })
            .collect();
        graph.links = resolved;

        let selected = NodeId::from("topic-graphs");
        let highlighted = resolve_highlighted_chunks(Some(&selected), &graph);
        assert_eq!(ids(&highlighted), vec!["a", "c"]);
    }

    // === Scenario: Topic with no surviving links highlights nothing ===
    #[test]
    fn isolated_topic_highlights_nothing() {
        let keywords = vec![Keyword::new("k1", "Orphan", 1).with_chunk_ids(vec!["z".into()])];
        let graph = build_graph(&[], &keywords);

        let selected = NodeId::from("topic-orphan");
        assert!(resolve_highlighted_chunks(Some(&selected), &graph).is_empty());
    }
}
