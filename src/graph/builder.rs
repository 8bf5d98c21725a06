//! Bipartite graph construction
//!
//! Pure transform from canonical chunks and keywords into `GraphData`.
//! Ordering is deterministic: chunk nodes in input order, then topic
//! nodes in input order, links in owning-topic order and `chunk_ids`
//! order within each topic.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::document::{Chunk, Keyword};

use super::link::GraphLink;
use super::node::{GraphNode, NodeId};

/// The node-and-edge structure handed to the renderer.
///
/// Built once per successful upload and replaced wholesale on the
/// next; never mutated in place while a renderer reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    /// Chunk nodes first, then topic nodes, each in input order
    pub nodes: Vec<GraphNode>,
    /// Links in owning-topic order
    pub links: Vec<GraphLink>,
}

impl GraphData {
    /// An empty graph
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a node by id. When topic slugs collide the first match
    /// wins; colliding nodes are indistinguishable by id.
    pub fn get_node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Number of chunk nodes
    pub fn chunk_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_chunk()).count()
    }

    /// Number of topic nodes
    pub fn topic_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_topic()).count()
    }

    /// True when the graph has no nodes and no links
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

/// Build the bipartite graph for one document.
///
/// One chunk node per chunk, one topic node per keyword, one link per
/// (topic, chunk) pair whose chunk id resolves to a chunk in `chunks`.
/// Unresolvable chunk ids are dropped silently — keyword records may
/// carry stale or cross-document references.
///
/// Pure function: identical inputs always produce identical output,
/// node and link ordering included.
pub fn build_graph(chunks: &[Chunk], keywords: &[Keyword]) -> GraphData {
    let mut nodes = Vec::with_capacity(chunks.len() + keywords.len());
    let mut links = Vec::new();

    let known_chunks: HashSet<&str> = chunks.iter().map(|c| c.id.as_str()).collect();

    for chunk in chunks {
        nodes.push(GraphNode::chunk(chunk));
    }

    for keyword in keywords {
        let topic = GraphNode::topic(keyword);
        let topic_id = topic.id.clone();
        nodes.push(topic);

        for chunk_id in &keyword.chunk_ids {
            if known_chunks.contains(chunk_id.as_str()) {
                links.push(GraphLink::new(
                    NodeId::from_string(chunk_id.clone()),
                    topic_id.clone(),
                ));
            }
        }
    }

    GraphData { nodes, links }
}
