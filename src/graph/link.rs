//! Links between chunk and topic nodes
//!
//! A link's endpoints start out as raw node ids. A force-layout pass
//! may replace them with resolved node objects; both representations
//! normalize to an id before any comparison.

use serde::{Deserialize, Serialize};

use super::node::{GraphNode, NodeId};

/// One endpoint of a link: a raw node id, or a node resolved in place
/// by a layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    /// Raw id, as emitted by the graph builder
    Id(NodeId),
    /// Resolved node reference, as left behind after layout
    Resolved(Box<GraphNode>),
}

impl Endpoint {
    /// The node id this endpoint refers to, whichever representation holds.
    pub fn node_id(&self) -> &NodeId {
        match self {
            Self::Id(id) => id,
            Self::Resolved(node) => &node.id,
        }
    }
}

impl From<NodeId> for Endpoint {
    fn from(id: NodeId) -> Self {
        Self::Id(id)
    }
}

impl From<GraphNode> for Endpoint {
    fn from(node: GraphNode) -> Self {
        Self::Resolved(Box::new(node))
    }
}

/// An edge between a chunk node and a topic node.
///
/// Edges only ever cross the partition; no chunk-chunk or topic-topic
/// links exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    /// Chunk-side endpoint
    pub source: Endpoint,
    /// Topic-side endpoint
    pub target: Endpoint,
    /// Link strength consumed by the force simulation
    pub value: u32,
}

impl GraphLink {
    /// Create a chunk→topic link with unit value.
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source: Endpoint::Id(source),
            target: Endpoint::Id(target),
            value: 1,
        }
    }

    /// True if either endpoint refers to `id`.
    pub fn touches(&self, id: &NodeId) -> bool {
        self.source.node_id() == id || self.target.node_id() == id
    }

    /// The id at the other end of the link from `id`, if `id` is an
    /// endpoint of this link.
    pub fn other_end(&self, id: &NodeId) -> Option<&NodeId> {
        if self.source.node_id() == id {
            Some(self.target.node_id())
        } else if self.target.node_id() == id {
            Some(self.source.node_id())
        } else {
            None
        }
    }
}
