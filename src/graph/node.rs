//! Node representation in the bipartite document graph

use serde::{Deserialize, Serialize};

use crate::document::{Chunk, Keyword};

/// Unique identifier for a graph node
///
/// Chunk nodes reuse the chunk id; topic nodes use a slug derived from
/// the keyword text. Serializes as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a NodeId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Which side of the bipartite graph a node belongs to.
///
/// The only behavioral difference between the two kinds is weight
/// computation and label formatting, so a tagged enum carries it
/// rather than a type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    /// A document fragment; uniform layout weight
    Chunk {
        /// Zero-based position within the document
        index: usize,
    },
    /// An extracted keyword/topic; weight scales with instance count
    Topic,
}

/// A node in the bipartite graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique identifier within the graph
    pub id: NodeId,
    /// Display label
    pub label: String,
    /// Chunk or topic
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Text payload: chunk text for chunk nodes, keyword text for topics
    pub content: String,
    /// Layout importance hint consumed by the force simulation
    pub weight: u32,
}

impl GraphNode {
    /// Build the node for a document chunk. Node id equals the chunk id;
    /// the label shows a 1-based position.
    pub fn chunk(chunk: &Chunk) -> Self {
        Self {
            id: NodeId::from_string(chunk.id.clone()),
            label: format!("Chunk {}", chunk.index + 1),
            kind: NodeKind::Chunk { index: chunk.index },
            content: chunk.text.clone(),
            weight: 1,
        }
    }

    /// Build the node for a keyword topic. Node id is the keyword slug;
    /// weight grows linearly with the observed instance count.
    pub fn topic(keyword: &Keyword) -> Self {
        Self {
            id: topic_slug(&keyword.keyword),
            label: keyword.keyword.clone(),
            kind: NodeKind::Topic,
            content: keyword.keyword.clone(),
            weight: 5 + keyword.instances * 2,
        }
    }

    /// True for chunk nodes
    pub fn is_chunk(&self) -> bool {
        matches!(self.kind, NodeKind::Chunk { .. })
    }

    /// True for topic nodes
    pub fn is_topic(&self) -> bool {
        matches!(self.kind, NodeKind::Topic)
    }
}

/// Derive the topic node id from keyword display text: lower-cased,
/// each whitespace run collapsed to a single hyphen, `topic-` prefix.
///
/// Distinct keywords can normalize to the same slug ("Graph Theory" vs
/// "graph  theory"); such nodes collide and stay indistinguishable by
/// id. Not deduplicated.
pub fn topic_slug(keyword: &str) -> NodeId {
    let mut slug = String::with_capacity(keyword.len() + 6);
    slug.push_str("topic-");
    let mut in_whitespace = false;
    for ch in keyword.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }
    NodeId::from_string(slug)
}
