//! Bipartite graph core: nodes, links, construction, and selection

mod builder;
mod link;
mod node;
mod select;


pub use builder::{build_graph, GraphData};
pub use link::{Endpoint, GraphLink};
pub use node::{topic_slug, GraphNode, NodeId, NodeKind};
pub use select::resolve_highlighted_chunks;
