//! SynapText: Bipartite Document-Intelligence Graph Client
//!
//! Builds a force-layout-ready bipartite graph linking document chunks
//! to extracted topics, resolves graph selections into reader-panel
//! highlights, and orchestrates the upload/fetch pipeline against the
//! processing backend.
//!
//! # Core Concepts
//!
//! - **Chunks**: ordered fragments of the ingested document
//! - **Topics**: extracted keywords, weighted by instance count
//! - **Links**: chunk–topic edges, only ever across the partition
//!
//! # Example
//!
//! ```
//! use synaptext::document::{Chunk, Keyword};
//! use synaptext::graph::{build_graph, resolve_highlighted_chunks, NodeId};
//!
//! let chunks = vec![Chunk::new("a", "first fragment", 0)];
//! let keywords = vec![Keyword::new("k1", "Graphs", 2).with_chunk_ids(vec!["a".into()])];
//!
//! let graph = build_graph(&chunks, &keywords);
//! assert_eq!(graph.nodes.len(), 2);
//!
//! let selected = NodeId::from("topic-graphs");
//! let highlighted = resolve_highlighted_chunks(Some(&selected), &graph);
//! assert!(highlighted.contains(&NodeId::from("a")));
//! ```

pub mod backend;
pub mod document;
pub mod enrich;
pub mod graph;
pub mod session;

pub use backend::{
    BackendClient, BackendError, BackendResult, GraphPayload, HttpBackend, KeywordSummary,
    MockBackend, UploadReceipt,
};
pub use document::{Chunk, DocumentSession, Keyword, SourceId};
pub use enrich::{keywords_from_entities, Entity};
pub use graph::{
    build_graph, resolve_highlighted_chunks, Endpoint, GraphData, GraphLink, GraphNode, NodeId,
    NodeKind,
};
pub use session::{DocumentPipeline, ProcessingStage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
