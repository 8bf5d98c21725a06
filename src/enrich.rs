//! Entity enrichment seam
//!
//! An optional LLM extraction step can produce resolved entities
//! instead of raw keyword counts. Entities convert into the keyword
//! shape, so the graph builder accepts either topic source through one
//! code path. The extraction call itself lives outside this crate.

use serde::{Deserialize, Serialize};

use crate::document::Keyword;

/// A resolved entity produced by an external enrichment step.
///
/// Field names follow the enrichment wire format (`type`, `chunkIds`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unified name of the concept or entity
    pub name: String,
    /// Brief definition of the concept in this document
    pub description: String,
    /// Category, e.g. "Person", "Technology", "Theory"
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Chunk ids that support this entity
    #[serde(rename = "chunkIds", default)]
    pub chunk_ids: Vec<String>,
}

impl Entity {
    /// Create an entity with no supporting chunks
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            entity_type: entity_type.into(),
            chunk_ids: Vec::new(),
        }
    }

    /// Set the supporting chunk ids
    pub fn with_chunk_ids(mut self, chunk_ids: Vec<String>) -> Self {
        self.chunk_ids = chunk_ids;
        self
    }

    /// Convert into the keyword shape the graph builder consumes.
    ///
    /// Entities carry no instance count; the number of supporting
    /// chunks stands in for it. The entity name doubles as the keyword
    /// id, since the enrichment step assigns none.
    pub fn into_keyword(self, source_id: impl Into<String>) -> Keyword {
        let instances = self.chunk_ids.len() as u32;
        Keyword::new(self.name.clone(), self.name, instances)
            .with_source_id(source_id)
            .with_chunk_ids(self.chunk_ids)
    }
}

/// Convert a batch of entities into keywords for one source, in input
/// order.
pub fn keywords_from_entities(entities: Vec<Entity>, source_id: &str) -> Vec<Keyword> {
    entities
        .into_iter()
        .map(|entity| entity.into_keyword(source_id))
        .collect()
}
