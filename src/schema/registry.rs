//! Append-only schema registry
//!
//! Entries are written once, when a record builder finalizes, and are never
//! mutated or removed. The process-wide instance is populated during the
//! initialization phase and only read afterwards.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use super::errors::{SchemaError, SchemaResult};
use super::identifier::Identifier;
use super::types::SchemaNode;
use crate::observability::Logger;

static GLOBAL_REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();

/// A registered schema definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    /// Registry key
    pub identifier: Identifier,
    /// Full definition
    pub node: SchemaNode,
}

#[derive(Debug, Default)]
struct RegistryInner {
    /// Entries in registration order
    entries: Vec<SchemaEntry>,
    /// Position of each identifier in `entries`
    index: HashMap<Identifier, usize>,
}

/// Registry of finalized schema definitions, keyed by identifier.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    inner: RwLock<RegistryInner>,
}

impl SchemaRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry
    pub fn global() -> &'static SchemaRegistry {
        GLOBAL_REGISTRY.get_or_init(SchemaRegistry::new)
    }

    /// Registers a definition and returns a reference node pointing at it.
    ///
    /// # Errors
    ///
    /// `MGMT_DUPLICATE_SCHEMA` if the identifier is taken; nothing is
    /// registered in that case.
    pub fn register(&self, identifier: Identifier, node: SchemaNode) -> SchemaResult<SchemaNode> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if inner.index.contains_key(&identifier) {
            return Err(SchemaError::duplicate_schema(&identifier));
        }

        let properties = node.property_names().len().to_string();
        let position = inner.entries.len();
        inner.index.insert(identifier.clone(), position);
        inner.entries.push(SchemaEntry {
            identifier: identifier.clone(),
            node,
        });
        drop(inner);

        Logger::info(
            "SCHEMA_REGISTERED",
            &[("identifier", &identifier.to_string()), ("properties", &properties)],
        );

        Ok(SchemaNode::Reference(identifier))
    }

    /// Returns the definition registered under `identifier`
    pub fn get(&self, identifier: &Identifier) -> Option<SchemaNode> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .index
            .get(identifier)
            .map(|position| inner.entries[*position].node.clone())
    }

    /// Returns whether `identifier` is registered
    pub fn contains(&self, identifier: &Identifier) -> bool {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.index.contains_key(identifier)
    }

    /// Follows a reference node to its definition. Other nodes are returned as is.
    pub fn resolve(&self, node: &SchemaNode) -> Option<SchemaNode> {
        match node {
            SchemaNode::Reference(identifier) => self.get(identifier),
            other => Some(other.clone()),
        }
    }

    /// Snapshot of all entries in registration order
    pub fn entries(&self) -> Vec<SchemaEntry> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.entries.clone()
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.entries.len()
    }

    /// Returns whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
