// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! Shared cache of committed type and schema definitions.
//!
//! The store is the only registry object reached from multiple concurrent
//! builder sessions. Commits for one type id must serialize so that the
//! merge-conflict check cannot race; reads hand out shared handles that
//! are never mutated in place.

use super::binary_type::BinaryType;
use super::errors::{RegistryError, RegistryResult};
use super::schema::BinarySchema;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Cache of committed (type, schema) definitions and template associations.
///
/// `add_type` performs the get-or-create-or-merge commit: merging the
/// offered definition against any prior entry for the same type id and
/// indexing the schema under that type. Implementations must serialize
/// commits per type id and must never mutate a previously handed-out value
/// in place - existing aliases keep observing the definition they fetched.
pub trait TypeStore: Send + Sync {
    /// Look up a committed type by id.
    fn get_type(&self, type_id: i32) -> Option<Arc<BinaryType>>;

    /// Commit a (type, schema) pair, merging with any existing definition.
    ///
    /// Returns the stored pair after the merge.
    fn add_type(
        &self,
        ty: &Arc<BinaryType>,
        schema: &Arc<BinarySchema>,
    ) -> RegistryResult<(Arc<BinaryType>, Arc<BinarySchema>)>;

    /// Look up the (type, schema) pair derived from a template key.
    fn get_by_template(&self, key: &str) -> Option<(Arc<BinaryType>, Arc<BinarySchema>)>;

    /// Associate a template key with a derived (type, schema) pair.
    fn set_by_template(&self, key: &str, ty: Arc<BinaryType>, schema: Arc<BinarySchema>);
}

/// In-memory, process-wide type store.
///
/// Keyed maps are sharded; the commit path holds the entry guard for its
/// type id across the whole merge, which serializes concurrent commits for
/// the same type while leaving other ids free.
pub struct ClientTypeStore {
    types: DashMap<i32, Arc<BinaryType>>,
    templates: DashMap<String, (Arc<BinaryType>, Arc<BinarySchema>)>,
}

impl ClientTypeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            types: DashMap::new(),
            templates: DashMap::new(),
        }
    }

    /// Number of committed types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl Default for ClientTypeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeStore for ClientTypeStore {
    fn get_type(&self, type_id: i32) -> Option<Arc<BinaryType>> {
        self.types.get(&type_id).map(|entry| Arc::clone(entry.value()))
    }

    fn add_type(
        &self,
        ty: &Arc<BinaryType>,
        schema: &Arc<BinarySchema>,
    ) -> RegistryResult<(Arc<BinaryType>, Arc<BinarySchema>)> {
        let type_id = ty.type_id();
        let schema_id = schema.schema_id();

        let stored = match self.types.entry(type_id) {
            Entry::Occupied(mut entry) => {
                // Merge into a fresh copy and swap the entry; builders that
                // still alias the previous value keep seeing it unchanged.
                let mut merged = BinaryType::clone(entry.get());
                merged.merge(ty, schema)?;
                let merged = Arc::new(merged);
                entry.insert(Arc::clone(&merged));
                log::debug!(
                    "[REGISTRY] merged type '{}' (id {}, {} fields, {} schemas)",
                    merged.display_name(),
                    type_id,
                    merged.field_count(),
                    merged.schema_count()
                );
                merged
            }
            Entry::Vacant(entry) => {
                let mut fresh = BinaryType::clone(ty);
                fresh.add_schema(Arc::clone(schema));
                let fresh = Arc::new(fresh);
                entry.insert(Arc::clone(&fresh));
                log::debug!(
                    "[REGISTRY] registered type '{}' (id {}, schema {})",
                    fresh.display_name(),
                    type_id,
                    schema_id
                );
                fresh
            }
        };

        let stored_schema = stored
            .schema(schema_id)
            .ok_or(RegistryError::SchemaNotFound { type_id, schema_id })?;
        Ok((stored, stored_schema))
    }

    fn get_by_template(&self, key: &str) -> Option<(Arc<BinaryType>, Arc<BinarySchema>)> {
        self.templates.get(key).map(|entry| entry.value().clone())
    }

    fn set_by_template(&self, key: &str, ty: Arc<BinaryType>, schema: Arc<BinarySchema>) {
        log::trace!(
            "[REGISTRY] cached template '{}' -> type '{}'",
            key,
            ty.display_name()
        );
        self.templates.insert(key.to_string(), (ty, schema));
    }
}
