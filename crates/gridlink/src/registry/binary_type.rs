// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! Binary type metadata: field catalogue, schema set, enum values.

use super::errors::{RegistryError, RegistryResult};
use super::field::BinaryField;
use super::hash;
use super::schema::BinarySchema;
use crate::wire::{nullable_str_size, str_size, Cursor, CursorMut, WireError, WireResult};
use std::sync::Arc;

/// A named complex type known to the client.
///
/// Accumulates the union of all field descriptors ever observed for the
/// name (across every schema merged in), all known schemas, and optional
/// enum metadata. The type id is the hash of the lowercased name, except
/// for the placeholder case where a type was learned from the server by id
/// and its definition (including the name) is not known yet.
///
/// Field and schema entries are kept in insertion order; the wire codec
/// and the schema fingerprint both depend on that order.
///
/// Cloning produces fresh catalogue vectors whose entries are shared by
/// reference - entries are immutable once constructed, so the shallow
/// sharing is safe and keeps builder copy-on-write cheap.
#[derive(Debug, Clone)]
pub struct BinaryType {
    id: i32,
    name: Option<String>,
    fields: Vec<Arc<BinaryField>>,
    schemas: Vec<Arc<BinarySchema>>,
    is_enum: bool,
    enum_values: Vec<(String, i32)>,
}

impl BinaryType {
    /// Create an empty type; the id is derived from the lowercased name.
    pub fn new(name: &str) -> Self {
        Self {
            id: hash::name_id(name),
            name: Some(name.to_string()),
            fields: Vec::new(),
            schemas: Vec::new(),
            is_enum: false,
            enum_values: Vec::new(),
        }
    }

    /// Placeholder for a type referenced by id whose definition has not
    /// arrived yet. The name stays absent until a merge supplies it.
    pub fn unresolved(type_id: i32) -> Self {
        Self {
            id: type_id,
            name: None,
            fields: Vec::new(),
            schemas: Vec::new(),
            is_enum: false,
            enum_values: Vec::new(),
        }
    }

    pub fn type_id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name for diagnostics; placeholders render as `#<id>`.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", self.id),
        }
    }

    /// A type is valid iff its name is present and every field descriptor
    /// is valid. Callers should check before committing or transmitting.
    pub fn is_valid(&self) -> bool {
        self.name.is_some() && self.fields.iter().all(|f| f.is_valid())
    }

    // ------------------------------------------------------------------
    // Field catalogue
    // ------------------------------------------------------------------

    /// Install a descriptor, replacing any existing one with the same id
    /// in place (catalogue order is preserved on replacement).
    pub fn set_field(&mut self, field: BinaryField) {
        let field = Arc::new(field);
        match self.field_pos(field.field_id()) {
            Some(pos) => self.fields[pos] = field,
            None => self.fields.push(field),
        }
    }

    pub fn field(&self, field_id: i32) -> Option<&BinaryField> {
        self.field_pos(field_id).map(|pos| &*self.fields[pos])
    }

    pub fn has_field(&self, field_id: i32) -> bool {
        self.field_pos(field_id).is_some()
    }

    /// Remove a descriptor; returns whether it was present.
    pub fn remove_field(&mut self, field_id: i32) -> bool {
        match self.field_pos(field_id) {
            Some(pos) => {
                self.fields.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Field descriptors in catalogue (insertion) order.
    pub fn fields(&self) -> impl Iterator<Item = &BinaryField> {
        self.fields.iter().map(|f| &**f)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field_pos(&self, field_id: i32) -> Option<usize> {
        self.fields.iter().position(|f| f.field_id() == field_id)
    }

    // ------------------------------------------------------------------
    // Schema set
    // ------------------------------------------------------------------

    /// Add a schema; no-op when one with the same id is already present.
    ///
    /// Callers hand in finalized schemas; the id read here is the one that
    /// goes on the wire.
    pub fn add_schema(&mut self, schema: Arc<BinarySchema>) {
        let id = schema.schema_id();
        if !self.schemas.iter().any(|s| s.schema_id() == id) {
            self.schemas.push(schema);
        }
    }

    pub fn schema(&self, schema_id: i32) -> Option<Arc<BinarySchema>> {
        self.schemas
            .iter()
            .find(|s| s.schema_id() == schema_id)
            .cloned()
    }

    pub fn has_schema(&self, schema_id: i32) -> bool {
        self.schemas.iter().any(|s| s.schema_id() == schema_id)
    }

    /// Schemas in set (insertion) order.
    pub fn schemas(&self) -> impl Iterator<Item = &BinarySchema> {
        self.schemas.iter().map(|s| &**s)
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    // ------------------------------------------------------------------
    // Enum metadata
    // ------------------------------------------------------------------

    pub fn is_enum(&self) -> bool {
        self.is_enum
    }

    /// Enum literals as ordered (name, ordinal) pairs; empty for non-enums.
    pub fn enum_values(&self) -> &[(String, i32)] {
        &self.enum_values
    }

    /// Mark the type as an enum and install its literal values.
    pub fn register_enum(&mut self, values: Vec<(String, i32)>) {
        self.is_enum = true;
        self.enum_values = values;
    }

    // ------------------------------------------------------------------
    // Merge
    // ------------------------------------------------------------------

    /// Reconcile another definition of this type into this one.
    ///
    /// Fields are unioned: an absent descriptor is adopted by reference, a
    /// present one must agree on the type code or the merge fails with
    /// [`RegistryError::SchemaConflict`] naming the field and the type.
    /// Enum literals follow the same rule on ordinals. The schema is added
    /// idempotently after all fields were processed, so a conflicting
    /// merge leaves no half-registered schema behind.
    ///
    /// A placeholder learns the name from the first merged definition that
    /// carries one.
    pub fn merge(
        &mut self,
        other: &BinaryType,
        other_schema: &Arc<BinarySchema>,
    ) -> RegistryResult<()> {
        for (pos, field) in other.fields.iter().enumerate() {
            match self.field(field.field_id()) {
                Some(existing) => {
                    if existing.type_code() != field.type_code() {
                        log::debug!(
                            "[REGISTRY] merge conflict on type '{}', field '{}': {:?} vs {:?}",
                            self.display_name(),
                            field.name().unwrap_or("<unnamed>"),
                            existing.type_code(),
                            field.type_code()
                        );
                        return Err(RegistryError::SchemaConflict {
                            type_name: self.display_name(),
                            field_name: field
                                .name()
                                .map_or_else(|| format!("#{}", field.field_id()), String::from),
                        });
                    }
                }
                None => self.fields.push(Arc::clone(&other.fields[pos])),
            }
        }

        self.merge_enum_values(other)?;

        if self.name.is_none() {
            self.name.clone_from(&other.name);
        }

        self.add_schema(Arc::clone(other_schema));
        Ok(())
    }

    fn merge_enum_values(&mut self, other: &BinaryType) -> RegistryResult<()> {
        if !other.is_enum {
            return Ok(());
        }
        if !self.is_enum {
            self.is_enum = true;
            self.enum_values.clone_from(&other.enum_values);
            return Ok(());
        }
        for (name, ordinal) in &other.enum_values {
            match self.enum_values.iter().find(|(n, _)| n == name) {
                Some((_, existing)) if existing != ordinal => {
                    return Err(RegistryError::SchemaConflict {
                        type_name: self.display_name(),
                        field_name: name.clone(),
                    });
                }
                Some(_) => {}
                None => self.enum_values.push((name.clone(), *ordinal)),
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Wire codec
    // ------------------------------------------------------------------

    /// Encoded size on the wire.
    pub fn wire_size(&self) -> usize {
        let mut size = 4; // type id
        size += nullable_str_size(self.name.as_deref());
        size += nullable_str_size(None); // affinity key field name, always absent
        size += 4; // field count
        size += self.fields.iter().map(|f| f.wire_size()).sum::<usize>();
        size += 1; // is_enum flag
        if self.is_enum {
            size += 4; // value count
            size += self
                .enum_values
                .iter()
                .map(|(name, _)| str_size(name) + 4)
                .sum::<usize>();
        }
        size += 4; // schema count
        size += self.schemas.iter().map(|s| s.wire_size()).sum::<usize>();
        size
    }

    /// Encode in the protocol's fixed order: type id, nullable name,
    /// affinity-key field name (always absent at this layer), field
    /// descriptors, enum block, schemas.
    pub fn write_to(&self, cur: &mut CursorMut<'_>) -> WireResult<()> {
        cur.write_i32_le(self.id)?;
        cur.write_nullable_str(self.name.as_deref())?;
        // This client never designates an affinity key; the slot is encoded
        // as absent so the layout stays symmetric with other clients.
        cur.write_nullable_str(None)?;

        cur.write_i32_le(count_i32(self.fields.len(), "field count")?)?;
        for field in &self.fields {
            field.write_to(cur)?;
        }

        cur.write_bool(self.is_enum)?;
        if self.is_enum {
            cur.write_i32_le(count_i32(self.enum_values.len(), "enum value count")?)?;
            for (name, ordinal) in &self.enum_values {
                cur.write_str(name)?;
                cur.write_i32_le(*ordinal)?;
            }
        }

        cur.write_i32_le(count_i32(self.schemas.len(), "schema count")?)?;
        for schema in &self.schemas {
            schema.write_to(cur)?;
        }
        Ok(())
    }

    /// Decode in the same fixed order, replacing this instance's state in
    /// place. Fields and schemas are read into fresh instances and
    /// installed through [`set_field`] / [`add_schema`].
    ///
    /// [`set_field`]: BinaryType::set_field
    /// [`add_schema`]: BinaryType::add_schema
    pub fn read_from(&mut self, cur: &mut Cursor<'_>) -> WireResult<()> {
        self.id = cur.read_i32_le()?;
        self.name = cur.read_nullable_string()?;
        if let Some(affinity) = cur.read_nullable_string()? {
            log::trace!(
                "[REGISTRY] ignoring affinity key field '{}' on type '{}'",
                affinity,
                self.display_name()
            );
        }

        self.fields.clear();
        let field_count = read_count(cur, "field count")?;
        for _ in 0..field_count {
            self.set_field(BinaryField::read_from(cur)?);
        }

        self.is_enum = cur.read_bool()?;
        self.enum_values.clear();
        if self.is_enum {
            let value_count = read_count(cur, "enum value count")?;
            for _ in 0..value_count {
                let name = cur.read_string()?;
                let ordinal = cur.read_i32_le()?;
                self.enum_values.push((name, ordinal));
            }
        }

        self.schemas.clear();
        let schema_count = read_count(cur, "schema count")?;
        for _ in 0..schema_count {
            self.add_schema(Arc::new(BinarySchema::read_from(cur)?));
        }
        Ok(())
    }
}

fn count_i32(len: usize, what: &str) -> WireResult<i32> {
    i32::try_from(len).map_err(|_| WireError::InvalidData {
        reason: format!("{} exceeds i32", what),
    })
}

fn read_count(cur: &mut Cursor<'_>, what: &str) -> WireResult<usize> {
    let count = cur.read_i32_le()?;
    usize::try_from(count).map_err(|_| WireError::InvalidData {
        reason: format!("negative {} {}", what, count),
    })
}
