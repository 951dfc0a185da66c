// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! Copy-on-write builder sessions for type/schema construction.

use super::binary_type::BinaryType;
use super::errors::{RegistryError, RegistryResult};
use super::field::BinaryField;
use super::hash;
use super::schema::BinarySchema;
use super::store::TypeStore;
use super::type_code::TypeCode;
use std::sync::Arc;

/// One field of a runtime object shape.
#[derive(Debug, Clone)]
pub struct ShapeField {
    /// Field name as it appears on the object.
    pub name: String,
    /// Explicitly declared wire type code, when the shape carries one.
    /// Absent means the code is inferred from the live value.
    pub declared: Option<TypeCode>,
}

impl ShapeField {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            declared: None,
        }
    }

    pub fn declared(name: &str, code: TypeCode) -> Self {
        Self {
            name: name.to_string(),
            declared: Some(code),
        }
    }
}

/// Capability describing a runtime object's shape.
///
/// The registry never reflects over live objects itself; a caller-defined
/// adapter supplies the ordered field names (with optional declared
/// types), the type name, and an opaque cache key under which the derived
/// (type, schema) pair is memoized for future instances of the same shape.
pub trait ObjectShape {
    /// Complex type name the shape maps to.
    fn type_name(&self) -> &str;

    /// Store key for the template association; defaults to the type name.
    fn cache_key(&self) -> &str {
        self.type_name()
    }

    /// Fields in declaration order.
    fn fields(&self) -> &[ShapeField];
}

/// Mutable session constructing or evolving a (type, schema) pair.
///
/// A builder either exclusively owns its type/schema or aliases instances
/// shared from a [`TypeStore`]. The first mutating call on an aliasing
/// builder materializes exclusive deep copies (the `owns_copy` transition
/// happens at most once); the store's values are never touched in place.
/// [`finalize`] does not force the transition when nothing mutated.
///
/// [`finalize`]: BinaryTypeBuilder::finalize
#[derive(Debug)]
pub struct BinaryTypeBuilder {
    ty: Arc<BinaryType>,
    schema: Arc<BinarySchema>,
    owns_copy: bool,
}

impl BinaryTypeBuilder {
    /// Open a session for a type with no prior knowledge: fresh type under
    /// the given name, fresh empty schema.
    pub fn from_name(name: &str) -> Self {
        Self {
            ty: Arc::new(BinaryType::new(name)),
            schema: Arc::new(BinarySchema::new()),
            owns_copy: true,
        }
    }

    /// Open a session for a known type id, consulting the store.
    ///
    /// A stored type is aliased. With an explicit schema id the exact
    /// schema must exist on it ([`RegistryError::SchemaNotFound`]
    /// otherwise); without one the session starts a fresh layout against
    /// the aliased type. An unknown type id yields a placeholder type
    /// whose name is learned later.
    pub fn from_type_id(
        store: &dyn TypeStore,
        type_id: i32,
        schema_id: Option<i32>,
    ) -> RegistryResult<Self> {
        match store.get_type(type_id) {
            Some(ty) => {
                let schema = match schema_id {
                    Some(sid) => ty
                        .schema(sid)
                        .ok_or(RegistryError::SchemaNotFound {
                            type_id,
                            schema_id: sid,
                        })?,
                    None => Arc::new(BinarySchema::new()),
                };
                Ok(Self {
                    ty,
                    schema,
                    owns_copy: false,
                })
            }
            None => Ok(Self {
                ty: Arc::new(BinaryType::unresolved(type_id)),
                schema: Arc::new(BinarySchema::new()),
                owns_copy: true,
            }),
        }
    }

    /// Open a session for a runtime object shape.
    ///
    /// A template hit in the store aliases the cached pair. On a miss the
    /// type is derived field by field - an explicitly declared type code
    /// wins, otherwise `infer` maps the live value to one - and the
    /// derived pair is cached against the template key for future
    /// instances of the same shape.
    pub fn from_shape<F>(store: &dyn TypeStore, shape: &dyn ObjectShape, infer: F) -> Self
    where
        F: Fn(&str) -> TypeCode,
    {
        if let Some((ty, schema)) = store.get_by_template(shape.cache_key()) {
            return Self {
                ty,
                schema,
                owns_copy: false,
            };
        }

        let mut builder = Self::from_name(shape.type_name());
        for field in shape.fields() {
            let code = field.declared.unwrap_or_else(|| infer(&field.name));
            builder.set_field(&field.name, code);
        }

        store.set_by_template(
            shape.cache_key(),
            Arc::clone(&builder.ty),
            Arc::clone(&builder.schema),
        );
        // The cached pair is now the shared source of truth; this session
        // aliases it like any other and copies on its next write.
        builder.owns_copy = false;
        builder
    }

    /// The type under construction.
    pub fn binary_type(&self) -> &Arc<BinaryType> {
        &self.ty
    }

    /// The schema under construction.
    pub fn schema(&self) -> &Arc<BinarySchema> {
        &self.schema
    }

    pub fn type_id(&self) -> i32 {
        self.ty.type_id()
    }

    pub fn schema_id(&self) -> i32 {
        self.schema.schema_id()
    }

    /// Record a field on the type and the current layout.
    ///
    /// Idempotent when the field already exists on both with the same type
    /// code; only a real change triggers the copy-on-write transition. A
    /// differing type code installs a replacement descriptor (descriptors
    /// themselves are immutable).
    pub fn set_field(&mut self, name: &str, type_code: TypeCode) {
        let field_id = hash::name_id(name);
        let unchanged = self.schema.has_field(field_id)
            && self.ty.field(field_id).map(BinaryField::type_code) == Some(type_code);
        if unchanged {
            return;
        }
        self.materialize();
        Arc::make_mut(&mut self.ty).set_field(BinaryField::new(name, type_code));
        Arc::make_mut(&mut self.schema).add_field(field_id);
    }

    /// Remove a field from the type and the current layout.
    pub fn remove_field(&mut self, name: &str) {
        let field_id = hash::name_id(name);
        if !self.ty.has_field(field_id) {
            return;
        }
        self.materialize();
        Arc::make_mut(&mut self.ty).remove_field(field_id);
        Arc::make_mut(&mut self.schema).remove_field(field_id);
    }

    /// Finalize the schema identifier and commit the pair into the store.
    ///
    /// The store merges against any existing definition for this type id
    /// and indexes the schema under it; the committed pair is returned.
    pub fn finalize(
        mut self,
        store: &dyn TypeStore,
    ) -> RegistryResult<(Arc<BinaryType>, Arc<BinarySchema>)> {
        if !self.schema.is_valid() {
            // Only reachable after a removal, which already materialized.
            Arc::make_mut(&mut self.schema).finalize();
        }
        store.add_type(&self.ty, &self.schema)
    }

    /// Materialize exclusive copies when still aliasing shared storage.
    fn materialize(&mut self) {
        if !self.owns_copy {
            log::trace!(
                "[REGISTRY] copy-on-write for type '{}'",
                self.ty.display_name()
            );
            self.ty = Arc::new(BinaryType::clone(&self.ty));
            self.schema = Arc::new(BinarySchema::clone(&self.schema));
            self.owns_copy = true;
        }
    }
}
