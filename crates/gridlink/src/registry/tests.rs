// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! Registry integration tests: builder lifecycle, copy-on-write aliasing,
//! and template-driven derivation against a shared store.

use super::*;
use crate::wire::{Cursor, CursorMut};
use std::sync::Arc;

struct PersonShape {
    fields: Vec<ShapeField>,
}

impl PersonShape {
    fn new() -> Self {
        Self {
            fields: vec![
                ShapeField::declared("name", TypeCode::String),
                ShapeField::new("age"),
            ],
        }
    }
}

impl ObjectShape for PersonShape {
    fn type_name(&self) -> &str {
        "Person"
    }

    fn cache_key(&self) -> &str {
        "demo.Person"
    }

    fn fields(&self) -> &[ShapeField] {
        &self.fields
    }
}

fn infer_int(_field: &str) -> TypeCode {
    TypeCode::Int
}

#[test]
fn test_person_scenario_end_to_end() {
    let store = ClientTypeStore::new();

    let mut builder = BinaryTypeBuilder::from_name("Person");
    builder.set_field("name", TypeCode::String);
    builder.set_field("age", TypeCode::Int);

    let (ty, schema) = builder.finalize(&store).expect("Commit should succeed");

    assert_eq!(ty.type_id(), hash::name_id("person"));
    assert_eq!(schema.field_count(), 2);
    assert_eq!(
        schema.field_ids(),
        &[hash::name_id("name"), hash::name_id("age")]
    );
    assert_eq!(
        schema.schema_id(),
        hash::schema_id(&[hash::name_id("name"), hash::name_id("age")])
    );

    // Encode/decode reproduces field counts, ids, and type codes.
    let mut buffer = vec![0u8; ty.wire_size()];
    {
        let mut cur = CursorMut::new(&mut buffer);
        ty.write_to(&mut cur).expect("Encode should succeed");
    }
    let mut decoded = BinaryType::unresolved(0);
    let mut cur = Cursor::new(&buffer);
    decoded.read_from(&mut cur).expect("Decode should succeed");
    assert_eq!(decoded.field_count(), ty.field_count());
    for (original, roundtripped) in ty.fields().zip(decoded.fields()) {
        assert_eq!(original.field_id(), roundtripped.field_id());
        assert_eq!(original.type_code(), roundtripped.type_code());
    }
}

#[test]
fn test_person_removal_changes_schema_id() {
    let store = ClientTypeStore::new();

    let mut builder = BinaryTypeBuilder::from_name("Person");
    builder.set_field("name", TypeCode::String);
    builder.set_field("age", TypeCode::Int);
    let two_field_id = builder.schema_id();

    builder.remove_field("age");
    let (_, schema) = builder.finalize(&store).expect("Commit should succeed");

    assert_ne!(schema.schema_id(), two_field_id);
    // Equal to a schema that only ever had "name": the surviving fold
    // order is identical, so the recompute converges on the same id.
    assert_eq!(schema.schema_id(), hash::schema_id(&[hash::name_id("name")]));
}

#[test]
fn test_copy_on_write_between_two_sessions() {
    let store = ClientTypeStore::new();
    let type_id = {
        let mut seed = BinaryTypeBuilder::from_name("Account");
        seed.set_field("id", TypeCode::Long);
        let (ty, _) = seed.finalize(&store).expect("Commit should succeed");
        ty.type_id()
    };

    let mut first =
        BinaryTypeBuilder::from_type_id(&store, type_id, None).expect("Open should succeed");
    let second =
        BinaryTypeBuilder::from_type_id(&store, type_id, None).expect("Open should succeed");

    // Both sessions alias the same stored instance.
    assert!(Arc::ptr_eq(first.binary_type(), second.binary_type()));

    first.set_field("balance", TypeCode::Double);

    // The mutating session cloned away; the other still sees the store's copy.
    assert!(!Arc::ptr_eq(first.binary_type(), second.binary_type()));
    assert!(first.binary_type().has_field(hash::name_id("balance")));
    assert!(!second.binary_type().has_field(hash::name_id("balance")));
    assert!(!store
        .get_type(type_id)
        .expect("Type should be stored")
        .has_field(hash::name_id("balance")));
}

#[test]
fn test_from_type_id_with_schema_aliases_exact_layout() {
    let store = ClientTypeStore::new();
    let mut seed = BinaryTypeBuilder::from_name("Account");
    seed.set_field("id", TypeCode::Long);
    seed.set_field("balance", TypeCode::Double);
    let (ty, schema) = seed.finalize(&store).expect("Commit should succeed");

    let builder =
        BinaryTypeBuilder::from_type_id(&store, ty.type_id(), Some(schema.schema_id()))
            .expect("Open should succeed");
    assert!(Arc::ptr_eq(builder.schema(), &schema));
    assert_eq!(builder.schema_id(), schema.schema_id());
}

#[test]
fn test_placeholder_learns_definition_on_merge() {
    let store = ClientTypeStore::new();

    // Session opened against an id the store has never seen.
    let type_id = hash::name_id("invoice");
    let builder =
        BinaryTypeBuilder::from_type_id(&store, type_id, None).expect("Open should succeed");
    assert_eq!(builder.binary_type().name(), None);
    builder.finalize(&store).expect("Commit should succeed");

    // The real definition arrives later (e.g. from server metadata).
    let mut named = BinaryTypeBuilder::from_name("Invoice");
    named.set_field("total", TypeCode::Decimal);
    let (merged, _) = named.finalize(&store).expect("Commit should succeed");

    assert_eq!(merged.type_id(), type_id);
    assert_eq!(merged.name(), Some("Invoice"));
    assert!(merged.is_valid());
}

#[test]
fn test_from_shape_derives_and_caches_template() {
    let store = ClientTypeStore::new();
    let shape = PersonShape::new();

    let builder = BinaryTypeBuilder::from_shape(&store, &shape, infer_int);
    assert_eq!(builder.binary_type().name(), Some("Person"));
    // Declared code wins; the missing one came from inference.
    assert_eq!(
        builder
            .binary_type()
            .field(hash::name_id("name"))
            .expect("field should exist")
            .type_code(),
        TypeCode::String
    );
    assert_eq!(
        builder
            .binary_type()
            .field(hash::name_id("age"))
            .expect("field should exist")
            .type_code(),
        TypeCode::Int
    );

    // A second instance of the same shape aliases the cached pair.
    let again = BinaryTypeBuilder::from_shape(&store, &shape, infer_int);
    assert!(Arc::ptr_eq(builder.binary_type(), again.binary_type()));
    assert!(Arc::ptr_eq(builder.schema(), again.schema()));
}

#[test]
fn test_from_shape_mutation_does_not_corrupt_template_cache() {
    let store = ClientTypeStore::new();
    let shape = PersonShape::new();

    let mut builder = BinaryTypeBuilder::from_shape(&store, &shape, infer_int);
    builder.set_field("email", TypeCode::String);

    let (cached_ty, cached_schema) = store
        .get_by_template("demo.Person")
        .expect("Template should be cached");
    assert!(!cached_ty.has_field(hash::name_id("email")));
    assert!(!cached_schema.has_field(hash::name_id("email")));
    assert!(builder.binary_type().has_field(hash::name_id("email")));
}

#[test]
fn test_schema_evolution_accumulates_layouts() {
    let store = ClientTypeStore::new();

    let mut v1 = BinaryTypeBuilder::from_name("Order");
    v1.set_field("id", TypeCode::Long);
    let (_, schema_v1) = v1.finalize(&store).expect("Commit should succeed");

    let mut v2 = BinaryTypeBuilder::from_type_id(&store, hash::name_id("order"), None)
        .expect("Open should succeed");
    v2.set_field("id", TypeCode::Long);
    v2.set_field("total", TypeCode::Decimal);
    let (ty, schema_v2) = v2.finalize(&store).expect("Commit should succeed");

    assert_ne!(schema_v1.schema_id(), schema_v2.schema_id());
    assert_eq!(ty.schema_count(), 2);
    assert!(ty.has_schema(schema_v1.schema_id()));
    assert!(ty.has_schema(schema_v2.schema_id()));
    assert_eq!(ty.field_count(), 2);
}

#[test]
fn test_concurrent_commits_serialize_per_type() {
    use std::thread;

    let store = Arc::new(ClientTypeStore::new());
    let mut handles = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            let mut builder = BinaryTypeBuilder::from_name("Metric");
            builder.set_field("timestamp", TypeCode::Timestamp);
            builder.set_field(&format!("series_{}", i), TypeCode::Double);
            builder.finalize(store.as_ref()).map(|(ty, _)| ty.type_id())
        }));
    }
    for handle in handles {
        handle
            .join()
            .expect("Thread should not panic")
            .expect("Commit should succeed");
    }

    let ty = store
        .get_type(hash::name_id("metric"))
        .expect("Type should be stored");
    // timestamp + 8 distinct series fields, no lost updates.
    assert_eq!(ty.field_count(), 9);
    assert_eq!(ty.schema_count(), 8);
}
