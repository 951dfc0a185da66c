// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! # Gridlink - binary type registry for the grid wire protocol
//!
//! This crate implements the binary-object type and schema registry of the
//! gridlink thin client: how a user-defined (complex) object type is
//! described, fingerprinted, versioned, and encoded/decoded on the wire so
//! that client and server agree on field layout without a separate
//! schema-negotiation round trip.
//!
//! ## Quick Start
//!
//! ```rust
//! use gridlink::{BinaryTypeBuilder, ClientTypeStore, TypeCode, TypeStore};
//!
//! let store = ClientTypeStore::new();
//!
//! let mut builder = BinaryTypeBuilder::from_name("Person");
//! builder.set_field("name", TypeCode::String);
//! builder.set_field("age", TypeCode::Int);
//! let (ty, schema) = builder.finalize(&store).expect("commit should succeed");
//!
//! assert_eq!(schema.field_count(), 2);
//! assert!(store.get_type(ty.type_id()).is_some());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                      Builder sessions                        |
//! |  BinaryTypeBuilder (copy-on-write against the shared store)  |
//! +--------------------------------------------------------------+
//! |                       Type metadata                          |
//! |   BinaryType -> BinaryField catalogue + BinarySchema set     |
//! +--------------------------------------------------------------+
//! |                       Shared cache                           |
//! |   TypeStore (per-key serialized commit, merge on conflict)   |
//! +--------------------------------------------------------------+
//! |                        Wire layer                            |
//! |   Cursor / CursorMut (LE integers, bools, nullable strings)  |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BinaryType`] | Named complex type: field catalogue, schemas, enum metadata |
//! | [`BinarySchema`] | One concrete field layout, identified by an FNV-1 fold |
//! | [`BinaryField`] | Immutable (name, derived id, type code) descriptor |
//! | [`BinaryTypeBuilder`] | Mutation session with copy-on-write semantics |
//! | [`TypeStore`] | Shared cache of committed type/schema definitions |
//!
//! ## Identifier contract
//!
//! Type ids and field ids are the host protocol's 32-bit polynomial hash of
//! the lowercased name; schema ids are an order-sensitive FNV-1 fold over
//! field ids. Both must match reference clients byte-for-byte - see
//! [`registry::hash`].

/// Binary type, schema, and field metadata plus the builder lifecycle.
pub mod registry;
/// Wire-level buffer cursors consumed by the registry codecs.
pub mod wire;

pub use registry::{
    BinaryField, BinarySchema, BinaryType, BinaryTypeBuilder, ClientTypeStore, ObjectShape,
    RegistryError, RegistryResult, ShapeField, TypeCode, TypeStore,
};
pub use wire::{Cursor, CursorMut, WireError, WireResult};
