// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! Binary type/schema registry for the grid wire protocol.
//!
//! # Overview
//!
//! The registry models how a user-defined object type is described,
//! fingerprinted, and encoded on the wire:
//!
//! - **[`BinaryField`]**: immutable (name, derived id, type code) triple.
//! - **[`BinarySchema`]**: one concrete field layout, identified by an
//!   order-sensitive FNV-1 fold over its field ids.
//! - **[`BinaryType`]**: a named complex type - the union of all fields
//!   ever observed for the name, all known layouts, and optional enum
//!   metadata.
//! - **[`BinaryTypeBuilder`]**: a mutation session with copy-on-write
//!   semantics against the shared [`TypeStore`].
//!
//! # Lifecycle
//!
//! ```text
//! from_name / from_type_id / from_shape
//!        v
//! BinaryTypeBuilder  --set_field/remove_field-->  (copy-on-write)
//!        v finalize
//! TypeStore::add_type  --merge-->  committed (BinaryType, BinarySchema)
//! ```
//!
//! Builders opened from the store alias the stored instances until the
//! first mutation; the store's copies are never mutated in place, so a
//! definition shared from the cache cannot be corrupted by a session that
//! starts evolving it.

mod binary_type;
mod builder;
mod errors;
mod field;
/// Identifier hashing (name hash and schema fold wire contracts).
pub mod hash;
mod schema;
mod store;
mod type_code;

pub use binary_type::BinaryType;
pub use builder::{BinaryTypeBuilder, ObjectShape, ShapeField};
pub use errors::{RegistryError, RegistryResult};
pub use field::BinaryField;
pub use schema::BinarySchema;
pub use store::{ClientTypeStore, TypeStore};
pub use type_code::TypeCode;

#[cfg(test)]
mod tests;
