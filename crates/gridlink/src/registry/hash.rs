// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! Identifier hashing for the grid binary protocol.
//!
//! Both hashes here are wire contracts shared with every other client
//! implementation. They must match byte-for-byte:
//!
//! - **Name hash**: type ids and field ids are the host protocol's 32-bit
//!   polynomial string hash (`acc = acc * 31 + unit`, truncated to 32 bits)
//!   over the lowercased name.
//! - **Schema fold**: schema ids are an FNV-1 variant folded per byte over
//!   the member field ids, least-significant byte first, in field insertion
//!   order. The fold is order-sensitive by protocol definition; never sort
//!   or canonicalize the ids before folding.

/// FNV-1 32-bit offset basis (initial schema id of an empty schema).
pub const FNV1_OFFSET_BASIS: u32 = 0x811C_9DC5;

/// FNV-1 32-bit prime.
pub const FNV1_PRIME: u32 = 0x0100_0193;

/// Compute the identifier for a type or field name.
///
/// Lowercases the name, then folds its UTF-16 code units with the
/// protocol's polynomial hash. UTF-16 units (not Unicode scalars) keep
/// supplementary-plane characters hashing exactly as reference clients do.
pub fn name_id(name: &str) -> i32 {
    let mut acc: i32 = 0;
    for unit in name.to_lowercase().encode_utf16() {
        acc = acc.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    acc
}

/// Fold one field id into a running schema hash.
///
/// Processes the four bytes of `field_id` from least-significant to
/// most-significant; for each byte `b`: `h ^= b; h *= FNV1_PRIME` (low 32
/// bits only).
pub fn fold_field_id(h: u32, field_id: i32) -> u32 {
    let mut h = h;
    for b in field_id.to_le_bytes() {
        h ^= u32::from(b);
        h = h.wrapping_mul(FNV1_PRIME);
    }
    h
}

/// Compute a schema id from scratch over `field_ids` in slice order.
pub fn schema_id(field_ids: &[i32]) -> i32 {
    let mut h = FNV1_OFFSET_BASIS;
    for &id in field_ids {
        h = fold_field_id(h, id);
    }
    h as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    // Golden vectors shared with reference client implementations.
    const NAME_ID: i32 = 3373707;
    const AGE_ID: i32 = 96511;
    const PERSON_ID: i32 = -991716523;

    #[test]
    fn test_name_id_golden_vectors() {
        assert_eq!(name_id("name"), NAME_ID);
        assert_eq!(name_id("age"), AGE_ID);
        assert_eq!(name_id("person"), PERSON_ID);
        assert_eq!(name_id("id"), 3355);
        assert_eq!(name_id("salary"), -909719094);
    }

    #[test]
    fn test_name_id_is_case_insensitive() {
        assert_eq!(name_id("Person"), name_id("person"));
        assert_eq!(name_id("NAME"), name_id("name"));
        assert_eq!(name_id("AgE"), name_id("age"));
    }

    #[test]
    fn test_name_id_empty() {
        assert_eq!(name_id(""), 0);
    }

    #[test]
    fn test_schema_id_golden_vectors() {
        assert_eq!(schema_id(&[]), FNV1_OFFSET_BASIS as i32);
        assert_eq!(schema_id(&[NAME_ID]), 1975878747);
        assert_eq!(schema_id(&[NAME_ID, AGE_ID]), 1946200325);
    }

    #[test]
    fn test_schema_fold_is_order_sensitive() {
        // Same field set, different insertion order, different identifier.
        // This is a protocol-level behavior; do not canonicalize.
        assert_eq!(schema_id(&[AGE_ID, NAME_ID]), -137293259);
        assert_ne!(schema_id(&[NAME_ID, AGE_ID]), schema_id(&[AGE_ID, NAME_ID]));
    }

    #[test]
    fn test_incremental_fold_matches_batch() {
        let ids: Vec<i32> = (0..32).map(|_| fastrand::i32(..)).collect();
        let mut h = FNV1_OFFSET_BASIS;
        for &id in &ids {
            h = fold_field_id(h, id);
        }
        assert_eq!(h as i32, schema_id(&ids));
    }
}
