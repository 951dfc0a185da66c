// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! Field descriptors for binary object types.

use super::hash;
use super::type_code::TypeCode;
use crate::wire::{nullable_str_size, Cursor, CursorMut, WireError, WireResult};

/// Immutable descriptor of one named field of a complex type.
///
/// Carries the field name, its derived 32-bit identifier (hash of the
/// lowercased name, see [`hash::name_id`]), and the wire type code of the
/// field's value. A descriptor is created once and never mutated; on a
/// type-code change the builder installs a replacement descriptor instead.
///
/// Two descriptors with the same id but different type codes are a hard
/// conflict, surfaced by [`super::BinaryType::merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryField {
    name: Option<String>,
    id: i32,
    type_code: TypeCode,
}

impl BinaryField {
    /// Create a descriptor; the id is derived from the lowercased name.
    pub fn new(name: &str, type_code: TypeCode) -> Self {
        Self {
            id: hash::name_id(name),
            name: Some(name.to_string()),
            type_code,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn field_id(&self) -> i32 {
        self.id
    }

    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    /// A descriptor is valid iff its name is present.
    ///
    /// Decoding can produce a nameless descriptor; encode paths should
    /// check validity before transmitting.
    pub fn is_valid(&self) -> bool {
        self.name.is_some()
    }

    /// Encoded size on the wire.
    pub fn wire_size(&self) -> usize {
        nullable_str_size(self.name.as_deref()) + 4 + 4
    }

    /// Encode: nullable name, type code (i32), field id (i32), fixed order.
    pub fn write_to(&self, cur: &mut CursorMut<'_>) -> WireResult<()> {
        cur.write_nullable_str(self.name.as_deref())?;
        cur.write_i32_le(self.type_code.to_i32())?;
        cur.write_i32_le(self.id)
    }

    /// Decode the same three fields in the same order into a fresh descriptor.
    pub fn read_from(cur: &mut Cursor<'_>) -> WireResult<Self> {
        let name = cur.read_nullable_string()?;
        let raw_code = cur.read_i32_le()?;
        let type_code = TypeCode::from_i32(raw_code).ok_or_else(|| WireError::InvalidData {
            reason: format!("unknown field type code {}", raw_code),
        })?;
        let id = cur.read_i32_le()?;
        Ok(Self {
            name,
            id,
            type_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_id_is_case_insensitive_name_hash() {
        let lower = BinaryField::new("name", TypeCode::String);
        let upper = BinaryField::new("NAME", TypeCode::String);
        assert_eq!(lower.field_id(), upper.field_id());
        assert_eq!(lower.field_id(), hash::name_id("name"));
    }

    #[test]
    fn test_field_is_valid() {
        let field = BinaryField::new("age", TypeCode::Int);
        assert!(field.is_valid());
        assert_eq!(field.name(), Some("age"));
        assert_eq!(field.type_code(), TypeCode::Int);
    }

    #[test]
    fn test_field_codec_roundtrip() {
        let field = BinaryField::new("salary", TypeCode::Double);
        let mut buffer = vec![0u8; field.wire_size()];
        {
            let mut cur = CursorMut::new(&mut buffer);
            field.write_to(&mut cur).expect("Encode should succeed");
            assert_eq!(cur.offset(), field.wire_size());
        }

        let mut cur = Cursor::new(&buffer);
        let decoded = BinaryField::read_from(&mut cur).expect("Decode should succeed");
        assert_eq!(decoded, field);
        assert!(cur.is_eof());
    }

    #[test]
    fn test_field_decode_rejects_unknown_type_code() {
        let mut buffer = vec![0u8; 16];
        {
            let mut cur = CursorMut::new(&mut buffer);
            cur.write_nullable_str(Some("x"))
                .expect("Write should succeed");
            cur.write_i32_le(999).expect("Write should succeed");
            cur.write_i32_le(0).expect("Write should succeed");
        }
        let mut cur = Cursor::new(&buffer);
        assert!(matches!(
            BinaryField::read_from(&mut cur).unwrap_err(),
            WireError::InvalidData { .. }
        ));
    }

    #[test]
    fn test_field_decode_nameless_is_invalid() {
        let mut buffer = vec![0u8; 9];
        {
            let mut cur = CursorMut::new(&mut buffer);
            cur.write_nullable_str(None).expect("Write should succeed");
            cur.write_i32_le(TypeCode::Int.to_i32())
                .expect("Write should succeed");
            cur.write_i32_le(42).expect("Write should succeed");
        }
        let mut cur = Cursor::new(&buffer);
        let decoded = BinaryField::read_from(&mut cur).expect("Decode should succeed");
        assert!(!decoded.is_valid());
        assert_eq!(decoded.field_id(), 42);
    }
}
