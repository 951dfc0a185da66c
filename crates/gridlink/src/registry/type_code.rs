// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! Wire type codes for binary object field values.
//!
//! A `TypeCode` names the wire representation of one field value. Field
//! descriptors carry it as a 4-byte integer; two definitions of the same
//! field disagreeing on the code is a schema conflict, never silently
//! resolved.

/// Wire representation code for a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TypeCode {
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    Char = 7,
    Bool = 8,
    String = 9,
    Uuid = 10,
    Date = 11,
    ByteArray = 12,
    ShortArray = 13,
    IntArray = 14,
    LongArray = 15,
    FloatArray = 16,
    DoubleArray = 17,
    CharArray = 18,
    BoolArray = 19,
    StringArray = 20,
    UuidArray = 21,
    DateArray = 22,
    ObjectArray = 23,
    Collection = 24,
    Map = 25,
    Enum = 28,
    Decimal = 30,
    Timestamp = 33,
    Time = 36,
    Null = 101,
    /// A nested complex object described by its own [`super::BinaryType`].
    ComplexObject = 103,
}

impl TypeCode {
    /// Canonical i32 wire representation (avoids unchecked casts).
    pub const fn to_i32(self) -> i32 {
        match self {
            TypeCode::Byte => 1,
            TypeCode::Short => 2,
            TypeCode::Int => 3,
            TypeCode::Long => 4,
            TypeCode::Float => 5,
            TypeCode::Double => 6,
            TypeCode::Char => 7,
            TypeCode::Bool => 8,
            TypeCode::String => 9,
            TypeCode::Uuid => 10,
            TypeCode::Date => 11,
            TypeCode::ByteArray => 12,
            TypeCode::ShortArray => 13,
            TypeCode::IntArray => 14,
            TypeCode::LongArray => 15,
            TypeCode::FloatArray => 16,
            TypeCode::DoubleArray => 17,
            TypeCode::CharArray => 18,
            TypeCode::BoolArray => 19,
            TypeCode::StringArray => 20,
            TypeCode::UuidArray => 21,
            TypeCode::DateArray => 22,
            TypeCode::ObjectArray => 23,
            TypeCode::Collection => 24,
            TypeCode::Map => 25,
            TypeCode::Enum => 28,
            TypeCode::Decimal => 30,
            TypeCode::Timestamp => 33,
            TypeCode::Time => 36,
            TypeCode::Null => 101,
            TypeCode::ComplexObject => 103,
        }
    }

    /// Convert from the i32 wire discriminator.
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(TypeCode::Byte),
            2 => Some(TypeCode::Short),
            3 => Some(TypeCode::Int),
            4 => Some(TypeCode::Long),
            5 => Some(TypeCode::Float),
            6 => Some(TypeCode::Double),
            7 => Some(TypeCode::Char),
            8 => Some(TypeCode::Bool),
            9 => Some(TypeCode::String),
            10 => Some(TypeCode::Uuid),
            11 => Some(TypeCode::Date),
            12 => Some(TypeCode::ByteArray),
            13 => Some(TypeCode::ShortArray),
            14 => Some(TypeCode::IntArray),
            15 => Some(TypeCode::LongArray),
            16 => Some(TypeCode::FloatArray),
            17 => Some(TypeCode::DoubleArray),
            18 => Some(TypeCode::CharArray),
            19 => Some(TypeCode::BoolArray),
            20 => Some(TypeCode::StringArray),
            21 => Some(TypeCode::UuidArray),
            22 => Some(TypeCode::DateArray),
            23 => Some(TypeCode::ObjectArray),
            24 => Some(TypeCode::Collection),
            25 => Some(TypeCode::Map),
            28 => Some(TypeCode::Enum),
            30 => Some(TypeCode::Decimal),
            33 => Some(TypeCode::Timestamp),
            36 => Some(TypeCode::Time),
            101 => Some(TypeCode::Null),
            103 => Some(TypeCode::ComplexObject),
            _ => None,
        }
    }

    /// Returns true for scalar primitive representations.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            TypeCode::Byte
                | TypeCode::Short
                | TypeCode::Int
                | TypeCode::Long
                | TypeCode::Float
                | TypeCode::Double
                | TypeCode::Char
                | TypeCode::Bool
        )
    }

    /// Returns true for array representations.
    pub const fn is_array(self) -> bool {
        matches!(
            self,
            TypeCode::ByteArray
                | TypeCode::ShortArray
                | TypeCode::IntArray
                | TypeCode::LongArray
                | TypeCode::FloatArray
                | TypeCode::DoubleArray
                | TypeCode::CharArray
                | TypeCode::BoolArray
                | TypeCode::StringArray
                | TypeCode::UuidArray
                | TypeCode::DateArray
                | TypeCode::ObjectArray
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_code_repr() {
        assert_eq!(TypeCode::Byte.to_i32(), 1);
        assert_eq!(TypeCode::String.to_i32(), 9);
        assert_eq!(TypeCode::ComplexObject.to_i32(), 103);
    }

    #[test]
    fn test_type_code_from_i32() {
        assert_eq!(TypeCode::from_i32(3), Some(TypeCode::Int));
        assert_eq!(TypeCode::from_i32(101), Some(TypeCode::Null));
        assert_eq!(TypeCode::from_i32(0), None);
        assert_eq!(TypeCode::from_i32(999), None);
    }

    #[test]
    fn test_type_code_roundtrip_all() {
        for value in 0..256 {
            if let Some(code) = TypeCode::from_i32(value) {
                assert_eq!(code.to_i32(), value);
            }
        }
    }

    #[test]
    fn test_type_code_classification() {
        assert!(TypeCode::Int.is_primitive());
        assert!(!TypeCode::String.is_primitive());
        assert!(TypeCode::IntArray.is_array());
        assert!(!TypeCode::Map.is_array());
    }
}
