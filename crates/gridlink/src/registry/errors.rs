// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! Error types for the binary type registry.
//!
//! Defines `RegistryError` for failures during type definition merges and
//! builder lifecycle operations. Codec-level failures surface as
//! [`WireError`] wrapped in `RegistryError::Wire`.

use crate::wire::WireError;
use std::fmt;

/// Registry failure modes.
#[derive(Debug)]
pub enum RegistryError {
    /// Two type definitions agree on a field's identifier but disagree on
    /// its wire type code (or enum literal ordinal). Never silently
    /// resolved; the in-flight operation must abort.
    SchemaConflict {
        /// Name of the type being merged.
        type_name: String,
        /// Field (or enum literal) that triggered the conflict.
        field_name: String,
    },
    /// A builder was opened with an explicit schema identifier the stored
    /// type does not carry.
    SchemaNotFound {
        /// Type identifier the lookup ran against.
        type_id: i32,
        /// Requested schema identifier.
        schema_id: i32,
    },
    /// Underlying wire read/write failure.
    Wire(WireError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::SchemaConflict {
                type_name,
                field_name,
            } => write!(
                f,
                "schema conflict on type '{}': field '{}' has incompatible definitions",
                type_name, field_name
            ),
            RegistryError::SchemaNotFound { type_id, schema_id } => write!(
                f,
                "schema {} not found for type {}",
                schema_id, type_id
            ),
            RegistryError::Wire(e) => write!(f, "wire error: {}", e),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Wire(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WireError> for RegistryError {
    fn from(value: WireError) -> Self {
        Self::Wire(value)
    }
}

/// Convenient alias for registry results.
pub type RegistryResult<T> = core::result::Result<T, RegistryError>;
