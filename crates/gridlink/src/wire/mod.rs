// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! Wire-level primitives for the grid binary protocol.
//!
//! The registry codecs compose with the cursors defined here; the exact
//! encodings of integers, booleans, and nullable strings are owned by this
//! module, not by the type metadata layer.

pub mod cursor;

pub use cursor::{nullable_str_size, str_size, Cursor, CursorMut};

use std::fmt;

/// Wire-layer failure used by cursors and the registry codecs.
#[derive(Debug, Clone)]
pub enum WireError {
    WriteFailed { offset: usize, reason: String },
    ReadFailed { offset: usize, reason: String },
    InvalidData { reason: String },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::WriteFailed { offset, reason } => {
                write!(f, "write failed at offset {}: {}", offset, reason)
            }
            WireError::ReadFailed { offset, reason } => {
                write!(f, "read failed at offset {}: {}", offset, reason)
            }
            WireError::InvalidData { reason } => write!(f, "invalid data: {}", reason),
        }
    }
}

impl std::error::Error for WireError {}

/// Convenient alias for wire-layer results.
pub type WireResult<T> = core::result::Result<T, WireError>;
