// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! Read/write cursors for grid wire-protocol buffers.
//!
//! All multi-byte integers are little-endian, matching the rest of the host
//! protocol. Strings are `[len: i32][utf8 bytes]`; nullable strings carry a
//! one-byte presence flag first.

use super::{WireError, WireResult};

/// Generate write methods for fixed-width primitives.
///
/// Each generated method:
/// 1. Checks buffer bounds (returns `WireError::WriteFailed` on overflow)
/// 2. Converts the value to little-endian bytes via `to_le_bytes()`
/// 3. Copies bytes to the buffer and advances the offset
macro_rules! impl_write_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self, value: $type) -> WireResult<()> {
            if self.offset + $size > self.buffer.len() {
                return Err(WireError::WriteFailed {
                    offset: self.offset,
                    reason: "buffer too small".into(),
                });
            }
            let bytes = value.to_le_bytes();
            self.buffer[self.offset..self.offset + $size].copy_from_slice(&bytes);
            self.offset += $size;
            Ok(())
        }
    };
}

/// Generate read methods for fixed-width primitives.
///
/// Each generated method:
/// 1. Checks buffer bounds (returns `WireError::ReadFailed` on overflow)
/// 2. Reads N bytes and converts via `from_le_bytes()`
/// 3. Advances the offset
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> WireResult<$type> {
            if self.offset + $size > self.buffer.len() {
                return Err(WireError::ReadFailed {
                    offset: self.offset,
                    reason: "unexpected end of buffer".into(),
                });
            }
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(&self.buffer[self.offset..self.offset + $size]);
            self.offset += $size;
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Encoded size of a `[len: i32][utf8]` string.
pub fn str_size(value: &str) -> usize {
    4 + value.len()
}

/// Encoded size of a nullable string (presence flag byte, then the string).
pub fn nullable_str_size(value: Option<&str>) -> usize {
    1 + value.map_or(0, str_size)
}

/// Mutable cursor for writing (bounds-checked, zero-copy)
pub struct CursorMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> CursorMut<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_write_le!(write_u8, u8, 1);
    impl_write_le!(write_i32_le, i32, 4);

    /// Write a boolean as a single byte (0 or 1).
    pub fn write_bool(&mut self, value: bool) -> WireResult<()> {
        self.write_u8(u8::from(value))
    }

    /// Write a `[len: i32][utf8 bytes]` string.
    pub fn write_str(&mut self, value: &str) -> WireResult<()> {
        let len = i32::try_from(value.len()).map_err(|_| WireError::WriteFailed {
            offset: self.offset,
            reason: "string exceeds i32 length".into(),
        })?;
        self.write_i32_le(len)?;
        self.write_bytes(value.as_bytes())
    }

    /// Write a nullable string: presence flag byte, then the string if present.
    pub fn write_nullable_str(&mut self, value: Option<&str>) -> WireResult<()> {
        match value {
            Some(s) => {
                self.write_u8(1)?;
                self.write_str(s)
            }
            None => self.write_u8(0),
        }
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> WireResult<()> {
        if self.offset + data.len() > self.buffer.len() {
            return Err(WireError::WriteFailed {
                offset: self.offset,
                reason: "buffer too small".into(),
            });
        }
        self.buffer[self.offset..self.offset + data.len()].copy_from_slice(data);
        self.offset += data.len();
        Ok(())
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }
}

/// Immutable cursor for reading (bounds-checked, zero-copy)
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_i32_le, i32, 4);

    /// Read a boolean byte; anything other than 0 or 1 is invalid data.
    pub fn read_bool(&mut self) -> WireResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(WireError::InvalidData {
                reason: format!("boolean byte must be 0 or 1, got {}", other),
            }),
        }
    }

    /// Read a `[len: i32][utf8 bytes]` string.
    pub fn read_string(&mut self) -> WireResult<String> {
        let len = self.read_i32_le()?;
        let len = usize::try_from(len).map_err(|_| WireError::InvalidData {
            reason: format!("negative string length {}", len),
        })?;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|e| WireError::InvalidData {
            reason: format!("string is not valid UTF-8: {}", e),
        })
    }

    /// Read a nullable string: presence flag byte, then the string if present.
    pub fn read_nullable_string(&mut self) -> WireResult<Option<String>> {
        match self.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(self.read_string()?)),
            other => Err(WireError::InvalidData {
                reason: format!("presence flag must be 0 or 1, got {}", other),
            }),
        }
    }

    pub fn read_bytes(&mut self, len: usize) -> WireResult<&'a [u8]> {
        if self.offset + len > self.buffer.len() {
            return Err(WireError::ReadFailed {
                offset: self.offset,
                reason: "unexpected end of buffer".into(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}
