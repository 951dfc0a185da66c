// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 gridlink.dev

//! Schemas: concrete field layouts of a binary type.

use super::hash;
use crate::wire::{Cursor, CursorMut, WireError, WireResult};

/// One concrete field layout ("shape") instances of a type may carry.
///
/// A schema is a shape token: it names which subset of a type's fields a
/// particular wire-encoded instance actually carries, not a full type
/// description. Its identifier is an order-sensitive FNV-1 fold over the
/// member field ids (see [`hash`]); it is computed, never assigned.
///
/// The id is maintained incrementally for the common monotonic-append
/// case. Removing a field invalidates the cached id (the fold cannot be
/// decremented), so it is recomputed from scratch on [`finalize`].
///
/// [`finalize`]: BinarySchema::finalize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySchema {
    id: i32,
    field_ids: Vec<i32>,
    valid: bool,
}

impl BinarySchema {
    /// Create an empty schema; its id starts at the FNV-1 offset basis.
    pub fn new() -> Self {
        Self {
            id: hash::FNV1_OFFSET_BASIS as i32,
            field_ids: Vec::new(),
            valid: true,
        }
    }

    /// Current schema identifier.
    ///
    /// Recomputes on the fly when the cached id is stale; [`finalize`]
    /// locks the recomputed value back in.
    ///
    /// [`finalize`]: BinarySchema::finalize
    pub fn schema_id(&self) -> i32 {
        if self.valid {
            self.id
        } else {
            hash::schema_id(&self.field_ids)
        }
    }

    /// Member field ids in insertion order.
    pub fn field_ids(&self) -> &[i32] {
        &self.field_ids
    }

    pub fn field_count(&self) -> usize {
        self.field_ids.len()
    }

    pub fn has_field(&self, field_id: i32) -> bool {
        self.field_ids.contains(&field_id)
    }

    /// Whether the cached id reflects the current member set.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Insert a field id; no-op when already present.
    ///
    /// Folds the id into the running hash immediately while the cached id
    /// is current, keeping finalize free for append-only construction.
    pub fn add_field(&mut self, field_id: i32) {
        if self.field_ids.contains(&field_id) {
            return;
        }
        self.field_ids.push(field_id);
        if self.valid {
            self.id = hash::fold_field_id(self.id as u32, field_id) as i32;
        }
    }

    /// Remove a field id; no-op when absent. Invalidates the cached id.
    pub fn remove_field(&mut self, field_id: i32) {
        if let Some(pos) = self.field_ids.iter().position(|&id| id == field_id) {
            self.field_ids.remove(pos);
            self.valid = false;
        }
    }

    /// Lock in the schema identifier.
    ///
    /// No-op while the cached id is current; otherwise recomputes from the
    /// offset basis over the surviving field ids in insertion order.
    pub fn finalize(&mut self) {
        if !self.valid {
            self.id = hash::schema_id(&self.field_ids);
            self.valid = true;
        }
    }

    /// Encoded size on the wire.
    pub fn wire_size(&self) -> usize {
        4 + 4 + 4 * self.field_ids.len()
    }

    /// Encode: schema id, field count, then each field id, insertion order.
    pub fn write_to(&self, cur: &mut CursorMut<'_>) -> WireResult<()> {
        cur.write_i32_le(self.schema_id())?;
        let count = i32::try_from(self.field_ids.len()).map_err(|_| WireError::InvalidData {
            reason: "schema field count exceeds i32".into(),
        })?;
        cur.write_i32_le(count)?;
        for &field_id in &self.field_ids {
            cur.write_i32_le(field_id)?;
        }
        Ok(())
    }

    /// Decode a schema; the read id is trusted and the order preserved.
    pub fn read_from(cur: &mut Cursor<'_>) -> WireResult<Self> {
        let id = cur.read_i32_le()?;
        let count = cur.read_i32_le()?;
        let count = usize::try_from(count).map_err(|_| WireError::InvalidData {
            reason: format!("negative schema field count {}", count),
        })?;
        let mut field_ids = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            field_ids.push(cur.read_i32_le()?);
        }
        Ok(Self {
            id,
            field_ids,
            valid: true,
        })
    }
}

impl Default for BinarySchema {
    fn default() -> Self {
        Self::new()
    }
}
