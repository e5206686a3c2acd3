// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The attachment record: ordered display identifiers owned by one anchor.

use core::fmt;

use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::types::DisplayId;

/// Ordered list of display identifiers attached to an anchor.
///
/// Slot `i` of the record is the display standing in geometry slot `i`. The
/// record never holds duplicates. It does not know its own capacity; callers
/// pass the anchor's capacity to [`AttachmentRecord::try_push`] and the
/// reconciler clamps whole lists before [`AttachmentRecord::replace`].
///
/// ## Persistence
///
/// Serialized as a plain sequence of UUIDs. Deserialization skips `null`
/// entries, which older saves may contain where a spawn failed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttachmentRecord {
    slots: Vec<DisplayId>,
}

impl AttachmentRecord {
    /// An empty record.
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Build a record from identifiers in slot order, dropping repeats.
    pub fn from_slots(ids: impl IntoIterator<Item = DisplayId>) -> Self {
        let mut rec = Self::new();
        rec.replace(ids);
        rec
    }

    /// Identifiers in slot order.
    pub fn slots(&self) -> &[DisplayId] {
        &self.slots
    }

    /// Number of attached displays.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True if at least one display is attached.
    pub fn has_attached(&self) -> bool {
        !self.is_empty()
    }

    /// True if `id` is attached.
    pub fn contains(&self, id: DisplayId) -> bool {
        self.slots.contains(&id)
    }

    /// Empty the list. The record itself stays.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Replace the whole list, keeping the first occurrence of each id.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = DisplayId>) {
        self.slots.clear();
        for id in ids {
            if !self.slots.contains(&id) {
                self.slots.push(id);
            }
        }
    }

    /// Append `id` if there is room under `capacity` and it is not already present.
    ///
    /// Returns false when the record is full or already holds `id`.
    pub fn try_push(&mut self, id: DisplayId, capacity: usize) -> bool {
        if self.slots.len() >= capacity || self.slots.contains(&id) {
            return false;
        }
        self.slots.push(id);
        true
    }
}

impl<'de> Deserialize<'de> for AttachmentRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SlotsVisitor;

        impl<'de> Visitor<'de> for SlotsVisitor {
            type Value = AttachmentRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence of display UUIDs")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut ids = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(entry) = seq.next_element::<Option<Uuid>>()? {
                    if let Some(uuid) = entry {
                        ids.push(DisplayId::from_uuid(uuid));
                    }
                }
                Ok(AttachmentRecord::from_slots(ids))
            }
        }

        deserializer.deserialize_seq(SlotsVisitor)
    }
}
