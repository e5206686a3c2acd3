// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities consumed by handlers and systems.
//!
//! The host owns the world: blocks, entity storage, inventories and item
//! drops. Planning code only ever sees `&H`; every mutation goes through a
//! [`CommandBuffer`](crate::CommandBuffer) applied with `&mut H`, except
//! [`BlockAccess::ensure_block_entity`], which runs before planning.

use planter_geometry::{Facing, Vec3};

use crate::payload::{DisplayPayload, DisplaySpawn};
use crate::record::AttachmentRecord;
use crate::types::{BlockPos, DisplayId, InventorySlot, ItemInfo, ItemStack};

/// Block and chunk lookup.
pub trait BlockAccess {
    /// True if the chunk containing `pos` is loaded.
    fn is_loaded(&self, pos: BlockPos) -> bool;

    /// Type id of the block at `pos`, or `None` for air or an unloaded chunk.
    fn block_type(&self, pos: BlockPos) -> Option<&str>;

    /// Stored rotation of the block at `pos`. Absent blocks face index 0.
    fn facing(&self, pos: BlockPos) -> Facing;

    /// Make sure the block at `pos` has an entity able to hold a record.
    ///
    /// Returns false if the host cannot create one.
    fn ensure_block_entity(&mut self, pos: BlockPos) -> bool;
}

/// Item metadata lookup.
pub trait ItemCatalog {
    /// Metadata for `item_id`, or `None` for an unknown item.
    fn item_info(&self, item_id: &str) -> Option<&ItemInfo>;
}

/// Keyed storage for attachment records and display objects.
pub trait AttachmentStore {
    /// Record of the anchor at `anchor`. `None` means nothing was ever attached.
    fn record(&self, anchor: BlockPos) -> Option<&AttachmentRecord>;

    /// Store the record of the anchor at `anchor`, creating it if absent.
    fn put_record(&mut self, anchor: BlockPos, record: AttachmentRecord);

    /// Payload of a live display, or `None` if `id` does not resolve.
    fn display(&self, id: DisplayId) -> Option<&DisplayPayload>;

    /// Identifiers of every live display.
    fn display_ids(&self) -> Vec<DisplayId>;

    /// Create a display. Returns false if the host rejected it.
    fn spawn_display(&mut self, spawn: DisplaySpawn) -> bool;

    /// Destroy a display. Returns false if `id` did not resolve.
    fn despawn_display(&mut self, id: DisplayId) -> bool;
}

/// Actor inventory transactions.
pub trait Inventory {
    /// Remove `quantity` of `item` from `slot`. Returns false if that is not possible.
    fn remove_from_slot(&mut self, slot: InventorySlot, item: &ItemStack, quantity: u32) -> bool;
}

/// A loose item spawned into the world.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemDrop {
    /// World position.
    pub position: Vec3,
    /// Initial velocity.
    pub velocity: Vec3,
    /// Dropped items.
    pub item: ItemStack,
    /// Seconds before actors may pick it up. `None` leaves the host default.
    pub pickup_delay: Option<f32>,
}

/// World side effects.
pub trait WorldEffects {
    /// Spawn a loose item.
    fn spawn_item_drop(&mut self, drop: ItemDrop);

    /// Notify neighbors of `pos` that it changed.
    fn block_update(&mut self, pos: BlockPos);
}

/// Every capability at once.
pub trait Host: BlockAccess + ItemCatalog + AttachmentStore + Inventory + WorldEffects {}

impl<T> Host for T where T: ?Sized + BlockAccess + ItemCatalog + AttachmentStore + Inventory + WorldEffects {}
