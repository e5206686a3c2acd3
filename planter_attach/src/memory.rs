// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host: a small world implementing every host trait.
//!
//! Blocks live in a map keyed by position, display objects in generational
//! slots. Useful for tests, demos and benchmarks, and as a model of what a
//! real host must provide.

use std::collections::{HashMap, HashSet};
use std::fmt;

use planter_geometry::Facing;
use rand::Rng;

use crate::commands::{CommandBuffer, TurnReport};
use crate::host::{AttachmentStore, BlockAccess, Inventory, ItemCatalog, ItemDrop, WorldEffects};
use crate::lifecycle::BreakCascade;
use crate::payload::{DisplayPayload, DisplaySpawn};
use crate::record::AttachmentRecord;
use crate::types::{BlockPos, DisplayId, InventorySlot, ItemInfo, ItemStack};

/// Side length of a chunk in blocks.
pub const CHUNK_SIZE: i32 = 32;

/// Handle of a display slot: index plus generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct EntityRef(u32, u32);

impl EntityRef {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Block {
    block_type: String,
    rotation: i32,
    has_entity: bool,
}

#[derive(Clone, Debug)]
struct Display {
    generation: u32,
    spawn: DisplaySpawn,
}

/// A self-contained world for driving handlers and systems.
#[derive(Default)]
pub struct MemoryWorld {
    blocks: HashMap<BlockPos, Block>,
    unloaded: HashSet<(i32, i32)>,
    entity_denied: HashSet<BlockPos>,
    items: HashMap<String, ItemInfo>,
    records: HashMap<BlockPos, AttachmentRecord>,
    displays: Vec<Option<Display>>, // slots
    generations: Vec<u32>,          // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    by_id: HashMap<DisplayId, EntityRef>,
    inventory: HashMap<InventorySlot, ItemStack>,
    drops: Vec<ItemDrop>,
    block_updates: Vec<BlockPos>,
    spawn_budget: Option<usize>,
}

impl fmt::Debug for MemoryWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryWorld")
            .field("blocks", &self.blocks.len())
            .field("records", &self.records.len())
            .field("displays_alive", &self.by_id.len())
            .field("free_list", &self.free_list.len())
            .field("drops", &self.drops.len())
            .field("spawn_budget", &self.spawn_budget)
            .finish_non_exhaustive()
    }
}

fn chunk_of(pos: BlockPos) -> (i32, i32) {
    (pos.x.div_euclid(CHUNK_SIZE), pos.z.div_euclid(CHUNK_SIZE))
}

impl MemoryWorld {
    /// An empty, fully loaded world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a block with a host rotation index.
    pub fn place_block(&mut self, pos: BlockPos, block_type: impl Into<String>, rotation: i32) {
        self.blocks.insert(
            pos,
            Block {
                block_type: block_type.into(),
                rotation,
                has_entity: false,
            },
        );
    }

    /// Remove a block without firing any event, as a bulk world edit would.
    ///
    /// The block's record goes with it. Displays stay behind.
    pub fn remove_block(&mut self, pos: BlockPos) {
        self.blocks.remove(&pos);
        self.records.remove(&pos);
    }

    /// Break a block through the explicit destruction path.
    ///
    /// Runs `cascade` against the intact block, applies the result, then
    /// removes the block.
    pub fn break_block<R: Rng + ?Sized>(
        &mut self,
        pos: BlockPos,
        cascade: &BreakCascade,
        rng: &mut R,
    ) -> TurnReport {
        let mut commands = CommandBuffer::new();
        cascade.on_block_broken(&*self, pos, rng, &mut commands);
        let report = commands.apply(self);
        self.remove_block(pos);
        report
    }

    /// True if the block at `pos` has been given a block entity.
    pub fn has_block_entity(&self, pos: BlockPos) -> bool {
        self.blocks.get(&pos).is_some_and(|b| b.has_entity)
    }

    /// Make [`BlockAccess::ensure_block_entity`] fail at `pos`.
    pub fn deny_block_entity(&mut self, pos: BlockPos) {
        self.entity_denied.insert(pos);
    }

    /// Unload the chunk containing `pos`.
    pub fn unload_chunk(&mut self, pos: BlockPos) {
        self.unloaded.insert(chunk_of(pos));
    }

    /// Load the chunk containing `pos`.
    pub fn load_chunk(&mut self, pos: BlockPos) {
        self.unloaded.remove(&chunk_of(pos));
    }

    /// Register item metadata.
    pub fn register_item(&mut self, item_id: impl Into<String>, info: ItemInfo) {
        self.items.insert(item_id.into(), info);
    }

    /// Put `stack` into an inventory slot, replacing what was there.
    pub fn give(&mut self, slot: InventorySlot, stack: ItemStack) {
        self.inventory.insert(slot, stack);
    }

    /// Contents of an inventory slot.
    pub fn slot_contents(&self, slot: InventorySlot) -> Option<&ItemStack> {
        self.inventory.get(&slot)
    }

    /// Limit how many more displays may be spawned. `None` removes the limit.
    pub fn set_spawn_budget(&mut self, budget: Option<usize>) {
        self.spawn_budget = budget;
    }

    /// Spawn description of a live display.
    pub fn display_spawn(&self, id: DisplayId) -> Option<&DisplaySpawn> {
        self.resolve(id).map(|d| &d.spawn)
    }

    /// Number of live displays.
    pub fn display_count(&self) -> usize {
        self.by_id.len()
    }

    /// Item drops spawned so far, oldest first.
    pub fn drops(&self) -> &[ItemDrop] {
        &self.drops
    }

    /// Take and clear the drop log.
    pub fn take_drops(&mut self) -> Vec<ItemDrop> {
        std::mem::take(&mut self.drops)
    }

    /// Neighbor updates issued so far.
    pub fn block_updates(&self) -> &[BlockPos] {
        &self.block_updates
    }

    fn is_alive(&self, r: EntityRef) -> bool {
        self.displays
            .get(r.idx())
            .and_then(|d| d.as_ref())
            .is_some_and(|d| d.generation == r.1)
    }

    fn resolve(&self, id: DisplayId) -> Option<&Display> {
        let r = *self.by_id.get(&id)?;
        if !self.is_alive(r) {
            return None;
        }
        self.displays[r.idx()].as_ref()
    }

    fn alloc(&mut self, spawn: DisplaySpawn) -> EntityRef {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.displays[idx] = Some(Display { generation, spawn });
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.displays.push(Some(Display { generation, spawn }));
            self.generations.push(generation);
            (self.displays.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "EntityRef uses 32-bit indices."
        )]
        let idx = idx as u32;
        EntityRef(idx, generation)
    }
}

impl BlockAccess for MemoryWorld {
    fn is_loaded(&self, pos: BlockPos) -> bool {
        !self.unloaded.contains(&chunk_of(pos))
    }

    fn block_type(&self, pos: BlockPos) -> Option<&str> {
        if !self.is_loaded(pos) {
            return None;
        }
        self.blocks.get(&pos).map(|b| b.block_type.as_str())
    }

    fn facing(&self, pos: BlockPos) -> Facing {
        self.blocks
            .get(&pos)
            .map(|b| Facing::from_index(b.rotation))
            .unwrap_or_default()
    }

    fn ensure_block_entity(&mut self, pos: BlockPos) -> bool {
        if self.entity_denied.contains(&pos) {
            return false;
        }
        match self.blocks.get_mut(&pos) {
            Some(b) => {
                b.has_entity = true;
                true
            }
            None => false,
        }
    }
}

impl ItemCatalog for MemoryWorld {
    fn item_info(&self, item_id: &str) -> Option<&ItemInfo> {
        self.items.get(item_id)
    }
}

impl AttachmentStore for MemoryWorld {
    fn record(&self, anchor: BlockPos) -> Option<&AttachmentRecord> {
        self.records.get(&anchor)
    }

    fn put_record(&mut self, anchor: BlockPos, record: AttachmentRecord) {
        self.records.insert(anchor, record);
    }

    fn display(&self, id: DisplayId) -> Option<&DisplayPayload> {
        self.resolve(id).map(|d| &d.spawn.payload)
    }

    fn display_ids(&self) -> Vec<DisplayId> {
        self.displays
            .iter()
            .flatten()
            .map(|d| d.spawn.id)
            .collect()
    }

    fn spawn_display(&mut self, spawn: DisplaySpawn) -> bool {
        if self.by_id.contains_key(&spawn.id) {
            return false;
        }
        if let Some(budget) = self.spawn_budget.as_mut() {
            if *budget == 0 {
                return false;
            }
            *budget -= 1;
        }
        let id = spawn.id;
        let r = self.alloc(spawn);
        self.by_id.insert(id, r);
        true
    }

    fn despawn_display(&mut self, id: DisplayId) -> bool {
        let Some(r) = self.by_id.remove(&id) else {
            return false;
        };
        if !self.is_alive(r) {
            return false;
        }
        self.displays[r.idx()] = None;
        self.free_list.push(r.idx());
        true
    }
}

impl Inventory for MemoryWorld {
    fn remove_from_slot(&mut self, slot: InventorySlot, item: &ItemStack, quantity: u32) -> bool {
        let Some(stack) = self.inventory.get(&slot) else {
            return false;
        };
        if stack.item_id() != item.item_id() || stack.quantity() < quantity {
            return false;
        }
        let left = stack.quantity() - quantity;
        if left == 0 {
            self.inventory.remove(&slot);
        } else {
            let rest = stack.with_quantity(left);
            self.inventory.insert(slot, rest);
        }
        true
    }
}

impl WorldEffects for MemoryWorld {
    fn spawn_item_drop(&mut self, drop: ItemDrop) {
        self.drops.push(drop);
    }

    fn block_update(&mut self, pos: BlockPos) {
        self.block_updates.push(pos);
    }
}
