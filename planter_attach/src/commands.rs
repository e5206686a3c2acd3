// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred command buffer: the intent log handlers write and the host applies.

use tracing::{debug, warn};

use crate::error::PlanterError;
use crate::host::{Host, ItemDrop};
use crate::payload::DisplaySpawn;
use crate::reconcile::{commit_record, resolve_slots};
use crate::record::AttachmentRecord;
use crate::types::{BlockPos, DisplayId, InventorySlot, ItemStack};

/// One deferred structural mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    /// Destroy a display. A dangling id is tolerated.
    Despawn(DisplayId),
    /// Create a display.
    Spawn(DisplaySpawn),
    /// Replace an anchor's slot list.
    ///
    /// Ids whose spawn was rejected earlier in the same batch are left out.
    /// If every listed id was rejected the record is emptied and the batch
    /// fails with [`PlanterError::CreationFailure`].
    CommitRecord {
        /// Anchor position.
        anchor: BlockPos,
        /// New slot list in slot order.
        slots: Vec<DisplayId>,
    },
    /// Empty an anchor's slot list, keeping the record.
    ClearRecord(BlockPos),
    /// Spawn a loose item.
    Drop(ItemDrop),
    /// Remove items from an actor's inventory slot.
    ///
    /// Failure stops the batch with [`PlanterError::InventoryDebitFailure`].
    Debit {
        /// Slot to debit.
        slot: InventorySlot,
        /// Item expected in the slot.
        item: ItemStack,
        /// Number of items to remove.
        quantity: u32,
    },
    /// Notify neighbors of a changed block.
    BlockUpdate(BlockPos),
}

/// Ordered list of intents produced by one handler or system invocation.
///
/// Planning reads the host through `&H` only, so nothing queued here is
/// visible until [`CommandBuffer::apply`] runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandBuffer {
    intents: Vec<Intent>,
}

impl CommandBuffer {
    /// An empty buffer.
    pub const fn new() -> Self {
        Self {
            intents: Vec::new(),
        }
    }

    /// Queued intents in application order.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Number of queued intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Queue an arbitrary intent.
    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Append every intent of `other`.
    pub fn append(&mut self, other: Self) {
        self.intents.extend(other.intents);
    }

    /// Queue destruction of a display.
    pub fn despawn(&mut self, id: DisplayId) {
        self.push(Intent::Despawn(id));
    }

    /// Queue creation of a display.
    pub fn spawn(&mut self, spawn: DisplaySpawn) {
        self.push(Intent::Spawn(spawn));
    }

    /// Queue replacement of an anchor's slot list.
    pub fn commit_record(&mut self, anchor: BlockPos, slots: Vec<DisplayId>) {
        self.push(Intent::CommitRecord { anchor, slots });
    }

    /// Queue clearing of an anchor's slot list.
    pub fn clear_record(&mut self, anchor: BlockPos) {
        self.push(Intent::ClearRecord(anchor));
    }

    /// Queue an item drop.
    pub fn drop_item(&mut self, drop: ItemDrop) {
        self.push(Intent::Drop(drop));
    }

    /// Queue an inventory debit.
    pub fn debit(&mut self, slot: InventorySlot, item: ItemStack, quantity: u32) {
        self.push(Intent::Debit {
            slot,
            item,
            quantity,
        });
    }

    /// Queue a neighbor update.
    pub fn block_update(&mut self, pos: BlockPos) {
        self.push(Intent::BlockUpdate(pos));
    }

    /// Apply every intent in order.
    ///
    /// The first failing intent records its error in the report and the rest
    /// of the batch is skipped. Intents already applied stay applied.
    pub fn apply<H: Host + ?Sized>(self, host: &mut H) -> TurnReport {
        let mut report = TurnReport::default();
        let mut intents = self.intents.into_iter();
        for intent in intents.by_ref() {
            match intent {
                Intent::Despawn(id) => {
                    if host.despawn_display(id) {
                        report.destroyed += 1;
                    } else {
                        report.dangling += 1;
                        debug!(%id, "despawn of unresolved display ignored");
                    }
                }
                Intent::Spawn(spawn) => {
                    let id = spawn.id;
                    if host.spawn_display(spawn) {
                        report.created.push(id);
                    } else {
                        warn!(%id, "host rejected display spawn");
                        report.failed_spawns.push(id);
                    }
                }
                Intent::CommitRecord { anchor, slots } => {
                    let resolved = resolve_slots(&slots, &report.failed_spawns);
                    if let Err(err) = commit_record(host, anchor, &resolved) {
                        report.error = Some(err);
                        break;
                    }
                }
                Intent::ClearRecord(anchor) => {
                    host.put_record(anchor, AttachmentRecord::new());
                }
                Intent::Drop(drop) => {
                    host.spawn_item_drop(drop);
                    report.drops += 1;
                }
                Intent::Debit {
                    slot,
                    item,
                    quantity,
                } => {
                    if !host.remove_from_slot(slot, &item, quantity) {
                        warn!(%slot, item = item.item_id(), quantity, "inventory debit failed");
                        report.error = Some(PlanterError::InventoryDebitFailure { slot });
                        break;
                    }
                }
                Intent::BlockUpdate(pos) => host.block_update(pos),
            }
        }
        report.skipped = intents.count();
        debug!(
            created = report.created.len(),
            failed = report.failed_spawns.len(),
            destroyed = report.destroyed,
            drops = report.drops,
            skipped = report.skipped,
            "command buffer applied"
        );
        report
    }
}

/// Outcome of applying one [`CommandBuffer`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnReport {
    /// Displays created, in spawn order.
    pub created: Vec<DisplayId>,
    /// Displays the host refused to create.
    pub failed_spawns: Vec<DisplayId>,
    /// Displays destroyed.
    pub destroyed: usize,
    /// Despawns that found nothing to destroy.
    pub dangling: usize,
    /// Item drops spawned.
    pub drops: usize,
    /// Intents not applied because an earlier one failed.
    pub skipped: usize,
    /// The failure that stopped the batch, if any.
    pub error: Option<PlanterError>,
}

impl TurnReport {
    /// True if every intent was applied.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
