// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle systems: the break cascade and the periodic display sweep.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};

use crate::commands::CommandBuffer;
use crate::config::PlanterConfig;
use crate::host::Host;
use crate::types::{BlockPos, DisplayId};

/// Tears down an anchor's displays when its block is broken.
#[derive(Clone, Debug)]
pub struct BreakCascade {
    config: Arc<PlanterConfig>,
}

impl BreakCascade {
    /// Create the system.
    pub fn new(config: Arc<PlanterConfig>) -> Self {
        Self { config }
    }

    /// Queue the cascade for the block at `pos`, read before it is removed.
    ///
    /// Non-anchor blocks are ignored. For an anchor, every attached display
    /// with content drops it near the block, every attached id is despawned
    /// and the record is cleared. Returns the number of ids torn down.
    pub fn on_block_broken<H: Host + ?Sized, R: Rng + ?Sized>(
        &self,
        host: &H,
        pos: BlockPos,
        rng: &mut R,
        commands: &mut CommandBuffer,
    ) -> usize {
        let Some(block_type) = host.block_type(pos) else {
            return 0;
        };
        if !self.config.is_anchor_block(block_type) {
            return 0;
        }
        let Some(record) = host.record(pos) else {
            return 0;
        };

        for id in record.slots() {
            if let Some(payload) = host.display(*id) {
                if !payload.content().is_empty() {
                    let drop = self
                        .config
                        .break_drop
                        .item_drop(pos, payload.content().clone(), rng);
                    commands.drop_item(drop);
                }
            }
            commands.despawn(*id);
        }
        commands.clear_record(pos);
        debug!(%pos, attached = record.len(), "anchor broken");
        record.len()
    }
}

/// Result of one sweep tick for one display.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SweepVerdict {
    /// Counter advanced; no check this tick.
    Waiting,
    /// Checked: the anchor is still there.
    Anchored,
    /// Checked: the display has no anchor position. Queued for removal.
    Orphaned,
    /// Checked: the block at the anchor position is not an anchor. Queued for removal.
    AnchorMissing,
    /// Checked: the anchor's chunk is not loaded. Retried next window.
    Unresolved,
    /// The display no longer exists.
    Gone,
}

impl SweepVerdict {
    /// True if the display was queued for self-destruction.
    pub fn is_removal(self) -> bool {
        matches!(self, Self::Orphaned | Self::AnchorMissing)
    }
}

/// Periodic back-reference check for display objects.
///
/// Each display has its own tick counter, so displays spawned at different
/// times are checked at different ticks. The check runs when a counter reaches
/// [`PlanterConfig::ticks_per_check`].
#[derive(Clone, Debug)]
pub struct DisplaySweep {
    config: Arc<PlanterConfig>,
    counters: HashMap<DisplayId, u32>,
}

impl DisplaySweep {
    /// Create the system.
    pub fn new(config: Arc<PlanterConfig>) -> Self {
        Self {
            config,
            counters: HashMap::new(),
        }
    }

    /// Ticks counted for `id` since its last check.
    pub fn counter(&self, id: DisplayId) -> u32 {
        self.counters.get(&id).copied().unwrap_or(0)
    }

    /// Advance the counter of one display and check it when due.
    pub fn tick<H: Host + ?Sized, R: Rng + ?Sized>(
        &mut self,
        host: &H,
        id: DisplayId,
        rng: &mut R,
        commands: &mut CommandBuffer,
    ) -> SweepVerdict {
        let Some(payload) = host.display(id) else {
            self.counters.remove(&id);
            return SweepVerdict::Gone;
        };
        let counter = self.counters.entry(id).or_insert(0);
        *counter += 1;
        if *counter < self.config.ticks_per_check {
            return SweepVerdict::Waiting;
        }
        *counter = 0;

        let (drop_at, verdict) = match payload.anchor_position() {
            None => (BlockPos::ORIGIN, SweepVerdict::Orphaned),
            Some(anchor) if !host.is_loaded(anchor) => return SweepVerdict::Unresolved,
            Some(anchor) => match host.block_type(anchor) {
                Some(t) if self.config.is_anchor_block(t) => return SweepVerdict::Anchored,
                _ => (anchor, SweepVerdict::AnchorMissing),
            },
        };

        info!(%id, anchor = ?payload.anchor_position(), ?verdict, "display lost its anchor, removing");
        if !payload.content().is_empty() {
            let drop = self
                .config
                .sweep_drop
                .item_drop(drop_at, payload.content().clone(), rng);
            commands.drop_item(drop);
        }
        commands.despawn(id);
        self.counters.remove(&id);
        verdict
    }

    /// Tick every live display once. Returns how many were queued for removal.
    ///
    /// Counters of displays that no longer exist are discarded.
    pub fn run<H: Host + ?Sized, R: Rng + ?Sized>(
        &mut self,
        host: &H,
        rng: &mut R,
        commands: &mut CommandBuffer,
    ) -> usize {
        let ids = host.display_ids();
        let live: HashSet<DisplayId> = ids.iter().copied().collect();
        self.counters.retain(|id, _| live.contains(id));
        ids.into_iter()
            .filter(|id| self.tick(host, *id, rng, commands).is_removal())
            .count()
    }
}
