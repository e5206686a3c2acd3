// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation: tear down every attached display and rebuild the full set.

use std::sync::Arc;

use planter_geometry::Vec3;
use rand::Rng;
use tracing::{debug, warn};

use crate::commands::CommandBuffer;
use crate::config::PlanterConfig;
use crate::error::PlanterError;
use crate::host::{AttachmentStore, ItemCatalog};
use crate::payload::{DisplayMarkers, DisplayPayload, DisplaySpawn};
use crate::record::AttachmentRecord;
use crate::types::{BlockPos, DisplayId, ItemStack};

/// Builds the destroy/create/commit intents for one anchor.
#[derive(Clone, Debug)]
pub struct Reconciler {
    config: Arc<PlanterConfig>,
}

impl Reconciler {
    /// Create a reconciler sharing `config`.
    pub fn new(config: Arc<PlanterConfig>) -> Self {
        Self { config }
    }

    /// Queue a full rebuild of the displays of `anchor`.
    ///
    /// Every id in `attached` is despawned first, dangling or not. Then one
    /// display is spawned per slot for `min(contents.len(), offsets.len())`
    /// slots, each showing one unit of `contents[i]` at `anchor + offsets[i]`.
    /// Content past the last slot is dropped. Finally the record is replaced
    /// with the new ids.
    ///
    /// Returns the new ids in slot order. Ids are minted here, so a spawn the
    /// host later rejects still has an entry; the record commit leaves it out.
    pub fn rebuild<C: ItemCatalog + ?Sized, R: Rng + ?Sized>(
        &self,
        catalog: &C,
        attached: &[DisplayId],
        contents: &[ItemStack],
        anchor: BlockPos,
        offsets: &[Vec3],
        rng: &mut R,
        commands: &mut CommandBuffer,
    ) -> Vec<DisplayId> {
        for id in attached {
            commands.despawn(*id);
        }

        let n = contents.len().min(offsets.len());
        if n < contents.len() {
            debug!(
                %anchor,
                dropped = contents.len() - n,
                slots = offsets.len(),
                "content exceeds slots, clamping"
            );
        }

        let mut ids = Vec::with_capacity(n);
        for (content, offset) in contents.iter().zip(offsets) {
            let info = catalog.item_info(content.item_id());
            let id = DisplayId::random(rng);
            commands.spawn(DisplaySpawn {
                id,
                position: anchor.offset(*offset),
                yaw_degrees: f32::from(rng.random_range(0_u16..360)),
                scale: self.config.display_scale(info),
                markers: DisplayMarkers::for_item(info.is_some_and(|i| i.places_block)),
                payload: DisplayPayload::new(content, Some(anchor)),
            });
            ids.push(id);
        }

        commands.commit_record(anchor, ids.clone());
        ids
    }
}

/// Map a planned slot list to what actually exists after spawning.
///
/// Ids listed in `rejected` become `None` placeholders in their slot.
pub(crate) fn resolve_slots(slots: &[DisplayId], rejected: &[DisplayId]) -> Vec<Option<DisplayId>> {
    slots
        .iter()
        .map(|id| (!rejected.contains(id)).then_some(*id))
        .collect()
}

/// Store the surviving ids of `resolved` as the record of `anchor`.
///
/// Returns the number of ids committed. If none survived, the record is
/// emptied and [`PlanterError::CreationFailure`] is returned.
pub(crate) fn commit_record<S: AttachmentStore + ?Sized>(
    store: &mut S,
    anchor: BlockPos,
    resolved: &[Option<DisplayId>],
) -> Result<usize, PlanterError> {
    let record = AttachmentRecord::from_slots(resolved.iter().flatten().copied());
    let committed = record.len();
    store.put_record(anchor, record);
    if committed == 0 {
        warn!(%anchor, "no display could be created");
        return Err(PlanterError::CreationFailure { anchor });
    }
    if committed < resolved.len() {
        warn!(
            %anchor,
            committed,
            missing = resolved.len() - committed,
            "some displays could not be created"
        );
    }
    Ok(committed)
}
