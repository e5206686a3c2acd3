// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction handlers: insert, remove-all and toggle.
//!
//! A handler runs in four phases. The held item is checked, the target is
//! resolved (which may create the block entity), then the handler plans
//! against a read-only view of the host, then the planned [`CommandBuffer`]
//! is applied. A precheck or planning error leaves the world untouched, apart
//! from a block entity created during resolution. An apply error leaves
//! earlier intents applied.

use std::sync::Arc;

use planter_geometry::{AnchorKind, Facing, Vec3, offsets_for_kind};
use rand::Rng;
use tracing::{debug, warn};

use crate::commands::{CommandBuffer, TurnReport};
use crate::config::PlanterConfig;
use crate::error::{PlanterError, TargetFault};
use crate::host::{BlockAccess, Host};
use crate::reconcile::Reconciler;
use crate::record::AttachmentRecord;
use crate::types::{BlockPos, InventorySlot, ItemStack};

/// What the acting player holds, and where it sits in their inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeldItem {
    /// Held stack.
    pub stack: ItemStack,
    /// Inventory slot the stack is debited from.
    pub slot: InventorySlot,
}

impl HeldItem {
    /// Create a held item.
    pub fn new(stack: ItemStack, slot: InventorySlot) -> Self {
        Self { stack, slot }
    }
}

/// Progress of one interaction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    /// Not finished yet.
    #[default]
    Running,
    /// Every planned intent applied.
    Finished,
    /// Stopped with an error. See [`InteractionContext::error`].
    Failed,
}

/// Caller-visible state of one interaction.
#[derive(Clone, Debug)]
pub struct InteractionContext {
    target: BlockPos,
    held: Option<HeldItem>,
    state: InteractionState,
    error: Option<PlanterError>,
}

impl InteractionContext {
    /// A running interaction on `target`.
    pub fn new(target: BlockPos, held: Option<HeldItem>) -> Self {
        Self {
            target,
            held,
            state: InteractionState::Running,
            error: None,
        }
    }

    /// Targeted block.
    pub fn target(&self) -> BlockPos {
        self.target
    }

    /// Held item, if any.
    pub fn held(&self) -> Option<&HeldItem> {
        self.held.as_ref()
    }

    /// Current state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// The error that failed the interaction.
    pub fn error(&self) -> Option<&PlanterError> {
        self.error.as_ref()
    }

    /// Mark the interaction failed.
    pub fn fail(&mut self, err: PlanterError) {
        self.state = InteractionState::Failed;
        self.error = Some(err);
    }

    /// Mark the interaction finished.
    pub fn finish(&mut self) {
        self.state = InteractionState::Finished;
        self.error = None;
    }
}

/// An anchor whose block and block entity were found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAnchor {
    /// Block position.
    pub pos: BlockPos,
    /// Block type id, which is also the anchor subtype.
    pub block_type: String,
    /// Stored rotation, read fresh on every resolution.
    pub facing: Facing,
}

impl ResolvedAnchor {
    /// Subtype classification.
    pub fn kind(&self) -> AnchorKind {
        AnchorKind::classify(&self.block_type)
    }

    /// Number of display slots.
    pub fn capacity(&self) -> usize {
        self.kind().capacity()
    }

    /// Block-local slot offsets for the current facing.
    pub fn offsets(&self) -> Vec<Vec3> {
        offsets_for_kind(self.kind(), self.facing)
    }
}

/// Resolve the block at `pos` and make sure it has a block entity.
pub fn resolve_anchor<B: BlockAccess + ?Sized>(
    host: &mut B,
    pos: BlockPos,
) -> Result<ResolvedAnchor, PlanterError> {
    let invalid = |fault| PlanterError::InvalidTarget { pos, fault };
    if !host.is_loaded(pos) {
        return Err(invalid(TargetFault::ChunkNotLoaded));
    }
    let block_type = host
        .block_type(pos)
        .map(str::to_owned)
        .ok_or_else(|| invalid(TargetFault::NoBlock))?;
    if !host.ensure_block_entity(pos) {
        warn!(%pos, block_type = block_type.as_str(), "host could not create a block entity");
        return Err(invalid(TargetFault::NoBlockEntity));
    }
    Ok(ResolvedAnchor {
        pos,
        block_type,
        facing: host.facing(pos),
    })
}

/// True if any display attached to the anchor at `pos` still shows a plant.
///
/// Ids that no longer resolve and displays without content do not count.
pub fn holds_plants<H: Host + ?Sized>(host: &H, pos: BlockPos) -> bool {
    host.record(pos).is_some_and(|r| {
        r.slots()
            .iter()
            .any(|id| host.display(*id).is_some_and(|p| !p.content().is_empty()))
    })
}

/// A player action on a planter block.
pub trait BlockInteraction {
    /// Name the host registers the interaction under.
    const NAME: &'static str;

    /// Reject the interaction before its target is resolved.
    ///
    /// Resolution may create a block entity, so anything that can be decided
    /// from the held item alone belongs here.
    fn precheck<H: Host + ?Sized>(
        &self,
        _host: &H,
        _ctx: &InteractionContext,
    ) -> Result<(), PlanterError> {
        Ok(())
    }

    /// Plan the interaction against a read-only view of the host.
    fn plan<H: Host + ?Sized, R: Rng + ?Sized>(
        &self,
        host: &H,
        anchor: &ResolvedAnchor,
        held: Option<&HeldItem>,
        rng: &mut R,
    ) -> Result<CommandBuffer, PlanterError>;

    /// Resolve, plan and apply, recording the outcome in `ctx`.
    fn run<H: Host + ?Sized, R: Rng + ?Sized>(
        &self,
        host: &mut H,
        ctx: &mut InteractionContext,
        rng: &mut R,
    ) -> TurnReport {
        let planned = self
            .precheck(&*host, ctx)
            .and_then(|()| resolve_anchor(host, ctx.target()))
            .and_then(|anchor| self.plan(&*host, &anchor, ctx.held(), rng));
        let commands = match planned {
            Ok(commands) => commands,
            Err(err) => {
                debug!(interaction = Self::NAME, target = %ctx.target(), %err, "interaction rejected");
                ctx.fail(err);
                return TurnReport::default();
            }
        };
        let report = commands.apply(host);
        match &report.error {
            Some(err) => ctx.fail(err.clone()),
            None => ctx.finish(),
        }
        report
    }
}

/// Insert the held plant into the next free slot.
///
/// Every attached display is rebuilt along with the new one, so slot
/// positions always reflect the anchor's current facing.
#[derive(Clone, Debug)]
pub struct InsertPlant {
    config: Arc<PlanterConfig>,
    reconciler: Reconciler,
}

impl InsertPlant {
    /// Create the handler.
    pub fn new(config: Arc<PlanterConfig>) -> Self {
        let reconciler = Reconciler::new(config.clone());
        Self { config, reconciler }
    }

    fn plantable<'h, H: Host + ?Sized>(
        &self,
        host: &H,
        held: Option<&'h HeldItem>,
    ) -> Result<&'h HeldItem, PlanterError> {
        let Some(held) = held.filter(|h| !h.stack.is_empty()) else {
            return Err(PlanterError::NotPlantable { item_id: None });
        };
        let plantable = host
            .item_info(held.stack.item_id())
            .is_some_and(|info| self.config.is_plantable(info));
        if !plantable {
            return Err(PlanterError::NotPlantable {
                item_id: Some(held.stack.item_id().to_owned()),
            });
        }
        Ok(held)
    }

    /// Plan with `occupied` slots already taken.
    fn plan_into<H: Host + ?Sized, R: Rng + ?Sized>(
        &self,
        host: &H,
        anchor: &ResolvedAnchor,
        held: &HeldItem,
        occupied: usize,
        rng: &mut R,
    ) -> Result<CommandBuffer, PlanterError> {
        let attached = host
            .record(anchor.pos)
            .map(|r| r.slots().to_vec())
            .unwrap_or_default();
        let capacity = anchor.capacity();
        if occupied >= capacity {
            return Err(PlanterError::CapacityExceeded {
                anchor: anchor.pos,
                capacity,
            });
        }

        let mut contents: Vec<ItemStack> = attached
            .iter()
            .filter_map(|id| host.display(*id))
            .map(|p| p.content())
            .filter(|c| !c.is_empty())
            .cloned()
            .collect();
        contents.push(held.stack.with_quantity(1));

        let mut commands = CommandBuffer::new();
        let ids = self.reconciler.rebuild(
            host,
            &attached,
            &contents,
            anchor.pos,
            &anchor.offsets(),
            rng,
            &mut commands,
        );
        if ids.is_empty() {
            return Err(PlanterError::CreationFailure { anchor: anchor.pos });
        }
        commands.debit(held.slot, held.stack.clone(), 1);
        commands.block_update(anchor.pos);
        Ok(commands)
    }
}

impl BlockInteraction for InsertPlant {
    const NAME: &'static str = "PlanterInsertPlantInteraction";

    fn precheck<H: Host + ?Sized>(
        &self,
        host: &H,
        ctx: &InteractionContext,
    ) -> Result<(), PlanterError> {
        self.plantable(host, ctx.held()).map(|_| ())
    }

    fn plan<H: Host + ?Sized, R: Rng + ?Sized>(
        &self,
        host: &H,
        anchor: &ResolvedAnchor,
        held: Option<&HeldItem>,
        rng: &mut R,
    ) -> Result<CommandBuffer, PlanterError> {
        let held = self.plantable(host, held)?;
        let occupied = host.record(anchor.pos).map_or(0, AttachmentRecord::len);
        self.plan_into(host, anchor, held, occupied, rng)
    }
}

/// Drop every attached plant and clear the anchor.
///
/// A record whose ids all dangle is still cleared, which frees its slots for
/// [`InsertPlant`].
#[derive(Clone, Debug)]
pub struct RemovePlants {
    config: Arc<PlanterConfig>,
}

impl RemovePlants {
    /// Create the handler.
    pub fn new(config: Arc<PlanterConfig>) -> Self {
        Self { config }
    }
}

impl BlockInteraction for RemovePlants {
    const NAME: &'static str = "PlanterRemovePlantInteraction";

    fn plan<H: Host + ?Sized, R: Rng + ?Sized>(
        &self,
        host: &H,
        anchor: &ResolvedAnchor,
        _held: Option<&HeldItem>,
        rng: &mut R,
    ) -> Result<CommandBuffer, PlanterError> {
        let pos = anchor.pos;
        let Some(record) = host.record(pos).filter(|r| r.has_attached()) else {
            return Err(PlanterError::NothingAttached { anchor: pos });
        };

        let mut commands = CommandBuffer::new();
        for id in record.slots() {
            let Some(payload) = host.display(*id) else {
                continue;
            };
            if payload.content().is_empty() {
                continue;
            }
            let drop = self
                .config
                .remove_drop
                .item_drop(pos, payload.content().clone(), rng);
            commands.drop_item(drop);
        }
        for id in record.slots() {
            commands.despawn(*id);
        }
        commands.clear_record(pos);
        commands.block_update(pos);
        Ok(commands)
    }
}

/// Remove everything when the anchor holds plants, insert otherwise.
///
/// Only displays that still show a plant count. An anchor whose record holds
/// nothing but dangling or empty displays takes the insert branch, which
/// replaces them.
#[derive(Clone, Debug)]
pub struct TogglePlant {
    insert: InsertPlant,
    remove: RemovePlants,
}

impl TogglePlant {
    /// Create the handler.
    pub fn new(config: Arc<PlanterConfig>) -> Self {
        Self {
            insert: InsertPlant::new(config.clone()),
            remove: RemovePlants::new(config),
        }
    }
}

impl BlockInteraction for TogglePlant {
    const NAME: &'static str = "PlanterInteraction";

    fn precheck<H: Host + ?Sized>(
        &self,
        host: &H,
        ctx: &InteractionContext,
    ) -> Result<(), PlanterError> {
        if holds_plants(host, ctx.target()) {
            Ok(())
        } else {
            self.insert.precheck(host, ctx)
        }
    }

    fn plan<H: Host + ?Sized, R: Rng + ?Sized>(
        &self,
        host: &H,
        anchor: &ResolvedAnchor,
        held: Option<&HeldItem>,
        rng: &mut R,
    ) -> Result<CommandBuffer, PlanterError> {
        if holds_plants(host, anchor.pos) {
            return self.remove.plan(host, anchor, held, rng);
        }
        let held = self.insert.plantable(host, held)?;
        self.insert.plan_into(host, anchor, held, 0, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::AttachmentStore;
    use crate::memory::MemoryWorld;
    use crate::types::ItemInfo;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const POT: &str = "Immersive_Gardening_Planter_Pot";
    const TALL: &str = "Immersive_Gardening_Planter_Tall";
    const SLOT: InventorySlot = InventorySlot(0);

    fn world_with_plants() -> MemoryWorld {
        let mut w = MemoryWorld::new();
        for id in ["Plant_A", "Plant_B", "Plant_C"] {
            w.register_item(
                id,
                ItemInfo {
                    categories: vec!["Blocks.Plants".into()],
                    ..ItemInfo::default()
                },
            );
        }
        w.register_item("Rock_Stone", ItemInfo::default());
        w
    }

    fn hold(w: &mut MemoryWorld, item: &str) -> InteractionContext {
        w.give(SLOT, ItemStack::new(item, 4));
        InteractionContext::new(BlockPos::ORIGIN, Some(HeldItem::new(ItemStack::new(item, 4), SLOT)))
    }

    fn insert(w: &mut MemoryWorld, pos: BlockPos, item: &str, rng: &mut StdRng) -> InteractionContext {
        let mut ctx = hold(w, item);
        ctx.target = pos;
        InsertPlant::new(Arc::default()).run(w, &mut ctx, rng);
        ctx
    }

    fn contents(w: &MemoryWorld, pos: BlockPos) -> Vec<String> {
        w.record(pos)
            .map(|r| r.slots().to_vec())
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| w.display(id))
            .map(|p| p.content().item_id().to_owned())
            .collect()
    }

    #[test]
    fn pot_holds_one_plant() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut w = world_with_plants();
        let pos = BlockPos::new(10, 64, 10);
        w.place_block(pos, POT, 0);

        let ctx = insert(&mut w, pos, "Plant_A", &mut rng);
        assert_eq!(ctx.state(), InteractionState::Finished);
        let rec = w.record(pos).unwrap().clone();
        assert_eq!(rec.len(), 1);
        let spawn = w.display_spawn(rec.slots()[0]).unwrap();
        assert!(spawn.position.approx_eq(pos.offset(Vec3::new(0.5, 0.55, 0.5)), 1e-9));
        assert_eq!(spawn.payload.content(), &ItemStack::new("Plant_A", 1));
        assert_eq!(w.slot_contents(SLOT).map(ItemStack::quantity), Some(3));
        assert_eq!(w.block_updates(), &[pos]);

        let ctx = insert(&mut w, pos, "Plant_B", &mut rng);
        assert_eq!(ctx.state(), InteractionState::Failed);
        assert_eq!(
            ctx.error(),
            Some(&PlanterError::CapacityExceeded {
                anchor: pos,
                capacity: 1
            })
        );
        assert_eq!(w.record(pos), Some(&rec));
        assert_eq!(contents(&w, pos), vec!["Plant_A"]);
        assert_eq!(w.block_updates().len(), 1, "failure must not update neighbors");
    }

    #[test]
    fn tall_facing_two_keeps_insertion_order() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut w = world_with_plants();
        let pos = BlockPos::new(-4, 70, 2);
        w.place_block(pos, TALL, 2);

        for (k, item) in ["Plant_A", "Plant_B", "Plant_C"].into_iter().enumerate() {
            let ctx = insert(&mut w, pos, item, &mut rng);
            assert_eq!(ctx.state(), InteractionState::Finished, "{item}");
            assert_eq!(w.record(pos).unwrap().len(), k + 1);
        }
        assert_eq!(contents(&w, pos), vec!["Plant_A", "Plant_B", "Plant_C"]);
        assert_eq!(w.display_count(), 3, "old displays must be torn down");

        let expected = [
            Vec3::new(0.2, 0.9, 0.85),
            Vec3::new(0.5, 0.9, 0.85),
            Vec3::new(0.8, 0.9, 0.85),
        ];
        let rec = w.record(pos).unwrap();
        for (id, off) in rec.slots().iter().zip(expected) {
            let spawn = w.display_spawn(*id).unwrap();
            assert!(spawn.position.approx_eq(pos.offset(off), 1e-9), "{:?}", spawn.position);
        }

        let ctx = insert(&mut w, pos, "Plant_A", &mut rng);
        assert!(matches!(ctx.error(), Some(PlanterError::CapacityExceeded { capacity: 3, .. })));
    }

    #[test]
    fn remove_all_drops_in_slot_order() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut w = world_with_plants();
        let pos = BlockPos::new(0, 64, 0);
        w.place_block(pos, TALL, 2);
        for item in ["Plant_A", "Plant_B", "Plant_C"] {
            insert(&mut w, pos, item, &mut rng);
        }

        let mut ctx = InteractionContext::new(pos, None);
        let report = RemovePlants::new(Arc::default()).run(&mut w, &mut ctx, &mut rng);
        assert_eq!(ctx.state(), InteractionState::Finished);
        assert_eq!(report.destroyed, 3);
        let items: Vec<_> = w.drops().iter().map(|d| d.item.clone()).collect();
        assert_eq!(
            items,
            vec![
                ItemStack::new("Plant_A", 1),
                ItemStack::new("Plant_B", 1),
                ItemStack::new("Plant_C", 1)
            ]
        );
        for d in w.drops() {
            assert!(d.position.approx_eq(pos.offset(Vec3::new(0.5, 0.5, 0.5)), 1e-9));
            assert_eq!(d.velocity, Vec3::ZERO);
        }
        assert!(w.record(pos).unwrap().is_empty());
        assert_eq!(w.display_count(), 0);

        let mut ctx = InteractionContext::new(pos, None);
        RemovePlants::new(Arc::default()).run(&mut w, &mut ctx, &mut rng);
        assert_eq!(ctx.error(), Some(&PlanterError::NothingAttached { anchor: pos }));
    }

    #[test]
    fn rejects_unplantable_and_empty_hands() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut w = world_with_plants();
        let pos = BlockPos::new(1, 1, 1);
        w.place_block(pos, POT, 0);

        let ctx = insert(&mut w, pos, "Rock_Stone", &mut rng);
        assert_eq!(
            ctx.error(),
            Some(&PlanterError::NotPlantable {
                item_id: Some("Rock_Stone".into())
            })
        );
        assert!(!w.has_block_entity(pos), "rejected before the target is resolved");

        let mut ctx = InteractionContext::new(pos, None);
        InsertPlant::new(Arc::default()).run(&mut w, &mut ctx, &mut rng);
        assert_eq!(ctx.error(), Some(&PlanterError::NotPlantable { item_id: None }));
        assert!(w.record(pos).is_none());
        assert_eq!(w.display_count(), 0);
        assert!(!w.has_block_entity(pos));

        let air = BlockPos::new(9, 9, 9);
        let ctx = insert(&mut w, air, "Rock_Stone", &mut rng);
        assert!(matches!(ctx.error(), Some(PlanterError::NotPlantable { .. })));
    }

    #[test]
    fn invalid_targets() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut w = world_with_plants();
        let air = BlockPos::new(5, 5, 5);
        let ctx = insert(&mut w, air, "Plant_A", &mut rng);
        assert_eq!(
            ctx.error(),
            Some(&PlanterError::InvalidTarget {
                pos: air,
                fault: TargetFault::NoBlock
            })
        );

        let far = BlockPos::new(500, 5, 500);
        w.place_block(far, POT, 0);
        w.unload_chunk(far);
        let ctx = insert(&mut w, far, "Plant_A", &mut rng);
        assert!(matches!(
            ctx.error(),
            Some(PlanterError::InvalidTarget {
                fault: TargetFault::ChunkNotLoaded,
                ..
            })
        ));

        let denied = BlockPos::new(6, 5, 5);
        w.place_block(denied, POT, 0);
        w.deny_block_entity(denied);
        let ctx = insert(&mut w, denied, "Plant_A", &mut rng);
        assert!(matches!(
            ctx.error(),
            Some(PlanterError::InvalidTarget {
                fault: TargetFault::NoBlockEntity,
                ..
            })
        ));
        assert_eq!(w.display_count(), 0);
    }

    #[test]
    fn debit_failure_keeps_displays() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut w = world_with_plants();
        let pos = BlockPos::new(2, 2, 2);
        w.place_block(pos, POT, 0);

        // Claims to hold a plant the inventory does not have.
        let mut ctx = InteractionContext::new(
            pos,
            Some(HeldItem::new(ItemStack::new("Plant_A", 1), SLOT)),
        );
        let report = InsertPlant::new(Arc::default()).run(&mut w, &mut ctx, &mut rng);
        assert_eq!(ctx.error(), Some(&PlanterError::InventoryDebitFailure { slot: SLOT }));
        assert_eq!(report.created.len(), 1);
        assert_eq!(w.record(pos).unwrap().len(), 1);
        assert_eq!(w.display_count(), 1);
        assert!(w.block_updates().is_empty());
    }

    #[test]
    fn partial_creation_keeps_survivors() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut w = world_with_plants();
        let pos = BlockPos::new(3, 3, 3);
        w.place_block(pos, TALL, 0);
        insert(&mut w, pos, "Plant_A", &mut rng);

        // The rebuild needs two spawns; only one gets through.
        w.set_spawn_budget(Some(1));
        let ctx = insert(&mut w, pos, "Plant_B", &mut rng);
        assert_eq!(ctx.state(), InteractionState::Finished);
        assert_eq!(contents(&w, pos), vec!["Plant_A"]);
    }

    #[test]
    fn total_creation_failure_empties_record() {
        let mut rng = StdRng::seed_from_u64(18);
        let mut w = world_with_plants();
        let pos = BlockPos::new(4, 4, 4);
        w.place_block(pos, TALL, 0);
        insert(&mut w, pos, "Plant_A", &mut rng);

        w.set_spawn_budget(Some(0));
        let ctx = insert(&mut w, pos, "Plant_B", &mut rng);
        assert_eq!(ctx.error(), Some(&PlanterError::CreationFailure { anchor: pos }));
        assert!(w.record(pos).unwrap().is_empty());
        assert_eq!(w.display_count(), 0);
        assert_eq!(w.slot_contents(SLOT).map(ItemStack::quantity), Some(4), "no debit");
    }

    #[test]
    fn dangling_ids_are_tolerated_on_insert() {
        let mut rng = StdRng::seed_from_u64(19);
        let mut w = world_with_plants();
        let pos = BlockPos::new(7, 7, 7);
        w.place_block(pos, TALL, 1);
        insert(&mut w, pos, "Plant_A", &mut rng);
        let stale = w.record(pos).unwrap().slots()[0];
        assert!(w.despawn_display(stale));

        let ctx = insert(&mut w, pos, "Plant_B", &mut rng);
        assert_eq!(ctx.state(), InteractionState::Finished);
        assert_eq!(contents(&w, pos), vec!["Plant_B"]);
    }

    #[test]
    fn toggle_alternates() {
        let mut rng = StdRng::seed_from_u64(20);
        let mut w = world_with_plants();
        let pos = BlockPos::new(8, 8, 8);
        w.place_block(pos, POT, 3);
        let toggle = TogglePlant::new(Arc::default());

        let mut ctx = hold(&mut w, "Plant_C");
        ctx.target = pos;
        toggle.run(&mut w, &mut ctx, &mut rng);
        assert_eq!(contents(&w, pos), vec!["Plant_C"]);

        let mut ctx = hold(&mut w, "Plant_A");
        ctx.target = pos;
        toggle.run(&mut w, &mut ctx, &mut rng);
        assert_eq!(ctx.state(), InteractionState::Finished);
        assert!(contents(&w, pos).is_empty());
        assert_eq!(w.drops().len(), 1);
        assert_eq!(w.drops()[0].item, ItemStack::new("Plant_C", 1));
    }

    #[test]
    fn toggle_replaces_lost_display() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut w = world_with_plants();
        let pos = BlockPos::new(9, 8, 8);
        w.place_block(pos, POT, 0);
        insert(&mut w, pos, "Plant_A", &mut rng);
        let lost = w.record(pos).unwrap().slots()[0];
        assert!(w.despawn_display(lost));
        assert!(!holds_plants(&w, pos));

        let mut ctx = hold(&mut w, "Plant_B");
        ctx.target = pos;
        TogglePlant::new(Arc::default()).run(&mut w, &mut ctx, &mut rng);
        assert_eq!(ctx.state(), InteractionState::Finished);
        assert_eq!(contents(&w, pos), vec!["Plant_B"]);
        assert_eq!(w.record(pos).unwrap().len(), 1);
        assert!(!w.record(pos).unwrap().contains(lost));
        assert!(w.drops().is_empty());
        assert_eq!(w.display_count(), 1);
    }

    #[test]
    fn toggle_with_empty_hands_on_empty_anchor_fails() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut w = world_with_plants();
        let pos = BlockPos::new(10, 8, 8);
        w.place_block(pos, POT, 0);

        let mut ctx = InteractionContext::new(pos, None);
        TogglePlant::new(Arc::default()).run(&mut w, &mut ctx, &mut rng);
        assert_eq!(ctx.error(), Some(&PlanterError::NotPlantable { item_id: None }));
        assert!(!w.has_block_entity(pos));
    }

    #[test]
    fn remove_all_clears_dangling_record() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut w = world_with_plants();
        let pos = BlockPos::new(11, 8, 8);
        w.place_block(pos, POT, 0);
        insert(&mut w, pos, "Plant_A", &mut rng);
        let lost = w.record(pos).unwrap().slots()[0];
        assert!(w.despawn_display(lost));

        let ctx = insert(&mut w, pos, "Plant_B", &mut rng);
        assert!(matches!(ctx.error(), Some(PlanterError::CapacityExceeded { .. })));

        let mut ctx = InteractionContext::new(pos, None);
        let report = RemovePlants::new(Arc::default()).run(&mut w, &mut ctx, &mut rng);
        assert_eq!(ctx.state(), InteractionState::Finished);
        assert_eq!(report.dangling, 1);
        assert!(w.drops().is_empty());
        assert!(w.record(pos).unwrap().is_empty());

        let ctx = insert(&mut w, pos, "Plant_B", &mut rng);
        assert_eq!(ctx.state(), InteractionState::Finished);
        assert_eq!(contents(&w, pos), vec!["Plant_B"]);
    }

    #[test]
    fn names() {
        assert_eq!(InsertPlant::NAME, "PlanterInsertPlantInteraction");
        assert_eq!(RemovePlants::NAME, "PlanterRemovePlantInteraction");
        assert_eq!(TogglePlant::NAME, "PlanterInteraction");
    }
}
