// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=planter_attach --heading-base-level=0

//! Planter Attach: keeps a planter block and its plant props consistent.
//!
//! A planter anchor is a block that shows up to a fixed number of display
//! objects (plant props), one per slot. This crate owns the relationship
//! between the two:
//!
//! - The anchor holds an [`AttachmentRecord`]: the ordered ids of its displays.
//! - Each display carries a [`DisplayPayload`]: one unit of the plant it shows
//!   and the coordinates of its anchor, a weak back reference that may dangle.
//!
//! ## Where this fits
//!
//! The host engine owns storage, inventories, chunk loading and event
//! dispatch. It exposes them through the traits in [`host`]. Handlers and
//! systems read the host through `&H` and queue their mutations in a
//! [`CommandBuffer`], which the host applies at a point of its choosing with
//! [`CommandBuffer::apply`]. Nothing queued is visible before that.
//!
//! ## API overview
//!
//! - [`Planter`]: shared [`PlanterConfig`], hands out everything below.
//! - [`InsertPlant`], [`RemovePlants`], [`TogglePlant`]: player interactions,
//!   driven by [`BlockInteraction::run`] with an [`InteractionContext`].
//! - [`Reconciler`]: tears down every attached display and rebuilds the set,
//!   so positions always follow the anchor's current facing.
//! - [`BreakCascade`]: drops every plant when an anchor is broken.
//! - [`DisplaySweep`]: per-display periodic check that removes displays whose
//!   anchor disappeared without a break event.
//! - [`memory::MemoryWorld`]: an in-memory host for tests and tooling.
//!
//! Slot geometry comes from [`planter_geometry`].
//!
//! ## Failure model
//!
//! A rejected interaction ([`PlanterError`]) before planning completes leaves
//! the world untouched. Once a buffer is being applied nothing is rolled back:
//! if the inventory debit fails after the displays were created, they stay and
//! the interaction still reports [`InteractionState::Failed`].
//!
//! ## Minimal usage
//!
//! ```
//! use planter_attach::memory::MemoryWorld;
//! use planter_attach::{
//!     BlockInteraction, BlockPos, HeldItem, InteractionContext, InteractionState,
//!     InventorySlot, ItemInfo, ItemStack, Planter,
//! };
//! use planter_attach::host::AttachmentStore;
//! use rand::SeedableRng;
//!
//! let planter = Planter::default();
//! let mut world = MemoryWorld::new();
//! let pos = BlockPos::new(0, 64, 0);
//! world.place_block(pos, "Immersive_Gardening_Planter_Pot", 0);
//! world.register_item(
//!     "Plant_Fern",
//!     ItemInfo { categories: vec!["Blocks.Plants".into()], ..ItemInfo::default() },
//! );
//! world.give(InventorySlot(0), ItemStack::new("Plant_Fern", 8));
//!
//! let held = HeldItem::new(ItemStack::new("Plant_Fern", 8), InventorySlot(0));
//! let mut ctx = InteractionContext::new(pos, Some(held));
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! planter.insert_plant().run(&mut world, &mut ctx, &mut rng);
//!
//! assert_eq!(ctx.state(), InteractionState::Finished);
//! assert_eq!(world.record(pos).map(|r| r.len()), Some(1));
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod interaction;
pub mod lifecycle;
pub mod memory;
pub mod payload;
pub mod planter;
pub mod reconcile;
pub mod record;
pub mod types;

pub use commands::{CommandBuffer, Intent, TurnReport};
pub use config::{DropConfig, PlanterConfig};
pub use error::{ConfigError, PlanterError, TargetFault};
pub use host::{Host, ItemDrop};
pub use interaction::{
    BlockInteraction, HeldItem, InsertPlant, InteractionContext, InteractionState, RemovePlants,
    ResolvedAnchor, TogglePlant, holds_plants, resolve_anchor,
};
pub use lifecycle::{BreakCascade, DisplaySweep, SweepVerdict};
pub use payload::{DisplayMarkers, DisplayPayload, DisplaySpawn};
pub use planter::Planter;
pub use reconcile::Reconciler;
pub use record::AttachmentRecord;
pub use types::{BlockPos, DisplayId, InventorySlot, ItemInfo, ItemStack};
