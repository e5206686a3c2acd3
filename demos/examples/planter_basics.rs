// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planter basics.
//!
//! Places a tall planter turned half way round, inserts three plants one at a
//! time, tries a fourth, then removes everything and prints the drops.
//!
//! Run:
//! - `cargo run -p planter_examples --example planter_basics`
//! - `RUST_LOG=debug cargo run -p planter_examples --example planter_basics`

use planter_attach::host::AttachmentStore;
use planter_attach::memory::MemoryWorld;
use planter_attach::{
    BlockInteraction, BlockPos, HeldItem, InteractionContext, InventorySlot, ItemInfo, ItemStack,
    Planter,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let planter = Planter::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut world = MemoryWorld::new();
    let pos = BlockPos::new(12, 64, -3);
    world.place_block(pos, "Immersive_Gardening_Planter_Tall", 2);

    let slot = InventorySlot(0);
    for id in ["Plant_Fern", "Plant_Tulip", "Plant_Cactus", "Plant_Moss"] {
        world.register_item(
            id,
            ItemInfo {
                categories: vec!["Blocks.Plants".into()],
                icon_scale: (id == "Plant_Cactus").then_some(0.8),
                places_block: id == "Plant_Cactus",
            },
        );
    }

    println!("== Insert ==");
    for id in ["Plant_Fern", "Plant_Tulip", "Plant_Cactus", "Plant_Moss"] {
        world.give(slot, ItemStack::new(id, 2));
        let held = HeldItem::new(ItemStack::new(id, 2), slot);
        let mut ctx = InteractionContext::new(pos, Some(held));
        let report = planter.insert_plant().run(&mut world, &mut ctx, &mut rng);
        println!(
            "  {id:<13} -> {:?} (created {}, destroyed {}) {}",
            ctx.state(),
            report.created.len(),
            report.destroyed,
            ctx.error().map(ToString::to_string).unwrap_or_default()
        );
    }

    println!("== Slots ==");
    if let Some(record) = world.record(pos) {
        for (i, id) in record.slots().iter().enumerate() {
            if let Some(spawn) = world.display_spawn(*id) {
                let p = spawn.position;
                println!(
                    "  [{i}] {:<13} at ({:.2}, {:.2}, {:.2}) scale {:.2} markers {:?}",
                    spawn.payload.content().item_id(),
                    p.x,
                    p.y,
                    p.z,
                    spawn.scale,
                    spawn.markers
                );
            }
        }
    }

    println!("== Remove all ==");
    let mut ctx = InteractionContext::new(pos, None);
    planter.remove_plants().run(&mut world, &mut ctx, &mut rng);
    for drop in world.drops() {
        println!(
            "  drop {} x{} at ({:.2}, {:.2}, {:.2})",
            drop.item.item_id(),
            drop.item.quantity(),
            drop.position.x,
            drop.position.y,
            drop.position.z
        );
    }
    println!("  displays left: {}", world.display_count());
}
