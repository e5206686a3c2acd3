// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planter sweep.
//!
//! Fills two pots, breaks one through the normal path and erases the other
//! with a bulk edit that fires no event. The break cascade cleans up the first
//! at once; the sweep finds the second's orphaned display within its window.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p planter_examples --example planter_sweep`

use planter_attach::memory::MemoryWorld;
use planter_attach::{
    BlockInteraction, BlockPos, CommandBuffer, HeldItem, InteractionContext, InventorySlot,
    ItemInfo, ItemStack, Planter,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let planter = Planter::from_toml_str(
        r#"
        ticks_per_check = 5

        [sweep_drop]
        offset = [0.5, 1.0, 0.5]
        pickup_delay = 1.0
        "#,
    )
    .unwrap_or_default();

    let mut rng = StdRng::seed_from_u64(3);
    let mut world = MemoryWorld::new();
    world.register_item(
        "Plant_Fern",
        ItemInfo {
            categories: vec!["Blocks.Plants".into()],
            ..ItemInfo::default()
        },
    );

    let broken = BlockPos::new(0, 64, 0);
    let erased = BlockPos::new(4, 64, 0);
    for pos in [broken, erased] {
        world.place_block(pos, "Immersive_Gardening_Planter_Pot", 0);
        world.give(InventorySlot(0), ItemStack::new("Plant_Fern", 1));
        let held = HeldItem::new(ItemStack::new("Plant_Fern", 1), InventorySlot(0));
        let mut ctx = InteractionContext::new(pos, Some(held));
        planter.insert_plant().run(&mut world, &mut ctx, &mut rng);
    }
    println!("displays after planting: {}", world.display_count());

    let report = world.break_block(broken, &planter.break_cascade(), &mut rng);
    println!(
        "break at {broken}: destroyed {}, drops {}",
        report.destroyed, report.drops
    );

    world.remove_block(erased);
    println!("bulk edit at {erased}: displays left {}", world.display_count());

    let mut sweep = planter.display_sweep();
    for tick in 1..=planter.config().ticks_per_check {
        let mut commands = CommandBuffer::new();
        let removed = sweep.run(&world, &mut rng, &mut commands);
        commands.apply(&mut world);
        if removed > 0 {
            info!(tick, removed, "sweep window closed");
            println!("tick {tick}: sweep removed {removed}");
        }
    }
    println!(
        "displays left: {}, drops total: {}",
        world.display_count(),
        world.drops().len()
    );
}
