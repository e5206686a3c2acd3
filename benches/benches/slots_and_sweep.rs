// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use planter_attach::memory::MemoryWorld;
use planter_attach::{
    BlockInteraction, BlockPos, CommandBuffer, HeldItem, InteractionContext, InventorySlot,
    ItemInfo, ItemStack, Planter,
};
use planter_geometry::{Facing, slot_offsets};
use rand::SeedableRng;
use rand::rngs::StdRng;

const TALL: &str = "Immersive_Gardening_Planter_Tall";

/// A row of `n` tall planters, each filled to capacity.
fn planted_world(planter: &Planter, n: i32, rng: &mut StdRng) -> MemoryWorld {
    let mut w = MemoryWorld::new();
    w.register_item(
        "Plant_Fern",
        ItemInfo {
            categories: vec!["Blocks.Plants".into()],
            ..ItemInfo::default()
        },
    );
    let insert = planter.insert_plant();
    for x in 0..n {
        let pos = BlockPos::new(x, 64, 0);
        w.place_block(pos, TALL, x);
        for _ in 0..3 {
            w.give(InventorySlot(0), ItemStack::new("Plant_Fern", 1));
            let held = HeldItem::new(ItemStack::new("Plant_Fern", 1), InventorySlot(0));
            let mut ctx = InteractionContext::new(pos, Some(held));
            insert.run(&mut w, &mut ctx, rng);
        }
    }
    w
}

fn bench_slot_offsets(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    for subtype in ["Planter_Tall", "Planter_Pot"] {
        group.bench_function(format!("slot_offsets_{subtype}"), |b| {
            b.iter(|| {
                for f in Facing::ALL {
                    black_box(slot_offsets(black_box(subtype), f));
                }
            });
        });
    }
    group.finish();
}

fn bench_fill_anchor(c: &mut Criterion) {
    let planter = Planter::default();
    let mut group = c.benchmark_group("interaction");
    for &n in &[16_i32, 128] {
        group.throughput(Throughput::Elements(n as u64 * 3));
        group.bench_function(format!("fill_tall_n{n}"), |b| {
            b.iter_batched(
                || StdRng::seed_from_u64(1),
                |mut rng| black_box(planted_world(&planter, n, &mut rng).display_count()),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let planter = Planter::default();
    let mut group = c.benchmark_group("sweep");
    for &n in &[128_i32, 1024] {
        let mut rng = StdRng::seed_from_u64(2);
        let world = planted_world(&planter, n, &mut rng);
        group.throughput(Throughput::Elements(n as u64 * 3));
        group.bench_function(format!("window_all_anchored_n{n}"), |b| {
            b.iter_batched(
                || planter.display_sweep(),
                |mut sweep| {
                    let mut cmds = CommandBuffer::new();
                    for _ in 0..planter.config().ticks_per_check {
                        black_box(sweep.run(&world, &mut rng, &mut cmds));
                    }
                    black_box(cmds.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_slot_offsets, bench_fill_anchor, bench_sweep);
criterion_main!(benches);
