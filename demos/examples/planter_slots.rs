// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot geometry.
//!
//! Prints the block-local slot offsets of each planter subtype for every
//! facing.
//!
//! Run:
//! - `cargo run -p planter_examples --example planter_slots`

use planter_geometry::{AnchorKind, Facing, slot_offsets};

fn main() {
    for subtype in ["Planter_Tall", "Planter_Pot", "Planter_Box"] {
        let kind = AnchorKind::classify(subtype);
        println!("== {subtype} ({kind:?}, {} slots) ==", kind.capacity());
        for facing in Facing::ALL {
            let offsets: Vec<String> = slot_offsets(subtype, facing)
                .iter()
                .map(|o| format!("({:.2}, {:.2}, {:.2})", o.x, o.y, o.z))
                .collect();
            println!(
                "  facing {} ({:>4}°): {}",
                facing.index(),
                facing.yaw_degrees(),
                offsets.join(" ")
            );
        }
    }
}
