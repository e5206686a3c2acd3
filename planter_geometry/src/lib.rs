// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=planter_geometry --heading-base-level=0

//! Planter Geometry: where the display props of a planter anchor sit.
//!
//! A planter anchor occupies one block cell and exposes a fixed number of
//! display slots determined by its subtype. This crate answers one question:
//! given a subtype and a discrete facing, what are the block-local offsets of
//! those slots, in slot order?
//!
//! - [`AnchorKind`] classifies a subtype string (`tall` → 3 slots, `pot` → 1
//!   centered slot, anything else → 1 lower slot).
//! - [`Facing`] is a quarter-turn rotation index `0..=3`.
//! - [`slot_offsets`] rotates each base offset by `-facing * 90°` about the
//!   vertical axis and translates it by `(0.5, 0, 0.5)` into the cell.
//!
//! The horizontal plane is handled with Kurbo: a facing is an [`kurbo::Affine`]
//! over `(x, z)`, and the vertical component passes through unchanged.
//!
//! Everything here is pure and deterministic. Slot count always equals the
//! subtype's capacity, for every facing.
//!
//! # Example
//!
//! ```rust
//! use planter_geometry::{Facing, Vec3, slot_offsets};
//!
//! let offsets = slot_offsets("Planter_Pot", Facing::from_index(0));
//! assert_eq!(offsets.len(), 1);
//! assert!(offsets[0].approx_eq(Vec3::new(0.5, 0.55, 0.5), 1e-9));
//!
//! // A tall planter turned half way round.
//! let offsets = slot_offsets("Planter_Tall", Facing::from_index(2));
//! assert_eq!(offsets.len(), 3);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod slots;
mod types;

pub use slots::{CELL_CENTER, capacity, cell_transform, offsets_for_kind, slot_offsets};
pub use types::{AnchorKind, Facing, Vec3};
