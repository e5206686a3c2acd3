// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot offsets: base tables rotated to a facing and centered in the unit cell.

use alloc::vec::Vec;
use kurbo::{Affine, Vec2};

use crate::types::{AnchorKind, Facing, Vec3};

/// Horizontal translation that moves a cell-centered offset into block space.
pub const CELL_CENTER: Vec2 = Vec2::new(0.5, 0.5);

/// Transform from cell-centered horizontal coordinates to block-local ones.
///
/// Rotates by the facing, then translates by [`CELL_CENTER`].
pub fn cell_transform(facing: Facing) -> Affine {
    Affine::translate(CELL_CENTER) * facing.rotation()
}

/// Offsets for each display slot of an anchor kind, in slot order.
///
/// Every offset is relative to the anchor's block coordinates (its minimum
/// corner), so a display's world position is `block + offset`.
pub fn offsets_for_kind(kind: AnchorKind, facing: Facing) -> Vec<Vec3> {
    let tf = cell_transform(facing);
    kind.base_offsets()
        .iter()
        .map(|o| o.transform_horizontal(tf))
        .collect()
}

/// Offsets for each display slot of the anchor subtype `subtype`, in slot order.
///
/// This is recomputed on every insertion: the facing is reread from the host
/// each time and is not cached alongside the attachment.
pub fn slot_offsets(subtype: &str, facing: Facing) -> Vec<Vec3> {
    offsets_for_kind(AnchorKind::classify(subtype), facing)
}

/// Capacity of the anchor subtype `subtype`.
pub fn capacity(subtype: &str) -> usize {
    AnchorKind::classify(subtype).capacity()
}
