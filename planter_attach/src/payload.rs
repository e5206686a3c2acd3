// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display payload, markers and spawn descriptions.

use planter_geometry::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{BlockPos, DisplayId, ItemStack};

/// Data carried by a display object: what it shows and which anchor owns it.
///
/// Both fields are fixed at creation. The content is always a single unit and
/// the anchor position is a weak back reference that may dangle after the
/// anchor is destroyed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPayload {
    content: ItemStack,
    anchor_position: Option<BlockPos>,
}

impl DisplayPayload {
    /// Build a payload, normalizing `content` to quantity 1.
    ///
    /// An empty stack stays empty.
    pub fn new(content: &ItemStack, anchor_position: Option<BlockPos>) -> Self {
        let content = if content.is_empty() {
            ItemStack::default()
        } else {
            content.with_quantity(1)
        };
        Self {
            content,
            anchor_position,
        }
    }

    /// The displayed item (quantity 1, or empty).
    pub fn content(&self) -> &ItemStack {
        &self.content
    }

    /// Coordinates of the owning anchor, if any were recorded.
    pub fn anchor_position(&self) -> Option<BlockPos> {
        self.anchor_position
    }
}

bitflags::bitflags! {
    /// Host markers attached to a display object when it is spawned.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DisplayMarkers: u8 {
        /// Actors cannot pick the display up.
        const PREVENT_PICKUP          = 0b0000_0001;
        /// The host never merges the display with nearby item entities.
        const PREVENT_MERGING         = 0b0000_0010;
        /// Decorative prop: no physics, no despawn timer.
        const PROP                    = 0b0000_0100;
        /// Copied along with prefabs that contain the anchor.
        const PREFAB_COPYABLE         = 0b0000_1000;
        /// Suppress the host's default item drop animation.
        const OVERRIDE_DROP_ANIMATION = 0b0001_0000;
        /// Render as the block model of the item instead of its icon.
        const BLOCK_MODEL             = 0b0010_0000;
    }
}

impl Default for DisplayMarkers {
    fn default() -> Self {
        Self::PREVENT_PICKUP
            | Self::PREVENT_MERGING
            | Self::PROP
            | Self::PREFAB_COPYABLE
            | Self::OVERRIDE_DROP_ANIMATION
    }
}

impl DisplayMarkers {
    /// Markers for a display of an item, adding [`Self::BLOCK_MODEL`] when it places a block.
    pub fn for_item(places_block: bool) -> Self {
        let mut m = Self::default();
        m.set(Self::BLOCK_MODEL, places_block);
        m
    }
}

/// Everything the host needs to create one display object.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplaySpawn {
    /// Identifier minted for the display.
    pub id: DisplayId,
    /// World position.
    pub position: Vec3,
    /// Yaw in whole degrees, `0..360`.
    pub yaw_degrees: f32,
    /// Uniform model scale.
    pub scale: f32,
    /// Host markers.
    pub markers: DisplayMarkers,
    /// Content and anchor back reference.
    pub payload: DisplayPayload,
}
