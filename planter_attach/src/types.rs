// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value types shared by every layer: block coordinates, display identifiers,
//! item stacks and inventory slots.

use core::fmt;

use planter_geometry::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

/// Integer world coordinates of a block.
///
/// Anchors are identified by their block position. Persisted as three signed
/// integers `[x, y, z]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct BlockPos {
    /// East/west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North/south coordinate.
    pub z: i32,
}

impl BlockPos {
    /// The world origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Create a block position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The block's minimum corner as a floating-point vector.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// World position of a block-local offset.
    pub fn offset(self, local: Vec3) -> Vec3 {
        self.to_vec3() + local
    }
}

impl From<[i32; 3]> for BlockPos {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<BlockPos> for [i32; 3] {
    fn from(p: BlockPos) -> Self {
        [p.x, p.y, p.z]
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Opaque 128-bit identifier of a display object.
///
/// Identifiers are minted by the reconciler before the spawn is applied, so a
/// command batch can refer to a display that does not exist yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayId(Uuid);

impl DisplayId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }

    /// Mint a random (version 4) identifier from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bytes = rng.random::<u128>().to_le_bytes();
        Self(Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A quantity of one kind of item.
///
/// Mirrors the host's item-stack abstraction: an identity id plus a quantity.
/// Classification (categories, icon scale) lives in the host's
/// [`ItemCatalog`](crate::host::ItemCatalog), keyed by [`ItemStack::item_id`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    item_id: String,
    quantity: u32,
}

impl ItemStack {
    /// Create a stack of `quantity` items with the given id.
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }

    /// Item identity.
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Number of items in the stack.
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// True for a stack with no item or a zero quantity.
    pub fn is_empty(&self) -> bool {
        self.quantity == 0 || self.item_id.is_empty()
    }

    /// Copy of this stack with a different quantity.
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            item_id: self.item_id.clone(),
            quantity,
        }
    }
}

/// Item metadata the host knows about an item id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemInfo {
    /// Classification tags, for example `"Blocks.Plants"`.
    pub categories: Vec<String>,
    /// Icon scale from the item's display metadata, if it declares one.
    pub icon_scale: Option<f32>,
    /// True if the item places a block (rendered as a block model when displayed).
    pub places_block: bool,
}

impl ItemInfo {
    /// True if the item carries `category`.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Index of a slot in an actor's inventory container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventorySlot(pub u16);

impl fmt::Display for InventorySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
