// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

use crate::types::{BlockPos, InventorySlot};

/// Why a target block could not be used as an anchor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetFault {
    /// The chunk containing the block is not loaded.
    ChunkNotLoaded,
    /// There is no block at the position.
    NoBlock,
    /// The host could not create a block entity for the block.
    NoBlockEntity,
}

/// Failure of an interaction. Each variant ends the interaction in the failed state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlanterError {
    /// The target block could not be resolved.
    #[error("invalid target at {pos}: {fault:?}")]
    InvalidTarget {
        /// Target position.
        pos: BlockPos,
        /// What was missing.
        fault: TargetFault,
    },
    /// The anchor already holds as many displays as it has slots.
    #[error("anchor at {anchor} is full ({capacity} slots)")]
    CapacityExceeded {
        /// Anchor position.
        anchor: BlockPos,
        /// Slot count of the anchor subtype.
        capacity: usize,
    },
    /// Nothing is held, or the held item is not plantable.
    #[error("item {item_id:?} is not plantable")]
    NotPlantable {
        /// Held item id, if anything was held.
        item_id: Option<String>,
    },
    /// Not a single display could be created.
    #[error("no display could be created for anchor at {anchor}")]
    CreationFailure {
        /// Anchor position.
        anchor: BlockPos,
    },
    /// The held item could not be removed from the actor's inventory.
    #[error("could not debit inventory slot {slot}")]
    InventoryDebitFailure {
        /// Slot that was debited.
        slot: InventorySlot,
    },
    /// Removal was requested but the anchor holds no displays.
    #[error("nothing attached to anchor at {anchor}")]
    NothingAttached {
        /// Anchor position.
        anchor: BlockPos,
    },
}

/// Failure to load a [`PlanterConfig`](crate::PlanterConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document did not parse.
    #[error("failed to parse planter config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but is out of range.
    #[error("invalid planter config: {0}")]
    Invalid(String),
}
