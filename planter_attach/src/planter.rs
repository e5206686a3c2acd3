// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assembly: one shared configuration handing out handlers and systems.

use std::sync::Arc;

use crate::config::PlanterConfig;
use crate::error::ConfigError;
use crate::interaction::{BlockInteraction, InsertPlant, RemovePlants, TogglePlant};
use crate::lifecycle::{BreakCascade, DisplaySweep};
use crate::reconcile::Reconciler;

/// Entry point for a host integrating planters.
///
/// Build one per world (or per plugin instance) and register what it hands
/// out. Every handler shares the same [`PlanterConfig`].
#[derive(Clone, Debug, Default)]
pub struct Planter {
    config: Arc<PlanterConfig>,
}

impl Planter {
    /// Names the interactions are registered under, in insert, remove, toggle order.
    pub const INTERACTION_NAMES: [&'static str; 3] =
        [InsertPlant::NAME, RemovePlants::NAME, TogglePlant::NAME];

    /// Create an assembly from a validated configuration.
    pub fn new(config: PlanterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Create an assembly from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            config: Arc::new(PlanterConfig::from_toml_str(s)?),
        })
    }

    /// Shared configuration.
    pub fn config(&self) -> &PlanterConfig {
        &self.config
    }

    /// Insert handler.
    pub fn insert_plant(&self) -> InsertPlant {
        InsertPlant::new(self.config.clone())
    }

    /// Remove-all handler.
    pub fn remove_plants(&self) -> RemovePlants {
        RemovePlants::new(self.config.clone())
    }

    /// Toggle handler.
    pub fn toggle_plant(&self) -> TogglePlant {
        TogglePlant::new(self.config.clone())
    }

    /// Break cascade system.
    pub fn break_cascade(&self) -> BreakCascade {
        BreakCascade::new(self.config.clone())
    }

    /// A fresh sweep system with no counters.
    pub fn display_sweep(&self) -> DisplaySweep {
        DisplaySweep::new(self.config.clone())
    }

    /// Reconciler for hosts that drive rebuilds themselves.
    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.config.clone())
    }
}
