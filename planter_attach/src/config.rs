// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables shared by handlers and systems.

use planter_geometry::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::host::ItemDrop;
use crate::types::{BlockPos, ItemInfo, ItemStack};

/// Where and how an item drop is placed relative to a block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DropConfig {
    /// Offset from the block's minimum corner.
    pub offset: [f64; 3],
    /// Horizontal jitter amplitude. Zero disables jitter.
    pub jitter: f64,
    /// Subtracted from the uniform sample before scaling by `jitter`.
    pub jitter_bias: f64,
    /// Pickup delay in seconds. `None` leaves the host default.
    pub pickup_delay: Option<f32>,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            offset: [0.5, 0.5, 0.5],
            jitter: 0.0,
            jitter_bias: 0.0,
            pickup_delay: None,
        }
    }
}

impl DropConfig {
    /// Drop at a fixed offset with an optional pickup delay.
    pub const fn at(offset: [f64; 3], pickup_delay: Option<f32>) -> Self {
        Self {
            offset,
            jitter: 0.0,
            jitter_bias: 0.0,
            pickup_delay,
        }
    }

    /// World position of a drop for the block at `pos`.
    ///
    /// With jitter, `x` and `z` each get `(r - jitter_bias) * jitter` for an
    /// independent uniform `r` in `[0, 1)`. The RNG is not touched otherwise.
    pub fn place<R: Rng + ?Sized>(&self, pos: BlockPos, rng: &mut R) -> Vec3 {
        let [ox, oy, oz] = self.offset;
        let mut local = Vec3::new(ox, oy, oz);
        if self.jitter != 0.0 {
            local.x += (rng.random::<f64>() - self.jitter_bias) * self.jitter;
            local.z += (rng.random::<f64>() - self.jitter_bias) * self.jitter;
        }
        pos.offset(local)
    }

    /// A motionless drop of `item` for the block at `pos`.
    pub fn item_drop<R: Rng + ?Sized>(&self, pos: BlockPos, item: ItemStack, rng: &mut R) -> ItemDrop {
        ItemDrop {
            position: self.place(pos, rng),
            velocity: Vec3::ZERO,
            item,
            pickup_delay: self.pickup_delay,
        }
    }
}

/// Configuration for a [`Planter`](crate::Planter).
///
/// Every field has a default, so an empty TOML document is valid:
///
/// ```rust
/// use planter_attach::PlanterConfig;
///
/// let cfg = PlanterConfig::from_toml_str("ticks_per_check = 20").unwrap();
/// assert_eq!(cfg.ticks_per_check, 20);
/// assert_eq!(cfg.plantable_category, "Blocks.Plants");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanterConfig {
    /// Sweep period: a display is checked once every this many of its ticks.
    pub ticks_per_check: u32,
    /// Category an item must carry to be inserted.
    pub plantable_category: String,
    /// Substrings a block type id must all contain to count as an anchor.
    pub anchor_markers: Vec<String>,
    /// Icon scale used when the item declares none.
    pub default_icon_scale: f32,
    /// Multiplier applied to the icon scale to get the display scale.
    pub display_scale_factor: f32,
    /// Drop placement for remove-all.
    pub remove_drop: DropConfig,
    /// Drop placement for the break cascade.
    pub break_drop: DropConfig,
    /// Drop placement for sweep self-destruction.
    pub sweep_drop: DropConfig,
}

impl Default for PlanterConfig {
    fn default() -> Self {
        Self {
            ticks_per_check: 10,
            plantable_category: "Blocks.Plants".into(),
            anchor_markers: vec!["Planter".into(), "Immersive_Gardening".into()],
            default_icon_scale: 0.5,
            display_scale_factor: 0.7,
            remove_drop: DropConfig::at([0.5, 0.5, 0.5], None),
            break_drop: DropConfig {
                offset: [0.0, 1.1, 0.0],
                jitter: 0.2,
                jitter_bias: 0.2,
                pickup_delay: Some(0.0),
            },
            sweep_drop: DropConfig::at([0.5, 1.0, 0.5], Some(0.5)),
        }
    }
}

impl PlanterConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_check == 0 {
            return Err(ConfigError::Invalid("ticks_per_check must be at least 1".into()));
        }
        if self.anchor_markers.iter().all(String::is_empty) {
            return Err(ConfigError::Invalid(
                "anchor_markers needs at least one non-empty marker".into(),
            ));
        }
        for (name, v) in [
            ("default_icon_scale", self.default_icon_scale),
            ("display_scale_factor", self.display_scale_factor),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be finite and positive")));
            }
        }
        Ok(())
    }

    /// True if a block with this type id is a planter anchor.
    pub fn is_anchor_block(&self, block_type: &str) -> bool {
        self.anchor_markers
            .iter()
            .all(|m| block_type.contains(m.as_str()))
    }

    /// True if an item with this metadata may be inserted.
    pub fn is_plantable(&self, info: &ItemInfo) -> bool {
        info.has_category(&self.plantable_category)
    }

    /// Display scale for an item with metadata `info`.
    pub fn display_scale(&self, info: Option<&ItemInfo>) -> f32 {
        let icon = info
            .and_then(|i| i.icon_scale)
            .unwrap_or(self.default_icon_scale);
        icon * self.display_scale_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(PlanterConfig::from_toml_str("").unwrap(), PlanterConfig::default());
    }

    #[test]
    fn nested_drop_tables() {
        let cfg = PlanterConfig::from_toml_str(
            r#"
            anchor_markers = ["Planter"]

            [sweep_drop]
            offset = [0.5, 2.0, 0.5]
            pickup_delay = 1.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.anchor_markers, vec!["Planter".to_string()]);
        assert_eq!(cfg.sweep_drop.offset, [0.5, 2.0, 0.5]);
        assert_eq!(cfg.sweep_drop.pickup_delay, Some(1.5));
        assert_eq!(cfg.break_drop, PlanterConfig::default().break_drop);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            PlanterConfig::from_toml_str("ticks_per_check = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            PlanterConfig::from_toml_str("anchor_markers = []"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            PlanterConfig::from_toml_str("display_scale_factor = -1.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            PlanterConfig::from_toml_str("ticks = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn anchor_blocks_need_every_marker() {
        let cfg = PlanterConfig::default();
        assert!(cfg.is_anchor_block("Immersive_Gardening_Planter_Tall"));
        assert!(!cfg.is_anchor_block("Planter_Tall"));
        assert!(!cfg.is_anchor_block("Rock_Stone"));
    }

    #[test]
    fn display_scale_uses_icon_scale() {
        let cfg = PlanterConfig::default();
        assert!((cfg.display_scale(None) - 0.35).abs() < 1e-6);
        let info = ItemInfo {
            icon_scale: Some(1.0),
            ..ItemInfo::default()
        };
        assert!((cfg.display_scale(Some(&info)) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn break_drop_jitter_stays_in_range() {
        let cfg = PlanterConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let pos = BlockPos::new(4, 10, 4);
        for _ in 0..64 {
            let p = cfg.break_drop.place(pos, &mut rng);
            assert!((p.y - 11.1).abs() < 1e-9, "y = {}", p.y);
            for c in [p.x - 4.0, p.z - 4.0] {
                assert!((-0.04..0.16).contains(&c), "jitter {c} out of range");
            }
        }
    }

    #[test]
    fn fixed_drops_ignore_rng() {
        let cfg = PlanterConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let p = cfg.remove_drop.place(BlockPos::new(1, 2, 3), &mut rng);
        assert!(p.approx_eq(Vec3::new(1.5, 2.5, 3.5), 1e-9));
    }
}
