// Copyright 2025 the Planter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for slot geometry: 3D offsets and quarter-turn facings.

use core::ops::{Add, Sub};

use kurbo::{Affine, Point};

/// A 3D vector in block-local or world space.
///
/// `y` is the vertical axis. Rotations act on the horizontal `(x, z)` plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// East/west component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
    /// North/south component.
    pub z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Project onto the horizontal plane as a 2D point `(x, z)`.
    pub const fn horizontal(self) -> Point {
        Point::new(self.x, self.z)
    }

    /// Rebuild a vector from a horizontal point and a height.
    pub const fn from_horizontal(p: Point, y: f64) -> Self {
        Self::new(p.x, y, p.y)
    }

    /// Apply a horizontal-plane transform, leaving `y` untouched.
    pub fn transform_horizontal(self, tf: Affine) -> Self {
        Self::from_horizontal(tf * self.horizontal(), self.y)
    }

    /// Returns true if every component is within `eps` of `other`.
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        let d = self - other;
        [d.x, d.y, d.z].iter().all(|c| *c <= eps && -*c <= eps)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Discrete facing of an anchor: one of four cardinal rotations.
///
/// The host stores a rotation index per block. Index `n` corresponds to a yaw
/// of `-n * 90` degrees about the vertical axis.
///
/// ## Normalization
///
/// [`Facing::from_index`] wraps any integer into `0..=3`, so a negative or
/// oversized index read from the host never panics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Facing(u8);

impl Facing {
    /// All four facings in index order.
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    /// Build a facing from a host rotation index, wrapping modulo 4.
    pub const fn from_index(index: i32) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "rem_euclid(4) is always in 0..4."
        )]
        let idx = index.rem_euclid(4) as u8;
        Self(idx)
    }

    /// The rotation index in `0..=3`.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Yaw in degrees applied to slot offsets for this facing.
    pub const fn yaw_degrees(self) -> i32 {
        -(self.0 as i32) * 90
    }

    /// Exact cosine and sine of [`Facing::yaw_degrees`].
    const fn cos_sin(self) -> (f64, f64) {
        match self.0 {
            0 => (1.0, 0.0),
            1 => (0.0, -1.0),
            2 => (-1.0, 0.0),
            _ => (0.0, 1.0),
        }
    }

    /// Horizontal-plane rotation for this facing.
    ///
    /// Maps `(x, z)` to `(x cos θ - z sin θ, x sin θ + z cos θ)` with
    /// `θ = -index * 90°`. Quarter turns use exact coefficients.
    pub const fn rotation(self) -> Affine {
        let (c, s) = self.cos_sin();
        Affine::new([c, s, -s, c, 0.0, 0.0])
    }
}

/// Classification of an anchor subtype, which fixes its slot table and capacity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// Tall/shelf planter with three slots in a row.
    Tall,
    /// Pot with a single centered slot.
    Pot,
    /// Anything else: a single centered, lower slot.
    Plain,
}

impl AnchorKind {
    /// Classify a subtype (block type id) by substring, ignoring ASCII case.
    ///
    /// `tall` takes precedence over `pot`.
    pub fn classify(subtype: &str) -> Self {
        if contains_ignore_ascii_case(subtype, "tall") {
            Self::Tall
        } else if contains_ignore_ascii_case(subtype, "pot") {
            Self::Pot
        } else {
            Self::Plain
        }
    }

    /// Number of display slots for this kind.
    pub const fn capacity(self) -> usize {
        self.base_offsets().len()
    }

    /// Unrotated slot offsets, relative to the cell's horizontal center.
    pub const fn base_offsets(self) -> &'static [Vec3] {
        match self {
            Self::Tall => &TALL_OFFSETS,
            Self::Pot => &POT_OFFSETS,
            Self::Plain => &PLAIN_OFFSETS,
        }
    }
}

const TALL_OFFSETS: [Vec3; 3] = [
    Vec3::new(0.3, 0.9, -0.35),
    Vec3::new(0.0, 0.9, -0.35),
    Vec3::new(-0.3, 0.9, -0.35),
];
const POT_OFFSETS: [Vec3; 1] = [Vec3::new(0.0, 0.55, 0.0)];
const PLAIN_OFFSETS: [Vec3; 1] = [Vec3::new(0.0, 0.5, 0.0)];

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    n.is_empty() || h.windows(n.len()).any(|w| w.eq_ignore_ascii_case(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_wraps_modulo_four() {
        assert_eq!(Facing::from_index(4), Facing::from_index(0));
        assert_eq!(Facing::from_index(-1).index(), 3);
        assert_eq!(Facing::from_index(7).index(), 3);
        assert_eq!(Facing::from_index(2).yaw_degrees(), -180);
    }

    #[test]
    fn quarter_turns_are_exact() {
        let p = Vec3::new(0.3, 0.9, -0.35);
        let expected = [
            Vec3::new(0.3, 0.9, -0.35),
            Vec3::new(-0.35, 0.9, -0.3),
            Vec3::new(-0.3, 0.9, 0.35),
            Vec3::new(0.35, 0.9, 0.3),
        ];
        for (f, want) in Facing::ALL.into_iter().zip(expected) {
            assert_eq!(p.transform_horizontal(f.rotation()), want, "facing {f:?}");
        }
    }

    #[test]
    fn classify_is_case_insensitive_and_prefers_tall() {
        assert_eq!(AnchorKind::classify("tall"), AnchorKind::Tall);
        assert_eq!(
            AnchorKind::classify("Immersive_Gardening_Planter_Tall"),
            AnchorKind::Tall
        );
        assert_eq!(AnchorKind::classify("pot"), AnchorKind::Pot);
        assert_eq!(AnchorKind::classify("Planter_Pot"), AnchorKind::Pot);
        assert_eq!(AnchorKind::classify("Tall_Pot"), AnchorKind::Tall);
        assert_eq!(AnchorKind::classify("Planter_Box"), AnchorKind::Plain);
        assert_eq!(AnchorKind::classify(""), AnchorKind::Plain);
    }

    #[test]
    fn capacities() {
        assert_eq!(AnchorKind::Tall.capacity(), 3);
        assert_eq!(AnchorKind::Pot.capacity(), 1);
        assert_eq!(AnchorKind::Plain.capacity(), 1);
    }
}
