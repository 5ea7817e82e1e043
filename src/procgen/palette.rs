//! Brick palette
//!
//! An ordered list of brick-type tiers, weakest first, indexable by a
//! fractional difficulty value. Loaded once and never mutated at runtime.

use serde::Serialize;

/// A brick type: a plain value with no behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrickType {
    pub name: &'static str,
    pub destructible: bool,
    pub hit_points: u8,
    pub score: u32,
    /// Packed 0xRRGGBB tint for rendering
    pub tint: u32,
}

impl BrickType {
    /// The indestructible obstacle type, outside the tier order
    pub const OBSTACLE: BrickType = BrickType {
        name: "obstacle",
        destructible: false,
        hit_points: 0,
        score: 0,
        tint: 0x8a_8f_98,
    };
}

/// Ordered sequence of brick tiers, index 0 = weakest.
///
/// Must be non-empty before use in a build; `LevelGen::build` rejects an
/// empty palette before any placement.
#[derive(Debug, Clone, Serialize)]
pub struct Palette {
    tiers: Vec<BrickType>,
}

impl Palette {
    pub fn new(tiers: Vec<BrickType>) -> Self {
        Self { tiers }
    }

    /// The default five-tier palette
    pub fn standard() -> Self {
        Self::new(vec![
            BrickType {
                name: "chalk",
                destructible: true,
                hit_points: 1,
                score: 10,
                tint: 0xd8_e1_e8,
            },
            BrickType {
                name: "amber",
                destructible: true,
                hit_points: 1,
                score: 20,
                tint: 0xff_b4_54,
            },
            BrickType {
                name: "ember",
                destructible: true,
                hit_points: 2,
                score: 35,
                tint: 0xff_6d_3a,
            },
            BrickType {
                name: "violet",
                destructible: true,
                hit_points: 2,
                score: 50,
                tint: 0x9a_5c_ff,
            },
            BrickType {
                name: "onyx",
                destructible: true,
                hit_points: 3,
                score: 80,
                tint: 0x3b_3f_4a,
            },
        ])
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Tier index for a fractional difficulty value.
    ///
    /// Rounds to the nearest valid index; out-of-range values clamp to the
    /// nearest end.
    pub fn tier_index(&self, t: f32) -> usize {
        let last = (self.tiers.len() - 1) as i32;
        let idx = (t * last as f32).round() as i32;
        idx.clamp(0, last) as usize
    }

    /// Tier lookup for `t` in `[0, 1]`
    pub fn tier(&self, t: f32) -> &BrickType {
        &self.tiers[self.tier_index(t)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_endpoints() {
        let p = Palette::standard();
        assert_eq!(p.tier(0.0).name, "chalk");
        assert_eq!(p.tier(1.0).name, "onyx");
    }

    #[test]
    fn test_tier_rounds_to_nearest() {
        let p = Palette::standard(); // 5 tiers, indices 0..=4
        assert_eq!(p.tier_index(0.5), 2);
        assert_eq!(p.tier_index(0.12), 0);
        assert_eq!(p.tier_index(0.13), 1);
    }

    #[test]
    fn test_tier_clamps_out_of_range() {
        let p = Palette::standard();
        assert_eq!(p.tier_index(-0.5), 0);
        assert_eq!(p.tier_index(1.5), 4);
    }

    #[test]
    fn test_obstacle_is_indestructible() {
        assert!(!BrickType::OBSTACLE.destructible);
        assert_eq!(BrickType::OBSTACLE.score, 0);
    }

    #[test]
    fn test_standard_palette_ordered_weak_to_strong() {
        let p = Palette::standard();
        let scores: Vec<u32> = (0..p.len())
            .map(|i| p.tier(i as f32 / (p.len() - 1) as f32).score)
            .collect();
        let mut sorted = scores.clone();
        sorted.sort_unstable();
        assert_eq!(scores, sorted);
    }
}
