//! Collision detection and response for axis-aligned geometry
//!
//! The ball is a circle; bricks and the paddle are axis-aligned boxes.
//! Detection returns the surface normal and penetration depth so the tick
//! can reflect velocity and correct position in one step.

use glam::Vec2;

/// Result of a circle-vs-box overlap test
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Contact point on the box surface
    pub point: Vec2,
    /// Surface normal pointing toward the circle center (for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

/// Check a circle against an axis-aligned box given by `min`/`max` corners.
///
/// Returns `None` when the shapes are separated. When the circle center is
/// inside the box, the normal points out of the nearest face.
pub fn circle_aabb(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> Option<Hit> {
    let closest = center.clamp(min, max);
    let delta = center - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > radius * radius {
        return None;
    }

    if dist_sq > 1e-12 {
        let dist = dist_sq.sqrt();
        return Some(Hit {
            point: closest,
            normal: delta / dist,
            penetration: radius - dist,
        });
    }

    // Center inside the box: push out along the shallowest face
    let left = center.x - min.x;
    let right = max.x - center.x;
    let down = center.y - min.y;
    let up = max.y - center.y;
    let shallowest = left.min(right).min(down).min(up);

    let normal = if shallowest == left {
        Vec2::NEG_X
    } else if shallowest == right {
        Vec2::X
    } else if shallowest == down {
        Vec2::NEG_Y
    } else {
        Vec2::Y
    };

    Some(Hit {
        point: center,
        normal,
        penetration: radius + shallowest,
    })
}

/// Reflect a velocity about a surface normal
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss() {
        let hit = circle_aabb(Vec2::new(10.0, 0.0), 2.0, Vec2::new(-1.0, -1.0), Vec2::ONE);
        assert!(hit.is_none());
    }

    #[test]
    fn test_hit_from_above() {
        let hit = circle_aabb(
            Vec2::new(0.0, 2.5),
            1.0,
            Vec2::new(-2.0, -2.0),
            Vec2::new(2.0, 2.0),
        )
        .unwrap();
        assert!((hit.normal - Vec2::Y).length() < 1e-5);
        assert!((hit.penetration - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_hit_from_side() {
        let hit = circle_aabb(
            Vec2::new(-2.8, 0.0),
            1.0,
            Vec2::new(-2.0, -2.0),
            Vec2::new(2.0, 2.0),
        )
        .unwrap();
        assert!((hit.normal - Vec2::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_corner_normal_is_diagonal() {
        let hit = circle_aabb(
            Vec2::new(2.5, 2.5),
            1.0,
            Vec2::new(-2.0, -2.0),
            Vec2::new(2.0, 2.0),
        )
        .unwrap();
        assert!(hit.normal.x > 0.0 && hit.normal.y > 0.0);
        assert!((hit.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_center_inside_pushes_out_shallowest_face() {
        let hit = circle_aabb(
            Vec2::new(1.9, 0.0),
            0.5,
            Vec2::new(-2.0, -2.0),
            Vec2::new(2.0, 2.0),
        )
        .unwrap();
        assert!((hit.normal - Vec2::X).length() < 1e-5);
        assert!(hit.penetration > 0.5);
    }

    #[test]
    fn test_reflect_flips_normal_component() {
        let vel = Vec2::new(3.0, -4.0);
        let out = reflect(vel, Vec2::Y);
        assert!((out - Vec2::new(3.0, 4.0)).length() < 1e-5);
        // Tangential reflection preserves speed
        assert!((out.length() - vel.length()).abs() < 1e-5);
    }
}
