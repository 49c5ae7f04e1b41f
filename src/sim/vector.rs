//! 2D vector helpers
//!
//! Positions, sizes and velocities are plain `glam::Vec2` values owned by the
//! entity that embeds them.

use glam::Vec2;

/// In-place scaled addition (`self += other * scale`)
pub trait ScaledAdd {
    fn add_scaled(&mut self, other: Vec2, scale: f32);
}

impl ScaledAdd for Vec2 {
    #[inline]
    fn add_scaled(&mut self, other: Vec2, scale: f32) {
        self.x += other.x * scale;
        self.y += other.y * scale;
    }
}

/// Unit direction from `from` toward `to` plus the distance, or `None` when
/// the points coincide
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> Option<(Vec2, f32)> {
    let delta = to - from;
    let distance = delta.length();
    if distance > f32::EPSILON {
        Some((delta / distance, distance))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_scaled() {
        let mut pos = Vec2::new(1.0, 2.0);
        pos.add_scaled(Vec2::new(10.0, -4.0), 0.5);
        assert_eq!(pos, Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_heading() {
        let (dir, dist) = heading(Vec2::ZERO, Vec2::new(3.0, 4.0)).unwrap();
        assert!((dist - 5.0).abs() < 1e-6);
        assert!((dir - Vec2::new(0.6, 0.8)).length() < 1e-6);
        assert!(heading(Vec2::ONE, Vec2::ONE).is_none());
    }
}
