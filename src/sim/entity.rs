//! Shared entity contract
//!
//! Player, enemies and projectiles all embed a [`Body`] and implement
//! [`Entity`] to get bounding boxes, screen tests and the destroy lifecycle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector::ScaledAdd;
use crate::PlayField;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box with top-left corner `pos` and extent `size`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink each side independently. An over-shrunk axis collapses to a
    /// line through its midpoint instead of inverting.
    pub fn inset(self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        let mut min = Vec2::new(self.min.x + left, self.min.y + top);
        let mut max = Vec2::new(self.max.x - right, self.max.y - bottom);
        if min.x > max.x {
            let mid = (min.x + max.x) * 0.5;
            min.x = mid;
            max.x = mid;
        }
        if min.y > max.y {
            let mid = (min.y + max.y) * 0.5;
            min.y = mid;
            max.y = mid;
        }
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict overlap on both axes (touching edges don't count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// True if any part of the box is inside the play field (edges inclusive)
    pub fn touches_field(&self, field: &PlayField) -> bool {
        self.max.x >= 0.0 && self.min.x <= field.width && self.max.y >= 0.0 && self.min.y <= field.height
    }
}

/// Kinematic state and lifecycle flags common to every entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    /// Nominal bounding box width/height
    pub size: Vec2,
    pub vel: Vec2,
    /// False once destroyed
    pub active: bool,
    /// Set on destroy; the owning collection evicts on its cleanup pass
    pub cleanup: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            active: true,
            cleanup: false,
        }
    }

    /// Advance position by velocity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos.add_scaled(self.vel, dt);
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn is_off_screen(&self, field: &PlayField) -> bool {
        !self.bounds().touches_field(field)
    }

    pub fn destroy(&mut self) {
        self.cleanup = true;
        self.active = false;
    }
}

/// Capability set shared by all simulated objects
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Collision box. Defaults to the nominal bounds; entities whose
    /// silhouette is smaller than their sprite override this.
    fn hitbox(&self) -> Aabb {
        self.body().bounds()
    }

    fn position(&self) -> Vec2 {
        self.body().pos
    }

    fn is_active(&self) -> bool {
        self.body().active
    }

    fn should_clean_up(&self) -> bool {
        self.body().cleanup
    }

    fn is_off_screen(&self, field: &PlayField) -> bool {
        self.body().is_off_screen(field)
    }

    /// Idempotent
    fn destroy(&mut self) {
        self.body_mut().destroy();
    }

    /// Overlap test using both parties' adjusted hitboxes
    fn did_collide_with(&self, other: &dyn Entity) -> bool {
        self.hitbox().overlaps(&other.hitbox())
    }
}

impl Entity for Body {
    fn body(&self) -> &Body {
        self
    }

    fn body_mut(&mut self) -> &mut Body {
        self
    }
}
