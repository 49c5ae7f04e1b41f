//! Projectiles fired by the player and by diving enemies
//!
//! Player shots travel up (straight or at 45°), enemy shots straight down.
//! A projectile lives until it leaves the screen or hits something.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use crate::PlayField;

pub const PROJECTILE_WIDTH: f32 = 4.0;
pub const PROJECTILE_HEIGHT: f32 = 12.0;

/// cos(45°) = sin(45°)
pub const DIAGONAL: f32 = 0.707;

/// Horizontal lean of a player shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lean {
    Left,
    Straight,
    Right,
}

impl Lean {
    fn sign(self) -> f32 {
        match self {
            Lean::Left => -1.0,
            Lean::Straight => 0.0,
            Lean::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    /// Provenance; decides what it can hit
    pub from_player: bool,
    pub speed: f32,
}

impl Projectile {
    /// Player shot with its top-left corner at `pos`
    pub fn player_shot(pos: Vec2, speed: f32, lean: Lean) -> Self {
        let mut body = Body::new(pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT));
        body.vel = match lean {
            Lean::Straight => Vec2::new(0.0, -speed),
            _ => {
                let diagonal = speed * DIAGONAL;
                Vec2::new(lean.sign() * diagonal, -diagonal)
            }
        };
        Self {
            body,
            from_player: true,
            speed,
        }
    }

    /// Enemy shot, always straight down
    pub fn enemy_shot(pos: Vec2, speed: f32) -> Self {
        let mut body = Body::new(pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT));
        body.vel = Vec2::new(0.0, speed);
        Self {
            body,
            from_player: false,
            speed,
        }
    }

    pub fn update(&mut self, dt: f32, field: &PlayField) {
        self.body.integrate(dt);
        if self.body.is_off_screen(field) {
            self.body.destroy();
        }
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Advance a projectile list and evict the dead ones
pub fn update_projectiles(projectiles: &mut Vec<Projectile>, dt: f32, field: &PlayField) {
    for projectile in projectiles.iter_mut() {
        projectile.update(dt, field);
    }
    projectiles.retain(|p| !p.body.cleanup);
}
