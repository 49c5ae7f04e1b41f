//! Player ship controller
//!
//! Lateral movement, rate-limited shooting, damage and respawn bookkeeping.
//! The ship never moves vertically.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Body, Entity};
use super::projectile::{Lean, PROJECTILE_WIDTH, Projectile, update_projectiles};
use crate::PlayField;
use crate::input::{Action, InputQuery};
use crate::tuning::Tuning;

pub const PLAYER_SIZE: f32 = 32.0;
/// Gap between the ship and the bottom of the field
pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
/// Hitbox shrink on the nose of the ship
pub const PLAYER_FRONT_INSET: f32 = 20.0;

/// Weapon tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GunLevel {
    /// One shot straight up
    Single,
    /// Two diagonal shots at ±45°
    Twin,
}

impl GunLevel {
    pub fn level(self) -> u8 {
        match self {
            GunLevel::Single => 1,
            GunLevel::Twin => 2,
        }
    }
}

/// Result of [`Player::hit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// Invincible or already destroyed
    Ignored,
    /// Lost a life; caller grants invincibility and schedules a respawn
    LostLife { lives_left: u8 },
    /// Last life gone
    Destroyed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub lives: u8,
    gun: GunLevel,
    invincibility_timer: f32,
    pub projectiles: Vec<Projectile>,
    shoot_cooldown: f32,
    speed: f32,
    shot_interval: f32,
    projectile_speed: f32,
}

impl Player {
    /// Ship at the bottom centre of the field
    pub fn new(field: &PlayField, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(Self::spawn_point(field), Vec2::splat(PLAYER_SIZE)),
            lives: tuning.starting_lives,
            gun: GunLevel::Single,
            invincibility_timer: 0.0,
            projectiles: Vec::new(),
            shoot_cooldown: 0.0,
            speed: tuning.player_speed,
            shot_interval: tuning.shoot_cooldown,
            projectile_speed: tuning.projectile_speed,
        }
    }

    fn spawn_point(field: &PlayField) -> Vec2 {
        Vec2::new(
            field.center_x() - PLAYER_SIZE / 2.0,
            field.height - PLAYER_SIZE - PLAYER_BOTTOM_MARGIN,
        )
    }

    pub fn update(&mut self, dt: f32, input: &impl InputQuery, field: &PlayField) {
        self.handle_movement(dt, input, field);
        self.handle_shooting(dt, input);
        update_projectiles(&mut self.projectiles, dt, field);
        self.update_invincibility(dt);
    }

    fn handle_movement(&mut self, dt: f32, input: &impl InputQuery, field: &PlayField) {
        self.body.vel = Vec2::ZERO;
        if input.is_held(Action::MoveLeft) {
            self.body.vel.x = -self.speed;
        }
        if input.is_held(Action::MoveRight) {
            self.body.vel.x = self.speed;
        }
        self.body.integrate(dt);

        let max_x = (field.width - self.body.size.x).max(0.0);
        self.body.pos.x = self.body.pos.x.clamp(0.0, max_x);
    }

    fn handle_shooting(&mut self, dt: f32, input: &impl InputQuery) {
        self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
        if input.is_held(Action::Fire) && self.shoot_cooldown <= 0.0 {
            self.shoot();
        }
    }

    /// Fire according to the gun level, ignoring the cooldown.
    /// Returns the number of projectiles spawned.
    pub fn shoot(&mut self) -> usize {
        let muzzle = Vec2::new(
            self.body.pos.x + self.body.size.x / 2.0 - PROJECTILE_WIDTH / 2.0,
            self.body.pos.y,
        );
        let leans: &[Lean] = match self.gun {
            GunLevel::Single => &[Lean::Straight],
            GunLevel::Twin => &[Lean::Left, Lean::Right],
        };
        for &lean in leans {
            self.projectiles
                .push(Projectile::player_shot(muzzle, self.projectile_speed, lean));
        }
        self.shoot_cooldown = self.shot_interval;
        leans.len()
    }

    fn update_invincibility(&mut self, dt: f32) {
        if self.invincibility_timer > 0.0 {
            self.invincibility_timer = (self.invincibility_timer - dt).max(0.0);
        }
    }

    pub fn gun_level(&self) -> GunLevel {
        self.gun
    }

    /// Unlock the twin gun. Returns false if it was already unlocked.
    pub fn upgrade_gun(&mut self) -> bool {
        if self.gun == GunLevel::Twin {
            return false;
        }
        self.gun = GunLevel::Twin;
        true
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_timer > 0.0
    }

    pub fn invincibility_remaining(&self) -> f32 {
        self.invincibility_timer
    }

    pub fn grant_invincibility(&mut self, seconds: f32) {
        self.invincibility_timer = self.invincibility_timer.max(seconds);
    }

    /// Take one point of damage
    pub fn hit(&mut self) -> HitOutcome {
        if self.is_invincible() || !self.body.active {
            return HitOutcome::Ignored;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.body.destroy();
            HitOutcome::Destroyed
        } else {
            HitOutcome::LostLife {
                lives_left: self.lives,
            }
        }
    }

    /// Back to the spawn point
    pub fn respawn(&mut self, field: &PlayField) {
        self.body.pos = Self::spawn_point(field);
        self.body.vel = Vec2::ZERO;
        self.shoot_cooldown = 0.0;
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn hitbox(&self) -> Aabb {
        self.body.bounds().inset(0.0, PLAYER_FRONT_INSET, 0.0, 0.0)
    }
}
