//! Enemy behaviour state machine
//!
//! Entering -> InFormation -> Attacking -> Returning -> InFormation.
//! Horizontal position while in formation belongs to the formation
//! controller; everything else is driven from [`Enemy::update`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Body, Entity};
use super::projectile::{PROJECTILE_WIDTH, Projectile, update_projectiles};
use super::steering::{Step, chase_velocity, settle_vertical, step_toward};
use super::vector::heading;
use crate::PlayField;
use crate::consts::ARRIVE_DISTANCE;
use crate::tuning::Tuning;

/// Stable enemy identifier (unique within a run)
pub type EnemyId = u32;

pub const ENEMY_SIZE: f32 = 28.0;
/// Hitbox shrink per side to match the sprite silhouette
pub const ENEMY_HITBOX_INSET: f32 = 8.0;

/// Enemy kinds and their score values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    GreyAlien,
    PurpleAlien,
    YellowAlien,
    BlueBumble,
    RedBumble,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::GreyAlien,
        EnemyKind::PurpleAlien,
        EnemyKind::YellowAlien,
        EnemyKind::BlueBumble,
        EnemyKind::RedBumble,
    ];

    pub fn points(self) -> u32 {
        match self {
            EnemyKind::GreyAlien => 100,
            EnemyKind::PurpleAlien => 150,
            EnemyKind::YellowAlien => 100,
            EnemyKind::BlueBumble => 150,
            EnemyKind::RedBumble => 200,
        }
    }
}

/// Behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Flying the entry path toward the formation anchor
    Entering,
    /// Holding a formation slot
    InFormation,
    /// Diving at the player
    Attacking,
    /// Dive just ended; becomes InFormation on the next update
    Returning,
}

/// Difficulty bracket derived from the wave number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WaveTier {
    /// Slow fixed-direction dives, no shooting
    One,
    /// Faster fixed-direction dives, shoots while diving
    Two,
    /// Continuous homing, double fire rate
    Three,
}

impl WaveTier {
    pub fn from_wave(wave: u32) -> Self {
        match wave {
            0 | 1 => WaveTier::One,
            2 => WaveTier::Two,
            _ => WaveTier::Three,
        }
    }

    pub fn shoots(self) -> bool {
        self >= WaveTier::Two
    }
}

/// Tier-dependent movement and weapon constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    /// Entry flight and vertical formation correction
    pub movement_speed: f32,
    /// Dive speed (fixed-direction tiers) or effective homing speed
    pub attack_speed: f32,
    pub max_attack_time: f32,
    /// `None` for tiers that never shoot
    pub fire_interval: Option<f32>,
    pub projectile_speed: f32,
    pub projectile_cap: usize,
}

impl EnemyProfile {
    pub fn for_tier(tuning: &Tuning, tier: WaveTier) -> Self {
        let (attack_speed, fire_interval) = match tier {
            WaveTier::One => (tuning.dive_speed_tier1, None),
            WaveTier::Two => (tuning.dive_speed_tier2, Some(tuning.enemy_fire_interval)),
            WaveTier::Three => (
                tuning.homing_speed * tuning.homing_factor,
                Some(tuning.enemy_fire_interval * 0.5),
            ),
        };
        Self {
            movement_speed: tuning.enemy_speed,
            attack_speed,
            max_attack_time: tuning.max_attack_time,
            fire_interval,
            projectile_speed: tuning.projectile_speed,
            projectile_cap: tuning.enemy_projectile_cap,
        }
    }
}

/// A single enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub body: Body,
    pub points: u32,
    /// Formation slot, fixed at wave build time
    pub formation_pos: Vec2,
    pub state: EnemyState,
    entry_path: Vec<Vec2>,
    entry_index: usize,
    wave: u32,
    tier: WaveTier,
    profile: EnemyProfile,
    /// Shots fired during dives
    pub projectiles: Vec<Projectile>,
    attack_timer: f32,
    /// Locked dive velocity for fixed-direction tiers
    dive_velocity: Option<Vec2>,
    shoot_cooldown: f32,
}

impl Enemy {
    /// New enemy sitting on its formation slot, tuned for wave 1
    pub fn new(id: EnemyId, kind: EnemyKind, formation_pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            kind,
            body: Body::new(formation_pos, Vec2::splat(ENEMY_SIZE)),
            points: kind.points(),
            formation_pos,
            state: EnemyState::Entering,
            entry_path: Vec::new(),
            entry_index: 0,
            wave: 1,
            tier: WaveTier::One,
            profile: EnemyProfile::for_tier(tuning, WaveTier::One),
            projectiles: Vec::new(),
            attack_timer: 0.0,
            dive_velocity: None,
            shoot_cooldown: 0.0,
        }
    }

    /// Set the difficulty wave and retune speeds and fire rate
    pub fn set_wave(&mut self, wave: u32, tuning: &Tuning) {
        self.wave = wave;
        self.tier = WaveTier::from_wave(wave);
        self.profile = EnemyProfile::for_tier(tuning, self.tier);
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn tier(&self) -> WaveTier {
        self.tier
    }

    pub fn profile(&self) -> &EnemyProfile {
        &self.profile
    }

    pub fn attack_timer(&self) -> f32 {
        self.attack_timer
    }

    /// Replace the entry path and restart it
    pub fn set_entry_path(&mut self, path: Vec<Vec2>) {
        self.entry_path = path;
        self.entry_index = 0;
    }

    pub fn entry_path(&self) -> &[Vec2] {
        &self.entry_path
    }

    /// Advance one tick. `target` is the player's centre, or `None` when
    /// there is no live player to chase.
    pub fn update(&mut self, dt: f32, field: &PlayField, target: Option<Vec2>) {
        match self.state {
            EnemyState::Entering => self.update_entry(dt),
            EnemyState::InFormation => self.update_formation(dt),
            EnemyState::Attacking => self.update_attack(dt, target),
            EnemyState::Returning => {
                self.state = EnemyState::InFormation;
                self.update_formation(dt);
            }
        }

        update_projectiles(&mut self.projectiles, dt, field);

        // Stragglers that left the screen after a dive
        if self.state != EnemyState::Entering && self.body.is_off_screen(field) {
            log::debug!("Enemy {} left the field while {:?}", self.id, self.state);
            self.body.destroy();
        }
    }

    fn update_entry(&mut self, dt: f32) {
        let Some(&waypoint) = self.entry_path.get(self.entry_index) else {
            self.body.pos = self.formation_pos;
            self.body.vel = Vec2::ZERO;
            self.state = EnemyState::InFormation;
            return;
        };

        if step_toward(&mut self.body, waypoint, self.profile.movement_speed, dt) == Step::Arrived {
            self.entry_index += 1;
        }
    }

    fn update_formation(&mut self, dt: f32) {
        settle_vertical(&mut self.body, self.formation_pos.y, self.profile.movement_speed, dt);
    }

    fn update_attack(&mut self, dt: f32, target: Option<Vec2>) {
        self.attack_timer += dt;
        if self.attack_timer >= self.profile.max_attack_time {
            self.end_attack();
            return;
        }

        let Some(target) = target else {
            self.end_attack();
            return;
        };

        let center = self.body.center();
        match self.tier {
            WaveTier::One | WaveTier::Two => {
                let speed = self.profile.attack_speed;
                let vel = *self.dive_velocity.get_or_insert_with(|| {
                    chase_velocity(center, target, speed).unwrap_or(Vec2::new(0.0, speed))
                });
                self.body.vel = vel;
                self.body.integrate(dt);
            }
            WaveTier::Three => match heading(center, target) {
                Some((dir, distance)) if distance >= ARRIVE_DISTANCE => {
                    self.body.vel = dir * self.profile.attack_speed;
                    self.body.integrate(dt);
                }
                _ => {
                    self.end_attack();
                    return;
                }
            },
        }

        self.update_shooting(dt);
    }

    fn update_shooting(&mut self, dt: f32) {
        let Some(interval) = self.profile.fire_interval else {
            return;
        };

        self.shoot_cooldown -= dt;
        if self.shoot_cooldown <= 0.0 {
            if self.projectiles.len() < self.profile.projectile_cap {
                let muzzle = Vec2::new(
                    self.body.pos.x + self.body.size.x / 2.0 - PROJECTILE_WIDTH / 2.0,
                    self.body.pos.y + self.body.size.y,
                );
                self.projectiles
                    .push(Projectile::enemy_shot(muzzle, self.profile.projectile_speed));
            }
            self.shoot_cooldown = interval;
        }
    }

    /// Peel off and dive. No-op unless currently in formation.
    pub fn trigger_attack(&mut self) -> bool {
        if self.state != EnemyState::InFormation {
            return false;
        }

        self.state = EnemyState::Attacking;
        self.attack_timer = 0.0;
        self.dive_velocity = None;
        if self.tier.shoots() {
            self.shoot_cooldown = 0.0;
        }
        log::debug!("Enemy {} ({:?}) starts a dive", self.id, self.kind);
        true
    }

    fn end_attack(&mut self) {
        self.state = EnemyState::Returning;
        self.attack_timer = 0.0;
        self.dive_velocity = None;
        self.body.vel = Vec2::ZERO;
    }

    /// Follow the formation's horizontal sway
    pub fn apply_sway(&mut self, offset_x: f32) {
        self.body.pos.x = self.formation_pos.x + offset_x;
    }

    /// Centre of the nominal box, where destruction effects spawn
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn hitbox(&self) -> Aabb {
        self.body.bounds().inset(
            ENEMY_HITBOX_INSET,
            ENEMY_HITBOX_INSET,
            ENEMY_HITBOX_INSET,
            ENEMY_HITBOX_INSET,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn enemy_at(x: f32, y: f32, wave: u32) -> Enemy {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(1, EnemyKind::GreyAlien, Vec2::new(x, y), &tuning);
        enemy.set_wave(wave, &tuning);
        enemy
    }

    fn in_formation(x: f32, y: f32, wave: u32) -> Enemy {
        let mut enemy = enemy_at(x, y, wave);
        enemy.update(DT, &PlayField::default(), None);
        assert_eq!(enemy.state, EnemyState::InFormation);
        enemy
    }

    #[test]
    fn test_empty_entry_path_lands_immediately() {
        let mut enemy = enemy_at(200.0, 100.0, 1);
        enemy.body.pos = Vec2::new(-50.0, -50.0);
        enemy.body.vel = Vec2::new(10.0, 10.0);
        enemy.update(DT, &PlayField::default(), None);

        assert_eq!(enemy.state, EnemyState::InFormation);
        assert_eq!(enemy.body.pos, Vec2::new(200.0, 100.0));
        assert_eq!(enemy.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_entry_path_is_followed_then_lands() {
        let field = PlayField::default();
        let mut enemy = enemy_at(300.0, 150.0, 1);
        enemy.set_entry_path(vec![
            Vec2::new(-50.0, -50.0),
            Vec2::new(-50.0, 100.0),
            Vec2::new(300.0, 100.0),
            Vec2::new(300.0, 150.0),
        ]);
        enemy.body.pos = Vec2::new(-50.0, -50.0);

        let mut ticks = 0;
        while enemy.state == EnemyState::Entering && ticks < 2000 {
            enemy.update(DT, &field, None);
            ticks += 1;
        }
        assert_eq!(enemy.state, EnemyState::InFormation);
        assert_eq!(enemy.body.pos, Vec2::new(300.0, 150.0));
        assert!(enemy.is_active(), "entering enemies are never culled off-screen");
    }

    #[test]
    fn test_entry_lands_with_coarse_steps() {
        let field = PlayField::default();
        let mut enemy = enemy_at(200.0, 100.0, 1);
        // Each step covers 15 units, the waypoint is 8 away
        enemy.set_entry_path(vec![Vec2::new(208.0, 100.0)]);
        enemy.body.pos = Vec2::new(200.0, 100.0);

        for _ in 0..3 {
            enemy.update(0.1, &field, None);
        }
        assert_eq!(enemy.state, EnemyState::InFormation);
        assert_eq!(enemy.body.pos, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_trigger_attack_only_from_formation() {
        let mut enemy = enemy_at(100.0, 100.0, 1);
        assert!(!enemy.trigger_attack());
        assert_eq!(enemy.state, EnemyState::Entering);

        let mut enemy = in_formation(100.0, 100.0, 1);
        assert!(enemy.trigger_attack());
        assert_eq!(enemy.state, EnemyState::Attacking);
        assert!(!enemy.trigger_attack());
    }

    #[test]
    fn test_tier_one_dive_direction_is_locked() {
        let field = PlayField::default();
        let mut enemy = in_formation(300.0, 80.0, 1);
        enemy.trigger_attack();

        enemy.update(DT, &field, Some(Vec2::new(100.0, 440.0)));
        let first = enemy.body.vel;
        assert!((first.length() - Tuning::default().dive_speed_tier1).abs() < 1e-3);

        for _ in 0..10 {
            enemy.update(DT, &field, Some(Vec2::new(600.0, 440.0)));
        }
        assert_eq!(enemy.state, EnemyState::Attacking);
        assert_eq!(enemy.body.vel, first);
    }

    #[test]
    fn test_tier_two_is_faster_than_tier_one() {
        let tuning = Tuning::default();
        let one = EnemyProfile::for_tier(&tuning, WaveTier::One);
        let two = EnemyProfile::for_tier(&tuning, WaveTier::Two);
        assert!(two.attack_speed > one.attack_speed);
        assert!(one.fire_interval.is_none());
        assert!(two.fire_interval.is_some());
    }

    #[test]
    fn test_tier_three_homes_every_tick() {
        let field = PlayField::default();
        let tuning = Tuning::default();
        let mut enemy = in_formation(300.0, 80.0, 3);
        enemy.trigger_attack();

        enemy.update(DT, &field, Some(Vec2::new(100.0, 440.0)));
        let toward_left = enemy.body.vel;
        assert!(toward_left.x < 0.0);
        let expected = tuning.homing_speed * tuning.homing_factor;
        assert!((toward_left.length() - expected).abs() < 1e-3);

        enemy.update(DT, &field, Some(Vec2::new(600.0, 440.0)));
        let toward_right = enemy.body.vel;
        assert!(toward_right.x > 0.0);
        assert_ne!(toward_left, toward_right);
    }

    #[test]
    fn test_tier_three_returns_when_target_reached() {
        let field = PlayField::default();
        let mut enemy = in_formation(300.0, 80.0, 3);
        enemy.trigger_attack();
        let target = enemy.center() + Vec2::new(2.0, 2.0);
        enemy.update(DT, &field, Some(target));
        assert_eq!(enemy.state, EnemyState::Returning);

        enemy.update(DT, &field, Some(target));
        assert_eq!(enemy.state, EnemyState::InFormation);
    }

    #[test]
    fn test_dive_times_out() {
        let field = PlayField::default();
        let mut enemy = in_formation(300.0, 80.0, 1);
        enemy.trigger_attack();
        // Target straight up keeps the diver on screen
        let target = Vec2::new(314.0, -1000.0);
        let mut elapsed: f32 = 0.0;
        while enemy.state == EnemyState::Attacking && elapsed < 5.0 {
            enemy.body.pos.y = 200.0;
            enemy.update(0.1, &field, Some(target));
            elapsed += 0.1;
        }
        assert_eq!(enemy.state, EnemyState::Returning);
        assert!((elapsed - 3.0).abs() < 0.11);
        assert_eq!(enemy.attack_timer(), 0.0);
    }

    #[test]
    fn test_missing_player_aborts_dive() {
        let mut enemy = in_formation(300.0, 80.0, 2);
        enemy.trigger_attack();
        enemy.update(DT, &PlayField::default(), None);
        assert_eq!(enemy.state, EnemyState::Returning);
        assert_eq!(enemy.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_tier_two_fires_immediately_then_on_interval() {
        // Tall field so the first shot is still alive when the second fires
        let field = PlayField::new(640.0, 2000.0);
        let mut enemy = in_formation(300.0, 80.0, 2);
        enemy.trigger_attack();
        let target = Vec2::new(300.0, 440.0);

        enemy.update(DT, &field, Some(target));
        assert_eq!(enemy.projectiles.len(), 1);
        assert!(!enemy.projectiles[0].from_player);

        // Interval is 1.0s: no second shot before it elapses
        for _ in 0..50 {
            enemy.update(DT, &field, Some(target));
        }
        assert_eq!(enemy.projectiles.len(), 1);
        for _ in 0..15 {
            enemy.update(DT, &field, Some(target));
        }
        assert_eq!(enemy.projectiles.len(), 2);
    }

    #[test]
    fn test_tier_one_never_fires() {
        let field = PlayField::default();
        let mut enemy = in_formation(300.0, 80.0, 1);
        enemy.trigger_attack();
        for _ in 0..60 {
            enemy.update(DT, &field, Some(Vec2::new(300.0, 440.0)));
        }
        assert!(enemy.projectiles.is_empty());
    }

    #[test]
    fn test_formation_corrects_vertical_only() {
        let field = PlayField::default();
        let mut enemy = in_formation(300.0, 80.0, 1);
        enemy.body.pos = Vec2::new(250.0, 200.0);
        enemy.update(0.1, &field, None);
        assert_eq!(enemy.body.pos.x, 250.0);
        assert!((enemy.body.pos.y - 185.0).abs() < 1e-3);
    }

    #[test]
    fn test_off_screen_after_entry_self_destroys() {
        let field = PlayField::default();
        let mut enemy = in_formation(300.0, 80.0, 1);
        enemy.body.pos = Vec2::new(300.0, 600.0);
        enemy.formation_pos.y = 600.0;
        enemy.update(DT, &field, None);
        assert!(!enemy.is_active());
        assert!(enemy.should_clean_up());
    }

    #[test]
    fn test_hitbox_is_inset() {
        let enemy = enemy_at(100.0, 100.0, 1);
        let hitbox = enemy.hitbox();
        assert_eq!(hitbox.min, Vec2::new(108.0, 108.0));
        assert_eq!(hitbox.max, Vec2::new(120.0, 120.0));
    }
}
