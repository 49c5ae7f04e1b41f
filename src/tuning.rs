//! Data-driven game balance
//!
//! Every gameplay constant lives here so balance passes don't touch
//! simulation code. Loaded from JSON; missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Balance constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Lateral speed (units/s)
    pub player_speed: f32,
    /// Seconds between shots
    pub shoot_cooldown: f32,
    /// Lives at the start of a run
    pub starting_lives: u8,
    /// Grace period after losing a life (s)
    pub invincibility_time: f32,
    /// Hidden time between a non-fatal hit and the respawn (s)
    pub respawn_delay: f32,
    /// Score at which the twin diagonal gun unlocks
    pub gun_upgrade_score: u64,

    // === Projectiles ===
    pub projectile_speed: f32,
    /// Max live projectiles per enemy
    pub enemy_projectile_cap: usize,

    // === Enemies ===
    /// Entry flight and formation correction speed (units/s)
    pub enemy_speed: f32,
    /// Fixed-direction dive speed, wave tier 1
    pub dive_speed_tier1: f32,
    /// Fixed-direction dive speed, wave tier 2
    pub dive_speed_tier2: f32,
    /// Base speed for continuous homing, wave tier 3+
    pub homing_speed: f32,
    /// Fraction of `homing_speed` actually used while homing
    pub homing_factor: f32,
    /// Hard limit on a single dive (s)
    pub max_attack_time: f32,
    /// Seconds between enemy shots during a dive (tier 2; halved at tier 3+)
    pub enemy_fire_interval: f32,

    // === Formation ===
    pub formation_speed: f32,
    /// Sway reverses once |offset| exceeds this
    pub formation_amplitude: f32,
    pub dive_interval: f32,
    /// Dive interval from wave 3 on
    pub dive_interval_fast: f32,

    // === Run ===
    /// Clearing this wave wins the run
    pub final_wave: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 250.0,
            shoot_cooldown: 0.3,
            starting_lives: 3,
            invincibility_time: 2.0,
            respawn_delay: 0.49,
            gun_upgrade_score: 3000,

            projectile_speed: 400.0,
            enemy_projectile_cap: 8,

            enemy_speed: 150.0,
            dive_speed_tier1: 180.0,
            dive_speed_tier2: 240.0,
            homing_speed: 320.0,
            homing_factor: 0.7,
            max_attack_time: 3.0,
            enemy_fire_interval: 1.0,

            formation_speed: 20.0,
            formation_amplitude: 30.0,
            dive_interval: 3.0,
            dive_interval_fast: 1.5,

            final_wave: 3,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and sanitize it
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate();
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from disk, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reset non-positive rates and durations to their defaults
    pub fn validate(&mut self) {
        let defaults = Self::default();

        let positive_fields: [(&str, &mut f32, f32); 15] = [
            ("player_speed", &mut self.player_speed, defaults.player_speed),
            ("shoot_cooldown", &mut self.shoot_cooldown, defaults.shoot_cooldown),
            ("invincibility_time", &mut self.invincibility_time, defaults.invincibility_time),
            ("respawn_delay", &mut self.respawn_delay, defaults.respawn_delay),
            ("projectile_speed", &mut self.projectile_speed, defaults.projectile_speed),
            ("enemy_speed", &mut self.enemy_speed, defaults.enemy_speed),
            ("dive_speed_tier1", &mut self.dive_speed_tier1, defaults.dive_speed_tier1),
            ("dive_speed_tier2", &mut self.dive_speed_tier2, defaults.dive_speed_tier2),
            ("homing_speed", &mut self.homing_speed, defaults.homing_speed),
            ("homing_factor", &mut self.homing_factor, defaults.homing_factor),
            ("max_attack_time", &mut self.max_attack_time, defaults.max_attack_time),
            ("enemy_fire_interval", &mut self.enemy_fire_interval, defaults.enemy_fire_interval),
            ("formation_amplitude", &mut self.formation_amplitude, defaults.formation_amplitude),
            ("dive_interval", &mut self.dive_interval, defaults.dive_interval),
            ("dive_interval_fast", &mut self.dive_interval_fast, defaults.dive_interval_fast),
        ];

        for (name, value, default) in positive_fields {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("Tuning {} = {} is not positive, using {}", name, value, default);
                *value = default;
            }
        }

        if self.formation_speed < 0.0 || !self.formation_speed.is_finite() {
            log::warn!("Tuning formation_speed = {} is invalid, using {}", self.formation_speed, defaults.formation_speed);
            self.formation_speed = defaults.formation_speed;
        }
        if self.starting_lives == 0 {
            log::warn!("Tuning starting_lives = 0, using {}", defaults.starting_lives);
            self.starting_lives = defaults.starting_lives;
        }
        if self.final_wave == 0 {
            self.final_wave = defaults.final_wave;
        }
    }

    /// Dive interval for a wave (faster from wave 3)
    pub fn dive_interval_for_wave(&self, wave: u32) -> f32 {
        if wave >= 3 {
            self.dive_interval_fast
        } else {
            self.dive_interval
        }
    }
}
