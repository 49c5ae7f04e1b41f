//! Play-session orchestration
//!
//! Owns the player, the squad and the score, and runs one fixed tick in the
//! required order: player, enemies, formation, combat, cleanup.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combat::{CombatReport, resolve_collisions};
use super::enemy::{Enemy, EnemyId};
use super::entity::Entity;
use super::event::GameEvent;
use super::formation::FormationController;
use super::player::{HitOutcome, Player};
use super::projectile::update_projectiles;
use super::wave::build_wave;
use crate::PlayField;
use crate::input::InputQuery;
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Active gameplay
    Playing,
    /// Roster empty, waiting for [`Battle::advance_wave`]
    WaveCleared,
    /// Lives exhausted
    GameOver,
    /// Final wave cleared
    Victory,
}

/// A running play session
#[derive(Debug, Clone)]
pub struct Battle {
    field: PlayField,
    tuning: Tuning,
    wave: u32,
    score: u64,
    phase: BattlePhase,
    player: Player,
    squad: FormationController,
    /// Seconds until the player reappears after a non-fatal hit
    respawn_timer: Option<f32>,
    events: Vec<GameEvent>,
    next_enemy_id: EnemyId,
}

impl Battle {
    /// New session on the default play field, starting at wave 1
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_field(seed, tuning, PlayField::default())
    }

    pub fn with_field(seed: u64, tuning: Tuning, field: PlayField) -> Self {
        let player = Player::new(&field, &tuning);
        let squad = FormationController::new(Vec::new(), 1, &tuning, seed);
        let mut battle = Self {
            field,
            tuning,
            wave: 0,
            score: 0,
            phase: BattlePhase::Playing,
            player,
            squad,
            respawn_timer: None,
            events: Vec::new(),
            next_enemy_id: 1,
        };
        battle.start_wave(1);
        battle
    }

    /// Replace the live roster with a freshly built wave
    pub fn start_wave(&mut self, wave: u32) {
        let roster = build_wave(wave, &self.field, &self.tuning, self.next_enemy_id);
        self.next_enemy_id += roster.len() as EnemyId;
        self.squad.reset(roster, wave, &self.tuning);

        self.wave = wave;
        self.phase = BattlePhase::Playing;
        self.respawn_timer = None;
        self.player.projectiles.clear();
        if self.player.is_active() {
            self.player.respawn(&self.field);
        }

        log::info!("Wave {} started", wave);
        self.events.push(GameEvent::WaveStarted { wave });
    }

    /// Move on from a cleared wave. Returns false if there is nothing to advance.
    pub fn advance_wave(&mut self) -> bool {
        if self.phase != BattlePhase::WaveCleared {
            return false;
        }
        self.start_wave(self.wave + 1);
        true
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self, dt: f32, input: &impl InputQuery) {
        if self.phase != BattlePhase::Playing {
            return;
        }

        self.update_player(dt, input);

        let target = self.chase_target();
        for enemy in self.squad.enemies_mut().iter_mut().filter(|e| e.is_active()) {
            enemy.update(dt, &self.field, target);
        }

        if let Some(id) = self.squad.update(dt) {
            log::debug!("Squad sent enemy {} diving", id);
        }

        let report = resolve_collisions(
            &mut self.player,
            self.squad.enemies_mut(),
            self.respawn_timer.is_some(),
            &mut self.events,
        );
        self.apply_report(&report);

        self.squad.remove_destroyed();
        self.check_wave_clear();
    }

    fn update_player(&mut self, dt: f32, input: &impl InputQuery) {
        match self.respawn_timer {
            Some(remaining) => {
                // Hidden: shots already in flight keep going
                update_projectiles(&mut self.player.projectiles, dt, &self.field);
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.player.respawn(&self.field);
                    self.respawn_timer = None;
                    log::debug!("Player respawned ({} lives)", self.player.lives);
                } else {
                    self.respawn_timer = Some(remaining);
                }
            }
            None if self.player.is_active() => self.player.update(dt, input, &self.field),
            None => {}
        }
    }

    /// Where divers aim; `None` while there is no live, visible player
    fn chase_target(&self) -> Option<Vec2> {
        (self.player.is_active() && self.respawn_timer.is_none()).then(|| self.player.center())
    }

    fn apply_report(&mut self, report: &CombatReport) {
        self.score += report.score;

        if self.score >= self.tuning.gun_upgrade_score && self.player.upgrade_gun() {
            log::info!("Gun upgraded at score {}", self.score);
            self.events.push(GameEvent::GunUpgraded);
        }

        match report.player_outcome {
            Some(HitOutcome::LostLife { lives_left }) => {
                log::info!("Player hit, {} lives left", lives_left);
                self.player.grant_invincibility(self.tuning.invincibility_time);
                self.respawn_timer = Some(self.tuning.respawn_delay);
            }
            Some(HitOutcome::Destroyed) => {
                log::info!("Game over at wave {} with score {}", self.wave, self.score);
                self.phase = BattlePhase::GameOver;
            }
            Some(HitOutcome::Ignored) | None => {}
        }
    }

    fn check_wave_clear(&mut self) {
        if self.phase != BattlePhase::Playing || !self.squad.is_wave_cleared() {
            return;
        }

        log::info!("Wave {} cleared, score {}", self.wave, self.score);
        self.events.push(GameEvent::WaveCleared { wave: self.wave });
        if self.wave >= self.tuning.final_wave {
            self.phase = BattlePhase::Victory;
            self.events.push(GameEvent::Victory);
        } else {
            self.phase = BattlePhase::WaveCleared;
        }
    }

    /// Hand queued events to the scene layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.player.lives
    }

    pub fn is_wave_cleared(&self) -> bool {
        self.squad.is_wave_cleared()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == BattlePhase::GameOver
    }

    pub fn respawn_pending(&self) -> bool {
        self.respawn_timer.is_some()
    }

    pub fn field(&self) -> &PlayField {
        &self.field
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.squad.enemies()
    }

    pub fn formation(&self) -> &FormationController {
        &self.squad
    }

    pub fn formation_mut(&mut self) -> &mut FormationController {
        &mut self.squad
    }
}
