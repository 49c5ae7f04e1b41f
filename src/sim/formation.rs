//! Squad controller
//!
//! Owns the live enemy roster, sways the formation side to side and peels
//! a random in-formation enemy off into a dive on a fixed interval.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::enemy::{Enemy, EnemyId, EnemyState};
use super::entity::Entity;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct FormationController {
    enemies: Vec<Enemy>,
    offset_x: f32,
    /// +1 or -1
    direction: f32,
    speed: f32,
    amplitude: f32,
    dive_timer: f32,
    dive_interval: f32,
    rng: Pcg32,
}

impl FormationController {
    pub fn new(enemies: Vec<Enemy>, wave: u32, tuning: &Tuning, seed: u64) -> Self {
        Self {
            enemies,
            offset_x: 0.0,
            direction: 1.0,
            speed: tuning.formation_speed,
            amplitude: tuning.formation_amplitude,
            dive_timer: 0.0,
            dive_interval: tuning.dive_interval_for_wave(wave),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Swap in a new wave's roster and reset sway and dive timing.
    /// The RNG stream carries on.
    pub fn reset(&mut self, enemies: Vec<Enemy>, wave: u32, tuning: &Tuning) {
        self.enemies = enemies;
        self.offset_x = 0.0;
        self.direction = 1.0;
        self.speed = tuning.formation_speed;
        self.amplitude = tuning.formation_amplitude;
        self.dive_timer = 0.0;
        self.dive_interval = tuning.dive_interval_for_wave(wave);
    }

    /// Sway pass then dive pass. Returns the id of the enemy sent diving, if any.
    pub fn update(&mut self, dt: f32) -> Option<EnemyId> {
        self.update_sway(dt);
        self.update_dive(dt)
    }

    fn update_sway(&mut self, dt: f32) {
        self.offset_x += self.speed * self.direction * dt;
        // Past the edge, always head back toward centre
        if self.offset_x > self.amplitude {
            self.direction = -1.0;
        } else if self.offset_x < -self.amplitude {
            self.direction = 1.0;
        }

        let offset = self.offset_x;
        for enemy in self
            .enemies
            .iter_mut()
            .filter(|e| e.state == EnemyState::InFormation && e.is_active())
        {
            enemy.apply_sway(offset);
        }
    }

    fn update_dive(&mut self, dt: f32) -> Option<EnemyId> {
        self.dive_timer += dt;
        if self.dive_timer < self.dive_interval {
            return None;
        }
        self.dive_timer = 0.0;
        self.trigger_random_dive()
    }

    /// Pick one in-formation enemy uniformly at random and send it diving
    pub fn trigger_random_dive(&mut self) -> Option<EnemyId> {
        let candidates: Vec<usize> = self
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.state == EnemyState::InFormation && e.is_active())
            .map(|(i, _)| i)
            .collect();

        if candidates.is_empty() {
            return None;
        }

        let pick = candidates[self.rng.random_range(0..candidates.len())];
        let enemy = &mut self.enemies[pick];
        enemy.trigger_attack().then_some(enemy.id)
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn remove_enemy(&mut self, id: EnemyId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(index))
    }

    /// Evict every enemy flagged for cleanup in one pass
    pub fn remove_destroyed(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|e| !e.should_clean_up());
        before - self.enemies.len()
    }

    pub fn is_wave_cleared(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub fn dive_interval(&self) -> f32 {
        self.dive_interval
    }

    pub fn count_in_state(&self, state: EnemyState) -> usize {
        self.enemies.iter().filter(|e| e.state == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayField;
    use crate::sim::enemy::EnemyKind;
    use glam::Vec2;

    fn settled_roster(n: u32, tuning: &Tuning) -> Vec<Enemy> {
        let field = PlayField::default();
        (0..n)
            .map(|i| {
                let mut e = Enemy::new(i, EnemyKind::GreyAlien, Vec2::new(100.0 + i as f32 * 40.0, 80.0), tuning);
                e.update(0.0, &field, None);
                e
            })
            .collect()
    }

    #[test]
    fn test_sway_reverses_past_amplitude() {
        let tuning = Tuning::default();
        let mut fc = FormationController::new(settled_roster(3, &tuning), 1, &tuning, 7);
        let mut max_offset: f32 = 0.0;
        for _ in 0..600 {
            fc.update_sway(1.0 / 60.0);
            max_offset = max_offset.max(fc.offset_x().abs());
        }
        assert!(max_offset > 30.0);
        assert!(max_offset < 31.0);
        for e in fc.enemies() {
            assert_eq!(e.body.pos.x, e.formation_pos.x + fc.offset_x());
        }
    }

    #[test]
    fn test_sway_ignores_divers() {
        let tuning = Tuning::default();
        let mut fc = FormationController::new(settled_roster(2, &tuning), 1, &tuning, 7);
        fc.enemies_mut()[0].trigger_attack();
        let x = fc.enemies()[0].body.pos.x;
        fc.update(0.5);
        assert_eq!(fc.enemies()[0].body.pos.x, x);
        assert_ne!(fc.enemies()[1].body.pos.x, fc.enemies()[1].formation_pos.x);
    }

    #[test]
    fn test_dive_fires_on_interval() {
        let tuning = Tuning::default();
        let mut fc = FormationController::new(settled_roster(5, &tuning), 1, &tuning, 42);
        assert_eq!(fc.update(2.9), None);
        let id = fc.update(0.2).expect("dive after 3s");
        let diver = fc.enemies().iter().find(|e| e.id == id).unwrap();
        assert_eq!(diver.state, EnemyState::Attacking);
        assert_eq!(fc.count_in_state(EnemyState::Attacking), 1);
    }

    #[test]
    fn test_faster_dives_from_wave_three() {
        let tuning = Tuning::default();
        let fc = FormationController::new(Vec::new(), 3, &tuning, 1);
        assert_eq!(fc.dive_interval(), 1.5);
    }

    #[test]
    fn test_no_candidates_is_noop() {
        let tuning = Tuning::default();
        let mut roster = settled_roster(2, &tuning);
        for e in roster.iter_mut() {
            e.trigger_attack();
        }
        let mut fc = FormationController::new(roster, 1, &tuning, 3);
        assert_eq!(fc.trigger_random_dive(), None);

        let mut empty = FormationController::new(Vec::new(), 1, &tuning, 3);
        assert_eq!(empty.update(10.0), None);
        assert!(empty.is_wave_cleared());
    }

    #[test]
    fn test_add_remove_and_cleanup() {
        let tuning = Tuning::default();
        let mut fc = FormationController::new(settled_roster(3, &tuning), 1, &tuning, 3);
        let extra = Enemy::new(99, EnemyKind::RedBumble, Vec2::new(50.0, 50.0), &tuning);
        fc.add_enemy(extra);
        assert_eq!(fc.enemies().len(), 4);

        assert_eq!(fc.remove_enemy(99).map(|e| e.id), Some(99));
        assert!(fc.remove_enemy(99).is_none());

        fc.enemies_mut()[1].destroy();
        assert_eq!(fc.remove_destroyed(), 1);
        assert_eq!(fc.enemies().len(), 2);
        assert!(!fc.is_wave_cleared());
    }
}
