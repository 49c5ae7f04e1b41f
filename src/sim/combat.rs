//! Per-tick collision and combat resolution
//!
//! Runs after every entity has moved. Pass order is fixed:
//! 1. player shots vs enemies (score)
//! 2. enemy shots vs player
//! 3. player body vs enemies (no score)
//!
//! Enemies killed in pass 1 are inactive by pass 3, so a kill is never
//! counted twice in one tick. Pass 3 destroys every enemy touching the
//! ship, but the player loses at most one life per tick.

use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::entity::Entity;
use super::event::{ExplosionKind, GameEvent};
use super::player::{HitOutcome, Player};

/// Summary of one resolver pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatReport {
    /// Points earned this tick
    pub score: u64,
    /// Enemies destroyed by player shots
    pub shot_kills: usize,
    /// Enemies destroyed by ramming the player
    pub contact_kills: usize,
    /// Set when the player took damage this tick
    pub player_outcome: Option<HitOutcome>,
}

/// Resolve all overlaps for this tick.
///
/// `death_sequence` is true while the player is exploding / waiting to
/// respawn; the player can't be hurt then.
pub fn resolve_collisions(
    player: &mut Player,
    enemies: &mut [Enemy],
    death_sequence: bool,
    events: &mut Vec<GameEvent>,
) -> CombatReport {
    let mut report = CombatReport::default();

    resolve_player_shots(player, enemies, &mut report, events);

    // Decided once so a hit from pass 2 doesn't spare the rammers
    let vulnerable = !death_sequence && player.is_active() && !player.is_invincible();
    if vulnerable {
        resolve_enemy_shots(player, enemies, &mut report, events);
        resolve_body_contact(player, enemies, &mut report, events);
    }

    report
}

fn resolve_player_shots(
    player: &mut Player,
    enemies: &mut [Enemy],
    report: &mut CombatReport,
    events: &mut Vec<GameEvent>,
) {
    for shot in player.projectiles.iter_mut().filter(|s| s.is_active()) {
        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.is_active() && shot.did_collide_with(&**e))
        {
            shot.destroy();
            enemy.destroy();
            report.score += u64::from(enemy.points);
            report.shot_kills += 1;
            events.push(GameEvent::Explosion {
                pos: enemy.center(),
                kind: ExplosionKind::Enemy,
            });
            events.push(GameEvent::ScoreGained {
                points: enemy.points,
            });
        }
    }
}

fn resolve_enemy_shots(
    player: &mut Player,
    enemies: &mut [Enemy],
    report: &mut CombatReport,
    events: &mut Vec<GameEvent>,
) {
    let hit = enemies
        .iter_mut()
        .flat_map(|e| e.projectiles.iter_mut())
        .find(|s| s.is_active() && s.did_collide_with(&*player));

    if let Some(shot) = hit {
        shot.destroy();
        apply_player_hit(player, report, events);
    }
}

fn resolve_body_contact(
    player: &mut Player,
    enemies: &mut [Enemy],
    report: &mut CombatReport,
    events: &mut Vec<GameEvent>,
) {
    let mut rammed = false;
    for enemy in enemies
        .iter_mut()
        .filter(|e| e.is_active() && player.did_collide_with(&**e))
    {
        enemy.destroy();
        report.contact_kills += 1;
        events.push(GameEvent::Explosion {
            pos: enemy.center(),
            kind: ExplosionKind::Enemy,
        });
        rammed = true;
    }

    if rammed && report.player_outcome.is_none() {
        apply_player_hit(player, report, events);
    }
}

fn apply_player_hit(player: &mut Player, report: &mut CombatReport, events: &mut Vec<GameEvent>) {
    let outcome = player.hit();
    match outcome {
        HitOutcome::Ignored => return,
        HitOutcome::LostLife { lives_left } => {
            events.push(GameEvent::PlayerHit { lives_left });
        }
        HitOutcome::Destroyed => {
            events.push(GameEvent::PlayerHit { lives_left: 0 });
            events.push(GameEvent::PlayerDestroyed);
        }
    }
    events.push(GameEvent::Explosion {
        pos: player.center(),
        kind: ExplosionKind::Player,
    });
    report.player_outcome = Some(outcome);
}
