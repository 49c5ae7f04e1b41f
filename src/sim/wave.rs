//! Wave roster builder
//!
//! Pure mapping from a wave number to the enemies that fly in for it:
//! - Wave 1: rectangular grid, kinds alternating on row/column parity
//! - Wave 2: same grid, fixed mixed pattern
//! - Wave 3+: widening V, kind cycling along each row
//!
//! Every enemy gets an entry path from alternating off-screen corners,
//! across the entry lane, and down onto its formation slot.

use glam::Vec2;

use super::enemy::{ENEMY_SIZE, Enemy, EnemyId, EnemyKind};
use crate::PlayField;
use crate::tuning::Tuning;

pub const GRID_ROWS: usize = 4;
pub const GRID_COLS: usize = 10;
pub const GRID_SPACING: f32 = 50.0;
/// Y of the top formation row
pub const FORMATION_TOP: f32 = 80.0;

pub const V_ROWS: usize = 5;
pub const V_SPACING_X: f32 = 45.0;
pub const V_SPACING_Y: f32 = 40.0;

/// Horizontal lane every entry flight crosses
pub const ENTRY_LANE_Y: f32 = 100.0;
/// How far outside the field entry flights begin
pub const SPAWN_MARGIN: f32 = 50.0;

use EnemyKind::{BlueBumble as B, GreyAlien as G, PurpleAlien as P, RedBumble as R, YellowAlien as Y};

const WAVE_TWO_PATTERN: [[EnemyKind; GRID_COLS]; GRID_ROWS] = [
    [R, P, B, R, G, G, R, B, P, R],
    [P, Y, G, B, P, P, B, G, Y, P],
    [B, G, Y, P, R, R, P, Y, G, B],
    [Y, B, P, G, Y, Y, G, P, B, Y],
];

/// Build the roster for `wave`. Ids are assigned sequentially from `first_id`.
pub fn build_wave(wave: u32, field: &PlayField, tuning: &Tuning, first_id: EnemyId) -> Vec<Enemy> {
    let slots = match wave {
        0 | 1 => grid_slots(field, |row, col| if (row + col) % 2 == 0 { G } else { P }),
        2 => grid_slots(field, |row, col| WAVE_TWO_PATTERN[row][col]),
        _ => v_slots(field),
    };

    let enemies: Vec<Enemy> = slots
        .into_iter()
        .enumerate()
        .map(|(index, (kind, anchor))| {
            let mut enemy = Enemy::new(first_id + index as EnemyId, kind, anchor, tuning);
            enemy.set_wave(wave, tuning);
            let path = entry_path(anchor, index, field);
            enemy.body.pos = path[0];
            enemy.set_entry_path(path);
            enemy
        })
        .collect();

    log::info!("Wave {}: built {} enemies", wave, enemies.len());
    enemies
}

fn grid_slots(field: &PlayField, kind_at: impl Fn(usize, usize) -> EnemyKind) -> Vec<(EnemyKind, Vec2)> {
    let grid_width = (GRID_COLS - 1) as f32 * GRID_SPACING + ENEMY_SIZE;
    let start_x = (field.width - grid_width) / 2.0;

    let mut slots = Vec::with_capacity(GRID_ROWS * GRID_COLS);
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let anchor = Vec2::new(
                start_x + col as f32 * GRID_SPACING,
                FORMATION_TOP + row as f32 * GRID_SPACING,
            );
            slots.push((kind_at(row, col), anchor));
        }
    }
    slots
}

/// Row `r` holds `2r + 1` enemies centred on the field
fn v_slots(field: &PlayField) -> Vec<(EnemyKind, Vec2)> {
    let center_x = field.center_x() - ENEMY_SIZE / 2.0;
    let kinds = EnemyKind::ALL.len();

    let mut slots = Vec::new();
    for row in 0..V_ROWS {
        for col in 0..(2 * row + 1) {
            let lateral = col as f32 - row as f32;
            let anchor = Vec2::new(
                center_x + lateral * V_SPACING_X,
                FORMATION_TOP + row as f32 * V_SPACING_Y,
            );
            slots.push((EnemyKind::ALL[(row + col) % kinds], anchor));
        }
    }
    slots
}

/// Entry flight: off-screen corner, down to the lane, across, down to the slot
pub fn entry_path(anchor: Vec2, index: usize, field: &PlayField) -> Vec<Vec2> {
    let start_x = if index % 2 == 0 {
        -SPAWN_MARGIN
    } else {
        field.width + SPAWN_MARGIN
    };

    vec![
        Vec2::new(start_x, -SPAWN_MARGIN),
        Vec2::new(start_x, ENTRY_LANE_Y),
        Vec2::new(anchor.x, ENTRY_LANE_Y),
        anchor,
    ]
}
