//! Gameplay simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform dependencies:
//! - Fixed timestep only, `dt` supplied by the caller
//! - Seeded RNG only
//! - Per tick: player, enemies, formation, combat, then cleanup

pub mod battle;
pub mod combat;
pub mod enemy;
pub mod entity;
pub mod event;
pub mod formation;
pub mod player;
pub mod projectile;
pub mod steering;
pub mod vector;
pub mod wave;

pub use battle::{Battle, BattlePhase};
pub use combat::{CombatReport, resolve_collisions};
pub use enemy::{Enemy, EnemyId, EnemyKind, EnemyProfile, EnemyState, WaveTier};
pub use entity::{Aabb, Body, Entity};
pub use event::{ExplosionKind, GameEvent};
pub use formation::FormationController;
pub use player::{GunLevel, HitOutcome, Player};
pub use projectile::{Lean, Projectile};
pub use vector::ScaledAdd;
pub use wave::{build_wave, entry_path};
