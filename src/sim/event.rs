//! Side-channel events for the scene layer

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What blew up, for picking the destruction effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    Enemy,
    Player,
}

/// Things the presentation layer reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreGained { points: u32 },
    /// Spawn a destruction effect centred on `pos`
    Explosion { pos: Vec2, kind: ExplosionKind },
    PlayerHit { lives_left: u8 },
    /// Lives exhausted
    PlayerDestroyed,
    GunUpgraded,
    WaveStarted { wave: u32 },
    WaveCleared { wave: u32 },
    /// Final wave cleared
    Victory,
}
