//! Formation Strike - a formation-flying shoot-'em-up simulation core
//!
//! Core modules:
//! - `sim`: Fixed timestep gameplay simulation (entities, enemy AI, formation, combat)
//! - `input`: Input query capability consumed by the player controller
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod sim;
pub mod tuning;

pub use input::{Action, FrameInput, InputQuery};
pub use tuning::Tuning;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 640.0;
    pub const FIELD_HEIGHT: f32 = 480.0;

    /// Distance at which a waypoint or chase target counts as reached
    pub const ARRIVE_DISTANCE: f32 = 5.0;
}

/// Visible play-field rectangle, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            width: consts::FIELD_WIDTH,
            height: consts::FIELD_HEIGHT,
        }
    }
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Horizontal centre line
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}
