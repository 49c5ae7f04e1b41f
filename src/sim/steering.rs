//! Shared movement-toward-target stepping
//!
//! Used by enemy entry flights, dives and formation tracking.

use glam::Vec2;

use super::entity::Body;
use super::vector::{ScaledAdd, heading};
use crate::consts::ARRIVE_DISTANCE;

/// Outcome of one steering step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Within [`ARRIVE_DISTANCE`] of the target; body was not moved
    Arrived,
    /// Velocity set toward the target and position advanced
    Moving,
}

/// Point the body at `target` with `speed` and advance it, unless it is
/// already close enough. Never carries the body past the target.
pub fn step_toward(body: &mut Body, target: Vec2, speed: f32, dt: f32) -> Step {
    match heading(body.pos, target) {
        Some((dir, distance)) if distance >= ARRIVE_DISTANCE => {
            body.vel = dir * speed;
            body.pos.add_scaled(dir, (speed * dt).min(distance));
            Step::Moving
        }
        _ => Step::Arrived,
    }
}

/// Velocity of `speed` from `from` toward `to`, or `None` when already there
pub fn chase_velocity(from: Vec2, to: Vec2, speed: f32) -> Option<Vec2> {
    heading(from, to).map(|(dir, _)| dir * speed)
}

/// Move the body vertically toward `target_y` while it is more than
/// [`ARRIVE_DISTANCE`] away, stopping on the target. Horizontal velocity
/// is zeroed.
pub fn settle_vertical(body: &mut Body, target_y: f32, speed: f32, dt: f32) {
    let dy = target_y - body.pos.y;
    body.vel.x = 0.0;
    if dy.abs() > ARRIVE_DISTANCE {
        body.vel.y = dy.signum() * speed;
        body.pos.y += dy.signum() * (speed * dt).min(dy.abs());
    } else {
        body.vel.y = 0.0;
    }
}
