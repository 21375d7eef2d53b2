//! Autopilot - plays the game without a keyboard
//!
//! Used by the native demo runner and the playthrough test. It only ever
//! produces `TickInput`s, so it exercises exactly the path a human player does.

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// Deadzone (units) before the autopilot bothers to move
const AIM_SLACK: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    ticks: u64,
    /// Ticks between presses of the fire key
    fire_every: u64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Autopilot {
    pub fn new(fire_every: u64) -> Self {
        Self {
            ticks: 0,
            fire_every: fire_every.max(1),
        }
    }

    /// Player y that lines the projectile's centre up with the target's face
    pub fn aim_y(state: &GameState) -> f32 {
        let face = state.target.face_region();
        let face_mid = face.y + face.h / 2.0;
        let shot_mid = BOW_OFFSET.1 + MUZZLE_INSET + PROJECTILE_H / 2.0;
        face_mid - shot_mid
    }

    /// Decide this tick's input
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        let tick = self.ticks;
        self.ticks += 1;

        if !state.phase.is_play() {
            return TickInput::default();
        }

        let aim = Self::aim_y(state);
        let y = state.player.pos.y;
        TickInput {
            up: y > aim + AIM_SLACK,
            down: y < aim - AIM_SLACK,
            fire: tick % self.fire_every == 0,
            ..Default::default()
        }
    }
}
