//! Per-frame simulation tick
//!
//! Order within a playing tick: player movement, shooting, projectiles and
//! collision, target evasion, pops. The ending runs on its own once the win
//! fires.

use glam::Vec2;

use super::ending::EndingSignal;
use super::evade::update_target;
use super::state::{GameEvent, GamePhase, GameState};
use crate::clamp;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire key went down since the previous tick (already edge-detected)
    pub fire: bool,
}

impl TickInput {
    /// Unit-less movement direction, each axis in {-1, 0, 1}
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Start => {}
        GamePhase::Play => {
            state.time_ticks += 1;
            tick_play(state, input, dt);
            // The winning tick is also the ending's first tick
            if state.phase.ending().is_some() {
                tick_ending(state, dt);
            }
        }
        GamePhase::Ending(_) => {
            state.time_ticks += 1;
            tick_ending(state, dt);
        }
    }
}

fn tick_ending(state: &mut GameState, dt: f32) {
    let GamePhase::Ending(ending) = &mut state.phase else {
        return;
    };
    match ending.advance(dt) {
        Some(EndingSignal::HeartShown) => {
            log::debug!("ending: heart shown");
            state.push_event(GameEvent::HeartShown);
        }
        Some(EndingSignal::Handoff) => state.push_event(GameEvent::Handoff),
        None => {}
    }
}

fn tick_play(state: &mut GameState, input: &TickInput, dt: f32) {
    move_player(state, input, dt);

    if input.fire {
        state.shoot();
    }

    update_projectiles(state, dt);

    update_target(
        &mut state.target,
        &state.player,
        state.width,
        state.height,
        dt,
        &mut state.rng,
    );

    for pop in &mut state.pops {
        pop.age += dt;
    }
    state.pops.retain(|p| p.is_alive());
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let player = &mut state.player;
    player.pos += input.direction() * PLAYER_SPEED * dt;
    player.pos.x = clamp(player.pos.x, 0.0, state.width - player.size.x);
    player.pos.y = clamp(
        player.pos.y,
        0.0,
        state.height - player.size.y - PLAYER_FLOOR_GAP,
    );
}

fn update_projectiles(state: &mut GameState, dt: f32) {
    let face = state.target.face_region();
    let mut credited = 0;

    for projectile in &mut state.projectiles {
        projectile.pos += projectile.vel * dt;

        if !projectile.hit && projectile.bounds().overlaps(&face) {
            projectile.hit = true;
            projectile.hit_timer = PROJECTILE_HIT_LINGER;
            credited += 1;
        }

        if projectile.hit {
            projectile.hit_timer -= dt;
        }
    }

    for _ in 0..credited {
        state.pop_heart();
        state.hits += 1;
        state.push_event(GameEvent::Hit { hits: state.hits });
        log::debug!("hit {}/{}", state.hits, state.max_hits);
        if state.hits >= state.max_hits {
            state.win();
        }
    }

    let width = state.width;
    state.projectiles.retain(|p| p.is_live(width));
}
