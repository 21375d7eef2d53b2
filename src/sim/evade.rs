//! Target evasion controller
//!
//! The target hops to a new desired point every 0.3-0.7 s and closes 85% of
//! the remaining distance each tick. The easing is per tick, not per second:
//! a faster frame rate makes the target snappier. That is the intended feel
//! and must not be rescaled by `dt`.

use glam::Vec2;
use rand::Rng;

use super::state::{Player, Target};
use crate::consts::*;
use crate::{clamp, rand_int, rand_range};

/// Horizontal range the target may occupy on a playfield of `width`
pub fn band_x(width: f32) -> (f32, f32) {
    (width * TARGET_LEFT_FRACTION, width - TARGET_RIGHT_MARGIN)
}

/// Vertical range the target may occupy
pub fn band_y(height: f32, target_h: f32) -> (f32, f32) {
    (TARGET_TOP, height - target_h - TARGET_FLOOR_GAP)
}

/// Advance the target by one tick
pub fn update_target<R: Rng + ?Sized>(
    target: &mut Target,
    player: &Player,
    width: f32,
    height: f32,
    dt: f32,
    rng: &mut R,
) {
    target.retarget_timer -= dt;

    if target.retarget_timer <= 0.0 {
        retarget(target, player, width, rng);
    }

    target.pos += (target.desired - target.pos) * TARGET_EASE;

    let (min_x, max_x) = band_x(width);
    let (min_y, max_y) = band_y(height, target.size.y);
    target.pos.x = clamp(target.pos.x, min_x, max_x);
    target.pos.y = clamp(target.pos.y, min_y, max_y);
}

/// Pick a new desired point near the current position but kept ahead of the player
fn retarget<R: Rng + ?Sized>(target: &mut Target, player: &Player, width: f32, rng: &mut R) {
    let (band_min, band_max) = band_x(width);
    let min_x = (player.pos.x + TARGET_MIN_GAP).max(band_min);
    let max_x = (player.pos.x + TARGET_MAX_GAP).min(band_max);

    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let distance = rand_int(rng, TARGET_HOP_MIN, TARGET_HOP_MAX) as f32;
    let hop = Vec2::new(angle.cos(), angle.sin()) * distance;

    target.desired = Vec2::new(
        clamp(target.pos.x + hop.x, min_x, max_x),
        clamp(
            target.pos.y + hop.y,
            TARGET_DESIRED_MIN_Y,
            TARGET_DESIRED_MAX_Y,
        ),
    );
    target.retarget_timer = rand_range(rng, TARGET_RETARGET_MIN, TARGET_RETARGET_MAX);
}
