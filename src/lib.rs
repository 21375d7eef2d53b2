//! Heartstring - a tiny canvas arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, evasion, projectiles, ending)
//! - `renderer`: Display list builder and Canvas2D presenter
//! - `platform`: Browser/native platform abstraction (input, frame clock, assets)
//! - `settings`: Read-only game configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Largest simulation step a single frame may take (30 Hz floor)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Default playfield, used when no canvas size is available
    pub const DEFAULT_WIDTH: f32 = 320.0;
    pub const DEFAULT_HEIGHT: f32 = 240.0;

    /// Hits needed to win
    pub const DEFAULT_MAX_HITS: u32 = 3;

    /// Player defaults
    pub const PLAYER_SPAWN: (f32, f32) = (24.0, 110.0);
    pub const PLAYER_SIZE: f32 = 64.0;
    /// Movement speed per held direction (units/s)
    pub const PLAYER_SPEED: f32 = 120.0;
    /// Gap kept between the player and the playfield bottom
    pub const PLAYER_FLOOR_GAP: f32 = 4.0;

    /// Bow anchor relative to the player sprite (beside the face, not on it)
    pub const BOW_OFFSET: (f32, f32) = (52.0, 18.0);
    pub const BOW_SIZE: f32 = 42.0;
    /// Projectiles leave the bow slightly inset from its corner
    pub const MUZZLE_INSET: f32 = 8.0;

    /// Target defaults
    pub const TARGET_SPAWN: (f32, f32) = (250.0, 60.0);
    pub const TARGET_SIZE: f32 = 64.0;
    /// Fraction of the remaining distance covered per tick
    pub const TARGET_EASE: f32 = 0.85;
    /// Retarget band relative to the player's x
    pub const TARGET_MIN_GAP: f32 = 100.0;
    pub const TARGET_MAX_GAP: f32 = 180.0;
    /// Retarget hop length range (inclusive, whole units)
    pub const TARGET_HOP_MIN: i32 = 60;
    pub const TARGET_HOP_MAX: i32 = 120;
    /// Retarget countdown range in seconds
    pub const TARGET_RETARGET_MIN: f32 = 0.3;
    pub const TARGET_RETARGET_MAX: f32 = 0.7;
    /// Vertical range for desired points
    pub const TARGET_DESIRED_MIN_Y: f32 = 20.0;
    pub const TARGET_DESIRED_MAX_Y: f32 = 120.0;
    /// Horizontal band: [width * LEFT_FRACTION, width - RIGHT_MARGIN]
    pub const TARGET_LEFT_FRACTION: f32 = 0.4;
    pub const TARGET_RIGHT_MARGIN: f32 = 60.0;
    pub const TARGET_TOP: f32 = 20.0;
    pub const TARGET_FLOOR_GAP: f32 = 10.0;

    /// Projectile defaults
    pub const PROJECTILE_W: f32 = 96.0;
    pub const PROJECTILE_H: f32 = 48.0;
    pub const PROJECTILE_SPEED: f32 = 400.0;
    /// How long a projectile lingers after landing
    pub const PROJECTILE_HIT_LINGER: f32 = 0.1;
    /// Distance past the right edge before a projectile is dropped
    pub const PROJECTILE_OFFSCREEN_MARGIN: f32 = 220.0;

    /// Pop effect lifetime in seconds
    pub const POP_LIFETIME: f32 = 0.9;
    pub const POP_SIZE: f32 = 32.0;
}

/// Clamp `x` into `[lo, hi]`; an inverted range resolves to `lo`.
///
/// Unlike `f32::clamp` this never panics, which matters for the target's
/// retarget band once the player walks far enough right.
#[inline]
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    x.min(hi).max(lo)
}

/// Uniform float in `[a, b)`
#[inline]
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    a + rng.random::<f32>() * (b - a)
}

/// Uniform integer in `[a, b]` (inclusive)
#[inline]
pub fn rand_int<R: Rng + ?Sized>(rng: &mut R, a: i32, b: i32) -> i32 {
    rng.random_range(a..=b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_clamp_inverted_range_yields_lo() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(200.0, 300.0, 260.0), 300.0);
    }

    #[test]
    fn test_random_helpers_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let f = rand_range(&mut rng, 0.3, 0.7);
            assert!((0.3..0.7).contains(&f));
            let i = rand_int(&mut rng, 60, 120);
            assert!((60..=120).contains(&i));
        }
    }
}
