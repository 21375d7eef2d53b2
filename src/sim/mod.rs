//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Step length supplied by the caller, easing applied once per tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod ending;
pub mod evade;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::Rect;
pub use ending::{EndingPhase, EndingSignal, EndingState};
pub use evade::update_target;
pub use state::{GameEvent, GamePhase, GameState, Player, Pop, Projectile, Target};
pub use tick::{TickInput, tick};
