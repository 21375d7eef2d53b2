//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks
//! - Input events
//! - Sprite loading (images on web; native builds only track availability)

pub mod assets;
pub mod clock;
pub mod input;

pub use assets::{AssetTable, SpriteId};
pub use clock::FrameClock;
pub use input::{EdgeTracker, Key, KeyboardState};
