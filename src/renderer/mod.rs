//! Rendering module
//!
//! The scene builder turns game state into a display list (pure, testable
//! natively); the Canvas2D presenter draws that list in the browser.

pub mod draw;
pub mod scene;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use draw::{DrawCmd, TextAlign};
pub use scene::{SceneOptions, build_scene, decoration_scene};
