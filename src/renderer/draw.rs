//! Display list
//!
//! The scene builder emits these; the canvas presenter replays them in order.

use glam::Vec2;

use super::shapes::scaled_square;
use crate::platform::SpriteId;
use crate::sim::Rect;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Wipe to transparent
    Clear,
    /// Solid (or rgba) rectangle
    Fill { rect: Rect, color: &'static str },
    /// Image blit; skipped by the presenter if the sprite has not loaded.
    /// `snap` truncates the rect to whole pixels; scaled sprites keep
    /// fractional sizes.
    Sprite {
        id: SpriteId,
        rect: Rect,
        alpha: f32,
        snap: bool,
    },
    /// Stroked open path with round caps
    Polyline {
        points: Vec<Vec2>,
        width: f32,
        color: &'static str,
    },
    Text {
        text: &'static str,
        pos: Vec2,
        font: &'static str,
        color: &'static str,
        align: TextAlign,
    },
}

impl DrawCmd {
    pub fn sprite(id: SpriteId, x: f32, y: f32, w: f32, h: f32) -> Self {
        DrawCmd::Sprite {
            id,
            rect: Rect::new(x, y, w, h),
            alpha: 1.0,
            snap: true,
        }
    }

    /// A `size`-square sprite scaled about `center`
    pub fn scaled_sprite(id: SpriteId, center: Vec2, size: f32, scale: f32, alpha: f32) -> Self {
        DrawCmd::Sprite {
            id,
            rect: scaled_square(center, size, scale),
            alpha,
            snap: false,
        }
    }
}

/// Rect a sprite is actually blitted to
pub fn blit_rect(rect: &Rect, snap: bool) -> Rect {
    if snap {
        Rect::new(rect.x.trunc(), rect.y.trunc(), rect.w.trunc(), rect.h.trunc())
    } else {
        *rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_sprites_snap_to_pixels() {
        let DrawCmd::Sprite { rect, snap, .. } = DrawCmd::sprite(SpriteId::Player, 24.7, 110.2, 64.0, 64.0)
        else {
            panic!("not a sprite");
        };
        assert!(snap);
        assert_eq!(blit_rect(&rect, snap), Rect::new(24.0, 110.0, 64.0, 64.0));
    }

    #[test]
    fn test_scaled_sprites_keep_fractional_size() {
        let cmd = DrawCmd::scaled_sprite(SpriteId::Heart, Vec2::new(160.0, 120.0), 32.0, 1.4, 0.5);
        let DrawCmd::Sprite { rect, snap, .. } = cmd else {
            panic!("not a sprite");
        };
        assert!(!snap);
        let drawn = blit_rect(&rect, snap);
        assert!((drawn.w - 44.8).abs() < 1e-4);
        assert!((drawn.x - (160.0 - 22.4)).abs() < 1e-4);
    }
}
