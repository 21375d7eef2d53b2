//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use crate::sim::Rect;

/// Polyline samples along a thread
pub const THREAD_SEGMENTS: usize = 40;
/// Wobble peak in units for amplitude 1.0
const THREAD_WOBBLE: f32 = 3.0;
/// Half-size of the knot drawn at each thread end
pub const KNOT_HALF: Vec2 = Vec2::new(4.0, 3.0);

/// Pixel-art heart used for the hit pips (1 = filled cell)
pub const HEART_GLYPH: [&str; 7] = [
    "01100110", "11111111", "11111111", "11111111", "01111110", "00111100", "00011000",
];

/// Points of an animated "shaky string" from `a` to `b`.
///
/// Each sample is pushed along the segment's normal by a sine of its position
/// and of `now_ms`, so the string ripples continuously. `amp` of 0 gives a
/// straight line. Returns `segments + 1` points starting at `a`.
pub fn shaky_string(a: Vec2, b: Vec2, amp: f32, segments: usize, now_ms: f64) -> Vec<Vec2> {
    let d = b - a;
    let angle = d.y.atan2(d.x);
    let normal = Vec2::new((angle + FRAC_PI_2).cos(), (angle + FRAC_PI_2).sin());
    // Keep the phase small before dropping to f32 so long sessions stay smooth
    let phase = ((now_ms / 400.0) % std::f64::consts::TAU) as f32;

    let mut points = Vec::with_capacity(segments + 1);
    points.push(a);
    for i in 1..=segments {
        let t = i as f32 / segments as f32;
        let wobble = (t * 12.0 + phase).sin() * THREAD_WOBBLE * amp;
        points.push(a + d * t + normal * wobble);
    }
    points
}

/// Small filled knot centred on a thread end
pub fn knot(at: Vec2) -> Rect {
    Rect::new(
        at.x - KNOT_HALF.x,
        at.y - KNOT_HALF.y,
        KNOT_HALF.x * 2.0,
        KNOT_HALF.y * 2.0,
    )
}

/// Filled cells of the pixel heart with its top-left at `origin`
pub fn pixel_heart(origin: Vec2, cell: f32) -> Vec<Rect> {
    HEART_GLYPH
        .iter()
        .enumerate()
        .flat_map(|(row, line)| {
            line.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'1')
                .map(move |(col, _)| {
                    Rect::new(
                        origin.x + col as f32 * cell,
                        origin.y + row as f32 * cell,
                        cell,
                        cell,
                    )
                })
        })
        .collect()
}

/// A `size`-square box scaled by `scale` about `center`
pub fn scaled_square(center: Vec2, size: f32, scale: f32) -> Rect {
    let half = size * scale / 2.0;
    Rect::new(center.x - half, center.y - half, half * 2.0, half * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaky_string_endpoints() {
        let a = Vec2::new(10.0, 50.0);
        let b = Vec2::new(110.0, 50.0);
        let pts = shaky_string(a, b, 1.0, THREAD_SEGMENTS, 0.0);
        assert_eq!(pts.len(), THREAD_SEGMENTS + 1);
        assert_eq!(pts[0], a);
        // Horizontal string only wobbles vertically
        for (i, p) in pts.iter().enumerate().skip(1) {
            let t = i as f32 / THREAD_SEGMENTS as f32;
            assert!((p.x - (10.0 + 100.0 * t)).abs() < 1e-3);
            assert!((p.y - 50.0).abs() <= THREAD_WOBBLE + 1e-3);
        }
    }

    #[test]
    fn test_zero_amplitude_is_straight() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(30.0, 40.0);
        for p in shaky_string(a, b, 0.0, 10, 12345.0) {
            // On the line 4x - 3y = 0
            assert!((4.0 * p.x - 3.0 * p.y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_wobble_animates_with_time() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);
        let early = shaky_string(a, b, 1.0, 10, 0.0);
        let later = shaky_string(a, b, 1.0, 10, 500.0);
        assert_ne!(early, later);
        assert_eq!(early, shaky_string(a, b, 1.0, 10, 0.0));
    }

    #[test]
    fn test_pixel_heart_cells() {
        let cells = pixel_heart(Vec2::new(10.0, 8.0), 2.0);
        let filled: usize = HEART_GLYPH
            .iter()
            .map(|l| l.bytes().filter(|b| *b == b'1').count())
            .sum();
        assert_eq!(cells.len(), filled);
        assert_eq!(cells[0], Rect::new(12.0, 8.0, 2.0, 2.0));
    }

    #[test]
    fn test_scaled_square() {
        let r = scaled_square(Vec2::new(100.0, 100.0), 32.0, 1.5);
        assert_eq!(r, Rect::new(76.0, 76.0, 48.0, 48.0));
    }
}
