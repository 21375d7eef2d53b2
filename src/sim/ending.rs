//! Ending cinematic controller
//!
//! The two characters slide together on their standing sprites. Once their
//! hands are within 15 units a heart grows in between them. Two seconds later
//! a fade starts, and at five seconds the core hands off to the video.

use glam::Vec2;

/// Fraction of the remaining distance covered per tick while sliding
pub const SLIDE_EASE: f32 = 0.08;
/// Hand gap that triggers the heart
pub const HEART_TRIGGER_GAP: f32 = 15.0;
/// Heart timer value after which the fade overlay shows
pub const FADE_AFTER: f32 = 2.0;
/// Heart timer value after which the video takes over
pub const HANDOFF_AFTER: f32 = 5.0;
/// Standing sprite size
pub const STAND_W: f32 = 64.0;
pub const STAND_H: f32 = 96.0;
/// Heart sits this far above the hands
pub const HEART_LIFT: f32 = 25.0;

/// Ending sub-phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndingPhase {
    /// Sprites easing toward each other
    Slide,
    /// Heart revealed; `timer` counts seconds since the reveal
    Heart { timer: f32 },
}

/// Cinematic state, created fresh on every win
#[derive(Debug, Clone, PartialEq)]
pub struct EndingState {
    pub phase: EndingPhase,
    /// Seconds since the ending began
    pub elapsed: f32,
    /// Eased x of the target's standing sprite (left)
    pub target_x: f32,
    /// Eased x of the player's standing sprite (right)
    pub player_x: f32,
    /// Shared top edge of both standing sprites
    pub mid_y: f32,
    target_goal: f32,
    player_goal: f32,
    /// Handoff requested
    pub finished: bool,
}

/// What changed during an ending tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndingSignal {
    HeartShown,
    Handoff,
}

impl EndingState {
    /// Initial layout, derived only from the playfield size
    pub fn new(width: f32, height: f32) -> Self {
        let cx = width / 2.0;
        Self {
            phase: EndingPhase::Slide,
            elapsed: 0.0,
            target_x: cx - 100.0,
            player_x: cx + 36.0,
            mid_y: height / 2.0 - 70.0,
            target_goal: cx - 48.0,
            player_goal: cx - 16.0,
            finished: false,
        }
    }

    /// Hand anchors (left, right) for the current sprite positions
    pub fn hand_anchors(&self) -> (Vec2, Vec2) {
        let y = self.mid_y + 68.0;
        (
            Vec2::new(self.target_x + 52.0, y),
            Vec2::new(self.player_x + 12.0, y),
        )
    }

    pub fn heart_timer(&self) -> Option<f32> {
        match self.phase {
            EndingPhase::Slide => None,
            EndingPhase::Heart { timer } => Some(timer),
        }
    }

    /// Heart opacity, 0 until revealed
    pub fn heart_alpha(&self) -> f32 {
        self.heart_timer().map_or(0.0, |t| (t * 2.0).min(1.0))
    }

    /// Heart scale factor, 0 until revealed
    pub fn heart_scale(&self) -> f32 {
        self.heart_timer().map_or(0.0, |t| (0.5 + t * 2.0).min(3.5))
    }

    /// Center of the heart glyph
    pub fn heart_center(&self) -> Vec2 {
        let (a, b) = self.hand_anchors();
        (a + b) / 2.0 - Vec2::new(0.0, HEART_LIFT)
    }

    pub fn fading(&self) -> bool {
        self.heart_timer().is_some_and(|t| t > FADE_AFTER)
    }

    /// Advance one tick. Returns the signal raised on this tick, if any.
    pub fn advance(&mut self, dt: f32) -> Option<EndingSignal> {
        if self.finished {
            return None;
        }
        self.elapsed += dt;

        self.target_x += (self.target_goal - self.target_x) * SLIDE_EASE;
        self.player_x += (self.player_goal - self.player_x) * SLIDE_EASE;

        let mut signal = None;
        let (left, right) = self.hand_anchors();
        if self.phase == EndingPhase::Slide && (right.x - left.x).abs() < HEART_TRIGGER_GAP {
            self.phase = EndingPhase::Heart { timer: 0.0 };
            signal = Some(EndingSignal::HeartShown);
        }

        if let EndingPhase::Heart { timer } = &mut self.phase {
            *timer += dt;
            if *timer > HANDOFF_AFTER {
                self.finished = true;
                signal = Some(EndingSignal::Handoff);
            }
        }

        signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 30.0;

    #[test]
    fn test_initial_layout() {
        let ending = EndingState::new(320.0, 240.0);
        assert_eq!(ending.phase, EndingPhase::Slide);
        assert_eq!(ending.target_x, 60.0);
        assert_eq!(ending.player_x, 196.0);
        assert_eq!(ending.mid_y, 50.0);
        let (l, r) = ending.hand_anchors();
        assert_eq!(l, Vec2::new(112.0, 118.0));
        assert_eq!(r, Vec2::new(208.0, 118.0));
    }

    #[test]
    fn test_slide_to_heart_once() {
        let mut ending = EndingState::new(320.0, 240.0);
        let mut shown = 0;
        let mut was_heart = false;
        for _ in 0..120 {
            if ending.advance(DT) == Some(EndingSignal::HeartShown) {
                shown += 1;
                let (l, r) = ending.hand_anchors();
                assert!((r.x - l.x).abs() < HEART_TRIGGER_GAP);
            }
            if was_heart {
                // Never reverts
                assert!(matches!(ending.phase, EndingPhase::Heart { .. }));
            }
            was_heart = matches!(ending.phase, EndingPhase::Heart { .. });
        }
        assert_eq!(shown, 1);
    }

    #[test]
    fn test_heart_curve_caps() {
        let mut ending = EndingState::new(320.0, 240.0);
        assert_eq!(ending.heart_alpha(), 0.0);
        ending.phase = EndingPhase::Heart { timer: 0.25 };
        assert!((ending.heart_alpha() - 0.5).abs() < 1e-6);
        assert!((ending.heart_scale() - 1.0).abs() < 1e-6);
        ending.phase = EndingPhase::Heart { timer: 3.0 };
        assert_eq!(ending.heart_alpha(), 1.0);
        assert_eq!(ending.heart_scale(), 3.5);
        assert!(ending.fading());
    }

    #[test]
    fn test_handoff_after_five_seconds_of_heart() {
        let mut ending = EndingState::new(320.0, 240.0);
        let mut handoffs = 0;
        let mut ticks = 0;
        while ticks < 1000 {
            if ending.advance(DT) == Some(EndingSignal::Handoff) {
                handoffs += 1;
            }
            ticks += 1;
        }
        assert_eq!(handoffs, 1);
        assert!(ending.finished);
        assert!(ending.heart_timer().is_some_and(|t| t > HANDOFF_AFTER));
    }

    #[test]
    fn test_no_fade_before_two_seconds() {
        let mut ending = EndingState::new(320.0, 240.0);
        while ending.heart_timer().is_none() {
            ending.advance(DT);
        }
        assert!(!ending.fading());
        // 2s of ticks plus one for float slack
        for _ in 0..61 {
            ending.advance(DT);
        }
        assert!(ending.fading());
    }
}
