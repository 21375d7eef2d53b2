//! Frame clock
//!
//! Turns `requestAnimationFrame` timestamps into a simulation step. The step
//! is capped at 1/30 s so a backgrounded tab does not produce one giant jump.

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds to simulate for a frame stamped `now_ms`.
    ///
    /// Negative gaps yield 0; a non-finite stamp yields 0 and is not remembered.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let gap = ((now_ms - self.last_ms) / 1000.0).max(0.0);
        self.last_ms = now_ms;
        (gap as f32).min(MAX_FRAME_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_gaps_pass_through() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        let dt = clock.advance(1016.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_first_frame_is_capped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(5000.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_exact_ceiling_gap() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(1000.0 / 30.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_backwards_and_nan_yield_zero() {
        let mut clock = FrameClock::new();
        clock.advance(2000.0);
        assert_eq!(clock.advance(1500.0), 0.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        // NaN was not remembered: the next gap is measured from 1500
        let dt = clock.advance(1520.0);
        assert!((dt - 0.02).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_large_gaps_clamp_to_ceiling(start in 0.0f64..1.0e7, gap_ms in 34.0f64..1.0e6) {
            let mut clock = FrameClock::new();
            clock.advance(start);
            prop_assert_eq!(clock.advance(start + gap_ms), MAX_FRAME_DT);
        }

        #[test]
        fn prop_step_never_exceeds_ceiling(stamps in prop::collection::vec(0.0f64..1.0e6, 1..50)) {
            let mut clock = FrameClock::new();
            for ts in stamps {
                let dt = clock.advance(ts);
                prop_assert!((0.0..=MAX_FRAME_DT).contains(&dt));
            }
        }
    }
}
