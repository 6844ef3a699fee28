//! Frame timing.

/// Turns `requestAnimationFrame` timestamps into frame deltas in seconds.
///
/// The first step after a reset is zero, and long gaps (a backgrounded tab)
/// are clamped so animations never jump past their end in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last: Option<f64>,
    max_step: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl FrameClock {
    /// Clock clamping steps to `max_step` seconds.
    #[must_use]
    pub const fn new(max_step: f64) -> Self {
        Self {
            last: None,
            max_step,
        }
    }

    /// Seconds since the previous timestamp (milliseconds).
    pub fn step(&mut self, timestamp_ms: f64) -> f64 {
        let dt = self
            .last
            .map_or(0.0, |last| ((timestamp_ms - last) / 1000.0).clamp(0.0, self.max_step));
        self.last = Some(timestamp_ms);
        dt
    }

    /// Forget the previous timestamp.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Whether a timestamp has been seen since the last reset.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.last.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.step(1234.0), 0.0);
        assert!(clock.is_running());
    }

    #[test]
    fn test_steps_in_seconds() {
        let mut clock = FrameClock::default();
        clock.step(1000.0);
        assert!((clock.step(1016.0) - 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_clamps_gaps_and_backwards_time() {
        let mut clock = FrameClock::default();
        clock.step(0.0);
        assert_eq!(clock.step(5000.0), 0.1);
        assert_eq!(clock.step(4000.0), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::default();
        clock.step(0.0);
        clock.reset();
        assert!(!clock.is_running());
        assert_eq!(clock.step(900.0), 0.0);
    }
}
