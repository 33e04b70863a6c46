use std::time::Duration;

/// Gravity timing for the presentation loop.
///
/// The interval between automatic drops shrinks as the score grows:
/// `0.8s - score / 1000 s`, never shorter than [`MIN_INTERVAL`](Self::MIN_INTERVAL).
/// The timer owns no clock; the caller feeds it the time elapsed since its
/// previous call.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use quadris_engine::GravityTimer;
///
/// let mut timer = GravityTimer::new();
/// assert!(!timer.advance(Duration::from_millis(500), 0));
/// assert!(timer.advance(Duration::from_millis(300), 0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GravityTimer {
    elapsed: Duration,
}

impl GravityTimer {
    pub const BASE_INTERVAL: Duration = Duration::from_millis(800);
    pub const MIN_INTERVAL: Duration = Duration::from_millis(200);

    #[must_use]
    pub const fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
        }
    }

    /// Returns the drop interval at the given score.
    #[must_use]
    pub fn interval_for(score: usize) -> Duration {
        let speedup = Duration::from_millis(u64::try_from(score).unwrap_or(u64::MAX));
        Self::BASE_INTERVAL
            .saturating_sub(speedup)
            .max(Self::MIN_INTERVAL)
    }

    /// Adds `delta` to the accumulated time and reports whether a drop is due.
    ///
    /// When a drop is due the accumulator restarts from zero.
    pub fn advance(&mut self, delta: Duration, score: usize) -> bool {
        self.elapsed += delta;
        if self.elapsed >= Self::interval_for(score) {
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_shrinks_with_score() {
        assert_eq!(GravityTimer::interval_for(0), Duration::from_millis(800));
        assert_eq!(GravityTimer::interval_for(300), Duration::from_millis(500));
        assert_eq!(GravityTimer::interval_for(600), Duration::from_millis(200));
    }

    #[test]
    fn test_interval_is_floored() {
        assert_eq!(GravityTimer::interval_for(700), GravityTimer::MIN_INTERVAL);
        assert_eq!(
            GravityTimer::interval_for(usize::MAX),
            GravityTimer::MIN_INTERVAL
        );
    }

    #[test]
    fn test_advance_fires_once_per_interval() {
        let mut timer = GravityTimer::new();
        let frame = Duration::from_millis(100);
        let fired: Vec<bool> = (0..16).map(|_| timer.advance(frame, 0)).collect();
        let count = fired.iter().filter(|&&f| f).count();
        assert_eq!(count, 2);
        assert!(fired[7]);
        assert!(fired[15]);
    }

    #[test]
    fn test_reset_discards_accumulated_time() {
        let mut timer = GravityTimer::new();
        assert!(!timer.advance(Duration::from_millis(700), 0));
        timer.reset();
        assert!(!timer.advance(Duration::from_millis(700), 0));
        assert!(timer.advance(Duration::from_millis(100), 0));
    }
}
