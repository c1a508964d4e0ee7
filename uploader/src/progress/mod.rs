//! Progress sources and the progress meter.
//!
//! A [`ProgressSource`] decides how far each tick moves the bar. The
//! simulator uses [`RandomProgress`]; a real transfer would plug in its own
//! telemetry here without touching validation or completion.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{MAX_INCREMENT, MIN_INCREMENT};

/// Upper bound of a progress percentage.
pub const COMPLETE: u8 = 100;

/// Supplies the increment applied on each tick.
pub trait ProgressSource {
    /// Percentage points to add on the next tick.
    fn next_increment(&mut self) -> u8;
}

impl<F> ProgressSource for F
where
    F: FnMut() -> u8,
{
    fn next_increment(&mut self) -> u8 {
        self()
    }
}

/// Uniform random increments in `MIN_INCREMENT..=MAX_INCREMENT`.
#[derive(Debug, Clone)]
pub struct RandomProgress {
    rng: StdRng,
    min: u8,
    max: u8,
}

impl RandomProgress {
    /// Entropy-seeded source with the default 5..=14 range.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible source.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            min: MIN_INCREMENT,
            max: MAX_INCREMENT,
        }
    }

    /// Same source with another inclusive range. Bounds are reordered if needed.
    pub fn with_range(mut self, min: u8, max: u8) -> Self {
        self.min = min.min(max);
        self.max = min.max(max);
        self
    }
}

impl Default for RandomProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSource for RandomProgress {
    fn next_increment(&mut self) -> u8 {
        self.rng.gen_range(self.min..=self.max)
    }
}

/// Constant increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedProgress(pub u8);

impl ProgressSource for FixedProgress {
    fn next_increment(&mut self) -> u8 {
        self.0
    }
}

/// Monotonic percentage that stops exactly at 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressMeter {
    percent: u8,
}

impl ProgressMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= COMPLETE
    }

    /// Add an increment and return the new percentage.
    ///
    /// Zero counts as one so a session always finishes.
    pub fn advance(&mut self, increment: u8) -> u8 {
        let step = increment.max(1);
        self.percent = self.percent.saturating_add(step).min(COMPLETE);
        self.percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_increments_in_range() {
        let mut source = RandomProgress::seeded(42);
        for _ in 0..1_000 {
            let inc = source.next_increment();
            assert!((MIN_INCREMENT..=MAX_INCREMENT).contains(&inc), "got {}", inc);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a: Vec<u8> = {
            let mut s = RandomProgress::seeded(7);
            (0..20).map(|_| s.next_increment()).collect()
        };
        let b: Vec<u8> = {
            let mut s = RandomProgress::seeded(7);
            (0..20).map(|_| s.next_increment()).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_with_range_reorders_bounds() {
        let mut source = RandomProgress::seeded(1).with_range(30, 20);
        let inc = source.next_increment();
        assert!((20..=30).contains(&inc));
    }

    #[test]
    fn test_meter_clamps_at_100() {
        let mut meter = ProgressMeter::new();
        assert_eq!(meter.advance(60), 60);
        assert!(!meter.is_complete());
        assert_eq!(meter.advance(60), 100);
        assert!(meter.is_complete());
        assert_eq!(meter.advance(200), 100);
    }

    #[test]
    fn test_meter_zero_increment_still_moves() {
        let mut meter = ProgressMeter::new();
        assert_eq!(meter.advance(0), 1);
    }

    #[test]
    fn test_closure_source() {
        let mut steps = vec![10u8, 20].into_iter();
        let mut source = move || steps.next().unwrap_or(5);
        assert_eq!(source.next_increment(), 10);
        assert_eq!(source.next_increment(), 20);
        assert_eq!(source.next_increment(), 5);
    }
}
