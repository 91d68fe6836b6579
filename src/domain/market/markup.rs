//! Post-sale value markup

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Inclusive range of whole percentages a sold player's value can grow by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupRange {
    pub min: u32,
    pub max: u32,
}

impl Default for MarkupRange {
    fn default() -> Self {
        Self { min: 10, max: 100 }
    }
}

impl MarkupRange {
    pub fn new(min: u32, max: u32) -> Result<Self, DomainError> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.min == 0 {
            return Err(DomainError::configuration(
                "Markup minimum must be at least 1% so a sale raises the player's value",
            ));
        }

        if self.min > self.max {
            return Err(DomainError::configuration(format!(
                "Markup minimum {}% exceeds maximum {}%",
                self.min, self.max
            )));
        }

        Ok(())
    }

    pub fn contains(&self, percent: u32) -> bool {
        (self.min..=self.max).contains(&percent)
    }

    /// Draw a percentage uniformly from the range
    pub fn draw<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }
}

/// `floor(value * (1 + percent / 100))` in integer arithmetic, saturating at `i64::MAX`
pub fn apply_markup(value: i64, percent: u32) -> i64 {
    let marked_up = i128::from(value) * (100 + i128::from(percent)) / 100;
    i64::try_from(marked_up).unwrap_or(i64::MAX)
}

/// Markup range paired with the random source used to draw from it
#[derive(Debug)]
pub struct MarkupPolicy {
    range: MarkupRange,
    rng: Mutex<StdRng>,
}

impl MarkupPolicy {
    pub fn new(range: MarkupRange) -> Self {
        Self {
            range,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible draws for tests
    pub fn with_seed(range: MarkupRange, seed: u64) -> Self {
        Self {
            range,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn range(&self) -> MarkupRange {
        self.range
    }

    pub fn draw_percent(&self) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.range.draw(&mut *rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range() {
        assert_eq!(MarkupRange::default(), MarkupRange { min: 10, max: 100 });
    }

    #[test]
    fn test_invalid_range() {
        assert!(MarkupRange::new(50, 10).is_err());
        assert!(matches!(
            MarkupRange::new(0, 10),
            Err(DomainError::Configuration { .. })
        ));
        assert!(MarkupRange::new(1, 1).is_ok());
        assert!(MarkupRange::new(110, 200).is_ok());
        assert!(MarkupRange::new(20, 20).is_ok());
    }

    #[test]
    fn test_apply_markup() {
        assert_eq!(apply_markup(1_000_000, 10), 1_100_000);
        assert_eq!(apply_markup(1_000_000, 100), 2_000_000);
        assert_eq!(apply_markup(1_000_000, 150), 2_500_000);
        assert_eq!(apply_markup(999, 10), 1_098);
        assert_eq!(apply_markup(i64::MAX, 100), i64::MAX);
    }

    #[test]
    fn test_draws_stay_in_range() {
        let policy = MarkupPolicy::with_seed(MarkupRange { min: 110, max: 200 }, 7);

        for _ in 0..500 {
            let percent = policy.draw_percent();
            assert!(policy.range().contains(percent), "{percent} out of range");
        }
    }

    #[test]
    fn test_single_value_range() {
        let policy = MarkupPolicy::new(MarkupRange { min: 25, max: 25 });
        assert_eq!(policy.draw_percent(), 25);
    }

    #[test]
    fn test_seeded_draws_are_reproducible() {
        let range = MarkupRange::default();
        let first = MarkupPolicy::with_seed(range, 42);
        let second = MarkupPolicy::with_seed(range, 42);

        let a: Vec<u32> = (0..20).map(|_| first.draw_percent()).collect();
        let b: Vec<u32> = (0..20).map(|_| second.draw_percent()).collect();
        assert_eq!(a, b);
    }
}
