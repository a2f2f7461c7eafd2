use serde::{Deserialize, Serialize};

use crate::calendar::Quarter;

/// Watch duty against achievement for one broadcast quarter.
///
/// `duty` counts episodes of subscribed works that aired within the
/// quarter; `achieved` counts how many of those have been watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterStats {
    pub quarter: Quarter,
    pub duty: u64,
    pub achieved: u64,
}

impl QuarterStats {
    /// Fraction of duty already watched, or `None` when nothing was due.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn achievement_rate(&self) -> Option<f64> {
        (self.duty > 0).then(|| self.achieved as f64 / self.duty as f64)
    }

    #[must_use]
    pub const fn backlog(&self) -> u64 {
        self.duty.saturating_sub(self.achieved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Season;

    #[test]
    fn test_achievement_rate() {
        let stats = QuarterStats {
            quarter: Quarter::new(2023, Season::Winter).unwrap(),
            duty: 8,
            achieved: 6,
        };
        assert_eq!(stats.achievement_rate(), Some(0.75));
        assert_eq!(stats.backlog(), 2);
    }

    #[test]
    fn test_no_duty_has_no_rate() {
        let stats = QuarterStats {
            quarter: Quarter::new(2023, Season::Winter).unwrap(),
            duty: 0,
            achieved: 0,
        };
        assert_eq!(stats.achievement_rate(), None);
        assert_eq!(stats.backlog(), 0);
    }
}
