use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// One of the four broadcast seasons, in chronological order.
///
/// Winter starts on Jan 1, spring on Apr 1, summer on Jul 1 and autumn on
/// Oct 1 (each at 04:00 in the reference zone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// All seasons in chronological order.
    pub const ALL: [Self; 4] = [Self::Winter, Self::Spring, Self::Summer, Self::Autumn];

    /// Position within the year, 0 (winter) to 3 (autumn).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Winter => 0,
            Self::Spring => 1,
            Self::Summer => 2,
            Self::Autumn => 3,
        }
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Winter),
            1 => Some(Self::Spring),
            2 => Some(Self::Summer),
            3 => Some(Self::Autumn),
            _ => None,
        }
    }

    /// Season containing a civil month (1-12).
    #[must_use]
    pub const fn from_month(month: u32) -> Option<Self> {
        if month == 0 || month > 12 {
            return None;
        }
        Self::from_index(((month - 1) / 3) as usize)
    }

    /// First civil month of the season.
    #[must_use]
    pub const fn start_month(self) -> u32 {
        match self {
            Self::Winter => 1,
            Self::Spring => 4,
            Self::Summer => 7,
            Self::Autumn => 10,
        }
    }

    /// Lowercase English name, as used in quarter symbols.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
        }
    }

    /// Single-character Japanese label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Winter => "冬",
            Self::Spring => "春",
            Self::Summer => "夏",
            Self::Autumn => "秋",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Winter => Self::Spring,
            Self::Spring => Self::Summer,
            Self::Summer => Self::Autumn,
            Self::Autumn => Self::Winter,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Winter => Self::Autumn,
            Self::Spring => Self::Winter,
            Self::Summer => Self::Spring,
            Self::Autumn => Self::Summer,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Season {
    type Err = CalendarError;

    /// Exact, case-sensitive match on the lowercase English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|season| season.name() == s)
            .ok_or_else(|| CalendarError::UnknownSeason(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chronological_order() {
        assert!(Season::Winter < Season::Spring);
        assert!(Season::Spring < Season::Summer);
        assert!(Season::Summer < Season::Autumn);
        let mut sorted = Season::ALL;
        sorted.sort();
        assert_eq!(sorted, Season::ALL);
    }

    #[test]
    fn test_index_round_trip() {
        for season in Season::ALL {
            assert_eq!(Season::from_index(season.index()), Some(season));
        }
        assert_eq!(Season::from_index(4), None);
    }

    #[test]
    fn test_from_month() {
        let expected = [
            (1, Season::Winter),
            (3, Season::Winter),
            (4, Season::Spring),
            (6, Season::Spring),
            (7, Season::Summer),
            (9, Season::Summer),
            (10, Season::Autumn),
            (12, Season::Autumn),
        ];
        for (month, season) in expected {
            assert_eq!(Season::from_month(month), Some(season), "month {month}");
        }
        assert_eq!(Season::from_month(0), None);
        assert_eq!(Season::from_month(13), None);
    }

    #[test]
    fn test_start_month_maps_back() {
        for season in Season::ALL {
            assert_eq!(Season::from_month(season.start_month()), Some(season));
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!("autumn".parse::<Season>(), Ok(Season::Autumn));
        assert_eq!(
            "Autumn".parse::<Season>(),
            Err(CalendarError::UnknownSeason("Autumn".to_string()))
        );
        assert!("fall".parse::<Season>().is_err());
        assert!("".parse::<Season>().is_err());
    }

    #[test]
    fn test_labels() {
        let labels: Vec<&str> = Season::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["冬", "春", "夏", "秋"]);
    }

    #[test]
    fn test_next_and_previous_cycle() {
        for season in Season::ALL {
            assert_eq!(season.next().previous(), season);
        }
        assert_eq!(Season::Autumn.next(), Season::Winter);
        assert_eq!(Season::Winter.previous(), Season::Autumn);
    }

    #[test]
    fn test_serde_uses_lowercase_name() {
        let json = serde_json::to_string(&Season::Summer).unwrap();
        assert_eq!(json, "\"summer\"");
        let back: Season = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Season::Summer);
    }
}
