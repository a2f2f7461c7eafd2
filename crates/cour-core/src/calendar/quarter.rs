use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::boundary::{self, QuarterSpan};
use super::season::Season;
use crate::error::CalendarError;

/// A broadcast quarter ("cour"): one season of one year.
///
/// `year` is the year in which the season starts, always within
/// [`Quarter::MIN_YEAR`]`..=`[`Quarter::MAX_YEAR`]: the years a canonical
/// four-digit symbol can spell. Ordering is chronological. On the wire a
/// quarter is always its canonical symbol, e.g. `2023winter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quarter {
    year: i32,
    season: Season,
}

impl Quarter {
    pub const MIN_YEAR: i32 = 0;
    pub const MAX_YEAR: i32 = 9999;

    /// The oldest representable quarter, `0000winter`.
    pub const MIN: Self = Self::from_parts(Self::MIN_YEAR, Season::Winter);
    /// The newest representable quarter, `9999autumn`.
    pub const MAX: Self = Self::from_parts(Self::MAX_YEAR, Season::Autumn);

    /// # Errors
    ///
    /// Returns [`CalendarError::YearOutOfRange`] outside `MIN_YEAR..=MAX_YEAR`.
    pub const fn new(year: i32, season: Season) -> Result<Self, CalendarError> {
        if year < Self::MIN_YEAR || year > Self::MAX_YEAR {
            return Err(CalendarError::YearOutOfRange { year });
        }
        Ok(Self::from_parts(year, season))
    }

    /// Caller guarantees `year` is within `MIN_YEAR..=MAX_YEAR`.
    pub(crate) const fn from_parts(year: i32, season: Season) -> Self {
        Self { year, season }
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn season(&self) -> Season {
        self.season
    }

    /// Quarter containing `now`. The caller supplies the clock.
    pub fn containing<Tz: TimeZone>(now: &DateTime<Tz>) -> Result<Self, CalendarError> {
        boundary::instant_to_quarter(now)
    }

    /// Quarter containing a raw epoch-millisecond timestamp.
    pub fn from_timestamp_millis(millis: i64) -> Result<Self, CalendarError> {
        boundary::millis_to_quarter(millis)
    }

    /// Successor, or `None` after [`Quarter::MAX`].
    #[must_use]
    pub const fn checked_next(self) -> Option<Self> {
        match self.season {
            Season::Autumn if self.year >= Self::MAX_YEAR => None,
            Season::Autumn => Some(Self::from_parts(self.year + 1, Season::Winter)),
            season => Some(Self::from_parts(self.year, season.next())),
        }
    }

    /// Predecessor, or `None` before [`Quarter::MIN`].
    #[must_use]
    pub const fn checked_previous(self) -> Option<Self> {
        match self.season {
            Season::Winter if self.year <= Self::MIN_YEAR => None,
            Season::Winter => Some(Self::from_parts(self.year - 1, Season::Autumn)),
            season => Some(Self::from_parts(self.year, season.previous())),
        }
    }

    /// Successor; autumn rolls over into winter of the next year.
    /// Saturates at [`Quarter::MAX`].
    #[must_use]
    pub const fn next(self) -> Self {
        match self.checked_next() {
            Some(next) => next,
            None => Self::MAX,
        }
    }

    /// Predecessor; winter rolls back into autumn of the previous year.
    /// Saturates at [`Quarter::MIN`].
    #[must_use]
    pub const fn previous(self) -> Self {
        match self.checked_previous() {
            Some(previous) => previous,
            None => Self::MIN,
        }
    }

    /// Number of quarters since year 0 winter. Differences of ordinals count
    /// the quarters between two values.
    #[must_use]
    pub const fn ordinal(self) -> i64 {
        self.year as i64 * 4 + self.season.index() as i64
    }

    /// Inclusive start: 04:00 on the first day of the season, reference zone.
    pub fn start_instant(self) -> Result<DateTime<FixedOffset>, CalendarError> {
        boundary::quarter_to_start_instant(self)
    }

    /// Half-open interval from this quarter's start to the following one's.
    pub fn span(self) -> Result<QuarterSpan, CalendarError> {
        QuarterSpan::of(self)
    }

    /// Canonical symbol: four-digit year followed by the season name.
    #[must_use]
    pub fn symbol(&self) -> String {
        format!("{:04}{}", self.year, self.season.name())
    }

    /// Parse a canonical symbol. Anything else yields `None`.
    ///
    /// The first four characters must be ASCII digits and the rest must be
    /// exactly one of the season names.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let (year, season) = (symbol.get(..4)?, symbol.get(4..)?);
        if !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year = year.parse().ok()?;
        let season = season.parse().ok()?;
        Self::new(year, season).ok()
    }

    /// Human label, e.g. `2023冬`.
    #[must_use]
    pub fn display_label(&self) -> String {
        format!("{:04}{}", self.year, self.season.label())
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{}", self.year, self.season)
    }
}

impl FromStr for Quarter {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| CalendarError::InvalidSymbol(s.to_string()))
    }
}

impl TryFrom<String> for Quarter {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Quarter> for String {
    fn from(quarter: Quarter) -> Self {
        quarter.symbol()
    }
}
