//! Conversions between instants and quarters.
//!
//! The broadcast day starts at 04:00 rather than midnight: anything between
//! 00:00 and 03:59:59.999 belongs to the previous calendar day. Every
//! conversion here shifts instants back by [`BROADCAST_DAY_START_HOUR`]
//! hours before looking at the civil date.
//!
//! The reference zone is Asia/Tokyo, modelled as a fixed UTC+09:00 offset.
//! Japan observes no daylight saving time, so the offset never changes.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::quarter::Quarter;
use super::season::Season;
use crate::error::CalendarError;

/// Offset of the reference zone (Asia/Tokyo) from UTC, in seconds.
pub const REFERENCE_OFFSET_SECS: i32 = 9 * 3600;

/// Hour of the reference-zone day at which a broadcast day begins.
pub const BROADCAST_DAY_START_HOUR: u32 = 4;

/// The reference zone as a chrono offset.
pub const REFERENCE_ZONE: FixedOffset = match FixedOffset::east_opt(REFERENCE_OFFSET_SECS) {
    Some(offset) => offset,
    None => panic!("REFERENCE_OFFSET_SECS must be less than a day"),
};

/// Map an instant to the quarter whose broadcast days contain it.
///
/// Instants whose broadcast day falls outside years
/// [`Quarter::MIN_YEAR`]`..=`[`Quarter::MAX_YEAR`] are
/// [`CalendarError::InvalidInstant`].
pub fn instant_to_quarter<Tz: TimeZone>(instant: &DateTime<Tz>) -> Result<Quarter, CalendarError> {
    let local = instant.with_timezone(&REFERENCE_ZONE);
    let invalid = || CalendarError::InvalidInstant(local.to_rfc3339());
    let shifted = local
        .checked_sub_signed(Duration::hours(i64::from(BROADCAST_DAY_START_HOUR)))
        .ok_or_else(invalid)?;
    let season = Season::from_month(shifted.month()).ok_or_else(invalid)?;
    Quarter::new(shifted.year(), season).map_err(|_| invalid())
}

/// Map a raw epoch-millisecond timestamp to its quarter.
pub fn millis_to_quarter(millis: i64) -> Result<Quarter, CalendarError> {
    let instant = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        CalendarError::InvalidInstant(format!("{millis} ms since the Unix epoch"))
    })?;
    instant_to_quarter(&instant)
}

/// 04:00:00.000 in the reference zone on the first day of the quarter.
pub fn quarter_to_start_instant(quarter: Quarter) -> Result<DateTime<FixedOffset>, CalendarError> {
    season_start(quarter.year(), quarter.season())
}

fn season_start(year: i32, season: Season) -> Result<DateTime<FixedOffset>, CalendarError> {
    let out_of_range = || CalendarError::YearOutOfRange { year };
    let naive = NaiveDate::from_ymd_opt(year, season.start_month(), 1)
        .and_then(|date| date.and_hms_opt(BROADCAST_DAY_START_HOUR, 0, 0))
        .ok_or_else(out_of_range)?;
    REFERENCE_ZONE
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(out_of_range)
}

/// The half-open interval of instants belonging to one quarter.
///
/// `start` is inclusive and `end` (the next quarter's start) is exclusive,
/// so the spans of consecutive quarters tile the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterSpan {
    pub quarter: Quarter,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl QuarterSpan {
    pub fn of(quarter: Quarter) -> Result<Self, CalendarError> {
        Ok(Self {
            quarter,
            start: quarter_to_start_instant(quarter)?,
            end: match quarter.season() {
                // The last quarter's span still ends at the following year's start.
                Season::Autumn => season_start(quarter.year() + 1, Season::Winter)?,
                season => season_start(quarter.year(), season.next())?,
            },
        })
    }

    #[must_use]
    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        let at = instant.naive_utc();
        self.start.naive_utc() <= at && at < self.end.naive_utc()
    }

    #[must_use]
    pub fn contains_millis(&self, millis: i64) -> bool {
        self.start_millis() <= millis && millis < self.end_millis()
    }

    #[must_use]
    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    #[must_use]
    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }
}
