//! Broadcast-quarter ("cour") calendar.
//!
//! Quarters start on Jan 1, Apr 1, Jul 1 and Oct 1 at 04:00 Asia/Tokyo.
//! Every function here is pure: callers pass in "now" explicitly.
//!
//! ```
//! use chrono::DateTime;
//! use cour_core::calendar::{instant_to_quarter, Quarter, Season};
//!
//! let late_night = DateTime::parse_from_rfc3339("2023-01-01T01:30:00+09:00").unwrap();
//! let quarter = instant_to_quarter(&late_night).unwrap();
//! assert_eq!(quarter, Quarter::new(2022, Season::Autumn).unwrap());
//! assert_eq!(quarter.symbol(), "2022autumn");
//! assert_eq!(quarter.next().display_label(), "2023冬");
//! ```

pub mod boundary;
pub mod quarter;
pub mod range;
pub mod season;

pub use boundary::{
    instant_to_quarter, millis_to_quarter, quarter_to_start_instant, QuarterSpan,
    BROADCAST_DAY_START_HOUR, REFERENCE_OFFSET_SECS, REFERENCE_ZONE,
};
pub use quarter::Quarter;
pub use range::enumerate_quarter_range;
pub use season::Season;
