use thiserror::Error;

use crate::calendar::Quarter;

/// Errors raised by the broadcast-quarter calendar.
///
/// All of these are contract violations surfaced to the caller; none are
/// transient. Malformed quarter symbols are not errors at the
/// [`Quarter::from_symbol`] level (they yield `None`), only through
/// [`std::str::FromStr`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The instant cannot be resolved to a quarter: either chrono cannot
    /// represent it, or its broadcast day falls outside years
    /// [`Quarter::MIN_YEAR`]`..=`[`Quarter::MAX_YEAR`]. This includes both
    /// of chrono's own limits.
    #[error("invalid instant: {0}")]
    InvalidInstant(String),

    /// A quarter was requested outside years
    /// [`Quarter::MIN_YEAR`]`..=`[`Quarter::MAX_YEAR`].
    #[error("year out of range: {year}")]
    YearOutOfRange { year: i32 },

    /// The string is not a canonical quarter symbol such as `2023winter`.
    #[error("invalid quarter symbol: {0:?}")]
    InvalidSymbol(String),

    /// The string is not one of the four season names.
    #[error("unknown season: {0:?}")]
    UnknownSeason(String),

    /// A range was requested whose first quarter comes after its last.
    #[error("reversed quarter range: {first} is after {last}")]
    ReversedRange { first: Quarter, last: Quarter },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Season;

    #[test]
    fn test_reversed_range_message() {
        let err = CalendarError::ReversedRange {
            first: Quarter::new(2024, Season::Spring).unwrap(),
            last: Quarter::new(2023, Season::Autumn).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "reversed quarter range: 2024spring is after 2023autumn"
        );
    }

    #[test]
    fn test_invalid_symbol_message() {
        let err = CalendarError::InvalidSymbol("2023fall".to_string());
        assert_eq!(err.to_string(), "invalid quarter symbol: \"2023fall\"");
    }

    #[test]
    fn test_calendar_error_converts() {
        let err: Error = CalendarError::YearOutOfRange { year: 300_000 }.into();
        assert!(matches!(err, Error::Calendar(_)));
        assert_eq!(err.to_string(), "calendar error: year out of range: 300000");
    }

    #[test]
    fn test_errors_are_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
        assert_impl::<Error>();
    }
}
