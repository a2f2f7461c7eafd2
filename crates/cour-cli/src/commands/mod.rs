pub mod catalog;
pub mod config;
pub mod quarter;
pub mod stats;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use cour_core::Quarter;

/// Parse an RFC 3339 instant given on the command line.
pub fn parse_instant(text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("Invalid instant {text:?}; expected RFC 3339, e.g. 2023-01-07T23:30:00+09:00"))
}

/// Resolve an optional `--cour` filter the way query parameters are: a
/// malformed symbol is logged and treated as absent.
pub fn quarter_filter(symbol: Option<&str>) -> Option<Quarter> {
    let symbol = symbol?;
    let quarter = Quarter::from_symbol(symbol);
    if quarter.is_none() {
        log::warn!("Ignoring malformed cour {symbol:?}");
    }
    quarter
}

#[cfg(test)]
mod tests {
    use super::*;
    use cour_core::Season;

    #[test]
    fn test_parse_instant() {
        let instant = parse_instant("2023-01-01T04:00:00+09:00").unwrap();
        assert_eq!(instant.timestamp(), 1_672_513_200);
        assert!(parse_instant("2023-01-01").is_err());
    }

    #[test]
    fn test_quarter_filter() {
        assert_eq!(
            quarter_filter(Some("2023winter")),
            Some(Quarter::new(2023, Season::Winter).unwrap())
        );
        assert_eq!(quarter_filter(Some("2023Winter")), None);
        assert_eq!(quarter_filter(None), None);
    }
}
