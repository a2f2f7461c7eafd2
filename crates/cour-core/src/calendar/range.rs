//! Enumeration of contiguous quarter ranges.

use super::quarter::Quarter;
use super::season::Season;
use crate::error::CalendarError;

/// Every quarter from `first` to `last` inclusive, oldest first.
///
/// A single-year range is a slice of the season cycle. Otherwise the
/// result is the tail of `first`'s year, all four seasons of every year in
/// between, then the head of `last`'s year.
///
/// # Errors
///
/// Returns [`CalendarError::ReversedRange`] if `first` is after `last`.
///
/// # Example
///
/// ```
/// use cour_core::calendar::{enumerate_quarter_range, Quarter, Season};
///
/// let range = enumerate_quarter_range(
///     Quarter::new(2022, Season::Autumn).unwrap(),
///     Quarter::new(2023, Season::Spring).unwrap(),
/// )
/// .unwrap();
/// let symbols: Vec<String> = range.iter().map(Quarter::symbol).collect();
/// assert_eq!(symbols, ["2022autumn", "2023winter", "2023spring"]);
/// ```
pub fn enumerate_quarter_range(first: Quarter, last: Quarter) -> Result<Vec<Quarter>, CalendarError> {
    if first > last {
        return Err(CalendarError::ReversedRange { first, last });
    }

    let (from, to) = (first.season().index(), last.season().index());
    if first.year() == last.year() {
        return Ok(seasons_of(first.year(), &Season::ALL[from..=to]).collect());
    }

    let len = usize::try_from(last.ordinal() - first.ordinal() + 1).unwrap_or(0);
    let mut quarters = Vec::with_capacity(len);
    quarters.extend(seasons_of(first.year(), &Season::ALL[from..]));
    for year in first.year() + 1..last.year() {
        quarters.extend(seasons_of(year, &Season::ALL));
    }
    quarters.extend(seasons_of(last.year(), &Season::ALL[..=to]));
    Ok(quarters)
}

fn seasons_of(year: i32, seasons: &[Season]) -> impl Iterator<Item = Quarter> + '_ {
    seasons.iter().map(move |&season| Quarter::from_parts(year, season))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(quarters: &[Quarter]) -> Vec<String> {
        quarters.iter().map(Quarter::symbol).collect()
    }

    #[test]
    fn test_single_quarter() {
        let q = Quarter::new(2023, Season::Winter).unwrap();
        assert_eq!(enumerate_quarter_range(q, q).unwrap(), vec![q]);
    }

    #[test]
    fn test_same_year_slice() {
        let range = enumerate_quarter_range(
            Quarter::new(2023, Season::Spring).unwrap(),
            Quarter::new(2023, Season::Autumn).unwrap(),
        )
        .unwrap();
        assert_eq!(symbols(&range), ["2023spring", "2023summer", "2023autumn"]);
    }

    #[test]
    fn test_adjacent_years() {
        let range = enumerate_quarter_range(
            Quarter::new(2022, Season::Autumn).unwrap(),
            Quarter::new(2023, Season::Winter).unwrap(),
        )
        .unwrap();
        assert_eq!(symbols(&range), ["2022autumn", "2023winter"]);
    }

    #[test]
    fn test_spans_full_years() {
        let range = enumerate_quarter_range(
            Quarter::new(2022, Season::Autumn).unwrap(),
            Quarter::new(2024, Season::Summer).unwrap(),
        )
        .unwrap();
        assert_eq!(
            symbols(&range),
            [
                "2022autumn",
                "2023winter",
                "2023spring",
                "2023summer",
                "2023autumn",
                "2024winter",
                "2024spring",
                "2024summer",
            ]
        );
    }

    #[test]
    fn test_reversed_range_fails() {
        let first = Quarter::new(2023, Season::Spring).unwrap();
        let last = Quarter::new(2023, Season::Winter).unwrap();
        assert_eq!(
            enumerate_quarter_range(first, last),
            Err(CalendarError::ReversedRange { first, last })
        );
    }

    #[test]
    fn test_reversed_across_years_fails() {
        let first = Quarter::new(2024, Season::Winter).unwrap();
        let last = Quarter::new(2023, Season::Autumn).unwrap();
        assert!(enumerate_quarter_range(first, last).is_err());
    }
}
