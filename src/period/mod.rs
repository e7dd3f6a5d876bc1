//! Period fragmentation and the day/month/year date codec.
//!
//! A claimed period is split at the dates where the applicable rule
//! changes, so every fragment is judged under exactly one rule.

use crate::error::ClaimError;
use crate::models::DateRange;
use chrono::{Days, NaiveDate};
use serde::Serializer;

/// Textual date format at the boundary and in drafted text.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Split `range` at `cutovers` into contiguous, ordered sub-periods.
///
/// Cutovers are deduplicated and sorted first. A cutover `c` with
/// `start < c <= end` closes the current fragment on `c - 1` and opens
/// a new one on `c`; cutovers outside that window are ignored. The
/// union of the fragments is exactly `range`.
pub fn fragment(range: DateRange, cutovers: &[NaiveDate]) -> Vec<DateRange> {
    let mut cutovers = cutovers.to_vec();
    cutovers.sort_unstable();
    cutovers.dedup();

    let mut fragments = Vec::with_capacity(cutovers.len() + 1);
    let mut current_start = range.start();

    for cutover in cutovers {
        if cutover <= current_start || cutover > range.end() {
            continue;
        }
        // cutover > current_start, so the previous day exists and is >= current_start
        let Some(close) = cutover.checked_sub_days(Days::new(1)) else {
            continue;
        };
        fragments.push(DateRange::from_ordered(current_start, close));
        current_start = cutover;
    }

    fragments.push(DateRange::from_ordered(current_start, range.end()));
    fragments
}

/// Format a date as `DD/MM/AAAA`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `DD/MM/AAAA` date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ClaimError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| ClaimError::InvalidDate(text.to_string()))
}

/// Serialize a date in `DD/MM/AAAA` form.
pub fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(*date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    fn assert_partition(input: DateRange, fragments: &[DateRange]) {
        assert_eq!(fragments.first().unwrap().start(), input.start());
        assert_eq!(fragments.last().unwrap().end(), input.end());
        for pair in fragments.windows(2) {
            assert_eq!(pair[0].end().succ_opt().unwrap(), pair[1].start());
        }
        let total: i64 = fragments.iter().map(DateRange::days).sum();
        assert_eq!(total, input.days());
    }

    #[test]
    fn test_fragment_skips_cutover_before_range() {
        let input = range(date(2000, 1, 1), date(2005, 1, 1));
        let fragments = fragment(input, &[date(1997, 3, 6), date(2003, 11, 19)]);

        assert_eq!(
            fragments,
            vec![
                range(date(2000, 1, 1), date(2003, 11, 18)),
                range(date(2003, 11, 19), date(2005, 1, 1)),
            ]
        );
        assert_partition(input, &fragments);
    }

    #[test]
    fn test_fragment_without_cutovers() {
        let input = range(date(1990, 5, 1), date(2020, 5, 1));
        assert_eq!(fragment(input, &[]), vec![input]);
    }

    #[test]
    fn test_fragment_single_day_range() {
        let day = date(1997, 3, 6);
        let input = range(day, day);
        assert_eq!(fragment(input, &[day]), vec![input]);
    }

    #[test]
    fn test_cutover_on_start_creates_no_empty_fragment() {
        let input = range(date(1997, 3, 6), date(1998, 1, 1));
        assert_eq!(fragment(input, &[date(1997, 3, 6)]), vec![input]);
    }

    #[test]
    fn test_cutover_on_end_yields_single_day_tail() {
        let input = range(date(1997, 1, 1), date(1997, 3, 6));
        let fragments = fragment(input, &[date(1997, 3, 6)]);
        assert_eq!(
            fragments,
            vec![
                range(date(1997, 1, 1), date(1997, 3, 5)),
                range(date(1997, 3, 6), date(1997, 3, 6)),
            ]
        );
    }

    #[test]
    fn test_cutover_after_end_is_ignored() {
        let input = range(date(1997, 1, 1), date(1997, 3, 5));
        assert_eq!(fragment(input, &[date(1997, 3, 6)]), vec![input]);
    }

    #[test]
    fn test_unsorted_duplicate_cutovers() {
        let input = range(date(1990, 1, 1), date(2010, 12, 31));
        let cutovers = [
            date(2003, 11, 19),
            date(1997, 3, 6),
            date(2003, 11, 19),
            date(1997, 3, 6),
        ];
        let fragments = fragment(input, &cutovers);

        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[1], range(date(1997, 3, 6), date(2003, 11, 18)));
        assert_partition(input, &fragments);
    }

    #[test]
    fn test_partition_holds_across_many_ranges() {
        let cutovers = [date(1997, 3, 6), date(2003, 11, 19), date(2014, 8, 13)];
        let starts = [date(1980, 1, 1), date(1997, 3, 5), date(2003, 11, 19)];
        let ends = [date(1997, 3, 6), date(2003, 11, 18), date(2020, 2, 29)];

        for start in starts {
            for end in ends.iter().copied().filter(|end| *end >= start) {
                let input = range(start, end);
                assert_partition(input, &fragment(input, &cutovers));
            }
        }
    }

    #[test]
    fn test_date_codec() {
        let parsed = parse_date("06/03/1997").unwrap();
        assert_eq!(parsed, date(1997, 3, 6));
        assert_eq!(format_date(parsed), "06/03/1997");
        assert!(matches!(
            parse_date("1997-03-06"),
            Err(ClaimError::InvalidDate(_))
        ));
        assert!(parse_date("31/02/2000").is_err());
    }
}
