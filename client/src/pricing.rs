//! Price quoting for a selected range.
//!
//! Pure and deterministic so the dialog can show the figure without a
//! round trip. The server recomputes at submit time and wins on
//! disagreement (a rate can change mid-session).

use crate::range_selector::DateRange;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    /// Inclusive day count (both endpoints count)
    pub days: i64,
    pub total: f64,
}

/// Quote a range at a daily rate. `DateRange` is ordered by
/// construction, so the count is always at least 1.
pub fn quote(range: DateRange, price_per_day: f64) -> Quote {
    let days = range.days();
    Quote {
        days,
        total: price_per_day * days as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day_identity() {
        let range = DateRange::new(date(2024, 6, 10), date(2024, 6, 10)).unwrap();
        let quote = quote(range, 150.0);
        assert_eq!(quote.days, 1);
        assert_eq!(quote.total, 150.0);
    }

    #[test]
    fn test_six_day_range() {
        let range = DateRange::new(date(2024, 6, 10), date(2024, 6, 15)).unwrap();
        let quote = quote(range, 120.0);
        assert_eq!(quote.days, 6);
        assert_eq!(quote.total, 720.0);
    }

    #[test]
    fn test_count_crosses_month_boundary() {
        let range = DateRange::new(date(2024, 6, 28), date(2024, 7, 2)).unwrap();
        assert_eq!(quote(range, 100.0).days, 5);
    }

    #[test]
    fn test_count_crosses_leap_day() {
        let range = DateRange::new(date(2024, 2, 28), date(2024, 3, 1)).unwrap();
        assert_eq!(quote(range, 100.0).days, 3);
    }
}
