// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for UTC calendar-day windows.

use chrono::{Days, NaiveDate, Utc};

/// Current calendar day in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format a day as `YYYY-MM-DD`, the form the forecast API expects.
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Two-day window starting at `day` (today through tomorrow).
pub fn two_day_window(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let tomorrow = day.checked_add_days(Days::new(1)).unwrap_or(day);
    (day, tomorrow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_day_window_crosses_month_and_year() {
        let day = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let (start, end) = two_day_window(day);
        assert_eq!(format_day(start), "2026-12-31");
        assert_eq!(format_day(end), "2027-01-01");
    }
}
