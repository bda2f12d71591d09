//! Recurring annual sowing windows.
//!
//! A sowing window is a pair of month-day bounds that repeats every year,
//! independent of any particular year. Windows may wrap the year boundary
//! (October through February), so membership is decided on the month-day
//! component alone, ordered within a fixed non-leap reference year.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CalendarError;

/// Year used to validate month-day values. Any non-leap year works; a window
/// bound can never name February 29.
const REFERENCE_YEAR: i32 = 2023;

/// A day of the year without a year, ordered by (month, day).
///
/// The wire and database representation is the `"MM-DD"` string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Build a month-day value, checked against the non-leap reference year.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonthDay` if the pair does not name a
    /// real day (month 13, April 31, February 29, ...).
    pub fn new(month: u32, day: u32) -> Result<Self, CalendarError> {
        if NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day).is_none() {
            return Err(CalendarError::InvalidMonthDay(format!(
                "{month:02}-{day:02}"
            )));
        }
        Ok(Self { month, day })
    }

    /// Reduce a calendar date to its month-day component, ignoring the year.
    ///
    /// February 29 reduces to February 28 so leap dates stay comparable in
    /// the non-leap reference year.
    pub fn from_date(date: NaiveDate) -> Self {
        let (month, day) = (date.month(), date.day());
        if month == 2 && day == 29 {
            Self { month: 2, day: 28 }
        } else {
            Self { month, day }
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidMonthDay(s.to_string());
        let (month, day) = s.split_once('-').ok_or_else(invalid)?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;
        Self::new(month, day).map_err(|_| invalid())
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A recurring annual window between two month-day bounds, inclusive.
///
/// When `start > end` the window wraps the calendar year boundary, e.g.
/// `10-01` through `02-01` covers October to February.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonWindow {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl SeasonWindow {
    pub fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    /// Whether the window wraps the calendar year boundary.
    pub fn wraps_year(&self) -> bool {
        self.start > self.end
    }

    /// Inclusive membership test on the month-day component.
    pub fn contains(&self, md: MonthDay) -> bool {
        if self.wraps_year() {
            md >= self.start || md <= self.end
        } else {
            self.start <= md && md <= self.end
        }
    }

    /// Membership test for a concrete calendar date, ignoring its year.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(MonthDay::from_date(date))
    }
}

impl fmt::Display for SeasonWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn md(s: &str) -> MonthDay {
        s.parse().unwrap()
    }

    #[test]
    fn month_day_parse_and_format() {
        let value = md("06-15");
        assert_eq!(value.month(), 6);
        assert_eq!(value.day(), 15);
        assert_eq!(value.to_string(), "06-15");
        assert_eq!(md("6-5").to_string(), "06-05");
    }

    #[test]
    fn month_day_rejects_invalid_values() {
        assert!("13-01".parse::<MonthDay>().is_err());
        assert!("04-31".parse::<MonthDay>().is_err());
        assert!("02-29".parse::<MonthDay>().is_err());
        assert!("junk".parse::<MonthDay>().is_err());
        assert!("".parse::<MonthDay>().is_err());
    }

    #[test]
    fn month_day_ordering() {
        assert!(md("01-31") < md("02-01"));
        assert!(md("10-01") > md("02-01"));
        assert_eq!(md("07-07"), md("07-07"));
    }

    #[test]
    fn leap_day_reduces_to_feb_28() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(MonthDay::from_date(leap), md("02-28"));
    }

    #[test]
    fn serde_round_trips_as_string() {
        let json = serde_json::to_string(&md("10-01")).unwrap();
        assert_eq!(json, "\"10-01\"");
        let back: MonthDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, md("10-01"));
    }

    #[test]
    fn plain_window_is_inclusive_at_both_bounds() {
        let window = SeasonWindow::new(md("06-01"), md("07-15"));
        assert!(!window.wraps_year());
        assert!(window.contains(md("06-01")));
        assert!(window.contains(md("07-15")));
        assert!(window.contains(md("06-20")));
        // one day outside either bound
        assert!(!window.contains(md("05-31")));
        assert!(!window.contains(md("07-16")));
    }

    #[test]
    fn wrapping_window_covers_both_year_ends() {
        let window = SeasonWindow::new(md("10-01"), md("02-01"));
        assert!(window.wraps_year());
        for inside in ["10-01", "12-25", "01-15", "02-01"] {
            assert!(window.contains(md(inside)), "{inside} should be in season");
        }
        for outside in ["02-02", "09-30"] {
            assert!(!window.contains(md(outside)), "{outside} should be out");
        }
    }

    #[test]
    fn single_day_window() {
        let window = SeasonWindow::new(md("03-15"), md("03-15"));
        assert!(window.contains(md("03-15")));
        assert!(!window.contains(md("03-14")));
        assert!(!window.contains(md("03-16")));
    }

    #[test]
    fn contains_date_ignores_year() {
        let window = SeasonWindow::new(md("10-01"), md("02-01"));
        let dec_2021 = NaiveDate::from_ymd_opt(2021, 12, 25).unwrap();
        let dec_2030 = NaiveDate::from_ymd_opt(2030, 12, 25).unwrap();
        assert!(window.contains_date(dec_2021));
        assert!(window.contains_date(dec_2030));
    }

    fn arb_month_day() -> impl Strategy<Value = MonthDay> {
        (0u32..365).prop_map(|ordinal| {
            let date = NaiveDate::from_ymd_opt(REFERENCE_YEAR, 1, 1).unwrap()
                + chrono::Days::new(ordinal as u64);
            MonthDay::from_date(date)
        })
    }

    proptest! {
        #[test]
        fn window_always_contains_its_bounds(a in arb_month_day(), b in arb_month_day()) {
            let window = SeasonWindow::new(a, b);
            prop_assert!(window.contains(a));
            prop_assert!(window.contains(b));
        }

        #[test]
        fn every_day_is_inside_or_outside_consistently(
            a in arb_month_day(),
            b in arb_month_day(),
            probe in arb_month_day(),
        ) {
            // A window and the reversed window partition the year between
            // them, overlapping only at the shared bounds.
            prop_assume!(a != b);
            let window = SeasonWindow::new(a, b);
            let reversed = SeasonWindow::new(b, a);
            let in_either = window.contains(probe) || reversed.contains(probe);
            prop_assert!(in_either);
            if window.contains(probe) && reversed.contains(probe) {
                prop_assert!(probe == a || probe == b);
            }
        }
    }
}
