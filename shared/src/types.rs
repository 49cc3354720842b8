//! Common value types
//!
//! Calendar/clock types used across the engine

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;

/// Wall-clock time of day with whole-second precision, no date attached.
///
/// Subtraction is modulo 24 hours: a later sample that is numerically
/// smaller than an earlier one is read as having crossed midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(transparent))]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Midnight (00:00:00)
    pub const MIDNIGHT: Self = Self(NaiveTime::MIN);

    pub fn from_hms(hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, min, sec).map(Self)
    }

    /// Wrap a chrono time, dropping sub-second precision
    pub fn from_naive(time: NaiveTime) -> Self {
        Self(time.with_nanosecond(0).unwrap_or(time))
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    pub fn seconds_from_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight()
    }

    /// Seconds elapsed on a rolling 24h clock from `start` to `self`.
    ///
    /// Always in `0..86_400`; equal samples give zero.
    pub fn seconds_since(&self, start: TimeOfDay) -> u32 {
        let diff = i64::from(self.seconds_from_midnight()) - i64::from(start.seconds_from_midnight());
        // rem_euclid keeps the result in 0..SECONDS_PER_DAY, which fits in u32
        diff.rem_euclid(SECONDS_PER_DAY) as u32
    }

    /// Hours elapsed since `start`, rounded to 2 decimal places (half away from zero)
    pub fn hours_since(&self, start: TimeOfDay) -> f64 {
        let hours = Decimal::from(self.seconds_since(start)) / Decimal::from(SECONDS_PER_HOUR);
        hours
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or_default()
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self::from_naive(time)
    }
}

impl FromStr for TimeOfDay {
    type Err = chrono::ParseError;

    /// Accepts `HH:MM:SS` or `HH:MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(Self::from_naive)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

/// Calendar month (`YYYY-MM`), the key for salary and performance records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        // Reject anything chrono cannot place on a calendar
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// First day of the following month (exclusive upper bound for range queries)
    pub fn next_first_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Error parsing a [`YearMonth`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid month '{0}', expected YYYY-MM")]
pub struct InvalidYearMonth(pub String);

impl FromStr for YearMonth {
    type Err = InvalidYearMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidYearMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = InvalidYearMonth;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_same_day_hours() {
        assert_eq!(t("17:30:00").hours_since(t("09:00:00")), 8.5);
        assert_eq!(t("12:00:00").seconds_since(t("09:00:00")), 3 * 3600);
    }

    #[test]
    fn test_midnight_wrap() {
        assert_eq!(t("00:15:00").hours_since(t("23:30:00")), 0.75);
        assert_eq!(t("00:00:00").seconds_since(t("23:59:59")), 1);
    }

    #[test]
    fn test_equal_samples_are_zero() {
        assert_eq!(t("10:00:00").seconds_since(t("10:00:00")), 0);
        assert_eq!(t("10:00:00").hours_since(t("10:00:00")), 0.0);
    }

    #[test]
    fn test_elapsed_stays_below_a_day() {
        let elapsed = t("08:59:59").seconds_since(t("09:00:00"));
        assert_eq!(elapsed, 86_399);
        assert!(t("08:59:59").hours_since(t("09:00:00")) <= 24.0);
    }

    #[test]
    fn test_hours_rounding() {
        // 20 minutes = 0.3333.. h
        assert_eq!(t("09:20:00").hours_since(t("09:00:00")), 0.33);
        // 1 minute = 0.01666.. h
        assert_eq!(t("09:01:00").hours_since(t("09:00:00")), 0.02);
        // 18 seconds = 0.005 h exactly, rounds half away from zero
        assert_eq!(t("09:00:18").hours_since(t("09:00:00")), 0.01);
    }

    #[test]
    fn test_time_parse_and_display() {
        assert_eq!(t("07:05").to_string(), "07:05:00");
        assert_eq!(t("23:59:59").to_string(), "23:59:59");
        assert!("24:00:00".parse::<TimeOfDay>().is_err());
        assert!("nine".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_from_naive_drops_subseconds() {
        let naive = NaiveTime::from_hms_milli_opt(9, 0, 0, 750).unwrap();
        assert_eq!(TimeOfDay::from_naive(naive), TimeOfDay::from_hms(9, 0, 0).unwrap());
    }

    #[test]
    fn test_time_of_day_serde() {
        let json = serde_json::to_string(&t("09:30:00")).unwrap();
        assert_eq!(json, "\"09:30:00\"");
    }

    #[test]
    fn test_year_month_parse() {
        let ym: YearMonth = "2024-02".parse().unwrap();
        assert_eq!(ym.year(), 2024);
        assert_eq!(ym.month(), 2);
        assert_eq!(ym.to_string(), "2024-02");

        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024-2".parse::<YearMonth>().is_err());
        assert!("202402".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_bounds() {
        let dec: YearMonth = "2023-12".parse().unwrap();
        assert_eq!(dec.first_day(), NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(dec.next_first_day(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(dec.contains(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
        assert!(!dec.contains(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert_eq!(YearMonth::of(NaiveDate::from_ymd_opt(2023, 12, 9).unwrap()), dec);
    }

    #[test]
    fn test_year_month_serde() {
        let ym: YearMonth = serde_json::from_str("\"2024-06\"").unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"2024-06\"");
        assert!(serde_json::from_str::<YearMonth>("\"June\"").is_err());
    }
}
