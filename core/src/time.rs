use chrono::{DateTime, Datelike, Duration, NaiveDate};

pub const DAYS_PER_WEEK: usize = 7;

const LEAP_YEAR_DAYS: u32 = 366;
const NORMAL_YEAR_DAYS: u32 = 365;

/// Divisible by 4, and not by 100 unless also by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        LEAP_YEAR_DAYS
    } else {
        NORMAL_YEAR_DAYS
    }
}

pub fn first_day_of_year(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.ordinal0()))
}

/// Weekday of January 1st of the year `date` belongs to (0 = Sunday .. 6 = Saturday).
pub fn start_weekday(date: NaiveDate) -> u32 {
    first_day_of_year(date).weekday().num_days_from_sunday()
}

/// Upstream week timestamps are midnight UTC, so the conversion is done in UTC.
pub fn date_from_timestamp(timestamp: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive())
}

pub fn timestamp_of(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

/// 1-based column of `date` in a grid for `date`'s year.
///
/// Column 1 holds the days before the first Sunday, so the offset of
/// January 1st has to be added before dividing into weeks. Counting
/// `ceil((day + 1) / 7)` from January 1st only agrees with the grid when
/// the year starts on a Sunday.
pub fn week_index(date: NaiveDate) -> u32 {
    (date.ordinal0() + start_weekday(date)) / DAYS_PER_WEEK as u32 + 1
}
