//! UTC calendar date and time for publication metadata.
//!
//! # Parsing
//! Parsing is best-effort and follows ISO 8601 where possible
//! (`YYYY-MM-DD T hh:mm:ss [Z|±hh:mm]`):
//! - `2024` → `2024-01-01T00:00:00Z`
//! - `2024-05` → `2024-05-01T00:00:00Z`
//! - `2024/5/6 10:11` → `2024-05-06T10:11:00Z`
//! - `2024-05-06T10:11:12+02:00` → `2024-05-06T08:11:12Z`
//!
//! Absent components default to the earliest valid value and
//! a UTC offset, when present, is folded into the time.

use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

const SECS_PER_DAY: i64 = 86_400;

/// A UTC [date](Date) and [time](Time).
///
/// # Examples
/// ```
/// # use toepub::document::DateTime;
/// let datetime = DateTime::parse("2023-01-25 10:11:35Z").unwrap();
///
/// assert_eq!("2023-01-25T10:11:35Z", datetime.to_string());
/// assert_eq!("2023-01-25", datetime.date().to_string());
/// assert_eq!(35, datetime.time().second());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    /// The current date and time.
    ///
    /// A system clock set before the UNIX epoch yields a date before 1970.
    pub fn now() -> Self {
        let secs = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(after) => after.as_secs() as i64,
            Err(before) => -(before.duration().as_secs() as i64),
        };
        Self::from_unix(secs)
    }

    /// Converts a UNIX timestamp (seconds) into a calendar date and time.
    ///
    /// ```
    /// # use toepub::document::DateTime;
    /// assert_eq!("1968-02-29T12:18:57Z", DateTime::from_unix(-58016463).to_string());
    /// assert_eq!("2023-11-14T22:13:20Z", DateTime::from_unix(1_700_000_000).to_string());
    /// ```
    pub fn from_unix(secs: i64) -> Self {
        let days = secs.div_euclid(SECS_PER_DAY);
        let secs_of_day = secs.rem_euclid(SECS_PER_DAY) as u32;

        Self {
            date: Date::from_days(days),
            time: Time {
                hour: (secs_of_day / 3600) as u8,
                minute: (secs_of_day / 60 % 60) as u8,
                second: (secs_of_day % 60) as u8,
            },
        }
    }

    /// Parses a (possibly partial) ISO 8601 date and time.
    ///
    /// Returns [`None`] if no year can be found.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (date_str, time_str) = match raw.split_once(['T', 't', ' ']) {
            Some((date, time)) => (date, Some(time.trim())),
            None => (raw, None),
        };

        let date = Date::parse(date_str)?;
        let (time, offset) = time_str.map(Time::parse).unwrap_or_default();

        let datetime = Self { date, time };
        if offset == 0 {
            Some(datetime)
        } else {
            Some(Self::from_unix(datetime.to_unix() - i64::from(offset) * 60))
        }
    }

    /// Seconds since the UNIX epoch.
    pub fn to_unix(&self) -> i64 {
        self.date.to_days() * SECS_PER_DAY + i64::from(self.time.seconds_of_day())
    }

    /// The calendar date (`2025-12-31`).
    pub fn date(&self) -> Date {
        self.date
    }

    /// The UTC time (`16:52:20Z`).
    pub fn time(&self) -> Time {
        self.time
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

/// A proleptic Gregorian date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: i32,
    month: u8,
    day: u8,
}

impl Date {
    /// Creates a date, clamping the month to `1-12` and the day to the month's length.
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        let month = month.clamp(1, 12);
        Self {
            year,
            month,
            day: day.clamp(1, days_in_month(year, month)),
        }
    }

    /// `YYYY[-MM[-DD]]` with any non-digit separator, or compact `YYYYMMDD`.
    fn parse(raw: &str) -> Option<Self> {
        let mut fields = DigitFields::new(raw);

        let year = fields.take(4)?;
        let month = fields.take(2).unwrap_or(1);
        let day = fields.take(2).unwrap_or(1);

        Some(Date::new(year as i32, month as u8, day as u8))
    }

    /// Inverse of [`Self::to_days`].
    ///
    /// Based on Howard Hinnant's `civil_from_days`:
    /// <https://howardhinnant.github.io/date_algorithms.html>
    fn from_days(days: i64) -> Self {
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        let year = yoe + era * 400 + i64::from(month <= 2);

        Self {
            year: year as i32,
            month,
            day,
        }
    }

    /// Days since `1970-01-01` (Howard Hinnant's `days_from_civil`).
    fn to_days(self) -> i64 {
        let year = i64::from(self.year) - i64::from(self.month <= 2);
        let era = year.div_euclid(400);
        let yoe = year.rem_euclid(400);
        let month = i64::from(self.month);
        let doy = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5
            + i64::from(self.day)
            - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month (`1-12`).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// The day of the month (`1-31`).
    pub fn day(&self) -> u8 {
        self.day
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0>4}-{:0>2}-{:0>2}", self.year, self.month, self.day)
    }
}

/// A UTC time of day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    hour: u8,
    minute: u8,
    second: u8,
}

impl Time {
    /// Creates a time, clamping each component to its valid range.
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
            second: second.min(59),
        }
    }

    /// `hh[:mm[:ss]]` followed by an optional `Z`, `±hh[:mm]` offset.
    ///
    /// Returns the time and the offset in minutes east of UTC.
    fn parse(raw: &str) -> (Self, i32) {
        let (clock, offset) = match raw.find(['Z', 'z', '+', '-']) {
            Some(i) => raw.split_at(i),
            None => (raw, ""),
        };

        let mut fields = DigitFields::new(clock);
        let hour = fields.take(2).unwrap_or(0);
        let minute = fields.take(2).unwrap_or(0);
        let second = fields.take(2).unwrap_or(0);

        let offset = match offset.chars().next() {
            Some(sign @ ('+' | '-')) => {
                let mut fields = DigitFields::new(&offset[1..]);
                let minutes = fields.take(2).unwrap_or(0) * 60 + fields.take(2).unwrap_or(0);
                let minutes = (minutes as i32).min(14 * 60);
                if sign == '-' { -minutes } else { minutes }
            }
            _ => 0,
        };

        (Time::new(hour as u8, minute as u8, second as u8), offset)
    }

    fn seconds_of_day(self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60 + u32::from(self.second)
    }

    /// The hour (`0-23`).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// The minute (`0-59`).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// The second (`0-59`).
    pub fn second(&self) -> u8 {
        self.second
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:0>2}:{:0>2}:{:0>2}Z",
            self.hour, self.minute, self.second
        )
    }
}

/// Yields runs of ASCII digits, each capped at a maximum width,
/// skipping any separators between them.
struct DigitFields<'a> {
    rest: &'a str,
}

impl<'a> DigitFields<'a> {
    fn new(raw: &'a str) -> Self {
        Self { rest: raw }
    }

    fn take(&mut self, max_width: usize) -> Option<u32> {
        let start = self.rest.find(|c: char| c.is_ascii_digit())?;
        let digits = &self.rest[start..];
        let len = digits
            .bytes()
            .take(max_width)
            .take_while(u8::is_ascii_digit)
            .count();

        self.rest = &digits[len..];
        digits[..len].parse().ok()
    }
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
