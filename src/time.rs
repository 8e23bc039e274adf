//! Date and time values, modeled on RFC 3339.
//!
//! TOML distinguishes four temporal kinds; each gets its own type here:
//! [`OffsetDateTime`], [`LocalDateTime`], [`Date`] and [`Time`]. All four
//! render in RFC 3339 form via `Display`.

#[cfg(test)]
#[path = "./time_tests.rs"]
mod tests;

use std::fmt;

/// A calendar date.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// A time of day with nanosecond precision.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
}

/// A UTC offset suffix.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Offset {
    /// The `Z` suffix: UTC offset of 00:00, spoken "Zulu" from the ICAO
    /// phonetic alphabet representation of the letter "Z". RFC 3339 section 2.
    Z,
    /// Offset between local time and UTC, in minutes.
    Custom { minutes: i16 },
}

/// A date and time without offset information.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct LocalDateTime {
    pub date: Date,
    pub time: Time,
}

/// A date and time anchored to a UTC offset.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct OffsetDateTime {
    pub date: Date,
    pub time: Time,
    pub offset: Offset,
}

pub(crate) fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) fn days_in_month(year: u16, month: u8) -> u8 {
    const DAYS: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[month as usize]
    }
}

/// Uppercase English month name, used in calendar diagnostics.
pub(crate) fn month_name(month: u8) -> &'static str {
    const NAMES: [&str; 13] = [
        "",
        "JANUARY",
        "FEBRUARY",
        "MARCH",
        "APRIL",
        "MAY",
        "JUNE",
        "JULY",
        "AUGUST",
        "SEPTEMBER",
        "OCTOBER",
        "NOVEMBER",
        "DECEMBER",
    ];
    NAMES[month as usize]
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.nanosecond != 0 {
            let mut digits = format!("{:09}", self.nanosecond);
            while digits.ends_with('0') {
                digits.pop();
            }
            write!(f, ".{digits}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Offset::Z => f.write_str("Z"),
            Offset::Custom { minutes } => {
                let sign = if minutes < 0 { '-' } else { '+' };
                let abs = minutes.unsigned_abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}{}", self.date, self.time, self.offset)
    }
}
