use crate::time::{days_in_month, is_leap_year, month_name};
use crate::{Date, LocalDateTime, Offset, OffsetDateTime, Time};

#[test]
fn leap_years() {
    assert!(is_leap_year(2000));
    assert!(is_leap_year(2024));
    assert!(!is_leap_year(1900));
    assert!(!is_leap_year(1937));
    assert!(is_leap_year(0));
}

#[test]
fn month_lengths() {
    assert_eq!(days_in_month(2021, 1), 31);
    assert_eq!(days_in_month(2021, 2), 28);
    assert_eq!(days_in_month(2020, 2), 29);
    assert_eq!(days_in_month(2021, 4), 30);
    assert_eq!(days_in_month(2021, 12), 31);
}

#[test]
fn month_names() {
    assert_eq!(month_name(1), "JANUARY");
    assert_eq!(month_name(2), "FEBRUARY");
    assert_eq!(month_name(12), "DECEMBER");
}

#[test]
fn date_display() {
    let d = Date {
        year: 0,
        month: 1,
        day: 1,
    };
    assert_eq!(d.to_string(), "0000-01-01");
    let d = Date {
        year: 1979,
        month: 5,
        day: 27,
    };
    assert_eq!(d.to_string(), "1979-05-27");
}

#[test]
fn time_display_trims_fractional_zeros() {
    let t = Time {
        hour: 7,
        minute: 32,
        second: 0,
        nanosecond: 0,
    };
    assert_eq!(t.to_string(), "07:32:00");
    let t = Time {
        hour: 13,
        minute: 55,
        second: 2,
        nanosecond: 300_000_000,
    };
    assert_eq!(t.to_string(), "13:55:02.3");
    let t = Time {
        hour: 0,
        minute: 0,
        second: 0,
        nanosecond: 1,
    };
    assert_eq!(t.to_string(), "00:00:00.000000001");
}

#[test]
fn offset_display() {
    assert_eq!(Offset::Z.to_string(), "Z");
    assert_eq!(Offset::Custom { minutes: 0 }.to_string(), "+00:00");
    assert_eq!(Offset::Custom { minutes: -480 }.to_string(), "-08:00");
    assert_eq!(Offset::Custom { minutes: 1080 }.to_string(), "+18:00");
}

#[test]
fn datetime_display() {
    let dt = OffsetDateTime {
        date: Date {
            year: 1987,
            month: 7,
            day: 5,
        },
        time: Time {
            hour: 17,
            minute: 45,
            second: 0,
            nanosecond: 0,
        },
        offset: Offset::Z,
    };
    assert_eq!(dt.to_string(), "1987-07-05T17:45:00Z");

    let dt = LocalDateTime {
        date: Date {
            year: 1979,
            month: 5,
            day: 27,
        },
        time: Time {
            hour: 7,
            minute: 32,
            second: 0,
            nanosecond: 500_000_000,
        },
    };
    assert_eq!(dt.to_string(), "1979-05-27T07:32:00.5");
}
