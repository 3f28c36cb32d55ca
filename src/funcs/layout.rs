//! Formatting of instants with Go reference-time layouts.
//!
//! A layout is an example rendering of the reference time
//! `Mon Jan 2 15:04:05 MST 2006`: `2006-01-02` prints a date, `3:04PM` a
//! twelve hour clock, `Z07:00` an ISO 8601 offset and so on. Everything that
//! is not a recognised element is copied literally.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

const LONG_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const LONG_DAYS: [&str; 7] =
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    LongMonth,
    Month,
    NumMonth,
    ZeroMonth,
    LongWeekDay,
    WeekDay,
    Day,
    UnderDay,
    ZeroDay,
    UnderYearDay,
    ZeroYearDay,
    Hour,
    Hour12,
    ZeroHour12,
    Minute,
    ZeroMinute,
    Second,
    ZeroSecond,
    LongYear,
    Year,
    UpperPm,
    LowerPm,
    TimeZone,
    /// Numeric offset; `iso` prints `Z` for UTC, `colons` separates fields,
    /// `seconds` includes the seconds field and `hours_only` drops minutes.
    Offset { iso: bool, colons: bool, seconds: bool, hours_only: bool },
    /// Fractional seconds with a fixed number of digits (`.000`) or with
    /// trailing zeros removed (`.999`).
    Fraction { digits: usize, trim: bool, separator: char },
}

const OFFSETS: [(&str, bool, bool, bool); 5] = [
    // (suffix after the sign, colons, seconds, hours_only)
    ("070000", false, true, false),
    ("07:00:00", true, true, false),
    ("0700", false, false, false),
    ("07:00", true, false, false),
    ("07", false, false, true),
];

/// Finds the next layout element, returning the literal prefix before it,
/// the element and the remaining layout.
fn next_element(layout: &str) -> (&str, Option<(Element, &str)>) {
    let bytes = layout.as_bytes();
    for (i, _) in layout.char_indices() {
        let rest = &layout[i..];
        let found = match bytes[i] {
            b'J' if rest.starts_with("January") => Some((Element::LongMonth, 7)),
            b'J' if rest.starts_with("Jan") => Some((Element::Month, 3)),
            b'M' if rest.starts_with("Monday") => Some((Element::LongWeekDay, 6)),
            b'M' if rest.starts_with("Mon") => Some((Element::WeekDay, 3)),
            b'M' if rest.starts_with("MST") => Some((Element::TimeZone, 3)),
            b'0' if rest.starts_with("002") => Some((Element::ZeroYearDay, 3)),
            b'0' => match bytes.get(i + 1) {
                Some(b'1') => Some((Element::ZeroMonth, 2)),
                Some(b'2') => Some((Element::ZeroDay, 2)),
                Some(b'3') => Some((Element::ZeroHour12, 2)),
                Some(b'4') => Some((Element::ZeroMinute, 2)),
                Some(b'5') => Some((Element::ZeroSecond, 2)),
                Some(b'6') => Some((Element::Year, 2)),
                _ => None,
            },
            b'1' if rest.starts_with("15") => Some((Element::Hour, 2)),
            b'1' => Some((Element::NumMonth, 1)),
            b'2' if rest.starts_with("2006") => Some((Element::LongYear, 4)),
            b'2' => Some((Element::Day, 1)),
            // `_2006` is a literal underscore followed by the year.
            b'_' if rest.starts_with("_2006") => {
                return (&layout[..i + 1], Some((Element::LongYear, &layout[i + 5..])));
            }
            b'_' if rest.starts_with("__2") => Some((Element::UnderYearDay, 3)),
            b'_' if rest.starts_with("_2") => Some((Element::UnderDay, 2)),
            b'3' => Some((Element::Hour12, 1)),
            b'4' => Some((Element::Minute, 1)),
            b'5' => Some((Element::Second, 1)),
            b'P' if rest.starts_with("PM") => Some((Element::UpperPm, 2)),
            b'p' if rest.starts_with("pm") => Some((Element::LowerPm, 2)),
            b'-' | b'Z' => OFFSETS.iter().find_map(|(suffix, colons, seconds, hours_only)| {
                rest[1..].starts_with(suffix).then(|| {
                    let element = Element::Offset {
                        iso: bytes[i] == b'Z',
                        colons: *colons,
                        seconds: *seconds,
                        hours_only: *hours_only,
                    };
                    (element, suffix.len() + 1)
                })
            }),
            b'.' | b',' => fraction(rest),
            _ => None,
        };

        if let Some((element, width)) = found {
            return (&layout[..i], Some((element, &layout[i + width..])));
        }
    }
    (layout, None)
}

fn fraction(rest: &str) -> Option<(Element, usize)> {
    let bytes = rest.as_bytes();
    let digit = *bytes.get(1)?;
    if digit != b'0' && digit != b'9' {
        return None;
    }
    let digits = bytes[1..].iter().take_while(|b| **b == digit).count();
    if bytes.get(1 + digits).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    let element = Element::Fraction {
        digits: digits.min(9),
        trim: digit == b'9',
        separator: bytes[0] as char,
    };
    Some((element, 1 + digits))
}

/// Renders `instant` following a Go reference-time `layout`.
///
/// ```
/// use chrono::DateTime;
/// use gt::funcs::layout::format;
///
/// let instant = DateTime::parse_from_rfc3339("2024-03-05T14:07:09+01:00").unwrap();
/// assert_eq!(format(&instant, "2006-01-02 3:04PM Z07:00"), "2024-03-05 2:07PM +01:00");
/// ```
pub fn format(instant: &DateTime<FixedOffset>, layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() + 10);
    let mut layout = layout;
    loop {
        let (literal, element) = next_element(layout);
        out.push_str(literal);
        let Some((element, rest)) = element else {
            break;
        };
        append(&mut out, instant, element);
        layout = rest;
    }
    out
}

fn append(out: &mut String, instant: &DateTime<FixedOffset>, element: Element) {
    let hour = instant.hour();
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    match element {
        Element::LongMonth => out.push_str(LONG_MONTHS[instant.month0() as usize]),
        Element::Month => out.push_str(&LONG_MONTHS[instant.month0() as usize][..3]),
        Element::NumMonth => out.push_str(&instant.month().to_string()),
        Element::ZeroMonth => out.push_str(&format!("{:02}", instant.month())),
        Element::LongWeekDay => {
            out.push_str(LONG_DAYS[instant.weekday().num_days_from_monday() as usize])
        }
        Element::WeekDay => {
            out.push_str(&LONG_DAYS[instant.weekday().num_days_from_monday() as usize][..3])
        }
        Element::Day => out.push_str(&instant.day().to_string()),
        Element::UnderDay => out.push_str(&format!("{:>2}", instant.day())),
        Element::ZeroDay => out.push_str(&format!("{:02}", instant.day())),
        Element::UnderYearDay => out.push_str(&format!("{:>3}", instant.ordinal())),
        Element::ZeroYearDay => out.push_str(&format!("{:03}", instant.ordinal())),
        Element::Hour => out.push_str(&format!("{hour:02}")),
        Element::Hour12 => out.push_str(&hour12.to_string()),
        Element::ZeroHour12 => out.push_str(&format!("{hour12:02}")),
        Element::Minute => out.push_str(&instant.minute().to_string()),
        Element::ZeroMinute => out.push_str(&format!("{:02}", instant.minute())),
        Element::Second => out.push_str(&instant.second().to_string()),
        Element::ZeroSecond => out.push_str(&format!("{:02}", instant.second())),
        Element::LongYear => out.push_str(&format!("{:04}", instant.year())),
        Element::Year => out.push_str(&format!("{:02}", instant.year().rem_euclid(100))),
        Element::UpperPm => out.push_str(if hour >= 12 { "PM" } else { "AM" }),
        Element::LowerPm => out.push_str(if hour >= 12 { "pm" } else { "am" }),
        Element::TimeZone => {
            let offset = instant.offset().local_minus_utc();
            if offset == 0 {
                out.push_str("UTC");
            } else {
                append_offset(out, offset, false, false);
            }
        }
        Element::Offset { iso, colons, seconds, hours_only } => {
            let offset = instant.offset().local_minus_utc();
            if iso && offset == 0 {
                out.push('Z');
            } else if hours_only {
                let sign = if offset < 0 { '-' } else { '+' };
                out.push_str(&format!("{sign}{:02}", offset.abs() / 3600));
            } else {
                append_offset(out, offset, colons, seconds);
            }
        }
        Element::Fraction { digits, trim, separator } => {
            let nanos = instant.nanosecond() % 1_000_000_000;
            let mut fraction = format!("{nanos:09}");
            fraction.truncate(digits);
            if trim {
                let trimmed = fraction.trim_end_matches('0');
                if !trimmed.is_empty() {
                    out.push(separator);
                    out.push_str(trimmed);
                }
            } else {
                out.push(separator);
                out.push_str(&fraction);
            }
        }
    }
}

fn append_offset(out: &mut String, offset: i32, colons: bool, seconds: bool) {
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.abs();
    out.push(sign);
    out.push_str(&format!("{:02}", offset / 3600));
    if colons {
        out.push(':');
    }
    out.push_str(&format!("{:02}", offset / 60 % 60));
    if seconds {
        if colons {
            out.push(':');
        }
        out.push_str(&format!("{:02}", offset % 60));
    }
}
