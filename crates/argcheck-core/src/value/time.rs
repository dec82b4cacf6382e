//! Timestamps and timezones
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static OFFSET_PATTERN: OnceLock<Regex> = OnceLock::new();
static ETC_PATTERN: OnceLock<Regex> = OnceLock::new();

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y%m%dT%H%M%S",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// A timezone: UTC or a fixed offset from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timezone {
    Utc,
    Fixed(FixedOffset),
}

impl Timezone {
    /// Parse `UTC`, `GMT`, `Z`, `+05:30`, `-0800`, `UTC+02:00` or `Etc/GMT+5`
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        match name.to_ascii_lowercase().as_str() {
            "utc" | "gmt" | "z" | "zulu" | "universal" | "etc/utc" | "etc/gmt" => {
                return Some(Timezone::Utc)
            }
            _ => {}
        }

        let offset_re = OFFSET_PATTERN.get_or_init(|| {
            Regex::new(r"^(?i:UTC|GMT)?([+-])(\d{1,2})(?::?(\d{2}))?$").expect("valid offset pattern")
        });
        if let Some(caps) = offset_re.captures(name) {
            let hours: i32 = caps[2].parse().ok()?;
            let minutes: i32 = caps.get(3).map_or(Some(0), |m| m.as_str().parse().ok())?;
            if hours > 23 || minutes > 59 {
                return None;
            }
            let seconds = (hours * 3600 + minutes * 60) * if &caps[1] == "-" { -1 } else { 1 };
            return FixedOffset::east_opt(seconds).map(Self::from_offset);
        }

        // Etc/GMT zones use POSIX signs: Etc/GMT+5 is five hours behind UTC
        let etc_re = ETC_PATTERN
            .get_or_init(|| Regex::new(r"^Etc/GMT([+-])(\d{1,2})$").expect("valid Etc pattern"));
        if let Some(caps) = etc_re.captures(name) {
            let hours: i32 = caps[2].parse().ok()?;
            if hours > 14 {
                return None;
            }
            let seconds = hours * 3600 * if &caps[1] == "+" { -1 } else { 1 };
            return FixedOffset::east_opt(seconds).map(Self::from_offset);
        }

        None
    }

    fn from_offset(offset: FixedOffset) -> Self {
        if offset.local_minus_utc() == 0 {
            Timezone::Utc
        } else {
            Timezone::Fixed(offset)
        }
    }

    pub fn offset(&self) -> FixedOffset {
        match self {
            Timezone::Utc => Utc.fix(),
            Timezone::Fixed(offset) => *offset,
        }
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timezone::Utc => f.write_str("UTC"),
            Timezone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Parse an RFC 3339 / ISO-8601 timestamp; naive inputs are read as UTC
pub fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>, String> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%z") {
        return Ok(dt);
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Utc.fix().from_utc_datetime(&naive));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(Utc.fix().from_utc_datetime(&naive));
            }
        }
    }
    Err(format!("Unknown datetime string format, unable to parse: {}", text))
}

/// Timestamp from nanoseconds since the Unix epoch
pub fn timestamp_from_nanos(nanos: i64) -> DateTime<FixedOffset> {
    Utc.timestamp_nanos(nanos).with_timezone(&Utc.fix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_named_and_offset_zones() {
        assert_eq!(Timezone::parse("UTC"), Some(Timezone::Utc));
        assert_eq!(Timezone::parse("gmt"), Some(Timezone::Utc));
        assert_eq!(Timezone::parse("+00:00"), Some(Timezone::Utc));

        let tz = Timezone::parse("+05:30").unwrap();
        assert_eq!(tz.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
        assert_eq!(Timezone::parse("-0800").unwrap().offset().local_minus_utc(), -8 * 3600);
        assert_eq!(Timezone::parse("UTC+02").unwrap().offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn test_etc_zones_invert_sign() {
        let tz = Timezone::parse("Etc/GMT+5").unwrap();
        assert_eq!(tz.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_unknown_zones() {
        assert_eq!(Timezone::parse("Mars/Olympus_Mons"), None);
        assert_eq!(Timezone::parse("+25:00"), None);
    }

    #[test]
    fn test_parse_timestamps() {
        let dt = parse_timestamp("2014-01-02").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2014, 1, 2, 0));

        let dt = parse_timestamp("2014-01-02T10:30:00+02:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 7200);

        let dt = parse_timestamp("2014-01-02 10:30:00").unwrap();
        assert_eq!(dt.hour(), 10);

        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_nanos_since_epoch() {
        let dt = timestamp_from_nanos(1_000_000_000);
        assert_eq!(dt.timestamp(), 1);
    }
}
