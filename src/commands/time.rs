//! Timestamp/datetime conversion

use alloy_primitives::U256;
use anyhow::{bail, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use super::{from_hex_input, Report};

/// `now [value]` — with no value, print the current time; with a numeric
/// value, interpret it as a unix timestamp (seconds and milliseconds are
/// both tried, keeping readings that land in 2000..=2100); otherwise try
/// to parse it as a datetime and print its timestamps.
pub fn convert(input: Option<&str>) -> Result<()> {
    let Some(raw) = input else {
        let now = Local::now();
        Report::new()
            .add("in sec", now.timestamp().to_string())
            .add("in milli", now.timestamp_millis().to_string())
            .add("in datetime", now.format("%Y-%m-%d %H:%M:%S").to_string())
            .print();
        return Ok(());
    };
    let raw = raw.trim();

    if let Some(ts) = numeric_timestamp(raw) {
        let mut report = Report::new();
        let mut hits = 0;
        if let Some(dt) = in_this_century(ts) {
            report = report.add("as sec", dt.format("%Y-%m-%d %H:%M:%S").to_string());
            hits += 1;
        }
        if let Some(dt) = in_this_century(ts / 1000) {
            report = report.add("as milli", dt.format("%Y-%m-%d %H:%M:%S").to_string());
            hits += 1;
        }
        if hits == 0 {
            bail!("timestamp {raw} is outside 2000..=2100 in both seconds and milliseconds");
        }
        report.print();
        return Ok(());
    }

    match parse_datetime(raw) {
        Some(dt) => {
            Report::new()
                .add("in sec", dt.timestamp().to_string())
                .add("in milli", dt.timestamp_millis().to_string())
                .add("in datetime", dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .print();
            Ok(())
        }
        None => bail!("cannot parse {raw:?} as timestamp or datetime"),
    }
}

fn numeric_timestamp(s: &str) -> Option<i64> {
    if s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty() {
        return s.parse().ok();
    }
    // short hex values are accepted too
    let bytes = from_hex_input(s)?;
    if bytes.is_empty() || bytes.len() > 6 {
        return None;
    }
    Some(U256::from_be_slice(&bytes).to::<i64>())
}

fn in_this_century(ts: i64) -> Option<DateTime<Local>> {
    let dt = Local.timestamp_opt(ts, 0).single()?;
    (2000..=2100).contains(&dt.year()).then_some(dt)
}

/// Accepts full datetimes, dates, month-day forms (current year assumed)
/// and bare times (today assumed), in the local timezone.
fn parse_datetime(s: &str) -> Option<DateTime<Local>> {
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%y-%m-%d %H:%M:%S",
        "%y-%m-%d %H:%M",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Local.from_local_datetime(&naive).single();
        }
    }

    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%y-%m-%d"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Local
                .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
                .single();
        }
    }

    let today = Local::now().date_naive();

    // month-day without a year
    for format in ["%m-%d %H:%M:%S", "%m-%d %H:%M", "%m-%d"] {
        let with_year = format!("{}-{s}", today.year());
        let full_format = format!("%Y-{format}");
        if let Ok(naive) = NaiveDateTime::parse_from_str(&with_year, &full_format) {
            return Local.from_local_datetime(&naive).single();
        }
        if format == "%m-%d" {
            if let Ok(date) = NaiveDate::parse_from_str(&with_year, &full_format) {
                return Local
                    .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
                    .single();
            }
        }
    }

    // bare time, today assumed
    for format in ["%H:%M:%S", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(s, format) {
            return Local.from_local_datetime(&today.and_time(time)).single();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_timestamp() {
        assert_eq!(numeric_timestamp("1700000000"), Some(1_700_000_000));
        assert_eq!(numeric_timestamp("0x6553f100"), Some(0x6553f100));
        assert_eq!(numeric_timestamp("2023-11-14"), None);
        assert_eq!(numeric_timestamp("0xffffffffffffffffff"), None); // > 6 bytes
    }

    #[test]
    fn test_parse_datetime_forms() {
        assert!(parse_datetime("2023-11-14 22:13:20").is_some());
        assert!(parse_datetime("2023-11-14").is_some());
        assert!(parse_datetime("11-14 22:13").is_some());
        assert!(parse_datetime("22:13:20").is_some());
        assert!(parse_datetime("not a date").is_none());
    }

    #[test]
    fn test_in_this_century() {
        assert!(in_this_century(1_700_000_000).is_some());
        // year 1973 in seconds
        assert!(in_this_century(100_000_000).is_none());
    }
}
