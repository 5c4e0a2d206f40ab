//! Textual scalar payload parsing and formatting.
//!
//! Temporal, duration, and point payloads travel as canonical strings;
//! these free functions translate between those strings and the decoded
//! carrier types.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::driver::error::{DriverError, DriverResult};
use crate::driver::types::{Duration, Point};

fn malformed(tag: &str, payload: &str) -> DriverError {
    DriverError::protocol(format!("Invalid {} payload '{}'", tag, payload))
}

// ============================================================================
// Dates and times
// ============================================================================

/// Parse a `[±]YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> DriverResult<NaiveDate> {
    // A leading sign belongs to the year, not the field separator.
    let (sign, body) = if let Some(rest) = text.strip_prefix('-') {
        ("-", rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        ("", rest)
    } else {
        ("", text)
    };

    let mut parts = body.splitn(3, '-');
    let (year, month, day) = match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) => (y, m, d),
        _ => return Err(malformed("Date", text)),
    };

    let year: i32 = format!("{}{}", sign, year)
        .parse()
        .map_err(|_| malformed("Date", text))?;
    let month: u32 = month.parse().map_err(|_| malformed("Date", text))?;
    let day: u32 = day.parse().map_err(|_| malformed("Date", text))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| malformed("Date", text))
}

/// Parse an `HH:MM:SS[.fffffffff]` time of day.
pub fn parse_local_time(text: &str) -> DriverResult<NaiveTime> {
    let mut parts = text.splitn(3, ':');
    let (hour, minute, rest) = match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), Some(r)) => (h, m, r),
        _ => return Err(malformed("LocalTime", text)),
    };

    let hour: u32 = hour.parse().map_err(|_| malformed("LocalTime", text))?;
    let minute: u32 = minute.parse().map_err(|_| malformed("LocalTime", text))?;

    let (second, nanos) = match rest.split_once('.') {
        Some((sec, frac)) => (sec, parse_nanos(frac, text)?),
        None => (rest, 0),
    };
    let second: u32 = second.parse().map_err(|_| malformed("LocalTime", text))?;

    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
        .ok_or_else(|| malformed("LocalTime", text))
}

/// Parse an `HH:MM:SS[.fffffffff](Z | ±HH[:MM] | nothing)` time of day.
///
/// Returns the time and the UTC offset in seconds; the offset is `None`
/// when the payload carries no offset marker, in which case the value is
/// a local time.
pub fn parse_time(text: &str) -> DriverResult<(NaiveTime, Option<i32>)> {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() < 3 {
        return Err(malformed("Time", text));
    }

    let hour: u32 = parts[0].parse().map_err(|_| malformed("Time", text))?;
    let minute: u32 = parts[1].parse().map_err(|_| malformed("Time", text))?;
    let third = parts[2];

    fn locate_marker(fragment: &str) -> Option<usize> {
        fragment.find(|c: char| c == '+' || c == '-' || c == 'Z')
    }

    let mut nanos = 0u32;
    let mut offset = None;

    // The offset marker sits after the nanoseconds when they are present,
    // directly after the seconds otherwise.
    let sec_text = match third.split_once('.') {
        Some((sec, frac)) => {
            match locate_marker(frac) {
                Some(idx) => {
                    nanos = parse_nanos(&frac[..idx], text)?;
                    offset = Some(parse_offset(&frac[idx..], parts.get(3).copied(), text)?);
                }
                None => nanos = parse_nanos(frac, text)?,
            }
            sec
        }
        None => match locate_marker(third) {
            Some(idx) => {
                offset = Some(parse_offset(&third[idx..], parts.get(3).copied(), text)?);
                &third[..idx]
            }
            None => third,
        },
    };

    // Concatenated offset digits must never leak into the seconds value.
    let sec_text = sec_text.get(..2).unwrap_or(sec_text);
    let second: u32 = sec_text.parse().map_err(|_| malformed("Time", text))?;

    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
        .ok_or_else(|| malformed("Time", text))?;
    Ok((time, offset))
}

/// Parse a `date 'T' localTime` payload.
pub fn parse_local_date_time(text: &str) -> DriverResult<NaiveDateTime> {
    let (date_text, time_text) = text
        .split_once('T')
        .ok_or_else(|| malformed("LocalDateTime", text))?;
    Ok(NaiveDateTime::new(
        parse_date(date_text)?,
        parse_local_time(time_text)?,
    ))
}

/// Parse a `date 'T' time` payload.
///
/// The offset is `None` when the time portion carries none; the caller
/// then treats the value as a local date-time.
pub fn parse_offset_date_time(text: &str) -> DriverResult<(NaiveDateTime, Option<i32>)> {
    let (date_text, time_text) = text
        .split_once('T')
        .ok_or_else(|| malformed("OffsetDateTime", text))?;
    let date = parse_date(date_text)?;
    let (time, offset) = parse_time(time_text)?;
    Ok((NaiveDateTime::new(date, time), offset))
}

/// Parse an `offsetDateTime '[' zoneId ']'` payload.
pub fn parse_zoned_date_time(text: &str) -> DriverResult<(NaiveDateTime, Option<i32>, String)> {
    let (head, zone) = text
        .split_once('[')
        .ok_or_else(|| malformed("ZonedDateTime", text))?;
    let zone = zone
        .strip_suffix(']')
        .ok_or_else(|| malformed("ZonedDateTime", text))?;
    if zone.is_empty() {
        return Err(malformed("ZonedDateTime", text));
    }

    let (datetime, offset) = parse_offset_date_time(head)?;
    Ok((datetime, offset, zone.to_string()))
}

fn parse_offset(marker: &str, minutes_part: Option<&str>, original: &str) -> DriverResult<i32> {
    if marker.starts_with('Z') {
        return Ok(0);
    }
    let sign = if marker.starts_with('-') { -1 } else { 1 };
    let hours: i32 = marker[1..]
        .parse()
        .map_err(|_| malformed("Time", original))?;
    let minutes: i32 = match minutes_part {
        Some(m) => m.parse().map_err(|_| malformed("Time", original))?,
        None => 0,
    };
    Ok(sign * (hours * 3600 + minutes * 60))
}

/// Parse a nanosecond fragment, right-padding to 9 digits.
fn parse_nanos(fragment: &str, original: &str) -> DriverResult<u32> {
    if fragment.is_empty() || fragment.len() > 9 {
        return Err(malformed("Time", original));
    }
    format!("{:0<9}", fragment)
        .parse()
        .map_err(|_| malformed("Time", original))
}

// ============================================================================
// Durations
// ============================================================================

/// Parse an ISO-8601 `P<n>M<n>W<n>DT<n>H<n>M<n>.<n>S` duration.
pub fn parse_duration(text: &str) -> DriverResult<Duration> {
    let body = text
        .strip_prefix('P')
        .ok_or_else(|| malformed("Duration", text))?;

    let mut months = 0i64;
    let mut weeks = 0i64;
    let mut days = 0i64;
    let mut hours = 0i64;
    let mut minutes = 0i64;
    let mut seconds = 0i64;
    let mut nanoseconds = 0i32;
    let mut in_time = false;
    let mut acc = String::new();

    for ch in body.chars() {
        match ch {
            '0'..='9' | '.' | ',' => acc.push(ch),
            '-' if acc.is_empty() => acc.push(ch),
            'T' => {
                if !acc.is_empty() {
                    return Err(malformed("Duration", text));
                }
                in_time = true;
            }
            'M' => {
                if in_time {
                    minutes = take_int(&mut acc, text)?;
                } else {
                    months = take_int(&mut acc, text)?;
                }
            }
            'W' => {
                if in_time {
                    return Err(malformed("Duration", text));
                }
                weeks = take_int(&mut acc, text)?;
            }
            'D' => {
                if in_time {
                    return Err(malformed("Duration", text));
                }
                days = take_int(&mut acc, text)?;
            }
            'H' => {
                if !in_time {
                    return Err(malformed("Duration", text));
                }
                hours = take_int(&mut acc, text)?;
            }
            'S' => {
                if !in_time {
                    return Err(malformed("Duration", text));
                }
                let raw = std::mem::take(&mut acc);
                let (whole, frac) = match raw.split_once('.').or_else(|| raw.split_once(',')) {
                    Some((w, f)) => (w, Some(f)),
                    None => (raw.as_str(), None),
                };
                seconds = whole.parse().map_err(|_| malformed("Duration", text))?;
                if let Some(frac) = frac {
                    nanoseconds = parse_nanos(frac, text)? as i32;
                }
            }
            _ => return Err(malformed("Duration", text)),
        }
    }

    if !acc.is_empty() {
        return Err(malformed("Duration", text));
    }

    Ok(Duration::new(
        months,
        weeks * 7 + days,
        hours * 3600 + minutes * 60 + seconds,
        nanoseconds,
    ))
}

fn take_int(acc: &mut String, original: &str) -> DriverResult<i64> {
    std::mem::take(acc)
        .parse()
        .map_err(|_| malformed("Duration", original))
}

// ============================================================================
// Points
// ============================================================================

/// Parse a `SRID=<n>;POINT [Z ](<x> <y>[ <z>])` spatial point.
pub fn parse_point(text: &str) -> DriverResult<Point> {
    let parts: Vec<&str> = text.split(';').collect();
    if parts.len() != 2 {
        return Err(malformed("Point", text));
    }

    let srid: i32 = parts[0]
        .strip_prefix("SRID=")
        .ok_or_else(|| malformed("Point", text))?
        .parse()
        .map_err(|_| malformed("Point", text))?;

    let (coords_text, expect_z) = if let Some(rest) = parts[1].strip_prefix("POINT Z (") {
        (rest, true)
    } else if let Some(rest) = parts[1].strip_prefix("POINT (") {
        (rest, false)
    } else {
        return Err(malformed("Point", text));
    };
    let coords_text = coords_text
        .strip_suffix(')')
        .ok_or_else(|| malformed("Point", text))?;

    let coords = coords_text
        .split_whitespace()
        .map(|c| c.parse::<f64>().map_err(|_| malformed("Point", text)))
        .collect::<DriverResult<Vec<f64>>>()?;

    match (expect_z, coords.as_slice()) {
        (false, [x, y]) => Ok(Point::new_2d(srid, *x, *y)),
        (true, [x, y, z]) => Ok(Point::new_3d(srid, *x, *y, *z)),
        _ => Err(malformed("Point", text)),
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Format a date in its canonical wire form.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a time of day in its canonical wire form.
pub fn format_local_time(time: &NaiveTime) -> String {
    time.format("%H:%M:%S%.f").to_string()
}

/// Format a date-time in its canonical wire form.
pub fn format_local_date_time(datetime: &NaiveDateTime) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Format a point in its canonical wire form.
pub fn format_point(point: &Point) -> String {
    match point.z {
        Some(z) => format!(
            "SRID={};POINT Z ({} {} {})",
            point.srid, point.x, point.y, z
        ),
        None => format!("SRID={};POINT ({} {})", point.srid, point.x, point.y),
    }
}

/// Format a float payload; non-finite values use their spelled-out names.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{}", value)
    }
}

// ============================================================================
// Tests
// ============================================================================
