//! Plain-text sample format
//!
//! One sample per line: `<value>\t<timestamp>`. Values use Rust's shortest
//! round-trip float formatting; timestamps are written in UTC as ISO-8601
//! with seven fractional digits and an explicit `+00:00` offset, e.g.
//! `4\t2021-02-25T01:02:03.0230000+00:00`.
//!
//! On read, timestamps with any offset (or `Z`) are accepted and converted to
//! local time; timestamps without an offset are taken as local time. Blank
//! lines are skipped. The first malformed line aborts the whole parse.

use std::io::{self, Write};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::error::{Result, SignalError};
use crate::types::SignalValue;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Format a timestamp as UTC with 100ns resolution.
pub fn format_timestamp(timestamp: DateTime<Local>) -> String {
    let utc = timestamp.with_timezone(&Utc);
    let ticks = (utc.nanosecond() % 1_000_000_000) / 100;
    format!("{}.{:07}+00:00", utc.format("%Y-%m-%dT%H:%M:%S"), ticks)
}

/// Parse an ISO-8601 timestamp into local time.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Local>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Local));
    }

    NAIVE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(text, fmt)
            .ok()
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
    })
}

/// Format one sample as a line, without the trailing newline.
pub fn format_sample(sample: &SignalValue) -> String {
    format!("{}\t{}", sample.value(), format_timestamp(sample.timestamp()))
}

/// Parse one non-blank, trimmed line. `line_number` is 1-based and only used
/// for error messages.
///
/// Columns after the timestamp are ignored.
pub fn parse_line(line: &str, line_number: usize) -> Result<SignalValue> {
    let mut columns = line.split('\t');

    let value_text = columns.next().unwrap_or_default().trim();
    let value: f64 = value_text.parse().map_err(|_| {
        SignalError::format(line_number, format!("invalid value '{}'", value_text))
    })?;

    let timestamp_text = columns
        .next()
        .map(str::trim)
        .ok_or_else(|| SignalError::format(line_number, "missing timestamp column"))?;
    let timestamp = parse_timestamp(timestamp_text).ok_or_else(|| {
        SignalError::format(line_number, format!("invalid timestamp '{}'", timestamp_text))
    })?;

    Ok(SignalValue::new(value, timestamp))
}

/// Parse a whole file's contents.
pub fn parse_samples(text: &str) -> Result<Vec<SignalValue>> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(number, line)| parse_line(line, number))
        .collect()
}

/// Write samples one per line, in order.
pub fn write_samples<W: Write>(mut writer: W, samples: &[SignalValue]) -> io::Result<()> {
    for sample in samples {
        writeln!(writer, "{}", format_sample(sample))?;
    }
    writer.flush()
}
