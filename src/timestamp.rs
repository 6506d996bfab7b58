//! Parsing of Git's `--date=iso` timestamp format into naive wall-clock
//! pairs, grounded on `diffhouse.pipelines.utils.parse_git_timestamp`.
//!
//! Git emits `YYYY-MM-DD HH:MM:SS ±HHMM`. Parsing is done by fixed-offset
//! indexing rather than a general date parser, since the format is fixed
//! and known in advance.

use chrono::NaiveDateTime;
use chrono::TimeDelta;

/// Both wall-clock readings for a single Git timestamp, as naive
/// (zone-less) values: `utc` has the offset subtracted, `local` is the
/// value exactly as Git printed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub utc: NaiveDateTime,
    pub local: NaiveDateTime,
}

/// Parses one `--date=iso` timestamp, e.g. `2024-03-01 12:34:56 +0200`.
///
/// Returns `None` if the string does not match the fixed-width layout Git
/// always produces for this date mode.
pub fn parse_git_timestamp(raw: &str) -> Option<Timestamp> {
    // "YYYY-MM-DD HH:MM:SS +HHMM" is always exactly 25 bytes of ASCII.
    let raw = raw.trim();
    if raw.len() != 25 {
        return None;
    }
    let (datetime_part, offset_part) = raw.split_at(19);
    let local = NaiveDateTime::parse_from_str(datetime_part, "%Y-%m-%d %H:%M:%S").ok()?;

    let offset_part = offset_part.trim_start();
    if offset_part.len() != 5 {
        return None;
    }
    let sign = match offset_part.as_bytes()[0] {
        b'+' => 1i64,
        b'-' => -1i64,
        _ => return None,
    };
    let hours: i64 = offset_part[1..3].parse().ok()?;
    let minutes: i64 = offset_part[3..5].parse().ok()?;
    let offset_seconds = sign * (hours * 3600 + minutes * 60);

    let utc = local.checked_sub_signed(TimeDelta::seconds(offset_seconds))?;
    Some(Timestamp { utc, local })
}
