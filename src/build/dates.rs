//! Timestamps derived from the journal directory layout.
//!
//! A post's date lives in its path, `.../<year>/<month>/<day>/<HHMM>.<ext>`,
//! never in its metadata. File names only have to be unique within a day.

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};

/// Parse the timestamp encoded in a post path.
///
/// Returns `None` when the path does not follow the layout or when the
/// components do not form a valid calendar value.
pub fn path_date(path: &Path) -> Option<DateTime<Utc>> {
    path.extension()?;
    let stem = path.file_stem()?.to_str()?;
    if stem.len() != 4 || !is_digits(stem) {
        return None;
    }
    let (hour, minute) = stem.split_at(2);

    let mut dirs = path.parent()?.iter().rev().map(|s| s.to_str());
    let day = dirs.next()??;
    let month = dirs.next()??;
    let year = dirs.next()??;
    if ![year, month, day].iter().all(|s| is_digits(s)) {
        return None;
    }

    Utc.with_ymd_and_hms(
        year.parse().ok()?,
        month.parse().ok()?,
        day.parse().ok()?,
        hour.parse().ok()?,
        minute.parse().ok()?,
        0,
    )
    .single()
}

/// The timestamp for a post: the path-encoded date, or the current time.
pub fn resolve_timestamp(path: &Path) -> DateTime<Utc> {
    path_date(path).unwrap_or_else(|| {
        tracing::debug!(path = %path.display(), "no date in path, using current time");
        Utc::now()
    })
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
