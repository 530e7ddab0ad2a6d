//! Utility functions
//!
//! Various helper functions used throughout the engine.

pub mod dtoa;

/// Milliseconds per day
const MS_PER_DAY: i64 = 86_400_000;

/// Largest absolute time value a Date can hold (±100,000,000 days)
pub const MAX_TIME_VALUE: f64 = 8.64e15;

/// Convert days since 1970-01-01 to a (year, month, day) civil date
///
/// Month and day are 1-based.
pub fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Format a time value as an ISO-8601 UTC string
///
/// Returns None for time values outside the representable Date range.
pub fn format_iso_date(time: f64) -> Option<String> {
    if !time.is_finite() || time.abs() > MAX_TIME_VALUE {
        return None;
    }

    let ms = time.trunc() as i64;
    let days = ms.div_euclid(MS_PER_DAY);
    let in_day = ms.rem_euclid(MS_PER_DAY);
    let (year, month, day) = civil_from_days(days);

    let hours = in_day / 3_600_000;
    let minutes = in_day / 60_000 % 60;
    let seconds = in_day / 1000 % 60;
    let millis = in_day % 1000;

    let year = if (0..=9999).contains(&year) {
        format!("{:04}", year)
    } else {
        format!("{}{:06}", if year < 0 { '-' } else { '+' }, year.abs())
    };

    Some(format!(
        "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year, month, day, hours, minutes, seconds, millis
    ))
}
