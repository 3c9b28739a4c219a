use chrono::{Duration, NaiveDateTime};

const MINUTES_PER_DAY: i64 = 24 * 60;

fn remaining_minutes(target: NaiveDateTime, now: NaiveDateTime) -> Option<(i64, i64, i64)> {
    let diff = target - now;
    if diff <= Duration::zero() {
        return None;
    }
    let total_minutes = diff.num_minutes();
    let days = total_minutes / MINUTES_PER_DAY;
    let hours = (total_minutes % MINUTES_PER_DAY) / 60;
    let minutes = total_minutes % 60;
    Some((days, hours, minutes))
}

/// Remaining time until `target` in the long display form, e.g.
/// `"2 gün 3 saat"`, `"1 saat 30 dk"` or `"12 dakika"`. Elapsed targets
/// yield `"Geçti"`.
pub fn format_remaining(target: NaiveDateTime, now: NaiveDateTime) -> String {
    match remaining_minutes(target, now) {
        None => "Geçti".to_string(),
        Some((days, hours, _)) if days > 0 => format!("{days} gün {hours} saat"),
        Some((_, hours, minutes)) if hours > 0 => format!("{hours} saat {minutes} dk"),
        Some((_, _, minutes)) => format!("{minutes} dakika"),
    }
}

/// Compact badge form of [`format_remaining`], e.g. `"2g 3s"`.
pub fn format_remaining_short(target: NaiveDateTime, now: NaiveDateTime) -> String {
    match remaining_minutes(target, now) {
        None => "Geçti".to_string(),
        Some((days, hours, _)) if days > 0 => format!("{days}g {hours}s"),
        Some((_, hours, minutes)) if hours > 0 => format!("{hours}s {minutes}d"),
        Some((_, _, minutes)) => format!("{minutes} dk"),
    }
}
