use crate::types::Barber;
use chrono::{Local, NaiveTime, Timelike};

fn to_minutes(value: &str) -> Option<u32> {
    let (hour, minute) = value.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    Some(hour * 60 + minute)
}

/// Same-day hours keep the shop open in `[opening, closing)`. When closing
/// lies before opening the window wraps past midnight. Unparseable hours
/// report closed.
pub fn is_open_at(opening: &str, closing: &str, now: NaiveTime) -> bool {
    let (Some(open), Some(close)) = (to_minutes(opening), to_minutes(closing)) else {
        return false;
    };
    let current = now.hour() * 60 + now.minute();

    if open <= close {
        current >= open && current < close
    } else {
        current >= open || current < close
    }
}

pub fn is_open_now(barber: &Barber) -> bool {
    is_open_at(&barber.opening_time, &barber.closing_time, Local::now().time())
}
