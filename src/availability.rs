use crate::types::{AvailabilityDay, Slot};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Fixed bookable times of day, identical for every barber.
pub const APPOINTMENT_TIMES: [&str; 6] = ["16:30", "17:00", "17:30", "18:00", "18:30", "19:00"];

/// Length of the rolling availability window in days.
pub const AVAILABILITY_DAYS: usize = 7;

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn parse_slot_datetime(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = parse_date_key(date)?;
    let time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    Some(date.and_time(time))
}

/// Builds the rolling window starting at `today`. `booked_by_day_offset`
/// maps a day offset to the times pre-booked on that day; offsets outside
/// the window are ignored.
pub fn generate_availability(
    today: NaiveDate,
    booked_by_day_offset: &[(usize, &[&str])],
) -> Vec<AvailabilityDay> {
    (0..AVAILABILITY_DAYS)
        .map(|offset| {
            let date = today + Duration::days(offset as i64);
            let booked: &[&str] = booked_by_day_offset
                .iter()
                .find(|(day, _)| *day == offset)
                .map(|(_, times)| *times)
                .unwrap_or(&[]);

            AvailabilityDay {
                date: date_key(date),
                slots: APPOINTMENT_TIMES
                    .iter()
                    .map(|time| Slot {
                        time: (*time).to_string(),
                        is_booked: booked.contains(time),
                    })
                    .collect(),
            }
        })
        .collect()
}

/// True when the slot's date and time lie strictly before `now`.
/// Unparseable values are treated as not past.
pub fn is_past_slot(date: &str, time: &str, now: NaiveDateTime) -> bool {
    match parse_slot_datetime(date, time) {
        Some(slot_at) => slot_at < now,
        None => false,
    }
}

/// Selection gate used when presenting slots: free and not in the past.
pub fn can_select(slot: &Slot, day: &AvailabilityDay, now: NaiveDateTime) -> bool {
    !slot.is_booked && !is_past_slot(&day.date, &slot.time, now)
}
