use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Price in whole TL.
    pub price: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub time: String,
    pub is_booked: bool,
}

/// One calendar day of the rolling availability window. Slot times are
/// unique within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityDay {
    /// Date key in `YYYY-MM-DD` form.
    pub date: String,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barber {
    pub id: String,
    pub name: String,
    pub location_label: String,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    /// Opening and closing times in `HH:MM` form. Closing before opening
    /// means the shop stays open past midnight.
    pub opening_time: String,
    pub closing_time: String,
    pub rating: f32,
    pub review_count: u32,
    pub description: String,
    pub services: Vec<Service>,
    pub availability: Vec<AvailabilityDay>,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub barber_id: String,
    pub service_id: String,
    pub date: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
    /// Handles of the scheduled reminder notifications. Empty when the
    /// reminder backend degraded or reminders are disabled.
    pub reminder_handles: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub all_notifications: bool,
    pub appointment_reminders: bool,
    pub system_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            all_notifications: true,
            appointment_reminders: true,
            system_notifications: true,
        }
    }
}

impl NotificationSettings {
    pub fn reminders_enabled(&self) -> bool {
        self.all_notifications && self.appointment_reminders
    }
}

/// An appointment joined with its barber and service, enriched with the
/// remaining-time strings shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentView {
    pub id: Uuid,
    pub barber_id: String,
    pub barber_name: String,
    pub service_name: String,
    pub price: u32,
    pub date: String,
    pub time: String,
    pub remaining: String,
    pub remaining_short: String,
    pub is_past: bool,
}
