use crate::availability::parse_slot_datetime;
use chrono::{Duration, NaiveDateTime};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};
use tracing::warn;
use uuid::Uuid;

/// Minutes before the appointment at which reminders fire.
pub const REMINDER_LEAD_MINUTES: [i64; 2] = [60, 30];

/// Seam to the platform notification scheduler. Scheduling failures
/// (permission denied, scheduler unavailable) must degrade to an empty
/// handle list instead of an error; the booking continues without
/// reminders.
pub trait ReminderBackend: Clone + Send + Sync + 'static {
    fn schedule(
        &self,
        barber_name: &str,
        service_name: &str,
        date: &str,
        time: &str,
        now: NaiveDateTime,
    ) -> Vec<Uuid>;

    /// Cancels previously scheduled reminders. Unknown handles and empty
    /// lists are ignored.
    fn cancel(&self, handles: &[Uuid]);
}

#[derive(Debug, Clone)]
pub struct ScheduledReminder {
    pub fire_at: NaiveDateTime,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct LocalReminders {
    reminders: Arc<Mutex<HashMap<Uuid, ScheduledReminder>>>,
    permission_granted: Arc<AtomicBool>,
}

impl Default for LocalReminders {
    fn default() -> Self {
        Self {
            reminders: Arc::default(),
            permission_granted: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl LocalReminders {
    /// Simulates the user rejecting the notification permission prompt.
    pub fn deny_permission(&self) {
        self.permission_granted.store(false, Ordering::SeqCst);
    }

    pub fn scheduled(&self) -> Vec<(Uuid, ScheduledReminder)> {
        self.reminders
            .lock()
            .unwrap()
            .iter()
            .map(|(id, reminder)| (*id, reminder.clone()))
            .collect()
    }
}

impl ReminderBackend for LocalReminders {
    fn schedule(
        &self,
        barber_name: &str,
        service_name: &str,
        date: &str,
        time: &str,
        now: NaiveDateTime,
    ) -> Vec<Uuid> {
        if !self.permission_granted.load(Ordering::SeqCst) {
            warn!("Notification permission denied, continuing without reminders");
            return Vec::new();
        }

        let Some(slot_at) = parse_slot_datetime(date, time) else {
            warn!(%date, %time, "Unparseable appointment time, continuing without reminders");
            return Vec::new();
        };

        let mut reminders = self.reminders.lock().unwrap();
        let mut handles = Vec::new();

        for lead_minutes in REMINDER_LEAD_MINUTES {
            let fire_at = slot_at - Duration::minutes(lead_minutes);
            if fire_at <= now {
                continue;
            }

            let readable = if lead_minutes == 60 {
                "1 saat".to_string()
            } else {
                format!("{lead_minutes} dakika")
            };

            let handle = Uuid::new_v4();
            reminders.insert(
                handle,
                ScheduledReminder {
                    fire_at,
                    title: "Randevu Hatırlatması".to_string(),
                    body: format!("{barber_name} - {service_name} randevun {readable} sonra ({time})."),
                },
            );
            handles.push(handle);
        }

        handles
    }

    fn cancel(&self, handles: &[Uuid]) {
        if handles.is_empty() {
            return;
        }

        let mut reminders = self.reminders.lock().unwrap();
        for handle in handles {
            reminders.remove(handle);
        }
    }
}
