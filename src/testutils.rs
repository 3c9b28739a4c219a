use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::reminders::ReminderBackend;

pub struct CountingRemindersInner {
    pub permission_granted: AtomicBool,
    pub calls_to_schedule: AtomicU64,
    pub calls_to_cancel: AtomicU64,
    pub cancelled_handles: Mutex<Vec<Uuid>>,
}

/// Reminder backend double that records every interaction. Schedules two
/// handles per appointment unless permission is withdrawn.
#[derive(Clone)]
pub struct CountingReminders(pub Arc<CountingRemindersInner>);

impl CountingReminders {
    pub fn new() -> Self {
        Self(Arc::new(CountingRemindersInner {
            permission_granted: AtomicBool::new(true),
            calls_to_schedule: AtomicU64::default(),
            calls_to_cancel: AtomicU64::default(),
            cancelled_handles: Mutex::default(),
        }))
    }
}

impl ReminderBackend for CountingReminders {
    fn schedule(
        &self,
        _barber_name: &str,
        _service_name: &str,
        _date: &str,
        _time: &str,
        _now: NaiveDateTime,
    ) -> Vec<Uuid> {
        self.0.calls_to_schedule.fetch_add(1, Ordering::SeqCst);
        if !self.0.permission_granted.load(Ordering::SeqCst) {
            return Vec::new();
        }
        vec![Uuid::new_v4(), Uuid::new_v4()]
    }

    fn cancel(&self, handles: &[Uuid]) {
        self.0.calls_to_cancel.fetch_add(1, Ordering::SeqCst);
        self.0
            .cancelled_handles
            .lock()
            .unwrap()
            .extend_from_slice(handles);
    }
}
