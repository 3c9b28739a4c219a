use crate::availability::{is_past_slot, parse_slot_datetime};
use crate::countdown::{format_remaining, format_remaining_short};
use crate::reminders::ReminderBackend;
use crate::seed::example_barbers;
use crate::types::{Appointment, AppointmentView, Barber, NotificationSettings};
use chrono::{Local, NaiveDateTime, Utc};
use std::sync::{Arc, Mutex};
use tokio::sync::watch::{self, Receiver, Sender};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Default)]
struct StoreInner {
    barbers: Vec<Barber>,
    appointments: Vec<Appointment>,
    favorite_barber_ids: Vec<String>,
    settings: NotificationSettings,
}

/// Root application state: barbers with their availability windows, booked
/// appointments, favorites and notification settings. All mutation goes
/// through this store; reads hand out snapshots.
#[derive(Debug, Clone)]
pub struct BarberStore<R: ReminderBackend> {
    inner: Arc<Mutex<StoreInner>>,
    reminders: R,
    sender: Arc<Sender<Vec<AppointmentView>>>,
    // kept alive so publishing never observes a closed channel
    receiver: Receiver<Vec<AppointmentView>>,
}

impl<R: ReminderBackend> BarberStore<R> {
    pub fn new(reminders: R) -> Self {
        let (sender, receiver) = watch::channel(Vec::new());
        Self {
            inner: Arc::default(),
            reminders,
            sender: Arc::new(sender),
            receiver,
        }
    }

    pub fn insert_example_barbers(&self) {
        let today = Local::now().date_naive();
        let mut inner = self.inner.lock().unwrap();
        inner.barbers = example_barbers(today);
    }

    pub fn barbers(&self) -> Vec<Barber> {
        self.inner.lock().unwrap().barbers.clone()
    }

    pub fn barber(&self, barber_id: &str) -> Option<Barber> {
        self.inner
            .lock()
            .unwrap()
            .barbers
            .iter()
            .find(|barber| barber.id == barber_id)
            .cloned()
    }

    pub fn favorite_ids(&self) -> Vec<String> {
        self.inner.lock().unwrap().favorite_barber_ids.clone()
    }

    /// Favorite barbers in toggle order; ids that no longer resolve are
    /// silently skipped.
    pub fn favorites(&self) -> Vec<Barber> {
        let inner = self.inner.lock().unwrap();
        inner
            .favorite_barber_ids
            .iter()
            .filter_map(|id| inner.barbers.iter().find(|barber| &barber.id == id))
            .cloned()
            .collect()
    }

    /// Returns the new favorite state of the barber.
    pub fn toggle_favorite(&self, barber_id: &str) -> Result<bool, String> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.barbers.iter().any(|barber| barber.id == barber_id) {
            return Err("Barber does not exist".into());
        }

        match inner.favorite_barber_ids.iter().position(|id| id == barber_id) {
            Some(index) => {
                inner.favorite_barber_ids.remove(index);
                Ok(false)
            }
            None => {
                inner.favorite_barber_ids.push(barber_id.to_string());
                Ok(true)
            }
        }
    }

    pub fn notification_settings(&self) -> NotificationSettings {
        self.inner.lock().unwrap().settings
    }

    /// Applies the new settings. Turning reminders off cancels every
    /// scheduled reminder and clears the stored handles.
    pub fn set_notification_settings(&self, settings: NotificationSettings) -> NotificationSettings {
        let cleared: Vec<Vec<Uuid>> = {
            let mut inner = self.inner.lock().unwrap();
            inner.settings = settings;

            if settings.reminders_enabled() {
                Vec::new()
            } else {
                inner
                    .appointments
                    .iter_mut()
                    .filter(|appointment| !appointment.reminder_handles.is_empty())
                    .map(|appointment| std::mem::take(&mut appointment.reminder_handles))
                    .collect()
            }
        };

        for handles in &cleared {
            self.reminders.cancel(handles);
        }
        if !cleared.is_empty() {
            info!(appointments = cleared.len(), "Reminders disabled, cancelled scheduled reminders");
        }
        settings
    }

    /// Books the slot and creates the appointment. The slot must exist, be
    /// free and lie in the future; reminder scheduling failures degrade to
    /// an appointment without reminders.
    pub fn book_appointment(
        &self,
        barber_id: &str,
        service_id: &str,
        date: &str,
        time: &str,
        now: NaiveDateTime,
    ) -> Result<Appointment, String> {
        let (barber_name, service_name, reminders_enabled) = {
            let mut inner = self.inner.lock().unwrap();
            let reminders_enabled = inner.settings.reminders_enabled();

            let barber = inner
                .barbers
                .iter_mut()
                .find(|barber| barber.id == barber_id)
                .ok_or_else(|| String::from("Barber does not exist"))?;
            let service_name = barber
                .services
                .iter()
                .find(|service| service.id == service_id)
                .map(|service| service.name.clone())
                .ok_or_else(|| String::from("Service does not exist"))?;
            let day = barber
                .availability
                .iter_mut()
                .find(|day| day.date == date)
                .ok_or_else(|| String::from("No availability on the requested date"))?;
            let slot = day
                .slots
                .iter_mut()
                .find(|slot| slot.time == time)
                .ok_or_else(|| String::from("No slot at the requested time"))?;

            if slot.is_booked {
                return Err("Slot was already booked".into());
            }
            if is_past_slot(date, time, now) {
                return Err("Slot is in the past".into());
            }

            slot.is_booked = true;
            (barber.name.clone(), service_name, reminders_enabled)
        };

        let reminder_handles = if reminders_enabled {
            self.reminders
                .schedule(&barber_name, &service_name, date, time, now)
        } else {
            Vec::new()
        };

        let appointment = Appointment {
            id: Uuid::new_v4(),
            barber_id: barber_id.to_string(),
            service_id: service_id.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            created_at: Utc::now(),
            reminder_handles,
        };

        self.inner
            .lock()
            .unwrap()
            .appointments
            .insert(0, appointment.clone());
        info!(barber = %barber_name, %date, %time, "Appointment booked");

        self.send_appointments();
        Ok(appointment)
    }

    /// Cancels the reminders, releases the slot and removes the
    /// appointment. Releasing is best effort: a slot that no longer exists
    /// is skipped without error.
    pub fn cancel_appointment(&self, appointment_id: Uuid) -> Result<(), String> {
        let appointment = {
            let mut inner = self.inner.lock().unwrap();
            let index = inner
                .appointments
                .iter()
                .position(|appointment| appointment.id == appointment_id)
                .ok_or_else(|| String::from("Appointment does not exist"))?;
            inner.appointments.remove(index)
        };

        self.reminders.cancel(&appointment.reminder_handles);

        {
            let mut inner = self.inner.lock().unwrap();
            if !release_slot(&mut inner.barbers, &appointment) {
                debug!(barber = %appointment.barber_id, date = %appointment.date, "Cancelled appointment had no matching slot");
            }
        }
        info!(barber = %appointment.barber_id, date = %appointment.date, time = %appointment.time, "Appointment cancelled");

        self.send_appointments();
        Ok(())
    }

    /// Appointments joined with barber and service, sorted by slot time.
    /// Entries whose barber or service no longer resolves are silently
    /// filtered out.
    pub fn appointment_views(&self, now: NaiveDateTime) -> Vec<AppointmentView> {
        let inner = self.inner.lock().unwrap();
        let mut views: Vec<(NaiveDateTime, AppointmentView)> = inner
            .appointments
            .iter()
            .filter_map(|appointment| {
                let barber = inner
                    .barbers
                    .iter()
                    .find(|barber| barber.id == appointment.barber_id)?;
                let service = barber
                    .services
                    .iter()
                    .find(|service| service.id == appointment.service_id)?;
                let slot_at = parse_slot_datetime(&appointment.date, &appointment.time)?;

                Some((
                    slot_at,
                    AppointmentView {
                        id: appointment.id,
                        barber_id: barber.id.clone(),
                        barber_name: barber.name.clone(),
                        service_name: service.name.clone(),
                        price: service.price,
                        date: appointment.date.clone(),
                        time: appointment.time.clone(),
                        remaining: format_remaining(slot_at, now),
                        remaining_short: format_remaining_short(slot_at, now),
                        is_past: slot_at <= now,
                    },
                ))
            })
            .collect();

        views.sort_by_key(|(slot_at, _)| *slot_at);
        views.into_iter().map(|(_, view)| view).collect()
    }

    /// Re-publishes the appointment views so stream consumers see the
    /// countdowns decrease.
    pub fn publish(&self, now: NaiveDateTime) {
        let views = self.appointment_views(now);
        let _ = self.sender.send(views);
    }

    pub fn appointment_stream(&self) -> WatchStream<Vec<AppointmentView>> {
        WatchStream::new(self.receiver.clone())
    }

    fn send_appointments(&self) {
        self.publish(Local::now().naive_local());
    }
}

fn release_slot(barbers: &mut [Barber], appointment: &Appointment) -> bool {
    let Some(barber) = barbers
        .iter_mut()
        .find(|barber| barber.id == appointment.barber_id)
    else {
        return false;
    };
    let Some(day) = barber
        .availability
        .iter_mut()
        .find(|day| day.date == appointment.date)
    else {
        return false;
    };
    let Some(slot) = day
        .slots
        .iter_mut()
        .find(|slot| slot.time == appointment.time)
    else {
        return false;
    };

    slot.is_booked = false;
    true
}
