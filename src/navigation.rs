use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Home,
    Appointments,
    Favorites,
    Map,
    Profile,
}

/// Position inside the home stack. Every transition goes through
/// [`Session`] so the reachable states stay explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Route {
    Home,
    Detail {
        barber_id: String,
    },
    Appointment {
        barber_id: String,
        service_id: String,
        preselected_date: Option<String>,
        preselected_time: Option<String>,
    },
    Confirm {
        barber_id: String,
        service_id: String,
        date: String,
        time: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub active_tab: Tab,
    pub route: Route,
    pub selected_appointment_id: Option<Uuid>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            active_tab: Tab::Home,
            route: Route::Home,
            selected_appointment_id: None,
        }
    }
}

impl Session {
    /// Switching tabs always resets the home stack and closes any open
    /// appointment detail.
    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.route = Route::Home;
        self.selected_appointment_id = None;
    }

    /// Jump used by the map and favorites surfaces: lands on the barber's
    /// detail view in the home tab.
    pub fn open_barber(&mut self, barber_id: &str) {
        self.active_tab = Tab::Home;
        self.route = Route::Detail {
            barber_id: barber_id.to_string(),
        };
    }

    pub fn open_appointment(&mut self, appointment_id: Uuid) {
        self.selected_appointment_id = Some(appointment_id);
    }

    pub fn close_appointment(&mut self) {
        self.selected_appointment_id = None;
    }

    /// Picking a service is only possible from the detail view.
    pub fn start_appointment(&mut self, service_id: &str) -> Result<(), String> {
        match &self.route {
            Route::Detail { barber_id } => {
                self.route = Route::Appointment {
                    barber_id: barber_id.clone(),
                    service_id: service_id.to_string(),
                    preselected_date: None,
                    preselected_time: None,
                };
                Ok(())
            }
            Route::Home | Route::Appointment { .. } | Route::Confirm { .. } => {
                Err("A service can only be picked from the barber detail view".into())
            }
        }
    }

    /// Moving to confirmation requires a chosen date and time on the
    /// selection view.
    pub fn continue_to_confirm(&mut self, date: &str, time: &str) -> Result<(), String> {
        match &self.route {
            Route::Appointment {
                barber_id,
                service_id,
                ..
            } => {
                self.route = Route::Confirm {
                    barber_id: barber_id.clone(),
                    service_id: service_id.clone(),
                    date: date.to_string(),
                    time: time.to_string(),
                };
                Ok(())
            }
            Route::Home | Route::Detail { .. } | Route::Confirm { .. } => {
                Err("Confirmation is only reachable from the slot selection view".into())
            }
        }
    }

    /// After a successful booking the app returns to the home view.
    pub fn booking_confirmed(&mut self) {
        self.active_tab = Tab::Home;
        self.route = Route::Home;
    }

    /// One step back in the home stack. Leaving the confirmation view
    /// keeps the chosen slot preselected.
    pub fn back(&mut self) {
        self.route = match &self.route {
            Route::Home | Route::Detail { .. } => Route::Home,
            Route::Appointment { barber_id, .. } => Route::Detail {
                barber_id: barber_id.clone(),
            },
            Route::Confirm {
                barber_id,
                service_id,
                date,
                time,
            } => Route::Appointment {
                barber_id: barber_id.clone(),
                service_id: service_id.clone(),
                preselected_date: Some(date.clone()),
                preselected_time: Some(time.clone()),
            },
        };
    }
}
