use crate::opening_hours::is_open_now;
use crate::reminders::ReminderBackend;
use crate::routing::RouteProvider;
use crate::store::BarberStore;
use crate::types::{Appointment, AppointmentView, Barber, Coordinates, NotificationSettings};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{
    routing::{get, post},
    Json, Router,
};
use axum_valid::Valid;
use chrono::Local;
use futures::{Stream, StreamExt};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref DATE_KEY_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref TIME_RE: Regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
}

pub struct AppState<R: ReminderBackend, P: RouteProvider> {
    store: BarberStore<R>,
    routes: Arc<P>,
    origin: Coordinates,
}

impl<R: ReminderBackend, P: RouteProvider> Clone for AppState<R, P> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            routes: Arc::clone(&self.routes),
            origin: self.origin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarberSummary {
    pub id: String,
    pub name: String,
    pub location_label: String,
    pub distance_km: f64,
    pub rating: f32,
    pub review_count: u32,
    pub open_now: bool,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
struct BookingRequest {
    #[validate(length(min = 1))]
    barber_id: String,
    #[validate(length(min = 1))]
    service_id: String,
    #[validate(regex(path = *DATE_KEY_RE))]
    date: String,
    #[validate(regex(path = *TIME_RE))]
    time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FavoriteResponse {
    barber_id: String,
    is_favorite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RouteResponse {
    coordinates: Vec<Coordinates>,
    error: Option<String>,
}

pub fn create_app<R: ReminderBackend, P: RouteProvider>(
    store: BarberStore<R>,
    routes: P,
    origin: Coordinates,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        store,
        routes: Arc::new(routes),
        origin,
    };

    Router::new()
        .route("/barbers", get(list_barbers))
        .route("/barbers/:id", get(barber_detail))
        .route("/barbers/:id/favorite", post(toggle_favorite))
        .route("/barbers/:id/route", get(barber_route))
        .route("/appointments", get(list_appointments).post(book_appointment))
        .route("/appointments/stream", get(appointment_stream))
        .route("/appointments/:id/cancel", post(cancel_appointment))
        .route(
            "/settings/notifications",
            get(notification_settings).put(update_notification_settings),
        )
        .with_state(state)
        .layer(cors)
}

async fn list_barbers<R: ReminderBackend, P: RouteProvider>(
    State(state): State<AppState<R, P>>,
) -> Json<Vec<BarberSummary>> {
    let favorites = state.store.favorite_ids();
    let summaries = state
        .store
        .barbers()
        .into_iter()
        .map(|barber| BarberSummary {
            open_now: is_open_now(&barber),
            is_favorite: favorites.contains(&barber.id),
            id: barber.id,
            name: barber.name,
            location_label: barber.location_label,
            distance_km: barber.distance_km,
            rating: barber.rating,
            review_count: barber.review_count,
        })
        .collect();
    Json(summaries)
}

async fn barber_detail<R: ReminderBackend, P: RouteProvider>(
    State(state): State<AppState<R, P>>,
    Path(barber_id): Path<String>,
) -> Result<Json<Barber>, (StatusCode, String)> {
    state
        .store
        .barber(&barber_id)
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Barber does not exist".to_string()))
}

async fn toggle_favorite<R: ReminderBackend, P: RouteProvider>(
    State(state): State<AppState<R, P>>,
    Path(barber_id): Path<String>,
) -> Result<Json<FavoriteResponse>, (StatusCode, String)> {
    match state.store.toggle_favorite(&barber_id) {
        Ok(is_favorite) => Ok(Json(FavoriteResponse { barber_id, is_favorite })),
        Err(err) => Err((StatusCode::NOT_FOUND, err)),
    }
}

/// Route lookup failures are reported inline instead of failing the
/// request: the caller shows the message next to an empty map.
async fn barber_route<R: ReminderBackend, P: RouteProvider>(
    State(state): State<AppState<R, P>>,
    Path(barber_id): Path<String>,
) -> Result<Json<RouteResponse>, (StatusCode, String)> {
    let barber = state
        .store
        .barber(&barber_id)
        .ok_or((StatusCode::NOT_FOUND, "Barber does not exist".to_string()))?;

    match state
        .routes
        .driving_route(state.origin, barber.coordinates)
        .await
    {
        Ok(coordinates) => Ok(Json(RouteResponse { coordinates, error: None })),
        Err(message) => Ok(Json(RouteResponse {
            coordinates: Vec::new(),
            error: Some(message),
        })),
    }
}

async fn list_appointments<R: ReminderBackend, P: RouteProvider>(
    State(state): State<AppState<R, P>>,
) -> Json<Vec<AppointmentView>> {
    Json(state.store.appointment_views(Local::now().naive_local()))
}

async fn book_appointment<R: ReminderBackend, P: RouteProvider>(
    State(state): State<AppState<R, P>>,
    Valid(Json(request)): Valid<Json<BookingRequest>>,
) -> Result<(StatusCode, Json<Appointment>), (StatusCode, String)> {
    match state.store.book_appointment(
        &request.barber_id,
        &request.service_id,
        &request.date,
        &request.time,
        Local::now().naive_local(),
    ) {
        Ok(appointment) => Ok((StatusCode::CREATED, Json(appointment))),
        Err(err) => Err((StatusCode::CONFLICT, err)),
    }
}

async fn cancel_appointment<R: ReminderBackend, P: RouteProvider>(
    State(state): State<AppState<R, P>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    match state.store.cancel_appointment(appointment_id) {
        Ok(()) => Ok((StatusCode::OK, "Appointment cancelled".to_string())),
        Err(err) => Err((StatusCode::NOT_FOUND, err)),
    }
}

async fn appointment_stream<R: ReminderBackend, P: RouteProvider>(
    State(state): State<AppState<R, P>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = state.store.appointment_stream().map(|views| {
        let event = Event::default()
            .event("appointments")
            .json_data(&views)
            .unwrap_or_else(|_| Event::default());
        Ok::<Event, Infallible>(event)
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn notification_settings<R: ReminderBackend, P: RouteProvider>(
    State(state): State<AppState<R, P>>,
) -> Json<NotificationSettings> {
    Json(state.store.notification_settings())
}

async fn update_notification_settings<R: ReminderBackend, P: RouteProvider>(
    State(state): State<AppState<R, P>>,
    Json(settings): Json<NotificationSettings>,
) -> Json<NotificationSettings> {
    Json(state.store.set_notification_settings(settings))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::routing::MockRouteProvider;
    use crate::testutils::CountingReminders;
    use reqwest::Client;
    use std::sync::atomic::Ordering;

    const TEST_ORIGIN: Coordinates = Coordinates {
        latitude: 41.0082,
        longitude: 28.9784,
    };

    fn seeded_store() -> (BarberStore<CountingReminders>, CountingReminders) {
        let reminders = CountingReminders::new();
        let store = BarberStore::new(reminders.clone());
        store.insert_example_barbers();
        (store, reminders)
    }

    async fn spawn_app<R: ReminderBackend, P: RouteProvider>(
        store: BarberStore<R>,
        routes: P,
    ) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let app = create_app(store, routes, TEST_ORIGIN);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{address}")
    }

    fn free_slot(barber: &Barber) -> (String, String) {
        // last window day, always in the future
        let day = barber.availability.last().unwrap();
        let slot = day.slots.iter().find(|slot| !slot.is_booked).unwrap();
        (day.date.clone(), slot.time.clone())
    }

    #[tokio::test]
    async fn listing_reports_all_barbers_with_favorites() {
        let (store, _) = seeded_store();
        store.toggle_favorite("2").unwrap();
        let base = spawn_app(store, MockRouteProvider::new()).await;

        let response = Client::new()
            .get(format!("{base}/barbers"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK.as_u16());

        let summaries: Vec<BarberSummary> = response.json().await.unwrap();
        assert_eq!(summaries.len(), 3);
        let usta = summaries.iter().find(|s| s.id == "2").unwrap();
        assert!(usta.is_favorite);
        assert_eq!(usta.name, "Usta Makas");
        assert!(!summaries.iter().find(|s| s.id == "1").unwrap().is_favorite);
    }

    #[tokio::test]
    async fn unknown_barber_is_not_found() {
        let (store, _) = seeded_store();
        let base = spawn_app(store, MockRouteProvider::new()).await;

        let response = Client::new()
            .get(format!("{base}/barbers/missing"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND.as_u16());
    }

    #[tokio::test]
    async fn booking_flow_books_conflicts_and_cancels() {
        let (store, _) = seeded_store();
        let base = spawn_app(store, MockRouteProvider::new()).await;
        let client = Client::new();

        let barber: Barber = client
            .get(format!("{base}/barbers/1"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let (date, time) = free_slot(&barber);

        let request = BookingRequest {
            barber_id: "1".to_string(),
            service_id: "s1".to_string(),
            date: date.clone(),
            time: time.clone(),
        };

        let response = client
            .post(format!("{base}/appointments"))
            .json(&request)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED.as_u16());
        let appointment: Appointment = response.json().await.unwrap();
        assert_eq!(appointment.date, date);

        // the same slot cannot be booked twice
        let response = client
            .post(format!("{base}/appointments"))
            .json(&request)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT.as_u16());

        let views: Vec<AppointmentView> = client
            .get(format!("{base}/appointments"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].barber_name, "Klasik Kesim Berber");
        assert!(!views[0].is_past);

        let response = client
            .post(format!("{base}/appointments/{}/cancel", appointment.id))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK.as_u16());

        let barber: Barber = client
            .get(format!("{base}/barbers/1"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let day = barber.availability.iter().find(|d| d.date == date).unwrap();
        assert!(!day.slots.iter().find(|s| s.time == time).unwrap().is_booked);

        // cancelling again is a miss
        let response = client
            .post(format!("{base}/appointments/{}/cancel", appointment.id))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND.as_u16());
    }

    #[test_case::test_case ("", "s1", "2026-08-30", "17:00" ; "empty barber id")]
    #[test_case::test_case ("1", "s1", "30-08-2026", "17:00" ; "wrong date order")]
    #[test_case::test_case ("1", "s1", "2026-08-30", "25:70" ; "impossible time")]
    #[test_case::test_case ("1", "s1", "2026-08-30", "5pm" ; "non numeric time")]
    #[tokio::test]
    async fn malformed_booking_requests_are_rejected(
        barber_id: &str,
        service_id: &str,
        date: &str,
        time: &str,
    ) {
        let (store, _) = seeded_store();
        let base = spawn_app(store, MockRouteProvider::new()).await;

        let request = BookingRequest {
            barber_id: barber_id.to_string(),
            service_id: service_id.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        };
        let response = Client::new()
            .post(format!("{base}/appointments"))
            .json(&request)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST.as_u16());
    }

    #[tokio::test]
    async fn route_endpoint_returns_the_polyline() {
        let (store, _) = seeded_store();
        let mut routes = MockRouteProvider::new();
        routes.expect_driving_route().returning(|origin, destination| {
            Ok(vec![origin, destination])
        });
        let base = spawn_app(store, routes).await;

        let response = Client::new()
            .get(format!("{base}/barbers/1/route"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK.as_u16());

        let route: RouteResponse = response.json().await.unwrap();
        assert!(route.error.is_none());
        assert_eq!(route.coordinates[0], TEST_ORIGIN);
        // destination is the barber's location
        assert_eq!(route.coordinates[1].latitude, 40.9908);
    }

    #[tokio::test]
    async fn route_failures_degrade_to_an_inline_message() {
        let (store, _) = seeded_store();
        let mut routes = MockRouteProvider::new();
        routes
            .expect_driving_route()
            .returning(|_, _| Err("Rota bulunamadı".to_string()));
        let base = spawn_app(store, routes).await;

        let response = Client::new()
            .get(format!("{base}/barbers/1/route"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK.as_u16());

        let route: RouteResponse = response.json().await.unwrap();
        assert!(route.coordinates.is_empty());
        assert_eq!(route.error.as_deref(), Some("Rota bulunamadı"));
    }

    #[tokio::test]
    async fn disabling_notifications_cancels_reminders_over_http() {
        let (store, reminders) = seeded_store();
        let barber = store.barber("1").unwrap();
        let (date, time) = free_slot(&barber);
        let base = spawn_app(store, MockRouteProvider::new()).await;
        let client = Client::new();

        let request = BookingRequest {
            barber_id: "1".to_string(),
            service_id: "s2".to_string(),
            date,
            time,
        };
        client
            .post(format!("{base}/appointments"))
            .json(&request)
            .send()
            .await
            .unwrap();
        assert_eq!(reminders.0.calls_to_schedule.load(Ordering::SeqCst), 1);

        let settings = NotificationSettings {
            all_notifications: false,
            ..NotificationSettings::default()
        };
        let response = client
            .put(format!("{base}/settings/notifications"))
            .json(&settings)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK.as_u16());

        let stored: NotificationSettings = client
            .get(format!("{base}/settings/notifications"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(!stored.all_notifications);
        assert_eq!(reminders.0.calls_to_cancel.load(Ordering::SeqCst), 1);
        assert_eq!(reminders.0.cancelled_handles.lock().unwrap().len(), 2);
    }
}
