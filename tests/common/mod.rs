//! In-process stand-in for the booking backend.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use skyfare_client::entities::booking::{BookingRecord, BookingRequest, BookingStatus};
use skyfare_client::entities::flight::FlightSummary;
use skyfare_client::utils::fare::compute_fare;
use skyfare_client::utils::query::SearchFilters;
use skyfare_client::{AppState, Config};

pub const TOKEN: &str = "test-session-token";

#[derive(Clone, Default)]
pub struct MockBackend {
    pub flights: Arc<Vec<FlightSummary>>,
    pub bookings: Arc<Mutex<Vec<BookingRecord>>>,
    pub search_calls: Arc<AtomicUsize>,
    pub booking_calls: Arc<AtomicUsize>,
    pub last_search: Arc<Mutex<HashMap<String, String>>>,
    /// Sort token (`price-desc` etc.) whose responses are delayed.
    pub slow_sort: Option<String>,
}

impl MockBackend {
    pub fn new(flights: Vec<FlightSummary>) -> Self {
        Self {
            flights: Arc::new(flights),
            ..Default::default()
        }
    }

    pub fn with_slow_sort(mut self, token: &str) -> Self {
        self.slow_sort = Some(token.to_string());
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn booking_calls(&self) -> usize {
        self.booking_calls.load(Ordering::SeqCst)
    }

    pub fn last_search(&self) -> HashMap<String, String> {
        self.last_search.lock().unwrap().clone()
    }

    /// Serve on an ephemeral port and return the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/flights/search", get(search))
            .route("/booking", post(create_booking).get(list_bookings))
            .route("/booking/{id}", get(get_booking))
            .route("/auth/register", post(register))
            .route("/auth/login", post(login))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

pub fn state_for(base_url: &str) -> AppState {
    let base_url = base_url.to_string();
    let config = Config::from_lookup(move |key| match key {
        "API_BASE_URL" => Some(base_url.clone()),
        "API_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .unwrap();
    AppState::new(config).unwrap()
}

pub fn flight(id: i64, airline: &str, price: Decimal, duration: u32, depart_hour: u32) -> FlightSummary {
    let departure = Utc.with_ymd_and_hms(2026, 10, 18, depart_hour, 0, 0).unwrap();
    FlightSummary {
        id,
        airline_name: airline.to_string(),
        airline_logo_url: None,
        flight_number: format!("FL-{}", id),
        origin_city: "Delhi".to_string(),
        destination_city: "Mumbai".to_string(),
        departure_time: departure,
        arrival_time: departure + chrono::Duration::minutes(i64::from(duration)),
        duration_minutes: duration,
        price,
    }
}

/// Twenty flights across three airlines with varied price and duration.
pub fn fleet() -> Vec<FlightSummary> {
    let airlines = ["IndiGo", "Vistara", "Air India"];
    (1..=20)
        .map(|i| {
            let airline = airlines[(i as usize) % airlines.len()];
            let price = dec!(3000) + Decimal::from(i * 250);
            let duration = 110 + ((i * 7) % 60) as u32;
            flight(i, airline, price, duration, (i % 18) as u32 + 4)
        })
        .collect()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

async fn search(State(mock): State<MockBackend>, Query(params): Query<HashMap<String, String>>) -> Response {
    mock.search_calls.fetch_add(1, Ordering::SeqCst);
    *mock.last_search.lock().unwrap() = params.clone();

    let sort_token = format!(
        "{}-{}",
        params.get("sortBy").map(String::as_str).unwrap_or("price"),
        params.get("sortOrder").map(String::as_str).unwrap_or("asc")
    );
    if mock.slow_sort.as_deref() == Some(sort_token.as_str()) {
        tokio::time::sleep(Duration::from_millis(300)).await;
    }

    let parse_dec = |key: &str| params.get(key).and_then(|v| v.parse::<Decimal>().ok());
    let filters = SearchFilters {
        min_price: parse_dec("minPrice"),
        max_price: parse_dec("maxPrice"),
        max_duration_minutes: params.get("maxDuration").and_then(|v| v.parse().ok()),
        airlines: params
            .get("airlines")
            .map(|v| v.split(',').filter(|s| !s.is_empty()).map(str::to_string).collect())
            .unwrap_or_else(BTreeSet::new),
    };

    let mut matching: Vec<FlightSummary> = mock
        .flights
        .iter()
        .filter(|f| filters.matches(f))
        .cloned()
        .collect();

    match params.get("sortBy").map(String::as_str) {
        Some("departure") => matching.sort_by_key(|f| f.departure_time),
        Some("duration") => matching.sort_by_key(|f| f.duration_minutes),
        _ => matching.sort_by(|a, b| a.price.cmp(&b.price)),
    }
    if params.get("sortOrder").map(String::as_str) == Some("desc") {
        matching.reverse();
    }

    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(8);
    let page: usize = params.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
    let total = matching.len();
    let total_pages = total.div_ceil(limit);
    let flights: Vec<FlightSummary> = matching.into_iter().skip((page - 1) * limit).take(limit).collect();

    Json(json!({
        "flights": flights,
        "page": page,
        "totalPages": total_pages,
        "total": total,
    }))
    .into_response()
}

async fn create_booking(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Json(request): Json<BookingRequest>,
) -> Response {
    mock.booking_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Please log in to book");
    }
    let Some(flight) = mock.flights.iter().find(|f| f.id == request.flight_id).cloned() else {
        return error(StatusCode::NOT_FOUND, "Flight not found");
    };

    let fare = match compute_fare(flight.price, request.passenger_count) {
        Ok(fare) => fare,
        Err(e) => return error(StatusCode::BAD_REQUEST, &e.user_message()),
    };
    let mut bookings = mock.bookings.lock().unwrap();
    let record = BookingRecord {
        id: 1000 + bookings.len() as i64,
        status: BookingStatus::Confirmed,
        flight,
        passenger_name: request.passenger_name,
        passenger_email: request.passenger_email,
        passenger_count: request.passenger_count,
        total_amount: fare.display_total(),
        created_at: Utc::now(),
    };
    bookings.push(record.clone());
    Json(record).into_response()
}

async fn list_bookings(State(mock): State<MockBackend>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Please log in");
    }
    let bookings = mock.bookings.lock().unwrap().clone();
    Json(bookings).into_response()
}

async fn get_booking(State(mock): State<MockBackend>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Please log in");
    }
    let bookings = mock.bookings.lock().unwrap();
    match bookings.iter().find(|b| b.id == id) {
        Some(b) => Json(b.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Booking not found"),
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return error(StatusCode::CONFLICT, "Email already registered");
    }
    (StatusCode::CREATED, Json(json!({ "message": "Registered" }))).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != "Secret#123" {
        return error(StatusCode::UNAUTHORIZED, "Invalid email or password");
    }
    Json(json!({
        "token": TOKEN,
        "user": { "id": 1, "name": "Meera", "email": body["email"] }
    }))
    .into_response()
}
