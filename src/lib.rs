pub mod client;
pub mod config;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod utils;

use chrono::Utc;

pub use client::ApiClient;
pub use config::Config;
pub use error::{AppError, AppResult};

use entities::booking::BookingRecord;
use entities::flight::FlightSummary;

/// The flight picked on the results page together with the passenger count
/// it was searched for.
#[derive(Clone, Debug, PartialEq)]
pub struct FlightSelection {
    pub flight: FlightSummary,
    pub passengers: u8,
}

/// Application context handed to every view. Created at startup, reset at
/// sign-out.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub client: ApiClient,
    pub selection: Option<FlightSelection>,
    pub bookings: Vec<BookingRecord>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let client = ApiClient::new(&config)?;
        Ok(Self {
            config,
            client,
            selection: None,
            bookings: Vec::new(),
        })
    }

    /// A session counts only while its token has not lapsed.
    pub fn is_signed_in(&self) -> bool {
        self.client
            .token()
            .is_some_and(|token| !utils::jwt::is_expired(token, Utc::now()))
    }

    pub fn sign_in(&mut self, token: impl Into<String>) -> AppResult<()> {
        let token = token.into();
        if utils::jwt::is_expired(&token, Utc::now()) {
            return Err(AppError::Unauthorized("Session token has expired".to_string()));
        }
        self.client.set_token(token);
        tracing::info!("Signed in");
        Ok(())
    }

    pub fn sign_out(&mut self) {
        self.client.clear_token();
        self.selection = None;
        self.bookings.clear();
        tracing::info!("Signed out");
    }

    pub fn select_flight(&mut self, flight: FlightSummary, passengers: u8) -> &FlightSelection {
        self.selection.insert(FlightSelection { flight, passengers })
    }
}
