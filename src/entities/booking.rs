use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::flight::FlightSummary;

/// Booking status as reported by the backend. Anything other than
/// `CONFIRMED` is treated as pending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Confirmed,
    Pending(String),
}

impl BookingStatus {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, BookingStatus::Confirmed)
    }
}

impl From<String> for BookingStatus {
    fn from(raw: String) -> Self {
        if raw == "CONFIRMED" {
            BookingStatus::Confirmed
        } else {
            BookingStatus::Pending(raw)
        }
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Confirmed => "CONFIRMED".to_string(),
            BookingStatus::Pending(raw) => raw,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Confirmed => f.write_str("CONFIRMED"),
            BookingStatus::Pending(raw) => f.write_str(raw),
        }
    }
}

/// A booking created server-side. Read-only on the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: i64,
    pub status: BookingStatus,
    pub flight: FlightSummary,
    pub passenger_name: String,
    pub passenger_email: String,
    #[serde(rename = "passengers")]
    pub passenger_count: u8,
    /// Authoritative charged amount.
    pub total_amount: Decimal,
    #[serde(alias = "bookingDate")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub flight_id: i64,
    #[serde(rename = "passengers")]
    pub passenger_count: u8,
    pub passenger_name: String,
    pub passenger_email: String,
    pub passenger_phone: String,
}
