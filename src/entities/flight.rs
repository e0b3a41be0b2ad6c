use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A flight as returned by the search endpoint. Immutable once received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSummary {
    pub id: i64,
    pub airline_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline_logo_url: Option<String>,
    pub flight_number: String,
    #[serde(rename = "fromCity")]
    pub origin_city: String,
    #[serde(rename = "toCity")]
    pub destination_city: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    #[serde(rename = "durationMin")]
    pub duration_minutes: u32,
    /// Per-passenger price.
    pub price: Decimal,
}

impl FlightSummary {
    /// Price shown on a result card: per-passenger price times passengers.
    pub fn price_for(&self, passengers: u8) -> Decimal {
        self.price * Decimal::from(passengers)
    }
}

/// One page of search results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub flights: Vec<FlightSummary>,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
}
