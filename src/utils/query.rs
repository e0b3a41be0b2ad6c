use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::flight::FlightSummary;
use crate::error::{AppError, AppResult};

pub const MIN_PASSENGERS: u8 = 1;
pub const MAX_PASSENGERS: u8 = 9;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

/// Fare tier label. Cosmetic: it never changes the computed fare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelClass {
    #[default]
    Economy,
    Premium,
    Business,
    First,
}

/// Criteria fixed for a results session, produced by the search form.
#[derive(Clone, Debug, PartialEq, Validate)]
pub struct SearchCriteria {
    #[validate(length(min = 1, message = "Origin city is required"))]
    pub origin_city: String,
    #[validate(length(min = 1, message = "Destination city is required"))]
    pub destination_city: String,
    pub date: NaiveDate,
    #[validate(range(min = 1, max = 9, message = "Passengers must be between 1 and 9"))]
    pub passengers: u8,
    pub trip_type: TripType,
    pub travel_class: TravelClass,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Price,
    Departure,
    Duration,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Departure => "departure",
            SortKey::Duration => "duration",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// One of the six key/direction combinations, written `price-asc` etc.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortOption {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOption {
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.key.as_str(), self.direction.as_str())
    }
}

impl FromStr for SortOption {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let (key, direction) = s
            .split_once('-')
            .ok_or_else(|| AppError::Validation(format!("Unknown sort option: {}", s)))?;

        let key = match key {
            "price" => SortKey::Price,
            "departure" => SortKey::Departure,
            "duration" => SortKey::Duration,
            _ => return Err(AppError::Validation(format!("Unknown sort option: {}", s))),
        };
        let direction = match direction {
            "asc" => SortDirection::Ascending,
            "desc" => SortDirection::Descending,
            _ => return Err(AppError::Validation(format!("Unknown sort option: {}", s))),
        };

        Ok(Self { key, direction })
    }
}

/// Optional result predicates. An empty airline set means no airline
/// filtering, not "exclude everything".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchFilters {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub max_duration_minutes: Option<u32>,
    pub airlines: BTreeSet<String>,
}

impl SearchFilters {
    pub fn validate_bounds(&self) -> AppResult<()> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(AppError::Validation(format!(
                    "Minimum price {} exceeds maximum price {}",
                    min, max
                )));
            }
        }
        for bound in [self.min_price, self.max_price].into_iter().flatten() {
            if bound.is_sign_negative() {
                return Err(AppError::Validation(
                    "Price bounds cannot be negative".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Whether `flight` satisfies every active predicate.
    pub fn matches(&self, flight: &FlightSummary) -> bool {
        self.min_price.is_none_or(|min| flight.price >= min)
            && self.max_price.is_none_or(|max| flight.price <= max)
            && self
                .max_duration_minutes
                .is_none_or(|max| flight.duration_minutes <= max)
            && (self.airlines.is_empty() || self.airlines.contains(&flight.airline_name))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Everything the search endpoint needs for one request.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchQuery {
    pub origin_city: String,
    pub destination_city: String,
    pub date: NaiveDate,
    pub passengers: u8,
    pub page: u32,
    pub page_size: u32,
    pub sort: SortOption,
    pub filters: SearchFilters,
}

impl SearchQuery {
    /// Query-string pairs in the backend's parameter names. Absent
    /// filters are omitted entirely.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("from", self.origin_city.clone()),
            ("to", self.destination_city.clone()),
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("passengers", self.passengers.to_string()),
            ("page", self.page.to_string()),
            ("limit", self.page_size.to_string()),
            ("sortBy", self.sort.key.as_str().to_string()),
            ("sortOrder", self.sort.direction.as_str().to_string()),
        ];
        if let Some(min) = self.filters.min_price {
            pairs.push(("minPrice", min.normalize().to_string()));
        }
        if let Some(max) = self.filters.max_price {
            pairs.push(("maxPrice", max.normalize().to_string()));
        }
        if let Some(minutes) = self.filters.max_duration_minutes {
            pairs.push(("maxDuration", minutes.to_string()));
        }
        if !self.filters.airlines.is_empty() {
            let names: Vec<&str> = self.filters.airlines.iter().map(String::as_str).collect();
            pairs.push(("airlines", names.join(",")));
        }
        pairs
    }
}

/// Combine session criteria with live page, filter and sort state.
///
/// Range-checking `page` against the known page count is the caller's job;
/// this only rejects values that can never be valid.
pub fn build_query(
    criteria: &SearchCriteria,
    page: u32,
    page_size: u32,
    filters: &SearchFilters,
    sort: SortOption,
) -> AppResult<SearchQuery> {
    criteria.validate()?;
    filters.validate_bounds()?;

    if page == 0 {
        return Err(AppError::PageOutOfRange {
            requested: page,
            total_pages: 0,
        });
    }

    Ok(SearchQuery {
        origin_city: criteria.origin_city.clone(),
        destination_city: criteria.destination_city.clone(),
        date: criteria.date,
        passengers: criteria.passengers,
        page,
        page_size,
        sort,
        filters: filters.clone(),
    })
}
