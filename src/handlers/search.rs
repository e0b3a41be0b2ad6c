use chrono::{Days, NaiveDate, Utc};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::utils::format::city_name;
use crate::utils::query::{MAX_PASSENGERS, MIN_PASSENGERS, SearchCriteria, TravelClass, TripType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularDestination {
    pub code: &'static str,
    pub name: &'static str,
}

pub const POPULAR_DESTINATIONS: [PopularDestination; 6] = [
    PopularDestination { code: "DEL", name: "Delhi" },
    PopularDestination { code: "BOM", name: "Mumbai" },
    PopularDestination { code: "BLR", name: "Bangalore" },
    PopularDestination { code: "CCU", name: "Kolkata" },
    PopularDestination { code: "MAA", name: "Chennai" },
    PopularDestination { code: "HYD", name: "Hyderabad" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    From,
    To,
}

/// State behind the search form.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    /// Picker label, e.g. "Delhi (DEL)".
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
    pub passengers: u8,
    pub trip_type: TripType,
    pub travel_class: TravelClass,
    today: NaiveDate,
}

impl SearchForm {
    /// Defaults: Delhi to Mumbai, tomorrow, one traveller, one-way economy.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            from: "Delhi (DEL)".to_string(),
            to: "Mumbai (BOM)".to_string(),
            date: earliest_departure(today),
            passengers: 1,
            trip_type: TripType::OneWay,
            travel_class: TravelClass::Economy,
            today,
        }
    }

    pub fn min_date(&self) -> NaiveDate {
        earliest_departure(self.today)
    }

    /// Passenger stepper; changes that would leave 1..=9 are ignored.
    pub fn change_passengers(&mut self, delta: i8) {
        let next = i16::from(self.passengers) + i16::from(delta);
        if (i16::from(MIN_PASSENGERS)..=i16::from(MAX_PASSENGERS)).contains(&next) {
            self.passengers = next as u8;
        }
    }

    pub fn swap_destinations(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    pub fn quick_select(&mut self, code: &str, endpoint: Endpoint) -> AppResult<()> {
        let dest = POPULAR_DESTINATIONS
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| AppError::NotFound(format!("Unknown destination code {}", code)))?;
        let label = format!("{} ({})", dest.name, dest.code);
        match endpoint {
            Endpoint::From => self.from = label,
            Endpoint::To => self.to = label,
        }
        Ok(())
    }

    /// Validate the form and produce criteria for the results view.
    pub fn submit(&self) -> AppResult<SearchCriteria> {
        if self.date < self.min_date() {
            return Err(AppError::Validation(format!(
                "Departure date must be on or after {}",
                self.min_date()
            )));
        }

        let criteria = SearchCriteria {
            origin_city: city_name(&self.from).to_string(),
            destination_city: city_name(&self.to).to_string(),
            date: self.date,
            passengers: self.passengers,
            trip_type: self.trip_type,
            travel_class: self.travel_class,
        };
        criteria.validate()?;

        tracing::debug!(
            from = %criteria.origin_city,
            to = %criteria.destination_city,
            date = %criteria.date,
            passengers = criteria.passengers,
            "Search submitted"
        );
        Ok(criteria)
    }
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

fn earliest_departure(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}
