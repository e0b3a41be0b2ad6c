use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::entities::booking::BookingRecord;
use crate::error::{AppError, AppResult};
use crate::utils::format::{airport_code, format_duration, format_money};

/// Boarding pass content derived from a confirmed booking.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardingPass {
    pub booking_id: i64,
    pub status: String,
    pub passenger_name: String,
    pub passenger_email: String,
    pub passengers: u8,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub total_paid: String,
    pub booked_on: String,
}

impl BoardingPass {
    pub fn from_booking(booking: &BookingRecord, currency_symbol: &str) -> Self {
        let flight = &booking.flight;
        Self {
            booking_id: booking.id,
            status: booking.status.to_string(),
            passenger_name: booking.passenger_name.clone(),
            passenger_email: booking.passenger_email.clone(),
            passengers: booking.passenger_count,
            airline: flight.airline_name.clone(),
            flight_number: flight.flight_number.clone(),
            origin: format!("{} ({})", flight.origin_city, airport_code(&flight.origin_city)),
            destination: format!(
                "{} ({})",
                flight.destination_city,
                airport_code(&flight.destination_city)
            ),
            departure: flight.departure_time.format("%a, %b %-d %Y %H:%M UTC").to_string(),
            arrival: flight.arrival_time.format("%a, %b %-d %Y %H:%M UTC").to_string(),
            duration: format_duration(flight.duration_minutes),
            total_paid: format_money(booking.total_amount, currency_symbol),
            booked_on: booking.created_at.format("%d %b %Y %H:%M UTC").to_string(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("Boarding-Pass-{}.txt", self.booking_id)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let rows = [
            ("Booking ID", self.booking_id.to_string()),
            ("Status", self.status.clone()),
            ("Passenger", self.passenger_name.clone()),
            ("Email", self.passenger_email.clone()),
            ("Travellers", self.passengers.to_string()),
            ("Airline", self.airline.clone()),
            ("Flight", self.flight_number.clone()),
            ("From", self.origin.clone()),
            ("To", self.destination.clone()),
            ("Departs", self.departure.clone()),
            ("Arrives", self.arrival.clone()),
            ("Duration", self.duration.clone()),
            ("Total paid", self.total_paid.clone()),
            ("Booked on", self.booked_on.clone()),
        ];

        // Writing into a String cannot fail.
        let _ = writeln!(out, "BOARDING PASS");
        let _ = writeln!(out, "{}", "=".repeat(40));
        for (label, value) in rows {
            let _ = writeln!(out, "{:<12} {}", label, value);
        }
        out
    }
}

/// Destination for exported tickets. A PDF backend can implement this in
/// place of the plain-text writer.
pub trait TicketWriter {
    fn write(&self, pass: &BoardingPass) -> AppResult<PathBuf>;
}

pub struct FileTicketWriter {
    dir: PathBuf,
}

impl FileTicketWriter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl TicketWriter for FileTicketWriter {
    fn write(&self, pass: &BoardingPass) -> AppResult<PathBuf> {
        if !self.dir.is_dir() {
            return Err(AppError::Ticket(format!(
                "Ticket directory {} does not exist",
                self.dir.display()
            )));
        }
        let path = self.dir.join(pass.file_name());
        fs::write(&path, pass.render())?;
        tracing::info!(booking_id = pass.booking_id, path = %path.display(), "Ticket exported");
        Ok(path)
    }
}
