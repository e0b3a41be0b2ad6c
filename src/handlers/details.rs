use validator::Validate;

use crate::entities::booking::{BookingRecord, BookingRequest};
use crate::entities::flight::FlightSummary;
use crate::error::{AppError, AppResult};
use crate::utils::fare::{compute_fare, FareBreakdown};
use crate::AppState;

/// Passenger contact details collected before booking.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct PassengerForm {
    #[validate(length(min = 1, message = "Passenger name is required"))]
    pub name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email address is invalid")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
    pub agree_terms: bool,
}

impl PassengerForm {
    pub fn new(name: &str, email: &str, phone: &str, agree_terms: bool) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            agree_terms,
        }
    }
}

/// Flight details page: the selected flight, its fare and the passenger
/// form.
#[derive(Debug)]
pub struct FlightDetailsView {
    pub flight: FlightSummary,
    pub passengers: u8,
    pub fare: FareBreakdown,
    pub form: PassengerForm,
    pub submitting: bool,
    pub error: Option<String>,
}

impl FlightDetailsView {
    pub fn open(state: &AppState) -> AppResult<Self> {
        let selection = state
            .selection
            .as_ref()
            .ok_or_else(|| AppError::NotFound("No flight selected".to_string()))?;

        Ok(Self {
            flight: selection.flight.clone(),
            passengers: selection.passengers,
            fare: compute_fare(selection.flight.price, selection.passengers)?,
            form: PassengerForm::default(),
            submitting: false,
            error: None,
        })
    }

    /// Validate the form and build the request. Nothing is sent if this fails.
    pub fn booking_request(&self) -> AppResult<BookingRequest> {
        if !self.form.agree_terms {
            tracing::debug!(flight_id = self.flight.id, "Terms not accepted");
            return Err(AppError::Validation(
                "You must agree to the Terms & Conditions".to_string(),
            ));
        }

        let form = PassengerForm::new(
            &self.form.name,
            &self.form.email,
            &self.form.phone,
            self.form.agree_terms,
        );
        if let Err(errors) = form.validate() {
            tracing::debug!(flight_id = self.flight.id, "Passenger form rejected");
            return Err(errors.into());
        }

        Ok(BookingRequest {
            flight_id: self.flight.id,
            passenger_count: self.passengers,
            passenger_name: form.name,
            passenger_email: form.email,
            passenger_phone: form.phone,
        })
    }

    /// Submit the booking once. The returned record carries the amount the
    /// backend actually charged.
    pub async fn submit(&mut self, state: &AppState) -> AppResult<BookingRecord> {
        let request = self.booking_request()?;

        self.submitting = true;
        self.error = None;
        let result = state.client.create_booking(&request).await;
        self.submitting = false;

        match result {
            Ok(booking) => {
                if booking.total_amount != self.fare.display_total() {
                    tracing::info!(
                        booking_id = booking.id,
                        quoted = %self.fare.display_total(),
                        charged = %booking.total_amount,
                        "Backend total differs from quoted fare"
                    );
                }
                Ok(booking)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
