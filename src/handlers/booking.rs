use std::path::PathBuf;

use crate::client::ApiClient;
use crate::entities::booking::BookingRecord;
use crate::error::{AppError, AppResult};
use crate::utils::ticket::{BoardingPass, TicketWriter};
use crate::AppState;

// ============ Confirmation ============

/// Confirmation page for a freshly created booking. Totals are echoed from
/// the backend; nothing is recomputed here.
#[derive(Debug, Default)]
pub struct BookingConfirmationView {
    pub booking: Option<BookingRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

impl BookingConfirmationView {
    pub async fn load(&mut self, client: &ApiClient, booking_id: i64) -> AppResult<()> {
        self.loading = true;
        let result = client.get_booking(booking_id).await;
        self.loading = false;

        match result {
            Ok(booking) => {
                self.booking = Some(booking);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Export the boarding pass. A failure leaves the loaded booking intact.
    pub fn export_ticket(&self, writer: &dyn TicketWriter, currency_symbol: &str) -> AppResult<PathBuf> {
        let booking = self
            .booking
            .as_ref()
            .ok_or_else(|| AppError::Ticket("No booking loaded".to_string()))?;

        let pass = BoardingPass::from_booking(booking, currency_symbol);
        writer.write(&pass).map_err(|e| {
            tracing::error!(booking_id = booking.id, error = %e, "Error generating ticket");
            match e {
                AppError::Ticket(_) => e,
                other => AppError::Ticket(other.to_string()),
            }
        })
    }
}

// ============ History ============

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingStats {
    pub total: usize,
    pub confirmed: usize,
    pub pending: usize,
}

pub fn booking_stats(bookings: &[BookingRecord]) -> BookingStats {
    let confirmed = bookings.iter().filter(|b| b.status.is_confirmed()).count();
    BookingStats {
        total: bookings.len(),
        confirmed,
        pending: bookings.len() - confirmed,
    }
}

#[derive(Debug, Default)]
pub struct BookingHistoryView {
    pub loading: bool,
    pub error: Option<String>,
}

impl BookingHistoryView {
    /// Fetch the signed-in user's bookings into the application context.
    pub async fn load(&mut self, state: &mut AppState) -> AppResult<()> {
        self.loading = true;
        let result = state.client.list_bookings().await;
        self.loading = false;

        match result {
            Ok(bookings) => {
                tracing::debug!(count = bookings.len(), "Loaded booking history");
                state.bookings = bookings;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
