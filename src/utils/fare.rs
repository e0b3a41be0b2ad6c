use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// GST applied to the base fare.
pub const TAX_RATE: Decimal = dec!(0.18);

/// Flat per-booking charge, not scaled by passenger count.
pub const CONVENIENCE_FEE: Decimal = dec!(99);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FareBreakdown {
    pub base_price: Decimal,
    pub passenger_count: u8,
    pub base_fare: Decimal,
    pub tax_rate: Decimal,
    /// Unrounded; use `display_tax` for the rendered line.
    pub tax: Decimal,
    pub convenience_fee: Decimal,
    /// Computed from the unrounded tax.
    pub total: Decimal,
}

impl FareBreakdown {
    pub fn display_tax(&self) -> Decimal {
        round_for_display(self.tax)
    }

    pub fn display_total(&self) -> Decimal {
        round_for_display(self.total)
    }
}

/// Compute the fare for `passenger_count` travellers at `base_price` each.
///
/// Callers validate inputs first: `base_price` is non-negative and
/// `passenger_count` is within 1..=9. A price too large to represent the
/// total is rejected rather than overflowing.
pub fn compute_fare(base_price: Decimal, passenger_count: u8) -> AppResult<FareBreakdown> {
    let out_of_range =
        || AppError::Validation(format!("Fare for price {} is out of range", base_price));

    let base_fare = base_price
        .checked_mul(Decimal::from(passenger_count))
        .ok_or_else(out_of_range)?;
    let tax = base_fare.checked_mul(TAX_RATE).ok_or_else(out_of_range)?;
    let total = base_fare
        .checked_add(tax)
        .and_then(|sum| sum.checked_add(CONVENIENCE_FEE))
        .ok_or_else(out_of_range)?;

    Ok(FareBreakdown {
        base_price,
        passenger_count,
        base_fare,
        tax_rate: TAX_RATE,
        tax,
        convenience_fee: CONVENIENCE_FEE,
        total,
    })
}

/// Whole currency units, half away from zero.
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
