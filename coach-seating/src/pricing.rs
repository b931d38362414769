use coach_shared::SelectedSeat;
use serde::{Deserialize, Serialize};

/// Sum of the prices attached to each selected seat. Saturates instead of
/// overflowing.
pub fn total(seats: &[SelectedSeat]) -> i32 {
    seats.iter().fold(0i32, |acc, s| acc.saturating_add(s.unit_price))
}

/// Amounts shown on the review and success screens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub seat_count: usize,
    pub base_fare: i32,
    /// Always 0 for now
    pub discount: i32,
    /// Always 0 for now
    pub service_fee: i32,
    pub total: i32,
    pub currency: String,
}

/// Checkout pricing. Seats are priced individually; nothing is derived from
/// the schema price times the seat count.
#[derive(Debug, Clone)]
pub struct CheckoutPricing {
    currency: String,
}

impl CheckoutPricing {
    pub fn new(currency: impl Into<String>) -> Self {
        Self { currency: currency.into() }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn breakdown(&self, seats: &[SelectedSeat]) -> PriceBreakdown {
        let base_fare = total(seats);
        // Discounts and fees plug in here once they exist
        let discount = 0;
        let service_fee = 0;

        PriceBreakdown {
            seat_count: seats.len(),
            base_fare,
            discount,
            service_fee,
            total: base_fare - discount + service_fee,
            currency: self.currency.clone(),
        }
    }
}

impl Default for CheckoutPricing {
    fn default() -> Self {
        Self::new("TRY")
    }
}
