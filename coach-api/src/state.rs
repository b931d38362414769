use coach_core::BookingGateway;
use coach_seating::CheckoutPricing;
use coach_session::{BookingSession, Checkout, RequestGuard, SeatSelectionScreen};
use coach_store::app_config::BusinessRules;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything the booking flow keeps between requests
#[derive(Debug)]
pub struct FlowState {
    pub session: BookingSession,
    /// Seat map of the trip currently being seated, loaded once per trip
    pub seat_screen: Option<SeatSelectionScreen>,
    /// Key of the seat map fetch allowed to land
    pub seat_request: RequestGuard<String>,
    pub checkout: Checkout,
}

impl FlowState {
    pub fn new(business_rules: &BusinessRules) -> Self {
        Self {
            session: BookingSession::new(),
            seat_screen: None,
            seat_request: RequestGuard::new(),
            checkout: Checkout::new(CheckoutPricing::new(business_rules.currency.clone())),
        }
    }

    /// Forget the loaded seat map and anything still in flight for it
    pub fn leave_seat_selection(&mut self) {
        self.seat_screen = None;
        self.seat_request.cancel();
    }
}

/// Never hold `flow` across a gateway call
#[derive(Clone)]
pub struct AppState {
    pub flow: Arc<Mutex<FlowState>>,
    pub gateway: Arc<dyn BookingGateway>,
    pub business_rules: BusinessRules,
}

impl AppState {
    pub fn new(gateway: Arc<dyn BookingGateway>, business_rules: BusinessRules) -> Self {
        Self {
            flow: Arc::new(Mutex::new(FlowState::new(&business_rules))),
            gateway,
            business_rules,
        }
    }
}
