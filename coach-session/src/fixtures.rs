use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use coach_core::{BookingGateway, GatewayError, ScheduleQuery};
use coach_shared::{
    BookingRequest, BookingResponse, ContactInfo, Gender, LayoutPayload, Location, Passenger, Seat,
    SeatSchemaPayload, SeatStatus, SelectedSeat, Trip,
};
use std::sync::Mutex;

pub const UNIT_PRICE: i32 = 695;

pub fn trip(id: &str) -> Trip {
    Trip {
        id: id.to_string(),
        company: "Anadolu Express".to_string(),
        from: "IST".to_string(),
        to: "ANK".to_string(),
        departure: Utc.with_ymd_and_hms(2026, 11, 2, 9, 30, 0).unwrap(),
        arrival: Utc.with_ymd_and_hms(2026, 11, 2, 15, 0, 0).unwrap(),
        price: UNIT_PRICE,
        available_seats: 30,
    }
}

pub fn selected(numbers: &[u32]) -> Vec<SelectedSeat> {
    numbers
        .iter()
        .map(|&number| {
            SelectedSeat::new(Seat { number, row: 1, column: number, status: SeatStatus::Empty }, UNIT_PRICE)
        })
        .collect()
}

pub fn passengers(seats: &[u32]) -> Vec<Passenger> {
    seats
        .iter()
        .map(|&seat| Passenger {
            seat,
            first_name: format!("Yolcu{}", seat),
            last_name: "Demir".to_string(),
            id_no: "10000000146".into(),
            gender: Gender::Female,
        })
        .collect()
}

pub fn contact() -> ContactInfo {
    ContactInfo { email: "traveller@example.com".into(), phone: "+905551112233".into() }
}

pub fn schema_payload(trip_id: &str, cells: Vec<Vec<i32>>) -> SeatSchemaPayload {
    SeatSchemaPayload {
        trip_id: trip_id.to_string(),
        layout: LayoutPayload { rows: cells.len(), cols: cells.first().map_or(0, Vec::len), cells },
        seats: Vec::new(),
        unit_price: UNIT_PRICE,
    }
}

fn unavailable(endpoint: &str) -> GatewayError {
    GatewayError::Network { endpoint: endpoint.to_string(), reason: "connection refused".to_string() }
}

/// Scripted gateway. Seat map and booking answers are set per test.
pub struct FakeGateway {
    schema: Mutex<Result<SeatSchemaPayload, GatewayError>>,
    booking: Mutex<Result<BookingResponse, GatewayError>>,
    submitted: Mutex<Vec<BookingRequest>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            schema: Mutex::new(Ok(schema_payload("TRIP-1001", vec![vec![0, 0, 2, 0, 0]]))),
            booking: Mutex::new(Ok(BookingResponse {
                ok: true,
                pnr: "PNR-4821".to_string(),
                message: String::new(),
            })),
            submitted: Mutex::new(Vec::new()),
        }
    }
}

impl FakeGateway {
    pub fn put_schema(&self, payload: SeatSchemaPayload) {
        *self.schema.lock().unwrap() = Ok(payload);
    }

    pub fn fail_schema(&self) {
        *self.schema.lock().unwrap() = Err(unavailable("/seatSchemas"));
    }

    pub fn answer_booking(&self, answer: Result<BookingResponse, GatewayError>) {
        *self.booking.lock().unwrap() = answer;
    }

    pub fn submitted(&self) -> Vec<BookingRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingGateway for FakeGateway {
    async fn fetch_locations(&self) -> Result<Vec<Location>, GatewayError> {
        Ok(vec![Location { id: "IST".to_string(), name: "Istanbul".to_string() }])
    }

    async fn fetch_schedules(&self, _query: &ScheduleQuery) -> Result<Vec<Trip>, GatewayError> {
        Ok(vec![trip("TRIP-1001")])
    }

    async fn fetch_seat_schema(&self, _trip_id: &str) -> Result<SeatSchemaPayload, GatewayError> {
        self.schema.lock().unwrap().clone()
    }

    async fn submit_booking(&self, request: &BookingRequest) -> Result<BookingResponse, GatewayError> {
        self.submitted.lock().unwrap().push(request.clone());
        self.booking.lock().unwrap().clone()
    }
}

pub fn gateway_down() -> GatewayError {
    unavailable("/tickets/sell")
}
