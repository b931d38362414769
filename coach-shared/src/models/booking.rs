use serde::{Deserialize, Serialize};
use crate::pii::Masked;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// One traveller, bound to a selected seat by seat number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub seat: u32,
    pub first_name: String,
    pub last_name: String,
    pub id_no: Masked<String>,
    pub gender: Gender,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: Masked<String>,
    pub phone: Masked<String>,
}

/// Body of the booking submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub trip_id: String,
    pub seats: Vec<u32>,
    pub contact: ContactInfo,
    pub passengers: Vec<Passenger>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingResponse {
    pub ok: bool,
    pub pnr: String,
    #[serde(default)]
    pub message: String,
}
